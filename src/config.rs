//! # Generator Configuration
//!
//! Options controlling one generation run. They can come from command-line
//! flags, from a TOML file, or both (flags win field by field).
//!
//! ## Example `fsrouter.toml`
//!
//! ```toml
//! api_root = "api"
//! output_path = "routes_gen.go"
//! package_name = "main"
//! import_prefix = "example.com/app/api"
//! middleware_package = "example.com/app/middleware"
//! global_middlewares = ["Logging", "Cors"]
//! not_found_handler = "example.com/app/handlers.NotFound"
//!
//! [group_middlewares]
//! users = ["Auth"]
//! admin = "AdminAuth,Audit"
//! ```
//!
//! Middleware lists accept either an array or a comma-separated string, in
//! the TOML file and in the `--group-middlewares` JSON alike.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ConfigError;
use crate::ident::{is_generated_name, is_go_identifier};

/// Default directory scanned for handlers.
pub const DEFAULT_API_ROOT: &str = "api";
/// Default generated file.
pub const DEFAULT_OUTPUT_PATH: &str = "routes_gen.go";
/// Default package of the generated file.
pub const DEFAULT_PACKAGE_NAME: &str = "main";
/// Global middleware applied when nothing else is configured on the command line.
pub const DEFAULT_GLOBAL_MIDDLEWARE: &str = "loggingMiddleware";

/// Configuration for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Directory scanned for handler packages
    pub api_root: PathBuf,
    /// File the generated router is written to
    pub output_path: PathBuf,
    /// `package` clause of the generated file
    pub package_name: String,
    /// Import path of `api_root`; handler directories are appended to it
    pub import_prefix: String,
    /// Package the middleware names resolve against, imported as `mw`
    pub middleware_package: Option<String>,
    /// Middleware attached to the root router, in order
    #[serde(deserialize_with = "deserialize_names")]
    pub global_middlewares: Vec<String>,
    /// Middleware per top-level group, in order
    #[serde(deserialize_with = "deserialize_group_map")]
    pub group_middlewares: BTreeMap<String, Vec<String>>,
    /// Custom not-found handler as `import/path.Symbol`
    pub not_found_handler: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            api_root: PathBuf::from(DEFAULT_API_ROOT),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            import_prefix: String::new(),
            middleware_package: None,
            global_middlewares: Vec::new(),
            group_middlewares: BTreeMap::new(),
            not_found_handler: None,
        }
    }
}

/// A parsed `import/path.Symbol` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFoundRef {
    pub import_path: String,
    pub symbol: String,
}

impl GeneratorConfig {
    /// Load a configuration from a TOML file.
    ///
    /// Relative `api_root` and `output_path` are kept as written; they are
    /// resolved against the working directory like command-line paths.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check every option before any filesystem work starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.import_prefix.trim().is_empty() {
            return Err(ConfigError::MissingOption("import_prefix"));
        }
        check_import_path("import_prefix", &self.import_prefix)?;
        if !is_go_identifier(&self.package_name) {
            return Err(ConfigError::InvalidIdentifier {
                option: "package_name",
                value: self.package_name.clone(),
            });
        }
        if let Some(pkg) = &self.middleware_package {
            check_import_path("middleware_package", pkg)?;
        }
        let bare = self.middleware_package.is_none();
        for name in self
            .global_middlewares
            .iter()
            .chain(self.group_middlewares.values().flatten())
        {
            check_middleware_name(name, bare)?;
        }
        self.not_found()?;
        Ok(())
    }

    /// The configured not-found handler, if any.
    pub fn not_found(&self) -> Result<Option<NotFoundRef>, ConfigError> {
        self.not_found_handler
            .as_deref()
            .map(parse_not_found)
            .transpose()
    }

    /// Full import path of a handler directory relative to the API root.
    pub fn handler_import_path(&self, relative: &str) -> String {
        let prefix = self.import_prefix.trim().trim_end_matches('/');
        if relative.is_empty() {
            prefix.to_string()
        } else {
            format!("{prefix}/{relative}")
        }
    }

    /// How a middleware name is referenced from the generated file.
    pub fn middleware_ref(&self, name: &str) -> String {
        match self.middleware_package {
            Some(_) => format!("mw.{name}"),
            None => name.to_string(),
        }
    }
}

/// Split a comma-separated list, trimming items and dropping empty ones.
pub fn split_names(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse the `--group-middlewares` JSON object.
///
/// Values may be comma-separated strings (`{"users":"auth,rate"}`) or arrays
/// (`{"users":["auth","rate"]}`). An empty or blank input is an empty map.
pub fn parse_group_middlewares(json: &str) -> Result<BTreeMap<String, Vec<String>>, ConfigError> {
    if json.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    let raw: BTreeMap<String, NameList> =
        serde_json::from_str(json).map_err(ConfigError::GroupMiddlewares)?;
    Ok(raw
        .into_iter()
        .map(|(group, names)| (group, names.into_names()))
        .collect())
}

/// Parse `import/path.Symbol`.
pub fn parse_not_found(reference: &str) -> Result<NotFoundRef, ConfigError> {
    let invalid = || ConfigError::NotFoundHandler(reference.to_string());
    let (import_path, symbol) = reference.trim().rsplit_once('.').ok_or_else(invalid)?;
    if import_path.is_empty()
        || import_path.ends_with('/')
        || !is_plain_import_path(import_path)
        || !is_go_identifier(symbol)
    {
        return Err(invalid());
    }
    Ok(NotFoundRef {
        import_path: import_path.to_string(),
        symbol: symbol.to_string(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NameList {
    Joined(String),
    List(Vec<String>),
}

impl NameList {
    fn into_names(self) -> Vec<String> {
        match self {
            NameList::Joined(s) => split_names(&s),
            NameList::List(items) => items
                .iter()
                .flat_map(|item| split_names(item))
                .collect(),
        }
    }
}

fn deserialize_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    NameList::deserialize(deserializer).map(NameList::into_names)
}

fn deserialize_group_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, NameList>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(group, names)| (group, names.into_names()))
        .collect())
}

/// Bare names share the generated file's scope; `mw.`-qualified ones do not.
fn check_middleware_name(name: &str, bare: bool) -> Result<(), ConfigError> {
    if !is_go_identifier(name) {
        return Err(ConfigError::InvalidIdentifier {
            option: "middleware",
            value: name.to_string(),
        });
    }
    if bare && is_generated_name(name) {
        return Err(ConfigError::ReservedMiddlewareName(name.to_string()));
    }
    Ok(())
}

fn check_import_path(option: &'static str, path: &str) -> Result<(), ConfigError> {
    if is_plain_import_path(path.trim()) {
        Ok(())
    } else {
        Err(ConfigError::InvalidIdentifier {
            option,
            value: path.to_string(),
        })
    }
}

/// Import paths end up inside a Go string literal; keep them free of quotes,
/// backslashes and whitespace.
fn is_plain_import_path(path: &str) -> bool {
    !path.is_empty()
        && !path
            .chars()
            .any(|c| c == '"' || c == '\\' || c == '`' || c.is_whitespace() || c.is_control())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> GeneratorConfig {
        GeneratorConfig {
            import_prefix: "example.com/app/api".to_string(),
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_defaults() {
        let cfg = GeneratorConfig::default();
        assert_eq!(cfg.api_root, PathBuf::from("api"));
        assert_eq!(cfg.output_path, PathBuf::from("routes_gen.go"));
        assert_eq!(cfg.package_name, "main");
        assert!(cfg.global_middlewares.is_empty());
    }

    #[test]
    fn test_missing_import_prefix() {
        let err = GeneratorConfig::default().validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingOption("import_prefix")));
    }

    #[test]
    fn test_invalid_names_rejected() {
        let mut cfg = base();
        cfg.package_name = "my-pkg".to_string();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidIdentifier { option: "package_name", .. })
        ));

        let mut cfg = base();
        cfg.global_middlewares = vec!["auth-mw".to_string()];
        assert!(cfg.validate().is_err());

        let mut cfg = base();
        cfg.group_middlewares
            .insert("users".to_string(), vec!["ok".to_string(), "not ok".to_string()]);
        assert!(cfg.validate().is_err());

        let mut cfg = base();
        cfg.import_prefix = "example.com/\"api".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_bare_middleware_cannot_shadow_generated_names() {
        for name in ["r", "http", "usersRouter", "api_users", "defaultNotFoundHandler"] {
            let mut cfg = base();
            cfg.global_middlewares = vec![name.to_string()];
            assert!(
                matches!(cfg.validate(), Err(ConfigError::ReservedMiddlewareName(ref n)) if n == name),
                "{name}"
            );
        }

        let mut cfg = base();
        cfg.group_middlewares
            .insert("users".to_string(), vec!["json".to_string()]);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::ReservedMiddlewareName(_))
        ));

        // Qualified as mw.http, no clash
        let mut cfg = base();
        cfg.middleware_package = Some("example.com/app/middleware".to_string());
        cfg.global_middlewares = vec!["http".to_string(), "r".to_string()];
        cfg.validate().unwrap();
    }

    #[test]
    fn test_split_names() {
        assert_eq!(split_names("A, B ,,C,"), vec!["A", "B", "C"]);
        assert!(split_names("").is_empty());
    }

    #[test]
    fn test_parse_group_middlewares() {
        let map = parse_group_middlewares(
            r#"{"users":"authMiddleware","admin":["adminAuth","loggingMiddleware"]}"#,
        )
        .unwrap();
        assert_eq!(map["users"], vec!["authMiddleware"]);
        assert_eq!(map["admin"], vec!["adminAuth", "loggingMiddleware"]);
        assert!(parse_group_middlewares("  ").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_group_middlewares() {
        assert!(matches!(
            parse_group_middlewares(r#"{"users": 3}"#),
            Err(ConfigError::GroupMiddlewares(_))
        ));
        assert!(parse_group_middlewares("{users:").is_err());
        assert!(parse_group_middlewares(r#"["users"]"#).is_err());
    }

    #[test]
    fn test_parse_not_found() {
        let nf = parse_not_found("example.com/app/handlers.NotFound").unwrap();
        assert_eq!(nf.import_path, "example.com/app/handlers");
        assert_eq!(nf.symbol, "NotFound");

        let nf = parse_not_found("customHandlers.NotFound").unwrap();
        assert_eq!(nf.import_path, "customHandlers");

        for bad in ["NotFound", ".NotFound", "pkg.", "pkg/.X", "pkg.Not-Found", "a b.X"] {
            assert!(parse_not_found(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_handler_import_path() {
        let mut cfg = base();
        assert_eq!(cfg.handler_import_path(""), "example.com/app/api");
        assert_eq!(
            cfg.handler_import_path("users/[userId]"),
            "example.com/app/api/users/[userId]"
        );
        cfg.import_prefix = "example.com/app/api/".to_string();
        assert_eq!(cfg.handler_import_path("users"), "example.com/app/api/users");
    }

    #[test]
    fn test_middleware_ref() {
        let mut cfg = base();
        assert_eq!(cfg.middleware_ref("auth"), "auth");
        cfg.middleware_package = Some("example.com/app/middleware".to_string());
        assert_eq!(cfg.middleware_ref("Auth"), "mw.Auth");
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fsrouter.toml");
        std::fs::write(
            &path,
            r#"
import_prefix = "example.com/app/api"
package_name = "routes"
global_middlewares = "Logging, Cors, Logging"

[group_middlewares]
users = ["Auth"]
admin = "AdminAuth,Audit"
"#,
        )
        .unwrap();
        let cfg = GeneratorConfig::from_file(&path).unwrap();
        assert_eq!(cfg.package_name, "routes");
        assert_eq!(cfg.api_root, PathBuf::from("api"));
        assert_eq!(cfg.global_middlewares, vec!["Logging", "Cors", "Logging"]);
        assert_eq!(cfg.group_middlewares["admin"], vec!["AdminAuth", "Audit"]);
        cfg.validate().unwrap();
    }

    #[test]
    fn test_from_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            GeneratorConfig::from_file(&dir.path().join("missing.toml")),
            Err(ConfigError::ReadFile { .. })
        ));
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "unknown_option = true\n").unwrap();
        assert!(matches!(
            GeneratorConfig::from_file(&path),
            Err(ConfigError::ParseFile { .. })
        ));
    }
}

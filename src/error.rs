//! Error types for route generation.
//!
//! Every fatal condition is raised before anything is written to the output
//! path, so a failed run never leaves a partial file behind. Non-fatal
//! findings (see [`crate::middleware::MiddlewareWarning`]) are returned
//! alongside a successful result instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::tree::HttpMethod;

/// Invalid or incomplete generator configuration.
///
/// Raised by [`crate::config::GeneratorConfig::validate`] before the API
/// directory is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required option was not provided
    #[error("missing required option `{0}`")]
    MissingOption(&'static str),

    /// A value that must be a Go identifier is not one
    #[error("invalid {option} `{value}`: expected a Go identifier")]
    InvalidIdentifier {
        /// Option the value came from
        option: &'static str,
        /// The offending value
        value: String,
    },

    /// A bare middleware name that the generated file already declares
    #[error("middleware name `{0}` clashes with a name in the generated file; set a middleware package or rename it")]
    ReservedMiddlewareName(String),

    /// The group middleware mapping is not a JSON object of strings or string arrays
    #[error("malformed group middleware mapping: {0}")]
    GroupMiddlewares(#[source] serde_json::Error),

    /// The not-found handler is not of the form `import/path.Symbol`
    #[error("invalid not-found handler `{0}`: expected `package.Symbol`")]
    NotFoundHandler(String),

    /// The configuration file could not be read
    #[error("failed to read config file {path}")]
    ReadFile {
        /// Config file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::config::GeneratorConfig`]
    #[error("failed to parse config file {path}")]
    ParseFile {
        /// Config file path
        path: PathBuf,
        /// Underlying TOML error
        #[source]
        source: toml::de::Error,
    },
}

/// The API directory tree cannot be mapped to routes unambiguously.
#[derive(Debug, Error)]
pub enum StructureError {
    /// Brackets that do not wrap the whole directory name exactly once
    #[error("malformed bracket syntax in directory {path}")]
    MalformedBrackets {
        /// Offending directory
        path: PathBuf,
    },

    /// `[]` with nothing inside
    #[error("empty parameter name in directory {path}")]
    EmptyParameter {
        /// Offending directory
        path: PathBuf,
    },

    /// Parameter contains characters the router would misread
    #[error("invalid parameter name `{param}` in directory {path}")]
    InvalidParameter {
        /// Offending directory
        path: PathBuf,
        /// Interior of the brackets
        param: String,
    },

    /// Static directory name containing `{` or `}`
    #[error("directory name {path} contains a brace; use [param] for path parameters")]
    BraceInStatic {
        /// Offending directory
        path: PathBuf,
    },

    /// Directory name that is not valid UTF-8
    #[error("directory name is not valid UTF-8: {path}")]
    NonUtf8Name {
        /// Offending entry
        path: PathBuf,
    },

    /// Two dynamic directories under one parent
    #[error("ambiguous dynamic segments in {path}: [{first}] and [{second}]")]
    AmbiguousDynamic {
        /// Parent directory
        path: PathBuf,
        /// Parameter seen first
        first: String,
        /// Conflicting parameter
        second: String,
    },

    /// A parameter name already captured by an ancestor directory
    #[error("duplicate parameter `{param}` in directory {path}")]
    DuplicateParameter {
        /// Offending directory
        path: PathBuf,
        /// Parameter captured twice on one path
        param: String,
    },

    /// Two handler files mapping to the same method in one directory
    #[error("duplicate {method} handler in {path}")]
    DuplicateMethod {
        /// Directory holding both handlers
        path: PathBuf,
        /// Method claimed twice
        method: HttpMethod,
    },
}

/// Any fatal failure of a generation run.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Malformed directory structure
    #[error(transparent)]
    Structure(#[from] StructureError),

    /// The API tree could not be read
    #[error("failed to read {path}")]
    Filesystem {
        /// Path being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A symbolic link points back at one of its ancestors
    #[error("symbolic link cycle at {path}")]
    SymlinkCycle {
        /// Link that closes the cycle
        path: PathBuf,
    },

    /// The template failed to render
    #[error("failed to render routes template")]
    Render(#[from] askama::Error),

    /// The generated file could not be written
    #[error("failed to write {path}")]
    Write {
        /// Output path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Shorthand used across the crate.
pub type Result<T, E = GenerateError> = std::result::Result<T, E>;

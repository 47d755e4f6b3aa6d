#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

pub mod api_tree {
    use std::fs;
    use std::path::{Path, PathBuf};

    use fsrouter::GeneratorConfig;
    use tempfile::TempDir;

    /// Import path used for every scratch API tree.
    pub const IMPORT_PREFIX: &str = "example.com/app/api";

    /// A scratch project: `<tmp>/api` plus a generated file next to it.
    pub struct ApiTree {
        pub dir: TempDir,
    }

    impl ApiTree {
        /// Create an API tree containing `files` (paths relative to `api/`).
        pub fn with_files(files: &[&str]) -> Self {
            let dir = tempfile::tempdir().unwrap();
            fs::create_dir_all(dir.path().join("api")).unwrap();
            let tree = ApiTree { dir };
            for f in files {
                tree.add_file(f);
            }
            tree
        }

        pub fn api_root(&self) -> PathBuf {
            self.dir.path().join("api")
        }

        pub fn output_path(&self) -> PathBuf {
            self.dir.path().join("routes_gen.go")
        }

        pub fn add_file(&self, rel: &str) -> PathBuf {
            let path = self.api_root().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, handler_source(&path)).unwrap();
            path
        }

        pub fn add_dir(&self, rel: &str) -> PathBuf {
            let path = self.api_root().join(rel);
            fs::create_dir_all(&path).unwrap();
            path
        }

        pub fn config(&self) -> GeneratorConfig {
            GeneratorConfig {
                api_root: self.api_root(),
                output_path: self.output_path(),
                import_prefix: IMPORT_PREFIX.to_string(),
                ..GeneratorConfig::default()
            }
        }

        pub fn generated(&self) -> String {
            fs::read_to_string(self.output_path()).unwrap()
        }
    }

    fn handler_source(path: &Path) -> String {
        let pkg = path
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().replace(['[', ']'], ""))
            .unwrap_or_else(|| "api".to_string());
        format!("package {pkg}\n")
    }
}

pub mod source {
    /// Byte offset of `needle`, panicking with the whole source when absent.
    pub fn position(source: &str, needle: &str) -> usize {
        source
            .find(needle)
            .unwrap_or_else(|| panic!("`{needle}` not found in:\n{source}"))
    }

    /// `HandleFunc` lines in emission order, whitespace trimmed.
    pub fn route_lines(source: &str) -> Vec<String> {
        source
            .lines()
            .map(str::trim)
            .filter(|l| l.contains(".HandleFunc("))
            .map(str::to_string)
            .collect()
    }
}

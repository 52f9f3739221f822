use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Vendor base stylesheet used by fixtures.
pub const VENDOR_BASE_CSS: &str = "html {\n  font-family: sans-serif;\n}\n\n.pure-button {\n  display: inline-block;\n  padding: 0.5em 1em;\n}\n";

/// Vendor grid stylesheet used by fixtures.
pub const VENDOR_GRID_CSS: &str = "@media screen and (min-width: 35.5em) {\n  .pure-u-sm-1 {\n    width: 100%;\n  }\n}\n";

/// Site stylesheet; plain CSS is valid input for the structured language.
pub const SITE_SOURCE: &str = "body {\n  color: #ff0000;\n  margin: 0px;\n}\n\n.header .title {\n  font-weight: bold;\n}\n";

/// Scratch project laid out like the built-in config expects.
pub struct Project {
    dir: TempDir,
}

impl Project {
    /// Create a project with the vendor stylesheets and the site source.
    pub fn new() -> Self {
        let project = Self {
            dir: TempDir::new().expect("create temp project dir"),
        };
        project.write("node_modules/purecss/build/pure.css", VENDOR_BASE_CSS);
        project.write(
            "node_modules/purecss/build/grids-responsive.css",
            VENDOR_GRID_CSS,
        );
        project.write("styles/less/main.less", SITE_SOURCE);
        project
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    pub fn write(&self, rel: &str, contents: &str) {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture dir");
        }
        fs::write(path, contents).expect("write fixture file");
    }

    pub fn read(&self, rel: &str) -> Vec<u8> {
        fs::read(self.path(rel)).expect("read project file")
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.path(rel).is_file()
    }

    pub fn remove(&self, rel: &str) {
        fs::remove_file(self.path(rel)).expect("remove project file");
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}

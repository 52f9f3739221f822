#![allow(dead_code)]

pub use stylepipe_test_utils::builders::ConfigFileBuilder;
pub use stylepipe_test_utils::fake_executor::FakeExecutor;
pub use stylepipe_test_utils::project::{
    Project, SITE_SOURCE, VENDOR_BASE_CSS, VENDOR_GRID_CSS,
};
pub use stylepipe_test_utils::{eventually, init_tracing, with_timeout};

use stylepipe::config::ConfigFile;

/// Declared outputs of the built-in layout, in execution order.
pub const COMPILED: &str = "styles/css/main.css";
pub const MIN_BASE: &str = "styles/mincss/pure.css";
pub const MIN_GRID: &str = "styles/mincss/grids-responsive-min.css";
pub const MIN_SITE: &str = "styles/mincss/main.css";
pub const BUNDLE: &str = "styles/dist/style.css";

/// Built-in layout with a compiler that needs no Node toolchain.
pub fn portable_config() -> ConfigFile {
    ConfigFileBuilder::new().compile_cmd("cat {input}").build()
}

//! XML run configuration: which checker bundles and report modules to run
//! and with which parameters.

mod loader;
mod merge;
mod model;

pub use model::{
    Configuration, ConfigurationChecker, ConfigurationCheckerBundle, ConfigurationReportModule,
    DEFAULT_MAX_LEVEL, DEFAULT_MIN_LEVEL, TAG_CONFIG, TAG_CONFIG_CHECKER,
    TAG_CONFIG_CHECKER_BUNDLE, TAG_REPORT_MODULE,
};

//! Pools the result files of several checker bundles into one report.

mod resolver;
mod scanner;

pub use resolver::{
    LocationResolver, OPENDRIVE_XPATH_PREFIX, OPENSCENARIO_XPATH_PREFIX, resolve_file_locations,
};
pub use scanner::{RESULT_EXTENSION, find_result_files};

use std::collections::HashMap;
use std::path::Path;

use log::{debug, info, warn};

use crate::config::Configuration;
use crate::error::Result;
use crate::result::ResultContainer;

/// Bundle parameter naming the result file a bundle writes.
pub const PARAM_RESULT_FILE: &str = "strResultFile";
pub const DEFAULT_RESULT_FILE: &str = "Result.xqar";

/// Accumulates results from many files and prepares them for a single
/// pooled report.
#[derive(Debug, Default)]
pub struct ResultPooler {
    container: ResultContainer,
}

impl ResultPooler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn container(&self) -> &ResultContainer {
        &self.container
    }

    #[must_use]
    pub fn into_container(self) -> ResultContainer {
        self.container
    }

    /// Loads every result file in `dir`. Returns the number of files read.
    ///
    /// # Errors
    /// Returns an error if `dir` cannot be listed. Unreadable result files
    /// are logged and skipped.
    pub fn collect_directory(&mut self, dir: &Path, exclude_file_name: Option<&str>) -> Result<usize> {
        let files = find_result_files(dir, exclude_file_name)?;
        info!("Collecting {} result file(s) from {}", files.len(), dir.display());
        for file in &files {
            debug!("Reading {}", file.display());
            self.container.add_results_from_xml(file);
        }
        Ok(files.len())
    }

    /// Loads `dir/<strResultFile>` for every configured checker bundle.
    /// Bundles without the parameter or whose file is missing are skipped.
    /// Returns the number of bundles added.
    pub fn collect_configured(&mut self, dir: &Path, configuration: &Configuration) -> usize {
        let mut added = 0;
        for bundle in configuration.checker_bundles() {
            let Some(file_name) = bundle.params().get(PARAM_RESULT_FILE) else {
                warn!(
                    "Checker bundle '{}' has no {PARAM_RESULT_FILE}, skipping",
                    bundle.application()
                );
                continue;
            };
            let path = dir.join(file_name);
            if !path.exists() {
                warn!("Result file {} not found, skipping", path.display());
                continue;
            }
            added += self.container.add_results_from_xml(&path);
        }
        added
    }

    /// Drops checkers the configuration does not list and issues outside
    /// each configured checker's severity window. A configured bundle with
    /// no checker entries is left as is. Returns the number of issues
    /// removed.
    pub fn apply_configuration(&mut self, configuration: &Configuration) -> usize {
        let mut removed = 0;
        for config_bundle in configuration.checker_bundles() {
            let application = config_bundle.application();
            let Some(bundle) = self.container.checker_bundle_by_name_mut(application) else {
                warn!("Checker bundle '{application}' not found in results, skipping");
                continue;
            };

            let configured: Vec<&str> = config_bundle.checker_ids().collect();
            if configured.is_empty() {
                continue;
            }
            let dropped = bundle.keep_checkers_from(&configured);
            if dropped > 0 {
                debug!("Dropped {dropped} unconfigured checker(s) from '{application}'");
            }

            for config_checker in config_bundle.checkers() {
                let checker_id = config_checker.checker_id();
                let Some(checker) = bundle.checker_by_id_mut(checker_id) else {
                    warn!("Checker '{checker_id}' not found in bundle '{application}', skipping");
                    continue;
                };
                let filtered =
                    checker.filter_issues(config_checker.min_level(), config_checker.max_level());
                if filtered > 0 {
                    info!(
                        "Filtered {filtered} issue(s) of checker '{checker_id}', keeping levels {} to {}",
                        config_checker.max_level(),
                        config_checker.min_level()
                    );
                }
                removed += filtered;
            }
        }
        removed
    }

    /// Renames repeated bundle names by appending their occurrence count:
    /// `abc`, `abc1`, `abc2`, ...
    pub fn deduplicate_bundle_names(&mut self) {
        let mut seen: HashMap<String, usize> = HashMap::new();
        for bundle in self.container.checker_bundles_mut() {
            let count = seen.entry(bundle.name().to_string()).or_insert(0);
            if *count > 0 {
                let renamed = format!("{}{count}", bundle.name());
                debug!("Renaming duplicate bundle '{}' to '{renamed}'", bundle.name());
                bundle.set_name(renamed);
            }
            *count += 1;
        }
    }

    /// See [`resolve_file_locations`].
    pub fn resolve_file_locations(&mut self, resolver: &dyn LocationResolver) -> usize {
        resolve_file_locations(&mut self.container, resolver)
    }

    /// Writes the pooled report to `output` and hands back the container.
    ///
    /// # Errors
    /// Returns an error if the report cannot be written.
    pub fn finish(self, output: &Path) -> Result<ResultContainer> {
        info!(
            "Writing pooled report with {} bundle(s) to {}",
            self.container.checker_bundle_count(),
            output.display()
        );
        self.container.write_results(output)?;
        Ok(self.container)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

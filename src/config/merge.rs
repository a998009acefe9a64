use super::model::Configuration;

impl Configuration {
    /// Appends every bundle, checker and report module of `other` and lets
    /// its global params overwrite ours.
    ///
    /// Entries are not matched by name: merging a configuration that
    /// shares a bundle with this one yields two entries for it.
    pub fn add_configuration(&mut self, other: &Self) {
        self.params.overwrite(&other.params);

        for bundle in &other.checker_bundles {
            let merged = self.add_checker_bundle(bundle.application());
            merged.params_mut().overwrite(bundle.params());
            for checker in bundle.checkers() {
                merged
                    .add_checker_with_levels(
                        checker.checker_id(),
                        checker.min_level(),
                        checker.max_level(),
                    )
                    .params_mut()
                    .overwrite(checker.params());
            }
        }

        for module in &other.report_modules {
            self.add_report_module(module.application())
                .params_mut()
                .overwrite(module.params());
        }
    }
}

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;

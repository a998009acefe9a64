use std::path::Path;

use log::{debug, error, warn};
use xmltree::Element;

use super::bundle::{CheckerBundle, PARAM_XODR_FILE, PARAM_XOSC_FILE, TAG_CHECKER_BUNDLE};
use super::checker::{Checker, IssueContext};
use super::ids::IdAllocator;
use super::issue::Issue;
use super::level::IssueLevel;
use crate::config::Configuration;
use crate::error::Result;
use crate::xml::{child_elements, push_child, read_document, set_attr, write_document};

pub const TAG_CHECKER_RESULTS: &str = "CheckerResults";
pub const RESULTS_VERSION: &str = "1.0.0";

/// Root of a result tree. Owns every bundle and hands out issue ids that
/// are unique within the container.
#[derive(Debug, Default)]
pub struct ResultContainer {
    bundles: Vec<CheckerBundle>,
    ids: IdAllocator,
}

impl ResultContainer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of `bundle` and connects it to this container's id
    /// counter.
    pub fn add_checker_bundle(&mut self, mut bundle: CheckerBundle) -> &mut CheckerBundle {
        bundle.bind(&self.ids);
        self.bundles.push(bundle);
        let last = self.bundles.len() - 1;
        &mut self.bundles[last]
    }

    pub fn create_checker_bundle(
        &mut self,
        name: impl Into<String>,
        summary: impl Into<String>,
        description: impl Into<String>,
    ) -> &mut CheckerBundle {
        self.add_checker_bundle(CheckerBundle::new(name, summary, description))
    }

    /// Removes every bundle. Ids handed out so far are never reused.
    pub fn clear(&mut self) {
        self.bundles.clear();
    }

    /// Draws a fresh issue id.
    #[must_use]
    pub fn next_free_id(&self) -> u64 {
        self.ids.next_id()
    }

    #[must_use]
    pub fn checker_bundles(&self) -> &[CheckerBundle] {
        &self.bundles
    }

    pub fn checker_bundles_mut(&mut self) -> &mut [CheckerBundle] {
        &mut self.bundles
    }

    /// First bundle with the given name. Names need not be unique.
    #[must_use]
    pub fn checker_bundle_by_name(&self, name: &str) -> Option<&CheckerBundle> {
        self.bundles.iter().find(|b| b.name() == name)
    }

    pub fn checker_bundle_by_name_mut(&mut self, name: &str) -> Option<&mut CheckerBundle> {
        self.bundles.iter_mut().find(|b| b.name() == name)
    }

    #[must_use]
    pub fn has_checker_bundles(&self) -> bool {
        !self.bundles.is_empty()
    }

    #[must_use]
    pub fn checker_bundle_count(&self) -> usize {
        self.bundles.len()
    }

    #[must_use]
    pub fn checker_count(&self) -> usize {
        self.bundles.iter().map(CheckerBundle::checker_count).sum()
    }

    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.bundles.iter().map(CheckerBundle::issue_count).sum()
    }

    #[must_use]
    pub fn issue_count_at(&self, level: IssueLevel) -> usize {
        self.bundles.iter().map(|b| b.issue_count_at(level)).sum()
    }

    pub fn checkers(&self) -> impl Iterator<Item = &Checker> {
        self.bundles.iter().flat_map(|b| b.checkers().iter())
    }

    /// Checkers of every bundle named `bundle_name`.
    pub fn checkers_of<'a>(&'a self, bundle_name: &'a str) -> impl Iterator<Item = &'a Checker> {
        self.bundles
            .iter()
            .filter(move |b| b.name() == bundle_name)
            .flat_map(|b| b.checkers().iter())
    }

    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.checkers().flat_map(|c| c.issues().iter())
    }

    /// Issues of all checkers with the given id, across bundles.
    pub fn issues_by_checker_id<'a>(&'a self, checker_id: &'a str) -> impl Iterator<Item = &'a Issue> {
        self.checkers()
            .filter(move |c| c.checker_id() == checker_id)
            .flat_map(|c| c.issues().iter())
    }

    pub fn issues_by_bundle_name<'a>(&'a self, bundle_name: &'a str) -> impl Iterator<Item = &'a Issue> {
        self.checkers_of(bundle_name).flat_map(|c| c.issues().iter())
    }

    /// Issues of the given checkers, in the order the checkers are listed.
    #[must_use]
    pub fn issues_of<'a>(checkers: &[&'a Checker]) -> Vec<&'a Issue> {
        checkers.iter().flat_map(|c| c.issues().iter()).collect()
    }

    /// Depth-first search over bundles, checkers and issues.
    #[must_use]
    pub fn issue_by_id(&self, id: u64) -> Option<&Issue> {
        self.issues().find(|i| i.issue_id() == id)
    }

    pub fn issue_by_id_mut(&mut self, id: u64) -> Option<&mut Issue> {
        self.bundles
            .iter_mut()
            .flat_map(|b| b.checkers_mut().iter_mut())
            .flat_map(|c| c.issues_mut().iter_mut())
            .find(|i| i.issue_id() == id)
    }

    /// Visits every issue in bundle, checker, issue order.
    pub fn do_processing<F>(&mut self, mut f: F)
    where
        F: FnMut(&IssueContext<'_>, &mut Issue),
    {
        for bundle in &mut self.bundles {
            bundle.process_issues(&mut f);
        }
    }

    /// `XodrFile` of the first bundle that sets it.
    #[must_use]
    pub fn xodr_file_path(&self) -> Option<&str> {
        self.bundles
            .iter()
            .find_map(|b| b.params().get(PARAM_XODR_FILE))
    }

    /// `XoscFile` of the first bundle that sets it.
    #[must_use]
    pub fn xosc_file_path(&self) -> Option<&str> {
        self.bundles
            .iter()
            .find_map(|b| b.params().get(PARAM_XOSC_FILE))
    }

    #[must_use]
    pub fn to_xml(&self) -> Element {
        let mut root = Element::new(TAG_CHECKER_RESULTS);
        set_attr(&mut root, "version", RESULTS_VERSION);
        for bundle in &self.bundles {
            push_child(&mut root, bundle.to_xml());
        }
        root
    }

    /// Writes all results to `path` as a pretty-printed `.xqar` document.
    ///
    /// # Errors
    /// Returns an error if the document cannot be serialized or written.
    pub fn write_results(&self, path: &Path) -> Result<()> {
        debug!(
            "Writing {} bundle(s) with {} issue(s) to {}",
            self.bundles.len(),
            self.issue_count(),
            path.display()
        );
        write_document(path, &self.to_xml())
    }

    /// Loads every `CheckerBundle` of a result file into this container.
    ///
    /// The root element name is not checked. Returns the number of bundles
    /// added.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not well-formed.
    /// The container is left unchanged in that case.
    pub fn try_add_results_from_xml(&mut self, path: &Path) -> Result<usize> {
        let root = read_document(path)?;
        if root.name != TAG_CHECKER_RESULTS {
            warn!(
                "Unexpected root <{}> in {}, reading bundles anyway",
                root.name,
                path.display()
            );
        }

        let mut added = 0;
        for child in child_elements(&root) {
            if child.name == TAG_CHECKER_BUNDLE {
                self.add_checker_bundle(CheckerBundle::from_xml(child));
                added += 1;
            }
        }
        debug!("Loaded {added} bundle(s) from {}", path.display());
        Ok(added)
    }

    /// Like [`Self::try_add_results_from_xml`], but a missing or malformed
    /// file is logged and yields `0`.
    pub fn add_results_from_xml(&mut self, path: &Path) -> usize {
        self.try_add_results_from_xml(path).unwrap_or_else(|e| {
            error!("Could not read results: {e}");
            0
        })
    }

    /// Projects bundle names and params, and checker ids and params, into
    /// `configuration`. Issues, rules, metadata and locations are not
    /// carried over.
    pub fn convert_report_to_configuration(&self, configuration: &mut Configuration) {
        for bundle in &self.bundles {
            let config_bundle = configuration.add_checker_bundle(bundle.name());
            config_bundle.params_mut().overwrite(bundle.params());
            for checker in bundle.checkers() {
                config_bundle
                    .add_checker(checker.checker_id())
                    .params_mut()
                    .overwrite(checker.params());
            }
        }
    }
}

#[cfg(test)]
#[path = "container_tests.rs"]
mod tests;

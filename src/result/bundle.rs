use std::fmt::Display;
use std::path::Path;

use log::debug;
use xmltree::Element;

use super::checker::{Checker, IssueContext, TAG_CHECKER};
use super::ids::IdAllocator;
use super::issue::Issue;
use super::level::IssueLevel;
use crate::params::{ParameterMap, TAG_PARAM};
use crate::xml::{attr, child_elements, push_child, set_attr};

pub const TAG_CHECKER_BUNDLE: &str = "CheckerBundle";
pub const PARAM_XODR_FILE: &str = "XodrFile";
pub const PARAM_XOSC_FILE: &str = "XoscFile";

/// The output of one checker tool: a named group of checkers.
///
/// A bundle may be built on its own and attached to a
/// [`ResultContainer`](super::ResultContainer) later. Issues added before
/// that get their ids on attachment.
#[derive(Debug, Clone)]
pub struct CheckerBundle {
    name: String,
    summary: String,
    description: String,
    build_date: String,
    build_version: String,
    checkers: Vec<Checker>,
    params: ParameterMap,
    ids: Option<IdAllocator>,
}

impl CheckerBundle {
    /// Creates a detached bundle stamped with this crate's version.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        summary: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            summary: summary.into(),
            description: description.into(),
            build_date: String::new(),
            build_version: env!("CARGO_PKG_VERSION").to_string(),
            checkers: Vec::new(),
            params: ParameterMap::new(),
            ids: None,
        }
    }

    /// Creates a checker inside this bundle. This is the only way to obtain
    /// a [`Checker`].
    pub fn create_checker(
        &mut self,
        checker_id: impl Into<String>,
        description: impl Into<String>,
        summary: impl Into<String>,
    ) -> &mut Checker {
        let checker = Checker::new(checker_id, description, summary, self.ids.clone());
        self.checkers.push(checker);
        let last = self.checkers.len() - 1;
        &mut self.checkers[last]
    }

    /// Creates a checker with one `"key = value"` issue per pair, all at
    /// `level`, and refreshes its summary.
    pub fn create_checker_with_issues<K, V>(
        &mut self,
        checker_id: impl Into<String>,
        description: impl Into<String>,
        level: IssueLevel,
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> &mut Checker
    where
        K: Display,
        V: Display,
    {
        let checker = self.create_checker(checker_id, description, "");
        for (key, value) in pairs {
            checker.add_issue(Issue::new(format!("{key} = {value}"), level));
        }
        checker.update_summary();
        checker
    }

    /// First checker with the given id. Duplicate ids are allowed.
    #[must_use]
    pub fn checker_by_id(&self, checker_id: &str) -> Option<&Checker> {
        self.checkers.iter().find(|c| c.checker_id() == checker_id)
    }

    pub fn checker_by_id_mut(&mut self, checker_id: &str) -> Option<&mut Checker> {
        self.checkers
            .iter_mut()
            .find(|c| c.checker_id() == checker_id)
    }

    #[must_use]
    pub fn checkers(&self) -> &[Checker] {
        &self.checkers
    }

    pub fn checkers_mut(&mut self) -> &mut [Checker] {
        &mut self.checkers
    }

    /// Removes every checker whose id is not listed. Returns how many were
    /// removed.
    pub fn keep_checkers_from<S: AsRef<str>>(&mut self, checker_ids: &[S]) -> usize {
        let before = self.checkers.len();
        self.checkers
            .retain(|c| checker_ids.iter().any(|id| id.as_ref() == c.checker_id()));
        before - self.checkers.len()
    }

    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.checkers.iter().flat_map(|c| c.issues().iter())
    }

    #[must_use]
    pub fn checker_count(&self) -> usize {
        self.checkers.len()
    }

    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.checkers.iter().map(Checker::issue_count).sum()
    }

    #[must_use]
    pub fn issue_count_at(&self, level: IssueLevel) -> usize {
        self.checkers.iter().map(|c| c.issue_count_at(level)).sum()
    }

    /// Removes all checkers.
    pub fn clear(&mut self) {
        self.checkers.clear();
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn set_summary(&mut self, summary: impl Into<String>) {
        self.summary = summary.into();
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    #[must_use]
    pub fn build_date(&self) -> &str {
        &self.build_date
    }

    pub fn set_build_date(&mut self, build_date: impl Into<String>) {
        self.build_date = build_date.into();
    }

    #[must_use]
    pub fn build_version(&self) -> &str {
        &self.build_version
    }

    pub fn set_build_version(&mut self, build_version: impl Into<String>) {
        self.build_version = build_version.into();
    }

    #[must_use]
    pub const fn params(&self) -> &ParameterMap {
        &self.params
    }

    pub const fn params_mut(&mut self) -> &mut ParameterMap {
        &mut self.params
    }

    pub fn set_xodr_file_path(&mut self, path: impl Into<String>) {
        self.params.set(PARAM_XODR_FILE, path.into());
    }

    /// Value of the `XodrFile` parameter, empty when unset.
    #[must_use]
    pub fn xodr_file_path(&self) -> &str {
        self.params.get_or(PARAM_XODR_FILE, "")
    }

    #[must_use]
    pub fn xodr_file_name(&self, remove_extension: bool) -> String {
        file_name_of(self.xodr_file_path(), remove_extension)
    }

    pub fn set_xosc_file_path(&mut self, path: impl Into<String>) {
        self.params.set(PARAM_XOSC_FILE, path.into());
    }

    /// Value of the `XoscFile` parameter, empty when unset.
    #[must_use]
    pub fn xosc_file_path(&self) -> &str {
        self.params.get_or(PARAM_XOSC_FILE, "")
    }

    #[must_use]
    pub fn xosc_file_name(&self, remove_extension: bool) -> String {
        file_name_of(self.xosc_file_path(), remove_extension)
    }

    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.ids.is_some()
    }

    /// Joins a container's id counter. Ids already present are claimed
    /// before pending issues draw new ones; an id the container already
    /// uses is replaced by a fresh one.
    pub(crate) fn bind(&mut self, ids: &IdAllocator) {
        self.ids = Some(ids.clone());
        for checker in &mut self.checkers {
            checker.bind_numbered(ids);
        }
        for checker in &mut self.checkers {
            checker.bind_pending(ids);
        }
    }

    pub(crate) fn process_issues<F>(&mut self, f: &mut F)
    where
        F: FnMut(&IssueContext<'_>, &mut Issue),
    {
        let Self {
            name,
            params,
            checkers,
            ..
        } = self;
        for checker in checkers.iter_mut() {
            checker.process_issues(name, params, f);
        }
    }

    #[must_use]
    pub fn to_xml(&self) -> Element {
        let mut element = Element::new(TAG_CHECKER_BUNDLE);
        set_attr(&mut element, "name", &self.name);
        set_attr(&mut element, "summary", &self.summary);
        set_attr(&mut element, "description", &self.description);
        set_attr(&mut element, "build_date", &self.build_date);
        set_attr(&mut element, "version", &self.build_version);

        self.params.write_xml(&mut element);
        for checker in &self.checkers {
            push_child(&mut element, checker.to_xml());
        }
        element
    }

    /// Parses a detached bundle; attach it with
    /// [`ResultContainer::add_checker_bundle`](super::ResultContainer::add_checker_bundle).
    #[must_use]
    pub fn from_xml(element: &Element) -> Self {
        let mut bundle = Self::new(
            attr(element, "name"),
            attr(element, "summary"),
            attr(element, "description"),
        );
        bundle.build_date = attr(element, "build_date").to_string();
        bundle.build_version = attr(element, "version").to_string();

        for child in child_elements(element) {
            match child.name.as_str() {
                TAG_PARAM => bundle.params.parse_xml(child),
                TAG_CHECKER => bundle.checkers.push(Checker::from_xml(child)),
                other => debug!("Ignoring <{other}> inside bundle '{}'", bundle.name),
            }
        }
        bundle
    }
}

fn file_name_of(path: &str, remove_extension: bool) -> String {
    let path = Path::new(path);
    let name = if remove_extension {
        path.file_stem()
    } else {
        path.file_name()
    };
    name.map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "bundle_tests.rs"]
mod tests;

use log::debug;
use xmltree::Element;

use super::ids::IdAllocator;
use super::issue::{Issue, TAG_ISSUE};
use super::level::IssueLevel;
use super::metadata::{Metadata, TAG_METADATA};
use super::rule::{Rule, TAG_ADDRESSED_RULE};
use crate::params::{ParameterMap, TAG_PARAM};
use crate::xml::{attr, child_elements, push_child, set_attr};

pub const TAG_CHECKER: &str = "Checker";
pub const DEFAULT_STATUS: &str = "completed";

/// Where an issue sits in the result tree, handed to
/// [`ResultContainer::do_processing`](super::ResultContainer::do_processing).
#[derive(Debug, Clone, Copy)]
pub struct IssueContext<'a> {
    pub bundle_name: &'a str,
    pub bundle_params: &'a ParameterMap,
    pub checker_id: &'a str,
    pub checker_params: &'a ParameterMap,
}

/// One check inside a checker bundle.
///
/// A checker only exists inside a bundle; it is created through
/// [`CheckerBundle::create_checker`](super::CheckerBundle::create_checker).
///
/// ```compile_fail
/// use qc_results::result::Checker;
///
/// let checker = Checker::new("orphan", "not attached", "");
/// ```
#[derive(Debug, Clone)]
pub struct Checker {
    checker_id: String,
    description: String,
    summary: String,
    status: String,
    issues: Vec<Issue>,
    rules: Vec<Rule>,
    metadata: Vec<Metadata>,
    params: ParameterMap,
    ids: Option<IdAllocator>,
}

impl Checker {
    pub(crate) fn new(
        checker_id: impl Into<String>,
        description: impl Into<String>,
        summary: impl Into<String>,
        ids: Option<IdAllocator>,
    ) -> Self {
        Self {
            checker_id: checker_id.into(),
            description: description.into(),
            summary: summary.into(),
            status: DEFAULT_STATUS.to_string(),
            issues: Vec::new(),
            rules: Vec::new(),
            metadata: Vec::new(),
            params: ParameterMap::new(),
            ids,
        }
    }

    #[must_use]
    pub fn checker_id(&self) -> &str {
        &self.checker_id
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn set_summary(&mut self, summary: impl Into<String>) {
        self.summary = summary.into();
    }

    /// Rewrites the summary from the current issue count. The summary is
    /// not kept in sync automatically.
    pub fn update_summary(&mut self) {
        let count = self.issues.len();
        let noun = if count == 1 { "issue" } else { "issues" };
        self.summary = format!("Found {count} {noun}");
    }

    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Appends an issue and assigns it a fresh id.
    pub fn add_issue(&mut self, mut issue: Issue) -> &mut Issue {
        issue.attach(self.ids.as_ref());
        self.issues.push(issue);
        let last = self.issues.len() - 1;
        &mut self.issues[last]
    }

    pub fn add_rule(&mut self, rule: Rule) -> &mut Rule {
        self.rules.push(rule);
        let last = self.rules.len() - 1;
        &mut self.rules[last]
    }

    pub fn add_metadata(&mut self, metadata: Metadata) -> &mut Metadata {
        self.metadata.push(metadata);
        let last = self.metadata.len() - 1;
        &mut self.metadata[last]
    }

    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn issues_mut(&mut self) -> &mut [Issue] {
        &mut self.issues
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn metadata(&self) -> &[Metadata] {
        &self.metadata
    }

    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    #[must_use]
    pub fn issue_count_at(&self, level: IssueLevel) -> usize {
        self.issues.iter().filter(|i| i.level() == level).count()
    }

    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn metadata_count(&self) -> usize {
        self.metadata.len()
    }

    #[must_use]
    pub fn issue_by_id(&self, id: u64) -> Option<&Issue> {
        self.issues.iter().find(|i| i.issue_id() == id)
    }

    pub fn issue_by_id_mut(&mut self, id: u64) -> Option<&mut Issue> {
        self.issues.iter_mut().find(|i| i.issue_id() == id)
    }

    /// Drops issues whose level lies outside `[max_level, min_level]`.
    /// Returns how many were removed.
    pub fn filter_issues(&mut self, min_level: IssueLevel, max_level: IssueLevel) -> usize {
        let before = self.issues.len();
        self.issues
            .retain(|issue| issue.level().is_within(min_level, max_level));
        before - self.issues.len()
    }

    /// Removes all issues, rules and metadata. Ids already handed out stay
    /// consumed.
    pub fn clear(&mut self) {
        self.issues.clear();
        self.rules.clear();
        self.metadata.clear();
    }

    #[must_use]
    pub const fn params(&self) -> &ParameterMap {
        &self.params
    }

    pub const fn params_mut(&mut self) -> &mut ParameterMap {
        &mut self.params
    }

    /// Binds the issues that already carry an id, so they keep it when it
    /// is still free.
    pub(crate) fn bind_numbered(&mut self, ids: &IdAllocator) {
        self.ids = Some(ids.clone());
        for issue in self.issues.iter_mut().filter(|i| i.has_issue_id()) {
            issue.bind(ids);
        }
    }

    /// Draws ids for the issues still waiting for one.
    pub(crate) fn bind_pending(&mut self, ids: &IdAllocator) {
        self.ids = Some(ids.clone());
        for issue in self.issues.iter_mut().filter(|i| !i.has_issue_id()) {
            issue.bind(ids);
        }
    }

    pub(crate) fn process_issues<F>(
        &mut self,
        bundle_name: &str,
        bundle_params: &ParameterMap,
        f: &mut F,
    ) where
        F: FnMut(&IssueContext<'_>, &mut Issue),
    {
        let Self {
            checker_id,
            params,
            issues,
            ..
        } = self;
        let context = IssueContext {
            bundle_name,
            bundle_params,
            checker_id,
            checker_params: params,
        };
        for issue in issues.iter_mut() {
            f(&context, issue);
        }
    }

    /// Writes params, issues, rules and metadata, in that order.
    #[must_use]
    pub fn to_xml(&self) -> Element {
        let mut element = Element::new(TAG_CHECKER);
        set_attr(&mut element, "checkerId", &self.checker_id);
        set_attr(&mut element, "description", &self.description);
        set_attr(&mut element, "summary", &self.summary);
        set_attr(&mut element, "status", &self.status);

        self.params.write_xml(&mut element);
        for issue in &self.issues {
            push_child(&mut element, issue.to_xml());
        }
        for rule in &self.rules {
            push_child(&mut element, rule.to_xml());
        }
        for metadata in &self.metadata {
            push_child(&mut element, metadata.to_xml());
        }
        element
    }

    /// Parses a checker for the bundle being read. Issue ids from the file
    /// are kept when the bundle joins a container, unless the container
    /// already uses them.
    pub(crate) fn from_xml(element: &Element) -> Self {
        let mut checker = Self::new(
            attr(element, "checkerId"),
            attr(element, "description"),
            attr(element, "summary"),
            None,
        );
        checker.status = attr(element, "status").to_string();

        for child in child_elements(element) {
            match child.name.as_str() {
                TAG_PARAM => checker.params.parse_xml(child),
                TAG_ISSUE => {
                    if let Some(issue) = Issue::from_xml(child) {
                        checker.issues.push(issue);
                    }
                }
                TAG_ADDRESSED_RULE => checker.rules.push(Rule::from_xml(child)),
                TAG_METADATA => checker.metadata.push(Metadata::from_xml(child)),
                other => debug!("Ignoring <{other}> inside checker '{}'", checker.checker_id),
            }
        }
        checker
    }
}

#[cfg(test)]
#[path = "checker_tests.rs"]
mod tests;

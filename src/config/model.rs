use log::warn;
use xmltree::Element;

use crate::params::{ParameterMap, TAG_PARAM};
use crate::result::IssueLevel;
use crate::xml::{attr, child_elements, is_number, push_child, set_attr};

pub const TAG_CONFIG: &str = "Config";
pub const TAG_CONFIG_CHECKER_BUNDLE: &str = "CheckerBundle";
pub const TAG_CONFIG_CHECKER: &str = "Checker";
pub const TAG_REPORT_MODULE: &str = "ReportModule";

/// Severity window applied when a checker entry does not set one.
pub const DEFAULT_MIN_LEVEL: IssueLevel = IssueLevel::Info;
pub const DEFAULT_MAX_LEVEL: IssueLevel = IssueLevel::Error;

/// Run configuration: global params plus one entry per checker bundle and
/// report module to execute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Configuration {
    pub(super) params: ParameterMap,
    pub(super) checker_bundles: Vec<ConfigurationCheckerBundle>,
    pub(super) report_modules: Vec<ConfigurationReportModule>,
}

impl Configuration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn params(&self) -> &ParameterMap {
        &self.params
    }

    pub const fn params_mut(&mut self) -> &mut ParameterMap {
        &mut self.params
    }

    pub fn add_checker_bundle(
        &mut self,
        application: impl Into<String>,
    ) -> &mut ConfigurationCheckerBundle {
        self.checker_bundles
            .push(ConfigurationCheckerBundle::new(application));
        let last = self.checker_bundles.len() - 1;
        &mut self.checker_bundles[last]
    }

    pub fn add_report_module(
        &mut self,
        application: impl Into<String>,
    ) -> &mut ConfigurationReportModule {
        self.report_modules
            .push(ConfigurationReportModule::new(application));
        let last = self.report_modules.len() - 1;
        &mut self.report_modules[last]
    }

    #[must_use]
    pub fn checker_bundles(&self) -> &[ConfigurationCheckerBundle] {
        &self.checker_bundles
    }

    #[must_use]
    pub fn report_modules(&self) -> &[ConfigurationReportModule] {
        &self.report_modules
    }

    /// First bundle entry for `application`.
    #[must_use]
    pub fn checker_bundle_by_name(&self, application: &str) -> Option<&ConfigurationCheckerBundle> {
        self.checker_bundles
            .iter()
            .find(|b| b.application == application)
    }

    pub fn checker_bundle_by_name_mut(
        &mut self,
        application: &str,
    ) -> Option<&mut ConfigurationCheckerBundle> {
        self.checker_bundles
            .iter_mut()
            .find(|b| b.application == application)
    }

    /// First report module entry for `application`.
    #[must_use]
    pub fn report_module_by_name(&self, application: &str) -> Option<&ConfigurationReportModule> {
        self.report_modules
            .iter()
            .find(|m| m.application == application)
    }

    pub fn clear(&mut self) {
        self.params.clear();
        self.checker_bundles.clear();
        self.report_modules.clear();
    }
}

/// Configuration of one checker bundle application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigurationCheckerBundle {
    application: String,
    params: ParameterMap,
    checkers: Vec<ConfigurationChecker>,
}

impl ConfigurationCheckerBundle {
    #[must_use]
    pub fn new(application: impl Into<String>) -> Self {
        Self {
            application: application.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn application(&self) -> &str {
        &self.application
    }

    pub fn set_application(&mut self, application: impl Into<String>) {
        self.application = application.into();
    }

    #[must_use]
    pub const fn params(&self) -> &ParameterMap {
        &self.params
    }

    pub const fn params_mut(&mut self) -> &mut ParameterMap {
        &mut self.params
    }

    /// Adds a checker entry with the default `Info..=Error` window.
    pub fn add_checker(&mut self, checker_id: impl Into<String>) -> &mut ConfigurationChecker {
        self.add_checker_with_levels(checker_id, DEFAULT_MIN_LEVEL, DEFAULT_MAX_LEVEL)
    }

    pub fn add_checker_with_levels(
        &mut self,
        checker_id: impl Into<String>,
        min_level: IssueLevel,
        max_level: IssueLevel,
    ) -> &mut ConfigurationChecker {
        self.checkers
            .push(ConfigurationChecker::new(checker_id, min_level, max_level));
        let last = self.checkers.len() - 1;
        &mut self.checkers[last]
    }

    #[must_use]
    pub fn checkers(&self) -> &[ConfigurationChecker] {
        &self.checkers
    }

    #[must_use]
    pub fn checker_by_id(&self, checker_id: &str) -> Option<&ConfigurationChecker> {
        self.checkers.iter().find(|c| c.checker_id == checker_id)
    }

    pub fn checker_by_id_mut(&mut self, checker_id: &str) -> Option<&mut ConfigurationChecker> {
        self.checkers.iter_mut().find(|c| c.checker_id == checker_id)
    }

    #[must_use]
    pub fn has_checker_with_id(&self, checker_id: &str) -> bool {
        self.checker_by_id(checker_id).is_some()
    }

    pub fn checker_ids(&self) -> impl Iterator<Item = &str> {
        self.checkers.iter().map(|c| c.checker_id.as_str())
    }

    pub fn clear(&mut self) {
        self.params.clear();
        self.checkers.clear();
    }

    #[must_use]
    pub fn to_xml(&self) -> Element {
        let mut element = Element::new(TAG_CONFIG_CHECKER_BUNDLE);
        set_attr(&mut element, "application", &self.application);
        self.params.write_xml(&mut element);
        for checker in &self.checkers {
            push_child(&mut element, checker.to_xml());
        }
        element
    }

    #[must_use]
    pub fn from_xml(element: &Element) -> Self {
        let mut bundle = Self::new(attr(element, "application"));
        for child in child_elements(element) {
            match child.name.as_str() {
                TAG_PARAM => bundle.params.parse_xml(child),
                TAG_CONFIG_CHECKER => bundle.checkers.push(ConfigurationChecker::from_xml(child)),
                other => warn!("Ignoring <{other}> in checker bundle '{}'", bundle.application),
            }
        }
        bundle
    }
}

/// Configuration of one checker: which severities to keep and the
/// checker's own params.
///
/// An issue passes when its level lies between `max_level` (most severe)
/// and `min_level` (least severe), both inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationChecker {
    checker_id: String,
    min_level: IssueLevel,
    max_level: IssueLevel,
    params: ParameterMap,
}

impl Default for ConfigurationChecker {
    fn default() -> Self {
        Self::new("", DEFAULT_MIN_LEVEL, DEFAULT_MAX_LEVEL)
    }
}

impl ConfigurationChecker {
    #[must_use]
    pub fn new(checker_id: impl Into<String>, min_level: IssueLevel, max_level: IssueLevel) -> Self {
        Self {
            checker_id: checker_id.into(),
            min_level,
            max_level,
            params: ParameterMap::new(),
        }
    }

    #[must_use]
    pub fn checker_id(&self) -> &str {
        &self.checker_id
    }

    #[must_use]
    pub const fn min_level(&self) -> IssueLevel {
        self.min_level
    }

    pub const fn set_min_level(&mut self, level: IssueLevel) {
        self.min_level = level;
    }

    #[must_use]
    pub const fn max_level(&self) -> IssueLevel {
        self.max_level
    }

    pub const fn set_max_level(&mut self, level: IssueLevel) {
        self.max_level = level;
    }

    #[must_use]
    pub const fn params(&self) -> &ParameterMap {
        &self.params
    }

    pub const fn params_mut(&mut self) -> &mut ParameterMap {
        &mut self.params
    }

    /// True when `level` lies inside this checker's severity window.
    #[must_use]
    pub const fn accepts(&self, level: IssueLevel) -> bool {
        level.is_within(self.min_level, self.max_level)
    }

    #[must_use]
    pub fn to_xml(&self) -> Element {
        let mut element = Element::new(TAG_CONFIG_CHECKER);
        set_attr(&mut element, "checkerId", &self.checker_id);
        set_attr(&mut element, "maxLevel", self.max_level.code());
        set_attr(&mut element, "minLevel", self.min_level.code());
        self.params.write_xml(&mut element);
        element
    }

    /// Parses a checker entry. A level attribute that is missing, not a
    /// plain number or not a known level falls back to the default.
    #[must_use]
    pub fn from_xml(element: &Element) -> Self {
        let mut checker = Self {
            checker_id: attr(element, "checkerId").to_string(),
            ..Self::default()
        };
        if let Some(level) = parse_level(element, "minLevel") {
            checker.min_level = level;
        }
        if let Some(level) = parse_level(element, "maxLevel") {
            checker.max_level = level;
        }
        for child in child_elements(element).filter(|c| c.name == TAG_PARAM) {
            checker.params.parse_xml(child);
        }
        checker
    }
}

fn parse_level(element: &Element, name: &str) -> Option<IssueLevel> {
    let text = attr(element, name);
    if !is_number(text) {
        return None;
    }
    let level = IssueLevel::parse_code(text);
    if level.is_none() {
        warn!(
            "Checker '{}' has unknown {name} '{text}', using default",
            attr(element, "checkerId")
        );
    }
    level
}

/// Configuration of one report module application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigurationReportModule {
    application: String,
    params: ParameterMap,
}

impl ConfigurationReportModule {
    #[must_use]
    pub fn new(application: impl Into<String>) -> Self {
        Self {
            application: application.into(),
            params: ParameterMap::new(),
        }
    }

    #[must_use]
    pub fn application(&self) -> &str {
        &self.application
    }

    #[must_use]
    pub const fn params(&self) -> &ParameterMap {
        &self.params
    }

    pub const fn params_mut(&mut self) -> &mut ParameterMap {
        &mut self.params
    }

    #[must_use]
    pub fn to_xml(&self) -> Element {
        let mut element = Element::new(TAG_REPORT_MODULE);
        set_attr(&mut element, "application", &self.application);
        self.params.write_xml(&mut element);
        element
    }

    #[must_use]
    pub fn from_xml(element: &Element) -> Self {
        let mut module = Self::new(attr(element, "application"));
        for child in child_elements(element).filter(|c| c.name == TAG_PARAM) {
            module.params.parse_xml(child);
        }
        module
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;

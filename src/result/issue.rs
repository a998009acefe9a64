use log::{debug, warn};
use xmltree::Element;

use super::domain_info::{DomainSpecificInfo, TAG_DOMAIN_SPECIFIC_INFO};
use super::ids::IdAllocator;
use super::level::IssueLevel;
use super::locations::{LocationsContainer, TAG_LOCATIONS};
use crate::xml::{attr, child_elements, is_number, push_child, set_attr};

pub const TAG_ISSUE: &str = "Issue";

/// A single finding reported by a checker.
///
/// An issue receives its id when it is attached to a checker that belongs to
/// a result container. Until then [`Issue::issue_id`] reports `0`.
#[derive(Debug, Clone)]
pub struct Issue {
    id: Option<u64>,
    description: String,
    level: IssueLevel,
    rule_uid: String,
    locations: Vec<LocationsContainer>,
    domain_info: Vec<DomainSpecificInfo>,
    enabled: bool,
    ids: Option<IdAllocator>,
}

impl Issue {
    #[must_use]
    pub fn new(description: impl Into<String>, level: IssueLevel) -> Self {
        Self {
            id: None,
            description: description.into(),
            level,
            rule_uid: String::new(),
            locations: Vec::new(),
            domain_info: Vec::new(),
            enabled: true,
            ids: None,
        }
    }

    #[must_use]
    pub fn with_rule_uid(mut self, rule_uid: impl Into<String>) -> Self {
        self.rule_uid = rule_uid.into();
        self
    }

    #[must_use]
    pub fn with_locations(mut self, locations: LocationsContainer) -> Self {
        self.locations.push(locations);
        self
    }

    #[must_use]
    pub fn with_domain_info(mut self, info: DomainSpecificInfo) -> Self {
        self.domain_info.push(info);
        self
    }

    pub fn add_locations(&mut self, locations: LocationsContainer) {
        self.locations.push(locations);
    }

    pub fn add_domain_info(&mut self, info: DomainSpecificInfo) {
        self.domain_info.push(info);
    }

    /// The assigned id, or `0` while the issue has none.
    #[must_use]
    pub fn issue_id(&self) -> u64 {
        self.id.unwrap_or(0)
    }

    #[must_use]
    pub const fn has_issue_id(&self) -> bool {
        self.id.is_some()
    }

    /// Sets an explicit id. When attached, the id is reserved so that the
    /// container never hands it out again.
    pub fn set_issue_id(&mut self, id: u64) {
        if let Some(ids) = &self.ids {
            ids.reserve(id);
        }
        self.id = Some(id);
    }

    /// Numeric text is used verbatim; anything else draws a fresh id.
    ///
    /// A detached issue cannot draw ids and keeps reporting `0`.
    pub fn set_issue_id_from_str(&mut self, id: &str) {
        if let Some(id) = parse_id(id) {
            self.set_issue_id(id);
        } else {
            self.id = self.ids.as_ref().map(IdAllocator::next_id);
        }
    }

    /// Draws a fresh id from the owning container, or `0` when detached.
    #[must_use]
    pub fn next_free_id(&self) -> u64 {
        self.ids.as_ref().map_or(0, IdAllocator::next_id)
    }

    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.ids.is_some()
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    #[must_use]
    pub const fn level(&self) -> IssueLevel {
        self.level
    }

    #[must_use]
    pub const fn level_str(&self) -> &'static str {
        self.level.as_str()
    }

    pub const fn set_level(&mut self, level: IssueLevel) {
        self.level = level;
    }

    /// Empty when the issue addresses no rule.
    #[must_use]
    pub fn rule_uid(&self) -> &str {
        &self.rule_uid
    }

    pub fn set_rule_uid(&mut self, rule_uid: impl Into<String>) {
        self.rule_uid = rule_uid.into();
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub const fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[must_use]
    pub fn locations(&self) -> &[LocationsContainer] {
        &self.locations
    }

    pub fn locations_mut(&mut self) -> &mut [LocationsContainer] {
        &mut self.locations
    }

    #[must_use]
    pub fn has_locations(&self) -> bool {
        !self.locations.is_empty()
    }

    #[must_use]
    pub fn domain_info(&self) -> &[DomainSpecificInfo] {
        &self.domain_info
    }

    #[must_use]
    pub fn has_domain_info(&self) -> bool {
        !self.domain_info.is_empty()
    }

    /// Connects the issue to a container's id counter. An explicit id is
    /// kept only while the container has not used it; otherwise, and when
    /// the issue has none, a fresh id is drawn.
    pub(crate) fn bind(&mut self, ids: &IdAllocator) {
        self.ids = Some(ids.clone());
        let kept = self.id.filter(|id| {
            let free = ids.claim(*id);
            if !free {
                debug!("Issue id {id} is already taken, drawing a fresh one");
            }
            free
        });
        self.id = Some(kept.unwrap_or_else(|| ids.next_id()));
    }

    /// Attaches a newly added issue. Any id set beforehand is replaced by a
    /// fresh one; without a counter the id stays pending until the owning
    /// bundle joins a container.
    pub(crate) fn attach(&mut self, ids: Option<&IdAllocator>) {
        self.ids = ids.cloned();
        self.id = ids.map(IdAllocator::next_id);
    }

    #[must_use]
    pub fn to_xml(&self) -> Element {
        let mut element = Element::new(TAG_ISSUE);
        set_attr(&mut element, "issueId", self.issue_id());
        set_attr(&mut element, "description", &self.description);
        set_attr(&mut element, "level", self.level.code());
        set_attr(&mut element, "ruleUID", &self.rule_uid);
        for locations in &self.locations {
            push_child(&mut element, locations.to_xml());
        }
        for info in &self.domain_info {
            push_child(&mut element, info.to_xml());
        }
        element
    }

    /// Parses an issue, keeping its numeric id. Returns `None` for an
    /// unknown severity level.
    #[must_use]
    pub fn from_xml(element: &Element) -> Option<Self> {
        let level_text = attr(element, "level");
        let Some(level) = IssueLevel::parse_code(level_text) else {
            warn!(
                "Skipping issue '{}' with invalid level '{level_text}'",
                attr(element, "description")
            );
            return None;
        };

        let mut issue = Self::new(attr(element, "description"), level)
            .with_rule_uid(attr(element, "ruleUID"));
        issue.id = parse_id(attr(element, "issueId"));

        for child in child_elements(element) {
            match child.name.as_str() {
                TAG_LOCATIONS => issue.locations.push(LocationsContainer::from_xml(child)),
                TAG_DOMAIN_SPECIFIC_INFO => match DomainSpecificInfo::from_xml(child) {
                    Some(info) => issue.domain_info.push(info),
                    None => warn!("Skipping empty <{TAG_DOMAIN_SPECIFIC_INFO}> element"),
                },
                _ => {}
            }
        }
        Some(issue)
    }
}

fn parse_id(text: &str) -> Option<u64> {
    if is_number(text) {
        text.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;

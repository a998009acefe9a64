use xmltree::Element;

use crate::xml::{attr, set_attr};

pub const TAG_ADDRESSED_RULE: &str = "AddressedRule";

/// A rule a checker addresses, identified by its rule UID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    rule_uid: String,
}

impl Rule {
    #[must_use]
    pub fn new(rule_uid: impl Into<String>) -> Self {
        Self {
            rule_uid: rule_uid.into(),
        }
    }

    #[must_use]
    pub fn rule_uid(&self) -> &str {
        &self.rule_uid
    }

    #[must_use]
    pub fn to_xml(&self) -> Element {
        let mut element = Element::new(TAG_ADDRESSED_RULE);
        set_attr(&mut element, "ruleUID", &self.rule_uid);
        element
    }

    #[must_use]
    pub fn from_xml(element: &Element) -> Self {
        Self::new(attr(element, "ruleUID"))
    }
}

use xmltree::Element;

use crate::xml::{attr, child_elements, push_child, set_attr};

pub const TAG_DOMAIN_SPECIFIC_INFO: &str = "DomainSpecificInfo";

/// Opaque checker-specific XML payload attached to an issue.
///
/// The payload is written back verbatim as the single child of the
/// `DomainSpecificInfo` element.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainSpecificInfo {
    name: String,
    root: Element,
}

impl DomainSpecificInfo {
    #[must_use]
    pub fn new(name: impl Into<String>, root: Element) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn root(&self) -> &Element {
        &self.root
    }

    #[must_use]
    pub fn to_xml(&self) -> Element {
        let mut element = Element::new(TAG_DOMAIN_SPECIFIC_INFO);
        set_attr(&mut element, "name", &self.name);
        push_child(&mut element, self.root.clone());
        element
    }

    /// Takes the first child element as payload; `None` when there is none.
    #[must_use]
    pub fn from_xml(element: &Element) -> Option<Self> {
        let root = child_elements(element).next()?;
        Some(Self::new(attr(element, "name"), root.clone()))
    }
}

#[cfg(test)]
#[path = "domain_info_tests.rs"]
mod tests;

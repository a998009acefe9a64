use xmltree::Element;

use crate::xml::{attr, set_attr};

pub const TAG_METADATA: &str = "Metadata";

/// Free-form key/value annotation on a checker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    key: String,
    value: String,
    description: String,
}

impl Metadata {
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        value: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            description: description.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn to_xml(&self) -> Element {
        let mut element = Element::new(TAG_METADATA);
        set_attr(&mut element, "key", &self.key);
        set_attr(&mut element, "value", &self.value);
        set_attr(&mut element, "description", &self.description);
        element
    }

    #[must_use]
    pub fn from_xml(element: &Element) -> Self {
        Self::new(
            attr(element, "key"),
            attr(element, "value"),
            attr(element, "description"),
        )
    }
}

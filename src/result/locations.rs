use log::warn;
use xmltree::Element;

use super::location::{ExtendedInformation, LocationKind};
use crate::xml::{attr, child_elements, push_child, set_attr};

pub const TAG_LOCATIONS: &str = "Locations";

/// A described group of location facts belonging to one issue.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocationsContainer {
    description: String,
    items: Vec<ExtendedInformation>,
}

impl LocationsContainer {
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            items: Vec::new(),
        }
    }

    /// Convenience for the common single-location case.
    #[must_use]
    pub fn with_item(description: impl Into<String>, item: impl Into<ExtendedInformation>) -> Self {
        let mut container = Self::new(description);
        container.push(item);
        container
    }

    pub fn push(&mut self, item: impl Into<ExtendedInformation>) {
        self.items.push(item.into());
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    #[must_use]
    pub fn items(&self) -> &[ExtendedInformation] {
        &self.items
    }

    /// Items of one concrete kind, in order.
    pub fn items_of<'a, T: LocationKind + 'a>(&'a self) -> impl Iterator<Item = &'a T> {
        self.items.iter().filter_map(T::from_info)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn to_xml(&self) -> Element {
        let mut element = Element::new(TAG_LOCATIONS);
        set_attr(&mut element, "description", &self.description);
        for item in &self.items {
            push_child(&mut element, item.to_xml());
        }
        element
    }

    #[must_use]
    pub fn from_xml(element: &Element) -> Self {
        let mut container = Self::new(attr(element, "description"));
        for child in child_elements(element) {
            match ExtendedInformation::from_xml(child) {
                Some(item) => container.items.push(item),
                None => warn!("Skipping unsupported location element <{}>", child.name),
            }
        }
        container
    }
}

impl Extend<ExtendedInformation> for LocationsContainer {
    fn extend<I: IntoIterator<Item = ExtendedInformation>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

#[cfg(test)]
#[path = "locations_tests.rs"]
mod tests;

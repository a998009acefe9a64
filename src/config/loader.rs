use std::path::Path;

use log::{debug, error, warn};
use xmltree::Element;

use super::model::{
    Configuration, ConfigurationCheckerBundle, ConfigurationReportModule, TAG_CONFIG,
    TAG_CONFIG_CHECKER_BUNDLE, TAG_REPORT_MODULE,
};
use crate::error::Result;
use crate::params::TAG_PARAM;
use crate::xml::{child_elements, push_child, read_document, write_document};

impl Configuration {
    /// Loads a configuration file.
    ///
    /// Like result files, the root element name is not checked.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not well-formed.
    pub fn try_from_xml_file(path: &Path) -> Result<Self> {
        let root = read_document(path)?;
        if root.name != TAG_CONFIG {
            warn!(
                "Unexpected root <{}> in {}, expected <{TAG_CONFIG}>",
                root.name,
                path.display()
            );
        }
        let configuration = Self::from_xml(&root);
        debug!(
            "Loaded configuration {} with {} checker bundle(s)",
            path.display(),
            configuration.checker_bundles.len()
        );
        Ok(configuration)
    }

    /// Loads a configuration file, logging and returning `None` on failure.
    #[must_use]
    pub fn from_xml_file(path: &Path) -> Option<Self> {
        Self::try_from_xml_file(path)
            .map_err(|e| error!("Could not load configuration: {e}"))
            .ok()
    }

    /// Builds a configuration from a `<Config>` element. Unknown children
    /// are skipped.
    #[must_use]
    pub fn from_xml(root: &Element) -> Self {
        let mut configuration = Self::new();
        for child in child_elements(root) {
            match child.name.as_str() {
                TAG_PARAM => configuration.params.parse_xml(child),
                TAG_CONFIG_CHECKER_BUNDLE => configuration
                    .checker_bundles
                    .push(ConfigurationCheckerBundle::from_xml(child)),
                TAG_REPORT_MODULE => configuration
                    .report_modules
                    .push(ConfigurationReportModule::from_xml(child)),
                other => warn!("Ignoring unknown configuration element <{other}>"),
            }
        }
        configuration
    }

    #[must_use]
    pub fn to_xml(&self) -> Element {
        let mut root = Element::new(TAG_CONFIG);
        self.params.write_xml(&mut root);
        for bundle in &self.checker_bundles {
            push_child(&mut root, bundle.to_xml());
        }
        for module in &self.report_modules {
            push_child(&mut root, module.to_xml());
        }
        root
    }

    /// Writes the configuration as a pretty-printed XML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        debug!("Writing configuration to {}", path.display());
        write_document(path, &self.to_xml())
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

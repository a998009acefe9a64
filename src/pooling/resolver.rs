use std::path::{Path, PathBuf};

use log::warn;

use crate::result::{
    FileLocation, LocationsContainer, PARAM_XODR_FILE, PARAM_XOSC_FILE, ResultContainer,
    XmlLocation,
};

pub const OPENDRIVE_XPATH_PREFIX: &str = "/OpenDRIVE/";
pub const OPENSCENARIO_XPATH_PREFIX: &str = "/OpenSCENARIO/";

/// Maps an XPath into the rows of the source file it selects.
///
/// XPath evaluation is left to the implementor; pooling only decides which
/// file an expression belongs to and records the answer.
pub trait LocationResolver {
    /// Returns the 1-based rows of `file` matched by `xpath`, or `None` if
    /// the expression cannot be evaluated against that file.
    fn affected_rows(&self, file: &Path, xpath: &str) -> Option<Vec<u64>>;
}

/// Appends a row-only [`FileLocation`] for every row an [`XmlLocation`]
/// resolves to. Returns the number of file locations added.
///
/// `/OpenDRIVE/` expressions resolve against the bundle's `XodrFile`,
/// `/OpenSCENARIO/` ones against its `XoscFile`.
pub fn resolve_file_locations(
    container: &mut ResultContainer,
    resolver: &dyn LocationResolver,
) -> usize {
    let mut added = 0;
    for bundle in container.checker_bundles_mut() {
        let files = SourceFiles {
            xodr: non_empty_path(bundle.params().get(PARAM_XODR_FILE)),
            xosc: non_empty_path(bundle.params().get(PARAM_XOSC_FILE)),
        };
        for checker in bundle.checkers_mut() {
            for issue in checker.issues_mut() {
                for locations in issue.locations_mut() {
                    added += resolve_container(locations, &files, resolver);
                }
            }
        }
    }
    added
}

struct SourceFiles {
    xodr: Option<PathBuf>,
    xosc: Option<PathBuf>,
}

impl SourceFiles {
    fn for_xpath(&self, xpath: &str) -> Option<&Path> {
        if xpath.starts_with(OPENSCENARIO_XPATH_PREFIX) {
            self.xosc.as_deref()
        } else if xpath.starts_with(OPENDRIVE_XPATH_PREFIX) {
            self.xodr.as_deref()
        } else {
            None
        }
    }
}

fn resolve_container(
    locations: &mut LocationsContainer,
    files: &SourceFiles,
    resolver: &dyn LocationResolver,
) -> usize {
    let xpaths: Vec<String> = locations
        .items_of::<XmlLocation>()
        .map(|l| l.xpath.clone())
        .collect();

    let mut added = 0;
    for xpath in xpaths {
        let rows = files
            .for_xpath(&xpath)
            .and_then(|file| resolver.affected_rows(file, &xpath));
        let Some(rows) = rows else {
            warn!("Could not calculate file location for xpath '{xpath}'");
            continue;
        };
        for row in rows {
            locations.push(FileLocation::at(row, 0));
            added += 1;
        }
    }
    added
}

fn non_empty_path(value: Option<&str>) -> Option<PathBuf> {
    value.filter(|v| !v.is_empty()).map(PathBuf::from)
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;

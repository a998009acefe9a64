//! Thin helpers over the `xmltree` DOM shared by the result and
//! configuration serializers.

use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use xmltree::{Element, EmitterConfig, XMLNode};

use crate::error::{QcError, Result};

/// Returns the attribute value, or an empty string when it is absent.
#[must_use]
pub fn attr<'a>(element: &'a Element, name: &str) -> &'a str {
    element.attributes.get(name).map_or("", String::as_str)
}

/// Returns the attribute value only when the attribute is present.
#[must_use]
pub fn attr_opt<'a>(element: &'a Element, name: &str) -> Option<&'a str> {
    element.attributes.get(name).map(String::as_str)
}

/// Parses a numeric attribute, `None` when absent or malformed.
#[must_use]
pub fn attr_parse<T: std::str::FromStr>(element: &Element, name: &str) -> Option<T> {
    attr_opt(element, name).and_then(|v| v.trim().parse().ok())
}

pub fn set_attr(element: &mut Element, name: &str, value: impl ToString) {
    element
        .attributes
        .insert(name.to_string(), value.to_string());
}

pub fn push_child(parent: &mut Element, child: Element) {
    parent.children.push(XMLNode::Element(child));
}

/// Iterates element children in document order, skipping text and comments.
pub fn child_elements(element: &Element) -> impl Iterator<Item = &Element> {
    element.children.iter().filter_map(|node| match node {
        XMLNode::Element(child) => Some(child),
        _ => None,
    })
}

/// True for a non-empty string of ASCII digits.
#[must_use]
pub fn is_number(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Reads and parses an XML document, returning its root element.
///
/// No schema validation or namespace processing is performed.
///
/// # Errors
/// Returns an error if the file cannot be opened or is not well-formed XML.
pub fn read_document(path: &Path) -> Result<Element> {
    let file = fs::File::open(path).map_err(|source| QcError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Element::parse(BufReader::new(file)).map_err(|e| QcError::XmlParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Serializes `root` with indentation.
///
/// # Errors
/// Returns an error if the emitter rejects the tree.
pub fn to_pretty_bytes(root: &Element) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let config = EmitterConfig::new().perform_indent(true);
    root.write_with_config(&mut buffer, config)
        .map_err(|e| QcError::XmlWrite(e.to_string()))?;
    Ok(buffer)
}

/// Pretty-prints `root` and writes it to `path` atomically.
///
/// The document goes to a temporary sibling file first and is renamed over
/// the target, so readers never observe a partially written file.
///
/// # Errors
/// Returns an error if serialization fails or the file cannot be written.
pub fn write_document(path: &Path, root: &Element) -> Result<()> {
    let bytes = to_pretty_bytes(root)?;
    atomic_write(path, &bytes)
}

fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let write_err = |source| QcError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(parent) = parent {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let file_name = path
        .file_name()
        .map_or_else(|| "output".into(), |n| n.to_string_lossy().into_owned());
    let temp_name = format!(".{file_name}.{}.tmp", std::process::id());
    let temp_path = parent.map_or_else(|| PathBuf::from(&temp_name), |p| p.join(&temp_name));

    if let Err(e) = fs::write(&temp_path, content) {
        let _ = fs::remove_file(&temp_path);
        return Err(write_err(e));
    }
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(write_err(e));
    }
    Ok(())
}

#[cfg(test)]
#[path = "xml_tests.rs"]
mod tests;

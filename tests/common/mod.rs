#![allow(dead_code)]

use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the qc-results binary.
#[macro_export]
macro_rules! qc_results {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("qc-results"))
    };
}

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, relative_path: &str) -> PathBuf {
        self.dir.path().join(relative_path)
    }

    pub fn read(&self, relative_path: &str) -> String {
        fs::read_to_string(self.join(relative_path)).expect("Failed to read file")
    }

    /// Writes a result file with one bundle and one checker holding the
    /// given `(description, level)` issues.
    pub fn create_result(
        &self,
        relative_path: &str,
        bundle: &str,
        checker: &str,
        issues: &[(&str, u8)],
    ) {
        let mut content = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        content.push_str("<CheckerResults version=\"1.0.0\">\n");
        let _ = writeln!(
            content,
            "  <CheckerBundle name=\"{bundle}\" summary=\"\" description=\"\" build_date=\"\" version=\"\">"
        );
        let _ = writeln!(
            content,
            "    <Checker checkerId=\"{checker}\" description=\"\" summary=\"\" status=\"completed\">"
        );
        for (id, (description, level)) in issues.iter().enumerate() {
            let _ = writeln!(
                content,
                "      <Issue issueId=\"{id}\" description=\"{description}\" level=\"{level}\" ruleUID=\"\"/>"
            );
        }
        content.push_str("    </Checker>\n  </CheckerBundle>\n</CheckerResults>\n");
        self.create_file(relative_path, &content);
    }
}

pub const ERROR: u8 = 1;
pub const WARNING: u8 = 2;
pub const INFO: u8 = 3;

/// Run configuration selecting two bundles by result file name.
pub const POOL_CONFIG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Config>
  <CheckerBundle application="schemaBundle">
    <Param name="strResultFile" value="schema.xqar"/>
    <Checker checkerId="schema" minLevel="2" maxLevel="1"/>
  </CheckerBundle>
  <CheckerBundle application="geometryBundle">
    <Param name="strResultFile" value="geometry.xqar"/>
    <Checker checkerId="geometry" minLevel="3" maxLevel="1"/>
  </CheckerBundle>
</Config>
"#;

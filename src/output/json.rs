use serde::Serialize;

use crate::error::Result;
use crate::result::{Checker, CheckerBundle, Issue, IssueLevel, ResultContainer};

use super::OutputFormatter;

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: Summary,
    bundles: Vec<BundleEntry<'a>>,
}

#[derive(Serialize)]
struct Summary {
    bundles: usize,
    checkers: usize,
    issues: usize,
    errors: usize,
    warnings: usize,
    infos: usize,
}

#[derive(Serialize)]
struct BundleEntry<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    xodr_file: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    xosc_file: Option<&'a str>,
    checkers: Vec<CheckerEntry<'a>>,
}

#[derive(Serialize)]
struct CheckerEntry<'a> {
    id: &'a str,
    status: &'a str,
    summary: &'a str,
    issues: Vec<IssueEntry<'a>>,
}

#[derive(Serialize)]
struct IssueEntry<'a> {
    id: u64,
    level: IssueLevel,
    description: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    rule_uid: &'a str,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, results: &ResultContainer) -> Result<String> {
        let output = JsonOutput {
            summary: Summary {
                bundles: results.checker_bundle_count(),
                checkers: results.checker_count(),
                issues: results.issue_count(),
                errors: results.issue_count_at(IssueLevel::Error),
                warnings: results.issue_count_at(IssueLevel::Warning),
                infos: results.issue_count_at(IssueLevel::Info),
            },
            bundles: results.checker_bundles().iter().map(convert_bundle).collect(),
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}

fn convert_bundle(bundle: &CheckerBundle) -> BundleEntry<'_> {
    BundleEntry {
        name: bundle.name(),
        xodr_file: Some(bundle.xodr_file_path()).filter(|p| !p.is_empty()),
        xosc_file: Some(bundle.xosc_file_path()).filter(|p| !p.is_empty()),
        checkers: bundle.checkers().iter().map(convert_checker).collect(),
    }
}

fn convert_checker(checker: &Checker) -> CheckerEntry<'_> {
    CheckerEntry {
        id: checker.checker_id(),
        status: checker.status(),
        summary: checker.summary(),
        issues: checker.issues().iter().map(convert_issue).collect(),
    }
}

fn convert_issue(issue: &Issue) -> IssueEntry<'_> {
    IssueEntry {
        id: issue.issue_id(),
        level: issue.level(),
        description: issue.description(),
        rule_uid: issue.rule_uid(),
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tempfile::TempDir;

use super::*;
use crate::result::{
    FileLocation, InertialLocation, LocationsContainer, MessageLocation, Metadata, Rule,
    XmlLocation,
};

fn sample_container() -> ResultContainer {
    let mut container = ResultContainer::new();

    let bundle = container.create_checker_bundle("xodrBundle", "summary", "OpenDRIVE checks");
    bundle.set_xodr_file_path("maps/town.xodr");
    let checker = bundle.create_checker("road_geometry", "geometry checks", "");
    checker.params_mut().set("tolerance", 0.01);
    checker.add_issue(
        Issue::new("gap between segments", IssueLevel::Error)
            .with_rule_uid("asam.net:xodr:1.7.0:road.geometry.contact")
            .with_locations(LocationsContainer::with_item(
                "road",
                XmlLocation::for_road_plan_view("7"),
            )),
    );
    checker.add_issue(Issue::new("short segment", IssueLevel::Info));
    checker.add_rule(Rule::new("asam.net:xodr:1.7.0:road.geometry.contact"));
    checker.add_metadata(Metadata::new("version", "1.7.0", "schema version"));
    checker.update_summary();

    let bundle = container.create_checker_bundle("xoscBundle", "", "");
    bundle.set_xosc_file_path("scenarios/cut_in.xosc");
    let checker = bundle.create_checker("schema", "", "");
    let mut locations = LocationsContainer::new("pose");
    locations.push(InertialLocation::new(1.0, 2.0, 0.0).with_orientation(0.5, 0.0, 0.0));
    locations.push(MessageLocation::new(12).with_channel("/odom"));
    locations.push(FileLocation::with_offset(3, 4, 55));
    checker.add_issue(Issue::new("bad pose", IssueLevel::Warning).with_locations(locations));

    container
}

// =============================================================================
// Bundle Management
// =============================================================================

#[test]
fn create_checker_bundle_attaches() {
    let mut container = ResultContainer::new();
    let bundle = container.create_checker_bundle("b", "", "");
    assert!(bundle.is_attached());
    assert_eq!(container.checker_bundle_count(), 1);
    assert!(container.has_checker_bundles());
}

#[test]
fn checker_bundle_by_name_returns_first_match() {
    let mut container = ResultContainer::new();
    container.create_checker_bundle("dup", "first", "");
    container.create_checker_bundle("dup", "second", "");

    assert_eq!(container.checker_bundle_by_name("dup").unwrap().summary(), "first");
    assert!(container.checker_bundle_by_name("other").is_none());
}

#[test]
fn counts() {
    let container = sample_container();
    assert_eq!(container.checker_bundle_count(), 2);
    assert_eq!(container.checker_count(), 2);
    assert_eq!(container.issue_count(), 3);
    assert_eq!(container.issue_count_at(IssueLevel::Error), 1);
    assert_eq!(container.issue_count_at(IssueLevel::Warning), 1);
    assert_eq!(container.issue_count_at(IssueLevel::Info), 1);
}

// =============================================================================
// Id Uniqueness
// =============================================================================

#[test]
fn ids_are_unique_across_bundles() {
    let container = sample_container();
    let ids: HashSet<_> = container.issues().map(Issue::issue_id).collect();
    assert_eq!(ids.len(), container.issue_count());
}

#[test]
fn detached_bundle_gets_unique_ids_on_attach() {
    let mut container = sample_container();

    let mut bundle = CheckerBundle::new("late", "", "");
    let checker = bundle.create_checker("c", "", "");
    checker.add_issue(Issue::new("a", IssueLevel::Info));
    checker.add_issue(Issue::new("b", IssueLevel::Info));
    container.add_checker_bundle(bundle);

    let ids: HashSet<_> = container.issues().map(Issue::issue_id).collect();
    assert_eq!(ids.len(), 5);
}

#[test]
fn next_free_id_never_repeats() {
    let mut container = sample_container();
    let handed_out: HashSet<_> = container.issues().map(Issue::issue_id).collect();

    container.clear();
    let next = container.next_free_id();
    assert!(!handed_out.contains(&next));
}

#[test]
fn loaded_ids_are_reserved() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("a.xqar");
    fs::write(
        &path,
        r#"<?xml version="1.0"?>
<CheckerResults version="1.0.0">
  <CheckerBundle name="b" summary="" description="" build_date="" version="">
    <Checker checkerId="c" description="" summary="" status="completed">
      <Issue issueId="40" description="loaded" level="1" ruleUID=""/>
    </Checker>
  </CheckerBundle>
</CheckerResults>"#,
    )
    .unwrap();

    let mut container = ResultContainer::new();
    container.add_results_from_xml(&path);
    let new_id = container
        .create_checker_bundle("new", "", "")
        .create_checker("c", "", "")
        .add_issue(Issue::new("new", IssueLevel::Info))
        .issue_id();

    assert_eq!(container.issue_by_id(40).unwrap().description(), "loaded");
    assert_eq!(new_id, 41);
}

fn write_single_issue(path: &Path, bundle_name: &str, description: &str) {
    let mut container = ResultContainer::new();
    container
        .create_checker_bundle(bundle_name, "", "")
        .create_checker("c", "", "")
        .add_issue(Issue::new(description, IssueLevel::Error));
    container.write_results(path).unwrap();
}

#[test]
fn ids_from_separate_files_do_not_collide() {
    let temp_dir = TempDir::new().unwrap();
    let first = temp_dir.path().join("a.xqar");
    let second = temp_dir.path().join("b.xqar");
    write_single_issue(&first, "A", "a1");
    write_single_issue(&second, "B", "b1");

    let mut container = ResultContainer::new();
    container.add_results_from_xml(&first);
    container.add_results_from_xml(&second);

    let ids: Vec<_> = container.issues().map(Issue::issue_id).collect();
    let distinct: HashSet<_> = ids.iter().copied().collect();
    assert_eq!(distinct.len(), 2, "ids: {ids:?}");

    assert_eq!(ids[0], 0);
    assert_eq!(container.issue_by_id(ids[0]).unwrap().description(), "a1");
    assert_eq!(container.issue_by_id(ids[1]).unwrap().description(), "b1");
}

#[test]
fn loaded_id_taken_by_new_issue_is_replaced() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("a.xqar");
    write_single_issue(&path, "A", "loaded");

    let mut container = ResultContainer::new();
    let existing = container
        .create_checker_bundle("new", "", "")
        .create_checker("c", "", "")
        .add_issue(Issue::new("existing", IssueLevel::Info))
        .issue_id();
    container.add_results_from_xml(&path);

    let loaded = container
        .issues()
        .find(|i| i.description() == "loaded")
        .unwrap()
        .issue_id();
    assert_ne!(loaded, existing);
    assert_eq!(container.issue_by_id(existing).unwrap().description(), "existing");
}

// =============================================================================
// Queries
// =============================================================================

#[test]
fn issue_queries() {
    let container = sample_container();

    assert_eq!(container.issues_by_checker_id("road_geometry").count(), 2);
    assert_eq!(container.issues_by_bundle_name("xoscBundle").count(), 1);
    assert_eq!(container.checkers_of("xodrBundle").count(), 1);

    let checkers: Vec<_> = container.checkers().collect();
    let issues = ResultContainer::issues_of(&checkers[1..]);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].description(), "bad pose");
}

#[test]
fn issue_by_id_searches_depth_first() {
    let container = sample_container();
    let first = container.issues().next().unwrap().issue_id();
    assert_eq!(
        container.issue_by_id(first).unwrap().description(),
        "gap between segments"
    );
    assert!(container.issue_by_id(999).is_none());
}

#[test]
fn file_path_lookups() {
    let container = sample_container();
    assert_eq!(container.xodr_file_path(), Some("maps/town.xodr"));
    assert_eq!(container.xosc_file_path(), Some("scenarios/cut_in.xosc"));
    assert_eq!(ResultContainer::new().xodr_file_path(), None);
}

#[test]
fn do_processing_visits_in_order_with_context() {
    let mut container = sample_container();
    let mut visited = Vec::new();

    container.do_processing(|context, issue| {
        visited.push(format!("{}/{}", context.bundle_name, context.checker_id));
        let prefixed = format!("#{} {}", issue.issue_id(), issue.description());
        issue.set_description(prefixed);
    });

    assert_eq!(
        visited,
        vec![
            "xodrBundle/road_geometry",
            "xodrBundle/road_geometry",
            "xoscBundle/schema"
        ]
    );
    assert!(container.issues().all(|i| i.description().starts_with('#')));
}

#[test]
fn do_processing_exposes_params() {
    let mut container = sample_container();
    let mut tolerances = Vec::new();
    container.do_processing(|context, _| {
        if let Some(value) = context.checker_params.get("tolerance") {
            tolerances.push(value.to_string());
        }
        assert!(context.bundle_params.has("XodrFile") || context.bundle_params.has("XoscFile"));
    });
    assert_eq!(tolerances, vec!["0.01", "0.01"]);
}

// =============================================================================
// Serialization
// =============================================================================

#[test]
fn round_trip_preserves_tree() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("result.xqar");
    let original = sample_container();
    original.write_results(&path).unwrap();

    let mut loaded = ResultContainer::new();
    assert_eq!(loaded.add_results_from_xml(&path), 2);

    let names: Vec<_> = loaded.checker_bundles().iter().map(CheckerBundle::name).collect();
    assert_eq!(names, vec!["xodrBundle", "xoscBundle"]);

    for (a, b) in original.issues().zip(loaded.issues()) {
        assert_eq!(a.issue_id(), b.issue_id());
        assert_eq!(a.description(), b.description());
        assert_eq!(a.level(), b.level());
        assert_eq!(a.rule_uid(), b.rule_uid());
        assert_eq!(a.locations(), b.locations());
    }

    let checker = loaded.checkers().next().unwrap();
    assert_eq!(checker.params().get("tolerance"), Some("0.01"));
    assert_eq!(checker.summary(), "Found 2 issues");
    assert_eq!(checker.rules().len(), 1);
    assert_eq!(checker.metadata()[0].description(), "schema version");
}

#[test]
fn write_results_root_and_version() {
    let root = sample_container().to_xml();
    assert_eq!(root.name, TAG_CHECKER_RESULTS);
    assert_eq!(root.attributes.get("version").map(String::as_str), Some("1.0.0"));
}

#[test]
fn empty_report_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("demo.xqar");

    let mut container = ResultContainer::new();
    container.create_checker_bundle("Demo", "", "");
    container.write_results(&path).unwrap();

    let mut loaded = ResultContainer::new();
    loaded.add_results_from_xml(&path);
    assert_eq!(loaded.checker_bundle_count(), 1);
    assert_eq!(loaded.checker_bundles()[0].name(), "Demo");
    assert_eq!(loaded.checker_count(), 0);
    assert_eq!(loaded.issue_count(), 0);
}

#[test]
fn severity_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("levels.xqar");

    let mut container = ResultContainer::new();
    let checker = container
        .create_checker_bundle("b", "", "")
        .create_checker("c", "", "");
    for level in IssueLevel::ALL {
        checker.add_issue(Issue::new(level.as_str(), level));
    }
    container.write_results(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains(r#"level="1""#));
    assert!(text.contains(r#"level="3""#));

    let mut loaded = ResultContainer::new();
    loaded.add_results_from_xml(&path);
    let levels: Vec<_> = loaded.issues().map(Issue::level).collect();
    assert_eq!(levels, IssueLevel::ALL.to_vec());
}

#[test]
fn merge_is_additive() {
    let temp_dir = TempDir::new().unwrap();
    let path_a = temp_dir.path().join("a.xqar");
    let path_b = temp_dir.path().join("b.xqar");

    let mut a = ResultContainer::new();
    a.create_checker_bundle("A", "", "")
        .create_checker("c", "", "")
        .add_issue(Issue::new("a1", IssueLevel::Error));
    a.write_results(&path_a).unwrap();

    let mut b = ResultContainer::new();
    let checker = b.create_checker_bundle("B", "", "").create_checker("c", "", "");
    checker.add_issue(Issue::new("b1", IssueLevel::Error));
    checker.add_issue(Issue::new("b2", IssueLevel::Error));
    b.write_results(&path_b).unwrap();

    let mut merged = ResultContainer::new();
    merged.add_results_from_xml(&path_a);
    merged.add_results_from_xml(&path_b);

    assert_eq!(merged.checker_bundle_count(), 2);
    assert_eq!(merged.issue_count(), 3);
}

#[test]
fn missing_file_leaves_container_empty() {
    let temp_dir = TempDir::new().unwrap();
    let mut container = ResultContainer::new();

    assert_eq!(container.add_results_from_xml(&temp_dir.path().join("none.xqar")), 0);
    assert!(!container.has_checker_bundles());
    assert!(container
        .try_add_results_from_xml(&temp_dir.path().join("none.xqar"))
        .is_err());
}

#[test]
fn malformed_file_leaves_container_unchanged() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.xqar");
    fs::write(&path, "<CheckerResults><CheckerBundle name=\"x\">").unwrap();

    let mut container = sample_container();
    assert_eq!(container.add_results_from_xml(&path), 0);
    assert_eq!(container.checker_bundle_count(), 2);
}

#[test]
fn unknown_elements_are_ignored_on_read() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("extra.xqar");
    fs::write(
        &path,
        r#"<CheckerResults version="1.0.0">
  <Statistics total="3"/>
  <CheckerBundle name="b" summary="" description="" build_date="" version="">
    <Checker checkerId="c" description="" summary="" status="completed">
      <Issue issueId="0" description="d" level="2" ruleUID="">
        <Locations description="l">
          <FutureLocation foo="bar"/>
          <XMLLocation xpath="/OpenDRIVE/header"/>
        </Locations>
      </Issue>
    </Checker>
  </CheckerBundle>
</CheckerResults>"#,
    )
    .unwrap();

    let mut container = ResultContainer::new();
    assert_eq!(container.add_results_from_xml(&path), 1);
    let issue = container.issues().next().unwrap();
    assert_eq!(issue.locations()[0].len(), 1);
}

// =============================================================================
// Configuration Projection
// =============================================================================

#[test]
fn convert_report_to_configuration_projects_names_and_params() {
    let container = sample_container();
    let mut configuration = Configuration::new();
    container.convert_report_to_configuration(&mut configuration);

    assert_eq!(configuration.checker_bundles().len(), 2);
    let bundle = configuration.checker_bundle_by_name("xodrBundle").unwrap();
    assert_eq!(bundle.params().get("XodrFile"), Some("maps/town.xodr"));
    let checker = bundle.checker_by_id("road_geometry").unwrap();
    assert_eq!(checker.params().get("tolerance"), Some("0.01"));
    assert_eq!(checker.min_level(), IssueLevel::Info);
    assert_eq!(checker.max_level(), IssueLevel::Error);
}

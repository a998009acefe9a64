use super::*;
use crate::result::location::{FileLocation, XmlLocation};

fn parse(text: &str) -> Element {
    Element::parse(text.as_bytes()).unwrap()
}

// =============================================================================
// Identity
// =============================================================================

#[test]
fn detached_issue_reports_zero() {
    let issue = Issue::new("detached", IssueLevel::Info);
    assert_eq!(issue.issue_id(), 0);
    assert!(!issue.has_issue_id());
    assert_eq!(issue.next_free_id(), 0);
}

#[test]
fn detached_issues_share_id_zero() {
    // Two detached issues collide on 0; ids only become unique once attached.
    let mut a = Issue::new("a", IssueLevel::Info);
    let mut b = Issue::new("b", IssueLevel::Info);
    a.set_issue_id_from_str("fresh");
    b.set_issue_id_from_str("fresh");
    assert_eq!(a.issue_id(), b.issue_id());
    assert_eq!(a.issue_id(), 0);
}

#[test]
fn numeric_string_is_used_verbatim() {
    let mut issue = Issue::new("x", IssueLevel::Error);
    issue.set_issue_id_from_str("42");
    assert_eq!(issue.issue_id(), 42);
}

#[test]
fn non_numeric_string_draws_fresh_id_when_attached() {
    let ids = IdAllocator::new();
    let mut issue = Issue::new("x", IssueLevel::Error);
    issue.bind(&ids);
    assert_eq!(issue.issue_id(), 0);

    issue.set_issue_id_from_str("not-a-number");
    assert_eq!(issue.issue_id(), 1);
}

#[test]
fn explicit_id_is_reserved_when_attached() {
    let ids = IdAllocator::new();
    let mut issue = Issue::new("x", IssueLevel::Error);
    issue.bind(&ids);
    issue.set_issue_id(7);

    assert_eq!(ids.next_id(), 8);
}

#[test]
fn bind_keeps_existing_id() {
    let ids = IdAllocator::new();
    let mut issue = Issue::new("x", IssueLevel::Warning);
    issue.set_issue_id(5);
    issue.bind(&ids);

    assert_eq!(issue.issue_id(), 5);
    assert_eq!(ids.peek(), 6);
}

#[test]
fn bind_replaces_id_already_in_use() {
    let ids = IdAllocator::new();
    let taken = ids.next_id();
    let mut issue = Issue::new("x", IssueLevel::Warning);
    issue.set_issue_id(taken);
    issue.bind(&ids);

    assert_ne!(issue.issue_id(), taken);
    assert_eq!(issue.issue_id(), 1);
}

#[test]
fn bind_replaces_out_of_range_id() {
    let ids = IdAllocator::new();
    let mut issue = Issue::new("x", IssueLevel::Warning);
    issue.set_issue_id(u64::MAX);
    issue.bind(&ids);

    assert_eq!(issue.issue_id(), 0);
}

#[test]
fn attach_replaces_existing_id() {
    let ids = IdAllocator::new();
    ids.reserve(2);
    let mut issue = Issue::new("x", IssueLevel::Warning);
    issue.set_issue_id(0);
    issue.attach(Some(&ids));

    assert_eq!(issue.issue_id(), 3);
    assert!(issue.is_attached());
}

#[test]
fn attach_without_counter_leaves_id_pending() {
    let mut issue = Issue::new("x", IssueLevel::Warning);
    issue.set_issue_id(9);
    issue.attach(None);

    assert!(!issue.has_issue_id());
    assert!(!issue.is_attached());
}

// =============================================================================
// Accessors
// =============================================================================

#[test]
fn defaults() {
    let issue = Issue::new("desc", IssueLevel::Warning);
    assert!(issue.is_enabled());
    assert_eq!(issue.rule_uid(), "");
    assert_eq!(issue.level_str(), "Warning");
    assert!(!issue.has_locations());
    assert!(!issue.has_domain_info());
}

#[test]
fn setters() {
    let mut issue = Issue::new("desc", IssueLevel::Warning);
    issue.set_description("changed");
    issue.set_level(IssueLevel::Error);
    issue.set_rule_uid("asam.net:xodr:1.7.0:road.geometry");
    issue.set_enabled(false);

    assert_eq!(issue.description(), "changed");
    assert_eq!(issue.level(), IssueLevel::Error);
    assert_eq!(issue.rule_uid(), "asam.net:xodr:1.7.0:road.geometry");
    assert!(!issue.is_enabled());
}

// =============================================================================
// XML
// =============================================================================

#[test]
fn to_xml_writes_all_attributes() {
    let mut issue = Issue::new("gap in lanes", IssueLevel::Error).with_rule_uid("r1");
    issue.set_issue_id(3);
    let element = issue.to_xml();

    assert_eq!(attr(&element, "issueId"), "3");
    assert_eq!(attr(&element, "description"), "gap in lanes");
    assert_eq!(attr(&element, "level"), "1");
    assert_eq!(attr(&element, "ruleUID"), "r1");
}

#[test]
fn round_trip_with_locations() {
    let mut issue = Issue::new("bad road", IssueLevel::Warning)
        .with_rule_uid("r2")
        .with_locations(LocationsContainer::with_item("road", XmlLocation::for_road("4")));
    issue.add_locations(LocationsContainer::with_item("file", FileLocation::at(10, 1)));
    issue.set_issue_id(11);

    let parsed = Issue::from_xml(&issue.to_xml()).unwrap();
    assert_eq!(parsed.issue_id(), 11);
    assert_eq!(parsed.description(), "bad road");
    assert_eq!(parsed.level(), IssueLevel::Warning);
    assert_eq!(parsed.rule_uid(), "r2");
    assert_eq!(parsed.locations(), issue.locations());
}

#[test]
fn from_xml_without_numeric_id_leaves_it_unset() {
    let issue = Issue::from_xml(&parse(r#"<Issue issueId="" description="d" level="3"/>"#)).unwrap();
    assert!(!issue.has_issue_id());
}

#[test]
fn from_xml_rejects_unknown_level() {
    assert!(Issue::from_xml(&parse(r#"<Issue issueId="1" description="d" level="7"/>"#)).is_none());
    assert!(Issue::from_xml(&parse(r#"<Issue issueId="1" description="d"/>"#)).is_none());
}

#[test]
fn from_xml_reads_domain_info() {
    let issue = Issue::from_xml(&parse(
        r#"<Issue issueId="1" description="d" level="2" ruleUID="">
             <DomainSpecificInfo name="extra"><Data a="1"/></DomainSpecificInfo>
           </Issue>"#,
    ))
    .unwrap();

    assert_eq!(issue.domain_info().len(), 1);
    assert_eq!(issue.domain_info()[0].name(), "extra");
    assert_eq!(issue.domain_info()[0].root().name, "Data");
}

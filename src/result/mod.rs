//! Result tree of a quality-check run: bundles own checkers, checkers own
//! issues, issues own locations and domain-specific payloads.

mod bundle;
mod checker;
mod container;
mod domain_info;
mod ids;
mod issue;
mod level;
mod location;
mod locations;
mod metadata;
mod rule;

pub use bundle::{CheckerBundle, PARAM_XODR_FILE, PARAM_XOSC_FILE, TAG_CHECKER_BUNDLE};
pub use checker::{Checker, DEFAULT_STATUS, IssueContext, TAG_CHECKER};
pub use container::{RESULTS_VERSION, ResultContainer, TAG_CHECKER_RESULTS};
pub use domain_info::{DomainSpecificInfo, TAG_DOMAIN_SPECIFIC_INFO};
pub use ids::IdAllocator;
pub use issue::{Issue, TAG_ISSUE};
pub use level::IssueLevel;
pub use location::{
    ExtendedInformation, FileLocation, InertialLocation, LocationKind, MessageLocation,
    RoadLocation, TAG_FILE_LOCATION, TAG_INERTIAL_LOCATION, TAG_MESSAGE_LOCATION,
    TAG_ROAD_LOCATION, TAG_TIME_LOCATION, TAG_XML_LOCATION, TimeLocation, XmlLocation,
};
pub use locations::{LocationsContainer, TAG_LOCATIONS};
pub use metadata::{Metadata, TAG_METADATA};
pub use rule::{Rule, TAG_ADDRESSED_RULE};

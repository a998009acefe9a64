//! Extended location information attached to issues.
//!
//! The variant set is closed: every location is one of the six kinds below,
//! each serialized under its own tag.

use xmltree::Element;

use crate::xml::{attr, attr_opt, attr_parse, set_attr};

pub const TAG_FILE_LOCATION: &str = "FileLocation";
pub const TAG_XML_LOCATION: &str = "XMLLocation";
pub const TAG_ROAD_LOCATION: &str = "RoadLocation";
pub const TAG_INERTIAL_LOCATION: &str = "InertialLocation";
pub const TAG_TIME_LOCATION: &str = "TimeLocation";
pub const TAG_MESSAGE_LOCATION: &str = "MessageLocation";

/// Position inside a source file: row/column, byte offset, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileLocation {
    RowColumn { row: u64, column: u64 },
    Offset { offset: u64 },
    RowColumnOffset { row: u64, column: u64, offset: u64 },
}

impl FileLocation {
    #[must_use]
    pub const fn at(row: u64, column: u64) -> Self {
        Self::RowColumn { row, column }
    }

    #[must_use]
    pub const fn at_offset(offset: u64) -> Self {
        Self::Offset { offset }
    }

    #[must_use]
    pub const fn with_offset(row: u64, column: u64, offset: u64) -> Self {
        Self::RowColumnOffset {
            row,
            column,
            offset,
        }
    }

    #[must_use]
    pub const fn row(&self) -> Option<u64> {
        match *self {
            Self::RowColumn { row, .. } | Self::RowColumnOffset { row, .. } => Some(row),
            Self::Offset { .. } => None,
        }
    }

    #[must_use]
    pub const fn column(&self) -> Option<u64> {
        match *self {
            Self::RowColumn { column, .. } | Self::RowColumnOffset { column, .. } => Some(column),
            Self::Offset { .. } => None,
        }
    }

    #[must_use]
    pub const fn offset(&self) -> Option<u64> {
        match *self {
            Self::Offset { offset } | Self::RowColumnOffset { offset, .. } => Some(offset),
            Self::RowColumn { .. } => None,
        }
    }

    #[must_use]
    pub fn to_xml(&self) -> Element {
        let mut element = Element::new(TAG_FILE_LOCATION);
        if let (Some(row), Some(column)) = (self.row(), self.column()) {
            set_attr(&mut element, "row", row);
            set_attr(&mut element, "column", column);
        }
        if let Some(offset) = self.offset() {
            set_attr(&mut element, "offset", offset);
        }
        element
    }

    /// `row` and `column` together select the row/column form, an `offset`
    /// attribute the offset form. A lone `row` or `column` counts as absent.
    /// Neither form yields `None`.
    #[must_use]
    pub fn from_xml(element: &Element) -> Option<Self> {
        let has_position =
            attr_opt(element, "row").is_some() && attr_opt(element, "column").is_some();
        let offset = attr_opt(element, "offset").map(|_| lenient(element, "offset"));
        match (has_position, offset) {
            (true, Some(offset)) => Some(Self::with_offset(
                lenient(element, "row"),
                lenient(element, "column"),
                offset,
            )),
            (true, None) => Some(Self::at(lenient(element, "row"), lenient(element, "column"))),
            (false, Some(offset)) => Some(Self::at_offset(offset)),
            (false, None) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlLocation {
    pub xpath: String,
}

impl XmlLocation {
    #[must_use]
    pub fn new(xpath: impl Into<String>) -> Self {
        Self {
            xpath: xpath.into(),
        }
    }

    /// `/OpenDRIVE/road[@id='<id>']`
    #[must_use]
    pub fn for_road(road_id: &str) -> Self {
        Self::new(road_xpath(road_id))
    }

    #[must_use]
    pub fn for_road_plan_view(road_id: &str) -> Self {
        Self::new(format!("{}/planView", road_xpath(road_id)))
    }

    #[must_use]
    pub fn for_road_elevation_profile(road_id: &str) -> Self {
        Self::new(format!("{}/elevationProfile", road_xpath(road_id)))
    }

    #[must_use]
    pub fn to_xml(&self) -> Element {
        let mut element = Element::new(TAG_XML_LOCATION);
        set_attr(&mut element, "xpath", &self.xpath);
        element
    }

    #[must_use]
    pub fn from_xml(element: &Element) -> Self {
        Self::new(attr(element, "xpath"))
    }
}

fn road_xpath(road_id: &str) -> String {
    format!("/OpenDRIVE/road[@id='{road_id}']")
}

/// Position in road coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadLocation {
    pub road_id: String,
    pub s: f64,
    pub t: f64,
}

impl RoadLocation {
    #[must_use]
    pub fn new(road_id: impl Into<String>, s: f64, t: f64) -> Self {
        Self {
            road_id: road_id.into(),
            s,
            t,
        }
    }

    #[must_use]
    pub fn to_xml(&self) -> Element {
        let mut element = Element::new(TAG_ROAD_LOCATION);
        set_attr(&mut element, "roadId", &self.road_id);
        set_attr(&mut element, "s", self.s);
        set_attr(&mut element, "t", self.t);
        element
    }

    #[must_use]
    pub fn from_xml(element: &Element) -> Self {
        Self::new(
            attr(element, "roadId"),
            lenient_f64(element, "s"),
            lenient_f64(element, "t"),
        )
    }
}

/// Pose in the inertial frame. Orientation angles are optional.
#[derive(Debug, Clone, PartialEq)]
pub struct InertialLocation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub heading: Option<f64>,
    pub pitch: Option<f64>,
    pub roll: Option<f64>,
}

impl InertialLocation {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            heading: None,
            pitch: None,
            roll: None,
        }
    }

    #[must_use]
    pub const fn with_orientation(mut self, heading: f64, pitch: f64, roll: f64) -> Self {
        self.heading = Some(heading);
        self.pitch = Some(pitch);
        self.roll = Some(roll);
        self
    }

    #[must_use]
    pub fn to_xml(&self) -> Element {
        let mut element = Element::new(TAG_INERTIAL_LOCATION);
        set_attr(&mut element, "x", self.x);
        set_attr(&mut element, "y", self.y);
        set_attr(&mut element, "z", self.z);
        for (name, value) in [("h", self.heading), ("p", self.pitch), ("r", self.roll)] {
            if let Some(value) = value {
                set_attr(&mut element, name, value);
            }
        }
        element
    }

    #[must_use]
    pub fn from_xml(element: &Element) -> Self {
        Self {
            x: lenient_f64(element, "x"),
            y: lenient_f64(element, "y"),
            z: lenient_f64(element, "z"),
            heading: attr_parse(element, "h"),
            pitch: attr_parse(element, "p"),
            roll: attr_parse(element, "r"),
        }
    }
}

/// Offset in seconds into a recording or scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeLocation {
    pub time: f64,
}

impl TimeLocation {
    #[must_use]
    pub const fn new(time: f64) -> Self {
        Self { time }
    }

    #[must_use]
    pub fn to_xml(&self) -> Element {
        let mut element = Element::new(TAG_TIME_LOCATION);
        set_attr(&mut element, "time", self.time);
        element
    }

    /// `None` when the `time` attribute is missing.
    #[must_use]
    pub fn from_xml(element: &Element) -> Option<Self> {
        attr_opt(element, "time")?;
        Some(Self::new(lenient_f64(element, "time")))
    }
}

/// Index of a message in a recorded stream.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageLocation {
    pub index: u64,
    pub channel: Option<String>,
    pub field: Option<String>,
    pub time: Option<f64>,
}

impl MessageLocation {
    #[must_use]
    pub const fn new(index: u64) -> Self {
        Self {
            index,
            channel: None,
            field: None,
            time: None,
        }
    }

    #[must_use]
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    #[must_use]
    pub const fn with_time(mut self, time: f64) -> Self {
        self.time = Some(time);
        self
    }

    #[must_use]
    pub fn to_xml(&self) -> Element {
        let mut element = Element::new(TAG_MESSAGE_LOCATION);
        set_attr(&mut element, "index", self.index);
        if let Some(channel) = &self.channel {
            set_attr(&mut element, "channel", channel);
        }
        if let Some(field) = &self.field {
            set_attr(&mut element, "field", field);
        }
        if let Some(time) = self.time {
            set_attr(&mut element, "time", time);
        }
        element
    }

    /// `None` when the `index` attribute is missing.
    #[must_use]
    pub fn from_xml(element: &Element) -> Option<Self> {
        attr_opt(element, "index")?;
        Some(Self {
            index: lenient(element, "index"),
            channel: attr_opt(element, "channel").map(str::to_string),
            field: attr_opt(element, "field").map(str::to_string),
            time: attr_parse(element, "time"),
        })
    }
}

fn lenient(element: &Element, name: &str) -> u64 {
    attr_parse(element, name).unwrap_or(0)
}

fn lenient_f64(element: &Element, name: &str) -> f64 {
    attr_parse(element, name).unwrap_or(0.0)
}

/// One location fact.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtendedInformation {
    File(FileLocation),
    Xml(XmlLocation),
    Road(RoadLocation),
    Inertial(InertialLocation),
    Time(TimeLocation),
    Message(MessageLocation),
}

impl ExtendedInformation {
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::File(_) => TAG_FILE_LOCATION,
            Self::Xml(_) => TAG_XML_LOCATION,
            Self::Road(_) => TAG_ROAD_LOCATION,
            Self::Inertial(_) => TAG_INERTIAL_LOCATION,
            Self::Time(_) => TAG_TIME_LOCATION,
            Self::Message(_) => TAG_MESSAGE_LOCATION,
        }
    }

    #[must_use]
    pub fn to_xml(&self) -> Element {
        match self {
            Self::File(location) => location.to_xml(),
            Self::Xml(location) => location.to_xml(),
            Self::Road(location) => location.to_xml(),
            Self::Inertial(location) => location.to_xml(),
            Self::Time(location) => location.to_xml(),
            Self::Message(location) => location.to_xml(),
        }
    }

    /// Dispatches on the element tag. Unknown tags and variants missing
    /// their required attributes yield `None`.
    #[must_use]
    pub fn from_xml(element: &Element) -> Option<Self> {
        match element.name.as_str() {
            TAG_FILE_LOCATION => FileLocation::from_xml(element).map(Self::File),
            TAG_XML_LOCATION => Some(Self::Xml(XmlLocation::from_xml(element))),
            TAG_ROAD_LOCATION => Some(Self::Road(RoadLocation::from_xml(element))),
            TAG_INERTIAL_LOCATION => Some(Self::Inertial(InertialLocation::from_xml(element))),
            TAG_TIME_LOCATION => TimeLocation::from_xml(element).map(Self::Time),
            TAG_MESSAGE_LOCATION => MessageLocation::from_xml(element).map(Self::Message),
            _ => None,
        }
    }

    /// Whether this location is of kind `T`.
    #[must_use]
    pub fn is<T: LocationKind>(&self) -> bool {
        T::from_info(self).is_some()
    }

    #[must_use]
    pub fn downcast_ref<T: LocationKind>(&self) -> Option<&T> {
        T::from_info(self)
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Implemented by each concrete location type; enables kind filtering
/// without matching on [`ExtendedInformation`] by hand.
pub trait LocationKind: sealed::Sealed + Sized {
    fn from_info(info: &ExtendedInformation) -> Option<&Self>;
}

macro_rules! location_kind {
    ($ty:ty, $variant:ident) => {
        impl sealed::Sealed for $ty {}

        impl LocationKind for $ty {
            fn from_info(info: &ExtendedInformation) -> Option<&Self> {
                match info {
                    ExtendedInformation::$variant(location) => Some(location),
                    _ => None,
                }
            }
        }

        impl From<$ty> for ExtendedInformation {
            fn from(location: $ty) -> Self {
                Self::$variant(location)
            }
        }
    };
}

location_kind!(FileLocation, File);
location_kind!(XmlLocation, Xml);
location_kind!(RoadLocation, Road);
location_kind!(InertialLocation, Inertial);
location_kind!(TimeLocation, Time);
location_kind!(MessageLocation, Message);

#[cfg(test)]
#[path = "location_tests.rs"]
mod tests;

//! Slide layouts and their placeholder inventories.

use serde::{Deserialize, Serialize};

/// Semantic role of a placeholder, derived once from its `p:ph/@type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderRole {
    /// Slide title (`title`, `ctrTitle`)
    Title,
    /// Body or generic content (`body`, `obj`, or no type)
    Body,
    /// Subtitle (`subTitle`)
    Subtitle,
    /// Picture (`pic`)
    Picture,
    /// Anything else: dates, footers, slide numbers, charts, tables, media
    Other,
}

impl PlaceholderRole {
    /// Classify a raw placeholder type attribute. A missing type means `obj`.
    pub fn from_ph_type(ph_type: Option<&str>) -> Self {
        match ph_type {
            None | Some("obj") | Some("body") => PlaceholderRole::Body,
            Some("title") | Some("ctrTitle") => PlaceholderRole::Title,
            Some("subTitle") => PlaceholderRole::Subtitle,
            Some("pic") => PlaceholderRole::Picture,
            Some(_) => PlaceholderRole::Other,
        }
    }

    /// Whether this role carries text that a deck slide can fill.
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            PlaceholderRole::Title | PlaceholderRole::Body | PlaceholderRole::Subtitle
        )
    }
}

/// Position and size of a placeholder in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotGeometry {
    /// Left offset
    pub x: i64,
    /// Top offset
    pub y: i64,
    /// Width
    pub cx: i64,
    /// Height
    pub cy: i64,
}

impl SlotGeometry {
    /// Width over height, if the slot has a height.
    pub fn aspect_ratio(&self) -> Option<f64> {
        (self.cy > 0).then(|| self.cx as f64 / self.cy as f64)
    }
}

/// A placeholder shape of a slide layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderSlot {
    /// Semantic role
    pub role: PlaceholderRole,

    /// Raw `p:ph/@type`, re-emitted verbatim on generated slides
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ph_type: Option<String>,

    /// Placeholder index (`p:ph/@idx`, 0 when absent)
    pub index: u32,

    /// Raw `p:ph/@orient`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orient: Option<String>,

    /// Raw `p:ph/@sz`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// Shape name (`p:cNvPr/@name`)
    pub name: String,

    /// Geometry declared on the layout; `None` means inherited from the master
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<SlotGeometry>,

    /// Whether the layout sets an explicit typeface or color on this slot
    pub explicit_style: bool,

    /// Explicit font size in hundredths of a point, if declared
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
}

impl PlaceholderSlot {
    /// Create a slot with only role, type and index set.
    pub fn new(ph_type: Option<&str>, index: u32) -> Self {
        Self {
            role: PlaceholderRole::from_ph_type(ph_type),
            ph_type: ph_type.map(String::from),
            index,
            orient: None,
            size: None,
            name: String::new(),
            geometry: None,
            explicit_style: false,
            font_size: None,
        }
    }

    /// Date, footer, slide number and header placeholders. These are never
    /// instantiated on generated slides.
    pub fn is_chrome(&self) -> bool {
        matches!(
            self.ph_type.as_deref(),
            Some("dt") | Some("ftr") | Some("sldNum") | Some("hdr")
        )
    }
}

/// A slide layout of the template with its placeholder inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutDescriptor {
    /// Part name of the layout (e.g. `ppt/slideLayouts/slideLayout2.xml`)
    pub id: String,

    /// Human-readable name (`p:cSld/@name`)
    pub name: String,

    /// Layout type (`p:sldLayout/@type`, e.g. `obj`, `secHead`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_type: Option<String>,

    /// Part name of the slide master owning this layout
    pub master: String,

    /// Placeholder slots in shape-tree order, unique by index
    pub slots: Vec<PlaceholderSlot>,
}

impl LayoutDescriptor {
    /// The title slot, if the layout has one.
    pub fn title_slot(&self) -> Option<&PlaceholderSlot> {
        self.slots
            .iter()
            .find(|s| s.role == PlaceholderRole::Title)
    }

    /// The first body/content slot.
    pub fn body_slot(&self) -> Option<&PlaceholderSlot> {
        self.slots.iter().find(|s| s.role == PlaceholderRole::Body)
    }

    /// All body/content slots.
    pub fn body_slots(&self) -> impl Iterator<Item = &PlaceholderSlot> {
        self.slots
            .iter()
            .filter(|s| s.role == PlaceholderRole::Body)
    }

    /// The first picture slot.
    pub fn picture_slot(&self) -> Option<&PlaceholderSlot> {
        self.slots
            .iter()
            .find(|s| s.role == PlaceholderRole::Picture)
    }

    /// Slot with the given placeholder index.
    pub fn slot_by_index(&self, index: u32) -> Option<&PlaceholderSlot> {
        self.slots.iter().find(|s| s.index == index)
    }

    /// Whether the layout exposes both a title and a body/content slot.
    pub fn has_title_and_body(&self) -> bool {
        self.title_slot().is_some() && self.body_slot().is_some()
    }
}

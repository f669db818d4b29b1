//! Layout resolution: map a free-form layout hint onto the template's layouts.
//!
//! Resolution is total. The rules are tried in order:
//!
//! 1. exact, case-insensitive layout name;
//! 2. semantic category of the hint (section, two content, title only, ...)
//!    matched against layout names, layout types and slot inventories;
//! 3. the first layout with both a title and a body/content slot;
//! 4. the first layout.

use crate::model::{LayoutDescriptor, PlaceholderRole};
use serde::Serialize;
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Semantic layout categories recognised in hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutCategory {
    /// Opening/cover slide
    TitleSlide,
    /// Section header / divider
    Section,
    /// Side-by-side comparison with headings
    Comparison,
    /// Two content areas
    TwoContent,
    /// Title without body
    TitleOnly,
    /// No placeholders
    Blank,
    /// Picture with caption
    Picture,
    /// Content with caption
    Caption,
    /// Vertical text
    Vertical,
    /// Title and a single content area
    TitleAndContent,
}

impl LayoutCategory {
    /// Detect the category a normalized hint asks for.
    ///
    /// More specific phrases are checked before generic ones, so
    /// "title only" wins over "title" and "picture with caption" over "caption".
    pub fn from_hint(normalized: &str) -> Option<Self> {
        let has = |word: &str| normalized.split(' ').any(|w| w == word);
        let has_phrase = |phrase: &str| normalized.contains(phrase);

        let category = if has("section") || has("divider") || has("sechead") {
            LayoutCategory::Section
        } else if has("comparison") || has("compare") || has("versus") || has("vs") {
            LayoutCategory::Comparison
        } else if has("two") || has("2") || has_phrase("columns") || has_phrase("side by side") {
            LayoutCategory::TwoContent
        } else if has_phrase("title only") || has("titleonly") {
            LayoutCategory::TitleOnly
        } else if has("blank") || has("empty") {
            LayoutCategory::Blank
        } else if has("picture") || has("image") || has("photo") || has("pic") {
            LayoutCategory::Picture
        } else if has("caption") {
            LayoutCategory::Caption
        } else if has("vertical") {
            LayoutCategory::Vertical
        } else if has_phrase("title slide")
            || has("cover")
            || has("opening")
            || has("intro")
            || normalized == "title"
        {
            LayoutCategory::TitleSlide
        } else if has("content") || has("bullets") || has("bullet") || has("list") || has("text") {
            LayoutCategory::TitleAndContent
        } else {
            return None;
        };
        Some(category)
    }

    /// Whether a layout belongs to this category.
    pub fn matches(&self, layout: &LayoutDescriptor) -> bool {
        let name = normalize(&layout.name);
        let name_has = |phrase: &str| name.contains(phrase);
        let layout_type = layout.layout_type.as_deref().unwrap_or("");

        match self {
            LayoutCategory::TitleSlide => layout_type == "title" || name_has("title slide"),
            LayoutCategory::Section => layout_type == "secHead" || name_has("section"),
            LayoutCategory::Comparison => {
                layout_type == "twoTxTwoObj" || name_has("comparison") || is_two_content(layout)
            }
            LayoutCategory::TwoContent => is_two_content(layout),
            LayoutCategory::TitleOnly => layout_type == "titleOnly" || name_has("title only"),
            LayoutCategory::Blank => layout_type == "blank" || name_has("blank"),
            LayoutCategory::Picture => {
                layout_type == "picTx"
                    || name_has("picture")
                    || layout
                        .slots
                        .iter()
                        .any(|s| s.role == PlaceholderRole::Picture)
            }
            LayoutCategory::Caption => layout_type == "objTx" || name_has("caption"),
            LayoutCategory::Vertical => {
                matches!(layout_type, "vertTx" | "vertTitleAndTx") || name_has("vertical")
            }
            LayoutCategory::TitleAndContent => {
                matches!(layout_type, "obj" | "tx")
                    || name_has("title and content")
                    || (name_has("content") && layout.has_title_and_body())
            }
        }
    }
}

fn is_two_content(layout: &LayoutDescriptor) -> bool {
    let name = normalize(&layout.name);
    matches!(
        layout.layout_type.as_deref(),
        Some("twoObj") | Some("twoTxTwoObj") | Some("twoColTx")
    ) || name.split(' ').any(|w| w == "two")
        || layout.body_slots().count() >= 2
}

/// Which rule produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveRule {
    /// Case-insensitive name match
    ExactName,
    /// Category match
    Category(LayoutCategory),
    /// First layout with title and body slots
    TitleAndBody,
    /// First layout of the inventory
    FirstLayout,
}

impl fmt::Display for ResolveRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveRule::ExactName => write!(f, "exact name"),
            ResolveRule::Category(category) => write!(f, "category {:?}", category),
            ResolveRule::TitleAndBody => write!(f, "fallback: title and body"),
            ResolveRule::FirstLayout => write!(f, "fallback: first layout"),
        }
    }
}

/// Result of resolving a hint.
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'a> {
    /// The chosen layout
    pub layout: &'a LayoutDescriptor,
    /// The rule that chose it
    pub rule: ResolveRule,
}

/// Lowercase, NFKC-normalize and reduce punctuation to single spaces.
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .nfkc()
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolve a layout hint against a layout inventory.
///
/// Returns `None` only when `layouts` is empty; an inspected template always
/// has at least one layout.
///
/// # Example
///
/// ```
/// use redeck::model::LayoutDescriptor;
/// use redeck::resolve::{resolve_layout, ResolveRule};
///
/// let layout = |name: &str| LayoutDescriptor {
///     id: format!("ppt/slideLayouts/{}.xml", name),
///     name: name.to_string(),
///     layout_type: None,
///     master: "ppt/slideMasters/slideMaster1.xml".to_string(),
///     slots: Vec::new(),
/// };
/// let layouts = vec![layout("Title Slide"), layout("Section Header")];
///
/// let resolution = resolve_layout("section header", &layouts).unwrap();
/// assert_eq!(resolution.layout.name, "Section Header");
/// assert_eq!(resolution.rule, ResolveRule::ExactName);
///
/// let resolution = resolve_layout("???", &layouts).unwrap();
/// assert_eq!(resolution.rule, ResolveRule::FirstLayout);
/// ```
pub fn resolve_layout<'a>(hint: &str, layouts: &'a [LayoutDescriptor]) -> Option<Resolution<'a>> {
    let first = layouts.first()?;

    let wanted = hint.trim().to_lowercase();
    if let Some(layout) = layouts
        .iter()
        .find(|l| l.name.trim().to_lowercase() == wanted)
    {
        return Some(Resolution {
            layout,
            rule: ResolveRule::ExactName,
        });
    }

    if let Some(category) = LayoutCategory::from_hint(&normalize(hint)) {
        if let Some(layout) = layouts.iter().find(|l| category.matches(l)) {
            return Some(Resolution {
                layout,
                rule: ResolveRule::Category(category),
            });
        }
    }

    if let Some(layout) = layouts.iter().find(|l| l.has_title_and_body()) {
        return Some(Resolution {
            layout,
            rule: ResolveRule::TitleAndBody,
        });
    }

    Some(Resolution {
        layout: first,
        rule: ResolveRule::FirstLayout,
    })
}

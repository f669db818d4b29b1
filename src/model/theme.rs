//! Theme color and font scheme.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A color slot of a theme's color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorRole {
    /// Dark 1 (default text)
    Dark1,
    /// Light 1 (default background)
    Light1,
    /// Dark 2
    Dark2,
    /// Light 2
    Light2,
    /// Accent 1
    Accent1,
    /// Accent 2
    Accent2,
    /// Accent 3
    Accent3,
    /// Accent 4
    Accent4,
    /// Accent 5
    Accent5,
    /// Accent 6
    Accent6,
    /// Hyperlink
    Hyperlink,
    /// Followed hyperlink
    FollowedHyperlink,
}

impl ColorRole {
    /// Map a `a:clrScheme` child element name to its role.
    pub fn from_element(local_name: &[u8]) -> Option<Self> {
        let role = match local_name {
            b"dk1" => ColorRole::Dark1,
            b"lt1" => ColorRole::Light1,
            b"dk2" => ColorRole::Dark2,
            b"lt2" => ColorRole::Light2,
            b"accent1" => ColorRole::Accent1,
            b"accent2" => ColorRole::Accent2,
            b"accent3" => ColorRole::Accent3,
            b"accent4" => ColorRole::Accent4,
            b"accent5" => ColorRole::Accent5,
            b"accent6" => ColorRole::Accent6,
            b"hlink" => ColorRole::Hyperlink,
            b"folHlink" => ColorRole::FollowedHyperlink,
            _ => return None,
        };
        Some(role)
    }
}

/// Major (headings) and minor (body) typefaces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontScheme {
    /// Latin typeface for headings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,

    /// Latin typeface for body text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minor: Option<String>,
}

/// Theme definition extracted from a template.
///
/// Colors are normalized to `#RRGGBB`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeProfile {
    /// Theme name (`a:theme/@name`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Color scheme
    pub colors: BTreeMap<ColorRole, String>,

    /// Font scheme
    pub fonts: FontScheme,
}

impl ThemeProfile {
    /// Color assigned to a role, as `#RRGGBB`.
    pub fn color(&self, role: ColorRole) -> Option<&str> {
        self.colors.get(&role).map(String::as_str)
    }

    /// Default background color (light 1).
    pub fn background(&self) -> Option<&str> {
        self.color(ColorRole::Light1)
    }

    /// Default text color (dark 1).
    pub fn text(&self) -> Option<&str> {
        self.color(ColorRole::Dark1)
    }

    /// Typeface for headings.
    pub fn major_font(&self) -> Option<&str> {
        self.fonts.major.as_deref()
    }

    /// Typeface for body text.
    pub fn minor_font(&self) -> Option<&str> {
        self.fonts.minor.as_deref()
    }
}

//! Abstract deck description supplied by the caller.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Layout hint used when a slide does not name one.
pub const DEFAULT_LAYOUT_HINT: &str = "Title and Content";

/// One slide of the deck description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideSpec {
    /// Slide title
    pub title: String,

    /// Bullet points, one paragraph each
    #[serde(default)]
    pub bullets: Vec<String>,

    /// Requested layout name or category (e.g. "Section Header")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_hint: Option<String>,

    /// Speaker notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SlideSpec {
    /// Create a slide with a title and nothing else.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the bullets.
    pub fn with_bullets<I, S>(mut self, bullets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bullets = bullets.into_iter().map(Into::into).collect();
        self
    }

    /// Set the layout hint.
    pub fn with_layout_hint(mut self, hint: impl Into<String>) -> Self {
        self.layout_hint = Some(hint.into());
        self
    }

    /// Set speaker notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// The layout hint, falling back to [`DEFAULT_LAYOUT_HINT`].
    pub fn hint(&self) -> &str {
        match self.layout_hint.as_deref().map(str::trim) {
            Some(hint) if !hint.is_empty() => hint,
            _ => DEFAULT_LAYOUT_HINT,
        }
    }

    /// Notes with surrounding whitespace removed; blank notes count as absent.
    pub fn notes_text(&self) -> Option<&str> {
        self.notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }
}

/// Ordered deck description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    /// Slides in presentation order
    pub slides: Vec<SlideSpec>,

    /// Tone guidance for the outline generator; not used when rendering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,

    /// Use-case guidance for the outline generator; not used when rendering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_case: Option<String>,
}

impl Deck {
    /// Create a deck from slides.
    pub fn new(slides: Vec<SlideSpec>) -> Self {
        Self {
            slides,
            ..Default::default()
        }
    }

    /// Parse a deck from its JSON form.
    ///
    /// # Example
    ///
    /// ```
    /// use redeck::Deck;
    ///
    /// let deck = Deck::from_json(r#"{"slides":[{"title":"Intro","bullets":["A","B"]}]}"#)?;
    /// assert_eq!(deck.slides[0].hint(), "Title and Content");
    /// # Ok::<(), redeck::Error>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the deck to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Whether the deck has no slides.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Boundary check for callers that require at least one slide.
    /// Generation itself accepts empty decks.
    pub fn require_slides(&self) -> Result<&Self> {
        if self.slides.is_empty() {
            return Err(Error::DeckEmpty);
        }
        Ok(self)
    }
}

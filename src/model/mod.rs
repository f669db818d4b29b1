//! Data model shared by the inspector, resolver and composer.
//!
//! Template-side structures ([`ThemeProfile`], [`LayoutDescriptor`],
//! [`ImageAsset`]) are produced once per request by the template inspector and
//! are read-only afterwards. Deck-side structures ([`Deck`], [`SlideSpec`]) are
//! the abstract slide content supplied by the caller.

mod deck;
mod image;
mod layout;
mod theme;

pub use deck::*;
pub use image::*;
pub use layout::*;
pub use theme::*;

//! # redeck
//!
//! Template-faithful PowerPoint deck generation.
//!
//! Given a user-supplied presentation or template package and an ordered
//! deck description, this library produces a new `.pptx` whose slides use the
//! template's own layouts, theme and reusable images.
//!
//! ## Quick Start
//!
//! ```no_run
//! use redeck::{generate, Deck, SlideSpec};
//!
//! let template = std::fs::read("brand.potx")?;
//! let deck = Deck::new(vec![
//!     SlideSpec::new("Quarterly Review").with_layout_hint("Title Slide"),
//!     SlideSpec::new("Highlights").with_bullets(["Revenue up", "Churn down"]),
//! ]);
//!
//! let bytes = generate(&template, &deck)?;
//! std::fs::write("review.pptx", bytes)?;
//! # Ok::<(), redeck::Error>(())
//! ```
//!
//! ## Step by step
//!
//! ```no_run
//! use redeck::{resolve_layout, GenerateOptions, Template};
//!
//! let template = Template::open("brand.pptx")?;
//! if let Some(resolution) = resolve_layout("two columns", template.layouts()) {
//!     println!("{} via {}", resolution.layout.name, resolution.rule);
//! }
//! let options = GenerateOptions::new().with_max_bullets(5);
//! # let deck = redeck::Deck::default();
//! let output = redeck::generate_deck(&template, &deck, &options)?;
//! println!("{} slides, {} bytes", output.slides.len(), output.bytes.len());
//! # Ok::<(), redeck::Error>(())
//! ```
//!
//! ## Features
//!
//! - `async`: `generate_file_async` on Tokio's blocking pool

pub mod compose;
pub mod container;
pub mod detect;
pub mod error;
pub mod model;
pub mod options;
pub mod package;
pub mod resolve;
pub mod template;

// Re-exports
pub use compose::{DeckAssembler, GeneratedDeck, SlideReport};
pub use container::{OoxmlContainer, Relationship, Relationships};
pub use detect::PackageKind;
pub use error::{Error, ErrorKind, Result};
pub use model::{
    Deck, ImageAsset, ImageFormat, LayoutDescriptor, PlaceholderRole, PlaceholderSlot, SlideSpec,
    ThemeProfile,
};
pub use options::{FallbackStyling, GenerateOptions};
pub use resolve::{resolve_layout, LayoutCategory, Resolution, ResolveRule};
pub use template::{Template, TemplateSummary};

use std::path::Path;

/// MIME type of every generated package.
pub const OUTPUT_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// Inspect template bytes with default options.
///
/// # Example
///
/// ```no_run
/// let data = std::fs::read("brand.potx")?;
/// let template = redeck::inspect(&data)?;
/// println!("{} layouts", template.layouts().len());
/// # Ok::<(), redeck::Error>(())
/// ```
pub fn inspect(data: &[u8]) -> Result<Template> {
    Template::from_bytes(data)
}

/// Inspect a template file with default options.
pub fn inspect_file(path: impl AsRef<Path>) -> Result<Template> {
    Template::open(path)
}

/// Generate a presentation from template bytes and a deck with default
/// options.
pub fn generate(template: &[u8], deck: &Deck) -> Result<Vec<u8>> {
    generate_with_options(template, deck, &GenerateOptions::default())
}

/// Generate a presentation from template bytes and a deck.
///
/// Either the complete package is returned or an error; no partial output.
pub fn generate_with_options(
    template: &[u8],
    deck: &Deck,
    options: &GenerateOptions,
) -> Result<Vec<u8>> {
    let template = Template::from_bytes_with_options(template, options)?;
    generate_deck(&template, deck, options).map(|output| output.bytes)
}

/// Generate a presentation from an inspected template, returning the
/// per-slide reports along with the bytes.
///
/// An empty deck yields a valid package with no content slides.
pub fn generate_deck(
    template: &Template,
    deck: &Deck,
    options: &GenerateOptions,
) -> Result<GeneratedDeck> {
    log::info!(
        "generating {} slides from {} template",
        deck.len(),
        template.kind()
    );
    let mut assembler = DeckAssembler::new(template, options)?;
    assembler.add_slides(&deck.slides)?;
    assembler.finish()
}

/// Generate a presentation from a template file and a deck JSON file.
///
/// The output file is written only after generation succeeded.
///
/// # Example
///
/// ```no_run
/// redeck::generate_file("brand.potx", "deck.json", "out.pptx")?;
/// # Ok::<(), redeck::Error>(())
/// ```
pub fn generate_file(
    template_path: impl AsRef<Path>,
    deck_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> Result<GeneratedDeck> {
    generate_file_with_options(
        template_path,
        deck_path,
        output_path,
        &GenerateOptions::default(),
    )
}

/// [`generate_file`] with explicit options.
pub fn generate_file_with_options(
    template_path: impl AsRef<Path>,
    deck_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    options: &GenerateOptions,
) -> Result<GeneratedDeck> {
    let template = std::fs::read(template_path.as_ref())?;
    let deck = Deck::from_json(&std::fs::read_to_string(deck_path.as_ref())?)?;

    let template = Template::from_bytes_with_options(&template, options)?;
    let output = generate_deck(&template, &deck, options)?;
    std::fs::write(output_path.as_ref(), &output.bytes)?;
    Ok(output)
}

/// Async variant of [`generate_file`]. File I/O goes through `tokio::fs`;
/// inspection and composition run on the blocking pool.
#[cfg(feature = "async")]
pub async fn generate_file_async(
    template_path: impl AsRef<Path>,
    deck_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    options: GenerateOptions,
) -> Result<GeneratedDeck> {
    let template = tokio::fs::read(template_path.as_ref()).await?;
    let deck = Deck::from_json(&tokio::fs::read_to_string(deck_path.as_ref()).await?)?;

    let output = tokio::task::spawn_blocking(move || -> Result<GeneratedDeck> {
        let template = Template::from_bytes_with_options(&template, &options)?;
        generate_deck(&template, &deck, &options)
    })
    .await
    .map_err(|e| Error::PackagingFailure(format!("generation task failed: {}", e)))??;

    tokio::fs::write(output_path.as_ref(), &output.bytes).await?;
    Ok(output)
}

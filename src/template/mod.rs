//! Template inspection.
//!
//! Opens an uploaded presentation package and extracts what slide composition
//! needs: the theme, the ordered layout inventory of every slide master, and
//! the pool of reusable images. The input bytes are never modified.

mod layouts;
mod media;
mod theme;

pub use layouts::parse_layout;
pub use theme::parse_theme;

pub(crate) use layouts::list_rel_ids;

use crate::container::OoxmlContainer;
use crate::detect::{detect_kind_from_content_types, looks_like_zip, PackageKind};
use crate::error::{Error, Result};
use crate::model::{ImageAsset, LayoutDescriptor, PlaceholderRole, ThemeProfile};
use crate::options::GenerateOptions;
use serde::Serialize;
use std::path::Path;

/// A parsed template, owned for the duration of one generation request.
pub struct Template {
    container: OoxmlContainer,
    kind: PackageKind,
    presentation_part: String,
    theme_part: String,
    theme: ThemeProfile,
    layouts: Vec<LayoutDescriptor>,
    images: Vec<ImageAsset>,
    slide_parts: Vec<String>,
    notes_master_part: Option<String>,
}

impl Template {
    /// Open and inspect a template file with default options.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use redeck::template::Template;
    ///
    /// let template = Template::open("brand.potx")?;
    /// for layout in template.layouts() {
    ///     println!("{} ({} placeholders)", layout.name, layout.slots.len());
    /// }
    /// # Ok::<(), redeck::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes(&data)
    }

    /// Inspect template bytes with default options.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, &GenerateOptions::default())
    }

    /// Inspect template bytes.
    ///
    /// Fails with [`Error::TemplateTooLarge`] before any parsing when the bytes
    /// exceed the cap, and with [`Error::TemplateInvalid`] for anything that is
    /// not a presentation package with a theme and at least one layout.
    pub fn from_bytes_with_options(data: &[u8], options: &GenerateOptions) -> Result<Self> {
        if data.len() > options.max_template_bytes {
            return Err(Error::TemplateTooLarge {
                size: data.len(),
                limit: options.max_template_bytes,
            });
        }
        if !looks_like_zip(data) {
            return Err(Error::TemplateInvalid("not a ZIP package".to_string()));
        }

        log::debug!("inspecting template ({} bytes)", data.len());
        Self::inspect(data, options).map_err(Error::into_template_invalid)
    }

    fn inspect(data: &[u8], options: &GenerateOptions) -> Result<Self> {
        let container = OoxmlContainer::from_bytes(data)?;
        let kind = detect_kind_from_content_types(container.read_binary("[Content_Types].xml")?)?;

        let package_rels = container.read_package_relationships()?;
        let presentation_part = package_rels
            .first_by_type("officeDocument")
            .map(|rel| OoxmlContainer::resolve_path("", &rel.target))
            .unwrap_or_else(|| "ppt/presentation.xml".to_string());
        let presentation_xml = container.read_xml(&presentation_part)?;
        let presentation_rels = container.read_relationships(&presentation_part)?;

        let resolve = |rel_id: &str| -> Option<String> {
            presentation_rels
                .get(rel_id)
                .filter(|rel| !rel.external)
                .map(|rel| OoxmlContainer::resolve_path(&presentation_part, &rel.target))
        };

        let master_parts: Vec<String> = list_rel_ids(&presentation_xml, b"sldMasterId")?
            .iter()
            .filter_map(|id| resolve(id.as_str()))
            .filter(|part| container.exists(part))
            .collect();
        if master_parts.is_empty() {
            return Err(Error::TemplateInvalid("no slide master".to_string()));
        }

        let slide_parts: Vec<String> = list_rel_ids(&presentation_xml, b"sldId")?
            .iter()
            .filter_map(|id| resolve(id.as_str()))
            .filter(|part| container.exists(part))
            .collect();

        let notes_master_part = list_rel_ids(&presentation_xml, b"notesMasterId")?
            .first()
            .and_then(|id| resolve(id.as_str()))
            .filter(|part| container.exists(part));

        let mut layouts: Vec<LayoutDescriptor> = Vec::new();
        let mut theme_part = presentation_rels
            .first_by_type("theme")
            .map(|rel| OoxmlContainer::resolve_path(&presentation_part, &rel.target));

        for master_part in &master_parts {
            let master_xml = container.read_xml(master_part)?;
            let master_rels = container.read_relationships(master_part)?;

            if theme_part.is_none() {
                theme_part = master_rels
                    .first_by_type("theme")
                    .map(|rel| OoxmlContainer::resolve_path(master_part, &rel.target));
            }

            let mut layout_ids = list_rel_ids(&master_xml, b"sldLayoutId")?;
            if layout_ids.is_empty() {
                layout_ids = master_rels
                    .get_by_type("slideLayout")
                    .into_iter()
                    .map(|rel| rel.id.clone())
                    .collect();
            }

            for layout_id in layout_ids {
                let Some(rel) = master_rels.get(&layout_id) else {
                    log::warn!("{}: dangling layout reference {}", master_part, layout_id);
                    continue;
                };
                let layout_part = OoxmlContainer::resolve_path(master_part, &rel.target);
                if layouts.iter().any(|l| l.id == layout_part) {
                    continue;
                }
                let layout_xml = container.read_xml(&layout_part)?;
                layouts.push(parse_layout(&layout_xml, &layout_part, master_part)?);
            }
        }

        if layouts.is_empty() {
            return Err(Error::TemplateInvalid("no slide layouts".to_string()));
        }

        let theme_part =
            theme_part.ok_or_else(|| Error::TemplateInvalid("no theme part".to_string()))?;
        let theme = parse_theme(&container.read_xml(&theme_part)?)?;

        let images = media::collect_images(&container, &slide_parts, options.image_pool_limit)?;

        log::info!(
            "template inspected: {} ({} layouts, {} existing slides, {} reusable images)",
            kind,
            layouts.len(),
            slide_parts.len(),
            images.len()
        );

        Ok(Self {
            container,
            kind,
            presentation_part,
            theme_part,
            theme,
            layouts,
            images,
            slide_parts,
            notes_master_part,
        })
    }

    /// The package kind the template was uploaded as.
    pub fn kind(&self) -> PackageKind {
        self.kind
    }

    /// Theme of the (first) slide master.
    pub fn theme(&self) -> &ThemeProfile {
        &self.theme
    }

    /// Layout inventory in master order. Never empty.
    pub fn layouts(&self) -> &[LayoutDescriptor] {
        &self.layouts
    }

    /// Look up a layout by part name.
    pub fn layout(&self, id: &str) -> Option<&LayoutDescriptor> {
        self.layouts.iter().find(|l| l.id == id)
    }

    /// Reusable image pool in insertion order.
    pub fn images(&self) -> &[ImageAsset] {
        &self.images
    }

    /// Slides already present in the template, in presentation order.
    pub fn slide_parts(&self) -> &[String] {
        &self.slide_parts
    }

    /// Part name of the main presentation part.
    pub fn presentation_part(&self) -> &str {
        &self.presentation_part
    }

    /// Part name of the theme part.
    pub fn theme_part(&self) -> &str {
        &self.theme_part
    }

    /// Part name of the notes master, if the template has one.
    pub fn notes_master_part(&self) -> Option<&str> {
        self.notes_master_part.as_deref()
    }

    /// The underlying package.
    pub fn container(&self) -> &OoxmlContainer {
        &self.container
    }

    /// Serializable overview of the template.
    pub fn summary(&self) -> TemplateSummary {
        TemplateSummary {
            kind: self.kind.name().to_string(),
            theme: self.theme.clone(),
            layouts: self
                .layouts
                .iter()
                .map(|l| LayoutSummary {
                    name: l.name.clone(),
                    layout_type: l.layout_type.clone(),
                    placeholders: l
                        .slots
                        .iter()
                        .filter(|s| !s.is_chrome())
                        .map(|s| s.role)
                        .collect(),
                })
                .collect(),
            existing_slides: self.slide_parts.len(),
            reusable_images: self.images.len(),
        }
    }
}

impl std::fmt::Debug for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Template")
            .field("kind", &self.kind)
            .field("layouts", &self.layouts.len())
            .field("images", &self.images.len())
            .finish()
    }
}

/// Overview of a template for display or JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateSummary {
    /// Package kind name
    pub kind: String,
    /// Theme colors and fonts
    pub theme: ThemeProfile,
    /// Layouts in inventory order
    pub layouts: Vec<LayoutSummary>,
    /// Number of slides already in the template
    pub existing_slides: usize,
    /// Number of images available for picture placeholders
    pub reusable_images: usize,
}

/// One layout in a [`TemplateSummary`].
#[derive(Debug, Clone, Serialize)]
pub struct LayoutSummary {
    /// Layout name
    pub name: String,
    /// Layout type attribute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_type: Option<String>,
    /// Roles of the content placeholders
    pub placeholders: Vec<PlaceholderRole>,
}

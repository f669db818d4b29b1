//! Slide composition.
//!
//! [`DeckAssembler`] owns the in-progress output package. It starts from a
//! copy of the template's parts, removes the template's own slides, then adds
//! one slide per [`SlideSpec`] in order. Image selection is cumulative across
//! slides, so slides are composed strictly sequentially.

mod notes;
mod pool;
mod slide;

pub use notes::{notes_master_xml, notes_slide_xml};
pub use pool::ImagePool;
pub use slide::{ComposedSlide, SlideComposer, IMAGE_REL_ID, LAYOUT_REL_ID};

use crate::container::{OoxmlContainer, Relationship, Relationships};
use crate::detect::PRESENTATION_MAIN_CONTENT_TYPE;
use crate::error::{Error, Result};
use crate::model::SlideSpec;
use crate::options::GenerateOptions;
use crate::package::{
    rel_type, rewrite_app_properties, rewrite_presentation, slide_entries, strip_references,
    AppStatistics, PackageWriter, PartGraph, PresentationEdit, SlideEntry, FIRST_SLIDE_ID,
    NOTES_MASTER_CONTENT_TYPE, NOTES_SLIDE_CONTENT_TYPE, SLIDE_CONTENT_TYPE, THEME_CONTENT_TYPE,
};
use crate::resolve::{resolve_layout, ResolveRule};
use crate::template::Template;
use serde::Serialize;
use std::collections::BTreeSet;

/// What happened to one deck slide.
#[derive(Debug, Clone, Serialize)]
pub struct SlideReport {
    /// Position in the deck (0-based)
    pub index: usize,
    /// Part name of the generated slide
    pub part_name: String,
    /// Name of the layout used
    pub layout: String,
    /// Part name of the layout used
    pub layout_part: String,
    /// Resolution rule that picked the layout
    pub rule: ResolveRule,
    /// Whether a title placeholder received the title
    pub title_placed: bool,
    /// Bullet paragraphs written
    pub bullets: usize,
    /// Media part placed in a picture placeholder
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Notes slide part
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Output of a generation run.
#[derive(Debug, Clone)]
pub struct GeneratedDeck {
    /// The presentation package
    pub bytes: Vec<u8>,
    /// One report per deck slide
    pub slides: Vec<SlideReport>,
}

/// Builds the output package slide by slide.
pub struct DeckAssembler<'t> {
    template: &'t Template,
    options: &'t GenerateOptions,
    composer: SlideComposer<'t>,
    pool: ImagePool<'t>,
    graph: PartGraph,
    slides: Vec<SlideEntry>,
    next_slide_id: u32,
    notes_master: Option<String>,
    added_notes_master_rel: Option<String>,
    reports: Vec<SlideReport>,
}

impl<'t> DeckAssembler<'t> {
    /// Start a new package from the template's parts.
    ///
    /// The main part's content type becomes the presentation type, macros
    /// are detached, and the template's slides are removed unless
    /// [`GenerateOptions::keep_existing_slides`] is set.
    pub fn new(template: &'t Template, options: &'t GenerateOptions) -> Result<Self> {
        let mut graph = PartGraph::from_container(template.container().clone())
            .map_err(Error::into_template_invalid)?;
        let presentation = template.presentation_part();

        graph
            .content_types_mut()
            .set_override(presentation, PRESENTATION_MAIN_CONTENT_TYPE);
        let macros = graph
            .relationships_mut(presentation)
            .remove_by_type("vbaProject");
        if !macros.is_empty() {
            log::info!("detached VBA project from {} template", template.kind());
        }

        let slides = if options.keep_existing_slides {
            slide_entries(&graph.xml(presentation)?).map_err(Error::into_template_invalid)?
        } else {
            remove_template_slides(&mut graph, presentation)
                .map_err(Error::into_template_invalid)?;
            Vec::new()
        };
        let next_slide_id = slides
            .iter()
            .map(|s| s.id + 1)
            .max()
            .unwrap_or(FIRST_SLIDE_ID)
            .max(FIRST_SLIDE_ID);

        Ok(Self {
            template,
            options,
            composer: SlideComposer::new(template.theme(), options),
            pool: ImagePool::new(template.images()),
            graph,
            slides,
            next_slide_id,
            notes_master: template.notes_master_part().map(String::from),
            added_notes_master_rel: None,
            reports: Vec::new(),
        })
    }

    /// Number of slides that will be in the output.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Reports of the slides added so far.
    pub fn reports(&self) -> &[SlideReport] {
        &self.reports
    }

    /// Resolve, compose and register one slide.
    pub fn add_slide(&mut self, spec: &SlideSpec) -> Result<&SlideReport> {
        let resolution = resolve_layout(spec.hint(), self.template.layouts())
            .ok_or_else(|| Error::TemplateInvalid("no slide layouts".to_string()))?;
        let layout = resolution.layout;
        log::debug!(
            "slide {}: hint {:?} -> {:?} ({})",
            self.reports.len() + 1,
            spec.hint(),
            layout.name,
            resolution.rule
        );

        let image = if layout.picture_slot().is_some() {
            self.pool.take()
        } else {
            None
        };
        let composed = self.composer.compose(spec, layout, image);

        let part = self.graph.next_free_name("ppt/slides/slide", "xml");
        self.graph
            .set_part(&part, composed.xml, Some(SLIDE_CONTENT_TYPE));

        let mut rels = Relationships::new();
        rels.add(Relationship::internal(
            LAYOUT_REL_ID,
            rel_type("slideLayout"),
            OoxmlContainer::relative_target(&part, &layout.id),
        ));
        let placed_image = match image {
            Some(image) if composed.image_placed => {
                rels.add(Relationship::internal(
                    IMAGE_REL_ID,
                    rel_type("image"),
                    OoxmlContainer::relative_target(&part, &image.part_name),
                ));
                if self.graph.content_types().content_type_for(&image.part_name).is_none() {
                    if let Some((_, ext)) = image.part_name.rsplit_once('.') {
                        self.graph
                            .content_types_mut()
                            .ensure_default(ext, image.format.mime_type());
                    }
                }
                log::debug!(
                    "slide {}: placed image #{} {} (sha256 {})",
                    self.reports.len() + 1,
                    image.id,
                    image.part_name,
                    image.short_digest()
                );
                Some(image.part_name.clone())
            }
            _ => None,
        };
        *self.graph.relationships_mut(&part) = rels;

        let notes = match spec.notes_text() {
            Some(text) => Some(
                self.add_notes(&part, text)
                    .map_err(Error::into_packaging_failure)?,
            ),
            None => None,
        };

        let presentation = self.template.presentation_part();
        let rel_id = self.graph.relate(presentation, "slide", &part);
        self.slides.push(SlideEntry {
            id: self.next_slide_id,
            rel_id,
        });
        self.next_slide_id += 1;

        self.reports.push(SlideReport {
            index: self.reports.len(),
            part_name: part,
            layout: layout.name.clone(),
            layout_part: layout.id.clone(),
            rule: resolution.rule,
            title_placed: composed.title_placed,
            bullets: composed.bullets_placed,
            image: placed_image,
            notes,
        });
        self.reports
            .last()
            .ok_or_else(|| Error::PackagingFailure("slide report missing".to_string()))
    }

    /// Add every slide of a deck in order.
    pub fn add_slides<'s>(&mut self, specs: impl IntoIterator<Item = &'s SlideSpec>) -> Result<()> {
        for spec in specs {
            self.add_slide(spec)?;
        }
        Ok(())
    }

    /// Create the notes slide for `slide_part`.
    fn add_notes(&mut self, slide_part: &str, text: &str) -> Result<String> {
        let master = self.ensure_notes_master()?;
        let part = self
            .graph
            .next_free_name("ppt/notesSlides/notesSlide", "xml");
        self.graph
            .set_part(&part, notes_slide_xml(text), Some(NOTES_SLIDE_CONTENT_TYPE));
        self.graph.relate(&part, "notesMaster", &master);
        self.graph.relate(&part, "slide", slide_part);
        self.graph.relate(slide_part, "notesSlide", &part);
        Ok(part)
    }

    /// The notes master, synthesized with a copy of the theme on first use
    /// when the template has none.
    fn ensure_notes_master(&mut self) -> Result<String> {
        if let Some(master) = &self.notes_master {
            return Ok(master.clone());
        }

        let source_theme = self.template.theme_part();
        let theme_data = self
            .graph
            .part(source_theme)
            .ok_or_else(|| Error::MissingComponent(source_theme.to_string()))?
            .to_vec();
        let theme_rels = self.graph.relationships(source_theme).cloned();

        let theme = self.graph.next_free_name("ppt/theme/theme", "xml");
        self.graph
            .set_part(&theme, theme_data, Some(THEME_CONTENT_TYPE));
        if let Some(rels) = theme_rels {
            // same directory, so relative targets stay valid
            *self.graph.relationships_mut(&theme) = rels;
        }

        let master = self
            .graph
            .next_free_name("ppt/notesMasters/notesMaster", "xml");
        self.graph
            .set_part(&master, notes_master_xml(), Some(NOTES_MASTER_CONTENT_TYPE));
        self.graph.relate(&master, "theme", &theme);

        let rel_id = self
            .graph
            .relate(self.template.presentation_part(), "notesMaster", &master);
        log::info!("template has no notes master; added {} with {}", master, theme);

        self.added_notes_master_rel = Some(rel_id);
        self.notes_master = Some(master.clone());
        Ok(master)
    }

    /// Rewrite the presentation part and serialize the package.
    pub fn finish(self) -> Result<GeneratedDeck> {
        let DeckAssembler {
            template,
            options,
            mut graph,
            slides,
            added_notes_master_rel,
            reports,
            ..
        } = self;

        let bytes = (|| {
            let presentation = template.presentation_part();
            let edit = PresentationEdit {
                slides,
                notes_master_rel_id: added_notes_master_rel,
                drop_custom_shows: !options.keep_existing_slides,
            };
            let rewritten = rewrite_presentation(&graph.xml(presentation)?, &edit)?;
            graph.set_part(presentation, rewritten, None);
            let stats = app_statistics(
                &graph,
                presentation,
                &edit.slides,
                options.keep_existing_slides,
            );
            refresh_app_properties(&mut graph, &stats);
            log::info!(
                "assembled {} slides ({} from the deck)",
                edit.slides.len(),
                reports.len()
            );
            PackageWriter::new().write(graph)
        })()
        .map_err(Error::into_packaging_failure)?;

        Ok(GeneratedDeck {
            bytes,
            slides: reports,
        })
    }
}

/// Remove the template's slides with their notes slides and presentation
/// relationships. Media they used is pruned at write time if nothing else
/// references it.
///
/// Other parts may still point at the removed slides (the outline view's
/// slide list, slide-jump hyperlinks on layouts and masters). Those
/// relationships are dropped along with the elements that use them, so a
/// recycled slide name is never bound by a stale reference.
fn remove_template_slides(graph: &mut PartGraph, presentation: &str) -> Result<()> {
    let removed = graph.relationships_mut(presentation).remove_by_type("slide");
    let mut gone = BTreeSet::new();
    for rel in &removed {
        if rel.external {
            continue;
        }
        let slide = OoxmlContainer::resolve_path(presentation, &rel.target);
        if let Some(notes) = graph.target_by_type(&slide, "notesSlide") {
            graph.remove_part(&notes);
            gone.insert(notes);
        }
        graph.remove_part(&slide);
        gone.insert(slide);
    }
    if removed.is_empty() {
        return Ok(());
    }
    log::info!("removed {} slides carried by the template", removed.len());

    for (source, rel_ids) in graph.detach_targets(&gone) {
        if !graph.contains(&source) {
            continue;
        }
        let stripped = strip_references(&graph.xml(&source)?, &rel_ids)?;
        graph.set_part(&source, stripped, None);
        log::debug!(
            "{}: dropped {} references to removed slides",
            source,
            rel_ids.len()
        );
    }
    Ok(())
}

/// Statistics of the final slide list for `docProps/app.xml`.
fn app_statistics(
    graph: &PartGraph,
    presentation: &str,
    slides: &[SlideEntry],
    kept_template_slides: bool,
) -> AppStatistics {
    let notes = graph
        .relationships(presentation)
        .map(|rels| {
            slides
                .iter()
                .filter_map(|entry| rels.get(&entry.rel_id))
                .map(|rel| OoxmlContainer::resolve_path(presentation, &rel.target))
                .filter(|slide| graph.target_by_type(slide, "notesSlide").is_some())
                .count()
        })
        .unwrap_or(0);
    AppStatistics {
        slides: slides.len(),
        notes,
        // generated slides are never hidden
        hidden_slides: (!kept_template_slides).then_some(0),
    }
}

/// Refresh the extended properties part, if the package has one. A part
/// that cannot be parsed is carried over unchanged.
fn refresh_app_properties(graph: &mut PartGraph, stats: &AppStatistics) {
    let Some(app) = graph.target_by_type("", "extended-properties") else {
        return;
    };
    let rewritten = graph
        .xml(&app)
        .and_then(|xml| rewrite_app_properties(&xml, stats));
    match rewritten {
        Ok(data) => graph.set_part(&app, data, None),
        Err(e) => log::warn!("left {} unchanged: {}", app, e),
    }
}

impl std::fmt::Debug for DeckAssembler<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeckAssembler")
            .field("slides", &self.slides.len())
            .field("parts", &self.graph.len())
            .field("images_remaining", &self.pool.remaining())
            .finish()
    }
}

//! Slide XML emission.

use crate::model::{
    ImageAsset, LayoutDescriptor, PlaceholderRole, PlaceholderSlot, SlideSpec, ThemeProfile,
};
use crate::options::{FallbackStyling, GenerateOptions};
use std::fmt::Write as _;
use unicode_segmentation::UnicodeSegmentation;

/// Namespace declarations shared by generated slide-level parts.
pub(crate) const NAMESPACES: &str = concat!(
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#,
);

/// Relationship ID of the slide layout in every generated slide's rels.
pub const LAYOUT_REL_ID: &str = "rId1";
/// Relationship ID of the placed image, when there is one.
pub const IMAGE_REL_ID: &str = "rId2";

/// Run properties added on top of what the placeholder inherits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RunStyle {
    pub typeface: Option<String>,
    pub size: Option<u32>,
}

/// Cut `text` to at most `max` user-perceived characters (grapheme clusters).
pub(crate) fn truncate_chars(text: &str, max: usize) -> &str {
    match text.grapheme_indices(true).nth(max) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}

/// Escape text for element content, replacing characters XML 1.0 cannot carry.
pub(crate) fn xml_text(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, '\u{FFFE}' | '\u{FFFF}'))
        .map(|c| if c.is_control() && c != '\t' { ' ' } else { c })
        .collect();
    quick_xml::escape::escape(cleaned.as_str()).into_owned()
}

/// Append one paragraph with a single run (or an empty paragraph).
pub(crate) fn push_paragraph(xml: &mut String, escaped: &str, style: Option<&RunStyle>) {
    if escaped.is_empty() {
        xml.push_str(r#"<a:p><a:endParaRPr lang="en-US" dirty="0"/></a:p>"#);
        return;
    }

    xml.push_str(r#"<a:p><a:r><a:rPr lang="en-US" dirty="0""#);
    if let Some(size) = style.and_then(|s| s.size) {
        let _ = write!(xml, r#" sz="{}""#, size);
    }
    match style.and_then(|s| s.typeface.as_deref()) {
        Some(typeface) => {
            let _ = write!(
                xml,
                r#"><a:latin typeface="{}"/></a:rPr>"#,
                quick_xml::escape::escape(typeface)
            );
        }
        None => xml.push_str("/>"),
    }
    let _ = write!(xml, "<a:t>{}</a:t></a:r></a:p>", escaped);
}

/// The root group's non-visual and visual properties.
pub(crate) fn push_group_properties(xml: &mut String) {
    xml.push_str(concat!(
        r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
        r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/>"#,
        r#"<a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#,
    ));
}

/// A slide part ready to be added to the package.
#[derive(Debug, Clone)]
pub struct ComposedSlide {
    /// Slide XML
    pub xml: Vec<u8>,
    /// Whether the title was bound to a title placeholder
    pub title_placed: bool,
    /// Number of bullet paragraphs written
    pub bullets_placed: usize,
    /// Whether the image was placed (it then needs [`IMAGE_REL_ID`])
    pub image_placed: bool,
}

/// Binds one [`SlideSpec`] to the placeholders of its resolved layout.
#[derive(Debug, Clone, Copy)]
pub struct SlideComposer<'a> {
    theme: &'a ThemeProfile,
    options: &'a GenerateOptions,
}

impl<'a> SlideComposer<'a> {
    /// Create a composer for one template theme.
    pub fn new(theme: &'a ThemeProfile, options: &'a GenerateOptions) -> Self {
        Self { theme, options }
    }

    /// Build the slide XML.
    ///
    /// Every non-chrome placeholder of the layout is instantiated in shape
    /// order with an empty `p:spPr`, so geometry and styling stay inherited.
    /// The title goes to the title slot, bullets to the first body slot (or
    /// the subtitle when the layout has no body), and `image` to the first
    /// picture slot. Slots without content keep the layout's prompt.
    pub fn compose(
        &self,
        spec: &SlideSpec,
        layout: &LayoutDescriptor,
        image: Option<&ImageAsset>,
    ) -> ComposedSlide {
        let title_index = layout.title_slot().map(|s| s.index);
        let bullet_index = layout
            .body_slot()
            .or_else(|| {
                layout
                    .slots
                    .iter()
                    .find(|s| s.role == PlaceholderRole::Subtitle)
            })
            .map(|s| s.index);
        let picture_index = image.and(layout.picture_slot().map(|s| s.index));

        let mut xml = String::with_capacity(4096);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        let _ = write!(xml, "<p:sld {}>", NAMESPACES);
        xml.push_str("<p:cSld><p:spTree>");
        push_group_properties(&mut xml);

        let mut composed = ComposedSlide {
            xml: Vec::new(),
            title_placed: false,
            bullets_placed: 0,
            image_placed: false,
        };

        let mut shape_id = 2u32;
        for slot in layout.slots.iter().filter(|s| !s.is_chrome()) {
            let index = Some(slot.index);
            if index == picture_index && !composed.image_placed {
                push_picture(&mut xml, shape_id, slot);
                composed.image_placed = true;
            } else if index == title_index && slot.role == PlaceholderRole::Title {
                let title = truncate_chars(spec.title.trim(), self.options.max_title_chars);
                let paragraphs = [xml_text(title)];
                push_text_shape(&mut xml, shape_id, slot, &paragraphs, &self.title_style(slot));
                composed.title_placed = !title.is_empty();
            } else if index == bullet_index {
                let paragraphs: Vec<String> = spec
                    .bullets
                    .iter()
                    .take(self.options.max_bullets)
                    .map(|b| xml_text(truncate_chars(b.trim(), self.options.max_bullet_chars)))
                    .collect();
                push_text_shape(&mut xml, shape_id, slot, &paragraphs, &self.body_style(slot));
                composed.bullets_placed = paragraphs.len();
            } else {
                push_empty_placeholder(&mut xml, shape_id, slot);
            }
            shape_id += 1;
        }

        xml.push_str("</p:spTree></p:cSld>");
        xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
        xml.push_str("</p:sld>");

        if spec.bullets.len() > composed.bullets_placed && bullet_index.is_some() {
            log::debug!(
                "dropped {} bullets beyond the limit of {}",
                spec.bullets.len() - composed.bullets_placed,
                self.options.max_bullets
            );
        }

        composed.xml = xml.into_bytes();
        composed
    }

    fn fallback_typeface(&self, slot: &PlaceholderSlot, major: bool) -> Option<String> {
        if self.options.fallback_styling != FallbackStyling::ThemeFonts || slot.explicit_style {
            return None;
        }
        let font = if major {
            self.theme.major_font()
        } else {
            self.theme.minor_font()
        };
        font.map(String::from)
    }

    fn title_style(&self, slot: &PlaceholderSlot) -> RunStyle {
        let size = slot
            .font_size
            .filter(|sz| *sz > GenerateOptions::TITLE_CLAMP_THRESHOLD)
            .map(|_| self.options.max_title_font_size);
        RunStyle {
            typeface: self.fallback_typeface(slot, true),
            size,
        }
    }

    fn body_style(&self, slot: &PlaceholderSlot) -> RunStyle {
        RunStyle {
            typeface: self.fallback_typeface(slot, false),
            size: None,
        }
    }
}

fn shape_name(slot: &PlaceholderSlot, shape_id: u32) -> String {
    if slot.name.is_empty() {
        let role = match slot.role {
            PlaceholderRole::Title => "Title",
            PlaceholderRole::Body => "Content Placeholder",
            PlaceholderRole::Subtitle => "Subtitle",
            PlaceholderRole::Picture => "Picture Placeholder",
            PlaceholderRole::Other => "Placeholder",
        };
        format!("{} {}", role, shape_id - 1)
    } else {
        quick_xml::escape::escape(slot.name.as_str()).into_owned()
    }
}

/// `<p:ph .../>` reproducing the layout's placeholder identity.
fn push_ph(xml: &mut String, slot: &PlaceholderSlot) {
    xml.push_str("<p:ph");
    if let Some(ph_type) = &slot.ph_type {
        let _ = write!(xml, r#" type="{}""#, quick_xml::escape::escape(ph_type.as_str()));
    }
    if let Some(orient) = &slot.orient {
        let _ = write!(xml, r#" orient="{}""#, quick_xml::escape::escape(orient.as_str()));
    }
    if let Some(size) = &slot.size {
        let _ = write!(xml, r#" sz="{}""#, quick_xml::escape::escape(size.as_str()));
    }
    if slot.index != 0 {
        let _ = write!(xml, r#" idx="{}""#, slot.index);
    }
    xml.push_str("/>");
}

fn push_sp_open(xml: &mut String, shape_id: u32, slot: &PlaceholderSlot) {
    let _ = write!(
        xml,
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="{}"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr>"#,
        shape_id,
        shape_name(slot, shape_id)
    );
    push_ph(xml, slot);
    xml.push_str("</p:nvPr></p:nvSpPr><p:spPr/>");
}

fn push_text_shape(
    xml: &mut String,
    shape_id: u32,
    slot: &PlaceholderSlot,
    paragraphs: &[String],
    style: &RunStyle,
) {
    push_sp_open(xml, shape_id, slot);
    xml.push_str("<p:txBody><a:bodyPr/><a:lstStyle/>");
    if paragraphs.is_empty() {
        push_paragraph(xml, "", None);
    }
    for paragraph in paragraphs {
        push_paragraph(xml, paragraph, Some(style));
    }
    xml.push_str("</p:txBody></p:sp>");
}

fn push_empty_placeholder(xml: &mut String, shape_id: u32, slot: &PlaceholderSlot) {
    push_sp_open(xml, shape_id, slot);
    if slot.role.is_text() {
        xml.push_str("<p:txBody><a:bodyPr/><a:lstStyle/>");
        push_paragraph(xml, "", None);
        xml.push_str("</p:txBody>");
    }
    xml.push_str("</p:sp>");
}

/// A filled picture placeholder referencing [`IMAGE_REL_ID`].
fn push_picture(xml: &mut String, shape_id: u32, slot: &PlaceholderSlot) {
    let _ = write!(
        xml,
        r#"<p:pic><p:nvPicPr><p:cNvPr id="{}" name="{}"/><p:cNvPicPr><a:picLocks noGrp="1" noChangeAspect="1"/></p:cNvPicPr><p:nvPr>"#,
        shape_id,
        shape_name(slot, shape_id)
    );
    push_ph(xml, slot);
    let _ = write!(
        xml,
        r#"</p:nvPr></p:nvPicPr><p:blipFill><a:blip r:embed="{}"/><a:stretch><a:fillRect/></a:stretch></p:blipFill><p:spPr/></p:pic>"#,
        IMAGE_REL_ID
    );
}

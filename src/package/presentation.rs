//! Rewriting of the main presentation part.
//!
//! The part is streamed event by event so everything the generator does not
//! own (slide size, default text style, extensions, ...) is carried over
//! untouched.

use crate::error::{Error, Result};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};

/// Namespace of relationship-ID attributes (`r:id`).
pub const OFFICE_RELATIONSHIPS_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// URI of the PowerPoint 2010 sections extension.
const SECTION_LIST_EXT_URI: &str = "{521415D9-36F7-43E2-AB2F-B90AF26B5E84}";

/// Slide IDs below this value are reserved.
pub const FIRST_SLIDE_ID: u32 = 256;

/// Children of `p:presentation` that follow `p:notesMasterIdLst`.
const AFTER_NOTES_MASTERS: &[&[u8]] = &[
    b"handoutMasterIdLst",
    b"sldIdLst",
    b"sldSz",
    b"notesSz",
    b"smartTags",
    b"embeddedFontLst",
    b"custShowLst",
    b"photoAlbum",
    b"custDataLst",
    b"kinsoku",
    b"defaultTextStyle",
    b"modifyVerifier",
    b"extLst",
];

/// Children of `p:presentation` that follow `p:sldIdLst`.
const AFTER_SLIDES: &[&[u8]] = &[
    b"sldSz",
    b"notesSz",
    b"smartTags",
    b"embeddedFontLst",
    b"custShowLst",
    b"photoAlbum",
    b"custDataLst",
    b"kinsoku",
    b"defaultTextStyle",
    b"modifyVerifier",
    b"extLst",
];

/// One `p:sldId` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideEntry {
    /// Numeric slide ID (256 and up)
    pub id: u32,
    /// Relationship ID of the slide in the presentation's rels
    pub rel_id: String,
}

/// What to change in the presentation part.
#[derive(Debug, Clone, Default)]
pub struct PresentationEdit {
    /// Final slide list, replacing whatever `p:sldIdLst` held
    pub slides: Vec<SlideEntry>,
    /// Relationship ID of a newly added notes master
    pub notes_master_rel_id: Option<String>,
    /// Drop `p:custShowLst`, whose shows reference removed slides
    pub drop_custom_shows: bool,
}

/// Read the existing `p:sldIdLst` entries.
pub fn slide_entries(xml: &str) -> Result<Vec<SlideEntry>> {
    let mut entries = Vec::new();
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.name().local_name().as_ref() == b"sldId" =>
            {
                let mut id = None;
                let mut rel_id = None;
                for attr in e.attributes().flatten() {
                    let value = String::from_utf8_lossy(&attr.value).into_owned();
                    match (attr.key.prefix().is_some(), attr.key.local_name().as_ref()) {
                        (false, b"id") => id = value.parse().ok(),
                        (true, b"id") => rel_id = Some(value),
                        _ => {}
                    }
                }
                if let (Some(id), Some(rel_id)) = (id, rel_id) {
                    entries.push(SlideEntry { id, rel_id });
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(entries)
}

/// Streaming state of a rewrite.
struct Rewriter<'x> {
    writer: Writer<Vec<u8>>,
    edit: &'x PresentationEdit,
    prefix: String,
    rel_prefix: String,
    notes_pending: bool,
    slides_pending: bool,
}

impl Rewriter<'_> {
    fn qualified(&self, local: &str) -> String {
        if self.prefix.is_empty() {
            local.to_string()
        } else {
            format!("{}:{}", self.prefix, local)
        }
    }

    fn write(&mut self, event: Event<'_>) -> Result<()> {
        self.writer.write_event(event)?;
        Ok(())
    }

    /// Emit pending lists that must precede the top-level element `local`.
    fn flush_before(&mut self, local: Option<&[u8]>) -> Result<()> {
        let precedes = |list: &[&[u8]]| local.is_none_or(|name| list.contains(&name));
        if self.notes_pending && precedes(AFTER_NOTES_MASTERS) {
            self.write_notes_master_list()?;
        }
        if self.slides_pending && precedes(AFTER_SLIDES) {
            self.write_slide_list()?;
        }
        Ok(())
    }

    fn write_notes_master_list(&mut self) -> Result<()> {
        self.notes_pending = false;
        let Some(rel_id) = self.edit.notes_master_rel_id.as_deref() else {
            return Ok(());
        };
        let list = self.qualified("notesMasterIdLst");
        let mut item = BytesStart::new(self.qualified("notesMasterId"));
        item.push_attribute((format!("{}:id", self.rel_prefix).as_str(), rel_id));

        self.write(Event::Start(BytesStart::new(list.as_str())))?;
        self.write(Event::Empty(item))?;
        self.write(Event::End(BytesEnd::new(list.as_str())))
    }

    fn write_slide_list(&mut self) -> Result<()> {
        self.slides_pending = false;
        if self.edit.slides.is_empty() {
            return Ok(());
        }
        let list = self.qualified("sldIdLst");
        self.write(Event::Start(BytesStart::new(list.as_str())))?;
        for entry in &self.edit.slides {
            let mut item = BytesStart::new(self.qualified("sldId"));
            let id = entry.id.to_string();
            item.push_attribute(("id", id.as_str()));
            item.push_attribute((format!("{}:id", self.rel_prefix).as_str(), entry.rel_id.as_str()));
            self.writer.write_event(Event::Empty(item))?;
        }
        self.write(Event::End(BytesEnd::new(list.as_str())))
    }
}

/// Apply `edit` to a presentation part, returning the new XML.
///
/// `p:sldIdLst` is replaced by `edit.slides` (omitted when empty), a
/// `p:notesMasterIdLst` is inserted when a notes master was added, and the
/// sections extension is dropped because its slide references go stale.
pub fn rewrite_presentation(xml: &str, edit: &PresentationEdit) -> Result<Vec<u8>> {
    let mut reader = Reader::from_str(xml);
    let mut rw = Rewriter {
        writer: Writer::new(Vec::new()),
        edit,
        prefix: String::new(),
        rel_prefix: "r".to_string(),
        notes_pending: edit.notes_master_rel_id.is_some(),
        slides_pending: true,
    };

    let mut depth = 0usize;
    // Depth at which a dropped subtree started
    let mut skip_from: Option<usize> = None;
    let mut saw_root = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| Error::XmlParse(format!("presentation part: {}", e)))?;

        if let Some(start) = skip_from {
            match event {
                Event::Start(_) => depth += 1,
                Event::End(_) => {
                    depth -= 1;
                    if depth == start {
                        skip_from = None;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(e) if depth == 0 => {
                saw_root = true;
                let root = prepare_root(&e, &mut rw.prefix, &mut rw.rel_prefix);
                rw.write(Event::Start(root))?;
                depth += 1;
            }
            Event::Start(e) if depth == 1 => {
                let local = e.local_name().as_ref().to_vec();
                rw.flush_before(Some(&local))?;
                match local.as_slice() {
                    b"sldIdLst" => {
                        rw.write_slide_list()?;
                        skip_from = Some(depth);
                    }
                    b"custShowLst" if edit.drop_custom_shows => skip_from = Some(depth),
                    b"notesMasterIdLst" => {
                        rw.notes_pending = false;
                        rw.write(Event::Start(e))?;
                    }
                    _ => rw.write(Event::Start(e))?,
                }
                depth += 1;
            }
            Event::Empty(e) if depth == 1 => {
                let local = e.local_name().as_ref().to_vec();
                rw.flush_before(Some(&local))?;
                match local.as_slice() {
                    b"sldIdLst" => rw.write_slide_list()?,
                    b"custShowLst" if edit.drop_custom_shows => {}
                    b"notesMasterIdLst" => {
                        rw.notes_pending = false;
                        rw.write(Event::Empty(e))?;
                    }
                    _ => rw.write(Event::Empty(e))?,
                }
            }
            Event::Start(e) if depth == 2 && is_section_ext(&e) => {
                skip_from = Some(depth);
                depth += 1;
            }
            Event::Empty(e) if depth == 2 && is_section_ext(&e) => {}
            Event::Start(e) => {
                rw.write(Event::Start(e))?;
                depth += 1;
            }
            Event::End(e) => {
                if depth == 1 {
                    rw.flush_before(None)?;
                }
                rw.write(Event::End(e))?;
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            other => rw.write(other)?,
        }
    }

    if !saw_root {
        return Err(Error::XmlParse(
            "presentation part has no root element".to_string(),
        ));
    }
    if depth != 0 {
        return Err(Error::XmlParse(
            "presentation part ends inside an element".to_string(),
        ));
    }

    Ok(rw.writer.into_inner())
}

/// Record the element prefix and the prefix bound to the relationships
/// namespace, declaring `xmlns:r` when the root lacks one.
fn prepare_root<'a>(e: &BytesStart<'a>, prefix: &mut String, rel_prefix: &mut String) -> BytesStart<'a> {
    if let Some(p) = e.name().prefix() {
        *prefix = String::from_utf8_lossy(p.as_ref()).into_owned();
    }

    let declared = e.attributes().flatten().find_map(|attr| {
        let key = attr.key.as_ref();
        let name = key.strip_prefix(b"xmlns:")?;
        (attr.value.as_ref() == OFFICE_RELATIONSHIPS_NS.as_bytes())
            .then(|| String::from_utf8_lossy(name).into_owned())
    });

    let mut root = e.clone();
    match declared {
        Some(p) => *rel_prefix = p,
        None => {
            let taken = e
                .attributes()
                .flatten()
                .any(|attr| attr.key.as_ref() == b"xmlns:r");
            if taken {
                *rel_prefix = "rel".to_string();
            }
            let key = format!("xmlns:{}", rel_prefix);
            root.push_attribute((key.as_str(), OFFICE_RELATIONSHIPS_NS));
        }
    }
    root
}

fn is_section_ext(e: &BytesStart<'_>) -> bool {
    e.local_name().as_ref() == b"ext"
        && e.attributes()
            .flatten()
            .any(|attr| attr.key.as_ref() == b"uri" && attr.value.as_ref() == SECTION_LIST_EXT_URI.as_bytes())
}

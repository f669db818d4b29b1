//! The `[Content_Types].xml` manifest.

use crate::container::attr_value;
use crate::error::{Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::collections::BTreeMap;

/// Part name of the manifest itself.
pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

/// Content type of presentation slides.
pub const SLIDE_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
/// Content type of notes slides.
pub const NOTES_SLIDE_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.notesSlide+xml";
/// Content type of the notes master.
pub const NOTES_MASTER_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.notesMaster+xml";
/// Content type of theme parts.
pub const THEME_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
/// Content type of relationship parts.
pub const RELATIONSHIPS_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-package.relationships+xml";

/// Parsed content-type manifest.
///
/// Extensions are stored lowercase; override part names without the leading `/`.
#[derive(Debug, Clone, Default)]
pub struct ContentTypes {
    defaults: BTreeMap<String, String>,
    overrides: BTreeMap<String, String>,
}

impl ContentTypes {
    /// Parse a `[Content_Types].xml` document.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut types = ContentTypes::default();
        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    match e.name().local_name().as_ref() {
                        b"Default" => {
                            if let (Some(ext), Some(ct)) =
                                (attr_value(e, b"Extension"), attr_value(e, b"ContentType"))
                            {
                                types.defaults.insert(ext.to_ascii_lowercase(), ct);
                            }
                        }
                        b"Override" => {
                            if let (Some(part), Some(ct)) =
                                (attr_value(e, b"PartName"), attr_value(e, b"ContentType"))
                            {
                                types
                                    .overrides
                                    .insert(part.trim_start_matches('/').to_string(), ct);
                            }
                        }
                        _ => {}
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(types)
    }

    /// Effective content type of a part: its override, else the default for
    /// its extension.
    pub fn content_type_for(&self, part_name: &str) -> Option<&str> {
        let part_name = part_name.trim_start_matches('/');
        if let Some(ct) = self.overrides.get(part_name) {
            return Some(ct);
        }
        let file = part_name.rsplit('/').next().unwrap_or(part_name);
        let (_, ext) = file.rsplit_once('.')?;
        self.defaults
            .get(&ext.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Override entry of a part, if any.
    pub fn override_for(&self, part_name: &str) -> Option<&str> {
        self.overrides
            .get(part_name.trim_start_matches('/'))
            .map(String::as_str)
    }

    /// Set an override for a part.
    pub fn set_override(&mut self, part_name: &str, content_type: &str) {
        self.overrides.insert(
            part_name.trim_start_matches('/').to_string(),
            content_type.to_string(),
        );
    }

    /// Remove the override of a part.
    pub fn remove_override(&mut self, part_name: &str) -> Option<String> {
        self.overrides.remove(part_name.trim_start_matches('/'))
    }

    /// Add a default for an extension unless one exists.
    pub fn ensure_default(&mut self, extension: &str, content_type: &str) {
        self.defaults
            .entry(extension.to_ascii_lowercase())
            .or_insert_with(|| content_type.to_string());
    }

    /// Replace every override whose content type equals `from`.
    /// Returns the number of entries changed.
    pub fn replace_content_type(&mut self, from: &str, to: &str) -> usize {
        let mut changed = 0;
        for ct in self.overrides.values_mut() {
            if ct == from {
                *ct = to.to_string();
                changed += 1;
            }
        }
        changed
    }

    /// Serialize the manifest.
    pub fn to_xml(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

        let mut root = BytesStart::new("Types");
        root.push_attribute(("xmlns", CONTENT_TYPES_NS));
        writer.write_event(Event::Start(root))?;

        for (ext, ct) in &self.defaults {
            let mut e = BytesStart::new("Default");
            e.push_attribute(("Extension", ext.as_str()));
            e.push_attribute(("ContentType", ct.as_str()));
            writer.write_event(Event::Empty(e))?;
        }
        for (part, ct) in &self.overrides {
            let part_name = format!("/{}", part);
            let mut e = BytesStart::new("Override");
            e.push_attribute(("PartName", part_name.as_str()));
            e.push_attribute(("ContentType", ct.as_str()));
            writer.write_event(Event::Empty(e))?;
        }

        writer.write_event(Event::End(BytesEnd::new("Types")))?;
        Ok(writer.into_inner())
    }
}

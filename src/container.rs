//! ZIP container abstraction for OOXML packages.
//!
//! The whole package is inflated into memory once, under a size budget, so the
//! inspector can read any part by name and the composer can carry unchanged
//! parts straight into the output package.

use crate::error::{Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

/// Upper bound on the inflated size of all parts, independent of the
/// compressed upload cap. Guards against ZIP bombs.
pub const DEFAULT_MAX_INFLATED_BYTES: usize = 256 * 1024 * 1024;

/// Namespace of `.rels` documents.
pub const PACKAGE_RELATIONSHIPS_NS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships";

/// A relationship entry from a .rels file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1")
    pub id: String,
    /// Relationship type URI
    pub rel_type: String,
    /// Target path (relative or absolute)
    pub target: String,
    /// Whether the target is external
    pub external: bool,
}

impl Relationship {
    /// Create an internal relationship.
    pub fn internal(
        id: impl Into<String>,
        rel_type: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            rel_type: rel_type.into(),
            target: target.into(),
            external: false,
        }
    }

    /// Whether this relationship type URI ends with the given short name
    /// (e.g. `"slideLayout"`), ignoring the transitional/strict namespace.
    pub fn is_type(&self, short: &str) -> bool {
        self.rel_type
            .rsplit('/')
            .next()
            .is_some_and(|last| last == short)
    }
}

/// Ordered collection of relationships parsed from a .rels file.
///
/// Document order is preserved so that re-serialized files are stable.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    entries: Vec<Relationship>,
}

impl Relationships {
    /// Create a new empty relationships collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the XML content of a .rels file.
    pub fn parse(content: &str) -> Result<Self> {
        let mut rels = Relationships::new();
        if content.trim().is_empty() {
            return Ok(rels);
        }

        let mut reader = quick_xml::Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.name().local_name().as_ref() == b"Relationship" =>
                {
                    let id = attr_value(&e, b"Id").unwrap_or_default();
                    let rel_type = attr_value(&e, b"Type").unwrap_or_default();
                    let target = attr_value(&e, b"Target").unwrap_or_default();
                    let external = attr_value(&e, b"TargetMode")
                        .is_some_and(|mode| mode.eq_ignore_ascii_case("external"));

                    if !id.is_empty() {
                        rels.add(Relationship {
                            id,
                            rel_type,
                            target,
                            external,
                        });
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Get a relationship by ID.
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.entries.iter().find(|r| r.id == id)
    }

    /// Get relationships by short type name (e.g. `"slide"`).
    pub fn get_by_type(&self, short: &str) -> Vec<&Relationship> {
        self.entries.iter().filter(|r| r.is_type(short)).collect()
    }

    /// First relationship of the given short type name.
    pub fn first_by_type(&self, short: &str) -> Option<&Relationship> {
        self.entries.iter().find(|r| r.is_type(short))
    }

    /// Add a relationship.
    pub fn add(&mut self, rel: Relationship) {
        self.entries.push(rel);
    }

    /// Add an internal relationship under the next free ID and return that ID.
    pub fn add_next(&mut self, rel_type: &str, target: impl Into<String>) -> String {
        let id = self.next_id();
        self.add(Relationship::internal(id.clone(), rel_type, target));
        id
    }

    /// Remove every relationship of the given short type, returning them.
    pub fn remove_by_type(&mut self, short: &str) -> Vec<Relationship> {
        let (removed, kept) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|r| r.is_type(short));
        self.entries = kept;
        removed
    }

    /// Remove a relationship by ID.
    pub fn remove(&mut self, id: &str) -> Option<Relationship> {
        let pos = self.entries.iter().position(|r| r.id == id)?;
        Some(self.entries.remove(pos))
    }

    /// Serialize as a `.rels` document.
    pub fn to_xml(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

        let mut root = BytesStart::new("Relationships");
        root.push_attribute(("xmlns", PACKAGE_RELATIONSHIPS_NS));
        writer.write_event(Event::Start(root))?;
        for rel in &self.entries {
            let mut e = BytesStart::new("Relationship");
            e.push_attribute(("Id", rel.id.as_str()));
            e.push_attribute(("Type", rel.rel_type.as_str()));
            e.push_attribute(("Target", rel.target.as_str()));
            if rel.external {
                e.push_attribute(("TargetMode", "External"));
            }
            writer.write_event(Event::Empty(e))?;
        }
        writer.write_event(Event::End(BytesEnd::new("Relationships")))?;
        Ok(writer.into_inner())
    }

    /// The next ID of the form `rIdN`, one past the highest in use.
    pub fn next_id(&self) -> String {
        let max = self
            .entries
            .iter()
            .filter_map(|r| r.id.strip_prefix("rId"))
            .filter_map(|n| n.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        format!("rId{}", max + 1)
    }

    /// Iterate relationships in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.entries.iter()
    }

    /// Number of relationships.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Read an attribute by local name, unescaping XML entities.
pub(crate) fn attr_value(e: &BytesStart<'_>, local: &[u8]) -> Option<String> {
    e.attributes().flatten().find_map(|attr| {
        if attr.key.local_name().as_ref() == local {
            Some(
                attr.unescape_value()
                    .map(|v| v.into_owned())
                    .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned()),
            )
        } else {
            None
        }
    })
}

/// Fix XML encoding declaration from UTF-16 to UTF-8.
///
/// After decoding UTF-16 into a Rust string the declaration still claims
/// UTF-16, which makes quick-xml misread the already-decoded content.
fn fix_xml_encoding_declaration(content: &str) -> String {
    if content.starts_with("<?xml") {
        if let Some(end_decl) = content.find("?>") {
            let decl = &content[..end_decl + 2];
            let rest = &content[end_decl + 2..];

            let fixed_decl = decl
                .replace("encoding=\"UTF-16\"", "encoding=\"UTF-8\"")
                .replace("encoding='UTF-16'", "encoding='UTF-8'")
                .replace("encoding=\"utf-16\"", "encoding=\"UTF-8\"")
                .replace("encoding='utf-16'", "encoding='UTF-8'");

            return format!("{}{}", fixed_decl, rest);
        }
    }
    content.to_string()
}

/// Decode XML bytes handling different encodings (UTF-8, UTF-16 LE/BE).
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return String::from_utf8(bytes[3..].to_vec())
            .map_err(|e| Error::XmlParse(e.to_string()));
    }

    if bytes.starts_with(&[0xFF, 0xFE]) {
        let content = decode_utf16(&bytes[2..], u16::from_le_bytes)?;
        return Ok(fix_xml_encoding_declaration(&content));
    }

    if bytes.starts_with(&[0xFE, 0xFF]) {
        let content = decode_utf16(&bytes[2..], u16::from_be_bytes)?;
        return Ok(fix_xml_encoding_declaration(&content));
    }

    match String::from_utf8(bytes.to_vec()) {
        Ok(s) => Ok(s),
        Err(_) => {
            // BOM-less UTF-16: ASCII markup leaves every other byte zero
            if bytes.len() >= 4 && bytes[1] == 0 && bytes[3] == 0 {
                decode_utf16(bytes, u16::from_le_bytes)
            } else if bytes.len() >= 4 && bytes[0] == 0 && bytes[2] == 0 {
                decode_utf16(bytes, u16::from_be_bytes)
            } else {
                Ok(String::from_utf8_lossy(bytes).into_owned())
            }
        }
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String> {
    let len = bytes.len() & !1;
    let units = (0..len).step_by(2).map(|i| unit([bytes[i], bytes[i + 1]]));

    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::XmlParse(e.to_string()))
}

/// OOXML container: every part of a ZIP package, inflated into memory.
#[derive(Clone)]
pub struct OoxmlContainer {
    parts: BTreeMap<String, Vec<u8>>,
}

impl OoxmlContainer {
    /// Open an OOXML container from a file path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use redeck::container::OoxmlContainer;
    ///
    /// let container = OoxmlContainer::open("template.potx")?;
    /// # Ok::<(), redeck::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Create an OOXML container from package bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_limited(data, DEFAULT_MAX_INFLATED_BYTES)
    }

    /// Create an OOXML container, refusing to inflate more than `max_inflated` bytes.
    pub fn from_bytes_limited(data: &[u8], max_inflated: usize) -> Result<Self> {
        let mut archive = zip::ZipArchive::new(Cursor::new(data))?;

        let mut parts = BTreeMap::new();
        let mut total = 0usize;
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if !file.is_file() {
                continue;
            }

            let name = file.name().trim_start_matches('/').to_string();
            // Header sizes are untrusted
            let mut bytes = Vec::new();
            file.by_ref()
                .take((max_inflated - total) as u64 + 1)
                .read_to_end(&mut bytes)?;
            total += bytes.len();
            if total > max_inflated {
                return Err(Error::TemplateTooLarge {
                    size: total,
                    limit: max_inflated,
                });
            }
            parts.insert(name, bytes);
        }

        Ok(Self { parts })
    }

    /// Build a container from an already-inflated part map.
    pub fn from_parts(parts: BTreeMap<String, Vec<u8>>) -> Self {
        Self { parts }
    }

    /// Read an XML part as a string.
    ///
    /// Handles UTF-8 (with or without BOM) and UTF-16 LE/BE.
    pub fn read_xml(&self, path: &str) -> Result<String> {
        decode_xml_bytes(self.read_binary(path)?)
    }

    /// Read a binary part.
    pub fn read_binary(&self, path: &str) -> Result<&[u8]> {
        self.parts
            .get(path.trim_start_matches('/'))
            .map(Vec::as_slice)
            .ok_or_else(|| Error::MissingComponent(path.to_string()))
    }

    /// Check if a part exists.
    pub fn exists(&self, path: &str) -> bool {
        self.parts.contains_key(path.trim_start_matches('/'))
    }

    /// List all part names.
    pub fn list_files(&self) -> Vec<String> {
        self.parts.keys().cloned().collect()
    }

    /// List part names matching a prefix.
    pub fn list_files_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.parts
            .keys()
            .filter(|n| n.starts_with(prefix))
            .cloned()
            .collect()
    }

    /// Number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the package has no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Read and parse the relationships of a part. A part without a .rels
    /// file has no relationships.
    pub fn read_relationships(&self, part_path: &str) -> Result<Relationships> {
        let rels_path = Self::rels_path_for(part_path);
        match self.read_xml(&rels_path) {
            Ok(content) => Relationships::parse(&content),
            Err(Error::MissingComponent(_)) => Ok(Relationships::new()),
            Err(e) => Err(e),
        }
    }

    /// Read package-level relationships (_rels/.rels).
    pub fn read_package_relationships(&self) -> Result<Relationships> {
        self.read_relationships("")
    }

    /// Consume the container, yielding its parts.
    pub fn into_parts(self) -> BTreeMap<String, Vec<u8>> {
        self.parts
    }

    /// The .rels part name for a part (`""` is the package itself).
    ///
    /// `ppt/slides/slide1.xml` maps to `ppt/slides/_rels/slide1.xml.rels`.
    pub fn rels_path_for(part_path: &str) -> String {
        let part_path = part_path.trim_start_matches('/');
        if part_path.is_empty() {
            return "_rels/.rels".to_string();
        }
        match part_path.rfind('/') {
            Some(slash) => format!(
                "{}/_rels/{}.rels",
                &part_path[..slash],
                &part_path[slash + 1..]
            ),
            None => format!("_rels/{}.rels", part_path),
        }
    }

    /// The source part a `.rels` part describes; the inverse of
    /// [`OoxmlContainer::rels_path_for`]. `None` for non-rels parts.
    pub fn source_for_rels(rels_path: &str) -> Option<String> {
        let file = rels_path.strip_suffix(".rels")?;
        let (dir, name) = match file.rsplit_once('/') {
            Some((dir, name)) => (dir, name),
            None => return None,
        };
        let parent = if dir == "_rels" {
            ""
        } else {
            dir.strip_suffix("/_rels")?
        };
        Some(match (parent.is_empty(), name.is_empty()) {
            (true, true) => String::new(),
            (true, false) => name.to_string(),
            (false, _) => format!("{}/{}", parent, name),
        })
    }

    /// Resolve a relative path from a base part path.
    pub fn resolve_path(base: &str, relative: &str) -> String {
        if let Some(stripped) = relative.strip_prefix('/') {
            return stripped.to_string();
        }

        let base_path = Path::new(base);
        let base_dir = base_path.parent().unwrap_or(Path::new(""));

        let mut result = base_dir.to_path_buf();
        for component in Path::new(relative).components() {
            match component {
                std::path::Component::ParentDir => {
                    result.pop();
                }
                std::path::Component::Normal(c) => {
                    result.push(c);
                }
                _ => {}
            }
        }

        result.to_string_lossy().replace('\\', "/")
    }

    /// Compute the relative target from a source part to a target part,
    /// as written into the source's .rels file.
    pub fn relative_target(source: &str, target: &str) -> String {
        let source_dir: Vec<&str> = match source.rfind('/') {
            Some(slash) => source[..slash].split('/').collect(),
            None => Vec::new(),
        };
        let target_segments: Vec<&str> = target.split('/').collect();
        let (target_dir, file) = target_segments.split_at(target_segments.len() - 1);

        let common = source_dir
            .iter()
            .zip(target_dir.iter())
            .take_while(|(a, b)| a == b)
            .count();

        let mut segments: Vec<&str> = Vec::new();
        segments.extend(std::iter::repeat_n("..", source_dir.len() - common));
        segments.extend(&target_dir[common..]);
        segments.extend(file);
        segments.join("/")
    }
}

impl std::fmt::Debug for OoxmlContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OoxmlContainer")
            .field("parts", &self.parts.len())
            .finish()
    }
}

//! Output package model.
//!
//! The output is held as a part graph: part bytes keyed by part name, the
//! parsed relationships of every source part, and the content-type manifest.
//! Relationship files and the manifest are regenerated from this model when
//! the package is written, so integrity can be checked before serialization.

mod app_properties;
mod content_types;
mod presentation;
mod references;
mod writer;

pub use app_properties::{rewrite_app_properties, AppStatistics};
pub use content_types::{
    ContentTypes, CONTENT_TYPES_PART, NOTES_MASTER_CONTENT_TYPE, NOTES_SLIDE_CONTENT_TYPE,
    RELATIONSHIPS_CONTENT_TYPE, SLIDE_CONTENT_TYPE, THEME_CONTENT_TYPE,
};
pub use presentation::{
    rewrite_presentation, slide_entries, PresentationEdit, SlideEntry, FIRST_SLIDE_ID,
    OFFICE_RELATIONSHIPS_NS,
};
pub use references::strip_references;
pub use writer::PackageWriter;

use crate::container::{OoxmlContainer, Relationship, Relationships};
use crate::error::{Error, Result};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Full relationship type URI for a short type name (`"slide"`, `"image"`, ...).
pub fn rel_type(short: &str) -> String {
    format!("{}/{}", OFFICE_RELATIONSHIPS_NS, short)
}

/// Parts and relationship graph of a package under construction.
#[derive(Debug, Clone, Default)]
pub struct PartGraph {
    parts: BTreeMap<String, Vec<u8>>,
    rels: BTreeMap<String, Relationships>,
    content_types: ContentTypes,
}

impl PartGraph {
    /// Build a graph from an inflated package, parsing every `.rels` part
    /// and the content-type manifest.
    pub fn from_container(container: OoxmlContainer) -> Result<Self> {
        let mut graph = PartGraph::default();
        for (name, data) in container.into_parts() {
            if name == CONTENT_TYPES_PART {
                let xml = crate::container::decode_xml_bytes(&data)?;
                graph.content_types = ContentTypes::parse(&xml)?;
            } else if let Some(source) = OoxmlContainer::source_for_rels(&name) {
                let xml = crate::container::decode_xml_bytes(&data)?;
                graph.rels.insert(source, Relationships::parse(&xml)?);
            } else {
                graph.parts.insert(name, data);
            }
        }
        Ok(graph)
    }

    /// Whether a part exists.
    pub fn contains(&self, part_name: &str) -> bool {
        self.parts.contains_key(part_name)
    }

    /// Raw bytes of a part.
    pub fn part(&self, part_name: &str) -> Option<&[u8]> {
        self.parts.get(part_name).map(Vec::as_slice)
    }

    /// Decoded XML of a part.
    pub fn xml(&self, part_name: &str) -> Result<String> {
        let data = self
            .part(part_name)
            .ok_or_else(|| Error::MissingComponent(part_name.to_string()))?;
        crate::container::decode_xml_bytes(data)
    }

    /// Part names in sorted order.
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.keys().map(String::as_str)
    }

    /// Number of parts, excluding relationship parts and the manifest.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the graph has no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Insert or replace a part. A content type, when given, becomes an
    /// override in the manifest.
    pub fn set_part(&mut self, part_name: &str, data: Vec<u8>, content_type: Option<&str>) {
        if let Some(ct) = content_type {
            self.content_types.set_override(part_name, ct);
        }
        self.parts.insert(part_name.to_string(), data);
    }

    /// Remove a part together with its relationships and manifest override.
    pub fn remove_part(&mut self, part_name: &str) -> Option<Vec<u8>> {
        self.rels.remove(part_name);
        self.content_types.remove_override(part_name);
        self.parts.remove(part_name)
    }

    /// Relationships of a source part (`""` for the package).
    pub fn relationships(&self, source: &str) -> Option<&Relationships> {
        self.rels.get(source)
    }

    /// Mutable relationships of a source part, created empty if missing.
    pub fn relationships_mut(&mut self, source: &str) -> &mut Relationships {
        self.rels.entry(source.to_string()).or_default()
    }

    /// Add an internal relationship from `source` to the part `target`,
    /// returning its new ID.
    pub fn relate(&mut self, source: &str, short_type: &str, target: &str) -> String {
        let relative = OoxmlContainer::relative_target(source, target);
        self.relationships_mut(source)
            .add_next(&rel_type(short_type), relative)
    }

    /// Resolved internal targets of a source part's relationships.
    pub fn targets(&self, source: &str) -> Vec<(Relationship, String)> {
        self.rels
            .get(source)
            .map(|rels| {
                rels.iter()
                    .filter(|rel| !rel.external)
                    .map(|rel| {
                        (
                            rel.clone(),
                            OoxmlContainer::resolve_path(source, &rel.target),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Resolved target of the first relationship of a type.
    pub fn target_by_type(&self, source: &str, short_type: &str) -> Option<String> {
        self.targets(source)
            .into_iter()
            .find(|(rel, _)| rel.is_type(short_type))
            .map(|(_, target)| target)
    }

    /// Drop every internal relationship that points at one of `removed`.
    /// Returns the dropped relationship IDs keyed by source part.
    pub fn detach_targets(
        &mut self,
        removed: &BTreeSet<String>,
    ) -> BTreeMap<String, BTreeSet<String>> {
        let mut detached = BTreeMap::new();
        for (source, rels) in self.rels.iter_mut() {
            let ids: BTreeSet<String> = rels
                .iter()
                .filter(|rel| !rel.external)
                .filter(|rel| removed.contains(&OoxmlContainer::resolve_path(source, &rel.target)))
                .map(|rel| rel.id.clone())
                .collect();
            if ids.is_empty() {
                continue;
            }
            for id in &ids {
                rels.remove(id);
                log::debug!("{} {} detached from removed part", display_source(source), id);
            }
            detached.insert(source.clone(), ids);
        }
        detached
    }

    /// The content-type manifest.
    pub fn content_types(&self) -> &ContentTypes {
        &self.content_types
    }

    /// Mutable content-type manifest.
    pub fn content_types_mut(&mut self) -> &mut ContentTypes {
        &mut self.content_types
    }

    /// First `{stem}{n}.{ext}` part name, counting from 1, that is not taken.
    pub fn next_free_name(&self, stem: &str, ext: &str) -> String {
        (1usize..)
            .map(|n| format!("{}{}.{}", stem, n, ext))
            .find(|name| !self.parts.contains_key(name))
            .unwrap_or_else(|| format!("{}.{}", stem, ext))
    }

    /// Part names reachable from the package relationships.
    pub fn reachable(&self) -> BTreeSet<String> {
        let mut seen = BTreeSet::new();
        let mut queue: VecDeque<String> = VecDeque::from([String::new()]);
        while let Some(source) = queue.pop_front() {
            for (_, target) in self.targets(&source) {
                if seen.insert(target.clone()) {
                    queue.push_back(target);
                }
            }
        }
        seen
    }

    /// Drop parts that no relationship chain from the package root reaches.
    /// Returns the removed part names.
    pub fn prune_unreachable(&mut self) -> Vec<String> {
        let reachable = self.reachable();
        let orphans: Vec<String> = self
            .parts
            .keys()
            .filter(|name| !reachable.contains(*name))
            .cloned()
            .collect();
        for name in &orphans {
            log::debug!("pruning unreachable part {}", name);
            self.remove_part(name);
        }
        self.rels
            .retain(|source, _| source.is_empty() || self.parts.contains_key(source));
        orphans
    }

    /// Check that every internal relationship target exists and every part
    /// has a content type.
    pub fn verify(&self) -> Result<()> {
        for source in self.rels.keys() {
            for (rel, target) in self.targets(source) {
                if !self.parts.contains_key(&target) {
                    return Err(Error::PackagingFailure(format!(
                        "{} {} points at missing part {}",
                        display_source(source),
                        rel.id,
                        target
                    )));
                }
            }
        }
        for name in self.parts.keys() {
            if self.content_types.content_type_for(name).is_none() {
                return Err(Error::PackagingFailure(format!(
                    "part {} has no content type",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Consume the graph: parts, serialized relationship files, and the
    /// serialized manifest.
    pub(crate) fn into_entries(self) -> Result<Vec<(String, Vec<u8>)>> {
        let mut entries = Vec::with_capacity(self.parts.len() + self.rels.len() + 1);
        entries.push((CONTENT_TYPES_PART.to_string(), self.content_types.to_xml()?));

        let mut rels = self.rels;
        if let Some(package_rels) = rels.remove("") {
            entries.push((OoxmlContainer::rels_path_for(""), package_rels.to_xml()?));
        }
        for (name, data) in self.parts {
            let part_rels = rels.remove(&name);
            entries.push((name.clone(), data));
            if let Some(part_rels) = part_rels.filter(|r| !r.is_empty()) {
                entries.push((OoxmlContainer::rels_path_for(&name), part_rels.to_xml()?));
            }
        }
        Ok(entries)
    }
}

fn display_source(source: &str) -> &str {
    if source.is_empty() {
        "package"
    } else {
        source
    }
}

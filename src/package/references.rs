//! Removal of XML elements that use dropped relationships.
//!
//! When a part loses relationships (because their targets were removed), any
//! element naming one of those IDs in an `r:id` attribute is dropped with its
//! subtree. Lists that end up empty, such as the outline view's `p:sldLst`,
//! are dropped as well.

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::collections::BTreeSet;

/// Elements omitted when every child was dropped.
const DROP_WHEN_EMPTY: &[&[u8]] = &[b"sldLst"];

/// Whether `e` names one of `rel_ids` in a prefixed `id` attribute.
fn uses_any(e: &BytesStart<'_>, rel_ids: &BTreeSet<String>) -> bool {
    e.attributes().flatten().any(|attr| {
        attr.key.prefix().is_some()
            && attr.key.local_name().as_ref() == b"id"
            && std::str::from_utf8(&attr.value).is_ok_and(|id| rel_ids.contains(id))
    })
}

/// Drop the elements of `xml` that reference any of `rel_ids`.
pub fn strip_references(xml: &str, rel_ids: &BTreeSet<String>) -> Result<Vec<u8>> {
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Vec::new());

    let mut depth = 0usize;
    let mut skip_from: Option<usize> = None;
    // Start tag of a list held back until its first surviving child
    let mut pending: Option<(BytesStart<'static>, usize)> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| Error::XmlParse(e.to_string()))?;

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
            Event::Start(e) if uses_any(&e, rel_ids) => {
                skip_from = Some(depth);
                depth += 1;
            }
            Event::Empty(e) if uses_any(&e, rel_ids) => {}
            Event::Start(e) if DROP_WHEN_EMPTY.contains(&e.local_name().as_ref()) => {
                if let Some((held, _)) = pending.take() {
                    writer.write_event(Event::Start(held))?;
                }
                pending = Some((e.into_owned(), depth));
                depth += 1;
            }
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                match pending.take() {
                    // every child was dropped
                    Some((_, at)) if at == depth => {}
                    Some((held, _)) => {
                        writer.write_event(Event::Start(held))?;
                        writer.write_event(Event::End(e))?;
                    }
                    None => writer.write_event(Event::End(e))?,
                }
            }
            Event::Text(_) if pending.is_some() => {}
            Event::Eof => break,
            other => {
                if let Some((held, _)) = pending.take() {
                    writer.write_event(Event::Start(held))?;
                }
                if matches!(other, Event::Start(_)) {
                    depth += 1;
                }
                writer.write_event(other)?;
            }
        }
    }

    if depth != 0 {
        return Err(Error::XmlParse("part ends inside an element".to_string()));
    }
    Ok(writer.into_inner())
}

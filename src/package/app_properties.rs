//! Refresh of the extended properties part (`docProps/app.xml`).
//!
//! The statistics PowerPoint shows in the file's properties are carried over
//! from the template, so they are rewritten for the assembled deck. Counts
//! that cannot be recomputed without rendering (words, paragraphs) and the
//! per-part title index are dropped. All of them are optional in the schema.

use crate::error::{Error, Result};
use quick_xml::events::{BytesText, Event};
use quick_xml::{Reader, Writer};

/// Children of `Properties` that describe the template's old content.
const STALE: &[&[u8]] = &[b"Words", b"Paragraphs", b"HeadingPairs", b"TitlesOfParts"];

/// Slide statistics of the assembled deck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppStatistics {
    /// Slides in the presentation
    pub slides: usize,
    /// Slides with a notes slide
    pub notes: usize,
    /// Hidden slides, when known
    pub hidden_slides: Option<usize>,
}

impl AppStatistics {
    fn value_for(&self, local: &[u8]) -> Option<usize> {
        match local {
            b"Slides" => Some(self.slides),
            b"Notes" => Some(self.notes),
            b"HiddenSlides" => self.hidden_slides,
            _ => None,
        }
    }
}

/// Rewrite the slide counts of an extended properties part.
pub fn rewrite_app_properties(xml: &str, stats: &AppStatistics) -> Result<Vec<u8>> {
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Vec::new());

    let mut depth = 0usize;
    let mut skip_from: Option<usize> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| Error::XmlParse(format!("extended properties: {}", e)))?;

        if let Some(start) = skip_from {
            match event {
                Event::Start(_) => depth += 1,
                Event::End(e) => {
                    depth -= 1;
                    if depth == start {
                        skip_from = None;
                        // replaced values keep their element
                        if !STALE.contains(&e.local_name().as_ref()) {
                            writer.write_event(Event::End(e))?;
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(e) if depth == 1 => {
                let local = e.local_name().as_ref().to_vec();
                if STALE.contains(&local.as_slice()) {
                    skip_from = Some(depth);
                } else if let Some(value) = stats.value_for(&local) {
                    writer.write_event(Event::Start(e))?;
                    writer.write_event(Event::Text(BytesText::new(&value.to_string())))?;
                    skip_from = Some(depth);
                } else {
                    writer.write_event(Event::Start(e))?;
                }
                depth += 1;
            }
            Event::Empty(e) if depth == 1 => {
                let local = e.local_name().as_ref().to_vec();
                if STALE.contains(&local.as_slice()) {
                    continue;
                }
                match stats.value_for(&local) {
                    Some(value) => {
                        let end = e.to_end().into_owned();
                        writer.write_event(Event::Start(e))?;
                        writer.write_event(Event::Text(BytesText::new(&value.to_string())))?;
                        writer.write_event(Event::End(end))?;
                    }
                    None => writer.write_event(Event::Empty(e))?,
                }
            }
            Event::Start(e) => {
                writer.write_event(Event::Start(e))?;
                depth += 1;
            }
            Event::End(e) => {
                writer.write_event(Event::End(e))?;
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            other => writer.write_event(other)?,
        }
    }

    if depth != 0 {
        return Err(Error::XmlParse(
            "extended properties end inside an element".to_string(),
        ));
    }
    Ok(writer.into_inner())
}

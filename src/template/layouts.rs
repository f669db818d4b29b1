//! Slide master and slide layout parsing.

use crate::container::attr_value;
use crate::error::{Error, Result};
use crate::model::{LayoutDescriptor, PlaceholderSlot, SlotGeometry};
use quick_xml::events::{BytesStart, Event};

/// Read the relationship ID of a `r:id` attribute, skipping a plain `id`.
pub(crate) fn rel_id_attr(e: &BytesStart<'_>) -> Option<String> {
    e.attributes().flatten().find_map(|attr| {
        let key = attr.key;
        if key.local_name().as_ref() == b"id" && key.prefix().is_some() {
            Some(String::from_utf8_lossy(&attr.value).into_owned())
        } else {
            None
        }
    })
}

/// Relationship IDs of a list element's children, in document order.
///
/// Used for `p:sldLayoutIdLst/p:sldLayoutId` in masters and for the
/// `sldMasterIdLst`, `sldIdLst` and `notesMasterIdLst` lists of the
/// presentation part.
pub(crate) fn list_rel_ids(xml: &str, item: &[u8]) -> Result<Vec<String>> {
    let mut ids = Vec::new();
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.name().local_name().as_ref() == item =>
            {
                if let Some(id) = rel_id_attr(e) {
                    ids.push(id);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(ids)
}

/// Placeholder shape being assembled while walking the shape tree.
#[derive(Default)]
struct ShapeState {
    name: String,
    placeholder: Option<PlaceholderSlot>,
    in_sp_pr: bool,
    in_xfrm: bool,
    in_tx_body: bool,
    off: Option<(i64, i64)>,
    ext: Option<(i64, i64)>,
    explicit_style: bool,
    font_size: Option<u32>,
}

impl ShapeState {
    /// Attribute-bearing elements, whether written as start or empty tags.
    fn visit(&mut self, e: &BytesStart<'_>) {
        match e.name().local_name().as_ref() {
            b"cNvPr" if self.name.is_empty() => {
                self.name = attr_value(e, b"name").unwrap_or_default();
            }
            b"ph" => {
                let ph_type = attr_value(e, b"type");
                let index = attr_value(e, b"idx")
                    .and_then(|v| v.parse::<u32>().ok())
                    .unwrap_or(0);
                let mut slot = PlaceholderSlot::new(ph_type.as_deref(), index);
                slot.orient = attr_value(e, b"orient");
                slot.size = attr_value(e, b"sz");
                self.placeholder = Some(slot);
            }
            b"off" if self.in_xfrm => {
                self.off = parse_pair(e, b"x", b"y");
            }
            b"ext" if self.in_xfrm => {
                self.ext = parse_pair(e, b"cx", b"cy");
            }
            b"latin" | b"solidFill" | b"gradFill" if self.in_tx_body => {
                self.explicit_style = true;
            }
            b"defRPr" | b"rPr" | b"endParaRPr" if self.in_tx_body => {
                if self.font_size.is_none() {
                    self.font_size = attr_value(e, b"sz").and_then(|v| v.parse().ok());
                }
            }
            _ => {}
        }
    }

    fn open(&mut self, local_name: &[u8]) {
        match local_name {
            b"spPr" => self.in_sp_pr = true,
            b"xfrm" if self.in_sp_pr => self.in_xfrm = true,
            b"txBody" => self.in_tx_body = true,
            _ => {}
        }
    }

    fn close(&mut self, local_name: &[u8]) {
        match local_name {
            b"spPr" => self.in_sp_pr = false,
            b"xfrm" => self.in_xfrm = false,
            b"txBody" => self.in_tx_body = false,
            _ => {}
        }
    }

    fn finish(self) -> Option<PlaceholderSlot> {
        let mut slot = self.placeholder?;
        slot.name = self.name;
        slot.geometry = match (self.off, self.ext) {
            (Some((x, y)), Some((cx, cy))) => Some(SlotGeometry { x, y, cx, cy }),
            _ => None,
        };
        slot.explicit_style = self.explicit_style;
        slot.font_size = self.font_size;
        Some(slot)
    }
}

fn parse_pair(e: &BytesStart<'_>, a: &[u8], b: &[u8]) -> Option<(i64, i64)> {
    let first = attr_value(e, a)?.parse().ok()?;
    let second = attr_value(e, b)?.parse().ok()?;
    Some((first, second))
}

fn is_shape(local_name: &[u8]) -> bool {
    matches!(local_name, b"sp" | b"pic" | b"graphicFrame")
}

/// Parse a slide layout part into a [`LayoutDescriptor`].
///
/// Placeholders are recorded in shape-tree order; a placeholder whose index
/// repeats an earlier one is ignored so that slot indices stay unique.
pub fn parse_layout(xml: &str, id: &str, master: &str) -> Result<LayoutDescriptor> {
    let mut layout = LayoutDescriptor {
        id: id.to_string(),
        name: String::new(),
        layout_type: None,
        master: master.to_string(),
        slots: Vec::new(),
    };

    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut saw_root = false;
    let mut shape: Option<ShapeState> = None;
    let mut shape_depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let local_name = e.name().local_name();
                match local_name.as_ref() {
                    b"sldLayout" if !saw_root => {
                        saw_root = true;
                        layout.layout_type = attr_value(e, b"type");
                    }
                    b"cSld" => {
                        layout.name = attr_value(e, b"name").unwrap_or_default();
                    }
                    name if is_shape(name) => {
                        shape_depth += 1;
                        if shape_depth == 1 {
                            shape = Some(ShapeState::default());
                        }
                    }
                    name => {
                        if let Some(state) = shape.as_mut() {
                            state.open(name);
                            state.visit(e);
                        }
                    }
                }
            }
            Ok(Event::Empty(ref e)) => {
                if let Some(state) = shape.as_mut() {
                    state.visit(e);
                }
            }
            Ok(Event::End(ref e)) => {
                let local_name = e.name().local_name();
                let name = local_name.as_ref();
                if is_shape(name) && shape_depth > 0 {
                    shape_depth -= 1;
                    if shape_depth == 0 {
                        if let Some(slot) = shape.take().and_then(ShapeState::finish) {
                            if layout.slot_by_index(slot.index).is_some() {
                                log::warn!(
                                    "{}: duplicate placeholder index {} ignored",
                                    id,
                                    slot.index
                                );
                            } else {
                                layout.slots.push(slot);
                            }
                        }
                    }
                } else if let Some(state) = shape.as_mut() {
                    state.close(name);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(format!("{}: {}", id, e))),
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return Err(Error::TemplateInvalid(format!(
            "{} is not a slide layout",
            id
        )));
    }

    if layout.name.is_empty() {
        layout.name = layout
            .layout_type
            .clone()
            .unwrap_or_else(|| part_stem(id).to_string());
    }

    Ok(layout)
}

fn part_stem(part_name: &str) -> &str {
    let file = part_name.rsplit('/').next().unwrap_or(part_name);
    file.strip_suffix(".xml").unwrap_or(file)
}

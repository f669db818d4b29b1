//! Theme part parsing (`ppt/theme/themeN.xml`).

use crate::container::attr_value;
use crate::error::{Error, Result};
use crate::model::{ColorRole, ThemeProfile};
use quick_xml::events::{BytesStart, Event};

#[derive(Clone, Copy, PartialEq, Eq)]
enum FontSlot {
    Major,
    Minor,
}

/// Parse a theme part into a [`ThemeProfile`].
///
/// Fails if the document is not well-formed or has no `a:theme` root.
pub fn parse_theme(xml: &str) -> Result<ThemeProfile> {
    let mut theme = ThemeProfile::default();
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut saw_root = false;
    let mut in_clr_scheme = false;
    let mut current_role: Option<ColorRole> = None;
    let mut font_slot: Option<FontSlot> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let local_name = e.name().local_name();
                match local_name.as_ref() {
                    b"theme" if !saw_root => {
                        saw_root = true;
                        theme.name = attr_value(e, b"name").filter(|n| !n.is_empty());
                    }
                    b"clrScheme" => in_clr_scheme = true,
                    b"majorFont" => font_slot = Some(FontSlot::Major),
                    b"minorFont" => font_slot = Some(FontSlot::Minor),
                    name if in_clr_scheme => {
                        if let Some(role) = ColorRole::from_element(name) {
                            current_role = Some(role);
                        } else {
                            read_color(e, current_role, &mut theme);
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(ref e)) => {
                let local_name = e.name().local_name();
                match local_name.as_ref() {
                    b"srgbClr" | b"sysClr" if in_clr_scheme => {
                        read_color(e, current_role, &mut theme)
                    }
                    b"latin" => {
                        if let Some(slot) = font_slot {
                            let typeface = attr_value(e, b"typeface").filter(|t| !t.is_empty());
                            match slot {
                                FontSlot::Major => theme.fonts.major = typeface,
                                FontSlot::Minor => theme.fonts.minor = typeface,
                            }
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) => {
                let local_name = e.name().local_name();
                match local_name.as_ref() {
                    b"clrScheme" => {
                        in_clr_scheme = false;
                        current_role = None;
                    }
                    b"majorFont" | b"minorFont" => font_slot = None,
                    name if ColorRole::from_element(name).is_some() => current_role = None,
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return Err(Error::TemplateInvalid(
            "theme part has no a:theme element".to_string(),
        ));
    }

    Ok(theme)
}

/// Record `a:srgbClr/@val` or `a:sysClr/@lastClr` for the open role.
fn read_color(e: &BytesStart<'_>, role: Option<ColorRole>, theme: &mut ThemeProfile) {
    let Some(role) = role else {
        return;
    };
    if theme.colors.contains_key(&role) {
        return;
    }
    let value = match e.name().local_name().as_ref() {
        b"srgbClr" => attr_value(e, b"val"),
        b"sysClr" => attr_value(e, b"lastClr"),
        _ => None,
    };
    if let Some(hex) = value.filter(|v| v.len() == 6) {
        theme.colors.insert(role, format!("#{}", hex.to_ascii_uppercase()));
    }
}

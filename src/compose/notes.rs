//! Notes slides and the fallback notes master.

use super::slide::{push_group_properties, push_paragraph, xml_text, NAMESPACES};
use std::fmt::Write as _;

/// Build a notes slide holding `text`, one paragraph per line.
pub fn notes_slide_xml(text: &str) -> Vec<u8> {
    let mut xml = String::with_capacity(1024 + text.len());
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    let _ = write!(xml, "<p:notes {}>", NAMESPACES);
    xml.push_str("<p:cSld><p:spTree>");
    push_group_properties(&mut xml);

    xml.push_str(concat!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Slide Image Placeholder 1"/>"#,
        r#"<p:cNvSpPr><a:spLocks noGrp="1" noRot="1" noChangeAspect="1"/></p:cNvSpPr>"#,
        r#"<p:nvPr><p:ph type="sldImg"/></p:nvPr></p:nvSpPr><p:spPr/></p:sp>"#,
    ));
    xml.push_str(concat!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="3" name="Notes Placeholder 2"/>"#,
        r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#,
        r#"<p:nvPr><p:ph type="body" idx="1"/></p:nvPr></p:nvSpPr><p:spPr/>"#,
        "<p:txBody><a:bodyPr/><a:lstStyle/>",
    ));
    for line in text.lines() {
        push_paragraph(&mut xml, &xml_text(line), None);
    }
    xml.push_str("</p:txBody></p:sp>");

    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:notes>");
    xml.into_bytes()
}

/// A minimal notes master for templates that ship without one.
///
/// Geometry follows the default portrait notes page (6858000 x 9144000 EMU).
pub fn notes_master_xml() -> Vec<u8> {
    let mut xml = String::with_capacity(2048);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    let _ = write!(xml, "<p:notesMaster {}>", NAMESPACES);
    xml.push_str("<p:cSld><p:bg><p:bgRef idx=\"1001\"><a:schemeClr val=\"bg1\"/></p:bgRef></p:bg><p:spTree>");
    push_group_properties(&mut xml);
    xml.push_str(concat!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Slide Image Placeholder 1"/>"#,
        r#"<p:cNvSpPr><a:spLocks noGrp="1" noRot="1" noChangeAspect="1"/></p:cNvSpPr>"#,
        r#"<p:nvPr><p:ph type="sldImg" idx="2"/></p:nvPr></p:nvSpPr>"#,
        r#"<p:spPr><a:xfrm><a:off x="685800" y="1143000"/><a:ext cx="5486400" cy="3086100"/></a:xfrm>"#,
        r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr></p:sp>"#,
    ));
    xml.push_str(concat!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="3" name="Notes Placeholder 2"/>"#,
        r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#,
        r#"<p:nvPr><p:ph type="body" sz="quarter" idx="3"/></p:nvPr></p:nvSpPr>"#,
        r#"<p:spPr><a:xfrm><a:off x="685800" y="4400550"/><a:ext cx="5486400" cy="3600450"/></a:xfrm>"#,
        r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr>"#,
        r#"<p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:endParaRPr lang="en-US"/></a:p></p:txBody></p:sp>"#,
    ));
    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str(concat!(
        r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" "#,
        r#"accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" "#,
        r#"hlink="hlink" folHlink="folHlink"/>"#,
    ));
    xml.push_str("<p:notesStyle>");
    xml.push_str(r#"<a:lvl1pPr marL="0" algn="l" rtl="0"><a:defRPr sz="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mn-lt"/></a:defRPr></a:lvl1pPr>"#);
    xml.push_str("</p:notesStyle>");
    xml.push_str("</p:notesMaster>");
    xml.into_bytes()
}

//! Image pool extraction.

use crate::container::{attr_value, OoxmlContainer};
use crate::error::{Error, Result};
use crate::model::{sniff_dimensions, ImageAsset, ImageFormat};
use quick_xml::events::{BytesStart, Event};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// A picture shape found on a slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PictureRef {
    /// Resolved media part name
    pub part_name: String,
    /// Displayed extent in EMUs
    pub extent: Option<(i64, i64)>,
}

/// Find `p:pic` shapes in a slide and resolve their `a:blip/@r:embed` targets.
pub(crate) fn picture_refs(
    container: &OoxmlContainer,
    slide_part: &str,
    xml: &str,
) -> Result<Vec<PictureRef>> {
    let rels = container.read_relationships(slide_part)?;
    let mut pictures = Vec::new();
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut in_pic = false;
    let mut in_blip_fill = false;
    let mut in_sp_pr = false;
    let mut current_rel_id: Option<String> = None;
    let mut current_extent: Option<(i64, i64)> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                match e.name().local_name().as_ref() {
                    b"pic" => {
                        in_pic = true;
                        current_rel_id = None;
                        current_extent = None;
                    }
                    b"blipFill" if in_pic => in_blip_fill = true,
                    b"spPr" if in_pic => in_sp_pr = true,
                    _ => {}
                }
                visit_picture_child(
                    e,
                    in_blip_fill,
                    in_sp_pr,
                    &mut current_rel_id,
                    &mut current_extent,
                );
            }
            Ok(Event::Empty(ref e)) => {
                visit_picture_child(
                    e,
                    in_blip_fill,
                    in_sp_pr,
                    &mut current_rel_id,
                    &mut current_extent,
                );
            }
            Ok(Event::End(ref e)) => match e.name().local_name().as_ref() {
                b"pic" => {
                    if let Some(rel_id) = current_rel_id.take() {
                        match rels.get(&rel_id) {
                            Some(rel) if !rel.external => pictures.push(PictureRef {
                                part_name: OoxmlContainer::resolve_path(slide_part, &rel.target),
                                extent: current_extent,
                            }),
                            _ => {}
                        }
                    }
                    current_extent = None;
                    in_pic = false;
                }
                b"blipFill" => in_blip_fill = false,
                b"spPr" => in_sp_pr = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(format!("{}: {}", slide_part, e))),
            _ => {}
        }
        buf.clear();
    }

    Ok(pictures)
}

/// `a:blip/@r:embed` inside `p:blipFill`, `a:ext` inside `p:spPr`.
fn visit_picture_child(
    e: &BytesStart<'_>,
    in_blip_fill: bool,
    in_sp_pr: bool,
    rel_id: &mut Option<String>,
    extent: &mut Option<(i64, i64)>,
) {
    match e.name().local_name().as_ref() {
        b"blip" if in_blip_fill => *rel_id = attr_value(e, b"embed"),
        b"ext" if in_sp_pr => {
            let cx = attr_value(e, b"cx").and_then(|v| v.parse().ok());
            let cy = attr_value(e, b"cy").and_then(|v| v.parse().ok());
            if let (Some(cx), Some(cy)) = (cx, cy) {
                *extent = Some((cx, cy));
            }
        }
        _ => {}
    }
}

/// Sort key that orders `image2.png` before `image10.png`.
fn natural_key(part_name: &str) -> (String, u64, String) {
    let stem = part_name.rsplit_once('.').map_or(part_name, |(s, _)| s);
    let digits = stem.len() - stem.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    let (prefix, number) = stem.split_at(stem.len() - digits);
    (
        prefix.to_string(),
        number.parse().unwrap_or(0),
        part_name.to_string(),
    )
}

fn is_media_part(part_name: &str) -> bool {
    part_name.split('/').any(|segment| segment == "media")
}

/// Collect the reusable image pool.
///
/// Images placed on existing slides come first, in slide order; remaining
/// media parts follow in natural name order. Content is deduplicated by
/// SHA-256 and the pool is capped at `limit` entries.
pub(crate) fn collect_images(
    container: &OoxmlContainer,
    slide_parts: &[String],
    limit: usize,
) -> Result<Vec<ImageAsset>> {
    let mut candidates: Vec<PictureRef> = Vec::new();
    for slide_part in slide_parts {
        let xml = container.read_xml(slide_part)?;
        candidates.extend(picture_refs(container, slide_part, &xml)?);
    }

    let mut media: Vec<String> = container
        .list_files()
        .into_iter()
        .filter(|name| is_media_part(name))
        .collect();
    media.sort_by_cached_key(|name| natural_key(name));
    candidates.extend(media.into_iter().map(|part_name| PictureRef {
        part_name,
        extent: None,
    }));

    let mut seen = HashSet::new();
    let mut pool = Vec::new();
    for candidate in candidates {
        if pool.len() >= limit {
            break;
        }
        let Some(format) = ImageFormat::from_part_name(&candidate.part_name) else {
            continue;
        };
        let Ok(data) = container.read_binary(&candidate.part_name) else {
            log::debug!("image {} referenced but missing", candidate.part_name);
            continue;
        };
        if data.is_empty() {
            continue;
        }

        let digest = hex::encode(Sha256::digest(data));
        if !seen.insert(digest.clone()) {
            continue;
        }

        let dimensions = sniff_dimensions(format, data);
        let asset = ImageAsset {
            id: pool.len(),
            part_name: candidate.part_name,
            format,
            sha256: digest,
            data: data.to_vec(),
            size: data.len(),
            width: dimensions.map(|(w, _)| w),
            height: dimensions.map(|(_, h)| h),
            extent: candidate.extent,
        };
        log::debug!(
            "pooled image #{} {} ({} bytes, sha256 {})",
            asset.id,
            asset.part_name,
            asset.size,
            asset.short_digest()
        );
        pool.push(asset);
    }

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    const SLIDE: &str = r#"<p:sld xmlns:a="a" xmlns:r="r" xmlns:p="p"><p:cSld><p:spTree>
      <p:pic>
        <p:nvPicPr><p:cNvPr id="4" name="Picture 3"/><p:cNvPicPr/><p:nvPr/></p:nvPicPr>
        <p:blipFill><a:blip r:embed="rId2"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>
        <p:spPr><a:xfrm><a:off x="1" y="2"/><a:ext cx="300" cy="200"/></a:xfrm></p:spPr>
      </p:pic>
      <p:pic>
        <p:blipFill><a:blip r:embed="rId9"/></p:blipFill>
        <p:spPr/>
      </p:pic>
    </p:spTree></p:cSld></p:sld>"#;

    const SLIDE_RELS: &str = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
      <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image10.png"/>
      <Relationship Id="rId9" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="https://example.com/x.png" TargetMode="External"/>
    </Relationships>"#;

    fn container(parts: &[(&str, &[u8])]) -> OoxmlContainer {
        let map: BTreeMap<String, Vec<u8>> = parts
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_vec()))
            .collect();
        OoxmlContainer::from_parts(map)
    }

    #[test]
    fn test_picture_refs() {
        let c = container(&[
            ("ppt/slides/slide1.xml", SLIDE.as_bytes()),
            ("ppt/slides/_rels/slide1.xml.rels", SLIDE_RELS.as_bytes()),
        ]);
        let refs = picture_refs(&c, "ppt/slides/slide1.xml", SLIDE).unwrap();
        assert_eq!(
            refs,
            vec![PictureRef {
                part_name: "ppt/media/image10.png".to_string(),
                extent: Some((300, 200)),
            }]
        );
    }

    #[test]
    fn test_natural_order() {
        let mut names = vec!["ppt/media/image10.png", "ppt/media/image2.png", "ppt/media/image1.jpeg"];
        names.sort_by_cached_key(|n| natural_key(n));
        assert_eq!(
            names,
            vec!["ppt/media/image1.jpeg", "ppt/media/image2.png", "ppt/media/image10.png"]
        );
    }

    #[test]
    fn test_collect_images_order_dedup_limit() {
        let c = container(&[
            ("ppt/slides/slide1.xml", SLIDE.as_bytes()),
            ("ppt/slides/_rels/slide1.xml.rels", SLIDE_RELS.as_bytes()),
            ("ppt/media/image1.png", b"first"),
            ("ppt/media/image2.png", b"second"),
            ("ppt/media/image3.png", b"first"),
            ("ppt/media/image10.png", b"placed"),
            ("ppt/media/media1.mp4", b"video"),
        ]);
        let slides = vec!["ppt/slides/slide1.xml".to_string()];

        let pool = collect_images(&c, &slides, 8).unwrap();
        let names: Vec<&str> = pool.iter().map(|a| a.part_name.as_str()).collect();
        assert_eq!(
            names,
            vec!["ppt/media/image10.png", "ppt/media/image1.png", "ppt/media/image2.png"]
        );
        assert_eq!(pool[0].extent, Some((300, 200)));
        assert_eq!(pool[0].id, 0);
        assert_eq!(pool[2].id, 2);
        assert_eq!(pool[1].data, b"first");

        let capped = collect_images(&c, &slides, 2).unwrap();
        assert_eq!(capped.len(), 2);
    }
}

//! Synthetic template packages for integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const PPTX: &str = "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
pub const POTX: &str = "application/vnd.openxmlformats-officedocument.presentationml.template.main+xml";
pub const PPTM: &str = "application/vnd.ms-powerpoint.presentation.macroEnabled.main+xml";

const NS: &str = concat!(
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#,
);
const REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Minimal PNG: signature and IHDR, followed by a marker byte so that
/// images with the same size still differ in content.
pub fn png(width: u32, height: u32, marker: u8) -> Vec<u8> {
    let mut data = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR".to_vec();
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&height.to_be_bytes());
    data.extend_from_slice(&[8, 2, 0, 0, 0, 0, 0, 0, 0, marker]);
    data
}

struct LayoutDef {
    name: String,
    layout_type: String,
    shapes: String,
}

fn ph_shape(id: u32, name: &str, ph: &str, body: &str) -> String {
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name}"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr>{ph}</p:nvPr></p:nvSpPr><p:spPr/>{body}</p:sp>"#
    )
}

fn prompt(text: &str) -> String {
    format!(
        r#"<p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:r><a:rPr lang="en-US"/><a:t>{text}</a:t></a:r></a:p></p:txBody>"#
    )
}

/// Builds a small but structurally complete presentation package.
pub struct TemplateBuilder {
    main_content_type: &'static str,
    layouts: Vec<LayoutDef>,
    images: Vec<(String, Vec<u8>)>,
    existing_slides: usize,
    notes_master: bool,
    macros: bool,
    view_props: bool,
    slide_jump: bool,
    app_properties: bool,
}

impl Default for TemplateBuilder {
    fn default() -> Self {
        let mut builder = Self {
            main_content_type: PPTX,
            layouts: Vec::new(),
            images: vec![
                ("ppt/media/image1.png".to_string(), png(640, 480, 1)),
                ("ppt/media/image2.png".to_string(), png(800, 600, 2)),
            ],
            existing_slides: 0,
            notes_master: false,
            macros: false,
            view_props: false,
            slide_jump: false,
            app_properties: false,
        };
        builder = builder
            .with_layout(
                "Title Slide",
                "title",
                &[
                    ph_shape(2, "Title 1", r#"<p:ph type="ctrTitle"/>"#, &prompt("Click to edit title")),
                    ph_shape(3, "Subtitle 2", r#"<p:ph type="subTitle" idx="1"/>"#, &prompt("Subtitle")),
                ]
                .concat(),
            )
            .with_layout(
                "Title and Content",
                "obj",
                &[
                    ph_shape(2, "Title 1", r#"<p:ph type="title"/>"#, &prompt("Click to edit title")),
                    ph_shape(3, "Content Placeholder 2", r#"<p:ph idx="1"/>"#, &prompt("Text")),
                    ph_shape(4, "Date Placeholder 3", r#"<p:ph type="dt" sz="half" idx="10"/>"#, ""),
                ]
                .concat(),
            )
            .with_layout(
                "Section Header",
                "secHead",
                &[
                    ph_shape(2, "Title 1", r#"<p:ph type="title"/>"#, &prompt("Section")),
                    ph_shape(3, "Text Placeholder 2", r#"<p:ph type="body" idx="1"/>"#, &prompt("Text")),
                ]
                .concat(),
            );
        builder
    }
}

impl TemplateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_main_content_type(mut self, content_type: &'static str) -> Self {
        self.main_content_type = content_type;
        self
    }

    pub fn with_layout(mut self, name: &str, layout_type: &str, shapes: &str) -> Self {
        self.layouts.push(LayoutDef {
            name: name.to_string(),
            layout_type: layout_type.to_string(),
            shapes: shapes.to_string(),
        });
        self
    }

    /// Add a "Picture with Caption" layout with a picture placeholder.
    pub fn with_picture_layout(self) -> Self {
        self.with_layout(
            "Picture with Caption",
            "picTx",
            &[
                ph_shape(2, "Title 1", r#"<p:ph type="title"/>"#, &prompt("Title")),
                ph_shape(3, "Picture Placeholder 2", r#"<p:ph type="pic" idx="1"/>"#, ""),
                ph_shape(4, "Text Placeholder 3", r#"<p:ph type="body" sz="half" idx="2"/>"#, &prompt("Text")),
            ]
            .concat(),
        )
    }

    pub fn without_images(mut self) -> Self {
        self.images.clear();
        self
    }

    pub fn with_image(mut self, part_name: &str, data: Vec<u8>) -> Self {
        self.images.push((part_name.to_string(), data));
        self
    }

    /// Existing slides, each showing `image1.png` and carrying a notes slide.
    pub fn with_existing_slides(mut self, count: usize) -> Self {
        self.existing_slides = count;
        self.notes_master = self.notes_master || count > 0;
        self
    }

    pub fn with_notes_master(mut self) -> Self {
        self.notes_master = true;
        self
    }

    pub fn with_macros(mut self) -> Self {
        self.macros = true;
        self
    }

    /// `ppt/viewProps.xml` whose outline view lists every existing slide.
    pub fn with_view_props(mut self) -> Self {
        self.view_props = true;
        self
    }

    /// A "Back to start" button on the master jumping to the first
    /// existing slide.
    pub fn with_slide_jump(mut self) -> Self {
        self.slide_jump = true;
        self
    }

    /// `docProps/app.xml` describing the existing slides.
    pub fn with_app_properties(mut self) -> Self {
        self.app_properties = true;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut buffer = Vec::new();
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        let mut put = |name: &str, data: &[u8]| {
            zip.start_file(name, options).unwrap();
            zip.write_all(data).unwrap();
        };

        put("[Content_Types].xml", self.content_types().as_bytes());
        let mut package_rels = vec![("rId1", "officeDocument", "ppt/presentation.xml")];
        if self.app_properties {
            package_rels.push(("rId2", "extended-properties", "docProps/app.xml"));
            put("docProps/app.xml", self.app_xml().as_bytes());
        }
        put("_rels/.rels", rels(&package_rels).as_bytes());
        put("ppt/presentation.xml", self.presentation().as_bytes());
        put(
            "ppt/_rels/presentation.xml.rels",
            self.presentation_rels().as_bytes(),
        );

        put("ppt/slideMasters/slideMaster1.xml", self.master().as_bytes());
        let mut master_rels: Vec<(String, &str, String)> = (1..=self.layouts.len())
            .map(|i| {
                (
                    format!("rId{}", i),
                    "slideLayout",
                    format!("../slideLayouts/slideLayout{}.xml", i),
                )
            })
            .collect();
        master_rels.push((
            format!("rId{}", self.layouts.len() + 1),
            "theme",
            "../theme/theme1.xml".to_string(),
        ));
        if self.slide_jump {
            master_rels.push((
                format!("rId{}", self.layouts.len() + 2),
                "slide",
                "../slides/slide1.xml".to_string(),
            ));
        }
        put(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            owned_rels(&master_rels).as_bytes(),
        );

        for (i, layout) in self.layouts.iter().enumerate() {
            let xml = format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sldLayout {NS} type="{}" preserve="1"><p:cSld name="{}"><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#,
                layout.layout_type, layout.name, layout.shapes
            );
            put(
                &format!("ppt/slideLayouts/slideLayout{}.xml", i + 1),
                xml.as_bytes(),
            );
            put(
                &format!("ppt/slideLayouts/_rels/slideLayout{}.xml.rels", i + 1),
                rels(&[("rId1", "slideMaster", "../slideMasters/slideMaster1.xml")]).as_bytes(),
            );
        }

        put("ppt/theme/theme1.xml", THEME.as_bytes());

        if self.notes_master {
            put(
                "ppt/notesMasters/notesMaster1.xml",
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:notesMaster {NS}><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/></p:spTree></p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/></p:notesMaster>"#
                )
                .as_bytes(),
            );
            put(
                "ppt/notesMasters/_rels/notesMaster1.xml.rels",
                rels(&[("rId1", "theme", "../theme/theme1.xml")]).as_bytes(),
            );
        }

        for i in 1..=self.existing_slides {
            let slide = format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sld {NS}><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{}<p:pic><p:nvPicPr><p:cNvPr id="3" name="Picture 2"/><p:cNvPicPr/><p:nvPr/></p:nvPicPr><p:blipFill><a:blip r:embed="rId2"/><a:stretch><a:fillRect/></a:stretch></p:blipFill><p:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="3048000" cy="2286000"/></a:xfrm></p:spPr></p:pic></p:spTree></p:cSld></p:sld>"#,
                ph_shape(2, "Title 1", r#"<p:ph type="title"/>"#, &prompt(&format!("Old slide {}", i)))
            );
            put(&format!("ppt/slides/slide{}.xml", i), slide.as_bytes());
            put(
                &format!("ppt/slides/_rels/slide{}.xml.rels", i),
                owned_rels(&[
                    ("rId1".to_string(), "slideLayout", "../slideLayouts/slideLayout2.xml".to_string()),
                    ("rId2".to_string(), "image", "../media/image1.png".to_string()),
                    ("rId3".to_string(), "notesSlide", format!("../notesSlides/notesSlide{}.xml", i)),
                ])
                .as_bytes(),
            );
            put(
                &format!("ppt/notesSlides/notesSlide{}.xml", i),
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:notes {NS}><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/></p:spTree></p:cSld></p:notes>"#
                )
                .as_bytes(),
            );
            put(
                &format!("ppt/notesSlides/_rels/notesSlide{}.xml.rels", i),
                owned_rels(&[
                    ("rId1".to_string(), "notesMaster", "../notesMasters/notesMaster1.xml".to_string()),
                    ("rId2".to_string(), "slide", format!("../slides/slide{}.xml", i)),
                ])
                .as_bytes(),
            );
        }

        if self.view_props {
            let list: String = (1..=self.existing_slides)
                .map(|i| format!(r#"<p:sld r:id="rId{}" collapse="0"/>"#, i))
                .collect();
            put(
                "ppt/viewProps.xml",
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:viewPr {NS} lastView="sldThumbnailView"><p:normalViewPr><p:restoredLeft sz="15620"/><p:restoredTop sz="94660"/></p:normalViewPr><p:outlineViewPr><p:cViewPr><p:scale><a:sx n="33" d="100"/><a:sy n="33" d="100"/></p:scale><p:origin x="0" y="0"/></p:cViewPr><p:sldLst>{list}</p:sldLst></p:outlineViewPr><p:gridSpacing cx="76200" cy="76200"/></p:viewPr>"#
                )
                .as_bytes(),
            );
            let view_rels: Vec<(String, &str, String)> = (1..=self.existing_slides)
                .map(|i| (format!("rId{}", i), "slide", format!("slides/slide{}.xml", i)))
                .collect();
            put("ppt/_rels/viewProps.xml.rels", owned_rels(&view_rels).as_bytes());
        }

        for (name, data) in &self.images {
            put(name, data);
        }
        if self.macros {
            put("ppt/vbaProject.bin", b"not really vba");
        }

        drop(put);
        zip.finish().unwrap();
        buffer
    }

    fn content_types(&self) -> String {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Default Extension="png" ContentType="image/png"/>"#,
        );
        if self.macros {
            xml.push_str(r#"<Default Extension="bin" ContentType="application/vnd.ms-office.vbaProject"/>"#);
        }
        let mut over = |part: String, ct: &str| {
            xml.push_str(&format!(r#"<Override PartName="/{}" ContentType="{}"/>"#, part, ct));
        };
        over("ppt/presentation.xml".to_string(), self.main_content_type);
        over(
            "ppt/slideMasters/slideMaster1.xml".to_string(),
            "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml",
        );
        for i in 1..=self.layouts.len() {
            over(
                format!("ppt/slideLayouts/slideLayout{}.xml", i),
                "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml",
            );
        }
        over(
            "ppt/theme/theme1.xml".to_string(),
            "application/vnd.openxmlformats-officedocument.theme+xml",
        );
        if self.view_props {
            over(
                "ppt/viewProps.xml".to_string(),
                "application/vnd.openxmlformats-officedocument.presentationml.viewProps+xml",
            );
        }
        if self.app_properties {
            over(
                "docProps/app.xml".to_string(),
                "application/vnd.openxmlformats-officedocument.extended-properties+xml",
            );
        }
        if self.notes_master {
            over(
                "ppt/notesMasters/notesMaster1.xml".to_string(),
                "application/vnd.openxmlformats-officedocument.presentationml.notesMaster+xml",
            );
        }
        for i in 1..=self.existing_slides {
            over(
                format!("ppt/slides/slide{}.xml", i),
                "application/vnd.openxmlformats-officedocument.presentationml.slide+xml",
            );
            over(
                format!("ppt/notesSlides/notesSlide{}.xml", i),
                "application/vnd.openxmlformats-officedocument.presentationml.notesSlide+xml",
            );
        }
        xml.push_str("</Types>");
        xml
    }

    fn presentation(&self) -> String {
        let mut xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:presentation {NS} saveSubsetFonts="1"><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#
        );
        if self.notes_master {
            xml.push_str(r#"<p:notesMasterIdLst><p:notesMasterId r:id="rId3"/></p:notesMasterIdLst>"#);
        }
        if self.existing_slides > 0 {
            xml.push_str("<p:sldIdLst>");
            for i in 1..=self.existing_slides {
                xml.push_str(&format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 255 + i, 9 + i));
            }
            xml.push_str("</p:sldIdLst>");
        }
        xml.push_str(r#"<p:sldSz cx="12192000" cy="6858000"/><p:notesSz cx="6858000" cy="9144000"/>"#);
        if self.existing_slides > 0 {
            xml.push_str(r#"<p:custShowLst><p:custShow name="Short" id="0"><p:sldLst><p:sld r:id="rId10"/></p:sldLst></p:custShow></p:custShowLst>"#);
        }
        xml.push_str(r#"<p:defaultTextStyle><a:lvl1pPr marL="0"><a:defRPr sz="1800"/></a:lvl1pPr></p:defaultTextStyle>"#);
        if self.existing_slides > 0 {
            xml.push_str(r#"<p:extLst><p:ext uri="{521415D9-36F7-43E2-AB2F-B90AF26B5E84}"><p14:sectionLst xmlns:p14="http://schemas.microsoft.com/office/powerpoint/2010/main"><p14:section name="Default Section" id="{8C1F4A6E-2F0B-4B8A-9D55-0E5E0C3A1B21}"><p14:sldIdLst>"#);
            for i in 1..=self.existing_slides {
                xml.push_str(&format!(r#"<p14:sldId id="{}"/>"#, 255 + i));
            }
            xml.push_str("</p14:sldIdLst></p14:section></p14:sectionLst></p:ext></p:extLst>");
        }
        xml.push_str("</p:presentation>");
        xml
    }

    fn presentation_rels(&self) -> String {
        let mut list: Vec<(String, &str, String)> = vec![
            ("rId1".to_string(), "slideMaster", "slideMasters/slideMaster1.xml".to_string()),
            ("rId2".to_string(), "theme", "theme/theme1.xml".to_string()),
        ];
        if self.notes_master {
            list.push(("rId3".to_string(), "notesMaster", "notesMasters/notesMaster1.xml".to_string()));
        }
        if self.macros {
            list.push(("rId4".to_string(), "vbaProject", "vbaProject.bin".to_string()));
        }
        if self.view_props {
            list.push(("rId5".to_string(), "viewProps", "viewProps.xml".to_string()));
        }
        for i in 1..=self.existing_slides {
            list.push((format!("rId{}", 9 + i), "slide", format!("slides/slide{}.xml", i)));
        }
        owned_rels(&list)
    }

    fn master(&self) -> String {
        let ids: String = (1..=self.layouts.len())
            .map(|i| format!(r#"<p:sldLayoutId id="{}" r:id="rId{}"/>"#, 2147483648u64 + i as u64, i))
            .collect();
        let button = if self.slide_jump {
            format!(
                r#"<p:sp><p:nvSpPr><p:cNvPr id="9" name="Back to start"><a:hlinkClick r:id="rId{}" action="ppaction://hlinksldjump"/></p:cNvPr><p:cNvSpPr/><p:nvPr userDrawn="1"/></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:r><a:rPr lang="en-US"/><a:t>Start</a:t></a:r></a:p></p:txBody></p:sp>"#,
                self.layouts.len() + 2
            )
        } else {
            String::new()
        };
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sldMaster {NS}><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{button}</p:spTree></p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:sldLayoutIdLst>{ids}</p:sldLayoutIdLst></p:sldMaster>"#
        )
    }

    fn app_xml(&self) -> String {
        let titles: String = (1..=self.existing_slides)
            .map(|i| format!("<vt:lpstr>Old slide {}</vt:lpstr>", i))
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes"><TotalTime>5</TotalTime><Words>42</Words><Application>Microsoft Office PowerPoint</Application><PresentationFormat>Widescreen</PresentationFormat><Paragraphs>9</Paragraphs><Slides>{n}</Slides><Notes>{n}</Notes><HiddenSlides>0</HiddenSlides><MMClips>0</MMClips><HeadingPairs><vt:vector size="2" baseType="variant"><vt:variant><vt:lpstr>Slide Titles</vt:lpstr></vt:variant><vt:variant><vt:i4>{n}</vt:i4></vt:variant></vt:vector></HeadingPairs><TitlesOfParts><vt:vector size="{n}" baseType="lpstr">{titles}</vt:vector></TitlesOfParts><Company>Contoso</Company><AppVersion>16.0000</AppVersion></Properties>"#,
            n = self.existing_slides
        )
    }
}

fn rels(list: &[(&str, &str, &str)]) -> String {
    let owned: Vec<(String, &str, String)> = list
        .iter()
        .map(|(id, short, target)| (id.to_string(), *short, target.to_string()))
        .collect();
    owned_rels(&owned)
}

fn owned_rels(list: &[(String, &str, String)]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for (id, short, target) in list {
        let rel_type = if *short == "vbaProject" {
            "http://schemas.microsoft.com/office/2006/relationships/vbaProject".to_string()
        } else {
            format!("{}/{}", REL, short)
        };
        xml.push_str(&format!(
            r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
            id, rel_type, target
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

const THEME: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Brand">
  <a:themeElements>
    <a:clrScheme name="Brand">
      <a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>
      <a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>
      <a:dk2><a:srgbClr val="1F2937"/></a:dk2>
      <a:lt2><a:srgbClr val="F3F4F6"/></a:lt2>
      <a:accent1><a:srgbClr val="FF0000"/></a:accent1>
      <a:accent2><a:srgbClr val="00AA00"/></a:accent2>
      <a:accent3><a:srgbClr val="0000FF"/></a:accent3>
      <a:accent4><a:srgbClr val="FFAA00"/></a:accent4>
      <a:accent5><a:srgbClr val="7700FF"/></a:accent5>
      <a:accent6><a:srgbClr val="00AAAA"/></a:accent6>
      <a:hlink><a:srgbClr val="0563C1"/></a:hlink>
      <a:folHlink><a:srgbClr val="954F72"/></a:folHlink>
    </a:clrScheme>
    <a:fontScheme name="Brand">
      <a:majorFont><a:latin typeface="Georgia"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>
      <a:minorFont><a:latin typeface="Verdana"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>
    </a:fontScheme>
    <a:fmtScheme name="Brand"><a:fillStyleLst/><a:lnStyleLst/><a:effectStyleLst/><a:bgFillStyleLst/></a:fmtScheme>
  </a:themeElements>
</a:theme>"#;

//! Benchmarks for redeck generation performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks measure template inspection and deck generation at
//! various template and deck sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use redeck::{Deck, GenerateOptions, SlideSpec, Template};
use std::io::Cursor;

const NS: &str = concat!(
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#,
);
const REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Creates a synthetic template with the given number of layouts.
fn create_test_template(layout_count: usize) -> Vec<u8> {
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    let mut buffer = Vec::new();
    let mut zip = ZipWriter::new(Cursor::new(&mut buffer));

    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    let mut overrides = String::new();
    for i in 1..=layout_count {
        overrides.push_str(&format!(
            r#"<Override PartName="/ppt/slideLayouts/slideLayout{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>"#,
            i
        ));
    }

    // [Content_Types].xml
    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Default Extension="png" ContentType="image/png"/>
  <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.template.main+xml"/>
  <Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>
  <Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>
  {}
</Types>"#,
            overrides
        )
        .as_bytes(),
    )
    .unwrap();

    // _rels/.rels
    zip.start_file("_rels/.rels", options).unwrap();
    zip.write_all(
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="{REL}/officeDocument" Target="ppt/presentation.xml"/>
</Relationships>"#
        )
        .as_bytes(),
    )
    .unwrap();

    // ppt/presentation.xml
    zip.start_file("ppt/presentation.xml", options).unwrap();
    zip.write_all(
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation {NS}>
  <p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>
  <p:sldSz cx="12192000" cy="6858000"/>
  <p:notesSz cx="6858000" cy="9144000"/>
</p:presentation>"#
        )
        .as_bytes(),
    )
    .unwrap();

    zip.start_file("ppt/_rels/presentation.xml.rels", options)
        .unwrap();
    zip.write_all(
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="{REL}/slideMaster" Target="slideMasters/slideMaster1.xml"/>
  <Relationship Id="rId2" Type="{REL}/theme" Target="theme/theme1.xml"/>
</Relationships>"#
        )
        .as_bytes(),
    )
    .unwrap();

    // Slide master listing every layout
    let mut layout_ids = String::new();
    let mut master_rels = String::new();
    for i in 1..=layout_count {
        layout_ids.push_str(&format!(
            r#"<p:sldLayoutId id="{}" r:id="rId{}"/>"#,
            2147483648u64 + i as u64,
            i
        ));
        master_rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="{REL}/slideLayout" Target="../slideLayouts/slideLayout{}.xml"/>"#,
            i, i
        ));
    }
    zip.start_file("ppt/slideMasters/slideMaster1.xml", options)
        .unwrap();
    zip.write_all(
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster {NS}><p:cSld><p:spTree/></p:cSld><p:sldLayoutIdLst>{layout_ids}</p:sldLayoutIdLst></p:sldMaster>"#
        )
        .as_bytes(),
    )
    .unwrap();
    zip.start_file("ppt/slideMasters/_rels/slideMaster1.xml.rels", options)
        .unwrap();
    zip.write_all(
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{master_rels}<Relationship Id="rId{}" Type="{REL}/theme" Target="../theme/theme1.xml"/></Relationships>"#,
            layout_count + 1
        )
        .as_bytes(),
    )
    .unwrap();

    // Layouts alternate between title/content and picture layouts
    for i in 1..=layout_count {
        let (name, extra) = if i % 2 == 0 {
            (
                format!("Picture Layout {}", i),
                r#"<p:sp><p:nvSpPr><p:cNvPr id="3" name="Picture"/><p:cNvSpPr/><p:nvPr><p:ph type="pic" idx="1"/></p:nvPr></p:nvSpPr><p:spPr/></p:sp>"#,
            )
        } else {
            (
                format!("Content Layout {}", i),
                r#"<p:sp><p:nvSpPr><p:cNvPr id="3" name="Content"/><p:cNvSpPr/><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr><p:spPr/></p:sp>"#,
            )
        };
        zip.start_file(format!("ppt/slideLayouts/slideLayout{}.xml", i), options)
            .unwrap();
        zip.write_all(
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout {NS}><p:cSld name="{name}"><p:spTree><p:sp><p:nvSpPr><p:cNvPr id="2" name="Title"/><p:cNvSpPr/><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:spPr/></p:sp>{extra}</p:spTree></p:cSld></p:sldLayout>"#
            )
            .as_bytes(),
        )
        .unwrap();
        zip.start_file(
            format!("ppt/slideLayouts/_rels/slideLayout{}.xml.rels", i),
            options,
        )
        .unwrap();
        zip.write_all(
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="{REL}/slideMaster" Target="../slideMasters/slideMaster1.xml"/></Relationships>"#
            )
            .as_bytes(),
        )
        .unwrap();
    }

    zip.start_file("ppt/theme/theme1.xml", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Bench"><a:themeElements>
  <a:clrScheme name="Bench"><a:accent1><a:srgbClr val="4472C4"/></a:accent1></a:clrScheme>
  <a:fontScheme name="Bench"><a:majorFont><a:latin typeface="Calibri Light"/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/></a:minorFont></a:fontScheme>
</a:themeElements></a:theme>"#,
    )
    .unwrap();

    for i in 1..=4u8 {
        zip.start_file(format!("ppt/media/image{}.png", i), options)
            .unwrap();
        let mut png = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR\x00\x00\x02\x80\x00\x00\x01\xe0".to_vec();
        png.extend(std::iter::repeat(i).take(4096));
        zip.write_all(&png).unwrap();
    }

    zip.finish().unwrap();
    buffer
}

/// A deck cycling through the layouts of [`create_test_template`].
fn create_test_deck(slide_count: usize) -> Deck {
    Deck::new(
        (0..slide_count)
            .map(|i| {
                let hint = if i % 3 == 0 { "picture" } else { "content" };
                SlideSpec::new(format!("Slide {}", i + 1))
                    .with_layout_hint(hint)
                    .with_bullets((0..6).map(|b| format!("Point {} of slide {}", b + 1, i + 1)))
                    .with_notes(format!("Speaker notes for slide {}", i + 1))
            })
            .collect(),
    )
}

/// Benchmark template inspection at various layout counts.
fn bench_inspection(c: &mut Criterion) {
    let mut group = c.benchmark_group("template_inspection");

    for layout_count in [4, 16, 64].iter() {
        let data = create_test_template(*layout_count);
        let size = data.len() as u64;

        group.throughput(Throughput::Bytes(size));
        group.bench_with_input(
            BenchmarkId::new("layouts", layout_count),
            &data,
            |b, data| {
                b.iter(|| {
                    let _ = Template::from_bytes(black_box(data));
                });
            },
        );
    }

    group.finish();
}

/// Benchmark full generation at various deck sizes.
fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("deck_generation");
    let data = create_test_template(8);
    let template = Template::from_bytes(&data).unwrap();
    let options = GenerateOptions::default();

    for slide_count in [1, 10, 50].iter() {
        let deck = create_test_deck(*slide_count);

        group.bench_with_input(
            BenchmarkId::new("slides", slide_count),
            &deck,
            |b, deck| {
                b.iter(|| {
                    let _ = redeck::generate_deck(&template, black_box(deck), &options);
                });
            },
        );
    }

    group.finish();
}

/// Benchmark layout resolution alone.
fn bench_resolution(c: &mut Criterion) {
    let data = create_test_template(64);
    let template = Template::from_bytes(&data).unwrap();
    let hints = ["Content Layout 33", "two columns", "photo", "no such layout"];

    c.bench_function("layout_resolution", |b| {
        b.iter(|| {
            for hint in hints {
                let _ = redeck::resolve_layout(black_box(hint), template.layouts());
            }
        });
    });
}

criterion_group!(benches, bench_inspection, bench_generation, bench_resolution);
criterion_main!(benches);

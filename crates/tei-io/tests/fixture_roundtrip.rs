use pretty_assertions::assert_eq;
use sonus_span_engine::{EngineConfig, Node, SpanEngine};
use sonus_tei_io::{parse_document, read_document, write_document, write_document_to, Misc};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn find<'a>(node: &'a Node, local: &str) -> Vec<&'a Node> {
    let mut found = Vec::new();
    if node.local_name() == local {
        found.push(node);
    }
    for child in &node.children {
        found.extend(find(child, local));
    }
    found
}

#[test]
fn fixture_survives_write_and_reparse() {
    let doc = read_document(fixture("scene.xml")).expect("fixture parses");

    assert_eq!(doc.root.tag, "TEI");
    assert!(matches!(doc.prolog.as_slice(), [Misc::ProcessingInstruction(_)]));
    assert_eq!(
        doc.root.attribute("xmlns"),
        Some("http://www.tei-c.org/ns/1.0")
    );

    let reparsed = parse_document(&write_document(&doc).expect("writes")).expect("output parses");
    assert_eq!(reparsed, doc);
}

#[test]
fn consolidated_fixture_keeps_its_text() {
    let mut doc = read_document(fixture("scene.xml")).unwrap();
    let before = doc.root.text_content();

    let engine = SpanEngine::new(EngineConfig::default()).unwrap();
    let report = engine.consolidate(&mut doc.root).unwrap();

    assert_eq!(report.merged, 1);
    assert_eq!(report.vacuous_removed, 1);
    assert_eq!(report.disjoint_merged, 1);
    assert_eq!(report.pattern_wrapped, 1);
    assert_eq!(report.speaker_scrubbed, 1);

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("scene.xml");
    write_document_to(&out, &doc).unwrap();
    let written = read_document(&out).unwrap();

    // Only separators inside merged spans change.
    assert_eq!(
        written.root.text_content().replace("klopft, laut", "klopft laut"),
        before.replace("klopft, laut", "klopft laut")
    );

    let speaker = find(&written.root, "speaker")[0];
    assert_eq!(speaker.text, "Der Wächter.");
    assert!(speaker.children.is_empty());

    let ambient: Vec<String> = find(&written.root, "ambient_sound")
        .into_iter()
        .map(Node::text_content)
        .collect();
    assert_eq!(
        ambient,
        vec![
            "Regen und fernes Donnergrollen",
            "Die Geräusche der Straße waren deutlich gewesen",
            "Die Tür",
            "der Wind heult",
        ]
    );
    assert!(write_document(&written).unwrap().contains("an der Tür &amp; am Tor."));
}

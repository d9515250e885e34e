use std::io::Cursor;

use makepak_core::Tag;
use makepak_format::desc::{TYPE_NAMES, type_name};

use crate::encoders::Helper;
use crate::registry::Registry;
use crate::session::CompileSession;
use crate::sprite::ImageStore;
use crate::test_utils::compile;
use crate::{CompileConfig, CompileError, TabRecord};

#[test]
fn named_types_are_sorted() {
    let registry = Registry::standard();
    insta::assert_debug_snapshot!(registry.named_types(), @r#"
    [
        "bridge",
        "building",
        "crossing",
        "cursor",
        "factory",
        "good",
        "ground",
        "menu",
        "misc",
        "roadsign",
        "smoke",
        "sound",
        "symbol",
        "tree",
        "tunnel",
        "vehicle",
        "way",
        "way-object",
    ]
    "#);
}

#[test]
fn every_known_tag_is_registered() {
    let registry = Registry::standard();
    for (tag, name) in TYPE_NAMES {
        assert_eq!(registry.label(*tag), *name);
    }
}

#[test]
fn named_types_use_the_type_table_names() {
    let registry = Registry::standard();
    for name in registry.named_types() {
        let writer = registry.by_name(name).unwrap();
        assert_eq!(type_name(writer.tag()), Some(writer.type_name()), "{name}");
    }
}

#[test]
fn helpers_cannot_be_selected_by_name() {
    let registry = Registry::standard();
    assert!(registry.by_name("text").is_none());
    assert!(registry.by_name("tile").is_none());
    assert!(registry.by_tag(Tag::TILE).is_some());
}

#[test]
fn names_are_matched_case_insensitively() {
    let registry = Registry::standard();
    let writer = registry.by_name(" Good ").unwrap();
    assert_eq!(writer.tag(), Tag::GOOD);
}

#[test]
fn unknown_tags_get_a_placeholder_label() {
    let registry = Registry::standard();
    assert_eq!(registry.label(Tag(*b"ZZZZ")), "(unknown ZZZZ)");
}

#[test]
fn later_registration_replaces_earlier() {
    let mut registry = Registry::new();
    registry.register(Box::new(Helper { tag: Tag::GOOD, name: "old" }), true);
    registry.register(Box::new(Helper { tag: Tag::GOOD, name: "good" }), true);

    assert_eq!(registry.label(Tag::GOOD), "good");
    assert!(registry.by_name("good").is_some());
}

#[test]
fn unknown_or_missing_obj_is_skipped() {
    let registry = Registry::standard();
    let mut out = Cursor::new(Vec::new());
    let mut images = ImageStore::new(&CompileConfig::default());
    let mut session = CompileSession::new(&mut out, &mut images).unwrap();
    let mut root = session.open_node(Tag::ROOT, 0).unwrap();
    let offset = session.offset();

    let mut unicorn = TabRecord::new();
    unicorn.insert("obj", "unicorn");
    unicorn.insert("name", "Sparkles");
    assert!(!registry.dispatch(&mut session, &mut root, &unicorn).unwrap());

    let mut nameless = TabRecord::new();
    nameless.insert("name", "Coal");
    assert!(!registry.dispatch(&mut session, &mut root, &nameless).unwrap());

    assert_eq!(session.offset(), offset);
    assert_eq!(root.child_count(), 0);
    root.commit_root(&mut session).unwrap();
}

#[test]
fn helper_types_refuse_text_records() {
    let registry = Registry::standard();
    let mut out = Cursor::new(Vec::new());
    let mut images = ImageStore::new(&CompileConfig::default());
    let mut session = CompileSession::new(&mut out, &mut images).unwrap();
    let mut root = session.open_node(Tag::ROOT, 0).unwrap();

    let writer = registry.by_tag(Tag::TEXT).unwrap();
    let err = writer
        .write_obj(&mut session, &mut root, &TabRecord::new())
        .unwrap_err();
    assert!(matches!(err, CompileError::NotTopLevel("text")));
    root.commit_root(&mut session).unwrap();
}

#[test]
fn node_names_of_written_objects() {
    let registry = Registry::standard();
    let file = compile(indoc::indoc! {"
        obj=good
        name=Coal
        ---
        obj=factory
        name=Coal Mine
        dims=1,1,1
    "});

    let names: Vec<_> = file
        .objects()
        .iter()
        .map(|node| registry.node_name(node))
        .collect();
    assert_eq!(
        names,
        [Some("Coal".to_string()), Some("Coal Mine".to_string())]
    );
}

use std::fs;
use std::path::{Path, PathBuf};

use makepak_compiler::{CompileConfig, Compiler, ListEntry, Registry};
use makepak_core::Tag;

use super::list::{collect_listings, render_json, render_text};

fn entry(tag: Tag, type_name: &str, name: &str) -> ListEntry {
    ListEntry {
        tag,
        type_name: type_name.to_string(),
        name: name.to_string(),
    }
}

#[test]
fn text_for_one_file() {
    let listed = vec![(
        Path::new("goods.pak"),
        vec![
            entry(Tag::GOOD, "good", "Coal"),
            entry(Tag(*b"ZZZZ"), "(unknown ZZZZ)", ""),
        ],
    )];

    insta::assert_snapshot!(render_text(&listed), @r"
    good Coal
    (unknown ZZZZ)
    ");
}

#[test]
fn text_for_several_files() {
    let listed = vec![
        (Path::new("a.pak"), vec![entry(Tag::GOOD, "good", "Coal")]),
        (Path::new("b.pak"), vec![entry(Tag::TREE, "tree", "Birch")]),
    ];

    insta::assert_snapshot!(render_text(&listed), @r"
    a.pak:
    good Coal

    b.pak:
    tree Birch
    ");
}

#[test]
fn json() {
    let listed = vec![(Path::new("a.pak"), vec![entry(Tag::WAY, "way", "Gravel")])];

    insta::assert_snapshot!(render_json(&listed).unwrap(), @r#"
    [
      {
        "file": "a.pak",
        "objects": [
          {
            "tag": "WAY",
            "type": "way",
            "name": "Gravel"
          }
        ]
      }
    ]
    "#);
}

fn compile_goods(dir: &Path) -> PathBuf {
    let source = dir.join("goods.dat");
    fs::write(&source, "obj=good\nname=Coal\n").unwrap();
    let dest = dir.join("goods.pak");
    Compiler::new(CompileConfig::default())
        .compile(&[source], &dest)
        .unwrap();
    dest
}

#[test]
fn missing_files_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let goods = compile_goods(dir.path());
    let files = vec![dir.path().join("missing.pak"), goods.clone()];

    let listed = collect_listings(&Registry::standard(), &files);
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].0, goods.as_path());
    assert_eq!(listed[0].1, [entry(Tag::GOOD, "good", "Coal")]);
}

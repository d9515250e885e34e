use std::fs;
use std::path::{Path, PathBuf};

use indoc::indoc;
use makepak_core::{Colors, Tag};
use makepak_format::{FileHeader, PakFile};

use crate::root::{collect_sources, read_records, separate_file_name};
use crate::test_utils::try_compile;
use crate::{CompileConfig, CompileError, Compiler, Registry, dump_file, list_file};

const GOODS: &str = indoc! {"
    obj=good
    name=Coal
    value=50
    ---
    obj=unicorn
    name=Sparkles
    ---
    obj=good
    name=Iron Ore
"};

fn write(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

fn separate() -> CompileConfig {
    CompileConfig {
        separate: true,
        ..CompileConfig::default()
    }
}

#[test]
fn directories_contribute_their_dat_files_in_order() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "b.dat", "");
    write(dir.path(), "a.DAT", "");
    write(dir.path(), "notes.txt", "");
    fs::create_dir(dir.path().join("nested.dat")).unwrap();
    let single = dir.path().join("single.tab");

    let sources = collect_sources(&[dir.path().to_path_buf(), single.clone()]);
    assert_eq!(
        sources,
        [dir.path().join("a.DAT"), dir.path().join("b.dat"), single]
    );
}

#[test]
fn unreadable_sources_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let goods = write(dir.path(), "goods.dat", GOODS);

    let records = read_records(&[dir.path().join("absent.dat"), goods]);
    assert_eq!(records.len(), 3);
}

#[test]
fn separate_names_are_sanitized() {
    assert_eq!(separate_file_name("Good", "Iron Ore"), "good.Iron_Ore.pak");
    assert_eq!(separate_file_name("way", "a/b\\c.d"), "way.a_b_c_d.pak");
}

#[test]
fn unknown_records_leave_the_others_intact() {
    let (bytes, stats) = try_compile(GOODS).unwrap();
    assert_eq!((stats.objects, stats.skipped), (2, 1));

    let file = PakFile::from_bytes(bytes).unwrap();
    let names: Vec<_> = file
        .objects()
        .iter()
        .map(|node| node.children[0].text().unwrap_or_default())
        .collect();
    assert_eq!(names, ["Coal", "Iron Ore"]);
}

#[test]
fn compile_then_list() {
    let dir = tempfile::tempdir().unwrap();
    let goods = write(dir.path(), "goods.dat", GOODS);
    let dest = dir.path().join("goods.pak");

    let mut compiler = Compiler::new(CompileConfig::default());
    let stats = compiler.compile(&[goods], &dest).unwrap();
    assert_eq!((stats.objects, stats.skipped, stats.files), (2, 1, 1));

    let entries = list_file(compiler.registry(), &dest).unwrap();
    insta::assert_yaml_snapshot!(entries, @r#"
    - tag: GOOD
      type: good
      name: Coal
    - tag: GOOD
      type: good
      name: Iron Ore
    "#);
}

#[test]
fn failed_file_is_removed() {
    let dir = tempfile::tempdir().unwrap();
    let source = write(
        dir.path(),
        "bad.dat",
        "obj=good\nname=Coal\n---\nobj=good\nname=Heavy\nvalue=99999\n",
    );
    let dest = dir.path().join("bad.pak");

    let mut compiler = Compiler::new(CompileConfig::default());
    let err = compiler.compile(&[source], &dest).unwrap_err();
    assert!(matches!(err, CompileError::ValueOutOfRange { .. }));
    assert!(!dest.exists());
}

#[test]
fn separate_mode_writes_one_file_per_object() {
    let dir = tempfile::tempdir().unwrap();
    let source = write(
        dir.path(),
        "goods.dat",
        indoc! {"
            obj=good
            name=Coal
            ---
            obj=good
            name=Heavy
            value=99999
            ---
            obj=unicorn
            name=Sparkles
            ---
            obj=tree
            name=Birch
        "},
    );
    let out = dir.path().join("out");

    let mut compiler = Compiler::new(separate());
    let stats = compiler.compile(&[source], &out).unwrap();
    assert_eq!(
        (stats.objects, stats.skipped, stats.files, stats.failed),
        (2, 1, 2, 1)
    );

    let mut written: Vec<_> = fs::read_dir(&out)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    written.sort();
    assert_eq!(written, ["good.Coal.pak", "tree.Birch.pak"]);

    let tree = PakFile::from_path(out.join("tree.Birch.pak")).unwrap();
    assert_eq!(tree.objects().len(), 1);
    assert_eq!(tree.objects()[0].tag(), Tag::TREE);
}

#[test]
fn separate_mode_keeps_the_first_object_for_a_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let source = write(
        dir.path(),
        "goods.dat",
        indoc! {"
            obj=good
            name=Coal?
            value=10
            ---
            obj=good
            name=Coal!
            value=20
            ---
            obj=good
            name=Coal*
            value=99999
        "},
    );
    let out = dir.path().join("out");

    let mut compiler = Compiler::new(separate());
    let stats = compiler.compile(&[source], &out).unwrap();
    assert_eq!(
        (stats.objects, stats.skipped, stats.files, stats.failed),
        (1, 2, 1, 0)
    );

    let written: Vec<_> = fs::read_dir(&out).unwrap().collect();
    assert_eq!(written.len(), 1);
    let file = PakFile::from_path(out.join("good.Coal_.pak")).unwrap();
    let entries = list_file(compiler.registry(), &out.join("good.Coal_.pak")).unwrap();
    assert_eq!(entries[0].name, "Coal?");
    assert_eq!(file.objects().len(), 1);
}

#[test]
fn separate_mode_reuses_the_name_of_a_failed_object() {
    let dir = tempfile::tempdir().unwrap();
    let source = write(
        dir.path(),
        "goods.dat",
        indoc! {"
            obj=good
            name=Coal?
            value=99999
            ---
            obj=good
            name=Coal!
            value=20
        "},
    );
    let out = dir.path().join("out");

    let mut compiler = Compiler::new(separate());
    let stats = compiler.compile(&[source], &out).unwrap();
    assert_eq!(
        (stats.objects, stats.skipped, stats.files, stats.failed),
        (1, 0, 1, 1)
    );
    let entries = list_file(compiler.registry(), &out.join("good.Coal_.pak")).unwrap();
    assert_eq!(entries[0].name, "Coal!");
}

#[test]
fn merge_copies_objects_and_skips_other_versions() {
    let dir = tempfile::tempdir().unwrap();
    let mut compiler = Compiler::new(CompileConfig::default());

    let first = dir.path().join("first.pak");
    let records = crate::tabfile::parse("obj=good\nname=Coal\n---\nobj=good\nname=Wood\n", None);
    compiler.compile_to_file(&first, &records).unwrap();

    let second = dir.path().join("second.pak");
    let records = crate::tabfile::parse("obj=sound\nname=Horn\nfile=horn.wav\n", None);
    compiler.compile_to_file(&second, &records).unwrap();

    let old = dir.path().join("old.pak");
    let mut bytes = fs::read(&second).unwrap();
    let code_at = FileHeader::default().encoded_len() - 4;
    bytes[code_at..code_at + 4].copy_from_slice(&999u32.to_le_bytes());
    fs::write(&old, bytes).unwrap();

    let garbage = write(dir.path(), "garbage.pak", "not a pak file");

    let dest = dir.path().join("merged.pak");
    let stats = compiler
        .merge(&[first, old, garbage, second], &dest)
        .unwrap();
    assert_eq!((stats.files, stats.objects, stats.skipped), (2, 3, 2));

    let merged = PakFile::from_path(&dest).unwrap();
    let tags: Vec<_> = merged.objects().iter().map(|node| node.tag()).collect();
    assert_eq!(tags, [Tag::GOOD, Tag::GOOD, Tag::SOUND]);
}

#[test]
fn merge_without_usable_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let garbage = write(dir.path(), "garbage.pak", "not a pak file");
    let dest = dir.path().join("merged.pak");

    let mut compiler = Compiler::new(CompileConfig::default());
    let err = compiler.merge(&[garbage], &dest).unwrap_err();
    assert!(matches!(err, CompileError::NothingToMerge));
    assert!(!dest.exists());
}

#[test]
fn list_survives_a_truncated_file() {
    let dir = tempfile::tempdir().unwrap();
    let (mut bytes, _) = try_compile("obj=good\nname=Coal\n---\nobj=good\nname=Wood\n").unwrap();
    bytes.truncate(bytes.len() - 3);
    let path = dir.path().join("cut.pak");
    fs::write(&path, bytes).unwrap();

    // the second object's name is cut off, the object itself survives
    let entries = list_file(&Registry::standard(), &path).unwrap();
    let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Coal", ""]);
}

#[test]
fn dump_shows_the_tree() {
    let dir = tempfile::tempdir().unwrap();
    let (bytes, _) = try_compile("obj=good\nname=Coal\n").unwrap();
    let path = dir.path().join("coal.pak");
    fs::write(&path, bytes).unwrap();

    let dump = dump_file(&path, Colors::OFF).unwrap();
    assert!(dump.starts_with("[header]\n"));
    assert!(dump.contains("GOOD"));
    assert!(dump.contains("\"Coal\""));
    assert!(!dump.contains("[problems]"));
}

use std::path::Path;

use indoc::indoc;

use crate::tabfile::{self, TabRecord, ValueSource, parse_int};

#[test]
fn records_split_on_dash_lines() {
    let records = tabfile::parse(
        indoc! {"
            # goods
            obj=good
            name=Coal
            ---
            obj=good
            name=Wood
            -
            -
        "},
        None,
    );

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("name"), "Coal");
    assert_eq!(records[1].get("name"), "Wood");
    assert_eq!(records[0].line(), 2);
    assert_eq!(records[1].line(), 5);
}

#[test]
fn last_record_needs_no_terminator() {
    let records = tabfile::parse("obj=good\nname=Coal", None);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].len(), 2);
}

#[test]
fn keys_are_case_insensitive_and_trimmed() {
    let records = tabfile::parse("Obj = good\n  NAME=Coal  \n", None);
    let record = &records[0];

    assert_eq!(record.get("obj"), "good");
    assert_eq!(record.get("name"), "Coal");
    assert_eq!(record.get("Name"), "Coal");
    assert_eq!(record.get("value"), "");
}

#[test]
fn later_values_replace_earlier_ones_in_place() {
    let records = tabfile::parse("obj=good\nname=Coal\nobj=tree\n", None);
    let entries: Vec<_> = records[0].iter().collect();
    assert_eq!(entries, [("obj", "tree"), ("name", "Coal")]);
}

#[test]
fn lines_without_equals_are_ignored() {
    let records = tabfile::parse("obj=good\nnonsense\nname=Coal\n", None);
    assert_eq!(records[0].len(), 2);
}

#[test]
fn values_keep_inner_equals_signs() {
    let records = tabfile::parse("obj=good\nname=a=b\n", None);
    assert_eq!(records[0].get("name"), "a=b");
}

#[test]
fn source_dir_is_attached_to_every_record() {
    let records = tabfile::parse("obj=good\n---\nobj=tree\n", Some(Path::new("/paks")));
    assert!(records
        .iter()
        .all(|r| r.source_dir() == Some(Path::new("/paks"))));
}

#[test]
fn integers() {
    assert_eq!(parse_int("42"), Some(42));
    assert_eq!(parse_int(" -7 "), Some(-7));
    assert_eq!(parse_int("+3"), Some(3));
    assert_eq!(parse_int(""), None);
    assert_eq!(parse_int("-"), None);
    assert_eq!(parse_int("12abc"), None);
    assert_eq!(parse_int("0x10"), None);
}

#[test]
fn typed_getters() {
    let mut record = TabRecord::new();
    record.insert("value", "50");
    record.insert("bad", "fifty");
    record.insert("dims", "2, 3,x,1");
    record.insert("smoketile", "1,-2");
    record.insert("half", "5");
    record.insert("wide", "4294967297,-1");

    assert_eq!(record.get_int("value", 0), 50);
    assert_eq!(record.get_int("bad", 9), 9);
    assert_eq!(record.get_int("missing", 9), 9);
    assert_eq!(record.get_ints("dims"), [2, 3, 1]);
    assert!(record.get_ints("missing").is_empty());
    assert_eq!(record.get_koord("smoketile", (0, 0)), (1, -2));
    assert_eq!(record.get_koord("half", (7, 7)), (7, 7));
    assert_eq!(record.get_koord("wide", (0, 0)), (4_294_967_297, -1));
}

#[test]
fn month_dates() {
    let mut record = TabRecord::new();
    record.insert("intro_year", "1950");
    record.insert("intro_month", "3");
    record.insert("retire_year", "2000");

    assert_eq!(record.get_month("intro", 0), Some(1950 * 12 + 2));
    assert_eq!(record.get_month("retire", 0), Some(2000 * 12));
    assert_eq!(record.get_month("missing", 77), Some(77));
}

#[test]
fn month_dates_outside_range() {
    let mut record = TabRecord::new();
    record.insert("late_year", "9000");
    record.insert("early_year", "-1");
    record.insert("odd_year", "1950");
    record.insert("odd_month", "13");
    record.insert("edge_year", "5461");
    record.insert("edge_month", "4");

    assert_eq!(record.get_month("late", 0), None);
    assert_eq!(record.get_month("early", 0), None);
    assert_eq!(record.get_month("odd", 0), None);
    assert_eq!(record.get_month("edge", 0), Some(u16::MAX));
}

#[test]
fn read_resolves_against_file_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("goods.dat");
    std::fs::write(&path, "obj=good\nname=Coal\n").unwrap();

    let records = tabfile::read(&path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].source_dir(), Some(dir.path()));
}

#[test]
fn read_reports_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    assert!(tabfile::read(&dir.path().join("absent.dat")).is_err());
}

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use makepak_compiler::{ListEntry, Registry, list_file};
use serde::Serialize;
use tracing::warn;

pub struct ListArgs {
    pub files: Vec<PathBuf>,
    pub json: bool,
}

/// Objects of one file, as printed by `list --json`.
#[derive(Serialize)]
pub struct FileListing<'a> {
    pub file: String,
    pub objects: &'a [ListEntry],
}

pub fn run(args: ListArgs) {
    let registry = Registry::standard();
    let listed = collect_listings(&registry, &args.files);

    if args.json {
        match render_json(&listed) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print!("{}", render_text(&listed));
    }
}

/// Objects of every readable file. Files that cannot be read are skipped
/// with a warning.
pub fn collect_listings<'a>(
    registry: &Registry,
    files: &'a [PathBuf],
) -> Vec<(&'a Path, Vec<ListEntry>)> {
    let mut listed = Vec::new();
    for path in files {
        match list_file(registry, path) {
            Ok(entries) => listed.push((path.as_path(), entries)),
            Err(e) => warn!("{}: {}; skipped", path.display(), e),
        }
    }
    listed
}

/// `type name` per object. With several files, each list is headed by the
/// file path.
pub fn render_text(listed: &[(&Path, Vec<ListEntry>)]) -> String {
    let several = listed.len() > 1;
    let mut out = String::new();
    for (index, (path, entries)) in listed.iter().enumerate() {
        if several {
            if index > 0 {
                out.push('\n');
            }
            writeln!(out, "{}:", path.display()).unwrap();
        }
        for entry in entries {
            if entry.name.is_empty() {
                writeln!(out, "{}", entry.type_name).unwrap();
            } else {
                writeln!(out, "{} {}", entry.type_name, entry.name).unwrap();
            }
        }
    }
    out
}

pub fn render_json(listed: &[(&Path, Vec<ListEntry>)]) -> serde_json::Result<String> {
    let files: Vec<FileListing<'_>> = listed
        .iter()
        .map(|(path, entries)| FileListing {
            file: path.display().to_string(),
            objects: entries,
        })
        .collect();
    serde_json::to_string_pretty(&files)
}

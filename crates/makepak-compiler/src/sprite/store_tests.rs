use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};

use super::{ImageKey, ImageStore};
use crate::config::CompileConfig;

fn config(cell_size: u32) -> CompileConfig {
    CompileConfig {
        cell_size,
        ..CompileConfig::default()
    }
}

/// A 2x1 cell sheet with one red pixel at (x, y) of the second cell.
fn write_sheet(dir: &Path, name: &str, x: u32, y: u32) -> PathBuf {
    let mut sheet = RgbaImage::from_pixel(8, 4, Rgba([0, 0, 0, 0]));
    sheet.put_pixel(4 + x, y, Rgba([255, 0, 0, 255]));
    let path = dir.join(name);
    sheet.save(&path).unwrap();
    path
}

#[test]
fn parse_full_key() {
    let key = ImageKey::parse("images/coal.1.2,3,-4").unwrap();

    assert_eq!(key.path, PathBuf::from("images/coal.png"));
    assert_eq!((key.row, key.col), (1, 2));
    assert_eq!((key.x_offset, key.y_offset), (3, -4));
}

#[test]
fn parse_without_cell() {
    let key = ImageKey::parse("coal.png").unwrap();

    assert_eq!(key.path, PathBuf::from("coal.png"));
    assert_eq!((key.row, key.col, key.x_offset), (0, 0, 0));
}

#[test]
fn parse_keeps_png_suffix() {
    let key = ImageKey::parse("coal.png.0.3").unwrap();

    assert_eq!(key.path, PathBuf::from("coal.png"));
    assert_eq!(key.col, 3);
}

#[test]
fn parse_no_image() {
    assert_eq!(ImageKey::parse(""), None);
    assert_eq!(ImageKey::parse(" - "), None);
}

#[test]
fn load_cuts_cell() {
    let dir = tempfile::tempdir().unwrap();
    write_sheet(dir.path(), "sheet.png", 1, 2);
    let mut store = ImageStore::new(&config(4));

    let image = store.load("sheet.0.1", Some(dir.path()));

    assert_eq!((image.x, image.y, image.w, image.h), (1, 2, 1, 1));
    assert!(image.zoomable);
}

#[test]
fn load_applies_offsets() {
    let dir = tempfile::tempdir().unwrap();
    write_sheet(dir.path(), "sheet.png", 0, 0);
    let mut store = ImageStore::new(&config(4));

    let image = store.load("sheet.0.1,5,-1", Some(dir.path()));

    assert_eq!((image.x, image.y), (5, -1));
}

#[test]
fn sheets_are_decoded_once() {
    let dir = tempfile::tempdir().unwrap();
    write_sheet(dir.path(), "sheet.png", 0, 0);
    let mut store = ImageStore::new(&config(4));

    let first = store.load("sheet.0.1", Some(dir.path()));
    let second = store.load("sheet.0.0", Some(dir.path()));

    assert_eq!(store.sheet_count(), 1);
    assert!(!first.is_empty());
    assert!(second.is_empty());
}

#[test]
fn missing_sheet_gives_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ImageStore::new(&config(4));

    let image = store.load("nothing.0.0", Some(dir.path()));

    assert!(image.is_empty());
    assert_eq!(image.data.len(), 0);
}

#[test]
fn cell_outside_sheet_gives_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    write_sheet(dir.path(), "sheet.png", 0, 0);
    let mut store = ImageStore::new(&config(4));

    assert!(store.load("sheet.0.2", Some(dir.path())).is_empty());
    assert!(store.load("sheet.1.0", Some(dir.path())).is_empty());
}

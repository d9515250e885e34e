//! Image references in text records and the sheets they point into.
//!
//! A record names an image as `path.row.col[,xoff[,yoff]]`: the cell at
//! `row`, `col` of the PNG sheet at `path`, with an optional pixel offset.
//! Sheets are decoded once per run and cut into square cells.

mod codec;

#[cfg(test)]
mod codec_tests;
#[cfg(test)]
mod store_tests;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use image::imageops::crop_imm;
use makepak_format::desc::Image;
use tracing::{debug, warn};

pub use codec::{ImageCodec, PLAYER_COLOR_FLAG, PLAYER_COLORS, RunLengthCodec, TRANSPARENT_RGB};

use crate::config::CompileConfig;
use crate::tabfile::parse_int;

/// A parsed image reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageKey {
    /// Sheet path, `.png` included, relative to the record's directory.
    pub path: PathBuf,
    pub row: u32,
    pub col: u32,
    pub x_offset: i16,
    pub y_offset: i16,
}

impl ImageKey {
    /// Parse a record value. `-` and the empty string name no image.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() || value == "-" {
            return None;
        }

        let mut parts = value.split(',');
        let location = parts.next().unwrap_or_default().trim();
        let mut offset = || {
            parts
                .next()
                .and_then(parse_int)
                .map_or(0, |v| v.clamp(i16::MIN as i64, i16::MAX as i64) as i16)
        };
        let x_offset = offset();
        let y_offset = offset();

        let mut pieces = location.rsplitn(3, '.');
        let (path, row, col) = match (pieces.next(), pieces.next(), pieces.next()) {
            (Some(col), Some(row), Some(path)) => match (col.parse::<u32>(), row.parse::<u32>()) {
                (Ok(col), Ok(row)) => (path, row, col),
                _ => (location, 0, 0),
            },
            _ => (location, 0, 0),
        };
        if path.is_empty() {
            return None;
        }

        let path = if path.to_ascii_lowercase().ends_with(".png") {
            PathBuf::from(path)
        } else {
            PathBuf::from(format!("{path}.png"))
        };
        Some(Self {
            path,
            row,
            col,
            x_offset,
            y_offset,
        })
    }
}

/// Decoded sheets and the codec that turns cells into image payloads.
pub struct ImageStore {
    sheets: HashMap<PathBuf, Option<RgbaImage>>,
    codec: Box<dyn ImageCodec>,
    cell_size: u32,
    zoomable: bool,
}

impl ImageStore {
    pub fn new(config: &CompileConfig) -> Self {
        Self::with_codec(config, Box::new(RunLengthCodec))
    }

    pub fn with_codec(config: &CompileConfig, codec: Box<dyn ImageCodec>) -> Self {
        Self {
            sheets: HashMap::new(),
            codec,
            cell_size: config.cell_size.max(1),
            zoomable: config.zoomable,
        }
    }

    /// Number of distinct sheets requested so far, readable or not.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Image for a record value. Anything that cannot be found yields an
    /// empty image and a warning.
    pub fn load(&mut self, value: &str, base: Option<&Path>) -> Image {
        let Some(key) = ImageKey::parse(value) else {
            return Image::empty();
        };
        let path = match base {
            Some(base) => base.join(&key.path),
            None => key.path.clone(),
        };

        let cell_size = self.cell_size;
        let sheet = self
            .sheets
            .entry(path.clone())
            .or_insert_with(|| read_sheet(&path))
            .as_ref();
        let Some(sheet) = sheet else {
            return Image::empty();
        };

        let x = key.col.saturating_mul(cell_size);
        let y = key.row.saturating_mul(cell_size);
        let inside = x.checked_add(cell_size).is_some_and(|end| end <= sheet.width())
            && y.checked_add(cell_size).is_some_and(|end| end <= sheet.height());
        if !inside {
            warn!(
                "{}: cell {}.{} lies outside the {}x{} sheet",
                path.display(),
                key.row,
                key.col,
                sheet.width(),
                sheet.height()
            );
            return Image::empty();
        }

        let cell = crop_imm(sheet, x, y, cell_size, cell_size).to_image();
        let mut image = self.codec.encode(&cell);
        if !image.is_empty() {
            image.x = image.x.saturating_add(key.x_offset);
            image.y = image.y.saturating_add(key.y_offset);
            image.zoomable = self.zoomable;
        }
        image
    }
}

fn read_sheet(path: &Path) -> Option<RgbaImage> {
    match image::open(path) {
        Ok(sheet) => {
            debug!("loaded image sheet {}", path.display());
            Some(sheet.to_rgba8())
        }
        Err(err) => {
            warn!("cannot read image sheet {}: {}", path.display(), err);
            None
        }
    }
}

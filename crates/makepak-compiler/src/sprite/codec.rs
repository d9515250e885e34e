//! Run-length sprite encoding.
//!
//! The sprite is cropped to the bounding box of its opaque pixels. Each row
//! of the box is a list of runs, `clear, colored, pixel...`, followed by a
//! `0` word. The first run of a row is always present and may start with a
//! zero clear count; every later run starts with at least one clear pixel,
//! so a zero where a clear count is expected ends the row.

use image::{Rgba, RgbaImage};
use makepak_format::desc::Image;

/// Colour keyed as transparent regardless of alpha.
pub const TRANSPARENT_RGB: [u8; 3] = [0xE7, 0xFF, 0xFF];

/// Shades recoloured to the owning player's colour at runtime, darkest first.
pub const PLAYER_COLORS: [[u8; 3]; 8] = [
    [0x24, 0x4B, 0x67],
    [0x39, 0x5E, 0x7C],
    [0x4C, 0x71, 0x91],
    [0x60, 0x84, 0xA7],
    [0x74, 0x97, 0xBD],
    [0x88, 0xAB, 0xD3],
    [0x9C, 0xBE, 0xE9],
    [0xB0, 0xD2, 0xFF],
];

/// Marks a pixel word as a player colour index instead of RGB555.
pub const PLAYER_COLOR_FLAG: u16 = 0x8000;

/// Turns one sprite cell into an image payload.
pub trait ImageCodec {
    /// Encode `cell`. The returned image is positioned relative to the
    /// cell's top-left corner and is not marked zoomable.
    fn encode(&self, cell: &RgbaImage) -> Image;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RunLengthCodec;

impl RunLengthCodec {
    pub fn is_transparent(pixel: &Rgba<u8>) -> bool {
        let [r, g, b, a] = pixel.0;
        a < 128 || [r, g, b] == TRANSPARENT_RGB
    }

    pub fn pixel_word(pixel: &Rgba<u8>) -> u16 {
        let [r, g, b, _] = pixel.0;
        if let Some(index) = PLAYER_COLORS.iter().position(|c| *c == [r, g, b]) {
            return PLAYER_COLOR_FLAG | index as u16;
        }
        ((r as u16 >> 3) << 10) | ((g as u16 >> 3) << 5) | (b as u16 >> 3)
    }

    /// Bounding box `(x, y, w, h)` of the opaque pixels.
    fn bounds(cell: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for (x, y, pixel) in cell.enumerate_pixels() {
            if Self::is_transparent(pixel) {
                continue;
            }
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
        bounds.map(|(x0, y0, x1, y1)| (x0, y0, x1 - x0 + 1, y1 - y0 + 1))
    }

    fn encode_row(cell: &RgbaImage, y: u32, x0: u32, w: u32, out: &mut Vec<u16>) {
        let mut x = 0;
        let mut first = true;
        while x < w {
            let clear_start = x;
            while x < w && Self::is_transparent(cell.get_pixel(x0 + x, y)) {
                x += 1;
            }
            let colored_start = x;
            while x < w && !Self::is_transparent(cell.get_pixel(x0 + x, y)) {
                x += 1;
            }
            let colored = x - colored_start;
            if colored == 0 && !first {
                break;
            }
            out.push((colored_start - clear_start) as u16);
            out.push(colored as u16);
            for px in colored_start..x {
                out.push(Self::pixel_word(cell.get_pixel(x0 + px, y)));
            }
            first = false;
        }
        out.push(0);
    }
}

impl ImageCodec for RunLengthCodec {
    fn encode(&self, cell: &RgbaImage) -> Image {
        let Some((x, y, w, h)) = Self::bounds(cell) else {
            return Image::empty();
        };
        let mut data = Vec::new();
        for row in y..y + h {
            Self::encode_row(cell, row, x, w, &mut data);
        }
        Image {
            x: x as i16,
            y: y as i16,
            w: w as u16,
            h: h as u16,
            zoomable: false,
            data,
        }
    }
}

use image::{Rgba, RgbaImage};

use super::{ImageCodec, PLAYER_COLOR_FLAG, RunLengthCodec};

const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);
const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
const KEYED: Rgba<u8> = Rgba([0xE7, 0xFF, 0xFF, 255]);

fn sheet(width: u32, height: u32, opaque: &[(u32, u32, Rgba<u8>)]) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(width, height, CLEAR);
    for &(x, y, pixel) in opaque {
        image.put_pixel(x, y, pixel);
    }
    image
}

#[test]
fn fully_transparent_cell_is_empty() {
    let image = RunLengthCodec.encode(&sheet(4, 4, &[]));

    assert!(image.is_empty());
    assert!(image.data.is_empty());
}

#[test]
fn crops_to_opaque_pixels() {
    let image = RunLengthCodec.encode(&sheet(4, 4, &[(2, 1, RED)]));

    assert_eq!((image.x, image.y, image.w, image.h), (2, 1, 1, 1));
    assert_eq!(image.data, vec![0, 1, 0x7C00, 0]);
    assert!(!image.zoomable);
}

#[test]
fn later_runs_start_with_clear_pixels() {
    let image = RunLengthCodec.encode(&sheet(3, 1, &[(0, 0, BLUE), (2, 0, BLUE)]));

    assert_eq!(image.w, 3);
    assert_eq!(image.data, vec![0, 1, 0x001F, 1, 1, 0x001F, 0]);
}

#[test]
fn transparent_row_inside_box() {
    let image = RunLengthCodec.encode(&sheet(1, 3, &[(0, 0, RED), (0, 2, RED)]));

    assert_eq!(image.h, 3);
    assert_eq!(
        image.data,
        vec![0, 1, 0x7C00, 0, 1, 0, 0, 0, 1, 0x7C00, 0]
    );
}

#[test]
fn keyed_colour_and_low_alpha_are_transparent() {
    assert!(RunLengthCodec::is_transparent(&KEYED));
    assert!(RunLengthCodec::is_transparent(&Rgba([255, 0, 0, 127])));
    assert!(!RunLengthCodec::is_transparent(&Rgba([255, 0, 0, 128])));

    let image = RunLengthCodec.encode(&sheet(2, 1, &[(0, 0, KEYED), (1, 0, RED)]));
    assert_eq!((image.x, image.w), (1, 1));
}

#[test]
fn player_colours_become_indices() {
    assert_eq!(
        RunLengthCodec::pixel_word(&Rgba([0x24, 0x4B, 0x67, 255])),
        PLAYER_COLOR_FLAG
    );
    assert_eq!(
        RunLengthCodec::pixel_word(&Rgba([0xB0, 0xD2, 0xFF, 255])),
        PLAYER_COLOR_FLAG | 7
    );
    assert_eq!(RunLengthCodec::pixel_word(&Rgba([255, 255, 255, 255])), 0x7FFF);
}

//! Direction tables for per-direction image lists.
//!
//! The runtime indexes images positionally, so the order of every table
//! here is part of the file format.

/// Ribi codes. The position of each code is its bitmask, with north,
/// east, south and west as bits 1, 2, 4 and 8.
pub const RIBI_CODES: [&str; 16] = [
    "-", "n", "e", "ne", "s", "ns", "se", "nse", "w", "nw", "ew", "new", "sw", "nsw", "sew",
    "nsew",
];

/// Vehicle facing directions, in image-list order.
pub const VEHICLE_DIRS: [&str; 8] = ["s", "w", "sw", "se", "n", "e", "ne", "nw"];

/// Straight four-direction codes (tunnel portals, bridge starts and ramps).
pub const COMPASS_DIRS: [&str; 4] = ["n", "s", "e", "w"];

/// Single-slope codes for way images on inclines.
pub const SLOPE_CODES: [&str; 4] = ["3", "6", "9", "12"];

/// Diagonal codes for way images.
pub const DIAGONAL_CODES: [&str; 4] = ["ne", "se", "nw", "sw"];

/// Bridge image parts, in image-list order. Each part is keyed as
/// `back<part>` or `front<part>` in the text record.
pub const BRIDGE_PARTS: [&str; 12] = [
    "image[ns]",
    "image[ew]",
    "start[n]",
    "start[s]",
    "start[e]",
    "start[w]",
    "ramp[n]",
    "ramp[s]",
    "ramp[e]",
    "ramp[w]",
    "pillar[s]",
    "pillar[w]",
];

//! Enumerated field values spelled as strings in text records.
//!
//! An unrecognized string cannot be represented in the binary format, so
//! parsing returns [`UnknownValue`] and the encoder aborts the file.

use std::fmt;

/// A string that does not name any variant of the expected enumeration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized {kind} '{value}'")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! named_enum {
    (@first $first:literal $(, $rest:literal)*) => { $first };
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident = $value:literal => [$($text:literal),+]),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum $name {
            $($variant = $value),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Parse the text-record spelling (case-insensitive).
            pub fn parse(text: &str) -> Result<Self, UnknownValue> {
                let lower = text.trim().to_ascii_lowercase();
                match lower.as_str() {
                    $($($text)|+ => Ok($name::$variant),)+
                    _ => Err(UnknownValue { kind: $kind, value: text.to_string() }),
                }
            }

            /// Decode the on-disk byte.
            pub fn from_u8(value: u8) -> Option<Self> {
                match value {
                    $($value => Some($name::$variant),)+
                    _ => None,
                }
            }

            #[inline]
            pub fn as_u8(self) -> u8 {
                self as u8
            }

            /// Canonical spelling (first accepted alias).
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => named_enum!(@first $($text),+),)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

named_enum! {
    /// Kind of way a vehicle runs on or a structure carries.
    WayType, "way type" {
        Road = 1 => ["road"],
        Track = 2 => ["track"],
        Water = 3 => ["water"],
        Overheadlines = 4 => ["power"],
        Monorail = 5 => ["monorail"],
        Maglev = 6 => ["maglev"],
        Tram = 7 => ["tram", "schiene_tram"],
        Narrowgauge = 8 => ["narrowgauge"],
        Air = 16 => ["air"],
    }
}

named_enum! {
    /// Vehicle propulsion.
    EngineType, "engine type" {
        Unknown = 0 => ["unknown"],
        Steam = 1 => ["steam"],
        Diesel = 2 => ["diesel"],
        Electric = 3 => ["electric"],
        Bio = 4 => ["bio"],
        Sail = 5 => ["sail"],
        FuelCell = 6 => ["fuel_cell"],
        Hydrogene = 7 => ["hydrogene"],
        Battery = 8 => ["battery"],
    }
}

named_enum! {
    /// Building role.
    BuildingType, "building type" {
        Any = 0 => ["any"],
        Residential = 1 => ["res"],
        Commercial = 2 => ["com"],
        Industrial = 3 => ["ind"],
        Curiosity = 4 => ["cur"],
        Monument = 5 => ["mon"],
        Townhall = 6 => ["tow"],
        Headquarters = 7 => ["hq"],
        Depot = 8 => ["depot"],
        Stop = 9 => ["stop"],
        Extension = 10 => ["extension"],
        Factory = 11 => ["factory", "fac"],
    }
}

named_enum! {
    /// Where a factory may be placed.
    Placement, "factory placement" {
        Land = 0 => ["land"],
        Water = 1 => ["water"],
        City = 2 => ["city"],
    }
}

/// Climate names, in bit order.
pub const CLIMATE_NAMES: [&str; 8] = [
    "water",
    "desert",
    "tropic",
    "mediterran",
    "temperate",
    "tundra",
    "rocky",
    "arctic",
];

/// Set of climate zones, one bit per entry of [`CLIMATE_NAMES`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Climates(pub u16);

impl Climates {
    pub const ALL: Self = Self((1 << CLIMATE_NAMES.len()) - 1);
    /// Every climate except water, the default for land objects.
    pub const ALL_LAND: Self = Self(Self::ALL.0 & !1);

    /// Parse a comma separated list of climate names; `all` selects every
    /// land climate. An empty string yields `default`.
    pub fn parse(text: &str, default: Self) -> Result<Self, UnknownValue> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(default);
        }
        let mut bits = 0u16;
        for part in text.split(',') {
            let name = part.trim().to_ascii_lowercase();
            if name.is_empty() {
                continue;
            }
            if name == "all" {
                bits |= Self::ALL_LAND.0;
                continue;
            }
            let Some(index) = CLIMATE_NAMES.iter().position(|&c| c == name) else {
                return Err(UnknownValue {
                    kind: "climate",
                    value: part.trim().to_string(),
                });
            };
            bits |= 1 << index;
        }
        Ok(Self(bits))
    }

    pub fn contains(self, name: &str) -> bool {
        CLIMATE_NAMES
            .iter()
            .position(|&c| c == name)
            .is_some_and(|i| self.0 & (1 << i) != 0)
    }

    pub fn names(self) -> Vec<&'static str> {
        CLIMATE_NAMES
            .iter()
            .enumerate()
            .filter(|(i, _)| self.0 & (1 << i) != 0)
            .map(|(_, &name)| name)
            .collect()
    }
}

impl fmt::Display for Climates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names().join(","))
    }
}

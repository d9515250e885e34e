//! Four-byte node type codes.

use std::fmt;

/// Node type code, stored verbatim as the first four bytes of every node header.
///
/// Codes shorter than four characters are padded with NUL (`WAY\0`, `IMG\0`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Tag(pub [u8; 4]);

impl Tag {
    pub const ROOT: Self = Self(*b"ROOT");
    pub const TEXT: Self = Self(*b"TEXT");
    pub const XREF: Self = Self(*b"XREF");

    pub const IMAGE: Self = Self(*b"IMG\0");
    pub const IMAGE_LIST: Self = Self(*b"IMG1");
    pub const IMAGE_LIST_2D: Self = Self(*b"IMG2");
    pub const IMAGE_LIST_3D: Self = Self(*b"IMG3");

    pub const BUILDING: Self = Self(*b"BUIL");
    pub const TILE: Self = Self(*b"TILE");
    pub const VEHICLE: Self = Self(*b"VHCL");
    pub const WAY: Self = Self(*b"WAY\0");
    pub const WAY_OBJ: Self = Self(*b"WYOB");
    pub const BRIDGE: Self = Self(*b"BRDG");
    pub const TUNNEL: Self = Self(*b"TUNL");
    pub const CROSSING: Self = Self(*b"CRSS");
    pub const FACTORY: Self = Self(*b"FACT");
    pub const FACTORY_SUPPLIER: Self = Self(*b"FSUP");
    pub const FACTORY_PRODUCT: Self = Self(*b"FPRO");
    pub const FACTORY_SMOKE: Self = Self(*b"FSMO");
    pub const GOOD: Self = Self(*b"GOOD");
    pub const GROUND: Self = Self(*b"GRND");
    pub const ROADSIGN: Self = Self(*b"SIGN");
    pub const SOUND: Self = Self(*b"SOUN");
    pub const TREE: Self = Self(*b"TREE");

    pub const MENU: Self = Self(*b"MENU");
    pub const CURSOR: Self = Self(*b"CURS");
    pub const SYMBOL: Self = Self(*b"SYMB");
    pub const MISC: Self = Self(*b"MISC");
    pub const SMOKE: Self = Self(*b"SMOK");

    #[inline]
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Printable form: trailing NUL padding dropped, other
    /// non-printable bytes hex-escaped.
    pub fn display_name(&self) -> String {
        let end = self.0.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        let mut out = String::with_capacity(4);
        for &b in &self.0[..end] {
            if b.is_ascii_graphic() {
                out.push(b as char);
            } else {
                out.push_str(&format!("\\x{b:02X}"));
            }
        }
        out
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", self.display_name())
    }
}

impl serde::Serialize for Tag {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.display_name())
    }
}

//! Ways, way objects (overhead wires and the like) and road signs.

use makepak_core::date::format_month_count;
use makepak_core::{Tag, WayType};

use super::{Children, ImageList, NodeDecode, enum_field, expect_tag};
use crate::tree::Node;
use crate::{DecodeError, PayloadReader, PayloadWriter};

/// v2 adds `draw_as_obj`.
pub const WAY_VERSION: u16 = 2;
pub const WAYOBJ_VERSION: u16 = 1;
pub const ROADSIGN_VERSION: u16 = 1;

/// Bits of [`Roadsign::flags`].
pub mod roadsign_flags {
    pub const ONE_WAY: u8 = 1;
    pub const FREE_ROUTE: u8 = 2;
    pub const PRIVATE_ROAD: u8 = 4;
    pub const SIGNAL: u8 = 8;
    pub const PRE_SIGNAL: u8 = 16;
    pub const PRIORITY_SIGNAL: u8 = 32;
    pub const LONGBLOCK_SIGNAL: u8 = 64;
    pub const END_OF_CHOOSE: u8 = 128;

    /// Text-record key setting each flag.
    pub const KEYS: [(&str, u8); 8] = [
        ("is_signal", SIGNAL),
        ("one_way", ONE_WAY),
        ("free_route", FREE_ROUTE),
        ("is_private", PRIVATE_ROAD),
        ("is_presignal", PRE_SIGNAL),
        ("is_prioritysignal", PRIORITY_SIGNAL),
        ("is_longblocksignal", LONGBLOCK_SIGNAL),
        ("end_of_choose", END_OF_CHOOSE),
    ];
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Way {
    pub name: String,
    pub copyright: String,
    pub price: u32,
    pub maintenance: u32,
    pub topspeed: u16,
    pub max_weight: u32,
    pub intro: u16,
    pub retire: u16,
    pub waytype: WayType,
    pub system_type: u8,
    pub draw_as_obj: bool,
    /// One image per ribi bitmask.
    pub ribi_images: ImageList,
    pub slope_images: ImageList,
    pub diagonal_images: ImageList,
    pub cursor: ImageList,
}

impl Way {
    pub fn encode_payload(&self) -> Vec<u8> {
        PayloadWriter::new()
            .version(WAY_VERSION)
            .u32(self.price)
            .u32(self.maintenance)
            .u16(self.topspeed)
            .u32(self.max_weight)
            .u16(self.intro)
            .u16(self.retire)
            .u8(self.waytype.as_u8())
            .u8(self.system_type)
            .bool(self.draw_as_obj)
            .finish()
    }
}

impl NodeDecode for Way {
    const TAG: Tag = Tag::WAY;

    fn decode(node: &Node) -> Result<Self, DecodeError> {
        expect_tag(node, Self::TAG)?;
        let mut r = PayloadReader::new(Self::TAG, &node.payload);
        let version = r.version(1, WAY_VERSION)?;
        let price = r.u32()?;
        let maintenance = r.u32()?;
        let topspeed = r.u16()?;
        let max_weight = r.u32()?;
        let intro = r.u16()?;
        let retire = r.u16()?;
        let waytype = enum_field(Self::TAG, "waytype", r.u8()?, WayType::from_u8)?;
        let system_type = r.u8()?;
        let draw_as_obj = version >= 2 && r.bool()?;

        let mut children = Children::new(node);
        let (name, copyright) = children.names()?;
        Ok(Self {
            name,
            copyright,
            price,
            maintenance,
            topspeed,
            max_weight,
            intro,
            retire,
            waytype,
            system_type,
            draw_as_obj,
            ribi_images: children.decode("ribi images")?,
            slope_images: children.decode("slope images")?,
            diagonal_images: children.decode("diagonal images")?,
            cursor: children.decode("cursor")?,
        })
    }

    fn summary(&self) -> String {
        format!(
            "{} topspeed={} price={} maintenance={} {}-{}",
            self.waytype,
            self.topspeed,
            self.price,
            self.maintenance,
            format_month_count(self.intro),
            format_month_count(self.retire),
        )
    }
}

/// Object drawn over a way, such as overhead wires.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WayObj {
    pub name: String,
    pub copyright: String,
    pub price: u32,
    pub maintenance: u32,
    pub topspeed: u16,
    pub intro: u16,
    pub retire: u16,
    /// Way the object is built on.
    pub waytype: WayType,
    /// Way type the object provides.
    pub own_waytype: WayType,
    pub front_ribi: ImageList,
    pub back_ribi: ImageList,
    pub front_slopes: ImageList,
    pub back_slopes: ImageList,
    pub front_diagonals: ImageList,
    pub back_diagonals: ImageList,
    pub cursor: ImageList,
}

impl WayObj {
    pub fn encode_payload(&self) -> Vec<u8> {
        PayloadWriter::new()
            .version(WAYOBJ_VERSION)
            .u32(self.price)
            .u32(self.maintenance)
            .u16(self.topspeed)
            .u16(self.intro)
            .u16(self.retire)
            .u8(self.waytype.as_u8())
            .u8(self.own_waytype.as_u8())
            .finish()
    }
}

impl NodeDecode for WayObj {
    const TAG: Tag = Tag::WAY_OBJ;

    fn decode(node: &Node) -> Result<Self, DecodeError> {
        expect_tag(node, Self::TAG)?;
        let mut r = PayloadReader::new(Self::TAG, &node.payload);
        r.version(1, WAYOBJ_VERSION)?;
        let price = r.u32()?;
        let maintenance = r.u32()?;
        let topspeed = r.u16()?;
        let intro = r.u16()?;
        let retire = r.u16()?;
        let waytype = enum_field(Self::TAG, "waytype", r.u8()?, WayType::from_u8)?;
        let own_waytype = enum_field(Self::TAG, "own_waytype", r.u8()?, WayType::from_u8)?;

        let mut children = Children::new(node);
        let (name, copyright) = children.names()?;
        Ok(Self {
            name,
            copyright,
            price,
            maintenance,
            topspeed,
            intro,
            retire,
            waytype,
            own_waytype,
            front_ribi: children.decode("front ribi images")?,
            back_ribi: children.decode("back ribi images")?,
            front_slopes: children.decode("front slope images")?,
            back_slopes: children.decode("back slope images")?,
            front_diagonals: children.decode("front diagonal images")?,
            back_diagonals: children.decode("back diagonal images")?,
            cursor: children.decode("cursor")?,
        })
    }

    fn summary(&self) -> String {
        format!(
            "{} on {} topspeed={} price={}",
            self.own_waytype, self.waytype, self.topspeed, self.price
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roadsign {
    pub name: String,
    pub copyright: String,
    pub min_speed: u16,
    pub price: u32,
    pub flags: u8,
    pub offset_left: i8,
    pub waytype: WayType,
    pub intro: u16,
    pub retire: u16,
    pub images: ImageList,
    pub cursor: ImageList,
}

impl Roadsign {
    pub fn encode_payload(&self) -> Vec<u8> {
        PayloadWriter::new()
            .version(ROADSIGN_VERSION)
            .u16(self.min_speed)
            .u32(self.price)
            .u8(self.flags)
            .i8(self.offset_left)
            .u8(self.waytype.as_u8())
            .u16(self.intro)
            .u16(self.retire)
            .finish()
    }

    pub fn is_signal(&self) -> bool {
        self.flags & roadsign_flags::SIGNAL != 0
    }
}

impl NodeDecode for Roadsign {
    const TAG: Tag = Tag::ROADSIGN;

    fn decode(node: &Node) -> Result<Self, DecodeError> {
        expect_tag(node, Self::TAG)?;
        let mut r = PayloadReader::new(Self::TAG, &node.payload);
        r.version(1, ROADSIGN_VERSION)?;
        let min_speed = r.u16()?;
        let price = r.u32()?;
        let flags = r.u8()?;
        let offset_left = r.i8()?;
        let waytype = enum_field(Self::TAG, "waytype", r.u8()?, WayType::from_u8)?;
        let intro = r.u16()?;
        let retire = r.u16()?;

        let mut children = Children::new(node);
        let (name, copyright) = children.names()?;
        Ok(Self {
            name,
            copyright,
            min_speed,
            price,
            flags,
            offset_left,
            waytype,
            intro,
            retire,
            images: children.decode("images")?,
            cursor: children.decode("cursor")?,
        })
    }

    fn summary(&self) -> String {
        format!(
            "{} min_speed={} flags={:#04x}",
            self.waytype, self.min_speed, self.flags
        )
    }
}

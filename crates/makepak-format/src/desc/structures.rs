//! Bridges, tunnels and way crossings.

use makepak_core::date::format_month_count;
use makepak_core::{Tag, WayType};

use super::{Children, ImageList, NodeDecode, XRef, enum_field, expect_tag};
use crate::tree::Node;
use crate::{DecodeError, PayloadReader, PayloadWriter};

pub const BRIDGE_VERSION: u16 = 1;
pub const TUNNEL_VERSION: u16 = 1;
pub const CROSSING_VERSION: u16 = 1;

/// Crossing image sets in list order. Each is read as `<key>[i]`.
pub const CROSSING_IMAGE_KEYS: [&str; 8] = [
    "openimage[ns]",
    "openimage[ew]",
    "front_openimage[ns]",
    "front_openimage[ew]",
    "closedimage[ns]",
    "closedimage[ew]",
    "front_closedimage[ns]",
    "front_closedimage[ew]",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bridge {
    pub name: String,
    pub copyright: String,
    pub topspeed: u16,
    pub price: u32,
    pub maintenance: u32,
    pub waytype: WayType,
    /// Tiles between pillars, 0 for none.
    pub pillars_every: u8,
    pub pillars_asymmetric: bool,
    /// 0 means unlimited.
    pub max_length: u8,
    pub max_height: u8,
    pub axle_load: u16,
    pub intro: u16,
    pub retire: u16,
    /// Back images by bridge part.
    pub back: ImageList,
    pub front: ImageList,
    pub cursor: ImageList,
}

impl Bridge {
    pub fn encode_payload(&self) -> Vec<u8> {
        PayloadWriter::new()
            .version(BRIDGE_VERSION)
            .u16(self.topspeed)
            .u32(self.price)
            .u32(self.maintenance)
            .u8(self.waytype.as_u8())
            .u8(self.pillars_every)
            .bool(self.pillars_asymmetric)
            .u8(self.max_length)
            .u8(self.max_height)
            .u16(self.axle_load)
            .u16(self.intro)
            .u16(self.retire)
            .finish()
    }
}

impl NodeDecode for Bridge {
    const TAG: Tag = Tag::BRIDGE;

    fn decode(node: &Node) -> Result<Self, DecodeError> {
        expect_tag(node, Self::TAG)?;
        let mut r = PayloadReader::new(Self::TAG, &node.payload);
        r.version(1, BRIDGE_VERSION)?;
        let topspeed = r.u16()?;
        let price = r.u32()?;
        let maintenance = r.u32()?;
        let waytype = enum_field(Self::TAG, "waytype", r.u8()?, WayType::from_u8)?;
        let pillars_every = r.u8()?;
        let pillars_asymmetric = r.bool()?;
        let max_length = r.u8()?;
        let max_height = r.u8()?;
        let axle_load = r.u16()?;
        let intro = r.u16()?;
        let retire = r.u16()?;

        let mut children = Children::new(node);
        let (name, copyright) = children.names()?;
        Ok(Self {
            name,
            copyright,
            topspeed,
            price,
            maintenance,
            waytype,
            pillars_every,
            pillars_asymmetric,
            max_length,
            max_height,
            axle_load,
            intro,
            retire,
            back: children.decode("back images")?,
            front: children.decode("front images")?,
            cursor: children.decode("cursor")?,
        })
    }

    fn summary(&self) -> String {
        format!(
            "{} topspeed={} max_length={} pillars_every={} {}-{}",
            self.waytype,
            self.topspeed,
            self.max_length,
            self.pillars_every,
            format_month_count(self.intro),
            format_month_count(self.retire),
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tunnel {
    pub name: String,
    pub copyright: String,
    pub topspeed: u16,
    pub price: u32,
    pub maintenance: u32,
    pub waytype: WayType,
    pub axle_load: u16,
    pub intro: u16,
    pub retire: u16,
    /// Portal images by compass direction.
    pub back: ImageList,
    pub front: ImageList,
    pub cursor: ImageList,
    /// Way laid inside the tunnel.
    pub way: Option<XRef>,
}

impl Tunnel {
    pub fn encode_payload(&self) -> Vec<u8> {
        PayloadWriter::new()
            .version(TUNNEL_VERSION)
            .u16(self.topspeed)
            .u32(self.price)
            .u32(self.maintenance)
            .u8(self.waytype.as_u8())
            .u16(self.axle_load)
            .u16(self.intro)
            .u16(self.retire)
            .bool(self.way.is_some())
            .finish()
    }
}

impl NodeDecode for Tunnel {
    const TAG: Tag = Tag::TUNNEL;

    fn decode(node: &Node) -> Result<Self, DecodeError> {
        expect_tag(node, Self::TAG)?;
        let mut r = PayloadReader::new(Self::TAG, &node.payload);
        r.version(1, TUNNEL_VERSION)?;
        let topspeed = r.u16()?;
        let price = r.u32()?;
        let maintenance = r.u32()?;
        let waytype = enum_field(Self::TAG, "waytype", r.u8()?, WayType::from_u8)?;
        let axle_load = r.u16()?;
        let intro = r.u16()?;
        let retire = r.u16()?;
        let has_way = r.bool()?;

        let mut children = Children::new(node);
        let (name, copyright) = children.names()?;
        let back = children.decode("back images")?;
        let front = children.decode("front images")?;
        let cursor = children.decode("cursor")?;
        let way = if has_way {
            Some(children.decode("way reference")?)
        } else {
            None
        };

        Ok(Self {
            name,
            copyright,
            topspeed,
            price,
            maintenance,
            waytype,
            axle_load,
            intro,
            retire,
            back,
            front,
            cursor,
            way,
        })
    }

    fn summary(&self) -> String {
        format!(
            "{} topspeed={} price={}{}",
            self.waytype,
            self.topspeed,
            self.price,
            if self.way.is_some() { " with way" } else { "" }
        )
    }
}

/// Level crossing of two way types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Crossing {
    pub name: String,
    pub copyright: String,
    pub waytypes: (WayType, WayType),
    pub speeds: (u16, u16),
    /// Animation times in milliseconds.
    pub open_time: u32,
    pub closed_time: u32,
    pub sound: i16,
    pub intro: u16,
    pub retire: u16,
    /// One list per entry of [`CROSSING_IMAGE_KEYS`].
    pub images: Vec<ImageList>,
}

impl Crossing {
    pub fn encode_payload(&self) -> Vec<u8> {
        PayloadWriter::new()
            .version(CROSSING_VERSION)
            .u8(self.waytypes.0.as_u8())
            .u8(self.waytypes.1.as_u8())
            .u16(self.speeds.0)
            .u16(self.speeds.1)
            .u32(self.open_time)
            .u32(self.closed_time)
            .i16(self.sound)
            .u16(self.intro)
            .u16(self.retire)
            .finish()
    }
}

impl NodeDecode for Crossing {
    const TAG: Tag = Tag::CROSSING;

    fn decode(node: &Node) -> Result<Self, DecodeError> {
        expect_tag(node, Self::TAG)?;
        let mut r = PayloadReader::new(Self::TAG, &node.payload);
        r.version(1, CROSSING_VERSION)?;
        let waytype1 = enum_field(Self::TAG, "waytype[0]", r.u8()?, WayType::from_u8)?;
        let waytype2 = enum_field(Self::TAG, "waytype[1]", r.u8()?, WayType::from_u8)?;
        let speeds = (r.u16()?, r.u16()?);
        let open_time = r.u32()?;
        let closed_time = r.u32()?;
        let sound = r.i16()?;
        let intro = r.u16()?;
        let retire = r.u16()?;

        let mut children = Children::new(node);
        let (name, copyright) = children.names()?;
        let images = children.decode_n(CROSSING_IMAGE_KEYS.len(), "crossing images")?;

        Ok(Self {
            name,
            copyright,
            waytypes: (waytype1, waytype2),
            speeds,
            open_time,
            closed_time,
            sound,
            intro,
            retire,
            images,
        })
    }

    fn summary(&self) -> String {
        format!(
            "{}/{} speeds={}/{}",
            self.waytypes.0, self.waytypes.1, self.speeds.0, self.speeds.1
        )
    }
}

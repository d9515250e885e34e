use makepak_core::date::format_month_count;
use makepak_core::{EngineType, Tag, WayType};

use super::{Children, ImageList, NodeDecode, XRef, enum_field, expect_tag};
use crate::tree::Node;
use crate::{DecodeError, PayloadReader, PayloadWriter};

/// v2 adds gear and length.
pub const VEHICLE_VERSION: u16 = 2;
/// Gear factor of 1.0 in 1/64 steps.
pub const DEFAULT_GEAR: u16 = 64;
pub const DEFAULT_LENGTH: u8 = 8;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vehicle {
    pub name: String,
    pub copyright: String,
    pub waytype: WayType,
    pub engine: EngineType,
    pub capacity: u16,
    pub price: u32,
    pub speed: u16,
    pub weight: u16,
    pub power: u32,
    pub running_cost: u16,
    pub gear: u16,
    pub length: u8,
    /// Sound id, -1 for none.
    pub sound: i16,
    pub intro: u16,
    pub retire: u16,
    /// Images by facing direction, empty and loaded.
    pub empty_images: ImageList,
    pub freight_images: ImageList,
    pub freight: XRef,
    pub smoke: XRef,
    pub leaders: Vec<XRef>,
    pub trailers: Vec<XRef>,
}

impl Vehicle {
    pub fn encode_payload(&self) -> Vec<u8> {
        PayloadWriter::new()
            .version(VEHICLE_VERSION)
            .u8(self.waytype.as_u8())
            .u8(self.engine.as_u8())
            .u16(self.capacity)
            .u32(self.price)
            .u16(self.speed)
            .u16(self.weight)
            .u32(self.power)
            .u16(self.running_cost)
            .u16(self.gear)
            .u8(self.length)
            .i16(self.sound)
            .u16(self.intro)
            .u16(self.retire)
            .u8(self.leaders.len() as u8)
            .u8(self.trailers.len() as u8)
            .finish()
    }
}

impl NodeDecode for Vehicle {
    const TAG: Tag = Tag::VEHICLE;

    fn decode(node: &Node) -> Result<Self, DecodeError> {
        expect_tag(node, Self::TAG)?;
        let mut r = PayloadReader::new(Self::TAG, &node.payload);
        let version = r.version(1, VEHICLE_VERSION)?;
        let waytype = enum_field(Self::TAG, "waytype", r.u8()?, WayType::from_u8)?;
        let engine = enum_field(Self::TAG, "engine_type", r.u8()?, EngineType::from_u8)?;
        let capacity = r.u16()?;
        let price = r.u32()?;
        let speed = r.u16()?;
        let weight = r.u16()?;
        let power = r.u32()?;
        let running_cost = r.u16()?;
        let (gear, length) = if version >= 2 {
            (r.u16()?, r.u8()?)
        } else {
            (DEFAULT_GEAR, DEFAULT_LENGTH)
        };
        let sound = r.i16()?;
        let intro = r.u16()?;
        let retire = r.u16()?;
        let leader_count = r.u8()? as usize;
        let trailer_count = r.u8()? as usize;

        let mut children = Children::new(node);
        let (name, copyright) = children.names()?;
        let empty_images = children.decode("empty images")?;
        let freight_images = children.decode("freight images")?;
        let freight = children.decode("freight reference")?;
        let smoke = children.decode("smoke reference")?;
        let leaders = children.decode_n(leader_count, "leader reference")?;
        let trailers = children.decode_n(trailer_count, "trailer reference")?;

        Ok(Self {
            name,
            copyright,
            waytype,
            engine,
            capacity,
            price,
            speed,
            weight,
            power,
            running_cost,
            gear,
            length,
            sound,
            intro,
            retire,
            empty_images,
            freight_images,
            freight,
            smoke,
            leaders,
            trailers,
        })
    }

    fn summary(&self) -> String {
        format!(
            "{} {} speed={} power={} capacity={} {}-{}",
            self.waytype,
            self.engine,
            self.speed,
            self.power,
            self.capacity,
            format_month_count(self.intro),
            format_month_count(self.retire),
        )
    }
}

//! Buildings, their tiles, and factories built on top of a building.

use makepak_core::date::format_month_count;
use makepak_core::{BuildingType, Climates, Placement, Tag};

use super::{Children, ImageList2d, NodeDecode, XRef, enum_field, expect_tag};
use crate::tree::Node;
use crate::{DecodeError, PayloadReader, PayloadWriter};

/// v2 adds the climate mask.
pub const BUILDING_VERSION: u16 = 2;
pub const TILE_VERSION: u16 = 1;
pub const FACTORY_VERSION: u16 = 1;
/// Version of the factory supplier, product and smoke helpers.
pub const HELPER_VERSION: u16 = 1;

/// Bits of [`Building::flags`].
pub mod building_flags {
    pub const NO_INFO: u8 = 1;
    pub const NO_CONSTRUCTION_PIT: u8 = 2;
    pub const NEEDS_GROUND: u8 = 4;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Building {
    pub name: String,
    pub copyright: String,
    pub building_type: BuildingType,
    pub level: u16,
    pub size_x: u8,
    pub size_y: u8,
    pub layouts: u8,
    pub intro: u16,
    pub retire: u16,
    pub chance: u8,
    pub animation_time: u16,
    pub flags: u8,
    pub climates: Climates,
    /// `layouts * size_y * size_x` tiles, layout-major then row-major.
    pub tiles: Vec<Tile>,
}

impl Building {
    pub fn tile_count(&self) -> usize {
        self.layouts as usize * self.size_y as usize * self.size_x as usize
    }

    pub fn encode_payload(&self) -> Vec<u8> {
        PayloadWriter::new()
            .version(BUILDING_VERSION)
            .u8(self.building_type.as_u8())
            .u16(self.level)
            .u8(self.size_x)
            .u8(self.size_y)
            .u8(self.layouts)
            .u16(self.intro)
            .u16(self.retire)
            .u8(self.chance)
            .u16(self.animation_time)
            .u8(self.flags)
            .u16(self.climates.0)
            .finish()
    }
}

impl NodeDecode for Building {
    const TAG: Tag = Tag::BUILDING;

    fn decode(node: &Node) -> Result<Self, DecodeError> {
        expect_tag(node, Self::TAG)?;
        let mut r = PayloadReader::new(Self::TAG, &node.payload);
        let version = r.version(1, BUILDING_VERSION)?;
        let building_type = enum_field(Self::TAG, "type", r.u8()?, BuildingType::from_u8)?;
        let level = r.u16()?;
        let size_x = r.u8()?;
        let size_y = r.u8()?;
        let layouts = r.u8()?;
        let intro = r.u16()?;
        let retire = r.u16()?;
        let chance = r.u8()?;
        let animation_time = r.u16()?;
        let flags = r.u8()?;
        let climates = if version >= 2 {
            Climates(r.u16()?)
        } else {
            Climates::ALL_LAND
        };

        let mut children = Children::new(node);
        let (name, copyright) = children.names()?;
        let count = layouts as usize * size_y as usize * size_x as usize;
        let tiles = children.decode_n(count, "tile")?;

        Ok(Self {
            name,
            copyright,
            building_type,
            level,
            size_x,
            size_y,
            layouts,
            intro,
            retire,
            chance,
            animation_time,
            flags,
            climates,
            tiles,
        })
    }

    fn summary(&self) -> String {
        format!(
            "{} level={} size={}x{} layouts={} climates={} {}-{}",
            self.building_type,
            self.level,
            self.size_x,
            self.size_y,
            self.layouts,
            self.climates,
            format_month_count(self.intro),
            format_month_count(self.retire),
        )
    }
}

/// One tile of one building layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    /// Position in the building's tile order.
    pub index: u16,
    /// Animation phases.
    pub phases: u16,
    /// Back images by height, then phase.
    pub back: ImageList2d,
    pub front: ImageList2d,
}

impl Tile {
    pub fn encode_payload(index: u16, phases: u16) -> Vec<u8> {
        PayloadWriter::new()
            .version(TILE_VERSION)
            .u16(index)
            .u16(phases)
            .finish()
    }
}

impl NodeDecode for Tile {
    const TAG: Tag = Tag::TILE;

    fn decode(node: &Node) -> Result<Self, DecodeError> {
        expect_tag(node, Self::TAG)?;
        let mut r = PayloadReader::new(Self::TAG, &node.payload);
        r.version(1, TILE_VERSION)?;
        let index = r.u16()?;
        let phases = r.u16()?;
        let mut children = Children::new(node);
        let back = children.decode("back images")?;
        let front = children.decode("front images")?;
        Ok(Self {
            index,
            phases,
            back,
            front,
        })
    }

    fn summary(&self) -> String {
        format!("#{} phases={}", self.index, self.phases)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Factory {
    pub placement: Placement,
    pub productivity: u16,
    pub range: u16,
    pub chance: u16,
    pub mapcolor: u8,
    pub pax_level: u16,
    /// The factory's building; it also carries the factory's name.
    pub building: Building,
    pub suppliers: Vec<FactorySupplier>,
    pub products: Vec<FactoryProduct>,
    pub smoke: Option<FactorySmoke>,
}

impl Factory {
    pub fn encode_payload(&self) -> Vec<u8> {
        PayloadWriter::new()
            .version(FACTORY_VERSION)
            .u8(self.placement.as_u8())
            .u16(self.productivity)
            .u16(self.range)
            .u16(self.chance)
            .u8(self.mapcolor)
            .u16(self.pax_level)
            .u16(self.suppliers.len() as u16)
            .u16(self.products.len() as u16)
            .bool(self.smoke.is_some())
            .finish()
    }
}

impl NodeDecode for Factory {
    const TAG: Tag = Tag::FACTORY;

    fn decode(node: &Node) -> Result<Self, DecodeError> {
        expect_tag(node, Self::TAG)?;
        let mut r = PayloadReader::new(Self::TAG, &node.payload);
        r.version(1, FACTORY_VERSION)?;
        let placement = enum_field(Self::TAG, "placement", r.u8()?, Placement::from_u8)?;
        let productivity = r.u16()?;
        let range = r.u16()?;
        let chance = r.u16()?;
        let mapcolor = r.u8()?;
        let pax_level = r.u16()?;
        let supplier_count = r.u16()? as usize;
        let product_count = r.u16()? as usize;
        let has_smoke = r.bool()?;

        let mut children = Children::new(node);
        let building = children.decode("building")?;
        let suppliers = children.decode_n(supplier_count, "supplier")?;
        let products = children.decode_n(product_count, "product")?;
        let smoke = if has_smoke {
            Some(children.decode("smoke")?)
        } else {
            None
        };

        Ok(Self {
            placement,
            productivity,
            range,
            chance,
            mapcolor,
            pax_level,
            building,
            suppliers,
            products,
            smoke,
        })
    }

    fn summary(&self) -> String {
        format!(
            "{} productivity={} range={} suppliers={} products={}{}",
            self.placement,
            self.productivity,
            self.range,
            self.suppliers.len(),
            self.products.len(),
            if self.smoke.is_some() { " smoke" } else { "" }
        )
    }
}

/// Input good of a factory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactorySupplier {
    pub capacity: u16,
    pub supplier_count: u16,
    pub consumption: u16,
    pub good: XRef,
}

impl FactorySupplier {
    pub fn encode_payload(&self) -> Vec<u8> {
        PayloadWriter::new()
            .version(HELPER_VERSION)
            .u16(self.capacity)
            .u16(self.supplier_count)
            .u16(self.consumption)
            .finish()
    }
}

impl NodeDecode for FactorySupplier {
    const TAG: Tag = Tag::FACTORY_SUPPLIER;

    fn decode(node: &Node) -> Result<Self, DecodeError> {
        expect_tag(node, Self::TAG)?;
        let mut r = PayloadReader::new(Self::TAG, &node.payload);
        r.version(1, HELPER_VERSION)?;
        Ok(Self {
            capacity: r.u16()?,
            supplier_count: r.u16()?,
            consumption: r.u16()?,
            good: Children::new(node).decode("good reference")?,
        })
    }

    fn summary(&self) -> String {
        format!(
            "capacity={} suppliers={} consumption={}",
            self.capacity, self.supplier_count, self.consumption
        )
    }
}

/// Output good of a factory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactoryProduct {
    pub capacity: u16,
    pub factor: u16,
    pub good: XRef,
}

impl FactoryProduct {
    pub fn encode_payload(&self) -> Vec<u8> {
        PayloadWriter::new()
            .version(HELPER_VERSION)
            .u16(self.capacity)
            .u16(self.factor)
            .finish()
    }
}

impl NodeDecode for FactoryProduct {
    const TAG: Tag = Tag::FACTORY_PRODUCT;

    fn decode(node: &Node) -> Result<Self, DecodeError> {
        expect_tag(node, Self::TAG)?;
        let mut r = PayloadReader::new(Self::TAG, &node.payload);
        r.version(1, HELPER_VERSION)?;
        Ok(Self {
            capacity: r.u16()?,
            factor: r.u16()?,
            good: Children::new(node).decode("good reference")?,
        })
    }

    fn summary(&self) -> String {
        format!("capacity={} factor={}", self.capacity, self.factor)
    }
}

/// Smoke emitted from one tile of a factory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactorySmoke {
    pub tile: (i16, i16),
    pub offset: (i16, i16),
    pub speed: i16,
    pub smoke: XRef,
}

impl FactorySmoke {
    pub fn encode_payload(&self) -> Vec<u8> {
        PayloadWriter::new()
            .version(HELPER_VERSION)
            .i16(self.tile.0)
            .i16(self.tile.1)
            .i16(self.offset.0)
            .i16(self.offset.1)
            .i16(self.speed)
            .finish()
    }
}

impl NodeDecode for FactorySmoke {
    const TAG: Tag = Tag::FACTORY_SMOKE;

    fn decode(node: &Node) -> Result<Self, DecodeError> {
        expect_tag(node, Self::TAG)?;
        let mut r = PayloadReader::new(Self::TAG, &node.payload);
        r.version(1, HELPER_VERSION)?;
        Ok(Self {
            tile: (r.i16()?, r.i16()?),
            offset: (r.i16()?, r.i16()?),
            speed: r.i16()?,
            smoke: Children::new(node).decode("smoke reference")?,
        })
    }

    fn summary(&self) -> String {
        format!(
            "tile=({}, {}) offset=({}, {}) speed={}",
            self.tile.0, self.tile.1, self.offset.0, self.offset.1, self.speed
        )
    }
}

//! Buildings, their tiles, and factories.
//!
//! Tile images are keyed `backimage[layout][y][x][height][phase]` and
//! `frontimage[...]`; heights and phases are both counted up to the first gap.

use makepak_core::{BuildingType, Climates, Placement, Tag};
use makepak_format::desc::{
    Building, Factory, FactoryProduct, FactorySmoke, FactorySupplier, ImageList2d, Tile,
    building_flags,
};
use makepak_format::tree::Node;

use super::{
    Fields, FromRecord, WriteNode, count_present, first_text, image_list_2d, write_branch,
    write_names,
};
use crate::CompileError;
use crate::session::{CompileSession, NodeWriter};
use crate::sprite::ImageStore;
use crate::tabfile::ValueSource;

const DEFAULT_CHANCE: u8 = 100;
const DEFAULT_ANIMATION_TIME: u16 = 300;
const DEFAULT_PRODUCT_FACTOR: u16 = 256;

/// Building part of a `building` or `factory` record.
fn building_from_record(
    fields: &Fields<'_>,
    images: &mut ImageStore,
    obj: &'static str,
    default_type: BuildingType,
) -> Result<Building, CompileError> {
    let (name, copyright) = fields.names(obj)?;
    let dims = fields.record().get_ints("dims");
    let dim = |index: usize| dims.get(index).copied().unwrap_or(1);
    let size_x: u8 = fields.positive("dims", dim(0))?;
    let size_y: u8 = fields.positive("dims", dim(1))?;
    let layouts: u8 = fields.positive("dims", dim(2))?;
    let tile_count = layouts as usize * size_y as usize * size_x as usize;
    if tile_count > u16::MAX as usize {
        return Err(fields.out_of_range("dims", tile_count as i64));
    }

    let mut flags = 0;
    for (key, bit) in [
        ("noinfo", building_flags::NO_INFO),
        ("noconstruction", building_flags::NO_CONSTRUCTION_PIT),
        ("needs_ground", building_flags::NEEDS_GROUND),
    ] {
        if fields.flag(key) {
            flags |= bit;
        }
    }

    let mut tiles = Vec::with_capacity(tile_count);
    for layout in 0..layouts as usize {
        for y in 0..size_y as usize {
            for x in 0..size_x as usize {
                let index = tiles.len() as u16;
                tiles.push(tile_from_record(images, fields.record(), index, [layout, y, x]));
            }
        }
    }

    let (intro, retire) = fields.dates()?;
    Ok(Building {
        name,
        copyright,
        building_type: fields.enumerated_or("type", default_type, BuildingType::parse)?,
        level: fields.int("level", 1)?,
        size_x,
        size_y,
        layouts,
        intro,
        retire,
        chance: fields.int("chance", DEFAULT_CHANCE)?,
        animation_time: fields.int("animation_time", DEFAULT_ANIMATION_TIME)?,
        flags,
        climates: fields.climates(Climates::ALL_LAND)?,
        tiles,
    })
}

fn tile_from_record(
    images: &mut ImageStore,
    record: &dyn ValueSource,
    index: u16,
    [layout, y, x]: [usize; 3],
) -> Tile {
    let back = image_list_2d(images, record, &format!("backimage[{layout}][{y}][{x}]"));
    let front = image_list_2d(images, record, &format!("frontimage[{layout}][{y}][{x}]"));
    let phases = [&back, &front]
        .into_iter()
        .flat_map(|heights: &ImageList2d| heights.lists.iter().map(|list| list.len()))
        .max()
        .unwrap_or(1)
        .max(1);
    Tile {
        index,
        phases: phases as u16,
        back,
        front,
    }
}

impl FromRecord for Building {
    const TAG: Tag = Tag::BUILDING;
    const NAME: &'static str = "building";

    fn from_record(fields: &Fields<'_>, images: &mut ImageStore) -> Result<Self, CompileError> {
        building_from_record(fields, images, Self::NAME, BuildingType::Any)
    }
}

impl WriteNode for Building {
    fn write(
        &self,
        session: &mut CompileSession<'_>,
        parent: &mut NodeWriter,
    ) -> Result<(), CompileError> {
        write_branch(session, parent, Tag::BUILDING, &self.encode_payload(), |session, node| {
            write_names(session, node, &self.name, &self.copyright)?;
            self.tiles.write(session, node)
        })
    }
}

impl WriteNode for Tile {
    fn write(
        &self,
        session: &mut CompileSession<'_>,
        parent: &mut NodeWriter,
    ) -> Result<(), CompileError> {
        let payload = Tile::encode_payload(self.index, self.phases);
        write_branch(session, parent, Tag::TILE, &payload, |session, node| {
            self.back.write(session, node)?;
            self.front.write(session, node)
        })
    }
}

impl FromRecord for Factory {
    const TAG: Tag = Tag::FACTORY;
    const NAME: &'static str = "factory";

    fn from_record(fields: &Fields<'_>, images: &mut ImageStore) -> Result<Self, CompileError> {
        let building = building_from_record(fields, images, Self::NAME, BuildingType::Factory)?;
        let record = fields.record();

        let supplier_count = count_present(record, |i| format!("inputgood[{i}]"));
        let mut suppliers = Vec::with_capacity(supplier_count);
        for i in 0..supplier_count {
            suppliers.push(FactorySupplier {
                capacity: fields.int(&format!("inputcapacity[{i}]"), 0)?,
                supplier_count: fields.int(&format!("inputsupplier[{i}]"), 1)?,
                consumption: fields.int(&format!("inputfactor[{i}]"), 100)?,
                good: fields.xref(&format!("inputgood[{i}]"), Tag::GOOD, true),
            });
        }

        let product_count = count_present(record, |i| format!("outputgood[{i}]"));
        let mut products = Vec::with_capacity(product_count);
        for i in 0..product_count {
            products.push(FactoryProduct {
                capacity: fields.int(&format!("outputcapacity[{i}]"), 0)?,
                factor: fields.int(&format!("outputfactor[{i}]"), DEFAULT_PRODUCT_FACTOR)?,
                good: fields.xref(&format!("outputgood[{i}]"), Tag::GOOD, true),
            });
        }

        let smoke = if fields.get("smoke").is_empty() {
            None
        } else {
            Some(FactorySmoke {
                tile: fields.koord("smoketile")?,
                offset: fields.koord("smokeoffset")?,
                speed: fields.int("smokespeed", 0)?,
                smoke: fields.xref("smoke", Tag::SMOKE, true),
            })
        };

        Ok(Self {
            placement: fields.enumerated_or("location", Placement::Land, Placement::parse)?,
            productivity: fields.int("productivity", 10)?,
            range: fields.int("range", 0)?,
            chance: fields.int("distributionweight", 1)?,
            mapcolor: fields.int("mapcolor", 0)?,
            pax_level: fields.int("pax_level", 12)?,
            building,
            suppliers,
            products,
            smoke,
        })
    }

    fn node_name(node: &Node) -> Option<String> {
        node.children
            .first()
            .filter(|child| child.tag() == Tag::BUILDING)
            .and_then(first_text)
    }
}

impl WriteNode for Factory {
    fn write(
        &self,
        session: &mut CompileSession<'_>,
        parent: &mut NodeWriter,
    ) -> Result<(), CompileError> {
        write_branch(session, parent, Tag::FACTORY, &self.encode_payload(), |session, node| {
            self.building.write(session, node)?;
            self.suppliers.write(session, node)?;
            self.products.write(session, node)?;
            if let Some(smoke) = &self.smoke {
                smoke.write(session, node)?;
            }
            Ok(())
        })
    }
}

impl WriteNode for FactorySupplier {
    fn write(
        &self,
        session: &mut CompileSession<'_>,
        parent: &mut NodeWriter,
    ) -> Result<(), CompileError> {
        let payload = self.encode_payload();
        write_branch(session, parent, Tag::FACTORY_SUPPLIER, &payload, |session, node| {
            self.good.write(session, node)
        })
    }
}

impl WriteNode for FactoryProduct {
    fn write(
        &self,
        session: &mut CompileSession<'_>,
        parent: &mut NodeWriter,
    ) -> Result<(), CompileError> {
        let payload = self.encode_payload();
        write_branch(session, parent, Tag::FACTORY_PRODUCT, &payload, |session, node| {
            self.good.write(session, node)
        })
    }
}

impl WriteNode for FactorySmoke {
    fn write(
        &self,
        session: &mut CompileSession<'_>,
        parent: &mut NodeWriter,
    ) -> Result<(), CompileError> {
        let payload = self.encode_payload();
        write_branch(session, parent, Tag::FACTORY_SMOKE, &payload, |session, node| {
            self.smoke.write(session, node)
        })
    }
}

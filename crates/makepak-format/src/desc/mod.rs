//! Typed descriptors, one per node type.
//!
//! Each descriptor owns both directions of its payload layout: an
//! `encode_payload` used by the compiler and a [`NodeDecode::decode`] used by
//! the loader. Children (names, image lists, references) are written by the
//! compiler's encoders and read back here in the same fixed order.

mod building;
mod children;
mod good;
mod image;
mod scenery;
mod structures;
mod text;
mod vehicle;
mod way;


use makepak_core::Tag;

use crate::DecodeError;
use crate::tree::Node;

pub use building::{
    BUILDING_VERSION, Building, FACTORY_VERSION, Factory, FactoryProduct, FactorySmoke,
    FactorySupplier, HELPER_VERSION, TILE_VERSION, Tile, building_flags,
};
pub use children::Children;
pub use good::{DEFAULT_WEIGHT_PER_UNIT, GOOD_VERSION, Good};
pub use image::{IMAGE_VERSION, Image, ImageList, ImageList2d, ImageList3d};
pub use scenery::{
    GROUND_VERSION, Ground, SKIN_TAGS, SOUND_VERSION, Skin, Sound, TREE_VERSION, Tree,
};
pub use structures::{
    BRIDGE_VERSION, Bridge, CROSSING_IMAGE_KEYS, CROSSING_VERSION, Crossing, TUNNEL_VERSION,
    Tunnel,
};
pub use text::{Text, XRef};
pub use vehicle::{DEFAULT_GEAR, DEFAULT_LENGTH, VEHICLE_VERSION, Vehicle};
pub use way::{
    ROADSIGN_VERSION, Roadsign, WAY_VERSION, WAYOBJ_VERSION, Way, WayObj, roadsign_flags,
};

/// Decoding of one node type from a node and its subtree.
pub trait NodeDecode: Sized {
    const TAG: Tag;

    fn decode(node: &Node) -> Result<Self, DecodeError>;

    /// One-line rendering of the payload fields for dumps.
    fn summary(&self) -> String;
}

/// Fail unless `node` carries `expected`.
pub(crate) fn expect_tag(node: &Node, expected: Tag) -> Result<(), DecodeError> {
    if node.tag() != expected {
        return Err(DecodeError::UnexpectedTag {
            expected,
            found: node.tag(),
        });
    }
    Ok(())
}

/// Decode an enumerated byte, rejecting values with no variant.
pub(crate) fn enum_field<T>(
    tag: Tag,
    field: &'static str,
    value: u8,
    from_u8: fn(u8) -> Option<T>,
) -> Result<T, DecodeError> {
    from_u8(value).ok_or(DecodeError::InvalidField {
        tag,
        field,
        value: value as u32,
    })
}

/// Type names by tag, as used in `obj=` and in dump/list output.
pub const TYPE_NAMES: &[(Tag, &str)] = &[
    (Tag::ROOT, "root"),
    (Tag::TEXT, "text"),
    (Tag::XREF, "xref"),
    (Tag::IMAGE, "image"),
    (Tag::IMAGE_LIST, "imagelist"),
    (Tag::IMAGE_LIST_2D, "imagelist2d"),
    (Tag::IMAGE_LIST_3D, "imagelist3d"),
    (Tag::BUILDING, "building"),
    (Tag::TILE, "tile"),
    (Tag::VEHICLE, "vehicle"),
    (Tag::WAY, "way"),
    (Tag::WAY_OBJ, "way-object"),
    (Tag::BRIDGE, "bridge"),
    (Tag::TUNNEL, "tunnel"),
    (Tag::CROSSING, "crossing"),
    (Tag::FACTORY, "factory"),
    (Tag::FACTORY_SUPPLIER, "fsupplier"),
    (Tag::FACTORY_PRODUCT, "fproduct"),
    (Tag::FACTORY_SMOKE, "fsmoke"),
    (Tag::GOOD, "good"),
    (Tag::GROUND, "ground"),
    (Tag::ROADSIGN, "roadsign"),
    (Tag::SOUND, "sound"),
    (Tag::TREE, "tree"),
    (Tag::MENU, "menu"),
    (Tag::CURSOR, "cursor"),
    (Tag::SYMBOL, "symbol"),
    (Tag::MISC, "misc"),
    (Tag::SMOKE, "smoke"),
];

pub fn type_name(tag: Tag) -> Option<&'static str> {
    TYPE_NAMES
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, name)| *name)
}

/// A decoded node of any known type.
#[derive(Clone, Debug, PartialEq)]
pub enum Descriptor {
    Text(Text),
    XRef(XRef),
    Image(Image),
    ImageList(ImageList),
    ImageList2d(ImageList2d),
    ImageList3d(ImageList3d),
    Good(Good),
    Building(Building),
    Tile(Tile),
    Factory(Factory),
    FactorySupplier(FactorySupplier),
    FactoryProduct(FactoryProduct),
    FactorySmoke(FactorySmoke),
    Vehicle(Vehicle),
    Way(Way),
    WayObj(WayObj),
    Roadsign(Roadsign),
    Bridge(Bridge),
    Tunnel(Tunnel),
    Crossing(Crossing),
    Ground(Ground),
    Tree(Tree),
    Sound(Sound),
    Skin(Skin),
}

impl Descriptor {
    /// Decode a node by dispatching on its tag.
    pub fn decode(node: &Node) -> Result<Self, DecodeError> {
        let tag = node.tag();
        let desc = match tag {
            Tag::TEXT => Self::Text(Text::decode(node)?),
            Tag::XREF => Self::XRef(XRef::decode(node)?),
            Tag::IMAGE => Self::Image(Image::decode(node)?),
            Tag::IMAGE_LIST => Self::ImageList(ImageList::decode(node)?),
            Tag::IMAGE_LIST_2D => Self::ImageList2d(ImageList2d::decode(node)?),
            Tag::IMAGE_LIST_3D => Self::ImageList3d(ImageList3d::decode(node)?),
            Tag::GOOD => Self::Good(Good::decode(node)?),
            Tag::BUILDING => Self::Building(Building::decode(node)?),
            Tag::TILE => Self::Tile(Tile::decode(node)?),
            Tag::FACTORY => Self::Factory(Factory::decode(node)?),
            Tag::FACTORY_SUPPLIER => Self::FactorySupplier(FactorySupplier::decode(node)?),
            Tag::FACTORY_PRODUCT => Self::FactoryProduct(FactoryProduct::decode(node)?),
            Tag::FACTORY_SMOKE => Self::FactorySmoke(FactorySmoke::decode(node)?),
            Tag::VEHICLE => Self::Vehicle(Vehicle::decode(node)?),
            Tag::WAY => Self::Way(Way::decode(node)?),
            Tag::WAY_OBJ => Self::WayObj(WayObj::decode(node)?),
            Tag::ROADSIGN => Self::Roadsign(Roadsign::decode(node)?),
            Tag::BRIDGE => Self::Bridge(Bridge::decode(node)?),
            Tag::TUNNEL => Self::Tunnel(Tunnel::decode(node)?),
            Tag::CROSSING => Self::Crossing(Crossing::decode(node)?),
            Tag::GROUND => Self::Ground(Ground::decode(node)?),
            Tag::TREE => Self::Tree(Tree::decode(node)?),
            Tag::SOUND => Self::Sound(Sound::decode(node)?),
            t if SKIN_TAGS.contains(&t) => Self::Skin(Skin::decode(node)?),
            _ => return Err(DecodeError::UnknownTag(tag)),
        };
        Ok(desc)
    }

    pub fn summary(&self) -> String {
        match self {
            Self::Text(d) => d.summary(),
            Self::XRef(d) => d.summary(),
            Self::Image(d) => d.summary(),
            Self::ImageList(d) => d.summary(),
            Self::ImageList2d(d) => d.summary(),
            Self::ImageList3d(d) => d.summary(),
            Self::Good(d) => d.summary(),
            Self::Building(d) => d.summary(),
            Self::Tile(d) => d.summary(),
            Self::Factory(d) => d.summary(),
            Self::FactorySupplier(d) => d.summary(),
            Self::FactoryProduct(d) => d.summary(),
            Self::FactorySmoke(d) => d.summary(),
            Self::Vehicle(d) => d.summary(),
            Self::Way(d) => d.summary(),
            Self::WayObj(d) => d.summary(),
            Self::Roadsign(d) => d.summary(),
            Self::Bridge(d) => d.summary(),
            Self::Tunnel(d) => d.summary(),
            Self::Crossing(d) => d.summary(),
            Self::Ground(d) => d.summary(),
            Self::Tree(d) => d.summary(),
            Self::Sound(d) => d.summary(),
            Self::Skin(d) => d.summary(),
        }
    }

    /// Object name, for the named top-level types.
    pub fn name(&self) -> Option<&str> {
        let name = match self {
            Self::Good(d) => &d.name,
            Self::Building(d) => &d.name,
            Self::Factory(d) => &d.building.name,
            Self::Vehicle(d) => &d.name,
            Self::Way(d) => &d.name,
            Self::WayObj(d) => &d.name,
            Self::Roadsign(d) => &d.name,
            Self::Bridge(d) => &d.name,
            Self::Tunnel(d) => &d.name,
            Self::Crossing(d) => &d.name,
            Self::Ground(d) => &d.name,
            Self::Tree(d) => &d.name,
            Self::Sound(d) => &d.name,
            Self::Skin(d) => &d.name,
            _ => return None,
        };
        Some(name)
    }

    /// Every cross-reference held anywhere inside this descriptor.
    pub fn xrefs_mut(&mut self) -> Vec<&mut XRef> {
        match self {
            Self::XRef(x) => vec![x],
            Self::Vehicle(v) => {
                let mut refs = vec![&mut v.freight, &mut v.smoke];
                refs.extend(v.leaders.iter_mut());
                refs.extend(v.trailers.iter_mut());
                refs
            }
            Self::Tunnel(t) => t.way.iter_mut().collect(),
            Self::Factory(f) => {
                let mut refs: Vec<&mut XRef> = Vec::new();
                refs.extend(f.suppliers.iter_mut().map(|s| &mut s.good));
                refs.extend(f.products.iter_mut().map(|p| &mut p.good));
                refs.extend(f.smoke.iter_mut().map(|s| &mut s.smoke));
                refs
            }
            Self::FactorySupplier(s) => vec![&mut s.good],
            Self::FactoryProduct(p) => vec![&mut p.good],
            Self::FactorySmoke(s) => vec![&mut s.smoke],
            _ => Vec::new(),
        }
    }
}

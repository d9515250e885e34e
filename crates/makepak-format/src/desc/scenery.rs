//! Ground textures, trees, sounds and user-interface skins.

use makepak_core::{Climates, Tag};

use super::{Children, ImageList, ImageList2d, NodeDecode, expect_tag};
use crate::tree::Node;
use crate::{DecodeError, PayloadReader, PayloadWriter};

pub const GROUND_VERSION: u16 = 1;
pub const TREE_VERSION: u16 = 1;
pub const SOUND_VERSION: u16 = 1;

/// Tags of the image-only skin types. They share one layout.
pub const SKIN_TAGS: [Tag; 5] = [Tag::MENU, Tag::CURSOR, Tag::SYMBOL, Tag::MISC, Tag::SMOKE];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ground {
    pub name: String,
    pub copyright: String,
    pub images: ImageList2d,
}

impl Ground {
    pub fn encode_payload() -> Vec<u8> {
        PayloadWriter::new().version(GROUND_VERSION).finish()
    }
}

impl NodeDecode for Ground {
    const TAG: Tag = Tag::GROUND;

    fn decode(node: &Node) -> Result<Self, DecodeError> {
        expect_tag(node, Self::TAG)?;
        PayloadReader::new(Self::TAG, &node.payload).version(1, GROUND_VERSION)?;
        let mut children = Children::new(node);
        let (name, copyright) = children.names()?;
        Ok(Self {
            name,
            copyright,
            images: children.decode("images")?,
        })
    }

    fn summary(&self) -> String {
        let count: usize = self.images.lists.iter().map(ImageList::len).sum();
        format!("{count} images")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tree {
    pub name: String,
    pub copyright: String,
    pub climates: Climates,
    pub distribution_weight: u8,
    pub seasons: u8,
    /// Images by age, then season.
    pub images: ImageList2d,
}

impl Tree {
    pub fn encode_payload(&self) -> Vec<u8> {
        PayloadWriter::new()
            .version(TREE_VERSION)
            .u16(self.climates.0)
            .u8(self.distribution_weight)
            .u8(self.seasons)
            .finish()
    }
}

impl NodeDecode for Tree {
    const TAG: Tag = Tag::TREE;

    fn decode(node: &Node) -> Result<Self, DecodeError> {
        expect_tag(node, Self::TAG)?;
        let mut r = PayloadReader::new(Self::TAG, &node.payload);
        r.version(1, TREE_VERSION)?;
        let climates = Climates(r.u16()?);
        let distribution_weight = r.u8()?;
        let seasons = r.u8()?;
        let mut children = Children::new(node);
        let (name, copyright) = children.names()?;
        Ok(Self {
            name,
            copyright,
            climates,
            distribution_weight,
            seasons,
            images: children.decode("images")?,
        })
    }

    fn summary(&self) -> String {
        format!(
            "climates={} weight={} seasons={} ages={}",
            self.climates,
            self.distribution_weight,
            self.seasons,
            self.images.lists.len()
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sound {
    pub name: String,
    pub copyright: String,
    /// Built-in sound number, -1 when `filename` is used.
    pub sound_nr: i16,
    pub filename: String,
}

impl Sound {
    pub fn encode_payload(&self) -> Vec<u8> {
        PayloadWriter::new()
            .version(SOUND_VERSION)
            .i16(self.sound_nr)
            .cstr(&self.filename)
            .finish()
    }
}

impl NodeDecode for Sound {
    const TAG: Tag = Tag::SOUND;

    fn decode(node: &Node) -> Result<Self, DecodeError> {
        expect_tag(node, Self::TAG)?;
        let mut r = PayloadReader::new(Self::TAG, &node.payload);
        r.version(1, SOUND_VERSION)?;
        let sound_nr = r.i16()?;
        let filename = r.cstr()?;
        let (name, copyright) = Children::new(node).names()?;
        Ok(Self {
            name,
            copyright,
            sound_nr,
            filename,
        })
    }

    fn summary(&self) -> String {
        if self.filename.is_empty() {
            format!("nr={}", self.sound_nr)
        } else {
            format!("nr={} file={:?}", self.sound_nr, self.filename)
        }
    }
}

/// Image set for menus, cursors, symbols, miscellaneous graphics or smoke.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Skin {
    /// One of [`SKIN_TAGS`].
    pub tag: Tag,
    pub name: String,
    pub copyright: String,
    pub images: ImageList,
}

impl Skin {
    pub fn decode(node: &Node) -> Result<Self, DecodeError> {
        if !SKIN_TAGS.contains(&node.tag()) {
            return Err(DecodeError::UnexpectedTag {
                expected: Tag::MENU,
                found: node.tag(),
            });
        }
        let mut children = Children::new(node);
        let (name, copyright) = children.names()?;
        Ok(Self {
            tag: node.tag(),
            name,
            copyright,
            images: children.decode("images")?,
        })
    }

    pub fn summary(&self) -> String {
        format!("{} images", self.images.len())
    }
}

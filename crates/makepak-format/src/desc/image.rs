//! Image nodes and the one-, two- and three-level image lists built from them.

use makepak_core::Tag;

use super::{Children, NodeDecode, expect_tag};
use crate::tree::Node;
use crate::{DecodeError, PayloadReader, PayloadWriter};

pub const IMAGE_VERSION: u16 = 1;

/// One encoded sprite. `data` is the run-length stream in 16-bit words.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Image {
    pub x: i16,
    pub y: i16,
    pub w: u16,
    pub h: u16,
    pub zoomable: bool,
    pub data: Vec<u16>,
}

impl Image {
    /// Placeholder written when a source image is missing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    pub fn encode_payload(&self) -> Vec<u8> {
        let mut w = PayloadWriter::new();
        w.version(IMAGE_VERSION)
            .i16(self.x)
            .i16(self.y)
            .u16(self.w)
            .u16(self.h)
            .bool(self.zoomable)
            .u32(self.data.len() as u32);
        for word in &self.data {
            w.u16(*word);
        }
        w.finish()
    }
}

impl NodeDecode for Image {
    const TAG: Tag = Tag::IMAGE;

    fn decode(node: &Node) -> Result<Self, DecodeError> {
        expect_tag(node, Self::TAG)?;
        let mut r = PayloadReader::new(Self::TAG, &node.payload);
        r.version(1, IMAGE_VERSION)?;
        let x = r.i16()?;
        let y = r.i16()?;
        let w = r.u16()?;
        let h = r.u16()?;
        let zoomable = r.bool()?;
        let len = r.u32()? as usize;
        if len * 2 > r.remaining() {
            return Err(DecodeError::Truncated { tag: Self::TAG });
        }
        let data: Vec<u16> = (0..len).map(|_| r.u16()).collect::<Result<_, _>>()?;
        Ok(Self {
            x,
            y,
            w,
            h,
            zoomable,
            data,
        })
    }

    fn summary(&self) -> String {
        if self.is_empty() {
            return "empty".to_string();
        }
        format!(
            "{}x{} at ({}, {}), {} words{}",
            self.w,
            self.h,
            self.x,
            self.y,
            self.data.len(),
            if self.zoomable { ", zoomable" } else { "" }
        )
    }
}

/// Payload of every list level: the entry count.
fn list_payload(count: usize) -> Vec<u8> {
    PayloadWriter::new().u16(count as u16).finish()
}

fn list_count(node: &Node) -> Result<usize, DecodeError> {
    Ok(PayloadReader::new(node.tag(), &node.payload).u16()? as usize)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageList {
    pub images: Vec<Image>,
}

impl ImageList {
    pub fn encode_payload(count: usize) -> Vec<u8> {
        list_payload(count)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl NodeDecode for ImageList {
    const TAG: Tag = Tag::IMAGE_LIST;

    fn decode(node: &Node) -> Result<Self, DecodeError> {
        expect_tag(node, Self::TAG)?;
        let count = list_count(node)?;
        let images = Children::new(node).decode_n(count, "image")?;
        Ok(Self { images })
    }

    fn summary(&self) -> String {
        format!("{} images", self.images.len())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageList2d {
    pub lists: Vec<ImageList>,
}

impl ImageList2d {
    pub fn encode_payload(count: usize) -> Vec<u8> {
        list_payload(count)
    }

    pub fn get(&self, i: usize, j: usize) -> Option<&Image> {
        self.lists.get(i)?.images.get(j)
    }
}

impl NodeDecode for ImageList2d {
    const TAG: Tag = Tag::IMAGE_LIST_2D;

    fn decode(node: &Node) -> Result<Self, DecodeError> {
        expect_tag(node, Self::TAG)?;
        let count = list_count(node)?;
        let lists = Children::new(node).decode_n(count, "image list")?;
        Ok(Self { lists })
    }

    fn summary(&self) -> String {
        format!("{} lists", self.lists.len())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageList3d {
    pub lists: Vec<ImageList2d>,
}

impl ImageList3d {
    pub fn encode_payload(count: usize) -> Vec<u8> {
        list_payload(count)
    }
}

impl NodeDecode for ImageList3d {
    const TAG: Tag = Tag::IMAGE_LIST_3D;

    fn decode(node: &Node) -> Result<Self, DecodeError> {
        expect_tag(node, Self::TAG)?;
        let count = list_count(node)?;
        let lists = Children::new(node).decode_n(count, "2d image list")?;
        Ok(Self { lists })
    }

    fn summary(&self) -> String {
        format!("{} 2d lists", self.lists.len())
    }
}

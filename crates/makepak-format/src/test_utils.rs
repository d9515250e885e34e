//! Hand-assembled node trees for reader tests.

use makepak_core::Tag;

use crate::desc::{Good, Image, ImageList, Text, XRef};
use crate::{FileHeader, NodeHeader};

/// Encode one node with already-encoded children.
pub fn node(tag: Tag, payload: &[u8], children: &[Vec<u8>]) -> Vec<u8> {
    let header = NodeHeader::new(tag, payload.len() as u32, children.len() as u32);
    let mut bytes = header.to_bytes().to_vec();
    bytes.extend_from_slice(payload);
    for child in children {
        bytes.extend_from_slice(child);
    }
    bytes
}

/// A complete file: current header and a root holding `objects`.
pub fn file(objects: &[Vec<u8>]) -> Vec<u8> {
    let mut bytes = FileHeader::default().to_bytes();
    bytes.extend(node(Tag::ROOT, &[], objects));
    bytes
}

pub fn text(s: &str) -> Vec<u8> {
    node(Tag::TEXT, &Text::encode_payload(s), &[])
}

pub fn xref(target: Tag, name: &str, fatal: bool) -> Vec<u8> {
    node(Tag::XREF, &XRef::new(target, name, fatal).encode_payload(), &[])
}

pub fn coal() -> Good {
    Good {
        name: "Coal".to_string(),
        copyright: String::new(),
        value: 1,
        category: 0,
        speed_bonus: 0,
        weight_per_unit: 100,
        color: 0,
    }
}

pub fn good(good: &Good) -> Vec<u8> {
    node(Tag::GOOD, &good.encode_payload(), &[text(&good.name)])
}

/// An IMG1 list of `count` empty images.
pub fn empty_image_list(count: usize) -> Vec<u8> {
    let image = node(Tag::IMAGE, &Image::empty().encode_payload(), &[]);
    let images = vec![image; count];
    node(Tag::IMAGE_LIST, &ImageList::encode_payload(count), &images)
}

//! Node header (12 bytes).
//!
//! - 0-3: type tag
//! - 4-7: payload size in bytes, u32 LE (children not included)
//! - 8-11: number of immediate children, u32 LE

use makepak_core::Tag;

/// Size of an encoded [`NodeHeader`].
pub const NODE_HEADER_SIZE: usize = 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeHeader {
    pub tag: Tag,
    pub payload_size: u32,
    pub child_count: u32,
}

impl NodeHeader {
    pub fn new(tag: Tag, payload_size: u32, child_count: u32) -> Self {
        Self {
            tag,
            payload_size,
            child_count,
        }
    }

    /// Decode from the first 12 bytes of `bytes`, if present.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < NODE_HEADER_SIZE {
            return None;
        }
        Some(Self {
            tag: Tag::from_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            payload_size: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            child_count: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
        })
    }

    pub fn to_bytes(&self) -> [u8; NODE_HEADER_SIZE] {
        let mut bytes = [0u8; NODE_HEADER_SIZE];
        bytes[0..4].copy_from_slice(self.tag.as_bytes());
        bytes[4..8].copy_from_slice(&self.payload_size.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.child_count.to_le_bytes());
        bytes
    }
}

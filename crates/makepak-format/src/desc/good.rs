use makepak_core::Tag;

use super::{Children, NodeDecode, expect_tag};
use crate::tree::Node;
use crate::{DecodeError, PayloadReader, PayloadWriter};

/// v1: value, category, speed bonus. v2 adds weight per unit, v3 the map color.
pub const GOOD_VERSION: u16 = 3;
pub const DEFAULT_WEIGHT_PER_UNIT: u16 = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Good {
    pub name: String,
    pub copyright: String,
    pub value: u16,
    pub category: u8,
    pub speed_bonus: u16,
    pub weight_per_unit: u16,
    pub color: u8,
}

impl Good {
    pub fn encode_payload(&self) -> Vec<u8> {
        PayloadWriter::new()
            .version(GOOD_VERSION)
            .u16(self.value)
            .u8(self.category)
            .u16(self.speed_bonus)
            .u16(self.weight_per_unit)
            .u8(self.color)
            .finish()
    }
}

impl NodeDecode for Good {
    const TAG: Tag = Tag::GOOD;

    fn decode(node: &Node) -> Result<Self, DecodeError> {
        expect_tag(node, Self::TAG)?;
        let mut r = PayloadReader::new(Self::TAG, &node.payload);
        let version = r.version(1, GOOD_VERSION)?;
        let value = r.u16()?;
        let category = r.u8()?;
        let speed_bonus = r.u16()?;
        let weight_per_unit = if version >= 2 {
            r.u16()?
        } else {
            DEFAULT_WEIGHT_PER_UNIT
        };
        let color = if version >= 3 { r.u8()? } else { 0 };

        let (name, copyright) = Children::new(node).names()?;
        Ok(Self {
            name,
            copyright,
            value,
            category,
            speed_bonus,
            weight_per_unit,
            color,
        })
    }

    fn summary(&self) -> String {
        format!(
            "value={} catg={} speed_bonus={} weight={} color={}",
            self.value, self.category, self.speed_bonus, self.weight_per_unit, self.color
        )
    }
}

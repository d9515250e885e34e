//! TEXT and XREF helper nodes. Neither carries a version word.

use makepak_core::Tag;

use super::{NodeDecode, expect_tag};
use crate::objects::ObjId;
use crate::tree::Node;
use crate::{DecodeError, PayloadReader, PayloadWriter};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Text {
    pub text: String,
}

impl Text {
    pub fn encode_payload(text: &str) -> Vec<u8> {
        PayloadWriter::new().cstr(text).finish()
    }
}

impl NodeDecode for Text {
    const TAG: Tag = Tag::TEXT;

    fn decode(node: &Node) -> Result<Self, DecodeError> {
        expect_tag(node, Self::TAG)?;
        let mut r = PayloadReader::new(Self::TAG, &node.payload);
        Ok(Self { text: r.cstr()? })
    }

    fn summary(&self) -> String {
        format!("{:?}", self.text)
    }
}

/// Reference to another object by type and name, resolved at load time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XRef {
    /// Loading fails when a fatal reference cannot be resolved.
    pub fatal: bool,
    pub target: Tag,
    /// Empty means "no target".
    pub name: String,
    pub resolved: Option<ObjId>,
}

impl XRef {
    pub fn new(target: Tag, name: impl Into<String>, fatal: bool) -> Self {
        Self {
            fatal,
            target,
            name: name.into(),
            resolved: None,
        }
    }

    pub fn is_none(&self) -> bool {
        self.name.is_empty()
    }

    pub fn encode_payload(&self) -> Vec<u8> {
        PayloadWriter::new()
            .bool(self.fatal)
            .tag_code(self.target)
            .cstr(&self.name)
            .finish()
    }
}

impl NodeDecode for XRef {
    const TAG: Tag = Tag::XREF;

    fn decode(node: &Node) -> Result<Self, DecodeError> {
        expect_tag(node, Self::TAG)?;
        let mut r = PayloadReader::new(Self::TAG, &node.payload);
        let fatal = r.bool()?;
        let target = r.tag_code()?;
        let name = r.cstr()?;
        Ok(Self::new(target, name, fatal))
    }

    fn summary(&self) -> String {
        let fatal = if self.fatal { " fatal" } else { "" };
        if self.is_none() {
            format!("-> {} -{}", self.target, fatal)
        } else {
            format!("-> {} {:?}{}", self.target, self.name, fatal)
        }
    }
}

//! Ordered walk over a node's children.

use makepak_core::Tag;

use super::NodeDecode;
use crate::DecodeError;
use crate::tree::Node;

/// Cursor consuming a node's children in their written order.
pub struct Children<'a> {
    parent: Tag,
    nodes: &'a [Node],
    pos: usize,
}

impl<'a> Children<'a> {
    pub fn new(node: &'a Node) -> Self {
        Self {
            parent: node.tag(),
            nodes: &node.children,
            pos: 0,
        }
    }

    pub fn peek(&self) -> Option<&'a Node> {
        self.nodes.get(self.pos)
    }

    /// Take the next child, which must carry `tag`.
    pub fn next(&mut self, tag: Tag, what: &'static str) -> Result<&'a Node, DecodeError> {
        let node = self.peek().ok_or(DecodeError::MissingChild {
            tag: self.parent,
            what,
        })?;
        if node.tag() != tag {
            return Err(DecodeError::UnexpectedTag {
                expected: tag,
                found: node.tag(),
            });
        }
        self.pos += 1;
        Ok(node)
    }

    /// Take the next child only if it carries `tag`.
    pub fn next_if(&mut self, tag: Tag) -> Option<&'a Node> {
        let node = self.peek().filter(|n| n.tag() == tag)?;
        self.pos += 1;
        Some(node)
    }

    pub fn text(&mut self, what: &'static str) -> Result<String, DecodeError> {
        let node = self.next(Tag::TEXT, what)?;
        Ok(node.text().unwrap_or_default())
    }

    /// Name and copyright of a named object. The copyright child is only
    /// present when it was set, so its absence yields an empty string.
    pub fn names(&mut self) -> Result<(String, String), DecodeError> {
        let name = self.text("name")?;
        let copyright = match self.next_if(Tag::TEXT) {
            Some(node) => node.text().unwrap_or_default(),
            None => String::new(),
        };
        Ok((name, copyright))
    }

    pub fn decode<T: NodeDecode>(&mut self, what: &'static str) -> Result<T, DecodeError> {
        T::decode(self.next(T::TAG, what)?)
    }

    pub fn decode_if<T: NodeDecode>(&mut self) -> Result<Option<T>, DecodeError> {
        self.next_if(T::TAG).map(T::decode).transpose()
    }

    pub fn decode_n<T: NodeDecode>(
        &mut self,
        count: usize,
        what: &'static str,
    ) -> Result<Vec<T>, DecodeError> {
        (0..count).map(|_| self.decode(what)).collect()
    }

    pub fn remaining(&self) -> usize {
        self.nodes.len() - self.pos
    }
}

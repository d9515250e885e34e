//! Node tree reader.
//!
//! Nodes are laid out pre-order, so a node's whole subtree is one contiguous
//! byte span starting at its header. [`Node::span`] records that span; the
//! merge operation copies subtrees through it without decoding them.

use std::ops::Range;
use std::path::Path;

use makepak_core::Tag;

use crate::FormatError;
use crate::header::FileHeader;
use crate::node::{NODE_HEADER_SIZE, NodeHeader};

/// Deepest nesting accepted by the reader. Real files stay below ten.
pub const MAX_DEPTH: usize = 64;

/// One node read from a file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub header: NodeHeader,
    /// File offset of the node header.
    pub offset: usize,
    pub payload: Vec<u8>,
    pub children: Vec<Node>,
    /// File offset one past the last byte of the subtree.
    pub end: usize,
}

impl Node {
    #[inline]
    pub fn tag(&self) -> Tag {
        self.header.tag
    }

    /// Byte range of the whole subtree, header included.
    pub fn span(&self) -> Range<usize> {
        self.offset..self.end
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    /// Payload interpreted as a NUL-terminated string (TEXT nodes).
    pub fn text(&self) -> Option<String> {
        if self.tag() != Tag::TEXT {
            return None;
        }
        let end = self
            .payload
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.payload.len());
        Some(String::from_utf8_lossy(&self.payload[..end]).into_owned())
    }

    /// Number of nodes in this subtree, this one included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }
}

/// A parsed object file.
#[derive(Clone, Debug)]
pub struct PakFile {
    pub header: FileHeader,
    pub root: Node,
    bytes: Vec<u8>,
}

impl PakFile {
    /// Parse a complete file. Any structural problem is an error.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, FormatError> {
        let (header, root_offset) = FileHeader::parse(&bytes)?;
        let mut reader = TreeReader::new(&bytes, false);
        let root = reader.read_node(root_offset, 0)?;
        if root.tag() != Tag::ROOT {
            return Err(FormatError::NotRoot(root.tag()));
        }
        if root.end != bytes.len() {
            return Err(FormatError::TrailingBytes(bytes.len() - root.end));
        }
        Ok(Self {
            header,
            root,
            bytes,
        })
    }

    /// Parse as much of a file as is well-formed.
    ///
    /// A malformed node ends the sibling list it appears in; everything read
    /// before it is kept and the problem is returned alongside. Only an
    /// unreadable file header or root header is an outright error.
    pub fn from_bytes_lossy(bytes: Vec<u8>) -> Result<(Self, Vec<FormatError>), FormatError> {
        let (header, root_offset) = FileHeader::parse(&bytes)?;
        let mut reader = TreeReader::new(&bytes, true);
        let root = reader.read_node(root_offset, 0)?;
        let mut problems = reader.problems;
        if root.tag() != Tag::ROOT {
            problems.push(FormatError::NotRoot(root.tag()));
        }
        if problems.is_empty() && root.end < bytes.len() {
            problems.push(FormatError::TrailingBytes(bytes.len() - root.end));
        }
        Ok((
            Self {
                header,
                root,
                bytes,
            },
            problems,
        ))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FormatError> {
        Self::from_bytes(std::fs::read(path)?)
    }

    pub fn from_path_lossy(
        path: impl AsRef<Path>,
    ) -> Result<(Self, Vec<FormatError>), FormatError> {
        Self::from_bytes_lossy(std::fs::read(path)?)
    }

    /// Immediate children of the root: the objects of the file.
    pub fn objects(&self) -> &[Node] {
        &self.root.children
    }

    /// Raw bytes of a node's subtree.
    pub fn subtree_bytes(&self, node: &Node) -> &[u8] {
        &self.bytes[node.span()]
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

struct TreeReader<'a> {
    bytes: &'a [u8],
    lossy: bool,
    problems: Vec<FormatError>,
    /// Set after the first problem in lossy mode: sibling offsets past a
    /// malformed node are unknown, so reading stops everywhere.
    halted: bool,
}

impl<'a> TreeReader<'a> {
    fn new(bytes: &'a [u8], lossy: bool) -> Self {
        Self {
            bytes,
            lossy,
            problems: Vec::new(),
            halted: false,
        }
    }

    fn read_node(&mut self, offset: usize, depth: usize) -> Result<Node, FormatError> {
        if depth > MAX_DEPTH {
            return Err(FormatError::TooDeep(MAX_DEPTH));
        }

        let header = self
            .bytes
            .get(offset..)
            .and_then(NodeHeader::from_bytes)
            .ok_or(FormatError::TruncatedNode { offset })?;

        let payload_start = offset + NODE_HEADER_SIZE;
        let payload_end = payload_start
            .checked_add(header.payload_size as usize)
            .filter(|&end| end <= self.bytes.len())
            .ok_or(FormatError::PayloadOutOfBounds {
                tag: header.tag,
                offset,
                size: header.payload_size,
            })?;

        let mut node = Node {
            header,
            offset,
            payload: self.bytes[payload_start..payload_end].to_vec(),
            children: Vec::new(),
            end: payload_end,
        };

        for _ in 0..header.child_count {
            if self.halted {
                break;
            }
            match self.read_node(node.end, depth + 1) {
                Ok(child) => {
                    node.end = child.end;
                    node.children.push(child);
                }
                Err(err) if self.lossy => {
                    self.problems.push(err);
                    self.halted = true;
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        Ok(node)
    }
}

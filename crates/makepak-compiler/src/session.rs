//! Node tree writer.
//!
//! Offsets are handed out top-down: opening a node reserves its header and
//! payload at the session's next free offset, so every child opened later
//! lands after its parent's payload. Headers are written bottom-up: a node's
//! header is only known once all of its children have committed, so
//! [`NodeWriter::commit`] seeks back and writes it last.

use std::io::{self, Read, Seek, SeekFrom, Write};

use byteorder::{LittleEndian, WriteBytesExt};
use makepak_core::Tag;
use makepak_format::{FileHeader, NODE_HEADER_SIZE};

use crate::CompileError;
use crate::sprite::ImageStore;

/// Seekable output stream of one compiled file.
pub trait Sink: Write + Seek {}

impl<T: Write + Seek + ?Sized> Sink for T {}

/// State of one output file while it is being written.
pub struct CompileSession<'a> {
    out: &'a mut dyn Sink,
    next_free_offset: u64,
    open_nodes: usize,
    images: &'a mut ImageStore,
}

impl<'a> CompileSession<'a> {
    /// Start a file by writing the current file header.
    pub fn new(out: &'a mut dyn Sink, images: &'a mut ImageStore) -> Result<Self, CompileError> {
        let header_len = FileHeader::default().write_to(&mut *out)?;
        Ok(Self {
            out,
            next_free_offset: header_len,
            open_nodes: 0,
            images,
        })
    }

    /// Absolute offset the next opened node will start at.
    pub fn offset(&self) -> u64 {
        self.next_free_offset
    }

    pub fn open_nodes(&self) -> usize {
        self.open_nodes
    }

    pub fn images(&mut self) -> &mut ImageStore {
        &mut *self.images
    }

    /// Reserve room for a node with a `payload_size` byte payload.
    pub fn open_node(&mut self, tag: Tag, payload_size: usize) -> Result<NodeWriter, CompileError> {
        let size = u32::try_from(payload_size)
            .map_err(|_| CompileError::PayloadTooLarge { tag, size: payload_size })?;
        let header_pos = self.next_free_offset;
        self.next_free_offset += NODE_HEADER_SIZE as u64 + u64::from(size);
        self.open_nodes += 1;
        Ok(NodeWriter {
            tag,
            header_pos,
            payload_size: size,
            child_count: 0,
        })
    }

    /// Write a childless node in one step.
    pub fn write_leaf(
        &mut self,
        parent: &mut NodeWriter,
        tag: Tag,
        payload: &[u8],
    ) -> Result<(), CompileError> {
        let node = self.open_node(tag, payload.len())?;
        node.write_all(self, payload)?;
        node.commit(self, parent)
    }

    /// Append an already encoded subtree as the next child of `parent`.
    ///
    /// Node trees carry no absolute offsets, so a subtree read from another
    /// file can be placed anywhere unchanged.
    pub fn copy_subtree(&mut self, parent: &mut NodeWriter, raw: &[u8]) -> Result<(), CompileError> {
        self.out.seek(SeekFrom::Start(self.next_free_offset))?;
        self.out.write_all(raw)?;
        self.next_free_offset += raw.len() as u64;
        parent.child_count += 1;
        Ok(())
    }

    /// Check that every node was committed and leave the stream positioned
    /// at the end of the tree.
    pub fn finish(self) -> Result<u64, CompileError> {
        if self.open_nodes != 0 {
            return Err(CompileError::UnfinishedNodes(self.open_nodes));
        }
        let end = self.out.seek(SeekFrom::End(0))?;
        if end < self.next_free_offset {
            // a trailing payload that was reserved but never written
            io::copy(
                &mut io::repeat(0).take(self.next_free_offset - end),
                &mut *self.out,
            )?;
        }
        self.out.seek(SeekFrom::Start(self.next_free_offset))?;
        self.out.flush()?;
        Ok(self.next_free_offset)
    }

    fn write_header(&mut self, node: &NodeWriter) -> Result<(), CompileError> {
        self.out.seek(SeekFrom::Start(node.header_pos))?;
        self.out.write_all(node.tag.as_bytes())?;
        self.out.write_u32::<LittleEndian>(node.payload_size)?;
        self.out.write_u32::<LittleEndian>(node.child_count)?;
        self.open_nodes -= 1;
        Ok(())
    }
}

/// An open node: its region is reserved, its header is not yet written.
#[derive(Debug)]
#[must_use = "an open node must be committed"]
pub struct NodeWriter {
    tag: Tag,
    header_pos: u64,
    payload_size: u32,
    child_count: u32,
}

impl NodeWriter {
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Absolute offset of the node's header.
    pub fn header_pos(&self) -> u64 {
        self.header_pos
    }

    pub fn payload_size(&self) -> u32 {
        self.payload_size
    }

    /// Children committed so far.
    pub fn child_count(&self) -> u32 {
        self.child_count
    }

    /// Write `data` at `offset` within the payload.
    pub fn write_at(
        &self,
        session: &mut CompileSession<'_>,
        offset: usize,
        data: &[u8],
    ) -> Result<(), CompileError> {
        let fits = offset
            .checked_add(data.len())
            .is_some_and(|end| end <= self.payload_size as usize);
        if !fits {
            return Err(CompileError::PayloadOverflow {
                tag: self.tag,
                offset,
                len: data.len(),
                size: self.payload_size,
            });
        }
        let pos = self.header_pos + NODE_HEADER_SIZE as u64 + offset as u64;
        session.out.seek(SeekFrom::Start(pos))?;
        session.out.write_all(data)?;
        Ok(())
    }

    pub fn write_all(&self, session: &mut CompileSession<'_>, data: &[u8]) -> Result<(), CompileError> {
        self.write_at(session, 0, data)
    }

    /// Write the final header and count this node as a child of `parent`.
    /// Every child of this node must have committed already.
    pub fn commit(
        self,
        session: &mut CompileSession<'_>,
        parent: &mut NodeWriter,
    ) -> Result<(), CompileError> {
        session.write_header(&self)?;
        parent.child_count += 1;
        Ok(())
    }

    /// Commit the root node, which has no parent.
    pub fn commit_root(self, session: &mut CompileSession<'_>) -> Result<(), CompileError> {
        session.write_header(&self)
    }
}

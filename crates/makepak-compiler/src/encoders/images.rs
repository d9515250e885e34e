//! Image nodes and image lists.
//!
//! Lists have no count key in text records. Their length is found by reading
//! `key[0]`, `key[1]`, ... until the first absent value.

use makepak_core::Tag;
use makepak_format::desc::{Image, ImageList, ImageList2d, ImageList3d};

use super::{WriteNode, write_branch};
use crate::CompileError;
use crate::session::{CompileSession, NodeWriter};
use crate::sprite::ImageStore;
use crate::tabfile::ValueSource;

/// Number of consecutive present keys `key(0)`, `key(1)`, ...
pub fn count_present(record: &dyn ValueSource, key: impl Fn(usize) -> String) -> usize {
    (0..)
        .take_while(|&index| !record.get(&key(index)).is_empty())
        .count()
}

/// List with one entry per key, in order. Absent keys give empty images.
pub fn image_list<I>(images: &mut ImageStore, record: &dyn ValueSource, keys: I) -> ImageList
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let loaded = keys
        .into_iter()
        .map(|key| images.load(record.get(key.as_ref()), record.source_dir()))
        .collect();
    ImageList { images: loaded }
}

/// List of `prefix[0]`, `prefix[1]`, ... up to the first absent key.
pub fn counted_image_list(
    images: &mut ImageStore,
    record: &dyn ValueSource,
    prefix: &str,
) -> ImageList {
    let count = count_present(record, |i| format!("{prefix}[{i}]"));
    image_list(images, record, (0..count).map(|i| format!("{prefix}[{i}]")))
}

/// Two-level list of `prefix[i][j]`, both levels counted up to the first gap.
pub fn image_list_2d(
    images: &mut ImageStore,
    record: &dyn ValueSource,
    prefix: &str,
) -> ImageList2d {
    let rows = count_present(record, |i| format!("{prefix}[{i}][0]"));
    let lists = (0..rows)
        .map(|i| counted_image_list(images, record, &format!("{prefix}[{i}]")))
        .collect();
    ImageList2d { lists }
}

impl WriteNode for Image {
    fn write(
        &self,
        session: &mut CompileSession<'_>,
        parent: &mut NodeWriter,
    ) -> Result<(), CompileError> {
        session.write_leaf(parent, Tag::IMAGE, &self.encode_payload())
    }
}

impl WriteNode for ImageList {
    fn write(
        &self,
        session: &mut CompileSession<'_>,
        parent: &mut NodeWriter,
    ) -> Result<(), CompileError> {
        let payload = ImageList::encode_payload(self.images.len());
        write_branch(session, parent, Tag::IMAGE_LIST, &payload, |session, node| {
            self.images.write(session, node)
        })
    }
}

impl WriteNode for ImageList2d {
    fn write(
        &self,
        session: &mut CompileSession<'_>,
        parent: &mut NodeWriter,
    ) -> Result<(), CompileError> {
        let payload = ImageList2d::encode_payload(self.lists.len());
        write_branch(session, parent, Tag::IMAGE_LIST_2D, &payload, |session, node| {
            self.lists.write(session, node)
        })
    }
}

impl WriteNode for ImageList3d {
    fn write(
        &self,
        session: &mut CompileSession<'_>,
        parent: &mut NodeWriter,
    ) -> Result<(), CompileError> {
        let payload = ImageList3d::encode_payload(self.lists.len());
        write_branch(session, parent, Tag::IMAGE_LIST_3D, &payload, |session, node| {
            self.lists.write(session, node)
        })
    }
}

use std::io::Cursor;

use makepak_core::Tag;
use makepak_format::{FileHeader, NODE_HEADER_SIZE, PakFile};

use crate::session::CompileSession;
use crate::sprite::ImageStore;
use crate::{CompileConfig, CompileError};

fn store() -> ImageStore {
    ImageStore::new(&CompileConfig::default())
}

#[test]
fn first_node_starts_after_file_header() {
    let mut out = Cursor::new(Vec::new());
    let mut images = store();
    let session = CompileSession::new(&mut out, &mut images).unwrap();

    assert_eq!(session.offset(), FileHeader::default().encoded_len() as u64);
}

#[test]
fn offsets_advance_by_header_and_payload() {
    let mut out = Cursor::new(Vec::new());
    let mut images = store();
    let mut session = CompileSession::new(&mut out, &mut images).unwrap();
    let start = session.offset();

    let mut root = session.open_node(Tag::ROOT, 0).unwrap();
    assert_eq!(root.header_pos(), start);
    let child = session.open_node(Tag::TEXT, 5).unwrap();
    assert_eq!(child.header_pos(), start + NODE_HEADER_SIZE as u64);
    assert_eq!(session.offset(), start + 2 * NODE_HEADER_SIZE as u64 + 5);
    assert_eq!(session.open_nodes(), 2);

    child.write_all(&mut session, b"Coal\0").unwrap();
    child.commit(&mut session, &mut root).unwrap();
    assert_eq!(root.child_count(), 1);
    root.commit_root(&mut session).unwrap();
    assert_eq!(session.open_nodes(), 0);

    let end = session.finish().unwrap();
    assert_eq!(end, out.get_ref().len() as u64);
}

#[test]
fn headers_are_written_on_commit() {
    let mut out = Cursor::new(Vec::new());
    let mut images = store();
    {
        let mut session = CompileSession::new(&mut out, &mut images).unwrap();
        let mut root = session.open_node(Tag::ROOT, 0).unwrap();
        let mut good = session.open_node(Tag::GOOD, 2).unwrap();
        session.write_leaf(&mut good, Tag::TEXT, b"A\0").unwrap();
        session.write_leaf(&mut good, Tag::TEXT, b"B\0").unwrap();
        good.write_all(&mut session, &[0x01, 0x80]).unwrap();
        good.commit(&mut session, &mut root).unwrap();
        root.commit_root(&mut session).unwrap();
        session.finish().unwrap();
    }

    let file = PakFile::from_bytes(out.into_inner()).unwrap();
    let good = &file.objects()[0];
    assert_eq!(good.tag(), Tag::GOOD);
    assert_eq!(good.payload, [0x01, 0x80]);
    assert_eq!(good.children.len(), 2);
    assert_eq!(good.children[1].text().as_deref(), Some("B"));
}

#[test]
fn writes_past_the_payload_are_rejected() {
    let mut out = Cursor::new(Vec::new());
    let mut images = store();
    let mut session = CompileSession::new(&mut out, &mut images).unwrap();
    let node = session.open_node(Tag::GOOD, 4).unwrap();

    node.write_at(&mut session, 2, &[1, 2]).unwrap();
    let err = node.write_at(&mut session, 3, &[1, 2]).unwrap_err();
    assert!(matches!(
        err,
        CompileError::PayloadOverflow {
            offset: 3,
            len: 2,
            size: 4,
            ..
        }
    ));
    let err = node.write_at(&mut session, usize::MAX, &[1]).unwrap_err();
    assert!(matches!(err, CompileError::PayloadOverflow { .. }));
}

#[test]
fn finishing_with_open_nodes_fails() {
    let mut out = Cursor::new(Vec::new());
    let mut images = store();
    let mut session = CompileSession::new(&mut out, &mut images).unwrap();
    let _root = session.open_node(Tag::ROOT, 0).unwrap();

    let err = session.finish().unwrap_err();
    assert!(matches!(err, CompileError::UnfinishedNodes(1)));
}

#[test]
fn unwritten_payload_is_zero_filled() {
    let mut out = Cursor::new(Vec::new());
    let mut images = store();
    {
        let mut session = CompileSession::new(&mut out, &mut images).unwrap();
        let mut root = session.open_node(Tag::ROOT, 0).unwrap();
        let good = session.open_node(Tag::GOOD, 3).unwrap();
        good.commit(&mut session, &mut root).unwrap();
        root.commit_root(&mut session).unwrap();
        session.finish().unwrap();
    }

    let file = PakFile::from_bytes(out.into_inner()).unwrap();
    assert_eq!(file.objects()[0].payload, [0, 0, 0]);
}

#[test]
fn copied_subtrees_count_as_children() {
    let mut source = Cursor::new(Vec::new());
    let mut images = store();
    {
        let mut session = CompileSession::new(&mut source, &mut images).unwrap();
        let mut root = session.open_node(Tag::ROOT, 0).unwrap();
        let mut good = session.open_node(Tag::GOOD, 0).unwrap();
        session.write_leaf(&mut good, Tag::TEXT, b"Coal\0").unwrap();
        good.commit(&mut session, &mut root).unwrap();
        root.commit_root(&mut session).unwrap();
        session.finish().unwrap();
    }
    let source = PakFile::from_bytes(source.into_inner()).unwrap();
    let raw = source.subtree_bytes(&source.objects()[0]);

    let mut out = Cursor::new(Vec::new());
    {
        let mut session = CompileSession::new(&mut out, &mut images).unwrap();
        let mut root = session.open_node(Tag::ROOT, 0).unwrap();
        session.copy_subtree(&mut root, raw).unwrap();
        session.copy_subtree(&mut root, raw).unwrap();
        assert_eq!(root.child_count(), 2);
        root.commit_root(&mut session).unwrap();
        session.finish().unwrap();
    }

    let merged = PakFile::from_bytes(out.into_inner()).unwrap();
    assert_eq!(merged.objects().len(), 2);
    assert_eq!(merged.objects()[1].children[0].text().as_deref(), Some("Coal"));
}

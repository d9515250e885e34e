//! Compile text records in memory and read the result back.

use std::io::Cursor;
use std::path::Path;

use makepak_format::tree::Node;
use makepak_format::{Descriptor, PakFile};

use crate::{CompileConfig, CompileError, CompileStats, Compiler, tabfile};

/// Compile `text` into an in-memory file. Image paths resolve against `dir`.
pub fn try_compile_in(
    dir: Option<&Path>,
    text: &str,
) -> Result<(Vec<u8>, CompileStats), CompileError> {
    let records = tabfile::parse(text, dir);
    let mut compiler = Compiler::new(CompileConfig::default());
    let mut out = Cursor::new(Vec::new());
    let stats = compiler.compile_records(&mut out, &records)?;
    Ok((out.into_inner(), stats))
}

pub fn try_compile(text: &str) -> Result<(Vec<u8>, CompileStats), CompileError> {
    try_compile_in(None, text)
}

/// Compile `text` and load the result strictly.
pub fn compile(text: &str) -> PakFile {
    let (bytes, _) = try_compile(text).unwrap();
    PakFile::from_bytes(bytes).unwrap()
}

/// Compile a single record and decode the object it produced.
pub fn compile_one(text: &str) -> Descriptor {
    decode_single(compile(text))
}

pub fn compile_one_in(dir: &Path, text: &str) -> Descriptor {
    let (bytes, _) = try_compile_in(Some(dir), text).unwrap();
    decode_single(PakFile::from_bytes(bytes).unwrap())
}

fn decode_single(file: PakFile) -> Descriptor {
    assert_eq!(file.objects().len(), 1, "expected exactly one object");
    Descriptor::decode(&file.objects()[0]).unwrap()
}

/// Tags of a node's direct children.
pub fn child_tags(node: &Node) -> Vec<String> {
    node.children
        .iter()
        .map(|child| child.tag().to_string())
        .collect()
}

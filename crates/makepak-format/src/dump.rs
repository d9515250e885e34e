//! Human-readable dump of an object file for diagnostics.

use std::fmt::Write as _;

use makepak_core::{Colors, Tag};

use crate::FormatError;
use crate::desc::{Descriptor, type_name};
use crate::tree::{Node, PakFile};

/// Render the header and the node tree, one line per node, indented by
/// depth. Problems found by a lossy read are listed at the end.
pub fn dump(file: &PakFile, problems: &[FormatError], colors: Colors) -> String {
    let c = &colors;
    let mut out = String::new();

    writeln!(out, "{}[header]{}", c.blue, c.reset).unwrap();
    writeln!(out, "compiler {}{}{}", c.green, file.header.compiler, c.reset).unwrap();
    writeln!(out, "version  {}", file.header.version_code).unwrap();
    out.push('\n');

    writeln!(out, "{}[nodes]{}", c.blue, c.reset).unwrap();
    dump_node(&mut out, &file.root, 0, c);

    if !problems.is_empty() {
        out.push('\n');
        writeln!(out, "{}[problems]{}", c.blue, c.reset).unwrap();
        for problem in problems {
            writeln!(out, "{}{problem}{}", c.yellow, c.reset).unwrap();
        }
    }

    out
}

fn dump_node(out: &mut String, node: &Node, depth: usize, c: &Colors) {
    let indent = "  ".repeat(depth);
    let tag = node.tag();
    let size = node.header.payload_size;

    write!(out, "{indent}").unwrap();
    if type_name(tag).is_some() {
        write!(out, "{}{tag}{}", c.blue, c.reset).unwrap();
    } else {
        write!(out, "{}(unknown {}){}", c.yellow, tag.display_name(), c.reset).unwrap();
    }
    write!(out, " {}{size} bytes{}", c.dim, c.reset).unwrap();

    if tag == Tag::ROOT {
        write!(out, "  {} objects", node.children.len()).unwrap();
    } else if type_name(tag).is_some() {
        match Descriptor::decode(node) {
            Ok(Descriptor::Text(text)) => {
                write!(out, "  {}{:?}{}", c.green, text.text, c.reset).unwrap()
            }
            Ok(desc) => write!(out, "  {}", desc.summary()).unwrap(),
            Err(err) => write!(out, "  {}error: {err}{}", c.yellow, c.reset).unwrap(),
        }
    }
    out.push('\n');

    for child in &node.children {
        dump_node(out, child, depth + 1, c);
    }
}

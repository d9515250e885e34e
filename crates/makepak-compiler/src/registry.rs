//! Table of node types, by `obj=` name and by tag.
//!
//! Named types can appear as the `obj` of a text record. Helper types
//! (text, references, images, tiles, factory parts) are only written by
//! their owners but are still known by tag, so files can be walked and
//! labelled generically.

use std::collections::HashMap;

use makepak_core::Tag;
use makepak_format::desc::{
    Bridge, Building, Crossing, Factory, Good, Ground, Roadsign, SKIN_TAGS, Sound, TYPE_NAMES,
    Tree, Tunnel, Vehicle, Way, WayObj, type_name,
};
use makepak_format::tree::Node;
use tracing::{debug, warn};

use crate::CompileError;
use crate::encoders::{Helper, Named, ObjWriter, SkinWriter};
use crate::session::{CompileSession, NodeWriter};
use crate::tabfile::ValueSource;

#[derive(Default)]
pub struct Registry {
    writers: Vec<Box<dyn ObjWriter>>,
    by_name: HashMap<String, usize>,
    by_tag: HashMap<Tag, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every type this compiler knows.
    pub fn standard() -> Self {
        let mut registry = Self::new();

        registry.register(Box::new(Named::<Good>::new()), true);
        registry.register(Box::new(Named::<Building>::new()), true);
        registry.register(Box::new(Named::<Factory>::new()), true);
        registry.register(Box::new(Named::<Vehicle>::new()), true);
        registry.register(Box::new(Named::<Way>::new()), true);
        registry.register(Box::new(Named::<WayObj>::new()), true);
        registry.register(Box::new(Named::<Roadsign>::new()), true);
        registry.register(Box::new(Named::<Bridge>::new()), true);
        registry.register(Box::new(Named::<Tunnel>::new()), true);
        registry.register(Box::new(Named::<Crossing>::new()), true);
        registry.register(Box::new(Named::<Ground>::new()), true);
        registry.register(Box::new(Named::<Tree>::new()), true);
        registry.register(Box::new(Named::<Sound>::new()), true);

        for tag in SKIN_TAGS {
            if let Some(name) = type_name(tag) {
                registry.register(Box::new(SkinWriter { tag, name }), true);
            }
        }

        // Every other known tag is a helper.
        for &(tag, name) in TYPE_NAMES {
            if registry.by_tag(tag).is_none() {
                registry.register(Box::new(Helper { tag, name }), false);
            }
        }

        registry
    }

    /// Add a type. Every type is indexed by tag; `named` types are also
    /// indexed by their (case-insensitive) type name. A later registration
    /// replaces an earlier one with the same tag or name.
    pub fn register(&mut self, writer: Box<dyn ObjWriter>, named: bool) {
        let index = self.writers.len();
        self.by_tag.insert(writer.tag(), index);
        if named {
            self.by_name
                .insert(writer.type_name().to_ascii_lowercase(), index);
        }
        self.writers.push(writer);
    }

    pub fn by_name(&self, name: &str) -> Option<&dyn ObjWriter> {
        let index = *self.by_name.get(&name.trim().to_ascii_lowercase())?;
        Some(self.writers[index].as_ref())
    }

    pub fn by_tag(&self, tag: Tag) -> Option<&dyn ObjWriter> {
        let index = *self.by_tag.get(&tag)?;
        Some(self.writers[index].as_ref())
    }

    /// Names accepted as `obj=`, sorted.
    pub fn named_types(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self
            .by_name
            .values()
            .map(|&index| self.writers[index].type_name())
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Type name of a tag, or `(unknown XXXX)` for tags this compiler does
    /// not know, such as ones written by a newer version.
    pub fn label(&self, tag: Tag) -> String {
        match self.by_tag(tag) {
            Some(writer) => writer.type_name().to_string(),
            None => format!("(unknown {tag})"),
        }
    }

    /// Object name of a written node, if its type knows where to find it.
    pub fn node_name(&self, node: &Node) -> Option<String> {
        self.by_tag(node.tag())?.node_name(node)
    }

    /// Compile one record under `parent`.
    ///
    /// Records without `obj` or with an unknown `obj` are skipped with a
    /// warning and `Ok(false)`; encoder errors are returned.
    pub fn dispatch(
        &self,
        session: &mut CompileSession<'_>,
        parent: &mut NodeWriter,
        record: &dyn ValueSource,
    ) -> Result<bool, CompileError> {
        let obj = record.get("obj");
        let name = record.get("name");
        if obj.is_empty() {
            warn!("skipping record '{}' without obj=", name);
            return Ok(false);
        }
        let Some(writer) = self.by_name(obj) else {
            warn!("skipping '{}': unknown object type '{}'", name, obj);
            return Ok(false);
        };
        debug!("writing {} '{}'", writer.type_name(), name);
        writer.write_obj(session, parent, record)?;
        Ok(true)
    }
}

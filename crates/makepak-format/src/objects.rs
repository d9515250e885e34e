//! Loaded objects and cross-reference resolution.
//!
//! Objects are the immediate children of a file's root. They are decoded
//! into [`Descriptor`]s first; references between them are resolved in a
//! second pass, once every object of every loaded file is known.

use std::collections::HashMap;

use makepak_core::Tag;

use crate::desc::Descriptor;
use crate::tree::PakFile;
use crate::{DecodeError, LoadError};

/// Index of an object in an [`ObjectTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjId(pub u32);

#[derive(Clone, Debug, PartialEq)]
pub struct Object {
    pub id: ObjId,
    pub tag: Tag,
    pub name: String,
    pub desc: Descriptor,
}

/// An object that failed to decode and was left out of the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedObject {
    /// Position among the root's children.
    pub index: usize,
    pub tag: Tag,
    pub error: DecodeError,
}

#[derive(Debug, Default)]
pub struct ObjectTable {
    objects: Vec<Object>,
    by_key: HashMap<(Tag, String), ObjId>,
    skipped: Vec<SkippedObject>,
}

impl ObjectTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode every object of one file.
    pub fn load(file: &PakFile) -> Self {
        let mut table = Self::new();
        table.add_file(file);
        table
    }

    /// Decode and add the objects of another file. An object with the same
    /// type and name as an earlier one shadows it for resolution.
    pub fn add_file(&mut self, file: &PakFile) {
        for (index, node) in file.objects().iter().enumerate() {
            let desc = match Descriptor::decode(node) {
                Ok(desc) => desc,
                Err(error) => {
                    self.skipped.push(SkippedObject {
                        index,
                        tag: node.tag(),
                        error,
                    });
                    continue;
                }
            };
            let id = ObjId(self.objects.len() as u32);
            let name = desc.name().unwrap_or_default().to_string();
            self.by_key.insert((node.tag(), name.clone()), id);
            self.objects.push(Object {
                id,
                tag: node.tag(),
                name,
                desc,
            });
        }
    }

    /// Point every reference at its target.
    ///
    /// References with an empty name stay unset. A missing target leaves a
    /// non-fatal reference unset and fails the whole load for a fatal one.
    pub fn resolve(&mut self) -> Result<(), LoadError> {
        let by_key = &self.by_key;
        for object in &mut self.objects {
            let from = object.name.clone();
            for xref in object.desc.xrefs_mut() {
                if xref.is_none() {
                    continue;
                }
                xref.resolved = by_key.get(&(xref.target, xref.name.clone())).copied();
                if xref.resolved.is_none() && xref.fatal {
                    return Err(LoadError::UnresolvedReference {
                        from,
                        target: xref.target,
                        name: xref.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, id: ObjId) -> Option<&Object> {
        self.objects.get(id.0 as usize)
    }

    pub fn find(&self, tag: Tag, name: &str) -> Option<&Object> {
        let id = self.by_key.get(&(tag, name.to_string()))?;
        self.get(*id)
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn skipped(&self) -> &[SkippedObject] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

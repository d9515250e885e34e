//! Per-type encoders.
//!
//! Every type is compiled in two steps: a text record is turned into the
//! type's descriptor (with images already encoded), then the descriptor is
//! written as a node subtree. This module holds:
//! - `ObjWriter` - the registry's view of one node type
//! - `WriteNode` / `FromRecord` - the two steps, per descriptor type
//! - `Fields` - typed, range-checked access to one record
//! - helpers for names, references and image lists

mod building;
mod good;
mod images;
mod scenery;
mod structures;
mod vehicle;
mod way;


use std::marker::PhantomData;

use makepak_core::date::{DEFAULT_INTRO_DATE, DEFAULT_RETIRE_DATE};
use makepak_core::{Climates, Tag, UnknownValue};
use makepak_format::desc::{Text, XRef};
use makepak_format::tree::Node;

pub use images::{count_present, counted_image_list, image_list, image_list_2d};
pub use scenery::SkinWriter;

use crate::CompileError;
use crate::session::{CompileSession, NodeWriter};
use crate::sprite::ImageStore;
use crate::tabfile::{ValueSource, parse_int};

/// One node type as seen by the registry.
pub trait ObjWriter {
    fn tag(&self) -> Tag;

    fn type_name(&self) -> &'static str;

    /// Compile one text record as a child of `parent`. Helper types are only
    /// ever written by their owners and refuse this.
    fn write_obj(
        &self,
        session: &mut CompileSession<'_>,
        parent: &mut NodeWriter,
        record: &dyn ValueSource,
    ) -> Result<(), CompileError> {
        let _ = (session, parent, record);
        Err(CompileError::NotTopLevel(self.type_name()))
    }

    /// Object name of an already written node, read without decoding the
    /// payload. By convention the first child holds the name.
    fn node_name(&self, node: &Node) -> Option<String> {
        first_text(node)
    }
}

pub(crate) fn first_text(node: &Node) -> Option<String> {
    node.children
        .first()
        .filter(|child| child.tag() == Tag::TEXT)
        .and_then(Node::text)
}

/// Writing a descriptor as a node subtree under `parent`.
pub trait WriteNode {
    fn write(&self, session: &mut CompileSession<'_>, parent: &mut NodeWriter)
    -> Result<(), CompileError>;
}

/// Building a named type's descriptor from a text record.
pub trait FromRecord: WriteNode + Sized {
    const TAG: Tag;
    /// The `obj=` value selecting this type.
    const NAME: &'static str;

    fn from_record(fields: &Fields<'_>, images: &mut ImageStore) -> Result<Self, CompileError>;

    fn node_name(node: &Node) -> Option<String> {
        first_text(node)
    }
}

/// Registry entry of a named type.
pub struct Named<T>(PhantomData<fn() -> T>);

impl<T> Named<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Named<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FromRecord> ObjWriter for Named<T> {
    fn tag(&self) -> Tag {
        T::TAG
    }

    fn type_name(&self) -> &'static str {
        T::NAME
    }

    fn write_obj(
        &self,
        session: &mut CompileSession<'_>,
        parent: &mut NodeWriter,
        record: &dyn ValueSource,
    ) -> Result<(), CompileError> {
        let fields = Fields::new(record);
        let desc = T::from_record(&fields, session.images())?;
        desc.write(session, parent)
    }

    fn node_name(&self, node: &Node) -> Option<String> {
        T::node_name(node)
    }
}

/// Registry entry of a helper type, known by tag only.
pub struct Helper {
    pub tag: Tag,
    pub name: &'static str,
}

impl ObjWriter for Helper {
    fn tag(&self) -> Tag {
        self.tag
    }

    fn type_name(&self) -> &'static str {
        self.name
    }
}

/// Typed access to one record, reporting bad values against the object.
pub struct Fields<'r> {
    record: &'r dyn ValueSource,
    object: String,
}

impl<'r> Fields<'r> {
    pub fn new(record: &'r dyn ValueSource) -> Self {
        let object = match record.get("name") {
            "" => format!("<unnamed {}>", record.get("obj")),
            name => name.to_string(),
        };
        Self { record, object }
    }

    pub fn record(&self) -> &'r dyn ValueSource {
        self.record
    }

    pub fn get(&self, key: &str) -> &'r str {
        self.record.get(key)
    }

    /// Name of the object, or the display name used in errors.
    pub fn object(&self) -> &str {
        &self.object
    }

    /// Name and copyright. A named object without a name is an error.
    pub fn names(&self, obj: &'static str) -> Result<(String, String), CompileError> {
        let name = self.get("name");
        if name.is_empty() {
            return Err(CompileError::MissingName { obj });
        }
        Ok((name.to_string(), self.get("copyright").to_string()))
    }

    /// Integer field of type `T`; absent or malformed values give `default`,
    /// values that do not fit are an error.
    pub fn int<T>(&self, key: &str, default: T) -> Result<T, CompileError>
    where
        T: TryFrom<i64>,
    {
        match parse_int(self.get(key)) {
            None => Ok(default),
            Some(value) => T::try_from(value).map_err(|_| self.out_of_range(key, value)),
        }
    }

    /// A value checked to lie in `1..`.
    pub fn positive<T>(&self, key: &str, value: i64) -> Result<T, CompileError>
    where
        T: TryFrom<i64>,
    {
        if value < 1 {
            return Err(self.out_of_range(key, value));
        }
        T::try_from(value).map_err(|_| self.out_of_range(key, value))
    }

    /// Pair such as `smoketile=1,0`; absent values give `(0, 0)`.
    pub fn koord(&self, key: &str) -> Result<(i16, i16), CompileError> {
        let (x, y) = self.record.get_koord(key, (0, 0));
        let part = |v: i64| i16::try_from(v).map_err(|_| self.out_of_range(key, v));
        Ok((part(x)?, part(y)?))
    }

    pub fn flag(&self, key: &str) -> bool {
        parse_int(self.get(key)).is_some_and(|v| v != 0)
    }

    /// Enumerated field. The value must be present and recognized.
    pub fn enumerated<T>(
        &self,
        key: &str,
        parse: fn(&str) -> Result<T, UnknownValue>,
    ) -> Result<T, CompileError> {
        parse(self.get(key)).map_err(|source| self.unknown(source))
    }

    /// Enumerated field falling back to `default` when absent.
    pub fn enumerated_or<T>(
        &self,
        key: &str,
        default: T,
        parse: fn(&str) -> Result<T, UnknownValue>,
    ) -> Result<T, CompileError> {
        if self.get(key).trim().is_empty() {
            return Ok(default);
        }
        self.enumerated(key, parse)
    }

    pub fn climates(&self, default: Climates) -> Result<Climates, CompileError> {
        Climates::parse(self.get("climates"), default).map_err(|source| self.unknown(source))
    }

    /// Introduction and retirement dates.
    pub fn dates(&self) -> Result<(u16, u16), CompileError> {
        Ok((
            self.month("intro", DEFAULT_INTRO_DATE)?,
            self.month("retire", DEFAULT_RETIRE_DATE)?,
        ))
    }

    fn month(&self, prefix: &str, default: u16) -> Result<u16, CompileError> {
        if let Some(count) = self.record.get_month(prefix, default) {
            return Ok(count);
        }
        let month_key = format!("{prefix}_month");
        match parse_int(self.get(&month_key)) {
            Some(month) if !(1..=12).contains(&month) => Err(self.out_of_range(&month_key, month)),
            _ => {
                let year_key = format!("{prefix}_year");
                let year = parse_int(self.get(&year_key)).unwrap_or_default();
                Err(self.out_of_range(&year_key, year))
            }
        }
    }

    /// Reference to the object named by `key`; empty when the key is absent.
    pub fn xref(&self, key: &str, target: Tag, fatal: bool) -> XRef {
        XRef::new(target, self.get(key), fatal)
    }

    fn unknown(&self, source: UnknownValue) -> CompileError {
        CompileError::UnknownValue {
            object: self.object.clone(),
            source,
        }
    }

    pub(crate) fn out_of_range(&self, key: &str, value: i64) -> CompileError {
        CompileError::ValueOutOfRange {
            object: self.object.clone(),
            key: key.to_string(),
            value,
        }
    }
}

pub fn write_text(
    session: &mut CompileSession<'_>,
    parent: &mut NodeWriter,
    text: &str,
) -> Result<(), CompileError> {
    session.write_leaf(parent, Tag::TEXT, &Text::encode_payload(text))
}

/// Name text, then the copyright text when there is one.
pub fn write_names(
    session: &mut CompileSession<'_>,
    parent: &mut NodeWriter,
    name: &str,
    copyright: &str,
) -> Result<(), CompileError> {
    write_text(session, parent, name)?;
    if !copyright.is_empty() {
        write_text(session, parent, copyright)?;
    }
    Ok(())
}

/// Open a node, let `children` write its subtree, then write the payload
/// and commit.
pub fn write_branch(
    session: &mut CompileSession<'_>,
    parent: &mut NodeWriter,
    tag: Tag,
    payload: &[u8],
    children: impl FnOnce(&mut CompileSession<'_>, &mut NodeWriter) -> Result<(), CompileError>,
) -> Result<(), CompileError> {
    let mut node = session.open_node(tag, payload.len())?;
    children(session, &mut node)?;
    node.write_all(session, payload)?;
    node.commit(session, parent)
}

impl WriteNode for XRef {
    fn write(
        &self,
        session: &mut CompileSession<'_>,
        parent: &mut NodeWriter,
    ) -> Result<(), CompileError> {
        session.write_leaf(parent, Tag::XREF, &self.encode_payload())
    }
}

impl<T: WriteNode> WriteNode for [T] {
    fn write(
        &self,
        session: &mut CompileSession<'_>,
        parent: &mut NodeWriter,
    ) -> Result<(), CompileError> {
        self.iter().try_for_each(|item| item.write(session, parent))
    }
}

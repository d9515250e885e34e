use makepak_core::Tag;
use makepak_format::desc::{DEFAULT_WEIGHT_PER_UNIT, Good};

use super::{Fields, FromRecord, WriteNode, write_branch, write_names};
use crate::CompileError;
use crate::session::{CompileSession, NodeWriter};
use crate::sprite::ImageStore;

impl FromRecord for Good {
    const TAG: Tag = Tag::GOOD;
    const NAME: &'static str = "good";

    fn from_record(fields: &Fields<'_>, _images: &mut ImageStore) -> Result<Self, CompileError> {
        let (name, copyright) = fields.names(Self::NAME)?;
        Ok(Self {
            name,
            copyright,
            value: fields.int("value", 0)?,
            category: fields.int("catg", 0)?,
            speed_bonus: fields.int("speed_bonus", 0)?,
            weight_per_unit: fields.int("weight_per_unit", DEFAULT_WEIGHT_PER_UNIT)?,
            color: fields.int("mapcolor", 0)?,
        })
    }
}

impl WriteNode for Good {
    fn write(
        &self,
        session: &mut CompileSession<'_>,
        parent: &mut NodeWriter,
    ) -> Result<(), CompileError> {
        write_branch(session, parent, Tag::GOOD, &self.encode_payload(), |session, node| {
            write_names(session, node, &self.name, &self.copyright)
        })
    }
}

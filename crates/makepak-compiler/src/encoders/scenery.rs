use makepak_core::{Climates, Tag};
use makepak_format::desc::{Ground, Skin, Sound, Tree};

use super::{
    Fields, FromRecord, ObjWriter, WriteNode, counted_image_list, image_list_2d, write_branch,
    write_names,
};
use crate::CompileError;
use crate::session::{CompileSession, NodeWriter};
use crate::sprite::ImageStore;
use crate::tabfile::ValueSource;

impl FromRecord for Ground {
    const TAG: Tag = Tag::GROUND;
    const NAME: &'static str = "ground";

    fn from_record(fields: &Fields<'_>, images: &mut ImageStore) -> Result<Self, CompileError> {
        let (name, copyright) = fields.names(Self::NAME)?;
        Ok(Self {
            name,
            copyright,
            images: image_list_2d(images, fields.record(), "image"),
        })
    }
}

impl WriteNode for Ground {
    fn write(
        &self,
        session: &mut CompileSession<'_>,
        parent: &mut NodeWriter,
    ) -> Result<(), CompileError> {
        write_branch(session, parent, Tag::GROUND, &Ground::encode_payload(), |session, node| {
            write_names(session, node, &self.name, &self.copyright)?;
            self.images.write(session, node)
        })
    }
}

impl FromRecord for Tree {
    const TAG: Tag = Tag::TREE;
    const NAME: &'static str = "tree";

    fn from_record(fields: &Fields<'_>, images: &mut ImageStore) -> Result<Self, CompileError> {
        let (name, copyright) = fields.names(Self::NAME)?;
        Ok(Self {
            name,
            copyright,
            climates: fields.climates(Climates::ALL_LAND)?,
            distribution_weight: fields.int("distributionweight", 3)?,
            seasons: fields.int("seasons", 1)?,
            images: image_list_2d(images, fields.record(), "image"),
        })
    }
}

impl WriteNode for Tree {
    fn write(
        &self,
        session: &mut CompileSession<'_>,
        parent: &mut NodeWriter,
    ) -> Result<(), CompileError> {
        write_branch(session, parent, Tag::TREE, &self.encode_payload(), |session, node| {
            write_names(session, node, &self.name, &self.copyright)?;
            self.images.write(session, node)
        })
    }
}

impl FromRecord for Sound {
    const TAG: Tag = Tag::SOUND;
    const NAME: &'static str = "sound";

    fn from_record(fields: &Fields<'_>, _images: &mut ImageStore) -> Result<Self, CompileError> {
        let (name, copyright) = fields.names(Self::NAME)?;
        Ok(Self {
            name,
            copyright,
            sound_nr: fields.int("sound_nr", -1)?,
            filename: fields.get("file").to_string(),
        })
    }
}

impl WriteNode for Sound {
    fn write(
        &self,
        session: &mut CompileSession<'_>,
        parent: &mut NodeWriter,
    ) -> Result<(), CompileError> {
        write_branch(session, parent, Tag::SOUND, &self.encode_payload(), |session, node| {
            write_names(session, node, &self.name, &self.copyright)
        })
    }
}

impl WriteNode for Skin {
    fn write(
        &self,
        session: &mut CompileSession<'_>,
        parent: &mut NodeWriter,
    ) -> Result<(), CompileError> {
        write_branch(session, parent, self.tag, &[], |session, node| {
            write_names(session, node, &self.name, &self.copyright)?;
            self.images.write(session, node)
        })
    }
}

/// Registry entry of one image-only skin type. The five skin types share a
/// layout and differ only in tag and name.
pub struct SkinWriter {
    pub tag: Tag,
    pub name: &'static str,
}

impl ObjWriter for SkinWriter {
    fn tag(&self) -> Tag {
        self.tag
    }

    fn type_name(&self) -> &'static str {
        self.name
    }

    fn write_obj(
        &self,
        session: &mut CompileSession<'_>,
        parent: &mut NodeWriter,
        record: &dyn ValueSource,
    ) -> Result<(), CompileError> {
        let fields = Fields::new(record);
        let (name, copyright) = fields.names(self.name)?;
        let images = counted_image_list(session.images(), record, "image");
        let skin = Skin {
            tag: self.tag,
            name,
            copyright,
            images,
        };
        skin.write(session, parent)
    }
}

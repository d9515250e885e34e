//! Bridges, tunnels and level crossings.

use makepak_core::ribi::{BRIDGE_PARTS, COMPASS_DIRS};
use makepak_core::{Tag, WayType};
use makepak_format::desc::{Bridge, CROSSING_IMAGE_KEYS, Crossing, Tunnel};

use super::way::cursor_images;
use super::{Fields, FromRecord, WriteNode, counted_image_list, image_list, write_branch, write_names};
use crate::CompileError;
use crate::session::{CompileSession, NodeWriter};
use crate::sprite::ImageStore;

const DEFAULT_AXLE_LOAD: u16 = 9999;

impl FromRecord for Bridge {
    const TAG: Tag = Tag::BRIDGE;
    const NAME: &'static str = "bridge";

    fn from_record(fields: &Fields<'_>, images: &mut ImageStore) -> Result<Self, CompileError> {
        let (name, copyright) = fields.names(Self::NAME)?;
        let record = fields.record();
        let (intro, retire) = fields.dates()?;
        Ok(Self {
            name,
            copyright,
            topspeed: fields.int("topspeed", 0)?,
            price: fields.int("cost", 0)?,
            maintenance: fields.int("maintenance", 0)?,
            waytype: fields.enumerated("waytype", WayType::parse)?,
            pillars_every: fields.int("pillar_distance", 0)?,
            pillars_asymmetric: fields.flag("pillar_asymmetric"),
            max_length: fields.int("max_length", 0)?,
            max_height: fields.int("max_height", 0)?,
            axle_load: fields.int("axle_load", DEFAULT_AXLE_LOAD)?,
            intro,
            retire,
            back: image_list(images, record, BRIDGE_PARTS.iter().map(|p| format!("back{p}"))),
            front: image_list(images, record, BRIDGE_PARTS.iter().map(|p| format!("front{p}"))),
            cursor: cursor_images(images, record),
        })
    }
}

impl WriteNode for Bridge {
    fn write(
        &self,
        session: &mut CompileSession<'_>,
        parent: &mut NodeWriter,
    ) -> Result<(), CompileError> {
        write_branch(session, parent, Tag::BRIDGE, &self.encode_payload(), |session, node| {
            write_names(session, node, &self.name, &self.copyright)?;
            self.back.write(session, node)?;
            self.front.write(session, node)?;
            self.cursor.write(session, node)
        })
    }
}

impl FromRecord for Tunnel {
    const TAG: Tag = Tag::TUNNEL;
    const NAME: &'static str = "tunnel";

    fn from_record(fields: &Fields<'_>, images: &mut ImageStore) -> Result<Self, CompileError> {
        let (name, copyright) = fields.names(Self::NAME)?;
        let record = fields.record();
        let (intro, retire) = fields.dates()?;
        let way = (!fields.get("way").is_empty()).then(|| fields.xref("way", Tag::WAY, false));
        Ok(Self {
            name,
            copyright,
            topspeed: fields.int("topspeed", 0)?,
            price: fields.int("cost", 0)?,
            maintenance: fields.int("maintenance", 0)?,
            waytype: fields.enumerated("waytype", WayType::parse)?,
            axle_load: fields.int("axle_load", DEFAULT_AXLE_LOAD)?,
            intro,
            retire,
            back: image_list(
                images,
                record,
                COMPASS_DIRS.iter().map(|dir| format!("backimage[{dir}]")),
            ),
            front: image_list(
                images,
                record,
                COMPASS_DIRS.iter().map(|dir| format!("frontimage[{dir}]")),
            ),
            cursor: cursor_images(images, record),
            way,
        })
    }
}

impl WriteNode for Tunnel {
    fn write(
        &self,
        session: &mut CompileSession<'_>,
        parent: &mut NodeWriter,
    ) -> Result<(), CompileError> {
        write_branch(session, parent, Tag::TUNNEL, &self.encode_payload(), |session, node| {
            write_names(session, node, &self.name, &self.copyright)?;
            self.back.write(session, node)?;
            self.front.write(session, node)?;
            self.cursor.write(session, node)?;
            if let Some(way) = &self.way {
                way.write(session, node)?;
            }
            Ok(())
        })
    }
}

impl FromRecord for Crossing {
    const TAG: Tag = Tag::CROSSING;
    const NAME: &'static str = "crossing";

    fn from_record(fields: &Fields<'_>, images: &mut ImageStore) -> Result<Self, CompileError> {
        let (name, copyright) = fields.names(Self::NAME)?;
        let record = fields.record();
        let (intro, retire) = fields.dates()?;
        let lists = CROSSING_IMAGE_KEYS
            .iter()
            .map(|key| counted_image_list(images, record, key))
            .collect();
        Ok(Self {
            name,
            copyright,
            waytypes: (
                fields.enumerated("waytype[0]", WayType::parse)?,
                fields.enumerated("waytype[1]", WayType::parse)?,
            ),
            speeds: (fields.int("speed[0]", 0)?, fields.int("speed[1]", 0)?),
            open_time: fields.int("animation_time_open", 0)?,
            closed_time: fields.int("animation_time_closed", 0)?,
            sound: fields.int("sound", -1)?,
            intro,
            retire,
            images: lists,
        })
    }
}

impl WriteNode for Crossing {
    fn write(
        &self,
        session: &mut CompileSession<'_>,
        parent: &mut NodeWriter,
    ) -> Result<(), CompileError> {
        write_branch(session, parent, Tag::CROSSING, &self.encode_payload(), |session, node| {
            write_names(session, node, &self.name, &self.copyright)?;
            self.images.write(session, node)
        })
    }
}

//! Ways, way objects and road signs.
//!
//! Ribi, slope and diagonal images are keyed by code and written in the
//! fixed order of the direction tables, since the reader indexes them by
//! position.

use makepak_core::ribi::{DIAGONAL_CODES, RIBI_CODES, SLOPE_CODES};
use makepak_core::{Tag, WayType};
use makepak_format::desc::{ImageList, Roadsign, Way, WayObj, roadsign_flags};

use super::{Fields, FromRecord, WriteNode, counted_image_list, image_list, write_branch, write_names};
use crate::CompileError;
use crate::session::{CompileSession, NodeWriter};
use crate::sprite::ImageStore;
use crate::tabfile::ValueSource;

const DEFAULT_MAX_WEIGHT: u32 = 999;

/// Images keyed `<prefix>[<code>]` for every code, in table order.
fn coded_images(
    images: &mut ImageStore,
    record: &dyn ValueSource,
    prefix: &str,
    codes: &[&str],
) -> ImageList {
    image_list(images, record, codes.iter().map(|code| format!("{prefix}[{code}]")))
}

/// Build menu cursor and icon.
pub(crate) fn cursor_images(images: &mut ImageStore, record: &dyn ValueSource) -> ImageList {
    image_list(images, record, ["cursor", "icon"])
}

impl FromRecord for Way {
    const TAG: Tag = Tag::WAY;
    const NAME: &'static str = "way";

    fn from_record(fields: &Fields<'_>, images: &mut ImageStore) -> Result<Self, CompileError> {
        let (name, copyright) = fields.names(Self::NAME)?;
        let record = fields.record();
        let (intro, retire) = fields.dates()?;
        Ok(Self {
            name,
            copyright,
            price: fields.int("cost", 0)?,
            maintenance: fields.int("maintenance", 0)?,
            topspeed: fields.int("topspeed", 0)?,
            max_weight: fields.int("max_weight", DEFAULT_MAX_WEIGHT)?,
            intro,
            retire,
            waytype: fields.enumerated("waytype", WayType::parse)?,
            system_type: fields.int("system_type", 0)?,
            draw_as_obj: fields.flag("draw_as_obj"),
            ribi_images: coded_images(images, record, "image", &RIBI_CODES),
            slope_images: coded_images(images, record, "imageup", &SLOPE_CODES),
            diagonal_images: coded_images(images, record, "diagonal", &DIAGONAL_CODES),
            cursor: cursor_images(images, record),
        })
    }
}

impl WriteNode for Way {
    fn write(
        &self,
        session: &mut CompileSession<'_>,
        parent: &mut NodeWriter,
    ) -> Result<(), CompileError> {
        write_branch(session, parent, Tag::WAY, &self.encode_payload(), |session, node| {
            write_names(session, node, &self.name, &self.copyright)?;
            self.ribi_images.write(session, node)?;
            self.slope_images.write(session, node)?;
            self.diagonal_images.write(session, node)?;
            self.cursor.write(session, node)
        })
    }
}

impl FromRecord for WayObj {
    const TAG: Tag = Tag::WAY_OBJ;
    const NAME: &'static str = "way-object";

    fn from_record(fields: &Fields<'_>, images: &mut ImageStore) -> Result<Self, CompileError> {
        let (name, copyright) = fields.names(Self::NAME)?;
        let record = fields.record();
        let (intro, retire) = fields.dates()?;
        Ok(Self {
            name,
            copyright,
            price: fields.int("cost", 0)?,
            maintenance: fields.int("maintenance", 0)?,
            topspeed: fields.int("topspeed", 0)?,
            intro,
            retire,
            waytype: fields.enumerated("waytype", WayType::parse)?,
            own_waytype: fields.enumerated_or(
                "own_waytype",
                WayType::Overheadlines,
                WayType::parse,
            )?,
            front_ribi: coded_images(images, record, "frontimage", &RIBI_CODES),
            back_ribi: coded_images(images, record, "backimage", &RIBI_CODES),
            front_slopes: coded_images(images, record, "frontimageup", &SLOPE_CODES),
            back_slopes: coded_images(images, record, "backimageup", &SLOPE_CODES),
            front_diagonals: coded_images(images, record, "frontdiagonal", &DIAGONAL_CODES),
            back_diagonals: coded_images(images, record, "backdiagonal", &DIAGONAL_CODES),
            cursor: cursor_images(images, record),
        })
    }
}

impl WriteNode for WayObj {
    fn write(
        &self,
        session: &mut CompileSession<'_>,
        parent: &mut NodeWriter,
    ) -> Result<(), CompileError> {
        write_branch(session, parent, Tag::WAY_OBJ, &self.encode_payload(), |session, node| {
            write_names(session, node, &self.name, &self.copyright)?;
            for list in [
                &self.front_ribi,
                &self.back_ribi,
                &self.front_slopes,
                &self.back_slopes,
                &self.front_diagonals,
                &self.back_diagonals,
                &self.cursor,
            ] {
                list.write(session, node)?;
            }
            Ok(())
        })
    }
}

impl FromRecord for Roadsign {
    const TAG: Tag = Tag::ROADSIGN;
    const NAME: &'static str = "roadsign";

    fn from_record(fields: &Fields<'_>, images: &mut ImageStore) -> Result<Self, CompileError> {
        let (name, copyright) = fields.names(Self::NAME)?;
        let record = fields.record();
        let flags = roadsign_flags::KEYS
            .iter()
            .filter(|(key, _)| fields.flag(key))
            .fold(0u8, |flags, (_, bit)| flags | *bit);
        let (intro, retire) = fields.dates()?;
        Ok(Self {
            name,
            copyright,
            min_speed: fields.int("min_speed", 0)?,
            price: fields.int("cost", 0)?,
            flags,
            offset_left: fields.int("offset_left", 0)?,
            waytype: fields.enumerated_or("waytype", WayType::Road, WayType::parse)?,
            intro,
            retire,
            images: counted_image_list(images, record, "image"),
            cursor: cursor_images(images, record),
        })
    }
}

impl WriteNode for Roadsign {
    fn write(
        &self,
        session: &mut CompileSession<'_>,
        parent: &mut NodeWriter,
    ) -> Result<(), CompileError> {
        write_branch(session, parent, Tag::ROADSIGN, &self.encode_payload(), |session, node| {
            write_names(session, node, &self.name, &self.copyright)?;
            self.images.write(session, node)?;
            self.cursor.write(session, node)
        })
    }
}

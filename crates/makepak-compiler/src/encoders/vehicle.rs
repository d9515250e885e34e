use makepak_core::ribi::VEHICLE_DIRS;
use makepak_core::{EngineType, Tag, WayType};
use makepak_format::desc::{DEFAULT_GEAR, DEFAULT_LENGTH, Vehicle, XRef};

use super::{Fields, FromRecord, WriteNode, count_present, image_list, write_branch, write_names};
use crate::CompileError;
use crate::session::{CompileSession, NodeWriter};
use crate::sprite::ImageStore;

/// Vehicles allowed before (`prev`) or after (`next`) this one in a convoy.
/// `none` stands for "may be the first/last vehicle" and is kept as an
/// empty reference.
fn constraints(fields: &Fields<'_>, side: &str) -> Result<Vec<XRef>, CompileError> {
    let key = |i: usize| format!("constraint[{side}][{i}]");
    let count = count_present(fields.record(), &key);
    let refs: Vec<XRef> = (0..count)
        .map(|i| {
            let name = fields.get(&key(i));
            let name = if name.eq_ignore_ascii_case("none") { "" } else { name };
            XRef::new(Tag::VEHICLE, name, false)
        })
        .collect();
    if refs.len() > u8::MAX as usize {
        return Err(fields.out_of_range(&format!("constraint[{side}]"), refs.len() as i64));
    }
    Ok(refs)
}

impl FromRecord for Vehicle {
    const TAG: Tag = Tag::VEHICLE;
    const NAME: &'static str = "vehicle";

    fn from_record(fields: &Fields<'_>, images: &mut ImageStore) -> Result<Self, CompileError> {
        let (name, copyright) = fields.names(Self::NAME)?;
        let record = fields.record();
        let (intro, retire) = fields.dates()?;

        let empty_images = image_list(
            images,
            record,
            VEHICLE_DIRS.iter().map(|dir| format!("emptyimage[{dir}]")),
        );
        let freight_images = image_list(
            images,
            record,
            VEHICLE_DIRS.iter().map(|dir| format!("freightimage[{dir}]")),
        );

        Ok(Self {
            name,
            copyright,
            waytype: fields.enumerated("waytype", WayType::parse)?,
            engine: fields.enumerated_or("engine_type", EngineType::Diesel, EngineType::parse)?,
            capacity: fields.int("payload", 0)?,
            price: fields.int("cost", 0)?,
            speed: fields.int("speed", 0)?,
            weight: fields.int("weight", 0)?,
            power: fields.int("power", 0)?,
            running_cost: fields.int("runningcost", 0)?,
            gear: fields.int("gear", DEFAULT_GEAR)?,
            length: fields.int("length", DEFAULT_LENGTH)?,
            sound: fields.int("sound", -1)?,
            intro,
            retire,
            empty_images,
            freight_images,
            freight: fields.xref("freight", Tag::GOOD, true),
            smoke: fields.xref("smoke", Tag::SMOKE, false),
            leaders: constraints(fields, "prev")?,
            trailers: constraints(fields, "next")?,
        })
    }
}

impl WriteNode for Vehicle {
    fn write(
        &self,
        session: &mut CompileSession<'_>,
        parent: &mut NodeWriter,
    ) -> Result<(), CompileError> {
        write_branch(session, parent, Tag::VEHICLE, &self.encode_payload(), |session, node| {
            write_names(session, node, &self.name, &self.copyright)?;
            self.empty_images.write(session, node)?;
            self.freight_images.write(session, node)?;
            self.freight.write(session, node)?;
            self.smoke.write(session, node)?;
            self.leaders.write(session, node)?;
            self.trailers.write(session, node)
        })
    }
}

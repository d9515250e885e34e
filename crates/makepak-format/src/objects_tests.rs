use makepak_core::Tag;

use crate::desc::{Descriptor, FactoryProduct, XRef};
use crate::test_utils::{coal, empty_image_list, file, good, node, text, xref};
use crate::{LoadError, ObjId, ObjectTable, PakFile, PayloadWriter};

fn product(good_name: &str) -> Vec<u8> {
    let product = FactoryProduct {
        capacity: 10,
        factor: 256,
        good: XRef::new(Tag::GOOD, good_name, true),
    };
    node(
        Tag::FACTORY_PRODUCT,
        &product.encode_payload(),
        &[xref(Tag::GOOD, good_name, true)],
    )
}

fn optional_smoke(name: &str) -> Vec<u8> {
    node(
        Tag::FACTORY_SMOKE,
        &PayloadWriter::new()
            .version(1)
            .i16(0)
            .i16(0)
            .i16(0)
            .i16(0)
            .i16(1)
            .finish(),
        &[xref(Tag::SMOKE, name, false)],
    )
}

fn load(objects: &[Vec<u8>]) -> ObjectTable {
    let pak = PakFile::from_bytes(file(objects)).unwrap();
    ObjectTable::load(&pak)
}

#[test]
fn loads_named_objects() {
    let table = load(&[good(&coal()), text("loose")]);

    assert_eq!(table.len(), 2);
    let coal = table.find(Tag::GOOD, "Coal").unwrap();
    assert_eq!(coal.id, ObjId(0));
    assert_eq!(coal.name, "Coal");
    assert!(matches!(coal.desc, Descriptor::Good(_)));
}

#[test]
fn undecodable_objects_are_skipped() {
    let broken = node(Tag::GOOD, &[0x01], &[]);
    let table = load(&[broken, good(&coal())]);

    assert_eq!(table.len(), 1);
    assert_eq!(table.skipped().len(), 1);
    assert_eq!(table.skipped()[0].index, 0);
    assert_eq!(table.skipped()[0].tag, Tag::GOOD);
    assert!(table.find(Tag::GOOD, "Coal").is_some());
}

#[test]
fn resolves_fatal_reference() {
    let mut table = load(&[good(&coal()), product("Coal")]);

    table.resolve().unwrap();

    let Descriptor::FactoryProduct(p) = &table.objects()[1].desc else {
        panic!("expected a product");
    };
    assert_eq!(p.good.resolved, Some(ObjId(0)));
}

#[test]
fn missing_fatal_reference_fails() {
    let mut table = load(&[product("Iron")]);

    let err = table.resolve().unwrap_err();

    let LoadError::UnresolvedReference { target, name, .. } = err else {
        panic!("expected an unresolved reference");
    };
    assert_eq!(target, Tag::GOOD);
    assert_eq!(name, "Iron");
}

#[test]
fn missing_optional_reference_stays_unset() {
    let mut table = load(&[optional_smoke("Steam")]);

    table.resolve().unwrap();

    let Descriptor::FactorySmoke(s) = &table.objects()[0].desc else {
        panic!("expected smoke");
    };
    assert_eq!(s.smoke.resolved, None);
}

#[test]
fn empty_reference_name_means_none() {
    let mut table = load(&[product("")]);
    table.resolve().unwrap();
}

#[test]
fn reference_must_match_type() {
    // A menu named "Coal" does not satisfy a GOOD reference.
    let skin = node(Tag::MENU, &[], &[text("Coal"), empty_image_list(0)]);
    let mut table = load(&[skin, product("Coal")]);

    assert!(table.resolve().is_err());
}

#[test]
fn later_files_shadow_earlier_objects() {
    let first = PakFile::from_bytes(file(&[good(&coal())])).unwrap();
    let mut richer = coal();
    richer.value = 9;
    let second = PakFile::from_bytes(file(&[good(&richer), product("Coal")])).unwrap();

    let mut table = ObjectTable::load(&first);
    table.add_file(&second);
    table.resolve().unwrap();

    assert_eq!(table.len(), 3);
    assert_eq!(table.find(Tag::GOOD, "Coal").map(|o| o.id), Some(ObjId(1)));
}

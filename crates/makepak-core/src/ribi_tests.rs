use crate::ribi::{BRIDGE_PARTS, COMPASS_DIRS, DIAGONAL_CODES, RIBI_CODES, VEHICLE_DIRS};

fn mask(code: &str) -> usize {
    code.chars()
        .map(|c| match c {
            'n' => 1,
            'e' => 2,
            's' => 4,
            'w' => 8,
            _ => 0,
        })
        .sum()
}

#[test]
fn ribi_code_position_is_its_bitmask() {
    for (i, code) in RIBI_CODES.iter().enumerate() {
        assert_eq!(mask(code), i, "code {code}");
    }
}

#[test]
fn direction_tables_have_no_repeats() {
    let tables: [&[&str]; 4] = [&VEHICLE_DIRS, &COMPASS_DIRS, &DIAGONAL_CODES, &BRIDGE_PARTS];
    for table in tables {
        let mut sorted = table.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), table.len(), "{table:?}");
    }
}

#[test]
fn vehicle_directions_start_south_then_west() {
    assert_eq!(&VEHICLE_DIRS[..3], ["s", "w", "sw"]);
}

//! Custom property bags attached to characters, inventory items and rooms.
//! Stored as a count followed by key/value string pairs; `BTreeMap` keeps
//! the write order deterministic.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use crate::error::Result;
use crate::io::{ReadLeExt, WriteLeExt, MAX_STRING_LEN};

pub(crate) fn write_properties<W: Write>(
    w: &mut W,
    properties: &BTreeMap<String, String>,
) -> Result<()> {
    w.write_u32_le(properties.len() as u32)?;
    for (key, value) in properties {
        w.write_string_u32(key)?;
        w.write_string_u32(value)?;
    }
    Ok(())
}

pub(crate) fn read_properties<R: Read>(r: &mut R) -> Result<BTreeMap<String, String>> {
    let count = r.read_u32_le()?;
    let mut properties = BTreeMap::new();
    for _ in 0..count {
        let key = r.read_string_u32(MAX_STRING_LEN)?;
        let value = r.read_string_u32(MAX_STRING_LEN)?;
        properties.insert(key, value);
    }
    Ok(properties)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn map_round_trip_is_ordered() {
        let mut props = BTreeMap::new();
        props.insert("weight".to_string(), "10".to_string());
        props.insert("edible".to_string(), "no".to_string());

        let mut buf = Vec::new();
        write_properties(&mut buf, &props).unwrap();
        // "edible" sorts before "weight".
        let key_start = 4 + 4;
        assert_eq!(&buf[key_start..key_start + 6], b"edible");

        let read = read_properties(&mut Cursor::new(buf)).unwrap();
        assert_eq!(read, props);
    }

    #[test]
    fn empty_map_is_a_single_count() {
        let mut buf = Vec::new();
        write_properties(&mut buf, &BTreeMap::new()).unwrap();
        assert_eq!(buf, vec![0, 0, 0, 0]);
        assert!(read_properties(&mut Cursor::new(buf)).unwrap().is_empty());
    }
}

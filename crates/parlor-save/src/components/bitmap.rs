//! Bitmap serialization: a geometry header followed by raw pixel bytes.
//! The pixel length is written redundantly so readers can skip image data
//! without decoding it, and validated against the geometry so a corrupt
//! header cannot force a bogus allocation.

use std::io::{Read, Seek, SeekFrom, Write};

use parlor_game::BitmapData;

use crate::error::{Result, SaveError};
use crate::io::{ReadLeExt, WriteLeExt};

/// Upper bound on serialized pixel data, past any plausible room or sprite.
pub(crate) const MAX_BITMAP_DATA: usize = 1 << 26;

pub(crate) fn write_bitmap<W: Write>(w: &mut W, bmp: &BitmapData) -> Result<()> {
    w.write_i32_le(bmp.width)?;
    w.write_i32_le(bmp.height)?;
    w.write_i32_le(bmp.color_depth)?;
    w.write_len_prefixed_bytes_u32(&bmp.pixels)
}

pub(crate) fn read_bitmap<R: Read>(r: &mut R) -> Result<BitmapData> {
    let width = r.read_i32_le()?;
    let height = r.read_i32_le()?;
    let color_depth = r.read_i32_le()?;
    let len = r.read_u32_le()? as usize;

    if width < 0 || height < 0 {
        return Err(SaveError::Corrupt("negative bitmap dimensions"));
    }
    if len > MAX_BITMAP_DATA {
        return Err(SaveError::Corrupt("bitmap pixel data exceeds limit"));
    }
    let Some(bpp) = BitmapData::bytes_per_pixel(color_depth) else {
        return Err(SaveError::Corrupt("unsupported bitmap color depth"));
    };
    if width as u64 * height as u64 * bpp as u64 != len as u64 {
        return Err(SaveError::Corrupt("bitmap pixel data does not match dimensions"));
    }

    let pixels = r.read_exact_vec(len)?;
    Ok(BitmapData {
        width,
        height,
        color_depth,
        pixels,
    })
}

/// Advances past one serialized bitmap without materializing the pixels.
pub(crate) fn skip_bitmap<R: Read + Seek>(r: &mut R) -> Result<()> {
    let _width = r.read_i32_le()?;
    let _height = r.read_i32_le()?;
    let _color_depth = r.read_i32_le()?;
    let len = r.read_u32_le()?;
    r.seek(SeekFrom::Current(len as i64))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn bitmap_round_trip() {
        let mut bmp = BitmapData::new(3, 2, 16);
        bmp.pixels[0] = 0x12;
        bmp.pixels[11] = 0x34;

        let mut buf = Vec::new();
        write_bitmap(&mut buf, &bmp).unwrap();
        assert_eq!(buf.len(), 16 + 12);

        let read = read_bitmap(&mut Cursor::new(buf)).unwrap();
        assert_eq!(read, bmp);
    }

    #[test]
    fn skip_lands_after_the_pixels() {
        let mut buf = Vec::new();
        write_bitmap(&mut buf, &BitmapData::new(4, 4, 32)).unwrap();
        buf.push(0x77);

        let mut cursor = Cursor::new(buf);
        skip_bitmap(&mut cursor).unwrap();
        assert_eq!(cursor.read_u8().unwrap(), 0x77);
    }

    #[test]
    fn length_must_match_geometry() {
        let mut buf = Vec::new();
        buf.write_i32_le(4).unwrap();
        buf.write_i32_le(4).unwrap();
        buf.write_i32_le(32).unwrap();
        buf.write_u32_le(63).unwrap(); // one byte short of 4*4*4
        buf.extend(std::iter::repeat(0u8).take(63));

        let err = read_bitmap(&mut Cursor::new(buf)).unwrap_err();
        assert!(matches!(err, SaveError::Corrupt(_)));
    }

    #[test]
    fn oversized_and_bogus_headers_are_rejected() {
        let mut buf = Vec::new();
        buf.write_i32_le(-1).unwrap();
        buf.write_i32_le(1).unwrap();
        buf.write_i32_le(32).unwrap();
        buf.write_u32_le(4).unwrap();
        assert!(read_bitmap(&mut Cursor::new(buf)).is_err());

        let mut buf = Vec::new();
        buf.write_i32_le(1).unwrap();
        buf.write_i32_le(1).unwrap();
        buf.write_i32_le(32).unwrap();
        buf.write_u32_le(u32::MAX).unwrap();
        assert!(read_bitmap(&mut Cursor::new(buf)).is_err());

        let mut buf = Vec::new();
        buf.write_i32_le(1).unwrap();
        buf.write_i32_le(1).unwrap();
        buf.write_i32_le(24).unwrap(); // depth the engine does not use
        buf.write_u32_le(3).unwrap();
        buf.extend([0, 0, 0]);
        assert!(read_bitmap(&mut Cursor::new(buf)).is_err());
    }
}

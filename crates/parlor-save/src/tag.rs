//! Format tags bracketing variable-length blocks: `<Name>` opens, `</Name>`
//! closes. Tags carry no attributes; they exist so a reader can both verify
//! framing and probe for the end of a list.

use std::io::{self, Read, Write};

use crate::error::{Result, SaveError};
use crate::io::{ReadLeExt, WriteLeExt};

pub(crate) const COMPONENT_LIST_TAG: &str = "Components";

/// Tags longer than this are treated as malformed rather than read to the
/// end of the stream.
pub(crate) const MAX_TAG_LEN: usize = 64;

pub(crate) fn write_tag<W: Write + ?Sized>(w: &mut W, name: &str, open: bool) -> Result<()> {
    if open {
        w.write_bytes(b"<")?;
    } else {
        w.write_bytes(b"</")?;
    }
    w.write_bytes(name.as_bytes())?;
    w.write_bytes(b">")
}

/// Reads one tag of the requested kind. Returns `Ok(None)` when the bytes at
/// the cursor do not form such a tag, including when the stream ends first;
/// malformed framing is for the caller to judge, since it may just be
/// probing.
pub(crate) fn read_tag<R: Read + ?Sized>(r: &mut R, open: bool) -> Result<Option<String>> {
    match read_tag_inner(r, open) {
        Err(SaveError::Io(err)) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
        other => other,
    }
}

fn read_tag_inner<R: Read + ?Sized>(r: &mut R, open: bool) -> Result<Option<String>> {
    if r.read_u8()? != b'<' {
        return Ok(None);
    }
    if !open && r.read_u8()? != b'/' {
        return Ok(None);
    }
    let mut name = Vec::new();
    loop {
        let c = r.read_u8()?;
        if c == b'>' {
            break;
        }
        if name.len() >= MAX_TAG_LEN {
            return Ok(None);
        }
        name.push(c);
    }
    match String::from_utf8(name) {
        Ok(name) => Ok(Some(name)),
        Err(_) => Ok(None),
    }
}

/// Reads a tag and reports whether it matches `name`.
pub(crate) fn match_tag<R: Read + ?Sized>(r: &mut R, name: &str, open: bool) -> Result<bool> {
    Ok(matches!(read_tag(r, open)?, Some(tag) if tag == name))
}

/// Like [`match_tag`] but a mismatch is an error. For blocks whose framing
/// is known, not probed.
pub(crate) fn expect_tag<R: Read + ?Sized>(r: &mut R, name: &'static str, open: bool) -> Result<()> {
    if match_tag(r, name, open)? {
        Ok(())
    } else {
        Err(SaveError::MismatchingTag(name))
    }
}

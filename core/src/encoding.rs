//! Native text ↔ UTF-8 staging bytes.
//!
//! Both directions are strict: no replacement characters, no BOM handling,
//! no fallback encoding.

use edhere_types::{ErrorKind, TextBuffer};

pub fn to_storage_encoding(text: &TextBuffer) -> Result<Vec<u8>, ErrorKind> {
    let mut bytes = Vec::new();
    // Upper bound: a UTF-16 unit never expands past 3 UTF-8 bytes.
    bytes
        .try_reserve_exact(text.len().saturating_mul(3))
        .map_err(|_| ErrorKind::NoMemory)?;

    for decoded in char::decode_utf16(text.as_units().iter().copied()) {
        let ch = decoded.map_err(|e| {
            tracing::warn!(
                unpaired = e.unpaired_surrogate(),
                "Field text is not valid UTF-16"
            );
            ErrorKind::ToStorageEncodingFailed
        })?;
        let mut buf = [0u8; 4];
        bytes.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
    }
    Ok(bytes)
}

pub fn from_storage_encoding(bytes: Vec<u8>) -> Result<TextBuffer, ErrorKind> {
    let text = String::from_utf8(bytes).map_err(|e| {
        tracing::warn!(
            valid_up_to = e.utf8_error().valid_up_to(),
            "Staged file is not valid UTF-8"
        );
        ErrorKind::FromStorageEncodingFailed
    })?;

    let mut units = Vec::new();
    // UTF-8 never takes fewer bytes than UTF-16 takes units.
    units
        .try_reserve_exact(text.len())
        .map_err(|_| ErrorKind::NoMemory)?;
    units.extend(text.encode_utf16());
    Ok(TextBuffer::from_units(units))
}

//! Checksummed envelope around stored records.
//!
//! Layout: `[version u8][crc32 u32 LE][payload]`, the checksum covering the
//! payload only.

use super::StoreError;

/// Current envelope format version.
pub const ENVELOPE_VERSION: u8 = 1;

/// Wrap `payload` in a current-version envelope.
pub fn seal(payload: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(payload.len().saturating_add(5));
    bytes.push(ENVELOPE_VERSION);
    bytes.extend_from_slice(&crc32fast::hash(payload).to_le_bytes());
    bytes.extend_from_slice(payload);
    bytes
}

/// Check an envelope and return its payload.
pub fn open_envelope(bytes: &[u8]) -> Result<&[u8], StoreError> {
    let Some((&[version, a, b, c, d], payload)) = bytes.split_first_chunk::<5>() else {
        return Err(StoreError::InvalidFormat(format!(
            "record too short: {} bytes",
            bytes.len()
        )));
    };
    if version != ENVELOPE_VERSION {
        return Err(StoreError::InvalidFormat(format!(
            "unsupported record version {version}"
        )));
    }
    let stored = u32::from_le_bytes([a, b, c, d]);
    let actual = crc32fast::hash(payload);
    if stored != actual {
        return Err(StoreError::InvalidFormat(format!(
            "checksum mismatch: stored {stored:#010x}, computed {actual:#010x}"
        )));
    }
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seal_and_open() {
        let sealed = seal(b"{}");
        assert_eq!(sealed.first(), Some(&ENVELOPE_VERSION));
        assert_eq!(open_envelope(&sealed).unwrap(), b"{}");
    }

    #[test]
    fn test_detects_corruption() {
        let mut sealed = seal(b"{\"a\":1}");
        if let Some(last) = sealed.last_mut() {
            *last ^= 0xff;
        }
        assert!(matches!(open_envelope(&sealed), Err(StoreError::InvalidFormat(_))));
    }

    #[test]
    fn test_rejects_unknown_version_and_short_input() {
        let mut sealed = seal(b"x");
        if let Some(first) = sealed.first_mut() {
            *first = 9;
        }
        assert!(open_envelope(&sealed).is_err());
        assert!(open_envelope(&[1, 2]).is_err());
    }
}

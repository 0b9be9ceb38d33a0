//! Framing for durable cache entries.
//!
//! ```text
//! +--------+-----------+------------------+
//! | "TFQ1" | crc32 LE  | bincode payload  |
//! +--------+-----------+------------------+
//! ```
//!
//! The checksum covers the payload only. A truncated or corrupted entry
//! fails to decode and the cache treats it as a miss.

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::cache::CachedValue;
use crate::error::{Result, ThaifreqError};

const MAGIC: &[u8; 4] = b"TFQ1";
const HEADER_LEN: usize = 8;

/// Encode a cached value into a framed byte buffer.
pub fn encode(value: &CachedValue) -> Result<Vec<u8>> {
    let payload = bincode::serialize(value)?;

    let mut buffer = Vec::with_capacity(HEADER_LEN + payload.len());
    buffer.extend_from_slice(MAGIC);
    buffer.write_u32::<LittleEndian>(crc32fast::hash(&payload))?;
    buffer.extend_from_slice(&payload);
    Ok(buffer)
}

/// Decode a framed buffer produced by [`encode`].
pub fn decode(bytes: &[u8]) -> Result<CachedValue> {
    if bytes.len() < HEADER_LEN {
        return Err(ThaifreqError::serialization(format!(
            "Cache entry too short: {} bytes",
            bytes.len()
        )));
    }
    if &bytes[..4] != MAGIC {
        return Err(ThaifreqError::serialization("Bad cache entry magic"));
    }

    let expected = Cursor::new(&bytes[4..HEADER_LEN]).read_u32::<LittleEndian>()?;
    let payload = &bytes[HEADER_LEN..];
    let actual = crc32fast::hash(payload);
    if expected != actual {
        return Err(ThaifreqError::serialization(format!(
            "Cache entry checksum mismatch: expected {expected:08x}, got {actual:08x}"
        )));
    }

    Ok(bincode::deserialize(payload)?)
}

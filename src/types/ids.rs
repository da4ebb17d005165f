/// Store-assigned document identifiers.
///
/// A `DocumentId` is 12 bytes rendered as 24 lowercase hex characters:
/// - bytes 0..4: big-endian unix seconds at creation
/// - bytes 4..9: random per-process value
/// - bytes 9..12: big-endian counter, seeded randomly
///
/// Ids generated by one process sort by creation second, then by counter.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};

use once_cell::sync::Lazy;
use rand::{rng, Rng};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::DOCUMENT_ID_LENGTH;

static PROCESS_UNIQUE: Lazy<[u8; 5]> = Lazy::new(|| rng().random());
static COUNTER: Lazy<AtomicU32> = Lazy::new(|| AtomicU32::new(rng().random_range(0..0x00ff_ffff)));

/// Fixed-size 12-byte identifier assigned by the store on insert
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId([u8; DOCUMENT_ID_LENGTH]);

impl DocumentId {
    /// Create an id from raw bytes
    pub fn from_bytes(bytes: [u8; DOCUMENT_ID_LENGTH]) -> Self {
        DocumentId(bytes)
    }

    /// Generate a fresh id for the current second
    pub fn generate() -> Self {
        let secs = chrono::Utc::now().timestamp().clamp(0, u32::MAX as i64) as u32;
        Self::with_timestamp(secs)
    }

    fn with_timestamp(secs: u32) -> Self {
        let count = COUNTER.fetch_add(1, Ordering::SeqCst) & 0x00ff_ffff;

        let mut bytes = [0u8; DOCUMENT_ID_LENGTH];
        bytes[0..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(&*PROCESS_UNIQUE);
        bytes[9..12].copy_from_slice(&count.to_be_bytes()[1..4]);
        DocumentId(bytes)
    }

    /// Creation time encoded in the id, in unix seconds
    pub fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }

    /// 24-character lowercase hex form
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for DocumentId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != DOCUMENT_ID_LENGTH * 2 {
            return Err(format!(
                "DocumentId must be exactly {} hex characters",
                DOCUMENT_ID_LENGTH * 2
            ));
        }
        let mut bytes = [0u8; DOCUMENT_ID_LENGTH];
        hex::decode_to_slice(s, &mut bytes).map_err(|e| format!("Invalid DocumentId: {}", e))?;
        Ok(DocumentId(bytes))
    }
}

impl Serialize for DocumentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

//! Snowflake ID - time-ordered 64-bit identifier
//!
//! Layout:
//! - Bits 63-22: milliseconds since [`Snowflake::EPOCH`]
//! - Bits 21-12: worker ID (0-1023)
//! - Bits 11-0:  per-millisecond sequence (0-4095)

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::{Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

const WORKER_BITS: i64 = 10;
const SEQUENCE_BITS: i64 = 12;
const MAX_SEQUENCE: i64 = (1 << SEQUENCE_BITS) - 1;

/// 64-bit entity identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Snowflake(i64);

impl Snowflake {
    /// Custom epoch: 2020-01-01 00:00:00 UTC (milliseconds)
    pub const EPOCH: i64 = 1_577_836_800_000;

    /// Highest accepted worker ID
    pub const MAX_WORKER_ID: u16 = (1 << WORKER_BITS) - 1;

    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Milliseconds since the Unix epoch
    #[inline]
    pub fn timestamp(&self) -> i64 {
        (self.0 >> (WORKER_BITS + SEQUENCE_BITS)) + Self::EPOCH
    }

    #[inline]
    pub fn worker_id(&self) -> u16 {
        ((self.0 >> SEQUENCE_BITS) & ((1 << WORKER_BITS) - 1)) as u16
    }

    #[inline]
    pub fn sequence(&self) -> u16 {
        (self.0 & MAX_SEQUENCE) as u16
    }

    /// Creation time encoded in the ID
    pub fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        chrono::DateTime::from_timestamp_millis(self.timestamp()).unwrap_or_default()
    }

    pub fn parse(s: &str) -> Result<Self, SnowflakeParseError> {
        match s.trim().parse::<i64>() {
            Ok(v) if v >= 0 => Ok(Self(v)),
            _ => Err(SnowflakeParseError::InvalidFormat),
        }
    }
}

/// Error when parsing a Snowflake from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SnowflakeParseError {
    #[error("invalid snowflake format")]
    InvalidFormat,
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Snowflake {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for i64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

impl std::str::FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Snowflake::parse(s)
    }
}

// JSON clients lose precision above 2^53, so IDs travel as strings
impl Serialize for Snowflake {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Int(i64),
            Str(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Int(v) => Ok(Snowflake(v)),
            Repr::Str(s) => Snowflake::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}

/// Snowflake generator for a single worker.
///
/// Up to 4096 IDs per millisecond; a burst beyond that waits for the next tick.
pub struct SnowflakeGenerator {
    worker_id: u16,
    // (last timestamp, last sequence)
    state: Mutex<(i64, i64)>,
}

impl SnowflakeGenerator {
    /// # Panics
    /// Panics if `worker_id` exceeds [`Snowflake::MAX_WORKER_ID`].
    pub fn new(worker_id: u16) -> Self {
        assert!(
            worker_id <= Snowflake::MAX_WORKER_ID,
            "Worker ID must be < 1024"
        );
        Self {
            worker_id,
            state: Mutex::new((0, 0)),
        }
    }

    pub fn generate(&self) -> Snowflake {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let (last, seq) = *state;

        // a clock that went backwards keeps using the last tick
        let mut now = current_millis().max(last);
        let sequence = if now == last {
            let next = (seq + 1) & MAX_SEQUENCE;
            if next == 0 {
                while now <= last {
                    std::hint::spin_loop();
                    now = current_millis();
                }
            }
            next
        } else {
            0
        };

        *state = (now, sequence);
        Snowflake::new(
            ((now - Snowflake::EPOCH) << (WORKER_BITS + SEQUENCE_BITS))
                | (i64::from(self.worker_id) << SEQUENCE_BITS)
                | sequence,
        )
    }

    pub fn worker_id(&self) -> u16 {
        self.worker_id
    }
}

impl Default for SnowflakeGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}

impl fmt::Debug for SnowflakeGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowflakeGenerator")
            .field("worker_id", &self.worker_id)
            .finish_non_exhaustive()
    }
}

fn current_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(Snowflake::EPOCH)
}

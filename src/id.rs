use core::fmt;

/// A 64-bit Snowflake ID using the classic Twitter layout
///
/// - 1 bit reserved (sign bit, always 0)
/// - 41 bits timestamp (ms since [`ID_EPOCH`])
/// - 5 bits datacenter ID
/// - 5 bits worker ID
/// - 12 bits sequence
///
/// ```text
///  Bit Index:  63           63 62            22 21              17 16            12 11             0
///              +--------------+----------------+------------------+---------------+---------------+
///  Field:      | reserved (1) | timestamp (41) | datacenter ID (5) | worker ID (5) | sequence (12) |
///              +--------------+----------------+------------------+---------------+---------------+
///              |<------------------ MSB ------------- 64 bits ------------- LSB ------------------>|
/// ```
///
/// IDs compare and hash by their raw value, so a worker's output sorts in
/// generation order.
///
/// [`ID_EPOCH`]: crate::ID_EPOCH
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnowflakeId {
    id: i64,
}

impl SnowflakeId {
    /// Bitmask for extracting the 41-bit timestamp field. Occupies bits 22
    /// through 62.
    pub const TIMESTAMP_MASK: i64 = (1 << 41) - 1;

    /// Bitmask for extracting the 5-bit datacenter ID field. Occupies bits
    /// 17 through 21.
    pub const DATACENTER_ID_MASK: i64 = (1 << 5) - 1;

    /// Bitmask for extracting the 5-bit worker ID field. Occupies bits 12
    /// through 16.
    pub const WORKER_ID_MASK: i64 = (1 << 5) - 1;

    /// Bitmask for extracting the 12-bit sequence field. Occupies bits 0
    /// through 11.
    pub const SEQUENCE_MASK: i64 = (1 << 12) - 1;

    /// Number of bits to shift the timestamp to its correct position (bit 22).
    pub const TIMESTAMP_SHIFT: i64 = 22;

    /// Number of bits to shift the datacenter ID to its correct position
    /// (bit 17).
    pub const DATACENTER_ID_SHIFT: i64 = 17;

    /// Number of bits to shift the worker ID to its correct position (bit 12).
    pub const WORKER_ID_SHIFT: i64 = 12;

    /// Number of bits to shift the sequence field (bit 0).
    pub const SEQUENCE_SHIFT: i64 = 0;

    /// Packs the four fields into an ID. Each component is masked to its
    /// field width before shifting.
    pub const fn from_parts(
        timestamp: i64,
        datacenter_id: i64,
        worker_id: i64,
        sequence: i64,
    ) -> Self {
        let timestamp = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let datacenter_id = (datacenter_id & Self::DATACENTER_ID_MASK) << Self::DATACENTER_ID_SHIFT;
        let worker_id = (worker_id & Self::WORKER_ID_MASK) << Self::WORKER_ID_SHIFT;
        let sequence = (sequence & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
        Self {
            id: timestamp | datacenter_id | worker_id | sequence,
        }
    }

    /// Extracts the timestamp (ms since [`ID_EPOCH`]) from the packed ID.
    ///
    /// [`ID_EPOCH`]: crate::ID_EPOCH
    pub const fn timestamp(&self) -> i64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Extracts the datacenter ID from the packed ID.
    pub const fn datacenter_id(&self) -> i64 {
        (self.id >> Self::DATACENTER_ID_SHIFT) & Self::DATACENTER_ID_MASK
    }

    /// Extracts the worker ID from the packed ID.
    pub const fn worker_id(&self) -> i64 {
        (self.id >> Self::WORKER_ID_SHIFT) & Self::WORKER_ID_MASK
    }

    /// Extracts the sequence number from the packed ID.
    pub const fn sequence(&self) -> i64 {
        (self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK
    }

    /// Returns the raw 64-bit value.
    pub const fn to_raw(&self) -> i64 {
        self.id
    }

    /// Reinterprets a raw 64-bit value as an ID.
    pub const fn from_raw(id: i64) -> Self {
        Self { id }
    }

    /// Returns the ID as a zero-padded 20-digit string.
    pub fn to_padded_string(&self) -> String {
        format!("{:020}", self.id)
    }
}

impl From<SnowflakeId> for i64 {
    fn from(id: SnowflakeId) -> Self {
        id.to_raw()
    }
}

impl From<i64> for SnowflakeId {
    fn from(raw: i64) -> Self {
        Self::from_raw(raw)
    }
}

impl fmt::Display for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowflakeId")
            .field("timestamp", &self.timestamp())
            .field("datacenter_id", &self.datacenter_id())
            .field("worker_id", &self.worker_id())
            .field("sequence", &self.sequence())
            .finish()
    }
}

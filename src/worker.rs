use core::{fmt, hint};

use parking_lot::Mutex;
use tracing::instrument;

use crate::{
    error::{Error, Result},
    id::SnowflakeId,
    time::{ID_EPOCH, SystemClock, TimeSource},
};

/// Sentinel below any real clock reading.
const NEVER: i64 = -1;

/// Mutable generator state, guarded by a single mutex.
struct State {
    /// Wall-clock reading committed by the most recent successful
    /// [`IdWorker::next_id`] call.
    last_timestamp: i64,
    /// Counter of IDs produced within `last_timestamp`.
    sequence: i64,
}

/// A thread-safe Snowflake ID generator bound to one
/// `(datacenter_id, worker_id)` pair.
///
/// Up to 1024 workers (32 datacenters x 32 workers) can generate IDs
/// concurrently without coordination: the timestamp field gives rough global
/// ordering, the identity fields give cross-node disjointness, and the
/// 12-bit sequence disambiguates IDs generated within the same millisecond.
///
/// A worker's successful IDs are strictly increasing. When the 4096-slot
/// sequence space of a millisecond is exhausted, [`next_id`] busy-waits for
/// the next tick rather than ever reusing a slot. A backwards clock reading
/// fails the observing call with [`Error::ClockMovedBackwards`] and leaves
/// the state untouched.
///
/// # Example
///
/// ```
/// use snowdrift::IdWorker;
///
/// let worker = IdWorker::new(1, 1)?;
/// let a = worker.next_id()?;
/// let b = worker.next_id()?;
/// assert!(a < b);
/// # Ok::<(), snowdrift::Error>(())
/// ```
///
/// [`next_id`]: IdWorker::next_id
pub struct IdWorker<T = SystemClock>
where
    T: TimeSource,
{
    worker_id: i64,
    datacenter_id: i64,
    state: Mutex<State>,
    time: T,
}

impl IdWorker<SystemClock> {
    /// Creates a worker backed by the system wall clock.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WorkerIdOutOfRange`] or
    /// [`Error::DatacenterIdOutOfRange`] if either identifier does not fit
    /// its 5-bit field.
    pub fn new(worker_id: i64, datacenter_id: i64) -> Result<Self> {
        Self::with_time_source(worker_id, datacenter_id, SystemClock)
    }
}

impl<T> IdWorker<T>
where
    T: TimeSource,
{
    /// Creates a worker with a caller-supplied [`TimeSource`].
    ///
    /// This is the seam that makes the state machine deterministically
    /// testable: a scripted clock can exercise same-millisecond,
    /// tick-crossing, sequence-exhaustion, and backwards-clock scenarios.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WorkerIdOutOfRange`] or
    /// [`Error::DatacenterIdOutOfRange`] if either identifier does not fit
    /// its 5-bit field.
    pub fn with_time_source(worker_id: i64, datacenter_id: i64, time: T) -> Result<Self> {
        if !(0..=SnowflakeId::WORKER_ID_MASK).contains(&worker_id) {
            return Err(Error::WorkerIdOutOfRange {
                worker_id,
                max: SnowflakeId::WORKER_ID_MASK,
            });
        }
        if !(0..=SnowflakeId::DATACENTER_ID_MASK).contains(&datacenter_id) {
            return Err(Error::DatacenterIdOutOfRange {
                datacenter_id,
                max: SnowflakeId::DATACENTER_ID_MASK,
            });
        }
        Ok(Self {
            worker_id,
            datacenter_id,
            state: Mutex::new(State {
                last_timestamp: NEVER,
                sequence: 0,
            }),
            time,
        })
    }

    /// Returns the worker ID encoded into every generated ID.
    pub const fn worker_id(&self) -> i64 {
        self.worker_id
    }

    /// Returns the datacenter ID encoded into every generated ID.
    pub const fn datacenter_id(&self) -> i64 {
        self.datacenter_id
    }

    /// Generates the next ID.
    ///
    /// The whole operation runs under one mutex acquisition, so concurrent
    /// callers on the same worker never observe a duplicate or a
    /// non-increasing ID. If the sequence space for the current millisecond
    /// is exhausted, the call spins until the time source crosses into the
    /// next millisecond.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockMovedBackwards`] carrying the drift in
    /// milliseconds if the time source reads earlier than the last committed
    /// timestamp. The call mutates nothing on that path; subsequent calls
    /// resume normally once the clock recovers.
    #[instrument(level = "trace", skip(self))]
    pub fn next_id(&self) -> Result<SnowflakeId> {
        let mut state = self.state.lock();
        let mut now = self.time.current_millis();

        if now < state.last_timestamp {
            return Err(Self::cold_clock_behind(now, state.last_timestamp));
        }

        if now == state.last_timestamp {
            state.sequence = (state.sequence + 1) & SnowflakeId::SEQUENCE_MASK;
            if state.sequence == 0 {
                // Sequence space for this millisecond is spent. The spin is
                // the only legal exit: a sleep would overshoot the tick.
                now = self.until_next_millis(state.last_timestamp);
            }
        } else {
            state.sequence = 0;
        }

        state.last_timestamp = now;
        Ok(SnowflakeId::from_parts(
            now - ID_EPOCH,
            self.datacenter_id,
            self.worker_id,
            state.sequence,
        ))
    }

    /// Spins until the time source returns a reading strictly greater than
    /// `last_timestamp`.
    fn until_next_millis(&self, last_timestamp: i64) -> i64 {
        let mut now = self.time.current_millis();
        while now <= last_timestamp {
            hint::spin_loop();
            now = self.time.current_millis();
        }
        now
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(now: i64, last_timestamp: i64) -> Error {
        let drift_ms = last_timestamp - now;
        tracing::warn!(drift_ms, "clock moved backwards; refusing to generate an id");
        Error::ClockMovedBackwards { drift_ms }
    }
}

impl<T> fmt::Debug for IdWorker<T>
where
    T: TimeSource,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdWorker")
            .field("worker_id", &self.worker_id)
            .field("datacenter_id", &self.datacenter_id)
            .finish_non_exhaustive()
    }
}

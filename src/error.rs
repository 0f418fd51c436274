/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `snowdrift` can emit.
///
/// Construction failures are fatal for the would-be worker; a
/// [`ClockMovedBackwards`] failure affects only the call that observed it,
/// and subsequent calls succeed once the clock catches back up.
///
/// [`ClockMovedBackwards`]: Error::ClockMovedBackwards
#[derive(Clone, Copy, thiserror::Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The worker ID passed at construction was outside the 5-bit range.
    #[error("worker id can't be greater than {max} or less than 0 (got {worker_id})")]
    WorkerIdOutOfRange { worker_id: i64, max: i64 },

    /// The datacenter ID passed at construction was outside the 5-bit range.
    #[error("datacenter id can't be greater than {max} or less than 0 (got {datacenter_id})")]
    DatacenterIdOutOfRange { datacenter_id: i64, max: i64 },

    /// The time source returned a reading earlier than the last committed
    /// timestamp. No state was mutated on this path.
    #[error("clock moved backwards; refusing to generate an id for {drift_ms} ms")]
    ClockMovedBackwards { drift_ms: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_the_violated_bound() {
        let err = Error::WorkerIdOutOfRange {
            worker_id: 32,
            max: 31,
        };
        assert_eq!(
            err.to_string(),
            "worker id can't be greater than 31 or less than 0 (got 32)"
        );
    }

    #[test]
    fn display_carries_the_drift() {
        let err = Error::ClockMovedBackwards { drift_ms: 5 };
        assert_eq!(
            err.to_string(),
            "clock moved backwards; refusing to generate an id for 5 ms"
        );
    }
}

use std::time::{SystemTime, UNIX_EPOCH};

/// Generator epoch: Tuesday, January 1, 2019 00:00:00 UTC, in milliseconds
/// since the Unix epoch.
///
/// The 41-bit timestamp field of a [`SnowflakeId`] stores milliseconds
/// elapsed since this origin, which keeps generated IDs positive until
/// roughly the year 2088. Wrap-around past that point is a documented
/// limitation, not a runtime check.
///
/// [`SnowflakeId`]: crate::SnowflakeId
pub const ID_EPOCH: i64 = 1_546_272_000_000;

/// A trait for time sources that return the current wall-clock time.
///
/// This abstraction allows you to plug in the real system clock or a
/// scripted time source in tests. The unit is **milliseconds since the Unix
/// epoch**, as a signed 64-bit integer so that the generator can use a
/// sentinel below any real clock reading.
///
/// Implementations must be callable from any thread and should neither
/// allocate nor block.
///
/// # Example
///
/// ```
/// use snowdrift::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> i64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since the Unix epoch.
    fn current_millis(&self) -> i64;
}

/// The default [`TimeSource`], backed by the system wall clock.
///
/// Reads [`SystemTime::now`] on every call. It is monotonically
/// non-decreasing in the absence of operator clock adjustment; a backwards
/// adjustment surfaces as [`Error::ClockMovedBackwards`] from the worker
/// rather than being hidden here.
///
/// [`Error::ClockMovedBackwards`]: crate::Error::ClockMovedBackwards
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_millis(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before UNIX_EPOCH")
            .as_millis() as i64
    }
}

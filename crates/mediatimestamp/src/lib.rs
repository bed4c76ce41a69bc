//! # mediatimestamp
//!
//! Point-in-time timestamps, signed offsets and time ranges for media grain
//! metadata, each with a single canonical text form built from `sec:nsec`
//! pairs on the TAI timescale.
//!
//! ## Quick start
//!
//! ```rust
//! use mediatimestamp::{Inclusivity, TimeRange, Timestamp};
//!
//! let start = Timestamp::new(417_798_915, 0).unwrap();
//! let end = Timestamp::new(417_798_916, 999).unwrap();
//! let range = TimeRange::new(start, end, Inclusivity::Inclusive);
//! assert_eq!(range.to_sec_nsec_range(), "[417798915:0_417798916:999]");
//!
//! let back: TimeRange = "[417798915:0_417798916:999]".parse().unwrap();
//! assert_eq!(back, range);
//! ```
//!
//! ## Modules
//!
//! - [`timestamp`] — `Timestamp`, absolute TAI instant (`"sec:nsec"`)
//! - [`offset`] — `TimeOffset`, signed duration (`"+sec:nsec"` / `"-sec:nsec"`)
//! - [`range`] — `TimeRange`, bounded/unbounded/empty spans (`"[a_b)"`, `"_"`, `"()"`)
//! - [`leap`] — TAI/UTC leap-second table used for `chrono` interop
//! - [`canonical`] — `CanonicalForm`, the text round-trip capability shared by all three
//! - [`error`] — Error types

pub mod canonical;
pub mod error;
pub mod leap;
pub mod offset;
pub mod range;
pub mod timestamp;

pub use canonical::CanonicalForm;
pub use error::TimeError;
pub use offset::TimeOffset;
pub use range::{Inclusivity, TimeRange};
pub use timestamp::{Timestamp, MAX_SECONDS, NANOS_PER_SEC};

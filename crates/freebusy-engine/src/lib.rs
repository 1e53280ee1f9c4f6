//! # freebusy-engine
//!
//! Busy-interval merging and free-slot extraction for calendar agents.
//!
//! Calendar providers answer free/busy queries with per-calendar lists of busy
//! periods that may overlap, touch, or fall outside the window that was asked
//! about. This crate turns those lists into a minimal busy set and the
//! complementary free slots inside a query window. Both passes are pure
//! functions over [`Interval`] values and never fail.
//!
//! ```rust
//! use freebusy_engine::{free_slots, merge, Interval};
//!
//! let raw = [Interval::new(10_i64, 20), Interval::new(15, 25), Interval::new(30, 40)];
//! let busy = merge(&raw);
//! assert_eq!(busy, vec![Interval::new(10, 25), Interval::new(30, 40)]);
//!
//! let free = free_slots(&busy, 0, 50);
//! assert_eq!(
//!     free,
//!     vec![Interval::new(0, 10), Interval::new(25, 30), Interval::new(40, 50)]
//! );
//! ```
//!
//! ## Modules
//!
//! - [`interval`] — `Interval` value type and the `Instant` trait
//! - [`merge`](mod@merge) — Raw busy intervals → sorted, strictly separated busy set
//! - [`free`] — Merged busy set + query window → free slots
//! - [`availability`](mod@availability) — Multi-calendar busy sources → busy/free view
//! - [`wire`] — Provider JSON documents in, RFC 3339 DTOs out
//! - [`error`] — Error types

pub mod availability;
pub mod error;
pub mod free;
pub mod interval;
pub mod merge;
pub mod wire;

pub use availability::{availability, merge_sources, Availability, BusySource};
pub use error::EngineError;
pub use free::{first_free_slot, free_slots, free_slots_at_least, free_slots_in};
pub use interval::{Instant, Interval};
pub use merge::{is_normalized, merge, validate};

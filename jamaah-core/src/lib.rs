//! Calendar math and schedule rules for the jamaah ecosystem.
//!
//! This crate provides the pure computation shared by every jamaah front end:
//! - `recurrence` and `schedule` decide which community schedules are due on a day
//! - `notification` turns due schedules into notification documents
//! - `hijri` and `calendar_grid` convert between Gregorian and tabular Hijri dates
//! - `qibla` computes the bearing and distance to the Kaaba
//!
//! Nothing here reads the clock except `Jamaah::today`; callers pass the day in.

pub mod calendar_grid;
pub mod constants;
pub mod date_range;
pub mod error;
pub mod hijri;
pub mod jamaah;
pub mod jamaah_config;
pub mod notification;
pub mod qibla;
pub mod recurrence;
pub mod schedule;

pub use error::{CoreError, CoreResult};

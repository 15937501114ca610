//! Utility Module
//!
//! - [`time`]: Frame timing utilities driving water waves, particle motion
//!   and fade animation.

pub mod time;

pub use time::Timer;

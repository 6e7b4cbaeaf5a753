//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiry sweep: Removes expired cache entries at a configured interval

mod sweep;

pub use sweep::spawn_sweep_task;

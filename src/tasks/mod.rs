//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Cache Sweeper: purges expired snapshots and enforces the memory
//!   ceiling at configured intervals

mod sweeper;

pub use sweeper::spawn_sweeper;

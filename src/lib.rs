//! Contacts Broker - a cached contact directory service
//!
//! Brokers contact queries against a slow external directory bridge, fronted
//! by a bounded, TTL-based, memory-aware snapshot cache with LRU eviction
//! and background sweeping.

pub mod api;
pub mod cache;
pub mod config;
pub mod directory;
pub mod error;
pub mod models;
pub mod service;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use service::ContactService;
pub use tasks::spawn_sweeper;

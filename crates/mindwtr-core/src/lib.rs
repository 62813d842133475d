//! mindwtr-core - Core library for Mindwtr
//!
//! This crate contains the shared models, sync engine, and storage backends
//! used by all Mindwtr interfaces (desktop, mobile, CLI).

pub mod backend;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod sync;
pub mod util;

pub use error::{Error, Result};
pub use models::{AppData, Area, Project, Settings, Task};

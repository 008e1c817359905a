//! Core building blocks shared by every system: storage and logging.

pub mod arena;
pub mod logging;

pub use arena::{Arena, Handle};

//! wicara-core — Pure types, intent routing and text preparation.
//!
//! No async runtime, no I/O, no platform dependencies.

pub mod error;
pub mod intent;
pub mod text_prep;
pub mod transcript;
pub mod types;

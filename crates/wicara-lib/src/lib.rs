//! wicara-lib — Voice assistant engine.
//!
//! Collaborator clients (recognition, generation, synthesis, process launch),
//! the command executor and its response log, the audio artifact store, the
//! request orchestrator and the HTTP API. Depends on wicara-core for pure
//! types and routing logic.

pub mod artifacts;
pub mod commands;
pub mod config;
pub mod launcher;
pub mod llm;
pub mod orchestrator;
pub mod responder;
pub mod response_log;
pub mod server;
pub mod stt;
pub mod synthesizer;
pub mod tts;

// Re-export wicara-core for convenience
pub use wicara_core;

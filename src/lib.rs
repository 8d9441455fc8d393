//! Vivavoce Library
//!
//! Core modules for the Vivavoce spoken-interview engine.

pub mod asr;
pub mod config;
pub mod core;
pub mod emotion;
pub mod engine;
pub mod error;
pub mod oracle;
pub mod report;
pub mod scoring;
pub mod session;
pub mod tts;

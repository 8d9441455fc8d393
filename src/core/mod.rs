//! Core Speech-Processing Passes
//!
//! The pure text-side building blocks of the interview engine: utterance
//! normalization, echo suppression and completion detection.

pub mod completion;
pub mod echo;
pub mod normalizer;

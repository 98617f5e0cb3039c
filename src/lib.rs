//! Parley - Conversational Survey Engine
//!
//! This crate drives AI-guided survey dialogues: a session orchestrator walks a
//! respondent through an ordered list of questions, persisting the transcript
//! and recovering from language-model provider failures.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

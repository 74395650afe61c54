//! Flow Forge Core
//!
//! Core types for the Flow Forge pipeline sequencer.
//!
//! This crate contains:
//! - Domain types: pipeline requests, injected variables, run status and results
//! - DTOs: payloads exchanged with the GitLab pipelines API

pub mod domain;
pub mod dto;

//! Core domain types
//!
//! These types describe one row of work (a [`request::PipelineRequest`]) and
//! the outcome of running it remotely (a [`result::RunResult`]). They are shared
//! between the HTTP client and the command-line executor.

pub mod request;
pub mod result;
pub mod status;
pub mod variables;

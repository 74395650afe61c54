//! Data Transfer Objects for the remote pipelines API
//!
//! DTOs mirror the JSON the GitLab v4 API sends and receives. Only the
//! fields Flow Forge reads are modelled; unknown fields are ignored.

pub mod pipeline;

//! BES Core
//!
//! Core types for the batch execution connector.
//!
//! This crate contains:
//! - Domain types: blob references, job status, the execution request and the job configurations
//! - DTOs: the inbound parameter shapes accepted by the job endpoints

pub mod domain;
pub mod dto;

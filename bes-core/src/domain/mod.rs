//! Core domain types
//!
//! This module contains the structures exchanged with the remote batch execution
//! service and the job configurations that produce them. These types are shared
//! between the runner (which drives a job) and the front doors (which build jobs
//! and render results).

pub mod blob;
pub mod job;
pub mod request;
pub mod status;

//! Data Transfer Objects for the job endpoints
//!
//! This module contains the raw parameter shapes accepted from callers.
//! Each shape converts into exactly one job configuration variant.

pub mod job;

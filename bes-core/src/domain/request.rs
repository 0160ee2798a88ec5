//! Batch execution request payload

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::blob::BlobReference;

/// Body of the job submission call
///
/// Built once per job from its configuration and sent exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchExecutionRequest {
    pub input: BlobReference,
    pub outputs: HashMap<String, BlobReference>,
    pub global_parameters: HashMap<String, String>,
}

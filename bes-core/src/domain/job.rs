//! Job configuration domain types
//!
//! A job comes in one of four shapes depending on whether the scored
//! experiment has a web service input, output, both or neither. Every shape
//! produces the same three artifacts: an input reference, named output
//! references and the global parameters.

use std::collections::HashMap;

use super::blob::{BlobLocation, BlobReference};
use super::request::BatchExecutionRequest;

/// Name under which the single output is registered
pub const OUTPUT_NAME: &str = "output1";

/// Prefix of the output blob name when none is supplied
pub const DEFAULT_OUTPUT_PREFIX: &str = "output_";

/// Parses two parallel comma separated lists into a parameter map
///
/// Key `i` is paired with value `i`. When the lists differ in length only the
/// pairs up to the shorter one are kept. An empty list yields an empty map.
pub fn parse_global_parameters(keys: &str, values: &str) -> HashMap<String, String> {
    if keys.is_empty() || values.is_empty() {
        return HashMap::new();
    }

    keys.split(',')
        .zip(values.split(','))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Remote service endpoint and credentials plus the job's global parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobCommon {
    /// Submission URL of the remote service, must contain a `/jobs` segment
    pub api_url: String,
    pub api_key: String,
    pub global_parameters: HashMap<String, String>,
}

impl JobCommon {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            global_parameters: HashMap::new(),
        }
    }

    /// Sets the global parameters from raw comma separated lists
    pub fn with_global_parameters(mut self, keys: &str, values: &str) -> Self {
        self.global_parameters = parse_global_parameters(keys, values);
        self
    }
}

/// Capability shared by every job shape
pub trait BatchJob {
    fn common(&self) -> &JobCommon;

    /// Input reference, the empty reference when the job has no input
    fn generate_input(&self) -> BlobReference;

    /// Output references by name, empty when the job has no output
    fn generate_outputs(&self) -> HashMap<String, BlobReference>;

    fn global_parameters(&self) -> HashMap<String, String> {
        self.common().global_parameters.clone()
    }

    fn to_request(&self) -> BatchExecutionRequest {
        BatchExecutionRequest {
            input: self.generate_input(),
            outputs: self.generate_outputs(),
            global_parameters: self.global_parameters(),
        }
    }
}

fn single_output(location: &BlobLocation) -> HashMap<String, BlobReference> {
    HashMap::from([(OUTPUT_NAME.to_string(), location.to_reference())])
}

/// Job with both an input and an output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullJob {
    common: JobCommon,
    input: BlobLocation,
    output: BlobLocation,
}

impl FullJob {
    /// Blank output fields fall back to the input's account, key and
    /// container; a blank output blob becomes `output_<input blob>`.
    pub fn new(common: JobCommon, input: BlobLocation, output: BlobLocation) -> Self {
        let output = BlobLocation {
            account_name: or_default(output.account_name, &input.account_name),
            account_key: or_default(output.account_key, &input.account_key),
            container: or_default(output.container, &input.container),
            blob: if output.blob.is_empty() {
                format!("{}{}", DEFAULT_OUTPUT_PREFIX, input.blob)
            } else {
                output.blob
            },
        };

        Self {
            common,
            input,
            output,
        }
    }
}

fn or_default(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

impl BatchJob for FullJob {
    fn common(&self) -> &JobCommon {
        &self.common
    }

    fn generate_input(&self) -> BlobReference {
        self.input.to_reference()
    }

    fn generate_outputs(&self) -> HashMap<String, BlobReference> {
        single_output(&self.output)
    }
}

/// Job whose experiment reads and writes storage on its own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoIoJob {
    common: JobCommon,
}

impl NoIoJob {
    pub fn new(common: JobCommon) -> Self {
        Self { common }
    }
}

impl BatchJob for NoIoJob {
    fn common(&self) -> &JobCommon {
        &self.common
    }

    fn generate_input(&self) -> BlobReference {
        BlobReference::empty()
    }

    fn generate_outputs(&self) -> HashMap<String, BlobReference> {
        HashMap::new()
    }
}

/// Job with an input only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputJob {
    common: JobCommon,
    input: BlobLocation,
}

impl InputJob {
    pub fn new(common: JobCommon, input: BlobLocation) -> Self {
        Self { common, input }
    }
}

impl BatchJob for InputJob {
    fn common(&self) -> &JobCommon {
        &self.common
    }

    fn generate_input(&self) -> BlobReference {
        self.input.to_reference()
    }

    fn generate_outputs(&self) -> HashMap<String, BlobReference> {
        HashMap::new()
    }
}

/// Job with an output only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputJob {
    common: JobCommon,
    output: BlobLocation,
}

impl OutputJob {
    pub fn new(common: JobCommon, output: BlobLocation) -> Self {
        Self { common, output }
    }
}

impl BatchJob for OutputJob {
    fn common(&self) -> &JobCommon {
        &self.common
    }

    fn generate_input(&self) -> BlobReference {
        BlobReference::empty()
    }

    fn generate_outputs(&self) -> HashMap<String, BlobReference> {
        single_output(&self.output)
    }
}

/// The closed set of job shapes, selected once from the inbound request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobConfig {
    Full(FullJob),
    None(NoIoJob),
    InputOnly(InputJob),
    OutputOnly(OutputJob),
}

impl JobConfig {
    /// Shape name, used for logging
    pub fn kind(&self) -> &'static str {
        match self {
            JobConfig::Full(_) => "Full",
            JobConfig::None(_) => "None",
            JobConfig::InputOnly(_) => "InputOnly",
            JobConfig::OutputOnly(_) => "OutputOnly",
        }
    }

    fn as_job(&self) -> &dyn BatchJob {
        match self {
            JobConfig::Full(job) => job,
            JobConfig::None(job) => job,
            JobConfig::InputOnly(job) => job,
            JobConfig::OutputOnly(job) => job,
        }
    }
}

impl BatchJob for JobConfig {
    fn common(&self) -> &JobCommon {
        self.as_job().common()
    }

    fn generate_input(&self) -> BlobReference {
        self.as_job().generate_input()
    }

    fn generate_outputs(&self) -> HashMap<String, BlobReference> {
        self.as_job().generate_outputs()
    }
}

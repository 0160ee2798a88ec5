//! Job endpoint parameter DTOs
//!
//! Field names follow the connector's public parameter names, which callers
//! already depend on.

use serde::{Deserialize, Serialize};

use crate::domain::blob::BlobLocation;
use crate::domain::job::{FullJob, InputJob, JobCommon, JobConfig, NoIoJob, OutputJob};

/// Parameters shared by every job endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceParams {
    #[serde(rename = "_API_URL")]
    pub api_url: String,
    #[serde(rename = "_API_Key")]
    pub api_key: String,
    #[serde(rename = "_GlobalKeys", default)]
    pub global_keys: String,
    #[serde(rename = "_GlobalValues", default)]
    pub global_values: String,
}

impl From<ServiceParams> for JobCommon {
    fn from(params: ServiceParams) -> Self {
        JobCommon::new(params.api_url, params.api_key)
            .with_global_parameters(&params.global_keys, &params.global_values)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputParams {
    #[serde(rename = "_Input_AccountName")]
    pub account_name: String,
    #[serde(rename = "_Input_AccountKey")]
    pub account_key: String,
    #[serde(rename = "_Input_Container")]
    pub container: String,
    #[serde(rename = "_Input_Blob")]
    pub blob: String,
}

impl From<InputParams> for BlobLocation {
    fn from(params: InputParams) -> Self {
        BlobLocation {
            account_name: params.account_name,
            account_key: params.account_key,
            container: params.container,
            blob: params.blob,
        }
    }
}

/// Output parameters of the output-only endpoint, all required
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputParams {
    #[serde(rename = "_Output_AccountName")]
    pub account_name: String,
    #[serde(rename = "_Output_AccountKey")]
    pub account_key: String,
    #[serde(rename = "_Output_Container")]
    pub container: String,
    #[serde(rename = "_Output_Blob")]
    pub blob: String,
}

impl From<OutputParams> for BlobLocation {
    fn from(params: OutputParams) -> Self {
        BlobLocation {
            account_name: params.account_name,
            account_key: params.account_key,
            container: params.container,
            blob: params.blob,
        }
    }
}

/// Output parameters of the full endpoint, blank means "same as input"
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputOverrideParams {
    #[serde(rename = "_Output_AccountName", default)]
    pub account_name: String,
    #[serde(rename = "_Output_AccountKey", default)]
    pub account_key: String,
    #[serde(rename = "_Output_Container", default)]
    pub container: String,
    #[serde(rename = "_Output_Blob", default)]
    pub blob: String,
}

impl From<OutputOverrideParams> for BlobLocation {
    fn from(params: OutputOverrideParams) -> Self {
        BlobLocation {
            account_name: params.account_name,
            account_key: params.account_key,
            container: params.container,
            blob: params.blob,
        }
    }
}

/// Parameters of `POST /api/Full`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullJobParams {
    #[serde(flatten)]
    pub service: ServiceParams,
    #[serde(flatten)]
    pub input: InputParams,
    #[serde(flatten)]
    pub output: OutputOverrideParams,
}

impl From<FullJobParams> for JobConfig {
    fn from(params: FullJobParams) -> Self {
        JobConfig::Full(FullJob::new(
            params.service.into(),
            params.input.into(),
            params.output.into(),
        ))
    }
}

/// Parameters of `POST /api/None`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoIoJobParams {
    #[serde(flatten)]
    pub service: ServiceParams,
}

impl From<NoIoJobParams> for JobConfig {
    fn from(params: NoIoJobParams) -> Self {
        JobConfig::None(NoIoJob::new(params.service.into()))
    }
}

/// Parameters of `POST /api/OnlyInput`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputJobParams {
    #[serde(flatten)]
    pub service: ServiceParams,
    #[serde(flatten)]
    pub input: InputParams,
}

impl From<InputJobParams> for JobConfig {
    fn from(params: InputJobParams) -> Self {
        JobConfig::InputOnly(InputJob::new(params.service.into(), params.input.into()))
    }
}

/// Parameters of `POST /api/OnlyOutput`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputJobParams {
    #[serde(flatten)]
    pub service: ServiceParams,
    #[serde(flatten)]
    pub output: OutputParams,
}

impl From<OutputJobParams> for JobConfig {
    fn from(params: OutputJobParams) -> Self {
        JobConfig::OutputOnly(OutputJob::new(params.service.into(), params.output.into()))
    }
}

/// Parameters of `GET /api/CheckStatus`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckStatusParams {
    /// Status URL of the job
    pub url: String,
    /// API key of the remote service
    pub api: String,
}

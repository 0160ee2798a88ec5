//! Job status domain types

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::blob::BlobReference;

/// Status code reported by the remote batch execution service
///
/// The wire encoding is the ordinal. Ordinal 0 is also used for local
/// failures, which carry non-empty details (see [`BatchStatus::is_local_failure`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BatchStatusCode {
    NotStarted = 0,
    Running = 1,
    Failed = 2,
    Cancelled = 3,
    Finished = 4,
}

impl BatchStatusCode {
    pub const ALL: [BatchStatusCode; 5] = [
        BatchStatusCode::NotStarted,
        BatchStatusCode::Running,
        BatchStatusCode::Failed,
        BatchStatusCode::Cancelled,
        BatchStatusCode::Finished,
    ];

    /// Textual name of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatusCode::NotStarted => "NotStarted",
            BatchStatusCode::Running => "Running",
            BatchStatusCode::Failed => "Failed",
            BatchStatusCode::Cancelled => "Cancelled",
            BatchStatusCode::Finished => "Finished",
        }
    }

    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    pub fn from_ordinal(ordinal: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.ordinal() as u64 == ordinal)
    }

    /// No further polling happens once a terminal code is reached
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BatchStatusCode::Failed | BatchStatusCode::Cancelled | BatchStatusCode::Finished
        )
    }
}

impl fmt::Display for BatchStatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BatchStatusCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown status code '{}'", s))
    }
}

impl Serialize for BatchStatusCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.ordinal())
    }
}

/// Wire forms accepted for a status code
#[derive(Deserialize)]
#[serde(untagged)]
enum RawStatusCode {
    Ordinal(u64),
    Name(String),
}

impl<'de> Deserialize<'de> for BatchStatusCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawStatusCode::deserialize(deserializer)? {
            RawStatusCode::Ordinal(ordinal) => BatchStatusCode::from_ordinal(ordinal)
                .ok_or_else(|| de::Error::custom(format!("unknown status code ordinal {}", ordinal))),
            RawStatusCode::Name(name) => name.parse().map_err(de::Error::custom),
        }
    }
}

/// Normalized status of a batch execution job
///
/// Every poll produces a fresh value. The description is derived from the code
/// and only exists after [`BatchStatus::finalize`]. Results are meaningful only
/// when the code is `Finished`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchStatus {
    pub status_code: BatchStatusCode,

    #[serde(skip_deserializing)]
    status_description: Option<String>,

    #[serde(default)]
    pub results: Option<HashMap<String, BlobReference>>,

    #[serde(default)]
    pub details: Option<String>,

    /// Status URL of the job, filled in locally once a job id is known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_location: Option<String>,

    /// Set when polling gave up and a cancellation request was sent without
    /// confirmation
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cancellation_requested: bool,

    #[serde(skip)]
    local_failure: bool,
}

impl BatchStatus {
    pub fn new(status_code: BatchStatusCode) -> Self {
        Self {
            status_code,
            status_description: None,
            results: None,
            details: None,
            job_location: None,
            cancellation_requested: false,
            local_failure: false,
        }
    }

    /// Status describing a failure that happened on this side of the wire
    ///
    /// Uses the `NotStarted` ordinal for compatibility with existing callers,
    /// which tell the two apart through the details. Inside the process the
    /// origin is tracked explicitly, see [`BatchStatus::is_local_failure`].
    pub fn local_failure(details: impl Into<String>) -> Self {
        Self {
            details: Some(details.into()),
            local_failure: true,
            ..Self::new(BatchStatusCode::NotStarted)
        }
    }

    /// True only for statuses built by [`BatchStatus::local_failure`]
    ///
    /// Not carried on the wire. A remote `NotStarted` status with details, such
    /// as a timed out job still queued, is never a local failure.
    pub fn is_local_failure(&self) -> bool {
        self.local_failure
    }

    pub fn is_terminal(&self) -> bool {
        self.status_code.is_terminal()
    }

    /// Description computed by the last call to `finalize`
    pub fn description(&self) -> Option<&str> {
        self.status_description.as_deref()
    }

    pub fn result(&self, name: &str) -> Option<&BlobReference> {
        self.results.as_ref().and_then(|results| results.get(name))
    }

    /// Derives the description and the full URL of every result
    ///
    /// Must run after the code is final and before the status leaves the crate
    /// that produced it.
    pub fn finalize(&mut self) {
        self.status_description = Some(self.status_code.as_str().to_string());
        if let Some(results) = self.results.as_mut() {
            for reference in results.values_mut() {
                reference.derive_full_url();
            }
        }
    }
}

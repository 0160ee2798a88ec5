//! Blob reference domain types

use serde::{Deserialize, Serialize};

/// Location of a blob inside a storage account, as supplied by a caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlobLocation {
    pub account_name: String,
    pub account_key: String,
    pub container: String,
    pub blob: String,
}

impl BlobLocation {
    /// Connection string for account key access
    pub fn connection_string(&self) -> String {
        format!(
            "DefaultEndpointsProtocol=https;AccountName={};AccountKey={}",
            self.account_name, self.account_key
        )
    }

    /// Path of the blob inside its storage account
    pub fn relative_location(&self) -> String {
        format!("{}/{}", self.container, self.blob)
    }

    /// Builds the reference the remote service expects for this location
    pub fn to_reference(&self) -> BlobReference {
        BlobReference::with_connection_string(self.connection_string(), self.relative_location())
    }
}

/// Normalized pointer to a storage object
///
/// A reference is addressed either through a connection string (account key
/// access) or through a base location plus a shared access signature token.
/// The remote service uses the second form for job results.
///
/// The full URL is never taken from the wire. It only exists after
/// [`BlobReference::derive_full_url`] and is dropped by every setter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BlobReference {
    #[serde(default)]
    connection_string: Option<String>,
    #[serde(default)]
    relative_location: Option<String>,
    #[serde(default)]
    base_location: Option<String>,
    #[serde(default)]
    sas_blob_token: Option<String>,
    #[serde(
        rename = "FullURL",
        skip_deserializing,
        skip_serializing_if = "Option::is_none"
    )]
    full_url: Option<String>,
}

impl BlobReference {
    /// Placeholder reference used by jobs without an input
    pub fn empty() -> Self {
        Self::default()
    }

    /// Reference for account key access
    pub fn with_connection_string(
        connection_string: impl Into<String>,
        relative_location: impl Into<String>,
    ) -> Self {
        Self {
            connection_string: Some(connection_string.into()),
            relative_location: Some(relative_location.into()),
            ..Self::default()
        }
    }

    /// Returns true when no field is set
    pub fn is_empty(&self) -> bool {
        self.connection_string.is_none()
            && self.relative_location.is_none()
            && self.base_location.is_none()
            && self.sas_blob_token.is_none()
    }

    pub fn connection_string(&self) -> Option<&str> {
        self.connection_string.as_deref()
    }

    pub fn relative_location(&self) -> Option<&str> {
        self.relative_location.as_deref()
    }

    pub fn base_location(&self) -> Option<&str> {
        self.base_location.as_deref()
    }

    pub fn sas_blob_token(&self) -> Option<&str> {
        self.sas_blob_token.as_deref()
    }

    pub fn set_relative_location(&mut self, relative_location: impl Into<String>) {
        self.relative_location = Some(relative_location.into());
        self.full_url = None;
    }

    pub fn set_base_location(&mut self, base_location: impl Into<String>) {
        self.base_location = Some(base_location.into());
        self.full_url = None;
    }

    pub fn set_sas_blob_token(&mut self, sas_blob_token: impl Into<String>) {
        self.sas_blob_token = Some(sas_blob_token.into());
        self.full_url = None;
    }

    /// Full URL computed by the last call to `derive_full_url`
    pub fn full_url(&self) -> Option<&str> {
        self.full_url.as_deref()
    }

    /// Computes `base location + relative location + token`
    ///
    /// Absent fields count as empty strings.
    pub fn derive_full_url(&mut self) -> &str {
        let full_url = [
            self.base_location.as_deref(),
            self.relative_location.as_deref(),
            self.sas_blob_token.as_deref(),
        ]
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect::<String>();

        self.full_url.insert(full_url).as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_reference(base: &str, relative: &str, token: &str) -> BlobReference {
        let mut reference = BlobReference::empty();
        reference.set_base_location(base);
        reference.set_relative_location(relative);
        reference.set_sas_blob_token(token);
        reference
    }

    fn input_location() -> BlobLocation {
        BlobLocation {
            account_name: "acct".to_string(),
            account_key: "secret".to_string(),
            container: "data".to_string(),
            blob: "input.csv".to_string(),
        }
    }

    #[test]
    fn test_location_to_reference() {
        let reference = input_location().to_reference();

        assert_eq!(
            reference.connection_string(),
            Some("DefaultEndpointsProtocol=https;AccountName=acct;AccountKey=secret")
        );
        assert_eq!(reference.relative_location(), Some("data/input.csv"));
        assert_eq!(reference.base_location(), None);
        assert_eq!(reference.full_url(), None);
    }

    #[test]
    fn test_full_url_concatenates_parts() {
        let mut reference = signed_reference("https://acct.blob/", "c/out.csv", "?sig=1");
        assert_eq!(reference.derive_full_url(), "https://acct.blob/c/out.csv?sig=1");
    }

    #[test]
    fn test_full_url_treats_missing_parts_as_empty() {
        let mut reference = BlobReference::empty();
        assert_eq!(reference.derive_full_url(), "");

        let mut reference = input_location().to_reference();
        assert_eq!(reference.derive_full_url(), "data/input.csv");
    }

    #[test]
    fn test_full_url_is_idempotent() {
        let mut reference = signed_reference("https://acct.blob/", "c/out.csv", "");
        let first = reference.derive_full_url().to_string();
        let second = reference.derive_full_url().to_string();
        assert_eq!(first, second);
    }

    #[test]
    fn test_setters_invalidate_full_url() {
        let mut reference = signed_reference("https://acct.blob/", "c/out.csv", "");
        reference.derive_full_url();
        assert!(reference.full_url().is_some());

        reference.set_sas_blob_token("?sig=2");
        assert_eq!(reference.full_url(), None);
        assert_eq!(reference.derive_full_url(), "https://acct.blob/c/out.csv?sig=2");

        reference.set_relative_location("c/other.csv");
        reference.set_base_location("https://other.blob/");
        assert_eq!(reference.full_url(), None);
        assert_eq!(reference.derive_full_url(), "https://other.blob/c/other.csv?sig=2");
    }

    #[test]
    fn test_full_url_is_never_read_from_the_wire() {
        let json = r#"{
            "ConnectionString": null,
            "RelativeLocation": "c/out.csv",
            "BaseLocation": "https://acct.blob/",
            "SasBlobToken": "",
            "FullURL": "https://elsewhere/"
        }"#;
        let reference: BlobReference = serde_json::from_str(json).unwrap();
        assert_eq!(reference.full_url(), None);
        assert_eq!(reference.base_location(), Some("https://acct.blob/"));
    }

    #[test]
    fn test_serializes_pascal_case() {
        let mut reference = signed_reference("https://acct.blob/", "c/out.csv", "");
        let value = serde_json::to_value(&reference).unwrap();
        assert_eq!(value["BaseLocation"], "https://acct.blob/");
        assert!(value["ConnectionString"].is_null());
        assert!(value.get("FullURL").is_none());

        reference.derive_full_url();
        let value = serde_json::to_value(&reference).unwrap();
        assert_eq!(value["FullURL"], "https://acct.blob/c/out.csv");
    }

    #[test]
    fn test_empty_reference() {
        assert!(BlobReference::empty().is_empty());
        assert!(!input_location().to_reference().is_empty());
    }
}

// Access key resolution
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use aws_credential_types::Credentials as SdkCredentials;
use std::fmt;
use super::CredentialError;

/// Environment variable holding the access key ID.
pub const ACCESS_KEY_ID_ENV: &str = "ALIBABA_CLOUD_ACCESS_KEY_ID";

/// Environment variable holding the access key secret.
pub const ACCESS_KEY_SECRET_ENV: &str = "ALIBABA_CLOUD_ACCESS_KEY_SECRET";

// Name reported to the SDK as the source of these credentials.
const PROVIDER_NAME: &str = "oss-purge";

/// A resolved access key pair.
#[derive(Clone, Eq, PartialEq)]
pub struct Credentials {
    access_key_id:     String,
    access_key_secret: String,
}

impl Credentials {
    /// Build `Credentials` from whatever the command line and environment
    /// provided.
    ///
    /// Missing or blank values are rejected.
    pub fn new(
        access_key_id:     Option<String>,
        access_key_secret: Option<String>,
    ) -> Result<Self, CredentialError> {
        let access_key_id = access_key_id
            .filter(|id| !id.trim().is_empty())
            .ok_or(CredentialError::MissingKeyId(ACCESS_KEY_ID_ENV))?;

        let access_key_secret = access_key_secret
            .filter(|secret| !secret.trim().is_empty())
            .ok_or(CredentialError::MissingKeySecret(ACCESS_KEY_SECRET_ENV))?;

        Ok(Self {
            access_key_id,
            access_key_secret,
        })
    }

    /// Returns the access key ID.
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// Returns static SDK credentials for this key pair.
    pub fn to_sdk(&self) -> SdkCredentials {
        SdkCredentials::new(
            self.access_key_id.clone(),
            self.access_key_secret.clone(),
            None,
            None,
            PROVIDER_NAME,
        )
    }
}

// Keep the secret out of debug logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("access_key_secret", &"** redacted **")
            .finish()
    }
}

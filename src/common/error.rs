// Error taxonomy for credentials and storage calls
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use aws_sdk_s3::error::{
    DisplayErrorContext,
    ProvideErrorMetadata,
    SdkError,
};
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Error codes returned when a bucket still has something attached to it.
const DEPENDENCY_CODES: &[&str] = &[
    "BucketNotEmpty",
    "BucketBindingAccessPoints",
];

/// Error codes meaning the thing we tried to remove isn't there.
const NOT_FOUND_CODES: &[&str] = &[
    "NoSuchBucket",
    "NoSuchKey",
    "NoSuchUpload",
    "NoSuchVersion",
    "NoSuchLifecycle",
    "NoSuchCORSConfiguration",
    "NoSuchWebsiteConfiguration",
];

/// Error codes for operations the endpoint doesn't implement.
const UNSUPPORTED_CODES: &[&str] = &[
    "NotImplemented",
];

/// Failure to find an access key pair.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum CredentialError {
    /// No access key ID was given or found in the environment.
    #[error("access key ID not found, pass it as an argument or set {0}")]
    MissingKeyId(&'static str),

    /// No access key secret was given or found in the environment.
    #[error("access key secret not found, pass it as an argument or set {0}")]
    MissingKeySecret(&'static str),

    /// Only one half of the key pair was given on the command line.
    #[error("expected both ACCESS_KEY_ID and ACCESS_KEY_SECRET as arguments, or neither")]
    PartialArguments,
}

/// A classified failure of a remote storage call.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum StorageError {
    /// The bucket still has objects or access points bound to it.
    #[error("bucket has dependent resources ({code}): {message}")]
    Dependency {
        /// Provider error code.
        code:    String,
        /// Provider error message.
        message: String,
    },

    /// The bucket, object or configuration doesn't exist.
    #[error("not found ({code}): {message}")]
    NotFound {
        /// Provider error code.
        code:    String,
        /// Provider error message.
        message: String,
    },

    /// The endpoint or client doesn't provide this operation.
    #[error("operation not supported: {operation}")]
    Unsupported {
        /// Name of the operation.
        operation: String,
    },

    /// Anything else, including transport failures.
    #[error("{}", SdkMessage(.code.as_deref(), .message))]
    Sdk {
        /// Provider error code, if the service returned one.
        code:    Option<String>,
        /// Provider or transport error message.
        message: String,
    },
}

// Formats the catch-all variant with its code when there is one.
struct SdkMessage<'a>(Option<&'a str>, &'a str);

impl fmt::Display for SdkMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(code) => write!(f, "storage error ({}): {}", code, self.1),
            None       => write!(f, "storage error: {}", self.1),
        }
    }
}

impl StorageError {
    /// Classify a provider error by its error code.
    pub fn from_code(code: Option<&str>, message: Option<&str>) -> Self {
        let message = message.unwrap_or("Unknown error").to_string();

        match code {
            Some(c) if DEPENDENCY_CODES.contains(&c) => Self::Dependency {
                code: c.to_string(),
                message,
            },
            Some(c) if NOT_FOUND_CODES.contains(&c) => Self::NotFound {
                code: c.to_string(),
                message,
            },
            Some(c) if UNSUPPORTED_CODES.contains(&c) => Self::Unsupported {
                operation: message,
            },
            _ => Self::Sdk {
                code: code.map(ToString::to_string),
                message,
            },
        }
    }

    /// Returns an `Unsupported` error for the named operation.
    pub fn unsupported(operation: &str) -> Self {
        Self::Unsupported {
            operation: operation.to_string(),
        }
    }

    /// Returns the provider error code, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Dependency { code, .. } => Some(code),
            Self::NotFound { code, .. }   => Some(code),
            Self::Unsupported { .. }      => None,
            Self::Sdk { code, .. }        => code.as_deref(),
        }
    }

    /// Check if the bucket can't be deleted because something depends on it.
    pub fn is_dependency(&self) -> bool {
        matches!(self, Self::Dependency { .. })
    }

    /// Check if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if the operation isn't available.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}

/// Classify any SDK operation error using its error metadata.
///
/// Transport errors carry no code and end up as `Sdk` with the full error
/// context as the message.
impl<E, R> From<SdkError<E, R>> for StorageError
where
    E: ProvideErrorMetadata + StdError + 'static,
    R: fmt::Debug,
{
    fn from(err: SdkError<E, R>) -> Self {
        let code    = err.code().map(ToString::to_string);
        let message = match err.message() {
            Some(message) => message.to_string(),
            None          => DisplayErrorContext(&err).to_string(),
        };

        Self::from_code(code.as_deref(), Some(&message))
    }
}

//! Upload arguments, credential fallback and up-front validation.

use std::fmt;
use std::path::PathBuf;

use super::UploadError;

pub const ACCESS_KEY_ID_VAR: &str = "AWS_ACCESS_KEY_ID";
pub const SECRET_ACCESS_KEY_VAR: &str = "AWS_SECRET_ACCESS_KEY";

/// Access key pair used to sign bucket requests.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

/// Raw upload arguments as given on the command line. Any of them may be absent.
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub source_dir: Option<PathBuf>,
    pub bucket: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

/// Validated upload arguments; nothing is missing.
#[derive(Debug, Clone)]
pub struct UploadTarget {
    pub source_dir: PathBuf,
    pub bucket: String,
    pub credentials: Credentials,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl UploadRequest {
    /// Fills absent credentials from the process environment, after loading `./.env` if present.
    pub fn with_env_fallback(self) -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("loaded environment from {}", path.display());
        }
        self.with_fallback(|name| std::env::var(name).ok())
    }

    /// Fills absent credentials using `lookup` for `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY`.
    pub fn with_fallback(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        self.access_key_id = present(self.access_key_id).or_else(|| lookup(ACCESS_KEY_ID_VAR));
        self.secret_access_key =
            present(self.secret_access_key).or_else(|| lookup(SECRET_ACCESS_KEY_VAR));
        self
    }

    /// Checks key id, secret, source directory and bucket, in that order, before any network call.
    pub fn validate(self) -> Result<UploadTarget, UploadError> {
        let access_key_id = present(self.access_key_id).ok_or(UploadError::MissingAccessKeyId)?;
        let secret_access_key =
            present(self.secret_access_key).ok_or(UploadError::MissingSecretKey)?;
        let source_dir = self
            .source_dir
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(UploadError::MissingSourceDirectory)?;
        let bucket = present(self.bucket).ok_or(UploadError::MissingBucket)?;
        if !source_dir.is_dir() {
            return Err(UploadError::SourceNotADirectory(source_dir));
        }
        Ok(UploadTarget {
            source_dir,
            bucket,
            credentials: Credentials {
                access_key_id,
                secret_access_key,
            },
        })
    }
}

use std::time::Duration;

use serde::{Deserialize, Deserializer};
use url::Url;

use crate::{Credentials, Error, Result, SigningKeyEncoding};

/// Everything needed to construct a [`Client`](crate::Client).
///
/// Deserializes from the same shape the integration settings are usually
/// kept in:
///
/// ```json
/// {
///   "origin": "https://shop.example.com",
///   "consumer_key": "...",
///   "consumer_secret": "...",
///   "access_token": "...",
///   "access_token_secret": "...",
///   "timeout": 30
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL; request paths are appended to it verbatim.
    pub origin: String,
    #[serde(flatten)]
    pub credentials: Credentials,
    /// Request timeout, written in whole seconds in the settings. No
    /// timeout when absent.
    #[serde(default, deserialize_with = "deserialize_seconds")]
    pub timeout: Option<Duration>,
    #[serde(default)]
    pub signing_key_encoding: SigningKeyEncoding,
}

impl ClientConfig {
    pub fn new<O: Into<String>>(origin: O, credentials: Credentials) -> Self {
        ClientConfig {
            origin: origin.into(),
            credentials,
            timeout: None,
            signing_key_encoding: SigningKeyEncoding::default(),
        }
    }

    pub fn timeout(self, timeout: Duration) -> Self {
        ClientConfig {
            timeout: Some(timeout),
            ..self
        }
    }

    pub fn signing_key_encoding(self, signing_key_encoding: SigningKeyEncoding) -> Self {
        ClientConfig {
            signing_key_encoding,
            ..self
        }
    }

    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout
    }

    /// Checks that the origin is an absolute URL.
    ///
    /// The origin itself is kept as written; it is never normalized.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.origin)
            .map(|_| ())
            .map_err(|e| Error::InvalidOrigin(self.origin.clone(), e))
    }
}

fn deserialize_seconds<'de, D>(deserializer: D) -> std::result::Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_secs))
}

use std::borrow::Cow;
use std::collections::BTreeMap;

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use log::debug;
use serde::Deserialize;
use sha1::Sha1;
use uuid::Uuid;

use crate::encoding::percent_encode_strict;
use crate::params::compare_keys;
use crate::SecretsProvider;
use crate::{
    OAUTH_CONSUMER_KEY, OAUTH_KEY_PREFIX, OAUTH_NONCE_KEY, OAUTH_SIGNATURE_KEY,
    OAUTH_SIGNATURE_METHOD_KEY, OAUTH_TIMESTAMP_KEY, OAUTH_TOKEN_KEY, OAUTH_VERSION_KEY,
};

type HmacSha1 = Hmac<Sha1>;

const HMAC_SHA1: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";

/// How the consumer secret and token secret are written into the HMAC key.
///
/// RFC 5849 percent-encodes both halves before joining them with `&`; some
/// PHP clients concatenate them verbatim. The two only differ when a secret
/// contains characters outside the unreserved set, which Magento-issued
/// secrets never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SigningKeyEncoding {
    /// `enc(consumer_secret)&enc(token_secret)`
    PercentEncoded,
    /// `consumer_secret&token_secret`
    Raw,
}

impl Default for SigningKeyEncoding {
    fn default() -> Self {
        SigningKeyEncoding::PercentEncoded
    }
}

/// The parameters covered by a signature, ordered by key.
///
/// `oauth_signature` may be stored but is never signed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet(BTreeMap<String, String>);

impl ParameterSet {
    pub fn new() -> Self {
        Default::default()
    }

    /// Inserts a parameter, replacing any previous value under `key`.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The normalized parameter string of RFC 5849 section 3.4.1.3.2.
    ///
    /// Names are ordered segment by segment with list indices compared as
    /// numbers, the same order a flattened query is written in. Names and
    /// values are encoded and joined as `name=value` pairs separated by `&`.
    pub fn normalized(&self) -> String {
        let mut entries = self
            .0
            .iter()
            .filter(|(k, _)| k.as_str() != OAUTH_SIGNATURE_KEY)
            .collect::<Vec<(&String, &String)>>();
        entries.sort_by(|(a, _), (b, _)| compare_keys(a, b));
        entries
            .iter()
            .map(|(k, v)| format!("{}={}", percent_encode_strict(k), percent_encode_strict(v)))
            .collect::<Vec<String>>()
            .join("&")
    }
}

impl<K, V> Extend<(K, V)> for ParameterSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V> std::iter::FromIterator<(K, V)> for ParameterSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = ParameterSet::new();
        set.extend(iter);
        set
    }
}

/// The protocol fields of a single request.
///
/// A fresh nonce and the current time are used unless set explicitly.
#[derive(Debug, Clone, Default)]
pub struct OAuthParameters<'a> {
    nonce: Option<Cow<'a, str>>,
    timestamp: Option<i64>,
}

impl<'a> OAuthParameters<'a> {
    pub fn new() -> Self {
        Default::default()
    }

    /// set the oauth_nonce value
    pub fn nonce<T>(self, nonce: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        OAuthParameters {
            nonce: Some(nonce.into()),
            ..self
        }
    }

    /// set the oauth_timestamp value
    pub fn timestamp(self, timestamp: i64) -> Self {
        OAuthParameters {
            timestamp: Some(timestamp),
            ..self
        }
    }

    /// Builds the six protocol fields for the given secrets.
    pub fn build<S: SecretsProvider>(&self, secrets: &S) -> ParameterSet {
        let (consumer_key, _) = secrets.get_consumer_key_pair();
        let (token, _) = secrets.get_token_pair();
        let nonce = self
            .nonce
            .as_ref()
            .map(|n| n.to_string())
            .unwrap_or_else(generate_nonce);
        let timestamp = self.timestamp.unwrap_or_else(|| Utc::now().timestamp());

        let mut params = ParameterSet::new();
        params
            .insert(OAUTH_CONSUMER_KEY, consumer_key)
            .insert(OAUTH_NONCE_KEY, nonce)
            .insert(OAUTH_SIGNATURE_METHOD_KEY, HMAC_SHA1)
            .insert(OAUTH_TIMESTAMP_KEY, timestamp.to_string())
            .insert(OAUTH_TOKEN_KEY, token)
            .insert(OAUTH_VERSION_KEY, OAUTH_VERSION);
        params
    }
}

/// 128 bits from the OS random source, as 32 hex characters.
pub fn generate_nonce() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Builds the signature base string of RFC 5849 section 3.4.1.
///
/// `url` must be the request URL without its query; query parameters take
/// part through `params`.
pub fn signature_base_string(method: &str, url: &str, params: &ParameterSet) -> String {
    let http_method = method.to_ascii_uppercase();
    format!(
        "{}&{}&{}",
        percent_encode_strict(&http_method),
        percent_encode_strict(url),
        percent_encode_strict(&params.normalized())
    )
}

/// A parameter set with its signature attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedParameters {
    parameters: ParameterSet,
    signature: String,
}

impl SignedParameters {
    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    /// The base64 HMAC-SHA1 signature (not encoded).
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Renders the `Authorization` header value.
    ///
    /// Only `oauth_*` fields are carried, comma separated, with
    /// `oauth_signature` last: `OAuth oauth_consumer_key=...,oauth_signature=...`
    pub fn authorization_header(&self) -> String {
        let fields = self
            .parameters
            .iter()
            .filter(|(k, _)| k.starts_with(OAUTH_KEY_PREFIX) && *k != OAUTH_SIGNATURE_KEY)
            .chain(std::iter::once((OAUTH_SIGNATURE_KEY, self.signature.as_str())))
            .map(|(k, v)| format!("{}={}", percent_encode_strict(k), percent_encode_strict(v)))
            .collect::<Vec<String>>()
            .join(",");
        format!("OAuth {}", fields)
    }
}

/// Computes HMAC-SHA1 signatures with a set of secrets.
#[derive(Debug, Clone)]
pub struct Signer<'a, TSecretsProvider>
where
    TSecretsProvider: SecretsProvider,
{
    secrets: &'a TSecretsProvider,
    key_encoding: SigningKeyEncoding,
}

impl<'a, TSecretsProvider> Signer<'a, TSecretsProvider>
where
    TSecretsProvider: SecretsProvider,
{
    pub fn new(secrets: &'a TSecretsProvider) -> Self {
        Signer {
            secrets,
            key_encoding: SigningKeyEncoding::default(),
        }
    }

    pub fn key_encoding(self, key_encoding: SigningKeyEncoding) -> Self {
        Signer {
            key_encoding,
            ..self
        }
    }

    pub fn secrets(&self) -> &'a TSecretsProvider {
        self.secrets
    }

    /// The HMAC key: consumer secret and token secret joined with `&`.
    pub fn signing_key(&self) -> String {
        let (_, consumer_secret) = self.secrets.get_consumer_key_pair();
        let (_, token_secret) = self.secrets.get_token_pair();
        match self.key_encoding {
            SigningKeyEncoding::PercentEncoded => format!(
                "{}&{}",
                percent_encode_strict(consumer_secret),
                percent_encode_strict(token_secret)
            ),
            SigningKeyEncoding::Raw => format!("{}&{}", consumer_secret, token_secret),
        }
    }

    /// Signs `params` and returns the base64 encoded digest.
    pub fn sign(&self, method: &str, url: &str, params: &ParameterSet) -> String {
        let base_str = signature_base_string(method, url, params);
        debug!("signature base string: {}", base_str);

        let mut mac = HmacSha1::new_from_slice(self.signing_key().as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(base_str.as_bytes());
        BASE64_STANDARD.encode(mac.finalize().into_bytes())
    }

    /// Signs `params` and attaches the signature, consuming the set so no
    /// field can change after signing.
    pub fn sign_parameters(
        &self,
        method: &str,
        url: &str,
        params: ParameterSet,
    ) -> SignedParameters {
        let signature = self.sign(method, url, &params);
        SignedParameters {
            parameters: params,
            signature,
        }
    }
}

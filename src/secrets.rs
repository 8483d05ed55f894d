use std::fmt::{self, Debug, Formatter};

use serde::Deserialize;

/// Provides the key pairs used to sign a request.
pub trait SecretsProvider {
    /// `(consumer_key, consumer_secret)`
    fn get_consumer_key_pair(&self) -> (&str, &str);

    /// `(access_token, access_token_secret)`
    fn get_token_pair(&self) -> (&str, &str);
}

/// The integration credentials issued by the Magento admin
/// (System > Extensions > Integrations).
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    consumer_key: String,
    consumer_secret: String,
    access_token: String,
    access_token_secret: String,
}

impl Credentials {
    pub fn new<TKey, TSecret, TToken, TTokenSecret>(
        consumer_key: TKey,
        consumer_secret: TSecret,
        access_token: TToken,
        access_token_secret: TTokenSecret,
    ) -> Self
    where
        TKey: Into<String>,
        TSecret: Into<String>,
        TToken: Into<String>,
        TTokenSecret: Into<String>,
    {
        Credentials {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token: access_token.into(),
            access_token_secret: access_token_secret.into(),
        }
    }
}

impl SecretsProvider for Credentials {
    fn get_consumer_key_pair(&self) -> (&str, &str) {
        (&self.consumer_key, &self.consumer_secret)
    }

    fn get_token_pair(&self) -> (&str, &str) {
        (&self.access_token, &self.access_token_secret)
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Credentials {{ consumer_key: {}, consumer_secret: {}, access_token: {}, access_token_secret: {} }}",
            redact(&self.consumer_key),
            redact(&self.consumer_secret),
            redact(&self.access_token),
            redact(&self.access_token_secret),
        )
    }
}

fn redact(v: &str) -> &str {
    if v.is_empty() {
        "<empty>"
    } else {
        "<redacted>"
    }
}

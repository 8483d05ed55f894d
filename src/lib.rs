/*!
magento-oauth1: a reqwest client for the Magento 2 admin REST API, signed with OAuth 1.0a.

# Overview

Every call is signed with HMAC-SHA1 from the four integration credentials
(consumer key/secret and access token/secret). `GET` payloads are flattened
into the query string and signed together with the `oauth_*` fields;
`POST` and `PUT` payloads travel as JSON bodies outside the signature.

# How to use

## Basic usecase 1 - reading a product

```rust,no_run
use magento_oauth1::{Client, Credentials};

# async fn run() -> magento_oauth1::Result<()> {
let credentials = Credentials::new(
    "[CONSUMER_KEY]",
    "[CONSUMER_SECRET]",
    "[ACCESS_TOKEN]",
    "[ACCESS_TOKEN_SECRET]",
);
let client = Client::new("https://shop.example.com", credentials);

let product = client.get_product("24-MB01").await?;
println!("{}", product["name"]);
# Ok(())
# }
```

## Basic usecase 2 - searching with searchCriteria

```rust,no_run
use magento_oauth1::{Client, ClientConfig, Error};
use serde_json::json;

# async fn run(config: ClientConfig) -> magento_oauth1::Result<()> {
let client = Client::from_config(config)?;

let page = client
    .get(
        "/rest/all/V1/orders",
        Some(json!({
            "searchCriteria": {
                "pageSize": 10,
                "currentPage": 2,
            }
        })),
    )
    .await;

match page {
    Ok(orders) => println!("{} orders", orders["total_count"]),
    Err(Error::Api(err)) => eprintln!("rejected: {}", err),
    Err(err) => return Err(err),
}
# Ok(())
# }
```
*/
mod client;
mod config;
mod encoding;
mod error;
mod params;
mod request;
mod resources;
mod response;
mod secrets;
mod signer;
mod transport;

// exposed to external program
pub use client::Client;
pub use config::ClientConfig;
pub use encoding::percent_encode_strict;
pub use error::{ApiError, Error, Result};
pub use params::Param;
pub use request::RequestEnvelope;
pub use resources::DEFAULT_PAGE_SIZE;
pub use response::read_api_response;
pub use secrets::{Credentials, SecretsProvider};
pub use signer::{
    generate_nonce, signature_base_string, OAuthParameters, ParameterSet, SignedParameters,
    Signer, SigningKeyEncoding,
};
pub use transport::{HttpRequest, ReqwestTransport, Transport};

// exposed constant variables
/// Represents `oauth_consumer_key`.
pub const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
/// Represents `oauth_nonce`.
pub const OAUTH_NONCE_KEY: &str = "oauth_nonce";
/// Represents `oauth_signature`.
pub const OAUTH_SIGNATURE_KEY: &str = "oauth_signature";
/// Represents `oauth_signature_method`.
pub const OAUTH_SIGNATURE_METHOD_KEY: &str = "oauth_signature_method";
/// Represents `oauth_timestamp`.
pub const OAUTH_TIMESTAMP_KEY: &str = "oauth_timestamp";
/// Represents `oauth_token`.
pub const OAUTH_TOKEN_KEY: &str = "oauth_token";
/// Represents `oauth_version`.
pub const OAUTH_VERSION_KEY: &str = "oauth_version";

// crate-private constant variables
pub(crate) const OAUTH_KEY_PREFIX: &str = "oauth_";

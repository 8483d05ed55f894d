use http::Method;
use log::debug;
use serde::Serialize;
use serde_json::Value;

use crate::request::RequestEnvelope;
use crate::response::read_api_response;
use crate::transport::{ReqwestTransport, Transport};
use crate::{ClientConfig, Credentials, OAuthParameters, Result, Signer, SigningKeyEncoding};

/// A signing client bound to one Magento installation.
///
/// The client only holds immutable configuration, so a single instance can
/// serve concurrent calls from several tasks.
#[derive(Debug, Clone)]
pub struct Client<T = ReqwestTransport> {
    origin: String,
    credentials: Credentials,
    key_encoding: SigningKeyEncoding,
    transport: T,
}

impl Client<ReqwestTransport> {
    /// Constructs a new `Client` talking through a default `reqwest::Client`.
    pub fn new<O: Into<String>>(origin: O, credentials: Credentials) -> Self {
        Client::with_transport(origin, credentials, ReqwestTransport::new())
    }

    /// Constructs a `Client` from its configuration.
    ///
    /// # Errors
    ///
    /// This method fails whenever the origin is not an absolute URL or the
    /// HTTP client cannot be initialized.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = match config.timeout_duration() {
            Some(timeout) => ReqwestTransport::with_timeout(timeout)?,
            None => ReqwestTransport::new(),
        };
        Ok(Client::with_transport(config.origin, config.credentials, transport)
            .signing_key_encoding(config.signing_key_encoding))
    }
}

impl<T> Client<T>
where
    T: Transport,
{
    /// Constructs a new `Client` with specifying the transport.
    pub fn with_transport<O: Into<String>>(
        origin: O,
        credentials: Credentials,
        transport: T,
    ) -> Self {
        Client {
            origin: origin.into(),
            credentials,
            key_encoding: SigningKeyEncoding::default(),
            transport,
        }
    }

    /// Selects how the secrets are written into the HMAC key.
    pub fn signing_key_encoding(self, key_encoding: SigningKeyEncoding) -> Self {
        Client {
            key_encoding,
            ..self
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Signs and sends one request, returning the decoded response.
    ///
    /// For `GET` a mapping in `data` is sent as the query string and signed;
    /// for `POST` and `PUT` it is sent as a JSON body.
    ///
    /// # Errors
    ///
    /// [`Error::Transport`](crate::Error::Transport) when the request could
    /// not be delivered, [`Error::Api`](crate::Error::Api) when the API
    /// answered with an error payload.
    pub async fn call(&self, method: Method, path: &str, data: Option<Value>) -> Result<Value> {
        self.call_with_params(method, path, data, &OAuthParameters::new())
            .await
    }

    pub(crate) async fn call_with_params(
        &self,
        method: Method,
        path: &str,
        data: Option<Value>,
        oauth: &OAuthParameters<'_>,
    ) -> Result<Value> {
        let signer = Signer::new(&self.credentials).key_encoding(self.key_encoding);
        let request = RequestEnvelope::new(method, path, data)
            .into_http_request(&self.origin, &signer, oauth)?;
        debug!("{} {}", request.method, request.url);

        let body = self.transport.execute(request).await?;
        read_api_response(&body)
    }

    /// Convenience method to make a `GET` request to a path.
    pub async fn get(&self, path: &str, data: Option<Value>) -> Result<Value> {
        self.call(Method::GET, path, data).await
    }

    /// Convenience method to make a `POST` request to a path.
    pub async fn post<D: Serialize + ?Sized>(&self, path: &str, data: &D) -> Result<Value> {
        let data = serde_json::to_value(data)?;
        self.call(Method::POST, path, Some(data)).await
    }

    /// Convenience method to make a `PUT` request to a path.
    pub async fn put<D: Serialize + ?Sized>(&self, path: &str, data: &D) -> Result<Value> {
        let data = serde_json::to_value(data)?;
        self.call(Method::PUT, path, Some(data)).await
    }

    /// Convenience method to make a `DELETE` request to a path.
    pub async fn delete(&self, path: &str, data: Option<Value>) -> Result<Value> {
        self.call(Method::DELETE, path, data).await
    }
}

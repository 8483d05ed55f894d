use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::Method;
use serde_json::Value;

use crate::encoding::percent_encode_strict;
use crate::params::Param;
use crate::transport::HttpRequest;
use crate::{OAuthParameters, Result, SecretsProvider, Signer};

const APPLICATION_JSON: &str = "application/json";

/// One API call before signing: a verb, a path below the origin and the
/// optional payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestEnvelope {
    method: Method,
    path: String,
    data: Option<Value>,
}

impl RequestEnvelope {
    pub fn new<P: Into<String>>(method: Method, path: P, data: Option<Value>) -> Self {
        RequestEnvelope {
            method,
            path: path.into(),
            data,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The query pairs for a GET request, recursively sorted and flattened.
    ///
    /// Only a non-empty mapping contributes; every other payload is
    /// ignored for GET and never signed for the other verbs.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        if self.method != Method::GET {
            return Vec::new();
        }
        match self.data.clone().and_then(Param::from_json) {
            Some(param @ Param::Map(_)) if !param.is_empty() => param.sort_recursively().flatten(),
            _ => Vec::new(),
        }
    }

    fn body(&self) -> Result<Option<String>> {
        if self.method == Method::POST || self.method == Method::PUT {
            Ok(Some(serde_json::to_string(&self.data)?))
        } else {
            Ok(None)
        }
    }

    /// Signs the envelope and lays it out as an HTTP request.
    ///
    /// The URL is `origin + path` verbatim. For GET the flattened payload
    /// is both signed and sent as the query string; POST and PUT carry the
    /// payload as a JSON body that is not part of the signature.
    pub fn into_http_request<S: SecretsProvider>(
        self,
        origin: &str,
        signer: &Signer<'_, S>,
        oauth: &OAuthParameters<'_>,
    ) -> Result<HttpRequest> {
        let url = format!("{}{}", origin, self.path);
        let query = self.query_pairs();
        let body = self.body()?;

        let mut params = oauth.build(signer.secrets());
        params.extend(query.iter().cloned());
        let signed = signer.sign_parameters(self.method.as_str(), &url, params);

        let target = if query.is_empty() {
            url
        } else {
            let query_string = query
                .iter()
                .map(|(k, v)| format!("{}={}", percent_encode_strict(k), percent_encode_strict(v)))
                .collect::<Vec<String>>()
                .join("&");
            format!("{}?{}", url, query_string)
        };

        let mut headers = vec![(AUTHORIZATION, signed.authorization_header())];
        if body.is_some() {
            headers.push((CONTENT_TYPE, APPLICATION_JSON.to_string()));
        }

        Ok(HttpRequest {
            method: self.method,
            url: target,
            headers,
            body,
        })
    }
}

use log::warn;
use serde_json::Value;

use crate::{ApiError, Error, Result};

const MESSAGE_KEY: &str = "message";
const PARAMETERS_KEY: &str = "parameters";

/// Decodes a response body.
///
/// The HTTP status is not consulted: an object carrying a non-null
/// `message` is an error payload, anything else is the result.
pub fn read_api_response(text: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(text)?;
    match value.get(MESSAGE_KEY) {
        None | Some(Value::Null) => Ok(value),
        Some(message) => {
            let message = match message {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            let parameters = match value.get(PARAMETERS_KEY) {
                None | Some(Value::Null) => None,
                Some(p) => Some(p.clone()),
            };
            let err = ApiError {
                message,
                parameters,
            };
            warn!("API responded with an error: {}", err);
            Err(Error::Api(err))
        }
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use serde_json::json;

    #[test]
    fn parse_success_unchanged() {
        let parsed = read_api_response(r#"{"id": 5, "sku": "ABC"}"#).unwrap();
        assert_eq!(parsed, json!({"id": 5, "sku": "ABC"}));
    }

    #[test]
    fn parse_success_non_object() {
        assert_eq!(read_api_response("true").unwrap(), json!(true));
        assert_eq!(read_api_response("[1,2]").unwrap(), json!([1, 2]));
        assert_eq!(read_api_response(r#""42""#).unwrap(), json!("42"));
    }

    #[test]
    fn parse_error_with_parameters() {
        let parsed = read_api_response(r#"{"message": "Not found", "parameters": ["sku"]}"#);
        if let Err(Error::Api(err)) = parsed {
            assert_eq!(err.message, "Not found");
            assert_eq!(err.parameters, Some(json!(["sku"])));
            let text = err.to_string();
            assert!(text.contains("Not found"));
            assert!(text.contains(r#"["sku"]"#));
        } else {
            panic!("expected an API error, got {:?}", parsed)
        }
    }

    #[test]
    fn parse_error_without_parameters() {
        let parsed = read_api_response(r#"{"message": "Invalid signature", "parameters": null}"#);
        if let Err(Error::Api(err)) = parsed {
            assert_eq!(err.message, "Invalid signature");
            assert_eq!(err.parameters, None);
        } else {
            panic!("expected an API error, got {:?}", parsed)
        }
    }

    #[test]
    fn null_message_is_not_an_error() {
        let parsed = read_api_response(r#"{"message": null, "id": 1}"#).unwrap();
        assert_eq!(parsed["id"], 1);
    }

    #[test]
    fn malformed_body() {
        let parsed = read_api_response("<html>502 Bad Gateway</html>");
        assert!(matches!(parsed, Err(Error::Json(_))));
    }
}

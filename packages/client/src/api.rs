//! Response models for the Flashdeck API

use flashdeck_core::constants::TOKEN_EXPIRED_TYPE;
use flashdeck_core::Permission;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ClientError, ClientResult};

/// Parsed JSON body of a server response, kept unmodified
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerResponse(Value);

impl ServerResponse {
    pub fn new(body: Value) -> Self {
        Self(body)
    }

    pub fn body(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }

    /// `success` flag of the response; missing counts as failure
    pub fn success(&self) -> bool {
        self.0.get("success").and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(Value::as_str)
    }

    /// Response type discriminator (`type` field)
    pub fn kind(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    pub fn is_token_expired(&self) -> bool {
        self.kind() == Some(TOKEN_EXPIRED_TYPE)
    }

    /// Decode the body into a typed response model
    pub fn decode<T: DeserializeOwned>(&self) -> ClientResult<T> {
        T::deserialize(&self.0).map_err(|e| {
            ClientError::invalid_response(format!(
                "Unexpected {} response shape: {}",
                self.kind().unwrap_or("untyped"),
                e
            ))
        })
    }
}

impl From<Value> for ServerResponse {
    fn from(body: Value) -> Self {
        Self::new(body)
    }
}

/// Outcome of a pipeline call, decoded once at the pipeline boundary
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// `success: true`
    Success(ServerResponse),
    /// Any other well-formed response that is not a session expiry
    Failure(ServerResponse),
    /// The server rejected the session token; the client has been logged out
    SessionExpired,
}

impl ApiResponse {
    pub fn classify(response: ServerResponse) -> Self {
        if response.is_token_expired() {
            ApiResponse::SessionExpired
        } else if response.success() {
            ApiResponse::Success(response)
        } else {
            ApiResponse::Failure(response)
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success(_))
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiResponse::SessionExpired)
    }

    pub fn response(&self) -> Option<&ServerResponse> {
        match self {
            ApiResponse::Success(response) | ApiResponse::Failure(response) => Some(response),
            ApiResponse::SessionExpired => None,
        }
    }

    /// The raw response, or `None` when the request was aborted by expiry
    pub fn into_response(self) -> Option<ServerResponse> {
        match self {
            ApiResponse::Success(response) | ApiResponse::Failure(response) => Some(response),
            ApiResponse::SessionExpired => None,
        }
    }
}

/// Successful login response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub person_id: Option<String>,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_success_and_failure() {
        let ok = ApiResponse::classify(json!({"success": true, "message": "Saved"}).into());
        assert!(ok.is_success());
        assert_eq!(ok.response().unwrap().message(), Some("Saved"));

        let failed = ApiResponse::classify(json!({"success": false, "message": "Nope"}).into());
        assert!(matches!(failed, ApiResponse::Failure(_)));

        let untyped = ApiResponse::classify(json!([1, 2, 3]).into());
        assert!(matches!(untyped, ApiResponse::Failure(_)));
    }

    #[test]
    fn test_classify_token_expired_drops_body() {
        let body = json!({"type": "TokenExpired", "success": false, "message": "TokenExpired"});
        let response = ApiResponse::classify(body.into());

        assert!(response.is_session_expired());
        assert_eq!(response.into_response(), None);
    }

    #[test]
    fn test_decode_login_response() {
        let response = ServerResponse::new(json!({
            "type": "Login",
            "success": true,
            "token": "0b6f5d8e-2c5e-4a4f-9d7e-4b0a3c1e2f10",
            "personId": "5a1b",
            "permissions": ["USER", "ADMIN"]
        }));

        let login: LoginResponse = response.decode().unwrap();
        assert_eq!(login.token, "0b6f5d8e-2c5e-4a4f-9d7e-4b0a3c1e2f10");
        assert_eq!(login.person_id.as_deref(), Some("5a1b"));
        assert_eq!(login.permissions, vec![Permission::User, Permission::Admin]);
    }

    #[test]
    fn test_decode_reports_shape_errors() {
        let response = ServerResponse::new(json!({"type": "List", "items": []}));
        let err = response.decode::<LoginResponse>().unwrap_err();
        assert!(err.to_string().contains("List"));
    }
}

//! Login token claims
//!
//! The API issues a JWT whose payload carries the user id. The client reads
//! the payload to learn which user it is acting for. The signature is not
//! checked here.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::UserId;

/// The claims the client cares about
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    #[serde(rename = "userId")]
    pub user_id: UserId,

    /// Expiry as seconds since the Unix epoch
    #[serde(default)]
    pub exp: Option<i64>,
}

impl TokenClaims {
    /// Expiry as a timestamp, when present and representable
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
    }
}

/// Decode the payload segment of a JWT
pub fn decode_claims(token: &str) -> ExpenseResult<TokenClaims> {
    let mut segments = token.trim().split('.');
    let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(_header), Some(payload), Some(_signature), None) => payload,
        _ => return Err(malformed("expected three dot-separated segments")),
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| malformed(&e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| malformed(&e.to_string()))
}

fn malformed(reason: &str) -> ExpenseError {
    ExpenseError::Validation(format!("Malformed login token: {}", reason))
}

#[cfg(test)]
pub(crate) fn encode_test_token(payload: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{}.{}.signature", header, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_user_id() {
        let token = encode_test_token(&json!({"userId": "65a1f0c2", "iat": 1700000000}));
        let claims = decode_claims(&token).unwrap();

        assert_eq!(claims.user_id, UserId::new("65a1f0c2"));
        assert_eq!(claims.exp, None);
        assert_eq!(claims.expires_at(), None);
    }

    #[test]
    fn test_decode_expiry() {
        let token = encode_test_token(&json!({"userId": "u", "exp": 1700003600}));
        let claims = decode_claims(&token).unwrap();

        let expiry = claims.expires_at().unwrap();
        assert_eq!(expiry.timestamp(), 1700003600);
    }

    #[test]
    fn test_tolerates_padding() {
        let header = URL_SAFE_NO_PAD.encode(b"{}");
        let body = base64::engine::general_purpose::URL_SAFE.encode(br#"{"userId":"abc"}"#);
        let token = format!("{}.{}.sig", header, body);

        assert_eq!(decode_claims(&token).unwrap().user_id, UserId::new("abc"));
    }

    #[test]
    fn test_rejects_malformed_tokens() {
        assert!(decode_claims("not-a-jwt").unwrap_err().is_validation());
        assert!(decode_claims("a.!!!.c").unwrap_err().is_validation());

        let missing_user = encode_test_token(&json!({"sub": "x"}));
        assert!(decode_claims(&missing_user).unwrap_err().is_validation());
    }
}

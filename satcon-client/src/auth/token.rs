// JWT claim extraction

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
struct Claims {
    #[serde(default)]
    exp: Option<Value>,
}

/// Read the `exp` claim (Unix seconds) from a JWT without verifying it.
///
/// Returns `None` when the token is not a JWT, the payload is not JSON, or
/// `exp` is absent or not numeric.
pub fn expiration_from_jwt(token: &str) -> Option<i64> {
    let payload = token.split('.').nth(1)?;
    // Some issuers pad their segments; URL_SAFE_NO_PAD rejects padding.
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;
    match claims.exp? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt(payload: &str) -> String {
        format!(
            "{}.{}.signature",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn test_numeric_exp() {
        assert_eq!(expiration_from_jwt(&jwt(r#"{"exp":1700000000}"#)), Some(1_700_000_000));
        assert_eq!(expiration_from_jwt(&jwt(r#"{"exp":1700000000.5}"#)), Some(1_700_000_000));
    }

    #[test]
    fn test_missing_or_invalid_exp() {
        assert_eq!(expiration_from_jwt(&jwt(r#"{"sub":"user"}"#)), None);
        assert_eq!(expiration_from_jwt(&jwt(r#"{"exp":"soon"}"#)), None);
        assert_eq!(expiration_from_jwt("opaque-token"), None);
        assert_eq!(expiration_from_jwt("a.!!!.c"), None);
    }
}

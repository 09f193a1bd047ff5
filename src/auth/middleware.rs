//! Token extraction from incoming requests

use crate::auth::{validate_token, Claims};
use crate::config::AuthConfig;
use crate::error::{Error, Result};
use crate::identity::{Identity, IdentityDirectory};
use axum::http::{header, HeaderMap};
use std::sync::Arc;

pub const TOKEN_COOKIE: &str = "creatorhub_token";

/// Find a raw token in the `Authorization` header or the token cookie
pub fn extract_token(headers: &HeaderMap) -> Option<&str> {
    if let Some(auth_str) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            return Some(token.trim());
        }
    }

    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|cookies| {
            cookies
                .split(';')
                .find_map(|cookie| cookie.trim().strip_prefix(TOKEN_COOKIE)?.strip_prefix('='))
        })
}

/// Extract and validate claims from request headers
pub fn extract_claims(headers: &HeaderMap, config: &AuthConfig) -> Result<Claims> {
    let token = extract_token(headers).ok_or(Error::NotAuthenticated)?;
    validate_token(token, config)
}

/// Resolve the identity a request's token was issued to.
///
/// The subject, email and role in the claims must all still match one
/// directory entry.
pub fn identify_request(
    headers: &HeaderMap,
    directory: &IdentityDirectory,
    config: &AuthConfig,
) -> Result<Arc<Identity>> {
    let claims = extract_claims(headers, config)?;
    let identity = directory
        .lookup(&claims.email)
        .filter(|identity| identity.id == claims.sub)
        .ok_or_else(|| Error::InvalidToken("unknown subject".to_string()))?;

    if claims.get_role().ok() != Some(identity.role()) {
        return Err(Error::InvalidToken("role does not match".to_string()));
    }
    Ok(identity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::create_token;
    use axum::http::HeaderValue;
    use jsonwebtoken::{encode, EncodingKey, Header};

    #[test]
    fn test_no_token() {
        let headers = HeaderMap::new();
        assert!(extract_token(&headers).is_none());
        assert!(matches!(
            extract_claims(&headers, &AuthConfig::default()),
            Err(Error::NotAuthenticated)
        ));
    }

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn test_cookie_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; creatorhub_token=abc.def.ghi"),
        );
        assert_eq!(extract_token(&headers), Some("abc.def.ghi"));
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(&format!("Bearer {}", token)).unwrap();
        headers.insert(header::AUTHORIZATION, value);
        headers
    }

    #[test]
    fn test_identify_request() {
        let config = AuthConfig::default();
        let directory = IdentityDirectory::builtin().unwrap();
        let mia = directory.lookup("mia@creator.com").unwrap();
        let token = create_token(&mia, &config).unwrap();

        let identity = identify_request(&bearer(&token), &directory, &config).unwrap();
        assert_eq!(identity.email, "mia@creator.com");
        assert!(matches!(
            identify_request(&HeaderMap::new(), &directory, &config),
            Err(Error::NotAuthenticated)
        ));
    }

    #[test]
    fn test_identify_request_rejects_role_mismatch() {
        let config = AuthConfig::default();
        let directory = IdentityDirectory::builtin().unwrap();
        let mia = directory.lookup("mia@creator.com").unwrap();

        let mut claims = Claims::from_identity(&mia, 3600);
        claims.role = "admin".to_string();
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            identify_request(&bearer(&token), &directory, &config),
            Err(Error::InvalidToken(_))
        ));
    }

    #[test]
    fn test_basic_auth_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwdw=="));
        assert!(extract_token(&headers).is_none());
    }
}

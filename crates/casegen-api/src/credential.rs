//! Sign-in credential decoding.
//!
//! The backend hands the client an opaque Google ID token (a JWT). The
//! client never verifies the signature — the backend does that on every
//! authorized call — it only needs the payload claims to render the
//! signed-in profile. Each failure mode is a distinct variant because
//! the UI shows a different message for each.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::Deserialize;
use thiserror::Error;

use casegen_core::UserProfile;

/// Errors from decoding a pasted sign-in credential.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    /// The sign-in flow yielded no token at all.
    #[error("empty credential")]
    Empty,

    /// The token is not a decodable JWT.
    #[error("malformed credential")]
    Malformed,

    /// The token decoded but carries no usable email claim.
    #[error("credential has no email claim")]
    MissingEmail,
}

/// Claims we care about from the ID token payload.
#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    picture: Option<String>,
}

/// Decode a pasted ID token into a display profile.
///
/// Requires a non-empty `email` claim; `name` falls back to the email
/// when absent, matching how the profile header renders.
pub fn decode_credential(token: &str) -> Result<UserProfile, CredentialError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(CredentialError::Empty);
    }

    let mut segments = token.split('.');
    let (_header, payload) = match (segments.next(), segments.next()) {
        (Some(h), Some(p)) if !p.is_empty() => (h, p),
        _ => return Err(CredentialError::Malformed),
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| CredentialError::Malformed)?;
    let claims: Claims =
        serde_json::from_slice(&bytes).map_err(|_| CredentialError::Malformed)?;

    let email = match claims.email {
        Some(email) if !email.is_empty() => email,
        _ => return Err(CredentialError::MissingEmail),
    };

    let name = match claims.name {
        Some(name) if !name.is_empty() => name,
        _ => email.clone(),
    };

    Ok(UserProfile {
        name,
        email,
        picture: claims.picture,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_token(payload_json: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(payload_json);
        format!("{header}.{payload}.sig")
    }

    #[test]
    fn test_decode_full_profile() {
        let token = make_token(
            r#"{"email":"dana@example.com","name":"Dana","picture":"https://p.example/1.png"}"#,
        );
        let profile = decode_credential(&token).unwrap();
        assert_eq!(profile.name, "Dana");
        assert_eq!(profile.email, "dana@example.com");
        assert_eq!(profile.picture.as_deref(), Some("https://p.example/1.png"));
    }

    #[test]
    fn test_decode_name_falls_back_to_email() {
        let token = make_token(r#"{"email":"dana@example.com"}"#);
        let profile = decode_credential(&token).unwrap();
        assert_eq!(profile.name, "dana@example.com");
        assert!(profile.picture.is_none());
    }

    #[test]
    fn test_empty_credential() {
        assert_eq!(decode_credential(""), Err(CredentialError::Empty));
        assert_eq!(decode_credential("   "), Err(CredentialError::Empty));
    }

    #[test]
    fn test_missing_email_claim() {
        let token = make_token(r#"{"name":"Dana"}"#);
        assert_eq!(decode_credential(&token), Err(CredentialError::MissingEmail));

        let token = make_token(r#"{"email":"","name":"Dana"}"#);
        assert_eq!(decode_credential(&token), Err(CredentialError::MissingEmail));
    }

    #[test]
    fn test_malformed_token() {
        assert_eq!(
            decode_credential("not-a-jwt"),
            Err(CredentialError::Malformed)
        );
        assert_eq!(
            decode_credential("a.!!!not-base64!!!.c"),
            Err(CredentialError::Malformed)
        );
        // Valid base64 but not JSON
        let bogus = format!("h.{}.s", URL_SAFE_NO_PAD.encode("plain text"));
        assert_eq!(decode_credential(&bogus), Err(CredentialError::Malformed));
    }
}

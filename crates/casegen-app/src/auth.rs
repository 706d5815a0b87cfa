//! Session and authorization gate.
//!
//! Three states: Unconfigured (no sign-in provider client id — terminal),
//! SignedOut, SignedIn. The SignedIn→SignedOut transition fires either
//! on explicit sign-out or when any authorized call comes back 401; both
//! clear all workflow state, but only the 401 path is silent.

use casegen_core::UserProfile;

/// User-facing messages for the sign-in failure paths.
pub const MSG_EMPTY_CREDENTIAL: &str = "Google sign-in returned an empty credential.";
pub const MSG_MISSING_EMAIL: &str = "Your Google account must include an email address.";
pub const MSG_UNVERIFIABLE: &str = "Unable to verify Google credential. Please try again.";

/// Authorization state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// No Google client id is configured. Terminal: the app renders a
    /// configuration notice and nothing else.
    Unconfigured,

    /// Waiting for a credential. `error` holds the message from the most
    /// recent failed sign-in attempt, if any.
    SignedOut { error: Option<String> },

    /// Fully signed in; `credential` is the opaque bearer token attached
    /// to every authorized request. Never refreshed — expiry is handled
    /// reactively via the 401 transition.
    SignedIn {
        profile: UserProfile,
        credential: String,
    },
}

impl AuthState {
    pub fn signed_out() -> Self {
        AuthState::SignedOut { error: None }
    }

    pub fn signed_out_with_error(message: impl Into<String>) -> Self {
        AuthState::SignedOut {
            error: Some(message.into()),
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, AuthState::SignedIn { .. })
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            AuthState::SignedIn { profile, .. } => Some(profile),
            _ => None,
        }
    }

    pub fn credential(&self) -> Option<&str> {
        match self {
            AuthState::SignedIn { credential, .. } => Some(credential.as_str()),
            _ => None,
        }
    }

    /// The sign-in error to render under the credential prompt.
    pub fn sign_in_error(&self) -> Option<&str> {
        match self {
            AuthState::SignedOut { error } => error.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_out_accessors() {
        let state = AuthState::signed_out();
        assert!(!state.is_signed_in());
        assert!(state.profile().is_none());
        assert!(state.credential().is_none());
        assert!(state.sign_in_error().is_none());
    }

    #[test]
    fn test_signed_out_with_error() {
        let state = AuthState::signed_out_with_error(MSG_EMPTY_CREDENTIAL);
        assert_eq!(state.sign_in_error(), Some(MSG_EMPTY_CREDENTIAL));
    }

    #[test]
    fn test_signed_in_accessors() {
        let state = AuthState::SignedIn {
            profile: UserProfile {
                name: "Dana".into(),
                email: "dana@example.com".into(),
                picture: None,
            },
            credential: "tok".into(),
        };
        assert!(state.is_signed_in());
        assert_eq!(state.credential(), Some("tok"));
        assert_eq!(state.profile().unwrap().email, "dana@example.com");
    }
}

//! Controller-level mutual exclusion for in-flight mutations.
//!
//! Each mutation holds a token `(Operation, key)` for its duration. A
//! second trigger for the same token is rejected in `update()` no matter
//! which control issued it. Tokens are released in the completion
//! handler on both the success and error paths, so a finished request
//! always returns the UI to an interactive state.

use std::collections::HashSet;

/// The mutating operations that take a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Generate,
    UploadStandard,
    UploadRequirement,
    /// Keyed by requirement id.
    RegenerateRequirement,
    /// Keyed by testcase id.
    RegenerateTestcase,
    /// Keyed by testcase id.
    SaveTestcase,
    /// Keyed by testcase id.
    CreateJira,
}

/// A token identifying one in-flight mutation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub operation: Operation,
    pub key: String,
}

impl Token {
    pub fn new(operation: Operation, key: impl Into<String>) -> Self {
        Self {
            operation,
            key: key.into(),
        }
    }

    /// Token for an operation with a single global instance.
    pub fn global(operation: Operation) -> Self {
        Self::new(operation, "")
    }
}

/// The set of currently held tokens.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    tokens: HashSet<Token>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to acquire a token. Returns false when the same token is
    /// already held — the caller must drop the trigger.
    pub fn try_begin(&mut self, token: Token) -> bool {
        self.tokens.insert(token)
    }

    /// Release a token. Releasing an unheld token is a no-op (the
    /// sign-out transition clears the set while completions may still
    /// arrive).
    pub fn finish(&mut self, token: &Token) {
        self.tokens.remove(token);
    }

    pub fn is_held(&self, token: &Token) -> bool {
        self.tokens.contains(token)
    }

    /// True when the given operation is in flight for the given key.
    pub fn holds(&self, operation: Operation, key: &str) -> bool {
        self.tokens.contains(&Token::new(operation, key))
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_trigger_rejected() {
        let mut inflight = InFlight::new();
        let token = Token::new(Operation::SaveTestcase, "TC-1");
        assert!(inflight.try_begin(token.clone()));
        assert!(!inflight.try_begin(token.clone()));
        inflight.finish(&token);
        assert!(inflight.try_begin(token));
    }

    #[test]
    fn test_tokens_are_scoped_by_key() {
        let mut inflight = InFlight::new();
        assert!(inflight.try_begin(Token::new(Operation::RegenerateTestcase, "TC-1")));
        assert!(inflight.try_begin(Token::new(Operation::RegenerateTestcase, "TC-2")));
        assert!(inflight.holds(Operation::RegenerateTestcase, "TC-1"));
        assert!(!inflight.holds(Operation::RegenerateTestcase, "TC-3"));
    }

    #[test]
    fn test_tokens_are_scoped_by_operation() {
        let mut inflight = InFlight::new();
        assert!(inflight.try_begin(Token::new(Operation::SaveTestcase, "TC-1")));
        assert!(inflight.try_begin(Token::new(Operation::CreateJira, "TC-1")));
    }

    #[test]
    fn test_finish_unheld_is_noop() {
        let mut inflight = InFlight::new();
        inflight.finish(&Token::global(Operation::Generate));
        assert!(!inflight.holds(Operation::Generate, ""));
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut inflight = InFlight::new();
        inflight.try_begin(Token::global(Operation::Generate));
        inflight.try_begin(Token::new(Operation::CreateJira, "TC-1"));
        inflight.clear();
        assert!(!inflight.holds(Operation::Generate, ""));
        assert!(!inflight.holds(Operation::CreateJira, "TC-1"));
    }
}

/// Source of the bearer token attached to every request.
///
/// The token is fetched fresh for each request, never cached by the client,
/// so a provider backed by mutable storage takes effect on the next call.
pub trait TokenProvider: Send + Sync {
    fn bearer_token(&self) -> String;
}

/// A fixed token.
pub struct StaticToken(pub String);

impl TokenProvider for StaticToken {
    fn bearer_token(&self) -> String {
        self.0.clone()
    }
}

impl<F> TokenProvider for F
where
    F: Fn() -> String + Send + Sync,
{
    fn bearer_token(&self) -> String {
        self()
    }
}

/// Reads the token from an environment variable on every call.
///
/// A missing or non-unicode variable yields an empty token; the backend
/// rejects it, the client does not pre-validate.
pub struct EnvToken(pub String);

impl TokenProvider for EnvToken {
    fn bearer_token(&self) -> String {
        std::env::var(&self.0).unwrap_or_default()
    }
}

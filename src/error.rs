use thiserror::Error;

/// All errors produced by the coursesync API.
#[derive(Debug, Error)]
pub enum Error {
    /// Transient transport failure. Eligible for retry at the folder-items
    /// fetch boundary.
    #[error("network: {0}")]
    Network(String),

    /// The current user lacks permission for the requested resource.
    /// Absorbed at folder granularity, fatal everywhere else.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Provider returned data the client cannot interpret.
    #[error("malformed data: {0}")]
    Malformed(String),

    /// Opaque failure from a provider implementation.
    #[error(transparent)]
    Provider(Box<dyn std::error::Error + Send + Sync>),

    /// Internal invariant violated (selection path out of range, etc).
    #[error("{0}")]
    State(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn network(msg: impl Into<String>) -> Self {
        Error::Network(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Error::Unauthorized(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Error::Malformed(msg.into())
    }

    pub fn provider(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Error::Provider(Box::new(err))
    }

    pub fn state(msg: impl Into<String>) -> Self {
        Error::State(msg.into())
    }

    /// Whether a retry may succeed. Only transient network failures qualify;
    /// authorization and data errors are deterministic.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Network(_))
    }
}

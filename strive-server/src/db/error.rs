//! Database error type

/// Errors from the connection lifecycle and store operations.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Store unreachable or client could not be built.
    #[error("connection error: {0}")]
    Connection(String),

    /// Handle requested before connect() or after close().
    #[error("database is not connected")]
    NotConnected,

    #[error("connection manager is already connected")]
    AlreadyConnected,

    /// A closed manager cannot be reconnected.
    #[error("connection manager has been closed")]
    Closed,

    #[error("{operation} timed out after {seconds}s")]
    Timeout { operation: &'static str, seconds: u64 },

    /// Insert failed on a live connection.
    #[error("write failed: {0}")]
    Write(String),

    #[error("read failed: {0}")]
    Read(String),
}

impl DbError {
    /// True when the store itself is unavailable, as opposed to a single
    /// operation failing.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::NotConnected | Self::Closed)
    }

    /// Fold any failure while establishing the client into `Connection`.
    pub fn into_connection(self) -> Self {
        match self {
            Self::Connection(_) => self,
            other => Self::Connection(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_folds_into_connection() {
        let err = DbError::Timeout {
            operation: "ping",
            seconds: 10,
        }
        .into_connection();
        match err {
            DbError::Connection(message) => assert_eq!(message, "ping timed out after 10s"),
            other => panic!("expected connection error, got {:?}", other),
        }
    }

    #[test]
    fn connection_error_is_kept_as_is() {
        let err = DbError::Connection("refused".into()).into_connection();
        assert_eq!(err.to_string(), "connection error: refused");
    }
}

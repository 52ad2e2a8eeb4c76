use std::path::PathBuf;

/// Alias for `Result<T, AkError>`.
pub type AkResult<T> = Result<T, AkError>;

/// Errors raised by the character store.
///
/// The store's degrading API (`load`/`save`) never returns these; it logs
/// them and falls back to an empty database or a `false` flag.
#[derive(Debug, thiserror::Error)]
pub enum AkError {
    /// The backing file or its directory could not be read or written.
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        /// The path being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The backing file is not a JSON array of string-to-string objects.
    #[error("malformed character database {}: {source}", .path.display())]
    Parse {
        /// The file that failed to parse.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The records could not be serialized.
    #[error("cannot encode character database for {}: {source}", .path.display())]
    Encode {
        /// The file being written.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

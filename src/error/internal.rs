use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse id from String
    ///
    /// Results a in 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// A joined row referenced a user that does not exist.
    ///
    /// The foreign keys make this unreachable under normal operation; hitting it
    /// means the schema or a migration is broken. Results in a 500 Internal
    /// Server Error with a generic message returned to client.
    #[error("Row references missing user '{user_id}'")]
    MissingJoinedUser {
        /// The user id the row pointed at
        user_id: String,
    },
}

//! Error types for list reconciliation.
//!
//! Client errors are classified so the reconciler can tell a list that is
//! gone from a request that failed. Reconciler errors carry the operation,
//! owner and list id so they can be acted on without further digging.

use std::fmt;
use thiserror::Error;

/// Textual marker the remote API puts in not-found failures
const NOT_FOUND_MARKER: &str = "HTTP status 404";

/// Categories of reconciliation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The remote list does not exist
    NotFound,
    /// A client call failed
    ClientFailure,
    /// A call succeeded but its response was unusable
    ProtocolViolation,
    /// Caller-supplied input could not be parsed
    MalformedInput,
    /// The operation does not apply to the resource's current state
    InvalidState,
}

impl ErrorCategory {
    /// Get a user-friendly description of this error category.
    pub fn description(&self) -> &'static str {
        match self {
            Self::NotFound => "List not found",
            Self::ClientFailure => "Remote call failed",
            Self::ProtocolViolation => "Unexpected remote response",
            Self::MalformedInput => "Malformed input",
            Self::InvalidState => "Operation not valid for this resource",
        }
    }

    /// Get actionable advice for resolving this error category.
    pub fn advice(&self) -> &'static str {
        match self {
            Self::NotFound => "Refresh state; the list was removed outside of this tool",
            Self::ClientFailure => "Check the backend and credentials, then run again",
            Self::ProtocolViolation => "The backend returned an empty list id; report it upstream",
            Self::MalformedInput => "Use the format ownerID/listID",
            Self::InvalidState => "Refresh or import the resource before retrying",
        }
    }
}

/// Errors reported by a list client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The list does not exist remotely
    #[error("HTTP status 404: {message}")]
    NotFound {
        /// What was looked up, or the raw error text
        message: String,
    },

    /// The remote side answered with a failure status
    #[error("HTTP status {status}: {message}")]
    Status {
        /// Status code
        status: u16,
        /// Message from the remote side
        message: String,
    },

    /// The call could not be completed
    #[error("{message}")]
    Transport {
        /// Description of the failure
        message: String,
    },

    /// The response could not be understood
    #[error("invalid response: {message}")]
    Decode {
        /// Description of what was wrong
        message: String,
    },
}

impl ClientError {
    /// Classify a textual client error.
    ///
    /// Recognizes `HTTP status NNN` anywhere in the text; a 404 becomes
    /// [`ClientError::NotFound`].
    pub fn from_message(message: &str) -> Self {
        let message = message.trim();

        if message.contains(NOT_FOUND_MARKER) {
            return Self::NotFound {
                message: message.to_string(),
            };
        }

        if let Some(status) = parse_status(message) {
            return Self::Status {
                status,
                message: message.to_string(),
            };
        }

        Self::Transport {
            message: message.to_string(),
        }
    }

    /// Whether the error means the list does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
            || matches!(self, Self::Status { status: 404, .. })
    }
}

fn parse_status(message: &str) -> Option<u16> {
    let (_, rest) = message.split_once("HTTP status ")?;
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Reconciler operations, used to attribute errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Patch,
    Delete,
    Import,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Self::Create => "creating",
            Self::Read => "reading",
            Self::Update => "updating",
            Self::Patch => "patching items of",
            Self::Delete => "deleting",
            Self::Import => "importing",
        };
        f.write_str(verb)
    }
}

/// Errors that can occur while reconciling a list.
#[derive(Debug, Error)]
pub enum Error {
    /// A client call failed
    #[error("error {operation} list{} for owner {owner_id:?}: {source}", display_id(.id.as_deref()))]
    Client {
        operation: Operation,
        owner_id: String,
        id: Option<String>,
        #[source]
        source: ClientError,
    },

    /// A mutation succeeded but returned no list id
    #[error("failed to find list id in response while {operation} list{} for owner {owner_id:?}; resource was empty", display_id(.id.as_deref()))]
    MissingResponseId {
        operation: Operation,
        owner_id: String,
        id: Option<String>,
    },

    /// Import identifier did not have the `owner/list` shape
    #[error("invalid id ({raw:?}) specified, should be in format \"ownerID/listID\"")]
    MalformedImportId {
        /// The identifier as given
        raw: String,
    },

    /// Operation needs a list id but none is known
    #[error("cannot finish {operation} list for owner {owner_id:?}: no list id is known")]
    NoResourceId {
        operation: Operation,
        owner_id: String,
    },

    /// Create called on a slot that already tracks a list
    #[error("list {id:?} already exists for owner {owner_id:?}")]
    ResourceExists { owner_id: String, id: String },
}

fn display_id(id: Option<&str>) -> String {
    id.map(|id| format!(" {id:?}")).unwrap_or_default()
}

impl Error {
    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Client { source, .. } if source.is_not_found() => ErrorCategory::NotFound,
            Self::Client { .. } => ErrorCategory::ClientFailure,
            Self::MissingResponseId { .. } => ErrorCategory::ProtocolViolation,
            Self::MalformedImportId { .. } => ErrorCategory::MalformedInput,
            Self::NoResourceId { .. } | Self::ResourceExists { .. } => {
                ErrorCategory::InvalidState
            }
        }
    }

    /// The operation the error happened in, when known.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::Client { operation, .. }
            | Self::MissingResponseId { operation, .. }
            | Self::NoResourceId { operation, .. } => Some(*operation),
            Self::MalformedImportId { .. } => Some(Operation::Import),
            Self::ResourceExists { .. } => Some(Operation::Create),
        }
    }
}

/// Result type for list clients.
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Result type for reconciliation.
pub type Result<T> = std::result::Result<T, Error>;

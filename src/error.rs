use sesevent_types::TimestampError;

/// Why a document could not be read as an SES event.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The input is not well-formed JSON.
    #[error("malformed JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    /// An instant field held a string that is not an ISO-8601 date-time.
    #[error("{path}: {source}")]
    Timestamp {
        path: String,
        #[source]
        source: TimestampError,
    },

    /// A value has the wrong JSON type for its field.
    #[error("{path}: {reason}")]
    Shape { path: String, reason: String },
}

impl ParseError {
    /// JSON path of the offending value, when known.
    pub fn path(&self) -> Option<&str> {
        match self {
            ParseError::Syntax(_) => None,
            ParseError::Timestamp { path, .. } | ParseError::Shape { path, .. } => Some(path),
        }
    }
}

use std::fmt;

/// Classified failure from the data layer.
///
/// Handlers branch on the kind and never see raw backend error shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// Missing or malformed input, caught before any network call.
    /// The message names the offending field.
    Validation(String),
    /// Unique-constraint violation or an explicit duplicate signal.
    /// Non-fatal: forms render an "already submitted" state for it.
    Duplicate(String),
    /// Backend table missing or access policy misconfigured.
    Configuration(String),
    /// Unrecognized backend failure; the message is kept for diagnostics.
    Unknown(String),
}

impl DataError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, DataError::Duplicate(_))
    }

    /// Text safe to put in front of a user. `Unknown` falls back to a
    /// generic line; the raw message still goes to the log via `Display`.
    pub fn user_message(&self) -> &str {
        match self {
            DataError::Validation(msg)
            | DataError::Duplicate(msg)
            | DataError::Configuration(msg) => msg,
            DataError::Unknown(_) => "Something went wrong. Please try again.",
        }
    }
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Validation(msg) => write!(f, "Validation error: {msg}"),
            DataError::Duplicate(msg) => write!(f, "Duplicate: {msg}"),
            DataError::Configuration(msg) => write!(f, "Configuration error: {msg}"),
            DataError::Unknown(msg) => write!(f, "Backend error: {msg}"),
        }
    }
}

impl std::error::Error for DataError {}

/// Map a backend error body (`code` + `message`) to the error taxonomy.
///
/// The codes are the Postgres/PostgREST ones the hosted store actually
/// emits: `42P01` undefined table, `42501` insufficient privilege (the
/// usual symptom of a row-level-security misconfiguration), `23505`
/// unique violation.
pub fn classify(code: &str, message: &str) -> DataError {
    match code {
        "42P01" => DataError::Configuration(
            "Database table not found. The backend schema has not been set up.".to_string(),
        ),
        "42501" => DataError::Configuration(
            "Permission denied by the backend. Check the row-level security policies."
                .to_string(),
        ),
        "23505" => DataError::Duplicate("This email is already registered.".to_string()),
        "PGRST204" => DataError::Configuration(
            "Backend table or column mismatch. Check the schema.".to_string(),
        ),
        _ if message.contains("row-level security") => DataError::Configuration(
            "Permission denied by the backend. Check the row-level security policies."
                .to_string(),
        ),
        _ if message.is_empty() => {
            DataError::Unknown("The backend returned an unrecognized error".to_string())
        }
        _ => DataError::Unknown(message.to_string()),
    }
}

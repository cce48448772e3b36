use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatorError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Dispatch errors
    #[error("command '{0}' not found")]
    CommandNotFound(String),

    #[error("command '{0}' is already registered")]
    DuplicateCommand(String),

    #[error("usage: {0}")]
    MissingArgument(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Auth errors
    #[error("must be logged in: {0}")]
    NotLoggedIn(#[source] Box<GatorError>),

    // User errors
    #[error("user '{0}' does not exist")]
    UserNotFound(String),

    #[error("user '{0}' already exists")]
    UserAlreadyExists(String),

    // Feed errors
    #[error("Invalid feed URL: {0}")]
    InvalidUrl(String),

    #[error("Feed not found: {0}")]
    FeedNotFound(String),

    #[error("Feed already exists: {0}")]
    FeedAlreadyExists(String),

    #[error("Already following: {0}")]
    AlreadyFollowing(String),

    // Network errors
    #[error("performing request: {0}")]
    Http(#[from] reqwest::Error),

    #[error("bad status code: {0}")]
    BadStatus(u16),

    #[error("reading response body: {0}")]
    BodyRead(#[source] reqwest::Error),

    #[error("fetch cancelled")]
    Cancelled,

    // Parsing errors
    #[error("unmarshalling XML: {0}")]
    FeedParse(String),

    // Storage errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type GatorResult<T> = Result<T, GatorError>;

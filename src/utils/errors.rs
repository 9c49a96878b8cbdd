#![forbid(unsafe_code)]

use poem_openapi::Object;
use thiserror::Error;

/// Errors enumerates the process-level errors raised while starting up.
#[derive(Error, Debug)]
pub enum Errors {
    /// Input parameter logging.
    #[error("wish_server input parameters:\n{}", .0)]
    InputParms(String),

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Inaccessible or invalid logger configuration.
    #[error("Unable to initialize Log4rs using: {}", .0)]
    Log4rsInitialization(String),

    #[error("Reading application configuration file: {}", .0)]
    ReadingConfigFile(String),

    #[error("Unable to parse TOML file: {}", .0)]
    TOMLParseError(String),

    #[error("Invalid value for environment variable {}: {}", .0, .1)]
    InvalidEnvValue(String, String),

    #[error("Unable to load HTML templates: {}", .0)]
    TemplateInit(String),
}

/// WishError enumerates the request-level failures.  All of them are the
/// caller's fault and surface as 400 Bad Request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WishError {
    #[error("name length must be between 1 and {} characters", .0)]
    Length(usize),

    #[error("name contains invalid characters")]
    Charset,

    #[error("Name is required")]
    MissingParameter,
}

// ---------------------------------------------------------------------------
// HttpResult:
// ---------------------------------------------------------------------------
/// Body returned by the JSON api on failure.
#[derive(Object, Debug)]
pub struct HttpResult {
    pub result_code: String,
    pub result_msg: String,
}

impl HttpResult {
    pub fn new(result_code: String, result_msg: String) -> Self {
        Self { result_code, result_msg }
    }
}

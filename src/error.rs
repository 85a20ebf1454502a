use thiserror::Error;

/// Error returned by the binary-facing layers.
///
/// Exit codes:
/// - `2`: bad input (usage, unreadable files, malformed lexicons)
/// - `3`: not enough data to score
/// - `4`: internal or computation failure
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Failures of the alignment/scoring core.
///
/// All of these are fatal for the corpus-level computation that raised them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("reference and hypothesis lexicons disagree at entry {index}: {reason}")]
    MismatchedCorpus { index: usize, reason: String },
    #[error("corpus has no entries")]
    EmptyCorpus,
    #[error("insufficient data for bootstrap: {entries} entries, {resamples} resamples")]
    InsufficientData { entries: usize, resamples: usize },
    #[error("error rate is undefined: total reference length is zero")]
    UndefinedErrorRate,
    #[error("confidence level must lie in (0, 1), got {level}")]
    InvalidConfidenceLevel { level: f64 },
}

impl ScoringError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::MismatchedCorpus { .. } | Self::InvalidConfidenceLevel { .. } => 2,
            Self::EmptyCorpus | Self::InsufficientData { .. } | Self::UndefinedErrorRate => 3,
        }
    }
}

impl From<ScoringError> for AppError {
    fn from(err: ScoringError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

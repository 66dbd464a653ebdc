use std::fmt;

#[derive(Debug)]
pub enum FrameworkError {
    Store(StoreError),
    Source(SourceError),
    Config(ConfigError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    NotFound(String),
    AlreadySettled(String),
}

#[derive(Debug)]
pub enum SourceError {
    StartupFailed(String),
    ExecutionError(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    ValidationError(String),
}

impl fmt::Display for FrameworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameworkError::Store(e) => write!(f, "Store error: {}", e),
            FrameworkError::Source(e) => write!(f, "Capture source error: {}", e),
            FrameworkError::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "No captured event with id {}", id),
            StoreError::AlreadySettled(id) => write!(f, "Event {} is no longer pending", id),
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::StartupFailed(msg) => write!(f, "Startup failed: {}", msg),
            SourceError::ExecutionError(msg) => write!(f, "Execution error: {}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for FrameworkError {}
impl std::error::Error for StoreError {}
impl std::error::Error for SourceError {}
impl std::error::Error for ConfigError {}

impl From<StoreError> for FrameworkError {
    fn from(error: StoreError) -> Self {
        FrameworkError::Store(error)
    }
}

impl From<SourceError> for FrameworkError {
    fn from(error: SourceError) -> Self {
        FrameworkError::Source(error)
    }
}

impl From<ConfigError> for FrameworkError {
    fn from(error: ConfigError) -> Self {
        FrameworkError::Config(error)
    }
}

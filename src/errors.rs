use std::fmt;

#[derive(Debug, Clone)]
pub enum SnaplinkError {
    Validation(String),
    NotFound(String),
    DuplicateCode(String),
    CacheConnection(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Serialization(String),
}

impl SnaplinkError {
    pub fn code(&self) -> &'static str {
        match self {
            SnaplinkError::Validation(_) => "E001",
            SnaplinkError::NotFound(_) => "E002",
            SnaplinkError::DuplicateCode(_) => "E003",
            SnaplinkError::CacheConnection(_) => "E004",
            SnaplinkError::DatabaseConfig(_) => "E005",
            SnaplinkError::DatabaseConnection(_) => "E006",
            SnaplinkError::DatabaseOperation(_) => "E007",
            SnaplinkError::Serialization(_) => "E008",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            SnaplinkError::Validation(_) => "Validation Error",
            SnaplinkError::NotFound(_) => "Resource Not Found",
            SnaplinkError::DuplicateCode(_) => "Duplicate Short Code",
            SnaplinkError::CacheConnection(_) => "Cache Connection Error",
            SnaplinkError::DatabaseConfig(_) => "Database Configuration Error",
            SnaplinkError::DatabaseConnection(_) => "Database Connection Error",
            SnaplinkError::DatabaseOperation(_) => "Database Operation Error",
            SnaplinkError::Serialization(_) => "Serialization Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            SnaplinkError::Validation(msg) => msg,
            SnaplinkError::NotFound(msg) => msg,
            SnaplinkError::DuplicateCode(msg) => msg,
            SnaplinkError::CacheConnection(msg) => msg,
            SnaplinkError::DatabaseConfig(msg) => msg,
            SnaplinkError::DatabaseConnection(msg) => msg,
            SnaplinkError::DatabaseOperation(msg) => msg,
            SnaplinkError::Serialization(msg) => msg,
        }
    }
}

impl fmt::Display for SnaplinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type(), self.message())
    }
}

impl std::error::Error for SnaplinkError {}

// Convenience constructors
impl SnaplinkError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::NotFound(msg.into())
    }

    pub fn duplicate_code<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::DuplicateCode(msg.into())
    }

    pub fn cache_connection<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::CacheConnection(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::DatabaseOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::Serialization(msg.into())
    }
}

impl From<sea_orm::DbErr> for SnaplinkError {
    fn from(err: sea_orm::DbErr) -> Self {
        SnaplinkError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for SnaplinkError {
    fn from(err: serde_json::Error) -> Self {
        SnaplinkError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SnaplinkError>;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DatabaseError>;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(#[from] sqlx::Error),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Other(String),
}

impl DatabaseError {
    pub fn not_found(entity: &str, key: &str) -> Self {
        Self::NotFound(format!("{} '{}' not found", entity, key))
    }
}

impl From<DatabaseError> for echoboard_tenant::DirectoryError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(_) => echoboard_tenant::DirectoryError::NotFound,
            other => echoboard_tenant::DirectoryError::Backend(anyhow::Error::new(other)),
        }
    }
}

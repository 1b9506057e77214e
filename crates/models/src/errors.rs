use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("malformed cell: {0}")]
    Malformed(String),
}

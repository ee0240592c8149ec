use thiserror::Error;

pub type Result<T> = std::result::Result<T, HierarchyError>;

#[derive(Error, Debug)]
pub enum HierarchyError {
    #[error("type not found: {0}")]
    TypeNotFound(String),
}

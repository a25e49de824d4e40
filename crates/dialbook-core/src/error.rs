use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("{0} is required")]
    Validation(&'static str),
    #[error("contact id cannot be empty")]
    EmptyContactId,
}

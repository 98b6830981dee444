use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    /// The payload lacks the `}|{` separator between author and body.
    #[error("malformed payload, missing author separator: {payload:?}")]
    MalformedPayload { payload: String },
    #[error("user must not be empty")]
    EmptyUser,
    #[error("user must not contain '}}|{{', '<' or '>'")]
    InvalidUser,
    #[error("text must not contain '}}|{{'")]
    InvalidText,
}

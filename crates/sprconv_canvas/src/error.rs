#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    #[error("Given bitmap is absent, use remove() to clear the buffer")]
    InvalidArgument,
}

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The output sink rejected a write.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The node handed to the encoder is not a mapping.
    #[error("document root must be a mapping, found a {found}")]
    InvalidRoot { found: &'static str },
}

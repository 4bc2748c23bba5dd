use miette::Diagnostic;
use thiserror::Error;

/// Main error type for beltscreen operations
#[derive(Error, Diagnostic, Debug)]
pub enum BeltscreenError {
    #[error("IO error: {0}")]
    #[diagnostic(code(beltscreen::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(beltscreen::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(beltscreen::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Invalid image: {message}")]
    #[diagnostic(code(beltscreen::image))]
    InvalidImage {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Cancelled at {percent}%")]
    #[diagnostic(code(beltscreen::cancelled))]
    Cancelled { percent: u8 },

    #[error("Build error: {message}")]
    #[diagnostic(code(beltscreen::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, BeltscreenError>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("bad arguments: {0}")]
    Args(#[from] pico_args::Error),

    #[error("could not parse config: {0}")]
    Config(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("no solution with {required} groups per half at distance >= {threshold}")]
    NoSolution { required: usize, threshold: u32 },

    #[error("ascii art line {line} has {found} columns, expected {expected}")]
    RaggedArt {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("ascii art has no rows")]
    EmptyArt,

    #[error("malformed solution text at line {line}: {reason}")]
    ParseSolution { line: usize, reason: &'static str },
}

impl From<nanoserde::DeJsonErr> for Error {
    fn from(err: nanoserde::DeJsonErr) -> Self {
        Self::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

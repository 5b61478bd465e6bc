use thiserror::Error;

#[derive(Error, Debug)]
pub enum RichardsError {
    #[error(
        "System size error: upper={upper}, main={main}, lower={lower}, rhs={rhs}. \
         Diagonals and right hand side must share one non-zero length"
    )]
    InvalidSystemShape {
        upper: usize,
        main: usize,
        lower: usize,
        rhs: usize,
    },

    #[error("Vector length {found} does not match system size {expected}")]
    VectorLength { expected: usize, found: usize },

    #[error("Ill-formed system: solution component {row} is {value}")]
    IllFormedSystem { row: usize, value: f64 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type RichardsResult<T> = Result<T, RichardsError>;

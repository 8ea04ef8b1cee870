pub(crate) mod logger;

pub mod config;
pub mod contact;
pub mod default_configuration;
pub mod error;
pub mod validation;

pub use logger::{setup as setup_logger, teardown as teardown_logger};

pub type Result<T> = std::result::Result<T, error::Error>;

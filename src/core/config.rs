use std::time::Duration;
use log::LevelFilter;

pub trait Config: Send + Sync {
    /// Base URL of the contacts backend, without a trailing slash.
    fn server_url(&self) -> &str;

    /// How long a fetched list stays fresh before a mount refetches it.
    fn stale_time(&self) -> Duration;
    fn request_timeout(&self) -> Duration;

    fn log_level(&self) -> LevelFilter;
    fn log_file(&self) -> Option<&str>;

    #[cfg(feature = "inspect")]
    fn dump(&self);
}

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::sync::Mutex;
use once_cell::sync::Lazy;
use log::{
    LevelFilter,
    Metadata,
    Record
};

use crate::{
    Error,
    error::Result,
};

static LOG_FILE: Lazy<Mutex<Option<File>>> = Lazy::new(|| Mutex::new(None));

static MY_LOGGER: MyLogger = MyLogger;
struct MyLogger;
impl log::Log for MyLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!(
            "[{}] [{}] {}",
            record.target(),
            record.level(),
            record.args()
        );

        let mut file = LOG_FILE.lock().unwrap_or_else(|e| e.into_inner());
        match file.as_mut() {
            Some(f) => _ = writeln!(f, "{}", line),
            None => println!("{}", line),
        }
    }

    fn flush(&self) {
        let mut file = LOG_FILE.lock().unwrap_or_else(|e| e.into_inner());
        match file.as_mut() {
            Some(f) => _ = f.flush(),
            None => _ = io::stdout().flush(),
        }
    }
}

/// Installs the logger. Records go to `file` (appended) when given,
/// otherwise to stdout.
pub fn setup(level: LevelFilter, file: Option<&str>) -> Result<()> {
    let output = match file {
        Some(path) => Some(OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| Error::Io(format!("Opening log file {} error: {e}", path)))?
        ),
        None => None,
    };

    *LOG_FILE.lock().unwrap_or_else(|e| e.into_inner()) = output;

    _ = log::set_logger(&MY_LOGGER);
    log::set_max_level(level);
    Ok(())
}

/// Switches output back to stdout, closing any log file.
pub fn revert_console_output() {
    let mut file = LOG_FILE.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(mut f) = file.take() {
        _ = f.flush();
    }
}

pub fn teardown() {
    revert_console_output();
    log::set_max_level(LevelFilter::Off);
}

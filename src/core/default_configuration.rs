use std::env;
use std::fmt;
use std::fs;
use std::time::Duration;
use serde::Deserialize;
use log::LevelFilter;
use url::Url;

use crate::{
    Error,
    core::{
        config::Config,
        Result
    },
};

pub const SERVER_URL_ENV: &str = "CONTACTS_SERVER_URL";

pub const DEFAULT_STALE_TIME: u64 = 60;
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 30;

#[derive(Clone, Deserialize)]
struct LogCfg {
    #[serde(rename = "level")]
    level   : String,
    #[serde(rename = "logFile")]
    file    : Option<String>,

    #[serde(skip)]
    deserde_level: Option<LevelFilter>,
}

#[derive(Clone, Deserialize)]
struct Configuration {
    #[serde(rename = "serverUrl")]
    server_url  : Option<String>,

    // seconds
    #[serde(rename = "staleTime")]
    stale_time  : Option<u64>,
    #[serde(rename = "timeout")]
    timeout     : Option<u64>,

    #[serde(rename = "logger")]
    logger      : Option<LogCfg>,

    #[serde(skip)]
    deserde_url : String,
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "serverUrl:{},staleTime:{}s,timeout:{}s,logLevel:{}",
            self.deserde_url,
            self.stale_time().as_secs(),
            self.request_timeout().as_secs(),
            self.log_level()
        )?;
        if let Some(file) = self.log_file() {
            write!(f, ",logFile:{}", file)?;
        }
        Ok(())
    }
}

pub struct Builder<'a> {
    server_url  : Option<&'a str>,
    stale_time  : Option<Duration>,
    timeout     : Option<Duration>,

    log_level   : Option<LevelFilter>,
    log_file    : Option<&'a str>,

    cfg         : Option<Configuration>,
}

impl<'a> Builder<'a> {
    pub fn new() -> Builder<'a> {
        Self {
            server_url  : None,
            stale_time  : None,
            timeout     : None,
            log_level   : None,
            log_file    : None,
            cfg         : None,
        }
    }

    pub fn with_server_url(&mut self, url: &'a str) -> &mut Self {
        self.server_url = Some(url);
        self
    }

    pub fn with_stale_time(&mut self, stale_time: Duration) -> &mut Self {
        self.stale_time = Some(stale_time);
        self
    }

    pub fn with_request_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_logger(&mut self, level: LevelFilter, file: Option<&'a str>) -> &mut Self {
        self.log_level = Some(level);
        self.log_file = file;
        self
    }

    pub fn load(&mut self, input: &str) -> Result<&mut Self> {
        let data = fs::read_to_string(input).map_err(|e| {
            Error::Io(format!("Reading config error: {}", e))
        })?;

        let cfg = serde_json::from_str::<Configuration>(&data).map_err(|e| {
            Error::Argument(format!("bad config, error: {}", e))
        })?;

        self.cfg = Some(cfg);
        Ok(self)
    }

    pub fn build(&mut self) -> Result<Box<dyn Config>> {
        Ok(Box::new(Configuration::new(self)?))
    }
}

impl Configuration {
    fn new(b: &Builder) -> Result<Self> {
        let mut cfg = match b.cfg.as_ref() {
            Some(cfg) => cfg.clone(),
            None => Self {
                server_url  : None,
                stale_time  : None,
                timeout     : None,
                logger      : None,
                deserde_url : String::new(),
            }
        };

        // builder > environment > config file
        let url = b.server_url.map(|v| v.to_string())
            .or_else(|| env::var(SERVER_URL_ENV).ok().filter(|v| !v.trim().is_empty()))
            .or_else(|| cfg.server_url.clone())
            .ok_or_else(|| Error::Argument(format!(
                "Missing server url, set it in the config file or with {}", SERVER_URL_ENV
            )))?;

        let url = url.trim().trim_end_matches('/').to_string();
        let parsed = Url::parse(&url)?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Argument(format!("Invalid server url: {}", url)));
        }
        cfg.deserde_url = url;

        if let Some(stale) = b.stale_time {
            cfg.stale_time = Some(stale.as_secs());
        }
        if let Some(timeout) = b.timeout {
            cfg.timeout = Some(timeout.as_secs());
        }
        if cfg.timeout == Some(0) {
            return Err(Error::Argument("Request timeout must be greater than zero".into()));
        }

        if let Some(ref mut logger) = cfg.logger {
            if let Some(level) = logger.level.parse::<LevelFilter>().ok() {
                logger.deserde_level = Some(level);
            } else {
                logger.deserde_level = Some(LevelFilter::Info);
            }
            if let Some(level) = b.log_level {
                logger.deserde_level = Some(level);
            }
            if let Some(file) = b.log_file {
                logger.file = Some(file.to_string());
            }
        } else {
            cfg.logger = Some(LogCfg {
                level: b.log_level.unwrap_or(LevelFilter::Info).to_string(),
                file: b.log_file.map(|f| f.to_string()),
                deserde_level: Some(b.log_level.unwrap_or(LevelFilter::Info)),
            });
        }

        Ok(cfg)
    }
}

impl Config for Configuration {
    fn server_url(&self) -> &str {
        &self.deserde_url
    }

    fn stale_time(&self) -> Duration {
        Duration::from_secs(self.stale_time.unwrap_or(DEFAULT_STALE_TIME))
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT))
    }

    fn log_level(&self) -> LevelFilter {
        self.logger.as_ref()
            .and_then(|v| v.deserde_level)
            .unwrap_or(LevelFilter::Info)
    }

    fn log_file(&self) -> Option<&str> {
        self.logger.as_ref().and_then(|v| v.file.as_deref())
    }

    #[cfg(feature = "inspect")]
    fn dump(&self) {
        println!("config: {}", self);
    }
}

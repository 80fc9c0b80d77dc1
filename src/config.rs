use std::io::ErrorKind;
use std::path::PathBuf;
use std::{fs, io};

use serde::Deserialize;

#[derive(Deserialize)]
pub struct Defaults {
    pub per_page: u32,
    pub index_base_name: Option<String>,
}

#[derive(Deserialize)]
pub struct Http {
    pub user_agent: Option<String>,
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct Config {
    pub defaults: Defaults,
    pub http: Option<Http>,
    pub log: Option<Log>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            defaults: Defaults {
                per_page: 100,
                index_base_name: None,
            },
            http: None,
            log: None,
        }
    }
}

impl Config {
    pub fn index_base_name(&self) -> &str {
        self.defaults.index_base_name.as_deref().unwrap_or("index")
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.http.as_ref().and_then(|http| http.user_agent.as_deref())
    }
}

pub fn read_config(cfg_path: &PathBuf) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.to_str().unwrap(), e))),
    };

    let cfg: Config = match toml::from_str::<Config>(cfg_content.as_str()) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_str = r##"
[defaults]
per_page = 25
index_base_name = "post"

[http]
user_agent = "unpress/0.3"

[log]
level = "Debug"
log_to_console = true
"##;
        let cfg: Config = toml::from_str::<Config>(toml_str).unwrap();
        assert_eq!(cfg.defaults.per_page, 25);
        assert_eq!(cfg.index_base_name(), "post");
        assert_eq!(cfg.user_agent(), Some("unpress/0.3"));

        let log = cfg.log.unwrap();
        assert!(log.log_to_console);
        assert!(log.location.is_none());
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.defaults.per_page, 100);
        assert_eq!(cfg.index_base_name(), "index");
        assert_eq!(cfg.user_agent(), None);
        assert!(cfg.log.is_none());
    }
}

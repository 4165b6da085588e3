use crate::conn::dweet::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_THING};
use crate::periph::thermometer::DEFAULT_RANGE;

use anyhow::{anyhow, Context, Result};
use std::env;
use std::fs;
use std::io;
use std::ops::Range;
use std::str::FromStr;
use std::time::Duration;
use toml::Value;

pub const SSID: &str = "SIM_WIFI";
pub const PASS: &str = "SIM_PASS";
pub const SEND_INTERVAL: Duration = Duration::from_secs(5);
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub ssid: String,
    pub pass: String,
    pub host: String,
    pub port: u16,
    pub thing: String,
    pub interval: Duration,
    pub timeout: Duration,
    pub min: i32,
    pub max: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            ssid: SSID.to_string(),
            pass: PASS.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            thing: DEFAULT_THING.to_string(),
            interval: SEND_INTERVAL,
            timeout: HTTP_TIMEOUT,
            min: DEFAULT_RANGE.start,
            max: DEFAULT_RANGE.end,
        }
    }
}

impl Settings {
    pub fn range(&self) -> Range<i32> {
        self.min..self.max
    }

    pub fn validate(&self) -> Result<()> {
        if self.min >= self.max {
            return Err(anyhow!(
                "temperature range {}..{} is empty",
                self.min,
                self.max
            ));
        }
        if self.port == 0 {
            return Err(anyhow!("port must not be 0"));
        }
        if self.thing.is_empty() {
            return Err(anyhow!("thing name must not be empty"));
        }
        if self.interval.is_zero() {
            return Err(anyhow!("send interval must not be 0"));
        }
        if self.timeout.is_zero() {
            return Err(anyhow!("http timeout must not be 0"));
        }
        Ok(())
    }
}

/// Defaults, then the toml file at `config_path` if present, then env vars.
pub fn read_settings(config_path: &str) -> Result<Settings> {
    let mut settings = match fs::read_to_string(config_path) {
        Ok(s) => parse_settings(&s).with_context(|| format!("bad config {}", config_path))?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("File {} not found, using default settings", config_path);
            Settings::default()
        }
        Err(e) => return Err(e).with_context(|| format!("couldn't read {}", config_path)),
    };
    apply_overrides(&mut settings, |k| env::var(k).ok())?;
    settings.validate()?;
    Ok(settings)
}

pub fn parse_settings(contents: &str) -> Result<Settings> {
    let table = Value::from_str(contents)
        .context("Couldn't read config, make sure it follows the toml format")?;
    let mut settings = Settings::default();
    if let Some(ssid) = read_string(&table, "ssid")? {
        settings.ssid = ssid;
    }
    if let Some(pass) = read_string(&table, "pass")? {
        settings.pass = pass;
    }
    if let Some(host) = read_string(&table, "host")? {
        settings.host = host;
    }
    if let Some(port) = read_int(&table, "port")? {
        settings.port = port
            .try_into()
            .map_err(|_| anyhow!("port {} is out of range", port))?;
    }
    if let Some(thing) = read_string(&table, "thing")? {
        settings.thing = thing;
    }
    if let Some(secs) = read_int(&table, "interval_secs")? {
        settings.interval = Duration::from_secs(non_negative("interval_secs", secs)?);
    }
    if let Some(secs) = read_int(&table, "timeout_secs")? {
        settings.timeout = Duration::from_secs(non_negative("timeout_secs", secs)?);
    }
    if let Some(min) = read_int(&table, "min")? {
        settings.min = min.try_into().map_err(|_| anyhow!("min {} too big", min))?;
    }
    if let Some(max) = read_int(&table, "max")? {
        settings.max = max.try_into().map_err(|_| anyhow!("max {} too big", max))?;
    }
    Ok(settings)
}

/// Env-style overrides; `lookup` is `env::var` outside of tests
pub fn apply_overrides<F>(settings: &mut Settings, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(ssid) = lookup("WIFI_SSID") {
        settings.ssid = ssid;
    }
    if let Some(pass) = lookup("WIFI_PASS") {
        settings.pass = pass;
    }
    if let Some(host) = lookup("DWEET_HOST") {
        settings.host = host;
    }
    if let Some(port) = lookup("DWEET_PORT") {
        settings.port = port
            .parse::<u16>()
            .with_context(|| format!("DWEET_PORT {:?} is not a port", port))?;
    }
    if let Some(thing) = lookup("DWEET_THING") {
        settings.thing = thing;
    }
    if let Some(secs) = lookup("SEND_INTERVAL_SECS") {
        let secs = secs
            .parse::<u64>()
            .with_context(|| format!("SEND_INTERVAL_SECS {:?} is not a number", secs))?;
        settings.interval = Duration::from_secs(secs);
    }
    Ok(())
}

fn read_string(table: &Value, key: &str) -> Result<Option<String>> {
    match table.get(key) {
        None => Ok(None),
        Some(v) => v
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| anyhow!("{} must be a string", key)),
    }
}

fn read_int(table: &Value, key: &str) -> Result<Option<i64>> {
    match table.get(key) {
        None => Ok(None),
        Some(v) => v
            .as_integer()
            .map(Some)
            .ok_or_else(|| anyhow!("{} must be an integer", key)),
    }
}

fn non_negative(key: &str, v: i64) -> Result<u64> {
    v.try_into()
        .map_err(|_| anyhow!("{} must not be negative", key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.host, "dweet.io");
        assert_eq!(s.port, 80);
        assert_eq!(s.thing, "esp32-software-only-demo");
        assert_eq!(s.interval, Duration::from_secs(5));
        assert_eq!(s.range(), 20..40);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_file() {
        let s = parse_settings("host = \"localhost\"\nport = 8080\ninterval_secs = 1\n").unwrap();
        assert_eq!(s.host, "localhost");
        assert_eq!(s.port, 8080);
        assert_eq!(s.interval, Duration::from_secs(1));
        assert_eq!(s.thing, DEFAULT_THING);
        assert_eq!(s.ssid, SSID);
    }

    #[test]
    fn test_parse_rejects_bad_values() {
        assert!(parse_settings("port = 70000").is_err());
        assert!(parse_settings("port = \"eighty\"").is_err());
        assert!(parse_settings("interval_secs = -5").is_err());
        assert!(parse_settings("not toml at all [").is_err());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("DWEET_HOST", "example.com"),
            ("DWEET_PORT", "8000"),
            ("DWEET_THING", "other-thing"),
            ("SEND_INTERVAL_SECS", "10"),
        ]
        .into_iter()
        .collect();
        let mut s = Settings::default();
        apply_overrides(&mut s, |k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(s.host, "example.com");
        assert_eq!(s.port, 8000);
        assert_eq!(s.thing, "other-thing");
        assert_eq!(s.interval, Duration::from_secs(10));
        assert_eq!(s.ssid, SSID);
    }

    #[test]
    fn test_override_bad_port() {
        let mut s = Settings::default();
        let res = apply_overrides(&mut s, |k| (k == "DWEET_PORT").then(|| "x".to_string()));
        assert!(res.is_err());
    }

    #[test]
    fn test_validate() {
        let empty_range = Settings {
            min: 40,
            max: 40,
            ..Default::default()
        };
        assert!(empty_range.validate().is_err());
        let no_thing = Settings {
            thing: String::new(),
            ..Default::default()
        };
        assert!(no_thing.validate().is_err());
        let no_port = Settings {
            port: 0,
            ..Default::default()
        };
        assert!(no_port.validate().is_err());
        let zeros = parse_settings("interval_secs = 0\ntimeout_secs = 0").unwrap();
        assert!(zeros.validate().is_err());
        let no_interval = Settings {
            interval: Duration::ZERO,
            ..Default::default()
        };
        assert!(no_interval.validate().is_err());
        let no_timeout = Settings {
            timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(no_timeout.validate().is_err());
    }

    #[test]
    fn test_zero_interval_override_fails_validation() {
        let mut s = Settings::default();
        apply_overrides(&mut s, |k| (k == "SEND_INTERVAL_SECS").then(|| "0".to_string())).unwrap();
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = env::temp_dir().join(format!("dweet-sensor-missing-{}.conf", std::process::id()));
        let s = read_settings(path.to_str().unwrap()).unwrap();
        assert_eq!(s.range(), 20..40);
    }

    #[test]
    fn test_unreadable_file_is_an_error() {
        let path = env::temp_dir().join(format!("dweet-sensor-binary-{}.conf", std::process::id()));
        fs::write(&path, [0xff, 0xfe, b'p', b'o', b'r', b't']).unwrap();
        let res = read_settings(path.to_str().unwrap());
        fs::remove_file(&path).ok();
        assert!(res.is_err());
    }

    #[test]
    fn test_directory_path_is_an_error() {
        let dir = env::temp_dir();
        assert!(read_settings(dir.to_str().unwrap()).is_err());
    }
}

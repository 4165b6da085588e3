use crate::core::config::Settings;

use anyhow::{anyhow, Result};
use log::*;

/// Handle to the station interface. There is no radio behind it.
#[derive(Debug)]
pub struct Wifi {
    ssid: String,
    connected: bool,
}

impl Wifi {
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn ssid(&self) -> &str {
        &self.ssid
    }
}

pub fn start_client(settings: &Settings) -> Result<Wifi> {
    let ssid = settings.ssid.as_str();
    if ssid.is_empty() {
        return Err(anyhow!("Wifi client needs an ssid"));
    }
    info!("Wifi client configuration set for {}", ssid);
    // credentials are accepted and never used
    debug!("ignoring password of {} bytes", settings.pass.len());
    info!("Wifi started!");
    Ok(Wifi {
        ssid: ssid.to_string(),
        connected: true,
    })
}

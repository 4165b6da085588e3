use crate::conn::dweet::dweet_path;
use crate::conn::http::{HttpGet, Response};
use crate::core::config::Settings;
use crate::periph::serial::Serial;
use crate::periph::thermometer::Thermometer;

use log::*;
use rand::Rng;
use std::io::Write;
use std::time::Duration;
use tokio::time;

pub const BANNER: &str = "ESP32 REST API Simulation Started";
/// Settle time after the console opens, before the banner
pub const STARTUP_DELAY: Duration = Duration::from_secs(1);

/// What one tick produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub temperature: i32,
    pub path: String,
    pub response: Response,
}

/// The whole device: one client, one probe, one console, driven by `run`.
pub struct Device<C: HttpGet, R: Rng, W: Write> {
    client: C,
    thermometer: Thermometer<R>,
    serial: Serial<W>,
    host: String,
    thing: String,
    interval: Duration,
}

impl<C: HttpGet, R: Rng, W: Write> Device<C, R, W> {
    pub fn new(
        client: C,
        thermometer: Thermometer<R>,
        serial: Serial<W>,
        settings: &Settings,
    ) -> Self {
        Self {
            client,
            thermometer,
            serial,
            host: settings.host.clone(),
            thing: settings.thing.clone(),
            interval: settings.interval,
        }
    }

    pub async fn setup(&mut self) {
        time::sleep(STARTUP_DELAY).await;
        self.serial.println(BANNER);
    }

    /// Loop forever: tick, then sleep the send interval.
    pub async fn run(&mut self) {
        info!("sending every {:?} as {}", self.interval, self.thing);
        loop {
            self.tick().await;
            time::sleep(self.interval).await;
        }
    }

    /// One read-send-print cycle. Client failures are printed as their
    /// sentinel status with an empty body and never returned.
    pub async fn tick(&mut self) -> Report {
        let temperature = self.thermometer.read();
        let path = dweet_path(&self.thing, temperature);
        debug!("temperature {} -> {}", temperature, path);

        self.serial.println(format!("Sending data to {}...", self.host));
        let response = match self.client.get(&path).await {
            Ok(r) => r,
            Err(e) => {
                warn!("GET {} failed: {}", path, e);
                Response::new(e.status_code(), "")
            }
        };

        self.serial
            .println(format!("Status Code: {}", response.status));
        self.serial.println("Response:");
        self.serial.println(&response.body);

        Report {
            temperature,
            path,
            response,
        }
    }

    pub fn serial(&self) -> &Serial<W> {
        &self.serial
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

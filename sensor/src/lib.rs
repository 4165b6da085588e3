//! A software-only stand-in for an ESP32 temperature node.
//!
//! The device joins a (simulated) access point, then forever reads a fake
//! temperature, posts it to dweet.io with a single GET and echoes the
//! status code and body to its serial console.

pub mod conn;
pub mod core;
pub mod periph;

pub use crate::conn::http::{DweetClient, HttpError, HttpGet, Response};
pub use crate::core::config::Settings;
pub use crate::core::looper::{Device, Report};
pub use crate::periph::serial::Serial;
pub use crate::periph::thermometer::Thermometer;

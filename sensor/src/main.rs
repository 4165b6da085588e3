use sensor::conn::{http::DweetClient, wifi};
use sensor::core::{config::read_settings, logs::setup_logging};
use sensor::{Device, Serial, Thermometer};

use clap::Parser;
use dotenv::dotenv;

#[derive(Parser, Debug)]
#[clap(about = "Posts a simulated temperature to dweet.io every few seconds")]
struct Args {
    /// toml file with overrides for the built-in settings
    #[clap(long, default_value = "sensor.conf")]
    config: String,
    /// RUST_LOG wins when set
    #[clap(long, default_value = "info")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let args = Args::parse();
    setup_logging("sensor", &args.log_level)?;

    let settings = read_settings(&args.config)?;
    log::info!(
        "=> {} to {}:{} as {}",
        settings.ssid,
        settings.host,
        settings.port,
        settings.thing
    );

    let wifi = wifi::start_client(&settings)?;
    log::info!("=> wifi connected: {}", wifi.is_connected());

    let client = DweetClient::new(&settings.host, settings.port, settings.timeout)?;
    let thermometer = Thermometer::from_entropy(settings.range());
    let mut device = Device::new(client, thermometer, Serial::stdout(), &settings);

    device.setup().await;
    device.run().await;
    Ok(())
}

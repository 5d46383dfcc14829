use esp_wifi_watering_advisor::app::App;
use esp_wifi_watering_advisor::clock::SystemClock;
use esp_wifi_watering_advisor::predictor::PredictorClient;
use esp_wifi_watering_advisor::sampler::Sampler;

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use std::time::{SystemTime, UNIX_EPOCH};

    use esp_idf_svc::hal::{delay::FreeRtos, peripherals::Peripherals};
    use esp_idf_svc::sntp::{EspSntp, SyncStatus};
    use esp_wifi_watering_advisor::board::Board;
    use esp_wifi_watering_advisor::predictor::transport::EspHttpTransport;
    use esp_wifi_watering_advisor::wifi_helper;
    use log::{info, warn};

    const SNTP_WAIT_ATTEMPTS: u8 = 20;

    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    let peripherals = Peripherals::take()?;

    let link = wifi_helper::connect_wifi(peripherals.modem)?;

    let sntp = EspSntp::new_default()?;
    for _ in 0..SNTP_WAIT_ATTEMPTS {
        if sntp.get_sync_status() == SyncStatus::Completed {
            break;
        }
        FreeRtos::delay_ms(500);
    }
    match sntp.get_sync_status() {
        SyncStatus::Completed => info!(
            "Time synchronized: {}",
            SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs()
        ),
        _ => warn!("Time not synchronized yet, calendar fallback until SNTP completes"),
    }

    let board = Board::new(peripherals.adc1, peripherals.pins)?;

    let mut app = App::new(
        Sampler::new(board.climate_sensor, board.soil_probe),
        PredictorClient::new(EspHttpTransport::new()),
        link,
        SystemClock::new(),
    );

    app.run()
}

/// Desktop dry run: same loop, simulated sensors, no network.
#[cfg(not(target_os = "espidf"))]
fn main() -> anyhow::Result<()> {
    use esp_wifi_watering_advisor::configuration::calibration::{MAX_SOIL_VALUE, MIN_SOIL_VALUE};
    use esp_wifi_watering_advisor::error::TransportError;
    use esp_wifi_watering_advisor::predictor::transport::{HttpResponse, Offline, Transport};
    use esp_wifi_watering_advisor::sensors::simulated::{SimulatedClimate, SimulatedSoil};

    struct NoTransport;

    impl Transport for NoTransport {
        fn post_form(&mut self, _url: &str, _body: &str) -> Result<HttpResponse, TransportError> {
            Err(TransportError::new(-1, "no HTTP client on this host"))
        }
    }

    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_secs()
        .init();

    log::warn!("Not running on ESP-IDF, using simulated sensors and no network");

    let mut app = App::new(
        Sampler::new(
            SimulatedClimate::new(),
            SimulatedSoil::new(MIN_SOIL_VALUE, MAX_SOIL_VALUE),
        ),
        PredictorClient::new(NoTransport),
        Offline,
        SystemClock::new(),
    );

    app.run()
}

use std::time::Duration;

pub const WIFI_SSID: &str = match option_env!("WIFI_SSID") {
    Some(ssid) => ssid,
    None => "",
};

pub const WIFI_PASS: &str = match option_env!("WIFI_PASS") {
    Some(pass) => pass,
    None => "",
};

pub const SERVER_BASE_URL: &str = match option_env!("SERVER_BASE_URL") {
    Some(url) => url,
    None => "http://192.168.70.1:5000",
};

pub const PREDICT_ENDPOINT: &str = "api/predict";

/// Cycle period of the polling loop.
pub const POLL_INTERVAL_MS: u64 = 5_000;

/// Sleep between two polls of the loop. Only bounds how late a cycle may start.
pub const IDLE_DELAY_MS: u64 = 50;

pub const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Larger replies are dropped instead of filling the heap.
pub const MAX_RESPONSE_BYTES: usize = 4096;

pub const WIFI_CONNECT_ATTEMPTS: u8 = 5;

/// Local time is UTC+7 (WIB).
pub const TZ_OFFSET_SECS: i32 = 7 * 3600;

/// Anything earlier means SNTP has not set the clock yet.
pub const MIN_SYNCED_EPOCH: i64 = 1_700_000_000;

pub const SENSOR_LOG_CAPACITY: usize = 10;

pub const MAX_ALTERNATIVE_TIMES: usize = 3;

pub fn make_http_url() -> String {
    format!(
        "{}/{}",
        SERVER_BASE_URL.trim_end_matches('/'),
        PREDICT_ENDPOINT
    )
}

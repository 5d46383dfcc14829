pub mod app;
pub mod clock;
pub mod configuration;
pub mod error;
pub mod models;
pub mod predictor;
pub mod presenter;
pub mod sampler;
pub mod sensor_log;
pub mod sensors;

#[cfg(target_os = "espidf")]
pub mod board;
#[cfg(target_os = "espidf")]
pub mod wifi_helper;

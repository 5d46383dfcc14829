pub mod calibration;
pub mod main_configuration;

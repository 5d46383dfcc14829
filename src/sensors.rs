pub mod moisture_sensor;
pub mod sensor;
pub mod simulated;

#[cfg(target_os = "espidf")]
pub mod dht_sensor;

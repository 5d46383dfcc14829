use esp_idf_svc::hal::{modem::Modem, peripheral::Peripheral};
use esp_idf_svc::{
    eventloop::EspSystemEventLoop,
    nvs::EspDefaultNvsPartition,
    sys::EspError,
    wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi},
};
use log::{info, warn};

use crate::configuration::main_configuration::{WIFI_CONNECT_ATTEMPTS, WIFI_PASS, WIFI_SSID};
use crate::predictor::NetworkLink;

/// Station link whose state is checked before each prediction.
pub struct WifiLink<'a> {
    wifi: BlockingWifi<EspWifi<'a>>,
}

impl<'a> WifiLink<'a> {
    fn associate(&mut self) -> Result<(), EspError> {
        if !self.wifi.is_started()? {
            self.wifi.start()?;
        }
        self.wifi.connect()?;
        self.wifi.wait_netif_up()?;

        match self.wifi.wifi().sta_netif().get_ip_info() {
            Ok(ip_info) => info!("Wifi connected, IP address: {}", ip_info.ip),
            Err(e) => warn!("Wifi connected, IP address unknown: {e}"),
        }
        Ok(())
    }
}

impl<'a> NetworkLink for WifiLink<'a> {
    fn is_online(&self) -> bool {
        match self.wifi.is_connected() {
            Ok(connected) => connected,
            Err(e) => {
                warn!("Wifi status unavailable: {e}");
                false
            }
        }
    }

    fn reconnect(&mut self) -> bool {
        info!("Reconnecting to '{WIFI_SSID}'");
        let _ = self.wifi.disconnect();

        match self.associate() {
            Ok(_) => true,
            Err(e) => {
                warn!("Wifi reconnect failed: {e}");
                false
            }
        }
    }
}

/// Starts the station and tries to join the access point.
///
/// Only driver bring-up errors are returned. When every attempt fails the link is
/// handed back disconnected and the polling loop reconnects later.
pub fn connect_wifi<'a>(modem: impl Peripheral<P = Modem> + 'a) -> anyhow::Result<WifiLink<'a>> {
    let wifi_configuration: Configuration = Configuration::Client(ClientConfiguration {
        ssid: WIFI_SSID
            .try_into()
            .map_err(|_| anyhow::anyhow!("Wifi SSID too long"))?,
        bssid: None,
        auth_method: if WIFI_PASS.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        },
        password: WIFI_PASS
            .try_into()
            .map_err(|_| anyhow::anyhow!("Wifi password too long"))?,
        channel: None,
        ..Default::default()
    });

    let sys_loop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    let mut wifi = BlockingWifi::wrap(EspWifi::new(modem, sys_loop.clone(), Some(nvs))?, sys_loop)?;

    wifi.set_configuration(&wifi_configuration)?;

    let mut link = WifiLink { wifi };

    for i in 1..=WIFI_CONNECT_ATTEMPTS {
        info!("Wifi connection attempt #{i} to '{WIFI_SSID}'");
        let _ = link.wifi.disconnect();

        match link.associate() {
            Ok(_) => return Ok(link),
            Err(e) => warn!("Wifi attempt #{i} failed: {e}"),
        }
    }

    warn!("Wifi not connected after {WIFI_CONNECT_ATTEMPTS} attempts, continuing offline");
    Ok(link)
}

use log::{error, info, warn};
use time::OffsetDateTime;

use crate::configuration::main_configuration::make_http_url;
use crate::error::PredictError;
use crate::models::{Prediction, SensorSample};
use crate::predictor::request::{CalendarContext, PredictionRequest};
use crate::predictor::response::decode_response;
use crate::predictor::transport::{NetworkLink, Transport};
use crate::predictor::validation::check_consistency;

pub struct PredictorClient<T: Transport> {
    transport: T,
    url: String,
}

impl<T: Transport> PredictorClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_url(transport, make_http_url())
    }

    pub fn with_url(transport: T, url: impl Into<String>) -> Self {
        Self {
            transport,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends `sample` to the prediction server and blocks until it answers or the transport gives up.
    ///
    /// Never fails: every problem is logged and reported as [`Prediction::Unavailable`].
    pub fn predict(
        &mut self,
        sample: &SensorSample,
        link: &impl NetworkLink,
        local_now: Option<OffsetDateTime>,
    ) -> Prediction {
        if !link.is_online() {
            warn!("Wifi not connected, skipping prediction");
            return Prediction::Unavailable(PredictError::NetworkUnavailable);
        }

        if local_now.is_none() {
            warn!("Local time unavailable, sending fallback calendar");
        }

        let request = PredictionRequest::new(sample, CalendarContext::from_local(local_now));
        let body = request.to_form_body();
        info!("POST {} ({} bytes)", self.url, body.len());

        let response = match self.transport.post_form(&self.url, &body) {
            Ok(response) => response,
            Err(e) => {
                error!("Failed to send data! HTTP code: {}", e.code);
                return Prediction::Unavailable(e.into());
            }
        };

        if !response.is_success() {
            error!(
                "Prediction server answered HTTP {}: {}",
                response.status, response.body
            );
            return Prediction::Unavailable(PredictError::ServerStatus(response.status));
        }

        let result = match decode_response(&response.body) {
            Ok(result) => result,
            Err(e) => {
                error!("{e}");
                return Prediction::Unavailable(e);
            }
        };

        if let Err(inconsistency) =
            check_consistency(sample.soil_humidity_scaled, result.needs_watering)
        {
            warn!("{inconsistency}");
        }

        Prediction::Available(result)
    }
}

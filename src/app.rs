use std::thread;
use std::time::Duration;

use log::{info, warn};

use crate::clock::Clock;
use crate::configuration::main_configuration::{IDLE_DELAY_MS, POLL_INTERVAL_MS};
use crate::error::SensorError;
use crate::models::{Prediction, SensorSample};
use crate::predictor::{NetworkLink, PredictorClient, Transport};
use crate::presenter;
use crate::sampler::Sampler;
use crate::sensor_log::SensorLog;
use crate::sensors::sensor::{ClimateSensor, SoilProbe};

/// What one pass of the loop did.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// Interval not elapsed yet.
    Idle,
    SensorFault(SensorError),
    Completed {
        sample: SensorSample,
        prediction: Prediction,
    },
}

/// Everything the polling loop works on.
pub struct App<C, S, T, L, K>
where
    C: ClimateSensor,
    S: SoilProbe,
    T: Transport,
    L: NetworkLink,
    K: Clock,
{
    sampler: Sampler<C, S>,
    predictor: PredictorClient<T>,
    link: L,
    clock: K,
    sensor_log: SensorLog,
    last_prediction: Option<Prediction>,
    last_cycle_ms: u64,
    interval_ms: u64,
}

impl<C, S, T, L, K> App<C, S, T, L, K>
where
    C: ClimateSensor,
    S: SoilProbe,
    T: Transport,
    L: NetworkLink,
    K: Clock,
{
    pub fn new(sampler: Sampler<C, S>, predictor: PredictorClient<T>, link: L, clock: K) -> Self {
        Self {
            sampler,
            predictor,
            link,
            clock,
            sensor_log: SensorLog::new(),
            last_prediction: None,
            last_cycle_ms: 0,
            interval_ms: POLL_INTERVAL_MS,
        }
    }

    pub fn sensor_log(&self) -> &SensorLog {
        &self.sensor_log
    }

    pub fn last_prediction(&self) -> Option<&Prediction> {
        self.last_prediction.as_ref()
    }

    /// Runs a cycle if the poll interval has elapsed since the previous one (or since boot).
    pub fn poll(&mut self) -> CycleOutcome {
        let now_ms = self.clock.uptime_ms();
        if now_ms.saturating_sub(self.last_cycle_ms) < self.interval_ms {
            return CycleOutcome::Idle;
        }
        self.last_cycle_ms = now_ms;

        let sample = match self.sampler.sample(self.clock.now_utc().unix_timestamp()) {
            Ok(sample) => sample,
            Err(e) => {
                warn!("{e}, sample discarded");
                return CycleOutcome::SensorFault(e);
            }
        };
        self.sensor_log.record(sample);

        if !self.link.is_online() && self.link.reconnect() {
            info!("Network link restored");
        }

        let local_now = self.clock.now_local();
        let prediction = self.predictor.predict(&sample, &self.link, local_now);

        println!("{}", presenter::render(&sample, &prediction, local_now));

        let advice = prediction.result_or_default();
        info!(
            "Watering advice: {} at {} (p = {:.2})",
            if advice.needs_watering { "water" } else { "skip" },
            advice.optimal_time,
            advice.watering_probability
        );

        self.last_prediction = Some(prediction.clone());

        CycleOutcome::Completed { sample, prediction }
    }

    pub fn run(&mut self) -> ! {
        info!(
            "Polling every {} ms, predictions from {}",
            self.interval_ms,
            self.predictor.url()
        );

        loop {
            self.poll();
            thread::sleep(Duration::from_millis(IDLE_DELAY_MS));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use time::OffsetDateTime;

    use super::*;
    use crate::error::{PredictError, TransportError};
    use crate::predictor::HttpResponse;
    use crate::sensors::sensor::ClimateReading;

    struct ManualClock {
        ms: Cell<u64>,
        utc: OffsetDateTime,
    }

    impl ManualClock {
        fn new(unix: i64) -> Self {
            Self {
                ms: Cell::new(0),
                utc: OffsetDateTime::from_unix_timestamp(unix).unwrap(),
            }
        }
    }

    impl Clock for &ManualClock {
        fn uptime_ms(&self) -> u64 {
            self.ms.get()
        }

        fn now_utc(&self) -> OffsetDateTime {
            self.utc
        }
    }

    struct ScriptedClimate(Vec<ClimateReading>);

    impl ClimateSensor for ScriptedClimate {
        fn read(&mut self) -> ClimateReading {
            if self.0.is_empty() {
                ClimateReading {
                    temperature: 26.0,
                    humidity: 60.0,
                }
            } else {
                self.0.remove(0)
            }
        }
    }

    struct CountingSoil(u16);

    impl SoilProbe for CountingSoil {
        fn read_raw_value(&mut self) -> u16 {
            self.0 += 10;
            self.0
        }
    }

    struct Reply(u16, &'static str);

    impl Transport for Reply {
        fn post_form(&mut self, _url: &str, _body: &str) -> Result<HttpResponse, TransportError> {
            Ok(HttpResponse {
                status: self.0,
                body: self.1.to_string(),
            })
        }
    }

    /// Link that comes back on reconnect only when the access point is `reachable`.
    struct Link {
        online: bool,
        reachable: bool,
        reconnects: u32,
    }

    impl NetworkLink for Link {
        fn is_online(&self) -> bool {
            self.online
        }

        fn reconnect(&mut self) -> bool {
            self.reconnects += 1;
            self.online = self.reachable;
            self.online
        }
    }

    fn app<'a>(
        clock: &'a ManualClock,
        climate: Vec<ClimateReading>,
        online: bool,
    ) -> App<ScriptedClimate, CountingSoil, Reply, Link, &'a ManualClock> {
        App::new(
            Sampler::new(ScriptedClimate(climate), CountingSoil(2000)),
            PredictorClient::with_url(
                Reply(200, r#"{"membutuhkan_siram": "Ya", "waktu_optimal": "17:00"}"#),
                "http://server/api/predict",
            ),
            Link {
                online,
                reachable: online,
                reconnects: 0,
            },
            clock,
        )
    }

    #[test]
    fn first_cycle_waits_one_interval_after_boot() {
        let clock = ManualClock::new(1_760_715_000);
        let mut app = app(&clock, vec![], true);

        assert_eq!(app.poll(), CycleOutcome::Idle);
        clock.ms.set(POLL_INTERVAL_MS - 1);
        assert_eq!(app.poll(), CycleOutcome::Idle);
        assert!(app.sensor_log().is_empty());

        clock.ms.set(POLL_INTERVAL_MS);
        match app.poll() {
            CycleOutcome::Completed { sample, prediction } => {
                assert_eq!(sample.raw_soil_adc, 2010);
                assert_eq!(sample.timestamp, 1_760_715_000);
                assert_eq!(prediction.result().unwrap().optimal_time, "17:00");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(app.sensor_log().len(), 1);
        assert!(app.last_prediction().unwrap().is_available());
    }

    #[test]
    fn polls_are_gated_by_the_interval() {
        let clock = ManualClock::new(1_760_715_000);
        let mut app = app(&clock, vec![], true);

        clock.ms.set(POLL_INTERVAL_MS);
        assert!(matches!(app.poll(), CycleOutcome::Completed { .. }));

        clock.ms.set(2 * POLL_INTERVAL_MS - 1);
        assert_eq!(app.poll(), CycleOutcome::Idle);

        clock.ms.set(2 * POLL_INTERVAL_MS);
        assert!(matches!(app.poll(), CycleOutcome::Completed { .. }));

        clock.ms.set(2 * POLL_INTERVAL_MS + 10);
        assert_eq!(app.poll(), CycleOutcome::Idle);
        assert_eq!(app.sensor_log().len(), 2);
    }

    #[test]
    fn sensor_fault_skips_the_cycle() {
        let clock = ManualClock::new(1_760_715_000);
        let mut app = app(&clock, vec![ClimateReading::FAILED], true);

        clock.ms.set(POLL_INTERVAL_MS);
        assert!(matches!(app.poll(), CycleOutcome::SensorFault(_)));
        assert!(app.sensor_log().is_empty());
        assert!(app.last_prediction().is_none());

        clock.ms.set(2 * POLL_INTERVAL_MS);
        assert!(matches!(app.poll(), CycleOutcome::Completed { .. }));
        assert_eq!(app.sensor_log().len(), 1);
    }

    #[test]
    fn offline_cycle_still_logs_the_sample() {
        let clock = ManualClock::new(1_760_715_000);
        let mut app = app(&clock, vec![], false);

        clock.ms.set(POLL_INTERVAL_MS);
        match app.poll() {
            CycleOutcome::Completed { prediction, .. } => assert_eq!(
                prediction,
                Prediction::Unavailable(PredictError::NetworkUnavailable)
            ),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(app.sensor_log().len(), 1);
        assert!(!app.last_prediction().unwrap().is_available());
    }

    #[test]
    fn log_keeps_the_ten_latest_cycles() {
        let clock = ManualClock::new(1_760_715_000);
        let mut app = app(&clock, vec![], true);

        for cycle in 1..=11 {
            clock.ms.set(cycle * POLL_INTERVAL_MS);
            app.poll();
        }

        let raw: Vec<u16> = app.sensor_log().iter().map(|s| s.raw_soil_adc).collect();
        assert_eq!(raw.len(), 10);
        assert_eq!(raw.first(), Some(&2020));
        assert_eq!(raw.last(), Some(&2110));
    }

    #[test]
    fn dropped_link_is_reconnected_before_predicting() {
        let clock = ManualClock::new(1_760_715_000);
        let mut app = app(&clock, vec![], false);
        app.link.reachable = true;

        clock.ms.set(POLL_INTERVAL_MS);
        match app.poll() {
            CycleOutcome::Completed { prediction, .. } => assert!(prediction.is_available()),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(app.link.reconnects, 1);

        clock.ms.set(2 * POLL_INTERVAL_MS);
        app.poll();
        assert_eq!(app.link.reconnects, 1);
    }

    #[test]
    fn unreachable_network_keeps_the_loop_running() {
        let clock = ManualClock::new(1_760_715_000);
        let mut app = app(&clock, vec![], false);

        for cycle in 1..=3 {
            clock.ms.set(cycle * POLL_INTERVAL_MS);
            match app.poll() {
                CycleOutcome::Completed { prediction, .. } => assert_eq!(
                    prediction,
                    Prediction::Unavailable(PredictError::NetworkUnavailable)
                ),
                other => panic!("unexpected {other:?}"),
            }
        }

        assert_eq!(app.link.reconnects, 3);
        assert_eq!(app.sensor_log().len(), 3);
    }
}

//! Console report of a cycle: readings, soil status and watering schedule.

use std::fmt::{self, Write};

use time::macros::format_description;
use time::{OffsetDateTime, Time};

use crate::clock::format_datetime;
use crate::configuration::calibration::{SOIL_DRY, SOIL_VERY_DRY, SOIL_WET};
use crate::models::{Prediction, PredictionResult, SensorSample};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoilStatus {
    VeryDry,
    Dry,
    Normal,
    Wet,
}

impl SoilStatus {
    pub fn from_scaled(soil_humidity: f32) -> Self {
        if soil_humidity < SOIL_VERY_DRY {
            SoilStatus::VeryDry
        } else if soil_humidity < SOIL_DRY {
            SoilStatus::Dry
        } else if soil_humidity < SOIL_WET {
            SoilStatus::Normal
        } else {
            SoilStatus::Wet
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SoilStatus::VeryDry => "Very dry",
            SoilStatus::Dry => "Dry",
            SoilStatus::Normal => "Normal",
            SoilStatus::Wet => "Wet",
        }
    }
}

impl fmt::Display for SoilStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WateringDay {
    Today,
    Tomorrow,
}

/// Delay until a recommended watering time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WateringEta {
    pub day: WateringDay,
    pub minutes: u32,
}

impl WateringEta {
    pub fn hours(&self) -> u32 {
        self.minutes / 60
    }

    pub fn remaining_minutes(&self) -> u32 {
        self.minutes % 60
    }
}

impl fmt::Display for WateringEta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let day = match self.day {
            WateringDay::Today => "today",
            WateringDay::Tomorrow => "tomorrow",
        };
        write!(
            f,
            "{day}, in {} h {} min",
            self.hours(),
            self.remaining_minutes()
        )
    }
}

/// Parses a 24h "HH:MM" string.
pub fn parse_clock_time(value: &str) -> Option<Time> {
    Time::parse(value.trim(), format_description!("[hour]:[minute]")).ok()
}

/// Today when `target` is strictly later than `now`, otherwise tomorrow through midnight.
pub fn watering_eta(target: Time, now: Time) -> WateringEta {
    let (target_hour, target_minute) = (target.hour() as i32, target.minute() as i32);
    let (now_hour, now_minute) = (now.hour() as i32, now.minute() as i32);

    let (day, minutes) = if (target_hour, target_minute) > (now_hour, now_minute) {
        (
            WateringDay::Today,
            (target_hour - now_hour) * 60 + (target_minute - now_minute),
        )
    } else {
        (
            WateringDay::Tomorrow,
            (24 - now_hour + target_hour) * 60 + (target_minute - now_minute),
        )
    };

    WateringEta {
        day,
        minutes: minutes as u32,
    }
}

fn describe_time(value: &str, now: Option<Time>) -> String {
    match (parse_clock_time(value), now) {
        (Some(target), Some(now)) => format!("{value} ({})", watering_eta(target, now)),
        (Some(_), None) => format!("{value} (local time unknown)"),
        (None, _) => format!("{value} (unreadable time)"),
    }
}

fn render_sample(out: &mut String, sample: &SensorSample, local_now: Option<OffsetDateTime>) {
    let _ = writeln!(out, "=== Sensor readings ===");
    if let Some(now) = local_now {
        let _ = writeln!(out, "Time              : {}", format_datetime(&now));
    }
    let _ = writeln!(out, "Temperature       : {:.2} °C", sample.temperature);
    let _ = writeln!(out, "Air humidity      : {:.2} %", sample.relative_humidity);
    let _ = writeln!(
        out,
        "Soil moisture     : {} % (scale {:.2}, raw {})",
        sample.soil_moisture_percent, sample.soil_humidity_scaled, sample.raw_soil_adc
    );
    let _ = writeln!(
        out,
        "Soil status       : {}",
        SoilStatus::from_scaled(sample.soil_humidity_scaled)
    );
}

fn render_result(out: &mut String, result: &PredictionResult, now: Option<Time>) {
    let _ = writeln!(
        out,
        "Needs watering    : {}",
        if result.needs_watering { "Yes" } else { "No" }
    );
    let _ = writeln!(
        out,
        "Probability       : {:.1} %",
        result.watering_probability * 100.0
    );
    let _ = writeln!(
        out,
        "Optimal time      : {}",
        describe_time(&result.optimal_time, now)
    );

    if result.alternative_times.is_empty() {
        let _ = writeln!(out, "Alternative times : none");
    } else {
        let _ = writeln!(out, "Alternative times :");
        for time in result.alternative_times.iter() {
            let _ = writeln!(out, "  - {}", describe_time(time, now));
        }
    }
}

pub fn render(
    sample: &SensorSample,
    prediction: &Prediction,
    local_now: Option<OffsetDateTime>,
) -> String {
    let mut out = String::new();

    render_sample(&mut out, sample, local_now);

    let _ = writeln!(out, "=== Watering prediction ===");
    match prediction {
        Prediction::Available(result) => {
            render_result(&mut out, result, local_now.map(|now| now.time()))
        }
        Prediction::Unavailable(reason) => {
            let _ = writeln!(out, "Prediction unavailable: {reason}");
        }
    }

    out
}

use time::OffsetDateTime;
use url::form_urlencoded;

use crate::models::SensorSample;

/// Calendar features of the prediction model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarContext {
    pub hour: u8,
    pub day: u8,
    /// 1 = January.
    pub month: u8,
    /// 0 = Sunday.
    pub day_of_week: u8,
}

impl CalendarContext {
    /// Used while the clock is not synchronized: noon on Monday, January 1st.
    pub const FALLBACK: CalendarContext = CalendarContext {
        hour: 12,
        day: 1,
        month: 1,
        day_of_week: 1,
    };

    pub fn from_local(local: Option<OffsetDateTime>) -> Self {
        match local {
            Some(now) => Self {
                hour: now.hour(),
                day: now.day(),
                month: u8::from(now.month()),
                day_of_week: now.weekday().number_days_from_sunday(),
            },
            None => Self::FALLBACK,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionRequest {
    pub air_temp: f32,
    pub air_humidity: f32,
    pub soil_humidity: f32,
    pub calendar: CalendarContext,
}

impl PredictionRequest {
    pub fn new(sample: &SensorSample, calendar: CalendarContext) -> Self {
        Self {
            air_temp: sample.temperature,
            air_humidity: sample.relative_humidity,
            soil_humidity: sample.soil_humidity_scaled,
            calendar,
        }
    }

    pub fn to_form_body(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("air_temp", &self.air_temp.to_string())
            .append_pair("air_humidity", &self.air_humidity.to_string())
            .append_pair("soil_humidity", &self.soil_humidity.to_string())
            .append_pair("hour", &self.calendar.hour.to_string())
            .append_pair("day", &self.calendar.day.to_string())
            .append_pair("month", &self.calendar.month.to_string())
            .append_pair("dayofweek", &self.calendar.day_of_week.to_string())
            .finish()
    }
}

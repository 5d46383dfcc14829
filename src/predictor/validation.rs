use std::fmt;

use crate::configuration::calibration::{SOIL_VERY_DRY, SOIL_WET};

/// Server advice contradicting the soil reading. Advisory only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Inconsistency {
    DrySoilWithoutWatering { soil_humidity: f32 },
    WetSoilWithWatering { soil_humidity: f32 },
}

impl fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inconsistency::DrySoilWithoutWatering { soil_humidity } => write!(
                f,
                "Soil is very dry ({soil_humidity:.2} < {SOIL_VERY_DRY}) but the server advises no watering"
            ),
            Inconsistency::WetSoilWithWatering { soil_humidity } => write!(
                f,
                "Soil is wet ({soil_humidity:.2} > {SOIL_WET}) but the server advises watering"
            ),
        }
    }
}

pub fn check_consistency(soil_humidity: f32, needs_watering: bool) -> Result<(), Inconsistency> {
    if soil_humidity < SOIL_VERY_DRY && !needs_watering {
        return Err(Inconsistency::DrySoilWithoutWatering { soil_humidity });
    }

    if soil_humidity > SOIL_WET && needs_watering {
        return Err(Inconsistency::WetSoilWithWatering { soil_humidity });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn very_dry_soil_without_watering_is_flagged() {
        assert_eq!(
            check_consistency(0.2, false),
            Err(Inconsistency::DrySoilWithoutWatering { soil_humidity: 0.2 })
        );
    }

    #[test]
    fn wet_soil_with_watering_is_flagged() {
        assert_eq!(
            check_consistency(1.5, true),
            Err(Inconsistency::WetSoilWithWatering { soil_humidity: 1.5 })
        );
    }

    #[test]
    fn agreeing_advice_passes() {
        assert!(check_consistency(0.2, true).is_ok());
        assert!(check_consistency(1.5, false).is_ok());
        assert!(check_consistency(0.8, true).is_ok());
        assert!(check_consistency(0.8, false).is_ok());
    }

    #[test]
    fn thresholds_are_exclusive() {
        assert!(check_consistency(0.4, false).is_ok());
        assert!(check_consistency(1.2, true).is_ok());
    }

    #[test]
    fn message_names_the_reading() {
        let message = check_consistency(0.25, false).unwrap_err().to_string();

        assert!(message.contains("0.25"));
        assert!(message.contains("very dry"));
    }
}

use heapless::HistoryBuffer;

use crate::configuration::main_configuration::SENSOR_LOG_CAPACITY;
use crate::models::SensorSample;

/// Last `N` samples. Once full, every new record overwrites the oldest one.
pub struct SensorLog<const N: usize = SENSOR_LOG_CAPACITY> {
    entries: HistoryBuffer<SensorSample, N>,
}

impl<const N: usize> SensorLog<N> {
    pub fn new() -> Self {
        Self {
            entries: HistoryBuffer::new(),
        }
    }

    pub fn record(&mut self, sample: SensorSample) {
        self.entries.write(sample);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.len() == 0
    }

    pub fn capacity(&self) -> usize {
        N
    }

    pub fn latest(&self) -> Option<&SensorSample> {
        self.entries.recent()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &SensorSample> + '_ {
        self.entries.oldest_ordered()
    }
}

impl<const N: usize> Default for SensorLog<N> {
    fn default() -> Self {
        Self::new()
    }
}

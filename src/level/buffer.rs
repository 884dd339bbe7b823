//! Bounded FIFO of recent probe readings with a running average.
//!
//! Storage is a fixed `heapless::Deque` sized for [`MAX_SAMPLE_CAPACITY`];
//! the configured capacity may be anything from 1 up to that limit.  Once
//! full, each new reading evicts the oldest.

use heapless::Deque;

use super::Volts;
use crate::error::{ConfigError, EmptyBufferError};

/// Static storage limit for the smoothing window.
pub const MAX_SAMPLE_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
pub struct SampleBuffer {
    samples: Deque<Volts, MAX_SAMPLE_CAPACITY>,
    capacity: usize,
}

impl SampleBuffer {
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroBufferCapacity);
        }
        if capacity > MAX_SAMPLE_CAPACITY {
            return Err(ConfigError::BufferCapacityTooLarge {
                requested: capacity,
                max: MAX_SAMPLE_CAPACITY,
            });
        }
        Ok(Self {
            samples: Deque::new(),
            capacity,
        })
    }

    /// Append at the tail, evicting from the head until `len() <= capacity()`.
    pub fn push(&mut self, volts: Volts) {
        while self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        // capacity <= MAX_SAMPLE_CAPACITY, so there is always room here.
        let pushed = self.samples.push_back(volts);
        debug_assert!(pushed.is_ok(), "sample storage overflow");
    }

    /// Arithmetic mean of the stored readings.
    pub fn average(&self) -> Result<Volts, EmptyBufferError> {
        if self.samples.is_empty() {
            return Err(EmptyBufferError);
        }
        let sum: Volts = self.samples.iter().sum();
        Ok(sum / self.samples.len() as Volts)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent reading.
    pub fn latest(&self) -> Option<Volts> {
        self.samples.back().copied()
    }

    /// Readings oldest first.
    pub fn iter(&self) -> impl Iterator<Item = Volts> + '_ {
        self.samples.iter().copied()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

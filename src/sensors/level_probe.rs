//! Analog liquid level probe.
//!
//! Reads the probe voltage through an ESP32-S3 ADC1 channel and converts
//! the 12-bit count to volts against the 3.3 V reference.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1_CH4 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static `AtomicU16` for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

use crate::error::SensorError;
use crate::level::Volts;

#[cfg(not(target_os = "espidf"))]
static SIM_LEVEL_ADC: AtomicU16 = AtomicU16::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_level_adc(raw: u16) {
    SIM_LEVEL_ADC.store(raw, Ordering::Relaxed);
}

/// ADC reference voltage.
pub const ADC_REF_VOLTS: Volts = 3.3;
/// Counts per full scale for the 12-bit ADC.
pub const ADC_COUNTS: u16 = 4096;

#[derive(Debug, Clone, Copy)]
pub struct LevelReading {
    pub raw: u16,
    pub volts: Volts,
}

pub struct LevelProbe {
    _adc_gpio: i32,
    last: Option<LevelReading>,
    total_reads: u32,
}

impl LevelProbe {
    pub fn new(adc_gpio: i32) -> Self {
        Self {
            _adc_gpio: adc_gpio,
            last: None,
            total_reads: 0,
        }
    }

    pub fn read(&mut self) -> Result<LevelReading, SensorError> {
        let raw = self.read_adc()?;
        let volts = adc_to_volts(raw)?;
        self.total_reads = self.total_reads.saturating_add(1);

        let reading = LevelReading { raw, volts };
        self.last = Some(reading);
        Ok(reading)
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> Result<u16, SensorError> {
        crate::drivers::hw_init::adc1_read(crate::drivers::hw_init::ADC1_CH_LEVEL)
            .ok_or(SensorError::AdcReadFailed)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> Result<u16, SensorError> {
        Ok(SIM_LEVEL_ADC.load(Ordering::Relaxed))
    }

    pub fn last_reading(&self) -> Option<LevelReading> {
        self.last
    }

    pub fn total_reads(&self) -> u32 {
        self.total_reads
    }
}

/// Count → volts: `raw × 3.3 / 4096`.
pub fn adc_to_volts(raw: u16) -> Result<Volts, SensorError> {
    if raw >= ADC_COUNTS {
        return Err(SensorError::OutOfRange);
    }
    Ok(Volts::from(raw) * ADC_REF_VOLTS / Volts::from(ADC_COUNTS))
}

/// Volts → nearest count, clamped to the ADC range.  Used to inject
/// simulated levels.
pub fn volts_to_adc(volts: Volts) -> u16 {
    let counts = (volts / ADC_REF_VOLTS * Volts::from(ADC_COUNTS)).round();
    counts.clamp(0.0, Volts::from(ADC_COUNTS - 1)) as u16
}

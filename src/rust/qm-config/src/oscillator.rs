// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Frequency sources referenced by elements.
//!
//! The default rendering keeps a legacy quirk of the document format:
//!
//! * `lo_frequency` is only emitted when it is exactly zero,
//! * `mixer` is only emitted (as `null`) when no mixer is referenced.
//!
//! A non-zero LO frequency and a mixer reference are therefore dropped from the
//! rendered document. Whether this shape is intended is an open question; it is
//! emitted as is because consumers of the document may depend on it. Use
//! [`Oscillator::frequency_only`] to emit the intermediate frequency alone.
use serde::Serialize;

use crate::merge::{Fragment, Render};
use crate::{Name, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OscillatorConfig {
    pub intermediate_frequency: f64,
    /// `Some(None)` renders as `"mixer": null`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mixer: Option<Option<Name>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lo_frequency: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OscillatorStyle {
    /// Emit the `mixer` and `lo_frequency` keys following the legacy quirk.
    #[default]
    Legacy,
    /// Emit the intermediate frequency only.
    FrequencyOnly,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Oscillator {
    pub name: Name,
    pub intermediate_frequency: f64,
    pub lo_frequency: f64,
    pub mixer: Option<Name>,
    pub style: OscillatorStyle,
}

impl Oscillator {
    pub fn new(name: impl Into<Name>, intermediate_frequency: f64) -> Self {
        Oscillator {
            name: name.into(),
            intermediate_frequency,
            lo_frequency: 0.0,
            mixer: None,
            style: OscillatorStyle::Legacy,
        }
    }

    pub fn frequency_only(name: impl Into<Name>, intermediate_frequency: f64) -> Self {
        Oscillator {
            style: OscillatorStyle::FrequencyOnly,
            ..Oscillator::new(name, intermediate_frequency)
        }
    }

    pub fn with_lo_frequency(mut self, lo_frequency: f64) -> Self {
        self.lo_frequency = lo_frequency;
        self
    }

    pub fn with_mixer(mut self, mixer: impl Into<Name>) -> Self {
        self.mixer = Some(mixer.into());
        self
    }
}

impl Render for Oscillator {
    type Key = Name;
    type Attributes = OscillatorConfig;

    fn render(&self) -> Result<Fragment<Name, OscillatorConfig>> {
        let mut config = OscillatorConfig {
            intermediate_frequency: self.intermediate_frequency,
            mixer: None,
            lo_frequency: None,
        };
        if self.style == OscillatorStyle::Legacy {
            if self.mixer.is_none() {
                config.mixer = Some(None);
            }
            if self.lo_frequency == 0.0 {
                config.lo_frequency = Some(self.lo_frequency);
            }
        }
        Ok(Fragment::new(self.name.clone(), config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rendered(oscillator: &Oscillator) -> serde_json::Value {
        serde_json::to_value(oscillator.render().unwrap().attributes).unwrap()
    }

    #[test]
    fn test_defaults_emit_null_mixer_and_zero_lo() {
        let oscillator = Oscillator::new("osc", 100e6);
        assert_eq!(
            rendered(&oscillator),
            json!({"intermediate_frequency": 100e6, "mixer": null, "lo_frequency": 0.0})
        );
    }

    #[test]
    fn test_lo_frequency_and_mixer_are_dropped() {
        let oscillator = Oscillator::new("osc", 100e6)
            .with_lo_frequency(5e9)
            .with_mixer("mixer_qubit");
        assert_eq!(rendered(&oscillator), json!({"intermediate_frequency": 100e6}));
    }

    #[test]
    fn test_quirk_keys_are_independent() {
        let with_mixer = Oscillator::new("osc", 1e6).with_mixer("m");
        assert_eq!(
            rendered(&with_mixer),
            json!({"intermediate_frequency": 1e6, "lo_frequency": 0.0})
        );
        let with_lo = Oscillator::new("osc", 1e6).with_lo_frequency(1e9);
        assert_eq!(
            rendered(&with_lo),
            json!({"intermediate_frequency": 1e6, "mixer": null})
        );
    }

    #[test]
    fn test_frequency_only() {
        let oscillator = Oscillator::frequency_only("osc", 100e6);
        assert_eq!(rendered(&oscillator), json!({"intermediate_frequency": 100e6}));
    }
}

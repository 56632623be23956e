// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use std::str::FromStr;

use indexmap::IndexMap;
use serde::Serialize;

use crate::merge::{Fragment, Render};
use crate::{Error, Name, Result};

/// Shortest pulse the hardware accepts, in ns.
pub const MIN_PULSE_LENGTH: i64 = 16;
/// Longest pulse the hardware accepts, in ns.
pub const MAX_PULSE_LENGTH: i64 = (1 << 31) - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PulseOperation {
    Control,
    Measurement,
}

impl FromStr for PulseOperation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "control" => Ok(PulseOperation::Control),
            "measurement" => Ok(PulseOperation::Measurement),
            other => Err(Error::InvalidPulseOperation(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PulseConfig {
    pub operation: PulseOperation,
    pub length: i64,
    pub waveforms: IndexMap<Name, Name>,
    /// Only present for measurement pulses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integration_weights: Option<IndexMap<Name, Name>>,
}

/// A waveform playback or measurement instruction of fixed duration.
///
/// The length is checked both when the pulse is created and when it is
/// rendered, since the public fields may be changed in between.
#[derive(Debug, Clone, PartialEq)]
pub struct Pulse {
    pub name: Name,
    pub operation: PulseOperation,
    /// Duration in ns.
    pub length: i64,
    /// Element input name to waveform name.
    pub waveforms: IndexMap<Name, Name>,
    /// Measurement result name to integration weight name. Ignored for control pulses.
    pub integration_weights: IndexMap<Name, Name>,
    /// Digital waveform played along with the pulse. Stored but not rendered yet.
    pub digital_marker: Option<Name>,
}

impl Pulse {
    pub fn new(name: impl Into<Name>, operation: &str, length: i64) -> Result<Self> {
        let pulse = Pulse {
            name: name.into(),
            operation: operation.parse()?,
            length,
            waveforms: IndexMap::new(),
            integration_weights: IndexMap::new(),
            digital_marker: None,
        };
        pulse.validate()?;
        Ok(pulse)
    }

    pub fn control(name: impl Into<Name>, length: i64) -> Result<Self> {
        Pulse::new(name, "control", length)
    }

    pub fn measurement(name: impl Into<Name>, length: i64) -> Result<Self> {
        Pulse::new(name, "measurement", length)
    }

    pub fn with_waveform(mut self, input: impl Into<Name>, waveform: impl Into<Name>) -> Self {
        self.waveforms.insert(input.into(), waveform.into());
        self
    }

    pub fn with_integration_weight(
        mut self,
        result: impl Into<Name>,
        weight: impl Into<Name>,
    ) -> Self {
        self.integration_weights.insert(result.into(), weight.into());
        self
    }

    pub fn with_digital_marker(mut self, marker: impl Into<Name>) -> Self {
        self.digital_marker = Some(marker.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_PULSE_LENGTH..=MAX_PULSE_LENGTH).contains(&self.length) {
            return Err(Error::PulseLengthOutOfRange(self.length));
        }
        Ok(())
    }
}

impl Render for Pulse {
    type Key = Name;
    type Attributes = PulseConfig;

    fn render(&self) -> Result<Fragment<Name, PulseConfig>> {
        self.validate()?;
        let integration_weights = match self.operation {
            PulseOperation::Control => None,
            // Without assigned weights this is an empty mapping, whereas earlier
            // configuration scripts emitted `null` here.
            PulseOperation::Measurement => Some(self.integration_weights.clone()),
        };
        Ok(Fragment::new(
            self.name.clone(),
            PulseConfig {
                operation: self.operation,
                length: self.length,
                waveforms: self.waveforms.clone(),
                integration_weights,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_invalid_operation() {
        match Pulse::new("p", "readout", 100) {
            Err(Error::InvalidPulseOperation(op)) => assert_eq!(op, "readout"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_control_pulse_has_no_integration_weights() {
        let pulse = Pulse::control("amp_mod_pulse", 10120)
            .unwrap()
            .with_waveform("single", "amp_mod_wf")
            .with_integration_weight("ignored", "integration");
        let value = serde_json::to_value(pulse.render().unwrap().attributes).unwrap();
        assert_eq!(
            value,
            json!({
                "operation": "control",
                "length": 10120,
                "waveforms": {"single": "amp_mod_wf"},
            })
        );
        assert!(value.get("integration_weights").is_none());
    }

    #[test]
    fn test_measurement_pulse() {
        let pulse = Pulse::measurement("meas_pulse", 10000)
            .unwrap()
            .with_integration_weight("integration", "integration");
        let value = serde_json::to_value(pulse.render().unwrap().attributes).unwrap();
        assert_eq!(
            value,
            json!({
                "operation": "measurement",
                "length": 10000,
                "waveforms": {},
                "integration_weights": {"integration": "integration"},
            })
        );

        // Key is present even without any weight assigned.
        let bare = Pulse::measurement("bare", 16).unwrap().render().unwrap();
        assert_eq!(bare.attributes.integration_weights, Some(IndexMap::new()));
    }

    #[test]
    fn test_length_checked_again_at_render() {
        let mut pulse = Pulse::control("p", 16).unwrap();
        pulse.length = 8;
        assert!(matches!(pulse.render(), Err(Error::PulseLengthOutOfRange(8))));
    }

    #[test]
    fn test_length_bounds() {
        assert!(Pulse::control("p", MIN_PULSE_LENGTH).is_ok());
        assert!(Pulse::control("p", MAX_PULSE_LENGTH).is_ok());
        assert!(Pulse::control("p", MIN_PULSE_LENGTH - 1).is_err());
        assert!(Pulse::control("p", MAX_PULSE_LENGTH + 1).is_err());
    }

    #[test]
    fn test_digital_marker_is_not_rendered() {
        let pulse = Pulse::control("p", 32).unwrap().with_digital_marker("ON");
        assert_eq!(pulse.digital_marker.as_deref(), Some("ON"));
        let value = serde_json::to_value(pulse.render().unwrap().attributes).unwrap();
        assert!(value.get("digital_marker").is_none());
    }

    proptest! {
        #[test]
        fn prop_valid_lengths_render(
            length in MIN_PULSE_LENGTH..=MAX_PULSE_LENGTH,
            measurement in any::<bool>(),
        ) {
            let operation = if measurement { "measurement" } else { "control" };
            let pulse = Pulse::new("p", operation, length).unwrap();
            let config = pulse.render().unwrap().attributes;
            prop_assert_eq!(config.length, length);
            prop_assert_eq!(config.integration_weights.is_some(), measurement);
        }

        #[test]
        fn prop_invalid_lengths_rejected(
            length in prop_oneof![i64::MIN..MIN_PULSE_LENGTH, (MAX_PULSE_LENGTH + 1)..=i64::MAX],
        ) {
            let construct = Pulse::control("p", length);
            prop_assert!(
                matches!(construct, Err(Error::PulseLengthOutOfRange(l)) if l == length),
                "expected out of range error"
            );

            let mut pulse = Pulse::control("p", MIN_PULSE_LENGTH).unwrap();
            pulse.length = length;
            prop_assert!(
                matches!(pulse.render(), Err(Error::PulseLengthOutOfRange(l)) if l == length),
                "expected out of range error"
            );
        }
    }
}

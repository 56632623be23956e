// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Assembly of the complete configuration document.
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::controller::{Controller, ControllerConfig};
use crate::diagnostics::{self, Diagnostic};
use crate::element::Element;
use crate::integration_weight::{IntegrationWeight, IntegrationWeightConfig};
use crate::merge::merge;
use crate::mixer::{Mixer, MixerEntry};
use crate::oscillator::{Oscillator, OscillatorConfig};
use crate::pulse::{Pulse, PulseConfig};
use crate::waveform::{DigitalWaveform, Waveform, WaveformConfig};
use crate::{Name, Result};

/// Document format version understood by the execution layer.
pub const CONFIG_VERSION: u32 = 1;

/// The configuration document handed to the execution layer.
///
/// All top-level keys are always present; categories without descriptors are
/// empty mappings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    pub version: u32,
    pub controllers: IndexMap<Name, ControllerConfig>,
    pub elements: IndexMap<Name, Map<String, Value>>,
    pub pulses: IndexMap<Name, PulseConfig>,
    pub waveforms: IndexMap<Name, WaveformConfig>,
    pub digital_waveforms: IndexMap<Name, Value>,
    pub integration_weights: IndexMap<Name, IntegrationWeightConfig>,
    pub mixers: IndexMap<Name, Vec<MixerEntry>>,
    pub oscillators: IndexMap<Name, OscillatorConfig>,
}

impl Config {
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Quantum system together with the control hardware driving it.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantumMachine {
    /// Not checked by [`QuantumMachine::render`]; only [`CONFIG_VERSION`] is understood downstream.
    pub version: u32,
    pub controllers: Vec<Controller>,
    pub elements: Vec<Element>,
    pub pulses: Vec<Pulse>,
    pub waveforms: Vec<Waveform>,
    pub digital_waveforms: Vec<DigitalWaveform>,
    pub integration_weights: Vec<IntegrationWeight>,
    pub mixers: Vec<Mixer>,
    pub oscillators: Vec<Oscillator>,
}

impl Default for QuantumMachine {
    fn default() -> Self {
        QuantumMachine {
            version: CONFIG_VERSION,
            controllers: Vec::new(),
            elements: Vec::new(),
            pulses: Vec::new(),
            waveforms: Vec::new(),
            digital_waveforms: Vec::new(),
            integration_weights: Vec::new(),
            mixers: Vec::new(),
            oscillators: Vec::new(),
        }
    }
}

impl QuantumMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn with_controllers(mut self, controllers: Vec<Controller>) -> Self {
        self.controllers = controllers;
        self
    }

    pub fn with_elements(mut self, elements: Vec<Element>) -> Self {
        self.elements = elements;
        self
    }

    pub fn with_pulses(mut self, pulses: Vec<Pulse>) -> Self {
        self.pulses = pulses;
        self
    }

    pub fn with_waveforms(mut self, waveforms: Vec<Waveform>) -> Self {
        self.waveforms = waveforms;
        self
    }

    pub fn with_digital_waveforms(mut self, digital_waveforms: Vec<DigitalWaveform>) -> Self {
        self.digital_waveforms = digital_waveforms;
        self
    }

    pub fn with_integration_weights(mut self, integration_weights: Vec<IntegrationWeight>) -> Self {
        self.integration_weights = integration_weights;
        self
    }

    pub fn with_mixers(mut self, mixers: Vec<Mixer>) -> Self {
        self.mixers = mixers;
        self
    }

    pub fn with_oscillators(mut self, oscillators: Vec<Oscillator>) -> Self {
        self.oscillators = oscillators;
        self
    }

    /// Render the complete document.
    ///
    /// Fails as a whole if any descriptor fails to render.
    pub fn render(&self) -> Result<Config> {
        if self.version != CONFIG_VERSION {
            qm_log::warn!(
                "Configuration version {} differs from supported version {}",
                self.version,
                CONFIG_VERSION
            );
        }
        let config = Config {
            version: self.version,
            controllers: merge(&self.controllers)?,
            elements: merge(&self.elements)?,
            pulses: merge(&self.pulses)?,
            waveforms: merge(&self.waveforms)?,
            digital_waveforms: merge(&self.digital_waveforms)?,
            integration_weights: merge(&self.integration_weights)?,
            mixers: merge(&self.mixers)?,
            oscillators: merge(&self.oscillators)?,
        };
        qm_log::debug!(
            "Rendered configuration with {} controllers, {} elements and {} pulses",
            config.controllers.len(),
            config.elements.len(),
            config.pulses.len()
        );
        Ok(config)
    }

    /// Report inconsistencies that do not prevent rendering.
    ///
    /// Each finding is also logged when diagnostics logging is enabled.
    pub fn diagnose(&self) -> Vec<Diagnostic> {
        let diagnostics = diagnostics::diagnose(self);
        for diagnostic in &diagnostics {
            qm_log::diagnostic!("{}", diagnostic);
        }
        diagnostics
    }
}

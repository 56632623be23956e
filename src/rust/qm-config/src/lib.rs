// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Typed building blocks for the configuration document of a quantum machine.
//!
//! Each descriptor renders itself into a single-key fragment. [`merge`] folds
//! fragments of one category into a mapping, and [`QuantumMachine::render`]
//! assembles all categories into the final [`Config`] document.

pub mod controller;
pub mod controller_traits;
pub mod diagnostics;
pub mod element;
pub mod error;
pub mod integration_weight;
pub mod merge;
pub mod mixer;
pub mod oscillator;
pub mod ports;
pub mod presets;
pub mod pulse;
pub mod quantum_machine;
pub mod waveform;

pub use controller::{Controller, ControllerConfig, ControllerKind};
pub use diagnostics::Diagnostic;
pub use element::Element;
pub use error::{Error, Result};
pub use integration_weight::{IntegrationWeight, IntegrationWeightConfig, WeightSegment};
pub use merge::{Fragment, Render, merge, merge_optional};
pub use mixer::{Mixer, MixerEntry};
pub use oscillator::{Oscillator, OscillatorConfig};
pub use ports::{AnalogInput, AnalogOutput, DigitalInput, DigitalOutput, Polarity, PortIndex};
pub use pulse::{Pulse, PulseConfig, PulseOperation};
pub use quantum_machine::{Config, QuantumMachine};
pub use waveform::{DigitalWaveform, Waveform, WaveformConfig, WaveformKind};

/// Identity of named descriptors (pulses, waveforms, elements, ...).
pub type Name = String;

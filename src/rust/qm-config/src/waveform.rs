// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;
use serde_json::Value;

use crate::merge::{Fragment, Render};
use crate::{Error, Name, Result};

/// Kind of an analog waveform.
///
/// Unknown kinds are representable so that a waveform can be described before
/// its kind is checked; such a waveform fails when rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaveformKind {
    Constant,
    Arbitrary,
    Other(String),
}

impl From<&str> for WaveformKind {
    fn from(value: &str) -> Self {
        match value {
            "constant" => WaveformKind::Constant,
            "arbitrary" => WaveformKind::Arbitrary,
            other => WaveformKind::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WaveformConfig {
    Constant { sample: f64 },
    Arbitrary { samples: Vec<f64> },
}

/// Amplitude template played by a pulse.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    pub name: Name,
    pub kind: WaveformKind,
    /// Sample of a constant waveform.
    pub sample: f64,
    /// Samples of an arbitrary waveform.
    pub samples: Vec<f64>,
}

impl Waveform {
    pub fn new(name: impl Into<Name>, kind: impl Into<WaveformKind>) -> Self {
        Waveform {
            name: name.into(),
            kind: kind.into(),
            sample: 0.0,
            samples: Vec::new(),
        }
    }

    pub fn constant(name: impl Into<Name>, sample: f64) -> Self {
        Waveform::new(name, WaveformKind::Constant).with_sample(sample)
    }

    pub fn arbitrary(name: impl Into<Name>, samples: Vec<f64>) -> Self {
        Waveform::new(name, WaveformKind::Arbitrary).with_samples(samples)
    }

    pub fn with_sample(mut self, sample: f64) -> Self {
        self.sample = sample;
        self
    }

    pub fn with_samples(mut self, samples: Vec<f64>) -> Self {
        self.samples = samples;
        self
    }
}

impl Render for Waveform {
    type Key = Name;
    type Attributes = WaveformConfig;

    fn render(&self) -> Result<Fragment<Name, WaveformConfig>> {
        let config = match &self.kind {
            WaveformKind::Constant => WaveformConfig::Constant {
                sample: self.sample,
            },
            WaveformKind::Arbitrary => WaveformConfig::Arbitrary {
                samples: self.samples.clone(),
            },
            WaveformKind::Other(kind) => return Err(Error::InvalidWaveformKind(kind.clone())),
        };
        Ok(Fragment::new(self.name.clone(), config))
    }
}

/// A digital marker pattern, passed through to the document unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct DigitalWaveform {
    pub name: Name,
    pub pattern: Value,
}

impl DigitalWaveform {
    pub fn new(name: impl Into<Name>, pattern: Value) -> Self {
        DigitalWaveform {
            name: name.into(),
            pattern,
        }
    }
}

impl Render for DigitalWaveform {
    type Key = Name;
    type Attributes = Value;

    fn render(&self) -> Result<Fragment<Name, Value>> {
        Ok(Fragment::new(self.name.clone(), self.pattern.clone()))
    }
}

// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Integration weights used to demodulate acquired signals during a measurement.
//!
//! Each weighting function is a piecewise-constant sequence of
//! `(weight, duration)` segments. Segments are checked on construction. Whether
//! the discretized weights saturate the accumulator for a given pulse length and
//! ADC input range is left to the caller.
use serde::Serialize;

use crate::error::check_range;
use crate::merge::{Fragment, Render};
use crate::{Error, Name, Result};

pub const MAX_WEIGHT_MAGNITUDE: f64 = 2048.0;
/// Segment durations must lie on this grid, in ns.
pub const DURATION_GRANULARITY: i64 = 4;

/// One `(weight, duration in ns)` segment, serialized as a two-element sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightSegment(f64, u64);

impl WeightSegment {
    pub fn new(weight: f64, duration: i64) -> Result<Self> {
        let weight = check_range(
            "integration weight",
            weight,
            -MAX_WEIGHT_MAGNITUDE,
            MAX_WEIGHT_MAGNITUDE,
        )?;
        let invalid_duration = || Error::InvalidDuration {
            field: "integration duration",
            value: duration,
            multiple: DURATION_GRANULARITY,
        };
        if duration % DURATION_GRANULARITY != 0 {
            return Err(invalid_duration());
        }
        let duration = u64::try_from(duration).map_err(|_| invalid_duration())?;
        Ok(WeightSegment(weight, duration))
    }

    pub fn weight(&self) -> f64 {
        self.0
    }

    pub fn duration(&self) -> u64 {
        self.1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegrationWeightConfig {
    pub sine: Vec<WeightSegment>,
    pub cosine: Vec<WeightSegment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegrationWeight {
    pub name: Name,
    pub cosine: Vec<WeightSegment>,
    pub sine: Vec<WeightSegment>,
}

impl IntegrationWeight {
    pub fn new(
        name: impl Into<Name>,
        cosine: Vec<WeightSegment>,
        sine: Vec<WeightSegment>,
    ) -> Self {
        IntegrationWeight {
            name: name.into(),
            cosine,
            sine,
        }
    }

    /// Single-segment weights for both functions.
    pub fn constant(
        name: impl Into<Name>,
        cos_weight: f64,
        cos_duration: i64,
        sin_weight: f64,
        sin_duration: i64,
    ) -> Result<Self> {
        Ok(IntegrationWeight::new(
            name,
            vec![WeightSegment::new(cos_weight, cos_duration)?],
            vec![WeightSegment::new(sin_weight, sin_duration)?],
        ))
    }
}

impl Render for IntegrationWeight {
    type Key = Name;
    type Attributes = IntegrationWeightConfig;

    fn render(&self) -> Result<Fragment<Name, IntegrationWeightConfig>> {
        Ok(Fragment::new(
            self.name.clone(),
            IntegrationWeightConfig {
                sine: self.sine.clone(),
                cosine: self.cosine.clone(),
            },
        ))
    }
}

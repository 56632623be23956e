// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;

use crate::error::check_range;
use crate::merge::{Fragment, Render};
use crate::{Name, Result};

/// Allowed range of each IQ correction matrix entry.
pub const CORRECTION_RANGE: (f64, f64) = (-2.0, 2.0);

/// IQ correction for one pair of intermediate and LO frequency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MixerEntry {
    pub intermediate_frequency: f64,
    pub lo_frequency: f64,
    /// Row-major 2x2 correction matrix.
    pub correction: [f64; 4],
}

impl MixerEntry {
    pub fn new(
        intermediate_frequency: f64,
        lo_frequency: f64,
        correction: Option<[f64; 4]>,
    ) -> Result<Self> {
        let correction = correction.unwrap_or_default();
        for entry in correction {
            check_range(
                "mixer correction",
                entry,
                CORRECTION_RANGE.0,
                CORRECTION_RANGE.1,
            )?;
        }
        Ok(MixerEntry {
            intermediate_frequency,
            lo_frequency,
            correction,
        })
    }
}

/// IQ mixer correction parameters, referenced by oscillators.
#[derive(Debug, Clone, PartialEq)]
pub struct Mixer {
    pub name: Name,
    pub entries: Vec<MixerEntry>,
}

impl Mixer {
    pub fn new(
        name: impl Into<Name>,
        intermediate_frequency: f64,
        lo_frequency: f64,
        correction: Option<[f64; 4]>,
    ) -> Result<Self> {
        Ok(Mixer {
            name: name.into(),
            entries: vec![MixerEntry::new(
                intermediate_frequency,
                lo_frequency,
                correction,
            )?],
        })
    }

    /// Add the correction for a further frequency pair.
    pub fn with_entry(mut self, entry: MixerEntry) -> Self {
        self.entries.push(entry);
        self
    }
}

impl Render for Mixer {
    type Key = Name;
    type Attributes = Vec<MixerEntry>;

    fn render(&self) -> Result<Fragment<Name, Vec<MixerEntry>>> {
        Ok(Fragment::new(self.name.clone(), self.entries.clone()))
    }
}

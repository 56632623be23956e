// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Analog and digital port descriptors of a controller.
//!
//! Ports are identified by their 1-based index within one category of one
//! controller. The `shareable` flag is accepted on every port but does not
//! appear in the rendered attributes.
use serde::Serialize;

use crate::error::check_range;
use crate::merge::{Fragment, Render};
use crate::{Error, Result};

pub type PortIndex = u32;

/// Allowed DC offset of analog ports, in volts.
pub const ANALOG_OFFSET_RANGE: (f64, f64) = (-0.5, 0.5);
/// Allowed gain of the pre-ADC amplifier, in dB.
pub const ANALOG_INPUT_GAIN_RANGE: (i32, i32) = (-12, 20);

fn check_index(index: PortIndex) -> Result<PortIndex> {
    if index == 0 {
        return Err(Error::InvalidPortIndex(0));
    }
    Ok(index)
}

fn check_offset(offset: f64) -> Result<f64> {
    check_range(
        "offset",
        offset,
        ANALOG_OFFSET_RANGE.0,
        ANALOG_OFFSET_RANGE.1,
    )
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalogOutputConfig {
    pub offset: f64,
    pub delay: f64,
}

/// Analog output port of a controller.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalogOutput {
    index: PortIndex,
    offset: f64,
    /// Delay in ns. Only honoured by controllers whose traits support port delay.
    delay: f64,
    // TODO: `shareable` is stored but not rendered until port sharing between
    // quantum machine instances is supported by the configuration document.
    shareable: bool,
}

impl AnalogOutput {
    pub fn new(index: PortIndex) -> Result<Self> {
        Ok(AnalogOutput {
            index: check_index(index)?,
            offset: 0.0,
            delay: 0.0,
            shareable: true,
        })
    }

    pub fn with_offset(mut self, offset: f64) -> Result<Self> {
        self.offset = check_offset(offset)?;
        Ok(self)
    }

    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_shareable(mut self, shareable: bool) -> Self {
        self.shareable = shareable;
        self
    }

    pub fn index(&self) -> PortIndex {
        self.index
    }

    pub fn delay(&self) -> f64 {
        self.delay
    }

    pub fn is_shareable(&self) -> bool {
        self.shareable
    }
}

impl Render for AnalogOutput {
    type Key = PortIndex;
    type Attributes = AnalogOutputConfig;

    fn render(&self) -> Result<Fragment<PortIndex, AnalogOutputConfig>> {
        Ok(Fragment::new(
            self.index,
            AnalogOutputConfig {
                offset: self.offset,
                delay: self.delay,
            },
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalogInputConfig {
    pub offset: f64,
    pub gain_db: i32,
}

/// Analog input port of a controller.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalogInput {
    index: PortIndex,
    offset: f64,
    gain_db: i32,
    shareable: bool,
}

impl AnalogInput {
    pub fn new(index: PortIndex) -> Result<Self> {
        Ok(AnalogInput {
            index: check_index(index)?,
            offset: 0.0,
            gain_db: 0,
            shareable: true,
        })
    }

    pub fn with_offset(mut self, offset: f64) -> Result<Self> {
        self.offset = check_offset(offset)?;
        Ok(self)
    }

    pub fn with_gain_db(mut self, gain_db: i32) -> Result<Self> {
        self.gain_db = check_range(
            "gain_db",
            gain_db,
            ANALOG_INPUT_GAIN_RANGE.0,
            ANALOG_INPUT_GAIN_RANGE.1,
        )?;
        Ok(self)
    }

    pub fn with_shareable(mut self, shareable: bool) -> Self {
        self.shareable = shareable;
        self
    }

    pub fn index(&self) -> PortIndex {
        self.index
    }

    pub fn is_shareable(&self) -> bool {
        self.shareable
    }
}

impl Render for AnalogInput {
    type Key = PortIndex;
    type Attributes = AnalogInputConfig;

    fn render(&self) -> Result<Fragment<PortIndex, AnalogInputConfig>> {
        Ok(Fragment::new(
            self.index,
            AnalogInputConfig {
                offset: self.offset,
                gain_db: self.gain_db,
            },
        ))
    }
}

/// Edge on which a digital input triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Polarity {
    #[default]
    #[serde(rename = "")]
    Unspecified,
    #[serde(rename = "RISING")]
    Rising,
    #[serde(rename = "FALLING")]
    Falling,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DigitalInputConfig {
    pub threshold: f64,
    pub polarity: Polarity,
    pub window: u32,
}

/// Digital input port of a controller.
#[derive(Debug, Clone, PartialEq)]
pub struct DigitalInput {
    index: PortIndex,
    threshold: f64,
    polarity: Polarity,
    /// Dead time after a detected edge, in ns.
    window: u32,
    shareable: bool,
}

impl DigitalInput {
    pub fn new(index: PortIndex) -> Result<Self> {
        Ok(DigitalInput {
            index: check_index(index)?,
            threshold: 0.0,
            polarity: Polarity::default(),
            window: 0,
            shareable: true,
        })
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    pub fn with_window(mut self, window: u32) -> Self {
        self.window = window;
        self
    }

    pub fn with_shareable(mut self, shareable: bool) -> Self {
        self.shareable = shareable;
        self
    }

    pub fn index(&self) -> PortIndex {
        self.index
    }

    pub fn is_shareable(&self) -> bool {
        self.shareable
    }
}

impl Render for DigitalInput {
    type Key = PortIndex;
    type Attributes = DigitalInputConfig;

    fn render(&self) -> Result<Fragment<PortIndex, DigitalInputConfig>> {
        Ok(Fragment::new(
            self.index,
            DigitalInputConfig {
                threshold: self.threshold,
                polarity: self.polarity,
                window: self.window,
            },
        ))
    }
}

/// Digital outputs carry no attributes besides their index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DigitalOutputConfig {}

#[derive(Debug, Clone, PartialEq)]
pub struct DigitalOutput {
    index: PortIndex,
    shareable: bool,
}

impl DigitalOutput {
    pub fn new(index: PortIndex) -> Result<Self> {
        Ok(DigitalOutput {
            index: check_index(index)?,
            shareable: true,
        })
    }

    pub fn with_shareable(mut self, shareable: bool) -> Self {
        self.shareable = shareable;
        self
    }

    pub fn index(&self) -> PortIndex {
        self.index
    }

    pub fn is_shareable(&self) -> bool {
        self.shareable
    }
}

impl Render for DigitalOutput {
    type Key = PortIndex;
    type Attributes = DigitalOutputConfig;

    fn render(&self) -> Result<Fragment<PortIndex, DigitalOutputConfig>> {
        Ok(Fragment::new(self.index, DigitalOutputConfig {}))
    }
}

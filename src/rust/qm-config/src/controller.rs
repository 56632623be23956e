// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use indexmap::IndexMap;
use serde::Serialize;

use crate::controller_traits::ControllerTraits;
use crate::merge::{Fragment, Render, merge};
use crate::ports::{
    AnalogInput, AnalogInputConfig, AnalogOutput, AnalogOutputConfig, DigitalInput,
    DigitalInputConfig, DigitalOutput, DigitalOutputConfig, PortIndex,
};
use crate::{Name, Result};

/// Hardware generation of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControllerKind {
    #[default]
    Opx1,
    /// OPX+, supports per-port delay on analog outputs.
    Opx2,
}

impl ControllerKind {
    pub fn traits(&self) -> &'static ControllerTraits {
        ControllerTraits::from_controller_kind(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControllerConfig {
    #[serde(rename = "type")]
    pub kind: ControllerKind,
    pub analog_outputs: IndexMap<PortIndex, AnalogOutputConfig>,
    pub digital_outputs: IndexMap<PortIndex, DigitalOutputConfig>,
    pub analog_inputs: IndexMap<PortIndex, AnalogInputConfig>,
    pub digital_inputs: IndexMap<PortIndex, DigitalInputConfig>,
}

/// A control hardware unit and the ports used on it.
///
/// No check is made that the requested ports or features exist on the given
/// [`ControllerKind`]; see [`crate::QuantumMachine::diagnose`] for that.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Controller {
    pub name: Name,
    pub kind: ControllerKind,
    pub analog_outputs: Vec<AnalogOutput>,
    pub digital_outputs: Vec<DigitalOutput>,
    pub analog_inputs: Vec<AnalogInput>,
    pub digital_inputs: Vec<DigitalInput>,
}

impl Controller {
    pub fn new(name: impl Into<Name>) -> Self {
        Controller {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_kind(mut self, kind: ControllerKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_analog_outputs(mut self, ports: Vec<AnalogOutput>) -> Self {
        self.analog_outputs = ports;
        self
    }

    pub fn with_digital_outputs(mut self, ports: Vec<DigitalOutput>) -> Self {
        self.digital_outputs = ports;
        self
    }

    pub fn with_analog_inputs(mut self, ports: Vec<AnalogInput>) -> Self {
        self.analog_inputs = ports;
        self
    }

    pub fn with_digital_inputs(mut self, ports: Vec<DigitalInput>) -> Self {
        self.digital_inputs = ports;
        self
    }
}

impl Render for Controller {
    type Key = Name;
    type Attributes = ControllerConfig;

    fn render(&self) -> Result<Fragment<Name, ControllerConfig>> {
        Ok(Fragment::new(
            self.name.clone(),
            ControllerConfig {
                kind: self.kind,
                analog_outputs: merge(&self.analog_outputs)?,
                digital_outputs: merge(&self.digital_outputs)?,
                analog_inputs: merge(&self.analog_inputs)?,
                digital_inputs: merge(&self.digital_inputs)?,
            },
        ))
    }
}

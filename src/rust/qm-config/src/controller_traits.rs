// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use crate::controller::ControllerKind;

/// Commonly used controller traits
pub struct ControllerTraits {
    pub analog_outputs: u32,
    pub analog_inputs: u32,
    pub digital_outputs: u32,
    pub digital_inputs: u32,
    /// Whether analog outputs honour a per-port delay
    pub supports_port_delay: bool,
}

impl ControllerTraits {
    pub fn from_controller_kind(kind: &ControllerKind) -> &'static Self {
        match kind {
            ControllerKind::Opx1 => &OPX1_TRAITS,
            ControllerKind::Opx2 => &OPX2_TRAITS,
        }
    }
}

pub const OPX1_TRAITS: ControllerTraits = ControllerTraits {
    analog_outputs: 10,
    analog_inputs: 2,
    digital_outputs: 10,
    digital_inputs: 0,
    supports_port_delay: false,
};

pub const OPX2_TRAITS: ControllerTraits = ControllerTraits {
    analog_outputs: 10,
    analog_inputs: 2,
    digital_outputs: 10,
    digital_inputs: 3,
    supports_port_delay: true,
};

// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Ready-made configurations of known setups.
use serde_json::{Map, Value, json};

use crate::{
    AnalogInput, AnalogOutput, Controller, Element, IntegrationWeight, Oscillator, Pulse,
    QuantumMachine, Result, Waveform,
};

pub const INTENSITY_VOLTAGE_CONTROLLER: &str = "OPX+";
/// Drive frequency of the AOM, in Hz.
pub const INTENSITY_VOLTAGE_CENTER_FREQUENCY: f64 = 100e6;

fn definition(value: Value) -> Result<Map<String, Value>> {
    Ok(serde_json::from_value(value)?)
}

/// AOM driven from analog output 1 and a photodiode read on analog input 1.
///
/// The AOM is modulated with a 10.12 µs constant pulse of 0.25 V (10 µs plus the
/// 120 ns AOM rise time). The photodiode signal is averaged over 10 µs using
/// cosine weights only.
pub fn intensity_voltage_setup() -> Result<QuantumMachine> {
    let controller = Controller::new(INTENSITY_VOLTAGE_CONTROLLER)
        .with_analog_outputs(vec![AnalogOutput::new(1)?.with_offset(0.0)?.with_delay(0.0)])
        .with_analog_inputs(vec![AnalogInput::new(1)?.with_offset(0.0)?.with_gain_db(0)?]);

    let aom = Element::new(
        "AOM",
        definition(json!({
            "singleInput": {"port": [INTENSITY_VOLTAGE_CONTROLLER, 1]},
            "oscillator": "osc",
            "operations": {"amp_mod": "amp_mod_pulse"},
        }))?,
    );
    let photodiode = Element::new(
        "photodiode",
        definition(json!({
            "outputs": {"out1": ["con1", 1]},
            "oscillator": "osc",
            "operations": {"meas": "meas_pulse"},
        }))?,
    );

    let amp_mod_pulse =
        Pulse::control("amp_mod_pulse", 10120)?.with_waveform("single", "amp_mod_wf");
    let meas_pulse = Pulse::measurement("meas_pulse", 10000)?
        .with_integration_weight("integration", "integration");

    // Unit weights would overflow the accumulator over 10 µs, scale by the length.
    let integration =
        IntegrationWeight::constant("integration", 1.0 / 10000.0, 10000, 0.0, 10000)?;

    Ok(QuantumMachine::new()
        .with_controllers(vec![controller])
        .with_elements(vec![aom, photodiode])
        .with_pulses(vec![amp_mod_pulse, meas_pulse])
        .with_waveforms(vec![Waveform::constant("amp_mod_wf", 0.25)])
        .with_integration_weights(vec![integration])
        .with_oscillators(vec![Oscillator::frequency_only(
            "osc",
            INTENSITY_VOLTAGE_CENTER_FREQUENCY,
        )]))
}

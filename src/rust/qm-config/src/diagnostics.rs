// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Consistency checks across the descriptors of a quantum machine.
//!
//! None of these findings affects rendering; they point at configurations the
//! execution layer is likely to reject or interpret differently than intended.
use std::collections::HashSet;
use std::hash::Hash;
use std::fmt::{self, Display};

use crate::controller::Controller;
use crate::ports::PortIndex;
use crate::pulse::PulseOperation;
use crate::quantum_machine::QuantumMachine;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Document category the finding belongs to, e.g. `pulses`.
    pub category: &'static str,
    /// Identity of the offending descriptor.
    pub subject: String,
    pub message: String,
}

impl Diagnostic {
    fn new(category: &'static str, subject: impl Into<String>, message: String) -> Self {
        Diagnostic {
            category,
            subject: subject.into(),
            message,
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}': {}", self.category, self.subject, self.message)
    }
}

/// Keys occurring more than once, in order of their second occurrence.
fn duplicates<T, I>(keys: I) -> Vec<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();
    for key in keys {
        if !seen.insert(key.clone()) && reported.insert(key.clone()) {
            duplicates.push(key);
        }
    }
    duplicates
}

fn check_duplicate_names<N>(
    category: &'static str,
    names: impl IntoIterator<Item = N>,
    out: &mut Vec<Diagnostic>,
) where
    N: AsRef<str> + Eq + Hash + Clone,
{
    for name in duplicates(names) {
        out.push(Diagnostic::new(
            category,
            name.as_ref(),
            "defined more than once, the last definition is used".to_string(),
        ));
    }
}

fn check_ports(
    controller: &Controller,
    port_kind: &str,
    indices: impl IntoIterator<Item = PortIndex> + Clone,
    available: u32,
    out: &mut Vec<Diagnostic>,
) {
    for index in duplicates(indices.clone()) {
        out.push(Diagnostic::new(
            "controllers",
            controller.name.as_str(),
            format!("{port_kind} {index} defined more than once, the last definition is used"),
        ));
    }
    for index in indices {
        if index > available {
            out.push(Diagnostic::new(
                "controllers",
                controller.name.as_str(),
                format!(
                    "{port_kind} {index} does not exist on {:?}, which has {available}",
                    controller.kind
                ),
            ));
        }
    }
}

fn check_controller(controller: &Controller, out: &mut Vec<Diagnostic>) {
    let traits = controller.kind.traits();
    check_ports(
        controller,
        "analog output",
        controller.analog_outputs.iter().map(|p| p.index()),
        traits.analog_outputs,
        out,
    );
    check_ports(
        controller,
        "analog input",
        controller.analog_inputs.iter().map(|p| p.index()),
        traits.analog_inputs,
        out,
    );
    check_ports(
        controller,
        "digital output",
        controller.digital_outputs.iter().map(|p| p.index()),
        traits.digital_outputs,
        out,
    );
    check_ports(
        controller,
        "digital input",
        controller.digital_inputs.iter().map(|p| p.index()),
        traits.digital_inputs,
        out,
    );
    if !traits.supports_port_delay {
        for port in controller.analog_outputs.iter().filter(|p| p.delay() != 0.0) {
            out.push(Diagnostic::new(
                "controllers",
                controller.name.as_str(),
                format!(
                    "analog output {} has a delay of {} ns, which {:?} ignores",
                    port.index(),
                    port.delay(),
                    controller.kind
                ),
            ));
        }
    }
}

pub(crate) fn diagnose(machine: &QuantumMachine) -> Vec<Diagnostic> {
    let mut out = Vec::new();

    check_duplicate_names("controllers", machine.controllers.iter().map(|c| &c.name), &mut out);
    check_duplicate_names("elements", machine.elements.iter().map(|e| &e.name), &mut out);
    check_duplicate_names("pulses", machine.pulses.iter().map(|p| &p.name), &mut out);
    check_duplicate_names("waveforms", machine.waveforms.iter().map(|w| &w.name), &mut out);
    check_duplicate_names(
        "digital_waveforms",
        machine.digital_waveforms.iter().map(|w| &w.name),
        &mut out,
    );
    check_duplicate_names(
        "integration_weights",
        machine.integration_weights.iter().map(|w| &w.name),
        &mut out,
    );
    check_duplicate_names("mixers", machine.mixers.iter().map(|m| &m.name), &mut out);
    check_duplicate_names("oscillators", machine.oscillators.iter().map(|o| &o.name), &mut out);

    for controller in &machine.controllers {
        check_controller(controller, &mut out);
    }

    let waveforms: HashSet<&str> = machine.waveforms.iter().map(|w| w.name.as_str()).collect();
    let digital_waveforms: HashSet<&str> = machine
        .digital_waveforms
        .iter()
        .map(|w| w.name.as_str())
        .collect();
    let weights: HashSet<&str> = machine
        .integration_weights
        .iter()
        .map(|w| w.name.as_str())
        .collect();
    for pulse in &machine.pulses {
        for (input, waveform) in &pulse.waveforms {
            if !waveforms.contains(waveform.as_str()) {
                out.push(Diagnostic::new(
                    "pulses",
                    pulse.name.as_str(),
                    format!("input '{input}' refers to undefined waveform '{waveform}'"),
                ));
            }
        }
        if pulse.operation == PulseOperation::Measurement {
            for (result, weight) in &pulse.integration_weights {
                if !weights.contains(weight.as_str()) {
                    out.push(Diagnostic::new(
                        "pulses",
                        pulse.name.as_str(),
                        format!(
                            "result '{result}' refers to undefined integration weight '{weight}'"
                        ),
                    ));
                }
            }
        }
        if let Some(marker) = &pulse.digital_marker
            && !digital_waveforms.contains(marker.as_str())
        {
            out.push(Diagnostic::new(
                "pulses",
                pulse.name.as_str(),
                format!("digital marker refers to undefined digital waveform '{marker}'"),
            ));
        }
    }

    let pulses: HashSet<&str> = machine.pulses.iter().map(|p| p.name.as_str()).collect();
    let oscillators: HashSet<&str> = machine.oscillators.iter().map(|o| o.name.as_str()).collect();
    for element in &machine.elements {
        if let Some(oscillator) = element.oscillator()
            && !oscillators.contains(oscillator)
        {
            out.push(Diagnostic::new(
                "elements",
                element.name.as_str(),
                format!("refers to undefined oscillator '{oscillator}'"),
            ));
        }
        for (operation, pulse) in element.operation_pulses() {
            if !pulses.contains(pulse) {
                out.push(Diagnostic::new(
                    "elements",
                    element.name.as_str(),
                    format!("operation '{operation}' refers to undefined pulse '{pulse}'"),
                ));
            }
        }
    }

    let mixers: HashSet<&str> = machine.mixers.iter().map(|m| m.name.as_str()).collect();
    for oscillator in &machine.oscillators {
        if let Some(mixer) = &oscillator.mixer
            && !mixers.contains(mixer.as_str())
        {
            out.push(Diagnostic::new(
                "oscillators",
                oscillator.name.as_str(),
                format!("refers to undefined mixer '{mixer}'"),
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ControllerKind;
    use crate::element::Element;
    use crate::oscillator::Oscillator;
    use crate::ports::{AnalogOutput, DigitalInput};
    use crate::pulse::Pulse;
    use crate::waveform::Waveform;
    use serde_json::{Value, json};

    fn element(name: &str, definition: Value) -> Element {
        let Value::Object(definition) = definition else {
            unreachable!()
        };
        Element::new(name, definition)
    }

    #[test]
    fn test_duplicates() {
        assert_eq!(duplicates(vec![1, 2, 1, 3, 1, 2]), vec![1, 2]);
        assert!(duplicates(Vec::<u8>::new()).is_empty());
    }

    #[test]
    fn test_consistent_machine_has_no_findings() {
        let machine = QuantumMachine::new()
            .with_elements(vec![element(
                "AOM",
                json!({"oscillator": "osc", "operations": {"amp_mod": "amp_mod"}}),
            )])
            .with_pulses(vec![
                Pulse::control("amp_mod", 100)
                    .unwrap()
                    .with_waveform("single", "wf"),
            ])
            .with_waveforms(vec![Waveform::constant("wf", 0.1)])
            .with_oscillators(vec![Oscillator::new("osc", 1e8)]);
        assert!(machine.diagnose().is_empty());
    }

    #[test]
    fn test_dangling_references() {
        let machine = QuantumMachine::new()
            .with_elements(vec![element(
                "AOM",
                json!({"oscillator": "missing_osc", "operations": {"play": "missing_pulse"}}),
            )])
            .with_pulses(vec![
                Pulse::measurement("meas", 100)
                    .unwrap()
                    .with_waveform("single", "missing_wf")
                    .with_integration_weight("I", "missing_weight")
                    .with_digital_marker("missing_marker"),
            ])
            .with_oscillators(vec![Oscillator::new("osc", 1e8).with_mixer("missing_mixer")]);
        let findings = machine.diagnose();
        let messages: Vec<String> = findings.iter().map(ToString::to_string).collect();
        assert_eq!(
            messages,
            vec![
                "pulses 'meas': input 'single' refers to undefined waveform 'missing_wf'",
                "pulses 'meas': result 'I' refers to undefined integration weight 'missing_weight'",
                concat!(
                    "pulses 'meas': digital marker refers to undefined ",
                    "digital waveform 'missing_marker'"
                ),
                "elements 'AOM': refers to undefined oscillator 'missing_osc'",
                "elements 'AOM': operation 'play' refers to undefined pulse 'missing_pulse'",
                "oscillators 'osc': refers to undefined mixer 'missing_mixer'",
            ]
        );
    }

    #[test]
    fn test_controller_findings() {
        let machine = QuantumMachine::new().with_controllers(vec![
            Controller::new("con1")
                .with_analog_outputs(vec![
                    AnalogOutput::new(1).unwrap().with_delay(4.0),
                    AnalogOutput::new(11).unwrap(),
                ])
                .with_digital_inputs(vec![DigitalInput::new(1).unwrap()]),
            Controller::new("con2")
                .with_kind(ControllerKind::Opx2)
                .with_analog_outputs(vec![AnalogOutput::new(1).unwrap().with_delay(4.0)])
                .with_digital_inputs(vec![DigitalInput::new(1).unwrap()]),
        ]);
        let findings = machine.diagnose();
        assert_eq!(findings.len(), 3);
        assert!(findings.iter().all(|d| d.subject == "con1"));
        assert!(findings[0].message.starts_with("analog output 11 does not exist"));
        assert!(findings[1].message.starts_with("digital input 1 does not exist"));
        assert!(findings[2].message.contains("delay of 4 ns"));
    }

    #[test]
    fn test_duplicate_definitions() {
        let machine = QuantumMachine::new()
            .with_waveforms(vec![
                Waveform::constant("wf", 0.1),
                Waveform::constant("wf", 0.2),
            ])
            .with_controllers(vec![Controller::new("con1").with_analog_outputs(vec![
                AnalogOutput::new(2).unwrap(),
                AnalogOutput::new(2).unwrap(),
            ])]);
        let findings = machine.diagnose();
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].category, "waveforms");
        assert_eq!(findings[0].subject, "wf");
        assert_eq!(
            findings[1].message,
            "analog output 2 defined more than once, the last definition is used"
        );
    }
}

// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use serde_json::{Map, Value};

use crate::merge::{Fragment, Render};
use crate::{Name, Result};

/// A logical target bound to ports, an oscillator and named operations.
///
/// The definition is supplied as a ready-made mapping and rendered unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: Name,
    pub definition: Map<String, Value>,
}

impl Element {
    pub fn new(name: impl Into<Name>, definition: Map<String, Value>) -> Self {
        Element {
            name: name.into(),
            definition,
        }
    }

    /// Name of the oscillator the element uses, if any.
    pub fn oscillator(&self) -> Option<&str> {
        self.definition.get("oscillator").and_then(Value::as_str)
    }

    /// Pulse names referenced by the element's operations.
    pub fn operation_pulses(&self) -> impl Iterator<Item = (&str, &str)> {
        self.definition
            .get("operations")
            .and_then(Value::as_object)
            .into_iter()
            .flatten()
            .filter_map(|(operation, pulse)| Some((operation.as_str(), pulse.as_str()?)))
    }
}

impl Render for Element {
    type Key = Name;
    type Attributes = Map<String, Value>;

    fn render(&self) -> Result<Fragment<Name, Map<String, Value>>> {
        Ok(Fragment::new(self.name.clone(), self.definition.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn aom() -> Element {
        let Value::Object(definition) = json!({
            "singleInput": {"port": ["OPX+", 1]},
            "oscillator": "osc",
            "operations": {"amp_mod": "amp_mod_pulse"},
        }) else {
            unreachable!()
        };
        Element::new("AOM", definition)
    }

    #[test]
    fn test_render_passes_definition_through() {
        let element = aom();
        let fragment = element.render().unwrap();
        assert_eq!(fragment.key, "AOM");
        assert_eq!(fragment.attributes, element.definition);
    }

    #[test]
    fn test_references() {
        let element = aom();
        assert_eq!(element.oscillator(), Some("osc"));
        assert_eq!(
            element.operation_pulses().collect::<Vec<_>>(),
            vec![("amp_mod", "amp_mod_pulse")]
        );

        let empty = Element::new("empty", Map::new());
        assert_eq!(empty.oscillator(), None);
        assert_eq!(empty.operation_pulses().count(), 0);
    }
}

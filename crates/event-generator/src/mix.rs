//! Event type weights.

use std::fmt;
use std::str::FromStr;

use crate::event::EventType;
use crate::generator::GeneratorError;

/// Relative weights used to pick the `EventType` of each generated event.
///
/// The default mix is uniform. A mix is written as comma-separated
/// `name=weight` pairs, e.g. `view=6,add_to_cart=3,purchase=1`; event types
/// left out of an explicit mix get a weight of zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventMix {
    weights: [f64; 3],
}

impl Default for EventMix {
    fn default() -> Self {
        Self {
            weights: [1.0; 3],
        }
    }
}

impl EventMix {
    /// Build a mix from explicit weights for view, add_to_cart and purchase.
    pub fn new(view: f64, add_to_cart: f64, purchase: f64) -> Result<Self, GeneratorError> {
        let mix = Self {
            weights: [view, add_to_cart, purchase],
        };
        mix.validate()?;
        Ok(mix)
    }

    pub fn weight(&self, event_type: EventType) -> f64 {
        self.weights[event_type.index()]
    }

    pub(crate) fn weights(&self) -> [f64; 3] {
        self.weights
    }

    fn validate(&self) -> Result<(), GeneratorError> {
        for event_type in EventType::ALL {
            let weight = self.weight(event_type);
            if !weight.is_finite() || weight < 0.0 {
                return Err(GeneratorError::InvalidWeight { event_type, weight });
            }
        }
        let total: f64 = self.weights.iter().sum();
        if !total.is_finite() {
            return Err(GeneratorError::WeightOverflow);
        }
        if total <= 0.0 {
            return Err(GeneratorError::EmptyMix);
        }
        Ok(())
    }
}

impl FromStr for EventMix {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut weights = [0.0; 3];
        let mut seen = [false; 3];

        for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (name, weight) = pair
                .split_once('=')
                .ok_or_else(|| GeneratorError::MalformedMix(pair.to_string()))?;
            let event_type: EventType = name.trim().parse()?;
            let weight: f64 = weight
                .trim()
                .parse()
                .map_err(|_| GeneratorError::MalformedMix(pair.to_string()))?;

            let idx = event_type.index();
            if seen[idx] {
                return Err(GeneratorError::MalformedMix(format!(
                    "{event_type} given more than once"
                )));
            }
            seen[idx] = true;
            weights[idx] = weight;
        }

        let mix = Self { weights };
        mix.validate()?;
        Ok(mix)
    }
}

impl fmt::Display for EventMix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = EventType::ALL
            .iter()
            .map(|t| format!("{t}={}", self.weight(*t)))
            .collect();
        f.write_str(&parts.join(","))
    }
}

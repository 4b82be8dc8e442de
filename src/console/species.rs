/// Returned when no rule accepts a reading.
pub const UNKNOWN_SPECIES: &str = "Unknown species";

/// Maximum distance, in Hz, between an observed and an expected frequency.
pub const FREQUENCY_TOLERANCE_HZ: f64 = 20.0;

/// Expected signature of one species. `None` frequencies match anything.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesRule {
    pub name: &'static str,
    pub infrared: Option<f64>,
    pub radio_frequency: Option<f64>,
    pub magnetic: &'static str,
}

pub const REFERENCE_RULES: [SpeciesRule; 4] = [
    SpeciesRule {
        name: "Wibbo",
        infrared: Some(457.0),
        radio_frequency: None,
        magnetic: "South",
    },
    SpeciesRule {
        name: "Gribbit",
        infrared: None,
        radio_frequency: Some(100.0),
        magnetic: "South",
    },
    SpeciesRule {
        name: "Snorkle",
        infrared: Some(293.0),
        radio_frequency: None,
        magnetic: "North",
    },
    SpeciesRule {
        name: "Zapple",
        infrared: None,
        radio_frequency: Some(150.0),
        magnetic: "North",
    },
];

/// Ordered rule table. The first rule that accepts a reading wins.
#[derive(Debug, Clone)]
pub struct SpeciesMatcher {
    rules: Vec<SpeciesRule>,
    tolerance_hz: f64,
}

impl Default for SpeciesMatcher {
    fn default() -> Self {
        Self {
            rules: REFERENCE_RULES.to_vec(),
            tolerance_hz: FREQUENCY_TOLERANCE_HZ,
        }
    }
}

impl SpeciesMatcher {
    pub fn new(rules: Vec<SpeciesRule>, tolerance_hz: f64) -> Self {
        Self {
            rules,
            tolerance_hz,
        }
    }

    pub fn classify(
        &self,
        infrared: Option<f64>,
        radio_frequency: Option<f64>,
        magnetic: &str,
    ) -> &'static str {
        self.rules
            .iter()
            .find(|rule| self.accepts(rule, infrared, radio_frequency, magnetic))
            .map(|rule| rule.name)
            .unwrap_or(UNKNOWN_SPECIES)
    }

    fn accepts(
        &self,
        rule: &SpeciesRule,
        infrared: Option<f64>,
        radio_frequency: Option<f64>,
        magnetic: &str,
    ) -> bool {
        self.within_tolerance(rule.infrared, infrared)
            && self.within_tolerance(rule.radio_frequency, radio_frequency)
            && rule.magnetic.to_lowercase() == magnetic.to_lowercase()
    }

    fn within_tolerance(&self, expected: Option<f64>, observed: Option<f64>) -> bool {
        match (expected, observed) {
            (None, _) => true,
            (Some(expected), Some(observed)) => (expected - observed).abs() <= self.tolerance_hz,
            (Some(_), None) => false,
        }
    }
}

/// Classifies against the reference table.
pub fn classify(infrared: Option<f64>, radio_frequency: Option<f64>, magnetic: &str) -> &'static str {
    SpeciesMatcher::default().classify(infrared, radio_frequency, magnetic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_infrared_matches_wibbo() {
        assert_eq!(classify(Some(457.0), None, "South"), "Wibbo");
    }

    #[test]
    fn tolerance_and_case_insensitive_orientation() {
        assert_eq!(classify(Some(470.0), None, "south"), "Wibbo");
        assert_eq!(classify(Some(437.0), None, "SOUTH"), "Wibbo");
    }

    #[test]
    fn outside_tolerance_is_unknown() {
        assert_eq!(classify(Some(480.0), None, "South"), UNKNOWN_SPECIES);
    }

    #[test]
    fn radio_frequency_rules() {
        assert_eq!(classify(None, Some(100.0), "South"), "Gribbit");
        assert_eq!(classify(None, Some(160.0), "North"), "Zapple");
    }

    #[test]
    fn north_infrared_is_snorkle() {
        assert_eq!(classify(Some(293.0), None, "North"), "Snorkle");
    }

    #[test]
    fn unknown_orientation_never_matches() {
        assert_eq!(classify(Some(1000.0), Some(1000.0), "West"), UNKNOWN_SPECIES);
        assert_eq!(classify(Some(457.0), None, ""), UNKNOWN_SPECIES);
    }

    #[test]
    fn first_rule_wins_when_several_accept() {
        // Both Wibbo (ir) and Gribbit (rf) accept this reading.
        assert_eq!(classify(Some(457.0), Some(100.0), "South"), "Wibbo");
    }

    #[test]
    fn missing_input_fails_a_specified_rule() {
        assert_eq!(classify(None, None, "South"), UNKNOWN_SPECIES);
    }

    #[test]
    fn classification_is_repeatable() {
        let matcher = SpeciesMatcher::default();
        let first = matcher.classify(Some(300.0), Some(10.0), "north");
        for _ in 0..5 {
            assert_eq!(matcher.classify(Some(300.0), Some(10.0), "north"), first);
        }
        assert_eq!(first, "Snorkle");
    }
}

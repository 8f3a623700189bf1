//! Valves routed onto pipe sections.

use crate::error::{ComponentError, ComponentResult};
use crate::tables::{CFactor, ValveKind, ValveSize};
use crate::traits::HydraulicElement;
use sf_core::SectionNr;
use sf_core::units::{Length, m};

/// A valve of a catalogued kind and size, placed on one pipe section.
#[derive(Debug, Clone, PartialEq)]
pub struct Valve {
    name: String,
    pub kind: ValveKind,
    pub size: ValveSize,
    /// Pipe section the valve sits on
    pub section: SectionNr,
}

impl Valve {
    pub fn new(kind: ValveKind, size: ValveSize, section: SectionNr) -> Self {
        Self {
            name: format!("{} DN{}", kind.wire_name(), size.mm()),
            kind,
            size,
            section,
        }
    }

    /// Resolve a form entry (type name + dimension string).
    ///
    /// Returns `Ok(None)` for the "not present" dimension, whatever the type.
    /// Unknown types and dimensions are lookup misses.
    pub fn from_wire(
        type_name: &str,
        dimension: &str,
        section: SectionNr,
    ) -> ComponentResult<Option<Self>> {
        if ValveSize::is_not_present(dimension) {
            return Ok(None);
        }
        let kind = ValveKind::from_wire_name(type_name)
            .ok_or_else(|| ComponentError::lookup("valve", format!("type '{type_name}'")))?;
        let size = ValveSize::from_dimension(dimension).ok_or_else(|| {
            ComponentError::lookup("valve", format!("'{type_name}' with dimension '{dimension}'"))
        })?;
        Ok(Some(Self::new(kind, size, section)))
    }
}

impl HydraulicElement for Valve {
    fn name(&self) -> &str {
        &self.name
    }

    fn equivalent_length(&self, c_factor: CFactor) -> ComponentResult<Length> {
        Ok(m(self.kind.equivalent_length_m(self.size) * c_factor.adjustment()))
    }
}

/// Total equivalent length of every valve, whichever section it sits on.
pub fn total_equivalent_length<'v>(
    valves: impl IntoIterator<Item = &'v Valve>,
    c_factor: CFactor,
) -> ComponentResult<Length> {
    valves
        .into_iter()
        .try_fold(m(0.0), |acc, v| Ok(acc + v.equivalent_length(c_factor)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sf_core::units::in_m;

    #[test]
    fn not_present_is_skipped_for_any_type() {
        assert_eq!(Valve::from_wire("Kuleventil", "NA", SectionNr::FIRST), Ok(None));
        assert_eq!(
            Valve::from_wire("Ukjent ventil", "NA", SectionNr::FIRST),
            Ok(None)
        );
    }

    #[test]
    fn unknown_dimension_is_lookup_error() {
        let err = Valve::from_wire("Sluseventil", "40", SectionNr::FIRST).unwrap_err();
        assert!(err.is_lookup());
        assert!(err.to_string().contains("Sluseventil"));
    }

    #[test]
    fn unknown_type_is_lookup_error() {
        let err = Valve::from_wire("Tilbakeslagsventil", "100", SectionNr::FIRST).unwrap_err();
        assert!(err.is_lookup());
    }

    #[test]
    fn c_adjusted_length() {
        let valve = Valve::from_wire(
            "Alarmventil/tilbakeslagsventil hengslet",
            "100",
            SectionNr::FIRST,
        )
        .unwrap()
        .unwrap();
        assert_relative_eq!(in_m(valve.equivalent_length(CFactor::C120).unwrap()), 5.1);
        assert_relative_eq!(
            in_m(valve.equivalent_length(CFactor::C100).unwrap()),
            5.1 * 0.714,
            epsilon = 1e-12
        );
    }

    #[test]
    fn total_over_all_sections() {
        let valves = [
            Valve::new(ValveKind::Gate, ValveSize::Dn80, SectionNr::FIRST),
            Valve::new(ValveKind::Butterfly, ValveSize::Dn80, SectionNr::from_index(2)),
        ];
        let total = total_equivalent_length(&valves, CFactor::C120).unwrap();
        assert_relative_eq!(in_m(total), 0.63 + 3.6, epsilon = 1e-12);
    }
}

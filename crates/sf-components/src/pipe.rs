//! Pipe section with fittings, and the equivalent length of a section.

use crate::error::ComponentResult;
use crate::friction;
use crate::tables::{CFactor, FittingKind};
use crate::traits::HydraulicElement;
use crate::valve::Valve;
use sf_core::numeric::ensure_non_negative;
use sf_core::units::{Length, Pressure, VolumeRate, in_m, in_mm, m, mm};

/// Fitting counts on one pipe section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fittings {
    pub bends_90: u32,
    pub tees: u32,
    pub bends_45: u32,
    pub bends_90_welded: u32,
}

impl Fittings {
    pub fn count(&self, kind: FittingKind) -> u32 {
        match kind {
            FittingKind::Bend90 => self.bends_90,
            FittingKind::Tee => self.tees,
            FittingKind::Bend45 => self.bends_45,
            FittingKind::Bend90Welded => self.bends_90_welded,
        }
    }

    pub fn is_empty(&self) -> bool {
        FittingKind::ALL.iter().all(|k| self.count(*k) == 0)
    }

    /// Equivalent length of all fittings at C = 120 on a pipe of this bore.
    ///
    /// Unclassifiable diameters only fail when there is a fitting to look up.
    fn base_length_m(&self, diameter_mm: f64) -> ComponentResult<f64> {
        let mut total = 0.0;
        for kind in FittingKind::ALL {
            let count = self.count(kind);
            if count > 0 {
                total += f64::from(count) * kind.equivalent_length_m(diameter_mm)?;
            }
        }
        Ok(total)
    }
}

/// Breakdown of a section's equivalent length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquivalentLength {
    pub physical: Length,
    pub fittings: Length,
    pub valves: Length,
}

impl EquivalentLength {
    pub fn total(&self) -> Length {
        self.physical + self.fittings + self.valves
    }

    /// Everything that is not straight pipe.
    pub fn added(&self) -> Length {
        self.fittings + self.valves
    }
}

/// Straight pipe run (rettstrekk) between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeSection {
    name: String,
    /// Internal diameter
    pub diameter: Length,
    /// Physical length
    pub length: Length,
    /// Fittings on this run
    pub fittings: Fittings,
}

impl PipeSection {
    /// Create a section without fittings.
    pub fn new(name: impl Into<String>, diameter: Length, length: Length) -> Self {
        Self {
            name: name.into(),
            diameter,
            length,
            fittings: Fittings::default(),
        }
    }

    /// Section with no length and no fittings; contributes no loss.
    pub fn empty(name: impl Into<String>, diameter: Length) -> Self {
        Self::new(name, diameter, m(0.0))
    }

    pub fn with_fittings(mut self, fittings: Fittings) -> Self {
        self.fittings = fittings;
        self
    }

    /// Physical length + fittings + every valve routed onto this section.
    pub fn equivalent_length_with<'v>(
        &self,
        c_factor: CFactor,
        valves: impl IntoIterator<Item = &'v Valve>,
    ) -> ComponentResult<EquivalentLength> {
        let physical = ensure_non_negative(in_m(self.length), "pipe length")?;
        let diameter_mm = ensure_non_negative(in_mm(self.diameter), "pipe diameter")?;
        let fittings = self.fittings.base_length_m(diameter_mm)? * c_factor.adjustment();

        let mut valve_total = m(0.0);
        for valve in valves {
            valve_total += valve.equivalent_length(c_factor)?;
        }

        Ok(EquivalentLength {
            physical: m(physical),
            fittings: m(fittings),
            valves: valve_total,
        })
    }

    /// Friction gradient (bar/m) for a flow through this section.
    pub fn gradient_bar_per_m(&self, flow: VolumeRate, c_factor: CFactor) -> ComponentResult<f64> {
        friction::gradient_bar_per_m(flow, self.diameter, c_factor)
    }

    /// Friction loss for a flow over the given equivalent length.
    pub fn pressure_drop(
        &self,
        flow: VolumeRate,
        c_factor: CFactor,
        equivalent_length: Length,
    ) -> ComponentResult<Pressure> {
        friction::pressure_drop(flow, self.diameter, c_factor, equivalent_length)
    }

    /// Internal diameter in mm, the unit the tables are keyed by.
    pub fn diameter_mm(&self) -> f64 {
        in_mm(self.diameter)
    }
}

impl HydraulicElement for PipeSection {
    fn name(&self) -> &str {
        &self.name
    }

    fn equivalent_length(&self, c_factor: CFactor) -> ComponentResult<Length> {
        Ok(self.equivalent_length_with(c_factor, [])?.total())
    }
}

impl Default for PipeSection {
    fn default() -> Self {
        Self::empty("pipe", mm(0.0))
    }
}

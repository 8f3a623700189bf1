//! Static NS 12845 lookup tables.
//!
//! Fitting and valve values are equivalent straight-pipe lengths in metres,
//! tabulated for C = 120. [`CFactor::adjustment`] scales them to the pipe
//! material actually installed.

use core::fmt;

use crate::error::{ComponentError, ComponentResult};

/// Nominal diameter classes (mm) indexing the fitting tables.
pub const DIAMETER_CLASSES_MM: [f64; 11] = [
    20.0, 25.0, 32.0, 40.0, 50.0, 65.0, 80.0, 100.0, 150.0, 200.0, 250.0,
];

/// Largest internal diameter that still maps onto the last class.
pub const MAX_CLASSIFIED_DIAMETER_MM: f64 = 300.0;

const BEND_90: [f64; 11] = [0.76, 0.77, 1.0, 1.2, 1.5, 1.9, 2.4, 3.0, 4.3, 5.7, 7.4];
const BEND_90_WELDED: [f64; 11] = [0.30, 0.36, 0.49, 0.56, 0.69, 0.88, 1.1, 1.4, 2.0, 2.6, 3.4];
const BEND_45: [f64; 11] = [0.34, 0.40, 0.55, 0.66, 0.76, 1.0, 1.3, 1.6, 2.3, 3.1, 3.9];
// Flow through the branch of the tee.
const TEE: [f64; 11] = [1.3, 1.5, 2.1, 2.4, 2.9, 3.8, 4.8, 6.1, 8.6, 11.0, 14.0];

/// Index of the nearest diameter class, or `None` when the diameter cannot be
/// classified (non-positive, non-finite, or larger than any tabulated pipe).
pub fn diameter_class(diameter_mm: f64) -> Option<usize> {
    if !diameter_mm.is_finite() || diameter_mm <= 0.0 || diameter_mm > MAX_CLASSIFIED_DIAMETER_MM
    {
        return None;
    }
    DIAMETER_CLASSES_MM
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            (*a - diameter_mm)
                .abs()
                .total_cmp(&(*b - diameter_mm).abs())
        })
        .map(|(i, _)| i)
}

/// Pipe fitting kinds with tabulated equivalent lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FittingKind {
    /// Standard threaded 90° bend
    Bend90,
    /// Tee, flow through branch
    Tee,
    /// Standard threaded 45° bend
    Bend45,
    /// Welded 90° bend, r/d = 1.5
    Bend90Welded,
}

impl FittingKind {
    pub const ALL: [FittingKind; 4] = [
        FittingKind::Bend90,
        FittingKind::Tee,
        FittingKind::Bend45,
        FittingKind::Bend90Welded,
    ];

    fn row(self) -> &'static [f64; 11] {
        match self {
            FittingKind::Bend90 => &BEND_90,
            FittingKind::Tee => &TEE,
            FittingKind::Bend45 => &BEND_45,
            FittingKind::Bend90Welded => &BEND_90_WELDED,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FittingKind::Bend90 => "90° bend",
            FittingKind::Tee => "T-piece",
            FittingKind::Bend45 => "45° bend",
            FittingKind::Bend90Welded => "90° bend (welded)",
        }
    }

    /// Equivalent length (m) at C = 120 for one fitting on a pipe of the given
    /// internal diameter.
    pub fn equivalent_length_m(self, diameter_mm: f64) -> ComponentResult<f64> {
        let class = diameter_class(diameter_mm).ok_or_else(|| {
            ComponentError::lookup("fitting", format!("{} at {diameter_mm} mm", self.label()))
        })?;
        Ok(self.row()[class])
    }
}

/// Hazen-Williams roughness coefficient. Only the standard values are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CFactor {
    C100,
    C110,
    #[default]
    C120,
    C130,
    C140,
}

impl CFactor {
    pub const ALL: [CFactor; 5] = [
        CFactor::C100,
        CFactor::C110,
        CFactor::C120,
        CFactor::C130,
        CFactor::C140,
    ];

    /// Exact match against the standard values; fractional inputs are rejected.
    pub fn from_value(value: f64) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.value() == value)
    }

    pub fn value(self) -> f64 {
        match self {
            CFactor::C100 => 100.0,
            CFactor::C110 => 110.0,
            CFactor::C120 => 120.0,
            CFactor::C130 => 130.0,
            CFactor::C140 => 140.0,
        }
    }

    /// Multiplier applied to the C = 120 equivalent lengths.
    pub fn adjustment(self) -> f64 {
        match self {
            CFactor::C100 => 0.714,
            CFactor::C110 => 0.85,
            CFactor::C120 => 1.00,
            CFactor::C130 => 1.16,
            CFactor::C140 => 1.33,
        }
    }
}

impl fmt::Display for CFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.value())
    }
}

impl TryFrom<f64> for CFactor {
    type Error = ComponentError;

    fn try_from(value: f64) -> ComponentResult<Self> {
        Self::from_value(value).ok_or_else(|| ComponentError::lookup("C-factor", value.to_string()))
    }
}

/// Valve catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValveKind {
    /// Gate valve
    Gate,
    /// Alarm / check valve, hinged clapper
    AlarmCheckHinged,
    /// Alarm / check valve, diaphragm
    AlarmCheckDiaphragm,
    /// Butterfly valve
    Butterfly,
    /// Ball valve
    Ball,
}

impl ValveKind {
    pub const ALL: [ValveKind; 5] = [
        ValveKind::Gate,
        ValveKind::AlarmCheckHinged,
        ValveKind::AlarmCheckDiaphragm,
        ValveKind::Butterfly,
        ValveKind::Ball,
    ];

    /// Name used by the input form.
    pub fn wire_name(self) -> &'static str {
        match self {
            ValveKind::Gate => "Sluseventil",
            ValveKind::AlarmCheckHinged => "Alarmventil/tilbakeslagsventil hengslet",
            ValveKind::AlarmCheckDiaphragm => "Alarmventil/tilbakeslagsventil membran",
            ValveKind::Butterfly => "Spjeldventil",
            ValveKind::Ball => "Kuleventil",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|k| k.wire_name() == name)
    }

    fn row(self) -> &'static [f64; 7] {
        match self {
            ValveKind::Gate => &[0.38, 0.51, 0.63, 0.81, 1.1, 1.5, 2.0],
            ValveKind::AlarmCheckHinged => &[2.4, 3.2, 3.9, 5.1, 7.2, 9.4, 12.0],
            ValveKind::AlarmCheckDiaphragm => &[12.0, 19.0, 19.7, 25.0, 35.0, 47.0, 62.0],
            ValveKind::Butterfly => &[2.2, 2.9, 3.6, 4.6, 6.4, 8.6, 9.9],
            ValveKind::Ball => &[16.0, 21.0, 26.0, 34.0, 48.0, 64.0, 84.0],
        }
    }

    /// Equivalent length (m) at C = 120.
    pub fn equivalent_length_m(self, size: ValveSize) -> f64 {
        self.row()[size as usize]
    }
}

impl fmt::Display for ValveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Nominal valve dimension (DN).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValveSize {
    Dn50 = 0,
    Dn65,
    Dn80,
    Dn100,
    Dn150,
    Dn200,
    Dn250,
}

impl ValveSize {
    pub const ALL: [ValveSize; 7] = [
        ValveSize::Dn50,
        ValveSize::Dn65,
        ValveSize::Dn80,
        ValveSize::Dn100,
        ValveSize::Dn150,
        ValveSize::Dn200,
        ValveSize::Dn250,
    ];

    /// Marker the form uses for "no valve of this type".
    pub const NOT_PRESENT: &'static str = "NA";

    pub fn mm(self) -> u32 {
        match self {
            ValveSize::Dn50 => 50,
            ValveSize::Dn65 => 65,
            ValveSize::Dn80 => 80,
            ValveSize::Dn100 => 100,
            ValveSize::Dn150 => 150,
            ValveSize::Dn200 => 200,
            ValveSize::Dn250 => 250,
        }
    }

    pub fn from_dimension(dimension: &str) -> Option<Self> {
        let mm: u32 = dimension.trim().parse().ok()?;
        Self::ALL.into_iter().find(|s| s.mm() == mm)
    }

    pub fn is_not_present(dimension: &str) -> bool {
        dimension.trim().eq_ignore_ascii_case(Self::NOT_PRESENT)
    }
}

impl fmt::Display for ValveSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mm())
    }
}

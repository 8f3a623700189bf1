// sf-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, Length as UomLength, Pressure as UomPressure, VolumeRate as UomVolumeRate,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type Length = UomLength;
pub type Pressure = UomPressure;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn bar(v: f64) -> Pressure {
    use uom::si::pressure::bar;
    Pressure::new::<bar>(v)
}

#[inline]
pub fn lpm(v: f64) -> VolumeRate {
    use uom::si::volume_rate::liter_per_minute;
    VolumeRate::new::<liter_per_minute>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn mm(v: f64) -> Length {
    use uom::si::length::millimeter;
    Length::new::<millimeter>(v)
}

#[inline]
pub fn m2(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}

// Readers in the engineering units used on the wire.

#[inline]
pub fn in_bar(p: Pressure) -> f64 {
    p.get::<uom::si::pressure::bar>()
}

#[inline]
pub fn in_lpm(q: VolumeRate) -> f64 {
    q.get::<uom::si::volume_rate::liter_per_minute>()
}

#[inline]
pub fn in_m(l: Length) -> f64 {
    l.get::<uom::si::length::meter>()
}

#[inline]
pub fn in_mm(l: Length) -> f64 {
    l.get::<uom::si::length::millimeter>()
}

#[inline]
pub fn in_m2(a: Area) -> f64 {
    a.get::<uom::si::area::square_meter>()
}

pub mod constants {
    use super::*;

    /// Static head of a water column as used by the NS 12845 hand method.
    pub const STATIC_HEAD_BAR_PER_M: f64 = 0.1;

    /// Static pressure per metre of water column.
    #[inline]
    pub fn static_head_per_m() -> Pressure {
        bar(STATIC_HEAD_BAR_PER_M)
    }
}

// lp-core/src/units.rs

use uom::si::f64::{Length as UomLength, Power as UomPower, Time as UomTime};

// Public canonical unit types (SI, f64)
pub type Length = UomLength;
pub type Power = UomPower;
pub type Time = UomTime;

#[inline]
pub fn watts(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn km(v: f64) -> Length {
    use uom::si::length::kilometer;
    Length::new::<kilometer>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn to_km(length: Length) -> f64 {
    use uom::si::length::kilometer;
    length.get::<kilometer>()
}

#[inline]
pub fn to_ms(time: Time) -> f64 {
    use uom::si::time::millisecond;
    time.get::<millisecond>()
}

/// Decibels to a linear power ratio.
#[inline]
pub fn db_to_lin(db: f64) -> f64 {
    10f64.powf(db / 10.0)
}

/// Linear power ratio to decibels.
#[inline]
pub fn lin_to_db(lin: f64) -> f64 {
    10.0 * lin.log10()
}

/// dBm to absolute power.
#[inline]
pub fn dbm_to_power(dbm: f64) -> Power {
    watts(db_to_lin(dbm) * 1e-3)
}

/// Absolute power in watts to dBm.
#[inline]
pub fn watts_to_dbm(w: f64) -> f64 {
    lin_to_db(w * 1e3)
}

pub mod constants {
    use super::*;

    pub const PLANCK_J_S: f64 = 6.626_070_15e-34;
    pub const SPEED_OF_LIGHT_M_PER_S: f64 = 299_792_458.0;
    /// Group index of standard single-mode fiber.
    pub const FIBER_GROUP_INDEX: f64 = 1.468;
    /// Upper bound on the channel count of a spectral grid.
    pub const MAX_CHANNELS: usize = 10_000;

    /// Propagation delay through `length` of standard fiber.
    #[inline]
    pub fn fiber_delay(length: Length) -> Time {
        s(length.value * FIBER_GROUP_INDEX / SPEED_OF_LIGHT_M_PER_S)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn constructors_smoke() {
        let _p = watts(1e-3);
        let _l = km(80.0);
        let _l2 = m(10.0);
        let _t = s(0.1);
    }

    #[test]
    fn db_conversions() {
        assert!((db_to_lin(10.0) - 10.0).abs() < 1e-12);
        assert!((lin_to_db(100.0) - 20.0).abs() < 1e-12);
        assert!((dbm_to_power(0.0).value - 1e-3).abs() < 1e-15);
        assert!(watts_to_dbm(1e-3).abs() < 1e-12);
        assert!((watts_to_dbm(dbm_to_power(-16.0).value) + 16.0).abs() < 1e-9);
    }

    #[test]
    fn km_round_trip() {
        assert!((to_km(m(80_000.0)) - 80.0).abs() < 1e-12);
    }

    #[test]
    fn delay_of_one_hundred_km() {
        let ms = to_ms(constants::fiber_delay(km(100.0)));
        assert!((ms - 0.4897).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn db_round_trip(db in -60.0f64..60.0) {
            prop_assert!((lin_to_db(db_to_lin(db)) - db).abs() < 1e-9);
        }

        #[test]
        fn dbm_round_trip(dbm in -50.0f64..30.0) {
            prop_assert!((watts_to_dbm(dbm_to_power(dbm).value) - dbm).abs() < 1e-9);
        }
    }
}

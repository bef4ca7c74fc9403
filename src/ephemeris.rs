//! Positions of the Galilean moons relative to Jupiter as seen from Earth.
//!
//! Uses the low-accuracy theory from Meeus, *Astronomical Algorithms* ch. 44:
//! Jupiter's geometry from simple mean elements, then each moon's longitude
//! corrected for the main mutual perturbations. Good to a few hundredths of a
//! Jupiter radius, which is far below one terminal column at any useful scale.

use crate::error::ComputationError;
use crate::model::{Moon, Positions};
use chrono::{DateTime, Datelike, Utc};
use tracing::trace;

const MIN_YEAR: i32 = 1800;
const MAX_YEAR: i32 = 2200;

const J2000: f64 = 2_451_545.0;
const UNIX_EPOCH_JD: f64 = 2_440_587.5;
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Light travels one AU in about 1/173 day.
const LIGHT_DAYS_PER_AU: f64 = 1.0 / 173.0;

pub(crate) trait PositionProvider {
    /// One x-offset per moon in [`Moon::ALL`] order, recomputed on every call.
    fn positions(&self, at: DateTime<Utc>) -> Result<Positions, ComputationError>;
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct MeeusEphemeris;

impl MeeusEphemeris {
    /// Offsets along Jupiter's equator in Jupiter radii, positive toward the east.
    pub(crate) fn solve(&self, at: DateTime<Utc>) -> Result<[f64; 4], ComputationError> {
        let year = at.year();
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ComputationError::ClockOutOfRange {
                at,
                min_year: MIN_YEAR,
                max_year: MAX_YEAR,
            });
        }

        let d = julian_day(at) - J2000;

        // Earth and Jupiter mean anomalies and the great-inequality term.
        let v = deg(172.74 + 0.001_115_88 * d);
        let m = deg(357.529 + 0.985_600_3 * d);
        let n = deg(20.020 + 0.083_085_3 * d + 0.329 * v.sin());
        let j = deg(66.115 + 0.902_517_9 * d - 0.329 * v.sin());

        // Equations of centre, in degrees.
        let a = 1.915 * m.sin() + 0.020 * (2.0 * m).sin();
        let b = 5.555 * n.sin() + 0.168 * (2.0 * n).sin();
        let k = deg(j.to_degrees() + a - b);

        let sun_earth = 1.000_14 - 0.016_71 * m.cos() - 0.000_14 * (2.0 * m).cos();
        let sun_jupiter = 5.208_72 - 0.252_08 * n.cos() - 0.006_11 * (2.0 * n).cos();
        let earth_jupiter = (sun_jupiter * sun_jupiter + sun_earth * sun_earth
            - 2.0 * sun_jupiter * sun_earth * k.cos())
        .sqrt();

        // Phase angle seen from Jupiter.
        let psi = (sun_earth / earth_jupiter * k.sin()).asin();

        let t = d - earth_jupiter * LIGHT_DAYS_PER_AU;
        let shift = psi.to_degrees() - b;

        let mut u = [
            163.8069 + 203.405_864_6 * t + shift,
            358.4140 + 101.291_633_5 * t + shift,
            5.7176 + 50.234_518_0 * t + shift,
            224.8092 + 21.487_980_0 * t + shift,
        ];
        let g = deg(331.18 + 50.310_482 * t);
        let h = deg(87.45 + 21.569_231 * t);

        let io_europa = deg(2.0 * (u[0] - u[1]));
        let europa_ganymede = deg(2.0 * (u[1] - u[2]));

        u[0] += 0.473 * io_europa.sin();
        u[1] += 1.065 * europa_ganymede.sin();
        u[2] += 0.165 * g.sin();
        u[3] += 0.843 * h.sin();

        let r = [
            5.9057 - 0.0244 * io_europa.cos(),
            9.3966 - 0.0882 * europa_ganymede.cos(),
            14.9883 - 0.0216 * g.cos(),
            26.3627 - 0.1939 * h.cos(),
        ];

        let mut out = [0.0; 4];
        for moon in Moon::ALL {
            let i = moon.index();
            // Meeus measures X toward the west.
            let x = -r[i] * deg(u[i]).sin();
            if !x.is_finite() {
                return Err(ComputationError::NonFinite { moon });
            }
            out[i] = x;
        }

        trace!(jd = d + J2000, ?out, "solved galilean moons");
        Ok(out)
    }
}

impl PositionProvider for MeeusEphemeris {
    fn positions(&self, at: DateTime<Utc>) -> Result<Positions, ComputationError> {
        self.solve(at).map(Positions::new)
    }
}

pub(crate) fn julian_day(at: DateTime<Utc>) -> f64 {
    let secs = at.timestamp() as f64 + f64::from(at.timestamp_subsec_nanos()) * 1e-9;
    secs / SECONDS_PER_DAY + UNIX_EPOCH_JD
}

fn deg(x: f64) -> f64 {
    x.to_radians()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
    }

    #[test]
    fn julian_day_of_j2000() {
        assert!((julian_day(at(2000, 1, 1, 12)) - J2000).abs() < 1e-9);
    }

    #[test]
    fn matches_worked_example() {
        // Meeus example 44.a, 1992 December 16 at 0h.
        let out = MeeusEphemeris.solve(at(1992, 12, 16, 0)).unwrap();
        let meeus_x = [-3.44, 7.44, 1.24, 7.08];
        for (x, west) in out.iter().zip(meeus_x) {
            assert!((x + west).abs() < 0.05, "got {x} expected {}", -west);
        }
    }

    #[test]
    fn offsets_stay_within_orbit_radii() {
        let limits = [6.0, 9.6, 15.1, 26.7];
        let start = at(2024, 3, 1, 0);
        for step in 0..200 {
            let t = start + Duration::hours(7 * step);
            let p = MeeusEphemeris.positions(t).unwrap();
            for (moon, x) in p.iter() {
                assert!(x.abs() <= limits[moon.index()], "{moon} at {x}");
            }
        }
    }

    #[test]
    fn callisto_reaches_further_than_io() {
        let start = at(2025, 6, 1, 0);
        let mut io_max: f64 = 0.0;
        let mut callisto_max: f64 = 0.0;
        for step in 0..400 {
            let p = MeeusEphemeris.positions(start + Duration::hours(step)).unwrap();
            io_max = io_max.max(p[Moon::Io].abs());
            callisto_max = callisto_max.max(p[Moon::Callisto].abs());
        }
        assert!(io_max > 5.0);
        assert!(callisto_max > io_max * 3.0);
    }

    #[test]
    fn same_instant_same_answer() {
        let t = at(2026, 10, 18, 5);
        assert_eq!(
            MeeusEphemeris.positions(t).unwrap(),
            MeeusEphemeris.positions(t).unwrap()
        );
    }

    #[test]
    fn rejects_implausible_clock() {
        assert!(MeeusEphemeris.positions(at(1970, 1, 1, 0)).is_ok());

        let err = MeeusEphemeris.positions(at(1500, 1, 1, 0)).unwrap_err();
        assert!(matches!(err, ComputationError::ClockOutOfRange { min_year: 1800, .. }));
    }
}

// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Statistics
//!
//! Equilibrium occupation functions for electrons and phonons, and the Franck-Condon factors which weight
//! the phonon sidebands in the small-polaron picture.
//!
//! Below `TEMPERATURE_FLOOR` the occupations take their zero-temperature limits. Above it they are evaluated
//! in a form which never exponentiates a positive argument, so they saturate to 0 or 1 for extreme
//! `(ω - μ) / kT` rather than overflowing.

mod polaron;

pub use polaron::{factorial, franck_condon_weight, PhononCoefficientSeries};

use crate::constants::TEMPERATURE_FLOOR;
use nalgebra::RealField;

/// Returns true when the thermal energy is too small to evaluate an occupation at finite temperature
pub(crate) fn is_below_temperature_floor<T: Copy + RealField>(temperature: T) -> bool {
    temperature < nalgebra::convert(TEMPERATURE_FLOOR)
}

/// Bose-Einstein occupation of a mode with energy `phonon_energy` at thermal energy `temperature`
pub fn bose_occupation<T: Copy + RealField>(phonon_energy: T, temperature: T) -> T {
    if is_below_temperature_floor(temperature) {
        return T::zero();
    }
    // 1 / (e^x - 1) = e^-x / (1 - e^-x)
    let decay = (-phonon_energy / temperature).exp();
    decay / (T::one() - decay)
}

/// Fermi-Dirac occupation of a state at `energy` for a reservoir at `chemical_potential` and thermal energy `temperature`
pub fn fermi_occupation<T: Copy + RealField>(energy: T, chemical_potential: T, temperature: T) -> T {
    if is_below_temperature_floor(temperature) {
        return if energy < chemical_potential {
            T::one()
        } else {
            T::zero()
        };
    }
    let argument = (energy - chemical_potential) / temperature;
    if argument > T::zero() {
        let decay = (-argument).exp();
        decay / (T::one() + decay)
    } else {
        T::one() / (T::one() + argument.exp())
    }
}

#[cfg(test)]
mod test {
    use super::{bose_occupation, fermi_occupation};
    use approx::assert_relative_eq;

    #[test]
    fn fermi_occupation_is_one_half_at_the_chemical_potential() {
        assert_relative_eq!(fermi_occupation(0.3, 0.3, 0.1), 0.5);
    }

    #[test]
    fn fermi_occupation_is_particle_hole_symmetric() {
        for x in [0.01, 0.2, 0.7, 3.0] {
            let above = fermi_occupation(x, 0., 0.1);
            let below = fermi_occupation(-x, 0., 0.1);
            assert_relative_eq!(above + below, 1., epsilon = 1e-14);
        }
    }

    #[test]
    fn fermi_occupation_saturates_for_extreme_arguments() {
        let empty: f64 = fermi_occupation(1e6, 0., 1e-3);
        let full: f64 = fermi_occupation(-1e6, 0., 1e-3);
        assert!(empty.is_finite() && full.is_finite());
        assert_relative_eq!(empty, 0.);
        assert_relative_eq!(full, 1.);
    }

    #[test]
    fn fermi_occupation_is_a_step_below_the_temperature_floor() {
        assert_relative_eq!(fermi_occupation(-1e-3, 0., 0.), 1.);
        assert_relative_eq!(fermi_occupation(1e-3, 0., 0.), 0.);
        // The step is open at the chemical potential
        assert_relative_eq!(fermi_occupation(0., 0., 1e-12), 0.);
    }

    #[test]
    fn bose_occupation_matches_the_closed_form() {
        let expected = 1. / (1f64.exp() - 1.);
        assert_relative_eq!(bose_occupation(1., 1.), expected, epsilon = 1e-14);
        let expected = 1. / ((1f64 / 0.1).exp() - 1.);
        assert_relative_eq!(bose_occupation(1., 0.1), expected, max_relative = 1e-12);
    }

    #[test]
    fn bose_occupation_vanishes_below_the_temperature_floor() {
        assert_eq!(bose_occupation(1., 0.), 0.);
        assert_eq!(bose_occupation(1., 1e-11), 0.);
    }

    #[test]
    fn bose_occupation_does_not_overflow_at_low_temperature() {
        let occupation: f64 = bose_occupation(1., 1e-4);
        assert!(occupation.is_finite());
        assert_relative_eq!(occupation, 0.);
    }
}

// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Constants
//!
//! Defines the constants used in the simulation. All energies are measured in units of the
//! characteristic phonon energy `Ω0`, charge in units of the elementary charge and action in units of Planck's constant,
//! so the conductance is reported in units of the conductance quantum `e^2 / h`.

pub const ELECTRON_CHARGE: f64 = 1.; // Single electron charge in units of e
pub const PLANCK: f64 = 1.; // Planck constant in units of h
pub const TEMPERATURE_FLOOR: f64 = 1e-10; // Below this thermal energy occupations take their zero temperature form
pub const DETERMINANT_THRESHOLD: f64 = 1e-14; // Matrices with a smaller determinant modulus are treated as singular

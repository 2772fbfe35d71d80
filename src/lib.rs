// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Transporter-Majorana computes the coherent transport through a quantum dot side-coupled to a Majorana zero mode
//!
//! # Overview
//! The scattering region contains exactly two levels: a quantum dot, which is tunnel coupled to two normal leads, and
//! an effective Majorana zero-energy mode which couples only to the dot. The dot-Majorana coupling is threaded by a
//! magnetic flux, so the effective hopping is `λ1 cos(φ/2) - λ2 sin(φ/2)`. Transport is described in the non-equilibrium
//! Green's function formalism in the wide-band limit, so the lead self-energy is independent of energy. Electron-phonon
//! coupling enters through the small-polaron (Lang-Firsov) transformation and is summarised by the Franck-Condon weights
//! `L_n` of the phonon sidebands.
//!
//! For each energy on a symmetric grid the retarded Green's function is found by closed-form inversion of a complex
//! 2x2 matrix, and reduced into the density of states, the transmission, the conductance, the current and `|G_11|^2`.
//! Energies are independent of one another, so the sweep runs in parallel and is re-ordered by energy before it is
//! handed to a [`postprocessor::ResultSink`].
//!
//! # Usage
//! Transporter-Majorana is distributed as a binary crate. Default parameters are read from `.config/default.toml`,
//! the run-tunable scalars can be overridden on the command line:
//!
//! ```bash
//! transporter-majorana --phi 3.14159 --temp 0.1 --em 0.0 --lambda 0.3 --output results
//! ```
//!
//! which writes the density of states, current, conductance, `|G_11|^2` and phonon coefficient tables, and a run
//! summary, into the `results` directory.

#![warn(missing_docs)]
#![allow(clippy::type_complexity)]

/// The command line global application, tracing and display primitives
pub mod app;

/// Physical constants
mod constants;

/// Error handling
pub mod error;

/// Greens function methods
pub mod greens_functions;

/// The effective two-level Hamiltonian
pub mod hamiltonian;

/// Immutable parameters describing a single run
pub mod parameters;

/// Computes quantities of interest from Greens functions, such as the density of states and current
pub mod postprocessor;

/// Self energies of the normal leads
pub mod self_energy;

/// Discrete energy space
pub mod spectral;

/// Occupation functions and Franck-Condon factors
pub mod statistics;

/// The energy sweep
pub mod sweep;

/// Helper functions and traits
mod utilities;

//! Franck-Condon factors for the small-polaron transformation
//!
//! After the Lang-Firsov transformation the tunnelling amplitudes are dressed by the overlap between the
//! `n`-phonon state and the ground state of the displaced oscillator,
//!
//! `L_n = exp(-g^2 / 2) g^n / sqrt(n!)`,   `g = λ0 / Ω0`.
//!
//! With `λ0 = 0` the series collapses to `L_0 = 1` and `L_n = 0` for all `n >= 1`, which disables the
//! electron-phonon coupling exactly.

use nalgebra::RealField;

/// `n!` as a real number
///
/// The argument is unsigned, so a negative order cannot reach this function: it is rejected where the
/// phonon truncation order is parsed.
pub fn factorial<T: Copy + RealField>(n: usize) -> T {
    (1..=n).fold(T::one(), |acc, k| acc * nalgebra::convert(k as f64))
}

/// The Franck-Condon weight of the `n`-th phonon sideband for coupling `coupling` to a mode of energy `phonon_energy`
///
/// Evaluated through the recurrence `L_n = L_{n-1} g / sqrt(n)`, so neither `g^n` nor `n!` is formed and
/// high orders underflow to zero instead of becoming `inf / inf`.
pub fn franck_condon_weight<T: Copy + RealField>(n: usize, coupling: T, phonon_energy: T) -> T {
    let g = coupling / phonon_energy;
    (1..=n).fold(ground_state_overlap(g), |weight, k| {
        next_weight(weight, g, k)
    })
}

fn ground_state_overlap<T: Copy + RealField>(g: T) -> T {
    let half: T = nalgebra::convert(0.5);
    (-g * g * half).exp()
}

fn next_weight<T: Copy + RealField>(previous: T, g: T, n: usize) -> T {
    previous * g / nalgebra::convert::<f64, T>(n as f64).sqrt()
}

/// The Franck-Condon weights `L_0 ..= L_{N_ph}` for a single run
///
/// The weights do not depend on energy, so the series is evaluated once and replicated
/// for each sample of the energy sweep when results are written.
#[derive(Clone, Debug, PartialEq)]
pub struct PhononCoefficientSeries<T> {
    coefficients: Vec<T>,
}

impl<T> PhononCoefficientSeries<T> {
    pub(crate) fn as_slice(&self) -> &[T] {
        &self.coefficients
    }
}

impl<T: Copy + RealField> PhononCoefficientSeries<T> {
    /// Evaluate the weights up to and including `truncation_order`
    pub fn new(truncation_order: usize, coupling: T, phonon_energy: T) -> Self {
        let g = coupling / phonon_energy;
        let mut coefficients = Vec::with_capacity(truncation_order + 1);
        coefficients.push(ground_state_overlap(g));
        for n in 1..=truncation_order {
            coefficients.push(next_weight(coefficients[n - 1], g, n));
        }
        Self { coefficients }
    }

    /// The highest phonon order retained in the series
    pub fn truncation_order(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Iterate over `(n, L_n)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (usize, T)> + '_ {
        self.coefficients.iter().copied().enumerate()
    }

    /// `Σ L_n^2`, the Poisson weight captured by the truncated series. This tends to one as the order grows
    pub fn captured_weight(&self) -> T {
        self.coefficients
            .iter()
            .fold(T::zero(), |sum, &weight| sum + weight * weight)
    }
}

#[cfg(test)]
mod test {
    use super::{factorial, franck_condon_weight, PhononCoefficientSeries};
    use approx::assert_relative_eq;

    #[test]
    fn factorial_of_small_integers() {
        assert_eq!(factorial::<f64>(0), 1.);
        assert_eq!(factorial::<f64>(1), 1.);
        assert_eq!(factorial::<f64>(5), 120.);
        assert_eq!(factorial::<f64>(10), 3_628_800.);
    }

    #[test]
    fn zero_coupling_reproduces_the_uncoupled_series_exactly() {
        assert_eq!(franck_condon_weight(0, 0f64, 1.), 1.);
        for n in 1..20 {
            assert_eq!(franck_condon_weight(n, 0f64, 1.), 0.);
        }
    }

    #[test]
    fn weights_match_the_closed_form() {
        let g = 0.7f64;
        let weight = franck_condon_weight(3, g, 1.);
        let expected = (-g * g / 2.).exp() * g.powi(3) / 6f64.sqrt();
        assert_relative_eq!(weight, expected, epsilon = 1e-15);
        // Only the ratio λ0 / Ω0 enters
        assert_relative_eq!(franck_condon_weight(3, 2. * g, 2.), weight, epsilon = 1e-15);
    }

    #[test]
    fn series_captures_the_full_poisson_weight() {
        let series = PhononCoefficientSeries::new(40, 1.2f64, 1.);
        assert_eq!(series.truncation_order(), 40);
        assert_relative_eq!(series.captured_weight(), 1., epsilon = 1e-12);
    }

    #[test]
    fn recurrence_agrees_with_the_factorial_form_at_low_order() {
        let g = 1.3f64;
        for n in 0..15 {
            let closed_form = (-g * g / 2.).exp() * g.powi(n as i32) / factorial::<f64>(n).sqrt();
            assert_relative_eq!(franck_condon_weight(n, g, 1.), closed_form, max_relative = 1e-12);
        }
    }

    #[test]
    fn high_order_series_stays_finite() {
        // Both g^n and n! overflow an f64 well before this order
        let series = PhononCoefficientSeries::new(2000, 2f64, 1.);
        assert!(series.iter().all(|(_, weight)| weight.is_finite()));
        assert_eq!(series.iter().last().map(|(_, weight)| weight), Some(0.));
        assert_relative_eq!(series.captured_weight(), 1., epsilon = 1e-12);
        let single: f64 = franck_condon_weight(1500, 2., 1.);
        assert!(single.is_finite());
    }

    #[test]
    fn series_at_zero_coupling() {
        let series = PhononCoefficientSeries::new(10, 0f64, 1.);
        let weights = series.iter().collect::<Vec<_>>();
        assert_eq!(weights.len(), 11);
        assert_eq!(weights[0], (0, 1.));
        assert!(weights.iter().skip(1).all(|&(_, weight)| weight == 0.));
    }
}

/// This module provides the discrete energy space over which the Green's functions are evaluated,
/// and the quadrature rules used to integrate sampled observables over it
mod energy;

pub use energy::{EnergySpace, EnergySpaceBuilder};

use nalgebra::RealField;

/// Enum for discrete integration methods
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub enum IntegrationRule {
    /// Trapezium rule
    Trapezium,
    /// Romberg integration, taken to first order, which gives Simpson's weights
    Romberg,
    /// Three point integration
    ThreePoint,
}

impl Default for IntegrationRule {
    fn default() -> Self {
        IntegrationRule::Trapezium
    }
}

/// Quadrature weights on a uniform grid
pub trait GenerateWeights<T: Copy + RealField> {
    /// The rule generating the weights
    fn query_integration_rule(&self) -> IntegrationRule;
    /// Weights in units of the grid step for a uniform grid of `num_points` points
    fn generate_weights(&self, num_points: usize) -> Vec<T>;
}

impl<T: Copy + RealField> GenerateWeights<T> for IntegrationRule {
    fn query_integration_rule(&self) -> IntegrationRule {
        *self
    }

    fn generate_weights(&self, num_points: usize) -> Vec<T> {
        // The end corrections of the three point rule overlap on grids shorter than eight points
        let rule = match self {
            IntegrationRule::ThreePoint if num_points < 8 => IntegrationRule::Trapezium,
            rule => *rule,
        };
        // A closure generating the weight for a given point index
        let weight = |idx: usize| -> T {
            match rule {
                IntegrationRule::Trapezium => {
                    if (idx == 0) | (idx == num_points - 1) {
                        T::one() / (T::one() + T::one())
                    } else {
                        T::one()
                    }
                }
                IntegrationRule::Romberg => {
                    if (idx == 0) | (idx == num_points - 1) {
                        nalgebra::convert(1. / 3.)
                    } else if idx % 2 == 0 {
                        nalgebra::convert(2. / 3.)
                    } else {
                        nalgebra::convert(4. / 3.)
                    }
                }
                IntegrationRule::ThreePoint => {
                    if (idx == 0) | (idx == num_points - 1) {
                        nalgebra::convert(17. / 48.)
                    } else if (idx == 1) | (idx == num_points - 2) {
                        nalgebra::convert(59. / 48.)
                    } else if (idx == 2) | (idx == num_points - 3) {
                        nalgebra::convert(43. / 48.)
                    } else if (idx == 3) | (idx == num_points - 4) {
                        nalgebra::convert(49. / 48.)
                    } else {
                        T::one()
                    }
                }
            }
        };
        (0..num_points).map(weight).collect()
    }
}

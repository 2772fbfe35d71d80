use super::{GenerateWeights, IntegrationRule};
use crate::error::ParameterError;
use nalgebra::RealField;

/// Builder for the symmetric energy grid `ω_i = i dω`, `i = -N/2 ..= N/2`
pub struct EnergySpaceBuilder<T, Step, IntegrationMethod> {
    number_of_steps: usize,
    step: Step,
    integration_rule: IntegrationMethod,
    marker: std::marker::PhantomData<T>,
}

impl<T> EnergySpaceBuilder<T, (), ()> {
    /// Initialise an empty builder
    pub fn new() -> Self {
        Self {
            number_of_steps: 0,
            step: (),
            integration_rule: (),
            marker: std::marker::PhantomData,
        }
    }
}

impl<T> Default for EnergySpaceBuilder<T, (), ()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, Step, IntegrationMethod> EnergySpaceBuilder<T, Step, IntegrationMethod> {
    /// Attach the quadrature rule used to integrate over the grid
    pub fn with_integration_rule<Rule>(
        self,
        integration_rule: Rule,
    ) -> EnergySpaceBuilder<T, Step, Rule> {
        EnergySpaceBuilder {
            number_of_steps: self.number_of_steps,
            step: self.step,
            integration_rule,
            marker: std::marker::PhantomData,
        }
    }

    /// Set the number of steps `N` spanned by the grid, which then holds `N + 1` points
    pub fn with_number_of_steps(self, number_of_steps: usize) -> Self {
        EnergySpaceBuilder {
            number_of_steps,
            step: self.step,
            integration_rule: self.integration_rule,
            marker: std::marker::PhantomData,
        }
    }

    /// Set the spacing `dω` between neighbouring points
    pub fn with_step(self, step: T) -> EnergySpaceBuilder<T, T, IntegrationMethod> {
        EnergySpaceBuilder {
            number_of_steps: self.number_of_steps,
            step,
            integration_rule: self.integration_rule,
            marker: std::marker::PhantomData,
        }
    }
}

#[derive(Clone, Debug)]
/// A uniform energy grid symmetric about zero
pub struct EnergySpace<T: Copy + RealField> {
    number_of_steps: usize,
    step: T,
    weights: Vec<T>,
    integration_rule: IntegrationRule,
}

impl<T, Rule> EnergySpaceBuilder<T, T, Rule>
where
    T: Copy + RealField,
    Rule: GenerateWeights<T>,
{
    /// Validate the grid and generate its integration weights
    pub fn build(self) -> Result<EnergySpace<T>, ParameterError> {
        if self.number_of_steps == 0 || self.number_of_steps % 2 != 0 {
            return Err(ParameterError::OddGrid(self.number_of_steps));
        }
        if !self.step.is_finite() {
            return Err(ParameterError::NonFinite {
                name: "energy_step",
                value: self.step.to_string(),
            });
        }
        if self.step <= T::zero() {
            return Err(ParameterError::NonPositive {
                name: "energy_step",
                value: self.step.to_string(),
            });
        }
        let weights = self
            .integration_rule
            .generate_weights(self.number_of_steps + 1)
            .into_iter()
            .map(|weight| weight * self.step)
            .collect();
        Ok(EnergySpace {
            number_of_steps: self.number_of_steps,
            step: self.step,
            weights,
            integration_rule: self.integration_rule.query_integration_rule(),
        })
    }
}

impl<T: Copy + RealField> EnergySpace<T> {
    /// The number of points in the grid, `N + 1`
    pub fn num_points(&self) -> usize {
        self.number_of_steps + 1
    }

    /// The grid spacing `dω`
    pub fn step(&self) -> T {
        self.step
    }

    /// The quadrature rule used by `integrate`
    pub fn integration_rule(&self) -> IntegrationRule {
        self.integration_rule
    }

    /// The energy at point `index`, evaluated from the index so no rounding error accumulates along the grid
    pub fn energy_at(&self, index: usize) -> T {
        let offset = index as f64 - (self.number_of_steps / 2) as f64;
        nalgebra::convert::<f64, T>(offset) * self.step
    }

    /// The lowest energy in the grid
    pub fn minimum_energy(&self) -> T {
        self.energy_at(0)
    }

    /// The highest energy in the grid
    pub fn maximum_energy(&self) -> T {
        self.energy_at(self.number_of_steps)
    }

    /// Iterate over the energies in ascending order
    pub fn points(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.num_points()).map(|index| self.energy_at(index))
    }

    /// Iterate over the quadrature weights, which include the grid spacing
    pub fn weights(&self) -> impl Iterator<Item = &T> {
        self.weights.iter()
    }

    /// Integrate a function sampled on the grid
    pub fn integrate(&self, integrand: &[T]) -> T {
        assert_eq!(
            integrand.len(),
            self.num_points(),
            "We can only integrate if the integrand is evaluated on-grid"
        );
        integrand
            .iter()
            .zip(self.weights())
            .fold(T::zero(), |sum, (&point, &weight)| sum + point * weight)
    }
}

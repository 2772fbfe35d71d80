use crate::{
    error::{ParameterError, TransportError},
    hamiltonian::DotLevel,
    parameters::{RunParameters, RunParametersBuilder},
    spectral::IntegrationRule,
};
use config::{Config, Environment, File, FileFormat};
use nalgebra::RealField;
use serde::{de::DeserializeOwned, Deserialize};
use std::{env, path::Path};

const DEFAULT_CONFIGURATION: &str = include_str!("../../.config/default.toml");

#[derive(Debug, Deserialize)]
/// The layered configuration of a run
pub struct Configuration<T> {
    /// The model Hamiltonian and the leads
    pub physics: PhysicsConfiguration<T>,
    /// The energy grid
    pub grid: GridConfiguration<T>,
    /// The phonon mode
    pub phonon: PhononConfiguration<T>,
    /// Numerical settings
    pub numerics: NumericsConfiguration<T>,
}

#[derive(Debug, Deserialize)]
#[allow(missing_docs)]
pub struct PhysicsConfiguration<T> {
    pub flux_phase: T,
    pub temperature: T,
    pub majorana_energy: T,
    pub lambda1: T,
    pub lambda2: T,
    pub gamma_left: T,
    pub gamma_right: T,
    pub chemical_potential: T,
    pub dot_level: DotLevel<T>,
}

#[derive(Debug, Deserialize)]
#[allow(missing_docs)]
pub struct GridConfiguration<T> {
    /// The number of steps `Nw`, the grid holds `Nw + 1` points
    pub number_of_steps: usize,
    pub step: T,
    pub integration_rule: IntegrationRule,
}

#[derive(Debug, Deserialize)]
#[allow(missing_docs)]
pub struct PhononConfiguration<T> {
    pub energy: T,
    pub coupling: T,
    /// Signed so that a negative order reaches validation rather than wrapping
    pub truncation_order: i64,
}

#[derive(Debug, Deserialize)]
#[allow(missing_docs)]
pub struct NumericsConfiguration<T> {
    pub broadening: T,
    /// Worker threads for the sweep, zero selects the rayon default
    pub threads: usize,
}

impl<T: DeserializeOwned> Configuration<T> {
    /// Read the configuration
    ///
    /// Sources are layered, later sources overriding earlier ones: the compiled in defaults, the optional
    /// `.config/{RUN_MODE}` file, an optional user supplied file and finally environment variables of the form
    /// `MAJORANA__PHYSICS__FLUX_PHASE`.
    pub fn build(user_file: Option<&Path>) -> Result<Self, TransportError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIGURATION, FileFormat::Toml))
            .add_source(File::with_name(&format!(".config/{}", run_mode)).required(false));
        if let Some(path) = user_file {
            builder = builder.add_source(File::from(path));
        }
        let s = builder
            .add_source(Environment::with_prefix("MAJORANA").separator("__"))
            .build()?;

        Ok(s.try_deserialize()?)
    }
}

impl<T: Copy + RealField> Configuration<T> {
    /// Validate the configuration into the parameters of a run
    pub fn to_parameters(&self) -> Result<RunParameters<T>, ParameterError> {
        let truncation_order = usize::try_from(self.phonon.truncation_order).map_err(|_| {
            ParameterError::Negative {
                name: "truncation_order",
                value: self.phonon.truncation_order.to_string(),
            }
        })?;
        RunParametersBuilder::new()
            .with_flux_phase(self.physics.flux_phase)
            .with_temperature(self.physics.temperature)
            .with_majorana_energy(self.physics.majorana_energy)
            .with_majorana_couplings(self.physics.lambda1, self.physics.lambda2)
            .with_lead_couplings(self.physics.gamma_left, self.physics.gamma_right)
            .with_chemical_potential(self.physics.chemical_potential)
            .with_dot_level(self.physics.dot_level)
            .with_phonon_energy(self.phonon.energy)
            .with_phonon_coupling(self.phonon.coupling)
            .with_phonon_truncation_order(truncation_order)
            .with_broadening(self.numerics.broadening)
            .with_energy_grid(self.grid.number_of_steps, self.grid.step)
            .build()
    }
}

#[cfg(test)]
mod test {
    use super::{Configuration, DEFAULT_CONFIGURATION};
    use crate::error::ParameterError;
    use crate::hamiltonian::DotLevel;
    use crate::parameters::RunParametersBuilder;
    use crate::spectral::IntegrationRule;
    use config::{Config, File, FileFormat};

    fn from_toml(overrides: &str) -> Configuration<f64> {
        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIGURATION, FileFormat::Toml))
            .add_source(File::from_str(overrides, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn defaults_match_the_reference_parameters() {
        let configuration = from_toml("");
        assert_eq!(configuration.grid.integration_rule, IntegrationRule::Trapezium);
        assert_eq!(configuration.numerics.threads, 0);
        assert_eq!(
            configuration.to_parameters().unwrap(),
            RunParametersBuilder::<f64>::new().build().unwrap()
        );
    }

    #[test]
    fn later_sources_override_the_defaults() {
        let configuration = from_toml(
            r#"
            [physics]
            flux_phase = 0.5
            dot_level = { fixed = 0.25 }

            [grid]
            number_of_steps = 100
            integration_rule = "Romberg"
            "#,
        );
        assert_eq!(configuration.physics.flux_phase, 0.5);
        assert_eq!(configuration.physics.lambda1, 1.);
        assert_eq!(configuration.physics.dot_level, DotLevel::Fixed(0.25));
        assert_eq!(configuration.grid.number_of_steps, 100);
        assert_eq!(configuration.grid.integration_rule, IntegrationRule::Romberg);
    }

    #[test]
    fn negative_truncation_order_is_rejected() {
        let configuration = from_toml("[phonon]\ntruncation_order = -1");
        assert!(matches!(
            configuration.to_parameters(),
            Err(ParameterError::Negative {
                name: "truncation_order",
                ..
            })
        ));
    }
}

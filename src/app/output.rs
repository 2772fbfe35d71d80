//! Writing results
//!
//! The sweep is written as five flat tables, each with a single header line followed by whitespace separated
//! columns in scientific notation, and a run summary `results.txt`.
//!
//! Only the total conductance is written. The model has no particle-hole (Nambu) structure, so the conductance
//! cannot be decomposed into electron tunnelling and local Andreev reflection parts.

use super::styles::Styles;
use crate::{
    error::OutputError,
    hamiltonian::{DotLevel, HamiltonianInfoDesk},
    parameters::RunParameters,
    postprocessor::{ObservableSample, ResultSink},
    self_energy::SelfEnergyInfoDesk,
    spectral::EnergySpace,
    statistics::PhononCoefficientSeries,
    sweep::SweepResult,
};
use chrono::{DateTime, Local};
use nalgebra::RealField;
use owo_colors::OwoColorize;
use std::{
    fmt::{self, LowerExp},
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

struct Table {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl Table {
    fn create(directory: &Path, name: &str, header: &str) -> Result<Self, OutputError> {
        let path = directory.join(name);
        let file = File::create(&path).map_err(|source| OutputError::Io {
            path: path.clone(),
            source,
        })?;
        let mut table = Self {
            path,
            writer: BufWriter::new(file),
        };
        table.write_row(format_args!("{}", header))?;
        Ok(table)
    }

    fn write_row(&mut self, row: fmt::Arguments<'_>) -> Result<(), OutputError> {
        writeln!(self.writer, "{}", row).map_err(|source| OutputError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn flush(&mut self) -> Result<(), OutputError> {
        self.writer.flush().map_err(|source| OutputError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!("Wrote {}", self.path.display());
        Ok(())
    }
}

/// A `ResultSink` writing the density of states, current, conductance, `|G_11|^2` and phonon weight tables
pub struct TableSink {
    density_of_states: Table,
    current: Table,
    conductance: Table,
    g_tilde: Table,
    phonons: Table,
}

impl TableSink {
    /// Create, or truncate, the five tables in `directory`
    pub fn create(directory: &Path) -> Result<Self, OutputError> {
        Ok(Self {
            density_of_states: Table::create(directory, "DOS_data_origin.txt", "omega DOS")?,
            current: Table::create(directory, "Current_data_origin.txt", "omega Current")?,
            conductance: Table::create(
                directory,
                "Conductance_data_origin.txt",
                "omega Conductance",
            )?,
            g_tilde: Table::create(directory, "G_tilde_values.txt", "omega G_tilde")?,
            phonons: Table::create(directory, "Ln_data_origin.txt", "omega n L_n")?,
        })
    }
}

impl<T: Copy + LowerExp> ResultSink<T> for TableSink {
    type Error = OutputError;

    fn accept(
        &mut self,
        sample: &ObservableSample<T>,
        phonons: &PhononCoefficientSeries<T>,
    ) -> Result<(), Self::Error> {
        let energy = sample.energy;
        self.density_of_states
            .write_row(format_args!("{:.10e} {:.10e}", energy, sample.density_of_states))?;
        self.current
            .write_row(format_args!("{:.10e} {:.10e}", energy, sample.current))?;
        self.conductance
            .write_row(format_args!("{:.10e} {:.10e}", energy, sample.conductance))?;
        self.g_tilde
            .write_row(format_args!("{:.10e} {:.10e}", energy, sample.g_tilde))?;
        for (n, weight) in phonons.as_slice().iter().enumerate() {
            self.phonons
                .write_row(format_args!("{:.10e} {} {:.10e}", energy, n, weight))?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        self.density_of_states.flush()?;
        self.current.flush()?;
        self.conductance.flush()?;
        self.g_tilde.flush()?;
        self.phonons.flush()
    }
}

/// A summary of a completed run, echoing its configuration and the integrated observables
pub struct RunSummary<'a, T: Copy + RealField> {
    timestamp: DateTime<Local>,
    parameters: &'a RunParameters<T>,
    energy_space: &'a EnergySpace<T>,
    result: &'a SweepResult<T>,
}

impl<'a, T: Copy + RealField> RunSummary<'a, T> {
    /// Summarise `result`, stamped with the current local time
    pub fn new(
        parameters: &'a RunParameters<T>,
        energy_space: &'a EnergySpace<T>,
        result: &'a SweepResult<T>,
    ) -> Self {
        Self {
            timestamp: Local::now(),
            parameters,
            energy_space,
            result,
        }
    }

    fn entries(&self) -> Vec<(&'static str, String)> {
        let p = self.parameters;
        let [lambda1, lambda2] = p.majorana_couplings();
        let integrated = &self.result.integrated;
        vec![
            ("timestamp", self.timestamp.to_rfc3339()),
            ("phi", p.flux_phase().to_string()),
            ("temperature", p.temperature().to_string()),
            ("majorana_energy", p.majorana_energy().to_string()),
            ("lambda1", lambda1.to_string()),
            ("lambda2", lambda2.to_string()),
            ("gamma_left", p.left_lead_coupling().to_string()),
            ("gamma_right", p.right_lead_coupling().to_string()),
            ("chemical_potential", p.chemical_potential().to_string()),
            (
                "dot_level",
                match p.dot_level() {
                    DotLevel::Resonant => "resonant".to_string(),
                    DotLevel::Fixed(level) => format!("fixed({})", level),
                },
            ),
            ("phonon_energy", p.phonon_energy().to_string()),
            ("phonon_coupling", p.phonon_coupling().to_string()),
            (
                "phonon_truncation_order",
                p.phonon_truncation_order().to_string(),
            ),
            ("broadening", p.broadening().to_string()),
            (
                "inverse_temperature",
                p.inverse_temperature()
                    .map_or_else(|| "inf".to_string(), |beta| beta.to_string()),
            ),
            (
                "thermal_phonon_occupation",
                p.thermal_phonon_occupation().to_string(),
            ),
            ("energy_min", self.energy_space.minimum_energy().to_string()),
            ("energy_max", self.energy_space.maximum_energy().to_string()),
            ("energy_step", self.energy_space.step().to_string()),
            ("energy_points", self.energy_space.num_points().to_string()),
            (
                "integration_rule",
                format!("{:?}", self.energy_space.integration_rule()),
            ),
            ("integrated_dos", integrated.density_of_states.to_string()),
            ("integrated_transmission", integrated.transmission.to_string()),
            ("integrated_conductance", integrated.conductance.to_string()),
            ("integrated_current", integrated.current.to_string()),
            ("minimum_a11", integrated.minimum_spectral_dot.to_string()),
            ("minimum_a22", integrated.minimum_spectral_majorana.to_string()),
            (
                "captured_phonon_weight",
                self.result.phonons.captured_weight().to_string(),
            ),
            (
                "degenerate_samples",
                self.result.degenerate_samples.to_string(),
            ),
        ]
    }

    /// Write the summary to `results.txt` in `directory`
    pub fn write(&self, directory: &Path) -> Result<PathBuf, OutputError> {
        let path = directory.join("results.txt");
        std::fs::write(&path, self.to_string()).map_err(|source| OutputError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!("Wrote {}", path.display());
        Ok(path)
    }

    pub(crate) fn colorized(&self, styles: &Styles) -> String {
        let mut out = format!(
            "{}\n",
            "Dot-Majorana transport summary".style(styles.title_style)
        );
        for (key, value) in self.entries() {
            out.push_str(&format!(
                "  {:<28} {}\n",
                key.style(styles.key_style),
                value.style(styles.value_style)
            ));
        }
        if self.result.degenerate_samples > 0 {
            out.push_str(&format!(
                "{}\n",
                "Some samples had a singular inverse Green's function".style(styles.warning_style)
            ));
        }
        out
    }
}

impl<'a, T: Copy + RealField> fmt::Display for RunSummary<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Dot-Majorana transport summary")?;
        for (key, value) in self.entries() {
            writeln!(f, "{:<28} {}", key, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{RunSummary, TableSink};
    use crate::parameters::RunParametersBuilder;
    use crate::spectral::IntegrationRule;
    use crate::sweep::SweepBuilder;

    fn scratch_directory(name: &str) -> std::path::PathBuf {
        let directory = std::env::temp_dir().join(format!(
            "transporter-majorana-{}-{}",
            name,
            std::process::id()
        ));
        std::fs::create_dir_all(&directory).unwrap();
        directory
    }

    #[test]
    fn tables_have_one_header_and_one_row_per_sample() {
        let directory = scratch_directory("tables");
        let parameters = RunParametersBuilder::<f64>::new()
            .with_energy_grid(10, 1e-2)
            .with_phonon_truncation_order(3)
            .build()
            .unwrap();
        let energy_space = parameters.energy_space(IntegrationRule::Trapezium).unwrap();
        let result = SweepBuilder::new()
            .with_parameters(&parameters)
            .with_energy_space(&energy_space)
            .build()
            .run();
        let mut sink = TableSink::create(&directory).unwrap();
        result.emit(&mut sink).unwrap();
        drop(sink);

        for name in [
            "DOS_data_origin.txt",
            "Current_data_origin.txt",
            "Conductance_data_origin.txt",
            "G_tilde_values.txt",
        ] {
            let contents = std::fs::read_to_string(directory.join(name)).unwrap();
            let lines = contents.lines().collect::<Vec<_>>();
            assert_eq!(lines.len(), 12, "{name}");
            for (line, sample) in lines[1..].iter().zip(result.samples.iter()) {
                let columns = line
                    .split_whitespace()
                    .map(|column| column.parse::<f64>().unwrap())
                    .collect::<Vec<_>>();
                assert_eq!(columns.len(), 2);
                assert!((columns[0] - sample.energy).abs() < 1e-12);
            }
        }

        let contents = std::fs::read_to_string(directory.join("Ln_data_origin.txt")).unwrap();
        let rows = contents.lines().skip(1).collect::<Vec<_>>();
        assert_eq!(rows.len(), 11 * 4);
        let first = rows[0].split_whitespace().collect::<Vec<_>>();
        assert_eq!(first[1], "0");
        assert_eq!(first[2].parse::<f64>().unwrap(), 1.);

        let mut written = std::fs::read_dir(&directory)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect::<Vec<_>>();
        written.sort();
        assert_eq!(
            written,
            [
                "Conductance_data_origin.txt",
                "Current_data_origin.txt",
                "DOS_data_origin.txt",
                "G_tilde_values.txt",
                "Ln_data_origin.txt",
            ]
        );

        std::fs::remove_dir_all(&directory).unwrap();
    }

    #[test]
    fn summary_echoes_the_parameters() {
        let directory = scratch_directory("summary");
        let parameters = RunParametersBuilder::<f64>::new()
            .with_energy_grid(10, 1e-2)
            .with_flux_phase(0.5)
            .build()
            .unwrap();
        let energy_space = parameters.energy_space(IntegrationRule::Trapezium).unwrap();
        let result = SweepBuilder::new()
            .with_parameters(&parameters)
            .with_energy_space(&energy_space)
            .build()
            .run();
        let path = RunSummary::new(&parameters, &energy_space, &result)
            .write(&directory)
            .unwrap();
        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.starts_with('#'));
        let phi = contents
            .lines()
            .find(|line| line.starts_with("phi "))
            .unwrap();
        assert_eq!(phi.split_whitespace().nth(1), Some("0.5"));
        assert!(contents.contains("energy_points"));
        assert!(contents.contains("integrated_dos"));

        std::fs::remove_dir_all(&directory).unwrap();
    }
}

// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Error
//! The error types for the library and the binary

use miette::Diagnostic;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug, Diagnostic)]
/// Top level error for a transport calculation
pub enum TransportError {
    /// The run parameters could not be validated
    #[error(transparent)]
    #[diagnostic(code(transporter::parameters))]
    Parameter(#[from] ParameterError),
    /// A result table could not be written
    #[error(transparent)]
    #[diagnostic(code(transporter::output))]
    Output(#[from] OutputError),
    /// The layered configuration could not be read or deserialized
    #[error("Failed to read the configuration: {0}")]
    #[diagnostic(code(transporter::config))]
    Config(#[from] config::ConfigError),
    /// A bare IO failure
    #[error(transparent)]
    #[diagnostic(code(transporter::io_error))]
    Io(#[from] std::io::Error),
    /// The worker pool for the energy sweep could not be started
    #[error("Failed to build the sweep thread pool: {0}")]
    #[diagnostic(code(transporter::thread_pool))]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

#[derive(thiserror::Error, Debug, Diagnostic, PartialEq)]
/// Error for the construction of `RunParameters` and the energy grid
pub enum ParameterError {
    /// A parameter was NaN or infinite
    #[error("parameter `{name}` must be finite, found {value}")]
    NonFinite {
        /// The parameter name
        name: &'static str,
        /// The offending value
        value: String,
    },
    /// A parameter which must be non-negative was negative
    #[error("parameter `{name}` must be non-negative, found {value}")]
    Negative {
        /// The parameter name
        name: &'static str,
        /// The offending value
        value: String,
    },
    /// A parameter which must be strictly positive was not
    #[error("parameter `{name}` must be strictly positive, found {value}")]
    NonPositive {
        /// The parameter name
        name: &'static str,
        /// The offending value
        value: String,
    },
    /// The energy grid needs an even number of steps so it is symmetric about zero
    #[error("the number of energy steps must be even and non-zero, found {0}")]
    #[diagnostic(help("the grid holds `number_of_steps + 1` points from `-number_of_steps / 2 * step` upward"))]
    OddGrid(usize),
}

#[derive(thiserror::Error, Debug, Diagnostic)]
/// Error for writing result tables
pub enum OutputError {
    /// Failure creating or writing a file
    #[error("IO Failure writing {path}: {source}")]
    Io {
        /// The path being written
        path: PathBuf,
        /// The underlying failure
        #[source]
        source: std::io::Error,
    },
}

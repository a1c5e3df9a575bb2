// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::path::PathBuf;

use crate::helpers::telemetry::setup_simple_tracing;
use crate::{demo, info, mul};
use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use pqdevkit_config::{load_config, RingPreset};
use tracing::{debug, instrument, Level};

#[derive(Parser, Debug)]
#[command(name = "pqdevkit")]
#[command(about = "Polynomial ring, vector and matrix arithmetic for lattice-based cryptography", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Ring preset (toy4, default128, dilithium256, kyber256). Overrides the configured
    /// degree and modulus
    #[arg(long, global = true)]
    preset: Option<RingPreset>,

    #[command(subcommand)]
    command: Commands,

    /// Indicate error levels by adding additional `-v` arguments. Eg. `pqdevkit -vvv` will give you
    /// trace level output
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true
    )]
    pub verbose: u8,

    /// Silence all output. This argument cannot be used alongside `-v`
    #[arg(
        short,
        long,
        action = ArgAction::SetTrue,
        conflicts_with = "verbose",
        global = true
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the configured ring
    Info,

    /// Run the degree 4 worked example and random identity-matrix checks
    Demo {
        /// Number of random matrices checked against the identity
        #[arg(long, default_value_t = 100)]
        trials: usize,
    },

    /// Multiply two ring elements given as comma separated coefficients, lowest degree first
    Mul {
        /// Left operand, eg. `1,0,0,1`
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        a: Vec<i64>,

        /// Right operand, eg. `2,0,1,2`
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        b: Vec<i64>,
    },
}

impl Cli {
    pub fn log_level(&self) -> Level {
        if self.quiet {
            Level::ERROR
        } else {
            match self.verbose {
                0 => Level::WARN,  //
                1 => Level::INFO,  // -v
                2 => Level::DEBUG, // -vv
                _ => Level::TRACE, // -vvv
            }
        }
    }

    #[instrument(skip_all)]
    pub fn execute(self) -> Result<()> {
        setup_simple_tracing(self.log_level());

        let mut config = load_config(self.config.as_deref())?;
        if let Some(preset) = self.preset {
            config.preset = Some(preset);
        }
        debug!("Using configuration: {:?}", config);

        match self.command {
            Commands::Info => info::execute(&config)?,
            Commands::Demo { trials } => demo::execute(&config, trials)?,
            Commands::Mul { a, b } => mul::execute(&config, &a, &b)?,
        }

        Ok(())
    }
}

// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::constants::files::{DEFAULT_CONFIG_NAME, ENV_PREFIX};
use crate::load_config::{default_config_dir, find_in_parent, resolve_config_path};
use crate::presets::RingPreset;
use anyhow::{bail, Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use pqdevkit_ring::{RingContext, RingResult};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::{env, sync::Arc};
use tracing::{debug, info};

/// Which modulus polynomial the ring is built over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModulusKind {
    /// x^N + 1
    #[default]
    Cyclotomic,
    /// A random monic polynomial of degree N, irreducible over Z_q
    RandomIrreducible,
}

/// Ring parameters as read from defaults, the config file and the environment.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct RingConfig {
    /// Named parameter set; when present it supplies degree and coeff_modulus
    pub preset: Option<RingPreset>,
    /// Ring degree N
    pub degree: usize,
    /// Prime coefficient modulus q
    pub coeff_modulus: u64,
    /// Modulus polynomial kind
    pub modulus: ModulusKind,
    /// Seed for every random choice (irreducible search, demo sampling)
    pub seed: Option<u64>,
}

impl Default for RingConfig {
    fn default() -> Self {
        let metadata = RingPreset::default().metadata();
        Self {
            preset: None,
            degree: metadata.degree,
            coeff_modulus: metadata.coeff_modulus,
            modulus: ModulusKind::default(),
            seed: None,
        }
    }
}

impl RingConfig {
    /// Effective (degree, coeff_modulus), taking the preset into account.
    pub fn parameters(&self) -> (usize, u64) {
        match self.preset {
            Some(preset) => {
                let metadata = preset.metadata();
                (metadata.degree, metadata.coeff_modulus)
            }
            None => (self.degree, self.coeff_modulus),
        }
    }

    /// Random generator seeded from `seed`, or from system entropy when unset.
    pub fn rng(&self) -> ChaCha20Rng {
        match self.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        }
    }

    /// Builds the configured ring.
    pub fn build_context(&self) -> RingResult<Arc<RingContext>> {
        let (degree, coeff_modulus) = self.parameters();
        match self.modulus {
            ModulusKind::Cyclotomic => RingContext::new(degree, coeff_modulus),
            ModulusKind::RandomIrreducible => {
                RingContext::with_random_irreducible(degree, coeff_modulus, &mut self.rng())
            }
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Could not serialize ring configuration")
    }
}

/// Loads the ring configuration.
///
/// Layers, lowest priority first: built-in defaults, the YAML config file (see
/// [`resolve_config_path`]), then `PQDEVKIT_*` environment variables.
pub fn load_config(cli_file: Option<&Path>) -> Result<RingConfig> {
    let cwd = env::current_dir().context("Could not read the current directory")?;
    let path = resolve_config_path(
        find_in_parent,
        &cwd,
        &default_config_dir(),
        DEFAULT_CONFIG_NAME,
        cli_file,
    );
    load_config_from(&path, cli_file.is_some())
}

/// Loads the ring configuration from a known path.
///
/// A missing file is an error only when `required` is set.
pub fn load_config_from(path: &Path, required: bool) -> Result<RingConfig> {
    if required && !path.exists() {
        bail!("Configuration file not found: {}", path.display());
    }
    if path.exists() {
        info!("Config loaded from: {:?}", path);
    } else {
        debug!("No config file at {:?}, using defaults", path);
    }

    let config: RingConfig = Figment::from(Serialized::defaults(RingConfig::default()))
        .merge(Yaml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).only(&[
            "preset",
            "degree",
            "coeff_modulus",
            "modulus",
            "seed",
        ]))
        .extract()
        .with_context(|| format!("Could not parse configuration {}", path.display()))?;

    debug!(
        degree = config.parameters().0,
        modulus = config.parameters().1,
        "ring configuration resolved"
    );
    Ok(config)
}

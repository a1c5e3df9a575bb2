// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::constants::{default_128, dilithium_256, kyber_256, toy_4};
use pqdevkit_ring::{RingContext, RingResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error as ThisError;

/// Named ring parameter sets for Z_q[x]/(x^N + 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RingPreset {
    /// Degree 4 over Z_17 - DO NOT USE IN PRODUCTION
    ///
    /// Small enough to check products by hand.
    Toy4,
    /// Degree 128 over a 32-bit prime with transform support.
    #[default]
    Default128,
    /// Degree 256 over q = 8380417, the Dilithium ring.
    Dilithium256,
    /// Degree 256 over q = 3329, the Kyber ring. No full negacyclic transform.
    Kyber256,
}

/// Metadata describing a ring preset
#[derive(Debug, Clone, Copy)]
pub struct PresetMetadata {
    /// The canonical name of the preset (e.g., "dilithium256")
    pub name: &'static str,
    /// Ring degree N
    pub degree: usize,
    /// Prime coefficient modulus q
    pub coeff_modulus: u64,
    /// Human readable description
    pub description: &'static str,
}

impl PresetMetadata {
    /// Whether x^N + 1 splits over Z_q, enabling the number-theoretic transform.
    pub fn supports_transform(&self) -> bool {
        self.degree.is_power_of_two() && self.coeff_modulus % (2 * self.degree as u64) == 1
    }
}

#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum PresetError {
    #[error("Unknown ring preset '{0}'")]
    UnknownPreset(String),
}

impl RingPreset {
    pub const ALL: [RingPreset; 4] = [
        RingPreset::Toy4,
        RingPreset::Default128,
        RingPreset::Dilithium256,
        RingPreset::Kyber256,
    ];

    pub fn metadata(&self) -> PresetMetadata {
        match self {
            RingPreset::Toy4 => PresetMetadata {
                name: "toy4",
                degree: toy_4::DEGREE,
                coeff_modulus: toy_4::COEFF_MODULUS,
                description: "Z_17[x]/(x^4 + 1), for worked examples",
            },
            RingPreset::Default128 => PresetMetadata {
                name: "default128",
                degree: default_128::DEGREE,
                coeff_modulus: default_128::COEFF_MODULUS,
                description: "Z_q[x]/(x^128 + 1) with a 32-bit prime q",
            },
            RingPreset::Dilithium256 => PresetMetadata {
                name: "dilithium256",
                degree: dilithium_256::DEGREE,
                coeff_modulus: dilithium_256::COEFF_MODULUS,
                description: "Z_8380417[x]/(x^256 + 1)",
            },
            RingPreset::Kyber256 => PresetMetadata {
                name: "kyber256",
                degree: kyber_256::DEGREE,
                coeff_modulus: kyber_256::COEFF_MODULUS,
                description: "Z_3329[x]/(x^256 + 1)",
            },
        }
    }

    pub fn name(&self) -> &'static str {
        self.metadata().name
    }

    /// Builds the negacyclic ring for this preset.
    pub fn build_context(&self) -> RingResult<Arc<RingContext>> {
        let metadata = self.metadata();
        RingContext::new(metadata.degree, metadata.coeff_modulus)
    }
}

impl FromStr for RingPreset {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        RingPreset::ALL
            .into_iter()
            .find(|preset| preset.name() == wanted)
            .ok_or_else(|| PresetError::UnknownPreset(s.to_string()))
    }
}

impl fmt::Display for RingPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names_round_trip() {
        for preset in RingPreset::ALL {
            assert_eq!(preset.name().parse::<RingPreset>(), Ok(preset));
        }
        assert_eq!("Dilithium256".parse::<RingPreset>(), Ok(RingPreset::Dilithium256));
        assert_eq!(
            "bfv8192".parse::<RingPreset>(),
            Err(PresetError::UnknownPreset("bfv8192".to_string()))
        );
    }

    #[test]
    fn test_serde_names_match_display() {
        for preset in RingPreset::ALL {
            let yaml = serde_yaml::to_string(&preset).unwrap();
            assert_eq!(yaml.trim(), preset.to_string());
        }
    }

    #[test]
    fn test_transform_support() {
        assert!(RingPreset::Toy4.metadata().supports_transform());
        assert!(RingPreset::Default128.metadata().supports_transform());
        assert!(RingPreset::Dilithium256.metadata().supports_transform());
        assert!(!RingPreset::Kyber256.metadata().supports_transform());
    }

    #[test]
    fn test_presets_build_valid_rings() {
        for preset in RingPreset::ALL {
            let ring = preset.build_context().unwrap();
            let metadata = preset.metadata();
            assert_eq!(ring.degree(), metadata.degree);
            assert_eq!(ring.coeff_modulus(), metadata.coeff_modulus);
            assert_eq!(ring.supports_transform(), metadata.supports_transform());
        }
    }
}

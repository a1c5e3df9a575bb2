// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Constants for ring presets
//!
//! All moduli are prime. Rings whose modulus is 1 mod 2N support the
//! number-theoretic transform.

/// Tiny ring for worked examples - DO NOT USE IN PRODUCTION
pub mod toy_4 {
    pub const DEGREE: usize = 4;
    /// 17 = 1 mod 8
    pub const COEFF_MODULUS: u64 = 17;
}

/// Default development ring
pub mod default_128 {
    pub const DEGREE: usize = 128;
    /// 4294954753 = 1 mod 256
    pub const COEFF_MODULUS: u64 = 4294954753;
}

/// Dilithium ring
pub mod dilithium_256 {
    pub const DEGREE: usize = 256;
    /// 2^23 - 2^13 + 1
    pub const COEFF_MODULUS: u64 = 8380417;
}

/// Kyber ring
pub mod kyber_256 {
    pub const DEGREE: usize = 256;
    /// Only 1 mod 256, so products use schoolbook multiplication
    pub const COEFF_MODULUS: u64 = 3329;
}

/// Configuration file lookup
pub mod files {
    pub const DEFAULT_CONFIG_NAME: &str = "pqdevkit.config.yaml";
    pub const CONFIG_DIR_NAME: &str = "pqdevkit";
    pub const ENV_PREFIX: &str = "PQDEVKIT_";
}

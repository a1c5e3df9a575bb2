// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::Result;
use pqdevkit_config::RingConfig;

pub fn execute(config: &RingConfig) -> Result<()> {
    let ring = config.build_context()?;

    println!("Ring:               {}", ring);
    println!("Degree:             {}", ring.degree());
    println!("Coefficient modulus: {}", ring.coeff_modulus());
    println!("Modulus polynomial: {}", ring.modulus_poly());
    println!(
        "Transformed domain: {}",
        if ring.supports_transform() {
            "available"
        } else {
            "unavailable"
        }
    );
    if let Some(preset) = config.preset {
        println!("Preset:             {} ({})", preset, preset.metadata().description);
    }
    println!();
    print!("{}", config.to_yaml()?);
    Ok(())
}

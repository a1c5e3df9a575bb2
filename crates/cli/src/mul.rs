// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::Result;
use pqdevkit_config::RingConfig;
use pqdevkit_ring::RingElement;
use tracing::info;

pub fn execute(config: &RingConfig, a: &[i64], b: &[i64]) -> Result<()> {
    let ring = config.build_context()?;
    let a = RingElement::from_coefficients(&ring, a)?;
    let b = RingElement::from_coefficients(&ring, b)?;
    let product = a.mul(&b)?;
    info!(norm = product.infinity_norm(), "product computed");

    println!("({a}) * ({b}) = {product}  in {ring}");
    println!("{:?}", product.to_centered_coefficients());
    Ok(())
}

// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::{ensure, Result};
use pqdevkit_config::{RingConfig, RingPreset};
use pqdevkit_ring::{RingContext, RingElement, RingMatrix};
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info};

const MATRIX_SIZE: usize = 3;

/// Outcome of the worked example and the identity checks.
#[derive(Debug)]
pub struct DemoReport {
    pub p: RingElement,
    pub q: RingElement,
    pub sum: RingElement,
    pub difference: RingElement,
    pub product: RingElement,
    /// Ring the identity checks ran in
    pub ring: Arc<RingContext>,
    pub identity_trials: usize,
    pub identity_failures: usize,
}

/// Runs p = 1 + x^3 and q = 2 + x^2 + 2x^3 through the toy ring, then multiplies
/// `trials` random matrices of `ring` by the identity.
pub fn run<R: Rng + ?Sized>(
    ring: &Arc<RingContext>,
    trials: usize,
    rng: &mut R,
) -> Result<DemoReport> {
    let toy = RingPreset::Toy4.build_context()?;
    let p = RingElement::from_coefficients(&toy, &[1, 0, 0, 1])?;
    let q = RingElement::from_coefficients(&toy, &[2, 0, 1, 2])?;
    let sum = p.add(&q)?;
    let difference = p.sub(&q)?;
    let product = p.mul(&q)?;

    let identity = RingMatrix::identity(ring, MATRIX_SIZE)?;
    let mut identity_failures = 0;
    for trial in 0..trials {
        let a = RingMatrix::random(ring, MATRIX_SIZE, MATRIX_SIZE, rng)?;
        if identity.mul(&a)? != a || a.mul(&identity)? != a {
            debug!(trial, "identity check failed");
            identity_failures += 1;
        }
    }
    info!(trials, failures = identity_failures, "identity checks done");

    Ok(DemoReport {
        p,
        q,
        sum,
        difference,
        product,
        ring: Arc::clone(ring),
        identity_trials: trials,
        identity_failures,
    })
}

impl DemoReport {
    pub fn identity_summary(&self) -> String {
        format!(
            "I * A = A * I = A for {}/{} random {MATRIX_SIZE}x{MATRIX_SIZE} matrices over {}",
            self.identity_trials - self.identity_failures,
            self.identity_trials,
            self.ring
        )
    }
}

pub fn execute(config: &RingConfig, trials: usize) -> Result<()> {
    let ring = config.build_context()?;
    let report = run(&ring, trials, &mut config.rng())?;

    println!("Ring:       {}", report.p.context());
    println!("p         = {}", report.p);
    println!("q         = {}", report.q);
    println!("p + q     = {}", report.sum);
    println!("p - q     = {}", report.difference);
    println!("p * q     = {}", report.product);
    println!("{}", report.identity_summary());

    ensure!(
        report.identity_failures == 0,
        "{} identity checks failed",
        report.identity_failures
    );
    Ok(())
}

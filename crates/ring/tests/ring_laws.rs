// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Algebraic laws of the ring, checked on random elements of rings with and
//! without a transformed domain.

use pqdevkit_ring::{ModulusPolynomial, RingContext, RingElement, RingVector};
use proptest::prelude::*;
use std::sync::Arc;

const DEGREE: usize = 8;

fn rings() -> Vec<Arc<RingContext>> {
    vec![
        // 8380417 = 1 mod 16: transform available
        RingContext::new(DEGREE, 8380417).unwrap(),
        // 19 = 3 mod 16: schoolbook multiplication
        RingContext::new(DEGREE, 19).unwrap(),
        // x^8 + x^4 + x^3 + x + 1 is irreducible over Z_2
        RingContext::with_modulus_poly(
            2,
            ModulusPolynomial::custom(vec![1, 1, 0, 1, 1, 0, 0, 0, 1]),
        )
        .unwrap(),
    ]
}

fn arb_coefficients() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-1_000_000i64..1_000_000, 0..=DEGREE)
}

fn element(ring: &Arc<RingContext>, coefficients: &[i64]) -> RingElement {
    RingElement::from_coefficients(ring, coefficients).unwrap()
}

proptest! {
    #[test]
    fn addition_is_commutative_and_associative(
        a in arb_coefficients(),
        b in arb_coefficients(),
        c in arb_coefficients(),
    ) {
        for ring in rings() {
            let (a, b, c) = (element(&ring, &a), element(&ring, &b), element(&ring, &c));
            prop_assert_eq!(a.add(&b).unwrap(), b.add(&a).unwrap());
            prop_assert_eq!(
                a.add(&b).unwrap().add(&c).unwrap(),
                a.add(&b.add(&c).unwrap()).unwrap()
            );
        }
    }

    #[test]
    fn multiplication_is_associative_and_distributive(
        a in arb_coefficients(),
        b in arb_coefficients(),
        c in arb_coefficients(),
    ) {
        for ring in rings() {
            let (a, b, c) = (element(&ring, &a), element(&ring, &b), element(&ring, &c));
            prop_assert_eq!(
                a.mul(&b).unwrap().mul(&c).unwrap(),
                a.mul(&b.mul(&c).unwrap()).unwrap()
            );
            prop_assert_eq!(
                a.mul(&b.add(&c).unwrap()).unwrap(),
                a.mul(&b).unwrap().add(&a.mul(&c).unwrap()).unwrap()
            );
            prop_assert_eq!(a.mul(&b).unwrap(), b.mul(&a).unwrap());
        }
    }

    #[test]
    fn negation_and_subtraction_agree(a in arb_coefficients(), b in arb_coefficients()) {
        for ring in rings() {
            let (a, b) = (element(&ring, &a), element(&ring, &b));
            prop_assert_eq!(a.sub(&b).unwrap(), a.add(&b.neg()).unwrap());
            prop_assert!(a.sub(&a).unwrap().is_zero());
        }
    }

    #[test]
    fn coefficients_round_trip(a in arb_coefficients()) {
        for ring in rings() {
            let q = ring.coeff_modulus() as i64;
            let mut expected: Vec<u64> = a.iter().map(|c| c.rem_euclid(q) as u64).collect();
            expected.resize(DEGREE, 0);
            prop_assert_eq!(element(&ring, &a).to_coefficients(), expected);
        }
    }

    #[test]
    fn transformed_domain_is_transparent(a in arb_coefficients(), b in arb_coefficients()) {
        let ring = RingContext::new(DEGREE, 8380417).unwrap();
        let (a, b) = (element(&ring, &a), element(&ring, &b));
        let ta = a.to_transformed().unwrap();
        let tb = b.to_transformed().unwrap();
        prop_assert_eq!(ta.to_coefficients(), a.to_coefficients());
        prop_assert_eq!(ta.mul(&tb).unwrap(), a.mul(&b).unwrap());
        prop_assert_eq!(ta.add(&b).unwrap(), a.add(&b).unwrap());
        prop_assert_eq!(ta.scalar_mul(-3), a.scalar_mul(-3));
        prop_assert_eq!(ta.infinity_norm(), a.infinity_norm());
    }

    #[test]
    fn infinity_norm_is_bounded_by_half_modulus(a in arb_coefficients()) {
        for ring in rings() {
            let q = ring.coeff_modulus();
            prop_assert!(element(&ring, &a).infinity_norm() <= q / 2);
        }
    }

    #[test]
    fn dot_product_is_commutative(
        a in prop::collection::vec(arb_coefficients(), 0..5),
        b in prop::collection::vec(arb_coefficients(), 0..5),
    ) {
        let len = a.len().min(b.len());
        for ring in rings() {
            let va = RingVector::from_coefficients(&ring, &a[..len]).unwrap();
            let vb = RingVector::from_coefficients(&ring, &b[..len]).unwrap();
            prop_assert_eq!(va.dot(&vb).unwrap(), vb.dot(&va).unwrap());
        }
    }
}

//! Tests for score types.

use super::*;

#[test]
fn test_penalties_are_negated() {
    let score = HardSoftScore::from_penalties(2, 30);
    assert_eq!(score.hard(), -2);
    assert_eq!(score.soft(), -30);
    assert_eq!(score.violations(), 2);
    assert_eq!(score.cost(), 30);
}

#[test]
fn test_feasibility() {
    assert!(HardSoftScore::from_penalties(0, 100).is_feasible());
    assert!(!HardSoftScore::from_penalties(1, 0).is_feasible());
}

#[test]
fn test_hard_dominates_soft() {
    let infeasible = HardSoftScore::from_penalties(1, 0);
    let feasible = HardSoftScore::from_penalties(0, 1_000);
    assert!(feasible > infeasible);
    assert!(feasible.to_scalar() > infeasible.to_scalar());
}

#[test]
fn test_arithmetic() {
    let a = HardSoftScore::of(-1, -10);
    let b = HardSoftScore::of(0, -4);
    assert_eq!(a + b, HardSoftScore::of(-1, -14));
    assert_eq!(a - b, HardSoftScore::of(-1, -6));
    assert_eq!(-a, HardSoftScore::of(1, 10));
}

#[test]
fn test_display() {
    assert_eq!(HardSoftScore::of(-2, -15).to_string(), "-2hard/-15soft");
    assert_eq!(format!("{:?}", HardSoftScore::ZERO), "HardSoftScore(0, 0)");
}

#[test]
fn test_scalar_orders_like_score() {
    let a = HardSoftScore::from_penalties(0, 500);
    let b = HardSoftScore::from_penalties(1, 0);
    assert!(a.to_scalar() > b.to_scalar());
    assert!(HardSoftScore::from_penalties(0, 1).to_scalar() < HardSoftScore::ZERO.to_scalar());
}

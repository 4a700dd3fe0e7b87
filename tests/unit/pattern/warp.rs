use super::*;
use crate::catalog::material::Material;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

#[test]
fn add_sheets_is_identity() {
    let c = WarpCoord::new(0.3, 0.7);
    let op = Operation::AddSheets {
        material: Material::O1,
        count: 4,
    };
    assert_eq!(apply(&op, c, 10), c);
}

#[test]
fn twist_amplitude_shrinks_with_layer_count() {
    let c = WarpCoord::new(0.25, 0.0);
    let op = Operation::Twist { turns: 1.0 };
    assert!(close(apply(&op, c, 0).v, 0.5));
    assert!(close(apply(&op, c, 1).v, 0.5));
    assert!(close(apply(&op, c, 10).v, 0.05));
}

#[test]
fn ladder_triangle_peaks_mid_period() {
    let op = Operation::Ladder {
        spacing: 0.2,
        depth: 1.0,
    };
    assert!(close(apply(&op, WarpCoord::new(0.0, 0.5), 4).v, 0.5));
    assert!(close(apply(&op, WarpCoord::new(0.1, 0.5), 4).v, 0.25));
    assert!(close(apply(&op, WarpCoord::new(0.05, 0.5), 4).v, 0.375));
}

#[test]
fn raindrop_pulls_cell_centre_fully() {
    let op = Operation::Raindrops {
        radius: 0.05,
        spacing: 0.2,
    };
    // Cell [0.2, 0.4) x [0.4, 0.6) has centre (0.3, 0.5).
    assert!(close(apply(&op, WarpCoord::new(0.3, 0.5), 4).v, 0.35));
    // Outside the radius nothing moves.
    assert!(close(apply(&op, WarpCoord::new(0.21, 0.41), 4).v, 0.41));
}

#[test]
fn wfolds_reflects_around_sawtooth() {
    let op = Operation::WFolds { folds: 2 };
    // u = 0 → saw = -0.5 → v = |0.1 - 0.25|
    assert!(close(apply(&op, WarpCoord::new(0.0, 0.1), 4).v, 0.15));
    // u = 0.25 → saw = 0 → unchanged
    assert!(close(apply(&op, WarpCoord::new(0.25, 0.1), 4).v, 0.1));
}

#[test]
fn fold_doubles_per_time() {
    let c = WarpCoord::new(0.0, 0.1);
    assert!(close(apply(&Operation::Fold { times: 0 }, c, 4).v, 0.1));
    assert!(close(apply(&Operation::Fold { times: 3 }, c, 4).v, 0.8));
}

#[test]
fn stretch_scales_u_only() {
    let c = apply(
        &Operation::Stretch { factor: 3.0 },
        WarpCoord::new(0.2, 0.4),
        4,
    );
    assert!(close(c.u, 0.6));
    assert!(close(c.v, 0.4));
}

#[test]
fn operations_do_not_commute() {
    let c = WarpCoord::new(0.3, 0.2);
    let a = [
        Operation::Stretch { factor: 2.0 },
        Operation::WFolds { folds: 3 },
    ];
    let b = [
        Operation::WFolds { folds: 3 },
        Operation::Stretch { factor: 2.0 },
    ];
    assert_ne!(apply_all(&a, c, 8), apply_all(&b, c, 8));
}

#[test]
fn wrap_unit_handles_negatives_and_non_finite() {
    assert!(close(wrap_unit(-0.25), 0.75));
    assert!(close(wrap_unit(2.5), 0.5));
    assert_eq!(wrap_unit(-1e-20), 0.0);
    assert_eq!(wrap_unit(f64::INFINITY), 0.0);
    assert_eq!(wrap_unit(f64::NAN), 0.0);
}

#[test]
fn layer_index_stays_in_range() {
    assert_eq!(layer_index(0.0, 5), 0);
    assert_eq!(layer_index(0.999_999_999, 5), 4);
    assert_eq!(layer_index(0.5, 10), 5);
}

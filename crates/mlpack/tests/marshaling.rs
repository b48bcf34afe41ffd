//! Matrix marshaling through a program that leaves its inputs in place.

mod common;

use mlpack::{EnvState, Environment, Flavor, MatrixWithInfo, MlpackError};
use ndarray::{array, Array2};
use proptest::prelude::*;
use rstest::rstest;

use common::{assert_no_leaks, reference};

/// Push `value` as `flavor`, run the no-op program and pull it back.
fn round_trip(value: &Array2<f64>, flavor: Flavor) -> mlpack::Result<Option<Array2<f64>>> {
    let (runtime, bridge) = reference();
    let mut env = Environment::open(&runtime, "noop")?;
    env.push_matrix("slot", value.view(), flavor)?;
    env.invoke()?;
    let pulled = env.pull_matrix("slot", flavor)?;
    env.close()?;
    assert_no_leaks(&bridge);
    Ok(pulled)
}

#[rstest]
#[case::matrix(Flavor::Matrix, array![[1.5, -2.0, 3.0], [4.0, 5.0, 6.25]])]
#[case::umatrix(Flavor::UMatrix, array![[1.0, 0.0], [3.0, 7.0], [2.0, 2.0]])]
#[case::row(Flavor::Row, array![[1.0, 2.0, 3.0, 4.0]])]
#[case::col(Flavor::Col, array![[1.0], [-2.0]])]
#[case::urow(Flavor::URow, array![[0.0, 9.0]])]
#[case::ucol(Flavor::UCol, array![[4.0], [5.0], [6.0]])]
#[case::with_info(Flavor::MatrixWithInfo, array![[1.0, 2.0], [3.0, 4.0]])]
fn every_flavor_round_trips(#[case] flavor: Flavor, #[case] value: Array2<f64>) {
    let pulled = round_trip(&value, flavor).unwrap().unwrap();
    assert_eq!(pulled, value);
}

#[rstest]
#[case::row(Flavor::Row, array![[1.0], [2.0], [3.0]], (1, 3))]
#[case::col(Flavor::Col, array![[1.0, 2.0, 3.0]], (3, 1))]
#[case::urow(Flavor::URow, array![[1.0], [2.0]], (1, 2))]
#[case::ucol(Flavor::UCol, array![[1.0, 2.0]], (2, 1))]
fn vectors_accept_either_orientation(
    #[case] flavor: Flavor,
    #[case] value: Array2<f64>,
    #[case] expected: (usize, usize),
) {
    let pulled = round_trip(&value, flavor).unwrap().unwrap();
    assert_eq!(pulled.dim(), expected);
    assert_eq!(pulled.iter().copied().collect::<Vec<_>>(), value.iter().copied().collect::<Vec<_>>());
}

#[rstest]
#[case::row(Flavor::Row)]
#[case::col(Flavor::Col)]
#[case::urow(Flavor::URow)]
#[case::ucol(Flavor::UCol)]
fn vectors_reject_full_matrices(#[case] flavor: Flavor) {
    let err = round_trip(&array![[1.0, 2.0], [3.0, 4.0]], flavor).unwrap_err();
    assert!(matches!(err, MlpackError::Shape { rows: 2, cols: 2, .. }));
}

#[rstest]
#[case::matrix(Flavor::Matrix)]
#[case::row(Flavor::Row)]
#[case::umatrix(Flavor::UMatrix)]
fn empty_matrices_are_rejected(#[case] flavor: Flavor) {
    let err = round_trip(&Array2::zeros((0, 3)), flavor).unwrap_err();
    assert!(matches!(err, MlpackError::Shape { rows: 0, cols: 3, .. }));
}

#[rstest]
#[case::negative(-1.0)]
#[case::fraction(2.5)]
#[case::nan(f64::NAN)]
#[case::infinite(f64::INFINITY)]
#[case::past_usize(18_446_744_073_709_551_616.0)]
fn unsigned_slots_reject_non_counts(#[case] bad: f64) {
    for flavor in [Flavor::UMatrix, Flavor::URow, Flavor::UCol] {
        let value = if flavor == Flavor::UCol {
            array![[1.0], [bad]]
        } else {
            array![[1.0, bad]]
        };
        let err = round_trip(&value, flavor).unwrap_err();
        match err {
            MlpackError::Domain { name, value } => {
                assert_eq!(name, "slot");
                assert!((value.is_nan() && bad.is_nan()) || value == bad);
            }
            other => panic!("{flavor}: unexpected error {other}"),
        }
    }
}

#[test]
fn rejected_push_leaves_environment_usable() {
    let (runtime, bridge) = reference();
    let mut env = Environment::open(&runtime, "noop").unwrap();
    assert!(env.push_matrix("u", array![[-1.0]].view(), Flavor::URow).is_err());
    assert_eq!(env.state(), EnvState::Fresh);

    env.push_matrix("u", array![[1.0, 2.0]].view(), Flavor::URow).unwrap();
    env.invoke().unwrap();
    let pulled = env.pull_matrix("u", Flavor::URow).unwrap().unwrap();
    assert_eq!(pulled, array![[1.0, 2.0]]);
    drop(env);
    assert_no_leaks(&bridge);
}

#[test]
fn untransposed_push_keeps_native_orientation() {
    let (runtime, _bridge) = reference();
    let x = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
    let mut env = Environment::open(&runtime, "noop").unwrap();
    env.push_matrix_with("m", x.view(), Flavor::Matrix, false).unwrap();
    env.invoke().unwrap();
    let pulled = env.pull_matrix("m", Flavor::Matrix).unwrap().unwrap();
    assert_eq!(pulled, x.t());
}

#[test]
fn categorical_flags_survive_round_trip() {
    let (runtime, _bridge) = reference();
    let value = MatrixWithInfo::new(array![[1.0, 0.0, 2.5], [2.0, 1.0, 3.5]], vec![true, true, false]).unwrap();
    let mut env = Environment::open(&runtime, "noop").unwrap();
    env.push_matrix_with_info("d", &value).unwrap();
    env.invoke().unwrap();
    let pulled = env.pull_matrix_with_info("d").unwrap().unwrap();
    assert_eq!(pulled, value);
}

#[test]
fn categorical_flags_must_match_columns() {
    let err = MatrixWithInfo::new(array![[1.0, 2.0]], vec![true]).unwrap_err();
    assert!(matches!(
        err,
        MlpackError::Shape { flavor: Flavor::MatrixWithInfo, .. }
    ));
}

#[test]
fn missing_output_pulls_as_none() {
    let (runtime, _bridge) = reference();
    let mut env = Environment::open(&runtime, "noop").unwrap();
    env.invoke().unwrap();
    for &flavor in &Flavor::ALL {
        assert_eq!(env.pull_matrix("absent", flavor).unwrap(), None, "{flavor}");
    }
}

#[test]
fn slots_keep_their_first_type() {
    let (runtime, _bridge) = reference();
    let mut env = Environment::open(&runtime, "noop").unwrap();
    env.set_int("k", 1).unwrap();
    let err = env.set_double("k", 1.0).unwrap_err();
    assert!(matches!(err, MlpackError::Bridge { ref program, .. } if program == "noop"));
}

#[test]
fn names_with_nul_bytes_are_rejected() {
    let (runtime, bridge) = reference();
    let mut env = Environment::open(&runtime, "noop").unwrap();
    assert!(matches!(env.set_int("a\0b", 1), Err(MlpackError::InvalidName(_))));
    assert!(matches!(
        Environment::open(&runtime, "no\0op"),
        Err(MlpackError::InvalidName(_))
    ));
    env.close().unwrap();
    assert_no_leaks(&bridge);
}

#[test]
fn reads_before_invoke_are_rejected() {
    let (runtime, _bridge) = reference();
    let mut env = Environment::open(&runtime, "noop").unwrap();
    env.set_int("k", 1).unwrap();
    assert!(matches!(env.get_int("k"), Err(MlpackError::Lifecycle(_))));
    env.invoke().unwrap();
    assert!(matches!(env.set_int("k", 2), Err(MlpackError::Lifecycle(_))));
    assert!(matches!(env.invoke(), Err(MlpackError::Lifecycle(_))));
}

// =============================================================================
// Properties
// =============================================================================

fn host_matrix(max_dim: usize) -> impl Strategy<Value = Array2<f64>> {
    (1..=max_dim, 1..=max_dim).prop_flat_map(|(rows, cols)| {
        proptest::collection::vec(-1e9..1e9f64, rows * cols)
            .prop_map(move |data| Array2::from_shape_vec((rows, cols), data).unwrap())
    })
}

fn count_matrix(max_dim: usize) -> impl Strategy<Value = Array2<f64>> {
    (1..=max_dim, 1..=max_dim).prop_flat_map(|(rows, cols)| {
        proptest::collection::vec(0u32..1_000_000, rows * cols).prop_map(move |data| {
            Array2::from_shape_vec((rows, cols), data.into_iter().map(f64::from).collect()).unwrap()
        })
    })
}

proptest! {
    #[test]
    fn real_matrices_round_trip(x in host_matrix(8)) {
        prop_assert_eq!(round_trip(&x, Flavor::Matrix).unwrap().unwrap(), x);
    }

    #[test]
    fn row_vectors_round_trip(data in proptest::collection::vec(-1e9..1e9f64, 1..32)) {
        let x = Array2::from_shape_vec((1, data.len()), data).unwrap();
        prop_assert_eq!(round_trip(&x, Flavor::Row).unwrap().unwrap(), x);
    }

    #[test]
    fn unsigned_matrices_round_trip(x in count_matrix(8)) {
        prop_assert_eq!(round_trip(&x, Flavor::UMatrix).unwrap().unwrap(), x);
    }

    #[test]
    fn verbosity_is_restored(initial in any::<bool>(), requested in any::<bool>(), fail in any::<bool>()) {
        let (runtime, bridge) = reference();
        bridge.register_program("maybe_fail", move |_| if fail { Err("failed".into()) } else { Ok(()) });
        if initial {
            runtime.bridge().enable_verbose();
        }

        let mut env = Environment::open(&runtime, "maybe_fail").unwrap();
        prop_assert!(!runtime.verbose());
        if requested {
            env.enable_verbose().unwrap();
        }
        prop_assert_eq!(env.invoke().is_err(), fail);
        drop(env);

        prop_assert_eq!(runtime.verbose(), initial);
        prop_assert_eq!(bridge.last_invocation().unwrap().verbose, requested);
        assert_no_leaks(&bridge);
    }
}

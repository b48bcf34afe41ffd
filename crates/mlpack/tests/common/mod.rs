//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use mlpack::testing::{self, ReferenceBridge};
use mlpack::Runtime;
use ndarray::{array, Array2};
use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing_subscriber::EnvFilter;

/// Route binding logs to the test output. Set `RUST_LOG=mlpack=trace` to see
/// every pushed and pulled slot.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A reference runtime with an extra `noop` program for marshaling tests.
pub fn reference() -> (Runtime, Arc<ReferenceBridge>) {
    init_tracing();
    let (runtime, bridge) = testing::reference_runtime();
    bridge.register_program("noop", |_| Ok(()));
    (runtime, bridge)
}

/// The four XOR corners with their labels.
pub fn xor() -> (Array2<f64>, Array2<f64>) {
    let training = array![[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];
    let labels = array![[0.0, 1.0, 1.0, 0.0]];
    (training, labels)
}

/// Two tight groups of three points, far apart.
pub fn two_clusters() -> Array2<f64> {
    array![
        [0.0, 0.0],
        [0.1, 0.2],
        [0.2, 0.1],
        [10.0, 10.0],
        [10.1, 9.9],
        [9.8, 10.2],
    ]
}

/// An `n x d` matrix of uniform values drawn from a fixed seed.
pub fn random_matrix(seed: u64, n: usize, d: usize) -> Array2<f64> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    Array2::from_shape_simple_fn((n, d), || rng.gen_range(-1.0..1.0))
}

/// No environment or timer set is left behind.
pub fn assert_no_leaks(bridge: &ReferenceBridge) {
    assert_eq!(bridge.outstanding_params(), 0, "leaked parameter environments");
    assert_eq!(bridge.outstanding_timers(), 0, "leaked timer sets");
}

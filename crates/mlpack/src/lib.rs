//! Rust bindings for the mlpack machine learning library.
//!
//! Every mlpack program (`pca`, `kmeans`, `random_forest`, ...) is exposed
//! as one function in [`methods`] taking a [`Runtime`], the program's
//! required inputs and an options record:
//!
//! ```
//! use mlpack::methods::{pca, PcaOptions};
//! use mlpack::Runtime;
//! use ndarray::array;
//!
//! let runtime = Runtime::reference();
//! let x = array![[1.0, 2.0, 0.5], [2.0, 4.1, 0.4], [3.0, 6.2, 0.6], [4.0, 7.9, 0.5]];
//! let options = PcaOptions::builder().new_dimensionality(1).build();
//! let reduced = pca(&runtime, &x, &options)?.output.unwrap();
//! assert_eq!(reduced.dim(), (4, 1));
//! # Ok::<(), mlpack::MlpackError>(())
//! ```
//!
//! # Data layout
//!
//! Host matrices are row-major with one observation per row. mlpack stores
//! one observation per column, so matrices are transposed on the way in and
//! out. Row and column vectors keep their orientation. Unsigned slots
//! (`umatrix`, `urow`, `ucol`) only accept whole, non-negative values.
//!
//! # Runtimes
//!
//! The native library is reached through the [`Bridge`] trait. With the
//! `native` feature, [`Runtime::native`] links `libmlpack_capi`. The
//! [`testing`] module provides an in-process bridge with a handful of
//! reference programs.

pub mod bridge;
pub mod env;
pub mod error;
pub mod matrix;
pub mod model;
pub mod runtime;
#[macro_use]
mod schema;
pub mod methods;
pub mod testing;

pub use bridge::Bridge;
pub use env::{EnvState, Environment};
pub use error::{MlpackError, Result};
pub use matrix::{Flavor, MatrixWithInfo, NativeMatrix};
pub use model::*;
pub use runtime::Runtime;

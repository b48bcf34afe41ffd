//! Matrix flavors and the host/native marshaling rules.
//!
//! Host matrices are `ndarray` arrays with one observation per row. The native
//! side stores column-major matrices with one observation per column, so a
//! host `r x c` matrix normally crosses as a native `c x r` matrix. Vector
//! flavors cross without transposition: a row stays `1 x n`, a column stays
//! `n x 1`.
//!
//! Unsigned flavors carry `usize` natively and `f64` on the host. Pushing
//! a value that is not a non-negative integer is a [`MlpackError::Domain`]
//! error; nothing is truncated.

use std::fmt;

use ndarray::{Array2, ArrayView2};

use crate::error::{MlpackError, Result};

// =============================================================================
// Flavors
// =============================================================================

/// The native storage class a host matrix is marshaled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flavor {
    /// Real-valued matrix, transposed on the way in and out.
    Matrix,
    /// Unsigned matrix, transposed on the way in and out.
    UMatrix,
    /// Real-valued row vector.
    Row,
    /// Real-valued column vector.
    Col,
    /// Unsigned row vector. Labels usually travel this way.
    URow,
    /// Unsigned column vector.
    UCol,
    /// Real-valued matrix with a per-feature categorical flag.
    MatrixWithInfo,
}

impl Flavor {
    /// All flavors, in declaration order.
    pub const ALL: [Flavor; 7] = [
        Flavor::Matrix,
        Flavor::UMatrix,
        Flavor::Row,
        Flavor::Col,
        Flavor::URow,
        Flavor::UCol,
        Flavor::MatrixWithInfo,
    ];

    /// Whether elements are stored natively as unsigned integers.
    pub fn is_unsigned(self) -> bool {
        matches!(self, Flavor::UMatrix | Flavor::URow | Flavor::UCol)
    }

    /// Whether the flavor is a one-dimensional vector.
    pub fn is_vector(self) -> bool {
        matches!(
            self,
            Flavor::Row | Flavor::Col | Flavor::URow | Flavor::UCol
        )
    }

    /// Whether the native shape is the transpose of the host shape.
    pub fn transposes(self) -> bool {
        !self.is_vector()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Flavor::Matrix => "matrix",
            Flavor::UMatrix => "umatrix",
            Flavor::Row => "row",
            Flavor::Col => "col",
            Flavor::URow => "urow",
            Flavor::UCol => "ucol",
            Flavor::MatrixWithInfo => "matrix_with_info",
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Native Buffers
// =============================================================================

/// An owned column-major matrix as the native side sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeMatrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> NativeMatrix<T> {
    /// Wrap a column-major buffer. Returns `None` when `data.len()` is not
    /// `rows * cols`.
    pub fn from_col_major(rows: usize, cols: usize, data: Vec<T>) -> Option<Self> {
        (rows.checked_mul(cols)? == data.len()).then_some(Self { rows, cols, data })
    }

    /// The `0 x 0` matrix, which the native side uses for "not produced".
    pub fn empty() -> Self {
        Self {
            rows: 0,
            cols: 0,
            data: Vec::new(),
        }
    }

    /// A `1 x n` row.
    pub fn row(data: Vec<T>) -> Self {
        Self {
            rows: 1,
            cols: data.len(),
            data,
        }
    }

    /// An `n x 1` column.
    pub fn col(data: Vec<T>) -> Self {
        Self {
            rows: data.len(),
            cols: 1,
            data,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Column `j` as a contiguous slice.
    pub fn column(&self, j: usize) -> &[T] {
        &self.data[j * self.rows..(j + 1) * self.rows]
    }
}

impl<T: Copy> NativeMatrix<T> {
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[col * self.rows + row]
    }
}

/// A native real matrix plus one categorical flag per native row.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeMatrixWithInfo {
    pub info: Vec<bool>,
    pub matrix: NativeMatrix<f64>,
}

// =============================================================================
// Host Matrix With Info
// =============================================================================

/// A host matrix whose columns (features) are tagged as categorical or
/// numeric.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixWithInfo {
    data: Array2<f64>,
    categorical: Vec<bool>,
}

impl MatrixWithInfo {
    /// Pair `data` with one flag per column.
    pub fn new(data: Array2<f64>, categorical: Vec<bool>) -> Result<Self> {
        if categorical.len() != data.ncols() {
            return Err(MlpackError::Shape {
                name: "categorical".to_owned(),
                flavor: Flavor::MatrixWithInfo,
                rows: data.nrows(),
                cols: categorical.len(),
            });
        }
        Ok(Self { data, categorical })
    }

    /// All columns numeric.
    pub fn numeric(data: Array2<f64>) -> Self {
        let categorical = vec![false; data.ncols()];
        Self { data, categorical }
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn categorical(&self) -> &[bool] {
        &self.categorical
    }

    pub fn is_categorical(&self, col: usize) -> bool {
        self.categorical.get(col).copied().unwrap_or(false)
    }

    pub fn into_parts(self) -> (Array2<f64>, Vec<bool>) {
        (self.data, self.categorical)
    }
}

// =============================================================================
// Marshaling
// =============================================================================

fn check_shape(name: &str, view: &ArrayView2<'_, f64>, flavor: Flavor) -> Result<()> {
    let (rows, cols) = view.dim();
    let ok = if flavor.is_vector() {
        rows * cols > 0 && (rows == 1 || cols == 1)
    } else {
        rows > 0 && cols > 0
    };
    if ok {
        Ok(())
    } else {
        Err(MlpackError::Shape {
            name: name.to_owned(),
            flavor,
            rows,
            cols,
        })
    }
}

/// Lay out a checked host matrix as a native column-major buffer.
fn to_native_buffer<T: Copy>(
    view: &ArrayView2<'_, T>,
    flavor: Flavor,
    transpose: bool,
) -> NativeMatrix<T> {
    let (rows, cols) = view.dim();
    // Logical iteration order is row-major regardless of the array's strides.
    let row_major = || view.iter().copied().collect::<Vec<T>>();
    match flavor {
        Flavor::Row | Flavor::URow => NativeMatrix::row(row_major()),
        Flavor::Col | Flavor::UCol => NativeMatrix::col(row_major()),
        _ if transpose => NativeMatrix {
            rows: cols,
            cols: rows,
            data: row_major(),
        },
        // Row-major order of the transposed view is the column-major order
        // of `view`.
        _ => NativeMatrix {
            rows,
            cols,
            data: view.t().iter().copied().collect(),
        },
    }
}

/// Convert a host matrix for a real-valued flavor.
pub(crate) fn push_real(
    name: &str,
    view: ArrayView2<'_, f64>,
    flavor: Flavor,
    transpose: bool,
) -> Result<NativeMatrix<f64>> {
    debug_assert!(!flavor.is_unsigned());
    check_shape(name, &view, flavor)?;
    Ok(to_native_buffer(&view, flavor, transpose))
}

/// Convert a host matrix for an unsigned flavor, rejecting any element that
/// is not a non-negative integer.
pub(crate) fn push_unsigned(
    name: &str,
    view: ArrayView2<'_, f64>,
    flavor: Flavor,
    transpose: bool,
) -> Result<NativeMatrix<usize>> {
    debug_assert!(flavor.is_unsigned());
    check_shape(name, &view, flavor)?;
    if let Some(&bad) = view.iter().find(|&&v| to_unsigned(v).is_none()) {
        return Err(MlpackError::Domain {
            name: name.to_owned(),
            value: bad,
        });
    }
    let unsigned = view.mapv(|v| to_unsigned(v).unwrap_or_default());
    Ok(to_native_buffer(&unsigned.view(), flavor, transpose))
}

fn to_unsigned(value: f64) -> Option<usize> {
    let representable = value.is_finite()
        && value >= 0.0
        && value.fract() == 0.0
        // `usize::MAX as f64` rounds up to the first value past the range.
        && value < usize::MAX as f64;
    representable.then_some(value as usize)
}

/// Convert a native real buffer back to host orientation. An empty native
/// matrix means the output was not produced.
pub(crate) fn pull_real(native: NativeMatrix<f64>, flavor: Flavor) -> Option<Array2<f64>> {
    if native.is_empty() {
        return None;
    }
    let (rows, cols) = (native.rows, native.cols);
    let shape = if flavor.transposes() {
        (cols, rows)
    } else {
        (rows, cols)
    };
    // A native c x r column-major buffer is the host r x c row-major buffer;
    // vectors have a single row or column so their buffer order is the same.
    // The buffer length was checked when the native matrix was built.
    Array2::from_shape_vec(shape, native.data).ok()
}

/// Convert a native unsigned buffer back to a host real matrix.
pub(crate) fn pull_unsigned(native: NativeMatrix<usize>, flavor: Flavor) -> Option<Array2<f64>> {
    let NativeMatrix { rows, cols, data } = native;
    let real = NativeMatrix {
        rows,
        cols,
        data: data.into_iter().map(|v| v as f64).collect(),
    };
    pull_real(real, flavor)
}

/// Convert a host matrix-with-info. Flags follow the host columns, which
/// become native rows.
pub(crate) fn push_with_info(name: &str, value: &MatrixWithInfo) -> Result<NativeMatrixWithInfo> {
    let matrix = push_real(name, value.data.view(), Flavor::MatrixWithInfo, true)?;
    Ok(NativeMatrixWithInfo {
        info: value.categorical.clone(),
        matrix,
    })
}

pub(crate) fn pull_with_info(native: NativeMatrixWithInfo) -> Option<MatrixWithInfo> {
    let NativeMatrixWithInfo { mut info, matrix } = native;
    let data = pull_real(matrix, Flavor::MatrixWithInfo)?;
    info.resize(data.ncols(), false);
    Some(MatrixWithInfo {
        data,
        categorical: info,
    })
}

//! Small reference programs for the [`ReferenceBridge`].
//!
//! They follow the native parameter names and data orientation (one
//! observation per column) so the generated entries can be exercised end to
//! end. They are deliberately simple: deterministic initialisation, no
//! randomness, dense linear algebra only.

use ndarray::{s, Array1, Array2, Axis};

use crate::matrix::NativeMatrix;
use crate::model::ModelKind;

use super::reference::{ProgramContext, ProgramResult, ReferenceBridge};

pub(crate) fn register_builtin(bridge: &ReferenceBridge) {
    bridge.register_program("test_binding", test_binding);
    bridge.register_program("perceptron", perceptron);
    bridge.register_program("pca", pca);
    bridge.register_program("kmeans", kmeans);
    bridge.register_program("preprocess_binarize", preprocess_binarize);
}

/// Observations as rows: native `d x n` becomes `n x d`.
fn points(native: &NativeMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn((native.cols(), native.rows()), |(i, j)| native.get(j, i))
}

/// Rows of `points` as native columns.
fn to_native(points: &Array2<f64>) -> NativeMatrix<f64> {
    let (n, d) = points.dim();
    NativeMatrix::from_col_major(d, n, points.iter().copied().collect())
        .unwrap_or_else(NativeMatrix::empty)
}

// =============================================================================
// Test Binding
// =============================================================================

/// Model payload of the test program.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianKernel {
    pub bandwidth: f64,
}

fn doubled<T: Copy + std::ops::Add<Output = T>>(values: &[T]) -> Vec<T> {
    values.iter().map(|&v| v + v).collect()
}

fn test_binding(ctx: &mut ProgramContext<'_>) -> ProgramResult {
    if ctx.bool("flag2", false)? {
        return Err("flag2 must not be specified".into());
    }
    let double_in = ctx.double("double_in", 0.0)?;
    let int_in = ctx.int("int_in", 0)?;
    let string_in = ctx.string("string_in", String::new())?;

    let matrix_out = ctx.matrix("matrix_in")?.map(|m| {
        NativeMatrix::from_col_major(m.rows(), m.cols(), doubled(m.as_slice()))
            .unwrap_or_else(NativeMatrix::empty)
    });
    let umatrix_out = ctx.umatrix("umatrix_in")?.map(|m| {
        NativeMatrix::from_col_major(m.rows(), m.cols(), doubled(m.as_slice()))
            .unwrap_or_else(NativeMatrix::empty)
    });
    let row_out = ctx.row("row_in")?.map(doubled);
    let col_out = ctx.col("col_in")?.map(doubled);
    let urow_out = ctx.urow("urow_in")?.map(doubled);
    let ucol_out = ctx.ucol("ucol_in")?.map(doubled);
    // Numeric dimensions are tripled, categorical ones left alone.
    let info_out = ctx.matrix_with_info("matrix_and_info_in")?.map(|m| {
        let rows = m.matrix.rows();
        let data = m
            .matrix
            .as_slice()
            .iter()
            .enumerate()
            .map(|(i, &v)| if m.info[i % rows] { v } else { v * 3.0 })
            .collect();
        NativeMatrix::from_col_major(rows, m.matrix.cols(), data).unwrap_or_else(NativeMatrix::empty)
    });
    let vector_out = ctx.vec_int("vector_in", Vec::new())?;
    let str_vector_out = ctx.vec_string("str_vector_in", Vec::new())?;
    let model_in = ctx
        .model::<GaussianKernel>("model_in", ModelKind::GaussianKernel)?
        .copied();

    ctx.set_double("double_out", double_in + 1.0)?;
    ctx.set_int("int_out", int_in + 1)?;
    ctx.set_string("string_out", format!("{string_in}2"))?;
    if let Some(m) = matrix_out {
        ctx.set_matrix("matrix_out", m)?;
    }
    if let Some(m) = umatrix_out {
        ctx.set_umatrix("umatrix_out", m)?;
    }
    if let Some(v) = row_out {
        ctx.set_row("row_out", v)?;
    }
    if let Some(v) = col_out {
        ctx.set_col("col_out", v)?;
    }
    if let Some(v) = urow_out {
        ctx.set_urow("urow_out", v)?;
    }
    if let Some(v) = ucol_out {
        ctx.set_ucol("ucol_out", v)?;
    }
    if let Some(m) = info_out {
        ctx.set_matrix("matrix_and_info_out", m)?;
    }
    ctx.set_vec_int("vector_out", vector_out)?;
    ctx.set_vec_string("str_vector_out", str_vector_out)?;

    match model_in {
        Some(kernel) => {
            ctx.set_double("model_bw_out", kernel.bandwidth)?;
            ctx.set_model(
                "model_out",
                ModelKind::GaussianKernel,
                GaussianKernel {
                    bandwidth: kernel.bandwidth * 2.0,
                },
            )?;
        }
        None if ctx.bool("build_model", false)? => {
            ctx.set_model(
                "model_out",
                ModelKind::GaussianKernel,
                GaussianKernel { bandwidth: 10.0 },
            )?;
        }
        None => {}
    }
    Ok(())
}

// =============================================================================
// Perceptron
// =============================================================================

/// Model payload of the perceptron program: one weight row and bias per
/// class.
#[derive(Debug, Clone, PartialEq)]
pub struct PerceptronWeights {
    pub weights: Array2<f64>,
    pub biases: Array1<f64>,
}

impl PerceptronWeights {
    fn zeros(classes: usize, dims: usize) -> Self {
        Self {
            weights: Array2::zeros((classes, dims)),
            biases: Array1::zeros(classes),
        }
    }

    pub fn classify(&self, x: &[f64]) -> usize {
        let scores = self.weights.dot(&Array1::from(x.to_vec())) + &self.biases;
        // First maximum wins, so an untrained model predicts class 0.
        scores
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (i, &s)| if s > best.1 { (i, s) } else { best })
            .0
    }
}

fn perceptron(ctx: &mut ProgramContext<'_>) -> ProgramResult {
    let max_iterations = ctx.int("max_iterations", 1000)?.max(0) as usize;
    let training = ctx.matrix("training")?.cloned();
    let labels = ctx.urow("labels")?.map(<[usize]>::to_vec);
    let test = ctx.matrix("test")?.cloned();
    let mut model = ctx
        .model::<PerceptronWeights>("input_model", ModelKind::Perceptron)?
        .cloned();
    let continues_input = model.is_some();

    if let Some(training) = &training {
        let labels = labels.ok_or("labels must be specified with training data")?;
        if labels.len() != training.cols() {
            return Err(format!(
                "{} labels for {} training points",
                labels.len(),
                training.cols()
            ));
        }
        let dims = training.rows();
        let classes = labels.iter().max().map_or(1, |&m| m + 1);
        let mut weights = model
            .take()
            .unwrap_or_else(|| PerceptronWeights::zeros(classes, dims));
        if weights.weights.ncols() != dims {
            return Err(format!(
                "model has dimensionality {} but training data has {dims}",
                weights.weights.ncols()
            ));
        }
        if weights.weights.nrows() < classes {
            let mut grown = PerceptronWeights::zeros(classes, dims);
            let known = weights.weights.nrows();
            grown.weights.slice_mut(s![..known, ..]).assign(&weights.weights);
            grown.biases.slice_mut(s![..known]).assign(&weights.biases);
            weights = grown;
        }
        for _ in 0..max_iterations {
            let mut converged = true;
            for (j, &label) in labels.iter().enumerate() {
                let x = training.column(j);
                let predicted = weights.classify(x);
                if predicted != label {
                    converged = false;
                    let x = Array1::from(x.to_vec());
                    let mut row = weights.weights.row_mut(label);
                    row += &x;
                    let mut row = weights.weights.row_mut(predicted);
                    row -= &x;
                    weights.biases[label] += 1.0;
                    weights.biases[predicted] -= 1.0;
                }
            }
            if converged {
                break;
            }
        }
        model = Some(weights);
    }

    let model = model.ok_or("either training or input_model must be specified")?;
    if let Some(test) = test {
        if test.rows() != model.weights.ncols() {
            return Err(format!(
                "test data has dimensionality {} but the model expects {}",
                test.rows(),
                model.weights.ncols()
            ));
        }
        let predictions = (0..test.cols()).map(|j| model.classify(test.column(j))).collect();
        ctx.set_urow("predictions", predictions)?;
    }
    if continues_input {
        // The input model is trained in place and handed back as the output.
        ctx.update_model("input_model", ModelKind::Perceptron, model)?;
        ctx.forward_model("input_model", "output_model")
    } else {
        ctx.set_model("output_model", ModelKind::Perceptron, model)
    }
}

// =============================================================================
// PCA
// =============================================================================

/// Eigen-decomposition of a symmetric matrix by cyclic Jacobi rotations.
/// Returns eigenvalues and eigenvectors (as columns), sorted by decreasing
/// eigenvalue.
pub(crate) fn symmetric_eigen(matrix: &Array2<f64>) -> (Array1<f64>, Array2<f64>) {
    let n = matrix.nrows();
    let mut a = matrix.clone();
    let mut v = Array2::<f64>::eye(n);

    for _sweep in 0..64 {
        let off: f64 = (0..n)
            .flat_map(|p| (p + 1..n).map(move |q| (p, q)))
            .map(|(p, q)| a[[p, q]] * a[[p, q]])
            .sum();
        if off < 1e-24 {
            break;
        }
        for p in 0..n {
            for q in p + 1..n {
                let apq = a[[p, q]];
                if apq.abs() < 1e-300 {
                    continue;
                }
                let theta = (a[[q, q]] - a[[p, p]]) / (2.0 * apq);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;
                for k in 0..n {
                    let (akp, akq) = (a[[k, p]], a[[k, q]]);
                    a[[k, p]] = c * akp - s * akq;
                    a[[k, q]] = s * akp + c * akq;
                }
                for k in 0..n {
                    let (apk, aqk) = (a[[p, k]], a[[q, k]]);
                    a[[p, k]] = c * apk - s * aqk;
                    a[[q, k]] = s * apk + c * aqk;
                }
                for k in 0..n {
                    let (vkp, vkq) = (v[[k, p]], v[[k, q]]);
                    v[[k, p]] = c * vkp - s * vkq;
                    v[[k, q]] = s * vkp + c * vkq;
                }
            }
        }
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| a[[j, j]].total_cmp(&a[[i, i]]));
    let values = order.iter().map(|&i| a[[i, i]]).collect();
    let mut vectors = v.select(Axis(1), &order);
    // Fix the sign so the largest component of each vector is positive.
    for mut col in vectors.columns_mut() {
        let pivot = col
            .iter()
            .copied()
            .fold(0.0_f64, |best, x| if x.abs() > best.abs() { x } else { best });
        if pivot < 0.0 {
            col.mapv_inplace(|x| -x);
        }
    }
    (values, vectors)
}

fn pca(ctx: &mut ProgramContext<'_>) -> ProgramResult {
    let input = ctx.matrix("input")?.ok_or("input must be specified")?;
    let mut x = points(input);
    let (n, d) = x.dim();
    if n < 2 {
        return Err("at least two points are required".into());
    }
    let new_dimensionality = ctx.int("new_dimensionality", 0)?;
    let var_to_retain = ctx.double("var_to_retain", 0.0)?;
    if new_dimensionality < 0 || new_dimensionality as usize > d {
        return Err(format!(
            "new dimensionality ({new_dimensionality}) cannot be greater than existing dimensionality ({d})"
        ));
    }
    if !(0.0..=1.0).contains(&var_to_retain) {
        return Err(format!("var_to_retain ({var_to_retain}) must be in [0, 1]"));
    }

    let mean = x.mean_axis(Axis(0)).ok_or("empty input")?;
    x -= &mean;
    if ctx.bool("scale", false)? {
        let std = x.std_axis(Axis(0), 1.0);
        for (mut col, &sd) in x.columns_mut().into_iter().zip(std.iter()) {
            if sd > 0.0 {
                col /= sd;
            }
        }
    }
    let covariance = x.t().dot(&x) / (n - 1) as f64;
    let (values, vectors) = symmetric_eigen(&covariance);

    let keep = if var_to_retain > 0.0 {
        let total: f64 = values.iter().map(|v| v.max(0.0)).sum();
        let mut acc = 0.0;
        values
            .iter()
            .position(|&v| {
                acc += v.max(0.0);
                total <= 0.0 || acc / total >= var_to_retain
            })
            .map_or(d, |i| i + 1)
    } else if new_dimensionality == 0 {
        d
    } else {
        new_dimensionality as usize
    };

    let projected = x.dot(&vectors.slice(s![.., ..keep]));
    ctx.set_matrix("output", to_native(&projected))
}

// =============================================================================
// K-Means
// =============================================================================

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

fn nearest(centroids: &Array2<f64>, point: &[f64]) -> usize {
    centroids
        .rows()
        .into_iter()
        .map(|row| row.iter().zip(point).map(|(a, b)| (a - b) * (a - b)).sum::<f64>())
        .enumerate()
        .fold((0, f64::INFINITY), |best, (c, d)| if d < best.1 { (c, d) } else { best })
        .0
}

fn kmeans(ctx: &mut ProgramContext<'_>) -> ProgramResult {
    let input = ctx.matrix("input")?.ok_or("input must be specified")?;
    let x = points(input);
    let (n, d) = x.dim();
    let clusters = ctx.int("clusters", 0)?;
    if clusters < 1 || clusters as usize > n {
        return Err(format!("invalid number of clusters ({clusters}) for {n} points"));
    }
    let k = clusters as usize;
    let max_iterations = match ctx.int("max_iterations", 1000)? {
        i if i <= 0 => usize::MAX,
        i => i as usize,
    };

    let mut centroids = match ctx.matrix("initial_centroids")? {
        Some(initial) if initial.cols() != k || initial.rows() != d => {
            return Err(format!(
                "initial centroids are {}x{}, expected {d}x{k}",
                initial.rows(),
                initial.cols()
            ))
        }
        Some(initial) => points(initial),
        None => farthest_first(&x, k),
    };

    let rows: Vec<Vec<f64>> = x.rows().into_iter().map(|r| r.to_vec()).collect();
    let mut assignments = vec![0usize; n];
    for iteration in 0..max_iterations {
        let mut changed = iteration == 0;
        for (i, row) in rows.iter().enumerate() {
            let c = nearest(&centroids, row);
            if c != assignments[i] {
                assignments[i] = c;
                changed = true;
            }
        }
        if !changed {
            break;
        }
        let mut sums = Array2::<f64>::zeros((k, d));
        let mut counts = vec![0usize; k];
        for (row, &c) in x.rows().into_iter().zip(&assignments) {
            let mut sum = sums.row_mut(c);
            sum += &row;
            counts[c] += 1;
        }
        for (c, &count) in counts.iter().enumerate() {
            // Empty clusters keep their previous centroid.
            if count > 0 {
                let mean = &sums.row(c) / count as f64;
                centroids.row_mut(c).assign(&mean);
            }
        }
    }

    let labels: Vec<f64> = assignments.iter().map(|&c| c as f64).collect();
    let output = if ctx.bool("labels_only", false)? {
        NativeMatrix::row(labels)
    } else {
        let mut data = Vec::with_capacity(n * (d + 1));
        for (row, label) in rows.iter().zip(&labels) {
            data.extend_from_slice(row);
            data.push(*label);
        }
        NativeMatrix::from_col_major(d + 1, n, data).unwrap_or_else(NativeMatrix::empty)
    };
    ctx.set_matrix("output", output)?;
    ctx.set_matrix("centroid", to_native(&centroids))
}

/// Deterministic seeding: the first point, then repeatedly the point
/// farthest from every chosen centroid.
fn farthest_first(x: &Array2<f64>, k: usize) -> Array2<f64> {
    let rows: Vec<Vec<f64>> = x.rows().into_iter().map(|r| r.to_vec()).collect();
    let mut chosen = vec![0usize];
    while chosen.len() < k {
        let next = (0..rows.len())
            .filter(|i| !chosen.contains(i))
            .map(|i| {
                let gap = chosen
                    .iter()
                    .map(|&c| squared_distance(&rows[i], &rows[c]))
                    .fold(f64::INFINITY, f64::min);
                (i, gap)
            })
            .fold((0, f64::NEG_INFINITY), |best, (i, g)| if g > best.1 { (i, g) } else { best })
            .0;
        chosen.push(next);
    }
    x.select(Axis(0), &chosen)
}

// =============================================================================
// Binarize
// =============================================================================

fn preprocess_binarize(ctx: &mut ProgramContext<'_>) -> ProgramResult {
    let input = ctx.matrix("input")?.ok_or("input must be specified")?.clone();
    let threshold = ctx.double("threshold", 0.0)?;
    let dimension = if ctx.passed("dimension") {
        let dimension = ctx.int("dimension", 0)?;
        if dimension < 0 || dimension as usize >= input.rows() {
            return Err(format!(
                "dimension {dimension} is out of range for {} dimensions",
                input.rows()
            ));
        }
        Some(dimension as usize)
    } else {
        None
    };
    let rows = input.rows();
    let data = input
        .as_slice()
        .iter()
        .enumerate()
        .map(|(i, &v)| match dimension {
            Some(dim) if i % rows != dim => v,
            _ if v > threshold => 1.0,
            _ => 0.0,
        })
        .collect();
    let output = NativeMatrix::from_col_major(rows, input.cols(), data)
        .ok_or("output shape mismatch")?;
    ctx.set_matrix("output", output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn jacobi_diagonalizes_symmetric_matrices() {
        let m = array![[4.0, 1.0, 0.0], [1.0, 3.0, 1.0], [0.0, 1.0, 2.0]];
        let (values, vectors) = symmetric_eigen(&m);
        assert!(values[0] >= values[1] && values[1] >= values[2]);
        let reconstructed = vectors.dot(&Array2::from_diag(&values)).dot(&vectors.t());
        assert_abs_diff_eq!(reconstructed, m, epsilon = 1e-9);
        assert_abs_diff_eq!(values.sum(), 9.0, epsilon = 1e-9);
    }

    #[test]
    fn farthest_first_picks_separated_seeds() {
        let x = array![[0.0, 0.0], [0.1, 0.0], [5.0, 5.0]];
        let seeds = farthest_first(&x, 2);
        assert_eq!(seeds, array![[0.0, 0.0], [5.0, 5.0]]);
    }

    #[test]
    fn perceptron_classifies_with_first_maximum() {
        let model = PerceptronWeights::zeros(3, 2);
        assert_eq!(model.classify(&[1.0, 2.0]), 0);
    }
}

//! Dense complex linear-algebra helpers shared by the value types.

use nalgebra::DMatrix;
use ndarray::{Array2, s};
use num_complex::Complex64;

use crate::error::{QisError, QisResult};

pub const C_ZERO: Complex64 = Complex64::new(0.0, 0.0);
pub const C_ONE: Complex64 = Complex64::new(1.0, 0.0);
pub const C_I: Complex64 = Complex64::new(0.0, 1.0);

/// Kronecker product `a ⊗ b`.
pub fn kron(a: &Array2<Complex64>, b: &Array2<Complex64>) -> Array2<Complex64> {
    let (m, n) = a.dim();
    let (p, q) = b.dim();
    let mut out = Array2::zeros((m * p, n * q));
    for ((i, j), &x) in a.indexed_iter() {
        if x == C_ZERO {
            continue;
        }
        out.slice_mut(s![i * p..(i + 1) * p, j * q..(j + 1) * q])
            .assign(&b.mapv(|y| x * y));
    }
    out
}

/// Conjugate transpose.
pub fn dagger(m: &Array2<Complex64>) -> Array2<Complex64> {
    m.t().mapv(|x| x.conj())
}

/// Identity of dimension `dim`.
pub fn identity(dim: usize) -> Array2<Complex64> {
    Array2::eye(dim)
}

/// Numerically stable softmax of `x` scaled by `beta`.
pub fn softmax(x: &[f64], beta: f64) -> Vec<f64> {
    let max = x.iter().fold(f64::NEG_INFINITY, |m, &v| m.max(beta * v));
    let exps: Vec<f64> = x.iter().map(|&v| (beta * v - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

/// Largest elementwise modulus of `a - b`. Shapes must agree.
pub fn max_abs_diff(a: &Array2<Complex64>, b: &Array2<Complex64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).norm())
        .fold(0.0, f64::max)
}

/// Trace of a square matrix.
pub fn trace(m: &Array2<Complex64>) -> Complex64 {
    m.diag().iter().sum()
}

/// Singular value decomposition `m = u · diag(s) · vh`.
pub fn svd(
    m: &Array2<Complex64>,
) -> QisResult<(Array2<Complex64>, Vec<f64>, Array2<Complex64>)> {
    let (rows, cols) = m.dim();
    let dense = DMatrix::from_fn(rows, cols, |i, j| m[[i, j]]);
    let decomposition = dense
        .try_svd(true, true, f64::EPSILON, 0)
        .ok_or(QisError::DecompositionFailed)?;
    let (Some(u), Some(v_t)) = (decomposition.u, decomposition.v_t) else {
        return Err(QisError::DecompositionFailed);
    };
    let u = Array2::from_shape_fn(u.shape(), |(i, j)| u[(i, j)]);
    let vh = Array2::from_shape_fn(v_t.shape(), |(i, j)| v_t[(i, j)]);
    Ok((u, decomposition.singular_values.iter().copied().collect(), vh))
}

/// Unitary factor of the polar decomposition: the unitary closest to `m`
/// in Frobenius norm.
pub fn polar_unitary(m: &Array2<Complex64>) -> QisResult<Array2<Complex64>> {
    let (u, _, vh) = svd(m)?;
    Ok(u.dot(&vh))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_kron_shape_and_entries() {
        let a = array![[C_ONE, C_ZERO], [C_ZERO, C_I]];
        let b = array![[C_ZERO, C_ONE], [C_ONE, C_ZERO]];
        let k = kron(&a, &b);
        assert_eq!(k.dim(), (4, 4));
        assert_eq!(k[[0, 1]], C_ONE);
        assert_eq!(k[[2, 3]], C_I);
        assert_eq!(k[[3, 2]], C_I);
        assert_eq!(k[[0, 3]], C_ZERO);
    }

    #[test]
    fn test_dagger() {
        let m = array![[C_ONE, C_I], [C_ZERO, C_ONE]];
        let d = dagger(&m);
        assert_eq!(d[[1, 0]], -C_I);
        assert_eq!(d[[0, 1]], C_ZERO);
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let w = softmax(&[0.1, -2.0, 3.5], 10.0);
        let total: f64 = w.iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!(w[2] > w[0] && w[0] > w[1]);
        assert_eq!(softmax(&[0.7], 10.0), vec![1.0]);
    }

    #[test]
    fn test_polar_unitary_of_scaled_unitary() {
        let m = array![[C_ZERO, C_ONE * 3.0], [C_ONE * 3.0, C_ZERO]];
        let u = polar_unitary(&m).unwrap();
        let expected = array![[C_ZERO, C_ONE], [C_ONE, C_ZERO]];
        assert!(max_abs_diff(&u, &expected) < 1e-10);
    }
}

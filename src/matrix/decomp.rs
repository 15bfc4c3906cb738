//! LU and QR factorisations, and inversion via LU.

use super::Matrix;
use crate::error::{Error, Result};

impl Matrix {
    /// Doolittle LU factorisation without pivoting: `L · U = A` with `L`
    /// unit-lower-triangular and `U` upper-triangular.
    ///
    /// Fails with [`Error::Singular`] when a pivot on the diagonal of `U`
    /// comes out exactly zero, and with [`Error::DimensionMismatch`] on
    /// non-square input.
    pub fn lu(&self) -> Result<(Matrix, Matrix)> {
        let n = self.require_square("lu")?;
        let mut l = Matrix::new(n, n);
        let mut u = Matrix::new(n, n);

        for i in 0..n {
            for k in i..n {
                let mut sum = 0.0;
                for j in 0..i {
                    sum += l[(i, j)] * u[(j, k)];
                }
                u[(i, k)] = self[(i, k)] - sum;
            }
            if u[(i, i)] == 0.0 {
                return Err(Error::Singular(i));
            }
            l[(i, i)] = 1.0;
            for k in i + 1..n {
                let mut sum = 0.0;
                for j in 0..i {
                    sum += l[(k, j)] * u[(j, i)];
                }
                l[(k, i)] = (self[(k, i)] - sum) / u[(i, i)];
            }
        }
        Ok((l, u))
    }

    /// Householder QR factorisation: `Q · R = A` with `Q` orthogonal and `R`
    /// upper-triangular.
    pub fn qr(&self) -> Result<(Matrix, Matrix)> {
        let n = self.require_square("qr")?;
        let mut r = self.clone();
        let mut q = Matrix::identity(n);

        for k in 0..n.saturating_sub(1) {
            // reflect column k below the diagonal onto the axis
            let norm: f64 = (k..n).map(|i| r[(i, k)] * r[(i, k)]).sum::<f64>().sqrt();
            if norm == 0.0 {
                continue;
            }
            let alpha = if r[(k, k)] > 0.0 { -norm } else { norm };
            let mut v = vec![0.0; n];
            v[k] = r[(k, k)] - alpha;
            for i in k + 1..n {
                v[i] = r[(i, k)];
            }
            let vtv: f64 = v.iter().map(|x| x * x).sum();
            if vtv == 0.0 {
                continue;
            }

            // R := (I - 2 v vᵀ / vᵀv) R
            for j in k..n {
                let dot: f64 = (k..n).map(|i| v[i] * r[(i, j)]).sum();
                let scale = 2.0 * dot / vtv;
                for i in k..n {
                    r[(i, j)] -= scale * v[i];
                }
            }
            // Q := Q (I - 2 v vᵀ / vᵀv)
            for i in 0..n {
                let dot: f64 = (k..n).map(|j| q[(i, j)] * v[j]).sum();
                let scale = 2.0 * dot / vtv;
                for j in k..n {
                    q[(i, j)] -= scale * v[j];
                }
            }
        }

        // sweep rounding dust out of R's lower triangle
        for i in 1..n {
            for j in 0..i {
                r[(i, j)] = 0.0;
            }
        }
        Ok((q, r))
    }

    /// Invert via LU and forward/back substitution over the identity
    /// columns.
    pub fn inverse(&self) -> Result<Matrix> {
        let n = self.require_square("inverse")?;
        let (l, u) = self.lu()?;
        let mut out = Matrix::new(n, n);

        for col in 0..n {
            // forward: L y = e_col (unit diagonal)
            let mut y = vec![0.0; n];
            for i in 0..n {
                let mut sum = if i == col { 1.0 } else { 0.0 };
                for j in 0..i {
                    sum -= l[(i, j)] * y[j];
                }
                y[i] = sum;
            }
            // back: U x = y
            let mut x = vec![0.0; n];
            for i in (0..n).rev() {
                let mut sum = y[i];
                for j in i + 1..n {
                    sum -= u[(i, j)] * x[j];
                }
                x[i] = sum / u[(i, i)];
            }
            for i in 0..n {
                out[(i, col)] = x[i];
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use approx::assert_relative_eq;

    fn sample() -> Matrix {
        Matrix::from_rows(&[
            vec![4.0, 3.0, 2.0],
            vec![2.0, 5.0, 1.0],
            vec![1.0, 2.0, 6.0],
        ])
        .unwrap()
    }

    fn assert_matrix_eq(a: &Matrix, b: &Matrix, eps: f64) {
        assert_eq!((a.rows(), a.cols()), (b.rows(), b.cols()));
        for i in 0..a.rows() {
            for j in 0..a.cols() {
                assert_relative_eq!(a[(i, j)], b[(i, j)], epsilon = eps);
            }
        }
    }

    #[test]
    fn non_square_input_is_rejected() {
        let m = Matrix::new(2, 3);
        assert_eq!(m.lu().unwrap_err().kind(), ErrorKind::DimensionMismatch);
        assert_eq!(m.qr().unwrap_err().kind(), ErrorKind::DimensionMismatch);
        assert_eq!(
            m.inverse().unwrap_err().kind(),
            ErrorKind::DimensionMismatch
        );
    }

    #[test]
    fn lu_reconstructs_the_input() {
        let a = sample();
        let (l, u) = a.lu().unwrap();
        assert_matrix_eq(&l.mul(&u).unwrap(), &a, 1e-12);
        // L is unit-lower, U upper
        for i in 0..3 {
            assert_relative_eq!(l[(i, i)], 1.0);
            for j in i + 1..3 {
                assert_relative_eq!(l[(i, j)], 0.0);
            }
            for j in 0..i {
                assert_relative_eq!(u[(i, j)], 0.0);
            }
        }
    }

    #[test]
    fn lu_detects_a_zero_pivot() {
        let a = Matrix::from_rows(&[vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        assert_eq!(a.lu().unwrap_err().kind(), ErrorKind::Singular);
    }

    #[test]
    fn qr_reconstructs_with_orthogonal_q() {
        let a = sample();
        let (q, r) = a.qr().unwrap();
        assert_matrix_eq(&q.mul(&r).unwrap(), &a, 1e-9);
        assert_matrix_eq(
            &q.mul(&q.transpose()).unwrap(),
            &Matrix::identity(3),
            1e-9,
        );
        for i in 1..3 {
            for j in 0..i {
                assert_relative_eq!(r[(i, j)], 0.0);
            }
        }
    }

    #[test]
    fn inverse_round_trips_to_identity() {
        let a = sample();
        let inv = a.inverse().unwrap();
        assert_matrix_eq(&a.mul(&inv).unwrap(), &Matrix::identity(3), 1e-9);
        assert_matrix_eq(&inv.mul(&a).unwrap(), &Matrix::identity(3), 1e-9);
    }

    #[test]
    fn singular_matrix_cannot_be_inverted() {
        let a = Matrix::from_rows(&[vec![1.0, 2.0], vec![2.0, 4.0]]).unwrap();
        assert_eq!(a.inverse().unwrap_err().kind(), ErrorKind::Singular);
    }
}

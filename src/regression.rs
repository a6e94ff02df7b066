use faer::{Mat, Side, linalg::solvers::DenseSolveCore};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::error::{BanditError, Result};

/// Bayesian linear regression state for a single arm
///
/// Holds the design matrix `A = I + Σ x xᵀ` and the bias vector `b = Σ r x`.
/// `A` starts at the identity and only ever receives positive-semidefinite
/// rank-one additions, so it stays symmetric positive-definite.
///
/// The factorization is recomputed from `A` on every call to
/// [`posterior`](Self::posterior); nothing is cached between steps.
#[derive(Debug, Clone)]
pub struct LinearArm {
    /// Number of features
    num_features: usize,
    /// A = I + X^T X
    a_matrix: Mat<f64>,
    /// b = X^T y
    b_vector: Mat<f64>,
}

impl LinearArm {
    /// Create a new arm model with `A = I` and `b = 0`
    pub fn new(num_features: usize) -> Self {
        Self {
            num_features,
            a_matrix: identity(num_features),
            b_vector: Mat::<f64>::zeros(num_features, 1),
        }
    }

    /// Number of features
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// The design matrix `A`
    pub fn design_matrix(&self) -> &Mat<f64> {
        &self.a_matrix
    }

    /// The bias vector `b` (a `d x 1` column)
    pub fn bias(&self) -> &Mat<f64> {
        &self.b_vector
    }

    /// `A += x xᵀ`, `b += reward * x`
    ///
    /// The shape is validated before anything is written.
    pub fn update(&mut self, x: &[f64], reward: f64) -> Result<()> {
        check_features(x, self.num_features)?;

        for (i, &xi) in x.iter().enumerate() {
            for (j, &xj) in x.iter().enumerate() {
                self.a_matrix[(i, j)] += xi * xj;
            }
            self.b_vector[(i, 0)] += reward * xi;
        }
        Ok(())
    }

    /// Factor `A = L Lᵀ`, invert it and compute the posterior mean `A⁻¹ b`
    ///
    /// # Errors
    /// `NumericalError` when `A` is no longer positive-definite.
    pub fn posterior(&self) -> Result<Posterior> {
        let llt = self
            .a_matrix
            .llt(Side::Lower)
            .map_err(|e| BanditError::NumericalError {
                message: format!("design matrix is not positive definite: {e:?}"),
            })?;

        let a_inv = llt.inverse();
        let mean = &a_inv * &self.b_vector;
        Ok(Posterior {
            a_inv,
            mean,
            l_factor: llt.L().to_owned(),
        })
    }

    /// Reset the model to `A = I`, `b = 0`
    pub fn reset(&mut self) {
        self.a_matrix = identity(self.num_features);
        self.b_vector = Mat::<f64>::zeros(self.num_features, 1);
    }
}

/// Posterior over one arm's coefficients: mean `A⁻¹ b`, covariance proportional to `A⁻¹`
#[derive(Debug, Clone)]
pub struct Posterior {
    a_inv: Mat<f64>,
    mean: Mat<f64>,
    /// Lower Cholesky factor of `A`
    l_factor: Mat<f64>,
}

impl Posterior {
    /// The inverse design matrix `A⁻¹`
    pub fn a_inv(&self) -> &Mat<f64> {
        &self.a_inv
    }

    /// Posterior mean coefficients `A⁻¹ b` (a `d x 1` column)
    pub fn mean(&self) -> &Mat<f64> {
        &self.mean
    }

    /// Predicted reward `meanᵀ x`
    pub fn predict(&self, x: &[f64]) -> f64 {
        x.iter()
            .enumerate()
            .map(|(i, &xi)| xi * self.mean[(i, 0)])
            .sum()
    }

    /// Returns `sqrt(xᵀ A⁻¹ x)`, the width of the confidence bound
    pub fn confidence_width(&self, x: &[f64]) -> f64 {
        let mut quad = 0.0;
        for (i, &xi) in x.iter().enumerate() {
            for (j, &xj) in x.iter().enumerate() {
                quad += xi * self.a_inv[(i, j)] * xj;
            }
        }
        // Rounding can leave a tiny negative value for x = 0
        quad.max(0.0).sqrt()
    }

    /// Draw coefficients from `N(mean, v² A⁻¹)`
    ///
    /// With `A = L Lᵀ`, `L⁻ᵀ z` has covariance `A⁻¹` for standard normal `z`,
    /// so `theta = mean + v L⁻ᵀ z`.
    pub fn sample_coefficients<R: Rng + ?Sized>(&self, v: f64, rng: &mut R) -> Result<Vec<f64>> {
        let d = self.mean.nrows();
        let mut theta: Vec<f64> = (0..d).map(|i| self.mean[(i, 0)]).collect();
        if v == 0.0 {
            return Ok(theta);
        }

        let mut w: Vec<f64> = (0..d)
            .map(|_| StandardNormal.sample(&mut *rng))
            .collect();
        // Back substitution on Lᵀ w = z
        for i in (0..d).rev() {
            let mut sum = w[i];
            for k in i + 1..d {
                sum -= self.l_factor[(k, i)] * w[k];
            }
            w[i] = sum / self.l_factor[(i, i)];
        }

        for (theta_i, wi) in theta.iter_mut().zip(&w) {
            *theta_i += v * wi;
        }
        if theta.iter().any(|t| !t.is_finite()) {
            return Err(BanditError::NumericalError {
                message: "sampled coefficients are not finite".to_string(),
            });
        }
        Ok(theta)
    }
}

/// Validate that a feature vector has exactly `expected` entries
pub(crate) fn check_features(x: &[f64], expected: usize) -> Result<()> {
    if x.len() != expected {
        return Err(BanditError::InvalidContextDimensions {
            expected,
            got: x.len(),
        });
    }
    Ok(())
}

fn identity(n: usize) -> Mat<f64> {
    Mat::from_fn(n, n, |i, j| if i == j { 1.0 } else { 0.0 })
}

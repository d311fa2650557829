//! Ordinary least-squares polynomial fitting.
//!
//! Times are first mapped onto `[-1, 1]` by `u = (t - center) / half_span`.
//! The fit then forms the normal equations `(MᵀM) q = Mᵀy` from the design
//! matrix `M[i][j] = uᵢʲ`, solves them by Gaussian elimination with partial
//! pivoting, and expands `q` back into powers of `t`. Without the mapping the
//! normal equations lose precision quickly once samples sit far from `t = 0`.

use alloc::vec;
use alloc::vec::Vec;
use libm::fabs;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Domain, FitError, Polynomial};

/// Pivots smaller than this fraction of the largest normal-matrix entry are
/// treated as zero.
const SINGULAR_TOLERANCE: f64 = 1e-12;

/// Paired `(time, value)` measurements.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawSamples"))]
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    times: Vec<f64>,
    values: Vec<f64>,
}

/// Unvalidated wire form of a [`SampleSet`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawSamples {
    times: Vec<f64>,
    values: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSamples> for SampleSet {
    type Error = FitError;

    fn try_from(raw: RawSamples) -> Result<Self, Self::Error> {
        SampleSet::new(raw.times, raw.values)
    }
}

impl SampleSet {
    /// Construct a sample set.
    ///
    /// # Arguments
    ///
    /// * `times`: Sample times in seconds.
    /// * `values`: Measured value at each time.
    ///
    /// # Errors
    ///
    /// Returns `Err(FitError::InvalidInput)` if the sequences differ in length,
    /// are empty, or contain a non-finite value.
    pub fn new(times: Vec<f64>, values: Vec<f64>) -> Result<Self, FitError> {
        validate(&times, &values)?;
        Ok(SampleSet { times, values })
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always `false`; a sample set holds at least one sample.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Returns the sample times.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Returns the sampled values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the closed interval spanned by the sample times.
    pub fn domain(&self) -> Domain {
        let start = self.times.iter().copied().fold(f64::INFINITY, f64::min);
        let end = self.times.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Domain::new_unchecked(start, end)
    }

    /// Fits a polynomial of the given degree to the samples.
    ///
    /// See [`fit`].
    pub fn fit(&self, degree: usize) -> Result<Polynomial, FitError> {
        fit(&self.times, &self.values, degree)
    }
}

fn validate(times: &[f64], values: &[f64]) -> Result<(), FitError> {
    if times.len() != values.len() {
        return Err(FitError::InvalidInput(
            "times and values must have the same length",
        ));
    }
    if times.is_empty() {
        return Err(FitError::InvalidInput("at least one sample is required"));
    }
    if times.iter().chain(values).any(|x| !x.is_finite()) {
        return Err(FitError::InvalidInput("samples must be finite"));
    }
    Ok(())
}

/// Fits a polynomial of `degree` to `(times[i], values[i])` by ordinary least squares.
///
/// The returned polynomial minimizes `Σ (values[i] - p(times[i]))²`. With
/// exactly `degree + 1` distinct times the fit interpolates the samples.
///
/// # Arguments
///
/// * `times`: Independent variable samples.
/// * `values`: Dependent variable samples, one per time.
/// * `degree`: Degree of the fitted polynomial.
///
/// # Errors
///
/// Returns `Err(FitError::InvalidInput)` if the slices differ in length, hold
/// fewer than `degree + 1` samples, or contain a non-finite value.
/// Returns `Err(FitError::SingularFit)` if the normal equations are singular,
/// e.g. because fewer than `degree + 1` distinct times were sampled.
pub fn fit(times: &[f64], values: &[f64], degree: usize) -> Result<Polynomial, FitError> {
    validate(times, values)?;
    if times.len() <= degree {
        return Err(FitError::InvalidInput(
            "need at least degree + 1 samples",
        ));
    }
    let n = degree + 1;

    // Solve in u = (t - center) / scale, which maps the samples onto [-1, 1].
    let (center, scale) = normalization(times);

    // Power sums Σ uᵏ for k in 0..=2·degree fill every entry of MᵀM.
    let mut power_sums = vec![0.0; 2 * degree + 1];
    let mut rhs = vec![0.0; n];
    for (&t, &y) in times.iter().zip(values) {
        let u = (t - center) / scale;
        let mut power = 1.0;
        for (k, sum) in power_sums.iter_mut().enumerate() {
            *sum += power;
            if k < n {
                rhs[k] += y * power;
            }
            power *= u;
        }
    }

    let mut normal = vec![0.0; n * n];
    for row in 0..n {
        for col in 0..n {
            normal[row * n + col] = power_sums[row + col];
        }
    }

    let scaled = solve(&mut normal, &mut rhs, n)?;
    let coefficients = expand(&scaled, center, scale);
    Polynomial::new(coefficients).map_err(|_| FitError::SingularFit("solution is not finite"))
}

/// Midpoint and half-width of the sampled times. A zero width becomes `1.0`.
fn normalization(times: &[f64]) -> (f64, f64) {
    let start = times.iter().copied().fold(f64::INFINITY, f64::min);
    let end = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let center = 0.5 * (start + end);
    let half_span = 0.5 * (end - start);
    if half_span > 0.0 {
        (center, half_span)
    } else {
        (center, 1.0)
    }
}

/// Rewrites `Σ q[k]·uᵏ` with `u = (t - center) / scale` as ascending powers of `t`.
fn expand(scaled: &[f64], center: f64, scale: f64) -> Vec<f64> {
    let n = scaled.len();
    let mut coefficients = vec![0.0; n];
    // uᵏ as a polynomial in t, starting from u⁰ = 1.
    let mut basis = vec![0.0; n];
    basis[0] = 1.0;
    for (k, &q) in scaled.iter().enumerate() {
        if k > 0 {
            for i in (0..=k).rev() {
                let shifted = if i > 0 { basis[i - 1] } else { 0.0 };
                basis[i] = (shifted - center * basis[i]) / scale;
            }
        }
        for (c, &b) in coefficients.iter_mut().zip(&basis) {
            *c += q * b;
        }
    }
    coefficients
}

/// Solves the dense `n × n` system `a · x = b` in place, with `a` row-major.
fn solve(a: &mut [f64], b: &mut [f64], n: usize) -> Result<Vec<f64>, FitError> {
    let scale = a.iter().fold(0.0_f64, |m, &x| m.max(fabs(x)));
    let tolerance = SINGULAR_TOLERANCE * scale;

    for k in 0..n {
        let mut pivot_row = k;
        for row in (k + 1)..n {
            if fabs(a[row * n + k]) > fabs(a[pivot_row * n + k]) {
                pivot_row = row;
            }
        }
        let magnitude = fabs(a[pivot_row * n + k]);
        if magnitude.is_nan() || magnitude <= tolerance {
            return Err(FitError::SingularFit(
                "normal equations are singular",
            ));
        }
        if pivot_row != k {
            for col in 0..n {
                a.swap(k * n + col, pivot_row * n + col);
            }
            b.swap(k, pivot_row);
        }

        let pivot = a[k * n + k];
        for row in (k + 1)..n {
            let factor = a[row * n + k] / pivot;
            if factor == 0.0 {
                continue;
            }
            for col in k..n {
                a[row * n + col] -= factor * a[k * n + col];
            }
            b[row] -= factor * b[k];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = ((row + 1)..n).map(|col| a[row * n + col] * x[col]).sum();
        x[row] = (b[row] - tail) / a[row * n + row];
    }
    Ok(x)
}

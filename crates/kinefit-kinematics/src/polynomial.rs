//! Dense real polynomials in one variable.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::FitError;

/// A polynomial `c[0] + c[1]·t + … + c[n]·tⁿ`.
///
/// Coefficients are stored in ascending power order, so `coefficients()[i]`
/// multiplies `t^i`. There is always at least one coefficient. The leading
/// coefficient may be zero.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<f64>", into = "Vec<f64>"))]
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    /// Construct a polynomial from coefficients in ascending power order.
    ///
    /// # Arguments
    ///
    /// * `coefficients`: `c[i]` is the coefficient of `t^i`.
    ///
    /// # Errors
    ///
    /// Returns `Err(FitError::InvalidInput)` if `coefficients` is empty or
    /// contains a non-finite value.
    pub fn new(coefficients: Vec<f64>) -> Result<Self, FitError> {
        if coefficients.is_empty() {
            return Err(FitError::InvalidInput(
                "polynomial needs at least one coefficient",
            ));
        }
        if coefficients.iter().any(|c| !c.is_finite()) {
            return Err(FitError::InvalidInput("coefficients must be finite"));
        }
        Ok(Polynomial { coefficients })
    }

    /// Build a polynomial from coefficients already known to be valid.
    pub(crate) fn from_raw(coefficients: Vec<f64>) -> Self {
        debug_assert!(!coefficients.is_empty());
        Polynomial { coefficients }
    }

    /// Returns the degree, i.e. the number of coefficients minus one.
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Returns the coefficients in ascending power order.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Returns the coefficient of `t^power`, or `0.0` past the leading term.
    pub fn coefficient(&self, power: usize) -> f64 {
        self.coefficients.get(power).copied().unwrap_or(0.0)
    }

    /// Evaluates the polynomial at `t` using Horner's rule.
    ///
    /// No domain check is performed; see [`crate::KinematicModel::evaluate`]
    /// for the bounded variant.
    pub fn evaluate(&self, t: f64) -> f64 {
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * t + c)
    }

    /// Returns the antiderivative whose value at `t = 0` is exactly zero.
    ///
    /// For input `c[0..=n]` the result is `d[0..=n+1]` with `d[0] = 0` and
    /// `d[i + 1] = c[i] / (i + 1)`. The result is one degree higher than the
    /// input, even when the input's leading coefficient is zero.
    pub fn integrate(&self) -> Polynomial {
        let mut coefficients = Vec::with_capacity(self.coefficients.len() + 1);
        coefficients.push(0.0);
        coefficients.extend(
            self.coefficients
                .iter()
                .enumerate()
                .map(|(i, &c)| c / (i + 1) as f64),
        );
        Polynomial::from_raw(coefficients)
    }

    /// Returns the exact derivative.
    ///
    /// The derivative of a constant is the zero constant, so the result always
    /// holds at least one coefficient. `p.integrate().derivative()` equals `p`
    /// up to rounding.
    pub fn derivative(&self) -> Polynomial {
        if self.coefficients.len() == 1 {
            return Polynomial::from_raw(vec![0.0]);
        }
        let coefficients = self
            .coefficients
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, &c)| c * i as f64)
            .collect();
        Polynomial::from_raw(coefficients)
    }

    /// Returns a [`fmt::Display`] adapter that renders the terms from the
    /// highest power down to `min_power`, each coefficient with `precision`
    /// decimal places.
    ///
    /// Terms below `min_power` are omitted, which is how callers hide
    /// coefficients fixed at zero by integration constants.
    pub fn terms(&self, min_power: usize, precision: usize) -> Terms<'_> {
        Terms {
            polynomial: self,
            min_power,
            precision: Some(precision),
        }
    }
}

impl TryFrom<Vec<f64>> for Polynomial {
    type Error = FitError;

    fn try_from(coefficients: Vec<f64>) -> Result<Self, Self::Error> {
        Polynomial::new(coefficients)
    }
}

impl From<Polynomial> for Vec<f64> {
    fn from(polynomial: Polynomial) -> Self {
        polynomial.coefficients
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms = Terms {
            polynomial: self,
            min_power: 0,
            precision: f.precision(),
        };
        fmt::Display::fmt(&terms, f)
    }
}

/// Display adapter returned by [`Polynomial::terms`].
#[derive(Debug, Clone, Copy)]
pub struct Terms<'a> {
    polynomial: &'a Polynomial,
    min_power: usize,
    precision: Option<usize>,
}

impl Terms<'_> {
    fn write_value(&self, f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
        match self.precision {
            Some(precision) => write!(f, "{:.*}", precision, value),
            None => write!(f, "{}", value),
        }
    }
}

impl fmt::Display for Terms<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let degree = self.polynomial.degree();
        if self.min_power > degree {
            return self.write_value(f, 0.0);
        }

        for power in (self.min_power..=degree).rev() {
            let c = self.polynomial.coefficients[power];
            if power == degree {
                self.write_value(f, c)?;
            } else if c < 0.0 {
                f.write_str(" - ")?;
                self.write_value(f, -c)?;
            } else {
                f.write_str(" + ")?;
                self.write_value(f, c)?;
            }
            match power {
                0 => {}
                1 => f.write_str("*t")?,
                _ => write!(f, "*t^{}", power)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-9;

    fn numeric_derivative(p: &Polynomial, t: f64) -> f64 {
        let h = 1e-5;
        (p.evaluate(t + h) - p.evaluate(t - h)) / (2.0 * h)
    }

    #[test]
    fn test_constructor_rejects_empty() {
        let result = Polynomial::new(vec![]);
        assert!(matches!(result, Err(FitError::InvalidInput(_))));
    }

    #[test]
    fn test_constructor_rejects_non_finite() {
        assert!(matches!(
            Polynomial::new(vec![1.0, f64::NAN]),
            Err(FitError::InvalidInput("coefficients must be finite"))
        ));
        assert!(matches!(
            Polynomial::new(vec![f64::INFINITY]),
            Err(FitError::InvalidInput("coefficients must be finite"))
        ));
    }

    #[test]
    fn test_degree_and_coefficient_lookup() {
        let p = Polynomial::new(vec![1.0, -2.0, 0.5]).unwrap();
        assert_eq!(p.degree(), 2);
        assert_eq!(p.coefficients(), &[1.0, -2.0, 0.5]);
        assert_eq!(p.coefficient(1), -2.0);
        assert_eq!(p.coefficient(7), 0.0);
    }

    #[test]
    fn test_evaluate_horner() {
        // 1 - 2t + 0.5t^2 at t = 3 => 1 - 6 + 4.5 = -0.5
        let p = Polynomial::new(vec![1.0, -2.0, 0.5]).unwrap();
        assert!((p.evaluate(3.0) - (-0.5)).abs() < EPSILON);
        assert!((p.evaluate(0.0) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_integrate_term_by_term() {
        // ∫(6 + 6t + 12t^2) dt = 6t + 3t^2 + 4t^3
        let p = Polynomial::new(vec![6.0, 6.0, 12.0]).unwrap();
        let integral = p.integrate();
        assert_eq!(integral.coefficients(), &[0.0, 6.0, 3.0, 4.0]);
        assert_eq!(integral.degree(), p.degree() + 1);
    }

    #[test]
    fn test_integral_is_zero_at_origin() {
        let p = Polynomial::new(vec![2.704, -1.5, 8.25, 63.7]).unwrap();
        assert_eq!(p.integrate().evaluate(0.0), 0.0);
        assert_eq!(p.integrate().integrate().evaluate(0.0), 0.0);
    }

    #[test]
    fn test_integral_keeps_zero_leading_coefficient() {
        let p = Polynomial::new(vec![1.0, 0.0]).unwrap();
        assert_eq!(p.integrate().coefficients(), &[0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_numeric_derivative_of_integral_matches() {
        let p = Polynomial::new(vec![2.6, 8.2, -57.5, 63.7]).unwrap();
        let integral = p.integrate();
        for &t in &[0.0, 0.1, 0.25, 0.37, 0.5] {
            assert!((numeric_derivative(&integral, t) - p.evaluate(t)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_derivative_inverts_integrate() {
        let p = Polynomial::new(vec![-3.0, 0.25, 7.0, -1.0, 2.0]).unwrap();
        let recovered = p.integrate().derivative();
        assert_eq!(recovered.degree(), p.degree());
        for (a, b) in recovered.coefficients().iter().zip(p.coefficients()) {
            assert!((a - b).abs() < EPSILON);
        }
    }

    #[test]
    fn test_derivative_of_constant() {
        let p = Polynomial::new(vec![4.0]).unwrap();
        assert_eq!(p.derivative().coefficients(), &[0.0]);
    }

    #[test]
    fn test_terms_rendering() {
        let p = Polynomial::new(vec![0.0, 2.5, -1.26, 3.0]).unwrap();
        assert_eq!(
            format!("{}", p.terms(1, 2)),
            "3.00*t^3 - 1.26*t^2 + 2.50*t"
        );
        assert_eq!(format!("{}", p.terms(2, 1)), "3.0*t^3 - 1.3*t^2");
    }

    #[test]
    fn test_terms_leading_negative_and_constant() {
        let p = Polynomial::new(vec![1.0, -4.0]).unwrap();
        assert_eq!(format!("{}", p.terms(0, 3)), "-4.000*t + 1.000");
    }

    #[test]
    fn test_terms_past_degree_renders_zero() {
        let p = Polynomial::new(vec![1.0]).unwrap();
        assert_eq!(format!("{}", p.terms(3, 2)), "0.00");
    }

    #[test]
    fn test_display_forwards_precision() {
        let p = Polynomial::new(vec![0.5, 2.0]).unwrap();
        assert_eq!(format!("{:.1}", p), "2.0*t + 0.5");
        assert_eq!(format!("{}", p), "2*t + 0.5");
    }
}

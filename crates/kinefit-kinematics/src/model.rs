//! Acceleration, velocity, and position bundled over a validity domain.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{FitError, Polynomial, SampleSet};

/// A closed time interval `[start, end]` in seconds.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Bounds"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    start: f64,
    end: f64,
}

/// Unvalidated wire form of a [`Domain`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct Bounds {
    start: f64,
    end: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<Bounds> for Domain {
    type Error = FitError;

    fn try_from(bounds: Bounds) -> Result<Self, Self::Error> {
        Domain::new(bounds.start, bounds.end)
    }
}

impl Domain {
    /// Construct a domain.
    ///
    /// # Errors
    ///
    /// Returns `Err(FitError::InvalidInput)` if either bound is non-finite or
    /// `start > end`.
    pub fn new(start: f64, end: f64) -> Result<Self, FitError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(FitError::InvalidInput("domain bounds must be finite"));
        }
        if start > end {
            return Err(FitError::InvalidInput("domain start must not exceed end"));
        }
        Ok(Domain { start, end })
    }

    pub(crate) const fn new_unchecked(start: f64, end: f64) -> Self {
        Domain { start, end }
    }

    /// Returns the lower bound.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Returns the upper bound.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Returns `true` if `start <= t <= end`. NaN is never contained.
    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && t <= self.end
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Acceleration, velocity, and position at one instant.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KinematicState {
    /// Time (s).
    pub t: f64,
    /// Acceleration (m/s²).
    pub acceleration: f64,
    /// Velocity (m/s).
    pub velocity: f64,
    /// Position (m).
    pub position: f64,
}

impl fmt::Display for KinematicState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(t: {:.3} s, a: {:.5} m/s^2, v: {:.5} m/s, x: {:.5} m)",
            self.t, self.acceleration, self.velocity, self.position
        )
    }
}

/// Closed-form motion derived from a fitted acceleration polynomial.
///
/// Velocity and position are the zero-constant antiderivatives of
/// acceleration and velocity, so `v(0) = 0` and `x(0) = 0`. The model is
/// immutable once built.
///
/// When deserialized, only `acceleration` and `domain` are read; velocity and
/// position are integrated again.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "ModelParts"))]
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicModel {
    acceleration: Polynomial,
    velocity: Polynomial,
    position: Polynomial,
    domain: Domain,
}

/// The independent parts of a [`KinematicModel`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct ModelParts {
    acceleration: Polynomial,
    domain: Domain,
}

#[cfg(feature = "serde")]
impl From<ModelParts> for KinematicModel {
    fn from(parts: ModelParts) -> Self {
        KinematicModel::from_acceleration(parts.acceleration, parts.domain)
    }
}

impl KinematicModel {
    /// Build a model by integrating `acceleration` twice.
    ///
    /// # Arguments
    ///
    /// * `acceleration`: Acceleration polynomial `a(t)` in m/s².
    /// * `domain`: Times over which the model may be evaluated.
    pub fn from_acceleration(acceleration: Polynomial, domain: Domain) -> Self {
        let velocity = acceleration.integrate();
        let position = velocity.integrate();
        KinematicModel {
            acceleration,
            velocity,
            position,
            domain,
        }
    }

    /// Fit acceleration samples with a polynomial of `degree` and integrate it.
    ///
    /// The domain is the span of the sample times.
    ///
    /// # Errors
    ///
    /// Propagates `FitError::InvalidInput` and `FitError::SingularFit` from [`crate::fit`].
    pub fn from_samples(samples: &SampleSet, degree: usize) -> Result<Self, FitError> {
        let acceleration = samples.fit(degree)?;
        Ok(Self::from_acceleration(acceleration, samples.domain()))
    }

    /// Returns the acceleration polynomial `a(t)`.
    pub fn acceleration(&self) -> &Polynomial {
        &self.acceleration
    }

    /// Returns the velocity polynomial `v(t)`.
    pub fn velocity(&self) -> &Polynomial {
        &self.velocity
    }

    /// Returns the position polynomial `x(t)`.
    pub fn position(&self) -> &Polynomial {
        &self.position
    }

    /// Returns the domain the model is valid on.
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Evaluates all three polynomials at `t` without a domain check.
    pub fn state_at(&self, t: f64) -> KinematicState {
        KinematicState {
            t,
            acceleration: self.acceleration.evaluate(t),
            velocity: self.velocity.evaluate(t),
            position: self.position.evaluate(t),
        }
    }

    /// Evaluates the model at `t` if it lies inside the domain.
    ///
    /// # Errors
    ///
    /// Returns `Err(FitError::OutOfDomain)` if `t` is outside the domain or NaN.
    pub fn evaluate(&self, t: f64) -> Result<KinematicState, FitError> {
        if !self.domain.contains(t) {
            return Err(FitError::OutOfDomain(
                "the fit is not valid outside the sampled interval",
            ));
        }
        Ok(self.state_at(t))
    }
}

impl fmt::Display for KinematicModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "KinematicModel on {} (a(t) = {:.5})",
            self.domain, self.acceleration
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    const EPSILON: f64 = 1e-6;

    fn reference_model() -> KinematicModel {
        let samples = SampleSet::new(
            vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5],
            vec![2.704, 2.755, 2.646, 1.721, 0.640, 0.379],
        )
        .unwrap();
        KinematicModel::from_samples(&samples, 3).unwrap()
    }

    fn numeric_derivative(p: &Polynomial, t: f64) -> f64 {
        let h = 1e-4;
        (p.evaluate(t + h) - p.evaluate(t - h)) / (2.0 * h)
    }

    fn numeric_second_derivative(p: &Polynomial, t: f64) -> f64 {
        let h = 1e-3;
        (p.evaluate(t + h) - 2.0 * p.evaluate(t) + p.evaluate(t - h)) / (h * h)
    }

    fn rendered(p: &Polynomial) -> Vec<String> {
        p.coefficients().iter().map(|c| format!("{:.5}", c)).collect()
    }

    #[test]
    fn test_domain_constructor() {
        let domain = Domain::new(0.0, 0.5).unwrap();
        assert!(domain.contains(0.0));
        assert!(domain.contains(0.5));
        assert!(domain.contains(0.25));
        assert!(!domain.contains(-0.1));
        assert!(!domain.contains(0.6));
        assert!(!domain.contains(f64::NAN));
        assert_eq!(format!("{}", domain), "[0, 0.5]");
    }

    #[test]
    fn test_domain_rejects_inverted_bounds() {
        assert!(matches!(Domain::new(1.0, 0.0), Err(FitError::InvalidInput(_))));
        assert!(matches!(
            Domain::new(0.0, f64::INFINITY),
            Err(FitError::InvalidInput("domain bounds must be finite"))
        ));
    }

    #[test]
    fn test_reference_model_polynomials() {
        let model = reference_model();
        assert_eq!(model.domain(), Domain::new(0.0, 0.5).unwrap());
        assert_eq!(
            rendered(model.velocity()),
            ["0.00000", "2.64175", "4.09656", "-19.16878", "15.92593"]
        );
        assert_eq!(
            rendered(model.position()),
            ["0.00000", "0.00000", "1.32087", "1.36552", "-4.79220", "3.18519"]
        );
    }

    #[test]
    fn test_reference_model_states() {
        let model = reference_model();
        let state = model.evaluate(0.1).unwrap();
        assert_eq!(format!("{:.5}", state.acceleration), "2.94970");
        assert_eq!(format!("{:.5}", state.velocity), "0.28756");
        assert_eq!(format!("{:.5}", state.position), "0.01413");

        let state = model.evaluate(0.5).unwrap();
        assert_eq!(format!("{:.5}", state.acceleration), "0.32468");
        assert_eq!(format!("{:.5}", state.velocity), "0.94429");
        assert_eq!(format!("{:.5}", state.position), "0.30093");
    }

    #[test]
    fn test_zero_initial_conditions() {
        let model = reference_model();
        let state = model.evaluate(0.0).unwrap();
        assert_eq!(state.velocity, 0.0);
        assert_eq!(state.position, 0.0);
        assert_eq!(state.acceleration, model.acceleration().coefficient(0));
    }

    #[test]
    fn test_evaluate_rejects_out_of_domain() {
        let model = reference_model();
        assert!(matches!(model.evaluate(0.6), Err(FitError::OutOfDomain(_))));
        assert!(matches!(model.evaluate(-0.1), Err(FitError::OutOfDomain(_))));
        assert!(matches!(model.evaluate(f64::NAN), Err(FitError::OutOfDomain(_))));
    }

    #[test]
    fn test_state_at_does_not_check_domain() {
        let model = reference_model();
        let state = model.state_at(0.6);
        assert_eq!(state.acceleration, model.acceleration().evaluate(0.6));
    }

    #[test]
    fn test_velocity_and_position_derivatives() {
        let model = reference_model();
        for &t in &[0.05, 0.15, 0.3, 0.45] {
            let dv = numeric_derivative(model.velocity(), t);
            let dx = numeric_derivative(model.position(), t);
            assert!((dv - model.acceleration().evaluate(t)).abs() < EPSILON);
            assert!((dx - model.velocity().evaluate(t)).abs() < EPSILON);
            let ddx = numeric_second_derivative(model.position(), t);
            assert!((ddx - model.acceleration().evaluate(t)).abs() < 1e-4);
        }
    }

    #[test]
    fn test_random_polynomials_round_trip() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let domain = Domain::new(0.0, 1.0).unwrap();
        for _ in 0..50 {
            let degree = rng.random_range(0..6);
            let coefficients: Vec<f64> =
                (0..=degree).map(|_| rng.random_range(-10.0..10.0)).collect();
            let acceleration = Polynomial::new(coefficients).unwrap();
            let model = KinematicModel::from_acceleration(acceleration.clone(), domain);

            let recovered = model.position().derivative().derivative();
            for (a, b) in recovered.coefficients().iter().zip(acceleration.coefficients()) {
                assert!((a - b).abs() < 1e-9);
            }

            for &t in &[0.1, 0.4, 0.8] {
                let dv = numeric_derivative(model.velocity(), t);
                assert!((dv - acceleration.evaluate(t)).abs() < 1e-5);
                let ddx = numeric_second_derivative(model.position(), t);
                assert!((ddx - acceleration.evaluate(t)).abs() < 1e-3);
            }
            assert_eq!(model.state_at(0.0).velocity, 0.0);
            assert_eq!(model.state_at(0.0).position, 0.0);
        }
    }

    #[test]
    fn test_from_samples_propagates_fit_errors() {
        let samples = SampleSet::new(vec![0.0, 0.1], vec![1.0, 2.0]).unwrap();
        assert!(matches!(
            KinematicModel::from_samples(&samples, 3),
            Err(FitError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_state_display() {
        let state = KinematicState {
            t: 0.25,
            acceleration: 1.0,
            velocity: 0.5,
            position: 0.125,
        };
        assert_eq!(
            format!("{}", state),
            "(t: 0.250 s, a: 1.00000 m/s^2, v: 0.50000 m/s, x: 0.12500 m)"
        );
    }
}

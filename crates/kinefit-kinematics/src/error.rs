//! Error types for the kinematics library.
//!
//! This module defines the errors that can occur while fitting sample data
//! and while evaluating the resulting kinematic model.

use core::fmt;

/// Errors that can occur while fitting or evaluating a kinematic model.
#[derive(Debug, Clone, PartialEq)]
pub enum FitError {
    /// Error for malformed input.
    /// This variant is returned when sample sequences differ in length, contain
    /// non-finite values, or hold too few points for the requested degree.
    InvalidInput(&'static str),
    /// Error for an unsolvable least-squares system.
    /// This variant is returned when the normal equations are numerically singular,
    /// e.g. when the samples span fewer distinct times than `degree + 1`.
    SingularFit(&'static str),
    /// Error for evaluation outside the fitted domain.
    /// This variant is returned when a model is queried at a time the samples do not cover.
    OutOfDomain(&'static str),
}

impl fmt::Display for FitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            FitError::SingularFit(msg) => write!(f, "Singular fit: {}", msg),
            FitError::OutOfDomain(msg) => write!(f, "Time outside fitted domain: {}", msg),
        }
    }
}

impl core::error::Error for FitError {}

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![doc = "A `no_std` library for turning sampled acceleration into closed-form motion."]
#![doc = ""]
#![doc = "This crate fits a polynomial to `(time, acceleration)` samples by ordinary least"]
#![doc = "squares, integrates it exactly into velocity and position with zero initial"]
#![doc = "conditions, and evaluates the result inside the sampled time domain."]

extern crate alloc;

pub mod error;
pub mod fit;
pub mod model;
pub mod polynomial;

pub use error::FitError;
pub use fit::{SampleSet, fit};
pub use model::{Domain, KinematicModel, KinematicState};
pub use polynomial::{Polynomial, Terms};

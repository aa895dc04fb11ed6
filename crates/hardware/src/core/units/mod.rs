//! Functional units.
//!
//! Only the branch unit's history and training interfaces are modelled; the
//! predictor itself is an external collaborator.

/// Branch unit: global history and predictor training seam.
pub mod bru;

//! Initial conditions for shearing-sheet calculations.

pub mod hgb;

pub use hgb::{delta_vy, max_delta_vy, FieldGeometry, Hgb, Perturbation};

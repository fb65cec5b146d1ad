//! Shearbox implements shearing-sheet boundary conditions for finite-volume
//! simulations of compressible, possibly magnetized flows on a uniform
//! Cartesian grid. A shearing sheet is a local, corotating patch of a
//! differentially rotating disk: its radial boundaries are periodic up to an
//! azimuthal offset that grows linearly in time with the orbital shear.
//! Ghost cells on each radial face are filled from the interior on the
//! opposite face, boosted by the shear velocity across the box, and
//! translated by the accumulated offset using a conservative, high-order
//! remap.
//!
//! Alongside the boundary engine the crate provides the HGB problem
//! generator, a legacy VTK snapshot writer, and a TOML run configuration.

pub mod boundary;
pub mod config;
pub mod error;
pub mod grid;
pub mod hydro;
pub mod index_space;
pub mod io;
pub mod mesh;
pub mod problem;
pub mod remap;
pub mod shear;

pub use boundary::{Face, ShearingBoundary};
pub use config::Config;
pub use error::Error;
pub use grid::Grid;
pub use mesh::Mesh;
pub use shear::{ShearOffset, ShearingSheet};

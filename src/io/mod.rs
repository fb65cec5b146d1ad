//! Snapshot output.

pub mod vtk;

pub use vtk::{dump_filename, write_vtk, write_vtk_file, Variables};

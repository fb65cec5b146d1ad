use std::collections::TryReserveError;
use thiserror::Error;

/**
 * Errors raised while configuring or applying the shearing-sheet boundary
 * engine, and by the problem setup and output routines that surround it.
 * None of these are transient: a repeated call with the same inputs fails
 * the same way, so callers should report them and stop.
 */
#[derive(Debug, Error)]
pub enum Error {
    #[error("shearing-sheet boundaries need an azimuthal extent greater than 1 (got Nx2 = {0})")]
    AzimuthalExtent(i64),

    #[error("{required} ghost zones are needed but the grid has {available}")]
    InsufficientGuard { required: usize, available: usize },

    #[error("the radial extent (Nx1 = {size}) is smaller than the ghost width {num_guard}")]
    RadialExtent { size: i64, num_guard: usize },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to allocate {what}: {source}")]
    Allocation {
        what: &'static str,
        #[source]
        source: TryReserveError,
    },

    #[error(transparent)]
    Hydro(#[from] crate::hydro::Error),

    #[error("failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Allocate a zero-filled buffer of the given length, reporting an
/// allocation failure instead of aborting.
///
pub fn try_zeros(len: usize, what: &'static str) -> Result<Vec<f64>, Error> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|source| Error::Allocation { what, source })?;
    data.resize(len, 0.0);
    Ok(data)
}

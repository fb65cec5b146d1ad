use thiserror::Error;

/**
 * Error to represent invalid hydrodynamics data or primitive variable recovery.
 */
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("negative gas pressure: {0}")]
    NegativeGasPressure(f64),

    #[error("non-positive mass density: {0}")]
    NonPositiveMassDensity(f64),

    #[error("isothermal equation of state used with an adiabatic field layout")]
    IsothermalEnergy,
}

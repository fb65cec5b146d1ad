//! Conservative translation of cell-averaged data by a fraction of a cell.
//! A column of averages is reconstructed into limited sub-cell profiles,
//! each profile is integrated over the strip swept across its face, and the
//! resulting fluxes are differenced so that the total is exactly preserved.

pub mod flux;
pub mod reconstruct;

pub use flux::{remap_column, shift_periodic, subcell_integral, FluxBuffer};
pub use reconstruct::{
    LinearReconstruction,
    ParabolicReconstruction,
    Profile,
    Reconstruction,
    ReconstructionOrder,
};

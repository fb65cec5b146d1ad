//! Cell state of a compressible (magneto)fluid: the layout of the conserved
//! fields, read-only views of them, the frame boost applied at shearing-sheet
//! boundaries, and primitive variable recovery.

pub mod conserved;
pub mod error;
pub mod euler;
pub mod layout;

pub use conserved::{boost_azimuthal_momentum, ConservedRef};
pub use error::Error;
pub use euler::EquationOfState;
pub use layout::FieldLayout;

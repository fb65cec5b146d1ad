use serde::{Deserialize, Serialize};

/// Describes which fields make up the state of a single cell, and where
/// each of them sits in the cell's slice of `f64`. The order is mass
/// density, three momentum components, total energy (adiabatic gas only),
/// three cell-centered magnetic field components (MHD only), then passive
/// scalars. The same layout applies to primitive data, with velocity in
/// place of momentum, gas pressure in place of energy, and specific scalars
/// in place of scalar densities.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldLayout {
    pub adiabatic: bool,
    pub magnetic: bool,
    #[serde(default)]
    pub num_scalars: usize,
}

impl FieldLayout {
    pub const DENSITY: usize = 0;
    pub const MOMENTUM_1: usize = 1;
    pub const MOMENTUM_2: usize = 2;
    pub const MOMENTUM_3: usize = 3;

    /// An adiabatic, unmagnetized gas with no passive scalars.
    ///
    pub fn euler() -> Self {
        Self {
            adiabatic: true,
            magnetic: false,
            num_scalars: 0,
        }
    }

    pub fn num_fields(&self) -> usize {
        4 + self.adiabatic as usize + 3 * self.magnetic as usize + self.num_scalars
    }

    /// Index of the total energy density, if the gas is adiabatic.
    ///
    pub fn energy(&self) -> Option<usize> {
        if self.adiabatic {
            Some(4)
        } else {
            None
        }
    }

    /// Index of the first magnetic field component, if the fluid is
    /// magnetized. The other two follow it.
    ///
    pub fn magnetic_field(&self) -> Option<usize> {
        if self.magnetic {
            Some(4 + self.adiabatic as usize)
        } else {
            None
        }
    }

    pub fn scalar(&self, n: usize) -> usize {
        assert!(n < self.num_scalars, "scalar index {} out of range", n);
        4 + self.adiabatic as usize + 3 * self.magnetic as usize + n
    }
}




// ============================================================================
#[cfg(test)]
mod test {

    use super::FieldLayout;

    #[test]
    fn field_indexes_are_packed() {
        let layout = FieldLayout {
            adiabatic: true,
            magnetic: true,
            num_scalars: 2,
        };
        assert_eq!(layout.num_fields(), 10);
        assert_eq!(layout.energy(), Some(4));
        assert_eq!(layout.magnetic_field(), Some(5));
        assert_eq!(layout.scalar(0), 8);
        assert_eq!(layout.scalar(1), 9);

        let isothermal = FieldLayout {
            adiabatic: false,
            magnetic: true,
            num_scalars: 1,
        };
        assert_eq!(isothermal.num_fields(), 8);
        assert_eq!(isothermal.energy(), None);
        assert_eq!(isothermal.magnetic_field(), Some(4));
        assert_eq!(isothermal.scalar(0), 7);
    }
}

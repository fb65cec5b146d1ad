use super::layout::FieldLayout;

/// A read-only view of the conserved state of one cell.
///
pub struct ConservedRef<'a> {
    layout: FieldLayout,
    data: &'a [f64],
}

impl<'a> ConservedRef<'a> {
    pub fn new(layout: FieldLayout, data: &'a [f64]) -> Self {
        assert_eq!(data.len(), layout.num_fields());
        Self { layout, data }
    }

    pub fn mass_density(&self) -> f64 {
        self.data[FieldLayout::DENSITY]
    }

    pub fn momentum_1(&self) -> f64 {
        self.data[FieldLayout::MOMENTUM_1]
    }

    pub fn momentum_2(&self) -> f64 {
        self.data[FieldLayout::MOMENTUM_2]
    }

    pub fn momentum_3(&self) -> f64 {
        self.data[FieldLayout::MOMENTUM_3]
    }

    pub fn momentum_squared(&self) -> f64 {
        let (m1, m2, m3) = (self.momentum_1(), self.momentum_2(), self.momentum_3());
        m1 * m1 + m2 * m2 + m3 * m3
    }

    pub fn energy_density(&self) -> Option<f64> {
        self.layout.energy().map(|n| self.data[n])
    }

    pub fn magnetic_field(&self) -> Option<[f64; 3]> {
        self.layout
            .magnetic_field()
            .map(|n| [self.data[n], self.data[n + 1], self.data[n + 2]])
    }

    pub fn scalar(&self, n: usize) -> f64 {
        self.data[self.layout.scalar(n)]
    }

    pub fn kinetic_energy_density(&self) -> f64 {
        0.5 * self.momentum_squared() / self.mass_density()
    }

    pub fn magnetic_energy_density(&self) -> f64 {
        self.magnetic_field()
            .map_or(0.0, |b| 0.5 * (b[0] * b[0] + b[1] * b[1] + b[2] * b[2]))
    }

    /// Total energy less the kinetic and magnetic parts, if the gas is
    /// adiabatic.
    ///
    pub fn internal_energy_density(&self) -> Option<f64> {
        self.energy_density()
            .map(|e| e - self.kinetic_energy_density() - self.magnetic_energy_density())
    }
}

/// Add `velocity * density` to the azimuthal momentum of a cell, and adjust
/// the total energy (if present) by the change in kinetic energy, so the
/// internal and magnetic energies are unchanged. This is the frame boost
/// applied to material crossing a radial shearing-sheet boundary: the two
/// sides of the box move relative to one another with the velocity `q Ω
/// Lx`.
///
pub fn boost_azimuthal_momentum(layout: &FieldLayout, cons: &mut [f64], velocity: f64) {
    let d = cons[FieldLayout::DENSITY];
    let m2 = cons[FieldLayout::MOMENTUM_2];
    let m2_boosted = m2 + velocity * d;

    cons[FieldLayout::MOMENTUM_2] = m2_boosted;

    if let Some(e) = layout.energy() {
        cons[e] += 0.5 * (m2_boosted * m2_boosted - m2 * m2) / d;
    }
}




// ============================================================================
#[cfg(test)]
mod test {

    use super::{boost_azimuthal_momentum, ConservedRef};
    use crate::hydro::FieldLayout;
    use approx::assert_relative_eq;

    fn mhd_layout() -> FieldLayout {
        FieldLayout {
            adiabatic: true,
            magnetic: true,
            num_scalars: 1,
        }
    }

    #[test]
    fn boost_keeps_internal_energy() {
        let layout = mhd_layout();
        let mut u = [2.0, 0.3, -0.4, 0.1, 5.0, 0.2, 0.1, 0.5, 0.7];
        let before = ConservedRef::new(layout, &u).internal_energy_density().unwrap();

        boost_azimuthal_momentum(&layout, &mut u, 1.5);

        let after = ConservedRef::new(layout, &u);
        assert_relative_eq!(after.momentum_2(), -0.4 + 3.0, epsilon = 1e-14);
        assert_relative_eq!(after.internal_energy_density().unwrap(), before, epsilon = 1e-12);
        assert_relative_eq!(
            after.energy_density().unwrap(),
            before + 0.5 * (0.09 + 2.6 * 2.6 + 0.01) / 2.0 + after.magnetic_energy_density(),
            epsilon = 1e-12);
    }

    #[test]
    fn boost_leaves_other_fields_alone() {
        let layout = mhd_layout();
        let mut u = [2.0, 0.3, -0.4, 0.1, 5.0, 0.2, 0.1, 0.5, 0.7];
        let original = u;
        boost_azimuthal_momentum(&layout, &mut u, -0.75);

        for n in [0, 1, 3, 5, 6, 7, 8].iter() {
            assert_eq!(u[*n], original[*n]);
        }
    }

    #[test]
    fn opposite_boosts_cancel() {
        let layout = FieldLayout::euler();
        let mut u = [1.3, 0.0, 0.2, 0.0, 2.0];
        boost_azimuthal_momentum(&layout, &mut u, 0.6);
        boost_azimuthal_momentum(&layout, &mut u, -0.6);
        assert_relative_eq!(u[2], 0.2, epsilon = 1e-14);
        assert_relative_eq!(u[4], 2.0, epsilon = 1e-14);
    }

    #[test]
    fn isothermal_boost_has_no_energy() {
        let layout = FieldLayout {
            adiabatic: false,
            magnetic: false,
            num_scalars: 0,
        };
        let mut u = [1.0, 0.0, 0.0, 0.0];
        boost_azimuthal_momentum(&layout, &mut u, 0.25);
        assert_eq!(u, [1.0, 0.0, 0.25, 0.0]);
        assert!(ConservedRef::new(layout, &u).energy_density().is_none());
    }
}

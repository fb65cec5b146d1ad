use serde::{Deserialize, Serialize};
use super::conserved::ConservedRef;
use super::error::Error;
use super::layout::FieldLayout;




#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]


/**
 * The gas equation of state. An isothermal gas carries no energy field; a
 * gamma-law gas does. In configuration files it is written as an inline
 * table, e.g. `{ kind = "gamma-law", gamma_law_index = 1.6667 }`.
 */
pub enum EquationOfState {
    Isothermal { sound_speed: f64 },
    GammaLaw { gamma_law_index: f64 },
}




// ============================================================================
impl EquationOfState {

    /**
     * Return the field layout this equation of state implies for a fluid
     * with the given magnetization and number of passive scalars.
     */
    pub fn layout(&self, magnetic: bool, num_scalars: usize) -> FieldLayout {
        FieldLayout {
            adiabatic: matches!(self, EquationOfState::GammaLaw { .. }),
            magnetic,
            num_scalars,
        }
    }

    pub fn sound_speed(&self, mass_density: f64, gas_pressure: f64) -> f64 {
        match *self {
            EquationOfState::Isothermal { sound_speed } => sound_speed,
            EquationOfState::GammaLaw { gamma_law_index } => {
                (gamma_law_index * gas_pressure / mass_density).sqrt()
            }
        }
    }

    /**
     * Return `gamma - 1`, which relates internal energy density to gas
     * pressure. An isothermal gas has no energy field to relate.
     */
    pub fn gamma_law_index_minus_one(&self) -> Result<f64, Error> {
        match *self {
            EquationOfState::GammaLaw { gamma_law_index } => Ok(gamma_law_index - 1.0),
            EquationOfState::Isothermal { .. } => Err(Error::IsothermalEnergy),
        }
    }
}




/**
 * Convert the conserved state of one cell to primitive variables: mass
 * density, velocity, gas pressure (gamma-law gas only), magnetic field, and
 * specific scalars.
 */
pub fn cons_to_prim(layout: &FieldLayout, eos: &EquationOfState, cons: &[f64], prim: &mut [f64]) -> Result<(), Error> {
    let u = ConservedRef::new(*layout, cons);
    let d = u.mass_density();

    if !(d > 0.0) {
        return Err(Error::NonPositiveMassDensity(d));
    }

    prim[FieldLayout::DENSITY] = d;
    prim[FieldLayout::MOMENTUM_1] = u.momentum_1() / d;
    prim[FieldLayout::MOMENTUM_2] = u.momentum_2() / d;
    prim[FieldLayout::MOMENTUM_3] = u.momentum_3() / d;

    if let (Some(n), Some(et)) = (layout.energy(), u.internal_energy_density()) {
        let pg = et * eos.gamma_law_index_minus_one()?;
        if pg < 0.0 {
            return Err(Error::NegativeGasPressure(pg));
        }
        prim[n] = pg;
    }
    if let Some(n) = layout.magnetic_field() {
        prim[n..n + 3].copy_from_slice(&cons[n..n + 3]);
    }
    for s in 0..layout.num_scalars {
        let n = layout.scalar(s);
        prim[n] = cons[n] / d;
    }
    Ok(())
}




/**
 * Convert primitive variables of one cell to the conserved state. This is
 * the inverse of `cons_to_prim`.
 */
pub fn prim_to_cons(layout: &FieldLayout, eos: &EquationOfState, prim: &[f64], cons: &mut [f64]) -> Result<(), Error> {
    let d = prim[FieldLayout::DENSITY];
    let v1 = prim[FieldLayout::MOMENTUM_1];
    let v2 = prim[FieldLayout::MOMENTUM_2];
    let v3 = prim[FieldLayout::MOMENTUM_3];

    cons[FieldLayout::DENSITY] = d;
    cons[FieldLayout::MOMENTUM_1] = d * v1;
    cons[FieldLayout::MOMENTUM_2] = d * v2;
    cons[FieldLayout::MOMENTUM_3] = d * v3;

    if let Some(n) = layout.magnetic_field() {
        cons[n..n + 3].copy_from_slice(&prim[n..n + 3]);
    }
    if let Some(n) = layout.energy() {
        let p = prim[n];
        let eb = layout
            .magnetic_field()
            .map_or(0.0, |b| 0.5 * (prim[b] * prim[b] + prim[b + 1] * prim[b + 1] + prim[b + 2] * prim[b + 2]));
        cons[n] = p / eos.gamma_law_index_minus_one()? + 0.5 * d * (v1 * v1 + v2 * v2 + v3 * v3) + eb;
    }
    for s in 0..layout.num_scalars {
        let n = layout.scalar(s);
        cons[n] = prim[n] * d;
    }
    Ok(())
}




// ============================================================================
#[cfg(test)]
mod test {

    use super::{cons_to_prim, prim_to_cons, EquationOfState};
    use crate::hydro::{Error, FieldLayout};
    use approx::assert_relative_eq;

    const EOS: EquationOfState = EquationOfState::GammaLaw { gamma_law_index: 5.0 / 3.0 };

    #[test]
    fn primitive_conversion_inverts() {
        let layout = EOS.layout(true, 1);
        let prim = [1.5, 0.1, -0.2, 0.3, 0.8, 0.01, 0.02, 0.4, 0.25];
        let mut cons = [0.0; 9];
        let mut back = [0.0; 9];

        prim_to_cons(&layout, &EOS, &prim, &mut cons).unwrap();
        cons_to_prim(&layout, &EOS, &cons, &mut back).unwrap();

        for (a, b) in prim.iter().zip(back.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    fn negative_pressure_is_reported() {
        let layout = FieldLayout::euler();
        let cons = [1.0, 2.0, 0.0, 0.0, 1.0];
        let mut prim = [0.0; 5];
        match cons_to_prim(&layout, &EOS, &cons, &mut prim) {
            Err(Error::NegativeGasPressure(p)) => assert!(p < 0.0),
            other => panic!("expected negative pressure, got {:?}", other),
        }
    }

    #[test]
    fn isothermal_layout_has_no_pressure() {
        let eos = EquationOfState::Isothermal { sound_speed: 0.5 };
        let layout = eos.layout(false, 0);
        let cons = [2.0, 1.0, -1.0, 0.5];
        let mut prim = [0.0; 4];
        cons_to_prim(&layout, &eos, &cons, &mut prim).unwrap();
        assert_eq!(prim, [2.0, 0.5, -0.5, 0.25]);
        assert_eq!(eos.sound_speed(2.0, 123.0), 0.5);
    }

    #[test]
    fn empty_cells_are_rejected() {
        let layout = FieldLayout::euler();
        let mut prim = [0.0; 5];
        assert_eq!(cons_to_prim(&layout, &EOS, &[0.0; 5], &mut prim), Err(Error::NonPositiveMassDensity(0.0)));
        assert!(prim.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn isothermal_gas_has_no_energy_to_convert() {
        let eos = EquationOfState::Isothermal { sound_speed: 0.5 };
        let layout = FieldLayout::euler();
        let mut cons = [0.0; 5];
        let mut prim = [0.0; 5];
        assert_eq!(prim_to_cons(&layout, &eos, &[1.0, 0.0, 0.0, 0.0, 1.0], &mut cons), Err(Error::IsothermalEnergy));
        assert_eq!(cons_to_prim(&layout, &eos, &[1.0, 0.0, 0.0, 0.0, 1.0], &mut prim), Err(Error::IsothermalEnergy));
    }
}

use std::f64::consts::PI;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use crate::error::Error;
use crate::grid::Grid;
use crate::hydro::{euler::prim_to_cons, ConservedRef, EquationOfState, FieldLayout};
use crate::mesh::Mesh;
use crate::shear::ShearingSheet;




/// The background state of the sheet: uniform density and a cold gas, so
/// that the flow is dominated by the orbital shear.
const DENSITY: f64 = 1.0;
const PRESSURE: f64 = 1e-6;




/**
 * The perturbation laid on top of the background shear flow.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Perturbation {
    /// Seeded white noise in the pressure (or density, for an isothermal
    /// gas) and in each velocity component.
    Random,
    /// A uniform radial velocity, which launches an epicyclic oscillation.
    Epicyclic,
    /// A vortical shearing wave with a given number of wavelengths per box
    /// on each of the two horizontal axes.
    ShearingWave,
}




/**
 * The initial vertical magnetic field, for magnetized layouts.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldGeometry {
    ZeroNetFlux,
    Uniform,
}




/**
 * Initial conditions for the local shearing-sheet calculations of Hawley,
 * Gammie & Balbus (1995): a uniform, cold background moving with the linear
 * shear flow `v2 = -q Ω x1`, plus a perturbation and, in MHD, a weak
 * vertical field of plasma beta `beta`.
 */
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hgb {
    pub omega: f64,
    pub shear_parameter: f64,
    pub perturbation: Perturbation,
    pub amplitude: f64,
    pub beta: Option<f64>,
    pub field: FieldGeometry,
    pub waves_x: i64,
    pub waves_y: i64,
    pub seed: u64,
}

impl Default for Hgb {
    fn default() -> Self {
        Self {
            omega: 1e-3,
            shear_parameter: 1.5,
            perturbation: Perturbation::Random,
            amplitude: 0.0,
            beta: None,
            field: FieldGeometry::ZeroNetFlux,
            waves_x: 1,
            waves_y: 1,
            seed: 1,
        }
    }
}




// ============================================================================
impl Hgb {

    pub fn sheet(&self) -> ShearingSheet {
        ShearingSheet {
            omega: self.omega,
            shear_parameter: self.shear_parameter,
        }
    }

    /**
     * Check the problem parameters against the mesh and fluid they are to be
     * used with.
     */
    pub fn validate(&self, mesh: &Mesh, layout: &FieldLayout) -> Result<(), Error> {
        if mesh.size.1 == 1 {
            return Err(Error::AzimuthalExtent(mesh.size.1))
        }
        if !self.omega.is_finite() || !self.shear_parameter.is_finite() {
            return Err(Error::Config("omega and shear_parameter must be finite".to_string()))
        }
        if self.perturbation == Perturbation::ShearingWave && self.waves_y == 0 {
            return Err(Error::Config("a shearing wave needs a non-zero azimuthal wave number".to_string()))
        }
        if layout.magnetic {
            match self.beta {
                Some(beta) if beta > 0.0 => {}
                Some(beta) => return Err(Error::Config(format!("plasma beta must be positive (got {})", beta))),
                None => return Err(Error::Config("a magnetized problem needs a plasma beta".to_string())),
            }
        }
        Ok(())
    }

    /**
     * Generate the initial grid. The interior is filled from the primitive
     * state at each cell center; ghost cells are left empty for the boundary
     * routines to fill. Random perturbations are drawn from a generator
     * seeded with `seed`, in cell order, so a given configuration always
     * yields the same grid.
     */
    pub fn generate(&self, mesh: Mesh, eos: &EquationOfState, layout: FieldLayout, num_guard: usize) -> Result<Grid, Error> {
        self.validate(&mesh, &layout)?;

        if layout.adiabatic != matches!(eos, EquationOfState::GammaLaw { .. }) {
            return Err(Error::Config("the equation of state does not match the field layout".to_string()))
        }

        let (lx, ly, _) = mesh.extent();
        let kx = 2.0 * PI / lx;
        let ky = 2.0 * PI / ly;
        let fkx = kx * self.waves_x as f64;
        let fky = ky * self.waves_y as f64;
        let b0 = self.beta.map_or(0.0, |beta| (2.0 * PRESSURE / beta).sqrt());
        let sheet = self.sheet();

        let amp = match self.perturbation {
            Perturbation::Random => self.amplitude,
            Perturbation::Epicyclic | Perturbation::ShearingWave => {
                self.amplitude * eos.sound_speed(DENSITY, PRESSURE)
            }
        };

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut prim = vec![0.0; layout.num_fields()];
        let mut status = Ok(());

        let grid = Grid::from_function(mesh, layout, num_guard, |_, (x1, x2, _), cons| {
            let (d, p, v) = match self.perturbation {
                Perturbation::Random => {
                    let mut noise = || amp * (rng.gen::<f64>() - 0.5);
                    let r = noise();
                    let (d, p) = if layout.adiabatic {
                        (DENSITY, PRESSURE * (1.0 + 2.0 * r))
                    } else {
                        (DENSITY * (1.0 + 2.0 * r), PRESSURE)
                    };
                    let s = 0.4 * (PRESSURE / DENSITY).sqrt();
                    (d, p, [s * noise(), s * noise(), s * noise()])
                }
                Perturbation::Epicyclic => {
                    (DENSITY * (1.0 + 0.1 * (kx * x1).sin()), PRESSURE, [amp, 0.0, 0.0])
                }
                Perturbation::ShearingWave => {
                    let phase = (fkx * x1 + fky * x2).sin();
                    (DENSITY, PRESSURE, [amp * phase, -amp * (fkx / fky) * phase, 0.0])
                }
            };

            prim[FieldLayout::DENSITY] = d;
            prim[FieldLayout::MOMENTUM_1] = v[0];
            prim[FieldLayout::MOMENTUM_2] = v[1] + sheet.background_velocity(x1);
            prim[FieldLayout::MOMENTUM_3] = v[2];

            if let Some(n) = layout.energy() {
                prim[n] = p;
            }
            if let Some(n) = layout.magnetic_field() {
                let bz = match self.field {
                    FieldGeometry::ZeroNetFlux => b0 * (kx * x1).sin(),
                    FieldGeometry::Uniform => b0,
                };
                prim[n..n + 3].copy_from_slice(&[0.0, 0.0, bz]);
            }
            if let Err(e) = prim_to_cons(&layout, eos, &prim, cons) {
                status = Err(e);
            }
        })?;
        status?;
        Ok(grid)
    }
}




/**
 * Return the azimuthal velocity of a cell relative to the background shear
 * flow, `M2 / d + q Ω x1`.
 */
pub fn delta_vy(sheet: &ShearingSheet, layout: &FieldLayout, cons: &[f64], x1: f64) -> f64 {
    let u = ConservedRef::new(*layout, cons);
    u.momentum_2() / u.mass_density() - sheet.background_velocity(x1)
}




/**
 * Return the largest magnitude of `delta_vy` over the interior of a grid.
 */
pub fn max_delta_vy(sheet: &ShearingSheet, grid: &Grid) -> f64 {
    grid.interior()
        .iter()
        .map(|index| {
            let (x1, _, _) = grid.mesh().cell_center(index);
            delta_vy(sheet, grid.layout(), grid.get_slice(index), x1).abs()
        })
        .fold(0.0, f64::max)
}

use serde::{Deserialize, Serialize};
use crate::mesh::Mesh;




/**
 * Parameters of a local shearing sheet: the orbital frequency `omega` of the
 * corotating frame and the dimensionless shear rate `q = -d ln Ω / d ln r`,
 * which is 3/2 for a Keplerian disk. The background flow is `v2 = -q Ω x1`.
 */
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShearingSheet {
    pub omega: f64,
    #[serde(default = "ShearingSheet::keplerian_shear")]
    pub shear_parameter: f64,
}




// ============================================================================
impl ShearingSheet {

    pub fn keplerian(omega: f64) -> Self {
        Self {
            omega,
            shear_parameter: Self::keplerian_shear(),
        }
    }

    fn keplerian_shear() -> f64 {
        1.5
    }

    /**
     * Return the relative azimuthal velocity `q Ω Lx` of the two radial
     * boundaries of a box of radial size `lx`.
     */
    pub fn shear_velocity(&self, lx: f64) -> f64 {
        self.shear_parameter * self.omega * lx
    }

    /**
     * Return the background azimuthal velocity at radial position `x1`.
     */
    pub fn background_velocity(&self, x1: f64) -> f64 {
        -self.shear_parameter * self.omega * x1
    }

    /**
     * Return the azimuthal displacement accumulated between the two radial
     * boundaries at time `t`, reduced into `[0, ly)`.
     */
    pub fn displacement(&self, lx: f64, ly: f64, time: f64) -> f64 {
        (self.shear_velocity(lx) * time).rem_euclid(ly)
    }
}




/**
 * The azimuthal shift between the two radial boundaries at a given time,
 * split into a whole number of cells and a fractional remainder in `[0, 1)`.
 */
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShearOffset {
    pub cells: i64,
    pub fraction: f64,
}

impl ShearOffset {

    pub fn at_time(sheet: &ShearingSheet, mesh: &Mesh, time: f64) -> Self {
        let (lx, ly, _) = mesh.extent();
        let (_, dy, _) = mesh.cell_spacing();
        let x = sheet.displacement(lx, ly, time) / dy;
        let cells = x.floor();

        Self {
            cells: wrap(cells as i64, mesh.size.1),
            fraction: (x - cells).max(0.0),
        }
    }

    /// The fractional remap applied on the inner radial face, `+fraction`.
    pub fn inner_fraction(&self) -> f64 {
        self.fraction
    }

    /// The fractional remap applied on the outer radial face, `-fraction`.
    pub fn outer_fraction(&self) -> f64 {
        -self.fraction
    }
}




/**
 * Map an azimuthal index into `0..n` periodically. Works for any index,
 * including ones more than a period away.
 */
pub fn wrap(j: i64, n: i64) -> i64 {
    j.rem_euclid(n)
}

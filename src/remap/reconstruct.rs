use std::convert::TryFrom;
use std::ops::Range;
use serde::{Deserialize, Serialize};




/**
 * A sub-cell profile of one scalar field in one cell, from which the exact
 * integral over any sub-interval of the cell can be taken. Linear profiles
 * carry a limited slope; parabolic profiles carry their two interface values
 * (the curvature follows from these and the cell mean).
 */
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Profile {
    Linear { mean: f64, slope: f64 },
    Parabolic { mean: f64, left: f64, right: f64 },
}




// ============================================================================
impl Profile {

    pub fn mean(&self) -> f64 {
        match *self {
            Profile::Linear { mean, .. } => mean,
            Profile::Parabolic { mean, .. } => mean,
        }
    }

    /**
     * Return the profile evaluated at the lower face of the cell.
     */
    pub fn left(&self) -> f64 {
        match *self {
            Profile::Linear { mean, slope } => mean - 0.5 * slope,
            Profile::Parabolic { left, .. } => left,
        }
    }

    /**
     * Return the profile evaluated at the upper face of the cell.
     */
    pub fn right(&self) -> f64 {
        match *self {
            Profile::Linear { mean, slope } => mean + 0.5 * slope,
            Profile::Parabolic { right, .. } => right,
        }
    }

    /**
     * Return the jump across the cell, `right - left`.
     */
    pub fn delta(&self) -> f64 {
        self.right() - self.left()
    }

    /**
     * Return the curvature coefficient `6 (mean - (left + right) / 2)` of the
     * parabola. It is zero for linear profiles.
     */
    pub fn curvature(&self) -> f64 {
        match *self {
            Profile::Linear { .. } => 0.0,
            Profile::Parabolic { mean, left, right } => 6.0 * (mean - 0.5 * (left + right)),
        }
    }

    pub fn is_flat(&self) -> bool {
        self.left() == self.mean() && self.right() == self.mean()
    }
}




/**
 * A strategy for building limited sub-cell profiles from cell averages. The
 * strategy sees a stencil of `2 * radius + 1` consecutive cell averages
 * centered on the cell being reconstructed. Implementations must never
 * introduce new extrema, and must fall back to a flat profile rather than
 * fail on degenerate data.
 */
pub trait Reconstruction: Send + Sync {

    /// The formal order of accuracy.
    fn order(&self) -> usize;

    /// The number of cells on either side of the center cell the stencil
    /// reads.
    fn radius(&self) -> usize;

    /// The number of padding cells a remapped column must carry on either
    /// end. Fluxes are needed one cell beyond the column, and each of those
    /// profiles reads `radius` further cells.
    fn num_guard(&self) -> usize {
        self.radius() + 1
    }

    fn profile(&self, stencil: &[f64]) -> Profile;
}




/**
 * Piecewise-linear reconstruction with a van Leer (monotonized central)
 * slope limiter.
 */
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearReconstruction;

impl Reconstruction for LinearReconstruction {
    fn order(&self) -> usize {
        2
    }

    fn radius(&self) -> usize {
        1
    }

    fn profile(&self, stencil: &[f64]) -> Profile {
        assert_eq!(stencil.len(), 3);
        let (a, b, c) = (stencil[0], stencil[1], stencil[2]);
        Profile::Linear {
            mean: b,
            slope: limited_slope(a, b, c),
        }
    }
}

fn limited_slope(a: f64, b: f64, c: f64) -> f64 {
    let dc = c - a;
    let dl = b - a;
    let dr = c - b;

    if dl * dr > 0.0 {
        dc.signum() * f64::min(0.5 * dc.abs(), 2.0 * f64::min(dl.abs(), dr.abs()))
    } else {
        0.0
    }
}




/**
 * Extremum-preserving piecewise-parabolic reconstruction, after Colella &
 * Sekora (2008) with the monotonization of Colella & Woodward (1984).
 * Interface values are fourth-order estimates whose curvature is limited
 * against the neighbouring second differences. At a local extremum the
 * parabola's curvature is limited, and the final monotonization pass
 * flattens any cell whose face values do not bracket its mean.
 */
#[derive(Clone, Copy, Debug, Default)]
pub struct ParabolicReconstruction;

impl Reconstruction for ParabolicReconstruction {
    fn order(&self) -> usize {
        3
    }

    fn radius(&self) -> usize {
        2
    }

    fn profile(&self, stencil: &[f64]) -> Profile {
        assert_eq!(stencil.len(), 5);
        let w = stencil;
        let u = w[2];
        let mut ul = interface_value(w[0], w[1], w[2], w[3]);
        let mut ur = interface_value(w[1], w[2], w[3], w[4]);

        // Limit the curvature at local extrema.
        if (ur - u) * (u - ul) <= 0.0 && (w[1] - u) * (u - w[3]) <= 0.0 {
            let d2 = -12.0 * (u - 0.5 * (ul + ur));
            let d2c = w[1] - 2.0 * u + w[3];
            let d2l = w[0] - 2.0 * w[1] + u;
            let d2r = u - 2.0 * w[3] + w[4];

            if d2 == 0.0 {
                ul = u;
                ur = u;
            } else {
                let d2lim = limited_curvature(d2, d2l, d2c, d2r);
                ul = u + (ul - u) * d2lim / d2;
                ur = u + (ur - u) * d2lim / d2;
            }
        }

        // Monotonize.
        let du = ur - ul;
        let u6 = 6.0 * (u - 0.5 * (ul + ur));

        if (ur - u) * (u - ul) <= 0.0 {
            ul = u;
            ur = u;
        } else if du * u6 > du * du {
            ul = 3.0 * u - 2.0 * ur;
        } else if du * u6 < -du * du {
            ur = 3.0 * u - 2.0 * ul;
        }

        Profile::Parabolic { mean: u, left: ul, right: ur }
    }
}

/**
 * Estimate the value at the face between `u0` and `u1`, given the cells
 * `um`, `u0`, `u1`, `up` in order, limiting its curvature against the second
 * differences centered on `u0` and `u1`.
 */
fn interface_value(um: f64, u0: f64, u1: f64, up: f64) -> f64 {
    let uh = (7.0 * (u0 + u1) - (um + up)) / 12.0;
    let d2c = 3.0 * (u0 - 2.0 * uh + u1);
    let d2l = um - 2.0 * u0 + u1;
    let d2r = u0 - 2.0 * u1 + up;
    let lim = if same_strict_sign(&[d2c, d2l, d2r]) {
        d2c.signum() * f64::min(1.25 * f64::min(d2l.abs(), d2r.abs()), d2c.abs())
    } else {
        0.0
    };
    0.5 * ((u0 + u1) - lim / 3.0)
}

fn limited_curvature(d2: f64, d2l: f64, d2c: f64, d2r: f64) -> f64 {
    if same_strict_sign(&[d2, d2l, d2c, d2r]) {
        let smallest = d2l.abs().min(d2c.abs()).min(d2r.abs());
        d2.signum() * f64::min(1.25 * smallest, d2.abs())
    } else {
        0.0
    }
}

fn same_strict_sign(values: &[f64]) -> bool {
    values.iter().all(|&x| x > 0.0) || values.iter().all(|&x| x < 0.0)
}




/**
 * The reconstruction order, as chosen in configuration files: `2` for
 * piecewise-linear, `3` for piecewise-parabolic.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum ReconstructionOrder {
    Second,
    Third,
}

impl ReconstructionOrder {
    pub fn strategy(self) -> Box<dyn Reconstruction> {
        match self {
            ReconstructionOrder::Second => Box::new(LinearReconstruction),
            ReconstructionOrder::Third => Box::new(ParabolicReconstruction),
        }
    }
}

impl Default for ReconstructionOrder {
    fn default() -> Self {
        ReconstructionOrder::Third
    }
}

impl TryFrom<u32> for ReconstructionOrder {
    type Error = String;

    fn try_from(order: u32) -> Result<Self, Self::Error> {
        match order {
            2 => Ok(ReconstructionOrder::Second),
            3 => Ok(ReconstructionOrder::Third),
            _ => Err(format!("reconstruction order must be 2 or 3 (got {})", order)),
        }
    }
}

impl From<ReconstructionOrder> for u32 {
    fn from(order: ReconstructionOrder) -> Self {
        match order {
            ReconstructionOrder::Second => 2,
            ReconstructionOrder::Third => 3,
        }
    }
}




/**
 * Reconstruct the cells in the given index range of `values`, replacing the
 * contents of `profiles`. Every cell in the range must have a full stencil
 * inside `values`.
 */
pub fn reconstruct_into(recon: &dyn Reconstruction, values: &[f64], cells: Range<usize>, profiles: &mut Vec<Profile>) {
    let r = recon.radius();

    assert!(cells.start >= r && cells.end + r <= values.len(), "stencil out of range");

    profiles.clear();
    profiles.extend(cells.map(|i| recon.profile(&values[i - r..=i + r])));
}




// ============================================================================
#[cfg(test)]
mod test {

    use std::convert::TryFrom;
    use super::*;

    fn strategies() -> Vec<Box<dyn Reconstruction>> {
        vec![Box::new(LinearReconstruction), Box::new(ParabolicReconstruction)]
    }

    fn profiles(recon: &dyn Reconstruction, values: &[f64]) -> Vec<Profile> {
        let r = recon.radius();
        let mut result = Vec::new();
        reconstruct_into(recon, values, r..values.len() - r, &mut result);
        result
    }

    #[test]
    fn uniform_data_gives_flat_profiles() {
        for recon in strategies() {
            for p in profiles(recon.as_ref(), &[1.5; 9]) {
                assert!(p.is_flat());
                assert_eq!(p.mean(), 1.5);
            }
        }
    }

    #[test]
    fn linear_data_is_reconstructed_exactly() {
        let values: Vec<f64> = (0..10).map(|i| 2.0 * i as f64 - 3.0).collect();
        for recon in strategies() {
            for p in profiles(recon.as_ref(), &values) {
                assert!((p.delta() - 2.0).abs() < 1e-12);
                assert!(p.curvature().abs() < 1e-12);
            }
        }
    }

    #[test]
    fn face_values_lie_between_neighbors_for_monotone_data() {
        let values = [0.0, 0.0, 0.1, 0.2, 1.0, 3.0, 3.1, 7.0, 7.0, 7.5, 9.0, 9.0];
        for recon in strategies() {
            let r = recon.radius();
            for (n, p) in profiles(recon.as_ref(), &values).iter().enumerate() {
                let i = n + r;
                let lo = values[i - 1];
                let hi = values[i + 1];
                assert!(p.left() >= lo - 1e-12 && p.left() <= values[i] + 1e-12);
                assert!(p.right() >= values[i] - 1e-12 && p.right() <= hi + 1e-12);
            }
        }
    }

    #[test]
    fn isolated_spike_is_flattened() {
        let values = [1.0, 1.0, 1.0, 1.0, 5.0, 1.0, 1.0, 1.0, 1.0];
        for recon in strategies() {
            for p in profiles(recon.as_ref(), &values) {
                assert!(p.is_flat());
            }
        }
    }

    #[test]
    fn quadratic_data_keeps_its_curvature() {
        let values: Vec<f64> = (0..9).map(|i| (i * i) as f64).collect();
        let p = ParabolicReconstruction.profile(&values[2..7]);
        assert!((p.left() - 73.0 / 6.0).abs() < 1e-12);
        assert!((p.right() - 121.0 / 6.0).abs() < 1e-12);
        assert!((p.curvature() + 1.0).abs() < 1e-12);

        let q = LinearReconstruction.profile(&values[3..6]);
        assert_eq!(q.curvature(), 0.0);
        assert_eq!(q.delta(), 8.0);
    }

    #[test]
    fn local_extrema_are_flattened() {
        let values: Vec<f64> = (0..9).map(|i| {
            let x = (i as f64 - 4.0) * 0.1;
            1.0 - x * x
        }).collect();
        assert!(ParabolicReconstruction.profile(&values[2..7]).is_flat());
        assert!(LinearReconstruction.profile(&values[3..6]).is_flat());
    }

    #[test]
    fn linear_slope_is_limited() {
        assert_eq!(limited_slope(0.0, 1.0, 10.0), 2.0);
        assert_eq!(limited_slope(0.0, 1.0, 2.0), 1.0);
        assert_eq!(limited_slope(0.0, 1.0, 0.5), 0.0);
    }

    #[test]
    fn order_is_read_from_integers() {
        assert_eq!(ReconstructionOrder::try_from(2), Ok(ReconstructionOrder::Second));
        assert_eq!(ReconstructionOrder::try_from(3), Ok(ReconstructionOrder::Third));
        assert!(ReconstructionOrder::try_from(4).is_err());
        assert_eq!(ReconstructionOrder::Second.strategy().num_guard(), 2);
        assert_eq!(ReconstructionOrder::Third.strategy().num_guard(), 3);
        assert_eq!(ReconstructionOrder::default().strategy().order(), 3);
    }
}

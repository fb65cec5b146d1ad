use core::ops::Range;
use serde::{Deserialize, Serialize};
use crate::index_space::{range3d, IndexSpace};

/// A uniform rectilinear structured mesh. The `x1` axis is radial, `x2` is
/// azimuthal and `x3` is vertical. Cell indexes are `(i, j, k)`, with the
/// interior spanning `0..size.0`, `0..size.1` and `0..size.2`.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub area: (Range<f64>, Range<f64>, Range<f64>),
    pub size: (i64, i64, i64),
}

impl Mesh {
    pub fn cell_spacing(&self) -> (f64, f64, f64) {
        let (lx, ly, lz) = self.extent();
        (lx / self.size.0 as f64, ly / self.size.1 as f64, lz / self.size.2 as f64)
    }

    /// Return the physical size of the domain on each axis, `(Lx, Ly, Lz)`.
    ///
    pub fn extent(&self) -> (f64, f64, f64) {
        (
            self.area.0.end - self.area.0.start,
            self.area.1.end - self.area.1.start,
            self.area.2.end - self.area.2.start,
        )
    }

    pub fn cell_center(&self, index: (i64, i64, i64)) -> (f64, f64, f64) {
        let (d0, d1, d2) = self.cell_spacing();
        let x0 = self.area.0.start + d0 * (index.0 as f64 + 0.5);
        let x1 = self.area.1.start + d1 * (index.1 as f64 + 0.5);
        let x2 = self.area.2.start + d2 * (index.2 as f64 + 0.5);
        (x0, x1, x2)
    }

    /// Return the position of the lower corner of the given cell.
    ///
    pub fn face_position(&self, index: (i64, i64, i64)) -> (f64, f64, f64) {
        let (d0, d1, d2) = self.cell_spacing();
        let x0 = self.area.0.start + d0 * index.0 as f64;
        let x1 = self.area.1.start + d1 * index.1 as f64;
        let x2 = self.area.2.start + d2 * index.2 as f64;
        (x0, x1, x2)
    }

    pub fn total_zones(&self) -> i64 {
        self.size.0 * self.size.1 * self.size.2
    }

    pub fn index_space(&self) -> IndexSpace {
        range3d(0..self.size.0, 0..self.size.1, 0..self.size.2)
    }
}




// ============================================================================
#[cfg(test)]
mod test {

    use super::Mesh;

    fn mesh() -> Mesh {
        Mesh {
            area: (-0.5..0.5, -2.0..2.0, 0.0..1.0),
            size: (10, 40, 1),
        }
    }

    #[test]
    fn cell_geometry_is_uniform() {
        let mesh = mesh();
        assert_eq!(mesh.cell_spacing(), (0.1, 0.1, 1.0));
        assert_eq!(mesh.extent(), (1.0, 4.0, 1.0));
        assert_eq!(mesh.face_position((0, 0, 0)), (-0.5, -2.0, 0.0));
        assert_eq!(mesh.cell_center((0, 0, 0)).2, 0.5);
        assert_eq!(mesh.total_zones(), 400);
    }
}

use serde::{Deserialize, Serialize};
use crate::error::{try_zeros, Error};
use crate::hydro::FieldLayout;
use crate::index_space::{Axis, IndexSpace};
use crate::mesh::Mesh;
use crate::shear::wrap;




/**
 * A grid is the cell-centered conserved state on a uniform mesh, covering the
 * interior cells plus a ghost margin of fixed width on every side. The
 * backing array holds `num_fields` values per cell, contiguous, with cells
 * ordered `i` fastest. Indexes are `(i, j, k)`; the interior spans `0..Nx1`,
 * `0..Nx2`, `0..Nx3` and ghost cells have indexes outside those ranges.
 *
 * The grid is owned by the surrounding solver. Boundary routines mutate its
 * ghost cells in place; the interior is updated by the integrator.
 */
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    mesh: Mesh,
    layout: FieldLayout,
    num_guard: usize,
    data: Vec<f64>,
}




// ============================================================================
impl Grid {


    /**
     * Create a grid with every field of every cell set to zero.
     */
    pub fn zeros(mesh: Mesh, layout: FieldLayout, num_guard: usize) -> Result<Self, Error> {
        if mesh.size.0 < 1 || mesh.size.1 < 1 || mesh.size.2 < 1 {
            return Err(Error::Config(format!("mesh has non-positive size {:?}", mesh.size)))
        }
        let len = mesh.index_space().extend_all(num_guard as i64).len() * layout.num_fields();
        let data = try_zeros(len, "grid data")?;
        Ok(Self { mesh, layout, num_guard, data })
    }


    /**
     * Generate a grid whose interior cells are set from a closure, which is
     * given the cell index and cell center, and writes the cell's conserved
     * state. Ghost cells are left at zero.
     */
    pub fn from_function<F>(mesh: Mesh, layout: FieldLayout, num_guard: usize, mut f: F) -> Result<Self, Error>
    where
        F: FnMut((i64, i64, i64), (f64, f64, f64), &mut [f64]),
    {
        let mut grid = Self::zeros(mesh, layout, num_guard)?;
        let interior = grid.interior();

        for index in interior.iter() {
            let x = grid.mesh.cell_center(index);
            f(index, x, grid.get_slice_mut(index))
        }
        Ok(grid)
    }


    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }


    pub fn layout(&self) -> &FieldLayout {
        &self.layout
    }


    pub fn num_fields(&self) -> usize {
        self.layout.num_fields()
    }


    /**
     * Return the width of the ghost margin.
     */
    pub fn num_guard(&self) -> usize {
        self.num_guard
    }


    /**
     * Return the index space of the interior cells.
     */
    pub fn interior(&self) -> IndexSpace {
        self.mesh.index_space()
    }


    /**
     * Return the index space of the interior plus the ghost margin; this is
     * the extent of the backing array.
     */
    pub fn extended(&self) -> IndexSpace {
        self.interior().extend_all(self.num_guard as i64)
    }


    /**
     * Return the state of one cell as a slice.
     */
    pub fn get_slice(&self, index: (i64, i64, i64)) -> &[f64] {
        let extended = self.validate_index(index);
        let nq = self.num_fields();
        let s = extended.offset(index) * nq;
        &self.data[s..s + nq]
    }


    /**
     * Return the state of one cell as a mutable slice.
     */
    pub fn get_slice_mut(&mut self, index: (i64, i64, i64)) -> &mut [f64] {
        let extended = self.validate_index(index);
        let nq = self.num_fields();
        let s = extended.offset(index) * nq;
        &mut self.data[s..s + nq]
    }


    /**
     * Return the sum of one field over the cells of the given index space.
     */
    pub fn total(&self, space: &IndexSpace, field: usize) -> f64 {
        space.iter().map(|index| self.get_slice(index)[field]).sum()
    }


    /**
     * Fill the ghost cells at both ends of a periodic axis from the cells one
     * period away. Every row of the extended space is filled, including
     * rows that are ghosts on the other axes, so filling `J` after the
     * radial boundaries and then `K` leaves no cell unset.
     */
    pub fn fill_periodic(&mut self, axis: Axis) {
        let n = self.interior().range(axis).end;
        let nq = self.num_fields();
        let extended = self.extended();

        for index in extended.iter() {
            let (i, j, k) = index;
            let source = match axis {
                Axis::I => (wrap(i, n), j, k),
                Axis::J => (i, wrap(j, n), k),
                Axis::K => (i, j, wrap(k, n)),
            };
            if source != index {
                let s = extended.offset(source) * nq;
                let d = extended.offset(index) * nq;
                self.data.copy_within(s..s + nq, d);
            }
        }
    }


    /**
     * Return the raw backing array.
     */
    pub fn data(&self) -> &[f64] {
        &self.data
    }


    fn validate_index(&self, index: (i64, i64, i64)) -> IndexSpace {
        let extended = self.extended();

        if !extended.contains(index) {
            let (i0, j0, k0) = extended.start();
            let (i1, j1, k1) = extended.end();
            panic!("index ({} {} {}) out of range on grid ({}..{} {}..{} {}..{})",
                index.0,
                index.1,
                index.2,
                i0, i1,
                j0, j1,
                k0, k1);
        }
        extended
    }
}




// ============================================================================
#[cfg(test)]
mod test {

    use super::Grid;
    use crate::hydro::FieldLayout;
    use crate::index_space::Axis;
    use crate::mesh::Mesh;

    fn mesh() -> Mesh {
        Mesh {
            area: (0.0..1.0, 0.0..2.0, 0.0..1.0),
            size: (4, 8, 1),
        }
    }

    #[test]
    fn grid_sampling_works() {
        let grid = Grid::from_function(mesh(), FieldLayout::euler(), 2, |(i, j, _), _, u| {
            u[0] = (i + 10 * j) as f64;
        }).unwrap();

        assert_eq!(grid.get_slice((3, 5, 0))[0], 53.0);
        assert_eq!(grid.get_slice((-2, 0, -2))[0], 0.0);
        assert_eq!(grid.data().len(), 8 * 12 * 5 * 5);
        assert_eq!(grid.total(&grid.interior(), 0), (0..8).map(|j| 4.0 * 10.0 * j as f64 + 6.0).sum::<f64>());
    }

    #[test]
    fn cell_centers_are_passed_to_setup() {
        let grid = Grid::from_function(mesh(), FieldLayout::euler(), 1, |_, x, u| {
            u[0] = x.0;
            u[1] = x.1;
        }).unwrap();
        assert_eq!(grid.get_slice((0, 0, 0))[0], 0.125);
        assert_eq!(grid.get_slice((0, 3, 0))[1], 0.875);
    }

    #[test]
    #[should_panic]
    fn out_of_range_index_panics() {
        let grid = Grid::zeros(mesh(), FieldLayout::euler(), 2).unwrap();
        grid.get_slice((6, 0, 0));
    }

    #[test]
    fn periodic_fill_reaches_the_corners() {
        let mut grid = Grid::from_function(mesh(), FieldLayout::euler(), 2, |(i, j, _), _, u| {
            u[0] = (1 + i + 10 * j) as f64;
        }).unwrap();

        // stand-in for a radial boundary: ghost rows copy the opposite edge
        for j in 0..8 {
            for l in 0..2 {
                grid.get_slice_mut((-2 + l, j, 0))[0] = 100.0 + j as f64;
                grid.get_slice_mut((4 + l, j, 0))[0] = 200.0 + j as f64;
            }
        }
        grid.fill_periodic(Axis::J);
        grid.fill_periodic(Axis::K);

        assert_eq!(grid.get_slice((2, -1, 0))[0], grid.get_slice((2, 7, 0))[0]);
        assert_eq!(grid.get_slice((2, 9, 0))[0], grid.get_slice((2, 1, 0))[0]);
        assert_eq!(grid.get_slice((-1, -2, 0))[0], 106.0);
        assert_eq!(grid.get_slice((5, 8, 0))[0], 200.0);
        assert_eq!(grid.get_slice((5, 9, 2))[0], 201.0);
        assert_eq!(grid.get_slice((3, 4, -2))[0], grid.get_slice((3, 4, 0))[0]);
        assert!(grid.extended().iter().all(|index| grid.get_slice(index)[0] > 0.0));
    }
}

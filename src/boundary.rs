use log::debug;
use crate::error::{try_zeros, Error};
use crate::grid::Grid;
use crate::hydro::boost_azimuthal_momentum;
use crate::index_space::{Axis, IndexSpace};
use crate::remap::{remap_column, Reconstruction, ReconstructionOrder};
use crate::shear::{wrap, ShearOffset, ShearingSheet};




/**
 * Identifies one of the two radial faces of a shearing box. The inner face
 * lies at the lower `x1` boundary and the outer face at the upper one.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    Inner,
    Outer,
}




// ============================================================================
impl Face {

    /**
     * Return the index space of this face's ghost cells, for the interior
     * azimuthal and vertical ranges only.
     */
    pub fn ghost_space(self, interior: &IndexSpace, num_guard: usize) -> IndexSpace {
        match self {
            Face::Inner => interior.lower_slab(num_guard as i64, Axis::I),
            Face::Outer => interior.upper_slab(num_guard as i64, Axis::I),
        }
    }

    /**
     * Return the radial index of the interior cell which supplies the given
     * ghost layer: material leaving through one face enters through the
     * other.
     */
    pub fn source_radial_index(self, ghost_i: i64, nx1: i64) -> i64 {
        match self {
            Face::Inner => ghost_i + nx1,
            Face::Outer => ghost_i - nx1,
        }
    }

    /**
     * Return the azimuthal index, inside `0..nx2`, of the cell supplying
     * the (possibly padded) azimuthal index `j` on this face, before the
     * fractional part of the offset is applied.
     */
    pub fn source_azimuthal_index(self, j: i64, offset: &ShearOffset, nx2: i64) -> i64 {
        match self {
            Face::Inner => wrap(j - offset.cells, nx2),
            Face::Outer => wrap(j + offset.cells, nx2),
        }
    }

    /**
     * Return the fractional remap, in cells, applied on this face.
     */
    pub fn fraction(self, offset: &ShearOffset) -> f64 {
        match self {
            Face::Inner => offset.inner_fraction(),
            Face::Outer => offset.outer_fraction(),
        }
    }

    /**
     * Return the azimuthal velocity added to material crossing onto this
     * face, given the relative velocity of the two faces.
     */
    pub fn boost(self, shear_velocity: f64) -> f64 {
        match self {
            Face::Inner => shear_velocity,
            Face::Outer => -shear_velocity,
        }
    }
}




/**
 * The new contents of one face's ghost cells, computed from the interior
 * but not yet written to the grid.
 */
#[derive(Clone, Debug)]
pub struct GhostSlab {
    space: IndexSpace,
    num_fields: usize,
    data: Vec<f64>,
}

impl GhostSlab {
    pub fn get_slice(&self, index: (i64, i64, i64)) -> &[f64] {
        let s = self.space.offset(index) * self.num_fields;
        &self.data[s..s + self.num_fields]
    }

    fn get_slice_mut(&mut self, index: (i64, i64, i64)) -> &mut [f64] {
        let s = self.space.offset(index) * self.num_fields;
        &mut self.data[s..s + self.num_fields]
    }

    /**
     * Copy this slab into the ghost cells of the grid.
     */
    pub fn scatter(&self, grid: &mut Grid) {
        for index in self.space.iter() {
            grid.get_slice_mut(index).copy_from_slice(self.get_slice(index))
        }
    }
}




/**
 * Applies shearing-sheet boundary conditions on the two radial faces of a
 * grid. Ghost cells on each face are filled from the interior cells on the
 * opposite face, boosted by the relative velocity of the faces, and
 * translated azimuthally by the shear offset accumulated since `t = 0`. The
 * whole-cell part of the offset is an index shift; the fractional part is a
 * conservative remap.
 */
pub struct ShearingBoundary {
    sheet: ShearingSheet,
    reconstruction: Box<dyn Reconstruction>,
}

impl ShearingBoundary {

    pub fn new(sheet: ShearingSheet, order: ReconstructionOrder) -> Self {
        Self::with_reconstruction(sheet, order.strategy())
    }

    pub fn with_reconstruction(sheet: ShearingSheet, reconstruction: Box<dyn Reconstruction>) -> Self {
        Self { sheet, reconstruction }
    }

    pub fn sheet(&self) -> &ShearingSheet {
        &self.sheet
    }

    pub fn reconstruction(&self) -> &dyn Reconstruction {
        self.reconstruction.as_ref()
    }

    /**
     * Check that the grid geometry admits shearing-sheet boundaries with
     * this reconstruction.
     */
    pub fn validate(&self, grid: &Grid) -> Result<(), Error> {
        self.validate_shape(grid.mesh().size, grid.num_guard())
    }

    /**
     * Check the sheet parameters and a grid shape, given as the interior
     * size and ghost width, before any grid is allocated.
     */
    pub fn validate_shape(&self, size: (i64, i64, i64), num_guard: usize) -> Result<(), Error> {
        let (nx1, nx2, _) = size;
        let required = self.reconstruction.num_guard();

        if !self.sheet.omega.is_finite() || !self.sheet.shear_parameter.is_finite() {
            return Err(Error::Config(format!("shearing sheet has non-finite omega {} or shear parameter {}",
                self.sheet.omega,
                self.sheet.shear_parameter)))
        }

        if nx2 <= 1 {
            return Err(Error::AzimuthalExtent(nx2))
        }
        if num_guard < required {
            return Err(Error::InsufficientGuard { required, available: num_guard })
        }
        if nx1 < num_guard as i64 {
            return Err(Error::RadialExtent { size: nx1, num_guard })
        }
        Ok(())
    }

    /**
     * Fill the radial ghost cells of both faces for the given time. Both
     * faces read only interior cells, and are computed in parallel before
     * either is written. Nothing is written if an error is returned.
     */
    pub fn apply(&self, grid: &mut Grid, time: f64) -> Result<ShearOffset, Error> {
        if !time.is_finite() {
            return Err(Error::Config(format!("shear time {} is not finite", time)))
        }
        self.validate(grid)?;

        let offset = ShearOffset::at_time(&self.sheet, grid.mesh(), time);
        let source: &Grid = grid;
        let (inner, outer) = rayon::join(
            || self.remap_face(source, Face::Inner, &offset),
            || self.remap_face(source, Face::Outer, &offset));
        let (inner, outer) = (inner?, outer?);

        inner.scatter(grid);
        outer.scatter(grid);

        debug!("shearing boundary at t={:.6e}: offset {} cells + {:.6}",
            time,
            offset.cells,
            offset.fraction);

        Ok(offset)
    }

    /**
     * Compute the new ghost cells of one face, without modifying the grid.
     * The grid geometry must already be validated.
     */
    pub fn remap_face(&self, grid: &Grid, face: Face, offset: &ShearOffset) -> Result<GhostSlab, Error> {
        let (nx1, nx2, _) = grid.mesh().size;
        let (lx, _, _) = grid.mesh().extent();
        let num_guard = grid.num_guard();
        let num_fields = grid.num_fields();
        let layout = *grid.layout();
        let boost = face.boost(self.sheet.shear_velocity(lx));
        let eps = face.fraction(offset);
        let space = face.ghost_space(&grid.interior(), num_guard);

        let padded = nx2 as usize + 2 * num_guard;
        let mut column = try_zeros(padded * num_fields, "remap buffer")?;
        let mut output = try_zeros(nx2 as usize * num_fields, "remap output")?;
        let mut slab = GhostSlab {
            num_fields,
            data: try_zeros(space.len() * num_fields, "ghost slab")?,
            space,
        };

        let ghost_i = slab.space.range(Axis::I);
        let ghost_k = slab.space.range(Axis::K);

        for k in ghost_k {
            for i in ghost_i.clone() {
                let si = face.source_radial_index(i, nx1);

                for (p, cell) in column.chunks_exact_mut(num_fields).enumerate() {
                    let j = p as i64 - num_guard as i64;
                    let sj = face.source_azimuthal_index(j, offset, nx2);
                    cell.copy_from_slice(grid.get_slice((si, sj, k)));
                    boost_azimuthal_momentum(&layout, cell, boost);
                }
                remap_column(self.reconstruction.as_ref(), &column, num_fields, num_guard, eps, &mut output)?;

                for (j, cell) in (0..nx2).zip(output.chunks_exact(num_fields)) {
                    slab.get_slice_mut((i, j, k)).copy_from_slice(cell)
                }
            }
        }
        Ok(slab)
    }
}

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use log::info;
use serde::{Deserialize, Serialize};
use crate::error::{try_zeros, Error};
use crate::grid::Grid;
use crate::hydro::{euler::cons_to_prim, EquationOfState, FieldLayout};
use crate::index_space::{Axis, IndexSpace};




/**
 * Which view of the cell state is written to a dump.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variables {
    Conserved,
    Primitive,
}

impl Default for Variables {
    fn default() -> Self {
        Variables::Conserved
    }
}

impl Variables {
    fn header(self) -> &'static str {
        match self {
            Variables::Conserved => "CONSERVED",
            Variables::Primitive => "PRIMITIVE",
        }
    }
}




/**
 * Return the cells written to a dump: the interior, optionally with the
 * ghost margin. Ghost cells are always included on the radial axis, and on
 * the other axes only if they have more than one interior cell.
 */
pub fn output_space(grid: &Grid, write_ghost_cells: bool) -> IndexSpace {
    let mut space = grid.interior();

    if write_ghost_cells {
        let ng = grid.num_guard() as i64;
        let (_, nx2, nx3) = grid.mesh().size;

        space = space.extend(ng, Axis::I);

        if nx2 > 1 {
            space = space.extend(ng, Axis::J);
        }
        if nx3 > 1 {
            space = space.extend(ng, Axis::K);
        }
    }
    space
}




/**
 * Write a grid as a legacy VTK `STRUCTURED_POINTS` file with binary cell
 * data. Values are written as big-endian 32-bit floats: density, momentum
 * (or velocity), total energy (or gas pressure) for an adiabatic gas, the
 * cell-centered magnetic field for MHD, and each passive scalar (or
 * specific scalar).
 */
pub fn write_vtk<W: Write>(
    mut writer: W,
    grid: &Grid,
    eos: &EquationOfState,
    time: f64,
    variables: Variables,
    write_ghost_cells: bool,
) -> Result<(), Error> {
    let layout = *grid.layout();
    let nq = grid.num_fields();
    let space = output_space(grid, write_ghost_cells);
    let (ni, nj, nk) = space.dim();
    let (_, nx2, nx3) = grid.mesh().size;
    let (x1, x2, x3) = grid.mesh().face_position(space.start());
    let (dx1, dx2, dx3) = grid.mesh().cell_spacing();

    let mut values = try_zeros(space.len() * nq, "vtk data")?;

    for (cell, index) in values.chunks_exact_mut(nq).zip(space.iter()) {
        match variables {
            Variables::Conserved => cell.copy_from_slice(grid.get_slice(index)),
            Variables::Primitive => cons_to_prim(&layout, eos, grid.get_slice(index), cell)?,
        }
    }

    let dimensions = if nx2 == 1 {
        (ni + 1, 1, 1)
    } else if nx3 == 1 {
        (ni + 1, nj + 1, 1)
    } else {
        (ni + 1, nj + 1, nk + 1)
    };

    writeln!(writer, "# vtk DataFile Version 2.0")?;
    writeln!(writer, "{} vars at time= {}, level= 0, domain= 0", variables.header(), c_exp(time))?;
    writeln!(writer, "BINARY")?;
    writeln!(writer, "DATASET STRUCTURED_POINTS")?;
    writeln!(writer, "DIMENSIONS {} {} {}", dimensions.0, dimensions.1, dimensions.2)?;
    writeln!(writer, "ORIGIN {} {} {} ", c_exp(x1), c_exp(x2), c_exp(x3))?;
    writeln!(writer, "SPACING {} {} {} ", c_exp(dx1), c_exp(dx2), c_exp(dx3))?;
    writeln!(writer, "CELL_DATA {} ", space.len())?;

    let conserved = variables == Variables::Conserved;

    writeln!(writer, "SCALARS density float")?;
    writeln!(writer, "LOOKUP_TABLE default")?;
    write_floats(&mut writer, &values, nq, FieldLayout::DENSITY, 1)?;

    writeln!(writer, "\nVECTORS {} float", if conserved { "momentum" } else { "velocity" })?;
    write_floats(&mut writer, &values, nq, FieldLayout::MOMENTUM_1, 3)?;

    if let Some(n) = layout.energy() {
        writeln!(writer, "\nSCALARS {} float", if conserved { "total_energy" } else { "pressure" })?;
        writeln!(writer, "LOOKUP_TABLE default")?;
        write_floats(&mut writer, &values, nq, n, 1)?;
    }
    if let Some(n) = layout.magnetic_field() {
        writeln!(writer, "\nVECTORS cell_centered_B float")?;
        write_floats(&mut writer, &values, nq, n, 3)?;
    }
    for s in 0..layout.num_scalars {
        writeln!(writer, "\nSCALARS {}[{}] float", if conserved { "scalar" } else { "specific_scalar" }, s)?;
        writeln!(writer, "LOOKUP_TABLE default")?;
        write_floats(&mut writer, &values, nq, layout.scalar(s), 1)?;
    }
    writer.flush()?;
    Ok(())
}




/**
 * Write a VTK dump to a file at the given path.
 */
pub fn write_vtk_file<P: AsRef<Path>>(
    path: P,
    grid: &Grid,
    eos: &EquationOfState,
    time: f64,
    variables: Variables,
    write_ghost_cells: bool,
) -> Result<(), Error> {
    let file = File::create(path.as_ref())?;
    write_vtk(BufWriter::new(file), grid, eos, time, variables, write_ghost_cells)?;
    info!("write {}", path.as_ref().display());
    Ok(())
}




/**
 * Return the file name of the dump with the given sequence number.
 */
pub fn dump_filename(prefix: &str, number: usize) -> String {
    format!("{}.{:04}.vtk", prefix, number)
}




fn write_floats<W: Write>(writer: &mut W, values: &[f64], nq: usize, first: usize, count: usize) -> Result<(), Error> {
    for cell in values.chunks_exact(nq) {
        for x in &cell[first..first + count] {
            writer.write_all(&(*x as f32).to_be_bytes())?;
        }
    }
    Ok(())
}




/// Format a number the way C's `%e` does: six digits after the point and an
/// exponent of at least two digits with an explicit sign.
///
fn c_exp(x: f64) -> String {
    let s = format!("{:.6e}", x);
    match s.split_once('e') {
        Some((mantissa, exponent)) => {
            let e: i32 = exponent.parse().unwrap_or(0);
            format!("{}e{}{:02}", mantissa, if e < 0 { '-' } else { '+' }, e.abs())
        }
        None => s,
    }
}

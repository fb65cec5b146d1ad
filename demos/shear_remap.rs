use clap::Parser;
use log::{info, LevelFilter};
use serde::Serialize;
use shearbox::hydro::FieldLayout;
use shearbox::index_space::Axis;
use shearbox::io::{dump_filename, write_vtk_file};
use shearbox::problem::max_delta_vy;
use shearbox::{Config, Face, Grid};
use simple_logger::SimpleLogger;




#[derive(Debug, Parser)]
#[clap(version = "0.1", author = "J. Zrake <jzrake@clemson.edu>")]
#[clap(about = "Apply shearing-sheet boundaries to an HGB setup and write VTK dumps")]
struct Opts {
    /// Path to a TOML run configuration
    #[clap(default_value = "demos/hgb.toml")]
    config: String,

    #[clap(short, long, default_value = "info")]
    log_level: LevelFilter,

    /// Write a CBOR snapshot of the final grid to this file
    #[clap(short, long, default_value = "state.cbor")]
    snapshot: String,
}




#[derive(Serialize)]


/**
 * The state written to the final snapshot
 */
struct State<'a> {
    time: f64,
    config: &'a Config,
    grid: &'a Grid,
}




fn ghost_mass(grid: &Grid, face: Face) -> f64 {
    grid.total(&face.ghost_space(&grid.interior(), grid.num_guard()), FieldLayout::DENSITY)
}




// ============================================================================
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Opts::parse();

    SimpleLogger::new().with_level(opts.log_level).init()?;

    let config = Config::load(&opts.config)?;
    let boundary = config.boundary();
    let sheet = *boundary.sheet();
    let mut grid = config.initial_grid()?;
    let mut time = 0.0;

    info!("{} with {} zones, {} ghost zones, reconstruction order {}",
        opts.config,
        grid.mesh().total_zones(),
        grid.num_guard(),
        boundary.reconstruction().order());

    // The interior is held fixed here; only the boundary clock advances.
    for (number, t) in config.output.times().enumerate() {
        time = t;
        let offset = boundary.apply(&mut grid, time)?;
        grid.fill_periodic(Axis::J);
        grid.fill_periodic(Axis::K);

        info!("t={:.4e} offset={}+{:.4} inner mass={:.6e} outer mass={:.6e} max|dVy|={:.4e}",
            time,
            offset.cells,
            offset.fraction,
            ghost_mass(&grid, Face::Inner),
            ghost_mass(&grid, Face::Outer),
            max_delta_vy(&sheet, &grid));

        write_vtk_file(
            dump_filename(&config.output.prefix, number),
            &grid,
            &config.physics.eos,
            time,
            config.output.variables,
            config.output.write_ghost_cells)?;
    }

    let file = std::fs::File::create(&opts.snapshot)?;
    let mut buffer = std::io::BufWriter::new(file);
    ciborium::ser::into_writer(&State { time, config: &config, grid: &grid }, &mut buffer)?;
    info!("write {}", opts.snapshot);

    Ok(())
}

use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::boundary::ShearingBoundary;
use crate::error::Error;
use crate::grid::Grid;
use crate::hydro::{EquationOfState, FieldLayout};
use crate::io::Variables;
use crate::mesh::Mesh;
use crate::problem::Hgb;
use crate::remap::ReconstructionOrder;




/**
 * A complete run configuration, read from a TOML file with the tables
 * `[grid]`, `[physics]`, `[problem]`, `[remap]` and `[output]`. Only the
 * first two are required.
 */
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub grid: GridConfig,
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub problem: Hgb,
    #[serde(default)]
    pub remap: RemapConfig,
    #[serde(default)]
    pub output: OutputConfig,
}




#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub lower: [f64; 3],
    pub upper: [f64; 3],
    pub size: [i64; 3],
    #[serde(default = "GridConfig::default_num_guard")]
    pub num_guard: usize,
}

impl GridConfig {
    fn default_num_guard() -> usize {
        4
    }

    pub fn mesh(&self) -> Mesh {
        Mesh {
            area: (
                self.lower[0]..self.upper[0],
                self.lower[1]..self.upper[1],
                self.lower[2]..self.upper[2],
            ),
            size: (self.size[0], self.size[1], self.size[2]),
        }
    }
}




#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    pub eos: EquationOfState,
    #[serde(default)]
    pub magnetic: bool,
    #[serde(default)]
    pub num_scalars: usize,
}

impl PhysicsConfig {
    pub fn layout(&self) -> FieldLayout {
        self.eos.layout(self.magnetic, self.num_scalars)
    }
}




#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RemapConfig {
    #[serde(default)]
    pub order: ReconstructionOrder,
}




#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub prefix: String,
    pub interval: f64,
    pub tlim: f64,
    pub variables: Variables,
    pub write_ghost_cells: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix: "hgb".to_string(),
            interval: 1.0,
            tlim: 0.0,
            variables: Variables::Conserved,
            write_ghost_cells: false,
        }
    }
}

impl OutputConfig {

    /// Return the output times `0, interval, 2 interval, ...` up to and
    /// including `tlim`.
    ///
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        let n = (self.tlim / self.interval + 1e-12).floor() as usize;
        (0..=n).map(move |i| i as f64 * self.interval)
    }
}




// ============================================================================
impl Config {

    pub fn from_toml_str(source: &str) -> Result<Self, Error> {
        let config: Config = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    /**
     * Check the parameters for consistency. Geometry that the boundary
     * engine or the problem generator reject is reported here too, so that
     * a bad configuration fails before any work is done.
     */
    pub fn validate(&self) -> Result<(), Error> {
        let g = &self.grid;

        for axis in 0..3 {
            if g.size[axis] < 1 {
                return Err(Error::Config(format!("grid size on axis {} must be positive", axis)))
            }
            if !(g.upper[axis] > g.lower[axis]) {
                return Err(Error::Config(format!("grid extent on axis {} must be positive", axis)))
            }
        }
        match self.physics.eos {
            EquationOfState::Isothermal { sound_speed } if !(sound_speed > 0.0) => {
                return Err(Error::Config("the isothermal sound speed must be positive".to_string()))
            }
            EquationOfState::GammaLaw { gamma_law_index } if !(gamma_law_index > 1.0) => {
                return Err(Error::Config("the gamma-law index must exceed 1".to_string()))
            }
            _ => {}
        }
        if !(self.output.interval > 0.0) || !self.output.tlim.is_finite() || self.output.tlim < 0.0 {
            return Err(Error::Config("output interval must be positive and tlim non-negative".to_string()))
        }
        self.problem.validate(&self.grid.mesh(), &self.physics.layout())?;

        self.boundary().validate_shape(self.grid.mesh().size, g.num_guard)
    }

    pub fn boundary(&self) -> ShearingBoundary {
        ShearingBoundary::new(self.problem.sheet(), self.remap.order)
    }

    /**
     * Generate the initial grid.
     */
    pub fn initial_grid(&self) -> Result<Grid, Error> {
        self.problem.generate(self.grid.mesh(), &self.physics.eos, self.physics.layout(), self.grid.num_guard)
    }
}

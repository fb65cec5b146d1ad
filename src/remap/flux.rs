use crate::error::{try_zeros, Error};
use crate::shear::wrap;
use super::reconstruct::{reconstruct_into, Profile, Reconstruction};




/// Return the signed integral of a profile over the sub-interval of width
/// `|eps|` (in units of the cell width) that is swept across a face when the
/// field is translated by `eps` cells. For `eps > 0` that is the strip
/// adjacent to the cell's upper face, and the result is the amount carried
/// into the next cell up. For `eps < 0` it is the strip at the lower face,
/// and the result is minus the amount carried into the cell below.
///
pub fn subcell_integral(profile: &Profile, eps: f64) -> f64 {
    if eps > 0.0 {
        match *profile {
            Profile::Linear { mean, slope } => eps * (mean + 0.5 * (1.0 - eps) * slope),
            Profile::Parabolic { right, .. } => {
                let q = 2.0 / 3.0 * eps;
                eps * (right - 0.75 * q * (profile.delta() - (1.0 - q) * profile.curvature()))
            }
        }
    } else if eps < 0.0 {
        match *profile {
            Profile::Linear { mean, slope } => eps * (mean - 0.5 * (1.0 + eps) * slope),
            Profile::Parabolic { left, .. } => {
                let q = -2.0 / 3.0 * eps;
                eps * (left + 0.75 * q * (profile.delta() + (1.0 - q) * profile.curvature()))
            }
        }
    } else {
        0.0
    }
}




/// Remap fluxes at the `n + 1` faces of a column of `n` cells, stored face
/// by face with `num_fields` values each.
///
pub struct FluxBuffer {
    num_fields: usize,
    data: Vec<f64>,
}

impl FluxBuffer {
    pub fn new(num_cells: usize, num_fields: usize) -> Result<Self, Error> {
        Ok(Self {
            num_fields,
            data: try_zeros((num_cells + 1) * num_fields, "remap flux buffer")?,
        })
    }

    pub fn get(&self, face: usize, field: usize) -> f64 {
        self.data[face * self.num_fields + field]
    }

    fn set(&mut self, face: usize, field: usize, value: f64) {
        self.data[face * self.num_fields + field] = value
    }
}




/// Translate a column of cell states by `eps` cells, with `|eps| < 1`. The
/// input `column` holds `n + 2 * num_pad` cells of `num_fields` values each;
/// the first and last `num_pad` cells are padding and only the `n` cells
/// between them are remapped. Each field is reconstructed independently and
/// the result is written to `output`, which holds `n` cells.
///
/// The change in each cell is a difference of face fluxes, so the sum of
/// each field over the `n` output cells equals its input sum less the flux
/// through the two end faces.
///
pub fn remap_column(
    recon: &dyn Reconstruction,
    column: &[f64],
    num_fields: usize,
    num_pad: usize,
    eps: f64,
    output: &mut [f64],
) -> Result<(), Error> {
    assert!(eps.abs() < 1.0, "remap offset {} is not a fraction of a cell", eps);

    if num_pad < recon.num_guard() {
        return Err(Error::InsufficientGuard { required: recon.num_guard(), available: num_pad })
    }
    let padded_len = column.len() / num_fields;
    let n = padded_len - 2 * num_pad;

    assert_eq!(output.len(), n * num_fields);

    let mut flux = FluxBuffer::new(n, num_fields)?;
    let mut values = try_zeros(padded_len, "remap column")?;
    let mut profiles = Vec::new();

    profiles
        .try_reserve_exact(n + 1)
        .map_err(|source| Error::Allocation { what: "remap profiles", source })?;

    // Cells -1..n supply the faces 0..=n on the upward sweep, and cells
    // 0..=n on the downward sweep.
    let cells = if eps > 0.0 {
        num_pad - 1..num_pad + n
    } else {
        num_pad..num_pad + n + 1
    };

    for q in 0..num_fields {
        for (v, cell) in values.iter_mut().zip(column.chunks_exact(num_fields)) {
            *v = cell[q];
        }
        reconstruct_into(recon, &values, cells.clone(), &mut profiles);

        for (face, profile) in profiles.iter().enumerate() {
            flux.set(face, q, subcell_integral(profile, eps));
        }
        for i in 0..n {
            output[i * num_fields + q] = values[i + num_pad] - (flux.get(i + 1, q) - flux.get(i, q));
        }
    }
    Ok(())
}




/// Translate a periodic sequence of cell states by `eps` cells, with `|eps|
/// < 1`. The sum of every field is preserved to round-off.
///
pub fn shift_periodic(recon: &dyn Reconstruction, values: &[f64], num_fields: usize, eps: f64) -> Result<Vec<f64>, Error> {
    let n = values.len() / num_fields;
    let pad = recon.num_guard();
    let mut column = try_zeros((n + 2 * pad) * num_fields, "periodic column")?;
    let mut output = try_zeros(n * num_fields, "periodic output")?;

    for (p, cell) in column.chunks_exact_mut(num_fields).enumerate() {
        let j = wrap(p as i64 - pad as i64, n as i64) as usize;
        cell.copy_from_slice(&values[j * num_fields..(j + 1) * num_fields]);
    }
    remap_column(recon, &column, num_fields, pad, eps, &mut output)?;
    Ok(output)
}




// ============================================================================
#[cfg(test)]
mod test {

    use std::f64::consts::TAU;
    use approx::assert_relative_eq;
    use crate::remap::reconstruct::{LinearReconstruction, ParabolicReconstruction, Profile, Reconstruction};
    use super::{remap_column, shift_periodic, subcell_integral};

    fn strategies() -> Vec<Box<dyn Reconstruction>> {
        vec![Box::new(LinearReconstruction), Box::new(ParabolicReconstruction)]
    }

    fn sample(n: usize) -> Vec<f64> {
        // two fields per cell: a bumpy profile and a step
        (0..n).flat_map(|j| {
            let x = j as f64 / n as f64;
            vec![
                1.0 + 0.5 * (TAU * x).sin() + 0.3 * (x * 37.0).cos(),
                if j < n / 3 { 2.0 } else { 0.5 },
            ]
        }).collect()
    }

    fn sum(values: &[f64], field: usize, num_fields: usize) -> f64 {
        values.iter().skip(field).step_by(num_fields).sum()
    }

    #[test]
    fn shift_conserves_every_field() {
        let values = sample(24);
        for recon in strategies() {
            for &eps in [0.3, -0.3, 0.999, -0.999, 0.5, 1e-9].iter() {
                let shifted = shift_periodic(recon.as_ref(), &values, 2, eps).unwrap();
                for q in 0..2 {
                    assert_relative_eq!(sum(&shifted, q, 2), sum(&values, q, 2), epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn zero_shift_is_the_identity() {
        let values = sample(16);
        for recon in strategies() {
            assert_eq!(shift_periodic(recon.as_ref(), &values, 2, 0.0).unwrap(), values);
        }
    }

    #[test]
    fn uniform_data_stays_uniform() {
        let values = vec![1.0, 0.0, 0.0, 0.0, 2.5].repeat(12);
        for recon in strategies() {
            let shifted = shift_periodic(recon.as_ref(), &values, 5, 0.3).unwrap();
            for (a, b) in shifted.iter().zip(values.iter()) {
                assert_relative_eq!(*a, *b, epsilon = 1e-14);
            }
        }
    }

    #[test]
    fn spike_is_split_between_two_cells() {
        let mut values = vec![1.0; 10];
        values[4] = 5.0;
        for recon in strategies() {
            let shifted = shift_periodic(recon.as_ref(), &values, 1, 0.5).unwrap();
            let mut expected = vec![1.0; 10];
            expected[4] = 3.0;
            expected[5] = 3.0;
            assert_eq!(shifted, expected);
            assert_eq!(shifted.iter().sum::<f64>(), 14.0);

            let shifted = shift_periodic(recon.as_ref(), &values, 1, -0.5).unwrap();
            let mut expected = vec![1.0; 10];
            expected[3] = 3.0;
            expected[4] = 3.0;
            assert_eq!(shifted, expected);
        }
    }

    #[test]
    fn shift_moves_a_smooth_profile() {
        let n = 64;
        let f = |x: f64| (TAU * x).sin();
        let averages: Vec<f64> = (0..n).map(|j| {
            let (a, b) = (j as f64 / n as f64, (j + 1) as f64 / n as f64);
            (-(TAU * b).cos() + (TAU * a).cos()) / TAU * n as f64
        }).collect();
        for recon in strategies() {
            let shifted = shift_periodic(recon.as_ref(), &averages, 1, 0.25).unwrap();
            for j in 8..24 {
                let x = (j as f64 + 0.5 - 0.25) / n as f64;
                assert!((shifted[j] - f(x)).abs() < 1e-2);
            }
        }
    }

    #[test]
    fn linear_and_flat_parabolic_integrals_agree() {
        let lin = Profile::Linear { mean: 2.0, slope: 0.6 };
        let par = Profile::Parabolic { mean: 2.0, left: 1.7, right: 2.3 };
        for &eps in [0.1, 0.7, -0.2, -0.9].iter() {
            assert_relative_eq!(subcell_integral(&lin, eps), subcell_integral(&par, eps), epsilon = 1e-14);
        }
        assert_eq!(subcell_integral(&lin, 0.0), 0.0);
    }

    #[test]
    fn whole_cell_integral_is_the_mean() {
        let p = Profile::Parabolic { mean: 2.0, left: 1.0, right: 2.5 };
        assert_relative_eq!(subcell_integral(&p, 1.0), 2.0, epsilon = 1e-14);
        assert_relative_eq!(subcell_integral(&p, -1.0), -2.0, epsilon = 1e-14);
    }

    #[test]
    fn short_padding_is_rejected() {
        let column = vec![1.0; 12];
        let mut output = vec![0.0; 8];
        assert!(remap_column(&ParabolicReconstruction, &column, 1, 2, 0.5, &mut output).is_err());
        assert!(remap_column(&LinearReconstruction, &column, 1, 2, 0.5, &mut output).is_ok());
    }
}

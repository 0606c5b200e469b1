//! Q-sphere points for a multi-qubit statevector.
//!
//! Basis states sit on latitude rings by Hamming weight: |0...0> at the north
//! pole, |1...1> at the south pole. Within a ring the states are spread evenly
//! in azimuth, in basis-index order, whether or not they carry weight, so a
//! point does not move when other amplitudes change.

use super::Image;
use crate::core::{StateVector, basis_label};
use std::f64::consts::PI;
use std::fmt::Write as _;

/// A basis state drawn on the q-sphere.
#[derive(Clone, Debug, PartialEq)]
pub struct SpherePoint {
    /// Basis label, MSB first.
    pub label: String,
    /// Polar angle θ ∈ [0, π].
    pub polar: f64,
    /// Azimuthal angle φ ∈ [0, 2π).
    pub azimuth: f64,
    /// Marker size; the basis-state probability.
    pub radius: f64,
    /// Amplitude phase in [0, 2π), used for marker colour.
    pub phase: f64,
}

impl SpherePoint {
    /// Cartesian position on the unit sphere.
    pub fn to_cartesian(&self) -> (f64, f64, f64) {
        (
            self.polar.sin() * self.azimuth.cos(),
            self.polar.sin() * self.azimuth.sin(),
            self.polar.cos(),
        )
    }
}

fn wrap_phase(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(2.0 * PI);
    // rem_euclid can round up to exactly 2π for tiny negative inputs.
    if wrapped >= 2.0 * PI { 0.0 } else { wrapped }
}

/// Points for every basis state whose probability exceeds `tolerance`.
pub fn qsphere_points(state: &StateVector, tolerance: f64) -> Vec<SpherePoint> {
    let n = state.num_qubits();
    let dim = state.dim();

    // Ring sizes and each state's slot within its ring.
    let mut ring_size = vec![0usize; n + 1];
    let mut slot = vec![0usize; dim];
    for (index, s) in slot.iter_mut().enumerate() {
        let weight = index.count_ones() as usize;
        *s = ring_size[weight];
        ring_size[weight] += 1;
    }

    state
        .amplitudes()
        .iter()
        .enumerate()
        .filter(|(_, amp)| amp.norm_sqr() > tolerance)
        .map(|(index, amp)| {
            let weight = index.count_ones() as usize;
            SpherePoint {
                label: basis_label(index, n),
                polar: PI * weight as f64 / n as f64,
                azimuth: 2.0 * PI * slot[index] as f64 / ring_size[weight] as f64,
                radius: amp.norm_sqr(),
                phase: wrap_phase(amp.arg()),
            }
        })
        .collect()
}

/// Text listing of the points, one per line, angles in degrees.
pub fn plot_qsphere(points: &[SpherePoint]) -> Image {
    let mut out = String::new();
    for p in points {
        let _ = writeln!(
            out,
            "|{}>  θ={:>5.1}°  φ={:>5.1}°  p={:.3}  arg={:>5.1}°",
            p.label,
            p.polar.to_degrees(),
            p.azimuth.to_degrees(),
            p.radius,
            p.phase.to_degrees()
        );
    }
    Image::from_text(&out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Result;
    use num_complex::Complex;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn bell(sign: f64) -> Result<StateVector> {
        let h = FRAC_1_SQRT_2;
        let z = Complex::new(0.0, 0.0);
        StateVector::new(vec![Complex::new(h, 0.0), z, z, Complex::new(sign * h, 0.0)])
    }

    #[test]
    fn phi_states_occupy_the_poles() -> Result<()> {
        let points = qsphere_points(&bell(1.0)?, 1e-9);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].label, "00");
        assert_eq!(points[0].polar, 0.0);
        assert_eq!(points[1].label, "11");
        assert!((points[1].polar - PI).abs() < 1e-12);
        assert!(points.iter().all(|p| (p.radius - 0.5).abs() < 1e-12));
        let (_, _, z) = points[1].to_cartesian();
        assert!((z + 1.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn negative_amplitude_has_phase_pi() -> Result<()> {
        let points = qsphere_points(&bell(-1.0)?, 1e-9);
        assert_eq!(points[0].phase, 0.0);
        assert!((points[1].phase - PI).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn equal_weight_states_spread_around_the_equator() -> Result<()> {
        let h = FRAC_1_SQRT_2;
        let z = Complex::new(0.0, 0.0);
        let psi = StateVector::new(vec![z, Complex::new(h, 0.0), Complex::new(h, 0.0), z])?;
        let points = qsphere_points(&psi, 1e-9);
        assert_eq!(points.len(), 2);
        assert!(points.iter().all(|p| (p.polar - PI / 2.0).abs() < 1e-12));
        assert_eq!(points[0].azimuth, 0.0);
        assert!((points[1].azimuth - PI).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn phase_wraps_into_range() {
        assert!((wrap_phase(-PI / 2.0) - 1.5 * PI).abs() < 1e-12);
        assert_eq!(wrap_phase(-1e-300), 0.0);
    }

    #[test]
    fn listing_has_one_line_per_point() -> Result<()> {
        let image = plot_qsphere(&qsphere_points(&bell(1.0)?, 1e-9));
        assert_eq!(image.height, 2);
        assert!(image.text_lines()[1].starts_with("|11>"));
        Ok(())
    }
}

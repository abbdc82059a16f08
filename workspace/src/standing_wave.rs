use std::f64::consts::TAU;
use ndarray as nd;
use xpde::{ grid::Boundary, wave::{ integrate_wave, WaveConfig } };

const N: usize = 64;
const STEPS: usize = 200;

fn main() -> anyhow::Result<()> {
    let len = TAU;
    let dx = len / N as f64;
    let x: nd::Array1<f64> = (0..N).map(|i| i as f64 * dx).collect();
    let psi0: nd::Array1<f64> = x.mapv(|xk| (TAU * xk / len).sin());

    for boundary in [Boundary::Periodic, Boundary::Reflective, Boundary::Fixed] {
        let config = WaveConfig::default().courant(0.8).boundary(boundary);
        let sol = integrate_wave(&psi0, dx, STEPS, &config)?;
        let e0 = sol.energy[0];
        let e1 = sol.energy[STEPS - 1];
        let amp = sol.psi.index_axis(nd::Axis(0), STEPS - 1)
            .iter()
            .fold(0.0_f64, |acc, p| acc.max(p.abs()));
        println!(
            "{:>10}: t = {:.3}, max|ψ| = {:.5}, E = {:.6} -> {:.6} ({:+.3e})",
            boundary.as_str(),
            sol.t[STEPS - 1],
            amp,
            e0,
            e1,
            (e1 - e0) / e0,
        );
    }
    Ok(())
}

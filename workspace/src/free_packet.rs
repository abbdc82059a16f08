use ndarray as nd;
use num_complex::Complex64 as C64;
use xpde::{ schrodinger::integrate_schrodinger, utils::{ wf_mean_x, wf_prob, wf_width } };

const N: usize = 2048;
const X0: f64 = -50.0;
const DX: f64 = 100.0 / N as f64;
const DT: f64 = 0.005;
const STEPS: usize = 1001;

fn main() -> anyhow::Result<()> {
    let (xc, sigma, p0, mass) = (-20.0, 1.5, 3.0, 1.0);
    let psi0: nd::Array1<C64>
        = (0..N).map(|i| X0 + i as f64 * DX)
        .map(|x| {
            C64::cis(p0 * x) * (-(x - xc).powi(2) / (4.0 * sigma * sigma)).exp()
        })
        .collect();
    let sol = integrate_schrodinger(&psi0, DX, DT, |_| 0.0, STEPS, X0, mass)?;
    let p_init = wf_prob(&psi0, DX);
    for k in (0..STEPS).step_by(200) {
        let q = sol.psi_x.row(k);
        let t = sol.t[k];
        let expected = sigma * (1.0 + (t / (2.0 * mass * sigma * sigma)).powi(2)).sqrt();
        println!(
            "t = {:5.2}: ⟨x⟩ = {:+8.4} (exp. {:+8.4}), σ = {:.5} (exp. {:.5}), ΔP = {:+.2e}",
            t,
            wf_mean_x(&sol.x, &q),
            xc + p0 * t / mass,
            wf_width(&sol.x, &q),
            expected,
            wf_prob(&q, DX) - p_init,
        );
    }
    Ok(())
}

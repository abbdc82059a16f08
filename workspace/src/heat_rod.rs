use ndarray as nd;
use xpde::{
    diffusion::{ diffusion_1d, diffusion_2d, DiffusionConfig },
    utils::max_value,
};

fn main() -> anyhow::Result<()> {
    // a rod whose conductivity doubles from one end to the other, held at 0 and
    // 1 at its ends
    let n = 41;
    let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 1.0, n);
    let dx = x[1] - x[0];
    let t0: nd::Array1<f64> = nd::Array1::zeros(n);
    let config = DiffusionConfig::default()
        .diffusion_number(5.0)
        .walls((0.0, 1.0));
    let sol = diffusion_1d(&t0, |xk| 1.0 + xk, &x, dx, 2000, &config)?;
    let last = sol.field.row(1999);
    let err = x.iter().zip(last.iter())
        .map(|(xk, tk)| (tk - (1.0 + xk).ln() / 2.0_f64.ln()).abs())
        .fold(0.0_f64, f64::max);
    println!("rod: t = {:.3}, T(½) = {:.6}, max steady-state error = {:.3e}",
        sol.t[1999], last[n / 2], err);

    // a hot square plate cooling through cold edges
    let n = 32;
    let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 1.0, n);
    let dx = x[1] - x[0];
    let t0: nd::Array2<f64> = nd::Array2::ones((n, n));
    let config = DiffusionConfig::default().diffusion_number(1.0);
    let sol = diffusion_2d(&t0, |_, _| 0.1, (&x, &x), dx, 500, &config)?;
    for k in [0, 10, 100, 499] {
        let tk = sol.field.index_axis(nd::Axis(0), k);
        println!("plate: t = {:.4}, max T = {:.6}", sol.t[k], max_value(&tk));
    }
    Ok(())
}

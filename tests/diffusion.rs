use ndarray as nd;
use xpde::{
    diffusion::{ diffusion_1d, diffusion_2d, integrate_diffusion, DiffusionConfig, Diffusivity },
    error::{ DiffusionError, DimError, GridError },
    utils::max_value,
};

#[test]
fn uniform_rod_drains_through_cold_walls() {
    let n = 50;
    let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 1.0, n);
    let dx = x[1] - x[0];
    let t0: nd::Array1<f64> = nd::Array1::ones(n);
    let d = |_: f64| 0.01;
    // at the default diffusion number, s D = 0.0025 per step and the slowest
    // mode still holds ~95% of its amplitude after 5000 steps
    let config = DiffusionConfig::default()
        .diffusion_number(200.0)
        .walls((0.0, 0.0));
    let sol = integrate_diffusion(
        &t0, Diffusivity::D1(&d), &[x], dx, 5000, &config).unwrap();
    assert_eq!(sol.field.shape(), &[5000, n]);
    assert_eq!(sol.field.index_axis(nd::Axis(0), 0), t0.view().into_dyn());
    let last = sol.field.index_axis(nd::Axis(0), 4999);
    assert!(last.iter().all(|v| v.abs() < 1e-12));
}

#[test]
fn linear_profile_between_walls() {
    let n = 21;
    let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 1.0, n);
    let dx = x[1] - x[0];
    let t0: nd::Array1<f64> = nd::Array1::zeros(n);
    let config = DiffusionConfig::default()
        .diffusion_number(2.5)
        .walls((1.0, 3.0));
    let sol = diffusion_1d(&t0, |_| 1.0, &x, dx, 3000, &config).unwrap();
    let last = sol.field.row(2999);
    assert!(x.iter().zip(last).all(|(xk, tk)| (tk - (1.0 + 2.0 * xk)).abs() < 1e-9));
    assert!((sol.t[1] - 2.5 * dx * dx).abs() < 1e-15);
}

#[test]
fn variable_diffusivity_steady_state() {
    // with D = 1 + x, the steady flux D T' is constant, so T ∝ ln(1 + x)
    let n = 41;
    let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 1.0, n);
    let dx = x[1] - x[0];
    let t0: nd::Array1<f64> = nd::Array1::zeros(n);
    let config = DiffusionConfig::default()
        .diffusion_number(5.0)
        .walls((0.0, 1.0));
    let sol = diffusion_1d(&t0, |xk| 1.0 + xk, &x, dx, 3000, &config).unwrap();
    let last = sol.field.row(2999);
    let exact = x.mapv(|xk| (1.0 + xk).ln() / 2.0_f64.ln());
    assert!(last.iter().zip(&exact).all(|(a, b)| (a - b).abs() < 1e-4));
}

// maximum and minimum of every time level in turn
fn level_extrema<D>(field: &nd::Array<f64, D>) -> Vec<(f64, f64)>
where D: nd::Dimension + nd::RemoveAxis
{
    field.axis_iter(nd::Axis(0))
        .map(|tk| {
            let min = tk.iter().copied().fold(f64::INFINITY, f64::min);
            (min, max_value(&tk))
        })
        .collect()
}

#[test]
fn maximum_principle_for_small_steps() {
    let n = 30;
    let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 1.0, n);
    let dx = x[1] - x[0];
    let t0: nd::Array1<f64>
        = x.mapv(|xk| if (0.4..0.6).contains(&xk) { 1.0 } else { 0.0 });
    let sol = diffusion_1d(&t0, |_| 1.0, &x, dx, 400, &DiffusionConfig::default())
        .unwrap();
    let ext = level_extrema(&sol.field);
    assert!((ext[0].1 - 1.0).abs() < 1e-15);
    for w in ext.windows(2) {
        assert!(w[1].1 <= w[0].1 + 1e-12);
        assert!(w[1].0 >= -1e-12);
    }
    assert!(ext[399].1 < 0.5);
}

#[test]
fn maximum_principle_for_small_steps_2d() {
    let n = 20;
    let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 1.0, n);
    let dx = x[1] - x[0];
    let t0: nd::Array2<f64>
        = nd::Array2::from_shape_fn((n, n), |(i, j)| {
            let inside = |k: usize| (0.3..0.7).contains(&x[k]);
            if inside(i) && inside(j) { 1.0 } else { 0.0 }
        });
    let sol = diffusion_2d(
        &t0, |_, _| 1.0, (&x, &x), dx, 200, &DiffusionConfig::default()).unwrap();
    let ext = level_extrema(&sol.field);
    assert!((ext[0].1 - 1.0).abs() < 1e-15);
    for w in ext.windows(2) {
        assert!(w[1].1 <= w[0].1 + 1e-12);
        assert!(w[1].0 >= -1e-12);
    }
    assert!(ext[199].1 < ext[0].1);
}

#[test]
fn plate_drains_and_fills() {
    let n = 16;
    let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 1.0, n);
    let dx = x[1] - x[0];

    let t0: nd::Array2<f64> = nd::Array2::ones((n, n));
    let config = DiffusionConfig::default().diffusion_number(4.0);
    let sol = diffusion_2d(&t0, |_, _| 1.0, (&x, &x), dx, 1500, &config).unwrap();
    assert_eq!(sol.field.index_axis(nd::Axis(0), 0), t0);
    let last = sol.field.index_axis(nd::Axis(0), 1499);
    assert!(last.iter().all(|v| v.abs() < 1e-10));

    let t0: nd::Array2<f64> = nd::Array2::zeros((n, n));
    let config = config.walls((1.0, 1.0));
    let sol = diffusion_2d(&t0, |x, y| 1.0 + x * y, (&x, &x), dx, 1500, &config)
        .unwrap();
    let last = sol.field.index_axis(nd::Axis(0), 1499);
    assert!(last.iter().all(|v| (v - 1.0).abs() < 1e-10));
}

#[test]
fn walls_hold_in_two_dimensions() {
    let n = 10;
    let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 1.0, n);
    let y: nd::Array1<f64> = nd::Array1::linspace(0.0, 2.0, n + 3);
    let dx = x[1] - x[0];
    let t0: nd::Array2<f64> = nd::Array2::from_elem((n, n + 3), 5.0);
    let config = DiffusionConfig::default().walls((-1.0, 2.0));
    let sol = diffusion_2d(&t0, |_, _| 0.5, (&x, &y), dx, 20, &config).unwrap();
    for k in 1..20 {
        let tk = sol.field.index_axis(nd::Axis(0), k);
        assert!(tk.column(0).iter().skip(1).take(n - 2).all(|v| *v == -1.0));
        assert!(tk.column(n + 2).iter().skip(1).take(n - 2).all(|v| *v == 2.0));
        assert!(tk.row(0).iter().all(|v| *v == -1.0));
        assert!(tk.row(n - 1).iter().all(|v| *v == 2.0));
    }
}

#[test]
fn invalid_calls_are_rejected() {
    let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 1.0, 3);
    let t0: nd::Array1<f64> = nd::Array1::zeros(3);
    let config = DiffusionConfig::default();
    assert!(matches!(
        diffusion_1d(&t0, |_| 1.0, &x, 0.5, 10, &config),
        Err(DiffusionError::Grid(GridError::TooSmall(4, 3))),
    ));

    let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 1.0, 6);
    let t0: nd::Array1<f64> = nd::Array1::zeros(6);
    assert!(matches!(
        diffusion_1d(&t0, |_| -1.0, &x, 0.2, 10, &config),
        Err(DiffusionError::BadDiffusivity(..)),
    ));
    assert!(matches!(
        diffusion_1d(&t0, |_| 1.0, &x, 0.2, 10, &config.diffusion_number(-0.1)),
        Err(DiffusionError::BadDiffusionNumber(_)),
    ));
    assert!(matches!(
        diffusion_1d(&t0, |_| 1.0, &x.slice(nd::s![..5]), 0.2, 10, &config),
        Err(DiffusionError::Shape(_)),
    ));

    let t0: nd::Array3<f64> = nd::Array3::zeros((5, 5, 5));
    let d = |_: f64, _: f64| 1.0;
    assert!(matches!(
        integrate_diffusion(&t0, Diffusivity::D2(&d), &[], 0.2, 10, &config),
        Err(DiffusionError::Dim(DimError(3))),
    ));
    let t0: nd::Array2<f64> = nd::Array2::zeros((5, 5));
    assert!(matches!(
        integrate_diffusion(&t0, Diffusivity::D2(&d), &[x], 0.2, 10, &config),
        Err(DiffusionError::Coordinates(2, 1)),
    ));
}

use std::f64::consts::TAU;
use ndarray as nd;
use xpde::{
    error::{ DimError, WaveError },
    grid::Boundary,
    wave::{ integrate_wave, wave_1d, wave_2d, WaveConfig },
};

fn sine(n: usize, len: f64) -> (nd::Array1<f64>, f64) {
    let dx = len / n as f64;
    ((0..n).map(|i| (TAU * i as f64 * dx / len).sin()).collect(), dx)
}

#[test]
fn periodic_sine_keeps_its_energy() {
    let len = TAU;
    let (psi0, dx) = sine(64, len);
    let config = WaveConfig::default().boundary(Boundary::Periodic);
    let sol = integrate_wave(&psi0, dx, 200, &config).unwrap();
    assert_eq!(sol.psi.shape(), &[200, 64]);
    assert_eq!(sol.psi.index_axis(nd::Axis(0), 0), psi0.into_dyn());
    let (e0, e1) = (sol.energy[0], sol.energy[199]);
    assert!(e0 > 0.0);
    assert!((e1 - e0).abs() < 0.01 * e0);
}

#[test]
fn subunit_courant_is_slightly_dissipative() {
    let (psi0, dx) = sine(64, TAU);
    let config = WaveConfig::default().courant(0.8);
    let sol = wave_1d(&psi0, dx, 200, &config).unwrap();
    let (e0, e1) = (sol.energy[0], sol.energy[199]);
    assert!(e1 <= e0 * (1.0 + 1e-12));
    assert!((e1 - e0).abs() < 0.01 * e0);
    assert!((sol.t[1] - 0.8 * dx).abs() < 1e-15);
}

#[test]
fn standing_wave_returns_after_one_period() {
    // a standing wave released from rest has period L / c
    let len = TAU;
    let (psi0, dx) = sine(64, len);
    let config = WaveConfig::default().speed(2.0);
    // one period is 64 steps of dt = dx / c
    let steps = 65;
    let sol = wave_1d(&psi0, dx, steps, &config).unwrap();
    let last = sol.psi.row(steps - 1);
    assert!(last.iter().zip(&psi0).all(|(a, b)| (a - b).abs() < 1e-2));
    let half = sol.psi.row((steps - 1) / 2);
    assert!(half.iter().zip(&psi0).all(|(a, b)| (a + b).abs() < 1e-2));
}

#[test]
fn fixed_walls_never_move() {
    let n = 40;
    let dx = 1.0 / (n - 1) as f64;
    let psi0: nd::Array1<f64>
        = (0..n).map(|i| (-(i as f64 * dx - 0.3).powi(2) * 100.0).exp()).collect();
    let config = WaveConfig::default()
        .courant(0.9)
        .boundary(Boundary::Fixed)
        .initial_velocity(|p| p.mapv(|_| 1.0));
    let sol = wave_1d(&psi0, dx, 300, &config).unwrap();
    assert!(sol.psi.column(0).iter().all(|p| *p == psi0[0]));
    assert!(sol.psi.column(n - 1).iter().all(|p| *p == psi0[n - 1]));
}

#[test]
fn reflective_walls_keep_a_pulse_on_the_grid() {
    let n = 50;
    let dx = 1.0 / (n - 1) as f64;
    let psi0: nd::Array1<f64>
        = (0..n).map(|i| (-(i as f64 * dx - 0.5).powi(2) * 200.0).exp()).collect();
    let config = WaveConfig::default().boundary_token("reflective").unwrap();
    let sol = wave_1d(&psi0, dx, 200, &config).unwrap();
    let e0 = sol.energy[0];
    assert!(sol.energy.iter().all(|e| e.is_finite() && *e <= 1.5 * e0));
}

#[test]
fn periodic_mode_in_two_dimensions() {
    let n = 32;
    let dx = TAU / n as f64;
    let psi0: nd::Array2<f64>
        = nd::Array2::from_shape_fn((n, n), |(i, j)| {
            (i as f64 * dx).sin() * (j as f64 * dx).sin()
        });
    let config = WaveConfig::default().courant(0.5);
    let sol = wave_2d(&psi0, dx, 100, &config).unwrap();
    assert_eq!(sol.psi.shape(), &[100, n, n]);
    assert_eq!(sol.psi.index_axis(nd::Axis(0), 0), psi0);
    let (e0, e1) = (sol.energy[0], sol.energy[99]);
    assert!((e1 - e0).abs() < 0.05 * e0);
}

#[test]
fn two_dimensional_mode_is_stable_at_the_courant_limit() {
    let n = 32;
    let dx = TAU / n as f64;
    let psi0: nd::Array2<f64>
        = nd::Array2::from_shape_fn((n, n), |(i, j)| {
            (i as f64 * dx).sin() * (j as f64 * dx).sin()
        });
    let config = WaveConfig::default().courant(0.6);
    let steps = 1000;
    let sol = wave_2d(&psi0, dx, steps, &config).unwrap();
    let e0 = sol.energy[0];
    assert!(sol.energy.iter().all(|e| (e - e0).abs() < 0.05 * e0));
    assert!(sol.psi.iter().all(|p| p.abs() < 1.5));
}

#[test]
fn two_dimensional_pulse_stays_bounded_at_walls() {
    let n = 24;
    let dx = 1.0 / (n - 1) as f64;
    let psi0: nd::Array2<f64>
        = nd::Array2::from_shape_fn((n, n), |(i, j)| {
            let (x, y) = (i as f64 * dx - 0.5, j as f64 * dx - 0.4);
            (-(x * x + y * y) * 80.0).exp()
        });
    for boundary in [Boundary::Periodic, Boundary::Reflective, Boundary::Fixed] {
        let config = WaveConfig::default().courant(0.6).boundary(boundary);
        let sol = wave_2d(&psi0, dx, 1000, &config).unwrap();
        let e0 = sol.energy[0];
        assert!(
            sol.energy.iter().all(|e| e.is_finite() && *e <= 1.1 * e0),
            "{boundary}",
        );
    }
}

#[test]
fn three_axes_are_rejected() {
    let psi0: nd::Array3<f64> = nd::Array3::zeros((4, 4, 4));
    let res = integrate_wave(&psi0, 0.1, 10, &WaveConfig::default());
    assert!(matches!(res, Err(WaveError::Dim(DimError(3)))));
}

//! Provides split-step Fourier integration of the 1+1-dimensional
//! time-dependent Schrödinger equation (in units where ħ = 1)
//! ```text
//!   ∂ψ      1  ∂²ψ
//! i -- = - --- --- + V(x) ψ
//!   ∂t     2 m ∂x²
//! ```
//! for a time-independent potential.
//!
//! The propagator is unitary on the grid and the FFT makes the boundaries
//! periodic; there is no boundary-condition parameter.
//!
//! In all 2D arrays, the first (or zero-th) axis indexes time.

use std::f64::consts::TAU;
use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    Arr1,
    DEF_MASS,
    error::{ GridError, SchrodingerError, ShapeError },
    grid::{ time_axis, Grid1 },
    utils::FftPair,
};

pub type SResult<T> = Result<T, SchrodingerError>;

/// Configuration for the split-step integrator.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SchrodingerConfig {
    /// Coordinate of the first grid point (default: `0`).
    pub origin: f64,
    /// Particle mass (default: `1`).
    pub mass: f64,
}

impl Default for SchrodingerConfig {
    fn default() -> Self { Self { origin: 0.0, mass: DEF_MASS } }
}

impl SchrodingerConfig {
    /// Set the grid origin.
    pub fn origin(mut self, origin: f64) -> Self {
        self.origin = origin;
        self
    }

    /// Set the particle mass.
    pub fn mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }
}

/// Output of a split-step integration.
#[derive(Clone, Debug)]
pub struct SchrodingerSolution {
    /// Position-space wavefunction history, with time along axis 0.
    pub psi_x: nd::Array2<C64>,
    /// Momentum-space wavefunction history, with time along axis 0.
    pub psi_k: nd::Array2<C64>,
    /// Momentum grid.
    pub k: nd::Array1<f64>,
    /// Position grid.
    pub x: nd::Array1<f64>,
    /// Time coordinates.
    pub t: nd::Array1<f64>,
}

// All the fixed phase factors for a run, along with the FFT plans.
//
// The transforms act on a modified wavefunction
//   φ(x) = (dx / √(2π)) ψ(x) exp(-i k₀ x)
// whose unnormalized DFT is exp(i x₀ dk j) ψ̃(k[j]), so that bin `j` really
// holds the amplitude at `k[j]` rather than an aliased one.
struct Propagator {
    plans: FftPair,
    potential_half: nd::Array1<C64>,
    kinetic: nd::Array1<C64>,
    to_mod_x: nd::Array1<C64>,
    from_mod_x: nd::Array1<C64>,
    from_mod_k: nd::Array1<C64>,
}

impl Propagator {
    fn new<S>(grid: &Grid1, dt: f64, mass: f64, V: &Arr1<S>) -> Self
    where S: nd::Data<Elem = f64>
    {
        let x = grid.coords();
        let k = grid.momenta();
        let (dx, dk, k0) = (grid.dx, grid.dk(), k[0]);
        let norm = dx / TAU.sqrt();
        Self {
            plans: FftPair::new(grid.n),
            potential_half: V.mapv(|v| C64::cis(-0.5 * v * dt)),
            kinetic: k.mapv(|kj| C64::cis(-kj.powi(2) * dt / (2.0 * mass))),
            to_mod_x: x.mapv(|xj| norm * C64::cis(-k0 * xj)),
            from_mod_x: x.mapv(|xj| C64::cis(k0 * xj) / norm),
            from_mod_k: (0..grid.n)
                .map(|j| C64::cis(-grid.origin * dk * j as f64))
                .collect(),
        }
    }

    // ψ -> φ
    fn modify<S>(&self, psi: &Arr1<S>) -> nd::Array1<C64>
    where S: nd::Data<Elem = C64>
    {
        psi * &self.to_mod_x
    }

    // φ -> (ψ, ψ̃)
    fn recover(&mut self, mod_x: &nd::Array1<C64>)
        -> (nd::Array1<C64>, nd::Array1<C64>)
    {
        let psi_x = mod_x * &self.from_mod_x;
        let mut mod_k = mod_x.clone();
        self.plans.forward(&mut mod_k);
        let psi_k = mod_k * &self.from_mod_k;
        (psi_x, psi_k)
    }

    // half potential, full kinetic, half potential
    fn step(&mut self, mod_x: &mut nd::Array1<C64>) {
        *mod_x *= &self.potential_half;
        self.plans.forward(mod_x);
        *mod_x *= &self.kinetic;
        self.plans.inverse(mod_x);
        *mod_x *= &self.potential_half;
    }
}

/// Perform split-step integration for a potential already sampled on the
/// grid, for `steps` time levels (including the initial one) separated by
/// `dt`.
///
/// See also [`split_step`].
pub fn split_step_sampled<S, T>(
    psi0: &Arr1<S>,
    dx: f64,
    dt: f64,
    V: &Arr1<T>,
    steps: usize,
    config: &SchrodingerConfig,
) -> SResult<SchrodingerSolution>
where
    S: nd::Data<Elem = C64>,
    T: nd::Data<Elem = f64>,
{
    SchrodingerError::check_mass(config.mass)?;
    GridError::check_spacing(dt)?;
    GridError::check_steps(steps)?;
    let n = psi0.len();
    let grid = Grid1::new(config.origin, dx, n);
    grid.check()?;
    ShapeError::check(psi0, V)?;

    let mut prop = Propagator::new(&grid, dt, config.mass, V);
    let mut psi_x: nd::Array2<C64> = nd::Array2::zeros((steps, n));
    let mut psi_k: nd::Array2<C64> = nd::Array2::zeros((steps, n));
    let mut mod_x = prop.modify(psi0);
    let (_, psi_k0) = prop.recover(&mod_x);
    psi_x.slice_mut(nd::s![0, ..]).assign(psi0);
    psi_k.slice_mut(nd::s![0, ..]).assign(&psi_k0);
    let iter
        = psi_x.axis_iter_mut(nd::Axis(0))
        .zip(psi_k.axis_iter_mut(nd::Axis(0)))
        .skip(1);
    for (psi_x_k, psi_k_k) in iter {
        prop.step(&mut mod_x);
        let (qx, qk) = prop.recover(&mod_x);
        qx.move_into(psi_x_k);
        qk.move_into(psi_k_k);
    }
    Ok(SchrodingerSolution {
        psi_x,
        psi_k,
        k: grid.momenta(),
        x: grid.coords(),
        t: time_axis(steps, dt),
    })
}

/// Perform split-step integration for a time-independent potential `V(x)`,
/// for `steps` time levels (including the initial one) separated by `dt`.
///
/// The grid is `x[i] = config.origin + i dx`; the potential is sampled on it
/// once before the first step. Level 0 of the position-space history is `psi0`
/// as given.
///
/// ```
/// use ndarray as nd;
/// use num_complex::Complex64 as C64;
/// use xpde::{ schrodinger::{ split_step, SchrodingerConfig }, utils::wf_prob };
///
/// let n = 256;
/// let dx = 0.1;
/// let config = SchrodingerConfig::default().origin(-12.8);
/// let psi0: nd::Array1<C64> = (0..n)
///     .map(|i| -12.8 + i as f64 * dx)
///     .map(|x| C64::cis(x) * (-x * x / 2.0).exp())
///     .collect();
/// let sol = split_step(&psi0, dx, 0.01, |x| x * x / 2.0, 100, &config).unwrap();
/// let p0 = wf_prob(&sol.psi_x.row(0), dx);
/// let p1 = wf_prob(&sol.psi_x.row(99), dx);
/// assert!((p0 - p1).abs() < 1e-10);
/// ```
pub fn split_step<S, F>(
    psi0: &Arr1<S>,
    dx: f64,
    dt: f64,
    V: F,
    steps: usize,
    config: &SchrodingerConfig,
) -> SResult<SchrodingerSolution>
where
    S: nd::Data<Elem = C64>,
    F: Fn(f64) -> f64,
{
    let grid = Grid1::new(config.origin, dx, psi0.len());
    grid.check()?;
    let V: nd::Array1<f64> = grid.coords().mapv(V);
    split_step_sampled(psi0, dx, dt, &V, steps, config)
}

/// Like [`split_step`], but with the origin and mass given directly.
pub fn integrate_schrodinger<S, F>(
    psi0: &Arr1<S>,
    dx: f64,
    dt: f64,
    V: F,
    steps: usize,
    origin: f64,
    mass: f64,
) -> SResult<SchrodingerSolution>
where
    S: nd::Data<Elem = C64>,
    F: Fn(f64) -> f64,
{
    split_step(psi0, dx, dt, V, steps, &SchrodingerConfig { origin, mass })
}

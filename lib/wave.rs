//! Explicit (Lax-Wendroff) integration of the wave equation
//! ```text
//! ∂²ψ        ∂²ψ   ∂²ψ
//! --- = c² ( --- + --- )
//! ∂t²        ∂x²   ∂y²
//! ```
//! in one or two spatial dimensions.
//!
//! The second-order equation is rewritten as a first-order system in the
//! derivative fields `s = ∂ψ/∂t`, `r = c ∂ψ/∂x` and (in 2D) `l = c ∂ψ/∂y`,
//! which is advanced with a Lax-Wendroff step. The displacement is then
//! accumulated from the velocity with the trapezoidal rule. Only two time
//! levels of the derivative fields are held at any point.
//!
//! The time step is fixed by the Courant number `a` as `dt = a dx / c`. Values
//! `a > 1` (or `a > 0.6` in 2D) are accepted and will blow up.
//!
//! In all returned arrays, the first (or zero-th) axis indexes time.

use std::fmt;
use ndarray as nd;
use crate::{
    Arr1,
    Arr2,
    DEF_COURANT,
    DEF_SPEED,
    error::{ DimError, GridError, ShapeError, WaveError },
    grid::{ time_axis, wrap_next, wrap_prev, Boundary },
};

pub type WResult<T> = Result<T, WaveError>;

// three-point stencils need at least one interior point
const MIN_POINTS: usize = 3;

/// Initial velocity `∂ψ/∂t` as a function of the initial displacement.
pub type VelocityFn = Box<dyn Fn(nd::ArrayViewD<'_, f64>) -> nd::ArrayD<f64>>;

/// Initial gradient as a function of the initial displacement, grid spacing,
/// and boundary policy. Must return one component (`∂ψ/∂x`, then `∂ψ/∂y`)
/// per axis.
pub type GradientFn
    = Box<dyn Fn(nd::ArrayViewD<'_, f64>, f64, Boundary) -> Vec<nd::ArrayD<f64>>>;

/// Zero initial velocity.
pub fn zero_velocity(psi0: nd::ArrayViewD<'_, f64>) -> nd::ArrayD<f64> {
    nd::ArrayD::zeros(psi0.raw_dim())
}

// derivative of a single line of samples
fn diff_line(
    mut out: nd::ArrayViewMut1<'_, f64>,
    p: nd::ArrayView1<'_, f64>,
    dx: f64,
    boundary: Boundary,
) {
    let n = p.len();
    nd::Zip::from(out.slice_mut(nd::s![1..n - 1]))
        .and(p.slice(nd::s![2..n]))
        .and(p.slice(nd::s![0..n - 2]))
        .for_each(|ok, &pp, &pm| { *ok = (pp - pm) / (2.0 * dx); });
    match boundary {
        Boundary::Periodic => {
            out[0] = (p[1] - p[n - 1]) / (2.0 * dx);
            out[n - 1] = (p[0] - p[n - 2]) / (2.0 * dx);
        },
        Boundary::Reflective => {
            out[0] = 0.0;
            out[n - 1] = 0.0;
        },
        Boundary::Fixed => {
            out[0] = (p[1] - p[0]) / dx;
            out[n - 1] = (p[n - 1] - p[n - 2]) / dx;
        },
    }
}

/// Boundary-aware centered-difference estimate of the initial gradient.
///
/// Interior points use the centered difference. At the ends of each axis the
/// difference wraps around (periodic), vanishes (reflective), or is taken
/// one-sided (fixed).
///
/// *Panics if any axis has fewer than 3 points*.
pub fn centered_gradient(
    psi0: nd::ArrayViewD<'_, f64>,
    dx: f64,
    boundary: Boundary,
) -> Vec<nd::ArrayD<f64>> {
    (0..psi0.ndim())
        .map(|ax| {
            let mut grad: nd::ArrayD<f64> = nd::ArrayD::zeros(psi0.raw_dim());
            nd::Zip::from(grad.lanes_mut(nd::Axis(ax)))
                .and(psi0.lanes(nd::Axis(ax)))
                .for_each(|g, p| diff_line(g, p, dx, boundary));
            grad
        })
        .collect()
}

/// Configuration for the wave integrators.
///
/// The initial-velocity and initial-gradient slots are independent and default
/// to [`zero_velocity`] and [`centered_gradient`], respectively.
pub struct WaveConfig {
    /// Courant number `a = c dt / dx` (default: `1.0`).
    pub courant: f64,
    /// Wave speed `c` (default: `1.0`).
    pub speed: f64,
    /// Boundary policy (default: periodic).
    pub boundary: Boundary,
    initial_velocity: VelocityFn,
    initial_gradient: GradientFn,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            courant: DEF_COURANT,
            speed: DEF_SPEED,
            boundary: Boundary::default(),
            initial_velocity: Box::new(zero_velocity),
            initial_gradient: Box::new(centered_gradient),
        }
    }
}

impl fmt::Debug for WaveConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaveConfig")
            .field("courant", &self.courant)
            .field("speed", &self.speed)
            .field("boundary", &self.boundary)
            .finish_non_exhaustive()
    }
}

impl WaveConfig {
    /// Set the Courant number.
    pub fn courant(mut self, a: f64) -> Self {
        self.courant = a;
        self
    }

    /// Set the wave speed.
    pub fn speed(mut self, c: f64) -> Self {
        self.speed = c;
        self
    }

    /// Set the boundary policy.
    pub fn boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// Set the boundary policy from its token (`"periodic"`, `"reflective"`,
    /// or `"fixed"`).
    pub fn boundary_token(self, token: &str) -> WResult<Self> {
        let boundary: Boundary = token.parse()?;
        Ok(self.boundary(boundary))
    }

    /// Replace the initial-velocity function.
    pub fn initial_velocity<F>(mut self, f: F) -> Self
    where F: Fn(nd::ArrayViewD<'_, f64>) -> nd::ArrayD<f64> + 'static
    {
        self.initial_velocity = Box::new(f);
        self
    }

    /// Replace the initial-gradient function.
    pub fn initial_gradient<F>(mut self, f: F) -> Self
    where
        F: Fn(nd::ArrayViewD<'_, f64>, f64, Boundary) -> Vec<nd::ArrayD<f64>>
            + 'static
    {
        self.initial_gradient = Box::new(f);
        self
    }

    /// Time step `dt = a dx / c` implied by the CFL relation.
    pub fn dt(&self, dx: f64) -> f64 { self.courant * dx / self.speed }

    fn check(&self, dx: f64, steps: usize) -> WResult<()> {
        GridError::check_spacing(dx)?;
        GridError::check_steps(steps)?;
        WaveError::check_speed(self.speed)?;
        WaveError::check_courant(self.courant)?;
        Ok(())
    }
}

/// Output of a wave integration.
#[derive(Clone, Debug)]
pub struct WaveSolution<D: nd::Dimension> {
    /// Displacement history, with time along axis 0.
    pub psi: nd::Array<f64, D>,
    /// Time coordinates.
    pub t: nd::Array1<f64>,
    /// Discrete energy `½ Σ (s² + r² [+ l²]) dxᵈ` at each time level.
    pub energy: nd::Array1<f64>,
}

impl<D: nd::Dimension> WaveSolution<D> {
    fn into_dyn(self) -> WaveSolution<nd::IxDyn> {
        WaveSolution { psi: self.psi.into_dyn(), t: self.t, energy: self.energy }
    }
}

// current and next time level of the derivative fields; swapped after every
// step
#[derive(Clone, Debug)]
struct Window<T> {
    cur: T,
    next: T,
}

impl<T: Clone> Window<T> {
    fn new(init: T) -> Self { Self { next: init.clone(), cur: init } }

    fn swap(&mut self) { std::mem::swap(&mut self.cur, &mut self.next); }
}

// Lax-Wendroff update for a field `u` driven by the centered difference of a
// partner field `v`
#[inline]
fn lw(u: f64, up: f64, um: f64, vp: f64, vm: f64, a: f64) -> f64 {
    u + 0.5 * a * (vp - vm + a * (up + um - 2.0 * u))
}

// Lax-Wendroff update at a wall for a field that is even under reflection
// through the wall, when its partner is odd; `u_in` and `v_in` are the values
// one point inside, and `sgn` is +1 at the low end and -1 at the high end
#[inline]
fn lw_wall(u: f64, u_in: f64, v_in: f64, sgn: f64, a: f64) -> f64 {
    u + sgn * a * v_in + a * a * (u_in - u)
}

fn initial_fields<D>(
    psi0: nd::ArrayView<'_, f64, D>,
    dx: f64,
    config: &WaveConfig,
) -> WResult<(nd::Array<f64, D>, Vec<nd::Array<f64, D>>)>
where D: nd::Dimension
{
    let view = psi0.into_dyn();
    let ndim = view.ndim();
    let into_d = |a: nd::ArrayD<f64>| -> WResult<nd::Array<f64, D>> {
        let got = a.shape().to_vec();
        a.into_dimensionality::<D>()
            .map_err(|_| ShapeError(view.shape().to_vec(), got).into())
    };

    let s = (config.initial_velocity)(view.clone());
    ShapeError::check(&view, &s)?;
    let grad = (config.initial_gradient)(view.clone(), dx, config.boundary);
    if grad.len() != ndim {
        return Err(WaveError::GradientComponents(ndim, grad.len()));
    }
    grad.iter().try_for_each(|g| ShapeError::check(&view, g))?;

    let s = into_d(s)?;
    let grad = grad.into_iter()
        .map(|g| into_d(g).map(|g| g * config.speed))
        .collect::<WResult<Vec<_>>>()?;
    Ok((s, grad))
}

#[derive(Clone, Debug)]
struct Fields1 {
    r: nd::Array1<f64>,
    s: nd::Array1<f64>,
}

impl Fields1 {
    fn energy(&self, dx: f64) -> f64 {
        0.5 * dx * self.r.iter().zip(&self.s)
            .map(|(rk, sk)| rk.powi(2) + sk.powi(2))
            .sum::<f64>()
    }

    // impose the boundary policy on an initial state
    fn constrain(&mut self, boundary: Boundary) {
        let n = self.s.len();
        match boundary {
            Boundary::Periodic => { },
            Boundary::Reflective => {
                self.r[0] = 0.0;
                self.r[n - 1] = 0.0;
            },
            Boundary::Fixed => {
                self.s[0] = 0.0;
                self.s[n - 1] = 0.0;
            },
        }
    }
}

fn step_interior_1d(a: f64, cur: &Fields1, next: &mut Fields1) {
    let n = cur.r.len();
    let c = nd::s![1..n - 1];
    let p = nd::s![2..n];
    let m = nd::s![0..n - 2];
    nd::Zip::from(next.r.slice_mut(c))
        .and(cur.r.slice(c))
        .and(cur.r.slice(p))
        .and(cur.r.slice(m))
        .and(cur.s.slice(p))
        .and(cur.s.slice(m))
        .for_each(|rn, &r, &rp, &rm, &sp, &sm| { *rn = lw(r, rp, rm, sp, sm, a); });
    nd::Zip::from(next.s.slice_mut(c))
        .and(cur.s.slice(c))
        .and(cur.s.slice(p))
        .and(cur.s.slice(m))
        .and(cur.r.slice(p))
        .and(cur.r.slice(m))
        .for_each(|sn, &s, &sp, &sm, &rp, &rm| { *sn = lw(s, sp, sm, rp, rm, a); });
}

fn edges_periodic_1d(a: f64, cur: &Fields1, next: &mut Fields1) {
    let n = cur.r.len();
    for i in [0, n - 1] {
        let (ip, im) = (wrap_next(i, n), wrap_prev(i, n));
        next.r[i] = lw(cur.r[i], cur.r[ip], cur.r[im], cur.s[ip], cur.s[im], a);
        next.s[i] = lw(cur.s[i], cur.s[ip], cur.s[im], cur.r[ip], cur.r[im], a);
    }
}

fn edges_reflective_1d(a: f64, cur: &Fields1, next: &mut Fields1) {
    let n = cur.r.len();
    next.r[0] = 0.0;
    next.r[n - 1] = 0.0;
    next.s[0] = lw_wall(cur.s[0], cur.s[1], cur.r[1], 1.0, a);
    next.s[n - 1] = lw_wall(cur.s[n - 1], cur.s[n - 2], cur.r[n - 2], -1.0, a);
}

fn edges_fixed_1d(a: f64, cur: &Fields1, next: &mut Fields1) {
    let n = cur.r.len();
    next.s[0] = 0.0;
    next.s[n - 1] = 0.0;
    next.r[0] = lw_wall(cur.r[0], cur.r[1], cur.s[1], 1.0, a);
    next.r[n - 1] = lw_wall(cur.r[n - 1], cur.r[n - 2], cur.s[n - 2], -1.0, a);
}

fn step_1d(boundary: Boundary, a: f64, cur: &Fields1, next: &mut Fields1) {
    step_interior_1d(a, cur, next);
    match boundary {
        Boundary::Periodic => edges_periodic_1d(a, cur, next),
        Boundary::Reflective => edges_reflective_1d(a, cur, next),
        Boundary::Fixed => edges_fixed_1d(a, cur, next),
    }
}

/// Integrate the one-dimensional wave equation for `steps` time levels
/// (including the initial one) from the initial displacement `psi0`, sampled
/// with spacing `dx`.
///
/// ```
/// use std::f64::consts::TAU;
/// use ndarray as nd;
/// use xpde::{ grid::Boundary, wave::{ wave_1d, WaveConfig } };
///
/// let n = 64;
/// let dx = TAU / n as f64;
/// let psi0: nd::Array1<f64> = (0..n).map(|i| (i as f64 * dx).sin()).collect();
/// let config = WaveConfig::default().boundary(Boundary::Fixed);
/// let sol = wave_1d(&psi0, dx, 100, &config).unwrap();
/// assert_eq!(sol.psi.shape(), &[100, n]);
/// assert!(sol.psi.column(0).iter().all(|p| *p == psi0[0]));
/// ```
pub fn wave_1d<S>(psi0: &Arr1<S>, dx: f64, steps: usize, config: &WaveConfig)
    -> WResult<WaveSolution<nd::Ix2>>
where S: nd::Data<Elem = f64>
{
    config.check(dx, steps)?;
    GridError::check_shape(psi0.shape(), MIN_POINTS)?;
    let (s0, mut grad) = initial_fields(psi0.view(), dx, config)?;
    let r0 = grad.swap_remove(0);

    let a = config.courant;
    let dt = config.dt(dx);
    let boundary = config.boundary;
    let n = psi0.len();
    let mut psi: nd::Array2<f64> = nd::Array2::zeros((steps, n));
    let mut energy: nd::Array1<f64> = nd::Array1::zeros(steps);
    psi.slice_mut(nd::s![0, ..]).assign(psi0);

    let mut init = Fields1 { r: r0, s: s0 };
    init.constrain(boundary);
    energy[0] = init.energy(dx);
    let mut win = Window::new(init);
    let mut psi_k: nd::Array1<f64> = psi0.to_owned();
    let iter
        = psi.axis_iter_mut(nd::Axis(0)).skip(1)
        .zip(energy.iter_mut().skip(1));
    for (mut psi_kp1, e_kp1) in iter {
        let Window { cur, next } = &mut win;
        step_1d(boundary, a, cur, next);
        nd::Zip::from(&mut psi_k).and(&cur.s).and(&next.s)
            .for_each(|p, &s, &sn| { *p += 0.5 * dt * (s + sn); });
        psi_kp1.assign(&psi_k);
        *e_kp1 = next.energy(dx);
        win.swap();
    }
    Ok(WaveSolution { psi, t: time_axis(steps, dt), energy })
}

#[derive(Clone, Debug)]
struct Fields2 {
    r: nd::Array2<f64>,
    l: nd::Array2<f64>,
    s: nd::Array2<f64>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Field { R, L, S }

// how a field is continued one point past the end of an axis
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Ext {
    Wrap,
    // mirrored through the wall point
    Even,
    // mirrored through the wall point and negated about the wall value
    Odd,
}

impl Ext {
    // (x, y) continuations of each field under a boundary policy; a free wall
    // makes ψ even across it and a clamped wall makes it odd about its wall
    // value, and the derivative fields follow
    fn of(boundary: Boundary, field: Field) -> (Self, Self) {
        use Ext::*;
        match (boundary, field) {
            (Boundary::Periodic, _) => (Wrap, Wrap),
            (Boundary::Reflective, Field::S) => (Even, Even),
            (Boundary::Reflective, Field::R) => (Odd, Even),
            (Boundary::Reflective, Field::L) => (Even, Odd),
            (Boundary::Fixed, Field::S) => (Odd, Odd),
            (Boundary::Fixed, Field::R) => (Even, Odd),
            (Boundary::Fixed, Field::L) => (Odd, Even),
        }
    }
}

// a sample along one axis: either a grid point or `2 u[wall] - u[inside]`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Tap {
    At(usize),
    Odd(usize, usize),
}

// `k` may lie one point outside `0..n`
fn tap(k: isize, n: usize, ext: Ext) -> Tap {
    let last = n as isize - 1;
    if (0..=last).contains(&k) { return Tap::At(k as usize); }
    let lo = k < 0;
    match ext {
        Ext::Wrap => Tap::At(if lo { n - 1 } else { 0 }),
        Ext::Even => Tap::At(if lo { 1 } else { n - 2 }),
        Ext::Odd => if lo { Tap::Odd(0, 1) } else { Tap::Odd(n - 1, n - 2) },
    }
}

fn sample(u: &nd::Array2<f64>, ti: Tap, tj: Tap) -> f64 {
    let col = |i: usize| -> f64 {
        match tj {
            Tap::At(j) => u[[i, j]],
            Tap::Odd(w, k) => 2.0 * u[[i, w]] - u[[i, k]],
        }
    };
    match ti {
        Tap::At(i) => col(i),
        Tap::Odd(w, k) => 2.0 * col(w) - col(k),
    }
}

impl Fields2 {
    fn energy(&self, dx: f64) -> f64 {
        let mut acc = 0.0;
        nd::Zip::from(&self.r).and(&self.l).and(&self.s)
            .for_each(|r, l, s| { acc += r.powi(2) + l.powi(2) + s.powi(2); });
        0.5 * dx.powi(2) * acc
    }

    fn get(&self, field: Field) -> &nd::Array2<f64> {
        match field {
            Field::R => &self.r,
            Field::L => &self.l,
            Field::S => &self.s,
        }
    }

    fn constrain(&mut self, boundary: Boundary) {
        let (nx, ny) = self.s.dim();
        match boundary {
            Boundary::Periodic => { },
            Boundary::Reflective => {
                self.r.row_mut(0).fill(0.0);
                self.r.row_mut(nx - 1).fill(0.0);
                self.l.column_mut(0).fill(0.0);
                self.l.column_mut(ny - 1).fill(0.0);
            },
            Boundary::Fixed => {
                for (i, j) in border(nx, ny) { self.s[[i, j]] = 0.0; }
            },
        }
    }
}

// Lax-Wendroff update of (r, l, s) at a single point, reading neighbors at
// offsets (di, dj) through `at`; r and l pick up the mixed-derivative terms
// from r_tt = c² (r_xx + l_xy) and l_tt = c² (l_yy + r_xy)
#[inline]
fn update_point<F>(at: F, a: f64) -> (f64, f64, f64)
where F: Fn(Field, isize, isize) -> f64
{
    use Field::*;
    let cross = |f: Field| -> f64 {
        0.125 * a * a * (at(f, 1, 1) - at(f, 1, -1) - at(f, -1, 1) + at(f, -1, -1))
    };
    let r = lw(at(R, 0, 0), at(R, 1, 0), at(R, -1, 0), at(S, 1, 0), at(S, -1, 0), a)
        + cross(L);
    let l = lw(at(L, 0, 0), at(L, 0, 1), at(L, 0, -1), at(S, 0, 1), at(S, 0, -1), a)
        + cross(R);
    let s0 = at(S, 0, 0);
    let s = s0 + 0.5 * a * (
        at(R, 1, 0) - at(R, -1, 0) + at(L, 0, 1) - at(L, 0, -1)
        + a * (
            at(S, 1, 0) + at(S, -1, 0) + at(S, 0, 1) + at(S, 0, -1)
            - 4.0 * s0
        )
    );
    (r, l, s)
}

// all points on the edge of an `nx`×`ny` grid, each visited once
fn border(nx: usize, ny: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..ny).flat_map(move |j| [(0, j), (nx - 1, j)])
        .chain((1..nx - 1).flat_map(move |i| [(i, 0), (i, ny - 1)]))
}

fn offset(k: usize, d: isize) -> usize { (k as isize + d) as usize }

fn step_interior_2d(a: f64, cur: &Fields2, next: &mut Fields2) {
    let (nx, ny) = cur.s.dim();
    for i in 1..nx - 1 {
        for j in 1..ny - 1 {
            let at = |f: Field, di: isize, dj: isize| -> f64 {
                cur.get(f)[[offset(i, di), offset(j, dj)]]
            };
            let (r, l, s) = update_point(at, a);
            next.r[[i, j]] = r;
            next.l[[i, j]] = l;
            next.s[[i, j]] = s;
        }
    }
}

fn step_edges_2d(boundary: Boundary, a: f64, cur: &Fields2, next: &mut Fields2) {
    let (nx, ny) = cur.s.dim();
    for (i, j) in border(nx, ny) {
        let at = |f: Field, di: isize, dj: isize| -> f64 {
            let (ex, ey) = Ext::of(boundary, f);
            let ti = tap(i as isize + di, nx, ex);
            let tj = tap(j as isize + dj, ny, ey);
            sample(cur.get(f), ti, tj)
        };
        let (r, l, s) = update_point(at, a);
        next.r[[i, j]] = r;
        next.l[[i, j]] = l;
        next.s[[i, j]] = s;
    }
    match boundary {
        Boundary::Periodic => { },
        Boundary::Reflective => {
            next.r.row_mut(0).fill(0.0);
            next.r.row_mut(nx - 1).fill(0.0);
            next.l.column_mut(0).fill(0.0);
            next.l.column_mut(ny - 1).fill(0.0);
        },
        // ψ is held along the walls, so s vanishes there and the derivative
        // along each wall keeps its initial value
        Boundary::Fixed => {
            for (i, j) in border(nx, ny) { next.s[[i, j]] = 0.0; }
            for col in [0, ny - 1] {
                next.r.column_mut(col).assign(&cur.r.column(col));
            }
            for row in [0, nx - 1] {
                next.l.row_mut(row).assign(&cur.l.row(row));
            }
        },
    }
}

fn step_2d(boundary: Boundary, a: f64, cur: &Fields2, next: &mut Fields2) {
    step_interior_2d(a, cur, next);
    step_edges_2d(boundary, a, cur, next);
}

/// Integrate the two-dimensional wave equation for `steps` time levels
/// (including the initial one) from the initial displacement `psi0`, sampled
/// with spacing `dx` along both axes.
///
/// The two-dimensional Lax-Wendroff step, including its mixed-derivative
/// terms, is stable for `a ≤ 0.6`; growth sets in just above `a ≈ 0.61`.
pub fn wave_2d<S>(psi0: &Arr2<S>, dx: f64, steps: usize, config: &WaveConfig)
    -> WResult<WaveSolution<nd::Ix3>>
where S: nd::Data<Elem = f64>
{
    config.check(dx, steps)?;
    GridError::check_shape(psi0.shape(), MIN_POINTS)?;
    let (s0, mut grad) = initial_fields(psi0.view(), dx, config)?;
    let l0 = grad.swap_remove(1);
    let r0 = grad.swap_remove(0);

    let a = config.courant;
    let dt = config.dt(dx);
    let boundary = config.boundary;
    let (nx, ny) = psi0.dim();
    let mut psi: nd::Array3<f64> = nd::Array3::zeros((steps, nx, ny));
    let mut energy: nd::Array1<f64> = nd::Array1::zeros(steps);
    psi.slice_mut(nd::s![0, .., ..]).assign(psi0);

    let mut init = Fields2 { r: r0, l: l0, s: s0 };
    init.constrain(boundary);
    energy[0] = init.energy(dx);
    let mut win = Window::new(init);
    let mut psi_k: nd::Array2<f64> = psi0.to_owned();
    let iter
        = psi.axis_iter_mut(nd::Axis(0)).skip(1)
        .zip(energy.iter_mut().skip(1));
    for (mut psi_kp1, e_kp1) in iter {
        let Window { cur, next } = &mut win;
        step_2d(boundary, a, cur, next);
        nd::Zip::from(&mut psi_k).and(&cur.s).and(&next.s)
            .for_each(|p, &s, &sn| { *p += 0.5 * dt * (s + sn); });
        psi_kp1.assign(&psi_k);
        *e_kp1 = next.energy(dx);
        win.swap();
    }
    Ok(WaveSolution { psi, t: time_axis(steps, dt), energy })
}

/// Integrate the wave equation for a field of runtime-determined rank.
///
/// Dispatches to [`wave_1d`] or [`wave_2d`]; any other rank is rejected with
/// [`DimError`] before anything else is done.
pub fn integrate_wave<S, D>(
    psi0: &nd::ArrayBase<S, D>,
    dx: f64,
    steps: usize,
    config: &WaveConfig,
) -> WResult<WaveSolution<nd::IxDyn>>
where
    S: nd::Data<Elem = f64>,
    D: nd::Dimension,
{
    let ndim = psi0.ndim();
    DimError::check(ndim)?;
    let view = psi0.view().into_dyn();
    match ndim {
        1 => {
            let psi0 = view.into_dimensionality::<nd::Ix1>()
                .map_err(|_| DimError(ndim))?;
            wave_1d(&psi0, dx, steps, config).map(WaveSolution::into_dyn)
        },
        _ => {
            let psi0 = view.into_dimensionality::<nd::Ix2>()
                .map_err(|_| DimError(ndim))?;
            wave_2d(&psi0, dx, steps, config).map(WaveSolution::into_dyn)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    fn sine(n: usize) -> (nd::Array1<f64>, f64) {
        let dx = TAU / n as f64;
        ((0..n).map(|i| (i as f64 * dx).sin()).collect(), dx)
    }

    #[test]
    fn default_gradient_matches_boundary() {
        let psi0 = nd::array![0.0, 1.0, 4.0, 9.0, 16.0];
        let g = centered_gradient(psi0.view().into_dyn(), 1.0, Boundary::Fixed);
        assert_eq!(g.len(), 1);
        assert_eq!(g[0].as_slice().unwrap(), &[1.0, 2.0, 4.0, 6.0, 7.0]);
        let g = centered_gradient(psi0.view().into_dyn(), 1.0, Boundary::Reflective);
        assert_eq!(g[0].as_slice().unwrap(), &[0.0, 2.0, 4.0, 6.0, 0.0]);
        let g = centered_gradient(psi0.view().into_dyn(), 1.0, Boundary::Periodic);
        assert_eq!(g[0].as_slice().unwrap(), &[-7.5, 2.0, 4.0, 6.0, -4.5]);
    }

    #[test]
    fn default_gradient_2d_has_two_components() {
        let psi0: nd::Array2<f64>
            = nd::Array2::from_shape_fn((4, 5), |(i, j)| (2 * i + 3 * j) as f64);
        let g = centered_gradient(psi0.view().into_dyn(), 0.5, Boundary::Periodic);
        assert_eq!(g.len(), 2);
        assert!((g[0][[1, 2]] - 4.0).abs() < 1e-12);
        assert!((g[1][[1, 2]] - 6.0).abs() < 1e-12);
    }

    #[test]
    fn courant_one_shifts_characteristics_exactly() {
        // with a = 1 and periodic walls, s ± r translate by one cell per step
        let (psi0, dx) = sine(32);
        let sol = wave_1d(&psi0, dx, 65, &WaveConfig::default()).unwrap();
        let e0 = sol.energy[0];
        assert!(sol.energy.iter().all(|e| (e - e0).abs() < 1e-12 * e0.max(1.0)));
    }

    #[test]
    fn window_swaps_levels() {
        let mut w = Window::new(1);
        w.next = 2;
        w.swap();
        assert_eq!((w.cur, w.next), (2, 1));
    }

    #[test]
    fn fixed_walls_hold_2d() {
        let n = 16;
        let dx = 1.0 / (n - 1) as f64;
        let psi0: nd::Array2<f64>
            = nd::Array2::from_shape_fn((n, n), |(i, j)| {
                let (x, y) = (i as f64 * dx - 0.5, j as f64 * dx - 0.5);
                (-(x * x + y * y) * 40.0).exp()
            });
        let config = WaveConfig::default().courant(0.5).boundary(Boundary::Fixed);
        let sol = wave_2d(&psi0, dx, 50, &config).unwrap();
        for k in 0..50 {
            for (i, j) in border(n, n) {
                assert_eq!(sol.psi[[k, i, j]], psi0[[i, j]]);
            }
        }
    }

    #[test]
    fn continuation_past_the_walls() {
        assert_eq!(tap(-1, 5, Ext::Wrap), Tap::At(4));
        assert_eq!(tap(5, 5, Ext::Wrap), Tap::At(0));
        assert_eq!(tap(-1, 5, Ext::Even), Tap::At(1));
        assert_eq!(tap(5, 5, Ext::Odd), Tap::Odd(4, 3));
        assert_eq!(tap(2, 5, Ext::Odd), Tap::At(2));
        let u = nd::array![[1.0, 2.0], [3.0, 5.0]];
        assert_eq!(sample(&u, Tap::Odd(0, 1), Tap::At(1)), 2.0 * 2.0 - 5.0);
        // corners reflect through both walls
        assert_eq!(
            sample(&u, Tap::Odd(0, 1), Tap::Odd(0, 1)),
            2.0 * (2.0 * 1.0 - 2.0) - (2.0 * 3.0 - 5.0),
        );
    }

    #[test]
    fn mixed_terms_enter_the_gradient_update() {
        // a pure xy-shear in l drives r through l_xy alone
        let (nx, ny) = (5, 5);
        let l = nd::Array2::from_shape_fn((nx, ny), |(i, j)| (i * j) as f64);
        let fields = Fields2 {
            r: nd::Array2::zeros((nx, ny)),
            l,
            s: nd::Array2::zeros((nx, ny)),
        };
        let mut next = fields.clone();
        let a = 0.5;
        step_2d(Boundary::Periodic, a, &fields, &mut next);
        assert!((next.r[[2, 2]] - a * a / 2.0).abs() < 1e-15);
    }

    #[test]
    fn border_visits_each_edge_point_once() {
        let mut pts: Vec<(usize, usize)> = border(4, 5).collect();
        pts.sort_unstable();
        pts.dedup();
        assert_eq!(pts.len(), 2 * 4 + 2 * 5 - 4);
    }

    #[test]
    fn bad_inputs_are_rejected() {
        let (psi0, dx) = sine(16);
        let config = WaveConfig::default().speed(0.0);
        assert!(matches!(
            wave_1d(&psi0, dx, 10, &config),
            Err(WaveError::BadSpeed(_)),
        ));
        let config = WaveConfig::default()
            .initial_velocity(|p| nd::ArrayD::zeros(vec![p.len() + 1]));
        assert!(matches!(
            wave_1d(&psi0, dx, 10, &config),
            Err(WaveError::Shape(_)),
        ));
        let config = WaveConfig::default().initial_gradient(|_, _, _| Vec::new());
        assert!(matches!(
            wave_1d(&psi0, dx, 10, &config),
            Err(WaveError::GradientComponents(1, 0)),
        ));
        assert!(matches!(
            WaveConfig::default().boundary_token("open"),
            Err(WaveError::Boundary(_)),
        ));
        let short = nd::array![0.0, 1.0];
        assert!(matches!(
            wave_1d(&short, dx, 10, &WaveConfig::default()),
            Err(WaveError::Grid(GridError::TooSmall(3, 2))),
        ));
    }
}

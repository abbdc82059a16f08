//! Crank-Nicolson integration of the diffusion equation with a spatially
//! varying diffusivity,
//! ```text
//! ∂T    ∂    ∂T    ∂    ∂T
//! -- = -- (D --) + -- (D --)
//! ∂t   ∂x    ∂x    ∂y    ∂y
//! ```
//! between walls held at fixed values.
//!
//! The time step is set by the diffusion number `s` as `dt = s dx²`. Values of
//! `s` for which the first (explicit) step is unstable are accepted as-is.
//!
//! In all returned arrays, the first (or zero-th) axis indexes time.

use ndarray as nd;
use ndarray_linalg::{ FactorizeTridiagonal, LUFactorizedTridiagonal, SolveTridiagonal };
use crate::{
    Arr1,
    Arr2,
    DEF_DIFFUSION_NUMBER,
    error::{ DiffusionError, DimError, GridError, ShapeError },
    grid::{ time_axis, Walls },
};

pub type DResult<T> = Result<T, DiffusionError>;

// the banded solve needs at least two unknowns per line
const MIN_POINTS: usize = 4;

/// Configuration for the diffusion integrators.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DiffusionConfig {
    /// Diffusion number `s = dt / dx²` (default: `0.25`).
    pub diffusion_number: f64,
    /// Fixed wall values (default: `(0, 0)`).
    pub walls: Walls,
}

impl Default for DiffusionConfig {
    fn default() -> Self {
        Self { diffusion_number: DEF_DIFFUSION_NUMBER, walls: Walls::default() }
    }
}

impl DiffusionConfig {
    /// Set the diffusion number.
    pub fn diffusion_number(mut self, s: f64) -> Self {
        self.diffusion_number = s;
        self
    }

    /// Set the wall values.
    pub fn walls<W>(mut self, walls: W) -> Self
    where W: Into<Walls>
    {
        self.walls = walls.into();
        self
    }

    /// Time step `dt = s dx²`.
    pub fn dt(&self, dx: f64) -> f64 { self.diffusion_number * dx.powi(2) }

    fn check(&self, dx: f64, steps: usize) -> DResult<()> {
        GridError::check_spacing(dx)?;
        GridError::check_steps(steps)?;
        DiffusionError::check_diffusion_number(self.diffusion_number)?;
        Ok(())
    }
}

/// Output of a diffusion integration.
#[derive(Clone, Debug)]
pub struct DiffusionSolution<D: nd::Dimension> {
    /// Field history, with time along axis 0.
    pub field: nd::Array<f64, D>,
    /// Time coordinates.
    pub t: nd::Array1<f64>,
}

impl<D: nd::Dimension> DiffusionSolution<D> {
    fn into_dyn(self) -> DiffusionSolution<nd::IxDyn> {
        DiffusionSolution { field: self.field.into_dyn(), t: self.t }
    }
}

/// Crank-Nicolson operator pair for the interior points of a single line.
///
/// With `h± = s D(x ± dx/2) / 2` at each interior point, the implicit operator
/// is `A = I - h L` and its complement `B = 2 I - A = I + h L`, where `L` is
/// the three-point variable-coefficient Laplacian. `A` depends only on
/// position, so it is factorized once.
struct CnLine {
    hm: Vec<f64>,
    hp: Vec<f64>,
    walls: Walls,
    lu: LUFactorizedTridiagonal<f64>,
}

impl CnLine {
    // `dm` and `dp` hold the diffusivity half a cell to the left and right of
    // each interior point
    fn new(s: f64, dm: Vec<f64>, dp: Vec<f64>, walls: Walls) -> DResult<Self> {
        let m = dm.len();
        let hm: Vec<f64> = dm.into_iter().map(|d| 0.5 * s * d).collect();
        let hp: Vec<f64> = dp.into_iter().map(|d| 0.5 * s * d).collect();
        let mut a: nd::Array2<f64> = nd::Array2::zeros((m, m));
        for k in 0..m {
            a[[k, k]] = 1.0 + hm[k] + hp[k];
            if k > 0 { a[[k, k - 1]] = -hm[k]; }
            if k + 1 < m { a[[k, k + 1]] = -hp[k]; }
        }
        let lu = a.factorize_tridiagonal()?;
        Ok(Self { hm, hp, walls, lu })
    }

    // sample the diffusivity around the interior points of a line whose
    // coordinates are generated by `at`
    fn sample<F>(
        s: f64,
        m: usize,
        dx: f64,
        at: F,
        walls: Walls,
    ) -> DResult<Self>
    where F: Fn(f64) -> (Vec<f64>, f64)
    {
        let mut dm: Vec<f64> = Vec::with_capacity(m);
        let mut dp: Vec<f64> = Vec::with_capacity(m);
        for k in 1..=m {
            let (pt_m, d_m) = at(-0.5 * dx + k as f64 * dx);
            DiffusionError::check_diffusivity(&pt_m, d_m)?;
            let (pt_p, d_p) = at(0.5 * dx + k as f64 * dx);
            DiffusionError::check_diffusivity(&pt_p, d_p)?;
            dm.push(d_m);
            dp.push(d_p);
        }
        Self::new(s, dm, dp, walls)
    }

    // h L T over the interior, using the line's end samples as wall values
    fn half_flux<S>(&self, line: &Arr1<S>) -> nd::Array1<f64>
    where S: nd::Data<Elem = f64>
    {
        let m = self.hm.len();
        (0..m)
            .map(|k| {
                let (tm, t, tp) = (line[k], line[k + 1], line[k + 2]);
                self.hp[k] * (tp - t) - self.hm[k] * (t - tm)
            })
            .collect()
    }

    // B T over the interior
    fn explicit_half<S>(&self, line: &Arr1<S>) -> nd::Array1<f64>
    where S: nd::Data<Elem = f64>
    {
        let m = self.hm.len();
        self.half_flux(line) + line.slice(nd::s![1..m + 1])
    }

    // forward-Euler step of the full size over the interior
    fn explicit_full<S>(&self, line: &Arr1<S>) -> nd::Array1<f64>
    where S: nd::Data<Elem = f64>
    {
        let m = self.hm.len();
        2.0 * self.half_flux(line) + line.slice(nd::s![1..m + 1])
    }

    // solve A T = rhs + C for the interior, where C holds the contribution of
    // the walls at the new time level
    fn implicit(&self, mut rhs: nd::Array1<f64>) -> DResult<nd::Array1<f64>> {
        let m = rhs.len();
        rhs[0] += self.hm[0] * self.walls.lo;
        rhs[m - 1] += self.hp[m - 1] * self.walls.hi;
        Ok(self.lu.solve_tridiagonal_into(rhs)?)
    }

    // one full Crank-Nicolson step of the interior of a line
    fn advance<S>(&self, line: &Arr1<S>) -> DResult<nd::Array1<f64>>
    where S: nd::Data<Elem = f64>
    {
        self.implicit(self.explicit_half(line))
    }
}

/// Integrate the one-dimensional diffusion equation for `steps` time levels
/// (including the initial one) from the initial field `t0`, sampled at
/// coordinates `x` with spacing `dx`.
///
/// The diffusivity `diffusivity(x)` is sampled at the half-grid points
/// `x[i] ± dx/2` around every interior point. Level 1 is obtained from an
/// explicit forward-Euler step; this is the explicit half of the
/// Crank-Nicolson pair taken over the full `dt`, so that level 1 sits at
/// `t[1] = dt` like every other level. All later levels are Crank-Nicolson.
/// The end points are held at `config.walls` from level 1 on.
///
/// ```
/// use ndarray as nd;
/// use xpde::diffusion::{ diffusion_1d, DiffusionConfig };
///
/// let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 1.0, 21);
/// let dx = x[1] - x[0];
/// let t0: nd::Array1<f64> = nd::Array1::zeros(21);
/// let config = DiffusionConfig::default()
///     .diffusion_number(2.5)
///     .walls((1.0, 3.0));
/// let sol = diffusion_1d(&t0, |_| 1.0, &x, dx, 3000, &config).unwrap();
/// let last = sol.field.row(2999);
/// // relaxes to the linear profile between the walls
/// assert!(x.iter().zip(last).all(|(xk, tk)| (tk - (1.0 + 2.0 * xk)).abs() < 1e-9));
/// ```
pub fn diffusion_1d<S, T, F>(
    t0: &Arr1<S>,
    diffusivity: F,
    x: &Arr1<T>,
    dx: f64,
    steps: usize,
    config: &DiffusionConfig,
) -> DResult<DiffusionSolution<nd::Ix2>>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
    F: Fn(f64) -> f64,
{
    config.check(dx, steps)?;
    GridError::check_shape(t0.shape(), MIN_POINTS)?;
    ShapeError::check(t0, x)?;

    let n = t0.len();
    let s = config.diffusion_number;
    let walls = config.walls;
    let x0 = x[0];
    let line = CnLine::sample(
        s, n - 2, dx, |off| (vec![x0 + off], diffusivity(x0 + off)), walls)?;

    let mut field: nd::Array2<f64> = nd::Array2::zeros((steps, n));
    field.slice_mut(nd::s![0, ..]).assign(t0);
    let mut t_k: nd::Array1<f64> = t0.to_owned();
    walls.apply(&mut t_k);
    for (k, mut t_kp1) in field.axis_iter_mut(nd::Axis(0)).enumerate().skip(1) {
        let interior
            = if k == 1 { line.explicit_full(&t_k) } else { line.advance(&t_k)? };
        t_k.slice_mut(nd::s![1..n - 1]).assign(&interior);
        walls.apply(&mut t_k);
        t_kp1.assign(&t_k);
    }
    Ok(DiffusionSolution { field, t: time_axis(steps, config.dt(dx)) })
}

// x-direction lines (one per interior column index j) and y-direction lines
// (one per interior row index i)
struct Adi {
    x_lines: Vec<CnLine>,
    y_lines: Vec<CnLine>,
}

impl Adi {
    fn new<F>(
        s: f64,
        x: &[f64],
        y: &[f64],
        dx: f64,
        diffusivity: &F,
        walls: Walls,
    ) -> DResult<Self>
    where F: Fn(f64, f64) -> f64
    {
        let (nx, ny) = (x.len(), y.len());
        let (x0, y0) = (x[0], y[0]);
        let x_lines = y[1..ny - 1].iter()
            .map(|&yj| {
                CnLine::sample(
                    s, nx - 2, dx,
                    |off| (vec![x0 + off, yj], diffusivity(x0 + off, yj)),
                    walls,
                )
            })
            .collect::<DResult<Vec<_>>>()?;
        let y_lines = x[1..nx - 1].iter()
            .map(|&xi| {
                CnLine::sample(
                    s, ny - 2, dx,
                    |off| (vec![xi, y0 + off], diffusivity(xi, y0 + off)),
                    walls,
                )
            })
            .collect::<DResult<Vec<_>>>()?;
        Ok(Self { x_lines, y_lines })
    }

    // add `scale` h Lx T to the interior of `out`
    fn add_x_flux(&self, t: &nd::Array2<f64>, out: &mut nd::Array2<f64>, scale: f64) {
        let nx = t.nrows();
        for (j, line) in self.x_lines.iter().enumerate().map(|(j, l)| (j + 1, l)) {
            let flux = line.half_flux(&t.column(j));
            out.slice_mut(nd::s![1..nx - 1, j]).scaled_add(scale, &flux);
        }
    }

    fn add_y_flux(&self, t: &nd::Array2<f64>, out: &mut nd::Array2<f64>, scale: f64) {
        let ny = t.ncols();
        for (i, line) in self.y_lines.iter().enumerate().map(|(i, l)| (i + 1, l)) {
            let flux = line.half_flux(&t.row(i));
            out.slice_mut(nd::s![i, 1..ny - 1]).scaled_add(scale, &flux);
        }
    }

    fn explicit_full(&self, t: &nd::Array2<f64>) -> nd::Array2<f64> {
        let mut next = t.clone();
        self.add_x_flux(t, &mut next, 2.0);
        self.add_y_flux(t, &mut next, 2.0);
        next
    }

    // one Peaceman-Rachford step: implicit along x against an explicit y
    // half-step, then implicit along y against an explicit x half-step of the
    // intermediate field
    fn advance(&self, t: &nd::Array2<f64>, walls: Walls)
        -> DResult<nd::Array2<f64>>
    {
        let (nx, ny) = t.dim();

        let mut rhs = t.clone();
        self.add_y_flux(t, &mut rhs, 1.0);
        let mut inter = t.clone();
        for (j, line) in self.x_lines.iter().enumerate().map(|(j, l)| (j + 1, l)) {
            let b = rhs.slice(nd::s![1..nx - 1, j]).to_owned();
            inter.slice_mut(nd::s![1..nx - 1, j]).assign(&line.implicit(b)?);
        }
        walls.apply_2d(&mut inter);

        let mut rhs = inter.clone();
        self.add_x_flux(&inter, &mut rhs, 1.0);
        let mut next = inter.clone();
        for (i, line) in self.y_lines.iter().enumerate().map(|(i, l)| (i + 1, l)) {
            let b = rhs.slice(nd::s![i, 1..ny - 1]).to_owned();
            next.slice_mut(nd::s![i, 1..ny - 1]).assign(&line.implicit(b)?);
        }
        walls.apply_2d(&mut next);
        Ok(next)
    }
}

/// Integrate the two-dimensional diffusion equation for `steps` time levels
/// (including the initial one) from the initial field `t0`, sampled at
/// coordinates `x` (along axis 0) and `y` (along axis 1) with spacing `dx`
/// along both.
///
/// Level 1 is obtained from a forward-Euler step over the full `dt`, as in
/// [`diffusion_1d`]; all later levels use an
/// alternating-direction implicit (Peaceman-Rachford) split of the
/// Crank-Nicolson step. The intermediate field has its walls reset before the
/// second sweep.
pub fn diffusion_2d<S, T, U, F>(
    t0: &Arr2<S>,
    diffusivity: F,
    coords: (&Arr1<T>, &Arr1<U>),
    dx: f64,
    steps: usize,
    config: &DiffusionConfig,
) -> DResult<DiffusionSolution<nd::Ix3>>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
    U: nd::Data<Elem = f64>,
    F: Fn(f64, f64) -> f64,
{
    config.check(dx, steps)?;
    GridError::check_shape(t0.shape(), MIN_POINTS)?;
    let (x, y) = coords;
    let (nx, ny) = t0.dim();
    ShapeError::check_len(nx, x.len())?;
    ShapeError::check_len(ny, y.len())?;

    let walls = config.walls;
    let adi = Adi::new(
        config.diffusion_number,
        &x.to_vec(),
        &y.to_vec(),
        dx,
        &diffusivity,
        walls,
    )?;

    let mut field: nd::Array3<f64> = nd::Array3::zeros((steps, nx, ny));
    field.slice_mut(nd::s![0, .., ..]).assign(t0);
    let mut t_k: nd::Array2<f64> = t0.to_owned();
    walls.apply_2d(&mut t_k);
    for (k, mut t_kp1) in field.axis_iter_mut(nd::Axis(0)).enumerate().skip(1) {
        t_k = if k == 1 {
            let mut next = adi.explicit_full(&t_k);
            walls.apply_2d(&mut next);
            next
        } else {
            adi.advance(&t_k, walls)?
        };
        t_kp1.assign(&t_k);
    }
    Ok(DiffusionSolution { field, t: time_axis(steps, config.dt(dx)) })
}

/// Position-dependent diffusivity of either dimensionality, for use with
/// [`integrate_diffusion`].
pub enum Diffusivity<'a> {
    /// `D(x)`
    D1(&'a dyn Fn(f64) -> f64),
    /// `D(x, y)`
    D2(&'a dyn Fn(f64, f64) -> f64),
}

impl Diffusivity<'_> {
    /// Number of coordinates taken by the diffusivity.
    pub fn rank(&self) -> usize {
        match self {
            Self::D1(_) => 1,
            Self::D2(_) => 2,
        }
    }
}

/// Integrate the diffusion equation for a field of runtime-determined rank.
///
/// `coords` must hold one coordinate array per axis. Dispatches to
/// [`diffusion_1d`] or [`diffusion_2d`]; any rank other than 1 or 2 is
/// rejected with [`DimError`] before anything else is done.
pub fn integrate_diffusion<S, D>(
    t0: &nd::ArrayBase<S, D>,
    diffusivity: Diffusivity<'_>,
    coords: &[nd::Array1<f64>],
    dx: f64,
    steps: usize,
    config: &DiffusionConfig,
) -> DResult<DiffusionSolution<nd::IxDyn>>
where
    S: nd::Data<Elem = f64>,
    D: nd::Dimension,
{
    let ndim = t0.ndim();
    DimError::check(ndim)?;
    if diffusivity.rank() != ndim {
        return Err(DiffusionError::DiffusivityRank(ndim, diffusivity.rank()));
    }
    if coords.len() != ndim {
        return Err(DiffusionError::Coordinates(ndim, coords.len()));
    }
    let view = t0.view().into_dyn();
    match diffusivity {
        Diffusivity::D1(d) => {
            let t0 = view.into_dimensionality::<nd::Ix1>()
                .map_err(|_| DimError(ndim))?;
            diffusion_1d(&t0, d, &coords[0], dx, steps, config)
                .map(DiffusionSolution::into_dyn)
        },
        Diffusivity::D2(d) => {
            let t0 = view.into_dimensionality::<nd::Ix2>()
                .map_err(|_| DimError(ndim))?;
            diffusion_2d(&t0, d, (&coords[0], &coords[1]), dx, steps, config)
                .map(DiffusionSolution::into_dyn)
        },
    }
}

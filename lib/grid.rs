//! Shared spatial-discretization vocabulary: boundary policies, fixed wall
//! values, uniform 1D grids, and time axes.

use std::{ f64::consts::{ PI, TAU }, fmt, str::FromStr };
use ndarray as nd;
use crate::error::{ BoundaryError, GridError };

/// Boundary policy applied uniformly to both ends of every axis.
///
/// Chosen once per run; the integrators never change it mid-run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// Neighbors wrap around: the sample after the last one is the first.
    #[default]
    Periodic,
    /// The normal derivative vanishes at the wall (a free end).
    Reflective,
    /// The field value at the wall never changes (a clamped end).
    Fixed,
}

impl Boundary {
    /// Get the token associated with `self`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Periodic => "periodic",
            Self::Reflective => "reflective",
            Self::Fixed => "fixed",
        }
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Boundary {
    type Err = BoundaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "periodic" => Ok(Self::Periodic),
            "reflective" => Ok(Self::Reflective),
            "fixed" => Ok(Self::Fixed),
            _ => Err(BoundaryError(s.to_string())),
        }
    }
}

/// Fixed (Dirichlet) values held at the two ends of an axis.
///
/// In two dimensions, `lo` is held on the low edge of both axes and `hi` on
/// the high edge; corners take the value of the *x*-axis wall.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Walls {
    /// Value at the low end of an axis.
    pub lo: f64,
    /// Value at the high end of an axis.
    pub hi: f64,
}

impl Walls {
    /// Create a new `Walls`.
    pub fn new(lo: f64, hi: f64) -> Self { Self { lo, hi } }

    /// Write the wall values into the two ends of a line.
    ///
    /// *Panics if `line` is empty*.
    pub(crate) fn apply<S>(&self, line: &mut nd::ArrayBase<S, nd::Ix1>)
    where S: nd::DataMut<Elem = f64>
    {
        let n = line.len();
        line[0] = self.lo;
        line[n - 1] = self.hi;
    }

    /// Write the wall values onto all four edges of a 2D field.
    pub(crate) fn apply_2d<S>(&self, field: &mut nd::ArrayBase<S, nd::Ix2>)
    where S: nd::DataMut<Elem = f64>
    {
        field.rows_mut().into_iter()
            .for_each(|mut row| { self.apply(&mut row); });
        field.columns_mut().into_iter()
            .for_each(|mut col| { self.apply(&mut col); });
    }
}

impl From<(f64, f64)> for Walls {
    fn from(lohi: (f64, f64)) -> Self { Self::new(lohi.0, lohi.1) }
}

/// A uniform one-dimensional grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Grid1 {
    /// Coordinate of the first sample.
    pub origin: f64,
    /// Sample spacing.
    pub dx: f64,
    /// Number of samples.
    pub n: usize,
}

impl Grid1 {
    /// Create a new `Grid1`.
    pub fn new(origin: f64, dx: f64, n: usize) -> Self { Self { origin, dx, n } }

    pub(crate) fn check(&self) -> Result<(), GridError> {
        GridError::check_spacing(self.dx)?;
        GridError::check_shape(&[self.n], 3)
    }

    /// Coordinate array `x[i] = origin + i dx`.
    pub fn coords(&self) -> nd::Array1<f64> {
        (0..self.n).map(|i| self.x(i)).collect()
    }

    /// Coordinate of the `i`-th sample.
    pub fn x(&self, i: usize) -> f64 { self.origin + i as f64 * self.dx }

    /// Spacing of the FFT-conjugate momentum grid, `2π / (n dx)`.
    pub fn dk(&self) -> f64 { TAU / (self.n as f64 * self.dx) }

    /// FFT-conjugate momentum grid `k[j] = -π/dx + j dk`, spanning
    /// `[-π/dx, π/dx)`.
    pub fn momenta(&self) -> nd::Array1<f64> {
        let k0 = -PI / self.dx;
        let dk = self.dk();
        (0..self.n).map(|j| k0 + j as f64 * dk).collect()
    }
}

/// Generate the time axis `[0, dt, ..., (n - 1) dt]`.
pub fn time_axis(n: usize, dt: f64) -> nd::Array1<f64> {
    (0..n).map(|k| k as f64 * dt).collect()
}

// neighbor index on an axis of length `n`, wrapping at the ends
#[inline]
pub(crate) fn wrap_prev(i: usize, n: usize) -> usize {
    if i == 0 { n - 1 } else { i - 1 }
}

#[inline]
pub(crate) fn wrap_next(i: usize, n: usize) -> usize {
    if i + 1 == n { 0 } else { i + 1 }
}

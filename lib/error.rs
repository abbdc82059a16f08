//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! Every check is performed before the first time step is taken; an integrator
//! either returns a complete history or one of these errors, never a partial
//! result. Numerical instability (e.g. a Courant number above 1) is *not* an
//! error: the diverging field is returned as-is.
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use ndarray_linalg::error::LinalgError;
use thiserror::Error;

/// Returned when a field has a number of spatial axes other than 1 or 2.
#[derive(Debug, Error)]
#[error("fields must have 1 or 2 spatial axes; got {0}")]
pub struct DimError(pub usize);

impl DimError {
    pub(crate) fn check(ndim: usize) -> Result<(), Self> {
        (1..=2).contains(&ndim).then_some(()).ok_or(Self(ndim))
    }
}

/// Returned when an unrecognized boundary-condition token is parsed.
#[derive(Debug, Error)]
#[error("unrecognized boundary condition {0:?}; expected one of \"periodic\", \"reflective\", or \"fixed\"")]
pub struct BoundaryError(pub String);

/// Returned when an auxiliary array (initial velocity, initial gradient,
/// coordinates, ...) does not match the shape of the field it accompanies.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible shapes; expected {0:?} but got {1:?}")]
pub struct ShapeError(pub Vec<usize>, pub Vec<usize>);

impl ShapeError {
    pub(crate) fn check<S, T, A, B, D, E>(
        expected: &nd::ArrayBase<S, D>,
        got: &nd::ArrayBase<T, E>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
        D: nd::Dimension,
        E: nd::Dimension,
    {
        (expected.shape() == got.shape()).then_some(())
            .ok_or_else(|| Self(expected.shape().to_vec(), got.shape().to_vec()))
    }

    pub(crate) fn check_len(expected: usize, got: usize) -> Result<(), Self> {
        (expected == got).then_some(())
            .ok_or_else(|| Self(vec![expected], vec![got]))
    }
}

/// Returned when a grid cannot support the finite-difference stencils.
#[derive(Debug, Error)]
pub enum GridError {
    /// Returned when an axis has fewer points than the scheme's stencils need.
    #[error("each spatial axis must have at least {0} points; got {1}")]
    TooSmall(usize, usize),

    /// Returned when a grid spacing or time step is not strictly positive (or
    /// not finite).
    #[error("grid spacing and time step must be positive and finite; got {0}")]
    BadSpacing(f64),

    /// Returned when zero time levels are requested.
    #[error("the number of time levels must be at least 1")]
    NoSteps,
}

impl GridError {
    pub(crate) fn check_shape(shape: &[usize], min: usize)
        -> Result<(), Self>
    {
        match shape.iter().find(|n| **n < min) {
            Some(n) => Err(Self::TooSmall(min, *n)),
            None => Ok(()),
        }
    }

    pub(crate) fn check_spacing(h: f64) -> Result<(), Self> {
        (h.is_finite() && h > 0.0).then_some(()).ok_or(Self::BadSpacing(h))
    }

    pub(crate) fn check_steps(steps: usize) -> Result<(), Self> {
        (steps != 0).then_some(()).ok_or(Self::NoSteps)
    }
}

/// Returned from [`wave`][crate::wave] integrators.
#[derive(Debug, Error)]
pub enum WaveError {
    /// [`DimError`]
    #[error("dimensionality error: {0}")]
    Dim(#[from] DimError),

    /// [`BoundaryError`]
    #[error("boundary error: {0}")]
    Boundary(#[from] BoundaryError),

    /// [`ShapeError`]
    #[error("shape error: {0}")]
    Shape(#[from] ShapeError),

    /// [`GridError`]
    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    /// Returned when a non-positive wave speed is encountered.
    #[error("wave speed must be greater than 0; got {0}")]
    BadSpeed(f64),

    /// Returned when a non-positive Courant number is encountered.
    #[error("courant number must be greater than 0; got {0}")]
    BadCourant(f64),

    /// Returned when a custom initial-gradient function returns the wrong
    /// number of components.
    #[error("initial gradient must have one component per axis ({0}); got {1}")]
    GradientComponents(usize, usize),
}

impl WaveError {
    pub(crate) fn check_speed(speed: f64) -> Result<(), Self> {
        (speed > 0.0).then_some(()).ok_or(Self::BadSpeed(speed))
    }

    pub(crate) fn check_courant(courant: f64) -> Result<(), Self> {
        (courant > 0.0).then_some(()).ok_or(Self::BadCourant(courant))
    }
}

/// Returned from [`diffusion`][crate::diffusion] integrators.
#[derive(Debug, Error)]
pub enum DiffusionError {
    /// [`DimError`]
    #[error("dimensionality error: {0}")]
    Dim(#[from] DimError),

    /// [`ShapeError`]
    #[error("shape error: {0}")]
    Shape(#[from] ShapeError),

    /// [`GridError`]
    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    /// Returned when a negative or non-finite diffusion number is
    /// encountered.
    #[error("diffusion number must be non-negative; got {0}")]
    BadDiffusionNumber(f64),

    /// Returned when the diffusivity is negative (or not finite) at some
    /// sampled point.
    #[error("diffusivity must be non-negative; got {1} at {0:?}")]
    BadDiffusivity(Vec<f64>, f64),

    /// Returned when a diffusivity of the wrong dimensionality is paired with
    /// a field.
    #[error("diffusivity takes {1} coordinate(s) but the field has {0} axes")]
    DiffusivityRank(usize, usize),

    /// Returned when the number of coordinate arrays does not match the number
    /// of axes.
    #[error("expected {0} coordinate array(s); got {1}")]
    Coordinates(usize, usize),

    /// [`LinalgError`]
    #[error("linalg error: {0}")]
    Linalg(#[from] LinalgError),
}

impl DiffusionError {
    pub(crate) fn check_diffusion_number(s: f64) -> Result<(), Self> {
        (s.is_finite() && s >= 0.0).then_some(())
            .ok_or(Self::BadDiffusionNumber(s))
    }

    pub(crate) fn check_diffusivity(at: &[f64], d: f64) -> Result<(), Self> {
        (d.is_finite() && d >= 0.0).then_some(())
            .ok_or_else(|| Self::BadDiffusivity(at.to_vec(), d))
    }
}

/// Returned from [`schrodinger`][crate::schrodinger] integrators.
#[derive(Debug, Error)]
pub enum SchrodingerError {
    /// [`ShapeError`]
    #[error("shape error: {0}")]
    Shape(#[from] ShapeError),

    /// [`GridError`]
    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    /// Returned when a non-positive particle mass is encountered.
    #[error("mass must be greater than 0; got {0}")]
    BadMass(f64),
}

impl SchrodingerError {
    pub(crate) fn check_mass(mass: f64) -> Result<(), Self> {
        (mass > 0.0).then_some(()).ok_or(Self::BadMass(mass))
    }
}

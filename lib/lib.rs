#![allow(non_snake_case)]

//! Provides time-integrators for three model partial differential equations
//! on uniform one- and two-dimensional grids:
//! - Wave equation: explicit Lax-Wendroff scheme on the first-order
//!   (characteristic) form, with periodic, reflective, or fixed boundaries
//! - Diffusion equation with position-dependent diffusivity: Crank-Nicolson,
//!   with alternating-direction implicit sweeps in two dimensions and fixed
//!   wall values
//! - Time-dependent Schrödinger equation: pseudo-spectral split-step operator
//!
//! Every integrator takes an initial field and a number of time levels and
//! returns the whole history (time along axis 0) together with its time axis.
//! Level 0 of every history is the initial field exactly as given.
//!
//! See [`docs`] for theoretical background.

pub mod error;
pub mod grid;
pub mod wave;
pub mod diffusion;
pub mod schrodinger;
pub mod utils;

pub mod docs;

pub(crate) const DEF_COURANT: f64 = 1.0;
pub(crate) const DEF_SPEED: f64 = 1.0;
pub(crate) const DEF_DIFFUSION_NUMBER: f64 = 0.25;
pub(crate) const DEF_MASS: f64 = 1.0;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
pub type Arr2<S> = ndarray::ArrayBase<S, ndarray::Ix2>;

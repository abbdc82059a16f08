//! Miscellaneous tools.

use std::{ ops::Add, sync::Arc };
use ndarray::{ self as nd, Ix1 };
use ndarray_linalg::Scalar;
use num_traits::Zero;
use rustfft::{ self as fft, Fft };
use num_complex::Complex64 as C64;

/// Calculate the total probability `dx Σ |q|²` of a wavefunction sampled on a
/// periodic grid.
///
/// Every sample carries the same weight, which makes this the quantity
/// preserved exactly by a unitary propagator on the grid.
pub fn wf_prob<S, A>(q: &nd::ArrayBase<S, Ix1>, dx: A::Real) -> A::Real
where
    S: nd::Data<Elem = A>,
    A: Scalar,
{
    dx * q.iter().map(|qk| qk.square())
        .fold(<A as Scalar>::Real::zero(), <A as Scalar>::Real::add)
}

/// Calculate the position expectation value `⟨x⟩` of a wavefunction.
///
/// The result is normalized by [`wf_prob`], so `q` need not be normalized.
pub fn wf_mean_x<S, T>(x: &nd::ArrayBase<S, Ix1>, q: &nd::ArrayBase<T, Ix1>)
    -> f64
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = C64>,
{
    let (m0, m1) = x.iter().zip(q)
        .fold((0.0, 0.0), |(m0, m1), (xk, qk)| {
            let p = qk.norm_sqr();
            (m0 + p, m1 + p * xk)
        });
    m1 / m0
}

/// Calculate the position spread `√(⟨x²⟩ - ⟨x⟩²)` of a wavefunction.
///
/// The result is normalized by [`wf_prob`], so `q` need not be normalized.
pub fn wf_width<S, T>(x: &nd::ArrayBase<S, Ix1>, q: &nd::ArrayBase<T, Ix1>)
    -> f64
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = C64>,
{
    let (m0, m1, m2) = x.iter().zip(q)
        .fold((0.0, 0.0, 0.0), |(m0, m1, m2), (xk, qk)| {
            let p = qk.norm_sqr();
            (m0 + p, m1 + p * xk, m2 + p * xk * xk)
        });
    let mean = m1 / m0;
    (m2 / m0 - mean.powi(2)).max(0.0).sqrt()
}

/// Largest finite value in a real array, or `-∞` if there is none.
pub fn max_value<S, D>(a: &nd::ArrayBase<S, D>) -> f64
where
    S: nd::Data<Elem = f64>,
    D: nd::Dimension,
{
    a.iter().copied()
        .filter(|v| v.is_finite())
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Forward/inverse FFT plans for a fixed transform length, created once and
/// reused for every step of a run.
///
/// Follows the usual convention where the forward transform is unnormalized
/// and the inverse carries the factor `1/n`.
#[derive(Clone)]
pub struct FftPair {
    n: usize,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
    scratch: Vec<C64>,
}

impl std::fmt::Debug for FftPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FftPair").field("n", &self.n).finish()
    }
}

impl FftPair {
    /// Plan both transforms for length `n`.
    pub fn new(n: usize) -> Self {
        let mut plan = fft::FftPlanner::new();
        let forward = plan.plan_fft_forward(n);
        let inverse = plan.plan_fft_inverse(n);
        let scratch_len
            = forward.get_inplace_scratch_len()
            .max(inverse.get_inplace_scratch_len());
        let scratch = vec![C64::zero(); scratch_len];
        Self { n, forward, inverse, scratch }
    }

    /// Transform length.
    pub fn len(&self) -> usize { self.n }

    /// Return `true` if the transform length is zero.
    pub fn is_empty(&self) -> bool { self.n == 0 }

    /// Perform the forward transform in place.
    ///
    /// *Panics if `x` does not have length `n`*.
    pub fn forward<S>(&mut self, x: &mut nd::ArrayBase<S, Ix1>)
    where S: nd::DataMut<Elem = C64>
    {
        assert_eq!(x.len(), self.n, "FftPair: length mismatch");
        match x.as_slice_mut() {
            Some(buf) => {
                self.forward.process_with_scratch(buf, &mut self.scratch);
            },
            None => {
                let mut buf: Vec<C64> = x.to_vec();
                self.forward.process_with_scratch(&mut buf, &mut self.scratch);
                x.iter_mut().zip(buf).for_each(|(xk, bk)| { *xk = bk; });
            },
        }
    }

    /// Perform the inverse transform in place, including the `1/n`
    /// normalization.
    ///
    /// *Panics if `x` does not have length `n`*.
    pub fn inverse<S>(&mut self, x: &mut nd::ArrayBase<S, Ix1>)
    where S: nd::DataMut<Elem = C64>
    {
        assert_eq!(x.len(), self.n, "FftPair: length mismatch");
        match x.as_slice_mut() {
            Some(buf) => {
                self.inverse.process_with_scratch(buf, &mut self.scratch);
            },
            None => {
                let mut buf: Vec<C64> = x.to_vec();
                self.inverse.process_with_scratch(&mut buf, &mut self.scratch);
                x.iter_mut().zip(buf).for_each(|(xk, bk)| { *xk = bk; });
            },
        }
        let n = self.n as f64;
        x.map_inplace(|xk| { *xk /= n; });
    }
}

//! Theoretical background.
//!
//! # Contents
//! - [Discretization](#discretization)
//! - [Wave equation](#wave-equation)
//! - [Diffusion equation](#diffusion-equation)
//! - [Schrödinger equation](#schrödinger-equation)
//!
//! # Discretization
//! All fields are sampled on uniform grids
//! ```text
//! x[i] = x₀ + i δx, i ∊ {0, ..., N - 1}
//! t[k] = k δt,      k ∊ {0, ..., steps - 1}
//! ```
//! (with an identical second axis *y*\[*j*\] in two dimensions) and every
//! integrator returns the full history of the field, with the time index as the
//! first array axis. The time step is never chosen freely: for the wave and
//! diffusion equations it follows from a dimensionless stability parameter and
//! the grid spacing, and for the Schrödinger equation it is given directly.
//!
//! # Wave equation
//! The wave equation
//! ```text
//! ∂²ψ        ∂²ψ
//! --- = c² ( --- + ... )
//! ∂t²        ∂x²
//! ```
//! is second order in time, which makes explicit schemes that step *ψ* directly
//! awkward to start and to constrain at the walls. Instead, we introduce the
//! derivative fields
//! ```text
//!     ∂ψ         ∂ψ           ∂ψ
//! s = --,  r = c --,  (l = c --)
//!     ∂t         ∂x           ∂y
//! ```
//! in terms of which the equation becomes the first-order system
//! ```text
//! ∂s     ∂r     ∂l        ∂r     ∂s        ∂l     ∂s
//! -- = c -- + c --,       -- = c --,       -- = c --
//! ∂t     ∂x     ∂y        ∂t     ∂x        ∂t     ∂y
//! ```
//! In one dimension, *s* ± *r* are the Riemann invariants of the system,
//! carried unchanged along the characteristics *x* ∓ *c* *t* = const.
//!
//! Each component *u* ∊ {*s*, *r*, *l*} is coupled to a partner *v* and advanced
//! with the Lax-Wendroff scheme,
//! ```text
//!                 a                      a²
//! u'[i] = u[i] + - (v[i + 1] - v[i - 1]) + -- (u[i + 1] - 2 u[i] + u[i - 1])
//!                 2                      2
//! ```
//! where *a* = *c* *δt* / *δx* is the Courant number. In two dimensions the
//! second time derivatives of *r* and *l* also contain mixed derivatives,
//! ```text
//! ∂²r      ∂²r    ∂²l           ∂²l      ∂²l    ∂²r
//! --- = c² --- + c² ----,       --- = c² --- + c² ----
//! ∂t²      ∂x²   ∂x ∂y          ∂t²      ∂y²   ∂x ∂y
//! ```
//! which add the corner terms
//! ```text
//!  a²
//!  -- (l[i + 1, j + 1] - l[i + 1, j - 1] - l[i - 1, j + 1] + l[i - 1, j - 1])
//!  8
//! ```
//! to the update of *r* (and likewise with *r* to that of *l*). Without them the
//! two-dimensional scheme is unstable for every *a*. The scheme is
//! second-order accurate in both space and time and stable for *a* ≤ 1 in one
//! dimension. In two dimensions, a von Neumann analysis puts the limit just
//! above *a* = 0.61, and *a* ≤ 0.6 is the working bound. In one dimension with
//! *a* = 1 it shifts each characteristic by exactly one grid point per step and
//! is therefore exact.
//!
//! The displacement follows by integrating the velocity with the trapezoidal
//! rule,
//! ```text
//!                    δt
//! ψ[k + 1] = ψ[k] + -- (s[k] + s[k + 1])
//!                    2
//! ```
//! so only the derivative fields at the current and next time level need to be
//! kept. Boundaries act on the derivative fields:
//! - periodic: neighbors wrap around the ends of each axis;
//! - reflective (free end): the normal derivative vanishes at the wall, so the
//!   velocity there is advanced by a one-sided update using mirrored neighbors;
//! - fixed (clamped end): the velocity vanishes at the wall, so the
//!   displacement never changes there, and neither does the derivative along
//!   the wall.
//!
//! Mirrored neighbors continue *ψ* evenly through a free wall and oddly about
//! the wall value through a clamped one. The derivative fields inherit the
//! matching parities, which also fixes the corner terms next to a wall.
//!
//! The conserved energy of the continuum equation has the discrete counterpart
//! ```text
//!     1
//! E = - Σ (s² + r² + l²) δxᵈ
//!     2
//! ```
//! which is returned alongside the displacement as a diagnostic.
//!
//! # Diffusion equation
//! The diffusion equation with a position-dependent diffusivity,
//! ```text
//! ∂T
//! -- = ∇·(D ∇T)
//! ∂t
//! ```
//! is discretized in space with the conservative three-point stencil (per axis)
//! ```text
//!                  1
//! (L T)[i] = --- ( D[i + ½] (T[i + 1] - T[i]) - D[i - ½] (T[i] - T[i - 1]) )
//!                 δx²
//! ```
//! with *D*\[*i* ± ½\] = *D*(*x*\[*i*\] ± *δx*/2), and in time with the
//! Crank-Nicolson rule, which averages the explicit and implicit Euler updates:
//! ```text
//!          δt                 δt
//! (I - h -- L) T[k + 1] = (I + h -- L) T[k],   h = 1/2
//!          δx²                δx²
//! ```
//! The time step is set by the diffusion number *s* = *δt* / *δx*², and the
//! scheme is unconditionally stable. Written out, the implicit operator is
//! tridiagonal over the interior points of each line, with the fixed wall
//! values moved to the right-hand side,
//! ```text
//! A[i, i - 1] = -h s D[i - ½]
//! A[i, i]     = 1 + h s (D[i - ½] + D[i + ½])
//! A[i, i + 1] = -h s D[i + ½]
//! ```
//! and the explicit operator is its complement, *B* = 2 *I* - *A*. Since *D*
//! does not depend on time, *A* is LU-factorized once per line and only
//! back-substitution is performed each step.
//!
//! The first step is taken with the forward Euler rule,
//! ```text
//! T[1] = (I + s L δx²) T[0]
//! ```
//! after which every step is Crank-Nicolson.
//!
//! In two dimensions, the operator *L* = *L*<sub>*x*</sub> +
//! *L*<sub>*y*</sub> couples entire planes rather than single lines. The
//! Peaceman-Rachford alternating-direction implicit (ADI) scheme splits each
//! step into two sweeps, each implicit along one axis only:
//! ```text
//! (I - h s Lx δx²) T* = (I + h s Ly δx²) T[k]
//! (I - h s Ly δx²) T[k + 1] = (I + h s Lx δx²) T*
//! ```
//! Each sweep is a set of independent tridiagonal solves, one per row (or
//! column) of the grid. The scheme retains the second-order accuracy and
//! unconditional stability of Crank-Nicolson. The walls are reset on the
//! intermediate field *T** before the second sweep.
//!
//! # Schrödinger equation
//! In units where *ħ* = 1, the time-dependent Schrödinger equation
//! ```text
//!   ∂ψ
//! i -- = (H_k + H_v) ψ
//!   ∂t
//!
//!         1   ∂²
//! H_k = - --- ---
//!         2 m ∂x²
//! H_v = V(x)
//! ```
//! has the formal solution *ψ*(*t* + *dt*) = exp(-*i* (*H*<sub>*k*</sub> +
//! *H*<sub>*v*</sub>) *dt*) *ψ*(*t*). The two terms do not commute, but
//! sandwiching a full kinetic step between two half-sized potential steps (the
//! Strang splitting),
//! ```text
//!               -i H_v dt/2  -i H_k dt  -i H_v dt/2
//! ψ(t + dt) = [e            e          e           ] ψ(t) + O(dt³)
//! ```
//! cancels the leading commutator term. Each factor is diagonal in some basis:
//! the potential factor in position space and the kinetic factor in momentum
//! space, where it is the phase exp(-*i* *k*² *dt* / 2 *m*). A step is therefore
//! a pointwise phase, a fast Fourier transform, another pointwise phase, an
//! inverse transform, and a final pointwise phase. Every operation is unitary,
//! so the total probability is conserved up to round-off.
//!
//! To make the transformed array hold the true momentum-space wavefunction
//! ```text
//!            1
//! ψ̃(k) = ---- ∫ dx ψ(x) exp(-i k x)
//!          √2π
//! ```
//! on the grid *k*\[*j*\] = *k*₀ + *j* *δk* with *k*₀ = -π/*δx* and *δk* =
//! 2π/(*N* *δx*), the discrete transform is applied to the modified
//! wavefunction
//! ```text
//!          δx
//! φ[n] = ---- ψ(x[n]) exp(-i k₀ x[n])
//!         √2π
//! ```
//! whose DFT is related to the continuous transform by
//! ```text
//! ψ̃(k[j]) = exp(-i x₀ δk j) Σ φ[n] exp(-2π i j n / N)
//! ```
//! The kinetic phase can then be applied with the true momentum of each bin, and
//! the phases exp(±*i* *k*₀ *x*) and exp(-*i* *x*₀ *δk* *j*) undo the implicit
//! assumption of the DFT that the grids start at zero.

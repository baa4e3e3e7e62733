//! Newton-Raphson solution of Kepler's equation `M = E - e sin E`

use log::{trace, warn};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use thiserror::Error;

/// Error type for the Kepler solver
#[derive(Debug, Error, PartialEq)]
pub enum KeplerError {
    #[error("Kepler's equation did not converge after {iterations} iterations (e = {eccentricity}, last step {last_step:e} rad)")]
    NonConvergence {
        iterations: u32,
        eccentricity: f64,
        last_step: f64,
    },

    #[error("Eccentricity {0} is outside the elliptic range [0, 1)")]
    InvalidEccentricity(f64),
}

/// Iteration settings for Kepler's equation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeplerSolver {
    /// Convergence threshold on the Newton step, radians
    pub tolerance: f64,
    /// Iteration cap; exceeding it is reported as [`KeplerError::NonConvergence`]
    pub max_iterations: u32,
}

impl Default for KeplerSolver {
    fn default() -> Self {
        Self {
            tolerance: 1e-8,
            max_iterations: 100,
        }
    }
}

impl KeplerSolver {
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Eccentric anomaly in radians for a mean anomaly in radians.
    ///
    /// The mean anomaly is reduced to [-π, π] before iterating, and Newton's
    /// method starts from that reduced value rather than the raw input. The
    /// result therefore lies in [-π, π] and differs from the solution for the
    /// unreduced mean anomaly by a whole multiple of 2π; its sine and cosine,
    /// and every position derived from them, are unchanged. Iteration stops
    /// once `|step| <= tolerance`.
    pub fn solve(&self, mean_anomaly: f64, eccentricity: f64) -> Result<f64, KeplerError> {
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(KeplerError::InvalidEccentricity(eccentricity));
        }

        let m = (mean_anomaly + PI).rem_euclid(TAU) - PI;
        let mut ecc_anomaly = m;
        let mut step = f64::INFINITY;

        for iteration in 1..=self.max_iterations {
            step = (ecc_anomaly - eccentricity * ecc_anomaly.sin() - m)
                / (1.0 - eccentricity * ecc_anomaly.cos());
            ecc_anomaly -= step;

            if step.abs() <= self.tolerance {
                trace!("Kepler converged in {} iterations (e = {})", iteration, eccentricity);
                return Ok(ecc_anomaly);
            }
        }

        warn!(
            "Kepler solver gave up after {} iterations (e = {}, M = {})",
            self.max_iterations, eccentricity, m
        );
        Err(KeplerError::NonConvergence {
            iterations: self.max_iterations,
            eccentricity,
            last_step: step,
        })
    }
}

/// Solve Kepler's equation with the default tolerance and iteration cap
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> Result<f64, KeplerError> {
    KeplerSolver::default().solve(mean_anomaly, eccentricity)
}

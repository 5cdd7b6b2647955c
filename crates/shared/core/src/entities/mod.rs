mod action;
mod strike;

pub use action::{Action, ProjectileOutcome};
pub use strike::{GammaPoint, Strike};

//! Jungle Resolver
//!
//! Decides whether a coconut lands and how much juice it pays.

mod config;
mod resolver;
mod slingshot;

pub use config::ResolverConfig;
pub use resolver::ProjectileResolver;
pub use slingshot::SlingshotConfig;

//! Destinations and role-based route guarding

mod destination;
mod guard;

pub use destination::*;
pub use guard::*;

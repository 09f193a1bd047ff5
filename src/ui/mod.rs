//! Server-rendered pages for guarded navigation

mod handlers;

pub use handlers::*;

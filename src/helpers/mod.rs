//! Helper functions shared by the generators, the resolver and the server

mod date;
mod url;

pub use date::*;
pub use url::*;

//! Redirect shortcuts
//!
//! A fixed, ordered table of named redirects. Tokens are resolved by
//! case-insensitive exact match against a record's name or aliases, and
//! the matching record is turned into a destination URL.

mod destination;
mod filter;
mod resolver;
mod table;

pub use destination::{build_destination, qualify, DestinationConfig};
pub use filter::{filter_redirects, RedirectKind};
pub use resolver::{resolve, RedirectIndex, Resolution};
pub use table::{RedirectRecord, RedirectTable};

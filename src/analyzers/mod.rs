//! Trip statistics and report assembly.
//!
//! [`aggregate`] holds the individual queries (modes, sums, frequency tables),
//! [`analyzer`] groups them into the four timed report sections described in
//! [`types`].

pub mod aggregate;
pub mod analyzer;
pub mod types;
pub mod utility;

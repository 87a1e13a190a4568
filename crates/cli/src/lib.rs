//! Support code for the `u-cartonize` command-line runner.
//!
//! - [`config`]: optional TOML file with `[packing]` and `[shipping]` sections
//! - [`synthetic`]: seeded random orders for experimentation

pub mod config;
pub mod synthetic;

pub use config::CliConfig;
pub use synthetic::SyntheticGenerator;

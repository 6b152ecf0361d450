//! Configuration management
//!
//! Settings are read from the environment or a TOML file and handed to a
//! handler explicitly; there is no process-wide ledger configuration.

pub mod settings;

pub use settings::Config;

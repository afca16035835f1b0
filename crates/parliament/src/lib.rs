//! Registry of elected representatives, parties, units and terms, with a
//! bilingual (Georgian/Latin) name resolver and the roster listing helpers
//! used to render representative grids.

pub mod config;
pub mod error;
pub mod registry;
pub mod telemetry;

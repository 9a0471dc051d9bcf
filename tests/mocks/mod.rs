//! Mock infrastructure for upstream AI providers
//!
//! One wiremock server stands in for every provider; each mock is mounted on
//! the provider's upstream path.

pub mod upstream;

pub use upstream::*;

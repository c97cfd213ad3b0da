//! Async geocoding client for FleetOps services
//!
//! Provides forward (text -> coordinates) and reverse (coordinates -> address)
//! geocoding against a Nominatim-compatible provider, behind the [`Geocoder`]
//! trait so services can swap in test doubles.

pub mod client;
pub mod error;
pub mod models;

pub use client::{Geocoder, NominatimClient};
pub use error::{Error, Result};
pub use models::{GeocodeResult, Point};

pub mod location_service;

pub use location_service::{
    LocationResolver, LocationService, NominatimResolver, PlaceCandidate, ResolvedLocation,
};

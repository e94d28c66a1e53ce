pub mod auth;
pub mod images;
pub mod locations;
pub mod submissions;

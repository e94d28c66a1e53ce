pub mod submission_dto;

pub use submission_dto::*;

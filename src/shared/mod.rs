pub mod constants;
pub mod ids;
pub mod serde_time;
#[cfg(test)]
pub mod test_helpers;
pub mod types;
pub mod validation;

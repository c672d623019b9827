//! Shared test helpers

pub mod database_helper;
pub mod test_data;

#[allow(unused_imports)]
pub use database_helper::*;
#[allow(unused_imports)]
pub use test_data::*;

//! Data models for Hemo

mod blood_group;
mod donor;
mod summary;

pub use blood_group::*;
pub use donor::*;
pub use summary::*;

pub mod facilities;
pub mod tags;
pub mod validation;

pub mod facility;
pub mod facility_tag;
pub mod location;
pub mod tag;

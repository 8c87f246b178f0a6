/// Device position lookup.
pub mod geo;
pub mod share;
/// Stored design.
pub mod store;

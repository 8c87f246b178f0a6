/// The design value object and its patches.
pub mod model;
/// Date and time validation and the poster caption.
pub mod moment;
/// Poster sizes and pricing.
pub mod poster;
/// Color themes and shape masks.
pub mod theme;

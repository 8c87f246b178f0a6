pub mod celestial;
/// Renderer trait and chart payloads.
pub mod renderer;
/// Readiness polling.
pub mod settle;

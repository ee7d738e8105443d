// handlers/mod.rs - Route handlers, grouped by access tier
//
// Public (no auth) -> Protected (bearer JWT, see middleware::auth)

pub mod protected; // Tier 2: owner-scoped resources
pub mod public; // Tier 1: health and token acquisition
pub mod utils;

// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition and service liveness. Nothing here reads AuthUser.

pub mod auth; // POST /auth/register, POST /auth/login
pub mod health; // GET /, GET /health

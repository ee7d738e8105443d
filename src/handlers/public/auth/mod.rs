// handlers/public/auth/mod.rs - Public authentication handlers
//
// Both endpoints answer with `{message, user, token}`; the token is a bearer
// JWT accepted by every protected route.

use serde_json::{json, Value};

use crate::api::AppState;
use crate::database::models::User;
use crate::error::ApiError;

pub mod login; // POST /auth/login - authenticate and get JWT
pub mod register; // POST /auth/register - create account and get JWT

pub use login::login;
pub use register::register;

fn token_response(state: &AppState, message: &str, user: &User) -> Result<Value, ApiError> {
    let token = state.tokens.issue(user)?;
    Ok(json!({
        "message": message,
        "user": user,
        "token": token,
    }))
}

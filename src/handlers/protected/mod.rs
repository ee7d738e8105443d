// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every handler here receives `Extension<AuthUser>` from the auth middleware
// and passes `auth.user_id` as the owner to each repository call. Rows owned
// by another user are indistinguishable from missing ones (404).

pub mod auth; // GET /auth/me
pub mod exercises; // /exercises[/:id]
pub mod workout_exercises; // /workouts/:id/exercises[/:exercise_id]
pub mod workouts; // /workouts[/:id]

//! Entity repositories. Each entity has an async trait, so handlers can be
//! driven by any store, and a PostgreSQL implementation.

pub mod exercise;
pub mod user;
pub mod workout;
pub mod workout_exercise;

pub use exercise::{ExerciseRepository, PgExerciseRepository};
pub use user::{PgUserRepository, UserRepository};
pub use workout::{PgWorkoutRepository, WorkoutRepository};
pub use workout_exercise::{PgWorkoutExerciseRepository, WorkoutExerciseRepository};

pub mod exercise;
pub mod user;
pub mod workout;
pub mod workout_exercise;

pub use exercise::{Exercise, ExerciseChanges, NewExercise};
pub use user::{NewUser, User, UserRecord};
pub use workout::{NewWorkout, Workout};
pub use workout_exercise::{NewWorkoutExercise, WorkoutExercise, WorkoutExerciseChanges};

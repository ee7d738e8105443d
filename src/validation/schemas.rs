use serde_json::Value;
use uuid::Uuid;

use super::{Fields, Schema, ValidationErrors};

pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Schema for RegisterInput {
    fn parse(value: &Value) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::new(value)?;
        let name = fields.string("name", 1);
        let email = fields.email("email");
        let password = fields.password("password", MIN_PASSWORD_LENGTH);
        fields.finish(|| {
            Some(Self {
                name: name?,
                email: email?,
                password: password?,
            })
        })
    }
}

#[derive(Debug, Clone)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl Schema for LoginInput {
    fn parse(value: &Value) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::new(value)?;
        let email = fields.string("email", 1).map(|e| e.to_lowercase());
        let password = fields.password("password", 1);
        fields.finish(|| {
            Some(Self {
                email: email?,
                password: password?,
            })
        })
    }
}

/// Body of `POST /workouts` and `PUT /workouts/:id`
#[derive(Debug, Clone)]
pub struct WorkoutInput {
    pub name: String,
}

impl Schema for WorkoutInput {
    fn parse(value: &Value) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::new(value)?;
        let name = fields.string("name", 1);
        fields.finish(|| Some(Self { name: name? }))
    }
}

#[derive(Debug, Clone)]
pub struct CreateExerciseInput {
    pub name: String,
    pub muscle_group: Option<String>,
}

impl Schema for CreateExerciseInput {
    fn parse(value: &Value) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::new(value)?;
        let name = fields.string("name", 1);
        let muscle_group = fields.optional_string("muscle_group");
        fields.finish(|| {
            Some(Self {
                name: name?,
                muscle_group,
            })
        })
    }
}

#[derive(Debug, Clone)]
pub struct UpdateExerciseInput {
    pub name: String,
    /// `None` keeps the stored muscle group, `Some(None)` clears it
    pub muscle_group: Option<Option<String>>,
}

impl Schema for UpdateExerciseInput {
    fn parse(value: &Value) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::new(value)?;
        let name = fields.string("name", 1);
        let muscle_group = fields.nullable_string("muscle_group");
        fields.finish(|| {
            Some(Self {
                name: name?,
                muscle_group,
            })
        })
    }
}

#[derive(Debug, Clone)]
pub struct CreateWorkoutExerciseInput {
    pub exercise_id: Uuid,
    pub weight: f64,
    pub sets: i32,
    pub reps: i32,
}

impl Schema for CreateWorkoutExerciseInput {
    fn parse(value: &Value) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::new(value)?;
        let exercise_id = fields.uuid("exercise_id");
        let weight = fields.number("weight", 0.0);
        let sets = fields.integer("sets", 1);
        let reps = fields.integer("reps", 1);
        fields.finish(|| {
            Some(Self {
                exercise_id: exercise_id?,
                weight: weight?,
                sets: sets?,
                reps: reps?,
            })
        })
    }
}

/// Partial update; unset fields keep their persisted values
#[derive(Debug, Clone, Default)]
pub struct UpdateWorkoutExerciseInput {
    pub weight: Option<f64>,
    pub sets: Option<i32>,
    pub reps: Option<i32>,
}

impl Schema for UpdateWorkoutExerciseInput {
    fn parse(value: &Value) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::new(value)?;
        let weight = fields.optional_number("weight", 0.0);
        let sets = fields.optional_integer("sets", 1);
        let reps = fields.optional_integer("reps", 1);
        fields.finish(|| Some(Self { weight, sets, reps }))
    }
}

//! In-memory store and request helpers for route-level tests.
//!
//! `MemoryStore` implements every repository trait with the same scoping and
//! uniqueness rules the PostgreSQL schema enforces, so handlers can be driven
//! end to end through the real router without a database.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use crate::api::{app, AppState};
use crate::auth::{password, TokenService};
use crate::config::ApiConfig;
use crate::database::models::{
    Exercise, ExerciseChanges, NewExercise, NewUser, NewWorkout, NewWorkoutExercise, User,
    UserRecord, Workout, WorkoutExercise, WorkoutExerciseChanges,
};
use crate::database::repositories::{
    ExerciseRepository, UserRepository, WorkoutExerciseRepository, WorkoutRepository,
};
use crate::database::{DatabaseError, StoreHealth};

pub const TEST_SECRET: &str = "test-secret";

#[derive(Default)]
struct Tables {
    users: Vec<UserRecord>,
    workouts: Vec<Workout>,
    exercises: Vec<Exercise>,
    /// Stored without the joined exercise columns
    workout_exercises: Vec<WorkoutExercise>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Number of repository calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn workout_count(&self) -> usize {
        self.tables.lock().unwrap().workouts.len()
    }

    pub fn exercise_count(&self) -> usize {
        self.tables.lock().unwrap().exercises.len()
    }

    pub fn workout_exercise_count(&self) -> usize {
        self.tables.lock().unwrap().workout_exercises.len()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tables.lock().unwrap()
    }
}

fn joined(tables: &Tables, row: &WorkoutExercise) -> WorkoutExercise {
    let exercise = tables.exercises.iter().find(|e| e.id == row.exercise_id);
    WorkoutExercise {
        exercise_name: exercise.map(|e| e.name.clone()).unwrap_or_default(),
        muscle_group: exercise.and_then(|e| e.muscle_group.clone()),
        ..row.clone()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DatabaseError> {
        Ok(self.tables().users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        Ok(self
            .tables()
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .map(User::from))
    }

    async fn create(&self, user: NewUser) -> Result<User, DatabaseError> {
        let password_hash = password::hash_password(&user.password).await?;
        let mut tables = self.tables();
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(DatabaseError::UniqueViolation("users_email_key".into()));
        }
        let record = UserRecord {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash,
            created_at: Utc::now(),
        };
        tables.users.push(record.clone());
        Ok(record.into())
    }
}

#[async_trait]
impl WorkoutRepository for MemoryStore {
    async fn list(&self, owner_id: Uuid) -> Result<Vec<Workout>, DatabaseError> {
        let mut rows: Vec<Workout> = self
            .tables()
            .workouts
            .iter()
            .filter(|w| w.user_id == owner_id)
            .cloned()
            .collect();
        rows.reverse();
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid, owner_id: Uuid) -> Result<Option<Workout>, DatabaseError> {
        Ok(self
            .tables()
            .workouts
            .iter()
            .find(|w| w.id == id && w.user_id == owner_id)
            .cloned())
    }

    async fn find_by_name(&self, name: &str, owner_id: Uuid) -> Result<Option<Workout>, DatabaseError> {
        Ok(self
            .tables()
            .workouts
            .iter()
            .find(|w| w.name == name && w.user_id == owner_id)
            .cloned())
    }

    async fn create(&self, workout: NewWorkout) -> Result<Workout, DatabaseError> {
        let mut tables = self.tables();
        if tables
            .workouts
            .iter()
            .any(|w| w.user_id == workout.user_id && w.name == workout.name)
        {
            return Err(DatabaseError::UniqueViolation("workouts_user_id_name_key".into()));
        }
        let row = Workout {
            id: Uuid::new_v4(),
            user_id: workout.user_id,
            name: workout.name,
            created_at: Utc::now(),
        };
        tables.workouts.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: Uuid, name: &str, owner_id: Uuid) -> Result<Option<Workout>, DatabaseError> {
        let mut tables = self.tables();
        if tables
            .workouts
            .iter()
            .any(|w| w.user_id == owner_id && w.name == name && w.id != id)
        {
            return Err(DatabaseError::UniqueViolation("workouts_user_id_name_key".into()));
        }
        let Some(row) = tables
            .workouts
            .iter_mut()
            .find(|w| w.id == id && w.user_id == owner_id)
        else {
            return Ok(None);
        };
        row.name = name.to_string();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<bool, DatabaseError> {
        let mut tables = self.tables();
        let before = tables.workouts.len();
        tables.workouts.retain(|w| !(w.id == id && w.user_id == owner_id));
        let deleted = tables.workouts.len() < before;
        if deleted {
            tables.workout_exercises.retain(|we| we.workout_id != id);
        }
        Ok(deleted)
    }
}

#[async_trait]
impl ExerciseRepository for MemoryStore {
    async fn list(&self, owner_id: Uuid) -> Result<Vec<Exercise>, DatabaseError> {
        let mut rows: Vec<Exercise> = self
            .tables()
            .exercises
            .iter()
            .filter(|e| e.user_id == owner_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid, owner_id: Uuid) -> Result<Option<Exercise>, DatabaseError> {
        Ok(self
            .tables()
            .exercises
            .iter()
            .find(|e| e.id == id && e.user_id == owner_id)
            .cloned())
    }

    async fn find_by_name(&self, name: &str, owner_id: Uuid) -> Result<Option<Exercise>, DatabaseError> {
        Ok(self
            .tables()
            .exercises
            .iter()
            .find(|e| e.name == name && e.user_id == owner_id)
            .cloned())
    }

    async fn create(&self, exercise: NewExercise) -> Result<Exercise, DatabaseError> {
        let mut tables = self.tables();
        if tables
            .exercises
            .iter()
            .any(|e| e.user_id == exercise.user_id && e.name == exercise.name)
        {
            return Err(DatabaseError::UniqueViolation("exercises_user_id_name_key".into()));
        }
        let row = Exercise {
            id: Uuid::new_v4(),
            user_id: exercise.user_id,
            name: exercise.name,
            muscle_group: exercise.muscle_group,
            created_at: Utc::now(),
        };
        tables.exercises.push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: ExerciseChanges,
        owner_id: Uuid,
    ) -> Result<Option<Exercise>, DatabaseError> {
        let mut tables = self.tables();
        if tables
            .exercises
            .iter()
            .any(|e| e.user_id == owner_id && e.name == changes.name && e.id != id)
        {
            return Err(DatabaseError::UniqueViolation("exercises_user_id_name_key".into()));
        }
        let Some(row) = tables
            .exercises
            .iter_mut()
            .find(|e| e.id == id && e.user_id == owner_id)
        else {
            return Ok(None);
        };
        row.name = changes.name;
        row.muscle_group = changes.muscle_group;
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<bool, DatabaseError> {
        let mut tables = self.tables();
        let before = tables.exercises.len();
        tables.exercises.retain(|e| !(e.id == id && e.user_id == owner_id));
        let deleted = tables.exercises.len() < before;
        if deleted {
            tables.workout_exercises.retain(|we| we.exercise_id != id);
        }
        Ok(deleted)
    }
}

#[async_trait]
impl WorkoutExerciseRepository for MemoryStore {
    async fn list_by_workout(
        &self,
        workout_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Vec<WorkoutExercise>, DatabaseError> {
        let tables = self.tables();
        Ok(tables
            .workout_exercises
            .iter()
            .filter(|we| we.workout_id == workout_id && we.user_id == owner_id)
            .map(|we| joined(&tables, we))
            .collect())
    }

    async fn find_by_id(&self, id: Uuid, owner_id: Uuid) -> Result<Option<WorkoutExercise>, DatabaseError> {
        let tables = self.tables();
        Ok(tables
            .workout_exercises
            .iter()
            .find(|we| we.id == id && we.user_id == owner_id)
            .map(|we| joined(&tables, we)))
    }

    async fn find_by_workout_and_exercise(
        &self,
        workout_id: Uuid,
        exercise_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<WorkoutExercise>, DatabaseError> {
        let tables = self.tables();
        Ok(tables
            .workout_exercises
            .iter()
            .find(|we| {
                we.workout_id == workout_id && we.exercise_id == exercise_id && we.user_id == owner_id
            })
            .map(|we| joined(&tables, we)))
    }

    async fn create(&self, association: NewWorkoutExercise) -> Result<WorkoutExercise, DatabaseError> {
        let mut tables = self.tables();
        if !tables.workouts.iter().any(|w| w.id == association.workout_id)
            || !tables.exercises.iter().any(|e| e.id == association.exercise_id)
        {
            return Err(DatabaseError::ForeignKeyViolation("workout_exercises_fkey".into()));
        }
        if tables.workout_exercises.iter().any(|we| {
            we.workout_id == association.workout_id && we.exercise_id == association.exercise_id
        }) {
            return Err(DatabaseError::UniqueViolation(
                "workout_exercises_workout_id_exercise_id_key".into(),
            ));
        }
        let now = Utc::now();
        let row = WorkoutExercise {
            id: Uuid::new_v4(),
            workout_id: association.workout_id,
            exercise_id: association.exercise_id,
            user_id: association.user_id,
            weight: association.weight,
            sets: association.sets,
            reps: association.reps,
            created_at: now,
            updated_at: now,
            exercise_name: String::new(),
            muscle_group: None,
        };
        tables.workout_exercises.push(row.clone());
        Ok(joined(&tables, &row))
    }

    async fn update(
        &self,
        id: Uuid,
        changes: WorkoutExerciseChanges,
        owner_id: Uuid,
    ) -> Result<Option<WorkoutExercise>, DatabaseError> {
        let mut tables = self.tables();
        let Some(row) = tables
            .workout_exercises
            .iter_mut()
            .find(|we| we.id == id && we.user_id == owner_id)
        else {
            return Ok(None);
        };
        row.weight = changes.weight;
        row.sets = changes.sets;
        row.reps = changes.reps;
        row.updated_at = Utc::now();
        let row = row.clone();
        Ok(Some(joined(&tables, &row)))
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<bool, DatabaseError> {
        let mut tables = self.tables();
        let before = tables.workout_exercises.len();
        tables
            .workout_exercises
            .retain(|we| !(we.id == id && we.user_id == owner_id));
        Ok(tables.workout_exercises.len() < before)
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

pub fn app_state(store: Arc<MemoryStore>) -> AppState {
    AppState {
        users: store.clone(),
        workouts: store.clone(),
        exercises: store.clone(),
        workout_exercises: store.clone(),
        health: store,
        tokens: TokenService::new(TEST_SECRET, 1).unwrap(),
    }
}

/// Router over a fresh in-memory store
pub fn test_app() -> (Router, Arc<MemoryStore>) {
    let store = MemoryStore::new();
    let config = ApiConfig {
        enable_request_logging: false,
        max_request_size_bytes: 64 * 1024,
    };
    (app(app_state(store.clone()), &config), store)
}

/// Send one request through the router, returning status and parsed JSON
/// body (`Value::Null` for an empty body).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Register a user and return their bearer token
pub async fn register(app: &Router, name: &str, email: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/auth/register",
        None,
        Some(serde_json::json!({
            "name": name,
            "email": email,
            "password": "password123",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
    body["token"].as_str().unwrap().to_string()
}

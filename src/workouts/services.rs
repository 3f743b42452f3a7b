//! Calorie math and streak logic. Rates are kcal per minute at medium
//! intensity; the multiplier scales for low/high.

use std::collections::HashSet;

use time::Date;

use crate::models::{Intensity, Workout, WorkoutType};

pub fn base_rate(workout_type: WorkoutType) -> f64 {
    match workout_type {
        WorkoutType::Strength => 5.0,
        WorkoutType::Cardio => 8.0,
        WorkoutType::Hiit => 12.0,
        WorkoutType::Yoga => 3.0,
        WorkoutType::Swimming => 9.0,
        WorkoutType::Running => 10.0,
        WorkoutType::Cycling => 7.0,
        WorkoutType::Other => 5.0,
    }
}

pub fn intensity_multiplier(intensity: Intensity) -> f64 {
    match intensity {
        Intensity::Low => 0.7,
        Intensity::Medium => 1.0,
        Intensity::High => 1.3,
    }
}

/// Server-side derivation; any client-supplied value is ignored.
pub fn calories_burned(workout_type: WorkoutType, duration: i32, intensity: Intensity) -> i32 {
    (base_rate(workout_type) * f64::from(duration) * intensity_multiplier(intensity)).round() as i32
}

/// Consecutive calendar days with at least one workout, counting back from
/// `today` inclusive. Multiple workouts on one day count once; a day with
/// no workout ends the run, so no workout today means a streak of zero.
pub fn workout_streak(dates: &[Date], today: Date) -> i32 {
    let days: HashSet<Date> = dates.iter().copied().collect();
    let mut streak = 0;
    let mut cursor = today;
    while days.contains(&cursor) {
        streak += 1;
        match cursor.previous_day() {
            Some(prev) => cursor = prev,
            None => break,
        }
    }
    streak
}

pub fn total_calories(workouts: &[Workout]) -> i64 {
    workouts.iter().map(|w| i64::from(w.calories_burned)).sum()
}

pub fn total_duration(workouts: &[Workout]) -> i64 {
    workouts.iter().map(|w| i64::from(w.duration)).sum()
}

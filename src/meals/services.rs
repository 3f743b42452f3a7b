use crate::models::{Meal, MealType};

use super::dto::DailyTotals;

/// Sums the nutrition of every meal in the slice. Meals logged without
/// nutrition contribute nothing.
pub fn daily_totals(meals: &[Meal]) -> DailyTotals {
    let mut totals = DailyTotals::default();
    for nutrition in meals.iter().filter_map(|m| m.nutrition.as_ref()) {
        totals.total_calories += i64::from(nutrition.calories);
        totals.total_protein += i64::from(nutrition.protein);
        totals.total_carbs += i64::from(nutrition.carbs);
        totals.total_fat += i64::from(nutrition.fat);
    }
    totals
}

pub fn default_meal_name(meal_type: MealType) -> String {
    match meal_type {
        MealType::Breakfast => "Breakfast",
        MealType::Lunch => "Lunch",
        MealType::Dinner => "Dinner",
        MealType::Snack => "Snack",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use time::macros::date;
    use time::OffsetDateTime;
    use uuid::Uuid;

    use crate::models::{MealSource, Nutrition};

    use super::*;

    fn meal(nutrition: Option<Nutrition>) -> Meal {
        Meal {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "test".into(),
            meal_type: MealType::Lunch,
            source: MealSource::Homemade,
            meal_date: date!(2024 - 06 - 10),
            nutrition,
            recipe_id: None,
            notes: None,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn totals_sum_across_meals() {
        let meals = vec![
            meal(Some(Nutrition {
                calories: 450,
                protein: 30,
                carbs: 40,
                fat: 15,
            })),
            meal(Some(Nutrition {
                calories: 600,
                protein: 25,
                carbs: 70,
                fat: 20,
            })),
        ];
        let totals = daily_totals(&meals);
        assert_eq!(totals.total_calories, 1050);
        assert_eq!(totals.total_protein, 55);
        assert_eq!(totals.total_carbs, 110);
        assert_eq!(totals.total_fat, 35);
    }

    #[test]
    fn meals_without_nutrition_are_skipped() {
        let meals = vec![
            meal(Some(Nutrition {
                calories: 300,
                protein: 10,
                carbs: 30,
                fat: 12,
            })),
            meal(None),
        ];
        let totals = daily_totals(&meals);
        assert_eq!(totals.total_calories, 300);
        assert_eq!(totals.total_fat, 12);
    }

    #[test]
    fn empty_log_sums_to_zero() {
        assert_eq!(daily_totals(&[]), DailyTotals::default());
    }

    #[test]
    fn default_names_follow_meal_type() {
        assert_eq!(default_meal_name(MealType::Breakfast), "Breakfast");
        assert_eq!(default_meal_name(MealType::Snack), "Snack");
    }
}

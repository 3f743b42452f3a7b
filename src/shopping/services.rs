//! Keyword categorization for shopping items. The lists are checked in a
//! fixed order and the first hit wins, so "bell pepper" lands in vegetable
//! before the seasoning list ever sees "pepper".

use uuid::Uuid;

use crate::models::{NewShoppingItem, RecipeIngredient, ShoppingCategory, ShoppingItem};

const PROTEIN_KEYWORDS: &[&str] = &[
    "chicken", "beef", "pork", "turkey", "fish", "salmon", "tuna", "shrimp", "egg", "tofu",
    "yogurt", "cheese",
];

const VEGETABLE_KEYWORDS: &[&str] = &[
    "broccoli",
    "spinach",
    "tomato",
    "onion",
    "garlic",
    "ginger",
    "carrot",
    "mushroom",
    "lettuce",
    "asparagus",
    "bean",
    "bell pepper",
    "avocado",
    "banana",
    "berries",
    "lemon",
];

const STAPLE_KEYWORDS: &[&str] = &[
    "rice",
    "pasta",
    "noodle",
    "oat",
    "bread",
    "tortilla",
    "quinoa",
    "potato",
    "flour",
    "protein powder",
];

const SEASONING_KEYWORDS: &[&str] = &[
    "salt", "sugar", "oil", "sauce", "vinegar", "pepper", "honey", "mirin", "wine", "paprika",
    "cumin", "chili", "saffron", "spice",
];

/// Case-insensitive substring match against the ordered keyword lists.
/// Assigned once at creation and never re-derived.
pub fn infer_category(name: &str) -> ShoppingCategory {
    let name = name.to_lowercase();
    let hit = |keywords: &[&str]| keywords.iter().any(|k| name.contains(k));
    if hit(PROTEIN_KEYWORDS) {
        ShoppingCategory::Protein
    } else if hit(VEGETABLE_KEYWORDS) {
        ShoppingCategory::Vegetable
    } else if hit(STAPLE_KEYWORDS) {
        ShoppingCategory::Staple
    } else if hit(SEASONING_KEYWORDS) {
        ShoppingCategory::Seasoning
    } else {
        ShoppingCategory::Other
    }
}

/// Builds the new items a recipe adds to the list. An ingredient is skipped
/// when an unchecked item with the exact same name already exists, whether
/// from the list or from earlier in this batch; checked items count as
/// bought and never block a re-add.
pub fn plan_additions(
    user_id: Uuid,
    recipe_id: Uuid,
    recipe_title: &str,
    ingredients: &[RecipeIngredient],
    existing: &[ShoppingItem],
) -> Vec<NewShoppingItem> {
    let mut planned: Vec<NewShoppingItem> = Vec::new();
    for ing in ingredients {
        let blocked = existing
            .iter()
            .any(|item| !item.checked && item.name == ing.name)
            || planned.iter().any(|new| new.name == ing.name);
        if blocked {
            continue;
        }
        planned.push(NewShoppingItem {
            user_id,
            name: ing.name.clone(),
            amount: ing.amount.clone(),
            category: infer_category(&ing.name),
            recipe_id: Some(recipe_id),
            recipe_name: Some(recipe_title.to_string()),
        });
    }
    planned
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::*;

    #[test]
    fn categories_follow_keyword_order() {
        assert_eq!(infer_category("chicken breast"), ShoppingCategory::Protein);
        assert_eq!(infer_category("Greek Yogurt"), ShoppingCategory::Protein);
        assert_eq!(infer_category("cherry tomatoes"), ShoppingCategory::Vegetable);
        assert_eq!(infer_category("jasmine rice"), ShoppingCategory::Staple);
        assert_eq!(infer_category("soy sauce"), ShoppingCategory::Seasoning);
        assert_eq!(infer_category("chia seeds"), ShoppingCategory::Other);
    }

    #[test]
    fn bell_pepper_is_a_vegetable_but_black_pepper_seasons() {
        assert_eq!(infer_category("bell pepper"), ShoppingCategory::Vegetable);
        assert_eq!(infer_category("black pepper"), ShoppingCategory::Seasoning);
    }

    #[test]
    fn protein_powder_stays_a_staple() {
        // "protein" alone is not a protein keyword
        assert_eq!(infer_category("protein powder"), ShoppingCategory::Staple);
    }

    fn ingredient(name: &str) -> RecipeIngredient {
        RecipeIngredient {
            id: Uuid::new_v4(),
            recipe_id: Uuid::new_v4(),
            name: name.to_string(),
            amount: "1".to_string(),
            optional: false,
            sort_order: 0,
        }
    }

    fn item(user_id: Uuid, name: &str, checked: bool) -> ShoppingItem {
        ShoppingItem {
            id: Uuid::new_v4(),
            user_id,
            name: name.to_string(),
            amount: "1".to_string(),
            category: infer_category(name),
            checked,
            recipe_id: None,
            recipe_name: None,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn unchecked_duplicates_are_skipped() {
        let user_id = Uuid::new_v4();
        let existing = vec![item(user_id, "broccoli", false)];
        let additions = plan_additions(
            user_id,
            Uuid::new_v4(),
            "Salmon Tray Bake",
            &[ingredient("broccoli"), ingredient("salmon fillet")],
            &existing,
        );
        assert_eq!(additions.len(), 1);
        assert_eq!(additions[0].name, "salmon fillet");
    }

    #[test]
    fn repeated_names_within_one_recipe_add_once() {
        let user_id = Uuid::new_v4();
        let additions = plan_additions(
            user_id,
            Uuid::new_v4(),
            "Salmon Tray Bake",
            &[ingredient("olive oil"), ingredient("olive oil")],
            &[],
        );
        assert_eq!(additions.len(), 1);
    }

    #[test]
    fn checked_items_do_not_block_re_adding() {
        let user_id = Uuid::new_v4();
        let existing = vec![item(user_id, "broccoli", true)];
        let additions = plan_additions(
            user_id,
            Uuid::new_v4(),
            "Salmon Tray Bake",
            &[ingredient("broccoli")],
            &existing,
        );
        assert_eq!(additions.len(), 1);
    }

    #[test]
    fn additions_carry_the_recipe_reference() {
        let user_id = Uuid::new_v4();
        let recipe_id = Uuid::new_v4();
        let additions = plan_additions(
            user_id,
            recipe_id,
            "Overnight Oats",
            &[ingredient("rolled oats")],
            &[],
        );
        assert_eq!(additions[0].recipe_id, Some(recipe_id));
        assert_eq!(additions[0].recipe_name.as_deref(), Some("Overnight Oats"));
        assert_eq!(additions[0].category, ShoppingCategory::Staple);
    }
}

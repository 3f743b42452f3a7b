//! Seed data for the recipe catalog. Loaded into the memory store at
//! startup and inserted into Postgres on first boot when the catalog is
//! empty.

use time::OffsetDateTime;
use uuid::Uuid;

use crate::models::{Difficulty, Nutrition, Recipe, RecipeIngredient, RecipeStep};

pub struct SeedRecipe {
    pub recipe: Recipe,
    pub ingredients: Vec<RecipeIngredient>,
    pub steps: Vec<RecipeStep>,
}

struct Def {
    title: &'static str,
    description: &'static str,
    slug: &'static str,
    cook_time: i32,
    difficulty: Difficulty,
    servings: i32,
    prep_friendly: bool,
    nutrition: Nutrition,
    tags: &'static [&'static str],
    contexts: &'static [&'static str],
    // (name, amount, optional)
    ingredients: &'static [(&'static str, &'static str, bool)],
    // (description, duration minutes)
    steps: &'static [(&'static str, Option<i32>)],
}

fn build(def: Def) -> SeedRecipe {
    let recipe_id = Uuid::new_v4();
    let now = OffsetDateTime::now_utc();
    SeedRecipe {
        recipe: Recipe {
            id: recipe_id,
            title: def.title.to_string(),
            description: def.description.to_string(),
            source: "FitMeal Test Kitchen".to_string(),
            source_url: format!("https://recipes.fitmeal.example/{}", def.slug),
            cook_time: def.cook_time,
            difficulty: def.difficulty,
            servings: def.servings,
            prep_friendly: def.prep_friendly,
            nutrition: def.nutrition,
            tags: def.tags.iter().map(|t| t.to_string()).collect(),
            contexts: def.contexts.iter().map(|c| c.to_string()).collect(),
            created_at: now,
        },
        ingredients: def
            .ingredients
            .iter()
            .enumerate()
            .map(|(i, (name, amount, optional))| RecipeIngredient {
                id: Uuid::new_v4(),
                recipe_id,
                name: name.to_string(),
                amount: amount.to_string(),
                optional: *optional,
                sort_order: i as i32,
            })
            .collect(),
        steps: def
            .steps
            .iter()
            .enumerate()
            .map(|(i, (description, duration))| RecipeStep {
                id: Uuid::new_v4(),
                recipe_id,
                step_order: i as i32,
                description: description.to_string(),
                duration: *duration,
            })
            .collect(),
    }
}

/// The built-in catalog. Covers every recommendation rule: quick
/// high-protein options, sub-15-minute beginner dishes, long advanced
/// projects, and large-batch crowd feeders.
pub fn recipe_catalog() -> Vec<SeedRecipe> {
    let defs = vec![
        Def {
            title: "Grilled Chicken Rice Bowl",
            description: "Marinated chicken over jasmine rice with charred broccoli. \
                          The default after a hard session.",
            slug: "grilled-chicken-rice-bowl",
            cook_time: 20,
            difficulty: Difficulty::Beginner,
            servings: 2,
            prep_friendly: true,
            nutrition: Nutrition {
                calories: 520,
                protein: 38,
                carbs: 55,
                fat: 12,
            },
            tags: &["high-protein", "meal-prep"],
            contexts: &["post_workout", "friends_over"],
            ingredients: &[
                ("chicken breast", "400 g", false),
                ("jasmine rice", "1 cup", false),
                ("broccoli", "1 head", false),
                ("soy sauce", "3 tbsp", false),
                ("sesame oil", "1 tbsp", false),
                ("garlic", "3 cloves", false),
            ],
            steps: &[
                ("Marinate the chicken in soy sauce, sesame oil and garlic.", Some(10)),
                ("Cook the rice.", Some(12)),
                ("Grill the chicken over high heat until cooked through.", Some(8)),
                ("Char the broccoli in the same pan and assemble the bowls.", Some(5)),
            ],
        },
        Def {
            title: "Protein Overnight Oats",
            description: "Assemble the night before; breakfast is waiting when you wake up.",
            slug: "protein-overnight-oats",
            cook_time: 10,
            difficulty: Difficulty::Beginner,
            servings: 1,
            prep_friendly: true,
            nutrition: Nutrition {
                calories: 420,
                protein: 28,
                carbs: 52,
                fat: 11,
            },
            tags: &["breakfast", "no-cook", "meal-prep"],
            contexts: &["post_workout", "busy"],
            ingredients: &[
                ("rolled oats", "60 g", false),
                ("greek yogurt", "150 g", false),
                ("milk", "100 ml", false),
                ("chia seeds", "1 tbsp", true),
                ("blueberries", "a handful", true),
                ("honey", "1 tsp", true),
            ],
            steps: &[
                ("Stir oats, yogurt and milk together in a jar.", Some(3)),
                ("Top with chia seeds, blueberries and honey.", Some(2)),
                ("Refrigerate overnight.", None),
            ],
        },
        Def {
            title: "Five-Minute Tuna Wrap",
            description: "Canned tuna, yogurt and crunch in a tortilla. Faster than the queue \
                          at the deli.",
            slug: "five-minute-tuna-wrap",
            cook_time: 5,
            difficulty: Difficulty::Beginner,
            servings: 1,
            prep_friendly: false,
            nutrition: Nutrition {
                calories: 380,
                protein: 26,
                carbs: 34,
                fat: 14,
            },
            tags: &["lunch", "no-cook"],
            contexts: &["busy", "post_workout"],
            ingredients: &[
                ("canned tuna", "1 tin", false),
                ("whole wheat tortilla", "1 large", false),
                ("greek yogurt", "2 tbsp", false),
                ("lettuce", "2 leaves", false),
                ("black pepper", "to taste", true),
            ],
            steps: &[
                ("Drain the tuna and mix with yogurt and pepper.", Some(2)),
                ("Pile onto the tortilla with lettuce and roll tight.", Some(3)),
            ],
        },
        Def {
            title: "Slow-Braised Beef Ragu",
            description: "Three unattended hours turn chuck into silk. Freezes beautifully.",
            slug: "slow-braised-beef-ragu",
            cook_time: 180,
            difficulty: Difficulty::Advanced,
            servings: 6,
            prep_friendly: true,
            nutrition: Nutrition {
                calories: 610,
                protein: 42,
                carbs: 48,
                fat: 24,
            },
            tags: &["dinner", "batch-cooking"],
            contexts: &["have_time", "friends_over"],
            ingredients: &[
                ("beef chuck", "1 kg", false),
                ("crushed tomatoes", "800 g", false),
                ("onion", "2", false),
                ("carrot", "2", false),
                ("red wine", "250 ml", true),
                ("pappardelle pasta", "500 g", false),
                ("parmesan", "to serve", true),
            ],
            steps: &[
                ("Sear the beef hard on all sides.", Some(10)),
                ("Soften onion and carrot, deglaze with wine.", Some(10)),
                ("Add tomatoes, return the beef and braise low and slow.", Some(150)),
                ("Shred the beef into the sauce and toss with pasta.", Some(10)),
            ],
        },
        Def {
            title: "Sheet-Pan Salmon and Greens",
            description: "One tray, one oven, twenty-five minutes, no washing up worth \
                          mentioning.",
            slug: "sheet-pan-salmon-and-greens",
            cook_time: 25,
            difficulty: Difficulty::Easy,
            servings: 2,
            prep_friendly: false,
            nutrition: Nutrition {
                calories: 460,
                protein: 34,
                carbs: 18,
                fat: 26,
            },
            tags: &["dinner", "high-protein"],
            contexts: &["post_workout", "friends_over"],
            ingredients: &[
                ("salmon fillet", "2 portions", false),
                ("asparagus", "1 bunch", false),
                ("bell pepper", "1", false),
                ("olive oil", "2 tbsp", false),
                ("lemon", "1", false),
            ],
            steps: &[
                ("Heat the oven to 220 C.", Some(5)),
                ("Toss vegetables in oil, lay salmon on top, season.", Some(5)),
                ("Roast until the salmon flakes.", Some(15)),
            ],
        },
        Def {
            title: "Weekend Paella",
            description: "A wide pan, saffron, and a table of people to feed. Not a weeknight \
                          project.",
            slug: "weekend-paella",
            cook_time: 90,
            difficulty: Difficulty::Advanced,
            servings: 8,
            prep_friendly: false,
            nutrition: Nutrition {
                calories: 580,
                protein: 29,
                carbs: 68,
                fat: 16,
            },
            tags: &["dinner", "crowd"],
            contexts: &["friends_over", "have_time"],
            ingredients: &[
                ("bomba rice", "600 g", false),
                ("shrimp", "400 g", false),
                ("chicken thighs", "400 g", false),
                ("saffron", "1 pinch", false),
                ("green beans", "200 g", false),
                ("smoked paprika", "2 tsp", false),
            ],
            steps: &[
                ("Brown the chicken, then the shrimp; set aside.", Some(15)),
                ("Build the sofrito and toast the rice with saffron.", Some(20)),
                ("Add stock and simmer without stirring.", Some(25)),
                ("Nestle the proteins back in and rest before serving.", Some(10)),
            ],
        },
        Def {
            title: "Caprese Pasta Salad",
            description: "Cold pasta, tomatoes and mozzarella. Fifteen minutes, but the \
                          assembly rewards a little care.",
            slug: "caprese-pasta-salad",
            cook_time: 15,
            difficulty: Difficulty::Easy,
            servings: 4,
            prep_friendly: false,
            nutrition: Nutrition {
                calories: 440,
                protein: 15,
                carbs: 58,
                fat: 16,
            },
            tags: &["lunch", "vegetarian"],
            contexts: &["friends_over"],
            ingredients: &[
                ("penne pasta", "400 g", false),
                ("cherry tomatoes", "300 g", false),
                ("mozzarella", "200 g", false),
                ("fresh basil", "1 bunch", false),
                ("balsamic vinegar", "2 tbsp", false),
            ],
            steps: &[
                ("Boil the pasta, rinse cold.", Some(10)),
                ("Halve tomatoes, tear mozzarella and basil, dress and toss.", Some(5)),
            ],
        },
        Def {
            title: "Green Power Smoothie",
            description: "Spinach, banana and whatever fruit is about to turn. Drinkable in \
                          five minutes.",
            slug: "green-power-smoothie",
            cook_time: 5,
            difficulty: Difficulty::Beginner,
            servings: 1,
            prep_friendly: false,
            nutrition: Nutrition {
                calories: 210,
                protein: 12,
                carbs: 38,
                fat: 4,
            },
            tags: &["breakfast", "no-cook"],
            contexts: &["busy"],
            ingredients: &[
                ("spinach", "2 handfuls", false),
                ("banana", "1", false),
                ("milk", "250 ml", false),
                ("peanut butter", "1 tbsp", true),
            ],
            steps: &[("Blend everything until smooth.", Some(3))],
        },
        Def {
            title: "Chickpea Buddha Bowl",
            description: "Roasted chickpeas and sweet potato over quinoa with a tahini \
                          drizzle.",
            slug: "chickpea-buddha-bowl",
            cook_time: 35,
            difficulty: Difficulty::Easy,
            servings: 2,
            prep_friendly: true,
            nutrition: Nutrition {
                calories: 510,
                protein: 22,
                carbs: 70,
                fat: 15,
            },
            tags: &["vegetarian", "meal-prep"],
            contexts: &["have_time"],
            ingredients: &[
                ("chickpeas", "400 g", false),
                ("sweet potato", "2", false),
                ("quinoa", "1 cup", false),
                ("avocado", "1", false),
                ("tahini", "2 tbsp", false),
                ("cumin", "1 tsp", false),
            ],
            steps: &[
                ("Roast chickpeas and sweet potato with cumin.", Some(25)),
                ("Cook the quinoa.", Some(15)),
                ("Bowl up with avocado and thinned tahini.", Some(5)),
            ],
        },
        Def {
            title: "Turkey Chili Meal Prep",
            description: "A big pot of lean chili that tastes better on day three. Portions \
                          straight into the freezer.",
            slug: "turkey-chili-meal-prep",
            cook_time: 60,
            difficulty: Difficulty::Easy,
            servings: 6,
            prep_friendly: true,
            nutrition: Nutrition {
                calories: 480,
                protein: 31,
                carbs: 42,
                fat: 17,
            },
            tags: &["batch-cooking", "high-protein", "meal-prep"],
            contexts: &["friends_over", "have_time"],
            ingredients: &[
                ("ground turkey", "800 g", false),
                ("kidney beans", "400 g", false),
                ("crushed tomatoes", "800 g", false),
                ("onion", "2", false),
                ("chili powder", "2 tbsp", false),
                ("rice", "to serve", true),
            ],
            steps: &[
                ("Brown the turkey with onion.", Some(10)),
                ("Add spices, beans and tomatoes; simmer.", Some(45)),
                ("Portion into containers once cool.", Some(5)),
            ],
        },
    ];

    defs.into_iter().map(build).collect()
}

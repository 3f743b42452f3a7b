//! Context rules for recipe suggestions. Each context is a fixed threshold
//! filter plus an ordering; nothing here is learned or personalized.

use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

use crate::models::{Difficulty, Recipe};

pub const DEFAULT_LIMIT: usize = 5;
pub const MAX_LIMIT: usize = 50;

fn matches_context(context: &str, recipe: &Recipe) -> bool {
    match context {
        "post_workout" => recipe.cook_time <= 30 && recipe.nutrition.protein >= 25,
        "busy" => recipe.cook_time <= 15 && recipe.difficulty == Difficulty::Beginner,
        "have_time" => matches!(recipe.difficulty, Difficulty::Advanced | Difficulty::Easy),
        "friends_over" => recipe.servings >= 2,
        _ => true,
    }
}

fn order(context: &str, picks: &mut [Recipe], rng: &mut impl Rng) {
    match context {
        "post_workout" => picks.sort_by(|a, b| b.nutrition.protein.cmp(&a.nutrition.protein)),
        "busy" => picks.sort_by_key(|r| r.cook_time),
        "friends_over" => picks.sort_by(|a, b| b.servings.cmp(&a.servings)),
        // have_time and unrecognized contexts are served in random order
        _ => picks.shuffle(rng),
    }
}

/// Applies the context rule to the catalog and returns at most `limit`
/// recipes. An empty rule result falls back to the shuffled full catalog, so
/// the result is only empty when the catalog is. `exclude` drops previously
/// shown recipes, unless that would leave fewer than two.
pub fn recommend(
    catalog: &[Recipe],
    context: &str,
    exclude: &[Uuid],
    limit: usize,
    rng: &mut impl Rng,
) -> Vec<Recipe> {
    let mut picks: Vec<Recipe> = catalog
        .iter()
        .filter(|r| matches_context(context, r))
        .cloned()
        .collect();
    if picks.is_empty() {
        picks = catalog.to_vec();
        picks.shuffle(rng);
    } else {
        order(context, &mut picks, rng);
    }

    if !exclude.is_empty() {
        let remaining: Vec<Recipe> = picks
            .iter()
            .filter(|r| !exclude.contains(&r.id))
            .cloned()
            .collect();
        if remaining.len() >= 2 {
            picks = remaining;
        }
    }

    picks.truncate(limit);
    picks
}

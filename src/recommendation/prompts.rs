/*!
 * Prompt templates for dish recommendations.
 */

use super::DietProfile;

/// Prompt template with `{placeholder}` substitution
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    /// Dish types suited to eating out
    pub const DISH_TYPES: &'static str = r#"You are a professional nutritionist. Based on the user's preferences, health goal, and allergies, recommend three dish types that would be best suited when dining at a restaurant.

- **Dietary Preferences:** {preferences}
- **Health Goal:** {goal}
- **Allergens to Avoid:** {allergies}

Provide exactly **three dish types**, one per line (e.g., "Grilled Salmon", "Vegan Stir Fry", "Quinoa Salad")."#;

    /// Breakfast, lunch and dinner from the available ingredients
    pub const MEAL_PLAN: &'static str = r#"You are a professional nutritionist and meal planner. Based on the following dietary requirements, recommend three meal options (breakfast, lunch, and dinner) that can be made using the available ingredients. Each recommendation should be a **specific dish name only**, without numbering or extra text.

- **Dietary Preferences:** {preferences}
- **Health Goal:** {goal}
- **Allergens to Avoid:** {allergies}
- **Available Ingredients:** {ingredients}

### Response Format
Provide exactly **three dish names**, one per line.
Then provide dietary advice on a single line starting with "Advice:". The advice should be specific to the recommended dishes and no more than **two sentences**.

Example Response:
1. Avocado Toast
2. Grilled Chicken Salad
3. Lentil Soup
4. Advice: This meal plan is well-balanced, providing healthy fats, lean protein, and fiber. Consider adding more leafy greens for extra vitamins."#;

    /// Nutrients of one dish as JSON
    pub const NUTRITION: &'static str = r#"Provide the approximate nutritional breakdown for "{dish}" per 500 grams.
Include:
- Calories
- Protein (grams)
- Carbohydrates (grams)
- Fat (grams)

Respond in **JSON format** only, example:
{"calories": 645, "protein": 49, "carbohydrates": 34, "fat": 34}"#;

    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    /// Replace every `{key}` with its value
    pub fn render(&self, values: &[(&str, &str)]) -> String {
        values.iter().fold(self.template.clone(), |text, (key, value)| {
            text.replace(&format!("{{{}}}", key), value)
        })
    }
}

/// Comma separated list, or "None" when empty
fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

/// Prompt asking for three dish types to look for at restaurants
pub fn dish_types_prompt(profile: &DietProfile) -> String {
    PromptTemplate::new(PromptTemplate::DISH_TYPES).render(&[
        ("preferences", &list_or_none(&profile.preferences)),
        ("goal", &profile.goal),
        ("allergies", &list_or_none(&profile.allergies)),
    ])
}

/// Prompt asking for a three meal plan and a line of advice
pub fn meal_plan_prompt(profile: &DietProfile) -> String {
    PromptTemplate::new(PromptTemplate::MEAL_PLAN).render(&[
        ("preferences", &list_or_none(&profile.preferences)),
        ("goal", &profile.goal),
        ("allergies", &list_or_none(&profile.allergies)),
        ("ingredients", &list_or_none(&profile.ingredients)),
    ])
}

/// Prompt asking for the nutrients of one dish
pub fn nutrition_prompt(dish: &str) -> String {
    PromptTemplate::new(PromptTemplate::NUTRITION).render(&[("dish", dish)])
}

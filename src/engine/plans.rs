//! Diet plan table
//!
//! Twelve fixed plans, one per (BMI category, diet type) pair.

use serde::Serialize;

use super::input::DietType;
use super::metrics::BmiCategory;

/// A canned diet plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DietPlan {
    pub title: &'static str,
    pub meals: &'static [&'static str],
    pub tips: &'static [&'static str],
}

/// Rows follow `BmiCategory` order, columns follow `DietType` order.
static DIET_PLANS: [[DietPlan; 3]; 4] = [
    // Underweight
    [
        DietPlan {
            title: "High-Calorie Vegetarian Diet",
            meals: &[
                "🌅 Breakfast: Paneer paratha + milk + almonds + banana",
                "🍽️ Mid-Morning: Peanut butter sandwich + mango smoothie",
                "🍛 Lunch: Rice + dal makhani + mixed veg curry + curd + ghee roti",
                "☕ Evening: Dry fruits (cashews, walnuts) + cheese cubes + fruit juice",
                "🌙 Dinner: 3 roti + paneer butter masala + raita + kheer",
            ],
            tips: &[
                "Eat every 2-3 hours",
                "Add ghee/butter to all meals",
                "Include paneer, tofu in every meal",
                "Consume nuts and dairy products regularly",
            ],
        },
        DietPlan {
            title: "High-Calorie Non-Vegetarian Diet",
            meals: &[
                "🌅 Breakfast: Egg bhurji (3 eggs) + bread + milk + banana",
                "🍽️ Mid-Morning: Chicken sandwich + protein shake",
                "🍛 Lunch: Rice + chicken curry + dal + egg + curd + ghee roti",
                "☕ Evening: Dry fruits + boiled eggs (2) + smoothie",
                "🌙 Dinner: 3 roti + butter chicken + fish fry + raita",
            ],
            tips: &[
                "Include eggs in breakfast daily",
                "Eat lean meats (chicken, fish) twice daily",
                "Add protein supplements if needed",
                "Consume calorie-dense non-veg items",
            ],
        },
        DietPlan {
            title: "High-Calorie Vegan Diet",
            meals: &[
                "🌅 Breakfast: Tofu scramble + avocado toast + almond milk + banana",
                "🍽️ Mid-Morning: Peanut butter + apple + vegan protein shake",
                "🍛 Lunch: Brown rice + chickpea curry + tofu + mixed dal + tahini",
                "☕ Evening: Mixed nuts + hummus + dates + coconut milk smoothie",
                "🌙 Dinner: Quinoa + lentil curry + roasted vegetables + flax seeds",
            ],
            tips: &[
                "Use plant-based protein sources (tofu, tempeh, legumes)",
                "Add nuts, seeds, and nut butters liberally",
                "Include avocado and coconut products",
                "Consider vegan protein supplements",
            ],
        },
    ],
    // Healthy
    [
        DietPlan {
            title: "Balanced Vegetarian Diet",
            meals: &[
                "🌅 Breakfast: Oats/poha + fruits + paneer + green tea",
                "🍽️ Mid-Morning: Curd + handful of almonds",
                "🍛 Lunch: 2 roti + dal + mixed veg + salad + curd",
                "☕ Evening: Sprouts chat + green tea + fruit",
                "🌙 Dinner: Soup + 2 chapati + paneer curry + cucumber salad",
            ],
            tips: &[
                "Maintain regular meal times",
                "Include variety of vegetables and pulses",
                "Stay hydrated (8-10 glasses water)",
                "Exercise 30 mins daily",
            ],
        },
        DietPlan {
            title: "Balanced Non-Vegetarian Diet",
            meals: &[
                "🌅 Breakfast: Boiled eggs (2) + oats + fruits + milk",
                "🍽️ Mid-Morning: Yogurt + nuts + banana",
                "🍛 Lunch: 2 roti + chicken/fish curry + dal + salad",
                "☕ Evening: Boiled egg + fruit + green tea",
                "🌙 Dinner: Soup + 2 chapati + grilled chicken + vegetables",
            ],
            tips: &[
                "Include lean protein in every meal",
                "Eat fish 2-3 times per week",
                "Balance with plenty of vegetables",
                "Regular exercise essential",
            ],
        },
        DietPlan {
            title: "Balanced Vegan Diet",
            meals: &[
                "🌅 Breakfast: Oatmeal + berries + chia seeds + almond milk",
                "🍽️ Mid-Morning: Apple + walnuts + vegan yogurt",
                "🍛 Lunch: Quinoa + chickpea curry + mixed vegetables + tahini",
                "☕ Evening: Hummus + carrot sticks + green tea",
                "🌙 Dinner: Lentil soup + whole grain bread + roasted tofu + salad",
            ],
            tips: &[
                "Ensure B12 supplementation",
                "Combine legumes with grains for complete protein",
                "Include variety of plant-based proteins",
                "Eat rainbow of vegetables daily",
            ],
        },
    ],
    // Overweight
    [
        DietPlan {
            title: "Calorie-Controlled Vegetarian Diet",
            meals: &[
                "🌅 Breakfast: Green tea + moong dal cheela + 1 fruit",
                "🍽️ Mid-Morning: Apple/orange + 5 almonds",
                "🍛 Lunch: Brown rice (small) + dal + lots of salad + curd",
                "☕ Evening: Roasted chana + green tea + cucumber",
                "🌙 Dinner: Vegetable soup + 1 roti + steamed vegetables",
            ],
            tips: &[
                "Avoid fried foods and sweets",
                "Cut refined carbs and sugar",
                "Eat smaller, frequent meals",
                "Walk 45 mins daily",
            ],
        },
        DietPlan {
            title: "Calorie-Controlled Non-Vegetarian Diet",
            meals: &[
                "🌅 Breakfast: Green tea + egg white omelette (3 whites) + 1 toast",
                "🍽️ Mid-Morning: Apple + handful of nuts",
                "🍛 Lunch: Brown rice (small) + grilled chicken breast + salad",
                "☕ Evening: Boiled eggs (whites only) + green tea",
                "🌙 Dinner: Clear soup + grilled fish + steamed vegetables",
            ],
            tips: &[
                "Choose lean proteins (chicken breast, fish)",
                "Avoid red meat and fried items",
                "No sugar, no processed foods",
                "Cardio exercise 45 mins daily",
            ],
        },
        DietPlan {
            title: "Calorie-Controlled Vegan Diet",
            meals: &[
                "🌅 Breakfast: Green tea + tofu scramble + spinach + tomato",
                "🍽️ Mid-Morning: Orange + 8 almonds",
                "🍛 Lunch: Quinoa (small portion) + lentil curry + large salad",
                "☕ Evening: Carrot sticks + hummus + green tea",
                "🌙 Dinner: Vegetable soup + steamed broccoli + baked tofu",
            ],
            tips: &[
                "Focus on low-calorie, high-volume foods",
                "Avoid vegan junk foods and oils",
                "Include plenty of leafy greens",
                "Stay active throughout the day",
            ],
        },
    ],
    // Obese
    [
        DietPlan {
            title: "Intensive Weight Loss Vegetarian Diet",
            meals: &[
                "🌅 Breakfast: High protein - moong dal sprouts + green tea",
                "🍽️ Mid-Morning: Cucumber/carrot sticks only",
                "🍛 Lunch: Large salad bowl + 1 small roti + dal (no rice)",
                "☕ Evening: Herbal tea + roasted chana (small handful)",
                "🌙 Dinner: Clear vegetable soup + steamed vegetables",
            ],
            tips: &[
                "Eliminate all sugar, sweets, fried foods",
                "Consider intermittent fasting (16:8)",
                "Drink 2 glasses water before meals",
                "Cardio exercise 60 mins daily",
                "Consult a nutritionist",
            ],
        },
        DietPlan {
            title: "Intensive Weight Loss Non-Vegetarian Diet",
            meals: &[
                "🌅 Breakfast: Egg whites (4-5) + spinach + black coffee",
                "🍽️ Mid-Morning: Cucumber only",
                "🍛 Lunch: Large salad + grilled chicken breast (100g) + lemon",
                "☕ Evening: Green tea + carrot sticks",
                "🌙 Dinner: Clear soup + grilled fish + steamed broccoli",
            ],
            tips: &[
                "Only lean proteins - chicken breast, fish",
                "Zero sugar, zero fried foods",
                "High protein, very low carb approach",
                "Intensive exercise 60+ mins daily",
                "Medical supervision recommended",
            ],
        },
        DietPlan {
            title: "Intensive Weight Loss Vegan Diet",
            meals: &[
                "🌅 Breakfast: Tofu scramble + spinach + black coffee",
                "🍽️ Mid-Morning: Celery sticks only",
                "🍛 Lunch: Large raw salad + baked tofu (small) + lemon",
                "☕ Evening: Herbal tea + cucumber slices",
                "🌙 Dinner: Vegetable broth + steamed greens + small portion legumes",
            ],
            tips: &[
                "Whole food plant-based approach",
                "Eliminate all processed vegan foods",
                "High fiber, low calorie density",
                "Intensive daily exercise required",
                "Professional guidance essential",
            ],
        },
    ],
];

fn category_row(category: BmiCategory) -> usize {
    match category {
        BmiCategory::Underweight => 0,
        BmiCategory::Healthy => 1,
        BmiCategory::Overweight => 2,
        BmiCategory::Obese => 3,
    }
}

fn diet_column(diet_type: DietType) -> usize {
    match diet_type {
        DietType::Veg => 0,
        DietType::Nonveg => 1,
        DietType::Vegan => 2,
    }
}

/// Plan for a known (category, diet type) pair
pub fn plan_for(category: BmiCategory, diet_type: DietType) -> &'static DietPlan {
    &DIET_PLANS[category_row(category)][diet_column(diet_type)]
}

/// Plan returned when the diet type is not recognized
pub fn default_plan() -> &'static DietPlan {
    plan_for(BmiCategory::Healthy, DietType::Veg)
}

/// Look up a plan by category and raw diet-type string.
/// Unknown diet types get the Healthy/veg plan.
pub fn lookup_diet_plan(category: BmiCategory, diet_type: &str) -> &'static DietPlan {
    match DietType::from_str(diet_type) {
        Some(dt) => plan_for(category, dt),
        None => {
            tracing::warn!(diet_type, "unrecognized diet type, using default plan");
            default_plan()
        }
    }
}

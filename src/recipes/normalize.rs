//! Cleanup of loosely-typed recipe payloads returned by a language model.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_RECIPE_NAME: &str = "Generated Recipe";
pub const DEFAULT_RECIPE_TYPE: &str = "Omnivore";

/// Recipe fields as produced by the generator; any field may be missing or
/// hold an arbitrary JSON value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecipePayload {
    #[serde(default)]
    pub recipe_name: Option<Value>,
    #[serde(default)]
    pub recipe_type: Option<Value>,
    #[serde(default)]
    pub ingredients: Option<Value>,
    #[serde(default)]
    pub instructions: Option<Value>,
    #[serde(default)]
    pub calories: Option<Value>,
    #[serde(default)]
    pub fat: Option<Value>,
    #[serde(default)]
    pub carbs: Option<Value>,
    #[serde(default)]
    pub protein: Option<Value>,
    #[serde(default)]
    pub extra_categories: Option<Value>,
}

impl RawRecipePayload {
    pub fn is_empty(&self) -> bool {
        [
            &self.recipe_name,
            &self.recipe_type,
            &self.ingredients,
            &self.instructions,
            &self.calories,
            &self.fat,
            &self.carbs,
            &self.protein,
            &self.extra_categories,
        ]
        .iter()
        .all(|v| v.is_none())
    }

    /// True when the name is present and not blank, null, zero or an empty container.
    pub fn has_name(&self) -> bool {
        self.recipe_name.as_ref().is_some_and(is_truthy)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecipe {
    pub recipe_name: String,
    pub recipe_type: String,
    /// One item per line.
    pub ingredients: String,
    /// One step per line.
    pub instructions: String,
    pub calories: i32,
    pub fat: f64,
    pub carbs: f64,
    pub protein: f64,
    /// Comma separated tags.
    pub extra_categories: String,
}

impl From<NormalizedRecipe> for RawRecipePayload {
    fn from(r: NormalizedRecipe) -> Self {
        Self {
            recipe_name: Some(Value::from(r.recipe_name)),
            recipe_type: Some(Value::from(r.recipe_type)),
            ingredients: Some(Value::from(r.ingredients)),
            instructions: Some(Value::from(r.instructions)),
            calories: Some(Value::from(r.calories)),
            fat: Some(Value::from(r.fat)),
            carbs: Some(Value::from(r.carbs)),
            protein: Some(Value::from(r.protein)),
            extra_categories: Some(Value::from(r.extra_categories)),
        }
    }
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn value_text(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// First decimal number found in the value's text, or 0.0.
pub fn extract_numeric(value: Option<&Value>) -> f64 {
    lazy_static! {
        static ref NUMBER_RE: Regex = Regex::new(r"\d+(?:\.\d+)?").unwrap();
    }
    let Some(value) = value else {
        return 0.0;
    };
    if let Value::Number(n) = value {
        if let Some(f) = n.as_f64() {
            return f.abs();
        }
    }
    let text = value_text(value);
    NUMBER_RE
        .find(&text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

const QUOTES: [char; 2] = ['"', '\''];

fn clean_item(item: &str) -> &str {
    item.trim_matches(|c: char| c.is_whitespace() || QUOTES.contains(&c))
}

fn strip_enclosing(text: &str) -> &str {
    let t = text.trim();
    t.strip_prefix('{')
        .and_then(|inner| inner.strip_suffix('}'))
        .unwrap_or(t)
}

/// Best-effort list cleanup: strips one layer of surrounding `{}`, splits on
/// commas, trims whitespace and quotes, drops empty items and joins the rest.
///
/// JSON arrays are joined with commas first and then cleaned like text, so
/// cleaning the output again gives the same output.
pub fn clean_list_text(value: Option<&Value>, join_with_newlines: bool) -> String {
    let sep = if join_with_newlines { "\n" } else { ", " };
    let text = match value {
        None | Some(Value::Null) => return String::new(),
        Some(Value::Array(arr)) => arr.iter().map(value_text).collect::<Vec<_>>().join(", "),
        Some(other) => value_text(other),
    };
    strip_enclosing(&text)
        .split(',')
        .map(clean_item)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

fn text_or(value: Option<&Value>, default: &str) -> String {
    match value {
        None | Some(Value::Null) => default.to_string(),
        Some(v) => value_text(v),
    }
}

pub fn normalize_recipe(raw: &RawRecipePayload) -> NormalizedRecipe {
    NormalizedRecipe {
        recipe_name: text_or(raw.recipe_name.as_ref(), DEFAULT_RECIPE_NAME),
        recipe_type: text_or(raw.recipe_type.as_ref(), DEFAULT_RECIPE_TYPE),
        ingredients: clean_list_text(raw.ingredients.as_ref(), true),
        instructions: clean_list_text(raw.instructions.as_ref(), true),
        calories: extract_numeric(raw.calories.as_ref()) as i32,
        fat: extract_numeric(raw.fat.as_ref()),
        carbs: extract_numeric(raw.carbs.as_ref()),
        protein: extract_numeric(raw.protein.as_ref()),
        extra_categories: clean_list_text(raw.extra_categories.as_ref(), false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(s: &str) -> Value {
        Value::from(s)
    }

    #[test]
    fn extract_numeric_reads_first_number() {
        assert_eq!(extract_numeric(Some(&text("350 kcal"))), 350.0);
        assert_eq!(extract_numeric(Some(&text("12.5g"))), 12.5);
        assert_eq!(extract_numeric(Some(&text("about 20-25 g"))), 20.0);
        assert_eq!(extract_numeric(Some(&json!(42))), 42.0);
        assert_eq!(extract_numeric(Some(&json!(7.25))), 7.25);
    }

    #[test]
    fn extract_numeric_defaults_to_zero() {
        assert_eq!(extract_numeric(None), 0.0);
        assert_eq!(extract_numeric(Some(&Value::Null)), 0.0);
        assert_eq!(extract_numeric(Some(&text(""))), 0.0);
        assert_eq!(extract_numeric(Some(&text("a handful"))), 0.0);
        assert_eq!(extract_numeric(Some(&json!(true))), 0.0);
    }

    #[test]
    fn clean_list_text_strips_braces_and_quotes() {
        let v = text(r#"{"eggs", "milk", "flour"}"#);
        assert_eq!(clean_list_text(Some(&v), true), "eggs\nmilk\nflour");
        assert_eq!(clean_list_text(Some(&v), false), "eggs, milk, flour");
    }

    #[test]
    fn clean_list_text_only_strips_matching_braces() {
        let v = text(r#"{"eggs", , 'milk'}"#);
        assert_eq!(clean_list_text(Some(&v), true), "eggs\nmilk");
        let v = text("[Optional] toast bread, Serve");
        assert_eq!(clean_list_text(Some(&v), true), "[Optional] toast bread\nServe");
        let v = text(r#"{"eggs", "milk""#);
        assert_eq!(clean_list_text(Some(&v), true), "{\"eggs\nmilk");
        assert_eq!(clean_list_text(Some(&text("  ")), true), "");
        assert_eq!(clean_list_text(None, true), "");
    }

    #[test]
    fn clean_list_text_splits_json_array_items_like_text() {
        let v = json!(["1 cup flour, sifted", " 2 eggs ", ""]);
        assert_eq!(clean_list_text(Some(&v), true), "1 cup flour\nsifted\n2 eggs");
        let tags = json!(["high-protein", "quick"]);
        assert_eq!(clean_list_text(Some(&tags), false), "high-protein, quick");
    }

    #[test]
    fn normalize_applies_defaults_and_coercions() {
        let raw: RawRecipePayload = serde_json::from_value(json!({
            "ingredients": "{\"rice\", \"beans\"}",
            "instructions": ["Rinse rice", "Simmer 20 minutes"],
            "calories": "512.9 kcal per serving",
            "fat": "12g",
            "carbs": 80,
            "extra_categories": "{vegan,\"gluten-free\"}"
        }))
        .unwrap();

        let r = normalize_recipe(&raw);
        assert_eq!(r.recipe_name, DEFAULT_RECIPE_NAME);
        assert_eq!(r.recipe_type, DEFAULT_RECIPE_TYPE);
        assert_eq!(r.ingredients, "rice\nbeans");
        assert_eq!(r.instructions, "Rinse rice\nSimmer 20 minutes");
        assert_eq!(r.calories, 512);
        assert_eq!(r.fat, 12.0);
        assert_eq!(r.carbs, 80.0);
        assert_eq!(r.protein, 0.0);
        assert_eq!(r.extra_categories, "vegan, gluten-free");
    }

    #[test]
    fn normalize_is_idempotent() {
        let raw: RawRecipePayload = serde_json::from_value(json!({
            "recipe_name": "Shakshuka",
            "recipe_type": "Vegetarian",
            "ingredients": "{\"4 eggs\", \"1 can tomatoes\", \"1 onion, diced\"}",
            "instructions": "{\"Saute onion\", \"Add tomatoes\", \"Crack eggs and cover\"}",
            "calories": "350 kcal",
            "fat": "18.5g",
            "carbs": "22 g",
            "protein": "19",
            "extra_categories": "{brunch, \"one-pan\"}"
        }))
        .unwrap();

        let once = normalize_recipe(&raw);
        let twice = normalize_recipe(&RawRecipePayload::from(once.clone()));
        assert_eq!(once, twice);
        assert_eq!(once.ingredients, "4 eggs\n1 can tomatoes\n1 onion\ndiced");
    }

    #[test]
    fn normalize_is_idempotent_for_array_payloads() {
        let raw: RawRecipePayload = serde_json::from_value(json!({
            "recipe_name": "Minestrone",
            "ingredients": ["1 onion, diced", "2 carrots"],
            "instructions": ["[Optional] toast bread", "Serve"],
            "extra_categories": ["soup", "batch, freezer"]
        }))
        .unwrap();

        let once = normalize_recipe(&raw);
        let twice = normalize_recipe(&RawRecipePayload::from(once.clone()));
        assert_eq!(once, twice);
        assert_eq!(once.ingredients, "1 onion\ndiced\n2 carrots");
        assert_eq!(once.instructions, "[Optional] toast bread\nServe");
        assert_eq!(once.extra_categories, "soup, batch, freezer");
    }

    #[test]
    fn payload_name_checks() {
        assert!(RawRecipePayload::default().is_empty());
        assert!(!RawRecipePayload::default().has_name());

        let blank = RawRecipePayload {
            recipe_name: Some(text("   ")),
            ..Default::default()
        };
        assert!(!blank.is_empty());
        assert!(!blank.has_name());

        let named = RawRecipePayload {
            recipe_name: Some(text("Pho")),
            ..Default::default()
        };
        assert!(named.has_name());
    }
}

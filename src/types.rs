//! Common types and data structures

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque recipe identifier, derived from the creation timestamp
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(String);

impl RecipeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored recipe. Field names match the persisted camelCase layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_int")]
    pub total_time: i64,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Recipe {
    pub fn from_draft(id: RecipeId, draft: RecipeDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            total_time: draft.total_time,
            steps: draft.steps,
        }
    }

    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let q = query.to_lowercase();
        self.name.to_lowercase().contains(&q) || self.description.to_lowercase().contains(&q)
    }
}

/// One timed unit of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[serde(rename = "stepDescription", default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(rename = "flameNumber", default = "default_flame", deserialize_with = "lenient_int")]
    pub flame: i64,
    #[serde(default, deserialize_with = "lenient_int")]
    pub cook_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Step {
    /// Cook time in seconds, or `None` when the configured time is not positive.
    /// Absurdly large stored times saturate instead of overflowing.
    pub fn cook_seconds(&self) -> Option<u64> {
        u64::try_from(self.cook_time)
            .ok()
            .filter(|&minutes| minutes > 0)
            .map(|minutes| minutes.saturating_mul(60))
    }
}

/// Normalized form output: a recipe that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDraft {
    pub name: String,
    pub description: String,
    pub total_time: i64,
    pub steps: Vec<Step>,
}

fn default_flame() -> i64 {
    1
}

/// Accepts integers, floats, numeric strings and null. Anything unparseable becomes 0,
/// which the walkthrough treats as an instantly completing step.
fn lenient_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
        Null,
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Int(n) => n,
        Raw::Float(f) if f.is_finite() => f.trunc() as i64,
        Raw::Float(_) => 0,
        Raw::Text(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
                .unwrap_or(0)
        }
        Raw::Null => 0,
    })
}

/// Top-level navigable views
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    List,
    Add,
    Edit(RecipeId),
    Detail(RecipeId),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn recipe_uses_camel_case_layout() {
        let recipe = Recipe {
            id: RecipeId::new("1700000000000"),
            name: "Dal".into(),
            description: "Yellow lentils".into(),
            total_time: 40,
            steps: vec![Step {
                description: "Temper".into(),
                ingredients: "ghee, cumin".into(),
                instructions: "Heat ghee, add cumin".into(),
                flame: 3,
                cook_time: 2,
                image: None,
            }],
        };

        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(json["id"], "1700000000000");
        assert_eq!(json["totalTime"], 40);
        assert_eq!(json["steps"][0]["stepDescription"], "Temper");
        assert_eq!(json["steps"][0]["flameNumber"], 3);
        assert_eq!(json["steps"][0]["cookTime"], 2);
        assert!(json["steps"][0].get("image").is_none());
    }

    #[test]
    fn malformed_numbers_degrade() {
        let json = r#"{
            "id": "42",
            "name": "Toast",
            "totalTime": "5",
            "steps": [
                {"stepDescription": "a", "cookTime": ""},
                {"stepDescription": "b", "cookTime": "2.5", "flameNumber": "4"},
                {"stepDescription": "c", "cookTime": null},
                {"stepDescription": "d", "cookTime": 3.9}
            ]
        }"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();

        assert_eq!(recipe.total_time, 5);
        assert_eq!(recipe.description, "");
        let cook: Vec<i64> = recipe.steps.iter().map(|s| s.cook_time).collect();
        assert_eq!(cook, vec![0, 2, 0, 3]);
        assert_eq!(recipe.steps[0].flame, 1);
        assert_eq!(recipe.steps[1].flame, 4);
        assert_eq!(recipe.steps[0].cook_seconds(), None);
        assert_eq!(recipe.steps[3].cook_seconds(), Some(180));
    }

    #[test]
    fn huge_cook_times_saturate() {
        let json = r#"{
            "id": "7",
            "name": "Stock",
            "totalTime": 1e30,
            "steps": [
                {"stepDescription": "a", "cookTime": 1e30},
                {"stepDescription": "b", "cookTime": "1e30"},
                {"stepDescription": "c", "cookTime": 9223372036854775807}
            ]
        }"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();

        for step in &recipe.steps {
            assert_eq!(step.cook_seconds(), Some(u64::MAX));
        }
        assert_eq!(
            Step { cook_time: -5, ..recipe.steps[0].clone() }.cook_seconds(),
            None
        );
    }

    #[test]
    fn matches_name_or_description() {
        let recipe = Recipe {
            id: RecipeId::new("1"),
            name: "Masala Chai".into(),
            description: "Spiced tea".into(),
            total_time: 10,
            steps: vec![],
        };
        assert!(recipe.matches(""));
        assert!(recipe.matches("chai"));
        assert!(recipe.matches("SPICED"));
        assert!(!recipe.matches("coffee"));
    }
}

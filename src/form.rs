//! Recipe form state and validation
//!
//! Fields are kept as the raw text the user typed. `submit` validates everything and
//! produces a normalized [`RecipeDraft`], or the first problem found. Nothing is saved
//! on failure.

use crate::constants::{FLAME_MAX, FLAME_MIN, MAX_MINUTES};
use crate::error::ValidationError;
use crate::types::{Recipe, RecipeDraft, RecipeId, Step};

#[derive(Debug, Clone, PartialEq)]
pub struct StepForm {
    pub description: String,
    pub ingredients: String,
    pub instructions: String,
    pub flame: i64,
    pub cook_time: String,
    pub image: Option<String>,
}

impl Default for StepForm {
    fn default() -> Self {
        Self {
            description: String::new(),
            ingredients: String::new(),
            instructions: String::new(),
            flame: FLAME_MIN,
            cook_time: String::new(),
            image: None,
        }
    }
}

impl From<&Step> for StepForm {
    fn from(step: &Step) -> Self {
        Self {
            description: step.description.clone(),
            ingredients: step.ingredients.clone(),
            instructions: step.instructions.clone(),
            flame: step.flame.clamp(FLAME_MIN, FLAME_MAX),
            cook_time: step.cook_time.to_string(),
            image: step.image.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeForm {
    /// Set when editing; the id is carried through unchanged
    pub editing: Option<RecipeId>,
    pub name: String,
    pub description: String,
    pub total_time: String,
    pub steps: Vec<StepForm>,
    /// Last validation message, shown inline
    pub error: Option<String>,
}

impl Default for RecipeForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeForm {
    /// Empty form for a new recipe, with one blank step
    pub fn new() -> Self {
        Self {
            editing: None,
            name: String::new(),
            description: String::new(),
            total_time: String::new(),
            steps: vec![StepForm::default()],
            error: None,
        }
    }

    /// Form pre-filled from an existing recipe
    pub fn edit(recipe: &Recipe) -> Self {
        let mut steps: Vec<StepForm> = recipe.steps.iter().map(StepForm::from).collect();
        if steps.is_empty() {
            steps.push(StepForm::default());
        }
        Self {
            editing: Some(recipe.id.clone()),
            name: recipe.name.clone(),
            description: recipe.description.clone(),
            total_time: recipe.total_time.to_string(),
            steps,
            error: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn add_step(&mut self) {
        self.steps.push(StepForm::default());
    }

    /// Remove a step. The last remaining step is never removed.
    pub fn remove_step(&mut self, index: usize) -> bool {
        if self.steps.len() <= 1 || index >= self.steps.len() {
            return false;
        }
        self.steps.remove(index);
        true
    }

    pub fn validate(&self) -> Result<RecipeDraft, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        let total_time = parse_minutes(&self.total_time).map_err(|e| match e {
            MinutesError::Empty => ValidationError::MissingTotalTime,
            MinutesError::Invalid => ValidationError::InvalidTotalTime,
            MinutesError::TooLong => ValidationError::TotalTimeTooLong { max: MAX_MINUTES },
        })?;

        if self.steps.is_empty() {
            return Err(ValidationError::NoSteps);
        }

        let steps = self
            .steps
            .iter()
            .enumerate()
            .map(|(i, s)| normalize_step(i + 1, s))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RecipeDraft {
            name: name.to_string(),
            description: self.description.trim().to_string(),
            total_time,
            steps,
        })
    }

    /// Validate and record the failure message on the form
    pub fn submit(&mut self) -> Result<RecipeDraft, ValidationError> {
        match self.validate() {
            Ok(draft) => {
                self.error = None;
                Ok(draft)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}

fn normalize_step(number: usize, step: &StepForm) -> Result<Step, ValidationError> {
    if step.description.trim().is_empty() {
        return Err(ValidationError::MissingStepDescription { step: number });
    }
    let cook_time = parse_minutes(&step.cook_time).map_err(|e| match e {
        MinutesError::Empty => ValidationError::MissingCookTime { step: number },
        MinutesError::Invalid => ValidationError::InvalidCookTime { step: number },
        MinutesError::TooLong => ValidationError::CookTimeTooLong { step: number, max: MAX_MINUTES },
    })?;
    if !(FLAME_MIN..=FLAME_MAX).contains(&step.flame) {
        return Err(ValidationError::InvalidFlame { step: number });
    }

    Ok(Step {
        description: step.description.trim().to_string(),
        ingredients: step.ingredients.trim().to_string(),
        instructions: step.instructions.trim().to_string(),
        flame: step.flame,
        cook_time,
        image: step
            .image
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MinutesError {
    Empty,
    Invalid,
    TooLong,
}

/// Positive whole minutes, at most `MAX_MINUTES`
fn parse_minutes(raw: &str) -> Result<i64, MinutesError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(MinutesError::Empty);
    }
    // Digit strings past i64 are too long, not malformed
    if raw.bytes().all(|b| b.is_ascii_digit()) && raw.trim_start_matches('0').len() > 18 {
        return Err(MinutesError::TooLong);
    }
    match raw.parse::<i64>() {
        Ok(n) if n > MAX_MINUTES => Err(MinutesError::TooLong),
        Ok(n) if n > 0 => Ok(n),
        _ => Err(MinutesError::Invalid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled() -> RecipeForm {
        let mut form = RecipeForm::new();
        form.name = "  Poha ".into();
        form.description = "Flattened rice".into();
        form.total_time = "20".into();
        form.steps[0] = StepForm {
            description: "Roast peanuts".into(),
            ingredients: "peanuts".into(),
            instructions: "Dry roast until golden".into(),
            flame: 2,
            cook_time: " 3 ".into(),
            image: Some("  ".into()),
        };
        form
    }

    #[test]
    fn valid_form_normalizes() {
        let draft = filled().validate().unwrap();
        assert_eq!(draft.name, "Poha");
        assert_eq!(draft.total_time, 20);
        assert_eq!(draft.steps.len(), 1);
        assert_eq!(draft.steps[0].cook_time, 3);
        assert_eq!(draft.steps[0].flame, 2);
        assert_eq!(draft.steps[0].image, None);
    }

    #[test]
    fn required_fields() {
        let mut form = filled();
        form.name = "   ".into();
        assert_eq!(form.validate(), Err(ValidationError::MissingName));

        let mut form = filled();
        form.total_time.clear();
        assert_eq!(form.validate(), Err(ValidationError::MissingTotalTime));

        let mut form = filled();
        form.total_time = "twenty".into();
        assert_eq!(form.validate(), Err(ValidationError::InvalidTotalTime));

        let mut form = filled();
        form.add_step();
        form.steps[1].description = "Add rice".into();
        assert_eq!(form.validate(), Err(ValidationError::MissingCookTime { step: 2 }));

        form.steps[1].cook_time = "0".into();
        assert_eq!(form.validate(), Err(ValidationError::InvalidCookTime { step: 2 }));

        form.steps[1].cook_time = "4".into();
        form.steps[1].description.clear();
        assert_eq!(
            form.validate(),
            Err(ValidationError::MissingStepDescription { step: 2 })
        );
    }

    #[test]
    fn oversized_times_are_rejected() {
        let mut form = filled();
        form.steps[0].cook_time = "1000000000000000000".into();
        assert_eq!(
            form.validate(),
            Err(ValidationError::CookTimeTooLong { step: 1, max: MAX_MINUTES })
        );

        form.steps[0].cook_time = "99999999999999999999999".into();
        assert_eq!(
            form.validate(),
            Err(ValidationError::CookTimeTooLong { step: 1, max: MAX_MINUTES })
        );

        form.steps[0].cook_time = "3".into();
        form.total_time = (MAX_MINUTES + 1).to_string();
        assert_eq!(
            form.validate(),
            Err(ValidationError::TotalTimeTooLong { max: MAX_MINUTES })
        );
    }

    #[test]
    fn longest_accepted_cook_time_opens_a_walkthrough() {
        let mut form = filled();
        form.steps[0].cook_time = MAX_MINUTES.to_string();
        let recipe = Recipe::from_draft(RecipeId::new("1"), form.validate().unwrap());

        let walkthrough = crate::walkthrough::Walkthrough::new(&recipe);
        assert_eq!(walkthrough.display_seconds(0), MAX_MINUTES as u64 * 60);
    }

    #[test]
    fn submit_records_message() {
        let mut form = filled();
        form.name.clear();
        assert!(form.submit().is_err());
        assert_eq!(form.error.as_deref(), Some("Please enter a recipe name"));

        form.name = "Poha".into();
        assert!(form.submit().is_ok());
        assert_eq!(form.error, None);
    }

    #[test]
    fn last_step_cannot_be_removed() {
        let mut form = RecipeForm::new();
        assert!(!form.remove_step(0));
        form.add_step();
        assert!(form.remove_step(0));
        assert_eq!(form.steps.len(), 1);
        assert!(!form.remove_step(5));
    }

    #[test]
    fn edit_keeps_id() {
        let recipe = Recipe::from_draft(RecipeId::new("1700"), filled().validate().unwrap());
        let mut form = RecipeForm::edit(&recipe);
        assert!(form.is_editing());
        assert_eq!(form.total_time, "20");
        assert_eq!(form.steps[0].cook_time, "3");

        form.name = "Kanda Poha".into();
        let draft = form.submit().unwrap();
        let edited = Recipe::from_draft(form.editing.clone().unwrap(), draft);
        assert_eq!(edited.id, recipe.id);
        assert_eq!(edited.name, "Kanda Poha");
    }
}

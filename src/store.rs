//! Recipe store: the in-memory recipe list, mirrored to local storage on every change

use crate::constants::{RECIPES_CORRUPT_KEY, RECIPES_KEY};
use crate::error::StoreError;
use crate::storage::LocalStorage;
use crate::types::{Recipe, RecipeDraft, RecipeId};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Read access to recipes. Views and the walkthrough depend on this, never on the store itself.
pub trait RecipeSource {
    /// Immutable snapshot of every recipe, in insertion order
    fn get_all_recipes(&self) -> Arc<Vec<Recipe>>;
    fn get_recipe(&self, id: &RecipeId) -> Result<Recipe, StoreError>;
}

pub struct RecipeStore {
    storage: LocalStorage,
    recipes: Arc<Vec<Recipe>>,
}

impl RecipeStore {
    /// Load recipes from storage. An absent key yields an empty store; an unparseable
    /// value is set aside under a backup key and the store starts empty.
    pub fn load(storage: LocalStorage) -> Result<Self, StoreError> {
        let recipes = match storage.get_item(RECIPES_KEY)? {
            None => {
                debug!("No saved recipes, starting empty");
                Vec::new()
            }
            Some(raw) => match serde_json::from_str::<Vec<Recipe>>(&raw) {
                Ok(recipes) => {
                    debug!(count = recipes.len(), "Recipes loaded");
                    recipes
                }
                Err(e) => {
                    warn!(error = %e, backup = RECIPES_CORRUPT_KEY, "Saved recipes unreadable, starting empty");
                    storage.set_item(RECIPES_CORRUPT_KEY, &raw)?;
                    storage.remove_item(RECIPES_KEY)?;
                    Vec::new()
                }
            },
        };

        Ok(Self {
            storage,
            recipes: Arc::new(recipes),
        })
    }

    /// Create a recipe from a validated draft and return it with its new id
    pub fn add(&mut self, draft: RecipeDraft) -> Result<Recipe, StoreError> {
        let id = self.next_id(chrono::Utc::now().timestamp_millis());
        let recipe = Recipe::from_draft(id, draft);

        let mut next = Vec::clone(&self.recipes);
        next.push(recipe.clone());
        self.commit(next)?;

        info!(id = %recipe.id, name = %recipe.name, "Recipe added");
        Ok(recipe)
    }

    /// Replace the recipe with the same id, keeping its position
    pub fn update(&mut self, recipe: Recipe) -> Result<(), StoreError> {
        let pos = self.position(&recipe.id)?;
        let mut next = Vec::clone(&self.recipes);
        let (id, name) = (recipe.id.clone(), recipe.name.clone());
        next[pos] = recipe;
        self.commit(next)?;
        info!(%id, %name, "Recipe updated");
        Ok(())
    }

    pub fn delete(&mut self, id: &RecipeId) -> Result<Recipe, StoreError> {
        let pos = self.position(id)?;
        let mut next = Vec::clone(&self.recipes);
        let removed = next.remove(pos);
        self.commit(next)?;

        info!(id = %removed.id, name = %removed.name, "Recipe deleted");
        Ok(removed)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    fn position(&self, id: &RecipeId) -> Result<usize, StoreError> {
        self.recipes
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    /// Persist first, then publish. A failed write leaves the in-memory list untouched.
    fn commit(&mut self, next: Vec<Recipe>) -> Result<(), StoreError> {
        let json = serde_json::to_string(&next)?;
        self.storage.set_item(RECIPES_KEY, &json)?;
        self.recipes = Arc::new(next);
        Ok(())
    }

    /// Creation-time id. Bumped past existing ids when two recipes land in the same millisecond.
    fn next_id(&self, now_millis: i64) -> RecipeId {
        let mut candidate = now_millis;
        loop {
            let id = RecipeId::new(candidate.to_string());
            if !self.recipes.iter().any(|r| r.id == id) {
                return id;
            }
            candidate += 1;
        }
    }
}

impl RecipeSource for RecipeStore {
    fn get_all_recipes(&self) -> Arc<Vec<Recipe>> {
        Arc::clone(&self.recipes)
    }

    fn get_recipe(&self, id: &RecipeId) -> Result<Recipe, StoreError> {
        self.recipes
            .iter()
            .find(|r| &r.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Step;
    use pretty_assertions::assert_eq;

    fn draft(name: &str, cook_times: &[i64]) -> RecipeDraft {
        RecipeDraft {
            name: name.to_string(),
            description: format!("{} description", name),
            total_time: cook_times.iter().sum(),
            steps: cook_times
                .iter()
                .enumerate()
                .map(|(i, &cook_time)| Step {
                    description: format!("step {}", i + 1),
                    ingredients: "salt".into(),
                    instructions: "stir".into(),
                    flame: (i as i64 % 5) + 1,
                    cook_time,
                    image: if i == 0 { Some("/tmp/pan.png".into()) } else { None },
                })
                .collect(),
        }
    }

    fn reopen(dir: &std::path::Path) -> RecipeStore {
        RecipeStore::load(LocalStorage::open(&dir.join("storage.db")).unwrap()).unwrap()
    }

    #[test]
    fn empty_storage_loads_empty() {
        let store = RecipeStore::load(LocalStorage::open_in_memory().unwrap()).unwrap();
        assert_eq!(store.len(), 0);
        assert!(store.get_all_recipes().is_empty());
    }

    #[test]
    fn round_trip_preserves_values_and_order() {
        let dir = tempfile::tempdir().unwrap();
        let saved: Vec<Recipe> = {
            let mut store = reopen(dir.path());
            for (name, times) in [("Rice", &[1, 10][..]), ("Soup", &[5][..]), ("Stew", &[2, 3, 60][..])] {
                store.add(draft(name, times)).unwrap();
            }
            Vec::clone(&store.get_all_recipes())
        };

        let store = reopen(dir.path());
        assert_eq!(&*store.get_all_recipes(), &saved);
        let names: Vec<&str> = saved.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Rice", "Soup", "Stew"]);
    }

    #[test]
    fn failed_update_leaves_list_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = reopen(dir.path());
        let original = store.add(draft("Rice", &[10])).unwrap();

        let other = rusqlite::Connection::open(dir.path().join("storage.db")).unwrap();
        other.execute("DROP TABLE storage", []).unwrap();

        let mut edited = original.clone();
        edited.name = "Jeera Rice".into();
        assert!(matches!(store.update(edited), Err(StoreError::Storage(_))));
        assert_eq!(store.get_recipe(&original.id).unwrap(), original);
    }

    #[test]
    fn update_keeps_identity_and_position() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = reopen(dir.path());
        let first = store.add(draft("Rice", &[10])).unwrap();
        store.add(draft("Soup", &[5])).unwrap();

        let mut edited = first.clone();
        edited.name = "Jeera Rice".into();
        store.update(edited.clone()).unwrap();

        let store = reopen(dir.path());
        let all = store.get_all_recipes();
        assert_eq!(all[0], edited);
        assert_eq!(all[0].id, first.id);
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn delete_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = reopen(dir.path());
        let rice = store.add(draft("Rice", &[10])).unwrap();
        let soup = store.add(draft("Soup", &[5])).unwrap();

        let removed = store.delete(&rice.id).unwrap();
        assert_eq!(removed.id, rice.id);

        let store = reopen(dir.path());
        assert_eq!(&*store.get_all_recipes(), &vec![soup]);
        assert!(matches!(store.get_recipe(&rice.id), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut store = RecipeStore::load(LocalStorage::open_in_memory().unwrap()).unwrap();
        let ghost = RecipeId::new("nope");
        assert!(matches!(store.get_recipe(&ghost), Err(StoreError::NotFound(_))));
        assert!(matches!(store.delete(&ghost), Err(StoreError::NotFound(_))));

        let recipe = Recipe::from_draft(ghost, draft("Ghost", &[1]));
        assert!(matches!(store.update(recipe), Err(StoreError::NotFound(_))));
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn snapshots_are_immutable() {
        let mut store = RecipeStore::load(LocalStorage::open_in_memory().unwrap()).unwrap();
        store.add(draft("Rice", &[10])).unwrap();
        let before = store.get_all_recipes();

        store.add(draft("Soup", &[5])).unwrap();
        assert_eq!(before.len(), 1);
        assert_eq!(store.get_all_recipes().len(), 2);
    }

    #[test]
    fn ids_are_unique_within_a_millisecond() {
        let mut store = RecipeStore::load(LocalStorage::open_in_memory().unwrap()).unwrap();
        store.add(draft("Rice", &[10])).unwrap();
        let taken = store.get_all_recipes()[0].id.as_str().parse::<i64>().unwrap();

        let id = store.next_id(taken);
        assert_eq!(id, RecipeId::new((taken + 1).to_string()));
    }

    #[test]
    fn corrupt_data_is_set_aside() {
        let storage = LocalStorage::open_in_memory().unwrap();
        storage.set_item(RECIPES_KEY, "{not json").unwrap();

        let store = RecipeStore::load(storage).unwrap();
        assert_eq!(store.len(), 0);
        assert_eq!(
            store.storage.get_item(RECIPES_CORRUPT_KEY).unwrap().as_deref(),
            Some("{not json")
        );
        assert_eq!(store.storage.get_item(RECIPES_KEY).unwrap(), None);
    }
}

//! Application constants and configuration

use std::time::Duration;

pub const APP_NAME: &str = "Recipe Manager";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Storage file inside the data directory
pub const STORAGE_FILE: &str = "storage.db";

/// Local storage key holding the serialized recipe list
pub const RECIPES_KEY: &str = "recipes";
/// Where an unparseable recipe list is moved before the store starts empty
pub const RECIPES_CORRUPT_KEY: &str = "recipes.corrupt";

/// Walkthrough tick period
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Longest total or step time the form accepts (one week)
pub const MAX_MINUTES: i64 = 7 * 24 * 60;

pub const FLAME_MIN: i64 = 1;
pub const FLAME_MAX: i64 = 5;

/// How long toasts stay on screen
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

//! App module - contains the main application state and logic

mod context_menu;
mod detail;
mod form_view;
mod modals;
mod views;

use crate::form::RecipeForm;
use crate::settings::Settings;
use crate::store::{RecipeSource, RecipeStore};
use crate::theme;
use crate::types::{RecipeId, View};
use crate::walkthrough::{WalkthroughSession, WalkthroughState};
use eframe::egui;
use std::path::PathBuf;
use std::time::Instant;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) store: RecipeStore,
    pub(crate) view: View,
    // Form state for the add/edit views
    pub(crate) form: Option<RecipeForm>,
    // Walkthrough of the recipe open in the detail view
    pub(crate) session: Option<WalkthroughSession>,
    pub(crate) session_events: Option<watch::Receiver<WalkthroughState>>,
    pub(crate) search_query: String,
    pub(crate) focus_search: bool,
    // Delete confirmation
    pub(crate) pending_delete: Option<RecipeId>,
    // Settings
    pub(crate) show_settings: bool,
    pub(crate) compact_list: bool,
    pub(crate) show_step_images: bool,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
    // Toast notification
    pub(crate) toast_message: Option<String>,
    pub(crate) toast_is_error: bool,
    pub(crate) toast_start: Option<Instant>,
    pub(crate) central_panel_rect: Option<egui::Rect>,
    pub(crate) runtime: tokio::runtime::Runtime,
}

/// User intents collected while rendering, applied once the frame's borrows end
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AppAction {
    Navigate(View),
    RequestDelete(RecipeId),
    ConfirmDelete,
    CancelDelete,
    SubmitForm,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        store: RecipeStore,
        settings: Settings,
        data_dir: PathBuf,
        runtime: tokio::runtime::Runtime,
    ) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        // Step images (file paths and URLs)
        egui_extras::install_image_loaders(&cc.egui_ctx);

        theme::apply_visuals(&cc.egui_ctx);

        Self {
            store,
            view: View::List,
            form: None,
            session: None,
            session_events: None,
            search_query: String::new(),
            focus_search: false,
            pending_delete: None,
            show_settings: false,
            compact_list: settings.compact_list,
            show_step_images: settings.show_step_images,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
            toast_message: None,
            toast_is_error: false,
            toast_start: None,
            central_panel_rect: None,
            runtime,
        }
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            compact_list: self.compact_list,
            show_step_images: self.show_step_images,
        };
        settings.save(&self.data_dir);
    }

    pub(crate) fn toast(&mut self, message: impl Into<String>) {
        self.toast_message = Some(message.into());
        self.toast_is_error = false;
        self.toast_start = Some(Instant::now());
    }

    pub(crate) fn toast_error(&mut self, message: impl Into<String>) {
        self.toast_message = Some(message.into());
        self.toast_is_error = true;
        self.toast_start = Some(Instant::now());
    }

    pub(crate) fn any_modal_open(&self) -> bool {
        self.show_settings || self.pending_delete.is_some()
    }

    /// Switch views. Leaving the detail view always tears down its walkthrough.
    pub(crate) fn navigate(&mut self, view: View, ctx: &egui::Context) {
        if let Some(mut session) = self.session.take() {
            session.close();
        }
        self.session_events = None;
        self.form = None;

        let view = match view {
            View::List => View::List,
            View::Add => {
                self.form = Some(RecipeForm::new());
                View::Add
            }
            View::Edit(id) => match self.store.get_recipe(&id) {
                Ok(recipe) => {
                    self.form = Some(RecipeForm::edit(&recipe));
                    View::Edit(id)
                }
                Err(e) => {
                    warn!(error = %e, "Cannot edit recipe");
                    self.toast_error(e.to_string());
                    View::List
                }
            },
            View::Detail(id) => match self.store.get_recipe(&id) {
                Ok(recipe) => {
                    let repaint = ctx.clone();
                    let session = WalkthroughSession::new(
                        recipe,
                        self.runtime.handle().clone(),
                        move || repaint.request_repaint(),
                    );
                    self.session_events = Some(session.subscribe());
                    self.session = Some(session);
                    View::Detail(id)
                }
                Err(e) => {
                    warn!(error = %e, "Cannot open recipe");
                    self.toast_error(e.to_string());
                    View::List
                }
            },
        };

        debug!(view = ?view, "Navigated");
        self.view = view;
    }

    /// Called once per frame: keeps the tick task in step with the running flag and
    /// announces a finished recipe.
    pub(crate) fn poll_session(&mut self) {
        let (Some(session), Some(events)) = (self.session.as_mut(), self.session_events.as_mut()) else {
            return;
        };
        session.sync();
        if !events.has_changed().unwrap_or(false) {
            return;
        }
        events.borrow_and_update();
        if session.recipe_finished() {
            info!(id = %session.recipe().id, "Recipe finished");
            let message = format!("\"{}\" is ready. Enjoy!", session.recipe().name);
            self.toast(message);
        }
    }

    pub(crate) fn apply(&mut self, action: AppAction, ctx: &egui::Context) {
        match action {
            AppAction::Navigate(view) => self.navigate(view, ctx),
            AppAction::RequestDelete(id) => self.pending_delete = Some(id),
            AppAction::CancelDelete => self.pending_delete = None,
            AppAction::ConfirmDelete => {
                let Some(id) = self.pending_delete.take() else {
                    return;
                };
                match self.store.delete(&id) {
                    Ok(removed) => self.toast(format!("Deleted \"{}\"", removed.name)),
                    Err(e) => {
                        error!(error = %e, id = %id, "Failed to delete recipe");
                        self.toast_error(format!("Could not delete recipe: {}", e));
                    }
                }
                if matches!(&self.view, View::Edit(v) | View::Detail(v) if *v == id) {
                    self.navigate(View::List, ctx);
                }
            }
            AppAction::SubmitForm => self.submit_form(ctx),
        }
    }

    fn submit_form(&mut self, ctx: &egui::Context) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        let draft = match form.submit() {
            Ok(draft) => draft,
            Err(e) => {
                debug!(error = %e, "Form rejected");
                return;
            }
        };

        let result = match form.editing.clone() {
            None => self.store.add(draft).map(|r| format!("Added \"{}\"", r.name)),
            Some(id) => {
                let recipe = crate::types::Recipe::from_draft(id, draft);
                let name = recipe.name.clone();
                self.store.update(recipe).map(|_| format!("Saved \"{}\"", name))
            }
        };

        match result {
            Ok(message) => {
                self.toast(message);
                self.navigate(View::List, ctx);
            }
            Err(e) => {
                error!(error = %e, "Failed to save recipe");
                if let Some(form) = self.form.as_mut() {
                    form.error = Some(format!("Could not save recipe: {}", e));
                }
            }
        }
    }
}

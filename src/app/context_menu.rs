//! Shared context menu for recipe items (used by both card and compact list layouts)

use super::{App, AppAction};
use crate::theme;
use crate::types::{Recipe, View};
use eframe::egui;

impl App {
    pub(crate) fn recipe_context_menu(&mut self, ui: &mut egui::Ui, recipe: &Recipe) -> Option<AppAction> {
        ui.spacing_mut().item_spacing.y = 2.0;
        theme::set_menu_width(ui, &["Start cooking", "Edit", "Delete"]);

        let mut action = None;
        if theme::menu_item(ui, egui_phosphor::regular::PLAY, "Start cooking") {
            action = Some(AppAction::Navigate(View::Detail(recipe.id.clone())));
            ui.close_menu();
        }
        if theme::menu_item(ui, egui_phosphor::regular::PENCIL_SIMPLE, "Edit") {
            action = Some(AppAction::Navigate(View::Edit(recipe.id.clone())));
            ui.close_menu();
        }
        ui.separator();
        if theme::menu_item(ui, egui_phosphor::regular::TRASH, "Delete") {
            action = Some(AppAction::RequestDelete(recipe.id.clone()));
            ui.close_menu();
        }
        action
    }
}

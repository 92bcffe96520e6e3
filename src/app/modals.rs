//! Modal dialogs (delete confirmation, settings)

use super::{App, AppAction};
use crate::constants::APP_VERSION;
use crate::store::RecipeSource;
use crate::theme;
use eframe::egui;

impl App {
    pub(crate) fn render_delete_modal(&mut self, ctx: &egui::Context) -> Option<AppAction> {
        let id = self.pending_delete.clone()?;
        let name = self
            .store
            .get_recipe(&id)
            .map(|r| r.name)
            .unwrap_or_else(|_| "this recipe".to_string());

        let mut action = None;
        let modal = egui::Modal::new(egui::Id::new("delete_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(180))
            .frame(theme::modal_frame());
        let response = modal.show(ctx, |ui| {
            ui.set_width(theme::MODAL_WIDTH);
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(egui_phosphor::regular::TRASH)
                        .size(32.0)
                        .color(theme::STATUS_ERROR),
                );
                ui.add_space(theme::SPACING_MD);
                ui.label(egui::RichText::new("Delete recipe?").size(theme::FONT_HEADING).strong());
                ui.add_space(theme::SPACING_SM);
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(format!("Are you sure you want to delete \"{}\"?", name))
                            .color(theme::TEXT_MUTED),
                    )
                    .wrap(),
                );
                ui.add_space(theme::SPACING_XL);
                ui.horizontal(|ui| {
                    if ui.add(theme::button("Cancel")).clicked() {
                        action = Some(AppAction::CancelDelete);
                    }
                    if ui.add(theme::button_danger(format!("{}  Delete", egui_phosphor::regular::TRASH))).clicked() {
                        action = Some(AppAction::ConfirmDelete);
                    }
                });
            });
        });

        if response.should_close() && action.is_none() {
            action = Some(AppAction::CancelDelete);
        }
        action
    }

    pub(crate) fn render_settings_modal(&mut self, ctx: &egui::Context) {
        if !self.show_settings {
            return;
        }

        let modal = egui::Modal::new(egui::Id::new("settings_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(120))
            .frame(theme::modal_frame());
        let response = modal.show(ctx, |ui| {
            ui.set_width(theme::MODAL_WIDTH);

            ui.horizontal(|ui| {
                ui.add(egui::Label::new(egui::RichText::new("Settings").size(theme::FONT_HEADING).strong()).selectable(false));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let close = ui.add(egui::Button::new(egui_phosphor::regular::X).frame(false));
                    if close.clicked() {
                        self.show_settings = false;
                    }
                });
            });
            ui.add_space(theme::SPACING_SM);
            ui.separator();
            ui.add_space(theme::SPACING_SM);

            ui.label(egui::RichText::new("View").size(13.0).color(theme::ACCENT));
            ui.add_space(theme::SPACING_XS);
            if theme::settings_checkbox(ui, self.compact_list, "Compact recipe list") {
                self.compact_list = !self.compact_list;
                self.save_settings();
            }
            if theme::settings_checkbox(ui, self.show_step_images, "Show step images") {
                self.show_step_images = !self.show_step_images;
                self.save_settings();
            }

            ui.add_space(theme::SPACING_LG);
            ui.label(
                egui::RichText::new(format!("v{}  •  {}", APP_VERSION, self.data_dir.display()))
                    .size(theme::FONT_SMALL)
                    .color(theme::TEXT_DIM),
            );
        });

        if response.should_close() {
            self.show_settings = false;
        }
    }
}

//! Recipe list view (cards or compact rows)

use super::{App, AppAction};
use crate::store::RecipeSource;
use crate::theme;
use crate::types::{Recipe, View};
use crate::utils::plural;
use eframe::egui;

impl App {
    pub(crate) fn render_list_view(&mut self, ui: &mut egui::Ui) -> Option<AppAction> {
        let recipes = self.store.get_all_recipes();

        if recipes.is_empty() {
            return render_empty_state(ui);
        }

        let mut action = None;

        // Header: title + search
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("All Recipes").size(theme::FONT_TITLE).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let te = ui.add(
                    egui::TextEdit::singleline(&mut self.search_query)
                        .hint_text(format!("{}  Type to filter", egui_phosphor::regular::MAGNIFYING_GLASS))
                        .desired_width(220.0),
                );
                if self.focus_search {
                    self.focus_search = false;
                    te.request_focus();
                }
            });
        });
        ui.add_space(theme::SPACING_MD);

        let visible: Vec<&Recipe> = recipes.iter().filter(|r| r.matches(&self.search_query)).collect();
        ui.label(
            egui::RichText::new(format!("Showing {} of {}", visible.len(), plural(recipes.len(), "recipe")))
                .size(theme::FONT_SMALL)
                .color(theme::TEXT_DIM),
        );
        ui.add_space(theme::SPACING_SM);

        if visible.is_empty() {
            ui.add_space(theme::SPACING_XL);
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("No recipes match your search").color(theme::TEXT_MUTED));
            });
            return None;
        }

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if self.compact_list {
                    for recipe in &visible {
                        if let Some(a) = self.render_compact_row(ui, recipe) {
                            action = Some(a);
                        }
                    }
                } else {
                    ui.horizontal_wrapped(|ui| {
                        ui.spacing_mut().item_spacing = egui::vec2(theme::SPACING_LG, theme::SPACING_LG);
                        for recipe in &visible {
                            if let Some(a) = self.render_card(ui, recipe) {
                                action = Some(a);
                            }
                        }
                    });
                }
            });

        action
    }

    fn render_card(&mut self, ui: &mut egui::Ui, recipe: &Recipe) -> Option<AppAction> {
        let mut action = None;
        let frame = theme::card_frame().show(ui, |ui| {
            ui.set_width(theme::CARD_WIDTH);
            ui.vertical(|ui| {
                let title = ui.add(
                    egui::Label::new(egui::RichText::new(&recipe.name).size(theme::FONT_HEADING).strong())
                        .sense(egui::Sense::click())
                        .truncate(),
                );
                if title.clicked() {
                    action = Some(AppAction::Navigate(View::Detail(recipe.id.clone())));
                }
                if !recipe.description.is_empty() {
                    ui.add(
                        egui::Label::new(egui::RichText::new(&recipe.description).color(theme::TEXT_MUTED))
                            .wrap(),
                    );
                }
                ui.add_space(theme::SPACING_SM);
                ui.horizontal(|ui| {
                    meta(ui, egui_phosphor::regular::TIMER, &format!("{} mins", recipe.total_time));
                    meta(ui, egui_phosphor::regular::LIST_NUMBERS, &plural(recipe.steps.len(), "step"));
                });
                ui.add_space(theme::SPACING_SM);
                ui.horizontal(|ui| {
                    if ui.add(theme::button_accent(format!("{}  Cook", egui_phosphor::regular::PLAY))).clicked() {
                        action = Some(AppAction::Navigate(View::Detail(recipe.id.clone())));
                    }
                    if ui.add(theme::button(format!("{}  Edit", egui_phosphor::regular::PENCIL_SIMPLE))).clicked() {
                        action = Some(AppAction::Navigate(View::Edit(recipe.id.clone())));
                    }
                    if ui.add(theme::button(format!("{}  Delete", egui_phosphor::regular::TRASH))).clicked() {
                        action = Some(AppAction::RequestDelete(recipe.id.clone()));
                    }
                });
            });
        });

        let response = frame.response.interact(egui::Sense::click());
        response.context_menu(|ui| {
            if let Some(a) = self.recipe_context_menu(ui, recipe) {
                action = Some(a);
            }
        });
        action
    }

    fn render_compact_row(&mut self, ui: &mut egui::Ui, recipe: &Recipe) -> Option<AppAction> {
        let mut action = None;
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), theme::COMPACT_ROW_HEIGHT),
            egui::Sense::click(),
        );
        if response.hovered() {
            ui.painter().rect_filled(rect, theme::RADIUS_DEFAULT, theme::BG_HOVER);
        }
        let painter = ui.painter();
        painter.text(
            rect.left_center() + egui::vec2(theme::SPACING_MD, 0.0),
            egui::Align2::LEFT_CENTER,
            &recipe.name,
            egui::FontId::proportional(theme::FONT_BODY),
            theme::TEXT_PRIMARY,
        );
        painter.text(
            rect.right_center() - egui::vec2(theme::SPACING_MD, 0.0),
            egui::Align2::RIGHT_CENTER,
            format!("{} mins  •  {}", recipe.total_time, plural(recipe.steps.len(), "step")),
            egui::FontId::proportional(theme::FONT_SMALL),
            theme::TEXT_DIM,
        );

        if response.clicked() {
            action = Some(AppAction::Navigate(View::Detail(recipe.id.clone())));
        }
        response.context_menu(|ui| {
            if let Some(a) = self.recipe_context_menu(ui, recipe) {
                action = Some(a);
            }
        });
        action
    }
}

fn meta(ui: &mut egui::Ui, icon: &str, text: &str) {
    ui.label(
        egui::RichText::new(format!("{} {}", icon, text))
            .size(theme::FONT_SMALL)
            .color(theme::TEXT_DIM),
    );
}

fn render_empty_state(ui: &mut egui::Ui) -> Option<AppAction> {
    let mut action = None;
    ui.vertical_centered(|ui| {
        ui.add_space(80.0);
        ui.label(
            egui::RichText::new(egui_phosphor::regular::COOKING_POT)
                .size(48.0)
                .color(theme::TEXT_DIM),
        );
        ui.add_space(theme::SPACING_MD);
        ui.label(egui::RichText::new("No Recipes Yet").size(theme::FONT_TITLE).strong());
        ui.label(egui::RichText::new("Click \"Add Recipe\" to create your first recipe!").color(theme::TEXT_MUTED));
        ui.add_space(theme::SPACING_LG);
        if ui.add(theme::button_accent(format!("{}  Add Recipe", egui_phosphor::regular::PLUS))).clicked() {
            action = Some(AppAction::Navigate(View::Add));
        }
    });
    action
}

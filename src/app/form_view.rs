//! Add / edit recipe form view

use super::{App, AppAction};
use crate::theme;
use crate::types::View;
use crate::ui::components::{flame_picker, form_field};
use eframe::egui;
use tracing::{debug, warn};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

impl App {
    pub(crate) fn render_form_view(&mut self, ui: &mut egui::Ui) -> Option<AppAction> {
        let Some(form) = self.form.as_mut() else {
            return Some(AppAction::Navigate(View::List));
        };

        let mut action = None;
        let title = if form.is_editing() { "Edit Recipe" } else { "Add New Recipe" };

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.label(egui::RichText::new(title).size(theme::FONT_TITLE).strong());
                ui.add_space(theme::SPACING_MD);

                form_field(ui, "Recipe Name", true, &mut form.name, false);
                form_field(ui, "Description", false, &mut form.description, true);
                form_field(ui, "Total Time (minutes)", true, &mut form.total_time, false);

                ui.add_space(theme::SPACING_MD);
                ui.label(egui::RichText::new("Steps").size(theme::FONT_HEADING).strong());
                ui.add_space(theme::SPACING_SM);

                let can_remove = form.steps.len() > 1;
                let mut remove = None;
                let mut image_error = None;
                for (index, step) in form.steps.iter_mut().enumerate() {
                    ui.push_id(index, |ui| {
                        theme::card_frame().show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            ui.label(egui::RichText::new(format!("Step {}", index + 1)).strong());
                            form_field(ui, "Step Description", true, &mut step.description, false);
                            form_field(ui, "Ingredients", false, &mut step.ingredients, false);
                            form_field(ui, "Instructions", false, &mut step.instructions, true);

                            ui.horizontal(|ui| {
                                ui.vertical(|ui| {
                                    ui.label(
                                        egui::RichText::new("Flame Intensity (1-5)")
                                            .size(theme::FONT_SMALL)
                                            .color(theme::TEXT_MUTED),
                                    );
                                    flame_picker(ui, &mut step.flame);
                                });
                                ui.add_space(theme::SPACING_XL);
                                ui.vertical(|ui| {
                                    ui.label(
                                        egui::RichText::new("Cook Time (minutes) *")
                                            .size(theme::FONT_SMALL)
                                            .color(theme::TEXT_MUTED),
                                    );
                                    ui.add(egui::TextEdit::singleline(&mut step.cook_time).desired_width(80.0));
                                });
                            });

                            ui.add_space(theme::SPACING_SM);
                            ui.horizontal(|ui| {
                                let label = match &step.image {
                                    Some(path) => format!("{}  {}", egui_phosphor::regular::IMAGE, path),
                                    None => format!("{}  Add image", egui_phosphor::regular::IMAGE),
                                };
                                if ui.add(theme::button(label).truncate()).clicked() {
                                    if let Some(path) = rfd::FileDialog::new()
                                        .add_filter("Images", IMAGE_EXTENSIONS)
                                        .pick_file()
                                    {
                                        match image::image_dimensions(&path) {
                                            Ok((w, h)) => {
                                                debug!(path = %path.display(), w, h, "Step image picked");
                                                step.image = Some(path.to_string_lossy().to_string());
                                            }
                                            Err(e) => {
                                                warn!(path = %path.display(), error = %e, "Unreadable step image");
                                                image_error = Some(format!("Could not read image: {}", e));
                                            }
                                        }
                                    }
                                }
                                if step.image.is_some()
                                    && ui.add(theme::button(egui_phosphor::regular::X)).on_hover_text("Remove image").clicked()
                                {
                                    step.image = None;
                                }
                                if can_remove {
                                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                        if ui.add(theme::button_danger("Remove Step")).clicked() {
                                            remove = Some(index);
                                        }
                                    });
                                }
                            });
                        });
                    });
                    ui.add_space(theme::SPACING_MD);
                }
                if let Some(index) = remove {
                    form.remove_step(index);
                }
                if image_error.is_some() {
                    form.error = image_error;
                }

                if ui.add(theme::button(format!("{}  Add Another Step", egui_phosphor::regular::PLUS))).clicked() {
                    form.add_step();
                }

                if let Some(err) = &form.error {
                    ui.add_space(theme::SPACING_MD);
                    theme::error_frame().show(ui, |ui| {
                        ui.set_min_width(ui.available_width());
                        let text = format!("{}  {}", egui_phosphor::regular::WARNING, err);
                        ui.add(egui::Label::new(egui::RichText::new(text).color(theme::STATUS_ERROR)).wrap());
                    });
                }

                ui.add_space(theme::SPACING_LG);
                ui.horizontal(|ui| {
                    if ui.add(theme::button("Cancel")).clicked() {
                        action = Some(AppAction::Navigate(View::List));
                    }
                    let submit = if form.is_editing() { "Update Recipe" } else { "Add Recipe" };
                    if ui.add(theme::button_accent(submit)).clicked() {
                        action = Some(AppAction::SubmitForm);
                    }
                });
                ui.add_space(theme::SPACING_XL);
            });

        action
    }
}

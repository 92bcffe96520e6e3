//! Recipe detail view with the step walkthrough

use super::{App, AppAction};
use crate::theme;
use crate::types::View;
use crate::ui::components::{badge, flame_intensity, step_progress};
use crate::utils::{format_clock, image_uri};
use eframe::egui;

enum StepControl {
    TogglePlay,
    Pause,
    Reset,
    JumpTo(usize),
}

impl App {
    pub(crate) fn render_detail_view(&mut self, ui: &mut egui::Ui) -> Option<AppAction> {
        let show_images = self.show_step_images;
        let keys_enabled = !self.any_modal_open() && !ui.ctx().wants_keyboard_input();
        let Some(session) = self.session.as_mut() else {
            return Some(AppAction::Navigate(View::List));
        };

        let mut action = None;
        let mut control = None;
        if keys_enabled {
            // Space: play/pause, Escape: pause
            ui.input(|i| {
                if i.key_pressed(egui::Key::Space) {
                    control = Some(StepControl::TogglePlay);
                } else if i.key_pressed(egui::Key::Escape) {
                    control = Some(StepControl::Pause);
                }
            });
        }
        let recipe = session.recipe().clone();
        let state = session.state();

        if ui.add(theme::button(format!("{}  Back to Recipes", egui_phosphor::regular::ARROW_LEFT))).clicked() {
            action = Some(AppAction::Navigate(View::List));
        }
        ui.add_space(theme::SPACING_MD);

        // Header
        ui.label(egui::RichText::new(&recipe.name).size(theme::FONT_TITLE).strong());
        if !recipe.description.is_empty() {
            ui.add(egui::Label::new(egui::RichText::new(&recipe.description).color(theme::TEXT_MUTED)).wrap());
        }
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(format!("{} {} minutes", egui_phosphor::regular::TIMER, recipe.total_time))
                    .color(theme::TEXT_SECONDARY),
            );
            if session.recipe_finished() {
                badge(ui, "All steps done", theme::STATUS_SUCCESS);
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.add(theme::button(format!("{}  Reset", egui_phosphor::regular::ARROW_COUNTER_CLOCKWISE))).clicked() {
                    control = Some(StepControl::Reset);
                }
            });
        });
        ui.add_space(theme::SPACING_LG);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (index, step) in recipe.steps.iter().enumerate() {
                    let active = index == state.step_index;
                    let completed = index < state.step_index;

                    theme::step_frame(active, completed).show(ui, |ui| {
                        ui.set_width(ui.available_width());

                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new(format!("Step {}", index + 1)).size(theme::FONT_HEADING).strong());
                            if completed {
                                badge(ui, &format!("{} Completed", egui_phosphor::regular::CHECK), theme::STATUS_SUCCESS);
                            } else if active {
                                badge(ui, "Current Step", theme::ACCENT);
                            }
                        });

                        if !step.description.is_empty() {
                            ui.label(egui::RichText::new(&step.description).color(theme::TEXT_SECONDARY));
                        }
                        if !step.ingredients.is_empty() {
                            labeled(ui, "Ingredients", &step.ingredients);
                        }
                        if !step.instructions.is_empty() {
                            labeled(ui, "Instructions", &step.instructions);
                        }
                        if show_images {
                            if let Some(image) = &step.image {
                                ui.add_space(theme::SPACING_SM);
                                ui.add(
                                    egui::Image::new(image_uri(image))
                                        .max_height(theme::STEP_IMAGE_MAX_HEIGHT)
                                        .corner_radius(theme::RADIUS_LARGE),
                                );
                            }
                        }

                        if active {
                            ui.add_space(theme::SPACING_MD);
                            ui.horizontal(|ui| {
                                let (icon, label) = if state.running {
                                    (egui_phosphor::regular::PAUSE, "Pause")
                                } else {
                                    (egui_phosphor::regular::PLAY, "Play")
                                };
                                if ui.add(theme::button_accent(icon)).on_hover_text(label).clicked() {
                                    control = Some(StepControl::TogglePlay);
                                }
                                ui.label(
                                    egui::RichText::new(format!(
                                        "{} / {}",
                                        format_clock(state.elapsed_secs),
                                        format_clock(session.display_seconds(index)),
                                    ))
                                    .monospace()
                                    .size(theme::FONT_HEADING),
                                );
                                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                    ui.label(
                                        egui::RichText::new(format!("{} minutes", step.cook_time))
                                            .color(theme::TEXT_MUTED),
                                    );
                                    flame_intensity(ui, step.flame);
                                });
                            });
                            if state.running {
                                step_progress(ui, session.progress());
                            }
                        } else if index > state.step_index {
                            ui.add_space(theme::SPACING_SM);
                            if ui.add(theme::button(format!("{}  Start", egui_phosphor::regular::SKIP_FORWARD))).clicked() {
                                control = Some(StepControl::JumpTo(index));
                            }
                        }
                    });
                    ui.add_space(theme::SPACING_MD);
                }
            });

        match control {
            Some(StepControl::TogglePlay) => session.toggle_play(),
            Some(StepControl::Pause) => session.pause(),
            Some(StepControl::Reset) => session.reset(),
            Some(StepControl::JumpTo(step)) => {
                session.jump_to(step);
            }
            None => {}
        }

        action
    }
}

fn labeled(ui: &mut egui::Ui, label: &str, text: &str) {
    ui.horizontal_wrapped(|ui| {
        ui.label(egui::RichText::new(format!("{}:", label)).strong());
        ui.label(text);
    });
}

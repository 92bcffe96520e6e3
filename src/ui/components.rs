//! Reusable UI components

use crate::constants::FLAME_MAX;
use crate::theme;
use eframe::egui;

/// Five flame glyphs, lit up to `intensity`
pub fn flame_intensity(ui: &mut egui::Ui, intensity: i64) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 1.0;
        for n in 1..=FLAME_MAX {
            let color = if n <= intensity { theme::FLAME_LIT } else { theme::FLAME_UNLIT };
            ui.label(
                egui::RichText::new(egui_phosphor::regular::FIRE)
                    .size(theme::FONT_HEADING)
                    .color(color),
            );
        }
    });
}

/// Flame level picker (1-5). Returns true if the value changed.
pub fn flame_picker(ui: &mut egui::Ui, value: &mut i64) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 1.0;
        for n in 1..=FLAME_MAX {
            let color = if n <= *value { theme::FLAME_LIT } else { theme::FLAME_UNLIT };
            let resp = ui.add(
                egui::Label::new(
                    egui::RichText::new(egui_phosphor::regular::FIRE)
                        .size(20.0)
                        .color(color),
                )
                .sense(egui::Sense::click()),
            );
            if resp.clicked() && *value != n {
                *value = n;
                changed = true;
            }
            resp.on_hover_text(format!("Flame {}", n));
        }
    });
    changed
}

/// Small pill-shaped badge
pub fn badge(ui: &mut egui::Ui, text: &str, color: egui::Color32) {
    egui::Frame::new()
        .fill(color.gamma_multiply(0.15))
        .corner_radius(10.0)
        .inner_margin(egui::Margin::symmetric(8, 2))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).size(theme::FONT_SMALL).color(color));
        });
}

/// Thin progress bar for the active step
pub fn step_progress(ui: &mut egui::Ui, fraction: f32) {
    ui.add(
        egui::ProgressBar::new(fraction.clamp(0.0, 1.0))
            .desired_height(theme::PROGRESS_HEIGHT)
            .fill(theme::ACCENT)
            .corner_radius(theme::RADIUS_DEFAULT),
    );
}

/// Labeled text field row used by the recipe form
pub fn form_field(ui: &mut egui::Ui, label: &str, required: bool, value: &mut String, multiline: bool) {
    let text = if required { format!("{} *", label) } else { label.to_string() };
    ui.label(egui::RichText::new(text).size(theme::FONT_SMALL).color(theme::TEXT_MUTED));
    let edit = if multiline {
        egui::TextEdit::multiline(value).desired_rows(3)
    } else {
        egui::TextEdit::singleline(value)
    };
    ui.add(edit.desired_width(f32::INFINITY));
    ui.add_space(theme::SPACING_SM);
}

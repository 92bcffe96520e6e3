#![windows_subsystem = "windows"]
//! Recipe Manager - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;
mod constants;
mod error;
mod form;
mod settings;
mod storage;
mod store;
mod theme;
mod types;
mod ui;
mod utils;
mod walkthrough;

use app::{App, AppAction};
use constants::*;
use eframe::egui;
use storage::LocalStorage;
use store::RecipeStore;
use tracing::{error, info};
use types::View;
use utils::get_data_dir;

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "recipe-manager.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,recipe_manager=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "Recipe Manager starting");

    let storage_path = data_dir.join(STORAGE_FILE);
    let store = match LocalStorage::open(&storage_path).map_err(error::StoreError::from).and_then(RecipeStore::load) {
        Ok(store) => {
            info!(path = %storage_path.display(), recipes = store.len(), "Recipe store ready");
            store
        }
        Err(e) => {
            error!(error = %e, path = %storage_path.display(), "Failed to open recipe storage");
            return Err(eframe::Error::AppCreation(Box::new(e)));
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!(error = %e, "Failed to start async runtime");
            return Err(eframe::Error::AppCreation(Box::new(e)));
        }
    };

    // Load saved window position/size
    let settings = settings::Settings::load(&data_dir);
    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(1100.0, 780.0)))
        .with_min_inner_size([640.0, 480.0])
        .with_title(APP_NAME);

    if let Some((rgba, width, height)) = utils::rasterize_icon(256) {
        let icon = egui::IconData { rgba, width, height };
        viewport = viewport.with_icon(std::sync::Arc::new(icon));
    }

    let needs_center = win_pos.is_none();

    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            let mut app = App::new(cc, store, settings, data_dir, runtime);
            app.needs_center = needs_center;
            Ok(Box::new(app))
        }),
    )
}

// ============================================================================
// MAIN UPDATE LOOP & UI RENDERING
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        // Reap a tick task that stopped on its own (step finished)
        self.poll_session();

        // Global keyboard capture on the list: type anywhere to filter
        if self.view == View::List && !self.any_modal_open() && !ctx.wants_keyboard_input() {
            let mut typed_text = String::new();
            let mut backspace = false;
            ctx.input(|i| {
                for event in &i.events {
                    if let egui::Event::Text(text) = event {
                        if !text.is_empty() && text.chars().all(|c| !c.is_control()) {
                            typed_text.push_str(text);
                        }
                    }
                    if let egui::Event::Key { key: egui::Key::Backspace, pressed: true, .. } = event {
                        backspace = true;
                    }
                }
            });
            if !typed_text.is_empty() {
                self.search_query.push_str(&typed_text);
                self.focus_search = true;
            }
            if backspace && !self.search_query.is_empty() {
                self.search_query.pop();
                self.focus_search = true;
            }
        }

        let mut actions: Vec<AppAction> = Vec::new();

        // Top bar - title, navigation, settings
        egui::TopBottomPanel::top("top_bar")
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_ELEVATED)
                    .inner_margin(egui::Margin::symmetric(16, 10))
                    .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(format!("{}  {}", egui_phosphor::regular::COOKING_POT, APP_NAME))
                            .size(theme::FONT_HEADING)
                            .strong()
                            .color(theme::ACCENT),
                    );
                    ui.add_space(theme::SPACING_XL);
                    let on_list = matches!(self.view, View::List | View::Detail(_));
                    if theme::nav_tab(ui, "All Recipes", on_list) {
                        actions.push(AppAction::Navigate(View::List));
                    }
                    if theme::nav_tab(ui, "Add Recipe", self.view == View::Add) {
                        actions.push(AppAction::Navigate(View::Add));
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let gear = ui.add(egui::Button::new(
                            egui::RichText::new(egui_phosphor::regular::GEAR).size(18.0),
                        ).frame(false));
                        if gear.on_hover_text("Settings").clicked() {
                            self.show_settings = true;
                        }
                    });
                });
            });

        // Central panel (MUST be added LAST after all side/top/bottom panels)
        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::same(16)),
            )
            .show(ctx, |ui| {
                self.central_panel_rect = Some(ui.max_rect());
                let width = ui.available_width().min(theme::CONTENT_MAX_WIDTH);
                let action = ui
                    .vertical_centered(|ui| {
                        ui.set_max_width(width);
                        ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| match self.view {
                            View::List => self.render_list_view(ui),
                            View::Add | View::Edit(_) => self.render_form_view(ui),
                            View::Detail(_) => self.render_detail_view(ui),
                        })
                        .inner
                    })
                    .inner;
                actions.extend(action);
            });

        actions.extend(self.render_delete_modal(ctx));
        self.render_settings_modal(ctx);

        for action in actions {
            self.apply(action, ctx);
        }

        self.render_toast(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application shutting down");
        if let Some(mut session) = self.session.take() {
            session.close();
        }
        self.save_settings();
    }
}

impl App {
    /// Toast notification (bottom-right of central panel, 3s visible then fade, pause on hover)
    fn render_toast(&mut self, ctx: &egui::Context) {
        let (Some(msg), Some(panel_rect)) = (self.toast_message.clone(), self.central_panel_rect) else {
            return;
        };
        let visible_duration = TOAST_DURATION.as_secs_f32();
        let fade_duration = 0.5;
        let total_duration = visible_duration + fade_duration;
        let margin = 12.0;
        let accent = if self.toast_is_error { theme::STATUS_ERROR } else { theme::ACCENT };

        let toast_pos = egui::pos2(panel_rect.right() - margin, panel_rect.bottom() - margin);

        let response = egui::Area::new(egui::Id::new("toast"))
            .fixed_pos(toast_pos)
            .pivot(egui::Align2::RIGHT_BOTTOM)
            .show(ctx, |ui| {
                let elapsed = self.toast_start.map(|t| t.elapsed().as_secs_f32()).unwrap_or(0.0);
                let alpha = if elapsed > visible_duration {
                    ((total_duration - elapsed) / fade_duration).clamp(0.0, 1.0)
                } else {
                    1.0
                };

                egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(0x1e, 0x1b, 0x19, (230.0 * alpha) as u8))
                    .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgba_unmultiplied(
                        accent.r(), accent.g(), accent.b(), (100.0 * alpha) as u8,
                    )))
                    .corner_radius(6.0)
                    .inner_margin(egui::Margin::symmetric(16, 10))
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(msg).color(
                            egui::Color32::from_rgba_unmultiplied(255, 255, 255, (255.0 * alpha) as u8),
                        ));
                    });
            });

        // Pause timer while hovering
        if response.response.hovered() {
            self.toast_start = Some(std::time::Instant::now());
        }

        let elapsed = self.toast_start.map(|t| t.elapsed().as_secs_f32()).unwrap_or(0.0);
        if elapsed >= total_duration {
            self.toast_message = None;
            self.toast_start = None;
        } else {
            ctx.request_repaint();
        }
    }
}

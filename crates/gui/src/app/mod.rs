//! Main application module

mod keyboard;
mod menus;
mod styles;

use std::time::Instant;

use eframe::egui;

use crate::state::AppState;
use crate::ui::{shape_list, status_bar, toolbar};
use crate::viewport::ViewportPanel;

/// Main application
pub struct FitApp {
    state: AppState,
    viewport: ViewportPanel,
    /// Last applied font size (to detect changes)
    last_font_size: f32,
}

impl FitApp {
    pub fn new(cc: &eframe::CreationContext<'_>, mut state: AppState) -> Self {
        styles::configure_styles(&cc.egui_ctx, state.settings.ui.font_size);

        // Start with the bare block so shapes carve it as they are added
        state.redraw_body();

        let viewport = ViewportPanel::new(state.settings.view.pixels_per_unit);
        let last_font_size = state.settings.ui.font_size;

        Self {
            state,
            viewport,
            last_font_size,
        }
    }
}

impl eframe::App for FitApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Work scheduled by the previous frame's event handlers
        self.state.builder.drain_deferred();

        if self.state.builder.tick(Instant::now()).is_some() {
            tracing::debug!("drag session expired");
        }
        if self.state.builder.is_dragging() {
            // Keep ticking so an abandoned session can time out
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }

        if self.state.settings.ui.font_size != self.last_font_size {
            styles::apply_font_size(ctx, self.state.settings.ui.font_size);
            self.last_font_size = self.state.settings.ui.font_size;
        }

        keyboard::handle_keyboard(ctx, &mut self.state, &mut self.viewport);

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                menus::file_menu(ui, &mut self.state);
                menus::shapes_menu(ui, &mut self.state);
                menus::view_menu(ui, &mut self.state, &mut self.viewport);
                menus::settings_menu(ui, &mut self.state);
            });
        });

        menus::settings_window(ctx, &mut self.state);

        // ── Toolbar ───────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                toolbar::show(ui, &mut self.state);
            });

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)),
            )
            .show(ctx, |ui| {
                status_bar::show(ui, &self.state);
            });

        // ── Left panel: shape list ───────────────────────────
        egui::SidePanel::left("shape_list")
            .default_width(220.0)
            .width_range(140.0..=400.0)
            .resizable(true)
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)))
            .show(ctx, |ui| {
                shape_list::show(ui, &self.state);
            });

        // ── Central panel: plan viewport ─────────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.viewport.show(ui, &mut self.state);
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // A drag in flight when the window closes still commits its move
        self.state.builder.capture_lost();
    }
}

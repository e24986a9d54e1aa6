mod app;
mod ui;
mod viewport;

// Re-export library modules so that `crate::state`, `crate::builder`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use xactfit_lib::build;
pub use xactfit_lib::builder;
pub use xactfit_lib::helpers;
pub use xactfit_lib::interaction;
pub use xactfit_lib::snap;
pub use xactfit_lib::state;

use app::FitApp;
use state::{AppState, FitSettings};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "xactfit=info,xactfit_lib=info".into()),
        )
        .init();

    let mut settings = FitSettings::load();
    if let Some([w, h, d]) = parse_body_arg() {
        settings.body.width = w;
        settings.body.height = h;
        settings.body.depth = d;
    }
    let state = AppState::new(settings);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("XactFit: custom-fit case builder")
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "xactfit",
        native_options,
        Box::new(move |cc| Ok(Box::new(FitApp::new(cc, state)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

/// Parse `--body WxHxD` into a stock size
fn parse_body_arg() -> Option<[f64; 3]> {
    let args: Vec<String> = std::env::args().collect();
    let pos = args.iter().position(|a| a == "--body")?;
    let Some(value) = args.get(pos + 1) else {
        tracing::error!("--body expects a size like 3x2x5");
        return None;
    };
    match parse_size(value) {
        Some(size) => {
            tracing::info!("Body size from command line: {value}");
            Some(size)
        }
        None => {
            tracing::error!("Invalid body size '{value}', expected WxHxD with positive numbers");
            None
        }
    }
}

fn parse_size(value: &str) -> Option<[f64; 3]> {
    let parts: Vec<f64> = value
        .split(['x', 'X'])
        .map(|p| p.trim().parse::<f64>().ok())
        .collect::<Option<_>>()?;
    match parts.as_slice() {
        &[w, h, d] if w > 0.0 && h > 0.0 && d > 0.0 => Some([w, h, d]),
        _ => None,
    }
}

pub mod catalog;
pub mod settings;

pub use settings::FitSettings;

use crate::builder::FitBuilder;

/// Values typed into the toolbar's shape forms
#[derive(Debug, Clone)]
pub struct ShapeForms {
    pub box_size: [f64; 3],
    pub cylinder_height: f64,
    pub cylinder_diameters: [f64; 2],
    pub cylinder_tessellation: u32,
    pub cylinder_horizontal: bool,
    pub sphere_diameters: [f64; 3],
    pub sphere_tessellation: u32,
    pub text: String,
    pub text_size: f64,
    pub text_depth: f64,
}

impl Default for ShapeForms {
    fn default() -> Self {
        Self {
            box_size: [1.0, 0.6, 2.0],
            cylinder_height: 1.0,
            cylinder_diameters: [1.5, 1.0],
            cylinder_tessellation: 16,
            cylinder_horizontal: false,
            sphere_diameters: [1.5, 1.0, 1.0],
            sphere_tessellation: 16,
            text: "HSO".to_string(),
            text_size: 0.25,
            text_depth: 0.5,
        }
    }
}

/// Combined application state
pub struct AppState {
    pub builder: FitBuilder,
    pub settings: FitSettings,
    pub forms: ShapeForms,
    /// Stock size typed into the body form
    pub body_size: [f64; 3],
    /// Last rejected input, shown in the status bar
    pub input_error: Option<String>,
    pub show_settings_window: bool,
}

impl AppState {
    pub fn new(settings: FitSettings) -> Self {
        let body_size = [settings.body.width, settings.body.height, settings.body.depth];
        Self {
            builder: FitBuilder::from_settings(&settings),
            settings,
            forms: ShapeForms::default(),
            body_size,
            input_error: None,
            show_settings_window: false,
        }
    }

    /// Carve the body with the size from the body form
    pub fn redraw_body(&mut self) {
        let [w, h, d] = self.body_size;
        if let Err(e) = self.builder.draw_body(w, h, d) {
            self.input_error = Some(e.to_string());
        }
    }

    /// Record the outcome of a user action
    pub fn report<T, E: std::fmt::Display>(&mut self, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(v) => {
                self.input_error = None;
                Some(v)
            }
            Err(e) => {
                tracing::warn!("{}", e);
                self.input_error = Some(e.to_string());
                None
            }
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(FitSettings::load())
    }
}

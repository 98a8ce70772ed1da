use crate::config::{CONFIG_ENV_VAR, PadConfig};
use crate::input::InputHandler;
use crate::pad::DraftPad;
use crate::panels;

/// We derive Deserialize/Serialize so the pen settings survive restarts.
/// The drawing itself is never persisted.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct DraftPadApp {
    config: PadConfig,
    #[serde(skip)]
    pad: DraftPad,
    #[serde(skip)]
    input: InputHandler,
}

impl Default for DraftPadApp {
    fn default() -> Self {
        Self::with_config(PadConfig::default())
    }
}

impl DraftPadApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // An explicit config file wins over what was stored last run.
        let config = if std::env::var_os(CONFIG_ENV_VAR).is_some() {
            PadConfig::from_env()
        } else {
            cc.storage
                .and_then(|storage| eframe::get_value::<DraftPadApp>(storage, eframe::APP_KEY))
                .map(|app| app.config)
                .unwrap_or_default()
        };
        Self::with_config(config)
    }

    pub fn with_config(config: PadConfig) -> Self {
        Self {
            pad: DraftPad::new(config.clone()),
            config,
            input: InputHandler::new(),
        }
    }

    pub fn pad(&self) -> &DraftPad {
        &self.pad
    }

    pub fn pad_mut(&mut self) -> &mut DraftPad {
        &mut self.pad
    }
}

impl eframe::App for DraftPadApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.config = self.pad.current_config();
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Draft pad");
            ui.label("Scratch space for working out an answer. Nothing drawn here is saved.");
            ui.add_space(8.0);
            if ui
                .add_enabled(!self.pad.is_open(), egui::Button::new("Open draft pad"))
                .clicked()
            {
                self.pad.open(ctx);
            }
        });

        if !self.pad.is_open() {
            return;
        }

        panels::canvas_panel(&mut self.pad, &mut self.input, ctx);
        panels::toolbar(&mut self.pad, ctx);

        if self.pad.close_requested() {
            self.pad.close();
            self.config = self.pad.config().clone();
        }
    }
}

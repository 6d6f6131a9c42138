//! Collision matrix editor.
//!
//! A small desktop app for editing named-layer collision matrix documents:
//! rename layers, add and remove them without losing configured pairs,
//! toggle self collision, and save the result as JSON.

use std::time::Instant;

use colmat::{MatrixGrid, NameRegistry};
use colmat_editor::config::MatrixConfig;
use eframe::egui;

/// Marker type for this app's entry in the global name registry.
struct EditorLayers;

/// How long a status message stays visible.
const STATUS_SECS: f32 = 3.0;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 520.0])
            .with_title("Collision Matrix Editor"),
        ..Default::default()
    };

    eframe::run_native(
        "Collision Matrix Editor",
        options,
        Box::new(|_cc| Ok(Box::new(EditorApp::new()))),
    )
}

struct EditorApp {
    config: MatrixConfig,
    current_file: Option<String>,
    status_message: Option<(String, Instant)>,
    /// Pending name for the "add layer" field.
    new_layer_name: String,
}

impl EditorApp {
    fn new() -> Self {
        let config = MatrixConfig::default();

        // Startup is the one moment the global registry gets written.
        NameRegistry::global()
            .write()
            .register::<EditorLayers, _>(config.layers.clone());

        Self {
            config,
            current_file: None,
            status_message: None,
            new_layer_name: String::new(),
        }
    }

    fn show_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    fn save_config(&mut self) {
        if let Some(path) = &self.current_file {
            match self.config.save(path) {
                Ok(()) => self.show_status(format!("Saved to {}", path)),
                Err(e) => self.show_status(format!("Save failed: {}", e)),
            }
        } else {
            self.save_config_as();
        }
    }

    fn save_config_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(format!("{}.json", self.config.name))
            .save_file()
        {
            let path_str = path.display().to_string();
            match self.config.save(&path) {
                Ok(()) => {
                    self.show_status(format!("Saved to {}", path_str));
                    self.current_file = Some(path_str);
                }
                Err(e) => self.show_status(format!("Save failed: {}", e)),
            }
        }
    }

    fn load_config(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        {
            let path_str = path.display().to_string();
            match MatrixConfig::load(&path) {
                Ok(config) => {
                    self.config = config;
                    self.current_file = Some(path_str.clone());
                    self.show_status(format!("Loaded {}", path_str));
                }
                Err(e) => self.show_status(format!("Load failed: {}", e)),
            }
        }
    }

    fn menu_bar(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("New").clicked() {
                    self.config = MatrixConfig::default();
                    self.current_file = None;
                    self.show_status("New document");
                    ui.close_menu();
                }
                if ui.button("Open...").clicked() {
                    self.load_config();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Save").clicked() {
                    self.save_config();
                    ui.close_menu();
                }
                if ui.button("Save As...").clicked() {
                    self.save_config_as();
                    ui.close_menu();
                }
            });
            ui.menu_button("Matrix", |ui| {
                if ui.button("Reset").clicked() {
                    self.config.matrix.reset();
                    self.show_status("All pairs cleared");
                    ui.close_menu();
                }
            });
        });
    }

    fn layers_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Layers");
        ui.add_space(4.0);

        for layer in &mut self.config.layers {
            ui.text_edit_singleline(layer);
        }

        ui.separator();
        ui.horizontal(|ui| {
            ui.text_edit_singleline(&mut self.new_layer_name);
            if ui.button("Add").clicked() && !self.new_layer_name.is_empty() {
                let name = std::mem::take(&mut self.new_layer_name);
                self.config.add_layer(name);
            }
        });

        let can_remove = self.config.can_remove_layer();
        if ui
            .add_enabled(can_remove, egui::Button::new("Remove last"))
            .clicked()
        {
            self.config.remove_last_layer();
        }

        ui.separator();
        let mut self_intersect = self.config.matrix.self_intersect();
        if ui
            .checkbox(&mut self_intersect, "Self collision")
            .changed()
        {
            if self_intersect || self.config.layers.len() >= 2 {
                self.config.matrix.set_self_intersect(self_intersect);
            } else {
                self.show_status("Need at least two layers without self collision");
            }
        }
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("menu").show(ctx, |ui| self.menu_bar(ui));

        egui::SidePanel::left("layers")
            .default_width(180.0)
            .show(ctx, |ui| self.layers_panel(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.text_edit_singleline(&mut self.config.name);
            if let Some(file) = &self.current_file {
                ui.label(egui::RichText::new(file).weak());
            }
            ui.add_space(8.0);

            MatrixGrid::new(&mut self.config.matrix)
                .names(&self.config.layers)
                .show(ui);

            if let Some((message, shown_at)) = &self.status_message {
                if shown_at.elapsed().as_secs_f32() < STATUS_SECS {
                    ui.add_space(8.0);
                    ui.label(message.clone());
                }
            }
        });
    }
}

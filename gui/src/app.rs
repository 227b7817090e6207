use std::path::PathBuf;
use std::time::Instant;

use asciiview::{BlurParams, ContourParams, SharpenParams};
use eframe::egui;
use image::RgbImage;

use crate::files;

/// Longest display edge; larger buffers are fitted down, never up.
const MAX_DISPLAY_DIM: u32 = 900;

/// Storage key for the last opened source folder.
const SOURCE_FOLDER_KEY: &str = "source_folder";

/// The transform currently on screen.
///
/// This is viewer-owned state: the engine library is stateless between
/// calls, and every re-application here goes back to the pristine source
/// file with a fresh parameter snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transform {
    Contour,
    Blur,
    Sharpen,
    Invert,
    Gray,
    Ascii,
}

/// Main application state for the viewer
pub struct ViewerApp {
    /// Folder currently listed in the file panel
    source_folder: Option<PathBuf>,
    /// Image files found in the source folder
    files: Vec<PathBuf>,
    /// Index of the selected file
    selected: Option<usize>,

    /// Buffer currently displayed (original or transformed)
    current_image: Option<RgbImage>,
    /// Texture handle for the displayed buffer
    texture: Option<egui::TextureHandle>,
    /// Transform the displayed buffer came from, if any
    active: Option<Transform>,

    blur_params: BlurParams,
    sharpen_params: SharpenParams,
    contour_params: ContourParams,
    ascii_width: u32,
    ascii_colorize: bool,

    /// Last processing time in milliseconds
    last_process_time_ms: f64,
    /// Warning message to display (if any)
    warning: Option<String>,
}

impl ViewerApp {
    /// Create the viewer, restoring the last source folder from storage.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self {
            source_folder: None,
            files: Vec::new(),
            selected: None,
            current_image: None,
            texture: None,
            active: None,
            blur_params: BlurParams::default(),
            sharpen_params: SharpenParams::default(),
            contour_params: ContourParams::default(),
            ascii_width: 120,
            ascii_colorize: false,
            last_process_time_ms: 0.0,
            warning: None,
        };

        if let Some(storage) = cc.storage {
            if let Some(folder) = storage.get_string(SOURCE_FOLDER_KEY) {
                log::debug!("restoring source folder {folder}");
                app.set_folder(PathBuf::from(folder));
            }
        }
        app
    }

    /// Point the file panel at a folder and load its image list.
    fn set_folder(&mut self, folder: PathBuf) {
        match files::scan_folder(&folder) {
            Ok(list) => {
                self.source_folder = Some(folder);
                self.files = list;
                self.selected = None;
                if !self.files.is_empty() {
                    self.select(0);
                }
            }
            Err(e) => {
                self.warning = Some(format!("Could not scan {}: {e}", folder.display()));
            }
        }
    }

    /// Select a file from the list and show its unmodified decode.
    fn select(&mut self, index: usize) {
        if index < self.files.len() {
            self.selected = Some(index);
            self.show_original();
        }
    }

    fn current_path(&self) -> Option<PathBuf> {
        self.selected.map(|i| self.files[i].clone())
    }

    /// Show the pristine decode of the selected file.
    ///
    /// A failed decode leaves a placeholder, never a stale image.
    fn show_original(&mut self) {
        self.active = None;
        let Some(path) = self.current_path() else {
            return;
        };
        match asciiview::io::decode(&path) {
            Ok(img) => {
                self.current_image = Some(img);
                self.texture = None;
                self.warning = None;
            }
            Err(e) => {
                self.current_image = None;
                self.texture = None;
                self.warning = Some(e.to_string());
            }
        }
    }

    /// Run one transform against the pristine source of the selected file.
    fn apply(&mut self, transform: Transform) {
        let Some(path) = self.current_path() else {
            return;
        };
        let start = Instant::now();

        let result = match transform {
            Transform::Contour => asciiview::contour(&path, &self.contour_params),
            Transform::Blur => asciiview::blur(&path, &self.blur_params),
            Transform::Sharpen => asciiview::sharpen(&path, &self.sharpen_params),
            Transform::Invert => asciiview::invert(&path),
            Transform::Gray => asciiview::grayscale(&path),
            Transform::Ascii => asciiview::render(&path, self.ascii_width, self.ascii_colorize),
        };

        match result {
            Ok(img) => {
                self.last_process_time_ms = start.elapsed().as_secs_f64() * 1000.0;
                self.current_image = Some(img);
                self.texture = None;
                self.active = Some(transform);
                self.warning = None;
            }
            Err(e) => {
                self.current_image = None;
                self.texture = None;
                self.warning = Some(e.to_string());
            }
        }
    }

    /// Save whatever is displayed.
    fn save_output(&mut self, transparent: bool) {
        let Some(img) = &self.current_image else {
            self.warning = Some("No image to save".to_string());
            return;
        };

        let dialog = if transparent {
            rfd::FileDialog::new().add_filter("PNG", &["png"])
        } else {
            rfd::FileDialog::new().add_filter("Images", &["png", "jpg", "jpeg", "bmp"])
        };
        if let Some(path) = dialog.save_file() {
            let result = if transparent {
                asciiview::io::save_transparent(img, &path)
            } else {
                asciiview::io::save(img, &path)
            };
            if let Err(e) = result {
                self.warning = Some(e.to_string());
            }
        }
    }

    /// Export the selected file as plain ASCII text.
    fn export_text(&mut self) {
        let Some(path) = self.current_path() else {
            self.warning = Some("No file selected".to_string());
            return;
        };
        let rows = match asciiview::render_text(&path, self.ascii_width) {
            Ok(rows) => rows,
            Err(e) => {
                self.warning = Some(e.to_string());
                return;
            }
        };
        if let Some(target) = rfd::FileDialog::new().add_filter("Text", &["txt"]).save_file() {
            if let Err(e) = asciiview::io::write_text(&rows, &target) {
                self.warning = Some(e.to_string());
            }
        }
    }

    /// Upload the displayed buffer as a texture, fitted to the viewport.
    fn ensure_texture(&mut self, ctx: &egui::Context) {
        if self.texture.is_some() {
            return;
        }
        if let Some(img) = &self.current_image {
            let fitted = asciiview::io::fit(img, MAX_DISPLAY_DIM, MAX_DISPLAY_DIM);
            let color_image = rgb_to_color_image(&fitted);
            self.texture =
                Some(ctx.load_texture("viewer", color_image, egui::TextureOptions::default()));
        }
    }

    /// Render the file list panel.
    fn render_file_list(&mut self, ui: &mut egui::Ui) {
        ui.heading("Files");
        if let Some(folder) = &self.source_folder {
            ui.label(folder.display().to_string());
        }
        ui.separator();

        let mut clicked = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            for (i, path) in self.files.iter().enumerate() {
                let name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("<invalid name>");
                if ui.selectable_label(self.selected == Some(i), name).clicked() {
                    clicked = Some(i);
                }
            }
        });
        if let Some(i) = clicked {
            self.select(i);
        }

        ui.separator();
        if ui.button("Open Folder…").clicked() {
            if let Some(folder) = rfd::FileDialog::new().pick_folder() {
                self.set_folder(folder);
            }
        }
    }

    /// Render the filter controls; applies the requested transform.
    fn render_controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Filters");
        ui.separator();

        let mut action: Option<Transform> = None;
        let mut reset = false;
        ui.horizontal_wrapped(|ui| {
            if ui.button("Reset").clicked() {
                reset = true;
            }
            if ui.button("Gray").clicked() {
                action = Some(Transform::Gray);
            }
            if ui.button("Invert").clicked() {
                action = Some(Transform::Invert);
            }
            if ui.button("Blur").clicked() {
                action = Some(Transform::Blur);
            }
            if ui.button("Sharpen").clicked() {
                action = Some(Transform::Sharpen);
            }
            if ui.button("Contour").clicked() {
                action = Some(Transform::Contour);
            }
            if ui.button("ASCII").clicked() {
                action = Some(Transform::Ascii);
            }
        });

        ui.add_space(8.0);

        let mut changed = false;

        ui.collapsing("Blur Settings", |ui| {
            changed |= ui
                .add(egui::Slider::new(&mut self.blur_params.kernel, 3..=51).text("Kernel"))
                .on_hover_text("Gaussian kernel size; even values are rounded up")
                .changed();
        });

        ui.collapsing("Sharpen Settings", |ui| {
            changed |= ui
                .add(egui::Slider::new(&mut self.sharpen_params.weight, 1.0..=3.0).text("Weight"))
                .on_hover_text("Unsharp-mask weight; 1.0 leaves the image unchanged")
                .changed();
        });

        ui.collapsing("Contour Settings", |ui| {
            changed |= ui
                .add(
                    egui::Slider::new(&mut self.contour_params.low_threshold, 0..=500)
                        .text("Low Threshold"),
                )
                .on_hover_text("Gradients below this are suppressed")
                .changed();

            changed |= ui
                .add(
                    egui::Slider::new(&mut self.contour_params.high_threshold, 0..=500)
                        .text("High Threshold"),
                )
                .on_hover_text("Gradients above this are strong edges")
                .changed();

            changed |= ui
                .add(
                    egui::Slider::new(&mut self.contour_params.pre_blur_kernel, 3..=51)
                        .text("Pre-Blur"),
                )
                .on_hover_text("Noise-suppression blur before edge detection")
                .changed();
        });

        ui.collapsing("ASCII Settings", |ui| {
            changed |= ui
                .add(egui::Slider::new(&mut self.ascii_width, 40..=400).text("Columns"))
                .on_hover_text("Glyph columns in the output grid")
                .changed();

            changed |= ui
                .checkbox(&mut self.ascii_colorize, "Colorize")
                .on_hover_text("Draw each glyph in the color sampled at its cell")
                .changed();
        });

        if reset {
            self.show_original();
        } else if let Some(transform) = action {
            self.apply(transform);
        } else if changed {
            // A parameter nudge re-derives the active transform from the
            // pristine source; nothing is ever applied on top of a
            // previous result.
            if let Some(transform) = self.active {
                self.apply(transform);
            }
        }

        if self.last_process_time_ms > 0.0 {
            ui.add_space(8.0);
            ui.label(format!("Last process: {:.1} ms", self.last_process_time_ms));
        }
    }
}

impl eframe::App for ViewerApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Some(folder) = &self.source_folder {
            storage.set_string(SOURCE_FOLDER_KEY, folder.display().to_string());
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Folder…").clicked() {
                        if let Some(folder) = rfd::FileDialog::new().pick_folder() {
                            self.set_folder(folder);
                        }
                        ui.close();
                    }

                    ui.separator();

                    if ui.button("Save Output…").clicked() {
                        self.save_output(false);
                        ui.close();
                    }
                    if ui.button("Save Transparent PNG…").clicked() {
                        self.save_output(true);
                        ui.close();
                    }
                    if ui.button("Export Text…").clicked() {
                        self.export_text();
                        ui.close();
                    }

                    ui.separator();

                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        egui::SidePanel::left("file_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                self.render_file_list(ui);
            });

        egui::SidePanel::right("control_panel")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.render_controls(ui);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(warning) = self.warning.clone() {
                ui.colored_label(egui::Color32::RED, warning);
                if ui.button("Clear Warning").clicked() {
                    self.warning = None;
                }
                ui.separator();
            }

            self.ensure_texture(ctx);

            if let Some(texture) = &self.texture {
                let size = texture.size_vec2();
                ui.vertical_centered(|ui| {
                    ui.image((texture.id(), size));
                    if let Some(path) = self.current_path() {
                        let name = path
                            .file_name()
                            .and_then(|n| n.to_str())
                            .unwrap_or("<invalid name>");
                        let dims = self
                            .current_image
                            .as_ref()
                            .map(|img| format!("{}x{}", img.width(), img.height()))
                            .unwrap_or_default();
                        ui.label(format!("{name}  ({dims})"));
                    }
                });
            } else {
                ui.centered_and_justified(|ui| {
                    ui.label("No image loaded");
                });
            }
        });
    }
}

/// Convert an engine buffer to an egui ColorImage.
fn rgb_to_color_image(img: &RgbImage) -> egui::ColorImage {
    let (width, height) = img.dimensions();
    egui::ColorImage::from_rgb([width as usize, height as usize], img.as_raw())
}

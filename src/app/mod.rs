//! Main window: URL entry, preview, copy and save.

mod dialog;
pub mod text_menu;
mod theme;

pub use dialog::{RfdSaveDialog, SaveDialog, with_png_extension};
pub use theme::apply_theme;

use crate::clipboard::ClipboardBridge;
use crate::error::Result;
use crate::platform;
use crate::session::QrSession;
use egui::{Button, Color32, ColorImage, RichText, Stroke, TextureHandle, TextureOptions};
use std::path::Path;

/// Options fixed for the lifetime of the window
#[derive(Debug, Clone, Copy)]
pub struct AppOptions {
    /// Offer Copy/Paste on right-click in the URL field
    pub context_menu: bool,
    /// Request a dark title bar on the first frame
    pub dark_title_bar: bool,
}

/// Something the user asked for while the frame was drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// Encode the URL field into a new preview
    Generate,
    /// Put the preview on the clipboard
    CopyImage,
    /// Save the preview to a user-chosen file
    Save,
    /// Copy the URL field's selection
    CopySelection,
    /// Append clipboard text to the URL field
    PasteText,
}

/// Feedback line shown under the buttons
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Something worked
    Info(String),
    /// Something failed; the details are in the log
    Error(String),
}

/// The eframe application
pub struct QrMakerApp {
    session: QrSession,
    url: String,
    selection: Option<(usize, usize)>,
    clipboard: Box<dyn ClipboardBridge>,
    dialog: Box<dyn SaveDialog>,
    options: AppOptions,
    preview: Option<TextureHandle>,
    preview_generation: Option<u64>,
    title_bar_pending: bool,
    status: Option<Status>,
}

impl QrMakerApp {
    /// Build the window state around an already started session
    pub fn new(
        session: QrSession,
        clipboard: Box<dyn ClipboardBridge>,
        dialog: Box<dyn SaveDialog>,
        options: AppOptions,
    ) -> Self {
        Self {
            session,
            url: String::new(),
            selection: None,
            clipboard,
            dialog,
            options,
            preview: None,
            preview_generation: None,
            title_bar_pending: options.dark_title_bar,
            status: None,
        }
    }

    /// The session behind the window
    pub fn session(&self) -> &QrSession {
        &self.session
    }

    /// Current contents of the URL field
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Replace the URL field contents
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
        self.selection = None;
    }

    /// Record the URL field's selection as char indices
    pub fn set_selection(&mut self, selection: Option<(usize, usize)>) {
        self.selection = selection;
    }

    /// Latest feedback line
    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    /// Run one user action against the session.
    pub fn apply(&mut self, action: UiAction) {
        match action {
            UiAction::Generate => {
                let generated = self.session.regenerate(&self.url).map(|_| None);
                self.report(generated, "Generate failed");
            }
            UiAction::CopyImage => {
                let copied = self
                    .session
                    .copy_image(self.clipboard.as_mut())
                    .map(|_| Some("Copied to clipboard".to_string()));
                self.report(copied, "Copy failed");
            }
            UiAction::Save => {
                let Some(destination) = self.dialog.choose_destination() else {
                    tracing::debug!("Save cancelled");
                    return;
                };
                let saved = self
                    .session
                    .save_to(&destination)
                    .map(|_| Some(format!("Saved {}", display_name(&destination))));
                self.report(saved, "Save failed");
            }
            UiAction::CopySelection => {
                text_menu::copy_selection(self.clipboard.as_mut(), &self.url, self.selection);
            }
            UiAction::PasteText => {
                text_menu::paste_at_end(self.clipboard.as_mut(), &mut self.url);
            }
        }
    }

    fn report(&mut self, outcome: Result<Option<String>>, context: &str) {
        match outcome {
            Ok(Some(message)) => self.status = Some(Status::Info(message)),
            Ok(None) => self.status = None,
            Err(e) => {
                tracing::error!("{context}: {e}");
                self.status = Some(Status::Error(format!("{context}: {e}")));
            }
        }
    }

    fn refresh_preview(&mut self, ctx: &egui::Context) {
        let generation = self.session.generation();
        if self.preview_generation == Some(generation) {
            return;
        }
        self.preview_generation = Some(generation);

        match load_color_image(self.session.current().path()) {
            Ok(image) => {
                let texture = ctx.load_texture("qr-preview", image, TextureOptions::NEAREST);
                self.preview = Some(texture);
            }
            Err(e) => {
                tracing::error!("Failed to load preview: {e}");
                self.status = Some(Status::Error(format!("Failed to load preview: {e}")));
            }
        }
    }

    fn header(&mut self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        ui.add_space(10.0);
        ui.horizontal(|ui| {
            ui.label("URL:");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let label = RichText::new("Generate").color(theme::COLOR_SUCCESS);
                let generate = Button::new(label)
                    .fill(Color32::TRANSPARENT)
                    .stroke(Stroke::new(1.0, theme::COLOR_SUCCESS));
                if ui.add(generate).clicked() {
                    actions.push(UiAction::Generate);
                }

                let output = egui::TextEdit::singleline(&mut self.url)
                    .hint_text("https://")
                    .desired_width(ui.available_width())
                    .show(ui);

                if let Some(range) = output.cursor_range {
                    self.selection = Some((range.primary.index, range.secondary.index));
                }

                let submitted = ui.input(|i| i.key_pressed(egui::Key::Enter));
                if output.response.lost_focus() && submitted {
                    actions.push(UiAction::Generate);
                }

                if self.options.context_menu {
                    output.response.context_menu(|ui| {
                        if ui.button("Copy          (Ctrl+C)").clicked() {
                            actions.push(UiAction::CopySelection);
                            ui.close();
                        }
                        if ui.button("Paste          (Ctrl+V)").clicked() {
                            actions.push(UiAction::PasteText);
                            ui.close();
                        }
                    });
                }
            });
        });
        ui.add_space(10.0);
    }

    fn footer(&self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        ui.columns(2, |columns| {
            columns[0].with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let label = RichText::new("Copy to clipboard").color(Color32::BLACK);
                let copy = Button::new(label).fill(theme::COLOR_LIGHT);
                if ui.add(copy).clicked() {
                    actions.push(UiAction::CopyImage);
                }
            });
            columns[1].with_layout(egui::Layout::left_to_right(egui::Align::Center), |ui| {
                let save = Button::new("Save QR").fill(theme::COLOR_SECONDARY);
                if ui.add(save).clicked() {
                    actions.push(UiAction::Save);
                }
            });
        });

        ui.vertical_centered(|ui| match &self.status {
            Some(Status::Info(message)) => {
                ui.label(message.as_str());
            }
            Some(Status::Error(message)) => {
                ui.colored_label(theme::COLOR_ERROR, message.as_str());
            }
            None => {
                ui.label("");
            }
        });
        ui.add_space(50.0);
    }
}

impl eframe::App for QrMakerApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        if self.title_bar_pending {
            self.title_bar_pending = false;
            if let Err(e) = platform::apply_dark_title_bar(frame) {
                tracing::debug!("Dark title bar not applied: {e}");
            }
        }

        self.refresh_preview(ctx);

        let mut actions = Vec::new();

        egui::TopBottomPanel::top("header")
            .show_separator_line(false)
            .show(ctx, |ui| self.header(ui, &mut actions));

        egui::TopBottomPanel::bottom("footer")
            .show_separator_line(false)
            .show(ctx, |ui| self.footer(ui, &mut actions));

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.centered_and_justified(|ui| {
                if let Some(texture) = &self.preview {
                    ui.image((texture.id(), texture.size_vec2()));
                }
            });
        });

        let generation = self.session.generation();
        for action in actions {
            self.apply(action);
        }
        if self.session.generation() != generation {
            ctx.request_repaint();
        }
    }
}

/// Decode an image file into egui pixels
pub fn load_color_image(path: &Path) -> Result<ColorImage> {
    let rgba = image::open(path)?.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

/// Decode an image file into a window icon
pub fn load_icon(path: &Path) -> Result<egui::IconData> {
    let rgba = image::open(path)?.to_rgba8();
    Ok(egui::IconData {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::config::OutputOptions;
    use crate::generator::QrGenerator;
    use crate::qr::{QrDecoder, QrStyle};
    use std::path::PathBuf;

    struct FixedDialog(Option<PathBuf>);

    impl SaveDialog for FixedDialog {
        fn choose_destination(&self) -> Option<PathBuf> {
            self.0.clone()
        }
    }

    fn app_in(dir: &Path, destination: Option<PathBuf>) -> QrMakerApp {
        app_with_menu(dir, destination, true)
    }

    fn app_with_menu(dir: &Path, destination: Option<PathBuf>, context_menu: bool) -> QrMakerApp {
        let output = OutputOptions {
            temp_dir: Some(dir.join("tmp")),
            ..OutputOptions::default()
        };
        let generator = QrGenerator::with_output(QrStyle::default(), &output);
        let session = QrSession::start(generator, "https://github.com/Germi32", None).unwrap();
        QrMakerApp::new(
            session,
            Box::new(MemoryClipboard::default()),
            Box::new(FixedDialog(destination)),
            AppOptions {
                context_menu,
                dark_title_bar: false,
            },
        )
    }

    #[test]
    fn generate_encodes_the_url_field() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path(), None);

        app.set_url("https://example.com");
        app.apply(UiAction::Generate);

        let decoded = QrDecoder::new()
            .decode_file(app.session().current().path())
            .unwrap();
        assert_eq!(decoded, "https://example.com");
        assert_eq!(app.session().generation(), 1);
        assert_eq!(app.status(), None);
    }

    #[test]
    fn save_writes_identical_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("saved.png");
        let mut app = app_in(dir.path(), Some(destination.clone()));

        app.apply(UiAction::Save);

        let expected = app.session().current().read_bytes().unwrap();
        assert_eq!(std::fs::read(&destination).unwrap(), expected);
        assert_eq!(
            app.status(),
            Some(&Status::Info("Saved saved.png".to_string()))
        );
    }

    #[test]
    fn cancelled_save_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path(), None);

        app.apply(UiAction::Save);
        assert_eq!(app.status(), None);
    }

    #[test]
    fn save_into_missing_directory_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("missing").join("qr.png");
        let mut app = app_in(dir.path(), Some(destination));

        app.apply(UiAction::Save);
        assert!(matches!(app.status(), Some(Status::Error(_))));
    }

    #[test]
    fn context_menu_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path(), None);

        app.set_url("https://example.com");
        app.set_selection(Some((0, 8)));
        app.apply(UiAction::CopySelection);
        app.apply(UiAction::PasteText);

        assert_eq!(app.url(), "https://example.comhttps://");
    }

    #[test]
    fn copy_image_reports_success() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path(), None);

        app.apply(UiAction::CopyImage);
        assert_eq!(
            app.status(),
            Some(&Status::Info("Copied to clipboard".to_string()))
        );
    }

    #[test]
    fn icon_and_preview_decode_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_in(dir.path(), None);
        let path = app.session().current().path();

        // 26 bytes does not fit version 1 at level M, so the symbol is version 2
        let (width, height) = app.session().current().dimensions();
        assert_eq!((width, height), (350, 350));

        let icon = load_icon(path).unwrap();
        assert_eq!((icon.width, icon.height), (width, height));
        assert_eq!(icon.rgba.len(), (width * height * 4) as usize);

        let image = load_color_image(path).unwrap();
        assert_eq!(image.size, [width as usize, height as usize]);
    }

    mod window {
        use super::*;
        use egui::accesskit::Role;
        use egui_kittest::Harness;
        use kittest::Queryable;

        fn preview_id(app: &QrMakerApp) -> Option<egui::TextureId> {
            app.preview.as_ref().map(|texture| texture.id())
        }

        #[test]
        fn generate_button_swaps_preview_texture() {
            let dir = tempfile::tempdir().unwrap();
            let app = app_in(dir.path(), None);
            let mut harness = Harness::new_eframe(|_| app);
            harness.run();

            let first = preview_id(harness.state());
            assert!(first.is_some());
            assert_eq!(harness.state().preview_generation, Some(0));

            harness.state_mut().set_url("https://example.com");
            harness.get_by_label("Generate").click();
            harness.run();

            let app = harness.state();
            assert_eq!(app.session().generation(), 1);
            assert_eq!(app.preview_generation, Some(1));
            assert_ne!(preview_id(app), first);
            assert_eq!(app.session().current().text(), "https://example.com");
        }

        #[test]
        fn enter_in_url_field_generates() {
            let dir = tempfile::tempdir().unwrap();
            let app = app_in(dir.path(), None);
            let mut harness = Harness::new_eframe(|_| app);
            harness.run();

            harness.get_by_role(Role::TextInput).focus();
            harness.run();
            harness.get_by_role(Role::TextInput).type_text("https://example.com");
            harness.run();
            assert_eq!(harness.state().url(), "https://example.com");
            assert_eq!(harness.state().session().generation(), 0);

            harness.key_press(egui::Key::Enter);
            harness.run();

            let app = harness.state();
            assert_eq!(app.session().generation(), 1);
            let decoded = QrDecoder::new()
                .decode_file(app.session().current().path())
                .unwrap();
            assert_eq!(decoded, "https://example.com");
        }

        #[test]
        fn selection_follows_the_text_cursor() {
            let dir = tempfile::tempdir().unwrap();
            let app = app_in(dir.path(), None);
            let mut harness = Harness::new_eframe(|_| app);
            harness.state_mut().set_url("https://example.com");
            harness.run();

            harness.get_by_role(Role::TextInput).focus();
            harness.run();
            harness.key_press_modifiers(egui::Modifiers::COMMAND, egui::Key::A);
            harness.run();

            let selection = harness
                .state()
                .selection
                .map(|(a, b)| (a.min(b), a.max(b)));
            assert_eq!(selection, Some((0, 19)));

            harness.state_mut().apply(UiAction::CopySelection);
            let copied = harness.state_mut().clipboard.get_text().unwrap();
            assert_eq!(copied, "https://example.com");
        }

        #[test]
        fn right_click_offers_copy_and_paste() {
            let dir = tempfile::tempdir().unwrap();
            let app = app_with_menu(dir.path(), None, true);
            let mut harness = Harness::new_eframe(|_| app);
            harness.state_mut().set_url("https://example.com");
            harness.state_mut().clipboard.put_text("/qr").unwrap();
            harness.run();

            harness.get_by_role(Role::TextInput).click_secondary();
            harness.run();
            assert!(harness.query_by_label_contains("(Ctrl+C)").is_some());

            harness.get_by_label_contains("(Ctrl+V)").click();
            harness.run();

            assert_eq!(harness.state().url(), "https://example.com/qr");
            assert!(harness.query_by_label_contains("(Ctrl+V)").is_none());
        }

        #[test]
        fn right_click_shows_nothing_without_context_menu() {
            let dir = tempfile::tempdir().unwrap();
            let app = app_with_menu(dir.path(), None, false);
            let mut harness = Harness::new_eframe(|_| app);
            harness.state_mut().set_url("https://example.com");
            harness.run();

            harness.get_by_role(Role::TextInput).click_secondary();
            harness.run();

            assert!(harness.query_by_label_contains("(Ctrl+C)").is_none());
            assert!(harness.query_by_label_contains("(Ctrl+V)").is_none());
            assert_eq!(harness.state().url(), "https://example.com");
        }
    }
}

//! Data import: document upload to the service and local cost sheet import.

use crate::api::CostApi;
use crate::cost::CostEntry;
use crate::data::{CostSheetLoader, FileKind, LoaderError, SelectedFile, UPLOAD_EXTENSIONS};
use crate::gui::task::{take_finished, Pending};
use crate::gui::toast::Toasts;
use egui::{Color32, RichText};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use tracing::{info, warn};

const UPLOAD_FAILED: &str = "Could not upload files. Please check file formats and try again.";

/// Upload progress reported from the background thread.
enum UploadEvent {
    Uploaded { name: String, id: String },
    Complete(usize),
    Failed(String),
}

#[derive(Default)]
pub struct ImportPanel {
    files: Vec<SelectedFile>,
    upload_rx: Option<Receiver<UploadEvent>>,
    sheet: Option<Pending<Result<Vec<CostEntry>, LoaderError>>>,
}

impl ImportPanel {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    pub fn is_uploading(&self) -> bool {
        self.upload_rx.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.is_uploading() || self.sheet.is_some()
    }

    /// Replace the selection with the accepted files among `paths`.
    pub fn select_files(&mut self, paths: &[PathBuf]) {
        self.files = paths
            .iter()
            .filter(|path| is_uploadable(path))
            .filter_map(|path| match SelectedFile::from_path(path) {
                Ok(file) => Some(file),
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "cannot read selected file");
                    None
                }
            })
            .collect();
    }

    pub fn remove_file(&mut self, index: usize) {
        if index < self.files.len() {
            self.files.remove(index);
        }
    }

    /// Upload the selected files one after another, stopping at the first failure.
    pub fn start_upload(&mut self, api: &Arc<dyn CostApi>) {
        if self.files.is_empty() || self.is_uploading() {
            return;
        }

        let (tx, rx) = channel();
        self.upload_rx = Some(rx);
        let api = Arc::clone(api);
        let files = self.files.clone();

        thread::spawn(move || {
            for file in &files {
                match api.upload_document(&file.path) {
                    Ok(response) => {
                        let _ = tx.send(UploadEvent::Uploaded {
                            name: file.name.clone(),
                            id: response.id_label(),
                        });
                    }
                    Err(e) => {
                        let _ = tx.send(UploadEvent::Failed(format!("{}: {}", file.name, e)));
                        return;
                    }
                }
            }
            let _ = tx.send(UploadEvent::Complete(files.len()));
        });
    }

    pub fn start_sheet_import(&mut self, path: PathBuf) {
        if self.sheet.is_some() {
            return;
        }
        self.sheet = Some(Pending::spawn(move || CostSheetLoader::load_csv(&path)));
    }

    fn check_upload_events(&mut self, toasts: &mut Toasts) {
        let Some(rx) = self.upload_rx.take() else {
            return;
        };
        let mut should_keep_receiver = true;

        loop {
            let event = match rx.try_recv() {
                Ok(event) => event,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if should_keep_receiver {
                        toasts.error("Import failed", UPLOAD_FAILED);
                    }
                    should_keep_receiver = false;
                    break;
                }
            };
            match event {
                UploadEvent::Uploaded { name, id } => {
                    info!(file = %name, id = %id, "document uploaded");
                    toasts.info(
                        "File uploaded",
                        format!("File \"{}\" uploaded successfully (ID: {})", name, id),
                    );
                }
                UploadEvent::Complete(count) => {
                    self.files.clear();
                    toasts.info(
                        "Import successful",
                        format!("Successfully uploaded {} file(s) to backend.", count),
                    );
                    should_keep_receiver = false;
                }
                UploadEvent::Failed(error) => {
                    warn!(%error, "document upload failed");
                    toasts.error("Import failed", UPLOAD_FAILED);
                    should_keep_receiver = false;
                }
            }
        }

        if should_keep_receiver {
            self.upload_rx = Some(rx);
        }
    }

    /// Drain background results. Returns parsed sheet rows when an import finished.
    pub fn poll(&mut self, toasts: &mut Toasts) -> Option<Vec<CostEntry>> {
        self.check_upload_events(toasts);

        match take_finished(&mut self.sheet)? {
            Some(Ok(entries)) => Some(entries),
            Some(Err(e)) => {
                warn!(error = %e, "cost sheet import failed");
                toasts.error("Import failed", e.to_string());
                None
            }
            None => {
                toasts.error("Import failed", "The cost sheet could not be read.");
                None
            }
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, api: &Arc<dyn CostApi>) {
        ui.label(RichText::new("📤 Data Import").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(
                    RichText::new("Drop files here or browse")
                        .size(12.0)
                        .color(Color32::GRAY),
                );
                ui.label(
                    RichText::new("Supports Excel (.xls, .xlsx), CSV, PDF, Word (.doc, .docx)")
                        .size(10.0)
                        .color(Color32::GRAY),
                );
                if ui.button("📂 Browse").clicked() {
                    if let Some(paths) = rfd::FileDialog::new()
                        .add_filter("Cost documents", &UPLOAD_EXTENSIONS)
                        .pick_files()
                    {
                        self.select_files(&paths);
                    }
                }
            });

        let mut remove = None;
        for (idx, file) in self.files.iter().enumerate() {
            ui.horizontal(|ui| {
                ui.label(file.kind.icon());
                ui.vertical(|ui| {
                    ui.label(RichText::new(&file.name).size(12.0));
                    ui.label(
                        RichText::new(file.size_label())
                            .size(10.0)
                            .color(Color32::GRAY),
                    );
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("✖").clicked() {
                        remove = Some(idx);
                    }
                });
            });
        }
        if let Some(idx) = remove {
            self.remove_file(idx);
        }

        if !self.files.is_empty() {
            let label = if self.is_uploading() {
                "Processing..."
            } else {
                "Upload & Process Files"
            };
            if ui
                .add_enabled(!self.is_uploading(), egui::Button::new(label))
                .clicked()
            {
                self.start_upload(api);
            }
        }

        ui.add_space(10.0);
        ui.label(
            RichText::new("Import a category,item,cost sheet into the selected rig.")
                .size(10.0)
                .color(Color32::GRAY),
        );
        if ui
            .add_enabled(self.sheet.is_none(), egui::Button::new("📥 Import cost sheet (CSV)"))
            .clicked()
        {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("CSV Files", &["csv"])
                .pick_file()
            {
                self.start_sheet_import(path);
            }
        }
    }
}

fn is_uploadable(path: &Path) -> bool {
    path.file_name()
        .map(|name| FileKind::from_name(&name.to_string_lossy()) != FileKind::Unknown)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::test_support::{temp_file, wait_until_idle, MockApi};
    use crate::gui::toast::ToastKind;

    #[test]
    fn selection_filters_unsupported_files() {
        let pdf = temp_file("contract.pdf", b"%PDF");
        let txt = temp_file("notes.txt", b"hello");
        let mut panel = ImportPanel::new();

        panel.select_files(&[pdf.clone(), txt.clone(), PathBuf::from("/missing/a.csv")]);

        assert_eq!(panel.files().len(), 1);
        assert_eq!(panel.files()[0].kind, FileKind::Pdf);
        panel.remove_file(5);
        panel.remove_file(0);
        assert!(panel.files().is_empty());
        std::fs::remove_file(pdf).ok();
        std::fs::remove_file(txt).ok();
    }

    #[test]
    fn successful_upload_toasts_per_file_and_clears() {
        let a = temp_file("quotes.xlsx", b"xlsx");
        let b = temp_file("report.docx", b"docx");
        let mock = MockApi::new();
        let api: Arc<dyn CostApi> = mock.clone();
        let mut panel = ImportPanel::new();
        let mut toasts = Toasts::new();

        panel.select_files(&[a.clone(), b.clone()]);
        panel.start_upload(&api);
        wait_until_idle(|| {
            panel.poll(&mut toasts);
            panel.is_busy()
        });

        let titles: Vec<&str> = toasts.items().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["File uploaded", "File uploaded", "Import successful"]);
        assert!(toasts.items()[0].description.contains("(ID: 1)"));
        assert!(toasts.items()[2].description.contains("2 file(s)"));
        assert!(panel.files().is_empty());
        assert_eq!(mock.documents(), 2);
        std::fs::remove_file(a).ok();
        std::fs::remove_file(b).ok();
    }

    #[test]
    fn failed_upload_keeps_selection() {
        let a = temp_file("bad-sheet.csv", b"x");
        let api: Arc<dyn CostApi> = MockApi::failing();
        let mut panel = ImportPanel::new();
        let mut toasts = Toasts::new();

        panel.select_files(&[a.clone()]);
        panel.start_upload(&api);
        wait_until_idle(|| {
            panel.poll(&mut toasts);
            panel.is_busy()
        });

        assert_eq!(panel.files().len(), 1);
        assert_eq!(toasts.items().len(), 1);
        assert_eq!(toasts.items()[0].title, "Import failed");
        assert_eq!(toasts.items()[0].kind, ToastKind::Destructive);
        std::fs::remove_file(a).ok();
    }

    #[test]
    fn sheet_import_returns_entries() {
        let sheet = temp_file("rig-costs.csv", b"category,item,cost\nDrilling,Mud & Chemicals,1200\n");
        let mut panel = ImportPanel::new();
        let mut toasts = Toasts::new();

        panel.start_sheet_import(sheet.clone());
        let mut entries = None;
        wait_until_idle(|| {
            if let Some(found) = panel.poll(&mut toasts) {
                entries = Some(found);
            }
            panel.is_busy()
        });

        let entries = entries.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].cost, 1200.0);
        std::fs::remove_file(sheet).ok();
    }
}

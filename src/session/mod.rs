//! Session controller.
//!
//! The controller turns user intents into store mutations, records each
//! annotation change in the undo history, and keeps the presenter in sync.
//! Overlays are always regenerated from original-space coordinates: after any
//! change every overlay is cleared and only the selected defect's rectangles
//! are drawn again.

mod presenter;


use std::path::{Path, PathBuf};

pub use presenter::{NullPresenter, Presenter};

use crate::annotation::AnnotationStore;
use crate::config::AppConfig;
use crate::constants::MIN_DRAG_DISTANCE;
use crate::format::{DefectExporter, SaveReport};
use crate::gesture::{DrawOutcome, Gesture};
use crate::model::{Category, Defect, RectCoords};
use crate::state::{ImageData, ProjectState};
use crate::transform::ViewTransform;
use crate::undo::HistoryLog;

/// Shown when an action needs a selected defect.
pub const MSG_SELECT_DEFECT: &str = "Please select a defect or create a new one first.";
/// Shown when deleting a rectangle with none selected.
pub const MSG_SELECT_RECTANGLE: &str = "Please select a rectangle to delete.";
pub const MSG_LAST_IMAGE: &str = "This is the last image.";
pub const MSG_FIRST_IMAGE: &str = "This is the first image.";
pub const MSG_NO_DESTINATION: &str = "Please select a destination folder first.";
pub const MSG_NO_DEFECTS: &str = "There are no defects to save.";

/// Reviews one source folder image by image.
pub struct SessionController<P: Presenter> {
    /// Persisted folders and log level
    config: AppConfig,
    /// Where `config` is written after a folder change
    config_path: Option<PathBuf>,
    /// Images discovered in the source folder
    project: Option<ProjectState>,
    /// Decoded current image
    image: Option<ImageData>,
    store: AnnotationStore,
    history: HistoryLog,
    view: ViewTransform,
    gesture: Gesture,
    presenter: P,
}

impl<P: Presenter> SessionController<P> {
    pub fn new(config: AppConfig, config_path: Option<PathBuf>, presenter: P) -> Self {
        Self {
            config,
            config_path,
            project: None,
            image: None,
            store: AnnotationStore::new(),
            history: HistoryLog::new(),
            view: ViewTransform::default(),
            gesture: Gesture::Idle,
            presenter,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn project(&self) -> Option<&ProjectState> {
        self.project.as_ref()
    }

    pub fn image(&self) -> Option<&ImageData> {
        self.image.as_ref()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// One-line summary of the session for status displays.
    pub fn status_line(&self) -> String {
        let image = match (&self.project, &self.image) {
            (Some(project), Some(_)) => {
                format!("{} ({})", project.current_name(), project.progress())
            }
            _ => "no image".to_string(),
        };
        let defect = self
            .store
            .selected_defect()
            .map(|d| {
                format!(
                    "{} [{}] {} rectangle(s)",
                    d.name,
                    d.category,
                    d.rectangles.len()
                )
            })
            .unwrap_or_else(|| "no defect selected".to_string());
        format!(
            "{} | {} defect(s) | {} | zoom {:.0}%",
            image,
            self.store.len(),
            defect,
            self.view.zoom_level() * 100.0
        )
    }

    // ========================================================================
    // Folders and navigation
    // ========================================================================

    /// Choose the folder images are reviewed from.
    pub fn set_source_folder(&mut self, folder: impl AsRef<Path>) -> bool {
        let folder = folder.as_ref();
        if !folder.is_dir() {
            self.presenter
                .show_warning(&format!("Folder does not exist: {}", folder.display()));
            return false;
        }
        self.config.source_folder = folder.to_string_lossy().into_owned();
        log::info!("📂 Source folder: {:?}", folder);
        self.persist_config();
        self.presenter
            .show_status(&format!("Source folder: {}", folder.display()));
        true
    }

    /// Choose the folder annotated copies are written to.
    ///
    /// Every category subfolder is created right away.
    pub fn set_destination_folder(&mut self, folder: impl AsRef<Path>) -> bool {
        let folder = folder.as_ref();
        if let Err(e) = DefectExporter::new(folder).ensure_category_folders() {
            log::warn!("Failed to prepare destination {:?}: {}", folder, e);
            self.presenter.show_warning(&e.to_string());
            return false;
        }
        self.config.destination_folder = folder.to_string_lossy().into_owned();
        log::info!("📂 Destination folder: {:?}", folder);
        self.persist_config();
        self.presenter
            .show_status(&format!("Destination folder: {}", folder.display()));
        true
    }

    fn persist_config(&mut self) {
        let Some(path) = &self.config_path else {
            return;
        };
        if let Err(e) = self.config.save_to_path(path) {
            log::warn!("Failed to save configuration to {:?}: {}", path, e);
            self.presenter
                .show_warning(&format!("Could not save configuration: {}", e));
        }
    }

    /// Open the first image if both folders are already configured.
    ///
    /// Used at startup to resume from a persisted configuration.
    pub fn load_configured_images(&mut self) -> bool {
        if !self.config.has_folders() {
            log::debug!("Folders not configured, waiting for selection");
            return false;
        }
        self.load_images()
    }

    /// Scan the source folder and open its first image.
    pub fn load_images(&mut self) -> bool {
        let Some(folder) = self.config.source_path() else {
            self.presenter
                .show_warning("Please select a source folder first.");
            return false;
        };
        match ProjectState::from_folder(folder) {
            Ok(project) => {
                self.project = Some(project);
                self.load_image(0)
            }
            Err(e) => {
                log::warn!("{}", e);
                self.presenter.show_warning(&e.to_string());
                false
            }
        }
    }

    /// Open the image at `index` with a fresh annotation state.
    ///
    /// The empty state is recorded first, then a default defect is created,
    /// selected and recorded. A decode failure leaves the session unchanged.
    pub fn load_image(&mut self, index: usize) -> bool {
        let Some(project) = self.project.as_mut() else {
            self.presenter.show_warning("Please load images first.");
            return false;
        };
        let Some(path) = project.image(index).cloned() else {
            return false;
        };
        let image = match ImageData::open(&path) {
            Ok(image) => image,
            Err(e) => {
                log::warn!("{}", e);
                self.presenter.show_warning(&e.to_string());
                return false;
            }
        };
        project.current_index = index;

        let (width, height) = image.dimensions();
        self.view.set_image_size(width, height);
        self.store.clear();
        self.history.clear();
        self.gesture = Gesture::Idle;

        self.history.record(&self.store.snapshot());
        let name = Defect::default_name(1);
        let rename = Defect::default_rename(&image.stem(), &name);
        self.store.add_defect(name, rename, Category::default());
        self.store.select_defect(0);
        self.history.record(&self.store.snapshot());

        log::info!(
            "🖼️ Loaded {} ({}x{}), image {}",
            image.filename(),
            width,
            height,
            project.progress()
        );
        let status = format!("{} ({})", image.filename(), project.progress());
        self.image = Some(image);

        self.sync_overlays();
        self.presenter.show_status(&status);
        true
    }

    pub fn next_image(&mut self) -> bool {
        let Some(project) = &self.project else {
            self.presenter.show_warning("Please load images first.");
            return false;
        };
        match project.next_index() {
            Some(index) => self.load_image(index),
            None => {
                self.presenter.show_status(MSG_LAST_IMAGE);
                false
            }
        }
    }

    pub fn prev_image(&mut self) -> bool {
        let Some(project) = &self.project else {
            self.presenter.show_warning("Please load images first.");
            return false;
        };
        match project.prev_index() {
            Some(index) => self.load_image(index),
            None => {
                self.presenter.show_status(MSG_FIRST_IMAGE);
                false
            }
        }
    }

    // ========================================================================
    // Defects
    // ========================================================================

    /// Add a new defect to the current image and select it.
    pub fn add_defect(&mut self) -> bool {
        let Some(image) = &self.image else {
            self.presenter.show_warning("Please load an image first.");
            return false;
        };
        let name = self.next_defect_name();
        let rename = Defect::default_rename(&image.stem(), &name);
        self.store.add_defect(name, rename, Category::default());
        self.store.select_defect(self.store.len() - 1);
        self.commit();
        true
    }

    /// First "Defect N" label not already used on this image.
    fn next_defect_name(&self) -> String {
        let mut n = self.store.len() + 1;
        loop {
            let name = Defect::default_name(n);
            if !self.store.defects().iter().any(|d| d.name == name) {
                return name;
            }
            n += 1;
        }
    }

    pub fn select_defect(&mut self, index: usize) -> bool {
        if index >= self.store.len() {
            return false;
        }
        self.store.select_defect(index);
        self.sync_overlays();
        true
    }

    /// Select a rectangle of the selected defect and highlight its overlay.
    pub fn select_rectangle(&mut self, index: usize) -> bool {
        if !self.store.select_rectangle(index) {
            return false;
        }
        if let Some(handle) = self.store.selected_rectangle().and_then(|r| r.overlay) {
            self.presenter.highlight_overlay(handle);
        }
        self.refresh_panels();
        true
    }

    /// Delete the selected defect and select its neighbour.
    pub fn delete_selected_defect(&mut self) -> bool {
        let Some(index) = self.store.selected_defect_index() else {
            self.presenter.show_info(MSG_SELECT_DEFECT);
            return false;
        };
        self.store.remove_defect(index);
        if !self.store.is_empty() {
            self.store.select_defect(index.min(self.store.len() - 1));
        }
        self.commit();
        true
    }

    pub fn rename_selected(&mut self, rename: &str) -> bool {
        let Some(defect) = self.store.selected_defect_mut() else {
            self.presenter.show_info(MSG_SELECT_DEFECT);
            return false;
        };
        defect.rename = rename.to_string();
        self.commit();
        true
    }

    pub fn set_category(&mut self, category: Category) -> bool {
        let Some(defect) = self.store.selected_defect_mut() else {
            self.presenter.show_info(MSG_SELECT_DEFECT);
            return false;
        };
        defect.category = category;
        self.commit();
        true
    }

    /// Update the result text of the selected defect.
    ///
    /// Result text is not recorded in the undo history.
    pub fn set_result_text(&mut self, text: &str) -> bool {
        let Some(defect) = self.store.selected_defect_mut() else {
            self.presenter.show_info(MSG_SELECT_DEFECT);
            return false;
        };
        defect.result_text = text.to_string();
        self.refresh_panels();
        true
    }

    // ========================================================================
    // Rectangles
    // ========================================================================

    /// Add a rectangle given in display coordinates to the selected defect.
    ///
    /// Rectangles narrower or shorter than the minimum drag distance are
    /// discarded without a history entry.
    pub fn draw_rectangle(&mut self, display: RectCoords) -> bool {
        let Some(defect_index) = self.store.selected_defect_index() else {
            self.presenter.show_info(MSG_SELECT_DEFECT);
            return false;
        };
        if display.width() < MIN_DRAG_DISTANCE || display.height() < MIN_DRAG_DISTANCE {
            log::debug!("Rectangle {:?} below minimum size, discarded", display);
            return false;
        }
        let Some(original) = self.view.to_original(display) else {
            log::warn!("Cannot map {:?} to the image: no canvas or image size", display);
            return false;
        };
        let original = original.normalized();
        if !self.store.add_rectangle(defect_index, original, None) {
            return false;
        }
        self.store
            .select_rectangle(self.store.rectangle_count(defect_index) - 1);
        log::debug!("✏️ Rectangle {:?} added to defect {}", original, defect_index);
        self.commit();
        true
    }

    /// Delete the selected rectangle of the selected defect.
    pub fn delete_selected_rectangle(&mut self) -> bool {
        let (Some(defect_index), Some(rect_index)) = (
            self.store.selected_defect_index(),
            self.store.selected_rectangle_index(),
        ) else {
            self.presenter.show_info(MSG_SELECT_RECTANGLE);
            return false;
        };
        if let Some(handle) = self
            .store
            .rectangle(defect_index, rect_index)
            .and_then(|r| r.overlay)
        {
            self.presenter.delete_overlay(handle);
        }
        if !self.store.remove_rectangle(defect_index, rect_index) {
            return false;
        }
        self.commit();
        true
    }

    // ========================================================================
    // Gestures
    // ========================================================================

    /// Start a rectangle drag at a display position.
    pub fn begin_draw(&mut self, x: i32, y: i32) -> bool {
        if self.gesture.is_panning() || self.image.is_none() {
            return false;
        }
        if self.store.selected_defect().is_none() {
            self.presenter.show_info(MSG_SELECT_DEFECT);
            return false;
        }
        self.gesture = Gesture::start_drawing(x, y);
        true
    }

    /// Move the pointer during a rectangle drag. Returns the preview rectangle.
    pub fn continue_draw(&mut self, x: i32, y: i32) -> Option<RectCoords> {
        self.gesture.update_drawing(x, y)
    }

    /// Release a rectangle drag. Small drags are discarded.
    pub fn end_draw(&mut self, x: i32, y: i32) -> bool {
        match self.gesture.finish_drawing(x, y) {
            Some(DrawOutcome::Commit(coords)) => self.draw_rectangle(coords),
            Some(DrawOutcome::Cancelled) => {
                log::debug!("Drag ended below minimum size, discarded");
                false
            }
            None => false,
        }
    }

    pub fn begin_pan(&mut self, x: i32, y: i32) -> bool {
        if self.gesture.is_drawing() {
            return false;
        }
        self.gesture = Gesture::start_panning(x, y);
        log::debug!("Pan drag started at ({}, {})", x, y);
        true
    }

    /// Move the pointer during a pan. Returns the scroll delta.
    pub fn continue_pan(&mut self, x: i32, y: i32) -> Option<(i32, i32)> {
        self.gesture.update_panning(x, y)
    }

    pub fn end_pan(&mut self) -> bool {
        if !self.gesture.finish_panning() {
            return false;
        }
        log::debug!("Pan drag ended");
        self.sync_overlays();
        true
    }

    // ========================================================================
    // History
    // ========================================================================

    pub fn undo(&mut self) -> bool {
        if !self.history.can_undo() {
            return false;
        }
        let previous = self.store.selected_defect_index();
        self.history.undo();
        self.restore_from_history(previous);
        log::debug!("↩️ Undo");
        true
    }

    pub fn redo(&mut self) -> bool {
        if !self.history.can_redo() {
            return false;
        }
        let previous = self.store.selected_defect_index();
        self.history.redo();
        self.restore_from_history(previous);
        log::debug!("↪️ Redo");
        true
    }

    fn restore_from_history(&mut self, previous: Option<usize>) {
        match self.history.current() {
            Some(state) => self.store.restore(state),
            None => self.store.clear(),
        }
        let target = previous
            .filter(|&i| i < self.store.len())
            .or_else(|| (!self.store.is_empty()).then_some(0));
        if let Some(index) = target {
            self.store.select_defect(index);
        }
        self.sync_overlays();
    }

    // ========================================================================
    // View
    // ========================================================================

    pub fn zoom_in(&mut self) -> f64 {
        let level = self.view.zoom_in();
        self.sync_overlays();
        level
    }

    pub fn zoom_out(&mut self) -> f64 {
        let level = self.view.zoom_out();
        self.sync_overlays();
        level
    }

    pub fn reset_zoom(&mut self) {
        self.view.reset_zoom();
        self.sync_overlays();
    }

    pub fn resize_canvas(&mut self, width: u32, height: u32) {
        self.view.set_canvas_size(width, height);
        self.sync_overlays();
    }

    // ========================================================================
    // Saving
    // ========================================================================

    /// Export every defect with rectangles into the destination folder.
    ///
    /// Defects without rectangles are skipped, so an image with nothing marked
    /// still saves (as "Saved: 0/N"). Returns None when the save was refused
    /// before anything was written.
    pub fn save(&mut self) -> Option<SaveReport> {
        let Some(image) = &self.image else {
            self.presenter.show_warning("Please load an image first.");
            return None;
        };
        let Some(destination) = self.config.destination_path() else {
            self.presenter.show_status(MSG_NO_DESTINATION);
            return None;
        };
        if self.store.is_empty() {
            self.presenter.show_status(MSG_NO_DEFECTS);
            return None;
        }

        let report = DefectExporter::new(destination).export_all(image, self.store.defects());
        if report.all_saved() {
            self.presenter.show_status(&report.message());
        } else {
            self.presenter.show_warning(&report.message());
        }
        Some(report)
    }

    /// Save, then move on to the next image if every defect was written.
    pub fn save_and_next(&mut self) -> bool {
        match self.save() {
            Some(report) if report.all_saved() => self.next_image(),
            _ => false,
        }
    }

    // ========================================================================
    // Presenter sync
    // ========================================================================

    fn commit(&mut self) {
        self.history.record(&self.store.snapshot());
        self.sync_overlays();
    }

    /// Redraw the selected defect's rectangles from original coordinates.
    fn sync_overlays(&mut self) {
        self.presenter.clear_overlays();
        for index in 0..self.store.len() {
            if let Some(defect) = self.store.defect_mut(index) {
                for rect in &mut defect.rectangles {
                    rect.overlay = None;
                }
            }
        }

        let selected_rect = self.store.selected_rectangle_index();
        if let Some(defect) = self.store.selected_defect_mut() {
            for (i, rect) in defect.rectangles.iter_mut().enumerate() {
                if let Some(display) = self.view.to_display(rect.coords) {
                    let handle = self
                        .presenter
                        .draw_overlay(display, selected_rect == Some(i));
                    rect.overlay = Some(handle);
                }
            }
        }

        self.refresh_panels();
    }

    fn refresh_panels(&mut self) {
        let selected = self.store.selected_defect_index();
        self.presenter
            .refresh_defect_list(self.store.defects(), selected);
        self.presenter.refresh_rectangle_list(
            selected
                .map(|i| self.store.rectangles(i))
                .unwrap_or_default(),
            self.store.selected_rectangle_index(),
        );
        self.presenter
            .refresh_defect_details(self.store.selected_defect());
    }
}

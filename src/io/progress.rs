//! Terminal progress for batch generation, measured in assigned pixels

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static PIXEL_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::with_template("{prefix:>24} [{bar:30.green/white}] {pos}/{len} px")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::with_template("[{elapsed_precise}] {msg} {pos}/{len} images")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Display state of one input file
#[derive(Debug, Clone, Default)]
struct FileProgress {
    label: String,
    assigned: usize,
    total: usize,
    done: bool,
}

impl FileProgress {
    fn prefix(&self) -> String {
        if self.done {
            format!("done {}", self.label)
        } else {
            self.label.clone()
        }
    }
}

/// Progress display for one run of the command-line tool
///
/// Each of the most recently started files gets a pixel bar. Batches larger
/// than [`MAX_INDIVIDUAL_PROGRESS_BARS`] also get an images-done bar.
pub struct ProgressManager {
    display: MultiProgress,
    images: Option<ProgressBar>,
    bars: Vec<ProgressBar>,
    files: Vec<FileProgress>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Manager with no bars yet
    pub fn new() -> Self {
        Self {
            display: MultiProgress::new(),
            images: None,
            bars: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Allocate bars for `file_count` inputs
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let images = self
                .display
                .add(ProgressBar::new(file_count as u64).with_style(BATCH_STYLE.clone()));
            images.set_message("generating");
            self.images = Some(images);
        }

        self.bars = (0..file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS))
            .map(|_| {
                self.display
                    .add(ProgressBar::new(0).with_style(PIXEL_STYLE.clone()))
            })
            .collect();
    }

    /// Begin tracking file `index`, which has `pixels` cells to generate
    pub fn start_file(&mut self, index: usize, path: &Path, pixels: usize) {
        if self.files.len() <= index {
            self.files.resize_with(index + 1, FileProgress::default);
        }
        if let Some(file) = self.files.get_mut(index) {
            *file = FileProgress {
                label: path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                assigned: 0,
                total: pixels,
                done: false,
            };
        }
        self.redraw();
    }

    /// Record that `assigned` cells of file `index` hold a color
    pub fn update_pixels(&mut self, index: usize, assigned: usize) {
        if let Some(file) = self.files.get_mut(index) {
            file.assigned = assigned.min(file.total);
        }
        self.redraw();
    }

    /// Mark file `index` as written
    pub fn complete_file(&mut self, index: usize) {
        if let Some(images) = &self.images {
            images.inc(1);
        }
        if let Some(file) = self.files.get_mut(index) {
            file.assigned = file.total;
            file.done = true;
        }
        self.redraw();
    }

    /// Finish the batch bar and clear the display
    pub fn finish(&self) {
        if let Some(images) = &self.images {
            images.finish_with_message("done");
        }
        let _ = self.display.clear();
    }

    fn redraw(&self) {
        let started: Vec<&FileProgress> = self
            .files
            .iter()
            .filter(|file| !file.label.is_empty())
            .collect();
        let window = started
            .get(started.len().saturating_sub(self.bars.len())..)
            .unwrap_or_default();

        for (bar, file) in self.bars.iter().zip(window) {
            bar.set_length(file.total as u64);
            bar.set_position(file.assigned as u64);
            bar.set_prefix(file.prefix());
        }
        for bar in self.bars.iter().skip(window.len()) {
            bar.set_length(0);
            bar.set_position(0);
            bar.set_prefix(String::new());
        }
    }
}

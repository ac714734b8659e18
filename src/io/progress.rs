//! Progress display for per-element and per-file batches

use crate::io::configuration::MIN_PROGRESS_ITEMS;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static ITEM_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {prefix} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Optional progress bar over a known number of items
///
/// Stays hidden when disabled or when the batch is too small to be worth
/// drawing, so callers can tick it unconditionally.
pub struct BatchProgress {
    bar: Option<ProgressBar>,
}

impl BatchProgress {
    /// Start a bar for `total` items labeled with `prefix`
    pub fn new(enabled: bool, total: usize, prefix: &str) -> Self {
        let bar = (enabled && total >= MIN_PROGRESS_ITEMS).then(|| {
            let bar = ProgressBar::new(total as u64);
            bar.set_style(ITEM_STYLE.clone());
            bar.set_prefix(prefix.to_string());
            bar
        });
        Self { bar }
    }

    /// Whether a bar is being drawn
    pub const fn is_visible(&self) -> bool {
        self.bar.is_some()
    }

    /// Advance by one item, showing its name
    pub fn tick(&self, item: &str) {
        if let Some(ref bar) = self.bar {
            bar.set_message(item.to_string());
            bar.inc(1);
        }
    }

    /// Clear the bar
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}

//! Per-forum count progress bar.

use indicatif::{ProgressBar, ProgressStyle};

/// Thin wrapper over an `indicatif` count bar; hidden when progress is off.
pub struct ProgressScope {
    pb: ProgressBar,
}

impl ProgressScope {
    pub fn count<T: Into<String>>(label: T, total: u64, visible: bool) -> Self {
        if !visible {
            return Self { pb: ProgressBar::hidden() };
        }
        let pb = ProgressBar::new(total);
        let style = ProgressStyle::with_template(
            "{spinner:.green} {msg} {pos}/{len} [{bar:.cyan/blue}] {percent:>3}%  \
             elapsed: {elapsed_precise}  eta: {eta_precise}"
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");
        pb.set_style(style);
        let label = label.into();
        if !label.is_empty() {
            pb.set_message(label);
        }
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        Self { pb }
    }

    #[inline]
    pub fn inc_items(&self, delta: u64) {
        self.pb.inc(delta);
    }

    pub fn finish<T: Into<String>>(&self, msg: T) {
        self.pb.finish_with_message(msg.into());
    }
}

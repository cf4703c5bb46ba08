use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

static INIT_ONCE: std::sync::Once = std::sync::Once::new();
pub fn init_tracing_once() {
    INIT_ONCE.call_once(|| {
        let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// Replace `dest` with the finished `tmp` file.
pub fn promote_file(tmp: &Path, dest: &Path) -> Result<()> {
    if dest.exists() {
        fs::remove_file(dest).with_context(|| format!("remove {}", dest.display()))?;
    }
    fs::rename(tmp, dest).with_context(|| format!("rename {} -> {}", tmp.display(), dest.display()))
}

/// Sleep unless `d` is zero.
pub fn pause(d: std::time::Duration) {
    if !d.is_zero() {
        std::thread::sleep(d);
    }
}

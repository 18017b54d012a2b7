//! Configuration loading and parsing.
//!
//! Parses `camo.toml` (or an override path provided by the binary):
//!
//! ```toml
//! [editor]
//! tab_width = 8
//!
//! [terminal]
//! alternate_screen = true
//! ```
//!
//! Every field is optional. Unknown fields are ignored. A file that fails to
//! parse falls back to defaults with a warning; a missing file is silent.
//! `tab_width` is clamped to `1..=MAX_TAB_WIDTH` into
//! `Config::effective_tab_width`, the raw value is kept for diagnostics.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::ErrorKind;
use std::{fs, path::Path, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "camo.toml";
pub const MAX_TAB_WIDTH: u16 = 32;

#[derive(Debug, Deserialize, Clone)]
pub struct EditorConfig {
    #[serde(default = "EditorConfig::default_tab_width")]
    pub tab_width: u16,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_width: Self::default_tab_width(),
        }
    }
}

impl EditorConfig {
    const fn default_tab_width() -> u16 {
        8
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TerminalConfig {
    /// Draw on the alternate screen so the shell's scrollback survives.
    #[serde(default = "TerminalConfig::default_alternate_screen")]
    pub alternate_screen: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            alternate_screen: Self::default_alternate_screen(),
        }
    }
}

impl TerminalConfig {
    const fn default_alternate_screen() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub terminal: TerminalConfig,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub source: Option<PathBuf>,
    pub file: ConfigFile,
    pub effective_tab_width: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_file(ConfigFile::default(), None, None)
    }
}

/// Config path following platform conventions: `./camo.toml` first, then
/// `<config_dir>/camo/camo.toml`.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("camo").join(CONFIG_FILE_NAME);
    }
    local
}

/// Load from `path`, or from [`discover`] when `None`.
///
/// Only an unreadable (as opposed to missing) file is an error.
pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(target: "config", path = %path.display(), "config_not_found_using_defaults");
            return Ok(Config::default());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("reading config {}", path.display()));
        }
    };
    Ok(parse(&content, &path))
}

fn parse(content: &str, path: &Path) -> Config {
    match toml::from_str::<ConfigFile>(content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Config::from_file(file, Some(content.to_string()), Some(path.to_path_buf()))
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_error_using_defaults");
            Config::default()
        }
    }
}

impl Config {
    fn from_file(file: ConfigFile, raw: Option<String>, source: Option<PathBuf>) -> Self {
        let raw_tab = file.editor.tab_width;
        let effective_tab_width = raw_tab.clamp(1, MAX_TAB_WIDTH);
        if effective_tab_width != raw_tab {
            info!(
                target: "config",
                raw = raw_tab,
                clamped = effective_tab_width,
                max = MAX_TAB_WIDTH,
                "tab_width_clamped"
            );
        }
        Self {
            raw,
            source,
            file,
            effective_tab_width,
        }
    }

    pub fn alternate_screen(&self) -> bool {
        self.file.terminal.alternate_screen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl Write for LockedWriter<'_> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), body).unwrap();
        tmp
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert_eq!(cfg.effective_tab_width, 8);
        assert!(cfg.alternate_screen());
        assert!(cfg.raw.is_none());
        assert!(cfg.source.is_none());
    }

    #[test]
    fn parses_all_sections() {
        let tmp = write_config("[editor]\ntab_width = 4\n[terminal]\nalternate_screen = false\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.file.editor.tab_width, 4);
        assert_eq!(cfg.effective_tab_width, 4);
        assert!(!cfg.alternate_screen());
        assert_eq!(cfg.source.as_deref(), Some(tmp.path()));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let tmp = write_config("[terminal]\nalternate_screen = false\nunknown = 1\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.effective_tab_width, 8);
        assert!(!cfg.alternate_screen());
    }

    #[test]
    fn parse_error_falls_back_to_defaults() {
        let tmp = write_config("[editor\ntab_width = ");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.effective_tab_width, 8);
        assert!(cfg.raw.is_none());
    }

    #[test]
    fn zero_tab_width_is_clamped_and_logged() {
        let tmp = write_config("[editor]\ntab_width = 0\n");
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();

        let cfg = with_default(subscriber, || load_from(Some(tmp.path().to_path_buf())).unwrap());

        let log_output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(log_output.contains("INFO config:"));
        assert!(log_output.contains("tab_width_clamped"));
        assert_eq!(cfg.file.editor.tab_width, 0);
        assert_eq!(cfg.effective_tab_width, 1);
    }

    #[test]
    fn oversized_tab_width_is_clamped() {
        let tmp = write_config("[editor]\ntab_width = 400\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.effective_tab_width, MAX_TAB_WIDTH);
    }
}

//! Persisted user preferences: brush size and brush color.
//!
//! Stored as `key=value` lines in `spraypaint_settings.cfg` under the platform
//! config directory. Painted marks are never written anywhere.

use std::path::{Path, PathBuf};

use crate::components::colors::NamedColor;
use crate::components::tools::{DEFAULT_BRUSH_SIZE, MAX_BRUSH_SIZE, MIN_BRUSH_SIZE, ToolProperties};

const SETTINGS_FILE: &str = "spraypaint_settings.cfg";

#[derive(Clone, Debug, PartialEq)]
pub struct AppSettings {
    /// Brush diameter in surface units
    pub brush_size: f32,
    /// Last selected entry of the color list
    pub brush_color: NamedColor,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            brush_size: DEFAULT_BRUSH_SIZE,
            brush_color: NamedColor::Black,
        }
    }
}

impl AppSettings {
    pub(crate) fn settings_path() -> Option<PathBuf> {
        #[cfg(target_os = "linux")]
        {
            let config_dir = std::env::var("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .or_else(|_| std::env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
                .ok()?
                .join("spraypaint");
            return Some(config_dir.join(SETTINGS_FILE));
        }
        #[cfg(target_os = "windows")]
        {
            let appdata = std::env::var("APPDATA")
                .or_else(|_| std::env::var("USERPROFILE"))
                .ok()?;
            return Some(PathBuf::from(appdata).join("SprayPaint").join(SETTINGS_FILE));
        }
        #[cfg(target_os = "macos")]
        {
            let home = std::env::var("HOME").ok()?;
            return Some(
                PathBuf::from(home)
                    .join("Library")
                    .join("Application Support")
                    .join("SprayPaint")
                    .join(SETTINGS_FILE),
            );
        }
        #[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
        {
            std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|d| d.join(SETTINGS_FILE)))
        }
    }

    pub fn tool_properties(&self) -> ToolProperties {
        ToolProperties {
            size: self.brush_size,
            color: self.brush_color,
        }
    }

    /// Fold the controls' end-of-session state into these (on-disk) settings.
    ///
    /// Only controls the user actually moved away from `session_start` are
    /// copied, so command-line overrides never leak into the file. Returns
    /// whether anything changed.
    pub fn commit_session(&mut self, session_start: ToolProperties, session_end: ToolProperties) -> bool {
        let mut changed = false;
        if session_end.size != session_start.size && session_end.size != self.brush_size {
            self.brush_size = session_end.size;
            changed = true;
        }
        if session_end.color != session_start.color && session_end.color != self.brush_color {
            self.brush_color = session_end.color;
            changed = true;
        }
        changed
    }

    pub fn to_config_string(&self) -> String {
        format!(
            "brush_size={}\n\
             brush_color={}\n",
            self.brush_size,
            self.brush_color.name(),
        )
    }

    /// Parse `key=value` lines. Unknown keys and unparsable values keep their
    /// defaults; the brush size is clamped to the slider range.
    pub fn parse(content: &str) -> Self {
        let mut s = Self::default();
        for line in content.lines() {
            let Some((key, val)) = line.split_once('=') else { continue };
            let val = val.trim();
            match key.trim() {
                "brush_size" => {
                    if let Ok(v) = val.parse::<f32>()
                        && v.is_finite()
                    {
                        s.brush_size = v.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
                    }
                }
                "brush_color" => s.brush_color = NamedColor::from_name(val),
                _ => {}
            }
        }
        s
    }

    /// Load settings from disk (returns default if file missing or corrupt)
    pub fn load() -> Self {
        match Self::settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    crate::log_warn!("Could not read settings {}: {}", path.display(), e);
                }
                Self::default()
            }
        }
    }

    /// Save settings to disk. Failures are logged, never fatal.
    pub fn save(&self) {
        if let Some(path) = Self::settings_path()
            && let Err(e) = self.save_to(&path)
        {
            crate::log_warn!("Could not write settings {}: {}", path.display(), e);
        }
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_config_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliArgs;
    use crate::components::tools::ToolsPanel;
    use clap::Parser;

    fn stored_fixture(dir: &Path) -> (PathBuf, AppSettings) {
        let path = dir.join(SETTINGS_FILE);
        let stored = AppSettings {
            brush_size: 12.0,
            brush_color: NamedColor::Blue,
        };
        stored.save_to(&path).unwrap();
        (path, stored)
    }

    #[test]
    fn cli_overrides_are_not_persisted_when_controls_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let (path, stored) = stored_fixture(dir.path());
        let before = std::fs::read_to_string(&path).unwrap();

        let mut on_disk = AppSettings::load_from(&path);
        let args = CliArgs::try_parse_from(["spraypaint", "-s", "40", "-c", "Red"]).unwrap();
        let session = args.apply_to(&on_disk);
        let panel = ToolsPanel::new(session.tool_properties());
        assert_eq!(panel.properties().size, 40.0);

        if on_disk.commit_session(session.tool_properties(), panel.properties()) {
            on_disk.save_to(&path).unwrap();
        }

        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
        assert_eq!(AppSettings::load_from(&path), stored);
    }

    #[test]
    fn only_controls_the_user_moved_are_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let (path, _) = stored_fixture(dir.path());

        let mut on_disk = AppSettings::load_from(&path);
        let args = CliArgs::try_parse_from(["spraypaint", "-s", "40", "-c", "Red"]).unwrap();
        let session = args.apply_to(&on_disk);
        let mut panel = ToolsPanel::new(session.tool_properties());
        panel.brush_size = 22.0;

        assert!(on_disk.commit_session(session.tool_properties(), panel.properties()));
        on_disk.save_to(&path).unwrap();

        let reloaded = AppSettings::load_from(&path);
        assert_eq!(reloaded.brush_size, 22.0);
        // The override color was never picked by hand
        assert_eq!(reloaded.brush_color, NamedColor::Blue);
    }

    #[test]
    fn moving_a_control_back_to_the_stored_value_is_not_a_change() {
        let mut on_disk = AppSettings {
            brush_size: 12.0,
            brush_color: NamedColor::Blue,
        };
        let start = ToolProperties {
            size: 40.0,
            color: NamedColor::Red,
        };
        let end = ToolProperties {
            size: 12.0,
            color: NamedColor::Red,
        };
        assert!(!on_disk.commit_session(start, end));
    }

    #[test]
    fn parse_reads_known_keys() {
        let s = AppSettings::parse("brush_size=24\nbrush_color=Blue\n");
        assert_eq!(s.brush_size, 24.0);
        assert_eq!(s.brush_color, NamedColor::Blue);
    }

    #[test]
    fn parse_tolerates_junk() {
        let s = AppSettings::parse("# comment\nbrush_size=huge\nbrush_color=Teal\nfoo=bar\nnoequals\n");
        assert_eq!(s, AppSettings::default());
    }

    #[test]
    fn parse_clamps_size() {
        assert_eq!(AppSettings::parse("brush_size=0").brush_size, MIN_BRUSH_SIZE);
        assert_eq!(AppSettings::parse("brush_size=9000").brush_size, MAX_BRUSH_SIZE);
        assert_eq!(AppSettings::parse("brush_size=NaN").brush_size, DEFAULT_BRUSH_SIZE);
    }

    #[test]
    fn save_then_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE);
        let settings = AppSettings {
            brush_size: 17.5,
            brush_color: NamedColor::Red,
        };
        settings.save_to(&path).unwrap();
        assert_eq!(AppSettings::load_from(&path), settings);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            AppSettings::load_from(&dir.path().join("nope.cfg")),
            AppSettings::default()
        );
    }
}

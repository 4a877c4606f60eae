//! qrmaker runtime configuration handling

use crate::error::{Error, Result};
use crate::qr::{QrStyle, parse_color, parse_ec_level};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// URL encoded into the first preview shown at startup
pub const DEFAULT_URL: &str = "https://github.com/Germi32";

/// Content of the QR code used as the window icon
pub const DEFAULT_ICON_TEXT: &str = "https://www.google.com/";

/// Top-level configuration structure loaded from disk or environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QrMakerConfig {
    /// Window layout and chrome
    pub window: WindowOptions,
    /// QR rendering parameters
    pub qr: QrOptions,
    /// Temp file placement
    pub output: OutputOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
}

impl QrMakerConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file()? {
            tracing::info!("Using configuration file: {}", path.display());
            Self::from_file(&path)?
        } else {
            tracing::debug!("No qrmaker.toml / qrmaker.yaml found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in ["qrmaker.toml", "qrmaker.yaml", "qrmaker.yml"] {
            let path = cwd.join(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("qrmaker");
            for candidate in ["config.toml", "config.yaml"] {
                let path = base.join(candidate);
                if path.exists() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{other}', expected toml/yaml"
            ))),
        }
    }

    /// Apply environment variable overrides after file/default loading.
    fn apply_env_overrides(&mut self) {
        self.window.apply_env_overrides();
        self.output.apply_env_overrides();
        self.logging.apply_env_overrides();
    }

    /// Produce a validated rendering style for the generator.
    pub fn qr_style(&self) -> Result<QrStyle> {
        self.qr.to_style()
    }
}

/// Window layout, startup content and chrome
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowOptions {
    /// Window title
    pub title: String,
    /// Initial inner width in points
    pub width: f32,
    /// Initial inner height in points
    pub height: f32,
    /// Minimum inner width in points
    pub min_width: f32,
    /// Minimum inner height in points
    pub min_height: f32,
    /// Text encoded into the preview shown at startup
    pub default_url: String,
    /// Text encoded into the window icon; `None` keeps the platform icon
    pub icon_text: Option<String>,
    /// Offer a right-click Copy/Paste menu on the URL field
    pub context_menu: bool,
    /// Ask the window manager for a dark title bar (Windows only)
    pub dark_title_bar: bool,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: "QR Code Maker".to_string(),
            width: 800.0,
            height: 600.0,
            min_width: 800.0,
            min_height: 600.0,
            default_url: DEFAULT_URL.to_string(),
            icon_text: Some(DEFAULT_ICON_TEXT.to_string()),
            context_menu: true,
            dark_title_bar: true,
        }
    }
}

impl WindowOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var("QRMAKER_DEFAULT_URL") {
            self.default_url = url;
        }
        if let Ok(value) = env::var("QRMAKER_CONTEXT_MENU") {
            if let Some(flag) = parse_flag(&value) {
                self.context_menu = flag;
            }
        }
        if let Ok(value) = env::var("QRMAKER_DARK_TITLE_BAR") {
            if let Some(flag) = parse_flag(&value) {
                self.dark_title_bar = flag;
            }
        }
    }
}

/// User-facing QR rendering options, validated into a [`QrStyle`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QrOptions {
    /// Smallest symbol version to try; larger versions are used when the data does not fit
    pub version: i16,
    /// Pixels per module
    pub box_size: u32,
    /// Quiet zone width in modules
    pub border: u32,
    /// Error correction level (`L`, `M`, `Q` or `H`)
    pub error_correction: String,
    /// Module color (`black`, `white` or `#RRGGBB`)
    pub foreground: String,
    /// Background color (`black`, `white` or `#RRGGBB`)
    pub background: String,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            version: 1,
            box_size: 10,
            border: 5,
            error_correction: "M".to_string(),
            foreground: "black".to_string(),
            background: "white".to_string(),
        }
    }
}

impl QrOptions {
    /// Validate the options and merge them into a rendering style.
    pub fn to_style(&self) -> Result<QrStyle> {
        if !(1..=40).contains(&self.version) {
            return Err(Error::Config(format!(
                "QR version {} out of range, expected 1..=40",
                self.version
            )));
        }
        if self.box_size == 0 {
            return Err(Error::Config("QR box_size must be at least 1".to_string()));
        }

        Ok(QrStyle {
            min_version: self.version,
            box_size: self.box_size,
            border: self.border,
            ec_level: parse_ec_level(&self.error_correction)?,
            foreground: parse_color(&self.foreground)?,
            background: parse_color(&self.background)?,
        })
    }
}

/// Where generated images are written
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Directory for temporary images; the OS temp dir when unset
    pub temp_dir: Option<PathBuf>,
    /// File name prefix for temporary images
    pub file_prefix: String,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            temp_dir: None,
            file_prefix: "qrmaker-".to_string(),
        }
    }
}

impl OutputOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(dir) = env::var("QRMAKER_TEMP_DIR") {
            if dir.trim().is_empty() {
                self.temp_dir = None;
            } else {
                self.temp_dir = Some(PathBuf::from(dir));
            }
        }
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `QRMAKER_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in stdout logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("QRMAKER_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(file) = env::var("QRMAKER_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Ok(color) = env::var("QRMAKER_LOG_COLOR") {
            if let Some(flag) = parse_flag(&color) {
                self.color = flag;
            }
        }
        if let Ok(rotation) = env::var("QRMAKER_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::parse(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" => Some(true),
        "0" | "false" | "off" => Some(false),
        _ => None,
    }
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::gesture::DEFAULT_TABLE;
use crate::types::Gesture;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub camera: CameraConfig,
    pub gestures: GestureConfig,
    pub detector: DetectorConfig,
    pub annotation: AnnotationConfig,
    pub presentation: PresentationConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub index: u32,
    pub width: u32,
    pub height: u32,
    pub mirror: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Hand centre must be at or above this row for a gesture to count.
    pub threshold_y: i32,
    pub cooldown_frames: u32,
    /// Pattern table in priority order.
    pub bindings: Vec<GestureBinding>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureBinding {
    /// Five characters of 0/1, thumb first. e.g. "01110"
    pub pattern: String,
    pub gesture: Gesture,
}

impl GestureBinding {
    pub fn new(pattern: &str, gesture: Gesture) -> Self {
        Self {
            pattern: pattern.to_string(),
            gesture,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub model_path: String,
    pub min_confidence: f32,
    /// Fraction of the previous hand box added around it when cropping the next frame.
    pub roi_padding: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    pub color_hex: String, // e.g. "#C80000"
    pub thickness: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    pub file: Option<String>,
    /// Started once at launch; `{file}` is replaced by `file`. Empty = don't launch.
    pub launch: Vec<String>,
    pub advance: Vec<String>,
    pub retreat: Vec<String>,
    /// 0 waits forever.
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub window_title: String,
    pub quit_key: char,
    pub show_hud: bool,
    pub show_landmarks: bool,
    pub show_threshold: bool,
    pub hud_scale: usize,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            index: 0,
            width: 900,
            height: 720,
            mirror: false,
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            threshold_y: 300,
            cooldown_frames: 30,
            bindings: DEFAULT_TABLE
                .iter()
                .map(|(fingers, gesture)| GestureBinding {
                    pattern: fingers.to_string(),
                    gesture: *gesture,
                })
                .collect(),
        }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model_path: "models/hand_landmark.onnx".to_string(),
            min_confidence: 0.8,
            roi_padding: 0.5,
        }
    }
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            color_hex: "#C80000".to_string(),
            thickness: 12,
        }
    }
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            file: None,
            launch: Vec::new(),
            advance: vec!["xdotool".into(), "key".into(), "Right".into()],
            retreat: vec!["xdotool".into(), "key".into(), "Left".into()],
            timeout_ms: 2000,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_title: "Hand Slides".to_string(),
            quit_key: 'q',
            show_hud: true,
            show_landmarks: true,
            show_threshold: true,
            hud_scale: 2,
        }
    }
}

impl AppConfig {
    pub const DEFAULT_PATH: &'static str = "config.json";

    /// Read `path` (defaults when missing), then write the result back so
    /// new fields show up in the file. An unparsable file is an error and
    /// is left as it was.
    pub fn load(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            // Missing fields use Default thanks to #[serde(default)]
            let config = Self::from_json(&content)
                .with_context(|| format!("parsing config {}", path.display()))?;
            info!("Loaded configuration from {}", path.display());
            config
        } else {
            info!("Configuration file not found. Creating default at {}", path.display());
            Self::default()
        };

        config.save(path)?;

        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str::<AppConfig>(content)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("writing config {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.gestures.threshold_y, 300);
        assert_eq!(config.gestures.cooldown_frames, 30);
        assert_eq!((config.camera.width, config.camera.height), (900, 720));
        assert_eq!(config.annotation.thickness, 12);
        assert_eq!(config.ui.quit_key, 'q');
        assert_eq!(config.gestures.bindings.len(), 5);
        assert_eq!(config.gestures.bindings[0], GestureBinding::new("11111", Gesture::Next));
        assert_eq!(config.gestures.bindings[4], GestureBinding::new("01110", Gesture::ToggleDraw));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = AppConfig::from_json(r#"{ "gestures": { "threshold_y": 250 } }"#).unwrap();
        assert_eq!(config.gestures.threshold_y, 250);
        assert_eq!(config.gestures.cooldown_frames, 30);
        assert_eq!(config.gestures.bindings.len(), 5);
        assert_eq!(config.detector.min_confidence, 0.8);
    }

    #[test]
    fn test_bindings_from_json() {
        let config = AppConfig::from_json(
            r#"{ "gestures": { "bindings": [ { "pattern": "01000", "gesture": "toggle_draw" } ] } }"#,
        )
        .unwrap();
        assert_eq!(
            config.gestures.bindings,
            vec![GestureBinding::new("01000", Gesture::ToggleDraw)]
        );
    }

    #[test]
    fn test_load_creates_missing_file() {
        let dir = std::env::temp_dir().join(format!("hand-slides-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        let _ = fs::remove_file(&path);

        let config = AppConfig::load(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.gestures.threshold_y, 300);

        let reloaded = AppConfig::load(&path).unwrap();
        assert_eq!(reloaded.presentation.advance, config.presentation.advance);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_rejects_unknown_gesture_and_keeps_file() {
        let dir = std::env::temp_dir().join(format!("hand-slides-bad-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        let content = r#"{"gestures":{"threshold_y":123,"bindings":[{"pattern":"01000","gesture":"toggle-draw"}]}}"#;
        fs::write(&path, content).unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("parsing config"));
        assert_eq!(fs::read_to_string(&path).unwrap(), content);

        fs::remove_dir_all(&dir).unwrap();
    }
}

use clap::Parser;
use std::path::PathBuf;

use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file (created with defaults if missing)
    #[arg(short, long, default_value = AppConfig::DEFAULT_PATH)]
    pub config: PathBuf,

    /// Camera Index (overrides config)
    #[arg(long)]
    pub cam_index: Option<u32>,

    /// Hand landmark ONNX model (overrides config)
    #[arg(long)]
    pub model: Option<String>,

    /// Presentation file substituted into the launch command
    #[arg(short, long)]
    pub file: Option<String>,

    /// Mirror the camera output
    #[arg(long, default_value_t = false)]
    pub mirror: bool,

    /// Log slide commands instead of running them
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// List available cameras
    #[arg(long)]
    pub list: bool,
}

impl Args {
    /// Fold command-line overrides into the loaded config.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(index) = self.cam_index {
            config.camera.index = index;
        }
        if let Some(model) = &self.model {
            config.detector.model_path = model.clone();
        }
        if let Some(file) = &self.file {
            config.presentation.file = Some(file.clone());
        }
        if self.mirror {
            config.camera.mirror = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "hand-slides",
            "--cam-index",
            "2",
            "--file",
            "talk.pptx",
            "--mirror",
            "--dry-run",
        ]);
        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert_eq!(config.camera.index, 2);
        assert!(config.camera.mirror);
        assert_eq!(config.presentation.file.as_deref(), Some("talk.pptx"));
        assert_eq!(config.detector.model_path, "models/hand_landmark.onnx");
        assert!(args.dry_run);
        assert_eq!(args.config, PathBuf::from("config.json"));
    }
}

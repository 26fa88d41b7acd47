use crate::{
    animation::{AnimationClock, AnimationSpec, ClockChannel, ClockError, Easing, RepeatMode},
    progress::{
        default_phases, PhaseTimings, ProgressError, ProgressPhase, ProgressPlan, DEFAULT_FINAL_PAUSE,
        DEFAULT_PHASE_PAUSE, DEFAULT_STEP_DURATION, DEFAULT_TICK,
    },
    scene::{Color, Palette},
};
use serde::Deserialize;
use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::{debug, info};

const DEFAULT_LOGICAL_WIDTH: f32 = 1080.0;
const DEFAULT_MAX_FPS: u32 = 60;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub(crate) loading: LoadingConfig,
    pub(crate) render: RenderConfig,
    pub(crate) palette: PaletteConfig,

    /// Per channel replacements for the stock animations
    pub(crate) animation: BTreeMap<ClockChannel, ChannelConfig>,
}

impl Config {
    /// Load the configuration at the given path.
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config = Self::parse(&contents)?;
        info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load the configuration from an explicit path, or from the default location if there is one.
    ///
    /// An explicit path that doesn't exist is an error, a missing default file simply means defaults.
    pub(crate) fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            Some(path) => {
                debug!("no configuration at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => {
                debug!("no configuration directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// `<config dir>/heroscope/config.yaml`.
    pub(crate) fn default_path() -> Option<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "heroscope")?;
        Some(dirs.config_dir().join("config.yaml"))
    }

    pub(crate) fn parse(contents: &str) -> Result<Self, ConfigError> {
        // an empty file is a valid, default configuration
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.render.logical_width.is_finite() || self.render.logical_width <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "render.logical_width must be positive, got {}",
                self.render.logical_width
            )));
        }
        if self.render.max_fps == 0 {
            return Err(ConfigError::Invalid("render.max_fps must be at least 1".to_string()));
        }
        if self.loading.tick == 0 {
            return Err(ConfigError::Invalid("loading.tick must be at least 1ms".to_string()));
        }
        Ok(())
    }

    pub(crate) fn progress_plan(&self) -> Result<ProgressPlan, ConfigError> {
        Ok(ProgressPlan::new(self.loading.phases.clone(), self.loading.timings())?)
    }

    /// The stock clock with every configured channel swapped in.
    pub(crate) fn animation_clock(&self) -> Result<AnimationClock, ConfigError> {
        let mut clock = AnimationClock::default();
        for (channel, config) in &self.animation {
            let spec = config.spec().map_err(|source| ConfigError::Animation { channel: *channel, source })?;
            debug!("overriding animation channel {channel}");
            clock = clock.with_channel(*channel, spec);
        }
        Ok(clock)
    }

    /// Time between two frames: one tick, unless that exceeds the frame rate cap.
    pub(crate) fn frame_interval(&self) -> Duration {
        let cap = Duration::from_secs(1) / self.render.max_fps.max(1);
        Duration::from_millis(self.loading.tick).max(cap)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct LoadingConfig {
    pub(crate) phases: Vec<ProgressPhase>,

    /// Milliseconds spent animating towards each phase's target.
    pub(crate) step_duration: u64,

    /// Milliseconds to hold each phase's target.
    pub(crate) phase_pause: u64,

    /// Milliseconds to hold 100% before the result screen.
    pub(crate) final_pause: u64,

    /// Milliseconds between frames.
    pub(crate) tick: u64,
}

impl LoadingConfig {
    pub(crate) fn timings(&self) -> PhaseTimings {
        PhaseTimings {
            step: Duration::from_millis(self.step_duration),
            pause: Duration::from_millis(self.phase_pause),
            final_pause: Duration::from_millis(self.final_pause),
        }
    }
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            phases: default_phases(),
            step_duration: DEFAULT_STEP_DURATION.as_millis() as u64,
            phase_pause: DEFAULT_PHASE_PAUSE.as_millis() as u64,
            final_pause: DEFAULT_FINAL_PAUSE.as_millis() as u64,
            tick: DEFAULT_TICK.as_millis() as u64,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RenderConfig {
    /// How many logical units the canvas width spans.
    pub(crate) logical_width: f32,
    pub(crate) max_fps: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { logical_width: DEFAULT_LOGICAL_WIDTH, max_fps: DEFAULT_MAX_FPS }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct PaletteConfig {
    pub(crate) primary: Color,
    pub(crate) secondary: Color,
    pub(crate) accent: Color,
    pub(crate) backdrop: [Color; 3],
}

impl PaletteConfig {
    pub(crate) fn palette(&self) -> Palette {
        Palette {
            primary: self.primary,
            secondary: self.secondary,
            accent: self.accent,
            backdrop: self.backdrop,
            ..Default::default()
        }
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        let Palette { primary, secondary, accent, backdrop, .. } = Palette::default();
        Self { primary, secondary, accent, backdrop }
    }
}

/// A replacement animation for one clock channel
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct ChannelConfig {
    pub(crate) from: f32,
    pub(crate) to: f32,

    /// Milliseconds for one run from `from` to `to`.
    pub(crate) duration: u64,

    #[serde(default = "default_easing")]
    pub(crate) easing: Easing,

    #[serde(default = "default_repeat")]
    pub(crate) repeat: RepeatMode,
}

impl ChannelConfig {
    fn spec(&self) -> Result<AnimationSpec, ClockError> {
        AnimationSpec::new(self.from, self.to, Duration::from_millis(self.duration), self.easing, self.repeat)
    }
}

fn default_easing() -> Easing {
    Easing::Linear
}

fn default_repeat() -> RepeatMode {
    RepeatMode::Reverse
}

/// Errors that can occur when loading the configuration
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("reading {0}: {1}")]
    Io(PathBuf, io::Error),

    #[error("invalid configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("invalid loading phases: {0}")]
    Progress(#[from] ProgressError),

    #[error("invalid animation for channel {channel}: {source}")]
    Animation { channel: ClockChannel, source: ClockError },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn empty_is_default() {
        assert_eq!(Config::parse("").expect("parse failed"), Config::default());
        assert_eq!(Config::parse("loading: {}").expect("parse failed"), Config::default());
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.loading.phases.len(), 5);
        assert_eq!(config.loading.timings(), PhaseTimings::default());
        assert_eq!(config.render.logical_width, 1080.0);
        assert_eq!(config.palette.palette(), Palette::default());
        assert_eq!(config.progress_plan().expect("invalid plan").total_duration(), Duration::from_millis(5300));
    }

    #[test]
    fn full_file() {
        let contents = r##"
loading:
  phases:
    - label: "Warming up..."
      target: 0.5
    - label: "Done soon..."
      target: 1.0
  step_duration: 400
  phase_pause: 100
  final_pause: 0
  tick: 20
render:
  logical_width: 720
  max_fps: 30
palette:
  primary: "#000000"
  secondary: "ffffff"
  accent: "#fcd34d"
  backdrop: ["#111111", "#222222", "#333333"]
animation:
  rotation:
    from: 0
    to: 180
    duration: 1000
    easing: ease-in-out-sine
    repeat: restart
"##;
        let config = Config::parse(contents).expect("parse failed");
        assert_eq!(config.loading.phases[0], ProgressPhase::new("Warming up...", 0.5));
        assert_eq!(config.progress_plan().expect("invalid plan").total_duration(), Duration::from_millis(1000));
        assert_eq!(config.render.logical_width, 720.0);
        assert_eq!(config.palette.palette().secondary, Color::WHITE);
        // 30 fps is slower than the 20ms tick
        assert_eq!(config.frame_interval(), Duration::from_secs(1) / 30);

        let clock = config.animation_clock().expect("invalid clock");
        assert_eq!(clock.spec(ClockChannel::Rotation).bounds(), (0.0, 180.0));
        assert_eq!(clock.spec(ClockChannel::Rotation).repeat(), RepeatMode::Restart);
        assert_eq!(clock.spec(ClockChannel::Glow), &ClockChannel::Glow.default_spec());
    }

    #[test]
    fn frame_interval_is_capped() {
        // 16ms would run faster than the 60 fps cap
        assert_eq!(Config::default().frame_interval(), Duration::from_secs(1) / 60);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(matches!(Config::parse("loading:\n  speed: 3"), Err(ConfigError::Yaml(_))));
        assert!(matches!(Config::parse("colors: {}"), Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn invalid_values() {
        assert!(matches!(Config::parse("render:\n  max_fps: 0"), Err(ConfigError::Invalid(_))));
        assert!(matches!(Config::parse("render:\n  logical_width: -5"), Err(ConfigError::Invalid(_))));
        assert!(matches!(Config::parse("palette:\n  primary: \"#12\""), Err(ConfigError::Yaml(_))));

        let config = Config::parse("loading:\n  phases:\n    - label: x\n      target: 0.5").expect("parse failed");
        assert!(matches!(config.progress_plan(), Err(ConfigError::Progress(ProgressError::Incomplete(_)))));

        let config =
            Config::parse("animation:\n  pulse:\n    from: 1\n    to: 2\n    duration: 0").expect("parse failed");
        assert!(matches!(
            config.animation_clock(),
            Err(ConfigError::Animation { channel: ClockChannel::Pulse, source: ClockError::ZeroDuration })
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = NamedTempFile::new().expect("failed to create temp file");
        writeln!(file, "render:\n  max_fps: 24").expect("write failed");

        let config = Config::load_or_default(Some(file.path())).expect("load failed");
        assert_eq!(config.render.max_fps, 24);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let missing = dir.path().join("nope.yaml");
        assert!(matches!(Config::load_or_default(Some(&missing)), Err(ConfigError::Io(..))));
    }
}

use serde::Deserialize;

/// Largest number of cards mounted on either side of the active card.
pub const MAX_WINDOW_RADIUS: u8 = 3;

/// What reopening the viewer shows.
#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CloseBehavior {
    /// Closing drops back to the first story with no navigation direction.
    #[default]
    Reset,
    /// Closing keeps the current story; only the direction hint is cleared.
    Resume,
}

#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Viewer tunables, read from the `viewer` object of the story manifest.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    pub window_radius: u8,
    pub start_muted: bool,
    pub close_behavior: CloseBehavior,
    pub preload: bool,
    pub preload_delay_ms: u32,
    pub log_level: LogLevel,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_radius: MAX_WINDOW_RADIUS,
            start_muted: true,
            close_behavior: CloseBehavior::Reset,
            preload: true,
            preload_delay_ms: 250,
            log_level: LogLevel::Info,
        }
    }
}

impl ViewerConfig {
    /// Window radius limited to what card positions can express.
    pub fn effective_radius(&self) -> u8 {
        self.window_radius.min(MAX_WINDOW_RADIUS)
    }
}

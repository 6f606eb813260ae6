use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn project() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "reflex")
    }

    /// Leaderboard file; falls back to the working directory
    pub fn scores_path() -> PathBuf {
        Self::project()
            .map(|pd| pd.data_local_dir().join("highscores.json"))
            .unwrap_or_else(|| PathBuf::from("highscores.json"))
    }

    pub fn config_path() -> PathBuf {
        Self::project()
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("reflex_config.json"))
    }

    pub fn log_path() -> PathBuf {
        Self::project()
            .map(|pd| pd.data_local_dir().join("reflex.log"))
            .unwrap_or_else(|| PathBuf::from("reflex.log"))
    }
}

use crate::domain::config::OpsBotConfig;
use crate::domain::error::{OpsBotError, OpsBotResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment override for the bot token
pub const ENV_BOT_TOKEN: &str = "OPSBOT_BOT_TOKEN";
/// Environment override for the admin id list
pub const ENV_ADMIN_IDS: &str = "OPSBOT_ADMIN_IDS";

/// Configuration manager
pub struct ConfigManager {
    global_config_path: PathBuf,
    project_config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Create new configuration manager
    pub fn new() -> OpsBotResult<Self> {
        let global_config_path = Self::get_global_config_path()?;
        let project_config_path = Self::find_project_config_path();

        Ok(Self {
            global_config_path,
            project_config_path,
        })
    }

    /// Load configuration from files, then apply environment overrides
    pub fn load_config(&self) -> OpsBotResult<OpsBotConfig> {
        // Start with default configuration
        let mut config = OpsBotConfig::default();

        // Load global configuration if exists
        if self.global_config_path.exists() {
            config = self.load_config_from_path(&self.global_config_path)?;
        }

        // Project configuration replaces the global one wholesale
        if let Some(project_path) = &self.project_config_path {
            if project_path.exists() {
                config = self.load_config_from_path(project_path)?;
            }
        }

        Self::apply_env_overrides(&mut config);
        Ok(config)
    }

    /// Apply environment variable overrides for the secrets the bot needs
    fn apply_env_overrides(config: &mut OpsBotConfig) {
        if let Ok(token) = std::env::var(ENV_BOT_TOKEN) {
            config.telegram.bot_token = token;
        }
        if let Ok(admin_ids) = std::env::var(ENV_ADMIN_IDS) {
            config.telegram.admin_ids = admin_ids;
        }
    }

    /// Get global configuration path
    fn get_global_config_path() -> OpsBotResult<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| OpsBotError::Config {
            message: "Could not determine home directory".to_string(),
        })?;

        Ok(home.join(".config").join("opsbot").join("config.toml"))
    }

    /// Find project configuration path by walking up directory tree
    fn find_project_config_path() -> Option<PathBuf> {
        let current_dir = std::env::current_dir().ok()?;
        let mut path = current_dir.as_path();

        loop {
            let config_path = path.join(".opsbot").join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }

            path = path.parent()?;
        }
    }

    /// Load configuration from specific path
    pub fn load_config_from_path(&self, path: &Path) -> OpsBotResult<OpsBotConfig> {
        let content = fs::read_to_string(path).map_err(|e| OpsBotError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        toml::from_str(&content).map_err(|e| OpsBotError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })
    }

    /// Save configuration to specific path
    pub fn save_config_to_path(&self, path: &Path, config: &OpsBotConfig) -> OpsBotResult<()> {
        let content = toml::to_string_pretty(config).map_err(|e| OpsBotError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(path, content).map_err(|e| OpsBotError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })
    }

    /// Create default project configuration
    pub fn init_project_config(&self, path: &Path) -> OpsBotResult<()> {
        let config_dir = path.join(".opsbot");
        let config_file = config_dir.join("config.toml");

        if config_file.exists() {
            return Err(OpsBotError::Config {
                message: "Project configuration already exists".to_string(),
            });
        }

        fs::create_dir_all(&config_dir).map_err(|e| OpsBotError::Config {
            message: format!("Failed to create .opsbot directory: {}", e),
        })?;

        self.save_config_to_path(&config_file, &OpsBotConfig::default())?;

        Ok(())
    }

    /// Get the current project config path (if any)
    pub fn get_project_config_path(&self) -> Option<&PathBuf> {
        self.project_config_path.as_ref()
    }

    /// Get the global config path
    pub fn get_global_config_path_ref(&self) -> &PathBuf {
        &self.global_config_path
    }
}

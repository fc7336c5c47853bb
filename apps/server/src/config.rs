use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub model_path: PathBuf,
    pub history_path: PathBuf,
    pub threshold: f32,
    pub labels_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?;

        let threshold: f32 = env::var("CONFIDENCE_THRESHOLD")
            .unwrap_or_else(|_| "0.80".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("CONFIDENCE_THRESHOLD".to_string()))?;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::InvalidValue(
                "CONFIDENCE_THRESHOLD must be within [0, 1]".to_string(),
            ));
        }

        Ok(Config {
            port,
            model_path: env::var("MODEL_PATH")
                .unwrap_or_else(|_| "model/flowers.onnx".to_string())
                .into(),
            history_path: env::var("HISTORY_PATH")
                .unwrap_or_else(|_| "history.csv".to_string())
                .into(),
            threshold,
            labels_path: env::var("LABELS_PATH").ok().map(PathBuf::from),
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue(var) => write!(f, "Invalid value for: {}", var),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_env() {
        let config = Config::from_env().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.threshold, 0.80);
        assert_eq!(config.history_path, PathBuf::from("history.csv"));
        assert_eq!(config.model_path, PathBuf::from("model/flowers.onnx"));
        assert!(config.labels_path.is_none());
    }
}

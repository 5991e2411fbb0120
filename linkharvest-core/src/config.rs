use crate::error::{ConfigError, CoreError};
use serde::Deserialize;
use std::path::Path;

/// OAuth credentials for a Reddit "script" app, either supplied inline on
/// the command line or loaded from a YAML key/value file.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
    pub user_agent: String,
}

impl Credentials {
    /// Interpret a `--oauth` argument: comma-separated values are parsed
    /// inline, anything else is treated as a path to a YAML file.
    pub fn from_cli_arg(arg: &str) -> Result<Self, CoreError> {
        if arg.contains(',') {
            Self::from_inline(arg)
        } else {
            Self::from_yaml_file(Path::new(arg))
        }
    }

    /// Inline field order: client_id, client_secret, password, username,
    /// user_agent.
    pub fn from_inline(value: &str) -> Result<Self, CoreError> {
        let fields: Vec<&str> = value.split(',').map(str::trim).collect();
        if fields.len() != 5 {
            return Err(ConfigError::InvalidValue {
                field: "oauth".to_string(),
                value: format!("expected 5 comma-separated fields, got {}", fields.len()),
            }
            .into());
        }

        let credentials = Self {
            client_id: fields[0].to_string(),
            client_secret: fields[1].to_string(),
            password: fields[2].to_string(),
            username: fields[3].to_string(),
            user_agent: fields[4].to_string(),
        };
        credentials.validate()?;
        Ok(credentials)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let raw = std::fs::read_to_string(path)?;
        let credentials: Self = serde_yaml::from_str(&raw).map_err(ConfigError::Parse)?;
        credentials.validate()?;
        Ok(credentials)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("username", &self.username),
            ("password", &self.password),
            ("user_agent", &self.user_agent),
        ];
        for (field, value) in fields {
            if value.is_empty() {
                return Err(ConfigError::MissingField {
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }
}

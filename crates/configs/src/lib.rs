use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub sheets: SheetsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8000 }
    }
}

/// Which tabular backing store the sheet mapping layer talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SheetsBackend {
    #[default]
    File,
    Google,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SheetsConfig {
    #[serde(default)]
    pub backend: SheetsBackend,
    /// Path of the JSON file used by the `file` backend.
    #[serde(default = "default_data_file")]
    pub data_file: String,
    /// Spreadsheet id for the `google` backend.
    #[serde(default)]
    pub spreadsheet_id: String,
    /// Service-account key file for the `google` backend.
    #[serde(default)]
    pub credentials_file: String,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            backend: SheetsBackend::File,
            data_file: default_data_file(),
            spreadsheet_id: String::new(),
            credentials_file: String::new(),
        }
    }
}

fn default_data_file() -> String {
    "data/sheets.json".to_string()
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load from `CONFIG_PATH`/`config.toml`, falling back to defaults when
    /// the file is absent, then apply env-var overrides and validate.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default().unwrap_or_default();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize_from_env();
        self.server.validate()?;
        self.sheets.normalize_from_env();
        self.sheets.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.port = port;
        }
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        Ok(())
    }
}

impl SheetsConfig {
    /// Env vars win over the TOML file; the google credentials keep the
    /// names the original deployment already uses.
    pub fn normalize_from_env(&mut self) {
        if let Ok(backend) = std::env::var("SHEETS_BACKEND") {
            match backend.to_lowercase().as_str() {
                "google" => self.backend = SheetsBackend::Google,
                "file" => self.backend = SheetsBackend::File,
                _ => {}
            }
        }
        if let Ok(path) = std::env::var("SHEETS_DATA_FILE") {
            self.data_file = path;
        }
        if let Ok(id) = std::env::var("GOOGLE_SHEET_ID") {
            self.spreadsheet_id = id;
        }
        if let Ok(path) = std::env::var("GOOGLE_SHEETS_CREDENTIALS_FILE") {
            self.credentials_file = path;
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self.backend {
            SheetsBackend::File => {
                if self.data_file.trim().is_empty() {
                    return Err(anyhow!("sheets.data_file is empty; required for the file backend"));
                }
            }
            SheetsBackend::Google => {
                if self.spreadsheet_id.trim().is_empty() {
                    return Err(anyhow!(
                        "sheets.spreadsheet_id is empty; set it in config.toml or GOOGLE_SHEET_ID"
                    ));
                }
                if self.credentials_file.trim().is_empty() {
                    return Err(anyhow!(
                        "sheets.credentials_file is empty; set it in config.toml or GOOGLE_SHEETS_CREDENTIALS_FILE"
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_file_backend() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.sheets.backend, SheetsBackend::File);
        assert_eq!(cfg.sheets.data_file, "data/sheets.json");
        assert_eq!(cfg.server.port, 8000);
        assert!(cfg.sheets.validate().is_ok());
    }

    #[test]
    fn google_backend_requires_credentials() {
        let cfg = SheetsConfig {
            backend: SheetsBackend::Google,
            data_file: default_data_file(),
            spreadsheet_id: "sheet-123".into(),
            credentials_file: String::new(),
        };
        assert!(cfg.validate().is_err());

        let ok = SheetsConfig { credentials_file: "creds.json".into(), ..cfg };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn toml_round_trip() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [sheets]
            backend = "google"
            spreadsheet_id = "abc"
            credentials_file = "key.json"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.sheets.backend, SheetsBackend::Google);
        assert!(cfg.sheets.validate().is_ok());
    }
}

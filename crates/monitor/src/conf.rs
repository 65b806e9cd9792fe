//! Conf — MonitorConfig and the defaults < file < env < CLI chain.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::args::MonitorArgs;

pub const DEF_BAUD: u32 = 115_200;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub device: String,
    pub baud: u32,
    pub pass_filter: Vec<String>,
    pub token_files: Vec<String>,
    /// Severity coloring; still gated on stdout being a terminal.
    pub color: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            device: String::new(),
            baud: DEF_BAUD,
            pass_filter: Vec::new(),
            token_files: Vec::new(),
            color: true,
        }
    }
}

impl MonitorConfig {
    /// Load configuration, lowest precedence first: defaults, optional TOML
    /// file, environment variables, command-line flags.
    pub fn load(args: &MonitorArgs) -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = std::env::var("TRACETAIL_CONFIG_FILE")
            .unwrap_or_else(|_| "/etc/tracetail/monitor.toml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            tracing::info!("Loading configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            Self::default()
        };

        config.apply_env();
        config.apply_args(args);
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: MonitorConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    fn apply_env(&mut self) {
        self.apply_env_from(|name| std::env::var(name).ok());
    }

    /// Env override layer with the variable lookup injected, so the
    /// precedence chain is testable without touching process environment.
    fn apply_env_from<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(device) = var("TRACETAIL_DEVICE") {
            self.device = device;
        }
        if let Some(baud) = var("TRACETAIL_BAUD") {
            if let Ok(baud) = baud.parse() {
                self.baud = baud;
            }
        }
        if let Some(filter) = var("TRACETAIL_PASS_FILTER") {
            self.pass_filter = split_list(&filter);
        }
        if let Some(files) = var("TRACETAIL_TOKEN_FILES") {
            self.token_files = split_list(&files);
        }
    }

    fn apply_args(&mut self, args: &MonitorArgs) {
        if let Some(device) = &args.device {
            self.device = device.clone();
        }
        if let Some(baud) = args.baud {
            self.baud = baud;
        }
        if let Some(filter) = &args.pass_filter {
            self.pass_filter = split_list(filter);
        }
        if !args.token_files.is_empty() {
            self.token_files = args.token_files.clone();
        }
    }

    /// Validate that the merged configuration can actually drive a run
    pub fn validate(&self) -> Result<(), String> {
        if self.device.is_empty() {
            return Err("serial device must be set (-d/--device)".to_string());
        }
        if self.baud == 0 {
            return Err("baud rate must be > 0".to_string());
        }
        if self.token_files.is_empty() {
            return Err("at least one token definition file is required".to_string());
        }
        Ok(())
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

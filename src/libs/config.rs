//! Configuration management for chronix.
//!
//! The configuration is a JSON file (`config.json`) in the per-OS data
//! directory resolved by [`DataStorage`]. It is split into optional modules,
//! each configured through the interactive `chronix init` wizard:
//!
//! - **Export**: output directory and default workbook layout options
//! - **Data**: default path of the backend snapshot
//!
//! A missing file is not an error: every module falls back to its defaults.
//! `CHRONIX_OUTPUT_DIR` and `CHRONIX_SNAPSHOT` (also read from `.env`)
//! override the stored paths.
//!
//! ```rust,no_run
//! use chronix::libs::config::Config;
//!
//! let config = Config::read()?;
//! let export = config.export_settings();
//! println!("Reports go to {}", export.output_dir.display());
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::workbook::WorkbookOptions;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const OUTPUT_DIR_ENV: &str = "CHRONIX_OUTPUT_DIR";
pub const SNAPSHOT_ENV: &str = "CHRONIX_SNAPSHOT";

#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// Where workbooks are written and how timesheets are laid out.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExportConfig {
    pub output_dir: PathBuf,

    /// Landscape, single-page printing for timesheets.
    pub one_page_landscape: bool,

    /// Header and zebra fills.
    pub with_colors: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DataConfig {
    pub snapshot_path: PathBuf,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<ExportConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<DataConfig>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            output_dir: PathBuf::from("."),
            one_page_landscape: true,
            with_colors: true,
        }
    }
}

impl ExportConfig {
    pub fn workbook_options(&self) -> WorkbookOptions {
        WorkbookOptions {
            apply_print_layout: self.one_page_landscape,
            apply_colors: self.with_colors,
        }
    }
}

impl Config {
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the stored configuration; a missing file is not an error.
    pub fn delete() -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if config_file_path.exists() {
            fs::remove_file(config_file_path)?;
        }
        Ok(())
    }

    /// Export settings with defaults applied and the environment override.
    pub fn export_settings(&self) -> ExportConfig {
        let mut export = self.export.clone().unwrap_or_default();
        if let Ok(dir) = env::var(OUTPUT_DIR_ENV) {
            if !dir.trim().is_empty() {
                export.output_dir = PathBuf::from(dir);
            }
        }
        export
    }

    /// Snapshot path from the environment or the data module.
    pub fn snapshot_path(&self) -> Option<PathBuf> {
        env::var(SNAPSHOT_ENV)
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .or_else(|| self.data.as_ref().map(|data| data.snapshot_path.clone()))
    }

    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();
        let theme = ColorfulTheme::default();

        let modules = vec![
            ConfigModule {
                key: "export".to_string(),
                name: Message::ConfigModuleExport.to_string(),
            },
            ConfigModule {
                key: "data".to_string(),
                name: Message::ConfigModuleData.to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&theme)
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "export" => {
                    let default = config.export.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleExport);
                    config.export = Some(ExportConfig {
                        output_dir: Input::<String>::with_theme(&theme)
                            .with_prompt(Message::PromptOutputDir.to_string())
                            .default(default.output_dir.display().to_string())
                            .interact_text()?
                            .into(),
                        one_page_landscape: Confirm::with_theme(&theme)
                            .with_prompt(Message::PromptOnePageLandscape.to_string())
                            .default(default.one_page_landscape)
                            .interact()?,
                        with_colors: Confirm::with_theme(&theme)
                            .with_prompt(Message::PromptWithColors.to_string())
                            .default(default.with_colors)
                            .interact()?,
                    });
                }
                "data" => {
                    let default = config.data.as_ref().map(|data| data.snapshot_path.display().to_string());
                    msg_print!(Message::ConfigModuleData);
                    let mut input = Input::<String>::with_theme(&theme).with_prompt(Message::PromptSnapshotPath.to_string());
                    if let Some(default) = default {
                        input = input.default(default);
                    }
                    config.data = Some(DataConfig {
                        snapshot_path: input.interact_text()?.into(),
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}

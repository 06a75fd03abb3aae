//! CLI command implementations.

pub mod check;
pub mod cosmetics;
pub mod encode;
pub mod randomize;
pub mod seed;
pub mod show;
pub mod state;
pub mod toggle;

use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tokenflags_config::{ConfigService, Settings, StateStore};
use tokenflags_core::preset::{self, CLASSIC_SIZE, DEFAULT_TOKEN};
use tokenflags_core::{Layout, Panel, Token};
use tokenflags_log::{debug, warn};

use crate::error::{CliError, CliResult};

/// Options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub config: Option<PathBuf>,
    pub layout: Option<PathBuf>,
    pub state: Option<PathBuf>,
    pub quiet: bool,
}

/// Settings, persisted state and the panel for one command run.
pub struct Session {
    pub settings: Settings,
    pub state: StateStore,
    pub panel: Panel,
    classic: bool,
    quiet: bool,
}

impl Session {
    pub fn open(options: &GlobalOptions) -> CliResult<Self> {
        let settings = load_settings(options)?;
        let state = StateStore::open(&settings.state_file)?;
        let (panel, classic) = build_panel(&settings)?;

        Ok(Self {
            settings,
            state,
            panel,
            classic,
            quiet: options.quiet,
        })
    }

    /// Token a fresh session starts from, if the layout has one.
    pub fn default_token(&self) -> Option<&'static str> {
        (self.classic && self.panel.size() == CLASSIC_SIZE).then_some(DEFAULT_TOKEN)
    }

    /// Apply `explicit`, else the stored token, else the default token.
    pub fn load_token(&mut self, explicit: Option<&str>) {
        let token = explicit
            .map(str::to_string)
            .or_else(|| self.state.flags().map(str::to_string))
            .or_else(|| self.default_token().map(str::to_string));

        match token {
            Some(token) => {
                debug!("Applying token {}", token);
                self.panel.apply(&token);
            }
            None => self.panel.reset(),
        }
    }

    /// Encode the panel and remember the token.
    pub fn commit(&mut self) -> CliResult<Token> {
        let token = self.panel.encode();
        self.state.set_flags(token.as_str())?;
        Ok(token)
    }

    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {}", "✓".green().bold(), msg.green());
        }
    }

    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {}", "→".cyan(), msg);
        }
    }

    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {}", "⚠".yellow().bold(), msg.yellow());
        }
    }
}

fn load_settings(options: &GlobalOptions) -> CliResult<Settings> {
    let mut builder = ConfigService::builder().load_dotenv(None).load_env();
    if let Some(ref path) = options.config {
        builder = builder.add_file_auto(path);
    }
    let mut settings = builder.build()?.settings()?;

    if let Some(ref layout) = options.layout {
        settings.layout = Some(layout.clone());
    }
    if let Some(ref state) = options.state {
        settings.state_file = state.clone();
    }
    Ok(settings)
}

fn build_panel(settings: &Settings) -> CliResult<(Panel, bool)> {
    match settings.layout {
        Some(ref path) => {
            let layout = read_layout(path)?;
            if layout.size != settings.flag_bytes {
                warn!(
                    "Layout {} defines {} bytes, ignoring flag_bytes = {}",
                    path.display(),
                    layout.size,
                    settings.flag_bytes
                );
            }
            Ok((layout.build()?, false))
        }
        None => {
            let mut panel = Panel::new(settings.flag_bytes);
            panel.register_all(preset::classic_controls())?;
            Ok((panel, true))
        }
    }
}

/// Read a layout file, TOML when the extension says so, JSON otherwise.
pub fn read_layout(path: &Path) -> CliResult<Layout> {
    let text = fs::read_to_string(path).map_err(|e| {
        CliError::Config(format!("Failed to read layout {}: {}", path.display(), e))
    })?;

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        Ok(toml::from_str(&text)?)
    } else {
        Ok(Layout::from_json(&text)?)
    }
}

/// Split a `KEY=VALUE` assignment.
pub fn parse_assignment(text: &str) -> CliResult<(&str, &str)> {
    match text.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(CliError::InvalidArgument(format!(
            "expected KEY=VALUE, got '{}'",
            text
        ))),
    }
}

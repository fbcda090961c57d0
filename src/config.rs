use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub no_tab_indent: bool,
    pub perf: bool,
    pub autosave_ms: Option<u64>,
    pub download_dir: Option<PathBuf>,
    pub style: Option<String>,
    pub debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            no_tab_indent: self.no_tab_indent || other.no_tab_indent,
            perf: self.perf || other.perf,
            autosave_ms: other.autosave_ms.or(self.autosave_ms),
            download_dir: other
                .download_dir
                .clone()
                .or_else(|| self.download_dir.clone()),
            style: other.style.clone().or_else(|| self.style.clone()),
            debug_log: other.debug_log.clone().or_else(|| self.debug_log.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("textarea").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("textarea")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("textarea").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("textarea")
                .join("config");
        }
    }

    PathBuf::from(".textarearc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".textarearc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(split_line)
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# textarea defaults (saved with --save)".to_string());
    if flags.no_tab_indent {
        lines.push("--no-tab-indent".to_string());
    }
    if let Some(ms) = flags.autosave_ms {
        lines.push(format!("--autosave-ms {ms}"));
    }
    if let Some(dir) = &flags.download_dir {
        lines.push(format!("--download-dir {}", dir.display()));
    }
    if let Some(style) = &flags.style {
        lines.push(format!("--style={style}"));
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(path) = &flags.debug_log {
        lines.push(format!("--debug-log {}", path.display()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--no-tab-indent" {
            flags.no_tab_indent = true;
        } else if token == "--perf" {
            flags.perf = true;
        } else if token == "--autosave-ms" {
            if let Some(next) = tokens.get(i + 1) {
                flags.autosave_ms = next.parse().ok();
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--autosave-ms=") {
            flags.autosave_ms = value.parse().ok();
        } else if token == "--download-dir" {
            if let Some(next) = tokens.get(i + 1) {
                flags.download_dir = Some(PathBuf::from(next));
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--download-dir=") {
            flags.download_dir = Some(PathBuf::from(value));
        } else if token == "--style" {
            if let Some(next) = tokens.get(i + 1) {
                flags.style = Some(next.clone());
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--style=") {
            flags.style = Some(value.to_string());
        } else if token == "--debug-log" {
            if let Some(next) = tokens.get(i + 1) {
                flags.debug_log = Some(PathBuf::from(next));
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--debug-log=") {
            flags.debug_log = Some(PathBuf::from(value));
        }
        i += 1;
    }
    flags
}

/// Split a config line into tokens. `--style=` keeps the rest of the line,
/// since style values contain spaces.
fn split_line(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut rest = line;
    while let Some(start) = rest.find(|c: char| !c.is_whitespace()) {
        rest = &rest[start..];
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let word = &rest[..end];
        if word.starts_with("--style=") {
            tokens.push(rest.trim_end().to_string());
            break;
        }
        tokens.push(word.to_string());
        rest = &rest[end..];
    }
    tokens
}

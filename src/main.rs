//! Textarea - a markdown-aware plain text editor in the terminal.
//!
//! # Usage
//!
//! ```bash
//! textarea
//! textarea '#y0jPSE3...'
//! textarea --no-tab-indent --autosave-ms 1000
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use textarea::app::App;
use textarea::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use textarea::perf;
use textarea::session::DEFAULT_AUTOSAVE_MS;

/// A markdown-aware plain text editor with shareable, compressed documents
#[derive(Parser, Debug)]
#[command(name = "textarea", version, about, long_about = None)]
struct Cli {
    /// Share hash to open instead of the last saved document
    #[arg(value_name = "HASH")]
    hash: Option<String>,

    /// Let Tab and Shift+Tab behave natively on list lines
    #[arg(long)]
    no_tab_indent: bool,

    /// Quiet time before an edit is saved
    #[arg(long, value_name = "MS")]
    autosave_ms: Option<u64>,

    /// Directory for HTML snapshots written with Ctrl+S
    #[arg(long, value_name = "PATH")]
    download_dir: Option<PathBuf>,

    /// Style attribute stored with the document
    #[arg(long, value_name = "STYLE")]
    style: Option<String>,

    /// Enable startup performance logging
    #[arg(long)]
    perf: bool,

    /// Write key handling and session debug events to a file
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    perf::set_enabled(effective.perf);
    let debug_log_path = effective
        .debug_log
        .clone()
        .or_else(|| std::env::var_os("TEXTAREA_DEBUG_LOG").map(PathBuf::from));
    if let Err(err) = perf::set_debug_log_path(debug_log_path.as_deref()) {
        eprintln!(
            "[warn] Failed to initialize debug log {}: {}",
            debug_log_path
                .as_ref()
                .map_or_else(|| "<unset>".to_string(), |p| p.display().to_string()),
            err
        );
    }

    let app = App::new()
        .with_hash(cli.hash)
        .with_tab_indent(!effective.no_tab_indent)
        .with_autosave_delay(effective.autosave_ms.unwrap_or(DEFAULT_AUTOSAVE_MS))
        .with_style(effective.style)
        .with_download_dir(effective.download_dir.unwrap_or_else(|| PathBuf::from(".")));

    let hash = app.run().context("Application error")?;
    if perf::is_enabled() {
        let (intercepted, native) = perf::structural_key_counts();
        eprintln!("[perf] structural keys: {intercepted} intercepted, {native} native");
    }
    if !hash.is_empty() {
        println!("{hash}");
    }
    Ok(())
}

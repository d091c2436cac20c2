mod app;
mod cli;
mod ui;

use peer_forms::activity;
use peer_forms::config::Config;
use peer_forms::display::{format_duration, SlotDisplay};
use peer_forms::form::{mask_text, FormSession};
use peer_forms::utils::paths::{get_config_path, get_logs_dir};

use anyhow::{bail, Context, Result};
use app::AppState;
use clap::Parser;
use cli::{ActivityCommand, Cli, Commands};
use peer_settings::{
    blank_config, FieldView, PeerConfig, PeerKind, PostgresConfig, SettingTarget, SshConfig,
};
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::Path;
use ui::theme::Theme;

/// Initialize file-based logging for the terminal form.
///
/// Logs are written to ~/.local/share/peer-forms/logs/peerform.log, rolled
/// daily. Log level can be controlled with RUST_LOG (default: info).
fn init_file_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let logs_dir = get_logs_dir().ok()?;

    if let Err(e) = fs::create_dir_all(&logs_dir) {
        eprintln!("Warning: Could not create logs directory: {}", e);
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "peerform.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false) // No ANSI colors in log files
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    Some(guard)
}

/// Plain commands log warnings and above to stderr so stdout stays clean
/// for piping.
fn init_stderr_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    // Guard must be kept alive for the duration of the app
    let _log_guard = if matches!(cli.command, Commands::Edit { .. }) {
        init_file_logging()
    } else {
        init_stderr_logging();
        None
    };

    match cli.command {
        Commands::Schema { kind, json } => handle_schema(kind, json)?,
        Commands::Blank { kind, output } => {
            write_output(&blank_config(kind).to_json_pretty()?, output.as_deref())?;
        }
        Commands::Set {
            kind,
            fields,
            input,
            output,
        } => handle_set(kind, &fields, input.as_deref(), output.as_deref())?,
        Commands::Show {
            kind,
            input,
            reveal,
        } => handle_show(kind, &input, reveal || !config.mask_secrets)?,
        Commands::ConnString { input } => handle_conn_string(&input)?,
        Commands::Duration { seconds } => println!("{}", format_duration(seconds)),
        Commands::Slot { slot_name, open } => handle_slot(&slot_name, open, &config)?,
        Commands::Activity { command } => handle_activity(command)?,
        Commands::Config { init } => handle_config(&config, init)?,
        Commands::Edit {
            kind,
            input,
            output,
        } => {
            tracing::info!(%kind, "peerform starting");
            handle_edit(kind, input.as_deref(), output.as_deref(), &config)?;
        }
    }

    Ok(())
}

fn load_peer(kind: PeerKind, path: &Path) -> Result<PeerConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read peer config: {}", path.display()))?;
    PeerConfig::from_json(kind, &text)
        .with_context(|| format!("Failed to parse {} config: {}", kind, path.display()))
}

fn write_output(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, format!("{}\n", text))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn handle_schema(kind: PeerKind, json: bool) -> Result<()> {
    let fields = blank_config(kind).describe();

    if json {
        println!("{}", serde_json::to_string_pretty(&fields)?);
        return Ok(());
    }

    let rows: Vec<Vec<String>> = fields
        .iter()
        .map(|field| {
            vec![
                field.label.to_string(),
                field.key.to_string(),
                field.input.clone(),
                if field.optional { "yes" } else { "" }.to_string(),
                field.placeholder.clone().unwrap_or_default(),
            ]
        })
        .collect();

    println!("{}", kind.title());
    println!();
    print!(
        "{}",
        activity::render_table(&["Label", "Key", "Input", "Optional", "Placeholder"], &rows)
    );
    Ok(())
}

/// Split `NAME=VALUE` at the first `=`; the value may itself contain `=`.
fn parse_assignment(assignment: &str) -> Result<(&str, &str)> {
    match assignment.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value)),
        _ => bail!("Expected NAME=VALUE, got '{}'", assignment),
    }
}

fn handle_set(
    kind: PeerKind,
    fields: &[String],
    input: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let mut config = match input {
        Some(path) => load_peer(kind, path)?,
        None => blank_config(kind),
    };

    for assignment in fields {
        let (name, value) = parse_assignment(assignment)?;
        let Some(updated) = config.set(name, value) else {
            bail!("{} has no field named '{}'", kind.title(), name);
        };
        tracing::debug!(field = name, "applied edit");
        config = updated;
    }

    write_output(&config.to_json_pretty()?, output)
}

fn shown_value(field: &FieldView, mask: bool) -> String {
    if mask && field.masked {
        mask_text(&field.value)
    } else {
        field.value.clone()
    }
}

fn handle_show(kind: PeerKind, input: &Path, reveal: bool) -> Result<()> {
    let config = load_peer(kind, input)?;

    let rows: Vec<Vec<String>> = config
        .describe()
        .iter()
        .map(|field| vec![field.label.to_string(), shown_value(field, !reveal)])
        .collect();

    print!("{}", activity::render_table(&["Field", "Value"], &rows));
    Ok(())
}

fn handle_edit(
    kind: PeerKind,
    input: Option<&Path>,
    output: Option<&Path>,
    config: &Config,
) -> Result<()> {
    match kind {
        PeerKind::Postgres => edit_peer::<PostgresConfig>(input, output, config),
        PeerKind::Ssh => edit_peer::<SshConfig>(input, output, config),
    }
}

fn edit_peer<C>(input: Option<&Path>, output: Option<&Path>, config: &Config) -> Result<()>
where
    C: SettingTarget + Serialize + DeserializeOwned,
{
    let initial = match input {
        Some(path) => load_record::<C>(path)?,
        None => C::blank(),
    };

    let state = AppState::new(
        FormSession::with_config(initial),
        Theme::from_config(config),
        config.mask_secrets,
    );

    match ui::run_form(state)? {
        Some(submitted) => {
            tracing::info!("form submitted");
            write_output(&serde_json::to_string_pretty(&submitted)?, output)
        }
        None => {
            tracing::info!("form cancelled");
            eprintln!("Cancelled, nothing written.");
            Ok(())
        }
    }
}

/// Load one record type directly, without going through `PeerConfig`.
fn load_record<C: DeserializeOwned>(path: &Path) -> Result<C> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read peer config: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse peer config: {}", path.display()))
}

fn connection_url(input: &Path) -> Result<String> {
    let config: PostgresConfig = load_record(input)?;
    let Some(url) = config.connection_string() else {
        bail!("Port is not a number in {}", input.display());
    };
    Ok(url)
}

fn handle_conn_string(input: &Path) -> Result<()> {
    println!("{}", connection_url(input)?);
    Ok(())
}

fn handle_slot(slot_name: &str, open: bool, config: &Config) -> Result<()> {
    let slot = SlotDisplay::classify(slot_name);

    println!("Slot:   {}", slot.label());
    match slot.href() {
        Some(href) => {
            println!("Mirror: {}", slot.flow_name());
            println!("Link:   {}", href);
        }
        None => println!("Mirror: (none)"),
    }

    if open {
        let Some(url) = slot.url(&config.ui_url)? else {
            bail!("Slot '{}' is not linked to a mirror", slot_name);
        };
        open::that(url.as_str()).with_context(|| format!("Failed to open {}", url))?;
        println!("Opened {}", url);
    }
    Ok(())
}

fn handle_config(config: &Config, init: bool) -> Result<()> {
    let path = get_config_path()?;
    if init {
        config.save()?;
        eprintln!("Wrote {}", path.display());
    } else {
        println!("# {}", path.display());
    }
    print!("{}", config.to_toml()?);
    Ok(())
}

fn handle_activity(command: ActivityCommand) -> Result<()> {
    let table = match command {
        ActivityCommand::Slots { file } => {
            let slots = activity::load_slots(&file)?;
            activity::render_table(&activity::SLOT_HEADERS, &activity::slot_rows(&slots))
        }
        ActivityCommand::Stats { file } => {
            let stats = activity::load_stats(&file)?;
            activity::render_table(&activity::STAT_HEADERS, &activity::stat_rows(&stats))
        }
    };
    print!("{}", table);
    Ok(())
}

//! Entry point for mlx_cockpit. Parses args, applies settings, and runs the App.

use std::{env, path::PathBuf, time::Duration};

use mlx_cockpit::app::{App, DEFAULT_INTERVAL};
use mlx_cockpit::opener::SystemOpener;
use mlx_cockpit::reconcile::DisplayState;
use mlx_cockpit::render::{render, to_svg};
use mlx_cockpit::settings::SettingsStore;
use mlx_cockpit::snapshot::parse_snapshot;
use mlx_cockpit::source::Source;
use mlx_cockpit::{logging, theme};

const USAGE: &str = "[--command CMD|-c CMD] [--file PATH|-f PATH] [--theme NAME|-T NAME] [--interval MS|-i MS] [--svg]";

struct ParsedArgs {
    command: Option<String>,
    file: Option<PathBuf>,
    theme: Option<String>,
    interval_ms: Option<u64>,
    svg: bool,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, String> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "mlx_cockpit".into());
    let mut command: Option<String> = None;
    let mut file: Option<PathBuf> = None;
    let mut theme: Option<String> = None;
    let mut interval: Option<String> = None;
    let mut svg = false; // --svg

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                return Err(format!("Usage: {prog} {USAGE}"));
            }
            "--command" | "-c" => {
                command = it.next();
            }
            "--file" | "-f" => {
                file = it.next().map(PathBuf::from);
            }
            "--theme" | "-T" => {
                theme = it.next();
            }
            "--interval" | "-i" => {
                interval = it.next();
            }
            "--svg" => {
                svg = true;
            }
            _ if arg.starts_with("--theme=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    if !v.is_empty() {
                        theme = Some(v.to_string());
                    }
                }
            }
            _ if arg.starts_with("--interval=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    interval = Some(v.to_string());
                }
            }
            _ => {
                return Err(format!(
                    "Unexpected argument '{arg}'. Usage: {prog} {USAGE}"
                ));
            }
        }
    }

    let interval_ms = match interval {
        Some(v) => match v.parse::<u64>() {
            Ok(ms) if ms > 0 => Some(ms),
            _ => return Err(format!("Invalid interval '{v}': expected milliseconds > 0")),
        },
        None => None,
    };

    Ok(ParsedArgs {
        command,
        file,
        theme,
        interval_ms,
        svg,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let parsed = match parse_args(env::args()) {
        Ok(v) => v,
        Err(msg) => {
            eprintln!("{msg}");
            return Ok(());
        }
    };
    let _log_guard = logging::init(!parsed.svg);

    let store = SettingsStore::default();

    if let Some(name) = parsed.theme.as_deref() {
        if !theme::is_known(name) {
            let known: Vec<&str> = theme::theme_keys().collect();
            eprintln!("Unknown theme '{name}'. Available: {}", known.join(", "));
            return Ok(());
        }
    }
    // Remember explicit choices for the next launch
    if parsed.theme.is_some() || parsed.command.is_some() || parsed.interval_ms.is_some() {
        let saved = store.update(|s| {
            if let Some(t) = &parsed.theme {
                s.theme = Some(t.clone());
            }
            if let Some(c) = &parsed.command {
                s.command = Some(c.clone());
            }
            if let Some(ms) = parsed.interval_ms {
                s.interval_ms = Some(ms);
            }
        });
        if let Err(e) = saved {
            tracing::warn!(error = %e, "could not save settings");
        }
    }

    let settings = store.load();
    let source = match (parsed.file, parsed.command.or(settings.command)) {
        (Some(path), _) => Source::File(path),
        (None, Some(cmd)) => Source::Command(cmd),
        (None, None) => {
            eprintln!("No discovery source: pass --command CMD or --file PATH.");
            return Ok(());
        }
    };
    let interval = parsed
        .interval_ms
        .or(settings.interval_ms)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_INTERVAL);

    if parsed.svg {
        let raw = source.fetch().await.unwrap_or_default();
        let theme = theme::resolve(&store);
        let models = DisplayState::new().reconcile(&parse_snapshot(&raw).services, &theme);
        print!("{}", to_svg(&render(&models, &theme), &theme));
        return Ok(());
    }

    let mut app = App::new(store, SystemOpener, interval);
    app.run(&source).await
}

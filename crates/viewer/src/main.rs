use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use mech_viewer_lib::command::{execute_json, execute_json_batch, CommandResponse};
use mech_viewer_lib::harness::ViewerHarness;
use mech_viewer_lib::settings::ViewerSettings;
use shared::MechSchema;

struct Args {
    schema: Option<PathBuf>,
    settings: Option<PathBuf>,
    script: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mech_viewer_lib=info,mech_viewer=info".into()),
        )
        .init();

    let args = parse_args();
    let schema = args
        .schema
        .as_deref()
        .and_then(load_schema)
        .unwrap_or_default();
    let settings = match args.settings.as_deref() {
        Some(path) => ViewerSettings::load_from(path).unwrap_or_else(|e| {
            tracing::error!("Failed to load settings from {}: {e}", path.display());
            ViewerSettings::default()
        }),
        None => ViewerSettings::load(),
    };

    let mut harness = match ViewerHarness::with_schema(&schema, settings) {
        Ok(h) => h,
        Err(e) => {
            tracing::error!("Failed to start viewer: {e}");
            std::process::exit(1);
        }
    };
    harness.machine.on_event(|event| tracing::info!("{event:?}"));

    match args.script {
        Some(path) => run_script(&mut harness, &path),
        None => run_stdin(&mut harness),
    }
}

fn parse_args() -> Args {
    let mut args = Args {
        schema: None,
        settings: None,
        script: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        let slot = match arg.as_str() {
            "--schema" => &mut args.schema,
            "--settings" => &mut args.settings,
            "--script" => &mut args.script,
            other => {
                tracing::warn!("Ignoring unknown argument {other}");
                continue;
            }
        };
        match iter.next() {
            Some(value) => *slot = Some(PathBuf::from(value)),
            None => tracing::warn!("{arg} needs a path"),
        }
    }
    args
}

fn load_schema(path: &Path) -> Option<MechSchema> {
    match std::fs::read_to_string(path) {
        Ok(json) => match serde_json::from_str::<MechSchema>(&json) {
            Ok(schema) => {
                tracing::info!(
                    "Loaded schema '{}' from {} ({} parts)",
                    schema.name,
                    path.display(),
                    schema.major_count()
                );
                Some(schema)
            }
            Err(e) => {
                tracing::error!("Failed to parse schema JSON from {}: {e}", path.display());
                None
            }
        },
        Err(e) => {
            tracing::error!("Failed to read schema file {}: {e}", path.display());
            None
        }
    }
}

/// Run a JSON array of commands and print every response
fn run_script(harness: &mut ViewerHarness, path: &Path) {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to read script {}: {e}", path.display());
            std::process::exit(1);
        }
    };
    match execute_json_batch(harness, &json) {
        Ok(responses) => {
            for response in &responses {
                print_response(response);
            }
        }
        Err(e) => {
            print_response(&CommandResponse::err(e));
            std::process::exit(1);
        }
    }
}

/// One JSON command per line until EOF
fn run_stdin(harness: &mut ViewerHarness) {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Failed to read stdin: {e}");
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let response = execute_json(harness, line).unwrap_or_else(CommandResponse::err);
        print_response(&response);
    }
}

fn print_response(response: &CommandResponse) {
    match serde_json::to_string(response) {
        Ok(json) => {
            let mut out = std::io::stdout().lock();
            if let Err(e) = writeln!(out, "{json}") {
                tracing::error!("Failed to write response: {e}");
            }
        }
        Err(e) => tracing::error!("Failed to serialize response: {e}"),
    }
}

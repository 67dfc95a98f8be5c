use std::backtrace::Backtrace;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::{env, panic};

use chrono::Local;
use tracing::metadata::LevelFilter;
use tracing::{Metadata, Subscriber};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{filter, fmt, Layer, Registry};

use crate::model::config::Config;
use crate::model::errors::{core_err_unexpected, SketchResult, Unexpected};

pub static LOG_FILE: &str = "scribble.log";

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// Installs the global subscriber: `scribble.log` under the writeable path, plus stdout when the
/// config asks for it. Only events from `scribble*` targets are kept.
pub fn init(config: &Config) -> SketchResult<()> {
    if !config.logs {
        return Ok(());
    }

    fs::create_dir_all(&config.writeable_path).map_unexpected()?;

    let level = level_filter(env::var("LOG_LEVEL").ok().as_deref());
    let file = tracing_appender::rolling::never(&config.writeable_path, LOG_FILE);

    let mut layers: Vec<BoxedLayer<Registry>> = vec![layer(file, level, false)];
    if config.stdout_logs {
        layers.push(layer(io::stdout, level, config.colored_logs));
    }

    tracing::subscriber::set_global_default(Registry::default().with(layers))
        .map_err(core_err_unexpected)?;
    panic_capture(config);

    info!(path = %config.writeable_path, ?level, "logging started");
    Ok(())
}

fn level_filter(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|s| s.parse().ok())
        .unwrap_or(LevelFilter::DEBUG)
}

/// Covers the library (`scribble_rs`) and its clients (`scribble_cli`).
fn ours(metadata: &Metadata) -> bool {
    metadata.target().starts_with("scribble")
}

fn layer<S, W>(writer: W, level: LevelFilter, ansi: bool) -> BoxedLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::Layer::new()
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .with_ansi(ansi)
        .with_target(true)
        .with_writer(writer)
        .with_filter(level)
        .with_filter(filter::filter_fn(ours))
        .boxed()
}

fn panic_capture(config: &Config) {
    let path = config.writeable_path.clone();
    panic::set_hook(Box::new(move |panic_info| {
        let bt = Backtrace::force_capture();
        error!("panic detected: {panic_info} {bt}");
        eprintln!("panic detected and logged: {panic_info} {bt}");
        let timestamp = Local::now().format("%Y-%m-%d---%H-%M-%S");
        let file_name = format!("{path}/scribble-panic-{timestamp}.log");
        let content = format!("INFO: {panic_info}\nBT: {bt}");

        match OpenOptions::new().create(true).append(true).open(&file_name) {
            Ok(mut file) => {
                if let Err(err) = file.write_all(content.as_bytes()) {
                    eprintln!("could not write {file_name}: {err}");
                }
            }
            Err(err) => eprintln!("could not open {file_name}: {err}"),
        }
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_defaults_to_debug() {
        assert_eq!(level_filter(None), LevelFilter::DEBUG);
        assert_eq!(level_filter(Some("nonsense")), LevelFilter::DEBUG);
        assert_eq!(level_filter(Some("warn")), LevelFilter::WARN);
        assert_eq!(level_filter(Some("off")), LevelFilter::OFF);
    }
}

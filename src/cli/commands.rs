use crate::cli::args::{Cli, Commands};
use crate::dashboard::Dashboard;
use crate::models::{BasemapType, InstrumentType, Notice, NoticeLevel, SelectionQuery};
use crate::processors::{province_options, MarkerBuilder, MarkerOutcome};
use crate::readers::DatasetReader;
use crate::server::{page::render_page, run_server};
use crate::settings::Settings;
use crate::utils::filename::default_render_filename;
use anyhow::{Context, Result};
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let mut settings =
        Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    if let Some(root) = cli.root {
        settings = settings.with_root(root);
    }

    match cli.command {
        Commands::Serve {
            host,
            port,
            workers,
        } => {
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }
            if let Some(workers) = workers {
                settings.server.workers = workers.max(1);
            }

            println!(
                "Dashboard available at http://{}:{}/",
                settings.server.host, settings.server.port
            );
            run_server(settings).await?;
        }

        Commands::Render {
            instrument,
            basemap,
            province,
            output,
        } => {
            let report = render_to_file(&settings, instrument, basemap, province, output)?;

            for notice in &report.notices {
                println!("{} {}", notice_marker(notice.level), notice.message);
            }
            info!(
                output = %report.output.display(),
                markers = report.markers,
                "Rendered dashboard page"
            );
            println!(
                "Wrote {} ({} markers, {} rows skipped)",
                report.output.display(),
                report.markers,
                report.skipped_markers
            );
        }

        Commands::Stations { instrument } => {
            print!("{}", StationSummary::collect(&settings, instrument));
        }
    }

    Ok(())
}

/// What one `render` invocation wrote and reported.
#[derive(Debug)]
pub struct RenderReport {
    pub output: PathBuf,
    pub notices: Vec<Notice>,
    pub markers: usize,
    pub skipped_markers: usize,
}

/// Run one render pass and write the page. Without `output`, the page goes to
/// `<prefix>_<INSTRUMENT>.html` under the settings root.
pub fn render_to_file(
    settings: &Settings,
    instrument: InstrumentType,
    basemap: BasemapType,
    province: Option<String>,
    output: Option<PathBuf>,
) -> Result<RenderReport> {
    let view = Dashboard::from_settings(settings).render(&SelectionQuery {
        instrument: Some(instrument.code().to_string()),
        basemap: Some(basemap.code().to_string()),
        province,
    });

    let output =
        output.unwrap_or_else(|| settings.root.join(default_render_filename(basemap, instrument)));
    let href = view.asset.path.to_string_lossy().into_owned();
    std::fs::write(&output, render_page(&view, &href))
        .with_context(|| format!("Failed to write {}", output.display()))?;

    Ok(RenderReport {
        output,
        notices: view.notices.into_iter().chain(view.asset_notice).collect(),
        markers: view.dataset.markers,
        skipped_markers: view.dataset.skipped_markers,
    })
}

/// Dataset overview printed by the `stations` command.
#[derive(Debug)]
pub struct StationSummary {
    pub path: PathBuf,
    pub error: Option<String>,
    pub rows: usize,
    pub skipped_lines: usize,
    pub provinces: Vec<String>,
    pub markers: MarkerOutcome,
}

impl StationSummary {
    pub fn collect(settings: &Settings, instrument: InstrumentType) -> Self {
        let load = DatasetReader::new(settings.data_path()).load(instrument);
        let markers = MarkerBuilder::new().build(&load.dataset);

        Self {
            error: load.notice().map(|notice| notice.message),
            rows: load.dataset.len(),
            skipped_lines: load.skipped_lines,
            provinces: province_options(&load.dataset),
            markers,
            path: load.path,
        }
    }
}

impl fmt::Display for StationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dataset: {}", self.path.display())?;
        if let Some(error) = &self.error {
            return writeln!(f, "{}", error);
        }

        writeln!(f, "Rows: {}", self.rows)?;
        writeln!(f, "Malformed lines skipped: {}", self.skipped_lines)?;
        writeln!(f, "Provinces ({}):", self.provinces.len())?;
        for province in &self.provinces {
            writeln!(f, "  {}", province)?;
        }

        match &self.markers {
            MarkerOutcome::Markers(batch) => writeln!(
                f,
                "Markers: {} placed, {} rows without a valid position or name",
                batch.markers.len(),
                batch.skipped
            ),
            MarkerOutcome::MissingColumns(missing) => {
                writeln!(f, "Missing required columns: {}", missing.join(", "))
            }
            MarkerOutcome::Empty => writeln!(f, "No rows to place"),
        }
    }
}

fn notice_marker(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Error => "✗",
        NoticeLevel::Warning => "⚠️ ",
        NoticeLevel::Info => "ℹ",
        NoticeLevel::Success => "✅",
    }
}

fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let default_level = if verbose { "station_map=debug,info" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .init();
        }
    }

    Ok(())
}

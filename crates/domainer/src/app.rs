//! Run orchestration
//!
//! select source -> load -> (filter -> print/save -> optional advisory).
//! Collaborators come in as trait objects so a full run can be driven
//! without network access.

use crate::cli::Cli;
use crate::presenter::{self, Presenter};
use chrono::NaiveDate;
use domainer_common::{
    analyze_domains, available_on, AdvisoryBackend, DataSource, DomainerConfig, DomainerError,
    FeedFetcher, HttpFeedFetcher, OpenAiAdvisoryClient, UnavailableBackend, UnavailableFetcher,
};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, warn};

/// What the user asked this run to do
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub date: Option<NaiveDate>,
    pub refresh: bool,
}

impl From<&Cli> for Query {
    fn from(cli: &Cli) -> Self {
        Self {
            date: cli.date,
            refresh: cli.refresh,
        }
    }
}

/// What a run did, for callers and tests
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub downloaded: bool,
    pub records: usize,
    pub matches: Vec<String>,
    pub output_file: Option<PathBuf>,
    pub analysis: Option<String>,
}

/// Load configuration and apply command-line overrides
pub fn load_config(cli: &Cli) -> Result<DomainerConfig, DomainerError> {
    let mut config = DomainerConfig::load(cli.config.as_deref())
        .map_err(|e| DomainerError::Config(format!("{:#}", e)))?;

    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }

    debug!("Using data directory {}", config.data_dir().display());
    Ok(config)
}

/// Build the feed fetcher. A client that cannot be built only fails a run
/// that actually needs to download.
pub fn build_fetcher(config: &DomainerConfig) -> Box<dyn FeedFetcher> {
    match HttpFeedFetcher::new(config.http_timeout_secs) {
        Ok(fetcher) => Box::new(fetcher),
        Err(e) => {
            warn!("Feed client unavailable: {}", e);
            Box::new(UnavailableFetcher(e))
        }
    }
}

/// Build the advisory backend. Construction failures are deferred to call time.
pub fn build_advisor(config: &DomainerConfig) -> Box<dyn AdvisoryBackend> {
    match OpenAiAdvisoryClient::new(config.advisory.clone()) {
        Ok(client) => Box::new(client),
        Err(e) => {
            warn!("Advisory client unavailable: {}", e);
            Box::new(UnavailableBackend(e))
        }
    }
}

/// Execute one run.
///
/// `advisor` is `Some` only when an analysis was requested; it is consulted
/// only if the date query matched at least one domain.
pub fn run<W: Write>(
    config: &DomainerConfig,
    query: &Query,
    fetcher: &dyn FeedFetcher,
    advisor: Option<&dyn AdvisoryBackend>,
    presenter: &mut Presenter<W>,
) -> Result<RunSummary, DomainerError> {
    let source = DataSource::select(config, query.refresh);
    let dataset = source.load(fetcher)?;
    let records = dataset.records;

    let mut summary = RunSummary {
        downloaded: dataset.downloaded,
        records: records.len(),
        ..Default::default()
    };

    let Some(date) = query.date else {
        presenter.cache_ready()?;
        return Ok(summary);
    };

    let matches = available_on(&records, date);
    if matches.is_empty() {
        presenter.no_matches(date)?;
        return Ok(summary);
    }

    presenter.matches(date, &matches)?;

    let output_path = config.output_path(date);
    if presenter::save_matches(&output_path, &matches) {
        summary.output_file = Some(output_path);
    }

    if let Some(backend) = advisor {
        presenter.analysis_started()?;
        let analysis = analyze_domains(backend, &matches);
        presenter.analysis(&matches, &analysis)?;
        summary.analysis = Some(analysis);
    }

    summary.matches = matches;
    Ok(summary)
}

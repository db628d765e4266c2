//! Dataset source selection
//!
//! A run either reads the local cache or downloads the feed and writes the
//! cache. The choice is made once, up front.

use crate::cache::CacheFile;
use crate::config::DomainerConfig;
use crate::error::DomainerError;
use crate::fetch::FeedFetcher;
use crate::parser::parse_feed;
use crate::record::{sort_by_date, DomainRecord};
use tracing::{error, info, warn};

/// Where this run's records come from
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Cache file exists; the feed is not contacted
    Cache(CacheFile),
    /// Download the feed, then write the cache.
    ///
    /// `fallback` is set when a cache already existed (forced refresh); it is
    /// read instead if the download fails.
    Remote {
        url: String,
        cache: CacheFile,
        fallback: Option<CacheFile>,
    },
}

/// Date-sorted records plus where they actually came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub records: Vec<DomainRecord>,
    pub downloaded: bool,
}

impl DataSource {
    /// Pick the cache when present, unless `refresh` forces a download
    pub fn select(config: &DomainerConfig, refresh: bool) -> Self {
        let cache = CacheFile::new(config.cache_path());

        if !cache.exists() {
            return DataSource::Remote {
                url: config.feed_url.clone(),
                cache,
                fallback: None,
            };
        }

        if refresh {
            DataSource::Remote {
                url: config.feed_url.clone(),
                fallback: Some(cache.clone()),
                cache,
            }
        } else {
            DataSource::Cache(cache)
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, DataSource::Remote { .. })
    }

    /// Produce the date-sorted records for this run.
    ///
    /// Remote: a download failure is fatal only without a fallback cache; an
    /// empty parse is fatal; failing to write the cache is logged and the
    /// in-memory records are still returned.
    /// Cache: unreadable files and bad rows are logged and skipped.
    pub fn load(&self, fetcher: &dyn FeedFetcher) -> Result<Dataset, DomainerError> {
        match self {
            DataSource::Cache(cache) => Ok(load_cache(cache)),
            DataSource::Remote {
                url,
                cache,
                fallback,
            } => {
                info!("Downloading and processing domain data...");
                let body = match (fetcher.fetch(url), fallback) {
                    (Ok(body), _) => body,
                    (Err(e), Some(existing)) => {
                        warn!("Download failed ({}); keeping existing cache", e);
                        return Ok(load_cache(existing));
                    }
                    (Err(e), None) => return Err(e.into()),
                };

                let outcome = parse_feed(&body);
                if outcome.is_empty() {
                    return Err(DomainerError::NoValidEntries);
                }
                info!(
                    "Parsed {} entries ({} skipped)",
                    outcome.records.len(),
                    outcome.skipped.len()
                );

                let records = sort_by_date(outcome.records);
                if let Err(e) = cache.save(&records) {
                    error!("Error writing to file: {:#}", e);
                }
                Ok(Dataset {
                    records,
                    downloaded: true,
                })
            }
        }
    }
}

fn load_cache(cache: &CacheFile) -> Dataset {
    info!("Loading sorted data from {}...", cache.path().display());
    let outcome = cache.load();
    info!(
        "Loaded {} entries ({} skipped)",
        outcome.records.len(),
        outcome.skipped.len()
    );

    Dataset {
        records: sort_by_date(outcome.records),
        downloaded: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{FakeFeedFetcher, FetchError};
    use tempfile::TempDir;

    const FEED: &str = "example.se\t2024-01-10\nfoo.se\t2024-01-05\nbad-line\nbar.se\tNOTADATE\n";

    fn config_in(dir: &TempDir) -> DomainerConfig {
        DomainerConfig {
            data_dir: Some(dir.path().to_path_buf()),
            feed_url: "http://feed.test/bardate_domains.txt".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_select_remote_without_cache() {
        let temp_dir = TempDir::new().unwrap();
        let source = DataSource::select(&config_in(&temp_dir), false);
        assert!(source.is_remote());
    }

    #[test]
    fn test_select_cache_when_present() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir);
        std::fs::write(config.cache_path(), "domain, date\n").unwrap();

        assert!(!DataSource::select(&config, false).is_remote());
        assert!(DataSource::select(&config, true).is_remote());
    }

    #[test]
    fn test_remote_load_sorts_and_writes_cache() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir);
        let fetcher = FakeFeedFetcher::with_body(FEED);

        let dataset = DataSource::select(&config, false).load(&fetcher).unwrap();
        let records = dataset.records;

        assert!(dataset.downloaded);
        assert_eq!(fetcher.requested(), vec![config.feed_url.clone()]);
        let rendered: Vec<String> = records.iter().map(|r| r.to_string()).collect();
        assert_eq!(rendered, vec!["foo.se/2024-01-05", "example.se/2024-01-10"]);

        let cached = std::fs::read_to_string(config.cache_path()).unwrap();
        assert_eq!(cached, "domain, date\nfoo.se, 2024-01-05\nexample.se, 2024-01-10\n");
    }

    #[test]
    fn test_second_run_uses_cache() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir);

        let first = DataSource::select(&config, false)
            .load(&FakeFeedFetcher::with_body(FEED))
            .unwrap();

        let fetcher = FakeFeedFetcher::failing(FetchError::Transport("offline".to_string()));
        let second = DataSource::select(&config, false).load(&fetcher).unwrap();

        assert_eq!(first.records, second.records);
        assert!(!second.downloaded);
        assert_eq!(fetcher.call_count(), 0);
    }

    #[test]
    fn test_refresh_failure_falls_back_to_cache() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir);

        let first = DataSource::select(&config, false)
            .load(&FakeFeedFetcher::with_body(FEED))
            .unwrap();

        let fetcher = FakeFeedFetcher::failing(FetchError::Transport("offline".to_string()));
        let source = DataSource::select(&config, true);
        assert!(source.is_remote());

        let refreshed = source.load(&fetcher).unwrap();
        assert_eq!(fetcher.call_count(), 1);
        assert!(!refreshed.downloaded);
        assert_eq!(refreshed.records, first.records);

        let cached = std::fs::read_to_string(config.cache_path()).unwrap();
        assert_eq!(cached, "domain, date\nfoo.se, 2024-01-05\nexample.se, 2024-01-10\n");
    }

    #[test]
    fn test_download_failure_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let fetcher = FakeFeedFetcher::failing(FetchError::Status {
            status: 404,
            url: "http://feed.test/bardate_domains.txt".to_string(),
        });

        let result = DataSource::select(&config_in(&temp_dir), false).load(&fetcher);
        assert!(matches!(result, Err(DomainerError::Download(_))));
    }

    #[test]
    fn test_empty_feed_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir);
        let fetcher = FakeFeedFetcher::with_body("bad-line\nbar.se\tNOTADATE\n");

        let result = DataSource::select(&config, false).load(&fetcher);
        assert!(matches!(result, Err(DomainerError::NoValidEntries)));
        assert!(!config.cache_path().exists());
    }

    #[test]
    fn test_cache_write_failure_is_not_fatal() {
        let temp_dir = TempDir::new().unwrap();
        // Cache path is an existing directory, so the write fails
        let source = DataSource::Remote {
            url: "http://feed.test".to_string(),
            cache: CacheFile::new(temp_dir.path()),
            fallback: None,
        };

        let dataset = source.load(&FakeFeedFetcher::with_body(FEED)).unwrap();
        assert_eq!(dataset.records.len(), 2);
    }

    #[test]
    fn test_unreadable_cache_yields_empty() {
        let temp_dir = TempDir::new().unwrap();
        let source = DataSource::Cache(CacheFile::new(temp_dir.path()));

        let dataset = source.load(&FakeFeedFetcher::with_body(FEED)).unwrap();
        assert!(dataset.records.is_empty());
    }
}

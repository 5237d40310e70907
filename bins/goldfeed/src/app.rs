//! Component wiring shared by `start` and `scrape`

use advisor::{
    Advisor, GeminiClient, GeminiSettings, MarketSummaryRefresher, SummaryStore, TextGenerator,
    UnconfiguredGenerator,
};
use anyhow::{Context, Result};
use config::{GoldfeedConfig, ScheduleConfig};
use price_feed::{
    CacheStore, DailySchedule, FeedSettings, HttpPageSource, RefreshOrchestrator, RefreshWorker,
    WorkerSettings,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Stores, refresh jobs and the advisor built from one configuration
pub struct Components {
    pub prices: Arc<CacheStore>,
    pub summaries: Arc<SummaryStore>,
    pub orchestrator: Arc<RefreshOrchestrator>,
    /// `None` when `ai.market_summary_enabled` is off
    pub summary: Option<Arc<MarketSummaryRefresher>>,
    pub advisor: Advisor,
}

impl Components {
    pub fn build(config: &GoldfeedConfig) -> Result<Self> {
        let prices = Arc::new(CacheStore::default());
        let summaries = Arc::new(SummaryStore::default());

        let source = HttpPageSource::new(
            &config.source.user_agent,
            Duration::from_secs(config.source.timeout_seconds),
        )
        .context("Failed to build page source")?;

        let feed = FeedSettings {
            source_url: config.source.url.clone(),
            row_selector: config.source.row_selector.clone(),
            target_label: config.source.target_label.clone(),
        };
        let orchestrator = RefreshOrchestrator::new(feed, Arc::new(source), Arc::clone(&prices))
            .context("Invalid source.row_selector")?;

        let generator = build_generator(config)?;
        let summary = config.ai.market_summary_enabled.then(|| {
            Arc::new(MarketSummaryRefresher::new(
                Arc::clone(&generator),
                Arc::clone(&prices),
                Arc::clone(&summaries),
            ))
        });

        Ok(Self {
            prices,
            summaries,
            orchestrator: Arc::new(orchestrator),
            summary,
            advisor: Advisor::new(generator),
        })
    }

    /// Worker running the price job, then the summary job
    pub fn worker(&self, settings: WorkerSettings) -> RefreshWorker {
        let worker = RefreshWorker::new(settings).with_job(self.orchestrator.clone());
        match &self.summary {
            Some(summary) => worker.with_job(summary.clone()),
            None => worker,
        }
    }

    /// Single pass for `scrape`: the price job, then the summary job when
    /// asked for and enabled
    pub fn scrape_worker(&self, with_summary: bool) -> RefreshWorker {
        let worker = RefreshWorker::new(WorkerSettings::default()).with_job(self.orchestrator.clone());
        match &self.summary {
            Some(summary) if with_summary => worker.with_job(summary.clone()),
            _ => worker,
        }
    }
}

fn build_generator(config: &GoldfeedConfig) -> Result<Arc<dyn TextGenerator>> {
    match config.ai.resolved_api_key() {
        Some(key) => {
            let settings = GeminiSettings {
                api_key: key.to_string(),
                model: config.ai.model.clone(),
                base_url: config.ai.base_url.clone(),
                timeout: Duration::from_secs(config.ai.timeout_seconds),
            };
            let client = GeminiClient::new(settings).context("Failed to build AI client")?;
            info!(model = client.model(), "AI generator configured");
            Ok(Arc::new(client))
        }
        None => {
            warn!("No AI API key configured; AI endpoints will return errors");
            Ok(Arc::new(UnconfiguredGenerator))
        }
    }
}

pub fn worker_settings(schedule: &ScheduleConfig) -> Result<WorkerSettings> {
    let daily = DailySchedule::parse(&schedule.daily_at).context("Invalid schedule.daily_at")?;
    Ok(WorkerSettings {
        enabled: schedule.enabled,
        run_on_startup: schedule.run_on_startup,
        schedule: daily,
    })
}

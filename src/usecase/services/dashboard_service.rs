use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use crate::usecase::ports::api::{ApiError, DashboardSummary, ErpApi};

/// Shared invalidation counter. Any writer bumps it after a successful
/// mutation; readers compare against the generation they last fetched at.
#[derive(Clone, Default)]
pub struct StaleSignal {
    generation: Arc<AtomicU64>,
}

impl StaleSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_dirty(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub summary: DashboardSummary,
    pub fetched_at: DateTime<Utc>,
}

struct CachedSummary {
    view: DashboardView,
    seen_generation: u64,
}

/// Caches the dashboard metrics until some mutation marks them stale; the
/// page refetches on its next visit, not eagerly.
pub struct DashboardService {
    api: Arc<dyn ErpApi>,
    stale: StaleSignal,
    cached: Mutex<Option<CachedSummary>>,
}

impl DashboardService {
    pub fn new(api: Arc<dyn ErpApi>, stale: StaleSignal) -> Self {
        Self {
            api,
            stale,
            cached: Mutex::new(None),
        }
    }

    pub fn is_stale(&self) -> bool {
        let generation = self.stale.generation();
        match self.cached.lock() {
            Ok(guard) => guard
                .as_ref()
                .map(|cached| cached.seen_generation != generation)
                .unwrap_or(true),
            Err(_) => true,
        }
    }

    pub fn refresh_if_stale(&self) -> Result<DashboardView, ApiError> {
        let generation = self.stale.generation();
        if let Ok(guard) = self.cached.lock() {
            if let Some(cached) = guard.as_ref() {
                if cached.seen_generation == generation {
                    return Ok(cached.view.clone());
                }
            }
        }

        let summary = self.api.dashboard_summary()?;
        let view = DashboardView {
            summary,
            fetched_at: Utc::now(),
        };
        if let Ok(mut guard) = self.cached.lock() {
            *guard = Some(CachedSummary {
                view: view.clone(),
                seen_generation: generation,
            });
        }
        Ok(view)
    }
}

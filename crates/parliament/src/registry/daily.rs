use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::info;

use super::domain::{Representative, RepresentativeId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySelection {
    /// UTC midnight of the day the selection was made.
    pub date_set: DateTime<Utc>,
    pub representative: Option<RepresentativeId>,
}

/// Randomly selected representative, refreshed once a day.
#[derive(Debug, Default)]
pub struct RepresentativeOfTheDay {
    current: Mutex<Option<DailySelection>>,
}

impl RepresentativeOfTheDay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(
        &self,
        now: DateTime<Utc>,
        candidates: &[Representative],
    ) -> Option<RepresentativeId> {
        self.get_with_rng(now, candidates, &mut rand::thread_rng())
    }

    /// Returns the cached pick, drawing a new one from `candidates` when the
    /// cache is empty or at least a day old. With no candidates the previous
    /// pick is kept.
    pub fn get_with_rng<G>(
        &self,
        now: DateTime<Utc>,
        candidates: &[Representative],
        rng: &mut G,
    ) -> Option<RepresentativeId>
    where
        G: Rng + ?Sized,
    {
        let midnight = Utc.from_utc_datetime(&now.date_naive().and_time(NaiveTime::MIN));
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(selection) = current.as_mut() {
            if (now - selection.date_set).num_days() < 1 {
                return selection.representative.clone();
            }

            selection.date_set = midnight;
            if let Some(pick) = candidates.choose(rng) {
                info!(id = %pick.id, "representative of the day refreshed");
                selection.representative = Some(pick.id.clone());
            }
            return selection.representative.clone();
        }

        let representative = candidates.choose(rng).map(|pick| pick.id.clone());
        *current = Some(DailySelection {
            date_set: midnight,
            representative: representative.clone(),
        });
        representative
    }

    pub fn current(&self) -> Option<DailySelection> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

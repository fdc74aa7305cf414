//! The recurring job registry.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use cron::Schedule;

use crate::error::{Error, Result};

/// Everything the scheduler can fire. Execution lives in the dispatch
/// engine; the registry only knows triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    News,
    Prices,
    SurgeCheck,
    BloodMoonEvent,
    Meme,
    TopCryptos,
    TopMemeCoins,
    MarketAnalysis,
    Educational,
    DailyPoll,
    ScamWarning,
    GameChallenge,
    Story,
    TradingTip,
    Forecast,
}

impl JobKind {
    pub fn id(&self) -> &'static str {
        match self {
            JobKind::News => "news",
            JobKind::Prices => "prices",
            JobKind::SurgeCheck => "surge",
            JobKind::BloodMoonEvent => "bloodmoon",
            JobKind::Meme => "meme",
            JobKind::TopCryptos => "top",
            JobKind::TopMemeCoins => "top-meme",
            JobKind::MarketAnalysis => "analysis",
            JobKind::Educational => "education",
            JobKind::DailyPoll => "poll",
            JobKind::ScamWarning => "scam",
            JobKind::GameChallenge => "game",
            JobKind::Story => "story",
            JobKind::TradingTip => "tip",
            JobKind::Forecast => "forecast",
        }
    }
}

/// One `(trigger, job)` pair. Immutable after registration.
#[derive(Debug, Clone, Copy)]
pub struct ScheduledJob {
    pub id: &'static str,
    pub cron: &'static str,
    pub job: JobKind,
}

/// The reference schedule (UTC, `sec min hour dom month dow` syntax).
pub fn default_jobs() -> Vec<ScheduledJob> {
    vec![
        ScheduledJob { id: "news", cron: "0 0 * * * *", job: JobKind::News },
        ScheduledJob { id: "prices", cron: "0 0 */2 * * *", job: JobKind::Prices },
        ScheduledJob { id: "surge", cron: "0 */30 * * * *", job: JobKind::SurgeCheck },
        ScheduledJob { id: "bloodmoon", cron: "0 0 20 13 3 *", job: JobKind::BloodMoonEvent },
        ScheduledJob { id: "meme", cron: "0 0 12 * * *", job: JobKind::Meme },
        ScheduledJob { id: "top", cron: "0 0 8 * * *", job: JobKind::TopCryptos },
        ScheduledJob { id: "top-meme", cron: "0 0 20 * * *", job: JobKind::TopMemeCoins },
        ScheduledJob { id: "analysis", cron: "0 0 10 * * *", job: JobKind::MarketAnalysis },
        ScheduledJob { id: "education", cron: "0 0 14 * * *", job: JobKind::Educational },
        ScheduledJob { id: "poll", cron: "0 0 16 * * *", job: JobKind::DailyPoll },
        ScheduledJob { id: "scam", cron: "0 0 12 * * Thu", job: JobKind::ScamWarning },
        ScheduledJob { id: "game", cron: "0 0 18 * * Fri", job: JobKind::GameChallenge },
        ScheduledJob { id: "story", cron: "0 0 11 * * Mon", job: JobKind::Story },
        ScheduledJob { id: "tip", cron: "0 0 13 * * *", job: JobKind::TradingTip },
        ScheduledJob { id: "forecast", cron: "0 0 15 * * *", job: JobKind::Forecast },
    ]
}

struct JobEntry {
    spec: ScheduledJob,
    schedule: Schedule,
    next_run: Option<DateTime<Utc>>,
}

/// Fixed set of jobs assembled at startup.
///
/// Jobs are independent: firing one never delays or gates another, and a
/// tick missed while the process was down is not replayed.
pub struct JobRegistry {
    entries: Vec<JobEntry>,
}

impl JobRegistry {
    pub fn new(jobs: Vec<ScheduledJob>) -> Result<Self> {
        Self::new_at(jobs, Utc::now())
    }

    fn new_at(jobs: Vec<ScheduledJob>, now: DateTime<Utc>) -> Result<Self> {
        let mut entries = Vec::with_capacity(jobs.len());
        for spec in jobs {
            let schedule = Schedule::from_str(spec.cron).map_err(|e| {
                Error::Schedule(format!("invalid cron '{}' for job {}: {}", spec.cron, spec.id, e))
            })?;
            let next_run = schedule.after(&now).next();
            entries.push(JobEntry {
                spec,
                schedule,
                next_run,
            });
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered jobs with their next occurrence.
    pub fn upcoming(&self) -> Vec<(ScheduledJob, Option<DateTime<Utc>>)> {
        self.entries
            .iter()
            .map(|entry| (entry.spec, entry.next_run))
            .collect()
    }

    /// Collect every job due at `now` and advance its next occurrence past
    /// `now`. Several missed ticks collapse into a single firing.
    pub fn take_due(&mut self, now: DateTime<Utc>) -> Vec<JobKind> {
        let mut due = Vec::new();
        for entry in &mut self.entries {
            let Some(next) = entry.next_run else { continue };
            if next <= now {
                due.push(entry.spec.job);
                entry.next_run = entry.schedule.after(&now).next();
            }
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn hourly_registry(now: DateTime<Utc>) -> JobRegistry {
        JobRegistry::new_at(
            vec![ScheduledJob {
                id: "news",
                cron: "0 0 * * * *",
                job: JobKind::News,
            }],
            now,
        )
        .unwrap()
    }

    #[test]
    fn reference_schedule_parses() {
        let registry = JobRegistry::new(default_jobs()).unwrap();
        assert_eq!(registry.len(), 15);
        for (_, next) in registry.upcoming() {
            assert!(next.is_some());
        }
    }

    #[test]
    fn job_is_not_due_before_its_tick() {
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 7, 59, 30).unwrap();
        let mut registry = hourly_registry(start);
        assert!(registry
            .take_due(Utc.with_ymd_and_hms(2025, 3, 1, 7, 59, 59).unwrap())
            .is_empty());
    }

    #[test]
    fn job_fires_at_its_tick_and_advances() {
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 7, 59, 30).unwrap();
        let mut registry = hourly_registry(start);

        let at_tick = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 1).unwrap();
        assert_eq!(registry.take_due(at_tick), vec![JobKind::News]);

        // Already advanced; nothing due until the next hour.
        assert!(registry.take_due(at_tick).is_empty());
        let next_tick = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        assert_eq!(registry.take_due(next_tick), vec![JobKind::News]);
    }

    #[test]
    fn missed_ticks_collapse_into_one_firing() {
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 7, 59, 30).unwrap();
        let mut registry = hourly_registry(start);

        // Five hours pass in one jump; only one firing comes out.
        let late = Utc.with_ymd_and_hms(2025, 3, 1, 13, 0, 30).unwrap();
        assert_eq!(registry.take_due(late), vec![JobKind::News]);
        assert!(registry.take_due(late).is_empty());
    }

    #[test]
    fn coinciding_ticks_fire_all_jobs() {
        let start = Utc.with_ymd_and_hms(2025, 3, 6, 11, 0, 0).unwrap();
        let mut registry = JobRegistry::new_at(
            vec![
                ScheduledJob {
                    id: "meme",
                    cron: "0 0 12 * * *",
                    job: JobKind::Meme,
                },
                ScheduledJob {
                    id: "scam",
                    cron: "0 0 12 * * Thu",
                    job: JobKind::ScamWarning,
                },
            ],
            start,
        )
        .unwrap();

        // 2025-03-06 is a Thursday; both jobs land on the same tick.
        let noon = Utc.with_ymd_and_hms(2025, 3, 6, 12, 0, 0).unwrap();
        let due = registry.take_due(noon);
        assert!(due.contains(&JobKind::Meme));
        assert!(due.contains(&JobKind::ScamWarning));
    }

    #[test]
    fn bad_cron_is_rejected_at_registration() {
        let result = JobRegistry::new(vec![ScheduledJob {
            id: "broken",
            cron: "not a cron",
            job: JobKind::News,
        }]);
        assert!(result.is_err());
    }
}

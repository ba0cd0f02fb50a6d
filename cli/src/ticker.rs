//! Drives the match clock at the configured cadence and echoes new log lines

use std::time::Duration;

use matchtimer_core::{LogEntry, format_elapsed};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::context::SessionHandle;

/// Spawn the tick loop. Runs until aborted.
pub fn spawn(session: SessionHandle, tick_hz: u32) -> JoinHandle<()> {
    let period = Duration::from_secs_f64(1.0 / f64::from(tick_hz.max(1)));
    tracing::debug!(tick_hz, ?period, "Starting match ticker");

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut echo = LogEcho::default();

        loop {
            interval.tick().await;

            let fresh = {
                let mut session = session.lock().await;
                session.tick();
                echo.fresh(session.generation(), session.log().entries())
            };

            for entry in fresh {
                println!("\n[{}] {} {}", format_elapsed(entry.time), entry.icon, entry.message);
            }
        }
    })
}

/// Remembers the newest log line already echoed for the current match
#[derive(Debug, Default)]
struct LogEcho {
    generation: u64,
    last_seen: Option<LogEntry>,
}

impl LogEcho {
    /// Entries (newest first) recorded since the last call, returned oldest
    /// first. A new match generation starts from an empty marker.
    fn fresh<'a>(
        &mut self,
        generation: u64,
        entries: impl Iterator<Item = &'a LogEntry>,
    ) -> Vec<LogEntry> {
        if generation != self.generation {
            self.generation = generation;
            self.last_seen = None;
        }

        let last_seen = self.last_seen.as_ref();
        let mut fresh: Vec<LogEntry> = entries
            .take_while(|entry| Some(*entry) != last_seen)
            .cloned()
            .collect();

        if let Some(newest) = fresh.first() {
            self.last_seen = Some(newest.clone());
        }
        fresh.reverse();
        fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(time: f64, message: &str) -> LogEntry {
        LogEntry::new(time, message, "*")
    }

    #[test]
    fn only_unseen_entries_are_returned_in_order() {
        let mut echo = LogEcho::default();
        let log = vec![entry(300.0, "B spawned!"), entry(120.0, "A spawned!")];

        let fresh = echo.fresh(1, log.iter());
        assert_eq!(fresh, vec![log[1].clone(), log[0].clone()]);

        let log = vec![entry(600.0, "C reached!"), log[0].clone(), log[1].clone()];
        let fresh = echo.fresh(1, log.iter());
        assert_eq!(fresh, vec![log[0].clone()]);
        assert!(echo.fresh(1, log.iter()).is_empty());
    }

    #[test]
    fn empty_log_keeps_marker() {
        let mut echo = LogEcho::default();
        echo.fresh(1, [entry(1.0, "x")].iter());
        assert!(echo.fresh(1, std::iter::empty()).is_empty());
        assert_eq!(echo.last_seen, Some(entry(1.0, "x")));
    }

    #[test]
    fn identical_first_line_of_new_match_is_echoed() {
        let mut echo = LogEcho::default();
        let line = entry(120.0, "Easy Camps spawned!");

        assert_eq!(echo.fresh(2, [line.clone()].iter()).len(), 1);
        // Reset, then the new match produces the same line at the same time
        assert_eq!(echo.fresh(3, [line.clone()].iter()), vec![line]);
    }
}

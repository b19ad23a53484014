//! Transit-aware weighted interval scheduling.
//!
//! Selects a set of non-overlapping tasks maximizing total score and, among
//! equal-score sets, minimizing the round-trip subway fee of visiting the
//! selected stations in chronological order starting and ending at home.

use thiserror::Error;

use crate::models::{Fee, ItineraryResult, StationId, Task};
use crate::transit::{DistanceTable, TransitError};
use crate::{log_changes, log_checks};

/// Errors that can occur while solving an itinerary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// A required fee lookup had no entry (disconnected subway data).
    #[error("no subway route from station {from} to station {to}")]
    Unreachable { from: StationId, to: StationId },
    /// Removing a tour's return leg underflowed its recorded fee. The fee of
    /// every DP state includes its return leg, so this indicates a logic
    /// defect, not bad input.
    #[error("tour fee underflow while replacing return leg at station {station}")]
    FeeUnderflow { station: StationId },
}

impl From<TransitError> for SolveError {
    fn from(err: TransitError) -> Self {
        match err {
            TransitError::Unreachable { from, to } => SolveError::Unreachable { from, to },
        }
    }
}

/// Solve one itinerary request.
///
/// `distances` must cover every task station and `home` as sources (see
/// [`DistanceTable::build`]). The DP walks tasks in end-time order; each
/// state records the best score for that prefix together with the full
/// round-trip fee of the tour attaining it, so score ties break on fee
/// locally.
///
/// # Returns
/// * `Ok(ItineraryResult)` with the best score, the minimal fee among
///   best-score selections, and the selected task names in start-time order
/// * `Err(SolveError::Unreachable)` if a needed station pair has no route
pub fn solve(
    tasks: &[Task],
    distances: &DistanceTable,
    home: StationId,
    verbosity: u8,
) -> Result<ItineraryResult, SolveError> {
    if tasks.is_empty() {
        return Ok(ItineraryResult::default());
    }

    // End time primary, then start, then name, so equal end times resolve
    // deterministically.
    let mut order: Vec<&Task> = tasks.iter().collect();
    order.sort_by(|a, b| {
        (a.end, a.start, a.name.as_str()).cmp(&(b.end, b.start, b.name.as_str()))
    });
    let n = order.len();

    let ends: Vec<i64> = order.iter().map(|t| t.end).collect();

    // p[i]: 1-based index of the latest task finishing no later than task i
    // starts; 0 = no compatible predecessor. Binary search, not a scan.
    let mut p = vec![0usize; n + 1];
    for i in 1..=n {
        p[i] = ends.partition_point(|&end| end <= order[i - 1].start);
    }

    // DP over prefixes, index 0 = empty schedule. Fees include the return
    // leg home, which keeps the score/fee tie-break local to each step.
    let mut dp_score = vec![0i64; n + 1];
    let mut dp_fee: Vec<Fee> = vec![0; n + 1];
    let mut last_idx = vec![-1i64; n + 1]; // 1-based index of last selected task; -1 = none
    let mut choice = vec![false; n + 1];

    for i in 1..=n {
        let task = order[i - 1];

        // Option A: skip task i, carry the previous state.
        let mut best_score = dp_score[i - 1];
        let mut best_fee = dp_fee[i - 1];
        let mut best_last = last_idx[i - 1];
        let mut best_choice = false;

        // Option B: take task i on top of its latest compatible predecessor.
        let j = p[i];
        let take_score = dp_score[j] + task.score;
        let take_fee = if last_idx[j] < 0 {
            // First task of the tour: out and straight back.
            distances.fee(home, task.station)? + distances.fee(task.station, home)?
        } else {
            // Replace the old return leg with a detour through this station.
            let last_station = order[last_idx[j] as usize - 1].station;
            let without_return = dp_fee[j]
                .checked_sub(distances.fee(last_station, home)?)
                .ok_or(SolveError::FeeUnderflow {
                    station: last_station,
                })?;
            without_return
                + distances.fee(last_station, task.station)?
                + distances.fee(task.station, home)?
        };

        log_checks!(
            verbosity,
            "task {:?}: skip=(score {}, fee {}) take=(score {}, fee {})",
            task.name,
            best_score,
            best_fee,
            take_score,
            take_fee
        );

        // Maximize score; on ties minimize fee; remaining ties keep the
        // skip state for stability.
        if take_score > best_score || (take_score == best_score && take_fee < best_fee) {
            best_score = take_score;
            best_fee = take_fee;
            best_last = i as i64;
            best_choice = true;
            log_changes!(
                verbosity,
                "take {:?}: score {} fee {}",
                task.name,
                best_score,
                best_fee
            );
        }

        dp_score[i] = best_score;
        dp_fee[i] = best_fee;
        last_idx[i] = best_last;
        choice[i] = best_choice;
    }

    // Walk back through the choices; a taken index jumps to its predecessor.
    let mut selected: Vec<&Task> = Vec::new();
    let mut i = n;
    while i > 0 {
        if choice[i] {
            selected.push(order[i - 1]);
            i = p[i];
        } else {
            i -= 1;
        }
    }
    selected.reverse();

    // Human-facing order is by start time, not the DP's end-time order.
    selected.sort_by(|a, b| {
        (a.start, a.end, a.name.as_str()).cmp(&(b.start, b.end, b.name.as_str()))
    });

    Ok(ItineraryResult {
        max_score: dp_score[n],
        min_fee: dp_fee[n],
        schedule: selected.into_iter().map(|t| t.name.clone()).collect(),
    })
}

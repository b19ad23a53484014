//! Rust implementation of the itinerary solver data types and algorithms.
//!
//! This module provides the shortest-fee transit index and the transit-aware
//! interval scheduling solver behind the itinerary service.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;
use rustc_hash::FxHashSet;
use std::collections::HashMap;

pub mod interner;
pub mod logging;
mod models;
pub mod scheduler;
pub mod transit;

pub use models::{Fee, ItineraryResult, StationId, SubwayEdge, Task};
pub use scheduler::{solve, SolveError};
pub use transit::{DistanceTable, TransitError, TransitGraph};

/// Solve one itinerary request end to end.
///
/// Builds the transit cost index over the stations the request references
/// (task stations plus the starting station), then runs the scheduling DP.
///
/// # Arguments
/// * `tasks` - Time-windowed tasks to choose from
/// * `subway` - Undirected weighted subway connections
/// * `starting_station` - Home station the tour starts and ends at
/// * `verbosity` - Logging level (0=silent .. 3=debug)
///
/// # Returns
/// * ItineraryResult with the best score, minimal fee, and selected task
///   names ordered by start time
///
/// # Raises
/// * ValueError if a required station pair has no subway route
#[pyfunction]
#[pyo3(signature = (tasks, subway, starting_station, verbosity=0))]
fn solve_itinerary(
    tasks: Vec<Task>,
    subway: Vec<SubwayEdge>,
    starting_station: StationId,
    verbosity: u8,
) -> PyResult<ItineraryResult> {
    let mut query: FxHashSet<StationId> = tasks.iter().map(|t| t.station).collect();
    query.insert(starting_station);

    let distances = DistanceTable::build(&subway, &query, verbosity);

    match solve(&tasks, &distances, starting_station, verbosity) {
        Ok(result) => Ok(result),
        Err(e) => Err(pyo3::exceptions::PyValueError::new_err(e.to_string())),
    }
}

/// Compute the cheapest fee between every ordered pair of the given stations.
///
/// Standalone access to the transit cost index for hosts that only need
/// fees. Every requested station must be able to reach every other.
///
/// # Arguments
/// * `subway` - Undirected weighted subway connections
/// * `stations` - Stations to compute pairwise fees for
/// * `verbosity` - Logging level (0=silent .. 3=debug)
///
/// # Returns
/// * Dict mapping (from, to) to the cheapest fee
///
/// # Raises
/// * ValueError if some pair of the requested stations is not connected
#[pyfunction]
#[pyo3(signature = (subway, stations, verbosity=0))]
fn transit_fees(
    subway: Vec<SubwayEdge>,
    stations: Vec<StationId>,
    verbosity: u8,
) -> PyResult<HashMap<(StationId, StationId), Fee>> {
    let query: FxHashSet<StationId> = stations.iter().copied().collect();
    let table = DistanceTable::build(&subway, &query, verbosity);

    let mut fees = HashMap::with_capacity(query.len() * query.len());
    for &from in &query {
        for &to in &query {
            match table.fee(from, to) {
                Ok(fee) => {
                    fees.insert((from, to), fee);
                }
                Err(e) => return Err(pyo3::exceptions::PyValueError::new_err(e.to_string())),
            }
        }
    }
    Ok(fees)
}

/// The itinera.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<Task>()?;
    m.add_class::<SubwayEdge>()?;
    m.add_class::<ItineraryResult>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(solve_itinerary, m)?)?;
    m.add_function(wrap_pyfunction!(transit_fees, m)?)?;

    Ok(())
}

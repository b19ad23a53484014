//! Core data types for the itinerary solver.

use pyo3::prelude::*;

/// Identifier of a subway station. Stations carry no attributes beyond identity.
pub type StationId = i64;

/// Fee of a subway ride or a whole tour, in integer currency units.
pub type Fee = u64;

/// A time-windowed task tied to a station.
#[pyclass]
#[derive(Clone, Debug)]
pub struct Task {
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub start: i64,
    #[pyo3(get, set)]
    pub end: i64,
    #[pyo3(get, set)]
    pub station: StationId,
    #[pyo3(get, set)]
    pub score: i64,
}

#[pymethods]
impl Task {
    #[new]
    fn new(name: String, start: i64, end: i64, station: StationId, score: i64) -> Self {
        Self {
            name,
            start,
            end,
            station,
            score,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Task(name={:?}, start={}, end={}, station={}, score={})",
            self.name, self.start, self.end, self.station, self.score
        )
    }
}

/// An undirected subway connection between two stations.
///
/// Multiple edges between the same pair are allowed; the shortest-path
/// computation picks the cheapest route, so no dedup happens here.
#[pyclass]
#[derive(Clone, Debug)]
pub struct SubwayEdge {
    #[pyo3(get, set)]
    pub stations: (StationId, StationId),
    #[pyo3(get, set)]
    pub fee: Fee,
}

#[pymethods]
impl SubwayEdge {
    #[new]
    fn new(stations: (StationId, StationId), fee: Fee) -> Self {
        Self { stations, fee }
    }

    fn __repr__(&self) -> String {
        format!(
            "SubwayEdge(stations=({}, {}), fee={})",
            self.stations.0, self.stations.1, self.fee
        )
    }
}

/// Result of solving one itinerary request.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItineraryResult {
    /// Total score of the selected tasks.
    #[pyo3(get, set)]
    pub max_score: i64,
    /// Round-trip transit fee of the cheapest tour attaining `max_score`.
    #[pyo3(get, set)]
    pub min_fee: Fee,
    /// Names of the selected tasks, ordered by start time.
    #[pyo3(get, set)]
    pub schedule: Vec<String>,
}

#[pymethods]
impl ItineraryResult {
    #[new]
    #[pyo3(signature = (max_score=0, min_fee=0, schedule=None))]
    fn new(max_score: i64, min_fee: Fee, schedule: Option<Vec<String>>) -> Self {
        Self {
            max_score,
            min_fee,
            schedule: schedule.unwrap_or_default(),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ItineraryResult(max_score={}, min_fee={}, schedule={:?})",
            self.max_score, self.min_fee, self.schedule
        )
    }
}

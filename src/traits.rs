//! Core domain traits for the inbox filter engine.
//!
//! Candidates belong to the calling application. The engine only reads
//! them through [`Candidate`], so any queue item type can be filtered.

use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Unique identifier for planner entities.
pub trait Id: Clone + Eq + Hash {}

impl<T> Id for T where T: Clone + Eq + Hash {}

/// A scheduling-queue item that inbox filters are evaluated against.
pub trait Candidate {
    type CustomerId: Id;

    fn customer_id(&self) -> &Self::CustomerId;

    /// Days until the next revision is due. Negative when overdue,
    /// `None` when the customer has no due date.
    fn days_until_due(&self) -> Option<i64>;

    /// Lifecycle status of the queue item.
    fn status(&self) -> CandidateStatus;

    /// Contact phone, if any.
    fn phone(&self) -> Option<&str>;

    /// Result of address geocoding.
    fn geocode_status(&self) -> GeocodeStatus;

    /// Geocoded location (lat, lng).
    fn location(&self) -> Option<(f64, f64)>;
}

/// Lifecycle status of a scheduling candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    Upcoming,
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
}

impl CandidateStatus {
    /// Whether the candidate already has an agreed appointment term.
    pub fn has_term(self) -> bool {
        matches!(self, CandidateStatus::Scheduled | CandidateStatus::Confirmed)
    }
}

/// Outcome of geocoding a customer address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeocodeStatus {
    Pending,
    Success,
    Failed,
}

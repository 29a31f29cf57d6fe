//! Builder for inbox candidates with sensible defaults.

use std::collections::HashSet;

use fieldops_core::traits::{Candidate, CandidateStatus, GeocodeStatus};

#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct CustomerId(pub String);

impl CustomerId {
    pub fn new(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Clone, Debug)]
pub struct TestCandidate {
    pub customer_id: CustomerId,
    pub days_until_due: Option<i64>,
    pub status: CandidateStatus,
    pub phone: Option<String>,
    pub geocode_status: GeocodeStatus,
    pub location: Option<(f64, f64)>,
}

impl TestCandidate {
    pub fn new(id: &str) -> Self {
        Self {
            customer_id: CustomerId::new(id),
            days_until_due: Some(14),
            status: CandidateStatus::Upcoming,
            phone: Some("+1 702 555 0100".to_string()),
            geocode_status: GeocodeStatus::Success,
            location: Some((36.1126, -115.1767)),
        }
    }

    pub fn due_in(mut self, days: i64) -> Self {
        self.days_until_due = Some(days);
        self
    }

    pub fn no_due_date(mut self) -> Self {
        self.days_until_due = None;
        self
    }

    pub fn status(mut self, status: CandidateStatus) -> Self {
        self.status = status;
        self
    }

    pub fn without_phone(mut self) -> Self {
        self.phone = None;
        self
    }

    pub fn geocode_failed(mut self) -> Self {
        self.geocode_status = GeocodeStatus::Failed;
        self.location = None;
        self
    }
}

impl Candidate for TestCandidate {
    type CustomerId = CustomerId;

    fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    fn days_until_due(&self) -> Option<i64> {
        self.days_until_due
    }

    fn status(&self) -> CandidateStatus {
        self.status
    }

    fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    fn geocode_status(&self) -> GeocodeStatus {
        self.geocode_status
    }

    fn location(&self) -> Option<(f64, f64)> {
        self.location
    }
}

/// Customer ids currently on the active route.
pub fn in_route(ids: &[&str]) -> HashSet<CustomerId> {
    ids.iter().map(|id| CustomerId::new(id)).collect()
}

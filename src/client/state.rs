//! Client-owned query state and the events that change it.
//!
//! Each query takes a ticket from a monotonically increasing sequence.
//! Events carry the ticket of the query that produced them, and only events
//! for the latest ticket are applied; results of superseded queries are
//! dropped.

use crate::models::{ForecastSeries, Observation};

/// Identifies one submitted query
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Failed,
}

/// Outcomes reported back to the state by the request driver
#[derive(Debug, Clone)]
pub enum ClientEvent {
    ObservationLoaded {
        ticket: RequestTicket,
        observation: Observation,
    },
    ObservationFailed {
        ticket: RequestTicket,
        message: String,
    },
    ForecastLoaded {
        ticket: RequestTicket,
        forecast: ForecastSeries,
    },
    ForecastFailed {
        ticket: RequestTicket,
        message: String,
    },
}

impl ClientEvent {
    pub fn ticket(&self) -> RequestTicket {
        match self {
            ClientEvent::ObservationLoaded { ticket, .. }
            | ClientEvent::ObservationFailed { ticket, .. }
            | ClientEvent::ForecastLoaded { ticket, .. }
            | ClientEvent::ForecastFailed { ticket, .. } => *ticket,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClientState {
    pub query: String,
    pub observation: Option<Observation>,
    pub forecast: Option<ForecastSeries>,
    pub error: Option<String>,
    /// Forecast failures never invalidate a loaded observation
    pub forecast_error: Option<String>,
    pub loading: bool,
    latest: u64,
}

impl ClientState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a query and return its ticket
    ///
    /// Any earlier query still in flight is superseded.
    pub fn begin_query(&mut self, query: impl Into<String>) -> RequestTicket {
        self.latest += 1;
        self.query = query.into();
        self.loading = true;
        self.error = None;
        self.forecast_error = None;
        RequestTicket(self.latest)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Apply an event; returns false when it belongs to a superseded query
    pub fn apply(&mut self, event: ClientEvent) -> bool {
        if !self.is_current(event.ticket()) {
            return false;
        }

        match event {
            ClientEvent::ObservationLoaded { observation, .. } => {
                // The forecast for the new location is still pending
                self.observation = Some(observation);
                self.forecast = None;
                self.error = None;
            }
            ClientEvent::ObservationFailed { message, .. } => {
                self.observation = None;
                self.forecast = None;
                self.error = Some(message);
                self.loading = false;
            }
            ClientEvent::ForecastLoaded { forecast, .. } => {
                self.forecast = Some(forecast);
                self.forecast_error = None;
                self.loading = false;
            }
            ClientEvent::ForecastFailed { message, .. } => {
                self.forecast = None;
                self.forecast_error = Some(message);
                self.loading = false;
            }
        }

        true
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Failed
        } else if self.observation.is_some() {
            Phase::Success
        } else {
            Phase::Idle
        }
    }

    /// Whether a new query can be submitted without one still loading
    pub fn is_ready(&self) -> bool {
        !self.loading
    }
}

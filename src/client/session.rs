//! Async driver that issues relay requests and feeds results into state.

use crate::{
    client::{
        api::{ClientError, RelayApi},
        display::{DisplayState, derive_display_state},
        geolocation::Geolocator,
        state::{ClientEvent, ClientState, RequestTicket},
    },
    models::Observation,
};
use chrono::FixedOffset;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Query text recorded for location-based lookups
pub const CURRENT_LOCATION_QUERY: &str = "current location";

/// One user's weather session
///
/// Queries may overlap; the ticket sequence in [`ClientState`] makes sure
/// only the latest query's results are applied. The state lock is never
/// held across a relay call.
pub struct WeatherClient<R, G> {
    relay: R,
    geolocator: G,
    state: Arc<Mutex<ClientState>>,
}

impl<R: RelayApi, G: Geolocator> WeatherClient<R, G> {
    pub fn new(relay: R, geolocator: G) -> Self {
        Self {
            relay,
            geolocator,
            state: Arc::new(Mutex::new(ClientState::new())),
        }
    }

    /// Snapshot of the current state
    pub async fn state(&self) -> ClientState {
        self.state.lock().await.clone()
    }

    /// View for the latest observation, if one is loaded
    pub async fn display(&self, viewer: FixedOffset) -> Option<DisplayState> {
        let state = self.state.lock().await;
        state
            .observation
            .as_ref()
            .map(|obs| derive_display_state(obs, state.forecast.as_ref(), viewer))
    }

    /// Look up a city; blank input is ignored and returns `None`
    pub async fn submit_city_query(&self, text: &str) -> Option<RequestTicket> {
        let city = text.trim();
        if city.is_empty() {
            return None;
        }

        let ticket = self.state.lock().await.begin_query(city);
        debug!(city, ticket = ticket.sequence(), "Submitting city query");

        let result = self.relay.weather_by_city(city).await;
        self.complete(ticket, result).await;
        Some(ticket)
    }

    /// Look up the device's position
    ///
    /// A geolocation failure is reported without calling the relay.
    pub async fn submit_location_query(&self) -> RequestTicket {
        let ticket = self.state.lock().await.begin_query(CURRENT_LOCATION_QUERY);

        match self.geolocator.current_position().await {
            Ok(coords) => {
                debug!(%coords, ticket = ticket.sequence(), "Submitting location query");
                let result = self.relay.weather_by_coordinates(coords).await;
                self.complete(ticket, result).await;
            }
            Err(e) => {
                warn!(error = %e, "Geolocation failed");
                self.apply(ClientEvent::ObservationFailed {
                    ticket,
                    message: ClientError::from(e).user_message(),
                })
                .await;
            }
        }

        ticket
    }

    /// Apply the observation result, then fetch the forecast for the
    /// observation's own coordinates
    async fn complete(&self, ticket: RequestTicket, result: Result<Observation, ClientError>) {
        let observation = match result {
            Ok(observation) => observation,
            Err(e) => {
                warn!(error = %e, ticket = ticket.sequence(), "Weather lookup failed");
                self.apply(ClientEvent::ObservationFailed {
                    ticket,
                    message: e.user_message(),
                })
                .await;
                return;
            }
        };

        let coords = observation.coord;
        info!(location = %observation.location(), ticket = ticket.sequence(), "Observation loaded");

        if !self
            .apply(ClientEvent::ObservationLoaded {
                ticket,
                observation,
            })
            .await
        {
            return;
        }

        let event = match self.relay.forecast(coords).await {
            Ok(forecast) => ClientEvent::ForecastLoaded { ticket, forecast },
            Err(e) => {
                warn!(error = %e, %coords, "Forecast lookup failed");
                ClientEvent::ForecastFailed {
                    ticket,
                    message: e.user_message(),
                }
            }
        };
        self.apply(event).await;
    }

    async fn apply(&self, event: ClientEvent) -> bool {
        let ticket = event.ticket();
        let applied = self.state.lock().await.apply(event);
        if !applied {
            debug!(ticket = ticket.sequence(), "Discarding result of superseded query");
        }
        applied
    }
}

//! The panel owner: starts fetch chains and applies their results.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use skypane_core::AppError;
use tokio::runtime::Handle;

use crate::error::ServiceError;
use crate::port::UiPort;
use crate::renderer::ForecastRenderer;
use crate::services::{
    request_bootstrap, request_city_search, FetchOrigin, FetchedForecast, WeatherServiceMessage,
    WidgetServices,
};

/// Owns a [`UiPort`] and everything that writes to it.
///
/// Results are applied in arrival order, so when two chains overlap the one
/// that finishes last is what the panel shows.
pub struct WeatherWidget<P: UiPort> {
    port: P,
    services: WidgetServices,
    runtime: Handle,
    renderer: ForecastRenderer,
    tx: Sender<WeatherServiceMessage>,
    rx: Receiver<WeatherServiceMessage>,
    pending: usize,
    last_error: Option<AppError>,
}

impl<P: UiPort> WeatherWidget<P> {
    /// Wrap `port`, which starts out showing the spinner.
    pub fn new(mut port: P, services: WidgetServices, runtime: Handle) -> Self {
        port.set_loading(true);
        let (tx, rx) = mpsc::channel();
        Self {
            port,
            services,
            runtime,
            renderer: ForecastRenderer::new(),
            tx,
            rx,
            pending: 0,
            last_error: None,
        }
    }

    /// Kick off the startup forecast for the device position.
    pub fn start(&mut self) {
        tracing::info!("Requesting forecast for current position");
        request_bootstrap(&self.runtime, &self.tx, self.services.clone());
        self.pending += 1;
    }

    /// Submit a city search. Blank queries are ignored and return `false`.
    pub fn submit_search(&mut self, query: &str) -> bool {
        let spawned = request_city_search(&self.runtime, &self.tx, self.services.clone(), query);
        if spawned {
            self.pending += 1;
        } else {
            tracing::debug!("Ignoring blank search");
        }
        spawned
    }

    /// Apply every message that has already arrived. Returns how many.
    pub fn process_messages(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(message) = self.rx.try_recv() {
            self.handle_message(message);
            handled += 1;
        }
        handled
    }

    /// Block up to `timeout` for the next message and apply it.
    pub fn wait_for_message(&mut self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(message) => {
                self.handle_message(message);
                true
            }
            // The widget holds a sender, so only timeouts happen here
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => false,
        }
    }

    pub fn handle_message(&mut self, message: WeatherServiceMessage) {
        match message {
            WeatherServiceMessage::SearchResolved { query } => {
                tracing::debug!("Search '{}' resolved, clearing input", query);
                self.port.clear_search_input();
            }
            WeatherServiceMessage::FetchDone(result) => {
                self.pending = self.pending.saturating_sub(1);
                match result {
                    Ok(fetched) => self.apply(fetched),
                    Err(e) => self.fail(e),
                }
            }
        }
    }

    fn apply(&mut self, fetched: FetchedForecast) {
        let FetchedForecast {
            payload,
            reference_hour,
            origin,
        } = fetched;

        match self.renderer.render(&mut self.port, reference_hour, &payload) {
            Ok(_) => {
                match origin {
                    FetchOrigin::Position => tracing::info!("Forecast shown for current position"),
                    FetchOrigin::Search(q) => tracing::info!("Forecast shown for '{}'", q),
                }
                self.last_error = None;
            }
            Err(e) => {
                tracing::error!("Forecast could not be rendered: {}", e);
                self.last_error = Some(e.into());
            }
        }
    }

    fn fail(&mut self, e: ServiceError) {
        if e.is_position_unavailable() {
            tracing::debug!("Position unavailable, waiting for a search: {}", e);
        } else {
            tracing::warn!("Forecast fetch failed: {}", e);
        }
        self.last_error = Some(e.into());
    }

    /// No fetch chain is still running
    pub fn is_idle(&self) -> bool {
        self.pending == 0
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Error from the most recent chain, cleared by a successful render
    pub fn last_error(&self) -> Option<&AppError> {
        self.last_error.as_ref()
    }
}

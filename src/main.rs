use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use skypane_widget::{TextPanel, WeatherWidget, WidgetServices};

fn main() -> Result<()> {
    // Initialize core
    skypane_core::init()?;

    let mut app = skypane_core::App::new()?;
    let config = app.shared_config();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("skypane-tokio")
        .build()
        .context("failed to start async runtime")?;

    let services = WidgetServices::from_config(&config).context("failed to build weather services")?;
    let panel = TextPanel::new(config.ui.weekday_cards);
    let mut widget = WeatherWidget::new(panel, services, runtime.handle().clone());

    // No arguments: forecast for the configured position. Otherwise search.
    let query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if query.trim().is_empty() {
        widget.start();
    } else {
        widget.port_mut().set_search_input(query.as_str());
        widget.submit_search(&query);
    }

    // Both chains are bounded by the HTTP timeouts
    let budget = Duration::from_secs(config.weather.timeout_secs + config.geocoding.timeout_secs + 5);
    let deadline = Instant::now() + budget;
    while !widget.is_idle() && Instant::now() < deadline {
        widget.wait_for_message(Duration::from_millis(100));
    }

    print!("{}", widget.port());
    if let Some(e) = widget.last_error() {
        tracing::debug!("Last error: {}", e);
        eprintln!("{}", e.user_message());
    }

    app.shutdown()?;
    Ok(())
}

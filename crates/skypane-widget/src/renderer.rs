//! Applies one payload to a [`UiPort`].

use skypane_weather::WeatherPayload;

use crate::display::{format_temp, DisplayModel};
use crate::error::RenderError;
use crate::port::UiPort;

#[derive(Debug, Default, Clone, Copy)]
pub struct ForecastRenderer;

impl ForecastRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Fill every slot from `payload`, then reveal the panel body.
    ///
    /// The display model is built before the first port call, so on error
    /// the port is left exactly as it was.
    ///
    /// # Errors
    /// `RenderError` when the payload cannot cover the window or the cards.
    #[tracing::instrument(skip(self, port, payload), fields(timezone = %payload.timezone))]
    pub fn render<P: UiPort + ?Sized>(
        &self,
        port: &mut P,
        reference_hour: u32,
        payload: &WeatherPayload,
    ) -> Result<DisplayModel, RenderError> {
        let model = DisplayModel::build(payload, reference_hour, port.weekday_card_count())?;
        self.apply(port, &model);
        tracing::debug!("Rendered forecast at reference hour {}", reference_hour);
        Ok(model)
    }

    /// Push an already built model into the port.
    pub fn apply<P: UiPort + ?Sized>(&self, port: &mut P, model: &DisplayModel) {
        if let Some(degrees) = model.current_temp {
            port.set_current_temp(&format_temp(degrees));
        }
        if let Some(gradient) = model.background {
            port.set_background(gradient);
        }
        if let Some(icon) = model.current_icon {
            port.set_current_icon(icon);
        }
        port.set_city_label(&model.city_label);
        port.set_description(&model.description);

        for (i, slot) in model.hourly.iter().enumerate() {
            port.set_hourly_slot(i, slot);
        }
        for (i, card) in model.cards.iter().enumerate() {
            port.set_weekday_card(i, card);
        }

        port.set_loading(false);
    }
}

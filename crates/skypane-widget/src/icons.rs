use skypane_weather::IconKind;

/// Image shown for a weather condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconAsset {
    pub path: &'static str,
    pub alt: &'static str,
}

impl IconAsset {
    const fn new(path: &'static str, alt: &'static str) -> Self {
        Self { path, alt }
    }
}

pub fn resolve_icon(kind: IconKind) -> IconAsset {
    match kind {
        IconKind::ClearDay => IconAsset::new("/icons/clear-day.png", "clear-day"),
        IconKind::ClearNight => IconAsset::new("/icons/clear-night.png", "clear-night"),
        IconKind::Cloudy => IconAsset::new("/icons/cloudy.png", "cloudy"),
        IconKind::PartlyCloudyDay => IconAsset::new("/icons/cloudy-day.png", "cloudy day"),
        IconKind::PartlyCloudyNight => IconAsset::new("/icons/cloudy-night.png", "cloudy night"),
        IconKind::Rain => IconAsset::new("/icons/rain.png", "rain"),
        IconKind::Snow => IconAsset::new("/icons/snow.png", "snow"),
        IconKind::Fog => IconAsset::new("/icons/fog.png", "fog"),
        IconKind::Wind => IconAsset::new("/icons/wind.png", "wind"),
    }
}

/// Resolve a raw provider tag. Unknown tags give `None` so the slot keeps its image.
pub fn resolve_tag(tag: &str) -> Option<IconAsset> {
    let asset = IconKind::from_tag(tag).map(resolve_icon);
    if asset.is_none() {
        tracing::debug!("No icon for tag '{}', keeping previous image", tag);
    }
    asset
}

/// Panel background, one per temperature band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gradient {
    /// t <= 0
    Freezing,
    /// 0 < t <= 10
    Cold,
    /// 10 < t <= 20
    Mild,
    /// 20 < t <= 30
    Warm,
    /// 30 < t <= 40
    Hot,
    /// t > 40
    Scorching,
}

/// Inclusive upper bound of each band, ascending; above the last is `Scorching`.
const BANDS: [(f64, Gradient); 5] = [
    (0.0, Gradient::Freezing),
    (10.0, Gradient::Cold),
    (20.0, Gradient::Mild),
    (30.0, Gradient::Warm),
    (40.0, Gradient::Hot),
];

impl Gradient {
    pub fn css(&self) -> &'static str {
        match self {
            Self::Freezing => "linear-gradient(135deg, #d7e8f7, #6c849e)",
            Self::Cold => "linear-gradient(135deg, #b6d7e4, #8aaea3)",
            Self::Mild => "linear-gradient(135deg, #d3f6db, #90c9b2)",
            Self::Warm => "linear-gradient(135deg, #f9e4b7, #f3c395)",
            Self::Hot => "linear-gradient(135deg, #f9c5b6, #e88d8f)",
            Self::Scorching => "linear-gradient(135deg, #f8ad6d, #e76a4f)",
        }
    }

    /// Human-readable band, e.g. "(10,20]"
    pub fn band(&self) -> &'static str {
        match self {
            Self::Freezing => "<=0",
            Self::Cold => "(0,10]",
            Self::Mild => "(10,20]",
            Self::Warm => "(20,30]",
            Self::Hot => "(30,40]",
            Self::Scorching => ">40",
        }
    }
}

/// Band for a temperature in °C; NaN matches nothing.
pub fn select_gradient(temp: f64) -> Option<Gradient> {
    if temp.is_nan() {
        return None;
    }
    let gradient = BANDS
        .iter()
        .find(|(upper, _)| temp <= *upper)
        .map_or(Gradient::Scorching, |(_, gradient)| *gradient);
    Some(gradient)
}

/// Where a price sits relative to the projected EMA200.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// No tick classified yet for this symbol.
    Unknown,
    Above,
    Below,
    Touch,
}

/// Classify a price against the projected EMA by relative distance.
///
/// `|d| <= touch_eps` is a touch (boundary inclusive); beyond that the sign
/// of `d` decides. Returns `None` for a non-positive or non-finite EMA, in
/// which case the tick must be skipped.
pub fn classify(price: f64, ema_now: f64, touch_eps: f64) -> Option<Side> {
    if !ema_now.is_finite() || ema_now <= 0.0 || !price.is_finite() {
        return None;
    }
    let d = (price - ema_now) / ema_now;
    if d.abs() <= touch_eps {
        Some(Side::Touch)
    } else if d > touch_eps {
        Some(Side::Above)
    } else {
        Some(Side::Below)
    }
}

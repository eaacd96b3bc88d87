use super::classifier::Side;

/// Discrete alert emitted by the touch state machine. At most one fires per
/// tick: touch events require the new side to be `Touch`, cross events
/// require it not to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertEvent {
    TouchFromAbove,
    TouchFromBelow,
    CrossUp,
    CrossDown,
}

/// Per-symbol event-detection state. Created on the first tick for a symbol
/// and kept for the life of the process; a stream reconnect does not touch
/// it.
#[derive(Debug, Clone)]
pub struct TouchState {
    /// Classification of the previous processed tick.
    last_side: Side,
    /// True while suppressing repeat touch events for the current dwell.
    in_touch_zone: bool,
    /// Price at the last zone exit or cross. Diagnostic only; the re-arm
    /// condition measures distance from the current EMA, not this anchor.
    reset_anchor: Option<f64>,
}

impl Default for TouchState {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchState {
    pub fn new() -> Self {
        Self {
            last_side: Side::Unknown,
            in_touch_zone: false,
            reset_anchor: None,
        }
    }

    pub fn last_side(&self) -> Side {
        self.last_side
    }

    pub fn in_touch_zone(&self) -> bool {
        self.in_touch_zone
    }

    pub fn reset_anchor(&self) -> Option<f64> {
        self.reset_anchor
    }

    /// Advance the state machine by one classified tick.
    ///
    /// Touch-entry and cross detection both consult the side *before* this
    /// tick. The first classified tick only seeds state. While the zone flag
    /// is set, repeat touches stay silent until the price moves `reset_eps`
    /// (relative to the current EMA, wider than the touch threshold) away
    /// from the boundary.
    pub fn step(
        &mut self,
        new_side: Side,
        price: f64,
        ema_now: f64,
        reset_eps: f64,
    ) -> Option<AlertEvent> {
        let mut event = None;

        match new_side {
            Side::Touch => {
                if !self.in_touch_zone {
                    match self.last_side {
                        Side::Above => {
                            event = Some(AlertEvent::TouchFromAbove);
                            self.in_touch_zone = true;
                            self.reset_anchor = Some(price);
                        }
                        Side::Below => {
                            event = Some(AlertEvent::TouchFromBelow);
                            self.in_touch_zone = true;
                            self.reset_anchor = Some(price);
                        }
                        Side::Touch | Side::Unknown => {}
                    }
                }
            }
            Side::Above | Side::Below => {
                match (self.last_side, new_side) {
                    (Side::Above, Side::Below) => {
                        event = Some(AlertEvent::CrossDown);
                        self.in_touch_zone = false;
                        self.reset_anchor = Some(price);
                    }
                    (Side::Below, Side::Above) => {
                        event = Some(AlertEvent::CrossUp);
                        self.in_touch_zone = false;
                        self.reset_anchor = Some(price);
                    }
                    _ => {}
                }
                if self.in_touch_zone {
                    let d = ((price - ema_now) / ema_now).abs();
                    if d >= reset_eps {
                        self.in_touch_zone = false;
                        self.reset_anchor = Some(price);
                    }
                }
            }
            Side::Unknown => {}
        }

        self.last_side = new_side;
        event
    }
}

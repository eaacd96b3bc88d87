/// Smoothing factor for an EMA with the given span: `2 / (span + 1)`.
pub fn smoothing_alpha(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

/// Exponential Moving Average over a stream of values.
///
/// The first pushed value seeds the average; every later value is folded in
/// with weight `alpha = 2/(span+1)`.
#[derive(Debug, Clone)]
pub struct Ema {
    span: usize,
    alpha: f64,
    value: Option<f64>,
}

impl Ema {
    pub fn new(span: usize) -> Self {
        assert!(span > 0, "EMA span must be > 0");
        Self {
            span,
            alpha: smoothing_alpha(span),
            value: None,
        }
    }

    /// Push a new sample and return the updated EMA.
    pub fn push(&mut self, sample: f64) -> f64 {
        let next = match self.value {
            Some(prev) => prev + (sample - prev) * self.alpha,
            None => sample,
        };
        self.value = Some(next);
        next
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn span(&self) -> usize {
        self.span
    }
}

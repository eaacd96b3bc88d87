use touchline::indicator::ema::{smoothing_alpha, Ema};

#[test]
fn first_sample_seeds() {
    let mut ema = Ema::new(3);
    assert_eq!(ema.value(), None);
    let v = ema.push(2.0);
    assert!((v - 2.0).abs() < f64::EPSILON);
    assert_eq!(ema.value(), Some(v));
}

#[test]
fn recursive_smoothing() {
    // span 3 -> alpha 0.5
    let mut ema = Ema::new(3);
    ema.push(2.0);
    let v = ema.push(6.0);
    assert!((v - 4.0).abs() < f64::EPSILON);
    let v = ema.push(8.0);
    assert!((v - 6.0).abs() < f64::EPSILON);
}

#[test]
fn span_one_tracks_input() {
    let mut ema = Ema::new(1);
    assert!((ema.push(42.0) - 42.0).abs() < f64::EPSILON);
    assert!((ema.push(99.0) - 99.0).abs() < f64::EPSILON);
}

#[test]
fn alpha_formula() {
    assert!((smoothing_alpha(200) - 2.0 / 201.0).abs() < 1e-15);
    assert!((Ema::new(200).alpha() - 2.0 / 201.0).abs() < 1e-15);
    assert_eq!(Ema::new(200).span(), 200);
}

#[test]
#[should_panic(expected = "EMA span must be > 0")]
fn zero_span_panics() {
    Ema::new(0);
}

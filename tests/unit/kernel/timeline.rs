use super::*;

#[test]
fn sine_curve_hits_endpoints() {
    assert_eq!(Curve::Sine.apply(0.0), 0.0);
    assert_eq!(Curve::Sine.apply(1.0), 1.0);
    assert!((Curve::Sine.apply(0.5) - 0.5).abs() < 1e-12);
}

#[test]
fn sine_curve_is_monotonic() {
    let samples: Vec<f64> = (0..=100).map(|i| Curve::Sine.apply(i as f64 / 100.0)).collect();
    assert!(samples.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn curve_clamps_input() {
    assert_eq!(Curve::Linear.apply(-1.0), 0.0);
    assert_eq!(Curve::Linear.apply(3.0), 1.0);
}

#[test]
fn progress_runs_from_zero_to_one() {
    let start = Instant::now();
    let tl = Timeline::new(start, Duration::from_millis(200), Curve::Linear);

    assert_eq!(tl.progress(start), 0.0);
    assert!((tl.progress(start + Duration::from_millis(50)) - 0.25).abs() < 1e-9);
    assert!(!tl.is_finished(start + Duration::from_millis(199)));
    assert!(tl.is_finished(start + Duration::from_millis(200)));
    assert_eq!(tl.progress(start + Duration::from_secs(5)), 1.0);
}

#[test]
fn zero_duration_finishes_immediately() {
    let start = Instant::now();
    let tl = Timeline::new(start, Duration::ZERO, Curve::Sine);
    assert!(tl.is_finished(start));
    assert_eq!(tl.progress(start), 1.0);
}

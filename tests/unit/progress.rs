use super::*;

#[test]
fn reported_values_never_decrease() {
    let mut vals = Vec::new();
    let mut rep = ProgressReporter::new(|f| vals.push(f));
    rep.report(0.3);
    rep.report(0.2);
    rep.report(0.4);
    assert_eq!(rep.last(), 0.4);
    assert_eq!(vals, vec![0.3, 0.3, 0.4]);
}

#[test]
fn values_are_clamped_into_unit_range() {
    let mut vals = Vec::new();
    let mut rep = ProgressReporter::new(|f| vals.push(f));
    rep.report(-0.5);
    rep.report(1.5);
    rep.report(f64::NAN);
    assert_eq!(vals, vec![0.0, 1.0, 1.0]);
}

#[test]
fn capture_steps_map_into_first_half() {
    let mut vals = Vec::new();
    let mut rep = ProgressReporter::new(|f| vals.push(f));
    rep.capture_step(1, 4);
    rep.capture_step(2, 4);
    rep.capture_step(4, 4);
    assert_eq!(vals, vec![0.125, 0.25, 0.5]);
}

#[test]
fn encode_steps_map_into_second_half_and_end_at_one() {
    let mut vals = Vec::new();
    let mut rep = ProgressReporter::new(|f| vals.push(f));
    rep.encode_step(1, 2);
    rep.encode_step(2, 2);
    assert_eq!(vals, vec![0.75, 1.0]);
}

#[test]
fn zero_total_reports_phase_floor() {
    let mut vals = Vec::new();
    let mut rep = ProgressReporter::new(|f| vals.push(f));
    rep.capture_step(0, 0);
    rep.encode_step(0, 0);
    assert_eq!(vals, vec![0.0, 0.5]);
}

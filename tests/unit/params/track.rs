use super::*;

fn float_track(mode: InterpMode) -> ValueTrack {
    let mut track = ValueTrack::new(mode);
    track.insert(FrameIndex(10), ParamValue::Float(3.0));
    track.insert(FrameIndex(0), ParamValue::Float(1.0));
    track
}

#[test]
fn empty_track_samples_nothing() {
    assert_eq!(ValueTrack::default().sample(FrameIndex(0)), None);
}

#[test]
fn insert_keeps_keys_sorted_and_unique() {
    let mut track = float_track(InterpMode::Linear);
    track.insert(FrameIndex(10), ParamValue::Float(5.0));
    let frames: Vec<u64> = track.keys().iter().map(|k| k.frame.0).collect();
    assert_eq!(frames, vec![0, 10]);
    assert_eq!(track.sample(FrameIndex(10)), Some(ParamValue::Float(5.0)));
}

#[test]
fn hold_is_constant_between_keys() {
    let track = float_track(InterpMode::Hold);
    assert_eq!(track.sample(FrameIndex(5)), Some(ParamValue::Float(1.0)));
    assert_eq!(track.sample(FrameIndex(10)), Some(ParamValue::Float(3.0)));
}

#[test]
fn linear_interpolates_and_clamps_outside() {
    let track = float_track(InterpMode::Linear);
    assert_eq!(track.sample(FrameIndex(5)), Some(ParamValue::Float(2.0)));
    assert_eq!(track.sample(FrameIndex(50)), Some(ParamValue::Float(3.0)));

    let mut shifted = ValueTrack::new(InterpMode::Linear);
    shifted.insert(FrameIndex(4), ParamValue::Float(7.0));
    assert_eq!(shifted.sample(FrameIndex(0)), Some(ParamValue::Float(7.0)));
}

#[test]
fn vec2_interpolates_per_component() {
    let mut track = ValueTrack::new(InterpMode::Linear);
    track.insert(FrameIndex(0), ParamValue::Vec2([0.0, 1.0]));
    track.insert(FrameIndex(4), ParamValue::Vec2([1.0, 0.0]));
    assert_eq!(
        track.sample(FrameIndex(1)),
        Some(ParamValue::Vec2([0.25, 0.75]))
    );
}

#[test]
fn discrete_values_hold() {
    let mut track = ValueTrack::new(InterpMode::Linear);
    track.insert(FrameIndex(0), ParamValue::Boolean(false));
    track.insert(FrameIndex(2), ParamValue::Boolean(true));
    assert_eq!(track.sample(FrameIndex(1)), Some(ParamValue::Boolean(false)));
}

#[test]
fn remove_returns_value() {
    let mut track = float_track(InterpMode::Linear);
    assert_eq!(track.remove(FrameIndex(0)), Some(ParamValue::Float(1.0)));
    assert_eq!(track.remove(FrameIndex(0)), None);
    assert_eq!(track.keys().len(), 1);
}

use channelcore::math::{Quaternion, Vec3};
use channelcore::prelude::{ChannelError, ChannelLayout, TransformConfig};
use channelcore::{format_frames, parse_frames, transform, Frame};

const LAYOUT: ChannelLayout = ChannelLayout::PositionFirst;

fn captured_frames(frame_count: usize, joints: usize) -> Vec<Frame> {
    (0..frame_count)
        .map(|t| {
            let channels = (0..joints * 6)
                .map(|c| {
                    if t == 0 && c < 3 {
                        (c + 1) as f64
                    } else {
                        ((t * 31 + c * 17) % 23) as f64 * 0.07 - 0.8
                    }
                })
                .collect();
            Frame::new(channels)
        })
        .collect()
}

#[test]
fn three_frame_scenario_pins_spins_and_freezes() {
    let config = TransformConfig::default();
    let input = captured_frames(3, 14);
    assert_eq!(input[0].position(0, LAYOUT), Some(Vec3::new(1.0, 2.0, 3.0)));

    let output = transform(&input, &config).unwrap();
    let frame = &output[2];

    assert_eq!(frame.position(0, LAYOUT), Some(Vec3::new(1.0, 2.0, 3.0)));
    let expected = Quaternion::from_axis_angle_deg(Vec3::Z, 2.0 * config.spin_rate_deg).to_rotvec();
    assert_eq!(frame.rotation(13, LAYOUT), Some(expected));
    assert_eq!(frame.rotation(5, LAYOUT), Some(Vec3::ZERO));
}

#[test]
fn transform_is_deterministic_and_shape_preserving() {
    let config = TransformConfig::default();
    let input = captured_frames(12, 20);
    let first = transform(&input, &config).unwrap();
    let second = transform(&input, &config).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), input.len());
    assert!(first
        .iter()
        .all(|frame| frame.channel_count() == input[0].channel_count()));
}

#[test]
fn spin_ignores_captured_target_rotation() {
    let config = TransformConfig::default();
    let a = captured_frames(6, 14);
    let mut b = a.clone();
    for frame in &mut b {
        let mut channels = frame.clone().into_channels();
        channels[13 * 6 + 3..13 * 6 + 6].copy_from_slice(&[2.0, -1.0, 0.5]);
        *frame = Frame::new(channels);
    }
    let out_a = transform(&a, &config).unwrap();
    let out_b = transform(&b, &config).unwrap();
    for (x, y) in out_a.iter().zip(out_b.iter()) {
        assert_eq!(x.rotation(13, LAYOUT), y.rotation(13, LAYOUT));
    }
}

#[test]
fn synthetic_skeleton_with_custom_target() {
    let config = TransformConfig {
        target_joint: 2,
        spin_axis: Vec3::Y,
        spin_rate_deg: 10.0,
        ..Default::default()
    };
    let output = transform(&captured_frames(4, 3), &config).unwrap();
    let expected = Quaternion::from_axis_angle_deg(Vec3::Y, 30.0).to_rotvec();
    assert_eq!(output[3].rotation(2, LAYOUT), Some(expected));
    assert_eq!(output[3].rotation(1, LAYOUT), Some(Vec3::ZERO));
}

#[test]
fn empty_input_yields_empty_output() {
    assert!(transform(&[], &TransformConfig::default()).unwrap().is_empty());
}

#[test]
fn malformed_text_produces_no_frames() {
    let text = "0 0 0 0 0 0\n0 0 0 0 nan? 0\n";
    assert!(matches!(
        parse_frames(text),
        Err(ChannelError::Parse { line: 2, .. })
    ));
}

#[test]
fn text_pipeline_round_trips_transformed_values() {
    let config = TransformConfig::default();
    let input = captured_frames(5, 14);
    let output = transform(&input, &config).unwrap();
    let text = format_frames(&output);
    assert_eq!(text.lines().count(), 5);
    assert_eq!(parse_frames(&text).unwrap(), output);
}

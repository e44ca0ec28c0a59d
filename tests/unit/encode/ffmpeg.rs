use super::*;

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps::new(10, 1).unwrap(),
    }
}

#[test]
fn flatten_premul_alpha_0_returns_bg() {
    let src = vec![0u8, 0, 0, 0];
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg(&mut dst, &src, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn flatten_premul_alpha_255_is_identity() {
    let src = vec![1u8, 2, 3, 255];
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg(&mut dst, &src, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn flatten_straight_half_alpha_blends() {
    let src = vec![255u8, 0, 0, 128];
    let mut dst = vec![0u8; 4];
    flatten_straight_over_bg(&mut dst, &src, [0, 0, 255, 255]).unwrap();
    assert_eq!(dst, vec![128, 0, 127, 255]);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(flatten_premul_over_bg(&mut dst, &[0u8; 4], [0, 0, 0, 255]).is_err());
}

#[test]
fn odd_or_zero_sizes_are_rejected_before_spawning() {
    assert!(validate_sink_config(&cfg(1300, 900)).is_ok());
    assert!(validate_sink_config(&cfg(1301, 900)).is_err());
    assert!(validate_sink_config(&cfg(0, 900)).is_err());
    let zero_fps = SinkConfig {
        fps: Fps { num: 0, den: 1 },
        ..cfg(2, 2)
    };
    assert!(validate_sink_config(&zero_fps).is_err());

    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/ffmpeg_unit/odd.mp4"));
    let err = sink.begin(cfg(3, 2)).unwrap_err();
    assert!(matches!(err, ChoroError::Validation(_)));
}

#[test]
fn output_args_carry_bitrate_and_artist() {
    let mut opts = FfmpegSinkOpts::new("out/covid.mp4");
    opts.artist = Some("Me".to_string());
    let args = opts.output_args();
    let pos = args.iter().position(|a| a == "-b:v").unwrap();
    assert_eq!(args[pos + 1], "4000k");
    let pos = args.iter().position(|a| a == "-metadata").unwrap();
    assert_eq!(args[pos + 1], "artist=Me");
    assert_eq!(args.last().map(String::as_str), Some("out/covid.mp4"));

    let plain = FfmpegSinkOpts::new("a.mp4").output_args();
    assert!(!plain.iter().any(|a| a == "-metadata"));
}

#[test]
fn push_before_begin_is_error() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/ffmpeg_unit/never.mp4"));
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: true,
    };
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    assert!(sink.end().is_err());
}

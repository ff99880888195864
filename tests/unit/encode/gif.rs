use super::*;
use crate::foundation::core::Fps;
use crate::render::raster::FrameRGBA;

fn solid_frame(width: u32, height: u32, rgba: [u8; 4]) -> EncodedFrame {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for _ in 0..width * height {
        data.extend_from_slice(&rgba);
    }
    EncodedFrame {
        pixels: FrameRGBA {
            width,
            height,
            data,
        },
        delay_ms: 100,
    }
}

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps(10),
    }
}

fn encode(opts: GifOpts, frames: &[EncodedFrame]) -> Artifact {
    let mut sink = GifSink::new(opts);
    sink.begin(cfg(frames[0].pixels.width, frames[0].pixels.height))
        .unwrap();
    for (i, f) in frames.iter().enumerate() {
        sink.push_frame(FrameIndex(i as u64), f).unwrap();
    }
    sink.end().unwrap()
}

#[test]
fn delay_rounds_to_centiseconds_with_a_floor_of_one() {
    assert_eq!(delay_cs(100), 10);
    assert_eq!(delay_cs(200), 20);
    assert_eq!(delay_cs(33), 3);
    assert_eq!(delay_cs(67), 7);
    assert_eq!(delay_cs(1), 1);
}

#[test]
fn begin_rejects_bad_options() {
    let mut sink = GifSink::new(GifOpts {
        speed: 0,
        ..GifOpts::default()
    });
    assert!(sink.begin(cfg(2, 2)).is_err());

    let mut sink = GifSink::new(GifOpts {
        speed: 31,
        ..GifOpts::default()
    });
    assert!(sink.begin(cfg(2, 2)).is_err());

    let mut sink = GifSink::new(GifOpts::default());
    assert!(
        sink.begin(SinkConfig {
            width: 0,
            height: 2,
            fps: Fps(10),
        })
        .is_err()
    );
}

#[test]
fn push_rejects_mismatched_frames() {
    let mut sink = GifSink::new(GifOpts::default());
    sink.begin(cfg(4, 4)).unwrap();
    let err = sink.push_frame(FrameIndex(0), &solid_frame(2, 2, [0, 0, 0, 255]));
    assert!(matches!(err, Err(FlipbookError::Encode(_))));
}

#[test]
fn end_without_frames_is_an_encode_error() {
    let mut sink = GifSink::new(GifOpts::default());
    sink.begin(cfg(2, 2)).unwrap();
    assert!(matches!(sink.end(), Err(FlipbookError::Encode(_))));
}

#[test]
fn artifact_is_a_gif89a_container() {
    let frames = [
        solid_frame(8, 8, [255, 0, 0, 255]),
        solid_frame(8, 8, [0, 255, 0, 255]),
        solid_frame(8, 8, [0, 0, 255, 255]),
    ];
    let artifact = encode(GifOpts::default(), &frames);
    assert_eq!(artifact.mime, MIME_GIF);
    assert_eq!(&artifact.bytes[0..6], b"GIF89a");

    // Logical screen descriptor carries the frame dimensions.
    let width = u16::from_le_bytes([artifact.bytes[6], artifact.bytes[7]]);
    let height = u16::from_le_bytes([artifact.bytes[8], artifact.bytes[9]]);
    assert_eq!(width, 8);
    assert_eq!(height, 8);
}

#[test]
fn decoded_artifact_preserves_frame_count_and_size() {
    use image::AnimationDecoder as _;

    let frames: Vec<_> = (0..5u8)
        .map(|i| solid_frame(10, 10, [i * 40, 0, 0, 255]))
        .collect();
    let artifact = encode(GifOpts::default(), &frames);

    let decoder =
        image::codecs::gif::GifDecoder::new(std::io::Cursor::new(artifact.bytes)).unwrap();
    let decoded = decoder.into_frames().collect_frames().unwrap();
    assert_eq!(decoded.len(), 5);
    assert_eq!(decoded[0].buffer().width(), 10);
    assert_eq!(decoded[0].buffer().height(), 10);
}

#[test]
fn parallel_quantization_matches_sequential_bytes() {
    let frames: Vec<_> = (0..20u8)
        .map(|i| solid_frame(6, 6, [10 + i * 10, 255 - i * 10, i * 5, 255]))
        .collect();

    let sequential = encode(GifOpts::default(), &frames);
    let parallel = encode(
        GifOpts {
            speed: 10,
            threading: EncodeThreading {
                parallel: true,
                chunk_size: 4,
                threads: Some(3),
            },
        },
        &frames,
    );

    assert_eq!(sequential, parallel);
}

#[test]
fn zero_worker_threads_is_rejected_before_any_frame_is_consumed() {
    let mut sink = GifSink::new(GifOpts {
        speed: 10,
        threading: EncodeThreading {
            parallel: true,
            chunk_size: 4,
            threads: Some(0),
        },
    });
    assert!(matches!(
        sink.begin(cfg(2, 2)),
        Err(FlipbookError::Validation(_))
    ));
}

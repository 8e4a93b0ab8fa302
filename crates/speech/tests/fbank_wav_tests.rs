use speech::asr::features::{NUM_MEL_BINS, compute_fbank, num_frames};

/// Write a short sine tone to a wav file, read it back, and run the feature
/// front end on it.
#[test]
fn test_fbank_from_wav_roundtrip() {
    let path = std::env::temp_dir().join(format!("gesty-fbank-{}.wav", std::process::id()));

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 16000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    for i in 0..8000u32 {
        let t = i as f32 / 16000.0;
        let sample = (t * 440.0 * 2.0 * std::f32::consts::PI).sin();
        writer.write_sample((sample * 12000.0) as i16).unwrap();
    }
    writer.finalize().unwrap();

    let mut reader = hound::WavReader::open(&path).unwrap();
    let pcm: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(pcm.len(), 8000);

    let fbank = compute_fbank(&pcm, 16000).unwrap();
    assert_eq!(fbank.frames, num_frames(8000, 16000));
    assert_eq!(fbank.data.len(), fbank.frames * NUM_MEL_BINS);

    // A 440Hz tone has finite log-energy everywhere
    assert!(fbank.data.iter().all(|v| v.is_finite()));

    std::fs::remove_file(path).ok();
}

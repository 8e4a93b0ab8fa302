use crate::SpeechError;
use std::f32::consts::PI;

const REQUIRED_SAMPLE_RATE: usize = 16000;
const WINDOW_SIZE_MS: usize = 25;
const HOP_SIZE_MS: usize = 10;
const FFT_SIZE: usize = 512;
const PRE_EMPHASIS: f32 = 0.97;

pub const NUM_MEL_BINS: usize = 80;

/// Log-mel filterbank features, `frames` rows of `NUM_MEL_BINS` values.
#[derive(Clone, Debug)]
pub struct Fbank {
    pub frames: usize,
    pub data: Vec<f32>,
}

/// Number of feature frames produced for a given sample count.
pub fn num_frames(samples: usize, sample_rate: usize) -> usize {
    let window = (WINDOW_SIZE_MS * sample_rate) / 1000;
    let hop = (HOP_SIZE_MS * sample_rate) / 1000;
    if samples < window {
        return 0;
    }
    (samples - window) / hop + 1
}

/// Compute 80-dimensional log-mel filterbank features from 16kHz PCM.
///
/// Kaldi-style fbank: 25ms Hann window, 10ms hop, pre-emphasis 0.97.
///
/// # Errors
///
/// Returns `SpeechError::Runtime` for a wrong sample rate or audio shorter
/// than one window.
pub fn compute_fbank(pcm: &[i16], sample_rate: usize) -> Result<Fbank, SpeechError> {
    if sample_rate != REQUIRED_SAMPLE_RATE {
        return Err(SpeechError::Runtime(format!(
            "fbank requires {} Hz audio, got {} Hz",
            REQUIRED_SAMPLE_RATE, sample_rate
        )));
    }

    let window_size = (WINDOW_SIZE_MS * sample_rate) / 1000;
    let hop_size = (HOP_SIZE_MS * sample_rate) / 1000;

    if pcm.len() < window_size {
        return Err(SpeechError::Runtime(format!(
            "audio too short: {} samples, need at least {}",
            pcm.len(),
            window_size
        )));
    }

    // Normalize and pre-emphasize
    let mut signal = vec![0.0f32; pcm.len()];
    signal[0] = pcm[0] as f32 / 32768.0;
    for i in 1..pcm.len() {
        signal[i] = (pcm[i] as f32 / 32768.0) - PRE_EMPHASIS * (pcm[i - 1] as f32 / 32768.0);
    }

    let hann: Vec<f32> = (0..window_size)
        .map(|i| 0.5 - 0.5 * ((2.0 * PI * i as f32) / (window_size - 1) as f32).cos())
        .collect();

    let mel_filters = mel_filterbank(sample_rate, FFT_SIZE, NUM_MEL_BINS);

    let frames = num_frames(pcm.len(), sample_rate);
    let mut data = Vec::with_capacity(frames * NUM_MEL_BINS);

    for frame_idx in 0..frames {
        let start = frame_idx * hop_size;

        let mut windowed: Vec<f32> = signal[start..start + window_size]
            .iter()
            .zip(hann.iter())
            .map(|(s, w)| s * w)
            .collect();
        windowed.resize(FFT_SIZE, 0.0);

        let power = power_spectrum(&windowed);

        for filter in &mel_filters {
            let mut energy = 0.0f32;
            for &(bin, weight) in filter {
                energy += power[bin] * weight;
            }
            // avoid log(0)
            data.push((energy + 1e-10).ln());
        }
    }

    Ok(Fbank { frames, data })
}

/// Power spectrum of a windowed signal via direct DFT.
fn power_spectrum(signal: &[f32]) -> Vec<f32> {
    let n = signal.len();
    let mut power = vec![0.0; n / 2 + 1];

    for (k, p) in power.iter_mut().enumerate() {
        let mut real = 0.0;
        let mut imag = 0.0;
        for (t, &sample) in signal.iter().enumerate() {
            let angle = -2.0 * PI * k as f32 * t as f32 / n as f32;
            real += sample * angle.cos();
            imag += sample * angle.sin();
        }
        *p = real * real + imag * imag;
    }

    power
}

fn hz_to_mel(hz: f32) -> f32 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

fn mel_to_hz(mel: f32) -> f32 {
    700.0 * (10.0f32.powf(mel / 2595.0) - 1.0)
}

/// Triangular mel filters as sparse (bin, weight) lists.
fn mel_filterbank(sample_rate: usize, fft_size: usize, num_bins: usize) -> Vec<Vec<(usize, f32)>> {
    let mel_low = hz_to_mel(0.0);
    let mel_high = hz_to_mel(sample_rate as f32 / 2.0);

    let hz_points: Vec<f32> = (0..=num_bins + 1)
        .map(|i| mel_low + (mel_high - mel_low) * i as f32 / (num_bins + 1) as f32)
        .map(mel_to_hz)
        .collect();

    let bin_points: Vec<usize> = hz_points
        .iter()
        .map(|&freq| ((freq * fft_size as f32 / sample_rate as f32) + 0.5).floor() as usize)
        .collect();

    let mut filters = Vec::with_capacity(num_bins);
    for i in 0..num_bins {
        let (left, center, right) = (bin_points[i], bin_points[i + 1], bin_points[i + 2]);
        let mut filter = Vec::new();

        for bin in left..center {
            let weight = (bin - left) as f32 / (center - left) as f32;
            if weight > 0.0 {
                filter.push((bin, weight));
            }
        }
        for bin in center..right {
            let weight = (right - bin) as f32 / (right - center) as f32;
            if weight > 0.0 {
                filter.push((bin, weight));
            }
        }

        filters.push(filter);
    }

    filters
}

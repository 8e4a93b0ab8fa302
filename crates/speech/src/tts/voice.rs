//! Kokoro voice assets: the phoneme vocabulary and NPY voice-style files.

use crate::SpeechError;
use std::collections::HashMap;
use std::path::Path;

// Symbol inventory of the Kokoro phoneme vocabulary; token ID is the
// position in pad + punctuation + letters + IPA order.
const PAD: &str = "$";
const PUNCTUATION: &str = ";:,.!?¡¿—…\"«»“” ";
const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const LETTERS_IPA: &str = "ɑɐɒæɓʙβɔɕçɗɖðʤəɘɚɛɜɝɞɟʄɡɠɢʛɦɧħɥʜɨɪʝɭɬɫɮʟɱɯɰŋɳɲɴøɵɸθœɶʘɹɺɾɻʀʁɽʂʃʈʧʉʊʋⱱʌɣɤʍχʎʏʑʐʒʔʡʕʢǀǁǂǃˈˌːˑʼʴʰʱʲʷˠˤ˞↓↑→↗↘'̩ᵻ";

/// Phoneme character to token ID.
pub fn vocab() -> HashMap<char, i64> {
    let mut map = HashMap::new();
    for (id, c) in PAD
        .chars()
        .chain(PUNCTUATION.chars())
        .chain(LETTERS.chars())
        .chain(LETTERS_IPA.chars())
        .enumerate()
    {
        map.insert(c, id as i64);
    }
    map
}

/// Map a phoneme string to token IDs, skipping characters outside the
/// vocabulary.
pub fn tokenize(phonemes: &str, vocab: &HashMap<char, i64>) -> Vec<i64> {
    phonemes.chars().filter_map(|c| vocab.get(&c).copied()).collect()
}

// One 256-float style vector per possible token count.
const STYLE_DIM: usize = 256;
const STYLE_ROWS: usize = 510;

/// Load and validate an NPY voice-style file (510x256 f32).
pub fn load_voice_style(path: impl AsRef<Path>) -> Result<Vec<f32>, SpeechError> {
    let bytes = std::fs::read(path.as_ref()).map_err(|e| {
        SpeechError::Io(format!(
            "failed to read voice file {}: {}",
            path.as_ref().display(),
            e
        ))
    })?;

    if bytes.len() < 6 || &bytes[0..6] != b"\x93NUMPY" {
        return Err(SpeechError::Runtime(
            "invalid NPY file: missing magic bytes".to_string(),
        ));
    }

    if bytes.len() < 128 {
        return Err(SpeechError::Runtime(
            "invalid NPY file: too small for header".to_string(),
        ));
    }

    // Fixed 128-byte header, then little-endian f32 data
    let style: Vec<f32> = bytes[128..]
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    if style.len() != STYLE_ROWS * STYLE_DIM {
        return Err(SpeechError::Runtime(format!(
            "voice file wrong size: expected {} f32s, got {}",
            STYLE_ROWS * STYLE_DIM,
            style.len()
        )));
    }

    Ok(style)
}

/// Select the style vector for an utterance of `token_count` tokens.
pub fn style_slice(style: &[f32], token_count: usize) -> &[f32] {
    let row = token_count.min(STYLE_ROWS - 1);
    &style[row * STYLE_DIM..(row + 1) * STYLE_DIM]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocab_pad_is_zero() {
        let v = vocab();
        assert_eq!(v[&'$'], 0);
    }

    #[test]
    fn test_vocab_ids_unique() {
        let v = vocab();
        let mut ids: Vec<i64> = v.values().copied().collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), v.len());
    }

    #[test]
    fn test_tokenize_skips_unknown() {
        let v = vocab();
        let with_unknown = tokenize("a\u{1F600}b", &v);
        let without = tokenize("ab", &v);
        assert_eq!(with_unknown, without);
        assert_eq!(with_unknown.len(), 2);
    }

    #[test]
    fn test_tokenize_space_is_known() {
        let v = vocab();
        assert_eq!(tokenize("a b", &v).len(), 3);
    }

    fn temp_file(name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("gesty-voice-{}-{}", std::process::id(), name));
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_load_voice_style_missing_magic() {
        let path = temp_file("magic", b"not an npy file");
        let err = load_voice_style(&path).unwrap_err().to_string();
        assert!(err.contains("magic"), "unexpected error: {}", err);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_voice_style_truncated_header() {
        let mut bytes = b"\x93NUMPY".to_vec();
        bytes.extend_from_slice(&[0u8; 50]);
        let path = temp_file("header", &bytes);
        let err = load_voice_style(&path).unwrap_err().to_string();
        assert!(err.contains("header"), "unexpected error: {}", err);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_voice_style_wrong_size() {
        let mut bytes = b"\x93NUMPY".to_vec();
        bytes.resize(128, 0);
        bytes.extend_from_slice(&1.0f32.to_le_bytes());
        let path = temp_file("size", &bytes);
        let err = load_voice_style(&path).unwrap_err().to_string();
        assert!(err.contains("wrong size"), "unexpected error: {}", err);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_voice_style_valid() {
        let mut bytes = b"\x93NUMPY".to_vec();
        bytes.resize(128, 0);
        for i in 0..(STYLE_ROWS * STYLE_DIM) {
            bytes.extend_from_slice(&(i as f32).to_le_bytes());
        }
        let path = temp_file("valid", &bytes);
        let style = load_voice_style(&path).unwrap();
        assert_eq!(style.len(), STYLE_ROWS * STYLE_DIM);

        // Row selection, including the clamp at the last row
        assert_eq!(style_slice(&style, 0)[0], 0.0);
        assert_eq!(style_slice(&style, 2)[0], (2 * STYLE_DIM) as f32);
        let clamped = style_slice(&style, 10_000);
        assert_eq!(clamped[0], ((STYLE_ROWS - 1) * STYLE_DIM) as f32);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_voice_style_missing_file() {
        assert!(load_voice_style("/nonexistent/voice.npy").is_err());
    }
}

//! Text-to-IPA phonemization through espeak-ng.

use std::ffi::{CStr, CString, c_char};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

// espeak-ng keeps global state, so all calls are serialized
static ESPEAK_MUTEX: Mutex<()> = Mutex::new(());
static ESPEAK_INITIALIZED: AtomicBool = AtomicBool::new(false);

// Clause terminator constants from espeak-ng
const CLAUSE_INTONATION_FULL_STOP: i32 = 0x00000000;
const CLAUSE_INTONATION_COMMA: i32 = 0x00001000;
const CLAUSE_INTONATION_QUESTION: i32 = 0x00002000;
const CLAUSE_INTONATION_EXCLAMATION: i32 = 0x00003000;
const CLAUSE_TYPE_CLAUSE: i32 = 0x00040000;
const CLAUSE_TYPE_SENTENCE: i32 = 0x00080000;

const CLAUSE_PERIOD: i32 = 40 | CLAUSE_INTONATION_FULL_STOP | CLAUSE_TYPE_SENTENCE;
const CLAUSE_COMMA: i32 = 20 | CLAUSE_INTONATION_COMMA | CLAUSE_TYPE_CLAUSE;
const CLAUSE_QUESTION: i32 = 40 | CLAUSE_INTONATION_QUESTION | CLAUSE_TYPE_SENTENCE;
const CLAUSE_EXCLAMATION: i32 = 45 | CLAUSE_INTONATION_EXCLAMATION | CLAUSE_TYPE_SENTENCE;
const CLAUSE_COLON: i32 = 30 | CLAUSE_INTONATION_FULL_STOP | CLAUSE_TYPE_CLAUSE;
const CLAUSE_SEMICOLON: i32 = 30 | CLAUSE_INTONATION_COMMA | CLAUSE_TYPE_CLAUSE;

#[link(name = "espeak-ng")]
unsafe extern "C" {
    fn espeak_Initialize(output: i32, buflength: i32, path: *const c_char, options: i32) -> i32;
    fn espeak_SetVoiceByName(name: *const c_char) -> i32;
    fn espeak_TextToPhonemesWithTerminator(
        textptr: *mut *const c_char,
        textmode: i32,
        phonememode: i32,
        terminator: *mut i32,
    ) -> *const c_char;
}

/// Initialize espeak-ng with an en-us voice.
///
/// `data_path` points to the espeak-ng data directory (None for the system
/// default). Safe to call more than once; later calls are no-ops.
pub fn espeak_init(data_path: Option<&str>) -> Result<(), String> {
    let _guard = ESPEAK_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

    if ESPEAK_INITIALIZED.load(Ordering::Acquire) {
        return Ok(());
    }

    unsafe {
        let path_cstring;
        let path_ptr = if let Some(path) = data_path {
            path_cstring = CString::new(path).map_err(|e| format!("invalid data path: {}", e))?;
            path_cstring.as_ptr()
        } else {
            std::ptr::null()
        };

        // AUDIO_OUTPUT_SYNCHRONOUS = 2; buflength and options unused here
        let result = espeak_Initialize(2, 0, path_ptr, 0);
        if result < 0 {
            return Err(format!("espeak_Initialize failed with code {}", result));
        }

        let voice = CString::new("en-us").map_err(|e| e.to_string())?;
        let voice_result = espeak_SetVoiceByName(voice.as_ptr());
        if voice_result != 0 {
            return Err(format!(
                "espeak_SetVoiceByName failed with code {}",
                voice_result
            ));
        }
    }

    ESPEAK_INITIALIZED.store(true, Ordering::Release);
    Ok(())
}

/// Convert text to IPA phonemes, clause by clause, re-attaching the
/// punctuation espeak-ng reports through the terminator value.
pub fn phonemize(text: &str) -> Result<String, String> {
    let _guard = ESPEAK_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

    if !ESPEAK_INITIALIZED.load(Ordering::Acquire) {
        return Err("espeak-ng not initialized, call espeak_init first".to_string());
    }

    let text_cstr = CString::new(text).map_err(|e| format!("invalid text: {}", e))?;
    let mut text_ptr: *const c_char = text_cstr.as_ptr();
    let mut result = String::new();

    unsafe {
        loop {
            let mut terminator: i32 = 0;

            // textmode 0 = plain text, phonememode 2 = IPA
            let phonemes_ptr =
                espeak_TextToPhonemesWithTerminator(&mut text_ptr, 0, 2, &mut terminator);

            if phonemes_ptr.is_null() {
                break;
            }

            let phonemes = CStr::from_ptr(phonemes_ptr)
                .to_str()
                .map_err(|e| format!("invalid UTF-8 in phonemes: {}", e))?;
            result.push_str(phonemes);

            match terminator & 0x000FFFFF {
                CLAUSE_PERIOD => result.push('.'),
                CLAUSE_QUESTION => result.push('?'),
                CLAUSE_EXCLAMATION => result.push('!'),
                CLAUSE_COMMA => result.push_str(", "),
                CLAUSE_COLON => result.push_str(": "),
                CLAUSE_SEMICOLON => result.push_str("; "),
                _ => {}
            }

            if text_ptr.is_null() || *text_ptr == 0 {
                break;
            }
        }
    }

    Ok(result)
}

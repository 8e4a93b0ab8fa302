mod app;
mod pipeline;
mod shell;

use app::GestyApp;
use camera::CameraConfig;
use eframe::egui;
use hands::HandDetector;
use shell::Shell;
use speech::{CtcEngine, KokoroTts, Recognizer, SileroVad, Speaker};

const HAND_MODEL_PATH: &str = "data/hands/hand-pose.onnx";
const ASR_MODEL_PATH: &str = "data/asr/ctc.onnx";
const ASR_TOKENS_PATH: &str = "data/asr/tokens.txt";
const VAD_MODEL_PATH: &str = "data/silero/silero_vad.onnx";
const TTS_MODEL_PATH: &str = "data/kokoro/kokoro-v1.0.onnx";
const TTS_VOICE_PATH: &str = "data/kokoro/af_nicole.npy";
const ESPEAK_DATA_PATH: &str = "/usr/lib/x86_64-linux-gnu/espeak-ng-data";

// a little slower than the model's native pace, for clarity
const SPEAKING_SPEED: f32 = 0.9;

const MAX_HANDS: usize = 2;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    base::init_stdout_logger();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .build()?;

    log::info!("loading hand detector");
    let detector = HandDetector::new(HAND_MODEL_PATH)?.with_max_hands(MAX_HANDS);

    log::info!("loading ASR model");
    let engine = CtcEngine::new(ASR_MODEL_PATH, ASR_TOKENS_PATH)?;
    let vad = SileroVad::new(VAD_MODEL_PATH)?;
    let recognizer = Recognizer::new(engine, vad);

    log::info!("loading TTS model");
    let tts = KokoroTts::new(TTS_MODEL_PATH, TTS_VOICE_PATH, Some(ESPEAK_DATA_PATH))?
        .with_speed(SPEAKING_SPEED);
    let speaker = Speaker::new(tts);

    let shell = Shell::new(runtime.handle().clone(), CameraConfig::default());
    let app = GestyApp::new(shell, detector, Box::new(recognizer), Box::new(speaker));

    log::info!("opening window");
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1060.0, 520.0])
            .with_resizable(false),
        ..Default::default()
    };
    eframe::run_native(
        "Hand Gesture Recognition",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )?;

    Ok(())
}

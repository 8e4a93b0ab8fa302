use crate::pipeline::{self, announce_gestures};
use crate::shell::{PUMP_INTERVAL, Shell};
use camera::Frame;
use eframe::egui;
use hands::{HandDetector, draw_hands};
use speech::{Recognize, Speak};
use std::time::Instant;

pub const VIDEO_WIDTH: usize = 640;
pub const VIDEO_HEIGHT: usize = 480;

/// The single-window shell: video surface on the left, status area and the
/// three command buttons on the right.
pub struct GestyApp {
    shell: Shell,
    detector: HandDetector,
    recognizer: Box<dyn Recognize>,
    speaker: Box<dyn Speak>,
    video_texture: Option<egui::TextureHandle>,
    last_tick: Instant,
}

impl GestyApp {
    pub fn new(
        shell: Shell,
        detector: HandDetector,
        recognizer: Box<dyn Recognize>,
        speaker: Box<dyn Speak>,
    ) -> Self {
        Self {
            shell,
            detector,
            recognizer,
            speaker,
            video_texture: None,
            last_tick: Instant::now(),
        }
    }

    /// One frame-pump cycle: read, resize, detect, announce, render.
    ///
    /// Detected gestures are spoken synchronously, so a tick can block well
    /// past the nominal 30ms cadence; the whole UI waits with it.
    fn pump_tick(&mut self, ctx: &egui::Context) {
        let Some(frame) = self.shell.read_frame() else {
            // failure already reported; the pump is stalled
            return;
        };

        let mut frame = frame.resize_to(VIDEO_WIDTH, VIDEO_HEIGHT);

        let hands = match self.detector.detect(&frame) {
            Ok(hands) => hands,
            Err(error) => {
                log::warn!("hand detection failed: {}", error);
                Vec::new()
            }
        };

        draw_hands(&mut frame, &hands);

        let fingers: Vec<[bool; 5]> = hands.iter().map(|h| h.fingers_up()).collect();
        let shell = &mut self.shell;
        announce_gestures(&fingers, self.speaker.as_mut(), &mut |msg| {
            shell.set_status(msg)
        });

        self.update_video(ctx, &frame);
    }

    fn update_video(&mut self, ctx: &egui::Context, frame: &Frame) {
        let image = egui::ColorImage::from_rgb([frame.width(), frame.height()], frame.data());
        match &mut self.video_texture {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.video_texture =
                    Some(ctx.load_texture("video", image, egui::TextureOptions::LINEAR))
            }
        }
    }

    /// The blocking push-to-talk path. Freezes rendering and buttons until
    /// the transcription result is in.
    fn run_speech_recognition(&mut self) {
        let shell = &mut self.shell;
        pipeline::run_speech_input(self.recognizer.as_mut(), &mut |msg| {
            shell.set_status(msg)
        });
    }

    fn stop(&mut self, ctx: &egui::Context) {
        self.shell.stop_camera();
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }
}

impl eframe::App for GestyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // cooperative frame pump: one tick per interval while running
        if self.shell.is_running() && self.last_tick.elapsed() >= PUMP_INTERVAL {
            self.pump_tick(ctx);
            self.last_tick = Instant::now();
        }

        egui::SidePanel::right("controls")
            .resizable(false)
            .min_width(380.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                egui::ScrollArea::vertical()
                    .max_height(320.0)
                    .show(ui, |ui| {
                        let width = ui.available_width();
                        ui.add_sized(
                            [width, 300.0],
                            egui::TextEdit::multiline(self.shell.status_buffer())
                                .interactive(false),
                        );
                    });

                ui.add_space(12.0);
                if ui
                    .add_sized([280.0, 40.0], egui::Button::new("Start Speech Recognition"))
                    .clicked()
                {
                    self.run_speech_recognition();
                }

                ui.add_space(6.0);
                if ui
                    .add_sized([280.0, 40.0], egui::Button::new("Start Camera Capture"))
                    .clicked()
                {
                    self.shell.start_camera();
                    self.last_tick = Instant::now() - PUMP_INTERVAL;
                }

                ui.add_space(6.0);
                if ui
                    .add_sized([280.0, 40.0], egui::Button::new("Stop Application"))
                    .clicked()
                {
                    self.stop(ctx);
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            match &self.video_texture {
                Some(texture) => {
                    ui.image((
                        texture.id(),
                        egui::vec2(VIDEO_WIDTH as f32, VIDEO_HEIGHT as f32),
                    ));
                }
                None => {
                    // dark placeholder until the pump renders a frame
                    let (rect, _) = ui.allocate_exact_size(
                        egui::vec2(VIDEO_WIDTH as f32, VIDEO_HEIGHT as f32),
                        egui::Sense::hover(),
                    );
                    ui.painter().rect_filled(rect, 0.0, egui::Color32::from_gray(24));
                }
            }
        });

        if self.shell.is_running() {
            ctx.request_repaint_after(PUMP_INTERVAL);
        }
    }
}

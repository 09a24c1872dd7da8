//! Glissando - audio setup and the shared scene

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use rtrb::RingBuffer;
use std::{
    io,
    sync::{Arc, Mutex},
};

use glissando::{scene::Scene, synth::SynthAllocator, SketchConfig, MAX_BLOCK_SIZE};

use super::ui::UiApp;

/// Samples the audio thread can get ahead of the oscilloscope
const SCOPE_RING_SIZE: usize = 8192;

/// Main application builder
pub struct Glissando {
    config: SketchConfig,
}

impl Glissando {
    pub fn new() -> Self {
        Self {
            config: SketchConfig::default(),
        }
    }

    /// Run the application (takes over the terminal, plays audio)
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let stream_config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = stream_config.sample_rate().0 as f32;
        let channels = stream_config.channels() as usize;
        log::info!("audio: {sample_rate} Hz, {channels} channels");

        let scene = Arc::new(Mutex::new(Scene::new(
            self.config,
            SynthAllocator::new(),
            sample_rate,
        )));

        // Audio thread → oscilloscope
        let (mut scope_tx, scope_rx) = RingBuffer::<f32>::new(SCOPE_RING_SIZE);

        let audio_scene = Arc::clone(&scene);
        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = device.build_output_stream(
            &stream_config.into(),
            move |data: &mut [f32], _| {
                let Ok(mut scene) = audio_scene.lock() else {
                    data.fill(0.0);
                    return;
                };

                for frames in data.chunks_mut(MAX_BLOCK_SIZE * channels) {
                    let block = &mut render_buf[..frames.len() / channels];
                    scene.render_audio(block);

                    // Mono to all channels
                    for (frame, &s) in frames.chunks_mut(channels).zip(block.iter()) {
                        frame.fill(s);
                        let _ = scope_tx.push(s);
                    }
                }
            },
            |err| log::error!("audio stream error: {err}"),
            None,
        )?;

        stream.play()?;

        let mut terminal = ratatui::init();
        execute!(io::stdout(), EnableMouseCapture).wrap_err("failed to enable mouse capture")?;

        let result = UiApp::new(scene, scope_rx).run(&mut terminal);

        let _ = execute!(io::stdout(), DisableMouseCapture);
        ratatui::restore();
        result
    }
}

impl Default for Glissando {
    fn default() -> Self {
        Self::new()
    }
}

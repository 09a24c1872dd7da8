//! TUI module for glissando
//!
//! The canvas takes the mouse: drag to draw, release to commit a stroke.

mod canvas;
mod status;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    DefaultTerminal, Frame,
};
use rtrb::Consumer;
use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use glissando::{scene::Scene, voices::VoiceKind};

use canvas::CellCanvas;
use status::{render_status, AudioStats, StatusInfo};
use waveform::render_waveform;

/// Audio visualization buffer size
const VIS_BUFFER_SIZE: usize = 1024;

/// UI application state
pub struct UiApp {
    scene: Arc<Mutex<Scene>>,
    /// Ring buffer receiver for audio samples
    audio_rx: Consumer<f32>,
    /// Audio sample buffer for visualization
    audio_buffer: Vec<f32>,
    /// Screen area the canvas occupied on the last frame
    canvas_area: Rect,
    /// Last pointer position in canvas pixels
    pointer: Option<(f32, f32)>,
    started: Instant,
    should_quit: bool,
}

impl UiApp {
    pub fn new(scene: Arc<Mutex<Scene>>, audio_rx: Consumer<f32>) -> Self {
        Self {
            scene,
            audio_rx,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            canvas_area: Rect::default(),
            pointer: None,
            started: Instant::now(),
            should_quit: false,
        }
    }

    /// Run the UI event loop (~60fps)
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();

            terminal.draw(|frame| self.render(frame))?;

            if event::poll(Duration::from_millis(16))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn now_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    /// Poll for new audio samples from ring buffer, keeping the last VIS_BUFFER_SIZE
    fn poll_audio(&mut self) {
        while let Ok(sample) = self.audio_rx.pop() {
            self.audio_buffer.push(sample);
        }
        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
    }

    fn with_scene(&self, f: impl FnOnce(&mut Scene)) {
        match self.scene.lock() {
            Ok(mut scene) => f(&mut scene),
            Err(_) => log::error!("scene lock poisoned"),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Char(' ') => self.with_scene(|scene| scene.toggle_transport()),
            KeyCode::Esc => self.with_scene(|scene| scene.cancel_stroke()),
            KeyCode::Char(c) => {
                if let Some(kind) = VoiceKind::from_key(c) {
                    log::debug!("selected {}", kind.name());
                    self.with_scene(|scene| scene.select_voice(kind));
                }
            }
            _ => {}
        }
    }

    /// Terminal cell → canvas pixels (cell centres)
    fn to_canvas(&self, column: u16, row: u16, width: f32, height: f32) -> Option<(f32, f32)> {
        let area = self.canvas_area;
        let inside = column >= area.x
            && column < area.x + area.width
            && row >= area.y
            && row < area.y + area.height;
        if !inside {
            return None;
        }

        let x = (column - area.x) as f32 + 0.5;
        let y = (row - area.y) as f32 + 0.5;
        Some((
            x / area.width as f32 * width,
            y / area.height as f32 * height,
        ))
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let now = self.now_ms();
        let snap = mouse.modifiers.contains(KeyModifiers::SHIFT);

        let Ok(mut scene) = self.scene.lock() else {
            log::error!("scene lock poisoned");
            return;
        };
        let config = *scene.config();
        let position = self.to_canvas(mouse.column, mouse.row, config.width, config.height);
        self.pointer = position;

        match (mouse.kind, position) {
            (MouseEventKind::Down(MouseButton::Left), Some((x, y))) => {
                scene.begin_stroke();
                scene.extend_stroke(x, y, snap);
            }
            (MouseEventKind::Drag(MouseButton::Left), Some((x, y))) => {
                scene.extend_stroke(x, y, snap);
            }
            (MouseEventKind::Up(MouseButton::Left), _) => match scene.finish_stroke(now) {
                Ok(true) => log::debug!("{} live note lines", scene.lines().len()),
                Ok(false) => {}
                Err(err) => log::warn!("stroke dropped: {err}"),
            },
            _ => {}
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(8),    // Canvas
                Constraint::Length(6), // Waveform
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let canvas_block = Block::default().title(" Canvas ").borders(Borders::ALL);
        self.canvas_area = canvas_block.inner(chunks[1]);
        frame.render_widget(canvas_block, chunks[1]);

        let now = self.now_ms();
        let info = match self.scene.lock() {
            Ok(mut scene) => {
                let config = *scene.config();
                let mut canvas = CellCanvas::new(self.canvas_area, config.width, config.height);
                let selected = scene.session().selected_voice();
                canvas.paint_grid(scene.mapper(), selected, self.pointer.map(|p| p.1));

                scene.draw_frame(now, &mut canvas);

                canvas.paint_stroke(scene.session().stroke(), selected);
                canvas.paint_playhead(scene.transport().progress() as f32);
                canvas.flush(frame.buffer_mut());

                StatusInfo {
                    playing: scene.transport().is_playing(),
                    position: scene.transport().position(),
                    loop_duration: scene.transport().loop_duration(),
                    selected,
                    live_lines: scene.lines().len(),
                }
            }
            Err(_) => return,
        };

        render_status(frame, chunks[0], &info, &AudioStats::from_buffer(&self.audio_buffer));
        render_waveform(frame, chunks[2], &self.audio_buffer, info.selected);

        let help = Paragraph::new(
            " [Drag] Draw  [Shift] Snap  [1-5] Voice  [Space] Play/Pause  [Esc] Cancel  [Q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}

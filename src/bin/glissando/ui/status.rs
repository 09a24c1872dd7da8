//! Status bar - play state, loop position, selected voice and audio stats

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use glissando::voices::VoiceKind;

/// Scene snapshot taken while the scene lock is held
pub struct StatusInfo {
    pub playing: bool,
    pub position: f64,
    pub loop_duration: f64,
    pub selected: VoiceKind,
    pub live_lines: usize,
}

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

pub fn voice_color(kind: VoiceKind) -> Color {
    let c = kind.color().with_alpha(1.0);
    Color::Rgb(c.r, c.g, c.b)
}

pub fn render_status(frame: &mut Frame, area: Rect, info: &StatusInfo, audio_stats: &AudioStats) {
    let block = Block::default().title(" glissando ").borders(Borders::ALL);

    let play_symbol = if info.playing { "▶" } else { "⏸" };
    let play_state_str = if info.playing { "Playing" } else { "Paused" };

    // Eight beat lines per loop
    let beat = (info.position / info.loop_duration * 8.0) as u32 + 1;

    let line = Line::from(vec![
        Span::styled(
            format!(" {} {}  ", play_symbol, play_state_str),
            Style::default().fg(if info.playing { Color::Green } else { Color::Yellow }),
        ),
        Span::styled(
            format!("Beat {}/8  {:.2}s  ", beat.min(8), info.position),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("● {}  ", info.selected.name()),
            Style::default().fg(voice_color(info.selected)),
        ),
        Span::styled(
            format!("{} lines  ", info.live_lines),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", audio_stats.peak, audio_stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}

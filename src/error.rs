/// Errors that can occur while building or running a note line.
///
/// Every error is local to the single line that raised it; the scene and
/// the other lines carry on untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteLineError {
    /// The stroke has fewer points than a note line needs
    InvalidPath { points: usize, required: usize },
    /// The synthesis side could not provide a voice
    VoiceAllocationFailure(String),
    /// The instruction schedule could not be installed
    SchedulingConflict(String),
}

impl std::fmt::Display for NoteLineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoteLineError::InvalidPath { points, required } => {
                write!(
                    f,
                    "Path too short: got {} points, need at least {}",
                    points, required
                )
            }
            NoteLineError::VoiceAllocationFailure(reason) => {
                write!(f, "Voice allocation failed: {}", reason)
            }
            NoteLineError::SchedulingConflict(reason) => {
                write!(f, "Scheduling conflict: {}", reason)
            }
        }
    }
}

impl std::error::Error for NoteLineError {}

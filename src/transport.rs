/*
Transport and Looped Scheduling
===============================

The transport is a clock that runs from 0 to `loop_duration` seconds and
wraps back to 0, forever. Every note line installs its glide instructions
as a looped "part" on it; each time the clock sweeps past an instruction's
time, the part's handler sees that instruction again.

Advancing the clock by a block covers a half-open window [start, end).
When the window crosses the loop end it is split in two:

    0 ─────────────── start ████████ period | 0 ████ end' ────────
                             ↑ first half        ↑ second half
                             fires t ≥ start,    fires t < end'
                             including t > period

Instructions placed past the loop end (a release tail drawn off the right
edge) fire in the first half of the wrapping window, i.e. as the loop
closes and before anything of the next cycle.

Handles
-------

`schedule_looped` returns a `PartHandle`. Cancelling the handle removes the
part immediately: no instruction of a cancelled part is ever delivered again.
Handles are never reused.
*/

use crate::{error::NoteLineError, path::GlideInstruction};

/// Identifies one looped instruction list on the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartHandle(u64);

/// Installs and removes looped instruction lists.
pub trait Scheduler {
    /// Loop `instructions` on the transport until cancelled.
    fn schedule_looped(
        &mut self,
        instructions: Vec<GlideInstruction>,
    ) -> Result<PartHandle, NoteLineError>;

    /// Remove a part. Returns false if it was already gone.
    fn cancel(&mut self, handle: PartHandle) -> bool;
}

/// Looping clock
#[derive(Debug, Clone)]
pub struct Transport {
    loop_duration: f64,
    position: f64,
    cycles: u64,
    playing: bool,
}

impl Transport {
    pub fn new(loop_duration: f64) -> Self {
        Self {
            loop_duration,
            position: 0.0,
            cycles: 0,
            playing: false,
        }
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn toggle(&mut self) {
        self.playing = !self.playing;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Seconds into the current loop
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Position as a fraction of the loop (0..1), for drawing a play-head
    pub fn progress(&self) -> f64 {
        self.position / self.loop_duration
    }

    pub fn loop_duration(&self) -> f64 {
        self.loop_duration
    }
}

struct Part {
    handle: PartHandle,
    instructions: Vec<GlideInstruction>,
}

/// Transport-driven scheduler for looped parts.
pub struct LoopScheduler {
    transport: Transport,
    parts: Vec<Part>,
    next_handle: u64,
}

impl LoopScheduler {
    pub fn new(loop_duration: f64) -> Self {
        Self {
            transport: Transport::new(loop_duration),
            parts: Vec::new(),
            next_handle: 0,
        }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut Transport {
        &mut self.transport
    }

    /// Number of parts currently installed
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub fn is_scheduled(&self, handle: PartHandle) -> bool {
        self.parts.iter().any(|p| p.handle == handle)
    }

    /// Move the clock forward `dt` seconds and deliver every instruction
    /// whose time falls inside the covered window.
    ///
    /// The handler receives the part, the absolute transport time the
    /// instruction was due at, and the instruction. Does nothing while paused.
    pub fn advance<F>(&mut self, dt: f64, mut handler: F)
    where
        F: FnMut(PartHandle, f64, &GlideInstruction),
    {
        if !self.transport.playing || dt <= 0.0 || self.transport.loop_duration <= 0.0 {
            return;
        }

        let period = self.transport.loop_duration;
        let mut start = self.transport.position;
        let mut remaining = dt;

        loop {
            let cycle_base = self.transport.cycles as f64 * period;
            let end = start + remaining;

            if end < period {
                self.fire(cycle_base, |t| t >= start && t < end, &mut handler);
                self.transport.position = end;
                return;
            }

            // Window reaches the loop end: finish this cycle, including
            // anything placed past the end
            self.fire(cycle_base, |t| t >= start, &mut handler);
            remaining = end - period;
            start = 0.0;
            self.transport.cycles += 1;
            self.transport.position = 0.0;

            if remaining <= 0.0 {
                return;
            }
        }
    }

    fn fire<P, F>(&self, cycle_base: f64, in_window: P, handler: &mut F)
    where
        P: Fn(f64) -> bool,
        F: FnMut(PartHandle, f64, &GlideInstruction),
    {
        let period = self.transport.loop_duration;
        for part in &self.parts {
            for instruction in &part.instructions {
                let t = instruction.time as f64;
                if in_window(t) {
                    handler(part.handle, cycle_base + t.min(period), instruction);
                }
            }
        }
    }
}

impl Scheduler for LoopScheduler {
    fn schedule_looped(
        &mut self,
        instructions: Vec<GlideInstruction>,
    ) -> Result<PartHandle, NoteLineError> {
        if let Some(bad) = instructions.iter().find(|i| !i.time.is_finite() || i.time < 0.0) {
            return Err(NoteLineError::SchedulingConflict(format!(
                "instruction time {} is outside the loop timeline",
                bad.time
            )));
        }
        if instructions.windows(2).any(|w| w[1].time < w[0].time) {
            return Err(NoteLineError::SchedulingConflict(
                "instruction times must not decrease".to_string(),
            ));
        }

        let handle = PartHandle(self.next_handle);
        self.next_handle += 1;
        self.parts.push(Part {
            handle,
            instructions,
        });
        Ok(handle)
    }

    fn cancel(&mut self, handle: PartHandle) -> bool {
        let before = self.parts.len();
        self.parts.retain(|p| p.handle != handle);
        self.parts.len() != before
    }
}

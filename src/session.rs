use log::debug;
use std::collections::HashSet;
use std::time::Instant;

use crate::stats::StatsSnapshot;
use crate::typing_policy;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

/// How a target position should be drawn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharStatus {
    Correct,
    Incorrect,
    Untyped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Input {
    pub char: char,
    pub outcome: Outcome,
}

/// Input events understood by a session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypingEvent {
    Char(char),
    Backspace,
    /// Stop now and score what has been typed so far
    Finish,
    Interrupt,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum FinishReason {
    Completed,
    #[strum(serialize = "Finished early")]
    EarlyFinish,
    Interrupted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the first keystroke; the timer is not running
    Idle,
    Active,
    Finished(FinishReason),
}

/// One typing test, from the first keystroke to completion or interruption.
///
/// The session never reads the clock itself: every transition takes the
/// current instant from the caller so it can be driven by scripted input.
#[derive(Debug, Clone)]
pub struct TestSession {
    target_text: String,
    target: Vec<char>,
    pub(crate) input: Vec<Input>,
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
    state: SessionState,
    // Historical counters: backspace never rolls these back.
    pub(crate) error_count: usize,
    pub(crate) error_positions: HashSet<usize>,
    pub(crate) correct_keystrokes: usize,
    pub(crate) total_keystrokes: usize,
}

impl TestSession {
    pub fn new(target_text: impl Into<String>) -> Self {
        let target_text = target_text.into();
        let target = target_text.chars().collect();

        Self {
            target_text,
            target,
            input: vec![],
            started_at: None,
            finished_at: None,
            state: SessionState::Idle,
            error_count: 0,
            error_positions: HashSet::new(),
            correct_keystrokes: 0,
            total_keystrokes: 0,
        }
    }

    /// Apply one event. Returns whether anything changed and a re-render is
    /// needed; events after the session finished are ignored.
    pub fn handle(&mut self, event: TypingEvent, now: Instant) -> bool {
        if self.is_finished() {
            return false;
        }

        match event {
            TypingEvent::Char(c) => {
                if c.is_control() {
                    return false;
                }
                self.activate(now);
                typing_policy::apply_write(self, c);
                if self.input.len() >= self.target.len() {
                    self.finish(FinishReason::Completed, now);
                }
            }
            TypingEvent::Backspace => {
                self.activate(now);
                typing_policy::apply_backspace(self);
            }
            TypingEvent::Finish => self.finish(FinishReason::EarlyFinish, now),
            TypingEvent::Interrupt => self.finish(FinishReason::Interrupted, now),
        }

        true
    }

    fn activate(&mut self, now: Instant) {
        if self.state == SessionState::Idle {
            debug!("session started");
            self.started_at = Some(now);
            self.state = SessionState::Active;
        }
    }

    fn finish(&mut self, reason: FinishReason, now: Instant) {
        debug!("session finished: {reason}");
        self.started_at.get_or_insert(now);
        self.finished_at = Some(now);
        self.state = SessionState::Finished(reason);
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn finish_reason(&self) -> Option<FinishReason> {
        match self.state {
            SessionState::Finished(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, SessionState::Finished(_))
    }

    pub fn target_text(&self) -> &str {
        &self.target_text
    }

    pub fn target_chars(&self) -> &[char] {
        &self.target
    }

    pub fn expected_char(&self, idx: usize) -> Option<char> {
        self.target.get(idx).copied()
    }

    pub fn input(&self) -> &[Input] {
        &self.input
    }

    pub fn typed_text(&self) -> String {
        self.input.iter().map(|i| i.char).collect()
    }

    /// Position of the next character to type
    pub fn cursor_pos(&self) -> usize {
        self.input.len()
    }

    /// Positions where a mismatch was introduced at least once
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn correct_keystrokes(&self) -> usize {
        self.correct_keystrokes
    }

    pub fn total_keystrokes(&self) -> usize {
        self.total_keystrokes
    }

    pub fn status_at(&self, idx: usize) -> CharStatus {
        match self.input.get(idx) {
            Some(Input {
                outcome: Outcome::Correct,
                ..
            }) => CharStatus::Correct,
            Some(Input {
                outcome: Outcome::Incorrect,
                ..
            }) => CharStatus::Incorrect,
            None => CharStatus::Untyped,
        }
    }

    pub fn elapsed_secs(&self, now: Instant) -> f64 {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => end.saturating_duration_since(start).as_secs_f64(),
            (Some(start), None) => now.saturating_duration_since(start).as_secs_f64(),
            _ => 0.0,
        }
    }

    /// Live statistics as of `now`
    pub fn snapshot(&self, now: Instant) -> StatsSnapshot {
        StatsSnapshot::from_counts(
            self.input.len(),
            self.correct_keystrokes,
            self.total_keystrokes(),
            self.elapsed_secs(now),
        )
    }

    /// Statistics frozen at the moment the session finished
    pub fn final_stats(&self) -> Option<StatsSnapshot> {
        self.finished_at.map(|end| self.snapshot(end))
    }
}

use crate::session::{Input, Outcome, TestSession};

/// Compare `c` against the next target position and record it.
///
/// An error is counted the first time a position is mistyped; later mistakes
/// at the same position still lower accuracy but not the error count.
/// Returns `None` when the input already covers the whole target.
pub fn apply_write(session: &mut TestSession, c: char) -> Option<Outcome> {
    let idx = session.input.len();
    let expected = session.expected_char(idx)?;

    session.total_keystrokes += 1;
    let outcome = if c == expected {
        session.correct_keystrokes += 1;
        Outcome::Correct
    } else {
        if session.error_positions.insert(idx) {
            session.error_count += 1;
        }
        Outcome::Incorrect
    };

    session.input.push(Input { char: c, outcome });
    Some(outcome)
}

/// Drop the last typed character. Error counts are left untouched.
pub fn apply_backspace(session: &mut TestSession) -> Option<Input> {
    session.input.pop()
}

use crate::rotor::RotorState;
use crate::{RotorSlot, ROTOR_COUNT};

/// Advance the rotor bank for one keystroke.
///
/// The right rotor always steps. The middle rotor sitting on its own notch
/// before the keystroke forces both the middle and left rotors to step,
/// which makes the middle rotor move on two consecutive keystrokes (the
/// double-step anomaly). The right rotor landing on a turnover position
/// steps the middle rotor once more; both middle advances can land in the
/// same keystroke. The slow rotor never moves.
pub(crate) fn advance(rotors: &mut [RotorState; ROTOR_COUNT]) {
    rotors[RotorSlot::Right.index()].advance();

    if rotors[RotorSlot::Middle.index()].at_notch() {
        rotors[RotorSlot::Middle.index()].advance();
        rotors[RotorSlot::Left.index()].advance();
    }

    if rotors[RotorSlot::Right.index()].at_turnover() {
        rotors[RotorSlot::Middle.index()].advance();
    }
}

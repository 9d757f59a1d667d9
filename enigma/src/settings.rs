use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::{Error, Machine, RotorSlot, PAIR_COUNT, PLUG_COUNT, ROTOR_COUNT};

/// The persisted settings record exchanged with collaborators. Field for
/// field the machine's whole configuration, including whether it was left
/// in encipher mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub reflector_choice: String,
    pub reconfigurable: bool,
    pub pairs: Vec<String>,
    pub fourth_wheel: bool,
    pub use_letters: bool,
    pub show_steps: bool,
    pub wheels: Vec<String>,
    pub ring_settings: Vec<u8>,
    pub rotor_offsets: Vec<u8>,
    pub plugs: Vec<String>,
    pub encipher: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings::pull(&Machine::new())
    }
}

impl Settings {
    /// Capture a machine's configuration. Offsets are read live, so a
    /// machine in encipher mode persists its advanced positions.
    pub fn pull(machine: &Machine) -> Self {
        Self {
            reflector_choice: machine.reflector_choice().to_string(),
            reconfigurable: machine.is_reconfigurable(),
            pairs: (0..PAIR_COUNT)
                .map(|i| machine.pair_text(i).to_string())
                .collect(),
            fourth_wheel: machine.fourth_wheel(),
            use_letters: machine.use_letters(),
            show_steps: machine.show_steps(),
            wheels: RotorSlot::iter()
                .map(|slot| machine.wheel_choice(slot).to_string())
                .collect(),
            ring_settings: RotorSlot::iter()
                .map(|slot| machine.ring_index(slot))
                .collect(),
            rotor_offsets: RotorSlot::iter()
                .map(|slot| machine.rotor_index(slot))
                .collect(),
            plugs: (0..PLUG_COUNT)
                .map(|i| machine.plug_text(i).to_string())
                .collect(),
            encipher: machine.is_encipher(),
        }
    }

    /// Restore a machine from the record, finishing with the encipher
    /// flag so a machine saved mid-session resumes locked.
    pub fn push(&self, machine: &mut Machine) -> Result<(), Error> {
        machine.set_encipher(false)?;

        machine.set_reflector_choice(&self.reflector_choice)?;
        machine.set_reconfigurable(self.reconfigurable)?;
        for (i, text) in self.pairs.iter().take(PAIR_COUNT).enumerate() {
            machine.set_pair_text(i, text)?;
        }

        machine.set_fourth_wheel(self.fourth_wheel)?;
        machine.set_use_letters(self.use_letters);
        machine.set_show_steps(self.show_steps);

        for (i, slot) in RotorSlot::iter().enumerate().take(ROTOR_COUNT) {
            if let Some(id) = self.wheels.get(i) {
                machine.set_wheel_choice(slot, id)?;
            }
            if let Some(&ring) = self.ring_settings.get(i) {
                machine.set_ring_index(slot, ring)?;
            }
            if let Some(&offset) = self.rotor_offsets.get(i) {
                machine.set_rotor_index(slot, offset)?;
            }
        }

        for (i, text) in self.plugs.iter().take(PLUG_COUNT).enumerate() {
            machine.set_plug_text(i, text)?;
        }

        if self.encipher {
            machine.set_encipher(true)?;
        }
        Ok(())
    }
}

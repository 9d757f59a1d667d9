use tracing::debug;

use crate::alpha::{index_to_char, index_to_number, shift};
use crate::catalog::catalog;
use crate::mapper::Mapper;
use crate::pairs::{count_letter_usage, Pair};
use crate::rotor::RotorState;
use crate::settings::Settings;
use crate::{
    stepping, Direction, Error, RotorSlot, WheelSet, LETTER_COUNT, PAIR_COUNT, PLUG_COUNT,
    ROTOR_COUNT,
};

/// Catalog sets offered for the rotor slots.
const WHEEL_SETS: [WheelSet; 1] = [WheelSet::M3];

/// Catalog sets scanned for a fixed reflector choice, in scan order.
const REFLECTOR_SETS: [WheelSet; 3] = [WheelSet::M4, WheelSet::Rocket, WheelSet::SwissK];

/// Reconfigurable reflectors carry this pair hardwired after the editable
/// slots.
const HARDWIRED_PAIR: &str = "JY";

#[derive(Debug, Clone)]
struct Slot {
    wheel: String,
    ring: u8,
    offset: u8,
}

/// The machine: configuration while unlocked, cipher engine while locked.
///
/// Collaborators edit wheels, rings, offsets, pairs and flags, query the
/// validity state, then enter encipher mode. Entering encipher mode
/// re-validates, applies the ring settings to fresh rotor states, builds
/// the plugboard/reflector substitutions and the signal pipeline, and
/// refuses further edits until the mode is left again.
#[derive(Debug)]
pub struct Machine {
    slots: [Slot; ROTOR_COUNT],
    fourth_wheel: bool,
    use_letters: bool,
    show_steps: bool,
    reflector_choice: String,
    reconfigurable: bool,
    pairs: Vec<Pair>,
    pair_counts: [usize; LETTER_COUNT],
    plugs: Vec<Pair>,
    plug_counts: [usize; LETTER_COUNT],
    locked: Option<Locked>,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    pub fn new() -> Self {
        let first_wheel = catalog().wheels(WheelSet::M3)[0].id();
        let default_reflector = catalog().reflector_ids()[0];

        let mut pairs = vec![Pair::default(); PAIR_COUNT + 1];
        pairs[PAIR_COUNT].set(HARDWIRED_PAIR);

        let mut machine = Self {
            slots: std::array::from_fn(|_| Slot {
                wheel: first_wheel.to_string(),
                ring: 0,
                offset: 0,
            }),
            fourth_wheel: false,
            use_letters: true,
            show_steps: false,
            reflector_choice: default_reflector.to_string(),
            reconfigurable: false,
            pairs,
            pair_counts: [0; LETTER_COUNT],
            plugs: vec![Pair::default(); PLUG_COUNT],
            plug_counts: [0; LETTER_COUNT],
            locked: None,
        };
        count_letter_usage(&mut machine.pair_counts, &machine.pairs);
        machine
    }

    fn editable(&self) -> Result<(), Error> {
        match self.locked {
            Some(_) => Err(Error::Locked),
            None => Ok(()),
        }
    }

    fn letter(index: u8) -> Result<u8, Error> {
        if index as usize >= LETTER_COUNT {
            return Err(Error::Letter(index));
        }
        Ok(index)
    }

    /************************************************************************
     * Rotor slot configuration.
     */

    pub fn wheel_choice(&self, slot: RotorSlot) -> &str {
        &self.slots[slot.index()].wheel
    }

    pub fn set_wheel_choice(&mut self, slot: RotorSlot, id: &str) -> Result<(), Error> {
        self.editable()?;
        catalog().lookup(&WHEEL_SETS, id)?;
        self.slots[slot.index()].wheel = id.to_string();
        Ok(())
    }

    pub fn ring_index(&self, slot: RotorSlot) -> u8 {
        self.slots[slot.index()].ring
    }

    pub fn set_ring_index(&mut self, slot: RotorSlot, index: u8) -> Result<(), Error> {
        self.editable()?;
        self.slots[slot.index()].ring = Self::letter(index)?;
        Ok(())
    }

    /// Current rotational position. Reads the live rotor state while in
    /// encipher mode, so collaborators can persist advanced offsets.
    pub fn rotor_index(&self, slot: RotorSlot) -> u8 {
        match &self.locked {
            Some(locked) => locked.rotors[slot.index()].offset(),
            None => self.slots[slot.index()].offset,
        }
    }

    pub fn set_rotor_index(&mut self, slot: RotorSlot, index: u8) -> Result<(), Error> {
        self.editable()?;
        self.slots[slot.index()].offset = Self::letter(index)?;
        Ok(())
    }

    /// Ring setting in display form, letter or 1-based number.
    pub fn ring_setting_text(&self, slot: RotorSlot) -> String {
        self.display_text(self.ring_index(slot))
    }

    /// Rotor offset in display form, letter or 1-based number.
    pub fn rotor_offset_text(&self, slot: RotorSlot) -> String {
        self.display_text(self.rotor_index(slot))
    }

    fn display_text(&self, index: u8) -> String {
        if self.use_letters {
            index_to_char(index).to_string()
        } else {
            index_to_number(index)
        }
    }

    pub fn fourth_wheel(&self) -> bool {
        self.fourth_wheel
    }

    pub fn set_fourth_wheel(&mut self, state: bool) -> Result<(), Error> {
        self.editable()?;
        self.fourth_wheel = state;
        Ok(())
    }

    /************************************************************************
     * Display flags. These do not feed the cipher, so they stay editable
     * in encipher mode.
     */

    pub fn use_letters(&self) -> bool {
        self.use_letters
    }

    pub fn set_use_letters(&mut self, state: bool) {
        self.use_letters = state;
    }

    pub fn show_steps(&self) -> bool {
        self.show_steps
    }

    pub fn set_show_steps(&mut self, state: bool) {
        self.show_steps = state;
    }

    /************************************************************************
     * Reflector configuration.
     */

    pub fn reflector_choice(&self) -> &str {
        &self.reflector_choice
    }

    pub fn set_reflector_choice(&mut self, id: &str) -> Result<(), Error> {
        self.editable()?;
        let wheel = catalog().lookup(&REFLECTOR_SETS, id)?;
        if !wheel.is_reflector() {
            return Err(Error::UnknownWheel(id.to_string()));
        }
        self.reflector_choice = id.to_string();
        Ok(())
    }

    pub fn is_reconfigurable(&self) -> bool {
        self.reconfigurable
    }

    pub fn set_reconfigurable(&mut self, state: bool) -> Result<(), Error> {
        self.editable()?;
        self.reconfigurable = state;
        Ok(())
    }

    pub fn pair_text(&self, index: usize) -> &str {
        self.pairs[index].get()
    }

    pub fn pair_count(&self, index: usize) -> usize {
        self.pairs[index].count()
    }

    pub fn set_pair_text(&mut self, index: usize, text: &str) -> Result<(), Error> {
        self.editable()?;
        // The hardwired pair past the editable slots stays fixed.
        if index >= PAIR_COUNT {
            return Err(Error::PairSlot(index));
        }
        self.pairs[index].set(text);
        count_letter_usage(&mut self.pair_counts, &self.pairs);
        Ok(())
    }

    pub fn sanitize_pairs(&mut self) {
        for pair in &mut self.pairs {
            pair.sanitize();
        }
        count_letter_usage(&mut self.pair_counts, &self.pairs);
    }

    pub fn is_pair_valid(&self, index: usize) -> bool {
        let pair = &self.pairs[index];
        if pair.is_empty() {
            return true;
        }
        if !pair.is_valid() {
            return false;
        }
        pair.letters().all(|l| self.pair_counts[l as usize] == 1)
    }

    pub fn is_reflector_valid(&self) -> bool {
        if !self.reconfigurable {
            return true;
        }
        if !self.pairs.iter().all(Pair::is_valid) {
            return false;
        }
        // A reconfigurable reflector must pair every letter exactly once.
        self.pair_counts.iter().all(|&count| count == 1)
    }

    /************************************************************************
     * Plugboard configuration.
     */

    pub fn plug_text(&self, index: usize) -> &str {
        self.plugs[index].get()
    }

    pub fn plug_count(&self, index: usize) -> usize {
        self.plugs[index].count()
    }

    pub fn set_plug_text(&mut self, index: usize, text: &str) -> Result<(), Error> {
        self.editable()?;
        if index >= PLUG_COUNT {
            return Err(Error::PairSlot(index));
        }
        self.plugs[index].set(text);
        count_letter_usage(&mut self.plug_counts, &self.plugs);
        Ok(())
    }

    pub fn sanitize_plugs(&mut self) {
        for plug in &mut self.plugs {
            plug.sanitize();
        }
        count_letter_usage(&mut self.plug_counts, &self.plugs);
    }

    pub fn is_plug_valid(&self, index: usize) -> bool {
        let plug = &self.plugs[index];
        if plug.is_empty() {
            return true;
        }
        if !plug.is_valid() {
            return false;
        }
        plug.letters().all(|l| self.plug_counts[l as usize] <= 1)
    }

    pub fn is_plugboard_valid(&self) -> bool {
        if !self.plugs.iter().all(Pair::is_valid) {
            return false;
        }
        self.plug_counts.iter().all(|&count| count <= 1)
    }

    pub fn is_config_valid(&self) -> bool {
        self.is_plugboard_valid() && self.is_reflector_valid()
    }

    /************************************************************************
     * Mode control and translation.
     */

    pub fn is_encipher(&self) -> bool {
        self.locked.is_some()
    }

    /// Enter or leave encipher mode. Entering re-validates the
    /// configuration and refuses (returning `Ok(false)`) while it has
    /// errors; a wheel or reflector id missing from the catalog is a
    /// distinct hard error. Leaving writes the advanced offsets back to
    /// the slots.
    pub fn set_encipher(&mut self, state: bool) -> Result<bool, Error> {
        if state == self.is_encipher() {
            return Ok(state);
        }
        if !state {
            self.unlock();
            return Ok(false);
        }
        if !self.is_config_valid() {
            return Ok(false);
        }
        self.locked = Some(self.lockdown()?);
        Ok(true)
    }

    /// Translate one letter index. Advances the stepping mechanism first,
    /// then threads the signal through the pipeline.
    pub fn translate(&mut self, index: u8) -> Result<u8, Error> {
        let index = Self::letter(index)?;
        let locked = self.locked.as_mut().ok_or(Error::NotLocked)?;
        Ok(locked.translate(index))
    }

    pub fn settings(&self) -> Settings {
        Settings::pull(self)
    }

    pub fn apply(&mut self, settings: &Settings) -> Result<(), Error> {
        settings.push(self)
    }

    fn unlock(&mut self) {
        if let Some(locked) = self.locked.take() {
            for (slot, rotor) in self.slots.iter_mut().zip(locked.rotors.iter()) {
                slot.offset = rotor.offset();
            }
        }
    }

    fn lockdown(&self) -> Result<Locked, Error> {
        let plugboard = Mapper::new("Plugboard", self.plugboard_map())?;
        let reflector = Mapper::new("Reflector", self.reflector_map()?)?;

        let rotors = [
            self.rotor_state(RotorSlot::Slow)?,
            self.rotor_state(RotorSlot::Left)?,
            self.rotor_state(RotorSlot::Middle)?,
            self.rotor_state(RotorSlot::Right)?,
        ];

        for rotor in &rotors {
            debug!(
                wheel = rotor.wheel().id(),
                ring = rotor.ring(),
                offset = rotor.offset(),
                "rotor locked"
            );
        }
        debug!(
            reflector = %reflector.id(),
            fourth_wheel = self.fourth_wheel,
            "settings locked"
        );

        Ok(Locked {
            rotors,
            plugboard,
            reflector,
            pipeline: build_pipeline(self.fourth_wheel),
        })
    }

    fn rotor_state(&self, slot: RotorSlot) -> Result<RotorState, Error> {
        let config = &self.slots[slot.index()];
        let wheel = catalog().lookup(&WHEEL_SETS, &config.wheel)?;
        Ok(RotorState::new(wheel, config.ring, config.offset))
    }

    fn plugboard_map(&self) -> [u8; LETTER_COUNT] {
        let mut map = identity();
        for plug in &self.plugs {
            if let (Some(a), Some(b)) = (plug.index_at(0), plug.index_at(1)) {
                map[a as usize] = b;
                map[b as usize] = a;
            }
        }
        map
    }

    fn reflector_map(&self) -> Result<[u8; LETTER_COUNT], Error> {
        if self.reconfigurable {
            let mut map = identity();
            for pair in &self.pairs {
                if let (Some(a), Some(b)) = (pair.index_at(0), pair.index_at(1)) {
                    map[a as usize] = b;
                    map[b as usize] = a;
                }
            }
            return Ok(map);
        }
        let wheel = catalog().lookup(&REFLECTOR_SETS, &self.reflector_choice)?;
        Ok(*wheel.map())
    }
}

fn identity() -> [u8; LETTER_COUNT] {
    std::array::from_fn(|i| i as u8)
}

/// One stage of the signal path. Rotor stages track the offset of the
/// slot they are bound to, so the stage list survives keystrokes and only
/// the offsets move.
#[derive(Debug, Clone, Copy)]
enum Stage {
    Plugboard(Direction),
    Rotor(RotorSlot, Direction),
    Reflector,
}

#[derive(Debug)]
struct Locked {
    rotors: [RotorState; ROTOR_COUNT],
    plugboard: Mapper,
    reflector: Mapper,
    pipeline: Vec<Stage>,
}

fn build_pipeline(fourth_wheel: bool) -> Vec<Stage> {
    let mut pipeline = Vec::with_capacity(11);

    pipeline.push(Stage::Plugboard(Direction::RightToLeft));

    if fourth_wheel {
        pipeline.push(Stage::Rotor(RotorSlot::Slow, Direction::RightToLeft));
    }
    pipeline.push(Stage::Rotor(RotorSlot::Right, Direction::RightToLeft));
    pipeline.push(Stage::Rotor(RotorSlot::Middle, Direction::RightToLeft));
    pipeline.push(Stage::Rotor(RotorSlot::Left, Direction::RightToLeft));

    pipeline.push(Stage::Reflector);

    pipeline.push(Stage::Rotor(RotorSlot::Left, Direction::LeftToRight));
    pipeline.push(Stage::Rotor(RotorSlot::Middle, Direction::LeftToRight));
    pipeline.push(Stage::Rotor(RotorSlot::Right, Direction::LeftToRight));
    if fourth_wheel {
        pipeline.push(Stage::Rotor(RotorSlot::Slow, Direction::LeftToRight));
    }

    pipeline.push(Stage::Plugboard(Direction::LeftToRight));

    pipeline
}

impl Locked {
    fn translate(&mut self, index: u8) -> u8 {
        stepping::advance(&mut self.rotors);

        debug!(key = %index_to_char(index), "keystroke");

        // Each stage aligns the incoming signal with its own rotational
        // position before applying its map. Plugboard and reflector do not
        // rotate and carry a fixed zero offset.
        let mut previous = 0u8;
        let mut current = index;
        for stage in &self.pipeline {
            let (id, offset, output) = match *stage {
                Stage::Plugboard(direction) => {
                    let entry = shift(current, 0, previous);
                    (self.plugboard.id(), 0, self.plugboard.translate(direction, entry))
                }
                Stage::Reflector => {
                    let entry = shift(current, 0, previous);
                    (self.reflector.id(), 0, self.reflector.right_to_left(entry))
                }
                Stage::Rotor(slot, direction) => {
                    let rotor = &self.rotors[slot.index()];
                    let entry = shift(current, rotor.offset(), previous);
                    (rotor.wheel().id(), rotor.offset(), rotor.translate(direction, entry))
                }
            };
            debug!(
                "{id}({} -> {})",
                index_to_char(current),
                index_to_char(output)
            );
            previous = offset;
            current = output;
        }

        debug!(lamp = %index_to_char(current), "keystroke translated");
        current
    }
}

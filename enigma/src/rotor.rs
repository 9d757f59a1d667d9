use crate::catalog::Wheel;
use crate::{Direction, LETTER_COUNT};

/// A catalog wheel fitted into a slot: the ring setting rotates the wiring
/// relative to the visible markings, the offset tracks the wheel's current
/// rotational position. The traversal maps stay mutual inverses.
#[derive(Debug, Clone)]
pub(crate) struct RotorState {
    wheel: &'static Wheel,
    ring: u8,
    offset: u8,
    right: [u8; LETTER_COUNT],
    left: [u8; LETTER_COUNT],
}

impl RotorState {
    pub fn new(wheel: &'static Wheel, ring: u8, offset: u8) -> Self {
        let mut rotor = Self {
            wheel,
            ring: 0,
            offset,
            right: [0; LETTER_COUNT],
            left: [0; LETTER_COUNT],
        };
        rotor.set_ring(ring);
        rotor
    }

    /// Recompute both traversal maps for a ring setting. Independent of
    /// the rotational offset.
    pub fn set_ring(&mut self, ring: u8) {
        self.ring = ring;
        let base = self.wheel.map();
        for (i, &c) in base.iter().enumerate() {
            self.right[(i + ring as usize) % LETTER_COUNT] = (c + ring) % LETTER_COUNT as u8;
        }
        for i in 0..LETTER_COUNT {
            self.left[self.right[i] as usize] = i as u8;
        }
    }

    pub fn wheel(&self) -> &'static Wheel {
        self.wheel
    }

    pub fn ring(&self) -> u8 {
        self.ring
    }

    pub fn offset(&self) -> u8 {
        self.offset
    }

    pub fn advance(&mut self) {
        self.offset = (self.offset + 1) % LETTER_COUNT as u8;
    }

    /// Raw map lookup. Offset alignment with the neighbouring stage is the
    /// pipeline's concern.
    pub fn translate(&self, direction: Direction, index: u8) -> u8 {
        match direction {
            Direction::RightToLeft => self.right[index as usize],
            Direction::LeftToRight => self.left[index as usize],
        }
    }

    pub fn at_notch(&self) -> bool {
        self.wheel.is_notch(self.offset)
    }

    pub fn at_turnover(&self) -> bool {
        self.wheel.is_turnover(self.offset)
    }
}

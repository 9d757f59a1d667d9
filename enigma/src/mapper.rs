use crate::alpha::is_permutation;
use crate::{Direction, Error, LETTER_COUNT};

/// A bidirectional substitution over the alphabet, used as-is for the
/// plugboard and reflector and as the base of the rotor wiring model.
#[derive(Clone)]
pub struct Mapper {
    id: String,
    map: [u8; LETTER_COUNT],
    left: [u8; LETTER_COUNT],
    reflect: bool,
}

impl Mapper {
    pub fn new(id: impl Into<String>, map: [u8; LETTER_COUNT]) -> Result<Self, Error> {
        let id = id.into();
        if !is_permutation(&map) {
            return Err(Error::InvalidPermutation { id });
        }

        let mut left = [0u8; LETTER_COUNT];
        for (i, &c) in map.iter().enumerate() {
            left[c as usize] = i as u8;
        }

        // A reflector maps every letter onto a different one and back again.
        let reflect = map
            .iter()
            .enumerate()
            .all(|(i, &c)| c as usize != i && map[c as usize] as usize == i);

        Ok(Self {
            id,
            map,
            left,
            reflect,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_reflector(&self) -> bool {
        self.reflect
    }

    pub fn right_to_left(&self, index: u8) -> u8 {
        self.map[index as usize]
    }

    pub fn left_to_right(&self, index: u8) -> u8 {
        self.left[index as usize]
    }

    pub fn translate(&self, direction: Direction, index: u8) -> u8 {
        match direction {
            Direction::RightToLeft => self.right_to_left(index),
            Direction::LeftToRight => self.left_to_right(index),
        }
    }
}

impl std::fmt::Debug for Mapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Mapper [id={}, reflect={}]", self.id, self.reflect)
    }
}

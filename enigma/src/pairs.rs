use crate::alpha::char_to_index;
use crate::LETTER_COUNT;

/// One editable letter-pair slot, for the plugboard or the reconfigurable
/// reflector. Holds whatever the collaborator typed; validity is judged on
/// the letters found in the text.
#[derive(Debug, Clone, Default)]
pub(crate) struct Pair {
    text: String,
}

impl Pair {
    pub fn set(&mut self, text: &str) {
        self.text = text.to_string();
    }

    pub fn get(&self) -> &str {
        &self.text
    }

    /// Normalize to at most two uppercase letters.
    pub fn sanitize(&mut self) {
        self.text = self
            .text
            .chars()
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_uppercase())
            .take(2)
            .collect();
    }

    pub fn count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Empty, or exactly two distinct letters.
    pub fn is_valid(&self) -> bool {
        if self.is_empty() {
            return true;
        }
        let (first, second) = (self.index_at(0), self.index_at(1));
        match (first, second) {
            (Some(a), Some(b)) => self.count() == 2 && a != b,
            _ => false,
        }
    }

    pub fn index_at(&self, at: usize) -> Option<u8> {
        self.text.chars().filter_map(char_to_index).nth(at)
    }

    pub fn letters(&self) -> impl Iterator<Item = u8> + '_ {
        self.text.chars().filter_map(char_to_index)
    }
}

/// Recount how often each letter occurs across the given pair slots. Run
/// after every pair edit.
pub(crate) fn count_letter_usage(counts: &mut [usize; LETTER_COUNT], pairs: &[Pair]) {
    counts.fill(0);
    for pair in pairs {
        for letter in pair.letters() {
            counts[letter as usize] += 1;
        }
    }
}

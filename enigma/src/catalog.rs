use once_cell::sync::Lazy;

use crate::alpha::{char_to_index, index_to_char, is_permutation};
use crate::{Error, WheelSet, LETTER_COUNT};

/// A wired wheel from the historical catalog: a fixed letter permutation
/// plus the positions at which stepping past it carries the next wheel.
/// Entries are built once at first use and never mutated.
pub struct Wheel {
    id: &'static str,
    cipher: &'static str,
    date: &'static str,
    name: &'static str,
    map: [u8; LETTER_COUNT],
    turnover: [bool; LETTER_COUNT],
    notch: [bool; LETTER_COUNT],
    reflect: bool,
}

impl Wheel {
    /// Malformed wiring is a data error, so it aborts catalog
    /// initialization instead of surfacing at translation time.
    fn new(
        id: &'static str,
        cipher: &'static str,
        date: &'static str,
        name: &'static str,
        turnover_letters: &'static str,
    ) -> Self {
        assert!(
            cipher.len() == LETTER_COUNT,
            "wheel {id}: wiring must cover the alphabet"
        );
        let mut map = [0u8; LETTER_COUNT];
        for (i, c) in cipher.chars().enumerate() {
            map[i] = char_to_index(c)
                .unwrap_or_else(|| panic!("wheel {id}: {c:?} is not a wiring letter"));
        }
        assert!(is_permutation(&map), "wheel {id}: wiring is not a permutation");

        let mut turnover = [false; LETTER_COUNT];
        let mut notch = [false; LETTER_COUNT];
        for c in turnover_letters.chars() {
            let t = char_to_index(c)
                .unwrap_or_else(|| panic!("wheel {id}: {c:?} is not a turnover letter"))
                as usize;
            turnover[t] = true;
            // The notch sits one position before the turnover.
            notch[(t + LETTER_COUNT - 1) % LETTER_COUNT] = true;
        }

        let reflect = map
            .iter()
            .enumerate()
            .all(|(i, &c)| c as usize != i && map[c as usize] as usize == i);

        Self {
            id,
            cipher,
            date,
            name,
            map,
            turnover,
            notch,
            reflect,
        }
    }

    pub fn is(&self, target: &str) -> bool {
        self.id == target
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn cipher(&self) -> &'static str {
        self.cipher
    }

    pub fn date(&self) -> &'static str {
        self.date
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn map(&self) -> &[u8; LETTER_COUNT] {
        &self.map
    }

    pub fn is_reflector(&self) -> bool {
        self.reflect
    }

    pub fn is_turnover(&self, index: u8) -> bool {
        self.turnover[index as usize]
    }

    pub fn is_notch(&self, index: u8) -> bool {
        self.notch[index as usize]
    }

    pub fn turnover_letters(&self) -> String {
        (0..LETTER_COUNT as u8)
            .filter(|&i| self.is_turnover(i))
            .map(index_to_char)
            .collect()
    }
}

impl std::fmt::Debug for Wheel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Wheel [id={}, cipher={}, name={}, reflect={}]",
            self.id, self.cipher, self.name, self.reflect
        )
    }
}

/// The full historical catalog, partitioned into named sets.
pub struct Catalog {
    commercial: Vec<Wheel>,
    rocket: Vec<Wheel>,
    swiss_k: Vec<Wheel>,
    m3: Vec<Wheel>,
    m4: Vec<Wheel>,
}

impl Catalog {
    pub fn wheels(&self, set: WheelSet) -> &[Wheel] {
        match set {
            WheelSet::Commercial => &self.commercial,
            WheelSet::Rocket => &self.rocket,
            WheelSet::SwissK => &self.swiss_k,
            WheelSet::M3 => &self.m3,
            WheelSet::M4 => &self.m4,
        }
    }

    /// Find a wheel by id, scanning only the given sets in order.
    pub fn lookup(&self, sets: &[WheelSet], id: &str) -> Result<&Wheel, Error> {
        for &set in sets {
            if let Some(wheel) = self.wheels(set).iter().find(|wheel| wheel.is(id)) {
                return Ok(wheel);
            }
        }
        Err(Error::UnknownWheel(id.to_string()))
    }

    /// Wheels usable as a fixed reflector, in the order they are offered
    /// to collaborators. The first entry is the default choice.
    pub fn reflector_ids(&self) -> Vec<&'static str> {
        [WheelSet::M4, WheelSet::Rocket, WheelSet::SwissK]
            .iter()
            .flat_map(|&set| self.wheels(set))
            .filter(|wheel| wheel.is_reflector())
            .map(Wheel::id)
            .collect()
    }
}

static CATALOG: Lazy<Catalog> = Lazy::new(|| Catalog {
    commercial: vec![
        Wheel::new("IC", "DMTWSILRUYQNKFEJCAZBPGXOHV", "1924", "Commercial Enigma A, B", "R"),
        Wheel::new("IIC", "HQZGPJTMOBLNCIFDYAWVEUSRKX", "1924", "Commercial Enigma A, B", "F"),
        Wheel::new("IIIC", "UQNTLSZFMREHDPXKIBVYGJCWOA", "1924", "Commercial Enigma A, B", "W"),
    ],
    rocket: vec![
        Wheel::new("I", "JGDQOXUSCAMIFRVTPNEWKBLZYH", "7 February 1941", "German Railway (Rocket)", "R"),
        Wheel::new("II", "NTZPSFBOKMWRCJDIVLAEYUXHGQ", "7 February 1941", "German Railway (Rocket)", "F"),
        Wheel::new("III", "JVIUBHTCDYAKEQZPOSGXNRMWFL", "7 February 1941", "German Railway (Rocket)", "W"),
        Wheel::new("UKW", "QYHOGNECVPUZTFDJAXWMKISRBL", "7 February 1941", "German Railway (Rocket)", ""),
        Wheel::new("ETW", "QWERTZUIOASDFGHJKPYXCVBNML", "7 February 1941", "German Railway (Rocket)", ""),
    ],
    swiss_k: vec![
        Wheel::new("I-K", "PEZUOHXSCVFMTBGLRINQJWAYDK", "February 1939", "Swiss K", "R"),
        Wheel::new("II-K", "ZOUESYDKFWPCIQXHMVBLGNJRAT", "February 1939", "Swiss K", "F"),
        Wheel::new("III-K", "EHRVXGAOBQUSIMZFLYNWKTPDJC", "February 1939", "Swiss K", "W"),
        Wheel::new("UKW-K", "IMETCGFRAYSQBZXWLHKDVUPOJN", "February 1939", "Swiss K", ""),
        Wheel::new("ETW-K", "QWERTZUIOASDFGHJKPYXCVBNML", "February 1939", "Swiss K", ""),
    ],
    m3: vec![
        Wheel::new("I", "EKMFLGDQVZNTOWYHXUSPAIBRCJ", "1930", "Enigma I", "R"),
        Wheel::new("II", "AJDKSIRUXBLHWTMCQGZNPYFVOE", "1930", "Enigma I", "F"),
        Wheel::new("III", "BDFHJLCPRTXVZNYEIWGAKMUSQO", "1930", "Enigma I", "W"),
        Wheel::new("IV", "ESOVPZJAYQUIRHXLNFTGKDCMWB", "December 1938", "M3 Army", "K"),
        Wheel::new("V", "VZBRGITYUPSDNHLXAWMJQOFECK", "December 1938", "M3 Army", "A"),
        Wheel::new("VI", "JPGVOUMFYQBENHZRDKASXLICTW", "1939", "M3 & M4 Naval (FEB 1942)", "AN"),
        Wheel::new("VII", "NZJHGRCXMYSWBOUFAIVLPEKQDT", "1939", "M3 & M4 Naval (FEB 1942)", "AN"),
        Wheel::new("VIII", "FKQHTLXOCBJSPDZRAMEWNIUYGV", "1939", "M3 & M4 Naval (FEB 1942)", "AN"),
    ],
    m4: vec![
        Wheel::new("Beta", "LEYJVCNIXWPBQMDRTAKZGFUHOS", "Spring 1941", "M4 R2", ""),
        Wheel::new("Gamma", "FSOKANUERHMBTIYCWLQPZXVGJD", "Spring 1942", "M4 R2", ""),
        Wheel::new("Reflector A", "EJMZALYXVBWFCRQUONTSPIKHGD", "", "", ""),
        Wheel::new("Reflector B", "YRUHQSLDPXNGOKMIEBFZCWVJAT", "", "", ""),
        Wheel::new("Reflector C", "FVPJIAOYEDRZXWGCTKUQSBNMHL", "", "", ""),
        Wheel::new("Reflector B Thin", "ENKQAUYWJICOPBLMDXZVFTHRGS", "1940", "M4 R1 (M3 + Thin)", ""),
        Wheel::new("Reflector C Thin", "RDOBJNTKVEHMLFCWZAXGYIPSUQ", "1940", "M4 R1 (M3 + Thin)", ""),
        Wheel::new("ETW", "ABCDEFGHIJKLMNOPQRSTUVWXYZ", "", "Enigma I", ""),
    ],
});

/// Process-wide read-only catalog, loaded on first use.
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

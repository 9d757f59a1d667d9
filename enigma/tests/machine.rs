use enigma::{char_to_index, index_to_char, Error, Machine, RotorSlot, Settings};

/// Army machine with reflector B and the given wheels in the left, middle
/// and right slots, already locked into encipher mode.
fn army_machine(wheels: [&str; 3], rings: [u8; 3], offsets: [u8; 3]) -> Machine {
    let mut machine = Machine::new();
    machine.set_reflector_choice("Reflector B").unwrap();
    let slots = [RotorSlot::Left, RotorSlot::Middle, RotorSlot::Right];
    for (i, slot) in slots.into_iter().enumerate() {
        machine.set_wheel_choice(slot, wheels[i]).unwrap();
        machine.set_ring_index(slot, rings[i]).unwrap();
        machine.set_rotor_index(slot, offsets[i]).unwrap();
    }
    assert!(machine.set_encipher(true).unwrap());
    machine
}

fn encipher_text(machine: &mut Machine, text: &str) -> String {
    text.chars()
        .map(|c| {
            let index = char_to_index(c).unwrap();
            index_to_char(machine.translate(index).unwrap())
        })
        .collect()
}

#[test]
fn known_vector() {
    // Enigma I, reflector B, wheels I II III, rings AAA, offsets AAA.
    let mut machine = army_machine(["I", "II", "III"], [0; 3], [0; 3]);
    assert_eq!(encipher_text(&mut machine, "AAAAA"), "BDZGO");
}

#[test]
fn self_reciprocal() {
    let mut machine = army_machine(["I", "II", "III"], [0; 3], [0; 3]);
    let cipher = encipher_text(&mut machine, "ENIGMAREVEALED");

    let mut machine = army_machine(["I", "II", "III"], [0; 3], [0; 3]);
    assert_eq!(encipher_text(&mut machine, &cipher), "ENIGMAREVEALED");
}

#[test]
fn self_reciprocal_with_plugboard() {
    let mut machine = Machine::new();
    machine.set_reflector_choice("Reflector C").unwrap();
    machine.set_wheel_choice(RotorSlot::Left, "IV").unwrap();
    machine.set_wheel_choice(RotorSlot::Middle, "V").unwrap();
    machine.set_wheel_choice(RotorSlot::Right, "II").unwrap();
    machine.set_plug_text(0, "AB").unwrap();
    machine.set_plug_text(1, "QZ").unwrap();
    machine.set_plug_text(2, "MN").unwrap();
    let settings = machine.settings();

    assert!(machine.set_encipher(true).unwrap());
    let cipher = encipher_text(&mut machine, "THEQUICKBROWNFOX");

    let mut second = Machine::new();
    settings.push(&mut second).unwrap();
    assert!(second.set_encipher(true).unwrap());
    assert_eq!(encipher_text(&mut second, &cipher), "THEQUICKBROWNFOX");
}

#[test]
fn right_rotor_turnover_steps_middle() {
    // Rotor III turns over at W. Stepping onto W carries the middle rotor.
    let v = char_to_index('V').unwrap();
    let mut machine = army_machine(["I", "II", "III"], [0; 3], [0, 0, v]);
    machine.translate(0).unwrap();
    assert_eq!(machine.rotor_index(RotorSlot::Right), v + 1);
    assert_eq!(machine.rotor_index(RotorSlot::Middle), 1);
    assert_eq!(machine.rotor_index(RotorSlot::Left), 0);
}

#[test]
fn double_step_anomaly() {
    // Rotor II notches at E. A middle rotor sitting on its notch advances
    // together with the left rotor on the next keystroke.
    let e = char_to_index('E').unwrap();
    let mut machine = army_machine(["I", "II", "III"], [0; 3], [0, e, 0]);
    machine.translate(0).unwrap();
    assert_eq!(machine.rotor_index(RotorSlot::Right), 1);
    assert_eq!(machine.rotor_index(RotorSlot::Middle), e + 1);
    assert_eq!(machine.rotor_index(RotorSlot::Left), 1);
}

#[test]
fn middle_rotor_advances_27_times_per_right_revolution_sweep() {
    // Start the middle rotor one position before its notch and the right
    // rotor on its turnover letter. Driving the right rotor through 26
    // full revolutions advances the middle rotor 26 normal times plus the
    // one double-step, 27 in total.
    let d = char_to_index('D').unwrap(); // one before rotor II's notch at E
    let w = char_to_index('W').unwrap(); // rotor III's turnover
    let mut machine = army_machine(["I", "II", "III"], [0; 3], [0, d, w]);

    let mut advances = 0u32;
    let mut previous = machine.rotor_index(RotorSlot::Middle);
    for _ in 0..26 * 26 {
        machine.translate(0).unwrap();
        let current = machine.rotor_index(RotorSlot::Middle);
        advances += u32::from((current + 26 - previous) % 26);
        previous = current;
    }
    assert_eq!(advances, 27);
    assert_eq!(machine.rotor_index(RotorSlot::Left), 1);
}

#[test]
fn slow_rotor_never_advances() {
    let mut machine = Machine::new();
    machine.set_reflector_choice("Reflector B").unwrap();
    machine.set_fourth_wheel(true).unwrap();
    machine.set_wheel_choice(RotorSlot::Slow, "IV").unwrap();
    machine.set_rotor_index(RotorSlot::Slow, 5).unwrap();
    machine.set_wheel_choice(RotorSlot::Left, "I").unwrap();
    machine.set_wheel_choice(RotorSlot::Middle, "II").unwrap();
    machine.set_wheel_choice(RotorSlot::Right, "III").unwrap();
    let settings = machine.settings();

    assert!(machine.set_encipher(true).unwrap());
    let cipher = encipher_text(&mut machine, "WETTERBERICHT");
    assert_eq!(machine.rotor_index(RotorSlot::Slow), 5);

    let mut second = Machine::new();
    settings.push(&mut second).unwrap();
    assert!(second.set_encipher(true).unwrap());
    assert_eq!(encipher_text(&mut second, &cipher), "WETTERBERICHT");
}

#[test]
fn ring_and_offset_shift_together() {
    // Conjugating the wiring by the ring setting means rings BBB with
    // offsets BBB produce the same first substitution as rings AAA with
    // offsets AAA, as long as no notch interferes.
    let mut plain = army_machine(["I", "II", "III"], [0; 3], [0; 3]);
    let mut shifted = army_machine(["I", "II", "III"], [1; 3], [1; 3]);
    assert_eq!(
        plain.translate(0).unwrap(),
        shifted.translate(0).unwrap()
    );
}

#[test]
fn determinism() {
    let mut first = army_machine(["V", "III", "VI"], [2, 11, 7], [4, 17, 25]);
    let mut second = army_machine(["V", "III", "VI"], [2, 11, 7], [4, 17, 25]);
    let text = "OBERKOMMANDODERWEHRMACHT";
    assert_eq!(encipher_text(&mut first, text), encipher_text(&mut second, text));
}

#[test]
fn translate_requires_encipher_mode() {
    let mut machine = Machine::new();
    assert!(matches!(machine.translate(0), Err(Error::NotLocked)));

    assert!(machine.set_encipher(true).unwrap());
    assert!(matches!(machine.translate(26), Err(Error::Letter(26))));
    machine.translate(0).unwrap();
}

#[test]
fn locked_machine_refuses_edits() {
    let mut machine = army_machine(["I", "II", "III"], [0; 3], [0; 3]);
    assert!(matches!(
        machine.set_wheel_choice(RotorSlot::Right, "IV"),
        Err(Error::Locked)
    ));
    assert!(matches!(
        machine.set_plug_text(0, "AB"),
        Err(Error::Locked)
    ));
    assert!(matches!(machine.set_ring_index(RotorSlot::Left, 1), Err(Error::Locked)));

    assert!(!machine.set_encipher(false).unwrap());
    machine.set_wheel_choice(RotorSlot::Right, "IV").unwrap();
}

#[test]
fn unlock_writes_back_advanced_offsets() {
    let mut machine = army_machine(["I", "II", "III"], [0; 3], [0; 3]);
    for _ in 0..5 {
        machine.translate(0).unwrap();
    }
    assert_eq!(machine.rotor_index(RotorSlot::Right), 5);

    assert!(!machine.set_encipher(false).unwrap());
    assert_eq!(machine.rotor_index(RotorSlot::Right), 5);
    assert_eq!(machine.rotor_index(RotorSlot::Middle), 0);
}

#[test]
fn settings_round_trip_through_json() {
    let mut machine = Machine::new();
    machine.set_reflector_choice("Reflector C").unwrap();
    machine.set_wheel_choice(RotorSlot::Left, "VII").unwrap();
    machine.set_ring_index(RotorSlot::Middle, 12).unwrap();
    machine.set_rotor_index(RotorSlot::Right, 19).unwrap();
    machine.set_plug_text(0, "AB").unwrap();
    machine.set_plug_text(1, "CD").unwrap();
    machine.set_fourth_wheel(true).unwrap();
    machine.set_use_letters(false);
    machine.set_show_steps(true);

    let json = serde_json::to_string(&machine.settings()).unwrap();
    let restored: Settings = serde_json::from_str(&json).unwrap();

    let mut second = Machine::new();
    restored.push(&mut second).unwrap();
    assert_eq!(second.reflector_choice(), "Reflector C");
    assert_eq!(second.wheel_choice(RotorSlot::Left), "VII");
    assert_eq!(second.ring_index(RotorSlot::Middle), 12);
    assert_eq!(second.rotor_index(RotorSlot::Right), 19);
    assert_eq!(second.plug_text(1), "CD");
    assert!(second.fourth_wheel());
    assert!(!second.use_letters());
    assert!(second.show_steps());
    assert!(!second.is_encipher());
}

#[test]
fn settings_resume_locked_machine() {
    let mut machine = army_machine(["I", "II", "III"], [0; 3], [0; 3]);
    assert_eq!(encipher_text(&mut machine, "AAA"), "BDZ");

    // Saved mid-session: the record carries the advanced offsets and the
    // encipher flag, so the restored machine continues the same stream.
    let settings = machine.settings();
    assert!(settings.encipher);
    assert_eq!(settings.rotor_offsets[RotorSlot::Right.index()], 3);

    let mut resumed = Machine::new();
    settings.push(&mut resumed).unwrap();
    assert!(resumed.is_encipher());
    assert_eq!(encipher_text(&mut resumed, "AA"), encipher_text(&mut machine, "AA"));
}

#[test]
fn display_mode_switches_text_form() {
    let mut machine = Machine::new();
    machine.set_ring_index(RotorSlot::Right, 0).unwrap();
    machine.set_rotor_index(RotorSlot::Right, 25).unwrap();
    assert_eq!(machine.rotor_offset_text(RotorSlot::Right), "Z");
    machine.set_use_letters(false);
    assert_eq!(machine.rotor_offset_text(RotorSlot::Right), "26");
    assert_eq!(machine.ring_setting_text(RotorSlot::Right), "1");
}

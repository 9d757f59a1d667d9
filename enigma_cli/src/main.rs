use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use strum::IntoEnumIterator;
use tracing_subscriber::EnvFilter;

use enigma::{catalog, char_to_index, index_to_char, Machine, Settings, WheelSet};

#[derive(thiserror::Error)]
enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("enum conversion: {0}")]
    Strum(#[from] strum::ParseError),

    #[error(transparent)]
    Engine(#[from] enigma::Error),

    #[error("settings file already exists: {0:?}")]
    Exists(PathBuf),

    #[error("settings are not valid for encipher mode")]
    InvalidConfig,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

#[derive(Parser, Debug)]
struct ActionWheels {
    /// Wheel set to list (Commercial, Rocket, SwissK, M3, M4). Lists every
    /// set when omitted
    #[arg(short, long)]
    set: Option<String>,
}

#[derive(Parser, Debug)]
struct ActionReflectors {}

#[derive(Parser, Debug)]
struct ActionInit {
    /// Settings file to create
    #[arg(index = 1)]
    settings: PathBuf,
}

#[derive(Parser, Debug)]
struct ActionEncipher {
    /// Settings file
    #[arg(index = 1)]
    settings: PathBuf,

    /// Text to encipher. Reads stdin when omitted
    #[arg(index = 2)]
    text: Option<String>,

    /// Show the per-stage signal path of every keystroke
    #[arg(short, long, default_value = "false")]
    trace: bool,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// List catalog wheels
    Wheels(ActionWheels),
    /// List reflector choices
    Reflectors(ActionReflectors),
    /// Write a default settings file
    Init(ActionInit),
    /// Encipher text, saving the advanced rotor offsets back to the
    /// settings file
    Encipher(ActionEncipher),
}

#[derive(Parser, Debug)]
#[command(author, version)]
struct Args {
    #[command(subcommand)]
    action: Action,
}

fn main() -> Result<(), Error> {
    let args = Args::parse();

    match args.action {
        Action::Wheels(args) => wheels(args),
        Action::Reflectors(args) => reflectors(args),
        Action::Init(args) => init(args),
        Action::Encipher(args) => encipher(args),
    }
}

fn wheels(args: ActionWheels) -> Result<(), Error> {
    let sets: Vec<WheelSet> = match args.set {
        Some(name) => vec![name.parse()?],
        None => WheelSet::iter().collect(),
    };

    for set in sets {
        println!("{set}:");
        for wheel in catalog().wheels(set) {
            println!(
                "  {:<18} {}  turnover {:<2}  {} {}",
                wheel.id(),
                wheel.cipher(),
                wheel.turnover_letters(),
                wheel.name(),
                wheel.date(),
            );
        }
    }
    Ok(())
}

fn reflectors(_args: ActionReflectors) -> Result<(), Error> {
    for id in catalog().reflector_ids() {
        println!("{id}");
    }
    Ok(())
}

fn init(args: ActionInit) -> Result<(), Error> {
    if args.settings.exists() {
        return Err(Error::Exists(args.settings));
    }
    fs::write(
        &args.settings,
        serde_json::to_string_pretty(&Settings::default())?,
    )?;
    Ok(())
}

fn encipher(args: ActionEncipher) -> Result<(), Error> {
    let settings: Settings = serde_json::from_str(&fs::read_to_string(&args.settings)?)?;

    let filter = if args.trace || settings.show_steps {
        EnvFilter::new("enigma=debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut machine = Machine::new();
    settings.push(&mut machine)?;
    if !machine.is_encipher() && !machine.set_encipher(true)? {
        return Err(Error::InvalidConfig);
    }

    let text = match args.text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let mut output = String::with_capacity(text.len());
    for c in text.chars() {
        match char_to_index(c) {
            Some(index) => output.push(index_to_char(machine.translate(index)?)),
            None => output.push(c),
        }
    }
    println!("{output}");

    // Persist the advanced offsets so the next run continues the stream.
    fs::write(
        &args.settings,
        serde_json::to_string_pretty(&machine.settings())?,
    )?;
    Ok(())
}

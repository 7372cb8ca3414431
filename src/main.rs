use std::error::Error;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use clap::Parser;
use log::LevelFilter;
use simplelog::WriteLogger;

use chip8vm::clock::SpinClock;
use chip8vm::display::MonoTermDisplay;
use chip8vm::framebuffer::{SCREEN_HEIGHT, SCREEN_WIDTH};
use chip8vm::input::TerminalInput;
use chip8vm::sound::{Mute, SimpleBeep, Sound};
use chip8vm::{Chip8Machine, Config};

#[derive(Parser, Debug)]
#[command(name = "chip8vm", about = "Run a CHIP-8 program in the terminal")]
struct Args {
    /// CHIP-8 program to load at 0x200
    rom: PathBuf,

    /// instructions executed per frame
    #[arg(long, default_value_t = chip8vm::config::DEFAULT_CYCLES_PER_FRAME)]
    cycles: usize,

    /// frames per second
    #[arg(long, default_value_t = chip8vm::config::DEFAULT_FRAME_RATE)]
    fps: u32,

    /// seed for the random number instruction
    #[arg(long)]
    seed: Option<u64>,

    /// don't beep
    #[arg(long)]
    mute: bool,

    /// stop after this many frames
    #[arg(long)]
    frames: Option<u64>,

    /// write log output here; the terminal is busy with the display
    #[arg(long)]
    log: Option<PathBuf>,

    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

fn init_logging(path: &Path, level: LevelFilter) -> Result<(), Box<dyn Error>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    WriteLogger::init(level, simplelog::Config::default(), file)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    if let Some(path) = &args.log {
        init_logging(path, args.log_level)?;
    }

    let config = Config {
        cycles_per_frame: args.cycles,
        frame_rate: args.fps,
        seed: args.seed,
        ..Config::default()
    };
    let sound: Box<dyn Sound> = if args.mute {
        Box::new(Mute::new())
    } else {
        Box::new(SimpleBeep::new())
    };

    let mut machine = Chip8Machine::new(sound, config.clone());
    machine.reset();
    let mut f = File::open(&args.rom)?;
    let len = machine.load_program_from(&mut f)?;
    log::info!("loaded {} bytes from {}", len, args.rom.display());

    // initialise the terminal last so errors above print normally
    let mut input = TerminalInput::new()?;
    machine.attach_display(MonoTermDisplay::new(SCREEN_WIDTH, SCREEN_HEIGHT)?);
    let mut clock = SpinClock::new(config.frame_rate);
    let result = machine.run(&mut clock, &mut input, args.frames);

    // give the terminal back before reporting anything
    drop(machine);
    drop(input);
    result?;
    Ok(())
}

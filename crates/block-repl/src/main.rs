//! A thin interactive driver for the interpreter's public contract.
//! This binary doesn't parse project files, which stays out of scope
//! — it runs the hand-built demo project from [`demo`] through a
//! console [`Screen`](block_interpreter::Screen), printing each
//! `ScriptEvent` `tick` surfaces, mirroring `skip/console_screen.py`'s
//! `__main__` block.

mod console_screen;
mod demo;

use std::thread;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use block_interpreter::{Interpreter, ScriptEventKind};

use console_screen::ConsoleScreen;

#[derive(Parser)]
#[command(about = "Runs the block-interpreter demo project and prints emitted ScriptEvents")]
struct Cli {
    /// Stop after this many ticks. 0 runs until Ctrl+C.
    #[arg(long, default_value_t = 0)]
    ticks: u64,

    /// Frame rate to drive `tick` at. The interpreter caps this at 40 Hz.
    #[arg(long, default_value_t = 40)]
    frame_rate_hz: u32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let frame_rate_hz = cli.frame_rate_hz.min(40).max(1);
    let frame_period = Duration::from_secs_f64(1.0 / frame_rate_hz as f64);

    let project = demo::build();
    let mut interp = Interpreter::new(project, Box::new(ConsoleScreen::new()));
    interp.start();

    let mut frame: u64 = 0;
    loop {
        if cli.ticks != 0 && frame >= cli.ticks {
            break;
        }
        for event in interp.tick(&[]) {
            print_event(&event);
        }
        if interp.thread_count() == 0 {
            tracing::info!("all scripts finished");
            break;
        }
        frame += 1;
        thread::sleep(frame_period);
    }
}

fn print_event(event: &block_interpreter::ScriptEvent) {
    match &event.kind {
        ScriptEventKind::Say(Some(text)) => println!("{:?} says: {text}", event.scriptable),
        ScriptEventKind::Say(None) => println!("{:?} clears speech bubble", event.scriptable),
        ScriptEventKind::Think(Some(text)) => println!("{:?} thinks: {text}", event.scriptable),
        ScriptEventKind::Think(None) => println!("{:?} clears think bubble", event.scriptable),
        ScriptEventKind::Clear => println!("[pen] clear"),
        ScriptEventKind::Stamp => println!("{:?} stamps", event.scriptable),
        ScriptEventKind::Stop(target) => println!("{:?} stop: {target:?}", event.scriptable),
    }
}

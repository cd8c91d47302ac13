//! A console `Screen`, the counterpart of the source's
//! `ConsoleScreen`: no real rendering or input device, so touch/mouse
//! queries report nothing and pen strokes are just logged.

use std::io::{self, BufRead, Write};

use block_model::{Color, ScriptableId};

use block_interpreter::{AskStream, NullScreen, Screen, SoundStream};

/// Blocks the calling `tick` until a line of stdin arrives, mirroring
/// the source's `ask()` generator, which blocks on `raw_input()`.
struct StdinAnswer;

impl AskStream for StdinAnswer {
    fn poll_answer(&mut self) -> Option<String> {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).unwrap_or(0) == 0 {
            return Some(String::new());
        }
        Some(line.trim_end().to_string())
    }
}

/// No real audio backend: a sound is "done playing" the first time
/// it's polled.
struct InstantSound;

impl SoundStream for InstantSound {
    fn poll_playing(&mut self) -> bool {
        false
    }
}

pub struct ConsoleScreen {
    fallback: NullScreen,
}

impl ConsoleScreen {
    pub fn new() -> Self {
        Self { fallback: NullScreen }
    }
}

impl Default for ConsoleScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for ConsoleScreen {
    fn get_mouse_pos(&self) -> (f64, f64) {
        self.fallback.get_mouse_pos()
    }

    fn is_mouse_down(&self) -> bool {
        self.fallback.is_mouse_down()
    }

    fn is_key_pressed(&self, name: &str) -> bool {
        self.fallback.is_key_pressed(name)
    }

    fn touching_mouse(&self, sprite: ScriptableId) -> bool {
        self.fallback.touching_mouse(sprite)
    }

    fn touching_sprite(&self, sprite: ScriptableId, other: ScriptableId) -> bool {
        self.fallback.touching_sprite(sprite, other)
    }

    fn touching_color(&self, sprite: ScriptableId, color: Color) -> bool {
        self.fallback.touching_color(sprite, color)
    }

    fn touching_color_over(&self, sprite: ScriptableId, color: Color, over: Color) -> bool {
        self.fallback.touching_color_over(sprite, color, over)
    }

    fn ask(&mut self, scriptable: ScriptableId, prompt: &str) -> Box<dyn AskStream> {
        println!("{:?} asks: {}", scriptable, prompt);
        print!("? ");
        let _ = io::stdout().flush();
        Box::new(StdinAnswer)
    }

    fn play_sound(&mut self, sound_name: &str) {
        println!("[sound] play {sound_name}");
    }

    fn play_sound_until_done(&mut self, sound_name: &str) -> Box<dyn SoundStream> {
        println!("[sound] play {sound_name} (until done)");
        Box::new(InstantSound)
    }

    fn stop_sounds(&mut self) {
        println!("[sound] stop all");
    }

    fn draw_line(&mut self, start: (f64, f64), end: (f64, f64), color: Color, size: f64) {
        println!(
            "[pen] line {:?} -> {:?} color=#{:02x}{:02x}{:02x} size={size}",
            start, end, color.r, color.g, color.b
        );
    }

    fn play_drum(&mut self, drum: f64, secs: f64) {
        println!("[sound] drum {drum} for {secs}s");
    }

    fn play_note(&mut self, note: f64, secs: f64) {
        println!("[sound] note {note} for {secs}s");
    }
}

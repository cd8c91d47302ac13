//! The abstract screen interface handlers depend on. The only concrete
//! implementation this workspace ships is `block-repl`'s console
//! screen; a graphical backend is out of scope.

use block_model::{Color, ScriptableId};

/// The "lazy sequence" `ask` returns in the source: polled once per
/// frame until it produces a non-empty answer.
pub trait AskStream {
    fn poll_answer(&mut self) -> Option<String>;
}

/// The "lazy sequence" `play_sound_until_done` returns: polled once
/// per frame for as long as the sound is still playing.
pub trait SoundStream {
    fn poll_playing(&mut self) -> bool;
}

pub trait Screen {
    fn get_mouse_pos(&self) -> (f64, f64);
    fn is_mouse_down(&self) -> bool;
    fn is_key_pressed(&self, name: &str) -> bool;

    /// Bounding boxes are checked by the caller; this is the backend's
    /// precise (pixel-mask) filter on top of that.
    fn touching_mouse(&self, sprite: ScriptableId) -> bool;
    fn touching_sprite(&self, sprite: ScriptableId, other: ScriptableId) -> bool;
    fn touching_color(&self, sprite: ScriptableId, color: Color) -> bool;
    fn touching_color_over(&self, sprite: ScriptableId, color: Color, over: Color) -> bool;

    fn ask(&mut self, scriptable: ScriptableId, prompt: &str) -> Box<dyn AskStream>;

    fn play_sound(&mut self, sound_name: &str);
    fn play_sound_until_done(&mut self, sound_name: &str) -> Box<dyn SoundStream>;
    fn stop_sounds(&mut self);

    fn draw_line(&mut self, start: (f64, f64), end: (f64, f64), color: Color, size: f64);
    fn play_drum(&mut self, drum: f64, secs: f64);
    fn play_note(&mut self, note: f64, secs: f64);
}

/// A `Screen` with every method a no-op / default response, for tests
/// that don't exercise the screen boundary — mirrors the source's
/// `Screen` base class, whose methods are all stubs meant to be
/// overridden.
#[derive(Debug, Default)]
pub struct NullScreen;

struct ImmediateAnswer(Option<String>);
impl AskStream for ImmediateAnswer {
    fn poll_answer(&mut self) -> Option<String> {
        self.0.take()
    }
}

struct NeverPlaying;
impl SoundStream for NeverPlaying {
    fn poll_playing(&mut self) -> bool {
        false
    }
}

impl Screen for NullScreen {
    fn get_mouse_pos(&self) -> (f64, f64) {
        (0.0, 0.0)
    }
    fn is_mouse_down(&self) -> bool {
        false
    }
    fn is_key_pressed(&self, _name: &str) -> bool {
        false
    }
    fn touching_mouse(&self, _sprite: ScriptableId) -> bool {
        true
    }
    fn touching_sprite(&self, _sprite: ScriptableId, _other: ScriptableId) -> bool {
        true
    }
    fn touching_color(&self, _sprite: ScriptableId, _color: Color) -> bool {
        false
    }
    fn touching_color_over(&self, _sprite: ScriptableId, _color: Color, _over: Color) -> bool {
        false
    }
    fn ask(&mut self, _scriptable: ScriptableId, _prompt: &str) -> Box<dyn AskStream> {
        Box::new(ImmediateAnswer(Some(String::new())))
    }
    fn play_sound(&mut self, _sound_name: &str) {}
    fn play_sound_until_done(&mut self, _sound_name: &str) -> Box<dyn SoundStream> {
        Box::new(NeverPlaying)
    }
    fn stop_sounds(&mut self) {}
    fn draw_line(&mut self, _start: (f64, f64), _end: (f64, f64), _color: Color, _size: f64) {}
    fn play_drum(&mut self, _drum: f64, _secs: f64) {}
    fn play_note(&mut self, _note: f64, _secs: f64) {}
}

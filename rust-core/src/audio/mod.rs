//! Audio signal model and WAV file input/output with hound

pub mod signal;
pub mod loader;
pub mod writer;

pub use signal::Signal;
pub use loader::{AudioClip, load_audio, decode_wav};
pub use writer::{encode_wav, write_wav};

//! Packer Adapter - WAV 封装实现

mod wav_packer;

pub use wav_packer::{inspect_wav, WavPacker};

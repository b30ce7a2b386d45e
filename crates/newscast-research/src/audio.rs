//! Minimal PCM WAV container writer

use std::fs;
use std::io;
use std::path::Path;

/// Size of the canonical RIFF/WAVE header
pub const WAV_HEADER_LEN: usize = 44;

/// Largest PCM payload whose padded RIFF size still fits in 32 bits
pub const MAX_PCM_LEN: u32 = u32::MAX - 37;

/// PCM stream layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of interleaved channels
    pub channels: u16,
    /// Samples per second
    pub sample_rate: u32,
    /// Bits per sample
    pub bits_per_sample: u16,
}

impl WavSpec {
    /// Layout produced by the speech synthesizer: 24 kHz mono 16-bit
    pub const SPEECH: WavSpec = WavSpec {
        channels: 1,
        sample_rate: 24_000,
        bits_per_sample: 16,
    };

    fn block_align(self) -> u16 {
        self.channels * self.bits_per_sample / 8
    }

    fn byte_rate(self) -> u32 {
        self.sample_rate * u32::from(self.block_align())
    }
}

impl Default for WavSpec {
    fn default() -> Self {
        Self::SPEECH
    }
}

/// 44-byte header for `data_len` bytes of PCM
///
/// Lengths above [`MAX_PCM_LEN`] saturate the RIFF size field.
pub fn wav_header(spec: WavSpec, data_len: u32) -> [u8; WAV_HEADER_LEN] {
    let mut header = [0u8; WAV_HEADER_LEN];
    let riff_len = data_len.saturating_add(data_len % 2).saturating_add(36);

    header[0..4].copy_from_slice(b"RIFF");
    header[4..8].copy_from_slice(&riff_len.to_le_bytes());
    header[8..12].copy_from_slice(b"WAVE");
    header[12..16].copy_from_slice(b"fmt ");
    header[16..20].copy_from_slice(&16u32.to_le_bytes());
    // 1 = integer PCM
    header[20..22].copy_from_slice(&1u16.to_le_bytes());
    header[22..24].copy_from_slice(&spec.channels.to_le_bytes());
    header[24..28].copy_from_slice(&spec.sample_rate.to_le_bytes());
    header[28..32].copy_from_slice(&spec.byte_rate().to_le_bytes());
    header[32..34].copy_from_slice(&spec.block_align().to_le_bytes());
    header[34..36].copy_from_slice(&spec.bits_per_sample.to_le_bytes());
    header[36..40].copy_from_slice(b"data");
    header[40..44].copy_from_slice(&data_len.to_le_bytes());
    header
}

fn pcm_data_len(len: usize) -> io::Result<u32> {
    u32::try_from(len)
        .ok()
        .filter(|&len| len <= MAX_PCM_LEN)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "PCM data exceeds 4 GiB"))
}

/// Write `pcm` as a WAV file, returning the number of bytes written
pub fn write_wav(path: &Path, spec: WavSpec, pcm: &[u8]) -> io::Result<u64> {
    let data_len = pcm_data_len(pcm.len())?;

    let mut bytes = Vec::with_capacity(WAV_HEADER_LEN + pcm.len() + 1);
    bytes.extend_from_slice(&wav_header(spec, data_len));
    bytes.extend_from_slice(pcm);
    if pcm.len() % 2 == 1 {
        bytes.push(0);
    }

    fs::write(path, &bytes)?;
    Ok(bytes.len() as u64)
}

/// WAV writing for audio clips
///
/// The sample format follows the data. Clips whose samples are all whole
/// numbers are written as signed PCM (16-bit when every sample fits `i16`,
/// 32-bit otherwise). Anything else is written as 32-bit IEEE float, so
/// normalized `[-1, 1]` audio keeps its values.

use super::CodecError;
use crate::models::AudioClip;
use std::io::{Seek, Write};

/// Sample layout chosen for a clip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SampleLayout {
    Pcm16,
    Pcm32,
    Float32,
}

impl SampleLayout {
    fn for_samples(samples: &[f64]) -> Self {
        if !samples.iter().all(|x| x.is_finite() && x.fract() == 0.0) {
            return SampleLayout::Float32;
        }

        let fits_i16 = samples
            .iter()
            .all(|&x| x >= f64::from(i16::MIN) && x <= f64::from(i16::MAX));
        if fits_i16 {
            SampleLayout::Pcm16
        } else {
            SampleLayout::Pcm32
        }
    }

    fn wav_spec(self, channels: u16, sample_rate: u32) -> hound::WavSpec {
        let (bits_per_sample, sample_format) = match self {
            SampleLayout::Pcm16 => (16, hound::SampleFormat::Int),
            SampleLayout::Pcm32 => (32, hound::SampleFormat::Int),
            SampleLayout::Float32 => (32, hound::SampleFormat::Float),
        };

        hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample,
            sample_format,
        }
    }
}

fn to_pcm16(x: f64) -> i16 {
    x.round().clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16
}

fn to_pcm32(x: f64) -> i32 {
    x.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

/// Writes a clip as WAV into any seekable sink
pub fn write_wav<W: Write + Seek>(clip: &AudioClip, sink: W) -> Result<(), CodecError> {
    let samples = clip.samples.data();
    let layout = SampleLayout::for_samples(samples);
    let spec = layout.wav_spec(clip.channels()?, clip.sample_rate);

    let mut writer = hound::WavWriter::new(sink, spec)?;
    for &sample in samples {
        match layout {
            SampleLayout::Pcm16 => writer.write_sample(to_pcm16(sample))?,
            SampleLayout::Pcm32 => writer.write_sample(to_pcm32(sample))?,
            SampleLayout::Float32 => writer.write_sample(sample as f32)?,
        }
    }
    writer.finalize()?;

    tracing::trace!(?layout, samples = samples.len(), "Wrote WAV");
    Ok(())
}

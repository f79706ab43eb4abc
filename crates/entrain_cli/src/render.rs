//! Offline host: run an effect over a WAV file.
//!
//! Stands in for the real-time callback. Input channels are mixed down to
//! mono, the effect is stepped once per sample in fixed-size blocks, and the
//! result is written as 32-bit float WAV at the input sample rate.

use std::path::Path;

use anyhow::{Context, Result, bail};
use entrain_core::{Effect, Pots};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

/// Order parameter reading taken after a block.
#[derive(Debug, Clone, Copy)]
pub struct MeterReading {
    pub seconds: f64,
    pub order_parameter: f32,
}

#[derive(Debug)]
pub struct RenderSummary {
    pub effect: String,
    pub description: String,
    pub sample_rate: u32,
    pub frames: usize,
    pub meter: Vec<MeterReading>,
}

/// Read `input`, mixed down to mono, returning the samples and sample rate.
pub fn read_mono(input: &Path) -> Result<(Vec<f32>, u32)> {
    let mut reader =
        WavReader::open(input).with_context(|| format!("failed to open {}", input.display()))?;
    let spec = reader.spec();
    let channels = spec.channels as usize;
    if channels == 0 {
        bail!("{} has no channels", input.display());
    }

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .context("failed to decode float samples")?,
        SampleFormat::Int => {
            let scale = int_scale(spec.bits_per_sample)
                .with_context(|| format!("unsupported sample width in {}", input.display()))?;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<Result<_, _>>()
                .context("failed to decode integer samples")?
        }
    };

    let mono = interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect();
    Ok((mono, spec.sample_rate))
}

/// Factor that maps a signed integer sample of `bits` width onto `[-1, 1)`.
fn int_scale(bits: u16) -> Result<f32> {
    if !(1..=32).contains(&bits) {
        bail!("{bits} bits per sample");
    }
    Ok(1.0 / (1u64 << (bits - 1)) as f32)
}

pub fn write_mono(output: &Path, samples: &[f32], sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(output, spec)
        .with_context(|| format!("failed to create {}", output.display()))?;
    for &s in samples {
        writer.write_sample(s)?;
    }
    writer.finalize().context("failed to finalize output WAV")?;
    Ok(())
}

/// Process `samples` in place, metering every `meter_every` blocks.
pub fn process(
    effect: &mut Effect,
    samples: &mut [f32],
    sample_rate: u32,
    block_size: usize,
    meter_every: usize,
) -> Vec<MeterReading> {
    let block_size = block_size.max(1);
    let meter_every = meter_every.max(1);
    let mut meter = Vec::new();

    for (i, block) in samples.chunks_mut(block_size).enumerate() {
        effect.process_block(block);
        if (i + 1) % meter_every == 0 {
            if let Some(r) = effect.order_parameter() {
                let frames = (i + 1) * block_size;
                meter.push(MeterReading {
                    seconds: frames as f64 / sample_rate as f64,
                    order_parameter: r,
                });
            }
        }
    }
    meter
}

pub fn render(
    effect_name: &str,
    pots: &Pots,
    input: &Path,
    output: &Path,
    block_size: usize,
    meter_every: usize,
) -> Result<RenderSummary> {
    let (mut samples, sample_rate) = read_mono(input)?;
    tracing::info!(
        frames = samples.len(),
        sample_rate,
        input = %input.display(),
        "loaded input"
    );

    let mut effect = Effect::new(effect_name, pots, sample_rate as f32)?;
    let description = effect.describe();
    let meter = process(&mut effect, &mut samples, sample_rate, block_size, meter_every);

    write_mono(output, &samples, sample_rate)?;
    tracing::info!(output = %output.display(), "wrote output");

    Ok(RenderSummary {
        effect: effect_name.to_string(),
        description,
        sample_rate,
        frames: samples.len(),
        meter,
    })
}

use std::path::Path;

use async_trait::async_trait;

use crate::application::ports::{ConversionError, WaveformConverter};

use super::pcm_decoder::{CANONICAL_SAMPLE_RATE, decode_to_mono_pcm};

/// Re-encodes arbitrary audio into canonical WAV: symphonia decode, hound
/// encode at 16 kHz mono 16-bit PCM.
pub struct SymphoniaWavConverter;

#[async_trait]
impl WaveformConverter for SymphoniaWavConverter {
    async fn convert_to_wav(&self, source: &Path, dest: &Path) -> Result<(), ConversionError> {
        let data = tokio::fs::read(source).await?;
        let extension = source
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let pcm = decode_to_mono_pcm(&data, extension.as_deref())?;

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: CANONICAL_SAMPLE_RATE,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut writer = hound::WavWriter::create(dest, spec)
            .map_err(|e| ConversionError::EncodingFailed(e.to_string()))?;
        for sample in &pcm {
            let quantized = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
            writer
                .write_sample(quantized)
                .map_err(|e| ConversionError::EncodingFailed(e.to_string()))?;
        }
        writer
            .finalize()
            .map_err(|e| ConversionError::EncodingFailed(e.to_string()))?;

        tracing::debug!(
            source = %source.display(),
            dest = %dest.display(),
            samples = pcm.len(),
            "Audio converted to canonical wav"
        );

        Ok(())
    }
}

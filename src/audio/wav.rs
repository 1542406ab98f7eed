use anyhow::Context;
use std::io::Cursor;

#[derive(Debug, Clone, Copy)]
pub struct WavInfo {
    pub sample_rate: u32,
    pub channels: u16,
    pub duration_ms: u64,
}

/// Inspect a WAV container without decoding samples.
pub fn probe(bytes: &[u8]) -> anyhow::Result<WavInfo> {
    let reader = hound::WavReader::new(Cursor::new(bytes)).context("read WAV header")?;
    let spec = reader.spec();
    let frames = reader.duration();
    Ok(WavInfo {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        duration_ms: duration_ms(spec.sample_rate, frames as u64),
    })
}

fn duration_ms(sample_rate: u32, frames: u64) -> u64 {
    if sample_rate == 0 {
        return 0;
    }
    (frames as u128 * 1000 / sample_rate as u128) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wav_bytes(sample_rate: u32, samples: &[i16]) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for &sample in samples {
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();
        cursor.into_inner()
    }

    #[test]
    fn probe_reports_rate_and_duration() {
        let bytes = wav_bytes(24000, &[0i16; 24000]);
        let info = probe(&bytes).unwrap();
        assert_eq!(info.sample_rate, 24000);
        assert_eq!(info.channels, 1);
        assert_eq!(info.duration_ms, 1000);
    }

    #[test]
    fn probe_rejects_garbage() {
        assert!(probe(b"not a wav file").is_err());
    }
}

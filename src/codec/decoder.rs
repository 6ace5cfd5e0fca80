//! Symphonia-based decoding to interleaved f32 PCM

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use super::{AudioBuffer, CodecError};

/// Decode a whole file into an interleaved f32 buffer
pub fn decode_file(path: &Path) -> Result<AudioBuffer, CodecError> {
    let file = File::open(path)
        .map_err(|e| CodecError::CorruptFile(format!("Failed to open {}: {}", path.display(), e)))?;

    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    // Hint the probe with the file extension
    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| match e {
            SymphoniaError::Unsupported(what) => CodecError::UnsupportedFormat(format!(
                "{} ({})",
                path.display(),
                what
            )),
            other => {
                CodecError::CorruptFile(format!("Failed to probe {}: {}", path.display(), other))
            }
        })?;

    let mut format = probed.format;

    // First real audio track
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| {
            CodecError::UnsupportedFormat(format!("No audio track in {}", path.display()))
        })?;

    let track_id = track.id;

    // Container parameters can omit or misreport these; the first
    // decoded packet's spec overrides them below
    let mut sample_rate = track.codec_params.sample_rate.unwrap_or(44100);
    let mut channels = track.codec_params.channels.map(|c| c.count()).unwrap_or(2) as u16;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| {
            CodecError::UnsupportedFormat(format!("No decoder for {}: {}", path.display(), e))
        })?;

    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(SymphoniaError::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break; // End of stream
            }
            Err(SymphoniaError::ResetRequired) => {
                decoder.reset();
                continue;
            }
            Err(e) => {
                return Err(CodecError::CorruptFile(format!(
                    "Failed to read packet from {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                if sample_buf.is_none() {
                    let spec = *decoded.spec();
                    sample_rate = spec.rate;
                    channels = spec.channels.count() as u16;
                    let capacity = decoded.capacity() as u64;
                    sample_buf = Some(SampleBuffer::new(capacity, spec));
                }
                if let Some(buf) = sample_buf.as_mut() {
                    buf.copy_interleaved_ref(decoded);
                    samples.extend_from_slice(buf.samples());
                }
            }
            Err(SymphoniaError::DecodeError(e)) => {
                // Recoverable; skip the packet
                log::debug!("Decode error in {} (skipping packet): {}", path.display(), e);
                continue;
            }
            Err(e) => {
                return Err(CodecError::CorruptFile(format!(
                    "Decode failed for {}: {}",
                    path.display(),
                    e
                )));
            }
        }
    }

    if samples.is_empty() {
        return Err(CodecError::CorruptFile(format!(
            "No decodable audio in {}",
            path.display()
        )));
    }

    log::debug!(
        "Decoded {}: {} frames, {} Hz, {} channel(s)",
        path.display(),
        samples.len() / channels.max(1) as usize,
        sample_rate,
        channels
    );

    Ok(AudioBuffer {
        samples,
        sample_rate,
        channels,
    })
}

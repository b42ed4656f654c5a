use std::path::{Component, Path, PathBuf};

use jiff::Zoned;
use uuid::Uuid;

use crate::{
    error::{Result, TtsError},
    model::Waveform,
};

/// A WAV file written by the store
#[derive(Debug, Clone)]
pub struct Artifact {
    /// File name inside the output directory
    pub file_name: String,
    pub path: PathBuf,
    /// Audio length in seconds
    pub duration: f64,
}

/// An artifact opened for streaming
#[derive(Debug)]
pub struct AudioFile {
    pub file: tokio::fs::File,
    pub len: u64,
}

/// Directory of synthesized audio
///
/// Append-only: the store never deletes what it writes.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    directory: PathBuf,
}

impl ArtifactStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Write a waveform as 16-bit PCM mono WAV
    ///
    /// Creates the directory on first use. The file name carries a UUID, so
    /// concurrent writes within the same second get distinct files.
    pub async fn save(&self, prefix: &str, waveform: Waveform) -> Result<Artifact> {
        let file_name = artifact_file_name(prefix, &Zoned::now(), Uuid::new_v4());
        let path = self.directory.join(&file_name);
        let duration = waveform.duration_seconds();

        let directory = self.directory.clone();
        let target = path.clone();

        tokio::task::spawn_blocking(move || write_wav(&directory, &target, &waveform))
            .await
            .map_err(|e| TtsError::SynthesisFailed(format!("audio writer task failed: {e}")))??;

        tracing::debug!(path = %path.display(), duration, "wrote audio artifact");

        Ok(Artifact {
            file_name,
            path,
            duration,
        })
    }

    /// Open an artifact by exact file name
    ///
    /// Names that could resolve outside the directory are treated as missing.
    pub async fn open(&self, file_name: &str) -> Result<AudioFile> {
        let not_found = || TtsError::NotFound("Audio file not found".to_string());

        if !is_plain_file_name(file_name) {
            return Err(not_found());
        }

        let path = self.directory.join(file_name);

        let file = match tokio::fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
            Err(e) => {
                tracing::error!(path = %path.display(), "failed to open audio file: {e}");
                return Err(TtsError::InternalError);
            }
        };

        let metadata = file.metadata().await.map_err(|e| {
            tracing::error!(path = %path.display(), "failed to stat audio file: {e}");
            TtsError::InternalError
        })?;

        if !metadata.is_file() {
            return Err(not_found());
        }

        Ok(AudioFile {
            file,
            len: metadata.len(),
        })
    }
}

/// `<prefix>_<YYYYmmdd_HHMMSS>_<uuid>.wav`
fn artifact_file_name(prefix: &str, now: &Zoned, id: Uuid) -> String {
    format!("{prefix}_{}_{}.wav", now.strftime("%Y%m%d_%H%M%S"), id.simple())
}

fn is_plain_file_name(name: &str) -> bool {
    if name.contains(['/', '\\', '\0']) {
        return false;
    }

    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(component)), None) if component == name
    )
}

fn write_wav(directory: &Path, path: &Path, waveform: &Waveform) -> Result<()> {
    let io_failure = |e: std::io::Error| TtsError::SynthesisFailed(format!("{}: {e}", directory.display()));
    let wav_failure = |e: hound::Error| TtsError::SynthesisFailed(format!("{}: {e}", path.display()));

    std::fs::create_dir_all(directory).map_err(io_failure)?;

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: waveform.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec).map_err(wav_failure)?;

    for &sample in &waveform.samples {
        writer.write_sample(to_pcm16(sample)).map_err(wav_failure)?;
    }

    writer.finalize().map_err(wav_failure)
}

#[allow(clippy::cast_possible_truncation)]
fn to_pcm16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16
}

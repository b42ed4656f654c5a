use std::path::PathBuf;

use clap::Parser;

/// VoiceTech multilingual TTS service
#[derive(Debug, Parser)]
#[command(name = "voicetech", about = "Text-to-speech API for Indian languages")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "voicetech.toml", env = "VOICETECH_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "VOICETECH_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,

    /// Log filter directive, e.g. `info` or `tts=debug,info`
    #[arg(long, default_value = "info", env = "VOICETECH_LOG")]
    pub log_level: String,
}

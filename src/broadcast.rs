//! Push a video file to YouTube Live through `ffmpeg`.
//!
//! The encoder is invoked with a fixed x264/AAC transcoding profile suitable
//! for a 3 Mbit/s RTMP ingest, followed by any caller-supplied arguments and
//! the FLV output target.

use std::env;
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use tokio::process::Command;
use tracing::{info, instrument};

pub const YOUTUBE_RTMP_URL: &str = "rtmp://a.rtmp.youtube.com/live2";
pub const ENCODER: &str = "ffmpeg";

/// x264 + AAC at broadcast-friendly rates, 2 s GOP at 25 fps.
const PROFILE: &[&str] = &[
    "-c:v", "libx264", "-preset", "veryfast", "-maxrate", "3000k", "-bufsize", "6000k",
    "-pix_fmt", "yuv420p", "-g", "50", "-c:a", "aac", "-b:a", "160k", "-ar", "44100",
];

#[derive(Debug, thiserror::Error)]
pub enum BroadcastError {
    #[error("{0} not found in PATH")]
    EncoderNotFound(String),

    #[error("could not start encoder: {0}")]
    Spawn(#[from] io::Error),

    #[error("encoder exited with {0}")]
    EncoderFailed(ExitStatus),
}

/// One broadcast.
#[derive(Debug, Clone)]
pub struct StreamRequest {
    /// Media file (or any input `ffmpeg -i` accepts).
    pub input: String,
    pub stream_key: String,
    /// Appended after the fixed profile, before the output target.
    pub extra_args: Vec<String>,
}

impl StreamRequest {
    pub fn target(&self) -> String {
        format!("{YOUTUBE_RTMP_URL}/{}", self.stream_key)
    }

    /// Encoder arguments, excluding the program name.
    pub fn build_args(&self) -> Vec<String> {
        let mut args = vec!["-re".to_string(), "-i".to_string(), self.input.clone()];
        args.extend(PROFILE.iter().map(|s| s.to_string()));
        args.extend(self.extra_args.iter().cloned());
        args.extend(["-f".to_string(), "flv".to_string(), self.target()]);
        args
    }

    /// Command line for logging, with the stream key masked.
    pub fn display_command(&self, encoder: &Path) -> String {
        let masked = format!("{YOUTUBE_RTMP_URL}/****");
        let target = self.target();
        std::iter::once(encoder.display().to_string())
            .chain(
                self.build_args()
                    .into_iter()
                    .map(|a| if a == target { masked.clone() } else { a }),
            )
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Find `name` on `PATH`.
pub fn locate_encoder(name: &str) -> Result<PathBuf, BroadcastError> {
    locate_in(name, env::var_os("PATH").as_deref())
}

fn locate_in(name: &str, path_var: Option<&OsStr>) -> Result<PathBuf, BroadcastError> {
    let file_name = format!("{name}{}", env::consts::EXE_SUFFIX);
    path_var
        .into_iter()
        .flat_map(env::split_paths)
        .map(|dir| dir.join(&file_name))
        .find(|candidate| is_executable(candidate))
        .ok_or_else(|| BroadcastError::EncoderNotFound(name.to_string()))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Locate `ffmpeg` and run the broadcast to completion.
pub async fn run(req: &StreamRequest) -> Result<(), BroadcastError> {
    let encoder = locate_encoder(ENCODER)?;
    run_with(&encoder, req).await
}

#[instrument(level = "info", skip_all, fields(input = %req.input))]
pub async fn run_with(encoder: &Path, req: &StreamRequest) -> Result<(), BroadcastError> {
    info!(command = %req.display_command(encoder), "Running encoder");
    let status = Command::new(encoder).args(req.build_args()).status().await?;
    if !status.success() {
        return Err(BroadcastError::EncoderFailed(status));
    }
    info!("Broadcast finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(extra: &[&str]) -> StreamRequest {
        StreamRequest {
            input: "video.mp4".to_string(),
            stream_key: "ABCD-1234-XYZ".to_string(),
            extra_args: extra.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_build_args_layout() {
        let args = request(&["-loglevel", "warning"]).build_args();

        assert_eq!(&args[..3], ["-re", "-i", "video.mp4"]);
        let n = args.len();
        assert_eq!(&args[n - 5..n - 3], ["-loglevel", "warning"]);
        assert_eq!(&args[n - 3..], ["-f", "flv", "rtmp://a.rtmp.youtube.com/live2/ABCD-1234-XYZ"]);
        assert!(args.windows(2).any(|w| w == ["-maxrate", "3000k"]));
        assert!(args.windows(2).any(|w| w == ["-ar", "44100"]));
    }

    #[test]
    fn test_display_command_masks_key() {
        let shown = request(&[]).display_command(Path::new("/usr/bin/ffmpeg"));
        assert!(shown.starts_with("/usr/bin/ffmpeg -re -i video.mp4"));
        assert!(!shown.contains("ABCD-1234-XYZ"));
        assert!(shown.ends_with("-f flv rtmp://a.rtmp.youtube.com/live2/****"));
    }

    #[test]
    fn test_locate_in_empty_path() {
        let err = locate_in("ffmpeg", None).unwrap_err();
        assert!(matches!(err, BroadcastError::EncoderNotFound(ref n) if n == "ffmpeg"));
    }

    fn write_encoder(dir: &Path, executable: bool) -> PathBuf {
        let bin = dir.join(format!("fake-encoder{}", env::consts::EXE_SUFFIX));
        std::fs::write(&bin, b"").unwrap();
        #[cfg(unix)]
        {
            let mode = if executable { 0o755 } else { 0o644 };
            std::fs::set_permissions(&bin, std::fs::Permissions::from_mode(mode)).unwrap();
        }
        #[cfg(not(unix))]
        let _ = executable;
        bin
    }

    #[test]
    fn test_locate_in_finds_file() {
        let dir = tempfile::tempdir().unwrap();
        let bin = write_encoder(dir.path(), true);

        let path_var = env::join_paths([Path::new("/definitely/not/here"), dir.path()]).unwrap();
        assert_eq!(locate_in("fake-encoder", Some(path_var.as_os_str())).unwrap(), bin);
    }

    #[cfg(unix)]
    #[test]
    fn test_locate_in_skips_non_executable() {
        let shadow = tempfile::tempdir().unwrap();
        let real = tempfile::tempdir().unwrap();
        write_encoder(shadow.path(), false);
        let bin = write_encoder(real.path(), true);

        let path_var = env::join_paths([shadow.path(), real.path()]).unwrap();
        assert_eq!(locate_in("fake-encoder", Some(path_var.as_os_str())).unwrap(), bin);

        let only_shadow = env::join_paths([shadow.path()]).unwrap();
        let err = locate_in("fake-encoder", Some(only_shadow.as_os_str())).unwrap_err();
        assert!(matches!(err, BroadcastError::EncoderNotFound(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_is_an_error() {
        let encoder = locate_encoder("false").unwrap();
        let err = run_with(&encoder, &request(&[])).await.unwrap_err();
        assert!(matches!(err, BroadcastError::EncoderFailed(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_successful_exit() {
        let encoder = locate_encoder("true").unwrap();
        run_with(&encoder, &request(&[])).await.unwrap();
    }
}

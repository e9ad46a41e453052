//! Stream a video file to YouTube Live using ffmpeg.
//!
//! ```sh
//! yt_stream --input video.mp4 --stream-key ABCD-1234-XYZ -- -loglevel warning
//! ```
//!
//! `ffmpeg` must be installed and available on the `PATH`.

use clap::Parser;
use headline_fetch::broadcast::{self, StreamRequest};
use headline_fetch::logging::init_tracing;
use std::error::Error;
use tracing::error;

/// Stream a video file to YouTube using ffmpeg.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Video file to stream
    #[arg(short, long)]
    input: String,

    /// YouTube stream key
    #[arg(short = 'k', long, env = "YOUTUBE_STREAM_KEY", hide_env_values = true)]
    stream_key: String,

    /// Additional ffmpeg arguments to append at the end
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    extra: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let args = Args::parse();

    let req = StreamRequest {
        input: args.input,
        stream_key: args.stream_key,
        extra_args: args.extra,
    };

    if let Err(e) = broadcast::run(&req).await {
        error!(error = %e, "Broadcast failed");
        return Err(e.into());
    }
    Ok(())
}

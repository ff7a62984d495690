//! Image-sequence discovery and decoding.
//!
//! A "video" for the preview host is a directory of still frames. Files are
//! ordered by the last number in their name so `frame_2.png` sorts before
//! `frame_10.png`.

use crate::cancellation::CancellationToken;
use anyhow::{Context, Result, anyhow};
use iced::widget::image::Handle;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const FRAME_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

static RE_FRAME_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\D*$").expect("frame number pattern"));

/// Frame files found in a directory, in playback order.
#[derive(Debug, Clone)]
pub struct ProbedSequence {
    pub paths: Vec<PathBuf>,
    pub width: u32,
    pub height: u32,
    /// First frame, decoded during the probe.
    pub first: Handle,
}

pub fn is_frame_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            FRAME_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

fn frame_number(path: &Path) -> Option<u64> {
    let stem = path.file_stem()?.to_str()?;
    RE_FRAME_NUMBER
        .captures(stem)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Natural order: numbered files by number, then unnumbered ones by name.
pub fn sort_frames(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| match (frame_number(a), frame_number(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.cmp(b),
    });
}

pub fn list_frames(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read frame directory {}", dir.display()))?;
    let mut paths = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && is_frame_file(&path) {
            paths.push(path);
        }
    }
    if paths.is_empty() {
        return Err(anyhow!("No frames found in {}", dir.display()));
    }
    sort_frames(&mut paths);
    Ok(paths)
}

pub fn decode_frame(path: &Path) -> Result<(Handle, u32, u32)> {
    let decoded = image::open(path)
        .with_context(|| format!("Failed to decode frame {}", path.display()))?
        .to_rgba8();
    let (width, height) = decoded.dimensions();
    Ok((Handle::from_rgba(width, height, decoded.into_raw()), width, height))
}

/// Lists the directory and decodes the first frame.
pub fn probe_sequence(dir: &Path) -> Result<ProbedSequence> {
    let paths = list_frames(dir)?;
    let (first, width, height) = decode_frame(&paths[0])?;
    info!(
        dir = %dir.display(),
        frames = paths.len(),
        width,
        height,
        "Probed frame sequence"
    );
    Ok(ProbedSequence {
        paths,
        width,
        height,
        first,
    })
}

/// Decodes `paths` in order, bailing out between frames once cancelled.
pub fn decode_batch(paths: &[PathBuf], cancel: &CancellationToken) -> Result<Vec<Handle>> {
    let mut frames = Vec::with_capacity(paths.len());
    for path in paths {
        cancel.check_cancelled("decode_batch")?;
        let (handle, _, _) = decode_frame(path)?;
        frames.push(handle);
    }
    debug!(count = frames.len(), "Decoded frame batch");
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("scrubreel-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    #[test]
    fn sorts_numbered_frames_naturally() {
        let mut paths: Vec<PathBuf> = ["frame_10.png", "cover.png", "frame_2.png", "frame_1.jpg"]
            .iter()
            .map(PathBuf::from)
            .collect();
        sort_frames(&mut paths);
        let names: Vec<_> = paths.iter().map(|p| p.to_string_lossy().to_string()).collect();
        assert_eq!(
            names,
            vec!["frame_1.jpg", "frame_2.png", "frame_10.png", "cover.png"]
        );
    }

    #[test]
    fn recognizes_frame_extensions() {
        assert!(is_frame_file(Path::new("a/0001.PNG")));
        assert!(is_frame_file(Path::new("a/0001.webp")));
        assert!(!is_frame_file(Path::new("a/notes.txt")));
        assert!(!is_frame_file(Path::new("a/noext")));
    }

    #[test]
    fn probes_and_decodes_written_frames() {
        let dir = scratch_dir("probe");
        for idx in [3u8, 1, 2] {
            let img = image::RgbaImage::from_pixel(4, 2, image::Rgba([idx * 40, 0, 0, 255]));
            img.save(dir.join(format!("f{idx}.png"))).expect("write frame");
        }
        fs::write(dir.join("readme.txt"), "ignored").expect("write note");

        let probed = probe_sequence(&dir).expect("probe");
        assert_eq!(probed.paths.len(), 3);
        assert!(probed.paths[0].ends_with("f1.png"));
        assert_eq!((probed.width, probed.height), (4, 2));

        let token = CancellationToken::new();
        assert_eq!(decode_batch(&probed.paths[1..], &token).expect("decode").len(), 2);
        token.cancel();
        assert!(decode_batch(&probed.paths, &token).is_err());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = scratch_dir("empty");
        assert!(list_frames(&dir).is_err());
        let _ = fs::remove_dir_all(&dir);
    }
}

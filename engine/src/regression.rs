//! Golden regression helpers.
//!
//! Two kinds of golden are supported. A frame-hash golden stores the SHA-256 of every rendered
//! RGBA frame. A command trace stores every frame's input next to the render commands it
//! produced. A missing golden is an error unless updating is enabled.

use std::{
    fs,
    io::{self, Write},
    path::Path,
    time::Duration,
};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use sha2::{Digest, Sha256};

use crate::{
    FrameLogic, HeadlessRunner,
    graphics::CpuRenderer,
    render::{RenderCommand, draw_commands},
    surface::{RgbaBufferSurface, Surface, SurfaceSize},
};

/// Environment flag helper: accepts `1/true/yes/on` (case-insensitive).
pub fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .ok()
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

/// If set, regression tests rewrite golden files in place.
pub fn update_goldens_enabled() -> bool {
    env_flag("REWIND_UPDATE_GOLDENS")
}

pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

#[macro_export]
macro_rules! regression_golden_path {
    ($name:expr) => {{
        let base = $crate::regression::sanitize_filename($name);
        ::std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("goldens")
            .join(format!("{base}.json"))
    }};
}

pub fn rgba_sha256_hex(rgba: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(rgba);
    hex::encode(hasher.finalize())
}

/// Steps `logic` through `inputs` at a fixed `dt` and hashes each rendered frame.
pub fn render_frame_hashes<G, I>(
    logic: G,
    dt: Duration,
    inputs: I,
    size: SurfaceSize,
) -> Vec<String>
where
    G: FrameLogic,
    I: IntoIterator<Item = G::Input>,
{
    let mut runner = HeadlessRunner::new(logic);
    let mut surface = RgbaBufferSurface::new(size);
    let mut hashes = Vec::new();

    for input in inputs {
        let commands = runner.step(dt, &input);
        {
            let mut gfx = CpuRenderer::new(surface.frame_mut(), size);
            draw_commands(&mut gfx, &commands);
        }
        let _ = surface.present();
        hashes.push(rgba_sha256_hex(surface.frame()));
    }

    hashes
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrameHashGolden {
    pub version: u32,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub hash_alg: String,
    /// One hash per stepped frame.
    pub hashes: Vec<String>,
}

impl FrameHashGolden {
    pub fn new(name: impl Into<String>, width: u32, height: u32, hashes: Vec<String>) -> Self {
        Self {
            version: 1,
            name: name.into(),
            width,
            height,
            hash_alg: "sha256".to_string(),
            hashes,
        }
    }
}

pub fn load_golden_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> io::Result<T> {
    let path = path.as_ref();
    let file = fs::File::open(path)?;
    serde_json::from_reader(io::BufReader::new(file)).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("failed parsing golden json {}: {e}", path.display()),
        )
    })
}

pub fn save_golden_json<T: Serialize>(path: impl AsRef<Path>, golden: &T) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut writer = io::BufWriter::new(fs::File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, golden).map_err(io::Error::other)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

const UPDATE_HINT: &str = "(hint: set REWIND_UPDATE_GOLDENS=1 to rewrite)";

fn mismatch(path: &Path, detail: String) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("golden mismatch at {}: {detail}\n{UPDATE_HINT}", path.display()),
    )
}

/// Writes `golden` when `update` is set; otherwise loads the stored one, failing if absent.
fn update_or_load<T>(path: &Path, golden: &T, update: bool) -> io::Result<Option<T>>
where
    T: Serialize + DeserializeOwned,
{
    if update {
        save_golden_json(path, golden)?;
        tracing::info!(path = %path.display(), "updated golden");
        return Ok(None);
    }
    if !path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("missing golden {}\n{UPDATE_HINT}", path.display()),
        ));
    }
    load_golden_json(path).map(Some)
}

pub fn assert_or_update_golden_json(
    path: impl AsRef<Path>,
    golden: &FrameHashGolden,
    update: bool,
) -> io::Result<()> {
    let path = path.as_ref();
    let Some(expected) = update_or_load(path, golden, update)? else {
        return Ok(());
    };

    if (expected.version, &expected.hash_alg, expected.width, expected.height)
        != (golden.version, &golden.hash_alg, golden.width, golden.height)
    {
        return Err(mismatch(
            path,
            format!(
                "metadata expected v{} alg={} {}x{}, actual v{} alg={} {}x{}",
                expected.version,
                expected.hash_alg,
                expected.width,
                expected.height,
                golden.version,
                golden.hash_alg,
                golden.width,
                golden.height
            ),
        ));
    }

    if expected.hashes.len() != golden.hashes.len() {
        return Err(mismatch(
            path,
            format!(
                "expected {} frames, got {}",
                expected.hashes.len(),
                golden.hashes.len()
            ),
        ));
    }

    if let Some((i, (a, b))) = expected
        .hashes
        .iter()
        .zip(golden.hashes.iter())
        .enumerate()
        .find(|(_, (a, b))| a != b)
    {
        return Err(mismatch(
            path,
            format!("frame {i}\nexpected: {a}\nactual:   {b}"),
        ));
    }

    Ok(())
}

/// One stepped frame: what went in and what was drawn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TracedFrame<I> {
    pub input: I,
    pub commands: Vec<RenderCommand>,
}

/// A recorded run, frame by frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommandTrace<I> {
    pub version: u32,
    pub name: String,
    pub dt_ms: u64,
    pub frames: Vec<TracedFrame<I>>,
}

/// Steps `logic` through `inputs` at a fixed `dt`, keeping every input and its commands.
pub fn record_command_trace<G, I>(
    name: impl Into<String>,
    logic: G,
    dt: Duration,
    inputs: I,
) -> CommandTrace<G::Input>
where
    G: FrameLogic,
    G::Input: Clone,
    I: IntoIterator<Item = G::Input>,
{
    let mut runner = HeadlessRunner::new(logic);
    let frames = inputs
        .into_iter()
        .map(|input| {
            let commands = runner.step(dt, &input);
            TracedFrame { input, commands }
        })
        .collect();

    CommandTrace {
        version: 1,
        name: name.into(),
        dt_ms: dt.as_millis() as u64,
        frames,
    }
}

pub fn assert_or_update_command_trace<I>(
    path: impl AsRef<Path>,
    trace: &CommandTrace<I>,
    update: bool,
) -> io::Result<()>
where
    I: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
{
    let path = path.as_ref();
    let Some(expected) = update_or_load(path, trace, update)? else {
        return Ok(());
    };

    if (expected.version, expected.dt_ms, expected.frames.len())
        != (trace.version, trace.dt_ms, trace.frames.len())
    {
        return Err(mismatch(
            path,
            format!(
                "expected v{} dt={}ms {} frames, actual v{} dt={}ms {} frames",
                expected.version,
                expected.dt_ms,
                expected.frames.len(),
                trace.version,
                trace.dt_ms,
                trace.frames.len()
            ),
        ));
    }

    for (i, (want, got)) in expected.frames.iter().zip(&trace.frames).enumerate() {
        if want.input != got.input {
            return Err(mismatch(
                path,
                format!("frame {i} input\nexpected: {:?}\nactual:   {:?}", want.input, got.input),
            ));
        }
        if want.commands.len() != got.commands.len() {
            return Err(mismatch(
                path,
                format!(
                    "frame {i}: expected {} commands, got {}",
                    want.commands.len(),
                    got.commands.len()
                ),
            ));
        }
        if let Some((j, (a, b))) = want
            .commands
            .iter()
            .zip(&got.commands)
            .enumerate()
            .find(|(_, (a, b))| a != b)
        {
            return Err(mismatch(
                path,
                format!("frame {i} command {j}\nexpected: {a:?}\nactual:   {b:?}"),
            ));
        }
    }

    Ok(())
}

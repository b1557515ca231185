//! The capture frame: region state, overlay, and the capture cycle.
//!
//! A [`CaptureRegion`] is the on-screen rectangle the user drags around.
//! The host window asks it for an [`Overlay`] on every paint and calls
//! [`CaptureRegion::trigger`] when the hotkey fires. Reading the screen and
//! registering OS hotkeys are the host's job, reached through the
//! [`ScreenCapture`] and [`HotkeyRegistry`] traits.
//!
//! A capture goes `Idle → Capturing → Idle`. Hosts that need to hide the
//! frame before grabbing can split the cycle with
//! [`begin_capture`](CaptureRegion::begin_capture) and
//! [`finish_capture`](CaptureRegion::finish_capture). The region is
//! `Capturing` only while its [`PendingCapture`] is alive: dropping the
//! pending capture without finishing it returns the region to `Idle`.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};

use crate::geometry::Size;
use crate::guide::{self, GridType, Overlay, overlay};
use crate::naming::{self, NamingError};

/// Screen rectangle to read, in desktop coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScreenArea {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Where the capture cycle is.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CaptureState {
    #[default]
    Idle,
    /// A file name is allocated and the host is reading the screen.
    Capturing,
}

/// Capture failure.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// A capture was started while another was still pending.
    #[error("a capture is already in progress")]
    Busy,
    /// The pending capture was not started by this region.
    #[error("capture to {} was not started by this region", .path.display())]
    ForeignCapture { path: PathBuf },
    /// The target directory does not exist.
    #[error("capture directory {} does not exist", .path.display())]
    MissingDirectory { path: PathBuf },
    #[error(transparent)]
    Naming(#[from] NamingError),
    /// The file prefix is empty or contains a path separator.
    #[error("invalid file prefix {0:?}")]
    InvalidPrefix(String),
    #[error("failed to write {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The host could not read the screen.
    #[error("screen grab failed: {0}")]
    Grab(String),
    #[error("failed to encode {}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Reads the screen and writes it to a file. Implemented by the host.
pub trait ScreenCapture {
    /// Read `area` and write it to `path`.
    ///
    /// On error nothing should be left at `path`.
    fn capture(&mut self, area: ScreenArea, path: &Path) -> Result<(), CaptureError>;
}

impl<T: ScreenCapture + ?Sized> ScreenCapture for &mut T {
    fn capture(&mut self, area: ScreenArea, path: &Path) -> Result<(), CaptureError> {
        (**self).capture(area, path)
    }
}

/// Global hotkey registration, implemented by the host.
pub trait HotkeyRegistry {
    type Error;

    /// Start delivering trigger events for `hotkey`.
    fn register(&mut self, hotkey: &str) -> Result<(), Self::Error>;

    /// Stop delivering trigger events for `hotkey`.
    fn unregister(&mut self, hotkey: &str);
}

/// A capture that has a file name but no pixels yet.
///
/// Keeps its region in `Capturing` until it is finished, cancelled or
/// dropped.
#[derive(Debug)]
#[must_use = "pass to CaptureRegion::finish_capture or cancel_capture"]
pub struct PendingCapture {
    /// Screen area to read.
    pub area: ScreenArea,
    /// File to write.
    pub path: PathBuf,
    counter: u32,
    ticket: Arc<()>,
}

/// The capture frame's state.
#[derive(Clone, Debug)]
pub struct CaptureRegion {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    border_width: u32,
    opacity: f32,
    grid: GridType,
    prefix: String,
    hotkey: String,
    hotkey_bound: bool,
    counter: u32,
    /// Alive while a [`PendingCapture`] from this region exists.
    pending: Option<Weak<()>>,
}

impl PartialEq for CaptureRegion {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x
            && self.y == other.y
            && self.width == other.width
            && self.height == other.height
            && self.border_width == other.border_width
            && self.opacity == other.opacity
            && self.grid == other.grid
            && self.prefix == other.prefix
            && self.hotkey == other.hotkey
            && self.hotkey_bound == other.hotkey_bound
            && self.counter == other.counter
            && self.state() == other.state()
    }
}

impl Default for CaptureRegion {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureRegion {
    pub const MIN_SIZE: u32 = guide::MIN_FRAME_SIZE;
    pub const MAX_SIZE: u32 = guide::MAX_FRAME_SIZE;
    pub const MIN_BORDER: u32 = guide::MIN_BORDER;
    pub const MAX_BORDER: u32 = guide::MAX_BORDER;
    pub const DEFAULT_PREFIX: &'static str = "capture";
    pub const DEFAULT_HOTKEY: &'static str = "f1";

    /// 400×400 at (100, 100), 3 px border, no grid, counter at 1.
    pub fn new() -> Self {
        Self {
            x: 100,
            y: 100,
            width: 400,
            height: 400,
            border_width: 3,
            opacity: 1.0,
            grid: GridType::None,
            prefix: String::from(Self::DEFAULT_PREFIX),
            hotkey: String::from(Self::DEFAULT_HOTKEY),
            hotkey_bound: false,
            counter: 1,
            pending: None,
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn border_width(&self) -> u32 {
        self.border_width
    }

    /// Guide opacity, 0.0 to 1.0.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn grid(&self) -> GridType {
        self.grid
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn hotkey(&self) -> &str {
        &self.hotkey
    }

    /// Whether [`hotkey`](Self::hotkey) is currently registered.
    ///
    /// False before [`bind_hotkey`](Self::bind_hotkey) and after a rebind
    /// that could neither register the new key nor restore the old one.
    pub fn hotkey_bound(&self) -> bool {
        self.hotkey_bound
    }

    /// Counter the next capture starts allocating from.
    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn state(&self) -> CaptureState {
        match &self.pending {
            Some(ticket) if ticket.strong_count() > 0 => CaptureState::Capturing,
            _ => CaptureState::Idle,
        }
    }

    /// The screen area a capture reads.
    pub fn screen_area(&self) -> ScreenArea {
        ScreenArea {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    /// Move the frame (drag).
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// Resize the frame; each edge is clamped to `100..=2000`.
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width.clamp(Self::MIN_SIZE, Self::MAX_SIZE);
        self.height = height.clamp(Self::MIN_SIZE, Self::MAX_SIZE);
    }

    /// Border and guide stroke width, clamped to `1..=10`.
    pub fn set_border_width(&mut self, px: u32) {
        self.border_width = px.clamp(Self::MIN_BORDER, Self::MAX_BORDER);
    }

    /// Guide opacity, clamped to `0.0..=1.0`. NaN is ignored.
    pub fn set_opacity(&mut self, opacity: f32) {
        if !opacity.is_nan() {
            self.opacity = opacity.clamp(0.0, 1.0);
        }
    }

    /// Guide opacity as a slider percentage, clamped to `0..=100`.
    pub fn set_opacity_percent(&mut self, percent: u32) {
        self.opacity = percent.min(100) as f32 / 100.0;
    }

    pub fn set_grid(&mut self, grid: GridType) {
        self.grid = grid;
    }

    /// Change the file prefix.
    ///
    /// The prefix must be non-empty after trimming and must not contain a
    /// path separator; otherwise the old prefix is kept.
    pub fn set_prefix(&mut self, prefix: &str) -> Result<(), CaptureError> {
        let trimmed = prefix.trim();
        if trimmed.is_empty() || trimmed.contains(['/', '\\']) {
            return Err(CaptureError::InvalidPrefix(prefix.to_owned()));
        }
        self.prefix = trimmed.to_owned();
        Ok(())
    }

    /// Geometry and strokes to paint, computed from the current state.
    pub fn overlay(&self) -> Overlay {
        overlay(
            self.width,
            self.height,
            self.grid,
            self.border_width,
            self.opacity,
        )
    }

    /// Register the current hotkey, at startup.
    pub fn bind_hotkey<R: HotkeyRegistry + ?Sized>(&mut self, registry: &mut R) -> Result<(), R::Error> {
        registry.register(&self.hotkey)?;
        self.hotkey_bound = true;
        Ok(())
    }

    /// Move the trigger to a new hotkey.
    ///
    /// The key is trimmed and lowercased. Returns `Ok(false)` without
    /// touching the registry when it is empty, or unchanged and bound. If
    /// the new key cannot be registered the old one is registered again and
    /// kept; if that fails too the region is left unbound, see
    /// [`hotkey_bound`](Self::hotkey_bound).
    pub fn rebind_hotkey<R: HotkeyRegistry + ?Sized>(
        &mut self,
        hotkey: &str,
        registry: &mut R,
    ) -> Result<bool, R::Error> {
        let hotkey = hotkey.trim().to_lowercase();
        if hotkey.is_empty() || (hotkey == self.hotkey && self.hotkey_bound) {
            return Ok(false);
        }
        let was_bound = self.hotkey_bound;
        if was_bound {
            registry.unregister(&self.hotkey);
            self.hotkey_bound = false;
        }
        match registry.register(&hotkey) {
            Ok(()) => {
                log::info!("capture hotkey changed from {:?} to {hotkey:?}", self.hotkey);
                self.hotkey = hotkey;
                self.hotkey_bound = true;
                Ok(true)
            }
            Err(e) => {
                if !was_bound {
                    log::warn!("could not register hotkey {hotkey:?}, capture hotkey is unbound");
                    return Err(e);
                }
                self.hotkey_bound = registry.register(&self.hotkey).is_ok();
                if self.hotkey_bound {
                    log::warn!("could not register hotkey {hotkey:?}, keeping {:?}", self.hotkey);
                } else {
                    log::warn!(
                        "could not register hotkey {hotkey:?} nor restore {:?}, capture hotkey is unbound",
                        self.hotkey
                    );
                }
                Err(e)
            }
        }
    }

    /// Allocate a file name in `directory` and enter `Capturing`.
    ///
    /// The region stays `Capturing` until the returned capture is passed to
    /// [`finish_capture`](Self::finish_capture) or
    /// [`cancel_capture`](Self::cancel_capture), or dropped.
    pub fn begin_capture(&mut self, directory: &Path) -> Result<PendingCapture, CaptureError> {
        if self.state() == CaptureState::Capturing {
            return Err(CaptureError::Busy);
        }
        if self.pending.take().is_some() {
            log::debug!("previous capture was abandoned without finishing");
        }
        if !directory.is_dir() {
            log::warn!("capture directory {} is missing", directory.display());
            return Err(CaptureError::MissingDirectory {
                path: directory.to_owned(),
            });
        }
        let (path, counter) = naming::next_file_name(directory, &self.prefix, self.counter)?;
        let ticket = Arc::new(());
        self.pending = Some(Arc::downgrade(&ticket));
        Ok(PendingCapture {
            area: self.screen_area(),
            path,
            counter,
            ticket,
        })
    }

    /// Whether `pending` is the capture this region is waiting on.
    fn owns(&self, pending: &PendingCapture) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|ticket| ticket.ptr_eq(&Arc::downgrade(&pending.ticket)))
    }

    /// Return to `Idle` with the outcome of a pending capture.
    ///
    /// The counter advances past the allocated name only on success, so a
    /// failed capture can be retried under the same name. A capture begun by
    /// another region is rejected with [`CaptureError::ForeignCapture`] and
    /// changes nothing.
    pub fn finish_capture(
        &mut self,
        pending: PendingCapture,
        outcome: Result<(), CaptureError>,
    ) -> Result<PathBuf, CaptureError> {
        if !self.owns(&pending) {
            return Err(CaptureError::ForeignCapture { path: pending.path });
        }
        self.pending = None;
        match outcome {
            Ok(()) => {
                self.counter = pending.counter.saturating_add(1);
                log::info!("saved capture {}", pending.path.display());
                Ok(pending.path)
            }
            Err(e) => {
                log::warn!("capture to {} failed: {e}", pending.path.display());
                Err(e)
            }
        }
    }

    /// Abandon a pending capture and return to `Idle`.
    ///
    /// The counter is left where it was. A capture begun by another region
    /// is ignored.
    pub fn cancel_capture(&mut self, pending: PendingCapture) {
        if self.owns(&pending) {
            log::debug!("capture to {} cancelled", pending.path.display());
            self.pending = None;
        }
    }

    /// Run a whole capture: allocate, read the screen, write, advance.
    pub fn trigger<C: ScreenCapture + ?Sized>(
        &mut self,
        directory: &Path,
        capture: &mut C,
    ) -> Result<PathBuf, CaptureError> {
        let pending = self.begin_capture(directory)?;
        let outcome = capture.capture(pending.area, &pending.path);
        self.finish_capture(pending, outcome)
    }
}

/// `base/screenshots`, created if absent.
pub fn capture_dir(base: &Path) -> io::Result<PathBuf> {
    let dir = base.join("screenshots");
    if !dir.is_dir() {
        std::fs::create_dir_all(&dir)?;
        log::debug!("created capture directory {}", dir.display());
    }
    Ok(dir)
}

/// [`ScreenCapture`] from a grab function, encoding JPEG.
#[cfg(feature = "image")]
pub struct GrabAndEncode<F> {
    grab: F,
    quality: u8,
}

#[cfg(feature = "image")]
impl<F> GrabAndEncode<F>
where
    F: FnMut(ScreenArea) -> Result<image::RgbImage, CaptureError>,
{
    /// Wrap a grab function. JPEG quality defaults to 90.
    pub fn new(grab: F) -> Self {
        Self { grab, quality: 90 }
    }

    /// JPEG quality, 1 to 100.
    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = quality.clamp(1, 100);
        self
    }

    fn write(&self, image: &image::RgbImage, path: &Path) -> Result<(), CaptureError> {
        use std::io::Write;

        let io_err = |source| CaptureError::Io {
            path: path.to_owned(),
            source,
        };
        let file = std::fs::File::create(path).map_err(io_err)?;
        let mut writer = io::BufWriter::new(file);
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut writer, self.quality)
            .encode_image(image)
            .map_err(|e| CaptureError::Encode {
                path: path.to_owned(),
                source: Box::new(e),
            })?;
        writer.flush().map_err(io_err)
    }
}

#[cfg(feature = "image")]
impl<F> ScreenCapture for GrabAndEncode<F>
where
    F: FnMut(ScreenArea) -> Result<image::RgbImage, CaptureError>,
{
    fn capture(&mut self, area: ScreenArea, path: &Path) -> Result<(), CaptureError> {
        let image = (self.grab)(area)?;
        let result = self.write(&image, path);
        if result.is_err() {
            let _ = std::fs::remove_file(path);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guide::Primitive;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "zensheet-capture-{name}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Writes the area as text instead of pixels.
    struct FakeScreen {
        fail: bool,
        areas: Vec<ScreenArea>,
    }

    impl ScreenCapture for FakeScreen {
        fn capture(&mut self, area: ScreenArea, path: &Path) -> Result<(), CaptureError> {
            self.areas.push(area);
            if self.fail {
                return Err(CaptureError::Grab("screen locked".into()));
            }
            std::fs::write(path, format!("{area:?}")).map_err(|source| CaptureError::Io {
                path: path.to_owned(),
                source,
            })
        }
    }

    #[derive(Default)]
    struct FakeHotkeys {
        active: Vec<String>,
        reject: Option<String>,
        /// Reject every registration.
        down: bool,
    }

    impl HotkeyRegistry for FakeHotkeys {
        type Error = String;

        fn register(&mut self, hotkey: &str) -> Result<(), String> {
            if self.down {
                return Err("registry down".to_owned());
            }
            if self.reject.as_deref() == Some(hotkey) {
                return Err(format!("{hotkey} is taken"));
            }
            self.active.push(hotkey.to_owned());
            Ok(())
        }

        fn unregister(&mut self, hotkey: &str) {
            self.active.retain(|k| k != hotkey);
        }
    }

    // ── Region settings ─────────────────────────────────────────────────

    #[test]
    fn defaults() {
        let r = CaptureRegion::new();
        assert_eq!(r.size(), Size::new(400, 400));
        assert_eq!((r.x(), r.y()), (100, 100));
        assert_eq!(r.border_width(), 3);
        assert_eq!(r.opacity(), 1.0);
        assert_eq!(r.grid(), GridType::None);
        assert_eq!(r.prefix(), "capture");
        assert_eq!(r.hotkey(), "f1");
        assert_eq!(r.counter(), 1);
        assert_eq!(r.state(), CaptureState::Idle);
    }

    #[test]
    fn setters_clamp() {
        let mut r = CaptureRegion::new();
        r.set_size(5, 9000);
        assert_eq!(r.size(), Size::new(100, 2000));
        r.set_border_width(0);
        assert_eq!(r.border_width(), 1);
        r.set_border_width(50);
        assert_eq!(r.border_width(), 10);
        r.set_opacity(1.5);
        assert_eq!(r.opacity(), 1.0);
        r.set_opacity(f32::NAN);
        assert_eq!(r.opacity(), 1.0);
        r.set_opacity_percent(40);
        assert_eq!(r.opacity(), 0.4);
        r.set_opacity_percent(400);
        assert_eq!(r.opacity(), 1.0);
    }

    #[test]
    fn prefix_validation() {
        let mut r = CaptureRegion::new();
        r.set_prefix("  page ").unwrap();
        assert_eq!(r.prefix(), "page");
        assert!(matches!(r.set_prefix(""), Err(CaptureError::InvalidPrefix(_))));
        assert!(matches!(r.set_prefix("a/b"), Err(CaptureError::InvalidPrefix(_))));
        assert_eq!(r.prefix(), "page");
    }

    #[test]
    fn overlay_follows_mutations() {
        let mut r = CaptureRegion::new();
        assert!(r.overlay().guides.is_empty());

        r.set_size(200, 300);
        r.set_grid(GridType::Hui);
        r.set_border_width(2);
        r.set_opacity_percent(50);
        let o = r.overlay();
        assert_eq!(o.border.width, 199);
        assert_eq!(o.border.height, 299);
        assert!(matches!(o.guides[2], Primitive::Rect(rect) if rect.width == 100 && rect.height == 200));
        assert_eq!(o.guide_stroke.width, 2);
        assert_eq!(o.guide_stroke.opacity, 0.5);
        assert_eq!(o.border_stroke.opacity, 1.0);
    }

    // ── Capture cycle ───────────────────────────────────────────────────

    #[test]
    fn trigger_writes_sequential_files() {
        let dir = temp_dir("seq");
        let mut r = CaptureRegion::new();
        r.set_position(-20, 30);
        let mut screen = FakeScreen {
            fail: false,
            areas: Vec::new(),
        };

        let first = r.trigger(&dir, &mut screen).unwrap();
        let second = r.trigger(&dir, &mut screen).unwrap();
        assert_eq!(first, dir.join("capture_001.jpg"));
        assert_eq!(second, dir.join("capture_002.jpg"));
        assert_eq!(r.counter(), 3);
        assert_eq!(r.state(), CaptureState::Idle);
        assert_eq!(
            screen.areas[0],
            ScreenArea {
                x: -20,
                y: 30,
                width: 400,
                height: 400
            }
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn trigger_skips_existing_files() {
        let dir = temp_dir("skip");
        std::fs::write(dir.join("capture_001.jpg"), b"old").unwrap();
        std::fs::write(dir.join("capture_002.jpg"), b"old").unwrap();
        let mut r = CaptureRegion::new();
        let mut screen = FakeScreen {
            fail: false,
            areas: Vec::new(),
        };

        let path = r.trigger(&dir, &mut screen).unwrap();
        assert_eq!(path, dir.join("capture_003.jpg"));
        assert_eq!(r.counter(), 4);
        assert_eq!(std::fs::read(dir.join("capture_001.jpg")).unwrap(), b"old");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn failed_capture_keeps_counter() {
        let dir = temp_dir("fail");
        let mut r = CaptureRegion::new();
        let mut screen = FakeScreen {
            fail: true,
            areas: Vec::new(),
        };

        assert!(matches!(r.trigger(&dir, &mut screen), Err(CaptureError::Grab(_))));
        assert_eq!(r.counter(), 1);
        assert_eq!(r.state(), CaptureState::Idle);

        screen.fail = false;
        assert_eq!(r.trigger(&dir, &mut screen).unwrap(), dir.join("capture_001.jpg"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_directory_keeps_counter() {
        let dir = std::env::temp_dir().join(format!("zensheet-capture-nowhere-{}", std::process::id()));
        let mut r = CaptureRegion::new();
        let mut screen = FakeScreen {
            fail: false,
            areas: Vec::new(),
        };
        assert!(matches!(
            r.trigger(&dir, &mut screen),
            Err(CaptureError::MissingDirectory { .. })
        ));
        assert_eq!(r.counter(), 1);
        assert!(screen.areas.is_empty());
    }

    #[test]
    fn split_cycle_rejects_overlap() {
        let dir = temp_dir("busy");
        let mut r = CaptureRegion::new();

        let pending = r.begin_capture(&dir).unwrap();
        assert_eq!(r.state(), CaptureState::Capturing);
        assert!(matches!(r.begin_capture(&dir), Err(CaptureError::Busy)));

        std::fs::write(&pending.path, b"px").unwrap();
        let path = r.finish_capture(pending, Ok(())).unwrap();
        assert_eq!(path, dir.join("capture_001.jpg"));
        assert_eq!(r.state(), CaptureState::Idle);
        assert_eq!(r.counter(), 2);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn dropped_pending_returns_to_idle() {
        let dir = temp_dir("dropped");
        let mut r = CaptureRegion::new();
        let mut screen = FakeScreen {
            fail: false,
            areas: Vec::new(),
        };

        {
            let _pending = r.begin_capture(&dir).unwrap();
            assert_eq!(r.state(), CaptureState::Capturing);
        }
        assert_eq!(r.state(), CaptureState::Idle);
        // The abandoned name was never written, so it is reused.
        assert_eq!(r.trigger(&dir, &mut screen).unwrap(), dir.join("capture_001.jpg"));
        assert_eq!(r.counter(), 2);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn cancel_keeps_counter() {
        let dir = temp_dir("cancel");
        let mut r = CaptureRegion::new();

        let pending = r.begin_capture(&dir).unwrap();
        r.cancel_capture(pending);
        assert_eq!(r.state(), CaptureState::Idle);
        assert_eq!(r.counter(), 1);

        let pending = r.begin_capture(&dir).unwrap();
        assert_eq!(pending.path, dir.join("capture_001.jpg"));
        r.cancel_capture(pending);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn pending_from_other_region_is_rejected() {
        let dir = temp_dir("foreign");
        let mut a = CaptureRegion::new();
        let mut b = CaptureRegion::new();
        b.set_prefix("other").unwrap();
        for _ in 0..4 {
            let p = b.begin_capture(&dir).unwrap();
            std::fs::write(&p.path, b"px").unwrap();
            b.finish_capture(p, Ok(())).unwrap();
        }

        let from_b = b.begin_capture(&dir).unwrap();
        let from_a = a.begin_capture(&dir).unwrap();
        assert!(matches!(
            a.finish_capture(from_b, Ok(())),
            Err(CaptureError::ForeignCapture { .. })
        ));
        // Neither region moved; both are still waiting on their own capture.
        assert_eq!(a.counter(), 1);
        assert_eq!(b.counter(), 5);
        assert_eq!(a.state(), CaptureState::Capturing);
        assert_eq!(b.state(), CaptureState::Idle);

        a.cancel_capture(from_a);
        assert_eq!(a.state(), CaptureState::Idle);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn capture_dir_is_created() {
        let base = temp_dir("base");
        let dir = capture_dir(&base).unwrap();
        assert_eq!(dir, base.join("screenshots"));
        assert!(dir.is_dir());
        // Second call finds it.
        assert_eq!(capture_dir(&base).unwrap(), dir);
        std::fs::remove_dir_all(&base).unwrap();
    }

    // ── Hotkeys ─────────────────────────────────────────────────────────

    #[test]
    fn rebind_moves_registration() {
        let mut r = CaptureRegion::new();
        let mut keys = FakeHotkeys::default();
        r.bind_hotkey(&mut keys).unwrap();
        assert_eq!(keys.active, vec!["f1"]);

        assert_eq!(r.rebind_hotkey(" Ctrl+F2 ", &mut keys), Ok(true));
        assert_eq!(r.hotkey(), "ctrl+f2");
        assert_eq!(keys.active, vec!["ctrl+f2"]);

        assert_eq!(r.rebind_hotkey("ctrl+f2", &mut keys), Ok(false));
        assert_eq!(r.rebind_hotkey("   ", &mut keys), Ok(false));
        assert_eq!(keys.active, vec!["ctrl+f2"]);
    }

    #[test]
    fn rebind_failure_restores_old_key() {
        let mut r = CaptureRegion::new();
        let mut keys = FakeHotkeys {
            reject: Some("f5".into()),
            ..FakeHotkeys::default()
        };
        r.bind_hotkey(&mut keys).unwrap();

        assert_eq!(r.rebind_hotkey("F5", &mut keys), Err("f5 is taken".to_owned()));
        assert_eq!(r.hotkey(), "f1");
        assert!(r.hotkey_bound());
        assert_eq!(keys.active, vec!["f1"]);
    }

    #[test]
    fn rebind_with_failed_restore_is_unbound() {
        let mut r = CaptureRegion::new();
        let mut keys = FakeHotkeys::default();
        r.bind_hotkey(&mut keys).unwrap();
        assert!(r.hotkey_bound());

        keys.down = true;
        assert_eq!(r.rebind_hotkey("f5", &mut keys), Err("registry down".to_owned()));
        assert_eq!(r.hotkey(), "f1");
        assert!(!r.hotkey_bound());
        assert!(keys.active.is_empty());

        // Once the registry recovers, rebinding the same key registers it.
        keys.down = false;
        assert_eq!(r.rebind_hotkey("f1", &mut keys), Ok(true));
        assert!(r.hotkey_bound());
        assert_eq!(keys.active, vec!["f1"]);
    }

    #[test]
    fn rebind_before_bind_does_not_register_old_key() {
        let mut r = CaptureRegion::new();
        let mut keys = FakeHotkeys {
            reject: Some("f5".into()),
            ..FakeHotkeys::default()
        };
        assert!(!r.hotkey_bound());
        assert!(r.rebind_hotkey("f5", &mut keys).is_err());
        assert!(keys.active.is_empty());
        assert!(!r.hotkey_bound());
    }

    #[cfg(feature = "image")]
    #[test]
    fn grab_and_encode_writes_jpeg() {
        let dir = temp_dir("jpeg");
        let mut r = CaptureRegion::new();
        r.set_size(120, 100);
        let mut grabber = GrabAndEncode::new(|area: ScreenArea| {
            Ok(image::RgbImage::from_pixel(
                area.width,
                area.height,
                image::Rgb([200, 10, 10]),
            ))
        });

        let path = r.trigger(&dir, &mut grabber).unwrap();
        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (120, 100));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}

//! Interactive editing session.
//!
//! A [`Session`] is everything a front-end needs to drive live editing: it
//! owns the source image, the display area, the adjustment factors, and the
//! two derived images (working and enhanced). Front-ends translate their
//! widget callbacks into [`Event`]s and hand them to [`Session::handle`];
//! the session never calls back into the UI.
//!
//! ```text
//! Open ──▶ source ──fit(display)──▶ working ──enhance(factors)──▶ enhanced
//!                                       ▲                ▲
//!                                    Resized      FactorChanged / Reset
//! ```
//!
//! Derived images are recomputed from scratch on every change, so the
//! preview is always a pure function of (source, display area, factors).
//!
//! File dialogs live in the front-end. A dialog that was cancelled arrives
//! here as a `None` path and is a no-op, not an error.

use crate::config::{EditorConfig, SlidersConfig};
use crate::imaging::{
    Adjustment, AdjustmentState, AspectRatio, BackendError, ImageBackend, SourceImage,
    derive_working_image, enhance,
};
use image::RgbaImage;
use image::imageops::FilterType;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No image is open")]
    NoImage,
    #[error("Session is closed")]
    Closed,
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Input a front-end feeds into the session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    /// A factor control moved. `value` is the raw control value.
    FactorChanged { which: Adjustment, value: f32 },
    /// The preview area changed size.
    Resized { width: u32, height: u32 },
    /// Open a file. `None` means the dialog was cancelled.
    Open {
        #[serde(default)]
        path: Option<PathBuf>,
    },
    /// Save the full-resolution result. `None` means the dialog was cancelled.
    Save {
        #[serde(default)]
        path: Option<PathBuf>,
    },
    /// Restore every factor to 1.0.
    Reset,
    /// Close the session, optionally saving first.
    Quit {
        #[serde(default = "default_true")]
        save: bool,
        #[serde(default)]
        path: Option<PathBuf>,
    },
}

fn default_true() -> bool {
    true
}

impl Event {
    /// Resolve relative paths against `base`.
    pub fn with_base_dir(self, base: &Path) -> Self {
        let resolve = |path: Option<PathBuf>| path.map(|p| base.join(p));
        match self {
            Event::Open { path } => Event::Open {
                path: resolve(path),
            },
            Event::Save { path } => Event::Save {
                path: resolve(path),
            },
            Event::Quit { save, path } => Event::Quit {
                save,
                path: resolve(path),
            },
            other => other,
        }
    }
}

/// What handling an event did.
#[derive(Debug)]
pub enum Outcome {
    /// Factors or display area changed; the preview was recomputed.
    Updated,
    /// A new source image is loaded.
    Opened { path: PathBuf, width: u32, height: u32 },
    /// The full-resolution result was written.
    Saved { path: PathBuf },
    /// A dialog was cancelled; nothing changed.
    Cancelled,
    /// The session is closed.
    Closed,
    /// Quit-with-save did not save, so the session stays open.
    /// `cause` is `None` when the save dialog was cancelled.
    QuitAborted { cause: Option<SessionError> },
}

struct Loaded {
    source: SourceImage,
    path: PathBuf,
    aspect: AspectRatio,
    working: RgbaImage,
    enhanced: RgbaImage,
}

/// Editing session over an [`ImageBackend`].
pub struct Session<B: ImageBackend> {
    backend: B,
    sliders: SlidersConfig,
    filter: FilterType,
    display: (u32, u32),
    adjustments: AdjustmentState,
    image: Option<Loaded>,
    closed: bool,
}

impl<B: ImageBackend> Session<B> {
    /// Create an empty session. Call [`open`](Self::open) to load an image.
    pub fn new(backend: B, config: &EditorConfig) -> Self {
        Self {
            backend,
            sliders: config.sliders,
            filter: config.display.filter.into(),
            display: (config.display.width, config.display.height),
            adjustments: AdjustmentState::default(),
            image: None,
            closed: false,
        }
    }

    /// Create a session and open the configured default image, if any.
    ///
    /// A default image that fails to open is logged and the session starts
    /// empty, the way a front-end would show an empty canvas.
    pub fn with_default_image(backend: B, config: &EditorConfig) -> Self {
        let mut session = Self::new(backend, config);
        if let Some(path) = &config.default_image {
            if let Err(e) = session.open(Some(Path::new(path))) {
                tracing::warn!(%e, path = %path, "Failed to open default image");
            }
        }
        session
    }

    /// Dispatch one front-end event.
    pub fn handle(&mut self, event: Event) -> Result<Outcome, SessionError> {
        if self.closed {
            return Err(SessionError::Closed);
        }
        match event {
            Event::FactorChanged { which, value } => {
                self.on_factor_changed(which, value);
                Ok(Outcome::Updated)
            }
            Event::Resized { width, height } => {
                self.resize(width, height);
                Ok(Outcome::Updated)
            }
            Event::Open { path } => self.open(path.as_deref()),
            Event::Save { path } => self.save(path.as_deref()),
            Event::Reset => {
                self.reset();
                Ok(Outcome::Updated)
            }
            Event::Quit { save, path } => Ok(self.quit(save, path.as_deref())),
        }
    }

    /// Store a control value (clamped and rounded) and refresh the preview.
    ///
    /// Returns the value actually stored.
    pub fn on_factor_changed(&mut self, which: Adjustment, value: f32) -> f32 {
        let stored = self.sliders.apply(which, value);
        self.adjustments.set(which, stored);
        self.refresh_enhanced();
        stored
    }

    /// Restore every factor to 1.0 and refresh the preview.
    pub fn reset(&mut self) {
        self.adjustments.reset();
        self.refresh_enhanced();
    }

    /// Change the display area. Factors are kept.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.display == (width, height) {
            return;
        }
        self.display = (width, height);
        self.refresh_working();
    }

    /// Open `path` as the new source image. `None` is a cancelled dialog.
    ///
    /// On failure the previous image stays loaded.
    pub fn open(&mut self, path: Option<&Path>) -> Result<Outcome, SessionError> {
        let Some(path) = path else {
            return Ok(Outcome::Cancelled);
        };
        let source = self.backend.open(path)?;
        let (width, height) = source.dimensions();
        let aspect = AspectRatio::new(width, height);

        self.adjustments.reset();
        let working = derive_working_image(&source.pixels, self.display, self.filter);
        let enhanced = enhance(&working, &self.adjustments);
        self.image = Some(Loaded {
            source,
            path: path.to_path_buf(),
            aspect,
            working,
            enhanced,
        });

        Ok(Outcome::Opened {
            path: path.to_path_buf(),
            width,
            height,
        })
    }

    /// Re-run the pipeline at full resolution and write it to `path`.
    ///
    /// `None` is a cancelled dialog. After a successful write the saved file
    /// becomes the new source, which bakes the edits in and resets the factors.
    pub fn save(&mut self, path: Option<&Path>) -> Result<Outcome, SessionError> {
        let Some(path) = path else {
            return Ok(Outcome::Cancelled);
        };
        let loaded = self.image.as_ref().ok_or(SessionError::NoImage)?;
        let full = enhance(&loaded.source.pixels, &self.adjustments);
        self.backend.save(&full, path)?;

        if let Err(e) = self.open(Some(path)) {
            tracing::warn!(%e, path = %path.display(), "Saved image could not be reopened");
        }
        Ok(Outcome::Saved {
            path: path.to_path_buf(),
        })
    }

    /// Close the session. With `save`, a cancelled or failed save keeps it open.
    pub fn quit(&mut self, save: bool, path: Option<&Path>) -> Outcome {
        if save {
            match self.save(path) {
                Ok(Outcome::Saved { .. }) => {}
                Ok(_) => {
                    tracing::warn!("Quit aborted: save was cancelled");
                    return Outcome::QuitAborted { cause: None };
                }
                Err(e) => {
                    tracing::warn!(%e, "Quit aborted: save failed");
                    return Outcome::QuitAborted { cause: Some(e) };
                }
            }
        }
        self.closed = true;
        Outcome::Closed
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn adjustments(&self) -> &AdjustmentState {
        &self.adjustments
    }

    pub fn display_area(&self) -> (u32, u32) {
        self.display
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.image.as_ref().map(|l| &l.source)
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.image.as_ref().map(|l| l.path.as_path())
    }

    pub fn aspect_ratio(&self) -> Option<AspectRatio> {
        self.image.as_ref().map(|l| l.aspect)
    }

    /// The display-sized copy of the source.
    pub fn working_image(&self) -> Option<&RgbaImage> {
        self.image.as_ref().map(|l| &l.working)
    }

    /// The preview: working image with the current factors applied.
    pub fn enhanced_image(&self) -> Option<&RgbaImage> {
        self.image.as_ref().map(|l| &l.enhanced)
    }

    fn refresh_working(&mut self) {
        if let Some(loaded) = self.image.as_mut() {
            loaded.working = derive_working_image(&loaded.source.pixels, self.display, self.filter);
        }
        self.refresh_enhanced();
    }

    fn refresh_enhanced(&mut self) {
        if let Some(loaded) = self.image.as_mut() {
            loaded.enhanced = enhance(&loaded.working, &self.adjustments);
        }
    }
}

/// Parse a replay script: a TOML document of `[[event]]` tables.
///
/// ```toml
/// [[event]]
/// kind = "open"
/// path = "photo.jpg"
///
/// [[event]]
/// kind = "factor_changed"
/// which = "saturation"
/// value = 1.4
/// ```
pub fn parse_script(src: &str) -> Result<Vec<Event>, toml::de::Error> {
    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Script {
        #[serde(default)]
        event: Vec<Event>,
    }
    let script: Script = toml::from_str(src)?;
    Ok(script.event)
}

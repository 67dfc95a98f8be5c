use std::fmt::{self, Debug};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use resvg::tiny_skia::Pixmap;

use crate::io::image_loader::{CardImageLoader, ImageLoader};
use crate::model::compressed_image::CardImage;
use crate::model::config::Config;
use crate::model::errors::SketchResult;
use crate::model::stroke::Stroke;
use crate::model::stroke_log::StrokeLog;
use crate::render::rasterizer;
use crate::service::card_image;

/// The one drawing in progress, with the surface it renders to.
///
/// Clones share state, so every UI handler can hold one. Undo, redo and [`render`] rebuild the
/// surface from the log and may suspend while a base image loads; only one of them runs at a
/// time, and a request that arrives while one is in flight is dropped rather than queued.
///
/// [`render`]: DrawingSession::render
#[derive(Clone)]
pub struct DrawingSession {
    pub config: Config,
    log: Arc<Mutex<StrokeLog>>,
    surface: Arc<Mutex<Pixmap>>,
    base: Arc<Mutex<Option<CardImage>>>,
    loader: Arc<dyn ImageLoader>,
    replaying: Arc<AtomicBool>,
    /// Bumped by [`DrawingSession::clear`]; a replay that started under an older value is stale.
    generation: Arc<AtomicU64>,
}

/// Held for the lifetime of one replay; dropping it lets the next undo or redo in.
struct ReplayGuard(Arc<AtomicBool>);

impl ReplayGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        if flag.swap(true, Ordering::SeqCst) {
            return None;
        }
        Some(Self(flag.clone()))
    }
}

impl Drop for ReplayGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl DrawingSession {
    /// Starts a session, optionally on top of an existing card image, and renders it.
    #[instrument(level = "info", skip_all, err(Debug))]
    pub async fn open(config: Config, base: Option<CardImage>) -> SketchResult<Self> {
        Self::open_with_loader(config, base, CardImageLoader).await
    }

    pub async fn open_with_loader(
        config: Config, base: Option<CardImage>, loader: impl ImageLoader + 'static,
    ) -> SketchResult<Self> {
        let surface = rasterizer::blank(config.canvas_size)?;
        let session = Self {
            config,
            log: Arc::default(),
            surface: Arc::new(Mutex::new(surface)),
            base: Arc::new(Mutex::new(base)),
            loader: Arc::new(loader),
            replaying: Arc::default(),
            generation: Arc::default(),
        };

        session.render().await?;
        Ok(session)
    }

    /// Appends a finished stroke and draws it onto the current surface.
    #[instrument(level = "debug", skip_all, fields(segments = stroke.segments.len(), fill = stroke.is_fill))]
    pub fn record(&self, stroke: Stroke) -> SketchResult<()> {
        let mut log = self.log.lock()?;
        let mut surface = self.surface.lock()?;
        rasterizer::apply_stroke(&mut surface, &stroke);
        log.record(stroke);
        Ok(())
    }

    /// Removes the newest stroke and rebuilds the surface without it. `None` when there was
    /// nothing to undo or another replay was still running.
    #[instrument(level = "debug", skip_all, err(Debug))]
    pub async fn undo(&self) -> SketchResult<Option<Stroke>> {
        let Some(_guard) = ReplayGuard::acquire(&self.replaying) else {
            debug!("undo ignored, a replay is already in flight");
            return Ok(None);
        };

        let (undone, history) = {
            let mut log = self.log.lock()?;
            let Some(undone) = log.undo() else {
                return Ok(None);
            };
            (undone, log.history().to_vec())
        };

        self.replay(history).await?;
        Ok(Some(undone))
    }

    /// Restores the most recently undone stroke. Without a base image the stroke is drawn on
    /// top of the current surface; with one the whole log is replayed so the base stays beneath.
    #[instrument(level = "debug", skip_all, err(Debug))]
    pub async fn redo(&self) -> SketchResult<Option<Stroke>> {
        let Some(_guard) = ReplayGuard::acquire(&self.replaying) else {
            debug!("redo ignored, a replay is already in flight");
            return Ok(None);
        };

        let (restored, history, has_base) = {
            let mut log = self.log.lock()?;
            let Some(restored) = log.redo() else {
                return Ok(None);
            };
            let has_base = self.base.lock()?.is_some();
            (restored, log.history().to_vec(), has_base)
        };

        if has_base {
            self.replay(history).await?;
        } else {
            let mut surface = self.surface.lock()?;
            rasterizer::apply_stroke(&mut surface, &restored);
        }

        Ok(Some(restored))
    }

    /// Rebuilds the surface from the log. `false` when another replay was in flight.
    #[instrument(level = "debug", skip_all, err(Debug))]
    pub async fn render(&self) -> SketchResult<bool> {
        let Some(_guard) = ReplayGuard::acquire(&self.replaying) else {
            return Ok(false);
        };

        let history = self.log.lock()?.history().to_vec();
        self.replay(history).await?;
        Ok(true)
    }

    /// Forgets the drawing, its undo history and its base image; used when starting a new card.
    pub fn clear(&self) -> SketchResult<()> {
        let mut log = self.log.lock()?;
        log.clear();
        self.generation.fetch_add(1, Ordering::SeqCst);
        *self.base.lock()? = None;
        *self.surface.lock()? = rasterizer::blank(self.config.canvas_size)?;
        info!("drawing cleared");
        Ok(())
    }

    /// Produces the card image for the current surface.
    #[instrument(level = "info", skip_all, err(Debug))]
    pub fn finalize(&self) -> SketchResult<CardImage> {
        if self.is_replaying() {
            warn!("finalizing while a replay is in flight, the surface may be stale");
        }
        let surface = self.surface.lock()?;
        let image = card_image::encode(&surface, self.config.compress_images)?;
        info!(compressed = image.is_compressed(), "card image finalized");
        Ok(image)
    }

    pub fn surface(&self) -> SketchResult<Pixmap> {
        Ok(self.surface.lock()?.clone())
    }

    pub fn log(&self) -> SketchResult<StrokeLog> {
        Ok(self.log.lock()?.clone())
    }

    pub fn history(&self) -> SketchResult<Vec<Stroke>> {
        Ok(self.log.lock()?.history().to_vec())
    }

    pub fn has_undo(&self) -> SketchResult<bool> {
        Ok(self.log.lock()?.has_undo())
    }

    pub fn has_redo(&self) -> SketchResult<bool> {
        Ok(self.log.lock()?.has_redo())
    }

    pub fn is_replaying(&self) -> bool {
        self.replaying.load(Ordering::SeqCst)
    }

    /// Full rebuild of `history` over the base image. Yields between strokes so a long log
    /// doesn't hold up other UI work; strokes recorded meanwhile are drawn before committing.
    async fn replay(&self, history: Vec<Stroke>) -> SketchResult<()> {
        let size = self.config.canvas_size;
        let generation = self.generation.load(Ordering::SeqCst);

        let base = self.base.lock()?.clone();
        let base = match base {
            Some(image) => Some(self.loader.load(image, size).await?),
            None => None,
        };

        let mut pixmap = rasterizer::begin(size, base.as_ref())?;
        for stroke in &history {
            tokio::task::yield_now().await;
            rasterizer::apply_stroke(&mut pixmap, stroke);
        }

        let log = self.log.lock()?;
        let cleared = self.generation.load(Ordering::SeqCst) != generation;
        if !cleared && log.history().starts_with(&history) {
            for stroke in &log.history()[history.len()..] {
                rasterizer::apply_stroke(&mut pixmap, stroke);
            }
        } else {
            // clear() dropped the base we loaded
            let base = base.as_ref().filter(|_| !cleared);
            pixmap = rasterizer::replay(log.history(), base, size)?;
        }
        *self.surface.lock()? = pixmap;

        debug!(strokes = log.len(), "replay committed");
        Ok(())
    }
}

impl Debug for DrawingSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawingSession")
            .field("config", &self.config)
            .field("log", &self.log)
            .field("replaying", &self.is_replaying())
            .finish()
    }
}

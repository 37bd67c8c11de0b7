//! One open image and its pending edits.
//!
//! An [`EditSession`] owns everything a front end needs to edit a single
//! file: the decoded base image (never modified), the working image (the base
//! with the selected colour filter applied), the [`OperationsState`], the
//! [`Pipeline`] that renders previews and the last [`Preview`], which
//! incremental channel scaling builds on.
//!
//! The working image always follows `state.color_filter`, however the state
//! was changed: a render first rebuilds it if the selection moved.
//!
//! ```ignore
//! let mut session = EditSession::open("photo.jpg", &EditorConfig::default())?;
//! session.select_filter_by_name("sepia")?;
//! session.state_mut().rotate_left();
//! let preview = session.render_preview()?;
//! session.save("photo-edited.png")?;
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{EditorConfig, ExportConfig};
use crate::decode::{decode_path, DecodedImage, LoadError};
use crate::encode::{encode_path, EncodeError};
use crate::filter::{apply_color_filter, parse_filter_selection, ColorFilter, FilterError};
use crate::operations::{OperationsState, StateError};
use crate::pipeline::{Pipeline, PipelineError, Preview};
use crate::transform::{ratio_height, ratio_width};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    State(#[from] StateError),
}

/// Editing context for a single image.
#[derive(Debug, Clone)]
pub struct EditSession {
    path: Option<PathBuf>,
    base: DecodedImage,
    working: DecodedImage,
    /// Filter `working` was built with.
    working_filter: Option<ColorFilter>,
    state: OperationsState,
    pipeline: Pipeline,
    preview: Option<Preview>,
    export: ExportConfig,
}

impl EditSession {
    /// Load `path` and start a session with no pending edits.
    pub fn open(path: impl AsRef<Path>, config: &EditorConfig) -> Result<Self, SessionError> {
        let path = path.as_ref();
        let image = decode_path(path)?;
        let mut session = Self::from_image(image, config);
        session.path = Some(path.to_path_buf());
        Ok(session)
    }

    /// Start a session on an already decoded image.
    pub fn from_image(image: DecodedImage, config: &EditorConfig) -> Self {
        Self {
            path: None,
            working: image.clone(),
            working_filter: None,
            base: image,
            state: OperationsState::default(),
            pipeline: Pipeline::new(config.render),
            preview: None,
            export: config.export,
        }
    }

    /// File the base image was loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn base(&self) -> &DecodedImage {
        &self.base
    }

    /// Base image with the selected colour filter applied, as of the last
    /// filter selection or render.
    pub fn working(&self) -> &DecodedImage {
        &self.working
    }

    pub fn state(&self) -> &OperationsState {
        &self.state
    }

    /// Mutable access to the pending edits.
    ///
    /// A changed `color_filter` takes effect on the next render.
    pub fn state_mut(&mut self) -> &mut OperationsState {
        &mut self.state
    }

    /// Last rendered preview, if any.
    pub fn preview(&self) -> Option<&DecodedImage> {
        self.preview.as_ref().map(Preview::image)
    }

    /// Select a colour filter, or `None` for the unfiltered image.
    ///
    /// The working image is recomputed from the base, so filters never
    /// stack.
    pub fn select_filter(&mut self, filter: Option<ColorFilter>) {
        self.state.color_filter = filter;
        self.rebuild_working();
        tracing::debug!(filter = ?filter, "filter selected");
    }

    /// Select a colour filter by name; `"none"` clears it.
    ///
    /// # Errors
    ///
    /// [`SessionError::Filter`] for an unknown name. The selection is left
    /// unchanged in that case.
    pub fn select_filter_by_name(&mut self, name: &str) -> Result<(), SessionError> {
        let filter = parse_filter_selection(name)?;
        self.select_filter(filter);
        Ok(())
    }

    /// Render the working image with every pending edit.
    ///
    /// The result is kept as the previous preview for the next render.
    pub fn render_preview(&mut self) -> Result<DecodedImage, SessionError> {
        if self.state.color_filter != self.working_filter {
            self.rebuild_working();
        }
        let preview = self
            .pipeline
            .render(&self.working, self.preview.as_ref(), &mut self.state)?;
        let image = preview.image().clone();
        self.preview = Some(preview);
        Ok(image)
    }

    /// Drop every edit and return to the unfiltered base image.
    pub fn reset(&mut self) {
        self.state.reset();
        self.rebuild_working();
        tracing::info!("session reset");
    }

    pub fn has_pending_changes(&self) -> bool {
        self.state.has_pending_changes()
    }

    /// Render the preview and write it to `path`, format by extension.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let image = self.render_preview()?;
        encode_path(&image, path, self.export.jpeg_quality)?;
        Ok(())
    }

    /// Resize to `width`, keeping the base image's aspect ratio.
    ///
    /// Returns the target size that was set.
    pub fn fit_width(&mut self, width: u32) -> Result<(u32, u32), SessionError> {
        let height = ratio_height(self.base.width, self.base.height, width);
        self.state.set_size(width, height)?;
        Ok((width, height))
    }

    /// Resize to `height`, keeping the base image's aspect ratio.
    pub fn fit_height(&mut self, height: u32) -> Result<(u32, u32), SessionError> {
        let width = ratio_width(self.base.width, self.base.height, height);
        self.state.set_size(width, height)?;
        Ok((width, height))
    }

    /// Load another image into this session, discarding all edits.
    ///
    /// On failure the current image and edits are kept.
    pub fn navigate_to(&mut self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let path = path.as_ref();
        let image = decode_path(path)?;
        self.base = image;
        self.state.reset();
        self.rebuild_working();
        self.path = Some(path.to_path_buf());
        tracing::info!("navigated to {}", path.display());
        Ok(())
    }

    /// Recompute the working image from the base for `state.color_filter`.
    ///
    /// The previous preview no longer matches and is dropped.
    fn rebuild_working(&mut self) {
        let filter = self.state.color_filter;
        self.working = match filter {
            Some(filter) => apply_color_filter(&self.base, filter),
            None => self.base.clone(),
        };
        self.working_filter = filter;
        self.preview = None;
    }
}

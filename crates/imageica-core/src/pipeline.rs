//! Preview rendering.
//!
//! [`Pipeline::render`] turns a base image plus an [`OperationsState`] into a
//! new [`Preview`]. Stages run in a fixed order, each on the output of the
//! previous one, and are skipped at their identity value:
//!
//! 1. brightness (factor != 0)
//! 2. contrast (factor != 0)
//! 3. sharpness (factor != 0)
//! 4. rotate (angle != 0)
//! 5. horizontal flip (`flip_left`)
//! 6. vertical flip (`flip_top`)
//! 7. resize (`size` set)
//! 8. red, green and blue channel scaling
//!
//! Stages 1 to 7 are recomputed from the base. Channel scaling follows
//! [`ChannelScaling`]:
//!
//! - `Incremental`: when the previous preview was rendered with the same
//!   stages 1 to 7 and its ratios match the `*_prev` fields, that preview is
//!   reused and only the pending `ratio / prev_ratio` is applied to it, so
//!   truncation compounds across edits. Otherwise stages 1 to 7 are rebuilt
//!   and each channel is scaled by its full ratio.
//! - `Recompute`: every render is a pure function of the base and the state.
//!
//! Either way a preview always reflects every ratio in the state.
//!
//! The colour filter is not a stage. It is applied to the base before the
//! pipeline runs (see [`crate::session::EditSession`]).
//!
//! All parameters are validated before any pixel work starts, so a failed
//! render leaves the state untouched.

use thiserror::Error;

use crate::channel::{is_valid_ratio, scale_channel, Channel, ScaleError};
use crate::config::{ChannelScaling, RenderConfig};
use crate::decode::{DecodedImage, PixelLayout};
use crate::enhance::{BlendEnhancer, Enhancer};
use crate::filter::ColorFilter;
use crate::operations::OperationsState;
use crate::tone::{self, ToneError, ToneOperation};
use crate::transform::{self, TransformError};

/// Errors raised while rendering a preview.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Tone(#[from] ToneError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Scale(#[from] ScaleError),
}

/// Ordered preview renderer.
#[derive(Debug, Clone, Default)]
pub struct Pipeline<E: Enhancer = BlendEnhancer> {
    enhancer: E,
    config: RenderConfig,
}

impl Pipeline {
    /// Create a pipeline using the default enhancer.
    pub fn new(config: RenderConfig) -> Self {
        Self::with_enhancer(BlendEnhancer, config)
    }
}

impl<E: Enhancer> Pipeline<E> {
    /// Create a pipeline with a custom enhancement capability.
    pub fn with_enhancer(enhancer: E, config: RenderConfig) -> Self {
        Self { enhancer, config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn enhancer(&self) -> &E {
        &self.enhancer
    }

    /// Render a preview of `base` with every pending edit in `state`.
    ///
    /// No earlier preview is reused, so every channel is scaled by its full
    /// ratio. The `*_prev` ratio fields of `state` are updated.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::Tone`] for a nonzero tone factor out of range
    /// - [`PipelineError::Transform`] for an invalid angle or size
    /// - [`PipelineError::Scale`] for a non-positive or non-finite ratio
    pub fn render_preview(
        &self,
        base: &DecodedImage,
        state: &mut OperationsState,
    ) -> Result<DecodedImage, PipelineError> {
        self.render(base, None, state).map(Preview::into_image)
    }

    /// Render a preview, building on `previous` where the scaling policy
    /// allows it.
    ///
    /// `previous` must have been rendered from the same `base`. `base` is
    /// never modified; the `*_prev` ratio fields of `state` are updated.
    ///
    /// # Errors
    ///
    /// Same as [`Pipeline::render_preview`].
    pub fn render(
        &self,
        base: &DecodedImage,
        previous: Option<&Preview>,
        state: &mut OperationsState,
    ) -> Result<Preview, PipelineError> {
        validate(state)?;

        let stages = StageParams::new(base, state);
        let reusable = match self.config.channel_scaling {
            ChannelScaling::Incremental => previous
                .filter(|p| p.stages == stages && p.applied == applied_ratios(state)),
            ChannelScaling::Recompute => None,
        };

        let mut image = match reusable {
            Some(previous) => {
                tracing::debug!("reusing previous preview");
                previous.image.clone()
            }
            None => self.apply_stages(base, state)?,
        };

        for channel in Channel::ALL {
            let (ratio, prev) = state.channel_ratio(channel);
            // A reused preview already carries `prev`; a rebuilt one carries 1.0
            let carried = if reusable.is_some() { prev } else { 1.0 };
            if ratio != carried {
                tracing::debug!(%channel, ratio, carried, "scaling channel");
                scale_channel(&mut image, channel, ratio, carried)?;
            }
            if ratio != prev {
                state.mark_applied(channel);
            }
        }

        Ok(Preview {
            image,
            stages,
            applied: applied_ratios(state),
        })
    }

    /// Stages 1 to 7 on a copy of `base`.
    fn apply_stages(
        &self,
        base: &DecodedImage,
        state: &OperationsState,
    ) -> Result<DecodedImage, PipelineError> {
        let mut image = base.clone();

        for operation in ToneOperation::ALL {
            let factor = state.tone_factor(operation);
            if factor != 0.0 {
                tracing::debug!(%operation, factor, "applying tone stage");
                image = tone::adjust(&self.enhancer, &image, operation, factor)?;
            }
        }

        if state.rotation_angle != 0 {
            tracing::debug!(angle = state.rotation_angle, "rotating");
            image = transform::rotate(&image, state.rotation_angle)?;
        }

        if state.flip_left {
            tracing::debug!("flipping horizontally");
            image = transform::flip_horizontal(&image);
        }

        if state.flip_top {
            tracing::debug!("flipping vertically");
            image = transform::flip_vertical(&image);
        }

        if let Some((width, height)) = state.size {
            tracing::debug!(width, height, filter = ?self.config.resize_filter, "resizing");
            image = transform::resize(&image, width, height, self.config.resize_filter)?;
        }

        Ok(image)
    }
}

/// A rendered preview and the parameters it was rendered with.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    image: DecodedImage,
    stages: StageParams,
    applied: [f64; 3],
}

impl Preview {
    pub fn image(&self) -> &DecodedImage {
        &self.image
    }

    pub fn into_image(self) -> DecodedImage {
        self.image
    }

    /// Red, green and blue ratios baked into the image.
    pub fn applied_ratios(&self) -> [f64; 3] {
        self.applied
    }
}

/// Everything stages 1 to 7 depend on.
#[derive(Debug, Clone, Copy, PartialEq)]
struct StageParams {
    base_size: (u32, u32),
    base_layout: PixelLayout,
    color_filter: Option<ColorFilter>,
    tone: [f64; 3],
    rotation_angle: i32,
    flip_left: bool,
    flip_top: bool,
    size: Option<(u32, u32)>,
}

impl StageParams {
    fn new(base: &DecodedImage, state: &OperationsState) -> Self {
        Self {
            base_size: (base.width, base.height),
            base_layout: base.layout,
            color_filter: state.color_filter,
            tone: ToneOperation::ALL.map(|operation| state.tone_factor(operation)),
            rotation_angle: state.rotation_angle,
            flip_left: state.flip_left,
            flip_top: state.flip_top,
            size: state.size,
        }
    }
}

fn applied_ratios(state: &OperationsState) -> [f64; 3] {
    Channel::ALL.map(|channel| state.channel_ratio(channel).1)
}

/// Render with the default enhancer and configuration.
pub fn render_preview(
    base: &DecodedImage,
    state: &mut OperationsState,
) -> Result<DecodedImage, PipelineError> {
    Pipeline::new(RenderConfig::default()).render_preview(base, state)
}

fn validate(state: &OperationsState) -> Result<(), PipelineError> {
    for operation in ToneOperation::ALL {
        let factor = state.tone_factor(operation);
        if factor != 0.0 {
            operation.validate(factor)?;
        }
    }

    transform::normalize_angle(state.rotation_angle)?;

    if let Some((width, height)) = state.size {
        if width == 0 || height == 0 {
            return Err(TransformError::InvalidDimensions { width, height }.into());
        }
    }

    for channel in Channel::ALL {
        let (ratio, prev_ratio) = state.channel_ratio(channel);
        if !is_valid_ratio(ratio) || !is_valid_ratio(prev_ratio) {
            return Err(ScaleError::InvalidRatio { ratio, prev_ratio }.into());
        }
    }

    Ok(())
}

//! Model acquisition: load a glTF asset or fall back to the procedural bee.

use std::cell::RefCell;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use log::{error, info};

use crate::config::ViewerConfig;
use crate::loaders::decode_gltf;
use crate::model::fallback::build_fallback;
use crate::model::{Model, ModelHandle};

const PROGRESS_CHUNK_SIZE: usize = 64 * 1024;

/// Outcome of a resolution. Both variants carry the same payload; the
/// distinction exists so the caller can log which path was taken.
#[derive(Debug, Clone)]
pub enum ModelResolution {
    Loaded { model: ModelHandle, base_scale: f32 },
    FellBack { model: ModelHandle, base_scale: f32 },
}

impl ModelResolution {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::FellBack { .. })
    }

    pub fn base_scale(&self) -> f32 {
        match self {
            Self::Loaded { base_scale, .. } | Self::FellBack { base_scale, .. } => *base_scale,
        }
    }

    pub fn into_parts(self) -> (ModelHandle, f32) {
        match self {
            Self::Loaded { model, base_scale } | Self::FellBack { model, base_scale } => {
                (model, base_scale)
            }
        }
    }
}

/// Observational progress callback, percentage in [0, 100]
pub type ProgressSink = Box<dyn Fn(f32)>;

/// Resolves a model from an asset locator, substituting the deterministic
/// fallback on any failure. `resolve` never returns an error: the
/// presentation must never be empty.
pub struct ModelProvider {
    config: ViewerConfig,
    progress: Option<ProgressSink>,
}

impl ModelProvider {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            progress: None,
        }
    }

    /// Attach a progress observer. Reported percentages are advisory and
    /// have no effect on completion.
    pub fn with_progress(mut self, sink: ProgressSink) -> Self {
        self.progress = Some(sink);
        self
    }

    /// Resolve `source` into a normalized model and its base scale.
    ///
    /// The only suspending operation in the core; all internal steps run to
    /// completion without interleaving.
    pub async fn resolve(&self, source: impl AsRef<Path>) -> ModelResolution {
        let source = source.as_ref();
        match self.try_load(source) {
            Ok((model, base_scale)) => {
                info!(
                    "Model loaded from {:?}: {} nodes, base scale {:.4}",
                    source,
                    model.node_count(),
                    base_scale
                );
                ModelResolution::Loaded {
                    model: Rc::new(RefCell::new(model)),
                    base_scale,
                }
            }
            Err(e) => {
                error!("Failed to load model from {:?}: {:#}", source, e);
                let model = build_fallback(&self.config.fallback);
                ModelResolution::FellBack {
                    model: Rc::new(RefCell::new(model)),
                    base_scale: 1.0,
                }
            }
        }
    }

    fn try_load(&self, source: &Path) -> Result<(Model, f32)> {
        let bytes = self.read_with_progress(source)?;
        let mut model = decode_gltf(&bytes)?;
        let base_scale = self.normalize(&mut model)?;
        Ok((model, base_scale))
    }

    /// Reads the asset in chunks, reporting loaded/total percentages
    fn read_with_progress(&self, source: &Path) -> Result<Vec<u8>> {
        let mut file =
            File::open(source).with_context(|| format!("Failed to open asset: {:?}", source))?;
        let total = file
            .metadata()
            .with_context(|| format!("Failed to stat asset: {:?}", source))?
            .len() as usize;

        let mut bytes = Vec::with_capacity(total);
        let mut chunk = vec![0u8; PROGRESS_CHUNK_SIZE];
        loop {
            let read = file
                .read(&mut chunk)
                .with_context(|| format!("Failed to read asset: {:?}", source))?;
            if read == 0 {
                break;
            }
            bytes.extend_from_slice(&chunk[..read]);
            if let Some(sink) = &self.progress {
                let percent = if total > 0 {
                    (bytes.len() as f32 / total as f32) * 100.0
                } else {
                    100.0
                };
                sink(percent.min(100.0));
            }
        }

        if let Some(sink) = &self.progress {
            sink(100.0);
        }

        Ok(bytes)
    }

    /// Centers the model at the origin and scales its largest bounding-box
    /// axis to the configured target size. Returns the base scale.
    fn normalize(&self, model: &mut Model) -> Result<f32> {
        let bounds = model.local_bounds();
        let max_dim = bounds.max_dimension();
        if max_dim <= 0.0 {
            anyhow::bail!("Model has a degenerate bounding box");
        }

        let base_scale = self.config.target_size / max_dim;
        model.transform.scale = base_scale;
        // Translation composes after scale, so the offset is scaled too
        model.transform.translation = -bounds.center() * base_scale;

        Ok(base_scale)
    }
}

pub mod animation;
pub mod app;
pub mod cli;
pub mod config;
pub mod loaders;
pub mod math;
pub mod model;
pub mod provider;
pub mod render;
pub mod scene;

pub use animation::AnimationController;
pub use config::ViewerConfig;
pub use model::{Model, ModelHandle};
pub use provider::{ModelProvider, ModelResolution};
pub use scene::host::SceneHost;

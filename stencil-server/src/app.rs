use std::{ops::Deref, sync::Arc};

use anyhow::Result;
use tracing::info;

use stencil::{renderer::TeraRenderer, Renderer, TemplatedResponseFactory};

use crate::AppConfig;

pub type SharedRenderer = Arc<dyn Renderer + Send + Sync>;

#[derive(Debug)]
pub struct App {
    pub config: AppConfig,
    pub factory: TemplatedResponseFactory<SharedRenderer>,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        info!("loading templates from {}...", config.templates);
        let renderer = TeraRenderer::new(&config.templates)?;
        Self::with_renderer(config, Arc::new(renderer))
    }

    pub fn with_renderer(
        config: AppConfig,
        renderer: SharedRenderer,
    ) -> Result<Self> {
        let factory =
            TemplatedResponseFactory::with_options(renderer, config.options())?;
        info!("response factory initialized with {:?}", factory.options());
        Ok(Self { config, factory })
    }
}

#[derive(Debug, Clone)]
pub struct AppState(pub Arc<App>);

impl Deref for AppState {
    type Target = App;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

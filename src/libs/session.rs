use std::path::{Path, PathBuf};

/// Per-run interaction state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub show_enhancers: bool,
    pub show_loops: bool,
    last_render: Option<LastRender>,
}

/// What the previous successful render was made from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastRender {
    pub region: String,
    pub config_text: String,
    pub image: PathBuf,
}

impl Session {
    pub fn new(show_enhancers: bool, show_loops: bool) -> Self {
        Self {
            show_enhancers,
            show_loops,
            last_render: None,
        }
    }

    pub fn toggle_enhancers(&mut self) -> bool {
        self.show_enhancers = !self.show_enhancers;
        self.show_enhancers
    }

    pub fn toggle_loops(&mut self) -> bool {
        self.show_loops = !self.show_loops;
        self.show_loops
    }

    pub fn last_render(&self) -> Option<&LastRender> {
        self.last_render.as_ref()
    }

    /// The previous image, if it was drawn from the same region and
    /// track text and is still on disk.
    pub fn cached_image(&self, region: &str, config_text: &str) -> Option<&Path> {
        self.last_render
            .as_ref()
            .filter(|last| last.region == region && last.config_text == config_text)
            .map(|last| last.image.as_path())
            .filter(|image| image.is_file())
    }

    pub fn remember(&mut self, region: &str, config_text: &str, image: &Path) {
        self.last_render = Some(LastRender {
            region: region.to_string(),
            config_text: config_text.to_string(),
            image: image.to_path_buf(),
        });
    }
}

use waveoff_com::LinkConfig;

/// Configuration for the gesture pipeline.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    target_width: u32,
    target_height: u32,
    trigger_labels: Vec<String>,
    link: LinkConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            target_width: 256,
            target_height: 144,
            trigger_labels: vec!["Index".to_string(), "Open".to_string()],
            link: LinkConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Set the packed frame resolution sent to the service.
    pub fn with_target_size(mut self, width: u32, height: u32) -> Self {
        self.target_width = width;
        self.target_height = height;
        self
    }

    /// Set the hand signs that end the call.
    pub fn with_trigger_labels(mut self, labels: Vec<String>) -> Self {
        self.trigger_labels = labels;
        self
    }

    /// Set the transport configuration.
    pub fn with_link(mut self, link: LinkConfig) -> Self {
        self.link = link;
        self
    }

    // Getters
    pub fn target_width(&self) -> u32 {
        self.target_width
    }

    pub fn target_height(&self) -> u32 {
        self.target_height
    }

    pub fn trigger_labels(&self) -> &[String] {
        &self.trigger_labels
    }

    pub fn link(&self) -> &LinkConfig {
        &self.link
    }
}

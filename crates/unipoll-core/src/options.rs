use unipoll_api::ControllerConfig;

/// What to collect from one controller.
#[derive(Debug, Clone)]
pub struct PollOptions {
    /// Site short names to poll; empty or `"all"` means every site.
    pub sites: Vec<String>,
    pub save_sites: bool,
    pub save_dpi: bool,
    pub save_users: bool,
    pub save_networks: bool,
    pub save_rogue: bool,
    pub save_events: bool,
    pub save_alarms: bool,
    pub save_anomalies: bool,
    pub save_ids: bool,
    /// Accepted for config compatibility; records are never hashed.
    pub hash_pii: bool,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            sites: vec!["all".into()],
            save_sites: true,
            save_dpi: false,
            save_users: false,
            save_networks: false,
            save_rogue: false,
            save_events: false,
            save_alarms: false,
            save_anomalies: false,
            save_ids: false,
            hash_pii: false,
        }
    }
}

impl PollOptions {
    /// Whether any events-side fetch is enabled.
    pub fn wants_events(&self) -> bool {
        self.save_events || self.save_alarms || self.save_anomalies || self.save_ids
    }
}

/// One controller to poll: how to reach it and what to collect.
#[derive(Debug, Clone)]
pub struct Target {
    pub controller: ControllerConfig,
    pub options: PollOptions,
}

impl Target {
    pub fn new(controller: ControllerConfig, options: PollOptions) -> Self {
        Self { controller, options }
    }

    /// The URL used as `source_name`, without a trailing slash.
    pub fn url(&self) -> &str {
        self.controller.url.trim_end_matches('/')
    }
}

use remdkit::core::coordinates::IncrementMode;

/// Values used when neither the run file nor the command line sets them.
pub struct DefaultsConfig {
    pub increment_mode: IncrementMode,
    pub max_replicas: usize,
    pub constant_ph: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            increment_mode: IncrementMode::Normal,
            max_replicas: 10_000,
            constant_ph: false,
        }
    }
}

use stickman_engine::{
    Checkpoint, EntityId, FixedTimestep, GameConfig, InstanceBuffer, LevelCatalog,
    LoadError, ProtocolLayout, Session, SessionConfig, StatusBlock,
};

/// Wires a session to the host frame loop.
///
/// The browser build keeps one `GameRunner` in a `thread_local!` and exports
/// free functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// the session directly.
pub struct GameRunner {
    session: Session,
    timestep: FixedTimestep,
    instances: InstanceBuffer,
    status: StatusBlock,
    layout: ProtocolLayout,
    frame: u32,
}

impl GameRunner {
    pub fn new(session: Session, config: GameConfig) -> Self {
        let mut runner = Self {
            session,
            timestep: FixedTimestep::new(config.fixed_dt),
            instances: InstanceBuffer::new(config.max_instances),
            status: StatusBlock::default(),
            layout: ProtocolLayout::from_config(&config),
            frame: 0,
        };
        runner.refresh();
        runner
    }

    /// Build a runner from the session config JSON and a JSON object mapping
    /// level sources (`levels/<name>`) to level definitions.
    pub fn from_json(config_json: &str, levels_json: &str) -> Result<Self, LoadError> {
        let config = SessionConfig::from_json(config_json).map_err(|error| LoadError::Parse {
            source_id: "session config".to_string(),
            error,
        })?;
        let catalog = LevelCatalog::from_json(levels_json)?;
        let session = Session::start(config, Box::new(catalog))?;
        Ok(Self::new(session, GameConfig::default()))
    }

    /// Run one host frame: as many level ticks as the elapsed time allows,
    /// then rebuild the readout buffers.
    pub fn tick(&mut self, dt: f32) -> u32 {
        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.session.tick();
        }
        self.frame = self.frame.wrapping_add(1);
        self.refresh();
        steps
    }

    fn refresh(&mut self) {
        self.instances.rebuild(self.session.level());
        self.status = StatusBlock::from_session(
            &self.session,
            self.frame,
            self.instances.instance_count(),
            self.layout.max_instances,
        );
    }

    // ---- Commands ----

    pub fn jump(&mut self) -> bool {
        self.session.jump()
    }

    pub fn move_left(&mut self) -> bool {
        self.session.move_left()
    }

    pub fn move_right(&mut self) -> bool {
        self.session.move_right()
    }

    pub fn stop_moving(&mut self) -> bool {
        self.session.stop_moving()
    }

    pub fn shoot(&mut self) -> Option<EntityId> {
        self.session.shoot()
    }

    pub fn quick_save(&mut self) {
        self.session.quick_save();
    }

    /// Returns false if nothing was saved yet.
    pub fn quick_load(&mut self) -> bool {
        let restored = self.session.quick_load();
        if restored {
            self.timestep.reset();
            self.refresh();
        }
        restored
    }

    pub fn save(&self) -> Checkpoint {
        self.session.save()
    }

    pub fn restore(&mut self, checkpoint: &Checkpoint) {
        self.session.restore(checkpoint);
        self.timestep.reset();
        self.refresh();
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.instance_count()
    }

    pub fn entity_tag(&self, index: usize) -> Option<&str> {
        self.instances.tag(index)
    }

    pub fn status_ptr(&self) -> *const f32 {
        self.status.as_ptr()
    }

    pub fn status(&self) -> &StatusBlock {
        &self.status
    }

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}

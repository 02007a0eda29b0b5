pub mod runner;

pub use runner::GameRunner;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<GameRunner>> = RefCell::new(None);
}

/// Run `f` against the live runner. Returns None before `game_init` succeeded.
fn with_runner<R>(f: impl FnOnce(&mut GameRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                web_sys::console::warn_1(&"stickman: call game_init() first".into());
                None
            }
        }
    })
}

/// Start a session. `config_json` is the session config, `levels_json` maps
/// level sources (`levels/<name>`) to level definitions.
///
/// Returns 0 on success, otherwise the startup exit status
/// (10 missing level, 11 malformed config or level).
#[wasm_bindgen]
pub fn game_init(config_json: &str, levels_json: &str) -> i32 {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    match GameRunner::from_json(config_json, levels_json) {
        Ok(runner) => {
            log::info!(
                "stickman: initialized with {} levels",
                runner.session().level_count()
            );
            RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));
            0
        }
        Err(err) => {
            log::error!("stickman: {err}");
            err.exit_code()
        }
    }
}

/// Advance by `dt` seconds of host time. Returns the number of level ticks run.
#[wasm_bindgen]
pub fn game_tick(dt: f32) -> u32 {
    with_runner(|r| r.tick(dt)).unwrap_or(0)
}

// ---- Commands ----

#[wasm_bindgen]
pub fn game_jump() -> bool {
    with_runner(|r| r.jump()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn game_move_left() -> bool {
    with_runner(|r| r.move_left()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn game_move_right() -> bool {
    with_runner(|r| r.move_right()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn game_stop() -> bool {
    with_runner(|r| r.stop_moving()).unwrap_or(false)
}

/// Returns the new bullet's id, or -1 if the hero cannot shoot.
#[wasm_bindgen]
pub fn game_shoot() -> i32 {
    with_runner(|r| r.shoot())
        .flatten()
        .map_or(-1, |id| id.0 as i32)
}

#[wasm_bindgen]
pub fn game_save() {
    with_runner(|r| r.quick_save());
}

#[wasm_bindgen]
pub fn game_load() -> bool {
    with_runner(|r| r.quick_load()).unwrap_or(false)
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(|r| r.instance_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_status_ptr() -> *const f32 {
    with_runner(|r| r.status_ptr()).unwrap_or(std::ptr::null())
}

/// Visual tag of the instance at `index`, empty when out of range.
#[wasm_bindgen]
pub fn get_entity_tag(index: u32) -> String {
    with_runner(|r| r.entity_tag(index as usize).unwrap_or_default().to_string())
        .unwrap_or_default()
}

// ---- Capacity accessors ----

#[wasm_bindgen]
pub fn get_max_instances() -> u32 {
    with_runner(|r| r.max_instances()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
}

//! Browser binding
//!
//! JSON in, JSON out, so the JS client can hand over its physics state
//! without mirroring every type.

use wasm_bindgen::prelude::*;

use crate::ai::{AiPlayer, Difficulty, ShotRequest};
use crate::settings::Settings;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by the host page
        return;
    }
    log::info!("eightball-ai loaded");
}

#[wasm_bindgen]
pub struct WasmAiPlayer {
    inner: AiPlayer,
}

#[wasm_bindgen]
impl WasmAiPlayer {
    /// `seed` is optional; pass it for reproducible play
    #[wasm_bindgen(constructor)]
    pub fn new(difficulty: &str, seed: Option<f64>) -> Result<WasmAiPlayer, JsError> {
        let mut settings = Settings::with_difficulty(difficulty.parse::<Difficulty>()?);
        settings.seed = seed.map(|s| s as u64);
        Ok(Self {
            inner: AiPlayer::from_settings(&settings),
        })
    }

    /// Build from a settings JSON document
    #[wasm_bindgen(js_name = fromSettings)]
    pub fn from_settings(json: &str) -> Result<WasmAiPlayer, JsError> {
        let settings = Settings::from_json(json)?;
        Ok(Self {
            inner: AiPlayer::from_settings(&settings),
        })
    }

    #[wasm_bindgen(getter)]
    pub fn difficulty(&self) -> String {
        self.inner.difficulty().as_str().to_string()
    }

    #[wasm_bindgen(js_name = setDifficulty)]
    pub fn set_difficulty(&mut self, difficulty: &str) -> Result<(), JsError> {
        self.inner.set_difficulty(difficulty.parse()?);
        Ok(())
    }

    /// Takes a shot request JSON and returns the shot JSON
    #[wasm_bindgen(js_name = calculateShot)]
    pub fn calculate_shot(&mut self, request_json: &str) -> Result<String, JsError> {
        let request: ShotRequest = serde_json::from_str(request_json)?;
        let shot = self.inner.calculate_request(&request)?;
        Ok(serde_json::to_string(&shot)?)
    }

    /// Cue ball placement `[x, y]` for ball in hand
    #[wasm_bindgen(js_name = ballInHandPosition)]
    pub fn ball_in_hand_position(&self, request_json: &str) -> Result<Vec<f32>, JsError> {
        let request: ShotRequest = serde_json::from_str(request_json)?;
        let pockets = request
            .pockets
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| self.inner.table().default_pockets());
        let spot = self.inner.ball_in_hand_position(&request.balls, &pockets, request.target);
        Ok(vec![spot.x, spot.y])
    }

    /// Milliseconds to wait before playing the shot
    #[wasm_bindgen(js_name = thinkingTimeMs)]
    pub fn thinking_time_ms(&mut self) -> f64 {
        self.inner.thinking_time().as_millis() as f64
    }
}

use crate::renderer::CameraMode;
use crate::ui::presets::FIRE_PRESETS;

pub struct UiState {
    pub tessellation: u32,
    pub fbm_octaves: i32,
    pub fbm_freq: f32,
    pub fbm_amp: f32,
    pub fire_color: [f32; 4],
    pub background_color: [f32; 4],

    pub selected_preset: usize,

    pub camera_mode: CameraMode,
    pub vsync_enabled: bool,
    pub show_stats: bool,

    pub fps_cap_enabled: bool,
    pub fps_cap: u32,
}

impl Default for UiState {
    fn default() -> Self {
        let p = &FIRE_PRESETS[0];
        Self {
            tessellation: p.tessellation,
            fbm_octaves: p.fbm_octaves,
            fbm_freq: p.fbm_freq,
            fbm_amp: p.fbm_amp,
            fire_color: p.fire_color,
            background_color: p.background_color,

            selected_preset: 0,

            camera_mode: CameraMode::Orbital,
            vsync_enabled: true,
            show_stats: true,

            fps_cap_enabled: false,
            fps_cap: 144,
        }
    }
}

impl UiState {
    pub fn apply_preset(&mut self, index: usize) {
        let Some(p) = FIRE_PRESETS.get(index) else {
            return;
        };
        self.selected_preset = index;
        self.tessellation = p.tessellation;
        self.fbm_octaves = p.fbm_octaves;
        self.fbm_freq = p.fbm_freq;
        self.fbm_amp = p.fbm_amp;
        self.fire_color = p.fire_color;
        self.background_color = p.background_color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_first_preset() {
        let state = UiState::default();
        assert_eq!(state.tessellation, FIRE_PRESETS[0].tessellation);
        assert_eq!(state.fire_color, FIRE_PRESETS[0].fire_color);
    }

    #[test]
    fn apply_preset_ignores_out_of_range() {
        let mut state = UiState::default();
        state.apply_preset(2);
        assert_eq!(state.selected_preset, 2);
        assert_eq!(state.fire_color, FIRE_PRESETS[2].fire_color);

        state.apply_preset(FIRE_PRESETS.len());
        assert_eq!(state.selected_preset, 2);
    }
}

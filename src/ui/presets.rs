pub struct FirePreset {
    pub name: &'static str,
    pub description: &'static str,
    pub tessellation: u32,
    pub fbm_octaves: i32,
    pub fbm_freq: f32,
    pub fbm_amp: f32,
    pub fire_color: [f32; 4],
    pub background_color: [f32; 4],
}

pub const FIRE_PRESETS: &[FirePreset] = &[
    FirePreset {
        name: "Campfire",
        description: "The classic look: mid-frequency turbulence, deep orange.",
        tessellation: 5,
        fbm_octaves: 8,
        fbm_freq: 16.0,
        fbm_amp: 1.0,
        fire_color: [0.749, 0.275, 0.02, 1.0],
        background_color: [0.016, 0.016, 0.149, 1.0],
    },
    FirePreset {
        name: "Inferno",
        description: "Dense octaves and heavy displacement, close to boiling over.",
        tessellation: 6,
        fbm_octaves: 12,
        fbm_freq: 22.0,
        fbm_amp: 1.7,
        fire_color: [0.86, 0.18, 0.04, 1.0],
        background_color: [0.05, 0.01, 0.01, 1.0],
    },
    FirePreset {
        name: "Ghost Flame",
        description: "Cold blue chemistry, slow and sparse.",
        tessellation: 5,
        fbm_octaves: 6,
        fbm_freq: 10.0,
        fbm_amp: 0.8,
        fire_color: [0.16, 0.45, 0.85, 0.9],
        background_color: [0.0, 0.02, 0.04, 1.0],
    },
    FirePreset {
        name: "Ember Glow",
        description: "Barely burning. Low amplitude, almost a pulse.",
        tessellation: 4,
        fbm_octaves: 4,
        fbm_freq: 7.0,
        fbm_amp: 0.45,
        fire_color: [0.63, 0.17, 0.02, 1.0],
        background_color: [0.03, 0.02, 0.02, 1.0],
    },
    FirePreset {
        name: "Solar Flare",
        description: "White-hot, high frequency crackle on a black sky.",
        tessellation: 6,
        fbm_octaves: 10,
        fbm_freq: 28.0,
        fbm_amp: 2.2,
        fire_color: [0.98, 0.84, 0.35, 1.0],
        background_color: [0.0, 0.0, 0.0, 1.0],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::icosphere::MAX_SUBDIVISIONS;

    #[test]
    fn first_preset_is_the_demo_default() {
        let p = &FIRE_PRESETS[0];
        assert_eq!(p.tessellation, 5);
        assert_eq!(p.fbm_octaves, 8);
        assert_eq!(p.fbm_freq, 16.0);
        assert_eq!(p.fbm_amp, 1.0);
    }

    #[test]
    fn presets_stay_inside_gui_ranges() {
        for p in FIRE_PRESETS {
            assert!(p.tessellation <= MAX_SUBDIVISIONS, "{}", p.name);
            assert!((0..=16).contains(&p.fbm_octaves), "{}", p.name);
            assert!((0.0..=32.0).contains(&p.fbm_freq), "{}", p.name);
            assert!((0.0..=5.0).contains(&p.fbm_amp), "{}", p.name);
            for c in p.fire_color.iter().chain(p.background_color.iter()) {
                assert!((0.0..=1.0).contains(c), "{}", p.name);
            }
        }
    }
}

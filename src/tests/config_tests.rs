#[cfg(test)]
mod config_defaults_tests {
    use crate::config::Config;

    #[test]
    fn test_default_audio_settings() {
        let config = Config::default();
        assert!(config.audio.music_enabled);
        assert!(config.audio.sound_enabled);
        assert!((config.audio.volume - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_default_menu_settings() {
        let config = Config::default();
        assert!(!config.menu.renderer.title_colors.is_empty());
        assert!(
            config.menu.renderer.glyph_min_fall_speed < config.menu.renderer.glyph_max_fall_speed
        );
        assert!(config.menu.renderer.glyph_max_count >= config.menu.renderer.initial_glyph_count);
        assert!(config.menu.title.title_height > 0);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(parsed.audio.music_enabled, config.audio.music_enabled);
        assert_eq!(parsed.audio.sound_enabled, config.audio.sound_enabled);
        assert!((parsed.audio.volume - config.audio.volume).abs() < f32::EPSILON);
        assert_eq!(
            parsed.menu.renderer.title_colors,
            config.menu.renderer.title_colors
        );
    }

    #[test]
    fn test_empty_file_falls_back_to_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert!(parsed.audio.music_enabled);
        assert!(!parsed.menu.renderer.title_colors.is_empty());
    }

    #[test]
    fn test_partial_sections_parse() {
        let parsed: Config = toml::from_str(
            "[audio]\nmusic_enabled = false\nsound_enabled = true\nvolume = 0.25\n",
        )
        .unwrap();
        assert!(!parsed.audio.music_enabled);
        assert!((parsed.audio.volume - 0.25).abs() < f32::EPSILON);
        // The untouched menu section keeps its defaults
        assert!(parsed.menu.title.title_height > 0);
    }
}

#[cfg(test)]
mod loader_tests {
    use crate::config::Config;
    use crate::config::loader::{ConfigError, load_config_from_path, save_config_to_path};

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.audio.volume = 0.8;
        config.audio.music_enabled = false;

        save_config_to_path(&config, &path).unwrap();
        let loaded = load_config_from_path(&path).unwrap();

        assert!(!loaded.audio.music_enabled);
        assert!((loaded.audio.volume - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("config.toml");

        save_config_to_path(&Config::default(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does_not_exist.toml");

        match load_config_from_path(&path) {
            Err(ConfigError::Io(_)) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is { not valid toml").unwrap();

        match load_config_from_path(&path) {
            Err(ConfigError::Parse(_)) => {}
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_config_error_display() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "???").unwrap();

        let err = load_config_from_path(&path).unwrap_err();
        assert!(format!("{err}").contains("parse"));
    }
}

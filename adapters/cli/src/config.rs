//! Queue tuning loaded from an optional TOML file.

use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use combat_queue_core::{Color, PanelId, QueueConfig};
use serde::Deserialize;

/// Overrides accepted by the tuning file; omitted keys keep their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct QueueFile {
    min_stage_size: Option<usize>,
    moving_time_secs: Option<f32>,
    panel: Option<u32>,
    layout: Option<LayoutFile>,
    enemy_count: Option<EnemyCountFile>,
    visibility_masks: Option<Vec<Color>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LayoutFile {
    front_y: Option<f32>,
    start_y: Option<f32>,
    spacing: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct EnemyCountFile {
    min: Option<u32>,
    max: Option<u32>,
}

/// Reads the tuning file at `path`.
pub(crate) fn load(path: &Path) -> Result<QueueConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read queue config at {}", path.display()))?;
    parse(&contents).with_context(|| format!("invalid queue config at {}", path.display()))
}

/// Applies the overrides in `contents` on top of [`QueueConfig::default`].
pub(crate) fn parse(contents: &str) -> Result<QueueConfig> {
    let file: QueueFile =
        toml::from_str(contents).context("failed to parse queue config toml contents")?;
    let mut config = QueueConfig::default();

    if let Some(min_stage_size) = file.min_stage_size {
        config.min_stage_size = min_stage_size;
    }
    if let Some(secs) = file.moving_time_secs {
        config.moving_time = Duration::try_from_secs_f32(secs)
            .with_context(|| format!("moving_time_secs {secs} is not a valid duration"))?;
    }
    if let Some(panel) = file.panel {
        config.panel = PanelId::new(panel);
    }
    if let Some(layout) = file.layout {
        config.layout.front_y = layout.front_y.unwrap_or(config.layout.front_y);
        config.layout.start_y = layout.start_y.unwrap_or(config.layout.start_y);
        config.layout.spacing = layout.spacing.unwrap_or(config.layout.spacing);
    }
    if let Some(enemy_count) = file.enemy_count {
        config.enemy_count.min = enemy_count.min.unwrap_or(config.enemy_count.min);
        config.enemy_count.max = enemy_count.max.unwrap_or(config.enemy_count.max);
    }
    if let Some(masks) = file.visibility_masks {
        config.visibility_masks = masks;
    }

    config.validate().context("queue config rejected")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_keeps_defaults() {
        let config = parse("").expect("empty file is valid");
        assert_eq!(config, QueueConfig::default());
    }

    #[test]
    fn overrides_selected_fields() {
        let config = parse(
            r#"
                min_stage_size = 1
                moving_time_secs = 0.5

                [layout]
                spacing = 150.0

                [enemy_count]
                max = 2

                [[visibility_masks]]
                red = 1.0
                green = 1.0
                blue = 1.0
                alpha = 1.0
            "#,
        )
        .expect("valid overrides");

        assert_eq!(config.min_stage_size, 1);
        assert_eq!(config.moving_time, Duration::from_millis(500));
        assert_eq!(config.layout.spacing, 150.0);
        assert_eq!(config.layout.front_y, -100.0);
        assert_eq!(config.enemy_count.min, 1);
        assert_eq!(config.enemy_count.max, 2);
        assert_eq!(config.visibility_masks, vec![Color::white(1.0)]);
    }

    #[test]
    fn rejects_out_of_range_moving_time() {
        let error = parse("moving_time_secs = 2.5").expect_err("too slow");
        assert!(format!("{error:#}").contains("moving time"));
    }

    #[test]
    fn bundled_config_matches_defaults() {
        let config = parse(include_str!("../../../assets/queue.toml")).expect("bundled config");
        assert_eq!(config, QueueConfig::default());
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(parse("stage_count = 3").is_err());
    }
}

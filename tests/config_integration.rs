//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use hyperdrift::config::AppConfig;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("HD_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    println!("Window title: {}", config.window.title);
    assert_eq!(config.window.title, "Test From Env");
    std::env::remove_var("HD_WINDOW__TITLE");
}

#[test]
#[serial]
fn test_env_override_nested_numeric() {
    std::env::set_var("HD_PHYSICS__W_COLLISION_RADIUS", "5.0");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.physics.w_collision_radius, 5.0);
    std::env::remove_var("HD_PHYSICS__W_COLLISION_RADIUS");
}

#[test]
#[serial]
fn test_default_file_loading() {
    // Remove env var to test file-based config
    std::env::remove_var("HD_WINDOW__TITLE");

    let cwd = std::env::current_dir().unwrap();
    println!(
        "config/default.toml exists: {}",
        cwd.join("config/default.toml").exists()
    );

    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.title, "Hyperdrift");
    assert_eq!(config.world.path, "worlds/playground.ron");
}

#[test]
#[serial]
fn test_degenerate_env_value_is_clamped() {
    std::env::set_var("HD_VIEW__PROJECTION_DISTANCE", "0.0");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.view.projection_distance, 12.0);
    std::env::remove_var("HD_VIEW__PROJECTION_DISTANCE");
}

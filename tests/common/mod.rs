pub mod mock_oracle;
pub mod mock_sink;
pub mod mock_source;

use vivavoce::config::Config;

/// Config with millisecond-scale timers so state-machine tests run fast
pub fn fast_config() -> Config {
    Config {
        completion_definite_delay_ms: 20,
        completion_probable_delay_ms: 40,
        completion_tentative_delay_ms: 60,
        mute_cooldown_ms: 30,
        ..Config::default()
    }
}

// tests/logging_filter.rs

use tracing::level_filters::LevelFilter;

use ganttdag::cli::LogLevel;
use ganttdag::logging::resolve_filter;

#[test]
fn cli_flag_wins_over_env() {
    let (filter, rejected) = resolve_filter(Some(LogLevel::Trace), Some("error"));
    assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    assert!(rejected.is_none());
}

#[test]
fn env_directives_pass_through() {
    let (filter, rejected) = resolve_filter(None, Some(" ganttdag::dag=debug "));
    assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    assert!(rejected.is_none());
}

#[test]
fn unparsable_env_falls_back_to_info() {
    let (filter, rejected) = resolve_filter(None, Some("ganttdag=loud"));
    assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    assert_eq!(rejected.as_deref(), Some("ganttdag=loud"));
}

#[test]
fn missing_or_blank_env_defaults_to_info() {
    for env in [None, Some("   ")] {
        let (filter, rejected) = resolve_filter(None, env);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
        assert!(rejected.is_none());
    }
}

use pex_eval_tracing as collector;
use tracing::Level;

// The collector buffer is process-wide, so the scenarios run in one test.
#[test]
fn collector_filters_renders_and_drains() {
    collector::begin();
    collector::set_level(None);
    collector::with_collector(|| {
        tracing::error!("dropped while disabled");
    });
    assert!(collector::take().is_empty());

    collector::set_level(Some(Level::WARN));
    assert_eq!(collector::level(), Some(Level::WARN));
    collector::with_collector(|| {
        tracing::debug!("below threshold");
        tracing::warn!(credential_index = 3u64, "field missing");
        tracing::error!(valid = false, "filter rejected");
    });
    let lines = collector::take();
    assert_eq!(
        lines,
        vec![
            "WARN: field missing credential_index=3".to_string(),
            "ERROR: filter rejected valid=false".to_string(),
        ]
    );
    assert!(collector::take().is_empty());

    collector::with_collector(|| tracing::error!("stale"));
    collector::begin();
    assert!(collector::take().is_empty());
    collector::set_level(None);
}

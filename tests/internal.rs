//! Diagnostics threshold is process-wide, so these checks get their own test binary.

use rotalog::Level;
use rotalog::internal;

#[test]
fn explicit_init_sets_threshold_once() {
    internal::init(Some(Level::Warn));
    internal::init(Some(Level::Debug));

    assert!(internal::enabled(Level::Warn));
    assert!(internal::enabled(Level::Critical));
    assert!(!internal::enabled(Level::Info));

    // Must not panic with diagnostics enabled.
    internal::warn("TEST", "diagnostic output");
}

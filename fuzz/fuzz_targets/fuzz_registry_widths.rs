#![no_main]

use libfuzzer_sys::fuzz_target;
use pagertab_core::TabWidthRegistry;

fuzz_target!(|data: &[u8]| {
    // First byte is the item count (0..64), second the spacing.
    if data.len() < 2 {
        return;
    }
    let count = usize::from(data[0] % 64);
    let spacing = f64::from(data[1]);
    let mut registry = TabWidthRegistry::new(count, spacing);

    // Remaining bytes are (index, width) pairs; a zero width is rejected.
    for pair in data[2..].chunks_exact(2) {
        let index = usize::from(pair[0]);
        let width = f64::from(pair[1]);
        let was_measured = registry.width(index).is_some();
        let before = registry.measured_count();
        registry.set_width(index, width);
        assert!(registry.measured_count() >= before, "measured count shrank");
        if was_measured {
            assert_eq!(registry.measured_count(), before);
        }
    }

    assert!(registry.measured_count() <= registry.items_count());
    assert_eq!(
        registry.all_measured(),
        count > 0 && registry.measured_count() == count
    );
    let mut prev = 0.0;
    for i in 0..=count {
        let cumulative = registry.cumulative_width_before(i);
        assert!(cumulative >= prev, "cumulative width not monotone at {i}");
        prev = cumulative;
    }
});

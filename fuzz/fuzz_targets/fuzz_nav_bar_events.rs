#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pagertab_core::{PagerStyle, ScrollAnchor};
use pagertab_runtime::ScrollableNavBar;
use web_time::Instant;

#[derive(Debug, Arbitrary)]
enum Event {
    Measure { index: u8, width: u16 },
    Offset(i32),
    Viewport(u16),
    Tap(u8),
    Swipe(u8),
    Appear,
    Tick(u16),
}

#[derive(Debug, Arbitrary)]
struct Input {
    items: u8,
    spacing: u8,
    events: Vec<Event>,
}

fuzz_target!(|input: Input| {
    let items = usize::from(input.items % 32);
    let bar = ScrollableNavBar::new(
        items,
        PagerStyle::default().tab_item_spacing(f64::from(input.spacing)),
    );
    let start = Instant::now();

    for event in input.events.iter().take(256) {
        match *event {
            Event::Measure { index, width } => {
                bar.on_width_measured(usize::from(index), f64::from(width));
            }
            Event::Offset(offset) => bar.on_content_offset(f64::from(offset)),
            Event::Viewport(width) => bar.on_viewport_width(f64::from(width)),
            Event::Tap(index) => {
                bar.tap(usize::from(index));
            }
            Event::Swipe(index) => {
                bar.finish_swipe(usize::from(index));
            }
            Event::Appear => bar.appear(start),
            Event::Tick(ms) => {
                bar.tick(start + Duration::from_millis(u64::from(ms)));
            }
        }

        // Post-conditions that must always hold:
        let geometry = bar.indicator();
        assert!(geometry.is_finite(), "non-finite indicator {geometry:?}");
        assert!(items == 0 || bar.selected() < items, "selection OOB");
        for target in bar.take_scroll_requests() {
            assert!(target.index < items, "scroll target OOB");
            if target.index + 1 == items {
                assert_eq!(target.anchor, ScrollAnchor::End, "last tab must end");
            }
        }
    }
});

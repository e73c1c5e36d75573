#![cfg(feature = "tracing")]

//! Structured events emitted by the core components when the `tracing`
//! feature is on.

use std::sync::{Arc, Mutex};

use pagertab_core::{PagerStyle, ScrollSynchronizer, TabWidthRegistry};
use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

#[derive(Debug, Clone, PartialEq)]
struct Captured {
    level: tracing::Level,
    message: String,
    fields: Vec<(String, String)>,
}

struct Capture {
    events: Arc<Mutex<Vec<Captured>>>,
}

impl<S> Layer<S> for Capture
where
    S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        #[derive(Default)]
        struct Fields {
            message: Option<String>,
            rest: Vec<(String, String)>,
        }
        impl tracing::field::Visit for Fields {
            fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                if field.name() == "message" {
                    self.message = Some(value.to_string());
                } else {
                    self.rest.push((field.name().to_string(), value.to_string()));
                }
            }

            fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                let value = format!("{value:?}");
                if field.name() == "message" {
                    self.message = Some(value.trim_matches('"').to_string());
                } else {
                    self.rest.push((field.name().to_string(), value));
                }
            }
        }

        let mut fields = Fields::default();
        event.record(&mut fields);
        if let Some(message) = fields.message {
            self.events.lock().expect("capture lock").push(Captured {
                level: *event.metadata().level(),
                message,
                fields: fields.rest,
            });
        }
    }
}

fn capture<R>(f: impl FnOnce() -> R) -> (R, Vec<Captured>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(Capture {
        events: Arc::clone(&events),
    });
    let result = tracing::subscriber::with_default(subscriber, f);
    let events = events.lock().expect("capture lock").clone();
    (result, events)
}

fn named<'a>(events: &'a [Captured], message: &str) -> Vec<&'a Captured> {
    events.iter().filter(|e| e.message == message).collect()
}

fn field<'a>(event: &'a Captured, name: &str) -> Option<&'a str> {
    event
        .fields
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

#[test]
fn rejected_widths_are_traced() {
    let (_, events) = capture(|| {
        let mut registry = TabWidthRegistry::new(2, 8.0);
        registry.set_width(0, -4.0);
        registry.set_width(7, 40.0);
    });

    let ignored = named(&events, "pagertab.width.ignored");
    assert_eq!(ignored.len(), 1, "{events:?}");
    assert_eq!(ignored[0].level, tracing::Level::TRACE);
    assert_eq!(field(ignored[0], "index"), Some("0"));

    let out_of_range = named(&events, "pagertab.width.out_of_range");
    assert_eq!(out_of_range.len(), 1, "{events:?}");
    assert_eq!(field(out_of_range[0], "items_count"), Some("2"));
}

#[test]
fn all_measured_is_logged_once() {
    let (_, events) = capture(|| {
        let mut registry = TabWidthRegistry::new(3, 8.0);
        registry.set_width(2, 50.0);
        registry.set_width(0, 40.0);
        registry.set_width(1, 60.0);
        // Re-measuring after the layout is complete logs nothing new.
        registry.set_width(1, 61.0);
    });

    let settled = named(&events, "pagertab.registry.all_measured");
    assert_eq!(settled.len(), 1, "{events:?}");
    assert_eq!(settled[0].level, tracing::Level::DEBUG);
    assert_eq!(field(settled[0], "items_count"), Some("3"));
}

#[test]
fn scroll_decision_is_logged_with_anchor() {
    let (target, events) = capture(|| {
        let mut registry = TabWidthRegistry::new(3, 8.0);
        for (i, w) in [40.0, 60.0, 50.0].into_iter().enumerate() {
            registry.set_width(i, w);
        }
        let sync = ScrollSynchronizer::new(&PagerStyle::default().tab_item_spacing(8.0));
        sync.on_selection_changed(&registry, 1, 320.0)
    });

    let decisions = named(&events, "pagertab.scroll");
    assert_eq!(decisions.len(), 1, "{events:?}");
    assert_eq!(decisions[0].level, tracing::Level::DEBUG);
    assert_eq!(field(decisions[0], "anchor"), Some("end"));
    assert_eq!(field(decisions[0], "index"), Some("2"));
    assert_eq!(target.map(|t| t.index), Some(2));
}

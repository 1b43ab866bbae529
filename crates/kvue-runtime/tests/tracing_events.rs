//! Structured events emitted by the reactivity engine.

use std::sync::{Arc, Mutex};

use kvue_runtime::{NotifyPolicy, ReactiveConfig, ReactiveError};
use serde_json::json;
use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

#[derive(Clone, Debug)]
struct Captured {
    level: tracing::Level,
    message: String,
}

struct EventCapture {
    events: Arc<Mutex<Vec<Captured>>>,
}

impl<S> Layer<S> for EventCapture
where
    S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        struct Msg {
            message: Option<String>,
        }
        impl tracing::field::Visit for Msg {
            fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                if field.name() == "message" {
                    self.message = Some(value.to_string());
                }
            }

            fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                if field.name() == "message" {
                    self.message = Some(format!("{value:?}").trim_matches('"').to_string());
                }
            }
        }
        let mut msg = Msg { message: None };
        event.record(&mut msg);
        if let Some(message) = msg.message {
            self.events.lock().expect("capture lock").push(Captured {
                level: *event.metadata().level(),
                message,
            });
        }
    }
}

fn capture<R>(f: impl FnOnce() -> R) -> (R, Vec<Captured>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(EventCapture {
        events: Arc::clone(&events),
    });
    let result = tracing::subscriber::with_default(subscriber, f);
    let events = events.lock().expect("capture lock").clone();
    (result, events)
}

fn count(events: &[Captured], message: &str) -> usize {
    events.iter().filter(|e| e.message == message).count()
}

#[test]
fn get_and_set_are_traced() {
    let ((), events) = capture(|| {
        let data = kvue_runtime::observe(json!({"name": "Kai"}));
        let data = data.as_object().unwrap();
        let _ = data.get("name").unwrap();
        data.set("name", "Mo").unwrap();
    });
    assert_eq!(count(&events, "reactive.get"), 1);
    let set: Vec<_> = events.iter().filter(|e| e.message == "reactive.set").collect();
    assert_eq!(set.len(), 1);
    assert_eq!(set[0].level, tracing::Level::DEBUG);
}

#[test]
fn unchanged_write_logs_no_set_but_still_notifies() {
    let ((), events) = capture(|| {
        let data = kvue_runtime::observe(json!({"n": 1}));
        let data = data.as_object().unwrap();
        data.set("n", 1).unwrap();
    });
    assert_eq!(count(&events, "reactive.set"), 0);
    assert_eq!(count(&events, "reactive.notify"), 1);
}

#[test]
fn isolated_failures_warn_once_each() {
    let (result, events) = capture(|| {
        let config = ReactiveConfig::new().with_notify_policy(NotifyPolicy::Isolate);
        let data = config.observe(json!({"n": 0}));
        let data = data.as_object().unwrap();
        let _a = data
            .watch("n", |_, _| Err(ReactiveError::callback("a")))
            .unwrap();
        let _b = data
            .watch("n", |_, _| Err(ReactiveError::callback("b")))
            .unwrap();
        data.set("n", 1)
    });
    assert!(matches!(result, Err(ReactiveError::Cascade { .. })));
    let warnings: Vec<_> = events
        .iter()
        .filter(|e| e.message == "reactive.notify.failed")
        .collect();
    assert_eq!(warnings.len(), 2);
    assert!(warnings.iter().all(|e| e.level == tracing::Level::WARN));
}

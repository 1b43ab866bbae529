//! Structured events emitted while compiling.

use std::rc::Rc;
use std::sync::{Arc, Mutex};

use kvue_compiler::Compiler;
use kvue_dom::Node;
use kvue_runtime::{PropertySource, observe};
use serde_json::json;
use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

struct MessageCapture {
    messages: Arc<Mutex<Vec<(tracing::Level, String)>>>,
}

impl<S> Layer<S> for MessageCapture
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
            self.messages
                .lock()
                .expect("capture lock")
                .push((*event.metadata().level(), message));
        }
    }
}

#[test]
fn compile_emits_element_text_and_bind_events() {
    let messages = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(MessageCapture {
        messages: Arc::clone(&messages),
    });

    tracing::subscriber::with_default(subscriber, || {
        let data = observe(json!({"a": "x", "b": "y"})).as_object().cloned().unwrap();
        let source: Rc<dyn PropertySource> = Rc::new(data);
        let root = Node::element("div")
            .with_child(Node::element("p").with_attr("v-text", "a"))
            .with_child(Node::element("p").with_attr("v-nope", "a"))
            .with_child(Node::text("{{ b }}"));
        Compiler::new(source).compile(&root).unwrap();
    });

    let messages = messages.lock().expect("capture lock");
    let count = |name: &str| messages.iter().filter(|(_, m)| m == name).count();
    assert_eq!(count("compile.element"), 2);
    assert_eq!(count("compile.text"), 1);
    assert_eq!(count("compile.bind"), 2);
    assert_eq!(count("compile.directive.unknown"), 1);
    assert!(
        messages
            .iter()
            .filter(|(_, m)| m == "compile.element")
            .all(|(level, _)| *level == tracing::Level::DEBUG)
    );
}

use super::*;
use crate::errors::MessageError;
use crate::level::Priority;
use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// A payload with no textual representation, like a channel or a handle.
struct Handle;

impl Serialize for Handle {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(S::Error::custom("handle cannot be serialized"))
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
struct Event {
    name: String,
    attempts: u32,
    tags: Vec<String>,
}

/// Shared buffer the fmt subscriber writes formatted events into.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with a thread-local subscriber and return everything it logged.
fn capture_logs(f: impl FnOnce()) -> String {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .without_time()
        .finish();

    tracing::subscriber::with_default(subscriber, f);

    let bytes = logs.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

fn sample_event() -> Event {
    Event {
        name: "connect".to_string(),
        attempts: 3,
        tags: vec!["net".to_string(), "retry".to_string()],
    }
}

fn assert_raw_is_payload<T: Serialize + Clone + PartialEq + Debug>(payload: T) {
    let msg = JsonMessage::new(payload.clone());
    assert_eq!(msg.raw(), Some(&payload));
}

fn assert_pretty_is_newline_terminated<T: Serialize>(payload: T) {
    let msg = JsonMessage::new(payload);
    let out = msg.marshal_pretty().unwrap();
    assert!(out.ends_with(b"\n"));
    assert!(!out.ends_with(b"\n\n"));
}

#[test]
fn test_loggable_is_true_for_present_values() {
    assert!(JsonMessage::new(true).loggable());
    assert!(JsonMessage::new(false).loggable());
    assert!(JsonMessage::new(1).loggable());
    assert!(JsonMessage::new(0).loggable());
    assert!(JsonMessage::new(100).loggable());
    assert!(JsonMessage::new("the").loggable());
    assert!(JsonMessage::new("").loggable());
    assert!(JsonMessage::new(HashMap::from([("a", "one")])).loggable());
    assert!(JsonMessage::new(HashMap::<String, String>::new()).loggable());
    assert!(JsonMessage::new(Value::Null).loggable());
    assert!(JsonMessage::new(sample_event()).loggable());
}

#[test]
fn test_loggable_does_not_depend_on_serializability() {
    assert!(JsonMessage::new(Handle).loggable());
}

#[test]
fn test_loggable_is_false_for_absent_payload() {
    let msg = JsonMessage::<Value>::new(None);
    assert!(!msg.loggable());
    assert!(msg.raw().is_none());
    assert_eq!(msg.resolve(), "null");

    let msg = JsonMessage::<u8>::new(None);
    assert!(!msg.loggable());

    let msg = JsonMessage::<u8>::from_option(None);
    assert!(!msg.loggable());
}

#[test]
fn test_new_accepts_optional_payloads() {
    let maybe_port: Option<u16> = Some(8080);
    let msg = JsonMessage::<u16>::new(maybe_port);
    assert!(msg.loggable());
    assert_eq!(msg.raw(), Some(&8080));

    let missing: Option<u16> = None;
    let msg = JsonMessage::<u16>::new(missing);
    assert!(!msg.loggable());

    let msg = JsonMessage::<&str>::with_priority(None, Priority::INFO).unwrap();
    assert!(!msg.loggable());
    assert_eq!(msg.priority(), Priority::INFO);
}

#[test]
fn test_raw_gives_internal_data() {
    assert_raw_is_payload(true);
    assert_raw_is_payload(false);
    assert_raw_is_payload(1);
    assert_raw_is_payload(100);
    assert_raw_is_payload("the");
    assert_raw_is_payload(HashMap::from([("a", "one")]));
    assert_raw_is_payload(sample_event());
}

#[test]
fn test_marshal_pretty_always_newline_terminated() {
    assert_pretty_is_newline_terminated(true);
    assert_pretty_is_newline_terminated(false);
    assert_pretty_is_newline_terminated(1);
    assert_pretty_is_newline_terminated(100);
    assert_pretty_is_newline_terminated("the");
    assert_pretty_is_newline_terminated(HashMap::from([("a", "one")]));
    assert_pretty_is_newline_terminated(sample_event());
    assert_pretty_is_newline_terminated(json!({"nested": {"list": [1, 2, 3]}}));

    let absent = JsonMessage::<Value>::from_option(None);
    assert_eq!(absent.marshal_pretty().unwrap(), b"null\n");
}

#[test]
fn test_marshal_pretty_is_indented() {
    let msg = JsonMessage::new(BTreeMap::from([("a", 1)]));
    let out = String::from_utf8(msg.marshal_pretty().unwrap()).unwrap();
    assert_eq!(out, "{\n  \"a\": 1\n}\n");
}

#[test]
fn test_marshal_pretty_surfaces_errors() {
    let msg = JsonMessage::new(Handle);
    assert!(matches!(msg.marshal_pretty(), Err(MessageError::Marshal(_))));
}

#[test]
fn test_resolve_contains_failure_for_unserializable_data() {
    let msg = JsonMessage::new(Handle);
    let out = msg.to_string();
    assert!(out.starts_with("problem marshaling message."));
    assert!(out.contains("handle cannot be serialized"));
}

#[test]
fn test_resolve_contains_failure_for_non_string_map_keys() {
    let msg = JsonMessage::new(BTreeMap::from([((1, 2), "pair")]));
    assert!(msg.resolve().starts_with(MARSHAL_PROBLEM));
}

#[test]
fn test_resolve_returns_compact_json() {
    let msg = JsonMessage::new(HashMap::from([("a", 1)]));
    assert_eq!(msg.to_string(), "{\"a\":1}");
}

#[test]
fn test_resolve_keeps_payload_key_order() {
    let msg = JsonMessage::new(BTreeMap::from([("b", 2), ("a", 1), ("c", 3)]));
    assert_eq!(msg.resolve(), r#"{"a":1,"b":2,"c":3}"#);

    let msg = JsonMessage::new(sample_event());
    assert_eq!(
        msg.resolve(),
        r#"{"name":"connect","attempts":3,"tags":["net","retry"]}"#
    );
}

#[test]
fn test_resolve_scalars_and_absent() {
    assert_eq!(JsonMessage::new(false).resolve(), "false");
    assert_eq!(JsonMessage::new(0).resolve(), "0");
    assert_eq!(JsonMessage::new("the").resolve(), "\"the\"");
    assert_eq!(JsonMessage::<Value>::from_option(None).resolve(), "null");
}

#[test]
fn test_resolve_is_idempotent() {
    let msg = JsonMessage::new(sample_event());
    let first = msg.resolve().to_string();
    assert_eq!(msg.resolve(), first);
    assert_eq!(msg.to_string(), first);

    let broken = JsonMessage::new(Handle);
    assert_eq!(broken.resolve(), broken.resolve());
}

#[test]
fn test_priority_setters() {
    let levels = [
        Priority::DEBUG,
        Priority::TRACE,
        Priority::INFO,
        Priority::NOTICE,
        Priority::WARNING,
        Priority::ERROR,
        Priority::CRITICAL,
        Priority::ALERT,
        Priority::EMERGENCY,
    ];

    let mut msg = JsonMessage::new(());

    for priority in levels {
        assert_ne!(priority, msg.priority());
        msg.set_priority(priority).unwrap();
        assert_eq!(priority, msg.priority());
    }

    assert!(msg.set_priority(Priority::from(10_000)).is_err());
}

#[test]
fn test_unset_priority_differs_from_every_level() {
    let msg = JsonMessage::new(json!({}));
    assert_eq!(msg.priority(), Priority::INVALID);
    assert!(Priority::ALL.iter().all(|p| *p != msg.priority()));
}

#[test]
fn test_invalid_priority_keeps_previous_value() {
    let mut msg = JsonMessage::new("payload");
    msg.set_priority(Priority::ERROR).unwrap();

    for bad in [Priority::from(10_000), Priority::from(25), Priority::from(101), Priority::INVALID] {
        let err = msg.set_priority(bad).unwrap_err();
        assert!(matches!(err, MessageError::InvalidPriority(p) if p == bad));
        assert_eq!(msg.priority(), Priority::ERROR);
    }
}

#[test]
fn test_invalid_priority_on_unset_message_stays_unset() {
    let mut msg = JsonMessage::new(1);
    assert!(msg.set_priority(Priority::from(55)).is_err());
    assert_eq!(msg.priority(), Priority::INVALID);
}

#[test]
fn test_with_priority() {
    let msg = JsonMessage::with_priority("ready", Priority::NOTICE).unwrap();
    assert_eq!(msg.priority(), Priority::NOTICE);
    assert!(JsonMessage::with_priority("ready", Priority::from(7)).is_err());
}

#[test]
fn test_annotate_rejects_duplicate_keys() {
    let mut msg = JsonMessage::new(json!({"a": 1}));
    msg.annotate("request_id", "abc").unwrap();
    msg.annotate("attempt", 2).unwrap();

    let err = msg.annotate("request_id", "xyz").unwrap_err();
    assert!(matches!(err, MessageError::DuplicateAnnotation(key) if key == "request_id"));
    assert_eq!(msg.context()["request_id"], json!("abc"));
    assert_eq!(msg.context().len(), 2);
}

#[test]
fn test_annotate_does_not_touch_payload() {
    let mut msg = JsonMessage::new(json!({"a": 1}));
    msg.annotate("host", "db-1").unwrap();
    assert_eq!(msg.raw(), Some(&json!({"a": 1})));
    assert_eq!(msg.resolve(), r#"{"a":1}"#);
}

#[test]
fn test_composer_trait_object() {
    let mut messages: Vec<Box<dyn Composer>> = vec![
        Box::new(JsonMessage::new(sample_event())),
        Box::new(JsonMessage::new(Handle)),
        Box::new(JsonMessage::<u8>::from_option(None)),
    ];

    for msg in messages.iter_mut() {
        msg.set_priority(Priority::WARNING).unwrap();
        msg.annotate("source".to_string(), json!("test")).unwrap();
    }

    assert!(messages.iter().all(|m| m.priority() == Priority::WARNING));
    assert_eq!(
        messages[0].raw_json(),
        Some(json!({"name": "connect", "attempts": 3, "tags": ["net", "retry"]}))
    );
    assert!(messages[1].loggable());
    assert!(messages[1].raw_json().is_none());
    assert!(messages[1].resolve().starts_with(MARSHAL_PROBLEM));
    assert!(messages[1].marshal_pretty().is_err());
    assert!(!messages[2].loggable());
    assert_eq!(messages[2].resolve(), "null");
    assert_eq!(messages[2].context()["source"], json!("test"));
}

#[test]
fn test_message_is_send_and_sync() {
    fn assert_send_sync<M: Send + Sync>() {}
    assert_send_sync::<JsonMessage<Value>>();
    assert_send_sync::<JsonMessage<Event>>();
}

#[test]
fn test_rejected_priority_is_logged_at_warn() {
    let output = capture_logs(|| {
        let mut msg = JsonMessage::new("payload");
        assert!(msg.set_priority(Priority::from(25)).is_err());
    });

    let line = output
        .lines()
        .find(|line| line.contains("Rejected priority priority(25), keeping invalid"))
        .expect("rejection was not logged");
    assert!(line.contains("WARN"));
}

#[test]
fn test_valid_priority_logs_nothing() {
    let output = capture_logs(|| {
        let mut msg = JsonMessage::new("payload");
        msg.set_priority(Priority::ALERT).unwrap();
    });
    assert!(output.is_empty());
}

#[test]
fn test_contained_marshal_failure_is_logged_at_debug() {
    let output = capture_logs(|| {
        let mut msg = JsonMessage::new(Handle);
        msg.set_priority(Priority::ERROR).unwrap();
        assert!(msg.resolve().starts_with(MARSHAL_PROBLEM));
    });

    let line = output
        .lines()
        .find(|line| line.contains("Failed to marshal error message payload"))
        .expect("marshal failure was not logged");
    assert!(line.contains("DEBUG"));
    assert!(line.contains("handle cannot be serialized"));
}

#[test]
fn test_duplicate_annotation_is_logged_at_debug() {
    let output = capture_logs(|| {
        let mut msg = JsonMessage::new(1);
        msg.annotate("host", "db-1").unwrap();
        assert!(msg.annotate("host", "db-2").is_err());
    });

    let line = output
        .lines()
        .find(|line| line.contains("Annotation key 'host' already set"))
        .expect("duplicate annotation was not logged");
    assert!(line.contains("DEBUG"));
}

//! Property-based invariant tests for the reactivity engine.
//!
//! 1. Reads outside subscriber construction register nothing
//! 2. Every write notifies every registration exactly once, changed or not
//! 3. N constructions on one key yield N registrations
//! 4. The last written value is what a tracked read returns
//! 5. Notification order equals registration order
//! 6. Under `Isolate`, a failing subscriber never stops the others
//! 7. The collector slot is empty between operations

use std::cell::RefCell;
use std::rc::Rc;

use kvue_runtime::reactive::active_subscriber;
use kvue_runtime::{NotifyPolicy, ReactiveConfig, ReactiveError, ReactiveObject, Subscriber};
use proptest::prelude::*;

// ── Helpers ──────────────────────────────────────────────────────────

fn object(policy: NotifyPolicy) -> ReactiveObject {
    let obj = ReactiveObject::with_config(ReactiveConfig::new().with_notify_policy(policy));
    obj.define_reactive("x", 0);
    obj
}

fn logging_subscriber(obj: &ReactiveObject, log: &Rc<RefCell<Vec<usize>>>, tag: usize) -> Subscriber {
    let log = Rc::clone(log);
    obj.watch("x", move |_, _| {
        log.borrow_mut().push(tag);
        Ok(())
    })
    .unwrap()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Untracked reads
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn plain_reads_register_nothing(reads in 0usize..50) {
        let obj = object(NotifyPolicy::FailFast);
        for _ in 0..reads {
            let _ = obj.get("x").unwrap();
        }
        prop_assert!(obj.field("x").unwrap().dependency().is_empty());
        prop_assert!(active_subscriber().is_none());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2 + 3. Always notify, no dedup
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn writes_notify_each_registration(
        constructions in 0usize..6,
        writes in proptest::collection::vec(-3i64..3, 0..20),
    ) {
        let obj = object(NotifyPolicy::FailFast);
        let log = Rc::new(RefCell::new(Vec::new()));
        let _subs: Vec<_> = (0..constructions)
            .map(|tag| logging_subscriber(&obj, &log, tag))
            .collect();

        prop_assert_eq!(obj.field("x").unwrap().dependency().len(), constructions);
        for value in &writes {
            obj.set("x", *value).unwrap();
        }
        prop_assert_eq!(log.borrow().len(), constructions * writes.len());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Last write wins
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn read_returns_last_write(writes in proptest::collection::vec(any::<i64>(), 1..20)) {
        let obj = object(NotifyPolicy::FailFast);
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        let _sub = obj
            .watch("x", move |_, value| {
                *sink.borrow_mut() = value.as_i64();
                Ok(())
            })
            .unwrap();
        for value in &writes {
            obj.set("x", *value).unwrap();
        }
        let last = *writes.last().unwrap();
        prop_assert_eq!(obj.get("x").unwrap().as_i64(), Some(last));
        prop_assert_eq!(*seen.borrow(), Some(last));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Registration order
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn notification_follows_registration_order(count in 1usize..10) {
        let obj = object(NotifyPolicy::FailFast);
        let log = Rc::new(RefCell::new(Vec::new()));
        let _subs: Vec<_> = (0..count)
            .map(|tag| logging_subscriber(&obj, &log, tag))
            .collect();
        obj.set("x", 1).unwrap();
        prop_assert_eq!(log.borrow().clone(), (0..count).collect::<Vec<_>>());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Isolation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn isolate_runs_all_healthy_subscribers(failing in proptest::collection::vec(any::<bool>(), 1..10)) {
        let obj = object(NotifyPolicy::Isolate);
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut subs = Vec::new();
        for (tag, fails) in failing.iter().enumerate() {
            if *fails {
                subs.push(
                    obj.watch("x", move |_, _| Err(ReactiveError::callback(format!("s{tag}"))))
                        .unwrap(),
                );
            } else {
                subs.push(logging_subscriber(&obj, &log, tag));
            }
        }

        let result = obj.set("x", 1);
        let healthy: Vec<usize> = failing
            .iter()
            .enumerate()
            .filter(|(_, fails)| !**fails)
            .map(|(tag, _)| tag)
            .collect();
        prop_assert_eq!(log.borrow().clone(), healthy);

        let failures = failing.iter().filter(|fails| **fails).count();
        match result {
            Ok(()) => prop_assert_eq!(failures, 0),
            Err(ReactiveError::Cascade { failures: errs }) => prop_assert_eq!(errs.len(), failures),
            Err(other) => prop_assert!(false, "unexpected error {other:?}"),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Collector slot hygiene
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn slot_is_empty_after_any_construction(keys in proptest::collection::vec("[a-c]", 1..8)) {
        let obj = ReactiveObject::new();
        obj.define_reactive("a", 1);
        obj.define_reactive("b", 2);
        for key in &keys {
            // `c` is never defined: construction fails.
            let result = obj.watch(key.as_str(), |_, _| Ok(()));
            prop_assert_eq!(result.is_ok(), key != "c");
            prop_assert!(active_subscriber().is_none());
        }
    }
}

use std::fmt;
use std::sync::Arc;

use logwrap::sink::{CapturedRecord, MemorySink, SharedSink, SinkRegistry};
use logwrap::{Decorator, FnIdentity, Severity, Sink, fn_identity, instrument, make_decorator};
use proptest::prelude::*;

mod math {
    pub fn add(a: i32, b: i32) -> i32 {
        a + b
    }

    pub fn mul(a: i32, b: i32) -> i32 {
        a * b
    }
}

mod text {
    pub fn shout(s: &str) -> String {
        s.to_uppercase()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ValueError(String);

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ValueError {}

fn checked_div(a: i64, b: i64) -> Result<i64, ValueError> {
    if b == 0 {
        Err(ValueError("division by zero".to_owned()))
    } else {
        Ok(a / b)
    }
}

fn capturing(severity: Severity, message: &str) -> (Decorator, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let decorator = make_decorator(severity, message, SharedSink::new(sink.clone()));
    (decorator, sink)
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn add_warning_then_critical() {
    let (log, records) = capturing(Severity::Warning, "start");
    let add = instrument!(log, math::add);

    assert_eq!(add.call((2, 3)), 5);
    assert_eq!(
        records.last(),
        Some(CapturedRecord::new(Severity::Warning, "add - start"))
    );

    add.set_level(Severity::Critical);
    add.set_message("resumed");

    assert_eq!(add.call((4, 5)), 9);
    assert_eq!(records.len(), 2);
    assert_eq!(
        records.last(),
        Some(CapturedRecord::new(Severity::Critical, "add - resumed"))
    );
}

#[test]
fn failing_call_is_still_recorded() {
    let (log, records) = capturing(Severity::Info, "dividing");
    let div = instrument!(log, checked_div);

    let err = div.call((1, 0)).unwrap_err();

    assert_eq!(err, ValueError("division by zero".to_owned()));
    assert_eq!(
        records.records(),
        vec![CapturedRecord::new(Severity::Info, "checked_div - dividing")]
    );
}

#[test]
fn one_decorator_wraps_many_functions_independently() {
    let (log, records) = capturing(Severity::Info, "go");
    let add = instrument!(log, math::add);
    let mul = instrument!(log, math::mul);

    add.set_level(Severity::Error);
    add.call((1, 2));
    mul.call((3, 4));

    assert_eq!(
        records.records(),
        vec![
            CapturedRecord::new(Severity::Error, "add - go"),
            CapturedRecord::new(Severity::Info, "mul - go"),
        ]
    );
}

#[test]
fn identity_reports_name_and_declaring_scope() {
    let (log, _) = capturing(Severity::Info, "x");
    let shout = instrument!(log, text::shout);

    assert_eq!(shout.name(), "shout");
    assert_eq!(shout.scope(), "test_wrapper::text");
    assert_eq!(shout.call(("hey",)), "HEY");
}

#[test]
fn registry_shares_sinks_within_a_scope_only() {
    let registry = Arc::new(SinkRegistry::new(|_scope| -> Arc<dyn Sink> {
        Arc::new(MemorySink::new())
    }));
    let log = make_decorator(Severity::Info, "m", Arc::clone(&registry));

    let _a = log.apply(FnIdentity::new("add", "app::math"), math::add);
    let _b = log.apply(FnIdentity::new("mul", "app::math"), math::mul);
    let _c = log.apply(FnIdentity::new("shout", "app::text"), text::shout);

    assert_eq!(
        registry.scopes(),
        vec!["app::math".to_owned(), "app::text".to_owned()]
    );
}

#[test]
fn instrumented_functions_get_one_sink_per_declaring_module() {
    let registry = Arc::new(SinkRegistry::new(|_scope| -> Arc<dyn Sink> {
        Arc::new(MemorySink::new())
    }));
    let log = make_decorator(Severity::Info, "m", Arc::clone(&registry));

    let add = instrument!(log, math::add);
    let mul = instrument!(log, math::mul);
    let shout = instrument!(log, text::shout);

    assert_eq!(add.scope(), "test_wrapper::math");
    assert_eq!(mul.scope(), add.scope());
    assert_eq!(shout.scope(), "test_wrapper::text");
    assert_eq!(
        registry.scopes(),
        vec!["test_wrapper::math".to_owned(), "test_wrapper::text".to_owned()]
    );
}

#[test]
fn fn_identity_macro_uses_declaring_module() {
    let identity = fn_identity!(math::mul);
    assert_eq!(identity.name(), "mul");
    assert_eq!(identity.scope(), "test_wrapper::math");

    let identity = fn_identity!(checked_div);
    assert_eq!(identity.scope(), "test_wrapper");
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn wrapped_result_equals_direct_result(a in -10_000i64..10_000, b in -100i64..100) {
        let (log, records) = capturing(Severity::Debug, "prop");
        let div = instrument!(log, checked_div);

        prop_assert_eq!(div.call((a, b)), checked_div(a, b));
        prop_assert_eq!(records.len(), 1);
    }

    #[test]
    fn latest_configuration_wins(
        calls in 1usize..8,
        level_idx in 0usize..5,
        message in "[a-z]{1,12}",
    ) {
        let (log, records) = capturing(Severity::Warning, "initial");
        let add = instrument!(log, math::add);
        let level = Severity::ALL[level_idx];

        add.call((0, 0));
        add.set_level(level);
        add.set_message(&message);
        for _ in 0..calls {
            add.call((1, 1));
        }

        let all = records.records();
        prop_assert_eq!(all.len(), calls + 1);
        prop_assert_eq!(&all[0], &CapturedRecord::new(Severity::Warning, "add - initial"));
        let expected = CapturedRecord::new(level, format!("add - {message}"));
        for record in &all[1..] {
            prop_assert_eq!(record, &expected);
        }
    }
}

//! Ordering and binding behaviour of `Signal::fire`.
//!
//! Run with: `cargo test --test dispatch`

mod common;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use common::{init_test_logging, new_trace, tagged, take};
use sigring::{Signal, SignalConfig, SlotKind, StaticHandler, StaticMethod};

#[test]
fn test_release_middle_handler_between_fires() {
    init_test_logging();
    let signal: Signal = Signal::new();
    let trace = new_trace();

    let _a = tagged(&signal, &trace, "A");
    let mut b = tagged(&signal, &trace, "B");
    let _c = tagged(&signal, &trace, "C");

    signal.notify();
    assert_eq!(take(&trace), ["A", "B", "C"]);

    b.release();
    signal.notify();
    assert_eq!(take(&trace), ["A", "C"]);
}

#[test]
fn test_arguments_reach_every_handler() {
    init_test_logging();
    let signal: Signal<(String, u32)> = Signal::new();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let s1 = Rc::clone(&seen);
    let _first = signal.connect(move |(name, n): &(String, u32)| {
        s1.borrow_mut().push(format!("{name}={n}"));
    });
    let s2 = Rc::clone(&seen);
    let _second = signal.connect(move |(_, n): &(String, u32)| s2.borrow_mut().push(format!("x{}", n * 2)));

    signal.fire(&("retries".to_string(), 3));
    assert_eq!(*seen.borrow(), ["retries=3", "x6"]);
}

#[test]
fn test_unsized_argument_type() {
    let signal: Signal<str> = Signal::new();
    let total = Rc::new(Cell::new(0));
    let t = Rc::clone(&total);
    let _conn = signal.connect(move |s: &str| t.set(t.get() + s.len()));

    signal.fire("four");
    signal.fire("sixsix");
    assert_eq!(total.get(), 10);
}

thread_local! {
    static STATIC_HITS: Cell<u32> = const { Cell::new(0) };
}

struct CountHits;

impl StaticHandler<u32> for CountHits {
    fn handle(by: &u32) {
        STATIC_HITS.with(|h| h.set(h.get() + by));
    }
}

#[derive(Default)]
struct Meter {
    readings: RefCell<Vec<u32>>,
}

impl Meter {
    fn record(&self, v: &u32) {
        self.readings.borrow_mut().push(*v);
    }
}

struct RecordDoubled;

impl StaticMethod<Meter, u32> for RecordDoubled {
    fn call(meter: &Meter, v: &u32) {
        meter.readings.borrow_mut().push(v * 2);
    }
}

#[test]
fn test_all_four_bindings_interleave_in_order() {
    init_test_logging();
    let signal: Signal<u32> = Signal::with_config(SignalConfig::default().with_name("meter").with_capacity(4));
    let meter = Rc::new(Meter::default());
    let order = Rc::new(RefCell::new(Vec::new()));

    let o = Rc::clone(&order);
    let closure = signal.connect(move |v| o.borrow_mut().push(*v));
    let function = signal.connect_static::<CountHits>();
    let method = signal.connect_method(&meter, Meter::record);
    let fixed = signal.connect_method_static::<Meter, RecordDoubled>(&meter);

    assert_eq!(closure.kind(), Some(SlotKind::Closure));
    assert_eq!(function.kind(), Some(SlotKind::Function));
    assert_eq!(method.kind(), Some(SlotKind::Method));
    assert_eq!(fixed.kind(), Some(SlotKind::StaticMethod));

    signal.fire(&5);
    assert_eq!(*order.borrow(), [5]);
    assert_eq!(STATIC_HITS.with(Cell::get), 5);
    assert_eq!(*meter.readings.borrow(), [5, 10]);
    assert_eq!(signal.len(), 4);
}

#[test]
fn test_function_item_through_connect() {
    thread_local! {
        static LAST: Cell<i64> = const { Cell::new(0) };
    }
    fn remember(v: &i64) {
        LAST.with(|l| l.set(*v));
    }

    let signal: Signal<i64> = Signal::new();
    let _conn = signal.connect(remember);
    signal.fire(&-7);
    assert_eq!(LAST.with(Cell::get), -7);
}

#[test]
fn test_fire_with_no_handlers_and_after_all_released() {
    let signal: Signal = Signal::new();
    signal.notify();

    let trace = new_trace();
    let mut conns = vec![tagged(&signal, &trace, "A"), tagged(&signal, &trace, "B")];
    for conn in &mut conns {
        conn.release();
        conn.release();
    }

    signal.notify();
    assert!(take(&trace).is_empty());
    assert!(signal.is_empty());
}

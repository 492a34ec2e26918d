//! # Example: basic
//!
//! Minimal tour of a signal: connect a few handlers, fire, release one.
//!
//! Demonstrates how to:
//! - Connect a closure, a [`StaticHandler`] and a bound method.
//! - Fire the signal and observe registration order.
//! - Release a [`Connection`] and see the handler disappear.
//!
//! ## Flow
//! ```text
//! Signal<u32>
//!     ├─► connect(closure)                 ─► Connection #1
//!     ├─► connect_static::<Announce>()     ─► Connection #2
//!     ├─► connect_method(&meter, record)   ─► Connection #3
//!     ├─► fire(&1)   → closure, Announce, Meter::record
//!     ├─► release #1
//!     └─► fire(&2)   → Announce, Meter::record
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=sigring=trace cargo run --example basic
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use sigring::{Connection, Signal, SignalConfig, StaticHandler};

struct Announce;

impl StaticHandler<u32> for Announce {
    fn handle(value: &u32) {
        println!("[announce] value={value}");
    }
}

#[derive(Default)]
struct Meter {
    readings: RefCell<Vec<u32>>,
}

impl Meter {
    fn record(&self, value: &u32) {
        self.readings.borrow_mut().push(*value);
        println!("[meter] recorded {value}");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // 1. Build a named signal (the name shows up in log fields)
    let readings: Signal<u32> = Signal::with_config(SignalConfig::default().with_name("readings"));

    // 2. Connect three kinds of handlers
    let mut first: Connection<u32> = readings.connect(|value| println!("[closure] got {value}"));
    let _announce = readings.connect_static::<Announce>();
    let meter = Rc::new(Meter::default());
    let _meter = readings.connect_method(&meter, Meter::record);

    // 3. Fire: all three run, in order
    readings.fire(&1);

    // 4. Release the closure; the others keep running
    first.release();
    readings.fire(&2);

    println!("meter saw {:?}; {} handlers connected", meter.readings.borrow(), readings.len());
}

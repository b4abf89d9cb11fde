use once_cell::sync::Lazy;
use std::collections::VecDeque;
use std::sync::Mutex;

pub(crate) mod macros;
pub mod traceable;
pub use traceable::Traceable;

const TRACE_CAPACITY: usize = 100_000;

pub static TRACER: Lazy<Mutex<Tracer>> = Lazy::new(|| Mutex::new(Tracer::new(TRACE_CAPACITY)));

/// Bounded history of clock events, oldest dropped first
pub struct Tracer {
    history: VecDeque<String>,
    capacity: usize,
}

impl Tracer {
    pub fn new(capacity: usize) -> Self {
        Self {
            history: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    pub fn write(&mut self, msg: String) {
        if self.capacity == 0 {
            return;
        }
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(msg);
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    pub fn print(&self) {
        for (i, line) in self.lines().enumerate() {
            println!("{:06}: {}", i, line);
        }
    }

    pub fn log<T: Traceable>(&mut self, thing: &T) {
        if let Some(trace) = thing.trace() {
            self.write(trace);
        }
    }
}

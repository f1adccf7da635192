//! Discrete-time simulator.
//!
//! [`SimDelay`] implements `DelayNs` on a virtual clock. [`Sim::run_until`]
//! polls a future, and whenever nothing is left to run at the current
//! instant it jumps the clock to the earliest pending deadline. Wake-ups
//! (for example a `Signal` raised by another task) cause a re-poll at the
//! same instant, so cross-task effects land before time moves on.

use std::cell::{Cell, RefCell};
use std::future::{Future, poll_fn};
use std::pin::pin;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::task::{Context, Poll, Wake, Waker};

use embassy_futures::select::{Either, select};
use embedded_hal_async::delay::DelayNs;

#[derive(Default)]
struct Clock {
    now_us: Cell<u64>,
    deadlines: RefCell<Vec<u64>>,
}

#[derive(Clone, Default)]
pub struct Sim {
    clock: Rc<Clock>,
}

struct WakeFlag(AtomicBool);

impl Wake for WakeFlag {
    fn wake(self: Arc<Self>) {
        self.0.store(true, Ordering::SeqCst);
    }

    fn wake_by_ref(self: &Arc<Self>) {
        self.0.store(true, Ordering::SeqCst);
    }
}

impl Sim {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_us(&self) -> u64 {
        self.clock.now_us.get()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }

    pub fn delay(&self) -> SimDelay {
        SimDelay {
            clock: self.clock.clone(),
        }
    }

    /// Poll `fut` until it completes (`Some`) or the clock would pass
    /// `until_ms` (`None`, with the clock left at `until_ms`).
    pub fn run_until<F: Future>(&self, until_ms: u64, fut: F) -> Option<F::Output> {
        let until = until_ms.saturating_mul(1000);
        let flag = Arc::new(WakeFlag(AtomicBool::new(false)));
        let waker = Waker::from(flag.clone());
        let mut cx = Context::from_waker(&waker);
        let mut fut = pin!(fut);

        loop {
            self.clock.deadlines.borrow_mut().clear();
            flag.0.store(false, Ordering::SeqCst);
            if let Poll::Ready(out) = fut.as_mut().poll(&mut cx) {
                return Some(out);
            }
            if flag.0.load(Ordering::SeqCst) {
                continue;
            }
            let next = self.clock.deadlines.borrow().iter().copied().min();
            match next {
                Some(at) if at <= until => self.clock.now_us.set(at),
                _ => {
                    self.clock.now_us.set(until.max(self.now_us()));
                    return None;
                }
            }
        }
    }

    /// Run `tasks` (which never finish) alongside `script`, until the
    /// script is done. Returns the script's output.
    pub fn drive<T: Future, S: Future>(&self, tasks: T, script: S) -> S::Output {
        match self.run_until(u64::MAX, select(script, tasks)) {
            Some(Either::First(out)) => out,
            Some(Either::Second(_)) => panic!("tasks finished before the script"),
            None => panic!("simulation stalled at {} ms", self.now_ms()),
        }
    }
}

pub struct SimDelay {
    clock: Rc<Clock>,
}

impl SimDelay {
    async fn sleep_us(&mut self, us: u64) {
        let deadline = self.clock.now_us.get() + us;
        let clock = &self.clock;
        poll_fn(|_| {
            if clock.now_us.get() >= deadline {
                Poll::Ready(())
            } else {
                clock.deadlines.borrow_mut().push(deadline);
                Poll::Pending
            }
        })
        .await
    }
}

impl DelayNs for SimDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.sleep_us(u64::from(ns).div_ceil(1000)).await
    }

    async fn delay_us(&mut self, us: u32) {
        self.sleep_us(u64::from(us)).await
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.sleep_us(u64::from(ms) * 1000).await
    }
}

/// Sleep the script until absolute time `at_ms`.
pub async fn until(sim: &Sim, delay: &mut SimDelay, at_ms: u64) {
    let now = sim.now_ms();
    assert!(at_ms >= now, "script went back in time: {at_ms} < {now}");
    delay.delay_ms((at_ms - now) as u32).await;
}

//! Toggleable periodic activities.
//!
//! An [`Activity`] is one unit of periodic work, driven forever by [`run`].
//! Other tasks never touch the activity itself, only its [`ActivityControl`]:
//! the toggle controller suspends and resumes it, the status reporter reads
//! its [`RunState`].
//!
//! Suspension is cooperative. A suspend request wakes the runner, which drops
//! the in-flight tick at its current await point, so output writes that sit
//! between two awaits are always applied as a whole. While suspended the
//! runner waits on the control's transition signal and never ticks. A resume
//! restarts the activity from its initial phase.

use core::cell::Cell;
use core::convert::Infallible;
use core::time::Duration;

use embassy_futures::select::{Either, select};
use embassy_sync::blocking_mutex::{Mutex, raw::CriticalSectionRawMutex};
use embassy_sync::signal::Signal;
use embedded_hal_async::delay::DelayNs;

use crate::delay::pause;

/// Scheduler-visible execution status of an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunState {
    /// Executing a tick.
    Running,
    /// Sleeping between two steps of its cycle.
    Blocked,
    /// Paused by its toggle controller.
    Suspended,
    /// Not started yet, or halted after a hardware fault.
    Unknown,
}

impl RunState {
    /// Running and Blocked look the same from outside.
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Running | Self::Blocked)
    }
}

#[derive(Clone, Copy)]
struct Slot {
    state: RunState,
    halted: bool,
    resumes: u32,
}

/// Handle to an activity, shared by reference between the runner, the toggle
/// controller and the status reporter.
///
/// Every read and transition happens in one critical section, so observers
/// only ever see the state before or after a transition.
pub struct ActivityControl {
    slot: Mutex<CriticalSectionRawMutex, Cell<Slot>>,
    transition: Signal<CriticalSectionRawMutex, ()>,
}

impl ActivityControl {
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(Cell::new(Slot {
                state: RunState::Unknown,
                halted: false,
                resumes: 0,
            })),
            transition: Signal::new(),
        }
    }

    fn update<R>(&self, f: impl FnOnce(&mut Slot) -> R) -> R {
        self.slot.lock(|cell| {
            let mut slot = cell.get();
            let out = f(&mut slot);
            cell.set(slot);
            out
        })
    }

    pub fn state(&self) -> RunState {
        self.slot.lock(|cell| cell.get().state)
    }

    /// Number of Suspended → Running transitions so far.
    pub fn resumes(&self) -> u32 {
        self.slot.lock(|cell| cell.get().resumes)
    }

    pub fn is_halted(&self) -> bool {
        self.slot.lock(|cell| cell.get().halted)
    }

    /// Called by the runner when it begins. A suspend that arrived before
    /// the runner started is kept.
    pub fn start(&self) -> RunState {
        self.update(|slot| {
            if slot.state == RunState::Unknown && !slot.halted {
                slot.state = RunState::Running;
            }
            slot.state
        })
    }

    /// Take the activity out of the runnable set. Returns the resulting state;
    /// a halted activity stays `Unknown`.
    pub fn suspend(&self) -> RunState {
        self.update(|slot| {
            if !slot.halted && slot.state != RunState::Suspended {
                slot.state = RunState::Suspended;
                self.transition.signal(());
            }
            slot.state
        })
    }

    /// Put a suspended activity back into the runnable set.
    pub fn resume(&self) -> RunState {
        self.update(|slot| {
            if !slot.halted && slot.state == RunState::Suspended {
                slot.state = RunState::Running;
                slot.resumes = slot.resumes.wrapping_add(1);
                self.transition.signal(());
            }
            slot.state
        })
    }

    /// The activity stopped for good. It reports `Unknown` from now on and
    /// ignores suspend and resume.
    pub fn halt(&self) {
        self.update(|slot| {
            slot.state = RunState::Unknown;
            slot.halted = true;
        });
    }

    /// Resolves on the next suspend or resume.
    pub async fn wait_transition(&self) {
        self.transition.wait().await
    }

    /// Sleep inside a tick. The activity reports `Blocked` meanwhile.
    pub async fn sleep<D: DelayNs>(&self, delay: &mut D, duration: Duration) {
        self.mark(RunState::Running, RunState::Blocked);
        pause(delay, duration).await;
        self.mark(RunState::Blocked, RunState::Running);
    }

    fn mark(&self, from: RunState, to: RunState) {
        self.update(|slot| {
            if slot.state == from {
                slot.state = to;
            }
        });
    }
}

impl Default for ActivityControl {
    fn default() -> Self {
        Self::new()
    }
}

/// A unit of periodic work that can be paused from outside.
#[allow(async_fn_in_trait)]
pub trait Activity {
    type Error;

    fn name(&self) -> &'static str;

    /// Restore the initial phase. Called before the first tick after a resume.
    fn reset(&mut self);

    /// One full period of work, including its sleeps (taken through
    /// [`ActivityControl::sleep`]).
    async fn tick<D: DelayNs>(
        &mut self,
        control: &ActivityControl,
        delay: &mut D,
    ) -> Result<(), Self::Error>;

    /// Bring the outputs to their resting level when suspended.
    fn park(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Drive `activity` until it hits a hardware fault.
///
/// The returned fault has already halted the activity; there is no retry.
pub async fn run<A, D>(
    activity: &mut A,
    control: &ActivityControl,
    delay: &mut D,
) -> Result<Infallible, A::Error>
where
    A: Activity,
    D: DelayNs,
{
    let name = activity.name();
    control.start();
    info!("{} started", name);

    let mut seen = control.resumes();
    loop {
        if control.state() == RunState::Suspended {
            info!("{} suspended", name);
            if let Err(fault) = activity.park() {
                return Err(halt(name, control, fault));
            }
            while control.state() == RunState::Suspended {
                control.wait_transition().await;
            }
        }

        let resumes = control.resumes();
        if resumes != seen {
            seen = resumes;
            activity.reset();
            info!("{} resumed", name);
        }

        // A pending transition wins over a tick that is ready at the same time.
        match select(control.wait_transition(), activity.tick(control, delay)).await {
            Either::First(()) | Either::Second(Ok(())) => {}
            Either::Second(Err(fault)) => return Err(halt(name, control, fault)),
        }
    }
}

fn halt<E>(name: &'static str, control: &ActivityControl, fault: E) -> E {
    control.halt();
    error!("{} halted on hardware fault", name);
    fault
}

//! Button-driven suspend/resume of one activity.

use core::convert::Infallible;

use embedded_hal_async::delay::DelayNs;

use crate::activity::{ActivityControl, RunState};
use crate::config::Timing;
use crate::debounce::DebouncedButton;
use crate::delay::pause;
use crate::error::HardwareFault;
use crate::hardware::Button;

/// Pairs one button with one activity. It is the only caller of `suspend`
/// and `resume` on that activity.
pub struct ToggleController<'a, B> {
    button: DebouncedButton<B>,
    control: &'a ActivityControl,
    suspended: bool,
    timing: Timing,
}

impl<'a, B: Button> ToggleController<'a, B> {
    pub fn new(button: DebouncedButton<B>, control: &'a ActivityControl, timing: Timing) -> Self {
        // An activity that is not running yet starts as Running, so
        // Unknown counts as not suspended here.
        let suspended = control.state() == RunState::Suspended;
        Self {
            button,
            control,
            suspended,
            timing,
        }
    }

    /// The controller's own view of the activity.
    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Flip the activity between suspended and running. Returns the state
    /// the activity ended up in.
    pub fn toggle(&mut self) -> RunState {
        let line = self.button.line();
        let state = if self.suspended {
            self.control.resume()
        } else {
            self.control.suspend()
        };

        if state == RunState::Unknown {
            warn!("{}: activity is halted, toggle ignored", line);
            return state;
        }

        self.suspended = !self.suspended;
        let actual = state == RunState::Suspended;
        if self.suspended != actual {
            error!(
                "{}: tracked suspended={} but activity is {}",
                line,
                self.suspended,
                state
            );
            self.suspended = actual;
        }
        info!("{}: activity now {}", line, state);
        state
    }

    /// Poll the button forever, toggling on every confirmed press.
    ///
    /// Returns only if the button line fails.
    pub async fn run<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> Result<Infallible, HardwareFault<B::Error>> {
        loop {
            if self.button.poll(delay).await? {
                self.toggle();
                self.button.wait_release(delay).await?;
            }
            pause(delay, self.timing.button_poll).await;
        }
    }
}

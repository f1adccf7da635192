//! Property tests over random press scripts.

use embassy_futures::join::join;
use proptest::prelude::*;
use task_panel::activity::{self, ActivityControl, RunState};

use crate::activity_tests::{indicator, leds};
use crate::mock_hw::{ScriptedButton, only_lit};
use crate::sim::{Sim, until};
use crate::toggle_tests::controller;

/// Lay `(hold, gap)` pairs out back to back from 210 ms. Returns the end time.
fn script_presses(button: &ScriptedButton, presses: &[(u64, u64)]) -> u64 {
    let mut at = 210;
    for &(hold, gap) in presses {
        button.press(at, hold);
        at += hold + gap;
    }
    at + 300
}

/// Run indicator plus controller until `end_ms`; returns the final state and
/// the controller's own flag.
fn run_presses(presses: &[(u64, u64)]) -> (RunState, bool) {
    let sim = Sim::new();
    let pins = leds(&sim);
    let button = ScriptedButton::new(&sim);
    let end = script_presses(&button, presses);

    let control = ActivityControl::new();
    let mut ind = indicator(&pins);
    let mut ctl = controller(&button, &control);
    let (mut d1, mut d2, mut script) = (sim.delay(), sim.delay(), sim.delay());

    sim.drive(
        join(activity::run(&mut ind, &control, &mut d1), ctl.run(&mut d2)),
        async {
            until(&sim, &mut script, end).await;
        },
    );
    (control.state(), ctl.is_suspended())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Presses long enough to pass the settle window each flip the state once.
    #[test]
    fn odd_press_count_leaves_activity_suspended(
        presses in prop::collection::vec((210u64..500, 150u64..400), 0..7),
    ) {
        let (state, tracked) = run_presses(&presses);
        let odd = presses.len() % 2 == 1;
        if odd {
            prop_assert_eq!(state, RunState::Suspended);
        } else {
            prop_assert!(state.is_active(), "expected active, got {:?}", state);
        }
        prop_assert_eq!(tracked, odd);
    }

    /// Glitches shorter than the settle window, at least 200 ms apart, never
    /// flip anything.
    #[test]
    fn short_glitches_never_toggle(
        glitches in prop::collection::vec((1u64..100, 200u64..500), 1..10),
    ) {
        let (state, tracked) = run_presses(&glitches);
        prop_assert!(state.is_active(), "expected active, got {:?}", state);
        prop_assert!(!tracked);
    }

    /// Wherever the cycle was suspended, the first color after resume is red.
    #[test]
    fn resume_always_restarts_at_red(
        suspend_at in 1u64..3000,
        paused_for in 1u64..2000,
    ) {
        let sim = Sim::new();
        let pins = leds(&sim);
        let control = ActivityControl::new();
        let mut ind = indicator(&pins);
        let (mut delay, mut script) = (sim.delay(), sim.delay());
        let resume_at = suspend_at + paused_for;

        sim.drive(activity::run(&mut ind, &control, &mut delay), async {
            until(&sim, &mut script, suspend_at).await;
            control.suspend();
            until(&sim, &mut script, resume_at).await;
            control.resume();
            until(&sim, &mut script, resume_at + 1).await;
        });

        prop_assert_eq!(only_lit(&pins, resume_at), Some(0));
    }
}

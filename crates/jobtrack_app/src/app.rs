use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use anyhow::Context;
use url::Url;

use jobtrack_core::{update, AppState, Msg};
use jobtrack_store::{StoreHandle, StoreSettings};
use tracker_logging::tracker_info;

use crate::command::{self, Input};
use crate::effects::EffectRunner;
use crate::render;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Upper bound on waiting for in-flight store calls after a command; a call
/// settling later is picked up by the next settle pass (last response wins).
const SETTLE_WINDOW: Duration = Duration::from_millis(2000);
const POLL_INTERVAL: Duration = Duration::from_millis(20);

pub fn run() -> anyhow::Result<()> {
    let base = std::env::var("JOBTRACK_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let base_url = Url::parse(&base).with_context(|| format!("invalid base url {base:?}"))?;
    tracker_info!("using job store at {base_url}");

    let handle =
        StoreHandle::new(StoreSettings::new(base_url)).context("could not start store client")?;
    let runner = EffectRunner::new(handle);
    let mut state = AppState::new();

    // Startup: one full fetch populates the collection.
    state = dispatch(state, Msg::RefreshRequested, &runner);
    state = settle(state, &runner);
    repaint(&mut state);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match command::parse(&line) {
            Ok(Input::Quit) => break,
            Ok(Input::Help) => println!("{}", command::HELP),
            Ok(Input::Msg(msg)) => {
                state = dispatch(state, msg, &runner);
                state = settle(state, &runner);
            }
            Err(reason) => println!("error: {reason} (try `help`)"),
        }
        repaint(&mut state);
    }
    Ok(())
}

fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    let (state, effects) = update(state, msg);
    runner.run(effects);
    state
}

/// Drains settled store events into the state until nothing is in flight
/// or the window closes.
fn settle(mut state: AppState, runner: &EffectRunner) -> AppState {
    let deadline = Instant::now() + SETTLE_WINDOW;
    loop {
        for msg in runner.poll() {
            state = dispatch(state, msg, runner);
        }
        if runner.in_flight() == 0 || Instant::now() >= deadline {
            return state;
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

fn repaint(state: &mut AppState) {
    if state.consume_dirty() {
        println!("{}", render::render(&state.view()));
    }
}

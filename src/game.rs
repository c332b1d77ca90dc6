use std::time::{Duration, Instant};

use anyhow::Result;
use log::{debug, info};
use rand::Rng;

use crate::input::Command;
use crate::render::render;
use crate::state::GameState;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Tick,
    Key(Command),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    GameOver,
    Terminated,
}

/// Where events come from. The loop hands over its tick timer so the source
/// knows how long it may wait for a key before the next tick is due.
pub trait EventSource {
    fn next_event(&mut self, timer: &TickTimer) -> Result<Event>;
}

/// Where rendered frames go.
pub trait Frame {
    fn draw(&mut self, frame: &str) -> Result<()>;
}

/// One-shot timer for the next tick, re-armed by the loop after every
/// processed tick.
pub struct TickTimer {
    interval: Duration,
    deadline: Option<Instant>,
}

impl TickTimer {
    pub fn new(interval: Duration) -> Self {
        TickTimer { interval, deadline: None }
    }

    pub fn arm(&mut self) {
        self.deadline = Some(Instant::now() + self.interval);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Time left until the tick fires, zero once it is due, `None` when
    /// the timer is not armed.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }
}

fn status_of(state: &GameState) -> Status {
    if state.game_over { Status::GameOver } else { Status::Running }
}

/// Applies one event to the state.
pub fn reduce<R: Rng + ?Sized>(state: GameState, event: Event, rng: &mut R) -> (GameState, Status) {
    match event {
        Event::Key(Command::Quit) => (state, Status::Terminated),
        Event::Key(Command::Turn(direction)) => {
            let state = state.turn(direction);
            let status = status_of(&state);
            (state, status)
        }
        Event::Tick if state.game_over => (state, Status::Terminated),
        Event::Tick => {
            let state = state.advance(rng);
            let status = status_of(&state);
            (state, status)
        }
    }
}

/// Runs the game until it terminates, drawing a frame at start, after every
/// tick and after every key that maps to a command. Returns the final state.
pub fn play<S, F, R>(
    mut state: GameState,
    source: &mut S,
    screen: &mut F,
    rng: &mut R,
    interval: Duration,
) -> Result<GameState>
where
    S: EventSource + ?Sized,
    F: Frame + ?Sized,
    R: Rng + ?Sized,
{
    let mut timer = TickTimer::new(interval);
    let mut status = status_of(&state);

    screen.draw(&render(&state))?;
    timer.arm();

    loop {
        let event = source.next_event(&timer)?;
        debug!("event {:?}", event);

        let (next, next_status) = reduce(state, event, rng);
        state = next;

        if next_status != status {
            info!("{:?} -> {:?}, score {}", status, next_status, state.score());
            status = next_status;
        }

        if status == Status::Terminated {
            timer.cancel();
            return Ok(state);
        }

        if event == Event::Tick {
            timer.arm();
        }

        screen.draw(&render(&state))?;
    }
}

//! Background clock and date refresh that the foreground can pre-empt to
//! show its own text.

use core::fmt;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::constants::DEFAULT_DATE_OFFSET_HOURS;
use crate::{HDSP211xError, HDSP211x};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickerConfig {
    /// Pause between refreshes.
    pub interval: Duration,
    /// Blink the clock separators.
    pub toggle_separators: bool,
    pub date_offset_hours: i64,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(100),
            toggle_separators: false,
            date_offset_hours: DEFAULT_DATE_OFFSET_HOURS,
        }
    }
}

#[derive(Debug)]
struct Activity {
    enabled: bool,
    displaying: bool,
}

/// Flags shared by the ticker thread and the foreground.
///
/// `enabled` and `displaying` live under one lock: the ticker only starts an
/// update while enabled, so once `suspend` returns no update is in flight
/// and none will start until `resume`.
#[derive(Debug)]
pub struct TickerState {
    running: AtomicBool,
    activity: Mutex<Activity>,
    idle: Condvar,
}

impl Default for TickerState {
    fn default() -> Self {
        Self::new()
    }
}

impl TickerState {
    pub fn new() -> Self {
        Self {
            running: AtomicBool::new(true),
            activity: Mutex::new(Activity {
                enabled: true,
                displaying: false,
            }),
            idle: Condvar::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    pub fn is_enabled(&self) -> bool {
        lock(&self.activity).enabled
    }

    pub fn is_displaying(&self) -> bool {
        lock(&self.activity).displaying
    }

    /// Keep the ticker off the display and wait out any update in progress.
    /// Returns whether the ticker was enabled beforehand.
    pub fn suspend(&self) -> bool {
        let mut activity = lock(&self.activity);
        let was_enabled = activity.enabled;
        activity.enabled = false;
        while activity.displaying {
            activity = self
                .idle
                .wait(activity)
                .unwrap_or_else(PoisonError::into_inner);
        }
        was_enabled
    }

    /// Hand the display back to the ticker. Returns whether it was suspended.
    pub fn resume(&self) -> bool {
        let mut activity = lock(&self.activity);
        let was_suspended = !activity.enabled;
        activity.enabled = true;
        was_suspended
    }

    fn begin_update(&self) -> bool {
        let mut activity = lock(&self.activity);
        if !activity.enabled {
            return false;
        }
        activity.displaying = true;
        true
    }

    fn end_update(&self) {
        lock(&self.activity).displaying = false;
        self.idle.notify_all();
    }
}

pub type SharedDisplay<P, D> = Arc<Mutex<HDSP211x<P, D>>>;

/// Joinable refresh thread. Dropping a `Ticker` stops and joins it; use
/// `shutdown` to also blank the display.
pub struct Ticker<P, D> {
    display: SharedDisplay<P, D>,
    state: Arc<TickerState>,
    handle: Option<JoinHandle<()>>,
}

impl<P, E, D> Ticker<P, D>
where
    P: OutputPin<Error = E> + Send + 'static,
    E: fmt::Debug,
    D: DelayNs + Send + 'static,
{
    pub fn spawn(display: SharedDisplay<P, D>, config: TickerConfig) -> io::Result<Self> {
        let state = Arc::new(TickerState::new());

        let handle = thread::Builder::new().name("hdsp-ticker".into()).spawn({
            let display = Arc::clone(&display);
            let state = Arc::clone(&state);
            move || run(&*display, &state, &config)
        })?;

        Ok(Self {
            display,
            state,
            handle: Some(handle),
        })
    }

    pub fn state(&self) -> &TickerState {
        &self.state
    }

    pub fn display(&self) -> &SharedDisplay<P, D> {
        &self.display
    }

    /// Take the display away from the ticker and show `text` instead.
    pub fn overwrite(&self, text: &str) -> Result<(), HDSP211xError<E>> {
        self.overwrite_bytes(text.as_bytes())
    }

    pub fn overwrite_bytes(&self, bytes: &[u8]) -> Result<(), HDSP211xError<E>> {
        self.state.suspend();
        lock(&self.display).write_bytes(bytes)
    }

    pub fn resume(&self) -> bool {
        self.state.resume()
    }

    /// Resume, blanking first if the foreground had taken over so its text
    /// does not linger on positions the ticker never rewrites.
    pub fn resume_and_blank(&self) -> Result<(), HDSP211xError<E>> {
        if !self.state.is_enabled() {
            lock(&self.display).reset()?;
        }
        self.state.resume();
        Ok(())
    }

    /// Stop and join the thread, then blank the display.
    pub fn shutdown(mut self) -> Result<(), HDSP211xError<E>> {
        self.stop_and_join();
        lock(&self.display).reset()
    }
}

impl<P, D> Ticker<P, D> {
    fn stop_and_join(&mut self) {
        self.state.stop();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("ticker thread panicked");
            }
        }
    }
}

impl<P, D> Drop for Ticker<P, D> {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}

fn run<P, E, D>(display: &Mutex<HDSP211x<P, D>>, state: &TickerState, config: &TickerConfig)
where
    P: OutputPin<Error = E>,
    E: fmt::Debug,
    D: DelayNs,
{
    log::debug!("ticker started, refreshing every {:?}", config.interval);

    while state.is_running() {
        if state.begin_update() {
            let result = refresh(&mut *lock(display), config);
            state.end_update();

            if let Err(error) = result {
                log::warn!("ticker refresh failed: {}", error);
            }
        }
        thread::sleep(config.interval);
    }

    log::debug!("ticker stopped");
}

fn refresh<P, E, D>(display: &mut HDSP211x<P, D>, config: &TickerConfig) -> Result<(), HDSP211xError<E>>
where
    P: OutputPin<Error = E>,
    D: DelayNs,
{
    display.do_clock(config.toggle_separators)?;
    display.do_date_with_offset(config.date_offset_hours)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

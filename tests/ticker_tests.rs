extern crate hdsp211x;

mod common;

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use common::{display, latched, screen, Event, Log, PinId};
use hdsp211x::ticker::{Ticker, TickerConfig, TickerState};

fn config() -> TickerConfig {
    TickerConfig {
        interval: Duration::from_millis(5),
        ..TickerConfig::default()
    }
}

fn wait_for_writes(log: &Log, count: usize) {
    for _ in 0..400 {
        if latched(&log.events()).len() >= count {
            return;
        }
        thread::sleep(Duration::from_millis(5));
    }
    panic!("ticker never wrote {} characters", count);
}

#[test]
fn default_config() {
    let config = TickerConfig::default();
    assert_eq!(config.interval, Duration::from_millis(100));
    assert!(!config.toggle_separators);
    assert_eq!(config.date_offset_hours, -4);
}

#[test]
fn state_suspend_and_resume() {
    let state = TickerState::new();
    assert!(state.is_running());
    assert!(state.is_enabled());

    assert!(state.suspend());
    assert!(!state.suspend());
    assert!(!state.is_enabled());
    assert!(!state.is_displaying());

    assert!(state.resume());
    assert!(!state.resume());

    state.stop();
    assert!(!state.is_running());
}

#[test]
fn ticker_shows_clock_and_date() {
    let log = Log::default();
    let ticker = Ticker::spawn(Arc::new(Mutex::new(display(&log))), config()).unwrap();

    wait_for_writes(&log, 16);
    ticker.shutdown().unwrap();

    let shown = screen(&log.events());
    assert_eq!(shown[2], b':');
    assert_eq!(shown[5], b':');
    assert_eq!(shown[11], b' ');
    let positions: Vec<u8> = latched(&log.events()).iter().take(16).map(|&(p, _)| p).collect();
    assert_eq!(positions, (0..16).collect::<Vec<u8>>());
}

#[test]
fn overwrite_keeps_the_ticker_off_the_display() {
    let log = Log::default();
    let ticker = Ticker::spawn(Arc::new(Mutex::new(display(&log))), config()).unwrap();
    wait_for_writes(&log, 16);

    ticker.overwrite("GPB4    ").unwrap();
    assert!(!ticker.state().is_enabled());
    assert!(!ticker.state().is_displaying());

    let frozen = log.len();
    thread::sleep(Duration::from_millis(50));
    assert_eq!(log.len(), frozen);
    assert_eq!(&screen(&log.events())[..8], b"GPB4    ");

    ticker.resume_and_blank().unwrap();
    assert!(ticker.state().is_enabled());
    let events = log.events();
    assert_eq!(
        &events[frozen..frozen + 2],
        &[Event::Pin(PinId::Rst, false), Event::Pin(PinId::Rst, true)]
    );

    let resumed = latched(&log.events()).len();
    wait_for_writes(&log, resumed + 16);
    ticker.shutdown().unwrap();
}

#[test]
fn resume_without_override_does_not_blank() {
    let log = Log::default();
    let ticker = Ticker::spawn(Arc::new(Mutex::new(display(&log))), config()).unwrap();

    ticker.resume_and_blank().unwrap();
    ticker.shutdown().unwrap();

    let resets = log
        .events()
        .iter()
        .filter(|e| **e == Event::Pin(PinId::Rst, false))
        .count();
    assert_eq!(resets, 1);
}

#[test]
fn shutdown_joins_then_blanks() {
    let log = Log::default();
    let shared = Arc::new(Mutex::new(display(&log)));
    let ticker = Ticker::spawn(Arc::clone(&shared), config()).unwrap();
    wait_for_writes(&log, 16);

    ticker.shutdown().unwrap();

    let events = log.events();
    assert_eq!(
        &events[events.len() - 2..],
        &[Event::Pin(PinId::Rst, false), Event::Pin(PinId::Rst, true)]
    );

    let after = log.len();
    thread::sleep(Duration::from_millis(30));
    assert_eq!(log.len(), after);
    assert_eq!(Arc::strong_count(&shared), 1);
}

#[test]
fn dropping_the_ticker_stops_the_thread() {
    let log = Log::default();
    let shared = Arc::new(Mutex::new(display(&log)));
    let ticker = Ticker::spawn(Arc::clone(&shared), config()).unwrap();
    drop(ticker);

    let after = log.len();
    thread::sleep(Duration::from_millis(30));
    assert_eq!(log.len(), after);
}

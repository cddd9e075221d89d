use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mathfun::app::{App, View};
use mathfun::config::Config;
use mathfun::randomizer::SeededRandomizer;
use mathfun::runtime::{AppEvent, FixedTicker, Runner, TestEventSource};
use mathfun::session::Phase;
use mathfun::topic::Catalogue;

fn key(code: KeyCode) -> AppEvent {
    AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn new_app(config: Config) -> App {
    App::new(
        config,
        Catalogue::embedded().unwrap(),
        Box::new(SeededRandomizer::new(2024)),
    )
}

fn handle(app: &mut App, ev: AppEvent) {
    match ev {
        AppEvent::Tick(elapsed) => app.on_tick(elapsed),
        AppEvent::Resize => {}
        AppEvent::Key(k) => app.on_key(k),
    }
}

// Headless flow through the runtime without a TTY: pick a grade and a topic
// from the menus, answer a few questions correctly, then leave.
#[test]
fn headless_menu_to_answers_flow() {
    let mut app = new_app(Config::default());

    let (tx, rx) = mpsc::channel();
    let es = TestEventSource::new(rx);
    let ticker = FixedTicker::new(Duration::from_millis(5));
    let mut runner = Runner::new(es, ticker);

    tx.send(key(KeyCode::Char('1'))).unwrap();
    tx.send(key(KeyCode::Enter)).unwrap();

    let mut answered = 0;
    let mut pending = 0;
    for _ in 0..500u32 {
        let ev = runner.step();
        if matches!(ev, AppEvent::Key(_)) {
            pending = usize::saturating_sub(pending, 1);
        }
        handle(&mut app, ev);

        if pending > 0 {
            continue;
        }
        match app.session.phase() {
            Phase::AwaitingAnswer if answered < 3 => {
                let idx = app.session.question().unwrap().correct_answer;
                tx.send(key(KeyCode::Char(char::from(b'1' + idx as u8))))
                    .unwrap();
                answered += 1;
                pending = 1;
            }
            Phase::ShowingFeedback => {
                tx.send(key(KeyCode::Enter)).unwrap();
                pending = 1;
            }
            _ if answered == 3 => break,
            _ => {}
        }
    }

    assert_eq!(app.session.score(), 3);
    assert_eq!(app.session.total_attempts(), 3);
    assert_eq!(app.session.streak(), 3);
    assert_eq!(app.view(), View::Question);

    handle(&mut app, key(KeyCode::Esc));
    assert_eq!(app.view(), View::Topics);
    handle(&mut app, key(KeyCode::Char('q')));
    assert!(app.should_quit);
}

#[test]
fn headless_timed_drill_finishes_by_time() {
    let mut app = new_app(Config {
        timer_secs: 1,
        ..Config::default()
    });
    app.start(None, None, true);
    assert_eq!(app.session.remaining_seconds(), 1);

    let (_tx, rx) = mpsc::channel();
    let es = TestEventSource::new(rx);
    let ticker = FixedTicker::new(Duration::from_millis(10));
    let mut runner = Runner::new(es, ticker);

    for _ in 0..300u32 {
        // up to ~3s
        handle(&mut app, runner.step());
        if app.view() == View::Summary {
            break;
        }
    }

    assert_eq!(app.view(), View::Summary, "timed drill should end by timeout");
    let result = app.session.timer_result().unwrap();
    assert_eq!((result.correct, result.wrong, result.total), (0, 0, 0));
}

#[test]
fn headless_timed_answers_auto_advance() {
    let mut app = new_app(Config {
        auto_advance_ms: 20,
        ..Config::default()
    });
    app.start(None, None, true);

    let (_tx, rx) = mpsc::channel();
    let mut runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    for _ in 0..4 {
        let idx = app.session.question().unwrap().correct_answer;
        handle(&mut app, key(KeyCode::Char(char::from(b'1' + idx as u8))));
        assert_eq!(app.session.phase(), Phase::ShowingFeedback);

        for _ in 0..100u32 {
            handle(&mut app, runner.step());
            if app.session.phase() == Phase::AwaitingAnswer {
                break;
            }
        }
        assert_eq!(app.session.phase(), Phase::AwaitingAnswer);
    }
    assert_eq!(app.session.score(), 4);
}

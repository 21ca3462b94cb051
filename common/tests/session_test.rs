mod support;

use anyhow::Result;
use common::{
    CommandDispatcher, CommandTreeBuilder, EndOfStream, Event, ItemId, Key, KeyCode,
    PlaybackEngine, PlaybackPolicy, PlaybackState, Reporter, Session, StepBounds, Viewer,
};
use std::time::Duration;
use support::{statuses, FakeLoader, ManualScheduler, MemorySink};

struct Harness {
    viewer: Viewer,
    scheduler: ManualScheduler,
    loader: FakeLoader,
    sink: MemorySink,
    reports: tokio::sync::mpsc::UnboundedReceiver<common::Report>,
}

fn harness(loader: FakeLoader) -> Result<Harness> {
    let scheduler = ManualScheduler::default();
    let sink = MemorySink::default();
    let (reporter, reports) = Reporter::channel();
    let engine = PlaybackEngine::new(
        Box::new(scheduler.clone()),
        PlaybackPolicy::default(),
        reporter.clone(),
    );
    let session = Session::new(
        engine,
        Box::new(loader.clone()),
        Box::new(sink.clone()),
        reporter.clone(),
    );
    let viewer = Viewer::new(session, reporter)?;
    Ok(Harness {
        viewer,
        scheduler,
        loader,
        sink,
        reports,
    })
}

impl Harness {
    fn keys(&mut self, keys: &str) {
        for c in keys.chars() {
            self.viewer.handle_event(Event::Key {
                code: KeyCode::Char(c),
                shift: false,
            });
        }
    }

    fn enter(&mut self) {
        self.viewer.handle_event(Event::Key {
            code: KeyCode::Enter,
            shift: false,
        });
    }

    fn run_for(&mut self, elapsed: Duration) {
        for id in self.scheduler.advance(elapsed) {
            self.viewer.handle_event(Event::Tick(id));
        }
    }
}

#[test]
fn test_minimal_menu_loads_through_prompt() -> Result<()> {
    // Root menu with just the prompt and play/pause, wired by hand
    let mut builder = CommandTreeBuilder::new("main");
    let root = builder.root();
    builder.input(root, 'i', "get item", None, Key::is_digit, Session::load_item)?;
    builder.action(root, ' ', "play/stop", None, |s: &mut Session| s.engine_mut().play_pause())?;

    let loader = FakeLoader::default().with_item(7, 10);
    let scheduler = ManualScheduler::default();
    let (reporter, mut reports) = Reporter::channel();
    let engine = PlaybackEngine::new(Box::new(scheduler), PlaybackPolicy::default(), reporter.clone());
    let mut session = Session::new(
        engine,
        Box::new(loader.clone()),
        Box::new(MemorySink::default()),
        reporter.clone(),
    );
    let mut dispatcher = CommandDispatcher::new(builder.build(), reporter);

    dispatcher.handle_key(KeyCode::Char('i'), false, &mut session);
    dispatcher.handle_key(KeyCode::Char('7'), false, &mut session);
    dispatcher.handle_key(KeyCode::Enter, false, &mut session);

    assert_eq!(*loader.lookups.borrow(), vec![ItemId(7)]);
    assert_eq!(session.engine().frame_count(), 10);
    assert!(dispatcher.is_at_root());
    assert!(statuses(&mut reports).iter().any(|s| s.contains("Loaded item 7")));

    dispatcher.handle_key(KeyCode::Char(' '), false, &mut session);
    assert!(session.engine().is_playing());
    Ok(())
}

#[test]
fn test_unknown_item_reports_not_found_and_returns_to_root() -> Result<()> {
    let mut h = harness(FakeLoader::default())?;

    h.keys("i7");
    h.enter();

    assert_eq!(*h.loader.lookups.borrow(), vec![ItemId(7)]);
    assert!(h.viewer.dispatcher().is_at_root());
    assert_eq!(h.viewer.session().engine().state(), PlaybackState::Unbound);
    let statuses = statuses(&mut h.reports);
    assert!(statuses.iter().any(|s| s == "Item 7 not found"), "{:?}", statuses);
    Ok(())
}

#[test]
fn test_failed_lookup_keeps_current_item() -> Result<()> {
    let mut h = harness(FakeLoader::default().with_item(1, 5))?;
    h.keys("i1");
    h.enter();
    h.keys("kk");

    h.keys("i2");
    h.enter();

    let engine = h.viewer.session().engine();
    assert_eq!(engine.source().map(|s| s.item_id()), Some(ItemId(1)));
    assert_eq!(engine.current_index(), Some(2));
    Ok(())
}

#[test]
fn test_empty_prompt_reports_invalid_id() -> Result<()> {
    let mut h = harness(FakeLoader::default())?;
    h.keys("i");
    h.enter();

    assert!(h.loader.lookups.borrow().is_empty());
    assert!(statuses(&mut h.reports).iter().any(|s| s.starts_with("Invalid item id")));
    Ok(())
}

#[test]
fn test_play_to_the_end_through_the_event_queue() -> Result<()> {
    let mut h = harness(FakeLoader::default().with_item(3, 10))?;
    h.keys("i3");
    h.enter();
    h.keys(" ");
    assert!(h.viewer.session().engine().is_playing());

    h.run_for(Duration::from_secs(1));

    let engine = h.viewer.session().engine();
    assert_eq!(engine.current_index(), Some(9));
    assert!(!engine.is_playing());
    Ok(())
}

#[test]
fn test_loading_while_playing_stops_old_timer() -> Result<()> {
    let mut h = harness(FakeLoader::default().with_item(1, 30).with_item(2, 30))?;
    h.keys("i1");
    h.enter();
    h.keys(" ");
    h.run_for(Duration::from_millis(100));
    assert!(h.viewer.session().engine().current_index().unwrap() > 0);

    let stale = h.scheduler.advance(Duration::from_millis(100));
    h.keys("i2");
    h.enter();
    for id in stale {
        h.viewer.handle_event(Event::Tick(id));
    }

    let engine = h.viewer.session().engine();
    assert_eq!(engine.source().map(|s| s.item_id()), Some(ItemId(2)));
    assert_eq!(engine.current_index(), Some(0));
    assert!(!engine.is_playing());
    Ok(())
}

#[test]
fn test_save_pauses_writes_once_and_advances() -> Result<()> {
    let mut h = harness(FakeLoader::default().with_item(5, 4))?;
    h.keys("i5");
    h.enter();
    h.keys(" s");

    assert!(!h.viewer.session().engine().is_playing());
    assert_eq!(h.viewer.session().engine().current_index(), Some(1));

    // Saving frame 0 again is skipped, not overwritten
    h.keys("js");
    assert_eq!(*h.sink.saved.borrow(), vec![(ItemId(5), 0)]);
    assert_eq!(h.viewer.session().engine().current_index(), Some(1));
    Ok(())
}

#[test]
fn test_save_without_item_is_a_noop() -> Result<()> {
    let mut h = harness(FakeLoader::default())?;
    h.keys("s");
    assert!(h.sink.saved.borrow().is_empty());
    assert!(h.viewer.dispatcher().is_at_root());
    Ok(())
}

#[test]
fn test_goto_and_playback_submenu() -> Result<()> {
    let mut h = harness(FakeLoader::default().with_item(9, 20))?;
    h.keys("i9");
    h.enter();

    h.keys("g12");
    h.enter();
    assert_eq!(h.viewer.session().engine().current_index(), Some(12));

    h.keys("pl");
    h.keys("pw");
    let policy = h.viewer.session().engine().policy();
    assert_eq!(policy.end_of_stream, EndOfStream::Loop);
    assert_eq!(policy.step_bounds, StepBounds::Wrap);

    h.keys("pr");
    assert_eq!(h.viewer.session().engine().current_index(), Some(0));
    h.keys("j");
    assert_eq!(h.viewer.session().engine().current_index(), Some(19));
    assert!(h.viewer.dispatcher().is_at_root());
    Ok(())
}

#[test]
fn test_exit_stops_playback_and_ends_session() -> Result<()> {
    let mut h = harness(FakeLoader::default().with_item(1, 10))?;
    h.keys("i1");
    h.enter();
    h.keys(" ");
    assert!(!h.scheduler.armed().is_empty());

    h.keys("q");

    assert!(!h.viewer.is_running());
    assert!(!h.viewer.session().engine().is_playing());
    assert!(h.scheduler.armed().is_empty());
    Ok(())
}

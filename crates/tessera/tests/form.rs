//! Form lifecycle and frame loop, driven headlessly.

mod common;

use common::{Blip, services};
use parking_lot::Mutex;
use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};
use tessera::prelude::*;
use tessera::FormError;
use tessera_test_utils::{ManualClock, MockRenderBackend, MockWindow, MockWindowHandle};

#[derive(Default)]
struct Recorder {
    inits: usize,
    updates: usize,
    events: Vec<WindowEvent>,
    fail_init: bool,
    close_on_update: Option<usize>,
    spawn_blip: bool,
}

impl FormHandler for Recorder {
    fn init(&mut self, form: &mut Form) -> Result<(), InitError> {
        self.inits += 1;
        if self.fail_init {
            return Err(InitError::failed("recorder refused"));
        }
        if self.spawn_blip {
            form.create::<Blip>("blip")
                .ok_or_else(|| InitError::failed("no blip"))?;
        }
        Ok(())
    }

    fn update(&mut self, _form: &mut Form, ctx: &mut UpdateContext) {
        self.updates += 1;
        if self.close_on_update == Some(self.updates) {
            ctx.request_delete();
        }
    }

    fn window_event(&mut self, _form: &mut Form, event: &WindowEvent) {
        self.events.push(event.clone());
    }
}

struct Harness {
    backend: Arc<MockRenderBackend>,
    window: MockWindowHandle,
    form: Form,
}

fn harness(settings: FormSettings, configure: impl FnOnce(MockWindow) -> MockWindow) -> Harness {
    let backend = Arc::new(MockRenderBackend::new());
    let window = configure(MockWindow::new(backend.clone()));
    let handle = window.handle();
    let form = Form::new(settings, services(&backend), Box::new(window))
        .with_clock(Box::new(ManualClock::new(Duration::from_millis(10))));
    Harness {
        backend,
        window: handle,
        form,
    }
}

fn counter<S: ?Sized + 'static, A: ?Sized + 'static>(event: &Event<S, A>) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let sink = count.clone();
    event.subscribe(move |_, _| {
        sink.fetch_add(1, Ordering::SeqCst);
    });
    count
}

#[test]
fn test_open_runs_until_the_window_closes() {
    let mut h = harness(FormSettings::default(), |window| window.close_after(3));
    let opened = counter(&h.form.opened);
    let closed = counter(&h.form.closed);
    let mut recorder = Recorder::default();

    h.form.open(&mut recorder).unwrap();

    assert_eq!(h.form.frame(), 3);
    assert_eq!(recorder.inits, 1);
    assert_eq!(recorder.updates, 3);
    assert!(recorder.events.is_empty());
    assert_eq!(opened.load(Ordering::SeqCst), 1);
    assert_eq!(closed.load(Ordering::SeqCst), 1);
    assert!(!h.window.is_open());
    assert!(!h.form.is_open());
}

#[test]
fn test_window_uses_the_settings() {
    let settings = FormSettings::default()
        .with_title("Movers")
        .with_size(320, 200)
        .with_frame_limit(30);
    let mut h = harness(settings, |window| window);
    h.form.show(&mut Recorder::default()).unwrap();

    let descriptor = h.window.descriptor().unwrap();
    assert_eq!(descriptor.title, "Movers");
    assert_eq!(descriptor.size, UVec2::new(320, 200));
    assert_eq!(descriptor.frame_limit, 30);
    assert_eq!(h.form.surface().unwrap().size(), UVec2::new(320, 200));
}

#[test]
fn test_window_is_centered_on_the_monitor() {
    let mut h = harness(FormSettings::default(), |window| {
        window.with_monitor(UVec2::new(1920, 1080))
    });
    h.form.show(&mut Recorder::default()).unwrap();
    assert_eq!(h.window.position(), IVec2::new(710, 340));
}

#[test]
fn test_explicit_position_wins_over_centering() {
    let mut settings = FormSettings::default();
    settings.position = Some(IVec2::new(5, 8));
    let mut h = harness(settings, |window| window.with_monitor(UVec2::new(1920, 1080)));
    h.form.show(&mut Recorder::default()).unwrap();
    assert_eq!(h.window.position(), IVec2::new(5, 8));
}

#[test]
fn test_failing_window_is_a_backend_error() {
    let mut h = harness(FormSettings::default(), MockWindow::failing);
    let opened = counter(&h.form.opened);

    let err = h.form.open(&mut Recorder::default()).unwrap_err();
    assert!(matches!(err, FormError::Backend(_)));
    assert_eq!(opened.load(Ordering::SeqCst), 0);
    assert_eq!(h.form.frame(), 0);
}

#[test]
fn test_failing_init_never_opens_the_window() {
    let mut h = harness(FormSettings::default(), |window| window);
    let mut recorder = Recorder {
        fail_init: true,
        ..Recorder::default()
    };

    let err = h.form.open(&mut recorder).unwrap_err();
    assert!(matches!(err, FormError::Init(_)));
    assert_eq!(h.window.opens(), 0);
}

#[test]
fn test_init_runs_once_across_reopen() {
    let mut h = harness(FormSettings::default(), |window| window.close_after(1));
    let mut recorder = Recorder::default();
    h.form.open(&mut recorder).unwrap();
    h.form.show(&mut recorder).unwrap();

    assert_eq!(recorder.inits, 1);
    assert_eq!(h.window.opens(), 2);
}

#[test]
fn test_first_frame_presents_then_idles() {
    let mut h = harness(FormSettings::default(), |window| window);
    h.form.show(&mut Recorder::default()).unwrap();
    let surface = h.form.surface().cloned().unwrap();

    assert!(h.form.run_frame(&mut Recorder::default()));
    assert_eq!(h.backend.presents_of(&surface), 1);
    assert_eq!(h.backend.clears_of(&surface), 1);
    assert!(!h.form.is_dirty());

    h.backend.clear_calls();
    assert!(h.form.run_frame(&mut Recorder::default()));
    assert_eq!(h.backend.call_count(), 0);
}

#[test]
fn test_moving_a_child_recomposites_the_form() {
    let mut h = harness(FormSettings::default(), |window| window);
    let mut recorder = Recorder {
        spawn_blip: true,
        ..Recorder::default()
    };
    h.form.show(&mut recorder).unwrap();
    h.form.run_frame(&mut recorder);
    h.backend.clear_calls();

    let id = h.form.owner().get_all::<Blip>()[0].core().id();
    let blip = h.form.owner_mut().get_as_mut::<Blip>(id).unwrap();
    blip.view_mut().set_position(Vec2::new(40.0, 30.0));
    let child_surface = blip.view().surface().cloned().unwrap();
    assert!(h.form.is_dirty());

    h.form.run_frame(&mut recorder);
    let form_surface = h.form.surface().cloned().unwrap();
    assert_eq!(h.backend.presents_of(&form_surface), 1);
    assert_eq!(h.backend.presents_of(&child_surface), 0);
    assert_eq!(
        h.backend.composites_onto(&form_surface),
        [(child_surface.id(), Vec2::new(40.0, 30.0))]
    );
}

#[test]
fn test_window_events_reach_the_handler() {
    let mut h = harness(FormSettings::default(), |window| window);
    let resizes = Arc::new(Mutex::new(Vec::new()));
    let sink = resizes.clone();
    h.form
        .size_changed
        .subscribe(move |_, size| sink.lock().push(*size));
    let mut recorder = Recorder::default();
    h.form.show(&mut recorder).unwrap();

    h.window.push_event(WindowEvent::KeyPressed(4));
    h.window.push_event(WindowEvent::Resized(UVec2::new(800, 600)));
    h.form.run_frame(&mut recorder);

    assert_eq!(
        recorder.events,
        [
            WindowEvent::KeyPressed(4),
            WindowEvent::Resized(UVec2::new(800, 600)),
        ]
    );
    assert_eq!(h.form.size(), UVec2::new(800, 600));
    assert_eq!(*resizes.lock(), [UVec2::new(800, 600)]);
}

#[test]
fn test_closed_event_ends_the_cycle() {
    let mut h = harness(FormSettings::default(), |window| window);
    let mut recorder = Recorder::default();
    h.form.show(&mut recorder).unwrap();

    h.window.push_event(WindowEvent::Closed);
    h.window.push_event(WindowEvent::FocusLost);
    assert!(!h.form.run_frame(&mut recorder));

    assert_eq!(recorder.updates, 0);
    assert!(recorder.events.is_empty());
    assert_eq!(h.form.frame(), 0);
}

#[test]
fn test_delete_request_from_handler_closes_the_form() {
    let mut h = harness(FormSettings::default(), |window| window);
    let closed = counter(&h.form.closed);
    let mut recorder = Recorder {
        close_on_update: Some(2),
        ..Recorder::default()
    };

    h.form.open(&mut recorder).unwrap();
    assert_eq!(recorder.updates, 2);
    assert_eq!(h.form.frame(), 1);
    assert_eq!(closed.load(Ordering::SeqCst), 1);
}

#[test]
fn test_setters_raise_events_only_on_change() {
    let mut h = harness(FormSettings::default(), |window| window);
    let titles = Arc::new(Mutex::new(Vec::new()));
    let sink = titles.clone();
    h.form
        .title_changed
        .subscribe(move |_, title| sink.lock().push(title.to_owned()));
    let backgrounds = counter(&h.form.background_changed);
    h.form.show(&mut Recorder::default()).unwrap();

    h.form.set_title("Tessera");
    h.form.set_title("Renamed");
    assert_eq!(*titles.lock(), ["Renamed"]);
    assert_eq!(h.window.title(), "Renamed");

    h.form.run_frame(&mut Recorder::default());
    h.form.set_background(h.form.background());
    assert!(!h.form.is_dirty());
    h.form.set_background(Color::WHITE);
    assert!(h.form.is_dirty());
    assert_eq!(backgrounds.load(Ordering::SeqCst), 1);

    h.form.set_size(UVec2::new(640, 480));
    assert_eq!(h.window.size(), UVec2::new(640, 480));
}

#[test]
fn test_frame_limit_sleeps_the_spare_time() {
    let settings = FormSettings::default().with_frame_limit(50);
    let mut h = harness(settings, |window| window);
    h.form.show(&mut Recorder::default()).unwrap();

    h.form.run_frame(&mut Recorder::default());
    let profile = h.form.time_profile();
    assert_eq!(profile.cycle, Duration::from_millis(10));
    assert_eq!(profile.spare, Duration::from_millis(10));
}

#[test]
fn test_unlimited_frame_rate_never_sleeps() {
    let settings = FormSettings::default().with_frame_limit(0);
    let mut h = harness(settings, |window| window);
    h.form.show(&mut Recorder::default()).unwrap();

    h.form.run_frame(&mut Recorder::default());
    assert_eq!(h.form.time_profile().spare, Duration::ZERO);
}

#[test]
fn test_counts_include_children() {
    let mut h = harness(FormSettings::default().with_plot_stats(true), |window| {
        window.close_after(2)
    });
    let mut recorder = Recorder {
        spawn_blip: true,
        ..Recorder::default()
    };
    h.form.open(&mut recorder).unwrap();

    let counts = h.form.counts();
    assert_eq!(counts.objects, 1);
    assert_eq!(counts.updatables, 1);
    assert_eq!(counts.drawables, 1);
    assert_eq!(h.form.owner().get_all::<Blip>()[0].updates, 2);
}

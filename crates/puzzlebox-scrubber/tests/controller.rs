use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use puzzlebox_scrubber::{
    HostError, Key, ListenerId, ListenerScope, MediaHost, Phase, Platform, ScrubberConfig,
    ScrubberController, TimerId, TrackRect,
};

#[derive(Debug, Default)]
struct HostLog {
    current_time: f64,
    duration: f64,
    play_calls: usize,
    pause_calls: usize,
    fullscreen: bool,
    fullscreen_requests: usize,
    deny_fullscreen: bool,
    reject_play: bool,
}

#[derive(Clone)]
struct FakeHost(Rc<RefCell<HostLog>>);

impl MediaHost for FakeHost {
    fn current_time(&self) -> f64 {
        self.0.borrow().current_time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.0.borrow_mut().current_time = seconds;
    }

    fn duration(&self) -> f64 {
        self.0.borrow().duration
    }

    fn play(&mut self) -> Result<(), HostError> {
        let mut log = self.0.borrow_mut();
        log.play_calls += 1;
        if log.reject_play {
            return Err(HostError::PlayRejected("autoplay blocked".to_string()));
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.0.borrow_mut().pause_calls += 1;
    }

    fn is_fullscreen(&self) -> bool {
        self.0.borrow().fullscreen
    }

    fn request_fullscreen(&mut self) -> Result<(), HostError> {
        let mut log = self.0.borrow_mut();
        log.fullscreen_requests += 1;
        if log.deny_fullscreen {
            return Err(HostError::FullscreenDenied("permission denied".to_string()));
        }
        log.fullscreen = true;
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), HostError> {
        self.0.borrow_mut().fullscreen = false;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct PlatformLog {
    next_id: u64,
    scheduled: Vec<(TimerId, Duration)>,
    cancelled: Vec<TimerId>,
    attached: Vec<(ListenerId, ListenerScope)>,
    detached: Vec<ListenerId>,
}

impl PlatformLog {
    fn active(&self, scope: ListenerScope) -> usize {
        self.attached
            .iter()
            .filter(|(id, s)| *s == scope && !self.detached.contains(id))
            .count()
    }

    fn last_timer(&self) -> TimerId {
        self.scheduled.last().map(|(id, _)| *id).unwrap()
    }
}

#[derive(Clone)]
struct FakePlatform(Rc<RefCell<PlatformLog>>);

impl Platform for FakePlatform {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        let mut log = self.0.borrow_mut();
        log.next_id += 1;
        let id = TimerId(log.next_id);
        log.scheduled.push((id, delay));
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.0.borrow_mut().cancelled.push(id);
    }

    fn attach(&mut self, scope: ListenerScope) -> ListenerId {
        let mut log = self.0.borrow_mut();
        log.next_id += 1;
        let id = ListenerId(log.next_id);
        log.attached.push((id, scope));
        id
    }

    fn detach(&mut self, id: ListenerId) {
        self.0.borrow_mut().detached.push(id);
    }
}

struct Harness {
    host: Rc<RefCell<HostLog>>,
    platform: Rc<RefCell<PlatformLog>>,
    scrubber: ScrubberController<FakeHost, FakePlatform>,
}

fn harness(config: ScrubberConfig, duration: f64) -> Harness {
    let host = Rc::new(RefCell::new(HostLog {
        duration,
        ..Default::default()
    }));
    let platform = Rc::new(RefCell::new(PlatformLog::default()));
    let scrubber = ScrubberController::mount(
        FakeHost(Rc::clone(&host)),
        FakePlatform(Rc::clone(&platform)),
        config,
    );
    Harness {
        host,
        platform,
        scrubber,
    }
}

fn playing(looping: bool) -> ScrubberConfig {
    ScrubberConfig {
        autoplay: true,
        looping,
        ..Default::default()
    }
}

fn paused() -> ScrubberConfig {
    ScrubberConfig {
        autoplay: false,
        ..Default::default()
    }
}

#[test]
fn time_update_sets_progress_from_position() {
    let mut h = harness(playing(true), 120.0);

    for (current, duration) in [(0.0, 120.0), (30.0, 120.0), (59.5, 60.0), (7.0, 9.0)] {
        h.scrubber.on_host_time_update(current, duration);
        assert_eq!(
            h.scrubber.state().progress_percent(),
            100.0 * current / duration
        );
    }
}

#[test]
fn time_update_refreshes_readout() {
    let mut h = harness(playing(true), 125.0);

    h.scrubber.on_host_time_update(65.0, 125.0);

    assert_eq!(h.scrubber.state().readout(), "1:05 / 2:05");
    assert_eq!(h.scrubber.view().readout, "1:05 / 2:05");
}

#[test]
fn seek_clamps_to_track_range() {
    let mut h = harness(paused(), 200.0);

    for (requested, expected) in [(-25.0, 0.0), (0.0, 0.0), (42.0, 42.0), (100.0, 100.0), (250.0, 100.0)] {
        h.scrubber.seek_to(requested);
        assert_eq!(h.scrubber.state().progress_percent(), expected);
        assert_eq!(h.host.borrow().current_time, expected / 100.0 * 200.0);
    }
}

#[test]
fn end_seek_without_drag_changes_nothing() {
    let mut h = harness(playing(true), 60.0);
    h.scrubber.on_host_time_update(15.0, 60.0);
    let before = h.scrubber.state().clone();

    h.scrubber.end_seek();

    assert_eq!(h.scrubber.state(), &before);
    assert_eq!(h.host.borrow().play_calls, 0);
}

#[test]
fn host_updates_are_ignored_during_drag() {
    let mut h = harness(playing(true), 100.0);

    h.scrubber.begin_seek(70.0);
    for t in [1.0, 20.0, 99.0] {
        h.scrubber.on_host_time_update(t, 100.0);
        assert_eq!(h.scrubber.state().progress_percent(), 70.0);
    }

    h.scrubber.end_seek();
    h.scrubber.on_host_time_update(71.0, 100.0);
    assert_eq!(h.scrubber.state().progress_percent(), 71.0);
}

#[test]
fn drag_resumes_playback_once() {
    let mut h = harness(playing(true), 100.0);

    h.scrubber.begin_seek(10.0);
    assert_eq!(h.scrubber.state().phase(), Phase::Dragging { was_playing: true });
    assert!(!h.scrubber.state().is_playing());
    assert_eq!(h.host.borrow().pause_calls, 1);

    h.scrubber.update_seek(20.0);
    h.scrubber.update_seek(30.0);
    h.scrubber.end_seek();

    assert!(h.scrubber.state().is_playing());
    assert_eq!(h.host.borrow().play_calls, 1);
}

#[test]
fn drag_from_paused_stays_paused() {
    let mut h = harness(paused(), 100.0);

    h.scrubber.begin_seek(50.0);
    h.scrubber.end_seek();

    assert!(!h.scrubber.state().is_playing());
    assert_eq!(h.host.borrow().play_calls, 0);
    assert_eq!(h.host.borrow().pause_calls, 0);
}

#[test]
fn looping_end_restarts_playback() {
    let mut h = harness(playing(true), 30.0);

    h.scrubber.on_host_ended();

    assert_eq!(h.host.borrow().play_calls, 1);
    assert!(h.scrubber.state().is_playing());
}

#[test]
fn non_looping_end_stops() {
    let mut h = harness(playing(false), 30.0);

    h.scrubber.on_host_ended();

    assert_eq!(h.host.borrow().play_calls, 0);
    assert!(!h.scrubber.state().is_playing());
}

#[test]
fn drag_past_left_edge_clamps_to_zero() {
    let mut h = harness(playing(true), 100.0);
    let track = TrackRect::new(200.0, 400.0);

    h.scrubber.track_pointer_down(400.0, track);
    assert_eq!(h.scrubber.state().progress_percent(), 50.0);

    h.scrubber.track_pointer_leave();
    h.scrubber.global_pointer_move(20.0, track);

    assert_eq!(h.scrubber.state().progress_percent(), 0.0);
    assert!(h.scrubber.state().is_dragging());
}

#[test]
fn unknown_duration_leaves_progress() {
    let mut h = harness(playing(true), f64::NAN);
    h.scrubber.on_host_time_update(10.0, 40.0);

    h.scrubber.on_host_time_update(5.0, f64::NAN);
    assert_eq!(h.scrubber.state().progress_percent(), 25.0);

    h.scrubber.on_host_time_update(5.0, 0.0);
    assert_eq!(h.scrubber.state().progress_percent(), 25.0);
}

#[test]
fn seek_with_unknown_duration_does_not_move_host() {
    let mut h = harness(paused(), f64::NAN);

    h.scrubber.seek_to(40.0);

    assert_eq!(h.scrubber.state().progress_percent(), 40.0);
    assert_eq!(h.host.borrow().current_time, 0.0);
}

#[test]
fn duration_is_recorded_once_known() {
    let mut h = harness(paused(), f64::NAN);

    h.scrubber.on_host_duration_known(f64::NAN);
    assert_eq!(h.scrubber.state().duration_seconds(), None);

    h.scrubber.on_host_duration_known(12.0);
    h.scrubber.on_host_duration_known(12.0);
    assert_eq!(h.scrubber.state().duration_seconds(), Some(12.0));
}

#[test]
fn seek_suppresses_transitions_for_cooldown() {
    let config = ScrubberConfig {
        transition_cooldown_ms: 80,
        ..paused()
    };
    let mut h = harness(config, 100.0);

    h.scrubber.seek_to(30.0);
    assert!(!h.scrubber.state().transitions_enabled());

    let (timer, delay) = h.platform.borrow().scheduled[0];
    assert_eq!(delay, Duration::from_millis(80));

    h.scrubber.on_timer(timer);
    assert!(h.scrubber.state().transitions_enabled());
}

#[test]
fn new_seek_cancels_pending_reenable() {
    let mut h = harness(paused(), 100.0);

    h.scrubber.seek_to(10.0);
    let first = h.platform.borrow().last_timer();
    h.scrubber.seek_to(20.0);
    let second = h.platform.borrow().last_timer();

    assert_eq!(h.platform.borrow().cancelled, vec![first]);

    h.scrubber.on_timer(first);
    assert!(!h.scrubber.state().transitions_enabled());

    h.scrubber.on_timer(second);
    assert!(h.scrubber.state().transitions_enabled());
}

#[test]
fn global_listeners_live_for_one_drag() {
    let mut h = harness(playing(true), 100.0);
    assert_eq!(h.platform.borrow().active(ListenerScope::Host), 1);
    assert_eq!(h.platform.borrow().active(ListenerScope::Global), 0);

    h.scrubber.begin_seek(5.0);
    assert_eq!(h.platform.borrow().active(ListenerScope::Global), 1);

    h.scrubber.global_pointer_up();
    assert_eq!(h.platform.borrow().active(ListenerScope::Global), 0);
}

#[test]
fn unmount_releases_everything() {
    let h = harness(playing(true), 100.0);
    let platform = Rc::clone(&h.platform);
    let mut scrubber = h.scrubber;

    scrubber.begin_seek(40.0);
    let pending = platform.borrow().last_timer();
    scrubber.unmount();

    let log = platform.borrow();
    assert_eq!(log.active(ListenerScope::Host), 0);
    assert_eq!(log.active(ListenerScope::Global), 0);
    assert!(log.cancelled.contains(&pending));
}

#[test]
fn hover_is_independent_of_position() {
    let mut h = harness(paused(), 100.0);
    let track = TrackRect::new(0.0, 200.0);
    h.scrubber.seek_to(10.0);

    h.scrubber.track_pointer_move(150.0, track);
    assert_eq!(h.scrubber.state().hover_percent(), Some(75.0));
    assert_eq!(h.scrubber.state().progress_percent(), 10.0);
    assert_eq!(h.host.borrow().current_time, 10.0);

    h.scrubber.clear_hover();
    assert_eq!(h.scrubber.state().hover_percent(), None);
}

#[test]
fn leaving_track_hides_hover_but_keeps_drag() {
    let mut h = harness(playing(true), 100.0);
    let track = TrackRect::new(0.0, 100.0);

    h.scrubber.track_pointer_down(30.0, track);
    h.scrubber.track_pointer_move(30.0, track);
    h.scrubber.track_pointer_leave();

    assert_eq!(h.scrubber.state().hover_percent(), None);
    assert!(h.scrubber.state().is_dragging());
}

#[test]
fn toggle_play_is_ignored_during_drag() {
    let mut h = harness(playing(true), 100.0);

    h.scrubber.begin_seek(50.0);
    h.scrubber.toggle_play();

    assert!(h.scrubber.state().is_dragging());
    assert_eq!(h.host.borrow().play_calls, 0);
}

#[test]
fn toggle_play_flips_host_state() {
    let mut h = harness(paused(), 100.0);

    h.scrubber.toggle_play();
    assert!(h.scrubber.state().is_playing());
    assert_eq!(h.host.borrow().play_calls, 1);

    h.scrubber.toggle_play();
    assert!(!h.scrubber.state().is_playing());
    assert_eq!(h.host.borrow().pause_calls, 1);
}

#[test]
fn rejected_play_leaves_scrubber_paused() {
    let mut h = harness(paused(), 100.0);
    h.host.borrow_mut().reject_play = true;

    h.scrubber.toggle_play();

    assert!(!h.scrubber.state().is_playing());
    assert_eq!(h.scrubber.view().play_label, "Play");
}

#[test]
fn fullscreen_failure_is_swallowed() {
    let mut h = harness(playing(true), 100.0);
    h.host.borrow_mut().deny_fullscreen = true;
    let before = h.scrubber.state().clone();

    h.scrubber.toggle_fullscreen();

    assert_eq!(h.host.borrow().fullscreen_requests, 1);
    assert!(!h.host.borrow().fullscreen);
    assert_eq!(h.scrubber.state(), &before);
}

#[test]
fn fullscreen_toggles_both_ways() {
    let mut h = harness(playing(true), 100.0);

    h.scrubber.toggle_fullscreen();
    assert!(h.host.borrow().fullscreen);

    h.scrubber.toggle_fullscreen();
    assert!(!h.host.borrow().fullscreen);
}

#[test]
fn keyboard_activates_controls() {
    let mut h = harness(paused(), 100.0);

    h.scrubber.play_control_key(Key::Other);
    assert!(!h.scrubber.state().is_playing());

    h.scrubber.play_control_key(Key::Space);
    assert!(h.scrubber.state().is_playing());

    h.scrubber.play_control_key(Key::Enter);
    assert!(!h.scrubber.state().is_playing());

    h.scrubber.fullscreen_control_key(Key::from_dom("Enter"));
    assert!(h.host.borrow().fullscreen);
}

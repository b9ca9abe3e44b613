use std::time::Instant;

use metrognome::{
    AudioClock, ManualClock, PulseEvent, PulseKind, Scheduler, SchedulerConfig, TapTempo,
};

/// Wake-up period of the default config, in seconds
const WAKE: f64 = 0.025;

type Recording = Scheduler<ManualClock, Vec<PulseEvent>>;

fn recording(config: SchedulerConfig) -> Recording {
    Scheduler::with_config(ManualClock::new(), Vec::new(), config).unwrap()
}

/// Simulate `seconds` of regular wake-ups
fn run_for(scheduler: &mut Recording, seconds: f64) {
    let steps = (seconds / WAKE).round() as usize;
    for _ in 0..steps {
        scheduler.advance().unwrap();
        scheduler.clock_mut().advance(WAKE);
    }
}

fn times(events: &[PulseEvent]) -> Vec<f64> {
    events.iter().map(|e| e.time).collect()
}

#[test]
fn timestamps_strictly_increase_across_tempo_and_meter_changes() {
    let mut scheduler = recording(SchedulerConfig::default());
    scheduler.start().unwrap();

    run_for(&mut scheduler, 2.0);
    scheduler.set_tempo(173.0).unwrap();
    scheduler.set_subdivision(3).unwrap();
    run_for(&mut scheduler, 2.0);
    scheduler.set_meter(2).unwrap();
    scheduler.set_tempo(61.5).unwrap();
    run_for(&mut scheduler, 3.0);

    let times = times(scheduler.listener());
    assert!(times.len() > 20);
    for pair in times.windows(2) {
        assert!(pair[1] > pair[0], "{} then {}", pair[0], pair[1]);
    }

    // Audio and visual outputs agree one-to-one
    let tones = scheduler.clock().tones();
    assert_eq!(tones.len(), times.len());
    for (tone, event) in tones.iter().zip(scheduler.listener()) {
        assert_eq!(tone.start_time, event.time);
        assert_eq!(tone.frequency, event.kind.frequency());
    }
}

#[test]
fn interval_matches_tempo_and_subdivision() {
    for tempo in [30.0, 60.0, 97.3, 120.0, 240.0, 1200.0] {
        for subdivision in 1..=4 {
            let mut scheduler = recording(SchedulerConfig {
                tempo_bpm: tempo,
                subdivision,
                ..Default::default()
            });
            scheduler.start().unwrap();
            run_for(&mut scheduler, 6.0);

            let expected = 60.0 / (tempo * subdivision as f64);
            let times = times(scheduler.listener());
            assert!(times.len() >= 2, "tempo {tempo} sub {subdivision}");
            for pair in times.windows(2) {
                let interval = pair[1] - pair[0];
                assert!(
                    (interval - expected).abs() < 1e-9,
                    "tempo {tempo} sub {subdivision}: {interval} != {expected}"
                );
            }
        }
    }
}

#[test]
fn indices_wrap_every_measure() {
    let mut scheduler = recording(SchedulerConfig {
        beats_per_measure: 4,
        subdivision: 2,
        ..Default::default()
    });
    scheduler.start().unwrap();
    run_for(&mut scheduler, 5.0);

    let events = scheduler.listener();
    assert!(events.len() >= 16);
    for (n, event) in events.iter().enumerate() {
        let expected = (n % 8) as u32;
        assert_eq!(event.index, expected);

        let kind = match expected {
            0 => PulseKind::MeasureStart,
            i if i % 2 == 0 => PulseKind::Beat,
            _ => PulseKind::Subdivision,
        };
        assert_eq!(event.kind, kind, "pulse {n}");
    }
}

#[test]
fn one_advance_fills_exactly_the_window() {
    // Cursor starts at clock time 0, window is 0.1s
    let config = SchedulerConfig {
        startup_offset: 0.0,
        ..Default::default()
    };

    let mut slow = recording(SchedulerConfig {
        tempo_bpm: 120.0,
        ..config.clone()
    });
    slow.start().unwrap();
    assert_eq!(slow.advance().unwrap(), 1);

    let mut fast = recording(SchedulerConfig {
        tempo_bpm: 1200.0,
        ..config
    });
    fast.start().unwrap();
    assert!(fast.advance().unwrap() >= 2);
    assert!(fast
        .listener()
        .iter()
        .all(|event| event.time < 0.1));
}

#[test]
fn redundant_start_and_stop_are_no_ops() {
    let mut scheduler = recording(SchedulerConfig::default());
    let t0 = Instant::now();
    scheduler.start_at(t0).unwrap();
    scheduler.advance().unwrap();

    let handle = *scheduler.poll_handle().unwrap();
    let cursor = scheduler.next_event_time();
    let index = scheduler.current_pulse_index();

    scheduler.clock_mut().advance(1.0);
    scheduler.start().unwrap();
    assert!(scheduler.is_running());
    assert_eq!(*scheduler.poll_handle().unwrap(), handle);
    assert_eq!(scheduler.next_event_time(), cursor);
    assert_eq!(scheduler.current_pulse_index(), index);

    scheduler.stop();
    scheduler.stop();
    assert!(!scheduler.is_running());
    assert!(scheduler.poll_handle().is_none());
    assert_eq!(scheduler.next_event_time(), cursor);
}

#[test]
fn tempo_change_applies_from_next_increment() {
    let mut scheduler = recording(SchedulerConfig::default());
    scheduler.start().unwrap();
    run_for(&mut scheduler, 1.2);

    let before: Vec<f64> = times(scheduler.listener());
    let last = *before.last().unwrap();
    // The cursor was already advanced at the old tempo
    assert!((scheduler.next_event_time() - (last + 0.5)).abs() < 1e-9);

    scheduler.set_tempo(60.0).unwrap();
    run_for(&mut scheduler, 3.0);

    let after = times(scheduler.listener());
    assert_eq!(&after[..before.len()], &before[..]);

    let new = &after[before.len()..];
    assert!(new.len() >= 2);
    assert!((new[0] - (last + 0.5)).abs() < 1e-9);
    for pair in new.windows(2) {
        assert!((pair[1] - pair[0] - 1.0).abs() < 1e-9);
    }
}

#[test]
fn tap_tempo_window_averages_recent_taps() {
    let mut tap = TapTempo::new();
    let mut bpm = None;
    for i in 0..9 {
        bpm = tap.tap(500.0 * i as f64);
    }
    assert_eq!(tap.len(), 8);
    let bpm = bpm.unwrap();
    assert!((bpm - 120.0).abs() < 1e-9);

    let mut scheduler = Scheduler::new(ManualClock::new());
    scheduler.set_tempo(bpm.round()).unwrap();
    assert_eq!(scheduler.tempo(), 120.0);
}

#[test]
fn instances_do_not_interfere() {
    let mut a = recording(SchedulerConfig::default());
    let mut b = recording(SchedulerConfig {
        tempo_bpm: 90.0,
        beats_per_measure: 3,
        ..Default::default()
    });

    a.start().unwrap();
    run_for(&mut a, 2.0);
    b.set_tempo(200.0).unwrap();
    assert_eq!(a.tempo(), 120.0);
    assert!(!b.is_running());
    assert!(b.listener().is_empty());
    assert!(b.clock().tones().is_empty());

    a.stop();
    b.start().unwrap();
    assert!(!a.is_running());
    assert!(b.is_running());
}

#[test]
fn clock_loss_reports_audio_unavailable() {
    let mut scheduler = recording(SchedulerConfig::default());
    scheduler.start().unwrap();
    run_for(&mut scheduler, 1.0);
    let emitted = scheduler.listener().len();

    scheduler.clock_mut().disconnect();
    let err = scheduler.advance().unwrap_err();
    assert!(matches!(err, metrognome::Error::AudioUnavailable(_)));
    assert!(!scheduler.is_running());
    assert_eq!(scheduler.listener().len(), emitted);

    // Restart needs a working clock
    assert!(scheduler.start().is_err());
    assert!(!scheduler.is_running());
    assert!(scheduler.clock().now().is_err());
}

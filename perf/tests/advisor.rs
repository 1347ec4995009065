use pretty_assertions::assert_eq;
use std::rc::Rc;
use std::time::Duration;
use studio_perf::AdvisorConfig;
use studio_perf::OptimizationLevel;
use studio_perf::PerformanceAdvisor;
use studio_perf::clock::ManualClock;
use studio_perf::probe::StaticProbe;

type Advisor = PerformanceAdvisor<Rc<ManualClock>>;

fn advisor() -> (Advisor, Rc<ManualClock>) {
    let clock = Rc::new(ManualClock::new());
    let advisor = PerformanceAdvisor::new(AdvisorConfig::default(), Rc::clone(&clock));
    (advisor, clock)
}

/// Render one second at `fps` frames per second and return what the final
/// frame measured.
fn render_window(advisor: &mut Advisor, clock: &ManualClock, fps: u32) -> Option<u32> {
    let frame = Duration::from_micros(u64::from(1_000_000u32.div_ceil(fps)));
    let mut measured = None;
    for _ in 0..fps {
        clock.advance(frame);
        measured = advisor.sample_frame();
    }
    measured
}

#[test]
fn window_closes_after_one_second() {
    let (mut advisor, clock) = advisor();
    for _ in 0..29 {
        clock.advance(Duration::from_millis(33));
        assert_eq!(advisor.sample_frame(), None);
    }
    clock.advance(Duration::from_millis(43));
    assert_eq!(advisor.sample_frame(), Some(30));
    assert_eq!(advisor.fps(), 30);
    assert_eq!(advisor.level(), OptimizationLevel::Low);
}

#[test]
fn sustained_low_fps_drops_to_low() {
    let (mut advisor, clock) = advisor();
    for _ in 0..3 {
        assert_eq!(render_window(&mut advisor, &clock, 20), Some(20));
        assert_eq!(advisor.level(), OptimizationLevel::Low);
    }
}

#[test]
fn one_good_window_does_not_upgrade() {
    let (mut advisor, clock) = advisor();
    render_window(&mut advisor, &clock, 20);
    assert_eq!(render_window(&mut advisor, &clock, 60), Some(60));
    assert_eq!(advisor.level(), OptimizationLevel::Low);
}

#[test]
fn sustained_good_fps_restores_high() {
    let (mut advisor, clock) = advisor();
    for _ in 0..3 {
        render_window(&mut advisor, &clock, 20);
    }
    render_window(&mut advisor, &clock, 60);
    render_window(&mut advisor, &clock, 60);
    assert_eq!(advisor.level(), OptimizationLevel::Low);
    render_window(&mut advisor, &clock, 60);
    assert_eq!(advisor.level(), OptimizationLevel::High);
}

#[test]
fn medium_band_downgrades_from_high() {
    let (mut advisor, clock) = advisor();
    assert_eq!(render_window(&mut advisor, &clock, 50), Some(50));
    assert_eq!(advisor.level(), OptimizationLevel::Medium);
    assert_eq!(render_window(&mut advisor, &clock, 45), Some(45));
    assert_eq!(advisor.level(), OptimizationLevel::Medium);
}

#[test]
fn particles_scale_down_with_level() {
    let (mut advisor, clock) = advisor();
    let high = advisor.optimal_particle_count(100);
    render_window(&mut advisor, &clock, 20);
    let low = advisor.optimal_particle_count(100);
    assert_eq!(high, 100);
    assert!(low < high);
}

#[test]
fn probe_signals_are_optional() {
    let (mut advisor, clock) = advisor();
    let class = advisor.detect_device_class(&StaticProbe::default()).clone();
    assert!(!class.is_low_end);
    assert_eq!(advisor.level(), OptimizationLevel::High);
    assert_eq!(render_window(&mut advisor, &clock, 60), Some(60));
}

#[test]
fn config_thresholds_are_honoured() {
    let clock = Rc::new(ManualClock::new());
    let config = AdvisorConfig {
        upgrade_windows: 1,
        ..Default::default()
    };
    let mut advisor = PerformanceAdvisor::new(config, Rc::clone(&clock));
    render_window(&mut advisor, &clock, 20);
    render_window(&mut advisor, &clock, 60);
    assert_eq!(advisor.level(), OptimizationLevel::High);
}

#[test]
fn outputs_serialize_with_wire_names() {
    let (mut advisor, clock) = advisor();
    let probe = StaticProbe {
        memory_gb: Some(2.0),
        network: Some("slow-2g".into()),
        ..Default::default()
    };
    advisor.detect_device_class(&probe);
    render_window(&mut advisor, &clock, 20);

    let device = serde_json::to_value(advisor.device()).unwrap();
    assert_eq!(device["network"], "slow-2g");
    assert_eq!(device["is_low_end"], true);
    assert_eq!(device["cores"], serde_json::Value::Null);

    let animation = serde_json::to_value(advisor.animation_config()).unwrap();
    assert_eq!(
        animation,
        serde_json::json!({
            "duration_seconds": 0.0,
            "easing_curve": "linear",
            "skip_animations": true,
        })
    );
    assert_eq!(serde_json::to_value(advisor.level()).unwrap(), "low");
}

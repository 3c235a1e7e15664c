//! Property tests: the mapping engine is total, bounded, monotonic and pure.

use proptest::prelude::*;
use syssonic::config::MappingConfig;
use syssonic::mapping::{
    BassRegister, MappingEngine, MELODY_SCALE, CUTOFF_MAX_HZ, CUTOFF_MIN_HZ, REVERB_MAX_PERCENT,
    TEMPO_MAX_BPM, TEMPO_MIN_BPM,
};
use syssonic::metrics::{
    BatteryReading, BatteryState, ExtendedMetrics, GpuReading, LoadAverage, ProcessReading,
    SwapUsage,
};
use syssonic::SystemMetrics;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Any f64, including NaN and infinities.
fn any_reading() -> impl Strategy<Value = f64> {
    prop_oneof![
        4 => -1.0e6..1.0e6f64,
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
        1 => Just(f64::NEG_INFINITY),
        1 => Just(f64::MAX),
        1 => Just(f64::MIN),
    ]
}

/// Snapshots from a faulty source: anything goes.
fn arb_metrics() -> impl Strategy<Value = SystemMetrics> {
    (
        any_reading(),
        any_reading(),
        any::<u64>(),
        any::<u64>(),
        any::<u64>(),
        any::<u64>(),
        any_reading(),
    )
        .prop_map(|(cpu, memory, dr, dw, rx, tx, temp)| SystemMetrics {
            cpu_usage: cpu,
            memory_usage: memory,
            disk_read_bytes: dr,
            disk_write_bytes: dw,
            network_rx_bytes: rx,
            network_tx_bytes: tx,
            temperature: temp,
        })
}

fn arb_battery_state() -> impl Strategy<Value = BatteryState> {
    prop_oneof![
        Just(BatteryState::Charging),
        Just(BatteryState::Discharging),
        Just(BatteryState::Full),
        Just(BatteryState::Empty),
        Just(BatteryState::Unknown),
    ]
}

/// Optional readings, each present or absent, with faulty values allowed.
fn arb_extended() -> impl Strategy<Value = ExtendedMetrics> {
    (
        proptest::option::of((any_reading(), any_reading(), any::<u64>(), any::<u64>())),
        proptest::option::of((any_reading(), any_reading(), any_reading())),
        proptest::option::of((any::<u64>(), any::<u64>())),
        proptest::option::of((any_reading(), arb_battery_state())),
        proptest::collection::vec(any_reading(), 0..16),
        proptest::option::of(any::<usize>()),
        proptest::collection::vec(("[a-z]{1,8}", any_reading()), 0..5),
        proptest::collection::vec(any::<u32>(), 0..4),
    )
        .prop_map(|(gpu, load, swap, battery, cores, count, processes, fans)| ExtendedMetrics {
            gpu: gpu.map(|(utilization, temperature, used, total)| GpuReading {
                utilization,
                temperature,
                memory_used_bytes: used,
                memory_total_bytes: total,
            }),
            load_average: load.map(|(one, five, fifteen)| LoadAverage { one, five, fifteen }),
            swap: swap.map(|(used_bytes, total_bytes)| SwapUsage { used_bytes, total_bytes }),
            battery: battery.map(|(charge_percent, state)| BatteryReading { charge_percent, state }),
            per_core_usage: cores,
            process_count: count,
            top_processes: processes
                .into_iter()
                .map(|(name, cpu)| ProcessReading::new(name, cpu))
                .collect(),
            fan_rpm: fans,
        })
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// Every continuous output stays inside its documented range.
    #[test]
    fn outputs_are_bounded(metrics in arb_metrics()) {
        let params = MappingEngine::default().map(&metrics);

        prop_assert!((TEMPO_MIN_BPM..=TEMPO_MAX_BPM).contains(&params.tempo_bpm));
        prop_assert!((CUTOFF_MIN_HZ..=CUTOFF_MAX_HZ).contains(&params.filter_cutoff_hz));
        prop_assert!((0.0..=REVERB_MAX_PERCENT).contains(&params.reverb_mix_percent));
        prop_assert!((0.0..=1.0).contains(&params.bass_velocity));
        prop_assert!((0.0..=1.0).contains(&params.io_load));
        prop_assert!((0.0..=1.0).contains(&params.network_load));
        prop_assert!((0.0..=1.0).contains(&params.thermal_load));
        prop_assert!(params.melody_index < MELODY_SCALE.len());
        prop_assert_eq!(params.melody_note, MELODY_SCALE[params.melody_index]);
    }

    /// Same snapshot in, same parameters out.
    #[test]
    fn mapping_is_deterministic(metrics in arb_metrics()) {
        let engine = MappingEngine::default();
        prop_assert_eq!(engine.map(&metrics), engine.map(&metrics));
    }

    /// The bass note always matches its register.
    #[test]
    fn bass_note_pairs_with_register(memory in any_reading()) {
        let params = MappingEngine::default().map(&SystemMetrics::default().with_memory(memory));
        prop_assert_eq!(params.bass_note, params.bass_description.note());
        if memory > 75.0 {
            prop_assert_eq!(params.bass_description, BassRegister::Ominous);
        }
    }

    /// More CPU never lowers the melody.
    #[test]
    fn melody_rises_with_cpu(a in 0.0..=100.0f64, b in 0.0..=100.0f64) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let engine = MappingEngine::default();
        let base = SystemMetrics::default().with_memory(40.0).with_temperature(45.0);

        let low = engine.map(&base.with_cpu(lo));
        let high = engine.map(&base.with_cpu(hi));
        prop_assert!(low.melody_index <= high.melody_index);
    }

    /// More network traffic never slows the tempo.
    #[test]
    fn tempo_rises_with_network(a in any::<u64>(), b in any::<u64>(), split in 0.0..=1.0f64) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let engine = MappingEngine::default();
        let rx = |total: u64| ((total as f64 * split) as u64).min(total);

        let low = engine.map(&SystemMetrics::default().with_network(rx(lo), lo - rx(lo)));
        let high = engine.map(&SystemMetrics::default().with_network(rx(hi), hi - rx(hi)));
        prop_assert!(low.tempo_bpm <= high.tempo_bpm);
    }

    /// Hotter never means darker or drier.
    #[test]
    fn effects_rise_with_temperature(a in -50.0..150.0f64, b in -50.0..150.0f64) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let engine = MappingEngine::default();

        let cool = engine.map(&SystemMetrics::default().with_temperature(lo));
        let hot = engine.map(&SystemMetrics::default().with_temperature(hi));
        prop_assert!(cool.filter_cutoff_hz <= hot.filter_cutoff_hz);
        prop_assert!(cool.reverb_mix_percent <= hot.reverb_mix_percent);
    }

    /// Sub-mappings do not leak into each other.
    #[test]
    fn sub_mappings_are_independent(metrics in arb_metrics(), cpu in 0.0..=100.0f64) {
        let engine = MappingEngine::default();
        let before = engine.map(&metrics);
        let after = engine.map(&metrics.with_cpu(cpu));

        prop_assert_eq!(before.bass_note, after.bass_note);
        prop_assert_eq!(before.rhythm, after.rhythm);
        prop_assert_eq!(before.tempo_bpm, after.tempo_bpm);
        prop_assert_eq!(before.filter_cutoff_hz, after.filter_cutoff_hz);
        prop_assert_eq!(before.atmosphere, after.atmosphere);
    }

    /// Any positive reference keeps the engine bounded.
    #[test]
    fn custom_references_stay_bounded(
        disk_ref in 1.0..1.0e12f64,
        net_ref in 1.0..1.0e12f64,
        metrics in arb_metrics(),
    ) {
        let engine = MappingEngine::new(&MappingConfig {
            disk_reference_bytes: disk_ref,
            network_reference_bytes: net_ref,
            ..MappingConfig::default()
        });
        let params = engine.map(&metrics);

        prop_assert!((TEMPO_MIN_BPM..=TEMPO_MAX_BPM).contains(&params.tempo_bpm));
        prop_assert!((0.0..=1.0).contains(&params.io_load));
    }

    /// Optional readings never disturb the core outputs.
    #[test]
    fn extended_readings_are_additive(metrics in arb_metrics(), extras in arb_extended()) {
        let engine = MappingEngine::default();
        let core = engine.map(&metrics);
        let full = engine.map_with(&metrics, &extras);

        prop_assert_eq!(full.extended.is_some(), !extras.is_empty());
        prop_assert_eq!(syssonic::MusicalParameters { extended: None, ..full }, core);
    }

    /// Every extended output stays inside its documented range.
    #[test]
    fn extended_outputs_are_bounded(metrics in arb_metrics(), extras in arb_extended()) {
        let params = MappingEngine::default().map_with(&metrics, &extras);
        let Some(extended) = params.extended else {
            return Ok(());
        };

        if let Some(gpu) = &extended.gpu {
            prop_assert!((0.0..=1.0).contains(&gpu.intensity));
            prop_assert!((0.0..=0.3).contains(&gpu.chorus_depth));
            prop_assert!((0.5..=3.0).contains(&gpu.flanger_rate_hz));
            prop_assert!((0.0..=1.0).contains(&gpu.room_size));
        }
        prop_assert!((0.0..=1.0).contains(&extended.polyrhythm_factor));
        prop_assert!((1..=4).contains(&extended.harmonic_voices));
        prop_assert!((0.0..=1.0).contains(&extended.swap_distortion));
        prop_assert!((0.5..=1.0).contains(&extended.volume_multiplier));
        prop_assert!((-1.0..=1.0).contains(&extended.tonality));
        prop_assert!((0.0..=1.0).contains(&extended.hihat_density));
        prop_assert!((0.0..=1.0).contains(&extended.fan_ambience));
        prop_assert_eq!(extended.core_patterns.len(), extras.per_core_usage.len());
        for pattern in &extended.core_patterns {
            prop_assert!(!pattern.hits.is_empty());
            prop_assert!(pattern.hits.iter().all(|&step| step < 16));
            prop_assert!(pattern.hits.windows(2).all(|pair| pair[0] < pair[1]));
        }
        prop_assert_eq!(extended.process_motifs.len(), extras.top_processes.len());
    }
}

#[test]
fn cpu_sweep_is_monotonic_end_to_end() {
    let engine = MappingEngine::default();
    let mut previous = 0;

    for step in 0..=1000 {
        let cpu = step as f64 / 10.0;
        let index = engine.map(&SystemMetrics::default().with_cpu(cpu)).melody_index;
        assert!(index >= previous, "index fell at cpu={}", cpu);
        previous = index;
    }

    assert_eq!(previous, 12);
}

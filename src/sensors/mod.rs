//! Directional border sensors ("markers"): rays cast from the vehicle at
//! fixed offsets relative to its heading, reporting the segment to the
//! nearest border ahead.

pub mod telemetry;

use crate::config::SensorsConfig;
use crate::course::CourseId;
use crate::engines::simulation::SimulationState;
use crate::error::Result;
use crate::geometry::{Segment, Vec2};
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use telemetry::TelemetrySink;

/// One sweep: reading per offset, ordered by offset for deterministic
/// feature extraction and telemetry records.
pub type SensorSweep = BTreeMap<i32, Segment>;

/// A single ray at a fixed angular offset from the vehicle heading.
#[derive(Debug, Clone, Copy)]
pub struct Sensor {
    offset_degrees: i32,
}

impl Sensor {
    pub fn new(offset_degrees: i32) -> Self {
        Self {
            offset_degrees: offset_degrees.rem_euclid(360),
        }
    }

    pub fn offset_degrees(&self) -> i32 {
        self.offset_degrees
    }

    /// Cast the ray against every border of the state's course and return
    /// the segment from the vehicle to the nearest border point ahead.
    ///
    /// Borders parallel to the ray are discarded before the infinite-line
    /// intersection, so the division inside it cannot degenerate. When no
    /// candidate lies in the forward direction the reading is the
    /// zero-length segment at the origin -- anchored there, not at the
    /// vehicle, to match the reference behavior downstream consumers were
    /// trained against.
    pub fn cast(&self, state: &SimulationState) -> Result<Segment> {
        let vehicle = state.vehicle();
        let ray_angle = (vehicle.heading + self.offset_degrees as f64).rem_euclid(360.0);
        let direction = Vec2::new(1.0, 0.0).rotated_degrees(ray_angle);
        let ray = Segment::new(vehicle.position, vehicle.position + direction);

        let mut nearest: Option<Segment> = None;
        for border in state.course().borders() {
            if ray.is_parallel_to(*border) || !ray.line_crosses(*border) {
                continue;
            }
            let point = ray.line_intersection(*border)?;
            let reading = Segment::new(vehicle.position, point);
            if !ray.same_direction_as(reading) {
                continue;
            }
            let closer = match nearest {
                Some(best) => reading.length() < best.length(),
                None => true,
            };
            if closer {
                nearest = Some(reading);
            }
        }
        Ok(nearest.unwrap_or(Segment::new(Vec2::ZERO, Vec2::ZERO)))
    }
}

/// Structural fingerprint of a simulation state for sweep memoization:
/// course identity, pose bit patterns and the variant tag. Two logically
/// equal states hit the same entry regardless of which `Arc` they sit in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct StateKey {
    course: CourseId,
    x: u64,
    y: u64,
    heading: u64,
    variant: u8,
}

impl StateKey {
    fn of(state: &SimulationState) -> Self {
        let vehicle = state.vehicle();
        let variant = match state {
            SimulationState::InProgress { .. } => 0,
            SimulationState::Won { .. } => 1,
            SimulationState::Lost { .. } => 2,
        };
        Self {
            course: state.course().id(),
            x: vehicle.position.x.to_bits(),
            y: vehicle.position.y.to_bits(),
            heading: vehicle.heading.to_bits(),
            variant,
        }
    }
}

/// Fixed set of sensors with a per-state sweep cache, so the decision
/// policy and a display layer querying the same logical state within one
/// step share a single computation. Freshly computed sweeps optionally go
/// to an append-only telemetry log as width-only records.
pub struct SensorArray {
    sensors: Vec<Sensor>,
    cache: Mutex<HashMap<StateKey, SensorSweep>>,
    capacity: usize,
    telemetry: Option<Mutex<TelemetrySink>>,
}

impl SensorArray {
    pub fn new(offsets: &[i32], capacity: usize) -> Self {
        Self {
            sensors: offsets.iter().map(|&o| Sensor::new(o)).collect(),
            cache: Mutex::new(HashMap::with_capacity(capacity)),
            capacity,
            telemetry: None,
        }
    }

    pub fn with_telemetry(mut self, sink: TelemetrySink) -> Self {
        self.telemetry = Some(Mutex::new(sink));
        self
    }

    pub fn from_config(config: &SensorsConfig) -> Result<Self> {
        let array = Self::new(&config.offsets, config.cache_capacity);
        match &config.telemetry_path {
            Some(path) => Ok(array.with_telemetry(TelemetrySink::open(path)?)),
            None => Ok(array),
        }
    }

    pub fn offsets(&self) -> Vec<i32> {
        self.sensors.iter().map(|s| s.offset_degrees()).collect()
    }

    /// Cast every sensor, memoized per structural state key. Only cache
    /// misses compute and only they are logged to telemetry.
    pub fn sweep(&self, state: &SimulationState) -> Result<SensorSweep> {
        let key = StateKey::of(state);
        if let Some(hit) = self.cache.lock().unwrap().get(&key) {
            return Ok(hit.clone());
        }

        let mut sweep = SensorSweep::new();
        for sensor in &self.sensors {
            sweep.insert(sensor.offset_degrees(), sensor.cast(state)?);
        }

        if let Some(sink) = &self.telemetry {
            let widths: BTreeMap<i32, f64> =
                sweep.iter().map(|(&o, s)| (o, s.length())).collect();
            sink.lock().unwrap().append(&widths)?;
        }

        let mut cache = self.cache.lock().unwrap();
        if cache.len() >= self.capacity {
            // Same eviction as the fitness cache: clear when full.
            cache.clear();
        }
        cache.insert(key, sweep.clone());
        Ok(sweep)
    }

    pub fn clear_cache(&self) {
        self.cache.lock().unwrap().clear();
    }
}

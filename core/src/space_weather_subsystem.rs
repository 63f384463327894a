//! Space-weather figures.
//!
//! Solar-wind speed and the geomagnetic K-index each follow a random walk:
//! every tick adds a uniform perturbation in [-step, step). The K-index is
//! clamped to its configured bounds after every step; solar wind is not.

use crate::{
    config::SpaceWeatherConfig,
    error::MissionResult,
    event::MissionEvent,
    rng::RandomSource,
    snapshot::SpaceWeatherReading,
    state::MissionState,
    subsystem::MissionSubsystem,
    types::Tick,
};

/// One symmetric random-walk step, optionally clamped to `bounds`.
pub fn random_walk_step(
    value: f64,
    step: f64,
    bounds: Option<(f64, f64)>,
    rng: &mut dyn RandomSource,
) -> f64 {
    let next = value + rng.symmetric(step);
    match bounds {
        Some((min, max)) => next.clamp(min, max),
        None => next,
    }
}

pub struct SpaceWeatherSubsystem {
    pub reading: SpaceWeatherReading,
    config:      SpaceWeatherConfig,
}

impl SpaceWeatherSubsystem {
    pub fn new(config: SpaceWeatherConfig) -> Self {
        let reading = SpaceWeatherReading {
            solar_wind: config.initial_solar_wind,
            k_index:    config
                .initial_k_index
                .clamp(config.k_index_min, config.k_index_max),
        };
        Self { reading, config }
    }

    pub fn step(&mut self, rng: &mut dyn RandomSource) {
        self.reading.solar_wind =
            random_walk_step(self.reading.solar_wind, self.config.solar_wind_step, None, rng);
        self.reading.k_index = random_walk_step(
            self.reading.k_index,
            self.config.k_index_step,
            Some((self.config.k_index_min, self.config.k_index_max)),
            rng,
        );
    }
}

impl MissionSubsystem for SpaceWeatherSubsystem {
    fn name(&self) -> &'static str { "space_weather" }

    fn update(
        &mut self,
        tick: Tick,
        _state: &MissionState,
        rng: &mut dyn RandomSource,
    ) -> MissionResult<Vec<MissionEvent>> {
        self.step(rng);
        log::trace!(
            "tick={tick} space_weather: wind={:.1} k={:.2}",
            self.reading.solar_wind,
            self.reading.k_index
        );
        Ok(vec![MissionEvent::SpaceWeatherUpdated {
            tick,
            solar_wind: self.reading.solar_wind,
            k_index:    self.reading.k_index,
        }])
    }

    fn as_any(&self) -> &dyn std::any::Any { self }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, SequenceRng, SubsystemSlot};

    #[test]
    fn scripted_steps_move_symmetrically() {
        let mut weather = SpaceWeatherSubsystem::new(SpaceWeatherConfig::default());
        // wind draw, k draw
        let mut rng = SequenceRng::new(vec![0.75, 0.25]);
        weather.step(&mut rng);
        assert!((weather.reading.solar_wind - 434.5).abs() < 1e-9);
        assert!((weather.reading.k_index - 3.15).abs() < 1e-9);
    }

    #[test]
    fn k_index_clamps_at_floor() {
        let config = SpaceWeatherConfig { initial_k_index: 0.05, ..SpaceWeatherConfig::default() };
        let mut weather = SpaceWeatherSubsystem::new(config);
        let mut rng = SequenceRng::new(vec![0.5, 0.0]);
        weather.step(&mut rng);
        assert_eq!(weather.reading.k_index, 0.0);
    }

    #[test]
    fn k_index_clamps_at_ceiling_with_large_steps() {
        let config = SpaceWeatherConfig {
            initial_k_index: 8.9,
            k_index_step:    3.0,
            ..SpaceWeatherConfig::default()
        };
        let mut weather = SpaceWeatherSubsystem::new(config);
        let mut rng = RngBank::new(1).for_subsystem(SubsystemSlot::SpaceWeather);
        for _ in 0..10_000 {
            weather.step(&mut rng);
            assert!((0.0..=9.0).contains(&weather.reading.k_index));
        }
    }

    #[test]
    fn out_of_range_initial_k_index_is_clamped() {
        let config = SpaceWeatherConfig { initial_k_index: 12.0, ..SpaceWeatherConfig::default() };
        assert_eq!(SpaceWeatherSubsystem::new(config).reading.k_index, 9.0);
    }
}

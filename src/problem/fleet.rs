use std::f64::consts::PI;

use crate::problem::geo::Point;
use crate::problem::Num;

pub const SECONDS_PER_DAY: Num = 86400.0;
pub const OMEGA: Num = 2.0 * PI / SECONDS_PER_DAY;
pub const MIN_MULTIPLIER: Num = 0.1;

pub const NUM_FOURIER_TERMS: usize = 4;

#[derive(Clone, Debug)]
pub struct VehicleType {
    pub family: u32,
    pub capacity: Num,
    pub rental_cost: Num,
    /// cost per meter (taxicab)
    pub fuel_cost: Num,
    /// cost per squared meter of the largest pairwise distance within a route
    pub radius_cost: Num,
    /// meters per second
    pub speed: Num,
    pub parking_time: Num,
    pub fourier_cos: [Num; NUM_FOURIER_TERMS],
    pub fourier_sin: [Num; NUM_FOURIER_TERMS],
}

impl VehicleType {
    pub fn check_capacity(&self, load: Num) -> bool {
        load <= self.capacity
    }

    /// Time-of-day factor applied to the reference travel time, never below `MIN_MULTIPLIER`.
    pub fn multiplier(&self, t: Num) -> Num {
        let gamma: Num = (0..NUM_FOURIER_TERMS)
            .map(|n| {
                let angle = n as Num * OMEGA * t;
                self.fourier_cos[n] * angle.cos() + self.fourier_sin[n] * angle.sin()
            })
            .sum();
        gamma.max(MIN_MULTIPLIER)
    }

    pub fn reference_travel_time(&self, from: &Point, to: &Point) -> Num {
        from.taxicab(to) / self.speed + self.parking_time / 2.0
    }

    /// Travel time when departing from `from` at time `t`.
    pub fn travel_time(&self, from: &Point, to: &Point, t: Num) -> Num {
        self.reference_travel_time(from, to) * self.multiplier(t)
    }
}

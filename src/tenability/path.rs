//! Egress paths: the rooms an occupant moves through and when

use crate::results::{Error, Result};

/// Rooms visited in order, with the time each room is left.
///
/// The last transition time may be omitted, in which case the occupant stays
/// in the last room until the end of the results.
#[derive(Debug, Clone, PartialEq)]
pub struct EgressPath {
    rooms: Vec<String>,
    transition_times: Vec<f64>,
}

impl EgressPath {
    pub fn new<S: Into<String>>(
        rooms: impl IntoIterator<Item = S>,
        transition_times: impl IntoIterator<Item = f64>,
    ) -> Result<Self> {
        let rooms: Vec<String> = rooms.into_iter().map(Into::into).collect();
        let transition_times: Vec<f64> = transition_times.into_iter().collect();

        let extra_rooms = rooms.len().checked_sub(transition_times.len());
        if rooms.is_empty() || !matches!(extra_rooms, Some(0 | 1)) {
            return Err(Error::InvalidEgressPath {
                rooms: rooms.len(),
                transitions: transition_times.len(),
            });
        }

        let ascending = transition_times.iter().all(|t| t.is_finite() && *t >= 0.0)
            && transition_times.windows(2).all(|w| w[0] <= w[1]);
        if !ascending {
            return Err(Error::UnorderedTransitions(transition_times));
        }

        Ok(Self {
            rooms,
            transition_times,
        })
    }

    /// Stay in one room for the whole run
    pub fn single(room: impl Into<String>) -> Self {
        Self {
            rooms: vec![room.into()],
            transition_times: Vec::new(),
        }
    }

    pub fn rooms(&self) -> &[String] {
        &self.rooms
    }

    pub fn transition_times(&self) -> &[f64] {
        &self.transition_times
    }

    /// Segment boundaries `[0, t1, ..., tn]`.
    ///
    /// `end_time` closes the last segment when no final transition was given.
    pub fn boundaries(&self, end_time: f64) -> Vec<f64> {
        let mut bounds = Vec::with_capacity(self.rooms.len() + 1);
        bounds.push(0.0);
        bounds.extend_from_slice(&self.transition_times);
        if bounds.len() == self.rooms.len() {
            bounds.push(end_time);
        }
        bounds
    }

    /// `(room, start, end)` of every segment
    pub fn segments(&self, end_time: f64) -> Vec<(&str, f64, f64)> {
        let bounds = self.boundaries(end_time);
        self.rooms
            .iter()
            .zip(bounds.windows(2))
            .map(|(room, w)| (room.as_str(), w[0], w[1]))
            .collect()
    }

    /// `Lounge (0-120s) - Hall (120-300s)`
    pub fn describe(&self, end_time: f64) -> String {
        self.segments(end_time)
            .iter()
            .map(|(room, t0, t1)| format!("{room} ({t0}-{t1}s)"))
            .collect::<Vec<_>>()
            .join(" - ")
    }
}

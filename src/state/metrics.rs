// Rolling frames-per-second window behind the FPS readout
use std::collections::VecDeque;
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    pub latest: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Window capacity the aggregates are taken over.
    pub window: usize,
}

impl fmt::Display for FrameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = [
            ("latest".to_string(), self.latest),
            (format!("avg of last {}", self.window), self.mean),
            (format!("max of last {}", self.window), self.max),
            (format!("min of last {}", self.window), self.min),
        ];
        let pad = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        write!(f, "Frames per second:")?;
        for (label, value) in rows {
            write!(f, "\n  {label:<pad$} = {}", value.round())?;
        }
        Ok(())
    }
}

pub struct FrameMetrics {
    samples: VecDeque<f64>,
    capacity: usize,
    last_timestamp_ms: f64,
    last_stats: FrameStats,
}

impl FrameMetrics {
    pub fn new(capacity: usize, now_ms: f64) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            last_timestamp_ms: now_ms,
            last_stats: FrameStats {
                window: capacity,
                ..FrameStats::default()
            },
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn stats(&self) -> FrameStats {
        self.last_stats
    }

    /// Records the frame at `now_ms` and returns the updated statistics.
    pub fn record(&mut self, now_ms: f64) -> FrameStats {
        let delta = now_ms - self.last_timestamp_ms;
        self.last_timestamp_ms = now_ms;
        if delta <= 0.0 {
            return self.last_stats;
        }
        let fps = 1000.0 / delta;
        self.samples.push_back(fps);
        if self.samples.len() > self.capacity {
            self.samples.pop_front();
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for &s in &self.samples {
            sum += s;
            min = min.min(s);
            max = max.max(s);
        }
        self.last_stats = FrameStats {
            latest: fps,
            mean: sum / self.samples.len() as f64,
            min,
            max,
            window: self.capacity,
        };
        self.last_stats
    }
}

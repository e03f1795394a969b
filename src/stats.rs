//! Progress reporting for the driver loop

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
    time::{Duration, Instant},
};

const REPORT_INTERVAL: Duration = Duration::from_millis(500);

/// How long one generation took and what it left alive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sample {
    micros: u128,
    population: usize,
}

/// Generation rate and population of a run
///
/// The per-generation history behind `--stats` is only kept when asked for;
/// otherwise memory use stays flat however long the run goes.
pub struct RunStats {
    gens: usize,
    population: usize,
    gens_since_report: usize,
    last_report: Instant,
    last_gen: Instant,
    history: Option<Vec<Sample>>,
}

impl RunStats {
    pub fn new(population: usize, keep_history: bool) -> Self {
        let now = Instant::now();
        Self {
            gens: 0,
            population,
            gens_since_report: 0,
            last_report: now,
            last_gen: now,
            history: keep_history.then(Vec::new),
        }
    }

    pub fn record(&mut self, population: usize) {
        let now = Instant::now();
        if let Some(history) = self.history.as_mut() {
            history.push(Sample {
                micros: now.duration_since(self.last_gen).as_micros(),
                population,
            });
        }
        self.last_gen = now;
        self.gens += 1;
        self.gens_since_report += 1;
        self.population = population;
    }

    /// Number of generations held for the csv dump, if history is kept at all
    pub fn history_len(&self) -> Option<usize> {
        self.history.as_ref().map(Vec::len)
    }

    pub fn report_due(&self) -> bool {
        self.last_report.elapsed() >= REPORT_INTERVAL
    }

    /// Summarizes the run and starts a new reporting interval
    pub fn report(&mut self) -> String {
        let elapsed = self.last_report.elapsed().as_secs_f64();
        let rate = if elapsed > 0.0 {
            self.gens_since_report as f64 / elapsed
        } else {
            0.0
        };
        self.last_report = Instant::now();
        self.gens_since_report = 0;

        format!(
            "{:.02}gen/s gens:{}, alive:{}",
            rate, self.gens, self.population
        )
    }

    /// Writes the history as `gen,delta_t,alive` csv
    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let file = File::create(path)?;
        self.write_csv(BufWriter::new(file))
    }

    fn write_csv<W: Write>(&self, mut out: W) -> io::Result<()> {
        let Some(history) = &self.history else {
            return Err(io::Error::other("generation history was not kept"));
        };
        writeln!(out, "gen,delta_t,alive")?;
        for (i, sample) in history.iter().enumerate() {
            writeln!(out, "{},{},{}", i, sample.micros, sample.population)?;
        }
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_counts_generations() {
        let mut stats = RunStats::new(10, false);
        stats.record(8);
        stats.record(6);

        let report = stats.report();
        assert!(report.ends_with("gens:2, alive:6"), "{report}");
    }

    #[test]
    fn no_history_is_kept_unless_asked_for() {
        let mut stats = RunStats::new(1, false);
        for population in 0..10_000 {
            stats.record(population);
        }

        assert_eq!(stats.history_len(), None);
        assert!(stats.write_csv(Vec::new()).is_err());
    }

    #[test]
    fn csv_has_one_line_per_generation() {
        let mut stats = RunStats::new(3, true);
        for population in [5, 4, 0] {
            stats.record(population);
        }
        assert_eq!(stats.history_len(), Some(3));

        let mut out = Vec::new();
        stats.write_csv(&mut out).expect("write into memory");
        let text = String::from_utf8(out).expect("utf-8 csv");
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "gen,delta_t,alive");
        assert!(lines[1].starts_with("0,") && lines[1].ends_with(",5"));
        assert!(lines[3].starts_with("2,") && lines[3].ends_with(",0"));
    }
}

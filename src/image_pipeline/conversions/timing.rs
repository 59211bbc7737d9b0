use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct FileTiming {
    pub input: String,
    pub duration: Duration,
}

/// Wall-clock accounting for a batch run, one entry per processed file.
#[derive(Debug, Default)]
pub struct PipelineTimings {
    files: Vec<FileTiming>,
}

impl PipelineTimings {
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    pub fn add_file(&mut self, input: impl Into<String>, duration: Duration) {
        self.files.push(FileTiming {
            input: input.into(),
            duration,
        });
    }

    pub fn total_duration(&self) -> Duration {
        self.files.iter().map(|f| f.duration).sum()
    }

    pub fn files(&self) -> &[FileTiming] {
        &self.files
    }

    pub fn print_summary(&self) {
        let total = self.total_duration();
        println!("\nBatch Timing Summary:");
        println!("{:-<72}", "");
        for file in &self.files {
            let percentage = if total.as_secs_f64() > 0.0 {
                (file.duration.as_secs_f64() / total.as_secs_f64()) * 100.0
            } else {
                0.0
            };
            println!(
                "{:<45} {:>12.3}ms ({:>5.1}%)",
                file.input,
                file.duration.as_secs_f64() * 1000.0,
                percentage
            );
        }
        println!("{:-<72}", "");
        println!(
            "{:<45} {:>12.3}ms",
            "Total",
            total.as_secs_f64() * 1000.0
        );
    }
}

pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            name: name.into(),
        }
    }

    pub fn stop(self) -> (String, Duration) {
        (self.name, self.start.elapsed())
    }
}

use instant::Instant;

pub fn elapsed_seconds(since: Instant) -> f64 {
    let dt = since.elapsed();
    (dt.as_secs() as f64) + (f64::from(dt.subsec_nanos()) * 1e-9)
}

pub fn prettyprint_time(seconds: f64) -> String {
    format!("{:.4}s", seconds)
}

struct TimerSpan {
    name: String,
    started_at: Instant,
}

/// Hierarchial magic. Logs named phases and how long each took, and collects warnings to repeat
/// when the outermost phase finishes.
pub struct Timer {
    outermost_name: String,
    stack: Vec<TimerSpan>,
    results: Vec<String>,
    notes: Vec<String>,
    warnings: Vec<String>,
}

impl Timer {
    pub fn new<I: Into<String>>(raw_name: I) -> Timer {
        let name = raw_name.into();
        let mut t = Timer {
            outermost_name: name.clone(),
            stack: Vec::new(),
            results: Vec::new(),
            notes: Vec::new(),
            warnings: Vec::new(),
        };
        t.start(name);
        t
    }

    // TODO Shouldn't use this much.
    pub fn throwaway() -> Timer {
        Timer::new("throwaway")
    }

    /// Log immediately, but also repeat at the end, to avoid having to scroll up and find
    /// interesting debug stuff.
    pub fn note<I: Into<String>>(&mut self, raw_line: I) {
        let line = raw_line.into();
        info!("{}", line);
        self.notes.push(line);
    }

    pub fn warn<I: Into<String>>(&mut self, line: I) {
        self.warnings.push(line.into());
    }

    pub fn num_warnings(&self) -> usize {
        self.warnings.len()
    }

    /// Used to end the scope of a timer early.
    pub fn done(self) {}

    pub fn start<I: Into<String>>(&mut self, raw_name: I) {
        let name = raw_name.into();
        debug!("{}...", name);
        self.stack.push(TimerSpan {
            name,
            started_at: Instant::now(),
        });
    }

    /// Stops the innermost span, which must have the given name. Mismatched names are logged and
    /// otherwise ignored.
    pub fn stop<I: Into<String>>(&mut self, raw_name: I) {
        let name = raw_name.into();
        let span = match self.stack.pop() {
            Some(span) => span,
            None => {
                warn!("Timer::stop({}) with nothing started", name);
                return;
            }
        };
        if span.name != name {
            warn!("Timer::stop({}), but the current span is {}", name, span.name);
        }
        let line = format!(
            "{} took {}",
            span.name,
            prettyprint_time(elapsed_seconds(span.started_at))
        );
        let padding = "  ".repeat(self.stack.len());
        info!("{}", line);
        self.results.push(format!("{}- {}", padding, line));
    }
}

impl std::ops::Drop for Timer {
    fn drop(&mut self) {
        while self.stack.len() > 1 {
            if let Some(span) = self.stack.last() {
                let name = span.name.clone();
                self.stop(name);
            }
        }
        let outermost = self.outermost_name.clone();
        self.stop(outermost);

        if self.results.len() > 1 {
            debug!("{} summary:", self.outermost_name);
            for line in self.results.iter().rev() {
                debug!("{}", line);
            }
        }
        for line in &self.notes {
            info!("{}", line);
        }
        if !self.warnings.is_empty() {
            warn!("{} warnings:", self.warnings.len());
            for line in &self.warnings {
                warn!("{}", line);
            }
        }
    }
}

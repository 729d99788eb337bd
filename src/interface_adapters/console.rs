// Terminal front end: renders the result panel as text. Form fields are
// collected up front (arguments, environment or the blocking prompts below)
// so the async flow never waits on stdin.

use crate::domain::{Page, ResultHeader, ScoreView, VerificationWidget};
use std::io::{self, BufRead, Write};
use std::sync::Mutex;

const BAR_CELLS: usize = 20;

#[derive(Default)]
struct Panel {
    scores: Vec<ScoreView>,
    header: Option<ResultHeader>,
}

pub struct ConsolePage {
    out: Mutex<Box<dyn Write + Send>>,
    // Current content of the handle field.
    handle: Mutex<String>,
    panel: Mutex<Panel>,
}

impl ConsolePage {
    pub fn new(out: impl Write + Send + 'static, handle: impl Into<String>) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
            handle: Mutex::new(handle.into()),
            panel: Mutex::new(Panel::default()),
        }
    }

    pub fn stdout(handle: impl Into<String>) -> Self {
        Self::new(io::stdout(), handle)
    }

    // Edits the handle field, as typing into it would.
    pub fn set_handle(&self, handle: impl Into<String>) {
        match self.handle.lock() {
            Ok(mut field) => *field = handle.into(),
            Err(_) => tracing::error!("console handle lock poisoned."),
        }
    }

    fn write_line(&self, line: &str) {
        let Ok(mut out) = self.out.lock() else {
            tracing::error!("console output lock poisoned.");
            return;
        };
        if let Err(e) = writeln!(out, "{line}").and_then(|_| out.flush()) {
            tracing::error!(error = %e, "failed to write to console.");
        }
    }

    // Prints the buffered panel; called when the result panel is revealed.
    fn flush_panel(&self) {
        let panel = match self.panel.lock() {
            Ok(mut panel) => std::mem::take(&mut *panel),
            Err(_) => {
                tracing::error!("console panel lock poisoned.");
                return;
            }
        };

        if let Some(header) = &panel.header {
            self.write_line(&header.headline());
            self.write_line(&format!("Profile: {}", header.profile_url));
        }
        for score in &panel.scores {
            self.write_line(&score_line(score));
        }
    }
}

fn score_line(score: &ScoreView) -> String {
    let filled = ((score.bar_width / 100.0) * BAR_CELLS as f64)
        .round()
        .clamp(0.0, BAR_CELLS as f64) as usize;
    format!(
        "{:<18} {:>6} {}{}",
        score.dimension.label(),
        score.text,
        "#".repeat(filled),
        ".".repeat(BAR_CELLS - filled)
    )
}

impl Page for ConsolePage {
    fn handle_input(&self) -> String {
        match self.handle.lock() {
            Ok(field) => field.clone(),
            Err(_) => {
                tracing::error!("console handle lock poisoned.");
                String::new()
            }
        }
    }

    fn set_submit_visible(&self, visible: bool) {
        tracing::debug!(visible, "submit control visibility changed.");
    }

    fn mark_consent_accepted(&self) {
        self.write_line("Terms accepted.");
    }

    fn flag_consent_required(&self) {
        self.write_line("Please accept the terms before submitting.");
    }

    fn load_script(&self, src: &str) {
        tracing::debug!(%src, "verification widget script requested.");
    }

    fn set_loading_visible(&self, visible: bool) {
        if visible {
            self.write_line("Analysing tweets...");
        }
    }

    fn set_results_visible(&self, visible: bool) {
        if visible {
            self.flush_panel();
        }
    }

    fn render_score(&self, score: &ScoreView) {
        match self.panel.lock() {
            Ok(mut panel) => panel.scores.push(score.clone()),
            Err(_) => tracing::error!("console panel lock poisoned, score dropped."),
        }
    }

    fn render_header(&self, header: &ResultHeader) {
        match self.panel.lock() {
            Ok(mut panel) => panel.header = Some(header.clone()),
            Err(_) => tracing::error!("console panel lock poisoned, header dropped."),
        }
    }

    fn alert(&self, message: &str) {
        self.write_line(&format!("error: {message}"));
    }
}

// Verification widget for terminals holding a token solved out of band.
pub struct TerminalWidget {
    token: String,
}

impl TerminalWidget {
    // An empty token stands for an unsolved challenge.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl VerificationWidget for TerminalWidget {
    fn response_token(&self) -> String {
        self.token.clone()
    }
}

// Blocking; call from `spawn_blocking` or before the runtime starts.
// Reads one trimmed line from stdin after printing `label`.
pub fn prompt_line(label: &str) -> io::Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{label}")?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

pub fn confirm(question: &str) -> bool {
    match prompt_line(&format!("{question} [y/N] ")) {
        Ok(answer) => matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read confirmation.");
            false
        }
    }
}

//! Terminal front end: renders view commands as text and turns input lines
//! into page events.

use std::collections::HashMap;
use std::io::Write;

use crate::chart::{ChartData, ChartHandle, ChartSurface};
use crate::platform::{Platform, DETECTION_ORDER};
use crate::view::{Field, Section, View};

/// Width of a 100% bar in the text chart
const BAR_WIDTH: usize = 30;

/// One line of console input, translated into a page event
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    /// Type the text into the URL field, then submit
    Analyze(String),
    /// Type the text into the URL field only
    Url(String),
    Platform(Platform),
    Submit,
    Another,
    Help,
    Quit,
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let Some(rest) = line.strip_prefix(':') else {
            return Ok(ConsoleCommand::Analyze(line.to_string()));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match name {
            "url" => Ok(ConsoleCommand::Url(arg.to_string())),
            "platform" | "p" => arg
                .parse()
                .map(ConsoleCommand::Platform)
                .map_err(|e: String| format!("{} (known: {})", e, known_platforms())),
            "submit" | "s" => Ok(ConsoleCommand::Submit),
            "another" | "a" => Ok(ConsoleCommand::Another),
            "help" | "h" | "?" => Ok(ConsoleCommand::Help),
            "quit" | "q" | "exit" => Ok(ConsoleCommand::Quit),
            other => Err(format!("Unknown command :{} (try :help)", other)),
        }
    }
}

fn known_platforms() -> String {
    DETECTION_ORDER
        .iter()
        .map(Platform::id)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn help_text() -> String {
    format!(
        "Paste a product URL and press enter to analyze it.\n\
         :url <text>       type into the URL field without submitting\n\
         :platform <id>    pick a platform ({})\n\
         :submit           submit the current URL\n\
         :another          analyze another product\n\
         :quit             exit",
        known_platforms()
    )
}

/// Renders the page on a text stream. Result fields are buffered and printed
/// as one card when the result section is shown.
pub struct ConsoleView<W: Write> {
    out: W,
    texts: HashMap<Field, String>,
    image: Option<String>,
    chart: Option<(ChartHandle, ChartData)>,
    next_handle: u64,
    platform: Option<Platform>,
}

impl<W: Write> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            texts: HashMap::new(),
            image: None,
            chart: None,
            next_handle: 0,
            platform: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{}", text);
        let _ = self.out.flush();
    }

    fn print_result(&mut self) {
        let mut card = Vec::new();
        card.push("──────── Sentiment ────────".to_string());
        if let Some(title) = self.texts.get(&Field::Title) {
            card.push(format!("📦 {}", title));
        }
        if let Some(price) = self.texts.get(&Field::Price) {
            card.push(format!("💰 {}", price));
        }
        if let Some(image) = &self.image {
            card.push(format!("🖼  {}", image));
        }
        if let Some(description) = self.texts.get(&Field::Description) {
            card.push(description.clone());
        }
        if let Some(reviews) = self.texts.get(&Field::ReviewsAnalyzed) {
            card.push(format!("🧾 {}", reviews));
        }

        let pct = |field: Field| self.texts.get(&field).cloned().unwrap_or_default();
        card.push(format!(
            "Positive {}  Neutral {}  Negative {}",
            pct(Field::PositivePct),
            pct(Field::NeutralPct),
            pct(Field::NegativePct)
        ));

        if let Some((_, data)) = &self.chart {
            card.extend(render_chart(data));
        }
        card.push("(:another to analyze another product)".to_string());

        for line in card {
            self.line(&line);
        }
    }
}

/// Text stand-in for the doughnut: one bar per segment, legend underneath.
pub fn render_chart(data: &ChartData) -> Vec<String> {
    let total: f64 = data.values.iter().sum();
    let mut lines: Vec<String> = data
        .segments()
        .enumerate()
        .map(|(i, (label, value, _))| {
            let share = if total > 0.0 { value / total } else { 0.0 };
            let filled = (share * BAR_WIDTH as f64).round() as usize;
            format!(
                "{:<9}{}{} {}",
                label,
                "█".repeat(filled),
                "░".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)),
                data.tooltip(i).unwrap_or_default()
            )
        })
        .collect();
    lines.push(format!("Legend: {}", data.labels.join(" · ")));
    lines
}

impl<W: Write> ChartSurface for ConsoleView<W> {
    fn draw_chart(&mut self, data: &ChartData) -> ChartHandle {
        self.next_handle += 1;
        let handle = ChartHandle(self.next_handle);
        self.chart = Some((handle, data.clone()));
        handle
    }

    fn destroy_chart(&mut self, handle: ChartHandle) {
        if matches!(self.chart, Some((live, _)) if live == handle) {
            self.chart = None;
        }
    }
}

impl<W: Write> View for ConsoleView<W> {
    fn show(&mut self, section: Section) {
        match section {
            Section::Form => self.line("Enter a product URL (:help for commands)"),
            Section::Loading => self.line("⏳ Analyzing reviews..."),
            Section::Result => self.print_result(),
        }
    }

    fn hide(&mut self, _section: Section) {}

    fn set_text(&mut self, field: Field, text: Option<&str>) {
        match text {
            Some(t) => {
                self.texts.insert(field, t.to_string());
            }
            None => {
                self.texts.remove(&field);
            }
        }
    }

    fn set_image(&mut self, src: Option<&str>) {
        self.image = src.map(str::to_string);
    }

    fn set_url_input(&mut self, _value: &str) {}

    fn focus_url_input(&mut self) {}

    fn flag_url_input(&mut self, placeholder: Option<&str>) {
        if let Some(placeholder) = placeholder {
            self.line(&format!("✏️  {}", placeholder));
        }
    }

    fn highlight_platform(&mut self, platform: Platform) {
        if self.platform != Some(platform) {
            self.platform = Some(platform);
            self.line(&format!("Platform: {}", platform));
        }
    }

    fn notify(&mut self, message: &str) {
        self.line(&format!("⚠️  {}", message));
    }
}

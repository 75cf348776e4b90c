//! Terminal report rendering
//!
//! Everything here builds strings; `main` decides where they go. Layout is
//! driven by a [`RenderConfig`] read once at startup.

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

use fame_core::{Assessment, EngineOutcome, FameCategory, FameStatus};

/// Widest layout we ever draw
const MAX_WIDTH: usize = 120;

/// Width assumed when the terminal size is unknown
const FALLBACK_WIDTH: usize = 80;
const FALLBACK_HEIGHT: usize = 24;

/// Width of the label column in two-column tables
const LABEL_WIDTH: usize = 16;

/// Terminal geometry and color support
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Layout width, capped
    pub width: usize,
    /// Raw terminal width as reported
    pub terminal_width: usize,
    pub height: usize,
    pub color: bool,
}

impl RenderConfig {
    /// Read the terminal size once
    pub fn detect(color: bool) -> Self {
        let (width, height) = crossterm::terminal::size()
            .map(|(w, h)| (w as usize, h as usize))
            .unwrap_or((FALLBACK_WIDTH, FALLBACK_HEIGHT));
        Self::new(width, height, color)
    }

    pub fn new(width: usize, height: usize, color: bool) -> Self {
        Self {
            width: width.clamp(20, MAX_WIDTH),
            terminal_width: width,
            height,
            color,
        }
    }

    /// Rounded boxes on wide terminals, bare rules on narrow ones
    fn rounded(&self) -> bool {
        self.width >= 80
    }

    /// Total width of panels and tables, borders included
    fn panel_width(&self) -> usize {
        self.width.saturating_sub(2).max(20)
    }

    fn divider_width(&self) -> usize {
        self.width.saturating_sub(4).min(80)
    }
}

/// Fixed palette
mod palette {
    use colored::Color;

    pub const PRIMARY: Color = Color::Cyan;
    pub const SECONDARY: Color = Color::Magenta;
    pub const ACCENT: Color = Color::BrightYellow;
    pub const SUCCESS: Color = Color::Green;
    pub const INFO: Color = Color::Blue;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;
    pub const NEUTRAL: Color = Color::BrightWhite;
    pub const DARK: Color = Color::White;
    pub const HIGHLIGHT: Color = Color::BrightCyan;
}

fn category_color(category: FameCategory) -> Color {
    match category {
        FameCategory::GlobalIcon => palette::ERROR,
        FameCategory::Superstar => palette::WARNING,
        FameCategory::Celebrity => palette::ACCENT,
        FameCategory::Notable => palette::SUCCESS,
        FameCategory::Recognized => palette::INFO,
        FameCategory::Emerging => palette::PRIMARY,
        FameCategory::NicheFame => palette::HIGHLIGHT,
        FameCategory::LocalFigure => palette::SECONDARY,
        FameCategory::LimitedReach => palette::DARK,
        FameCategory::Private => Color::White,
    }
}

fn status_color(status: FameStatus) -> Color {
    match status {
        FameStatus::MegaStar => palette::ERROR,
        FameStatus::Celebrity => palette::ACCENT,
        FameStatus::NotableFigure => palette::SUCCESS,
        FameStatus::EmergingRecognition => palette::INFO,
        FameStatus::LimitedExposure => palette::DARK,
    }
}

fn paint(cfg: &RenderConfig, text: &str, color: Color) -> String {
    if cfg.color {
        text.color(color).to_string()
    } else {
        text.to_string()
    }
}

fn paint_bold(cfg: &RenderConfig, text: &str, color: Color) -> String {
    if cfg.color {
        text.color(color).bold().to_string()
    } else {
        text.to_string()
    }
}

fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

fn pad_right(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(display_width(text));
    format!("{}{}", text, " ".repeat(pad))
}

fn pad_left(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(display_width(text));
    format!("{}{}", " ".repeat(pad), text)
}

fn center(text: &str, width: usize) -> String {
    let total = width.saturating_sub(display_width(text));
    let left = total / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(total - left))
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    textwrap::wrap(text, width.max(1))
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

/// Format with thousands separators: 1234567 -> "1,234,567"
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// How a panel draws its frame and body
#[derive(Debug, Clone, Copy)]
struct PanelStyle {
    border: Color,
    body: Option<Color>,
    bold: bool,
    centered: bool,
}

impl PanelStyle {
    fn framed(border: Color) -> Self {
        Self {
            border,
            body: None,
            bold: false,
            centered: false,
        }
    }

    fn body(mut self, color: Color) -> Self {
        self.body = Some(color);
        self
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn centered(mut self) -> Self {
        self.centered = true;
        self
    }
}

/// A boxed panel. `lines` are plain text; they are padded before coloring.
fn panel(cfg: &RenderConfig, title: Option<&str>, lines: &[String], style: PanelStyle) -> String {
    let width = cfg.panel_width();
    let inner = width.saturating_sub(4);
    let mut out = Vec::new();

    let (tl, tr, bl, br, h, v) = if cfg.rounded() {
        ("╭", "╮", "╰", "╯", "─", "│")
    } else {
        (" ", " ", " ", " ", "─", " ")
    };

    let top = match title {
        Some(title) => {
            let label = format!(" {} ", title);
            let rest = width.saturating_sub(2 + display_width(&label));
            let left = rest / 2;
            format!("{}{}{}{}{}", tl, h.repeat(left), label, h.repeat(rest - left), tr)
        }
        None => format!("{}{}{}", tl, h.repeat(width.saturating_sub(2)), tr),
    };
    out.push(paint(cfg, &top, style.border));

    let bar = paint(cfg, v, style.border);
    for line in lines {
        let padded = if style.centered {
            center(line, inner)
        } else {
            pad_right(line, inner)
        };
        let text = match (style.body, style.bold) {
            (Some(color), true) => paint_bold(cfg, &padded, color),
            (Some(color), false) => paint(cfg, &padded, color),
            (None, _) => padded,
        };
        out.push(format!("{bar} {text} {bar}"));
    }

    let bottom = format!("{}{}{}", bl, h.repeat(width.saturating_sub(2)), br);
    out.push(paint(cfg, &bottom, style.border));
    out.join("\n")
}

/// Two-column table with a header row
fn table(
    cfg: &RenderConfig,
    headers: (&str, &str),
    rows: &[(String, String, Option<Color>)],
    border: Color,
    label_color: Color,
) -> String {
    let width = cfg.panel_width();
    let value_width = width.saturating_sub(LABEL_WIDTH + 7);
    let v = if cfg.rounded() { "│" } else { " " };
    let h = "─";

    let rule = |left: &str, mid: &str, right: &str| {
        paint(
            cfg,
            &format!(
                "{}{}{}{}{}",
                left,
                h.repeat(LABEL_WIDTH + 2),
                mid,
                h.repeat(value_width + 2),
                right
            ),
            border,
        )
    };
    let (top, sep, bottom) = if cfg.rounded() {
        (rule("╭", "┬", "╮"), rule("├", "┼", "┤"), rule("╰", "┴", "╯"))
    } else {
        (rule(" ", " ", " "), rule(" ", " ", " "), rule(" ", " ", " "))
    };
    let bar = paint(cfg, v, border);

    let mut out = vec![top];
    out.push(format!(
        "{bar} {} {bar} {} {bar}",
        paint_bold(cfg, &pad_right(headers.0, LABEL_WIDTH), palette::SECONDARY),
        paint_bold(cfg, &pad_left(headers.1, value_width), palette::SECONDARY),
    ));
    out.push(sep);

    for (label, value, color) in rows {
        let mut chunks = wrap(value, value_width);
        if chunks.is_empty() {
            chunks.push(String::new());
        }
        for (i, chunk) in chunks.iter().enumerate() {
            let label = if i == 0 { label.as_str() } else { "" };
            let value = pad_left(chunk, value_width);
            out.push(format!(
                "{bar} {} {bar} {} {bar}",
                paint(cfg, &pad_right(label, LABEL_WIDTH), label_color),
                match color {
                    Some(c) => paint_bold(cfg, &value, *c),
                    None => paint(cfg, &value, palette::ACCENT),
                },
            ));
        }
    }
    out.push(bottom);
    out.join("\n")
}

/// Section divider, optionally titled
pub fn divider(cfg: &RenderConfig, title: Option<&str>) -> String {
    let width = cfg.divider_width();
    let line = match title {
        Some(title) => {
            let title_len = display_width(title);
            let padding = (width.saturating_sub(title_len + 4) / 2).max(2);
            let right = width.saturating_sub(padding + title_len + 4);
            format!("╭{}┤ {} ├{}╮", "─".repeat(padding), title, "─".repeat(right))
        }
        None => "─".repeat(width),
    };
    let indent = cfg.width.saturating_sub(display_width(&line)) / 2;
    format!("{}{}", " ".repeat(indent), paint(cfg, &line, palette::SECONDARY))
}

/// Title banner in three sizes
pub fn banner(cfg: &RenderConfig) -> String {
    let lines: Vec<String> = if cfg.width < 60 {
        vec!["⭐ WHO'S FAMOUS ⭐".into(), "Fame Analysis Tool".into()]
    } else if cfg.width < 80 {
        vec![
            "⭐ WHO'S FAMOUS TOOL ⭐".into(),
            "Analyze popularity & fun facts".into(),
        ]
    } else {
        vec![
            "⭐  WHO'S FAMOUS TOOL  ⭐".into(),
            "Analyze popularity and find facts about people".into(),
        ]
    };
    panel(
        cfg,
        Some("Fame Analysis"),
        &lines,
        PanelStyle::framed(palette::SECONDARY).centered(),
    )
}

fn results_section(cfg: &RenderConfig, assessment: &Assessment) -> String {
    let fame = &assessment.fame;
    let color = category_color(fame.category);

    let mut references = group_thousands(assessment.signal.value());
    if assessment.low_confidence() {
        references.push_str(" (estimated)");
    }

    let rows = vec![
        ("NAME".to_string(), assessment.query.to_string(), None),
        ("REFERENCES".to_string(), references, None),
        ("FAME SCORE".to_string(), format!("{:.1}/100", fame.score), Some(color)),
        ("CATEGORY".to_string(), fame.category.label().to_string(), Some(color)),
        ("DESCRIPTION".to_string(), fame.category.description().to_string(), None),
    ];

    let mut out = vec![
        divider(cfg, Some("FAME ANALYSIS RESULTS")),
        table(cfg, ("Metric", "Data"), &rows, palette::PRIMARY, palette::HIGHLIGHT),
    ];
    if assessment.low_confidence() {
        let note = "Low confidence: no engine returned results, so the signal was estimated.";
        for line in wrap(note, cfg.width.saturating_sub(2)) {
            out.push(format!("  {}", paint(cfg, &line, palette::WARNING)));
        }
    }
    out.join("\n")
}

fn engines_section(cfg: &RenderConfig, assessment: &Assessment) -> String {
    let rows: Vec<_> = assessment
        .engines
        .iter()
        .map(|result| {
            let value = match &result.outcome {
                EngineOutcome::Counted => group_thousands(result.value),
                EngineOutcome::HttpStatus(code) => format!("0 (HTTP {})", code),
                EngineOutcome::Failed(_) => "0 (failed)".to_string(),
            };
            (capitalize(&result.engine), value, None)
        })
        .collect();

    [
        divider(cfg, Some("SEARCH ENGINE DATA")),
        table(cfg, ("Engine", "Results"), &rows, palette::INFO, palette::SUCCESS),
    ]
    .join("\n")
}

fn status_section(cfg: &RenderConfig, assessment: &Assessment) -> String {
    let status = assessment.fame.status;
    let style = PanelStyle::framed(category_color(assessment.fame.category))
        .body(status_color(status))
        .bold()
        .centered();

    [
        divider(cfg, Some("FAME STATUS")),
        panel(cfg, None, &[status.headline().to_string()], style),
    ]
    .join("\n")
}

fn fact_section(cfg: &RenderConfig, assessment: &Assessment) -> String {
    let fact = &assessment.fact;
    if fact.text.is_empty() {
        return String::new();
    }

    let inner = cfg.panel_width().saturating_sub(4);
    let mut out = vec![
        divider(cfg, Some("INTERESTING FACT")),
        panel(
            cfg,
            None,
            &wrap(&fact.text, inner),
            PanelStyle::framed(palette::HIGHLIGHT).body(palette::NEUTRAL),
        ),
    ];
    if let Some(source) = &fact.source {
        out.push(paint(cfg, &format!("  Source: {}", source), palette::DARK));
    }
    out.join("\n")
}

/// Full decorated report for an assessment
pub fn report(cfg: &RenderConfig, assessment: &Assessment) -> String {
    let heading = format!("ANALYZING {}", assessment.query.as_str().to_uppercase());
    let sections = [
        divider(cfg, Some(heading.as_str())),
        results_section(cfg, assessment),
        engines_section(cfg, assessment),
        status_section(cfg, assessment),
        fact_section(cfg, assessment),
    ];
    sections
        .iter()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Closing footer
pub fn footer(cfg: &RenderConfig) -> String {
    [
        divider(cfg, Some("THANK YOU")),
        panel(
            cfg,
            None,
            &["Thanks for using WHO'S FAMOUS TOOL!".to_string()],
            PanelStyle::framed(palette::SECONDARY)
                .body(palette::PRIMARY)
                .bold()
                .centered(),
        ),
    ]
    .join("\n")
}

/// Error or notice panel
pub fn error_panel(cfg: &RenderConfig, title: &str, message: &str) -> String {
    let inner = cfg.panel_width().saturating_sub(4);
    panel(cfg, Some(title), &wrap(message, inner), PanelStyle::framed(palette::ERROR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fame_core::{EngineBreakdown, EngineResult, Fact, Query, Signal};

    fn plain(width: usize) -> RenderConfig {
        RenderConfig::new(width, 40, false)
    }

    fn sample(signal: Signal) -> Assessment {
        let engines: EngineBreakdown = vec![
            EngineResult::counted("ask", 3_000),
            EngineResult::http_status("aol", 503),
            EngineResult::counted("bing", 997_000),
            EngineResult::failed("ecosia", "timed out"),
        ]
        .into_iter()
        .collect();
        Assessment::new(
            Query::parse("Jane Doe").unwrap(),
            signal,
            engines,
            Fact::found("Jane Doe is a placeholder name. ".repeat(8), "https://example.org/Jane_Doe"),
        )
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap("the quick brown fox jumps over the lazy dog", 10);
        assert!(lines.iter().all(|l| display_width(l) <= 10));
        assert_eq!(lines.join(" "), "the quick brown fox jumps over the lazy dog");
    }

    #[test]
    fn test_display_width() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("🔥 HOT"), 6);
        assert_eq!(display_width("⭐️"), 2);
        assert_eq!(display_width("周杰伦"), 6);
    }

    #[test]
    fn test_wrap_breaks_long_words() {
        let lines = wrap("Supercalifragilisticexpialidocious", 10);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| display_width(l) <= 10));
    }

    #[test]
    fn test_wide_name_keeps_table_aligned() {
        let mut assessment = sample(Signal::Measured(1_000_000));
        assessment.query = Query::parse("周杰伦").unwrap();
        let cfg = plain(100);
        let out = report(&cfg, &assessment);

        let table_rows: Vec<usize> = out
            .lines()
            .filter(|l| l.starts_with('│'))
            .map(display_width)
            .collect();
        assert!(!table_rows.is_empty());
        assert!(table_rows.iter().all(|w| *w == table_rows[0]));
    }

    #[test]
    fn test_report_contents() {
        let out = report(&plain(100), &sample(Signal::Measured(1_000_000)));

        assert!(out.contains("ANALYZING JANE DOE"));
        assert!(out.contains("1,000,000"));
        assert!(out.contains("84.0/100"));
        assert!(out.contains("CELEBRITY"));
        assert!(out.contains("Well-known public figure"));
        assert!(out.contains("Aol"));
        assert!(out.contains("0 (HTTP 503)"));
        assert!(out.contains("0 (failed)"));
        assert!(out.contains("CELEBRITY STATUS!"));
        assert!(out.contains("Source: https://example.org/Jane_Doe"));
        assert!(!out.contains("Low confidence"));
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn test_report_flags_estimated_signal() {
        let out = report(&plain(100), &sample(Signal::Estimated(45_000)));
        assert!(out.contains("45,000 (estimated)"));
        assert!(out.contains("Low confidence"));
    }

    #[test]
    fn test_lines_fit_terminal() {
        for width in [40, 70, 100, 200] {
            let cfg = plain(width);
            let out = report(&cfg, &sample(Signal::Measured(5_000)));
            for line in out.lines() {
                assert!(display_width(line) <= cfg.width, "width {width}: {line:?}");
            }
        }
    }

    #[test]
    fn test_banner_tiers() {
        assert!(banner(&plain(50)).contains("Fame Analysis Tool"));
        assert!(banner(&plain(70)).contains("fun facts"));
        assert!(banner(&plain(100)).contains("find facts about people"));
    }

    #[test]
    fn test_colored_output() {
        let cfg = RenderConfig::new(100, 40, true);
        colored::control::set_override(true);
        assert!(error_panel(&cfg, "Error", "boom").contains('\u{1b}'));
    }

    #[test]
    fn test_width_is_capped() {
        let cfg = RenderConfig::new(500, 50, false);
        assert_eq!(cfg.width, 120);
        assert_eq!(cfg.terminal_width, 500);
    }
}

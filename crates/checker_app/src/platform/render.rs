use std::time::Duration;

use checker_core::{CheckSummary, ErrorKind, QueryKind, StatusView, ValidationError, ViewModel};
use chrono::{DateTime, Utc};

use super::cli::OutputMode;

/// Link shapes the backend scrapes. Anything else is still sent, as free text.
pub const SUPPORTED_FORMATS: [&str; 4] = [
    "http(s)://redd.it/{post_id}",
    "http(s)://www.reddit.com/r/{subreddit}/{post_id}/{post_title}/",
    "http(s)://x.com/{username}/status/{post_id}",
    "http(s)://x.com/i/web/status/{post_id}",
];

pub struct RenderContext {
    pub mode: OutputMode,
    pub now: DateTime<Utc>,
    /// Time since the latest submission, if it is known.
    pub elapsed: Option<Duration>,
}

pub fn help() -> Vec<String> {
    let mut lines = vec![
        "Enter a URL or text to check, e.g. https://x.com/username/status/12345".to_string(),
        "Commands: :clear (or :reset), :help, :quit".to_string(),
    ];
    lines.extend(format_lines());
    lines
}

pub fn rejection(err: &ValidationError) -> Vec<String> {
    let mut lines = vec![format!("! {err}")];
    lines.extend(format_lines());
    lines
}

fn format_lines() -> Vec<String> {
    let mut lines = vec!["Supported link formats:".to_string()];
    lines.extend(SUPPORTED_FORMATS.iter().map(|format| format!("  {format}")));
    lines
}

pub fn render(view: &ViewModel, context: &RenderContext) -> Vec<String> {
    match context.mode {
        OutputMode::Verbose => render_verbose(view, context),
        OutputMode::Compact => render_compact(view, context),
    }
}

fn render_verbose(view: &ViewModel, context: &RenderContext) -> Vec<String> {
    match &view.status {
        StatusView::Idle => vec!["Idle.".to_string()],
        StatusView::Pending {
            request_id,
            query,
            kind,
        } => vec![format!(
            "Checking #{request_id} ({}): {query} ...",
            kind_label(*kind)
        )],
        StatusView::Succeeded {
            request_id,
            query,
            query_kind,
            result,
        } => {
            let mut lines = vec![
                format!("=== Verdict #{request_id} ==="),
                format!("  query: {query}"),
            ];
            lines.extend(site_line(*query_kind));
            let summary = result.summary();
            if summary.is_empty() {
                lines.push(format!("  {}", result.as_json()));
            } else {
                lines.extend(summary_lines(&summary));
            }
            lines.extend(timing_lines(context));
            lines
        }
        StatusView::Failed {
            request_id,
            query,
            query_kind,
            kind,
            message,
        } => {
            let mut lines = vec![
                format!("Failed #{request_id} for {query}"),
                format!("  {message}"),
            ];
            lines.extend(site_line(*query_kind));
            if *kind == ErrorKind::Network {
                lines.push("  Is the backend running? Submit again to retry.".to_string());
            } else {
                lines.push("  The backend reply was unusable. Submit again to retry.".to_string());
            }
            lines.extend(timing_lines(context));
            lines
        }
    }
}

/// One line per finished check; pending checks print nothing.
fn render_compact(view: &ViewModel, context: &RenderContext) -> Vec<String> {
    let took = context
        .elapsed
        .map(|elapsed| format!(" ({:.3} s)", elapsed.as_secs_f64()))
        .unwrap_or_default();
    match &view.status {
        StatusView::Idle => vec!["Idle.".to_string()],
        StatusView::Pending { .. } => Vec::new(),
        StatusView::Succeeded {
            request_id,
            query,
            result,
            ..
        } => {
            let summary = result.summary();
            let verdict = match (summary.is_true, summary.truth_percentage, &summary.verdict) {
                (Some(is_true), Some(percentage), _) => {
                    format!("{}, {percentage:.1}% probability of truth", claim_label(is_true))
                }
                (Some(is_true), None, _) => claim_label(is_true).to_string(),
                (None, _, Some(verdict)) => verdict.clone(),
                (None, _, None) => result.as_json().to_string(),
            };
            vec![format!("#{request_id} {query}: {verdict}{took}")]
        }
        StatusView::Failed {
            request_id,
            query,
            message,
            ..
        } => vec![format!("#{request_id} {query}: failed, {message}{took}")],
    }
}

fn kind_label(kind: QueryKind) -> String {
    match kind {
        QueryKind::Link { site: Some(site) } => format!("{site} link"),
        QueryKind::Link { site: None } => "link".to_string(),
        QueryKind::Text => "text".to_string(),
    }
}

fn site_line(kind: QueryKind) -> Option<String> {
    match kind {
        QueryKind::Link { site: Some(site) } => Some(format!("  site: {site}")),
        _ => None,
    }
}

fn claim_label(is_true: bool) -> &'static str {
    if is_true {
        "likely true"
    } else {
        "likely false"
    }
}

fn summary_lines(summary: &CheckSummary) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(verdict) = &summary.verdict {
        lines.push(format!("  verdict: {verdict}"));
    }
    if let Some(is_true) = summary.is_true {
        lines.push(format!("  claim: {}", claim_label(is_true)));
    }
    if let Some(percentage) = summary.truth_percentage {
        lines.push(format!("  probability of truth: {percentage:.1}%"));
    }
    if let Some(justification) = &summary.justification {
        lines.push(format!("  justification: {justification}"));
    }
    if let Some(url) = &summary.url_checked {
        lines.push(format!("  checked: {url}"));
    }
    if let Some(status) = &summary.status {
        lines.push(format!("  status: {status}"));
    }
    lines
}

fn timing_lines(context: &RenderContext) -> Vec<String> {
    let mut lines = vec![format!("  at {}", context.now.to_rfc3339())];
    if let Some(elapsed) = context.elapsed {
        lines.push(format!("  took {:.3} s", elapsed.as_secs_f64()));
    }
    lines
}

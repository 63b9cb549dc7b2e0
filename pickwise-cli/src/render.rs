/// Terminal rendering of the pair on display.
use pickwise_core::Candidate;
use reqwest::Url;

/// Lowercased host of a URL, or the input unchanged if it does not parse
/// as an absolute URL with a host.
pub fn website_host(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| url.to_owned())
}

/// One card, labelled with the key that picks it.
pub fn render_card(label: &str, candidate: &Candidate) -> String {
    let mut lines = vec![
        format!("[{label}] {}", candidate.name),
        format!("    {}", candidate.address),
    ];

    let mut meta = Vec::new();
    if let Some(category) = candidate.category.as_deref().filter(|s| !s.is_empty()) {
        meta.push(category.to_string());
    }
    if let Some(cost) = candidate.cost.as_deref().filter(|s| !s.is_empty()) {
        meta.push(format!("💲 {cost}"));
    }
    if !meta.is_empty() {
        lines.push(format!("    {}", meta.join(" · ")));
    }

    if let Some(url) = candidate.website.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("    {}", website_host(url)));
    }
    if let Some(desc) = candidate.description.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("    {desc}"));
    }

    lines.join("\n")
}

/// Both cards plus the running comparison count and key help.
pub fn render_pair(left: &Candidate, right: &Candidate, comparisons: u64) -> String {
    format!(
        "\nComparisons so far: {comparisons}\n\n{}\n\n{}\n\nWhich do you prefer? [1/2, r = reset, q = quit] ",
        render_card("1", left),
        render_card("2", right),
    )
}

/// Output formatting: terminal table and JSON.
use pickwise_core::{Itinerary, RatingState, ScoredCandidate};
use serde::Serialize;

#[derive(Serialize)]
struct JsonScoredItem<'a> {
    rank: usize,
    name: &'a str,
    score: f64,
    rating: i64,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    items: Vec<JsonScoredItem<'a>>,
    comparisons: u64,
}

/// Print ranked scores as a formatted terminal table.
pub fn print_table(scores: &[ScoredCandidate], state: &RatingState) {
    let name_width = scores.iter()
        .map(|s| s.candidate.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4); // at least "Item"

    println!(" # | {:<name_width$} | Score | Rating", "Item");
    println!("---|-{}-|-------|-------", "-".repeat(name_width));

    for (i, s) in scores.iter().enumerate() {
        println!(
            "{:>2} | {:<name_width$} | {:>5.3} | {:>6}",
            i + 1, s.candidate.name, s.score, state.rating(&s.candidate.name),
        );
    }

    println!("\n{} items scored from {} comparisons", scores.len(), state.comparisons);
}

/// Print ranked scores as JSON.
pub fn print_json(scores: &[ScoredCandidate], state: &RatingState) {
    println!("{}", scores_json(scores, state));
}

fn scores_json(scores: &[ScoredCandidate], state: &RatingState) -> String {
    let items = scores
        .iter()
        .enumerate()
        .map(|(i, s)| JsonScoredItem {
            rank: i + 1,
            name: &s.candidate.name,
            score: s.score,
            rating: state.rating(&s.candidate.name),
        })
        .collect();

    let output = JsonOutput { items, comparisons: state.comparisons };
    serde_json::to_string_pretty(&output).unwrap_or_default()
}

/// Print an itinerary as a schedule.
pub fn print_itinerary(itinerary: &Itinerary) {
    if itinerary.events.is_empty() {
        println!("The itinerary is empty.");
        return;
    }
    for item in &itinerary.events {
        println!("{} - {}  {}", item.start, item.end, item.event.name);
        println!("              {}", item.event.address);
    }
}

pub fn print_itinerary_json(itinerary: &Itinerary) {
    println!("{}", serde_json::to_string_pretty(itinerary).unwrap_or_default());
}

/// Parsing of the user's answer to a pair prompt.
use pickwise_core::{Choice, Signal};

/// Map one line of terminal input to a signal. `None` means "ask again".
///
/// 1/a/left and 2/b/right choose a side, r/reset clears ratings,
/// q/quit/exit stops the session.
pub fn parse_signal(line: &str) -> Option<Signal> {
    match line.trim().to_ascii_lowercase().as_str() {
        "1" | "a" | "l" | "left" => Some(Signal::Choose(Choice::Left)),
        "2" | "b" | "right" => Some(Signal::Choose(Choice::Right)),
        "r" | "reset" => Some(Signal::Reset),
        "q" | "quit" | "exit" => Some(Signal::Stop),
        _ => None,
    }
}

use logos::Logos;

use self::token::{Token, BACKGROUND};

pub mod token;

/// A line of input split into arguments, with the background marker removed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandLine {
    pub args: Vec<String>,
    pub background: bool,
}

/// Splits `input` on runs of whitespace. A standalone trailing `&` is
/// dropped; nothing else is interpreted.
pub fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = words(input);
    if ends_with_marker(&tokens) {
        tokens.pop();
    }
    tokens
}

/// True when the line (ignoring trailing whitespace) ends in `&`.
pub fn is_background(input: &str) -> bool {
    input.trim_end().ends_with(BACKGROUND)
}

/// Tokenizes a line and resolves the background marker.
///
/// Both `sleep 5 &` and `sleep 5&` run in the background. Exactly one `&` is
/// consumed: the trailing `&` word if there is one, otherwise the last
/// character of the final word.
pub fn parse_line(input: &str) -> CommandLine {
    let background = is_background(input);
    let standalone = ends_with_marker(&words(input));
    let mut args = tokenize(input);

    // `cmd&` keeps the marker glued to its last word
    if background && !standalone {
        if let Some(last) = args.last_mut() {
            last.pop();
            if last.is_empty() {
                args.pop();
            }
        }
    }

    CommandLine { args, background }
}

fn words(input: &str) -> Vec<String> {
    // every non-blank run lexes as a word, so the lexer cannot fail
    Token::lexer(input)
        .filter_map(Result::ok)
        .map(|Token::Word(word)| word.to_owned())
        .collect()
}

fn ends_with_marker(tokens: &[String]) -> bool {
    tokens.last().is_some_and(|last| last == BACKGROUND)
}

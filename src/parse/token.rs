use logos::Logos;

/// Marker that requests background execution when it ends a line.
pub const BACKGROUND: &str = "&";

/// Everything between whitespace is an opaque word. Operators (`<`, `>`, `|`,
/// `&`) are only recognised later by comparing whole words, so `a>b` stays a
/// single argument.
#[derive(Debug, PartialEq, Logos)]
#[logos(skip r"\s+")]
pub enum Token<'a> {
    #[regex(r"\S+")]
    Word(&'a str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_words_and_operators_alike() {
        let tokens = Token::lexer("cat <  in.txt\t| wc -l")
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(
            tokens,
            vec![
                Token::Word("cat"),
                Token::Word("<"),
                Token::Word("in.txt"),
                Token::Word("|"),
                Token::Word("wc"),
                Token::Word("-l"),
            ]
        );
    }

    #[test]
    fn glued_operators_are_not_split() {
        let tokens = Token::lexer("echo a>b").collect::<Result<Vec<_>, _>>().unwrap();

        assert_eq!(tokens, vec![Token::Word("echo"), Token::Word("a>b")]);
    }
}

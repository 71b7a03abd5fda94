use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, multispace0},
    combinator::map,
    IResult,
};
use crate::token::{BracketToken, Span};

/// Anything that is not whitespace or a bracket belongs to an atom.
fn is_atom_char(c: char) -> bool {
    !c.is_whitespace() && c != '(' && c != ')'
}

fn bracket_token(input: &str) -> IResult<&str, BracketToken<'_>> {
    alt((
        map(char('('), |_| BracketToken::Open),
        map(char(')'), |_| BracketToken::Close),
        map(take_while1(is_atom_char), BracketToken::Atom),
    ))(input)
}

/// Split a bracket string like `(S (NP Alice) (VP ran))` into parens and
/// atoms, keeping byte spans for error reporting.
pub fn lex_brackets(original_input: &str) -> Vec<(Span, BracketToken<'_>)> {
    let mut input = original_input;
    let mut result = Vec::new();

    loop {
        // 1. Skip whitespace
        let (next_input, _) = match multispace0::<&str, nom::error::Error<&str>>(input) {
            Ok(res) => res,
            Err(_) => break,
        };
        input = next_input;

        if input.is_empty() {
            break;
        }

        // 2. Match a paren or an atom
        match bracket_token(input) {
            Ok((next_input, token)) => {
                let len = input.len() - next_input.len();
                let start = original_input.len() - input.len();

                result.push((Span::new(start, start + len), token));
                input = next_input;
            }
            Err(_) => {
                // Unreachable with the classes above, but never loop forever
                match input.chars().next() {
                    Some(c) => input = &input[c.len_utf8()..],
                    None => break,
                }
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_simple_phrase() {
        let tokens = lex_brackets("(NP the  cat)");
        let kinds: Vec<_> = tokens.iter().map(|(_, t)| *t).collect();

        assert_eq!(
            kinds,
            vec![
                BracketToken::Open,
                BracketToken::Atom("NP"),
                BracketToken::Atom("the"),
                BracketToken::Atom("cat"),
                BracketToken::Close,
            ]
        );
        // "cat" sits at bytes 9..12
        assert_eq!(tokens[3].0, Span::new(9, 12));
    }

    #[test]
    fn test_lex_handles_newlines_and_unicode() {
        let tokens = lex_brackets("(S\n\t(NP Zoë)\r\n)");
        assert_eq!(tokens.len(), 7);
        assert_eq!(tokens[4].1, BracketToken::Atom("Zoë"));
        assert_eq!(tokens[4].0.len(), "Zoë".len());
    }

    #[test]
    fn test_lex_empty() {
        assert!(lex_brackets("   \n").is_empty());
    }

    #[test]
    fn test_close_paren_ends_atom() {
        let tokens = lex_brackets("(NP it))");
        assert_eq!(tokens[2].1, BracketToken::Atom("it"));
        assert_eq!(tokens[3].1, BracketToken::Close);
        assert_eq!(tokens[4].1, BracketToken::Close);
    }
}

use itertools::{Itertools, PeekingNext};

use super::{LoadErrorType, Result};

#[derive(PartialEq, Debug)]
pub enum Token {
    Arrow,
    Or,
    Nonterminal(String),
    Terminal(String)
}

fn is_nonterminal_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '|' | '"' | '\'' | '#' | '-')
}

pub fn lex_terminal(line: &mut impl PeekingNext<Item = char>) -> Result<Token> {
    // Terminals may be quoted with either kind of quote, but must close with
    // the same one they opened with
    let quote = line.next().ok_or(LoadErrorType::UnmatchedQuote)?;
    let token_text: String = line.peeking_take_while(|&c| c != quote).collect();

    if line.next() != Some(quote) {
        return Err(LoadErrorType::UnmatchedQuote);
    }
    if token_text.is_empty() {
        return Err(LoadErrorType::EmptyTerminal);
    }

    Ok(Token::Terminal(token_text))
}

pub fn lex_nonterminal(line: &mut impl PeekingNext<Item = char>) -> Result<Token> {
    Ok(Token::Nonterminal(line.peeking_take_while(|&c| is_nonterminal_char(c)).collect()))
}

fn lex_arrow(line: &mut impl Iterator<Item = char>) -> Result<Token> {
    line.next(); // Consume dash
    match line.next() {
        Some('>') => Ok(Token::Arrow),
        _ => Err(LoadErrorType::UnexpectedCharacter('-')),
    }
}

pub fn lex_line(line: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();

    let mut line_chars = line.chars().peekable();

    while let Some(&c) = line_chars.peek() {
        match c {
            '#' => break,
            '-' => tokens.push(lex_arrow(&mut line_chars)?),
            '|' => {
                line_chars.next();
                tokens.push(Token::Or);
            }
            '"' | '\'' => tokens.push(lex_terminal(&mut line_chars)?),
            c if c.is_whitespace() => {
                line_chars.next();
            }
            _ => tokens.push(lex_nonterminal(&mut line_chars)?),
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;

    #[test]
    fn lex_normal_terminal() {
        let lines = vec![
            "\"alpha\" Bravo Charlie",
            "'delta'",
            "\"just as\"\"february\"",
            "\"don't\" 'say \"hi\"'"
        ];
        // (result from the function, rest of the iterator)
        let answers = vec![
            (Token::Terminal("alpha".to_string()), " Bravo Charlie"),
            (Token::Terminal("delta".to_string()), ""),
            (Token::Terminal("just as".to_string()), "\"february\""),
            (Token::Terminal("don't".to_string()), " 'say \"hi\"'")
        ];

        for (line, (answer_token, answer_rest)) in zip(lines, answers) {
            let mut chars = line.chars().peekable();
            assert_eq!(lex_terminal(&mut chars).unwrap(), answer_token);
            assert_eq!(chars.collect::<String>(), answer_rest);
        }
    }

    #[test]
    fn lex_malformed_terminal() {
        let lines = vec![
            "\"welcome",
            "'alpha bravo charlie\""
        ];

        for line in lines {
            let mut chars = line.chars().peekable();
            assert_eq!(lex_terminal(&mut chars).unwrap_err(), LoadErrorType::UnmatchedQuote);
        }

        let mut chars = "\"\" N".chars().peekable();
        assert_eq!(lex_terminal(&mut chars).unwrap_err(), LoadErrorType::EmptyTerminal);
    }

    #[test]
    fn lex_normal_nonterminal() {
        let lines = vec![
            "Alpha Bravo Charlie",
            "Delta",
            "NP|VP",
            "Det->\"the\""
        ];
        // (result from the function, rest of the iterator)
        let answers = vec![
            (Token::Nonterminal("Alpha".to_string()), " Bravo Charlie"),
            (Token::Nonterminal("Delta".to_string()), ""),
            (Token::Nonterminal("NP".to_string()), "|VP"),
            (Token::Nonterminal("Det".to_string()), "->\"the\"")
        ];

        for (line, (answer_token, answer_rest)) in zip(lines, answers) {
            let mut chars = line.chars().peekable();
            assert_eq!(lex_nonterminal(&mut chars).unwrap(), answer_token);
            assert_eq!(chars.collect::<String>(), answer_rest);
        }
    }

    #[test]
    fn lex_normal_line() {
        let lines = vec![
            "S -> NP VP | NP VP Adv",
            "Conj -> \"and\" | 'until'  # joins clauses",
            "Det->\"the\"|\"a\"",
            "# only a comment"
        ];
        let answers = vec![
            vec![
                Token::Nonterminal("S".to_string()),
                Token::Arrow,
                Token::Nonterminal("NP".to_string()),
                Token::Nonterminal("VP".to_string()),
                Token::Or,
                Token::Nonterminal("NP".to_string()),
                Token::Nonterminal("VP".to_string()),
                Token::Nonterminal("Adv".to_string())
            ],
            vec![
                Token::Nonterminal("Conj".to_string()),
                Token::Arrow,
                Token::Terminal("and".to_string()),
                Token::Or,
                Token::Terminal("until".to_string())
            ],
            vec![
                Token::Nonterminal("Det".to_string()),
                Token::Arrow,
                Token::Terminal("the".to_string()),
                Token::Or,
                Token::Terminal("a".to_string())
            ],
            vec![]
        ];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(lex_line(line).unwrap(), answer)
        }
    }

    #[test]
    fn lex_stray_dash() {
        assert_eq!(lex_line("S - NP").unwrap_err(), LoadErrorType::UnexpectedCharacter('-'));
        assert_eq!(lex_line("S -").unwrap_err(), LoadErrorType::UnexpectedCharacter('-'));
    }
}

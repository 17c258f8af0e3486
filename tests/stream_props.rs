use ilex::lexer::{tokenize, LexerConfig, Tokenizer};
use proptest::prelude::*;

const ALPHABET: &str = "[a-zA-Z0-9_ ,;:()=+*/<>#|.\\[\\]{}\"'\\\\\n\t$@-]{0,64}";

fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\n' | '\r' | '\t')
}

proptest! {
    #[test]
    fn tokens_cover_every_non_whitespace_byte(source in ALPHABET, hex in any::<bool>()) {
        let tokens = tokenize(source.as_bytes(), LexerConfig { hex_by_default: hex });

        let rebuilt: String = tokens.iter().map(|token| token.text()).collect();
        let expected: String = source.chars().filter(|&ch| !is_whitespace(ch)).collect();
        prop_assert_eq!(rebuilt, expected);

        let mut previous_end = 0;
        for token in &tokens {
            prop_assert!(!token.text().is_empty());
            prop_assert!(token.span.start() >= previous_end);
            prop_assert_eq!(&source[token.span.start()..token.span.end()], token.text());
            previous_end = token.span.end();
        }
    }

    #[test]
    fn peek_never_moves_the_cursor(source in ALPHABET, skip in 0usize..8) {
        let mut tokenizer = Tokenizer::from(source.as_str());
        for _ in 0..skip {
            tokenizer.next_token();
        }

        let before = tokenizer.cursor();
        let first = tokenizer.peek();
        let second = tokenizer.peek();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(tokenizer.cursor(), before);
        let next = tokenizer.next_token();
        prop_assert_eq!(next.text(), first.as_ref());
    }

    #[test]
    fn progress_is_monotonic_and_ends_complete(source in ALPHABET) {
        let mut tokenizer = Tokenizer::from(source.as_str());
        let mut last = tokenizer.progress();
        prop_assert!(source.is_empty() || last == 0.0);

        while !tokenizer.next_token().is_end() {
            let now = tokenizer.progress();
            prop_assert!(now >= last);
            last = now;
        }

        prop_assert!(tokenizer.completed_stream());
        prop_assert!(tokenizer.progress() >= 1.0);
    }
}

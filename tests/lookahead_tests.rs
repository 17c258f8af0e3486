use ilex::lexer::{TokenKind, Tokenizer};

#[test]
fn expect_string_advances_on_match() {
    let mut tokenizer = Tokenizer::from("foobar");

    let token = tokenizer.expect_string("foo").expect("prefix should match");
    assert_eq!(token.kind, TokenKind::String);
    assert_eq!(token.text(), "foo");
    assert_eq!(tokenizer.cursor(), 3);
    assert_eq!(tokenizer.read(3).text(), "bar");
}

#[test]
fn expect_string_restores_cursor_on_mismatch() {
    let mut tokenizer = Tokenizer::from("foobar");
    tokenizer.expect_string("foo");

    let before = tokenizer.cursor();
    assert!(tokenizer.expect_string("baz").is_none());
    assert_eq!(tokenizer.cursor(), before);
}

#[test]
fn expect_string_restores_skipped_whitespace_too() {
    let mut tokenizer = Tokenizer::from("   value");
    assert!(tokenizer.expect_string("other").is_none());
    assert_eq!(tokenizer.cursor(), 0);
}

#[test]
fn expect_string_matches_across_inner_whitespace() {
    let mut tokenizer = Tokenizer::from("  end of line");
    let token = tokenizer.expect_string("end of").expect("raw read spans spaces");
    assert_eq!(token.text(), "end of");
    assert_eq!(tokenizer.next_token().text(), "line");
}

#[test]
fn expect_kind_restores_cursor_on_mismatch() {
    let mut tokenizer = Tokenizer::from("  42 x");

    assert!(tokenizer.expect_kind(TokenKind::String).is_none());
    assert_eq!(tokenizer.cursor(), 0);

    let number = tokenizer.expect_kind(TokenKind::Decimal).expect("decimal expected");
    assert_eq!(number.text(), "42");
    assert!(tokenizer.expect_kind(TokenKind::String).is_some());
}

#[test]
fn expect_kind_hex_reads_leading_hex_letters() {
    let token = Tokenizer::from("beef")
        .expect_kind(TokenKind::Hex)
        .expect("hex expected");
    assert_eq!(token.text(), "beef");

    let token = Tokenizer::from("beef")
        .expect_kind(TokenKind::String)
        .expect("string expected");
    assert_eq!(token.text(), "beef");
}

#[test]
fn read_takes_raw_bytes_after_leading_whitespace() {
    let mut tokenizer = Tokenizer::from("  hello, world");
    let token = tokenizer.read(9);
    assert_eq!(token.kind, TokenKind::String);
    assert_eq!(token.text(), "hello, wo");
}

#[test]
fn read_stops_at_end_of_buffer() {
    let mut tokenizer = Tokenizer::from("abc");
    assert_eq!(tokenizer.read(100).text(), "abc");
    assert!(tokenizer.completed_stream());
    assert_eq!(tokenizer.read(4).text(), "");
}

#[test]
fn zero_length_read_does_not_move() {
    let mut tokenizer = Tokenizer::from("   abc");
    let token = tokenizer.read(0);
    assert_eq!(token.kind, TokenKind::String);
    assert_eq!(token.text(), "");
    assert_eq!(tokenizer.cursor(), 0);
}

#[test]
fn read_to_leaves_the_delimiter_in_place() {
    let mut tokenizer = Tokenizer::from("key = some value; next");

    assert_eq!(tokenizer.next_token().text(), "key");
    let value = tokenizer.read_to(b';');
    assert_eq!(value.kind, TokenKind::String);
    assert_eq!(value.text(), "= some value");
    assert_eq!(tokenizer.next_token().kind, TokenKind::SemiColon);
    assert_eq!(tokenizer.next_token().text(), "next");
}

#[test]
fn read_to_without_delimiter_takes_the_rest() {
    let mut tokenizer = Tokenizer::from("tail end");
    assert_eq!(tokenizer.read_to(b';').text(), "tail end");
    assert!(tokenizer.completed_stream());
}

#[test]
fn read_to_sees_a_delimiter_at_the_first_position() {
    let mut tokenizer = Tokenizer::from("\"\" after");

    assert!(tokenizer.expect_kind(TokenKind::Quote).is_some());
    assert_eq!(tokenizer.read_to(b'"').text(), "");
    assert!(tokenizer.expect_kind(TokenKind::Quote).is_some());
    assert_eq!(tokenizer.next_token().text(), "after");
}

#[test]
fn read_to_stalls_until_the_caller_consumes_the_delimiter() {
    let mut tokenizer = Tokenizer::from("a,b");
    let mut fields = Vec::new();

    while !tokenizer.completed_stream() {
        let field = tokenizer.read_to(b',');
        fields.push(field.text().to_owned());

        let before = tokenizer.cursor();
        assert_eq!(tokenizer.read_to(b',').text(), "");
        assert_eq!(tokenizer.cursor(), before);

        let _ = tokenizer.expect_kind(TokenKind::Comma);
    }

    assert_eq!(fields, ["a", "b"]);
}

#[test]
fn peek_is_repeatable_and_non_destructive() {
    let mut tokenizer = Tokenizer::from("  first second");
    let before = tokenizer.cursor();

    let once = tokenizer.peek();
    let twice = tokenizer.peek();
    assert_eq!(once, "first");
    assert_eq!(once, twice);
    assert_eq!(tokenizer.cursor(), before);

    assert_eq!(tokenizer.next_token().text(), "first");
    assert_eq!(tokenizer.peek_token().text(), "second");
}

#[test]
fn peek_at_end_is_empty() {
    let mut tokenizer = Tokenizer::from("   ");
    assert_eq!(tokenizer.peek(), "");
    assert_eq!(tokenizer.cursor(), 0);
}

#[test]
fn cursor_snapshots_can_be_restored() {
    let mut tokenizer = Tokenizer::from("a b c");
    tokenizer.next_token();
    let checkpoint = tokenizer.cursor();

    assert_eq!(tokenizer.next_token().text(), "b");
    assert_eq!(tokenizer.next_token().text(), "c");

    tokenizer.rewind(checkpoint);
    assert_eq!(tokenizer.next_token().text(), "b");

    tokenizer.rewind(usize::MAX);
    assert!(tokenizer.completed_stream());
    assert_eq!(tokenizer.cursor(), 5);
}

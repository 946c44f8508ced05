//! Plain-text rendering of HTML bodies, for clients that do not display HTML.
use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{
    BufferQueue, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};

/// Converts `html` into plain text.
///
/// Tags are dropped and every run of character data between two pieces of
/// markup is followed by a blank line, whatever the nesting. The result is
/// trimmed. Only the token stream is looked at, so stray or unclosed tags
/// split the text like any other tag and never cause a failure.
pub fn html_to_plain_text(html: &str) -> String {
    let mut input = BufferQueue::new();
    input.push_back(StrTendril::from_slice(html));

    // Built fresh for every conversion; nothing is shared between calls.
    let mut tokenizer = Tokenizer::new(TextCollector::default(), TokenizerOpts::default());
    let _ = tokenizer.feed(&mut input);
    tokenizer.end();
    tokenizer.sink.finish()
}

#[derive(Default)]
struct TextCollector {
    pending: String,
    text: String,
}

impl TextCollector {
    // A run may arrive in several character tokens, e.g. around `&amp;`.
    fn handle_data(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        self.text.push_str(&self.pending);
        self.text.push_str("\n\n");
        self.pending.clear();
    }

    fn finish(mut self) -> String {
        self.handle_data();
        self.text.trim().to_string()
    }
}

impl TokenSink for TextCollector {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::CharacterTokens(data) => self.pending.push_str(&data),
            Token::NullCharacterToken => self.pending.push('\0'),
            Token::ParseError(_) => {}
            Token::TagToken(_)
            | Token::CommentToken(_)
            | Token::DoctypeToken(_)
            | Token::EOFToken => self.handle_data(),
        }
        TokenSinkResult::Continue
    }
}

//! Literal-aware source scanning.
//!
//! Dependency patterns are matched against a *filtered* view of each source
//! file, never against the raw text:
//!
//! * `//` line comments and `/* */` block comments are removed (an
//!   unterminated block comment runs to the end of the input);
//! * quoted literals (`'`, `"`, `` ` ``, backslash escapes honoured) survive
//!   only when their body looks like an identifier (letters, digits and
//!   `_ $ . - /`), re-quoted with single quotes; every other literal becomes
//!   `''`, so declaration syntax inside a string never matches;
//! * regular expression literals are dropped;
//! * whitespace outside literals is removed.
//!
//! The *minified* view used for `--minify` output removes comments with the
//! same rules, keeps literals verbatim, trims every line and drops blank
//! lines. Line breaks are kept so automatic semicolon insertion still sees
//! them.
//!
//! Regex literals are recognised by the usual heuristic: a `/` that follows
//! an operator, an opening bracket or nothing at all. A postfix `++`/`--`
//! ends an operand, so `i++ / 2` is a division.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Filter,
    Minify,
}

/// Filtered view used for dependency scanning.
#[must_use]
pub fn filtered_view(source: &str) -> String {
    Scanner::new(source, Mode::Filter).run()
}

/// Comment-free, whitespace-trimmed view used for minified output.
#[must_use]
pub fn minified_view(source: &str) -> String {
    Scanner::new(source, Mode::Minify).run()
}

fn is_identifier_shaped(body: &str) -> bool {
    !body.is_empty()
        && body.chars().all(|c| c.is_alphanumeric() || matches!(c, '_' | '$' | '.' | '-' | '/'))
}

fn starts_regex(prev: Option<char>) -> bool {
    match prev {
        None => true,
        Some(c) => "(,=:[!&|?{};+-*%<>~^".contains(c),
    }
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
    mode: Mode,
    out: String,
    line: String,
    prev: Option<char>,
    postfix: bool,
}

impl Scanner {
    fn new(source: &str, mode: Mode) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            mode,
            out: String::with_capacity(source.len()),
            line: String::new(),
            prev: None,
            postfix: false,
        }
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn run(mut self) -> String {
        while let Some(c) = self.peek(0) {
            match c {
                '/' if self.peek(1) == Some('/') => self.skip_line_comment(),
                '/' if self.peek(1) == Some('*') => self.skip_block_comment(),
                '/' if !self.postfix && starts_regex(self.prev) => self.regex_literal(),
                '\'' | '"' | '`' => self.string_literal(c),
                '\n' => {
                    self.pos += 1;
                    self.newline();
                }
                c if c.is_whitespace() => {
                    self.pos += 1;
                    if self.mode == Mode::Minify {
                        self.line.push(c);
                    }
                }
                c => {
                    self.pos += 1;
                    // Second half of `++` or `--`, unless that pair was already closed.
                    self.postfix = matches!(c, '+' | '-') && self.prev == Some(c) && !self.postfix;
                    self.prev = Some(c);
                    self.line.push(c);
                }
            }
        }
        self.newline();
        if self.mode == Mode::Minify && self.out.ends_with('\n') {
            self.out.pop();
        }
        self.out
    }

    fn newline(&mut self) {
        match self.mode {
            Mode::Filter => self.out.push_str(&self.line),
            Mode::Minify => {
                let trimmed = self.line.trim();
                if !trimmed.is_empty() {
                    self.out.push_str(trimmed);
                    self.out.push('\n');
                }
            }
        }
        self.line.clear();
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek(0) {
            if c == '\n' {
                break;
            }
            self.pos += 1;
        }
    }

    fn skip_block_comment(&mut self) {
        self.pos += 2;
        let mut spans_lines = false;
        while let Some(c) = self.peek(0) {
            if c == '*' && self.peek(1) == Some('/') {
                self.pos += 2;
                break;
            }
            spans_lines |= c == '\n';
            self.pos += 1;
        }
        if spans_lines {
            self.newline();
        } else if self.mode == Mode::Minify {
            self.line.push(' ');
        }
    }

    fn regex_literal(&mut self) {
        let start = self.pos;
        self.pos += 1;
        let mut in_class = false;
        while let Some(c) = self.peek(0) {
            match c {
                '\n' => break,
                '\\' => self.pos += 1,
                '[' => in_class = true,
                ']' => in_class = false,
                '/' if !in_class => {
                    self.pos += 1;
                    break;
                }
                _ => {}
            }
            self.pos += 1;
        }
        // Flags.
        while self.peek(0).is_some_and(char::is_alphanumeric) {
            self.pos += 1;
        }
        let end = self.pos.min(self.chars.len());
        if self.mode == Mode::Minify {
            self.line.extend(&self.chars[start..end]);
        }
        self.prev = Some('/');
        self.postfix = false;
    }

    fn string_literal(&mut self, quote: char) {
        let start = self.pos;
        self.pos += 1;
        let body_start = self.pos;
        let mut body_end = self.chars.len();
        while let Some(c) = self.peek(0) {
            if c == '\\' {
                self.pos += 2;
                continue;
            }
            if c == '\n' && quote != '`' {
                body_end = self.pos;
                break;
            }
            if c == quote {
                body_end = self.pos;
                self.pos += 1;
                break;
            }
            self.pos += 1;
        }
        let end = self.pos.min(self.chars.len());
        let body_end = body_end.min(end);

        match self.mode {
            Mode::Filter => {
                let body: String = self.chars[body_start..body_end].iter().collect();
                self.line.push('\'');
                if is_identifier_shaped(&body) {
                    self.line.push_str(&body);
                }
                self.line.push('\'');
            }
            Mode::Minify => self.line.extend(&self.chars[start..end]),
        }
        self.prev = Some(quote);
        self.postfix = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn filtered_view_strips_comments_and_whitespace() {
        let source = "/*global Ext*/\nExt.define('Demo.controller.Main', {\n    // requires: ['Nope'],\n    extend: 'Ext.app.Controller' /* inline */\n});\n";
        assert_eq!(
            filtered_view(source),
            "Ext.define('Demo.controller.Main',{extend:'Ext.app.Controller'});"
        );
    }

    #[test]
    fn double_quotes_are_normalized() {
        assert_eq!(
            filtered_view(r#"requires: ["Demo.view.MainView", 'DemoSingleton']"#),
            "requires:['Demo.view.MainView','DemoSingleton']"
        );
    }

    #[test]
    fn declarations_inside_strings_are_blanked() {
        let source = r#"var help = "requires: ['Demo.Hidden']"; var url = 'http://example.com';"#;
        assert_eq!(filtered_view(source), "varhelp='';varurl='';");
    }

    #[test]
    fn comment_markers_inside_strings_are_kept_as_strings() {
        let source = "var a = '/* not a comment'; requires: ['Demo.A']";
        assert_eq!(filtered_view(source), "vara='';requires:['Demo.A']");
    }

    #[test]
    fn regex_literals_are_dropped_from_filtered_view() {
        let source = "var re = /\\/\\//g; requires: ['Demo.A']";
        assert_eq!(filtered_view(source), "varre=;requires:['Demo.A']");
    }

    #[test]
    fn division_is_not_a_regex() {
        assert_eq!(filtered_view("var x = a / b / c;"), "varx=a/b/c;");
    }

    #[test]
    fn division_after_postfix_increment_keeps_the_rest_of_the_line() {
        let source = "var h = i++ / 2; Ext.define('App.Main', { requires: ['App.B'] });";
        assert_eq!(
            filtered_view(source),
            "varh=i++/2;Ext.define('App.Main',{requires:['App.B']});"
        );
        assert_eq!(
            filtered_view("var h = i-- / 2; requires: ['App.C']"),
            "varh=i--/2;requires:['App.C']"
        );
    }

    #[test]
    fn regex_after_plain_operator_is_still_dropped() {
        assert_eq!(
            filtered_view("x = a + /b/g.source; requires: ['App.D']"),
            "x=a+.source;requires:['App.D']"
        );
    }

    #[test]
    fn unterminated_block_comment_runs_to_end() {
        assert_eq!(filtered_view("a: 1 /* requires: ['X']"), "a:1");
    }

    #[test]
    fn minified_view_keeps_lines_and_literals() {
        let source = "/**\n * Docs\n */\nExt.define('Demo.A', {\n\n    title: 'Hello  //  world', // trailing\n    width: 100\n});\n";
        assert_eq!(
            minified_view(source),
            "Ext.define('Demo.A', {\ntitle: 'Hello  //  world',\nwidth: 100\n});"
        );
    }

    #[test]
    fn minified_view_keeps_multiline_template_literal() {
        let source = "var t = `a\n    b`;\n";
        assert_eq!(minified_view(source), "var t = `a\n    b`;");
    }
}

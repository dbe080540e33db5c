//! LaTeX-flavored input to plain algebraic text.
//!
//! Handles the subset a math input field produces: `\frac{a}{b}`,
//! `\sqrt{a}`, `\sqrt[n]{a}`, `^{...}`, `\cdot`, `\times`, `\left( \right)`,
//! `\left| \right|`, `\pi` and named functions such as `\sin`. Remaining
//! braces become parentheses. The output is meant for [`super::compile`].

const FUNCTION_COMMANDS: &[&str] = &[
    "sin", "cos", "tan", "sec", "csc", "cot", "arcsin", "arccos", "arctan", "sinh", "cosh",
    "tanh", "ln", "log", "exp",
];

/// Converts LaTeX-flavored math into the evaluator's algebraic syntax.
#[must_use]
pub fn normalize(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut cursor = Cursor { chars: &chars, pos: 0 };
    let out = cursor.sequence(None);
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

struct Cursor<'a> {
    chars: &'a [char],
    pos: usize,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_spaces(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    /// Normalizes until `terminator` (consumed) or end of input.
    fn sequence(&mut self, terminator: Option<char>) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            self.pos += 1;
            if Some(c) == terminator {
                break;
            }
            match c {
                '\\' => self.command(&mut out),
                '{' => {
                    let inner = self.sequence(Some('}'));
                    out.push('(');
                    out.push_str(&inner);
                    out.push(')');
                }
                '}' => out.push(')'),
                '[' => out.push('('),
                ']' => out.push(')'),
                _ => out.push(c),
            }
        }
        out
    }

    /// A `{...}` group, or a single character when no brace follows.
    fn group(&mut self) -> String {
        self.skip_spaces();
        match self.peek() {
            Some('{') => {
                self.pos += 1;
                self.sequence(Some('}'))
            }
            Some('\\') => {
                self.pos += 1;
                let mut out = String::new();
                self.command(&mut out);
                out
            }
            Some(c) => {
                self.pos += 1;
                c.to_string()
            }
            None => String::new(),
        }
    }

    fn command_name(&mut self) -> String {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.pos += 1;
        }
        if self.pos == start {
            // Single-symbol commands such as `\,` or `\{`.
            if let Some(c) = self.peek() {
                self.pos += 1;
                return c.to_string();
            }
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn command(&mut self, out: &mut String) {
        let name = self.command_name();
        match name.as_str() {
            "frac" | "dfrac" | "tfrac" => {
                let num = self.group();
                let den = self.group();
                out.push_str(&format!("(({num})/({den}))"));
            }
            "sqrt" => {
                self.skip_spaces();
                let degree = if self.peek() == Some('[') {
                    self.pos += 1;
                    Some(self.sequence(Some(']')))
                } else {
                    None
                };
                let radicand = self.group();
                match degree {
                    Some(n) => out.push_str(&format!("nthRoot({radicand},{n})")),
                    None => out.push_str(&format!("sqrt({radicand})")),
                }
            }
            "cdot" | "times" | "ast" => out.push('*'),
            "div" => out.push('/'),
            "left" | "right" => self.delimiter(&name, out),
            "pi" => out.push_str(" pi "),
            "{" => out.push('('),
            "}" => out.push(')'),
            "," | ";" | ":" | "!" | " " | "quad" | "qquad" => out.push(' '),
            n if FUNCTION_COMMANDS.contains(&n) => self.function(n, out),
            other => out.push_str(other),
        }
    }

    fn delimiter(&mut self, side: &str, out: &mut String) {
        self.skip_spaces();
        let Some(c) = self.peek() else { return };
        self.pos += 1;
        match (side, c) {
            ("left", '|') => out.push_str("abs("),
            ("right", '|') => out.push(')'),
            ("left", '(' | '[') => out.push('('),
            ("right", ')' | ']') => out.push(')'),
            ("left", '\\') | ("right", '\\') => {
                let inner = self.command_name();
                out.push(if side == "left" || inner == "{" { '(' } else { ')' });
            }
            // `\left.` and other invisible delimiters.
            _ => {}
        }
    }

    /// `\sin x` becomes `sin(x)`; `\sin(x)` and `\sin{x}` pass through.
    fn function(&mut self, name: &str, out: &mut String) {
        out.push_str(name);
        self.skip_spaces();
        match self.peek() {
            Some('(' | '{') | None => {}
            Some('\\') => {
                let arg = self.group();
                out.push_str(&format!("({arg})"));
            }
            Some(_) => {
                let start = self.pos;
                while self
                    .peek()
                    .is_some_and(|c| c.is_ascii_alphanumeric() || c == '.')
                {
                    self.pos += 1;
                }
                let arg: String = self.chars[start..self.pos].iter().collect();
                out.push_str(&format!("({arg})"));
            }
        }
    }
}

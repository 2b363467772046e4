use std::io::{self, BufRead, Write};

use clinixa_core::Field;

use super::ui::constants::{field_label, field_placeholder};

/// Line-oriented terminal input. `None` from any `ask*` method means end of input.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn print_lines<I, S>(&mut self, lines: I) -> io::Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            writeln!(self.output, "{}", line.as_ref())?;
        }
        self.output.flush()
    }

    /// Asks for one field. Enter keeps `current`; `-` clears it.
    pub fn ask_field(
        &mut self,
        field: Field,
        current: &str,
        error: Option<&str>,
    ) -> io::Result<Option<String>> {
        if let Some(error) = error {
            writeln!(self.output, "  ! {error}")?;
        }
        if current.is_empty() {
            write!(
                self.output,
                "{} ({}): ",
                field_label(field),
                field_placeholder(field)
            )?;
        } else {
            write!(self.output, "{} [{}]: ", field_label(field), current)?;
        }
        self.output.flush()?;

        let Some(line) = self.read_line()? else {
            return Ok(None);
        };
        let value = match line.as_str() {
            "" => current.to_string(),
            "-" => String::new(),
            _ => line,
        };
        Ok(Some(value))
    }

    /// Asks until one of `choices` (by first letter) is entered.
    pub fn choose(&mut self, question: &str, choices: &[(char, &str)]) -> io::Result<Option<char>> {
        let menu = choices
            .iter()
            .map(|(key, label)| format!("[{key}] {label}"))
            .collect::<Vec<_>>()
            .join("  ");
        loop {
            write!(self.output, "{question} {menu}: ")?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            let picked = line
                .chars()
                .next()
                .map(|c| c.to_ascii_lowercase())
                .filter(|c| choices.iter().any(|(key, _)| key == c));
            if picked.is_some() {
                return Ok(picked);
            }
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

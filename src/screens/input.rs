use crate::birth_date::BirthDate;
use std::io::{self, BufRead, Write};
use tracing::debug;

const PROMPT: &str = "Enter your birth date (DD/MM/YYYY): ";

/// Asks for a birth date until a valid one is entered.
///
/// Returns `None` when the input ends, or when the user types `q`.
pub(crate) fn prompt_birth_date<R, W>(input: &mut R, output: &mut W) -> io::Result<Option<BirthDate>>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "Discover the superhero hiding in your birth month.")?;
    let mut line = String::new();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(None);
        }
        let answer = line.trim();
        if answer.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        match answer.parse::<BirthDate>() {
            Ok(date) => {
                debug!("birth date entered: {date}");
                return Ok(Some(date));
            }
            Err(e) => writeln!(output, "{e}, please try again.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(input: &str) -> (Option<BirthDate>, String) {
        let mut output = Vec::new();
        let date = prompt_birth_date(&mut Cursor::new(input), &mut output).expect("io failed");
        (date, String::from_utf8(output).expect("invalid utf8"))
    }

    #[test]
    fn accepts_the_first_valid_date() {
        let (date, output) = run("14/02/1995\n");
        assert_eq!(date.map(|date| date.month()), Some(2));
        assert_eq!(output.matches(PROMPT).count(), 1);
    }

    #[test]
    fn retries_until_valid() {
        let (date, output) = run("hello\n31/02/1990\n\n01/12/1980\n");
        assert_eq!(date, BirthDate::new(1, 12, 1980).ok());
        assert_eq!(output.matches(PROMPT).count(), 4);
        assert!(output.contains("month 2 has 28 days"));
    }

    #[test]
    fn end_of_input() {
        assert_eq!(run("nope\n").0, None);
        assert_eq!(run("").0, None);
    }

    #[test]
    fn quit() {
        assert_eq!(run("q\n10/10/2010\n").0, None);
    }
}

use std::io::{BufRead, Write};

use kinefit_kinematics::KinematicModel;
use tracing::{debug, info};

use crate::report::PRECISION;

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// `q`, any case.
    Quit,
    /// A parsed time. Not yet checked against the model domain.
    Query(f64),
    /// Neither a number nor `q`.
    Invalid,
}

/// Parses a line after trimming surrounding whitespace and lowercasing it.
pub fn parse_command(line: &str) -> Command {
    let line = line.trim().to_lowercase();
    if line == "q" {
        return Command::Quit;
    }
    match line.parse::<f64>() {
        Ok(t) => Command::Query(t),
        Err(_) => Command::Invalid,
    }
}

/// Prompts for times on `output` and answers them until `q` or end of input.
///
/// Times outside the model domain and unparseable lines are reported and the
/// loop keeps going.
pub fn run<R: BufRead, W: Write>(
    model: &KinematicModel,
    mut input: R,
    output: &mut W,
) -> anyhow::Result<()> {
    let domain = model.domain();
    let mut line = String::new();

    loop {
        write!(
            output,
            "Enter a time t (s) between {} and {}, or 'q' to quit: ",
            domain.start(),
            domain.end()
        )?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            info!("End of input reached, leaving query loop.");
            return Ok(());
        }

        match parse_command(&line) {
            Command::Quit => {
                writeln!(output, "Goodbye!")?;
                info!("Quit requested.");
                return Ok(());
            }
            Command::Query(t) => match model.evaluate(t) {
                Ok(state) => {
                    writeln!(output, "  a({:.3}) = {:.*} m/s^2", t, PRECISION, state.acceleration)?;
                    writeln!(output, "  v({:.3}) = {:.*} m/s", t, PRECISION, state.velocity)?;
                    writeln!(output, "  x({:.3}) = {:.*} m\n", t, PRECISION, state.position)?;
                }
                Err(e) => {
                    debug!(t, %e, "Rejected query.");
                    writeln!(
                        output,
                        "  -- Please enter a value between {} and {}.",
                        domain.start(),
                        domain.end()
                    )?;
                }
            },
            Command::Invalid => {
                debug!(input = line.trim(), "Unparseable query.");
                writeln!(
                    output,
                    "  -- Invalid input. Type a number (e.g. 0.12) or 'q' to quit."
                )?;
            }
        }
    }
}

mod session;

use std::env;
use std::io::{self, BufRead, Write};
use std::process;

use session::Session;

fn main() -> io::Result<()> {
    let fail_at = parse_fail_at().unwrap_or_else(|err| {
        eprintln!("{err}");
        eprintln!("Usage: panel-emulator [--fail-at <record-index>]");
        process::exit(2);
    });

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let stdout = io::stdout();
    let mut writer = stdout.lock();
    let mut session = Session::new(fail_at)?;
    let mut line = String::new();

    writeln!(
        writer,
        "BV055HDE Panel Emulator ready. Type `help` for commands or `exit` to quit."
    )?;

    loop {
        line.clear();
        write!(writer, "> ")?;
        writer.flush()?;

        let bytes_read = reader.read_line(&mut line)?;
        if bytes_read == 0 {
            writeln!(writer)?;
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if should_terminate(trimmed) {
            writeln!(writer, "Session closed.")?;
            break;
        }

        let responses = session.handle_command(trimmed)?;
        for response in responses {
            writeln!(writer, "{response}")?;
        }
    }

    Ok(())
}

fn should_terminate(input: &str) -> bool {
    input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit")
}

fn parse_fail_at() -> Result<Option<usize>, String> {
    let mut args = env::args().skip(1);
    let Some(arg) = args.next() else {
        return Ok(None);
    };

    let value = if let Some(value) = arg.strip_prefix("--fail-at=") {
        value.to_string()
    } else if arg == "--fail-at" {
        args.next().ok_or("Expected value after --fail-at")?
    } else {
        return Err(format!("Unknown argument `{arg}`"));
    };

    value
        .parse::<usize>()
        .map(Some)
        .map_err(|_| format!("Invalid record index `{value}`"))
}
